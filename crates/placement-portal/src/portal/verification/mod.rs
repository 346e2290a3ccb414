//! Email verification: single-use tokens mailed to students and redeemed via a login redirect.

pub mod repository;
pub mod router;
pub mod service;

pub use repository::{
    MailError, Mailer, PortalUser, TokenStore, UserDirectory, VerificationMail,
    VerificationToken,
};
pub use router::verification_router;
pub use service::{
    VerificationError, VerificationFailure, VerificationOutcome, VerificationService,
    VerificationSettings,
};
