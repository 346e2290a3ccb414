//! Placement portal workflows: one-click job applications, email verification,
//! and the student profile wizard.

pub mod applications;
pub mod auth;
pub mod domain;
pub mod eligibility;
pub mod http;
pub mod repository;
pub mod seed;
pub mod verification;
pub mod wizard;

pub use auth::{AuthError, Authenticator, SessionStore};
pub use domain::{
    CustomField, FieldResponse, Job, JobId, JobStatus, StudentProfile, Tier, UserId,
};
pub use http::ErrorKind;
pub use repository::{JobRepository, ProfileRepository, RepositoryError};
pub use seed::{SeedData, SeedError};
