//! Seven-step student profile wizard. Completing the final step publishes the
//! academic profile that application eligibility is checked against.

pub mod draft;
pub mod repository;
pub mod router;
pub mod service;
pub mod steps;


pub use draft::{ProfileDraft, StepSummary, WizardView};
pub use repository::DraftRepository;
pub use router::wizard_router;
pub use service::{WizardError, WizardService};
pub use steps::{ProfileSection, ProfileStep};
