//! One-click job applications: eligibility-checked intake persisted with its field responses.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{ApplicationId, ApplicationRecord, ApplicationSubmission, SubmissionReceipt};
pub use repository::ApplicationRepository;
pub use router::application_router;
pub use service::{ApplicationService, ApplicationServiceError};
