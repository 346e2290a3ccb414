use super::domain::{Job, JobId, StudentProfile, UserId};

/// Read access to postings maintained by the placement office.
pub trait JobRepository: Send + Sync {
    fn fetch(&self, id: &JobId) -> Result<Option<Job>, RepositoryError>;
}

/// Student academic profiles, one per user.
pub trait ProfileRepository: Send + Sync {
    fn fetch(&self, user_id: &UserId) -> Result<Option<StudentProfile>, RepositoryError>;
    fn upsert(&self, profile: StudentProfile) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
