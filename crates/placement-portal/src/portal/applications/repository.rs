use super::domain::{ApplicationId, ApplicationRecord};
use crate::portal::repository::RepositoryError;

/// Storage abstraction for applications.
///
/// `insert` persists the record and every response row as one unit; implementations
/// must not leave a partially written application behind.
pub trait ApplicationRepository: Send + Sync {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError>;
    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError>;
}
