use super::draft::ProfileDraft;
use crate::portal::domain::UserId;
use crate::portal::repository::RepositoryError;

/// Storage for in-progress profile drafts, one per student.
pub trait DraftRepository: Send + Sync {
    fn fetch(&self, user_id: &UserId) -> Result<Option<ProfileDraft>, RepositoryError>;
    fn save(&self, draft: ProfileDraft) -> Result<(), RepositoryError>;
}
