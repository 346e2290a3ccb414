use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::portal::domain::UserId;
use crate::portal::repository::RepositoryError;

/// Account record as held by the authentication provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalUser {
    pub id: UserId,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email_verified: bool,
}

/// Outstanding single-use verification token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationToken {
    pub token: String,
    pub email: String,
    pub expires_at: DateTime<Utc>,
}

/// Message handed to the mail transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationMail {
    pub to: String,
    pub recipient_name: String,
    pub link: String,
    pub expires_at: DateTime<Utc>,
}

pub trait UserDirectory: Send + Sync {
    fn find_by_email(&self, email: &str) -> Result<Option<PortalUser>, RepositoryError>;
    fn mark_verified(&self, id: &UserId) -> Result<(), RepositoryError>;
}

/// Token storage. `replace` supersedes any outstanding token for the same email and
/// `take` removes the token it returns.
pub trait TokenStore: Send + Sync {
    fn replace(&self, token: VerificationToken) -> Result<(), RepositoryError>;
    fn take(&self, token: &str) -> Result<Option<VerificationToken>, RepositoryError>;
}

/// Outbound mail hook (SMTP relay, transactional mail API, ...).
pub trait Mailer: Send + Sync {
    fn send_verification(&self, mail: &VerificationMail) -> Result<(), MailError>;
}

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("mail transport unavailable: {0}")]
    Transport(String),
}
