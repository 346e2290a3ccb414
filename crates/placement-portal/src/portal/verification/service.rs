use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{error, info, warn};
use uuid::Uuid;

use super::repository::{
    MailError, Mailer, TokenStore, UserDirectory, VerificationMail, VerificationToken,
};
use crate::config::PortalConfig;
use crate::portal::http::ErrorKind;
use crate::portal::repository::RepositoryError;

const LOGIN_PATH: &str = "/login";

/// Link and lifetime settings for issued tokens.
#[derive(Debug, Clone)]
pub struct VerificationSettings {
    pub public_base_url: String,
    pub token_ttl: Duration,
}

impl From<&PortalConfig> for VerificationSettings {
    fn from(config: &PortalConfig) -> Self {
        Self {
            public_base_url: config.public_base_url.clone(),
            token_ttl: config.verification_ttl(),
        }
    }
}

pub struct VerificationService<U, T, M> {
    users: Arc<U>,
    tokens: Arc<T>,
    mailer: Arc<M>,
    settings: VerificationSettings,
}

impl<U, T, M> VerificationService<U, T, M>
where
    U: UserDirectory + 'static,
    T: TokenStore + 'static,
    M: Mailer + 'static,
{
    pub fn new(users: Arc<U>, tokens: Arc<T>, mailer: Arc<M>, settings: VerificationSettings) -> Self {
        Self {
            users,
            tokens,
            mailer,
            settings,
        }
    }

    /// Issue a fresh token for an unverified account and mail the verification link.
    pub fn resend(&self, email: &str) -> Result<VerificationMail, VerificationError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(VerificationError::MissingEmail);
        }

        let user = self
            .users
            .find_by_email(email)?
            .ok_or(VerificationError::UserNotFound)?;
        if user.email_verified {
            return Err(VerificationError::AlreadyVerified);
        }

        let token = VerificationToken {
            token: Uuid::new_v4().simple().to_string(),
            email: user.email.clone(),
            expires_at: Utc::now() + self.settings.token_ttl,
        };
        let mail = VerificationMail {
            to: user.email.clone(),
            recipient_name: user
                .name
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| "User".to_string()),
            link: format!(
                "{}/auth/verify-email?token={}",
                self.settings.public_base_url, token.token
            ),
            expires_at: token.expires_at,
        };

        let issued = token.token.clone();
        self.tokens.replace(token)?;

        if let Err(err) = self.mailer.send_verification(&mail) {
            error!(error = %err, user_id = %user.id.0, "verification email delivery failed");
            if let Err(revoke) = self.tokens.take(&issued) {
                warn!(error = %revoke, "failed to discard undelivered verification token");
            }
            return Err(VerificationError::Mail(err));
        }

        info!(user_id = %user.id.0, "verification email sent");
        Ok(mail)
    }

    pub fn verify(&self, token: Option<&str>) -> VerificationOutcome {
        self.verify_at(token, Utc::now())
    }

    /// Redeem a token as of `now`. The token is consumed whether or not it is still valid.
    pub fn verify_at(&self, token: Option<&str>, now: DateTime<Utc>) -> VerificationOutcome {
        let Some(token) = token.map(str::trim).filter(|token| !token.is_empty()) else {
            return VerificationOutcome::Failed(VerificationFailure::MissingToken);
        };

        match self.redeem(token, now) {
            Ok(outcome) => outcome,
            Err(err) => {
                error!(error = %err, "email verification failed");
                VerificationOutcome::Failed(VerificationFailure::Internal)
            }
        }
    }

    fn redeem(&self, token: &str, now: DateTime<Utc>) -> Result<VerificationOutcome, RepositoryError> {
        let Some(stored) = self.tokens.take(token)? else {
            return Ok(VerificationOutcome::Failed(VerificationFailure::InvalidToken));
        };

        if stored.expires_at <= now {
            warn!(expired_at = %stored.expires_at, "verification token expired");
            return Ok(VerificationOutcome::Failed(VerificationFailure::TokenExpired));
        }

        let Some(user) = self.users.find_by_email(&stored.email)? else {
            return Ok(VerificationOutcome::Failed(VerificationFailure::InvalidToken));
        };

        self.users.mark_verified(&user.id)?;
        info!(user_id = %user.id.0, "email verified");
        Ok(VerificationOutcome::Verified)
    }
}

/// Result of redeeming a token, rendered as a login-page redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationOutcome {
    Verified,
    Failed(VerificationFailure),
}

impl VerificationOutcome {
    pub fn login_redirect(self) -> String {
        match self {
            VerificationOutcome::Verified => format!("{LOGIN_PATH}?success=email-verified"),
            VerificationOutcome::Failed(failure) => {
                format!("{LOGIN_PATH}?error={}", failure.code())
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationFailure {
    MissingToken,
    InvalidToken,
    TokenExpired,
    Internal,
}

impl VerificationFailure {
    pub const fn code(self) -> &'static str {
        match self {
            VerificationFailure::MissingToken => "missing-token",
            VerificationFailure::InvalidToken => "invalid-token",
            VerificationFailure::TokenExpired => "token-expired",
            VerificationFailure::Internal => "internal-error",
        }
    }
}

/// Error raised while issuing verification mail.
#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
    #[error("Email is required")]
    MissingEmail,
    #[error("User not found")]
    UserNotFound,
    #[error("Email is already verified")]
    AlreadyVerified,
    #[error("Failed to send verification email")]
    Mail(#[source] MailError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl VerificationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            VerificationError::MissingEmail | VerificationError::AlreadyVerified => {
                ErrorKind::BadRequest
            }
            VerificationError::UserNotFound => ErrorKind::NotFound,
            VerificationError::Mail(_) => ErrorKind::Delivery,
            VerificationError::Repository(_) => ErrorKind::Internal,
        }
    }
}
