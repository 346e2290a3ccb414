use std::sync::Arc;

use axum::http::{header, HeaderMap};

use super::domain::UserId;
use super::http::ErrorKind;
use super::repository::RepositoryError;

/// Session provider resolving opaque bearer tokens to portal users.
pub trait SessionStore: Send + Sync {
    fn resolve(&self, token: &str) -> Result<Option<UserId>, RepositoryError>;
}

/// Resolves the caller of a request from its `Authorization: Bearer` header.
#[derive(Clone)]
pub struct Authenticator {
    sessions: Arc<dyn SessionStore>,
}

impl Authenticator {
    pub fn new<S>(sessions: Arc<S>) -> Self
    where
        S: SessionStore + 'static,
    {
        Self { sessions }
    }

    pub fn authenticate(&self, headers: &HeaderMap) -> Result<UserId, AuthError> {
        let token = bearer_token(headers).ok_or(AuthError::Unauthorized)?;
        self.sessions
            .resolve(token)?
            .ok_or(AuthError::Unauthorized)
    }
}

/// Extract the token of a `Bearer` authorization header, if any.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Failure to establish who is calling.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error(transparent)]
    Store(#[from] RepositoryError),
}

impl AuthError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Unauthorized => ErrorKind::Unauthorized,
            AuthError::Store(_) => ErrorKind::Internal,
        }
    }
}
