use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

const INTERNAL_MESSAGE: &str = "Internal server error";

/// Coarse failure classes shared by every portal endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Unauthorized,
    BadRequest,
    NotFound,
    Internal,
    /// Outbound delivery failed; answered with 500 but the message is kept.
    Delivery,
}

impl ErrorKind {
    pub const fn status_code(self) -> StatusCode {
        match self {
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Internal | ErrorKind::Delivery => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Render `{ "error": ... }`. Internal failures are logged and replaced with a generic message.
pub(crate) fn error_response(kind: ErrorKind, err: &dyn fmt::Display) -> Response {
    let message = match kind {
        ErrorKind::Internal => {
            error!(error = %err, "request failed");
            INTERNAL_MESSAGE.to_string()
        }
        _ => err.to_string(),
    };

    (kind.status_code(), Json(json!({ "error": message }))).into_response()
}

pub(crate) fn bad_request(message: impl Into<String>) -> Response {
    let message: String = message.into();
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
}
