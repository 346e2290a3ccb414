use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::repository::{Mailer, TokenStore, UserDirectory};
use super::service::VerificationService;
use crate::portal::http::{bad_request, error_response};

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ResendRequest {
    #[serde(default)]
    pub(crate) email: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct VerifyParams {
    #[serde(default)]
    pub(crate) token: Option<String>,
}

/// Router builder exposing the resend and redeem endpoints.
pub fn verification_router<U, T, M>(service: Arc<VerificationService<U, T, M>>) -> Router
where
    U: UserDirectory + 'static,
    T: TokenStore + 'static,
    M: Mailer + 'static,
{
    Router::new()
        .route("/auth/verify-email", get(verify_handler::<U, T, M>))
        .route(
            "/auth/resend-verification",
            post(resend_handler::<U, T, M>),
        )
        .with_state(service)
}

pub(crate) async fn resend_handler<U, T, M>(
    State(service): State<Arc<VerificationService<U, T, M>>>,
    payload: Result<Json<ResendRequest>, JsonRejection>,
) -> Response
where
    U: UserDirectory + 'static,
    T: TokenStore + 'static,
    M: Mailer + 'static,
{
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return bad_request(rejection.body_text()),
    };

    match service.resend(request.email.as_deref().unwrap_or_default()) {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({ "message": "Verification email sent successfully" })),
        )
            .into_response(),
        Err(err) => error_response(err.kind(), &err),
    }
}

pub(crate) async fn verify_handler<U, T, M>(
    State(service): State<Arc<VerificationService<U, T, M>>>,
    params: Result<Query<VerifyParams>, QueryRejection>,
) -> Redirect
where
    U: UserDirectory + 'static,
    T: TokenStore + 'static,
    M: Mailer + 'static,
{
    let params = params.map(|Query(params)| params).unwrap_or_default();
    let outcome = service.verify(params.token.as_deref());
    Redirect::temporary(&outcome.login_redirect())
}
