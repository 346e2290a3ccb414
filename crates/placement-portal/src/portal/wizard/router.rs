use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde_json::Value;

use super::repository::DraftRepository;
use super::service::{WizardError, WizardService};
use super::WizardView;
use crate::portal::http::{bad_request, error_response};
use crate::portal::repository::ProfileRepository;

/// Router builder exposing the profile wizard endpoints.
pub fn wizard_router<D, P>(service: Arc<WizardService<D, P>>) -> Router
where
    D: DraftRepository + 'static,
    P: ProfileRepository + 'static,
{
    Router::new()
        .route("/profile/wizard", get(view_handler::<D, P>))
        .route("/profile/wizard/steps/:step", put(save_handler::<D, P>))
        .route("/profile/wizard/previous", post(previous_handler::<D, P>))
        .route("/profile/wizard/jump/:step", post(jump_handler::<D, P>))
        .with_state(service)
}

async fn view_handler<D, P>(
    State(service): State<Arc<WizardService<D, P>>>,
    headers: HeaderMap,
) -> Response
where
    D: DraftRepository + 'static,
    P: ProfileRepository + 'static,
{
    respond(
        service
            .authenticate(&headers)
            .and_then(|caller| service.view(&caller)),
    )
}

async fn save_handler<D, P>(
    State(service): State<Arc<WizardService<D, P>>>,
    headers: HeaderMap,
    Path(step): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response
where
    D: DraftRepository + 'static,
    P: ProfileRepository + 'static,
{
    let caller = match service.authenticate(&headers) {
        Ok(caller) => caller,
        Err(err) => return failure(err),
    };

    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return bad_request(rejection.body_text()),
    };

    respond(service.save_step(&caller, &step, payload))
}

async fn previous_handler<D, P>(
    State(service): State<Arc<WizardService<D, P>>>,
    headers: HeaderMap,
) -> Response
where
    D: DraftRepository + 'static,
    P: ProfileRepository + 'static,
{
    respond(
        service
            .authenticate(&headers)
            .and_then(|caller| service.previous(&caller)),
    )
}

async fn jump_handler<D, P>(
    State(service): State<Arc<WizardService<D, P>>>,
    headers: HeaderMap,
    Path(step): Path<String>,
) -> Response
where
    D: DraftRepository + 'static,
    P: ProfileRepository + 'static,
{
    respond(
        service
            .authenticate(&headers)
            .and_then(|caller| service.jump(&caller, &step)),
    )
}

fn respond(result: Result<WizardView, WizardError>) -> Response {
    match result {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(err) => failure(err),
    }
}

fn failure(err: WizardError) -> Response {
    error_response(err.kind(), &err)
}
