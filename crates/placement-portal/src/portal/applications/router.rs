use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use super::domain::{ApplicationId, ApplicationSubmission};
use super::repository::ApplicationRepository;
use super::service::{ApplicationService, ApplicationServiceError};
use crate::portal::http::{bad_request, error_response};
use crate::portal::repository::{JobRepository, ProfileRepository};

/// Router builder exposing the one-click application endpoints.
pub fn application_router<J, P, A>(service: Arc<ApplicationService<J, P, A>>) -> Router
where
    J: JobRepository + 'static,
    P: ProfileRepository + 'static,
    A: ApplicationRepository + 'static,
{
    Router::new()
        .route("/applications", post(submit_handler::<J, P, A>))
        .route(
            "/applications/:application_id",
            get(fetch_handler::<J, P, A>),
        )
        .with_state(service)
}

pub(crate) async fn submit_handler<J, P, A>(
    State(service): State<Arc<ApplicationService<J, P, A>>>,
    headers: HeaderMap,
    payload: Result<Json<ApplicationSubmission>, JsonRejection>,
) -> Response
where
    J: JobRepository + 'static,
    P: ProfileRepository + 'static,
    A: ApplicationRepository + 'static,
{
    let caller = match service.authenticate(&headers) {
        Ok(caller) => caller,
        Err(err) => return failure(err),
    };

    let Json(submission) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return bad_request(rejection.body_text()),
    };

    match service.submit(&caller, submission) {
        Ok(receipt) => (StatusCode::CREATED, Json(receipt)).into_response(),
        Err(err) => failure(err),
    }
}

pub(crate) async fn fetch_handler<J, P, A>(
    State(service): State<Arc<ApplicationService<J, P, A>>>,
    headers: HeaderMap,
    Path(application_id): Path<String>,
) -> Response
where
    J: JobRepository + 'static,
    P: ProfileRepository + 'static,
    A: ApplicationRepository + 'static,
{
    let result = service
        .authenticate(&headers)
        .and_then(|caller| service.get(&caller, &ApplicationId(application_id)));

    match result {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(err) => failure(err),
    }
}

fn failure(err: ApplicationServiceError) -> Response {
    error_response(err.kind(), &err)
}
