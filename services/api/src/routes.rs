use crate::infra::{AppState, LogMailer, Stores};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use placement_portal::portal::applications::{application_router, ApplicationService};
use placement_portal::portal::verification::{
    verification_router, VerificationService, VerificationSettings,
};
use placement_portal::portal::wizard::{wizard_router, WizardService};
use placement_portal::portal::Authenticator;
use serde_json::json;
use std::sync::Arc;

/// Compose the portal endpoints with the operational probes.
pub(crate) fn portal_router(stores: &Stores, settings: VerificationSettings) -> Router {
    let authenticator = Authenticator::new(Arc::clone(&stores.sessions));

    let applications = Arc::new(ApplicationService::new(
        authenticator.clone(),
        Arc::clone(&stores.jobs),
        Arc::clone(&stores.profiles),
        Arc::clone(&stores.applications),
    ));
    let verification = Arc::new(VerificationService::new(
        Arc::clone(&stores.users),
        Arc::clone(&stores.tokens),
        Arc::new(LogMailer),
        settings,
    ));
    let wizard = Arc::new(WizardService::new(
        authenticator,
        Arc::clone(&stores.drafts),
        Arc::clone(&stores.profiles),
    ));

    application_router(applications)
        .merge(verification_router(verification))
        .merge(wizard_router(wizard))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
