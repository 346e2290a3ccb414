use crate::cli::ServeArgs;
use crate::infra::{AppState, Stores};
use crate::routes::portal_router;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use placement_portal::config::AppConfig;
use placement_portal::error::AppError;
use placement_portal::portal::verification::VerificationSettings;
use placement_portal::portal::SeedData;
use placement_portal::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(seed) = args.seed.take() {
        config.portal.seed_path = Some(seed);
    }

    telemetry::init(&config.telemetry)?;

    let stores = match &config.portal.seed_path {
        Some(path) => Stores::seeded(SeedData::load(path)?),
        None => Stores::default(),
    };

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let settings = VerificationSettings::from(&config.portal);
    let app = portal_router(&stores, settings)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "placement portal ready");

    axum::serve(listener, app).await?;
    Ok(())
}
