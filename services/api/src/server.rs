use crate::cli::ServeArgs;
use crate::cors::CorsPolicy;
use crate::infra::{AppState, InMemoryPredictionStore};
use crate::routes::with_prediction_routes;
use axum_prometheus::PrometheusMetricLayer;
use gradecast::config::AppConfig;
use gradecast::error::AppError;
use gradecast::predictions::PredictionService;
use gradecast::scoring::PredictionEngine;
use gradecast::telemetry;
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

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let engine = PredictionEngine::new(config.scoring.clone())?;
    let store = Arc::new(InMemoryPredictionStore::default());
    let service = Arc::new(PredictionService::new(store, engine));
    let cors = CorsPolicy::from_config(&config.cors)?;

    let app = with_prediction_routes(service, cors, app_state).layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        rounding_precision = config.scoring.rounding_precision,
        sigma_max = config.scoring.sigma_max,
        "grade prediction service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
