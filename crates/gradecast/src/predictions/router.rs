use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use super::request::ScoringRequest;
use super::service::PredictionService;
use super::store::PredictionStore;
use super::view::{ApiResponse, PredictionView};
use crate::error::AppError;

/// Router exposing scoring and lookup endpoints.
///
/// `/predict-grades` is kept as an alias of `/api/v1/predictions` for
/// dashboards still calling the old function path.
pub fn prediction_router<S>(service: Arc<PredictionService<S>>) -> Router
where
    S: PredictionStore + 'static,
{
    Router::new()
        .route("/api/v1/predictions", post(predict_handler::<S>))
        .route("/predict-grades", post(predict_handler::<S>))
        .route(
            "/api/v1/predictions/:subject_id",
            get(latest_handler::<S>),
        )
        .with_state(service)
}

pub(crate) async fn predict_handler<S>(
    State(service): State<Arc<PredictionService<S>>>,
    payload: Result<Json<ScoringRequest>, JsonRejection>,
) -> Response
where
    S: PredictionStore + 'static,
{
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return AppError::InvalidRequest(rejection.body_text()).into_response(),
    };

    match service.predict(request) {
        Ok(stored) => (
            StatusCode::OK,
            Json(ApiResponse::ok(stored.result.view())),
        )
            .into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub(crate) async fn latest_handler<S>(
    State(service): State<Arc<PredictionService<S>>>,
    Path(subject_id): Path<String>,
) -> Response
where
    S: PredictionStore + 'static,
{
    match service.latest(&subject_id) {
        Ok(Some(stored)) => (StatusCode::OK, Json(ApiResponse::ok(stored.view()))).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<PredictionView>::failure(format!(
                "no prediction recorded for '{subject_id}'"
            ))),
        )
            .into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}
