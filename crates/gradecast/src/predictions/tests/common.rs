use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::{json, Value};

use crate::predictions::{
    prediction_router, FactorInput, MetricInput, PredictionService, PredictionStore,
    ScoringRequest, StoreError, StoredPrediction,
};
use crate::scoring::PredictionEngine;

#[derive(Default)]
pub(super) struct MemoryStore {
    pub(super) records: Mutex<HashMap<String, Vec<StoredPrediction>>>,
}

impl PredictionStore for MemoryStore {
    fn record(&self, prediction: StoredPrediction) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        guard
            .entry(prediction.subject_id().to_string())
            .or_default()
            .push(prediction);
        Ok(())
    }

    fn latest(&self, subject_id: &str) -> Result<Option<StoredPrediction>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard
            .get(subject_id)
            .and_then(|history| history.last())
            .cloned())
    }
}

pub(super) struct UnavailableStore;

impl PredictionStore for UnavailableStore {
    fn record(&self, _prediction: StoredPrediction) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("maintenance".to_string()))
    }

    fn latest(&self, _subject_id: &str) -> Result<Option<StoredPrediction>, StoreError> {
        Err(StoreError::Unavailable("maintenance".to_string()))
    }
}

pub(super) fn metric_input(name: &str, value: f64, scale: f64) -> MetricInput {
    MetricInput {
        name: name.to_string(),
        value: Some(value),
        scale: Some(scale),
        weight: None,
    }
}

pub(super) fn scoring_request() -> ScoringRequest {
    ScoringRequest {
        subject_id: "student-17".to_string(),
        factors: vec![
            FactorInput {
                name: "Commits".to_string(),
                weight: 0.5,
                metrics: vec![metric_input("count", 40.0, 50.0)],
            },
            FactorInput {
                name: "Quality".to_string(),
                weight: 0.5,
                metrics: vec![metric_input("lint", 80.0, 100.0)],
            },
        ],
        breakpoints: None,
        rounding_precision: None,
        sigma_max: None,
    }
}

pub(super) fn scoring_request_json() -> Value {
    json!({
        "subjectId": "student-17",
        "factors": [
            { "name": "Commits", "weight": 0.5, "metrics": [{ "name": "count", "value": 40, "scale": 50 }] },
            { "name": "Quality", "weight": 0.5, "metrics": [{ "name": "lint", "value": 80, "scale": 100 }] }
        ]
    })
}

pub(super) fn build_service() -> (PredictionService<MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let service = PredictionService::new(store.clone(), PredictionEngine::default());
    (service, store)
}

pub(super) fn router_with_service<S>(service: PredictionService<S>) -> axum::Router
where
    S: PredictionStore + 'static,
{
    prediction_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
