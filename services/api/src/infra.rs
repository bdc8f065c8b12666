use gradecast::predictions::{PredictionStore, StoreError, StoredPrediction};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local prediction history keyed by subject id.
#[derive(Default, Clone)]
pub(crate) struct InMemoryPredictionStore {
    records: Arc<Mutex<HashMap<String, Vec<StoredPrediction>>>>,
}

impl InMemoryPredictionStore {
    fn guard(&self) -> Result<MutexGuard<'_, HashMap<String, Vec<StoredPrediction>>>, StoreError> {
        self.records
            .lock()
            .map_err(|_| StoreError::Unavailable("prediction store mutex poisoned".to_string()))
    }
}

impl PredictionStore for InMemoryPredictionStore {
    fn record(&self, prediction: StoredPrediction) -> Result<(), StoreError> {
        let mut guard = self.guard()?;
        guard
            .entry(prediction.subject_id().to_string())
            .or_default()
            .push(prediction);
        Ok(())
    }

    fn latest(&self, subject_id: &str) -> Result<Option<StoredPrediction>, StoreError> {
        let guard = self.guard()?;
        Ok(guard
            .get(subject_id)
            .and_then(|history| history.iter().max_by_key(|stored| stored.recorded_at))
            .cloned())
    }
}
