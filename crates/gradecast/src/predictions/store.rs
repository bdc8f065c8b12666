use chrono::{DateTime, Utc};
use serde::Serialize;

use super::view::PredictionView;
use crate::scoring::PredictionResult;

/// A prediction as recorded by the service layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredPrediction {
    pub result: PredictionResult,
    pub recorded_at: DateTime<Utc>,
}

impl StoredPrediction {
    pub fn new(result: PredictionResult, recorded_at: DateTime<Utc>) -> Self {
        Self {
            result,
            recorded_at,
        }
    }

    pub fn subject_id(&self) -> &str {
        self.result.subject_id()
    }

    pub fn view(&self) -> PredictionView {
        PredictionView {
            recorded_at: Some(self.recorded_at),
            ..self.result.view()
        }
    }
}

/// Storage abstraction so the service can run against any backend.
pub trait PredictionStore: Send + Sync {
    fn record(&self, prediction: StoredPrediction) -> Result<(), StoreError>;
    fn latest(&self, subject_id: &str) -> Result<Option<StoredPrediction>, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("prediction store unavailable: {0}")]
    Unavailable(String),
}
