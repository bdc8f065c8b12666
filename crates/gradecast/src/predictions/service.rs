use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error, warn};

use super::request::ScoringRequest;
use super::store::{PredictionStore, StoreError, StoredPrediction};
use crate::scoring::{PredictionEngine, ScoringError};

/// Service composing the scoring engine with a prediction store.
pub struct PredictionService<S> {
    store: Arc<S>,
    engine: Arc<PredictionEngine>,
}

impl<S> PredictionService<S>
where
    S: PredictionStore + 'static,
{
    pub fn new(store: Arc<S>, engine: PredictionEngine) -> Self {
        Self {
            store,
            engine: Arc::new(engine),
        }
    }

    pub fn engine(&self) -> &PredictionEngine {
        &self.engine
    }

    /// Score a request and record the outcome.
    pub fn predict(
        &self,
        request: ScoringRequest,
    ) -> Result<StoredPrediction, PredictionServiceError> {
        let subject_id = request.subject_id.clone();
        let result = match request.score(&self.engine) {
            Ok(result) => result,
            Err(err) => {
                warn!(%subject_id, error = %err, "prediction rejected");
                return Err(err.into());
            }
        };

        let stored = StoredPrediction::new(result, Utc::now());
        if let Err(err) = self.store.record(stored.clone()) {
            error!(%subject_id, error = %err, prediction = ?stored.result, "failed to record prediction");
            return Err(err.into());
        }

        debug!(
            %subject_id,
            score = stored.result.score(),
            letter_grade = stored.result.letter_grade(),
            confidence = stored.result.confidence(),
            "prediction recorded"
        );
        Ok(stored)
    }

    /// Most recent prediction recorded for `subject_id`.
    pub fn latest(
        &self,
        subject_id: &str,
    ) -> Result<Option<StoredPrediction>, PredictionServiceError> {
        Ok(self.store.latest(subject_id)?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PredictionServiceError {
    #[error(transparent)]
    Scoring(#[from] ScoringError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
