use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scoring::PredictionResult;

/// Client-facing projection of a prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionView {
    pub subject_id: String,
    pub score: f64,
    pub letter_grade: String,
    pub confidence: f64,
    pub summary: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<DateTime<Utc>>,
}

impl PredictionResult {
    pub fn view(&self) -> PredictionView {
        PredictionView {
            subject_id: self.subject_id().to_string(),
            score: self.score(),
            letter_grade: self.letter_grade().to_string(),
            confidence: self.confidence(),
            summary: self.summary().to_vec(),
            recorded_at: None,
        }
    }
}

/// `{ success, data }` / `{ success, error }` envelope used by every
/// prediction endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}
