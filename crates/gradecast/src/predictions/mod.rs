//! Service boundary around the scoring engine: request validation, response
//! views, storage of recorded predictions, and HTTP routes.

pub mod request;
pub mod router;
pub mod service;
pub mod store;
pub mod view;

#[cfg(test)]
mod tests;

pub use request::{FactorInput, MetricInput, ScoringRequest};
pub use router::prediction_router;
pub use service::{PredictionService, PredictionServiceError};
pub use store::{PredictionStore, StoreError, StoredPrediction};
pub use view::{ApiResponse, PredictionView};
