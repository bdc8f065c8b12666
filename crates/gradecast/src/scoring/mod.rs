//! Deterministic weighted-factor scoring engine.
//!
//! Raw metrics are normalized per factor, combined by weight into a
//! percentage, mapped onto a letter grade, and paired with a confidence value
//! derived from how much the factors disagree with each other.

mod aggregator;
mod confidence;
mod config;
mod domain;
mod grades;
mod normalizer;
mod report;

#[cfg(test)]
mod tests;

pub use aggregator::{aggregate, round_half_even, validate_weights, WEIGHT_TOLERANCE};
pub use confidence::{estimate_confidence, DEFAULT_SIGMA_MAX};
pub use config::{ScoringConfig, DEFAULT_ROUNDING_PRECISION, MAX_ROUNDING_PRECISION};
pub use domain::{Factor, Metric, PredictionResult};
pub use grades::{map_to_grade, GradeBreakpoint, GradeScale};
pub use normalizer::normalize;
pub use report::{build, PredictionEngine};

/// Validation failures raised by the scoring engine.
///
/// Every variant describes bad caller input; none of them are retryable.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("invalid weights for {context}: weights sum to {sum}, expected 1.0")]
    InvalidWeights { context: String, sum: f64 },
    #[error("incomplete grade breakpoints: {0}")]
    IncompleteBreakpoints(String),
}

pub type ScoringResult<T> = Result<T, ScoringError>;
