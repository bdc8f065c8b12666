use serde::Serialize;

use super::normalizer::normalize_factor;
use super::{ScoringError, ScoringResult};

/// A named raw measurement together with the value treated as 100%.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    name: String,
    value: f64,
    scale: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    weight: Option<f64>,
}

impl Metric {
    /// Captures a metric, rejecting a non-positive scale up front so that
    /// normalization itself can never fail.
    pub fn new(name: impl Into<String>, value: f64, scale: f64) -> ScoringResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ScoringError::InvalidConfiguration(
                "metric name must not be blank".to_string(),
            ));
        }
        if !value.is_finite() {
            return Err(ScoringError::InvalidConfiguration(format!(
                "metric '{name}' has non-finite value {value}"
            )));
        }
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ScoringError::InvalidConfiguration(format!(
                "metric '{name}' has scale {scale}; scale must be greater than zero"
            )));
        }

        Ok(Self {
            name,
            value,
            scale,
            weight: None,
        })
    }

    /// Captures a metric carrying a sub-weight inside its factor.
    pub fn weighted(
        name: impl Into<String>,
        value: f64,
        scale: f64,
        weight: f64,
    ) -> ScoringResult<Self> {
        let mut metric = Self::new(name, value, scale)?;
        if !weight.is_finite() || !(0.0..=1.0).contains(&weight) {
            return Err(ScoringError::InvalidConfiguration(format!(
                "metric '{}' has sub-weight {weight} outside [0, 1]",
                metric.name
            )));
        }
        metric.weight = Some(weight);
        Ok(metric)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn weight(&self) -> Option<f64> {
        self.weight
    }
}

/// Weighted scoring dimension built from one or more raw metrics.
///
/// The normalized score is derived once at construction and is always in
/// `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Factor {
    name: String,
    weight: f64,
    raw_metrics: Vec<Metric>,
    normalized_score: f64,
}

impl Factor {
    pub fn new(name: impl Into<String>, weight: f64, metrics: Vec<Metric>) -> ScoringResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ScoringError::InvalidConfiguration(
                "factor name must not be blank".to_string(),
            ));
        }
        if !weight.is_finite() || !(0.0..=1.0).contains(&weight) {
            return Err(ScoringError::InvalidConfiguration(format!(
                "factor '{name}' has weight {weight} outside [0, 1]"
            )));
        }

        let normalized_score = normalize_factor(&name, &metrics)?;

        Ok(Self {
            name,
            weight,
            raw_metrics: metrics,
            normalized_score,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn raw_metrics(&self) -> &[Metric] {
        &self.raw_metrics
    }

    pub fn normalized_score(&self) -> f64 {
        self.normalized_score
    }
}

/// Immutable outcome of a single scoring call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    pub(crate) subject_id: String,
    pub(crate) score: f64,
    pub(crate) letter_grade: String,
    pub(crate) confidence: f64,
    pub(crate) factors: Vec<Factor>,
    pub(crate) summary: Vec<String>,
}

impl PredictionResult {
    pub fn subject_id(&self) -> &str {
        &self.subject_id
    }

    /// Weighted score in `[0, 100]`, rounded to the configured precision.
    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn letter_grade(&self) -> &str {
        &self.letter_grade
    }

    /// Agreement between factors in `[0, 100]`; 100 means no dispersion.
    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn factors(&self) -> &[Factor] {
        &self.factors
    }

    /// One line per factor followed by the overview line.
    pub fn summary(&self) -> &[String] {
        &self.summary
    }
}
