use serde::{Deserialize, Serialize};

use crate::scoring::{
    Factor, GradeBreakpoint, GradeScale, Metric, PredictionEngine, PredictionResult,
    ScoringConfig, ScoringError, ScoringResult,
};

/// JSON body accepted by the prediction endpoints.
///
/// The optional fields override the server's scoring defaults for this
/// request only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringRequest {
    pub subject_id: String,
    pub factors: Vec<FactorInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakpoints: Option<Vec<GradeBreakpoint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rounding_precision: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sigma_max: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorInput {
    pub name: String,
    pub weight: f64,
    #[serde(default)]
    pub metrics: Vec<MetricInput>,
}

/// Raw metric as received. `value` and `scale` are optional here so that a
/// missing measurement surfaces as a validation error naming the metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricInput {
    pub name: String,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub scale: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl MetricInput {
    pub fn into_metric(self, factor_name: &str) -> ScoringResult<Metric> {
        let value = self.value.ok_or_else(|| {
            ScoringError::InvalidConfiguration(format!(
                "metric '{}' of factor '{factor_name}' is missing a value",
                self.name
            ))
        })?;
        let scale = self.scale.ok_or_else(|| {
            ScoringError::InvalidConfiguration(format!(
                "metric '{}' of factor '{factor_name}' is missing a scale",
                self.name
            ))
        })?;

        match self.weight {
            Some(weight) => Metric::weighted(self.name, value, scale, weight),
            None => Metric::new(self.name, value, scale),
        }
    }
}

impl FactorInput {
    pub fn into_factor(self) -> ScoringResult<Factor> {
        let FactorInput {
            name,
            weight,
            metrics,
        } = self;

        let metrics = metrics
            .into_iter()
            .map(|metric| metric.into_metric(&name))
            .collect::<ScoringResult<Vec<_>>>()?;

        Factor::new(name, weight, metrics)
    }
}

impl ScoringRequest {
    pub fn has_overrides(&self) -> bool {
        self.breakpoints.is_some() || self.rounding_precision.is_some() || self.sigma_max.is_some()
    }

    /// Layers the request overrides over `defaults`.
    pub fn scoring_config(&self, defaults: &ScoringConfig) -> ScoringResult<ScoringConfig> {
        let mut config = defaults.clone();
        if let Some(breakpoints) = &self.breakpoints {
            config.grade_scale = GradeScale::new(breakpoints.clone())?;
        }
        if let Some(precision) = self.rounding_precision {
            config.rounding_precision = precision;
        }
        if let Some(sigma_max) = self.sigma_max {
            config.sigma_max = sigma_max;
        }
        config.validate()?;
        Ok(config)
    }

    /// Validates every factor, failing on the first bad one.
    pub fn into_factors(self) -> ScoringResult<(String, Vec<Factor>)> {
        let factors = self
            .factors
            .into_iter()
            .map(FactorInput::into_factor)
            .collect::<ScoringResult<Vec<_>>>()?;
        Ok((self.subject_id, factors))
    }

    /// Scores the request with `engine`, or with a one-off engine when the
    /// request carries overrides.
    pub fn score(self, engine: &PredictionEngine) -> ScoringResult<PredictionResult> {
        let overridden = if self.has_overrides() {
            Some(PredictionEngine::new(self.scoring_config(engine.config())?)?)
        } else {
            None
        };

        let (subject_id, factors) = self.into_factors()?;
        overridden
            .as_ref()
            .unwrap_or(engine)
            .score(&subject_id, factors)
    }
}
