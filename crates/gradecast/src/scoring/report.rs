use super::aggregator::aggregate;
use super::confidence::estimate_confidence;
use super::config::ScoringConfig;
use super::domain::{Factor, PredictionResult};
use super::grades::GradeScale;
use super::{ScoringError, ScoringResult};

/// Stateless engine applying a validated [`ScoringConfig`] to factor sets.
#[derive(Debug, Clone, Default)]
pub struct PredictionEngine {
    config: ScoringConfig,
}

impl PredictionEngine {
    pub fn new(config: ScoringConfig) -> ScoringResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn score(
        &self,
        subject_id: &str,
        factors: Vec<Factor>,
    ) -> ScoringResult<PredictionResult> {
        build(
            subject_id,
            factors,
            &self.config.grade_scale,
            self.config.rounding_precision,
            self.config.sigma_max,
        )
    }
}

/// Aggregates, grades, and estimates confidence for one subject.
pub fn build(
    subject_id: &str,
    factors: Vec<Factor>,
    scale: &GradeScale,
    rounding_precision: u32,
    sigma_max: f64,
) -> ScoringResult<PredictionResult> {
    if subject_id.trim().is_empty() {
        return Err(ScoringError::InvalidConfiguration(
            "subject id must not be blank".to_string(),
        ));
    }

    let score = aggregate(&factors, rounding_precision)?;
    let letter_grade = scale.grade_for(score)?.to_string();
    let confidence = estimate_confidence(&factors, sigma_max)?;

    let mut summary: Vec<String> = factors.iter().map(factor_line).collect();
    summary.push(format!(
        "Overall score {score:.precision$} with {confidence:.precision$}% confidence maps to grade {letter_grade}",
        precision = rounding_precision as usize
    ));

    Ok(PredictionResult {
        subject_id: subject_id.to_string(),
        score,
        letter_grade,
        confidence,
        factors,
        summary,
    })
}

fn factor_line(factor: &Factor) -> String {
    format!(
        "{}: {:.1}% normalized across {} metric(s), weight {:.0}%",
        factor.name(),
        factor.normalized_score() * 100.0,
        factor.raw_metrics().len(),
        factor.weight() * 100.0
    )
}
