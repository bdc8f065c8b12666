use super::aggregator::check_precision;
use super::confidence::{check_sigma_max, DEFAULT_SIGMA_MAX};
use super::grades::GradeScale;
use super::ScoringResult;

pub const DEFAULT_ROUNDING_PRECISION: u32 = 1;
pub const MAX_ROUNDING_PRECISION: u32 = 6;

/// Engine settings shared by every scoring call.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    pub grade_scale: GradeScale,
    pub rounding_precision: u32,
    pub sigma_max: f64,
}

impl ScoringConfig {
    pub fn validate(&self) -> ScoringResult<()> {
        check_precision(self.rounding_precision)?;
        check_sigma_max(self.sigma_max)
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            grade_scale: GradeScale::standard(),
            rounding_precision: DEFAULT_ROUNDING_PRECISION,
            sigma_max: DEFAULT_SIGMA_MAX,
        }
    }
}
