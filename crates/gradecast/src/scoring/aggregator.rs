use super::config::MAX_ROUNDING_PRECISION;
use super::domain::Factor;
use super::{ScoringError, ScoringResult};

/// Allowed distance between a weight sum and `1.0`.
pub const WEIGHT_TOLERANCE: f64 = 1e-6;

// Decimal weights such as 0.5 + 0.499999 land a hair past the tolerance once
// converted to binary floats.
const REPRESENTATION_SLACK: f64 = 1e-12;

/// Checks that `weights` sum to one within [`WEIGHT_TOLERANCE`], returning
/// the actual sum.
pub fn validate_weights<I>(context: &str, weights: I) -> ScoringResult<f64>
where
    I: IntoIterator<Item = f64>,
{
    let sum: f64 = weights.into_iter().sum();
    if !sum.is_finite() || (sum - 1.0).abs() > WEIGHT_TOLERANCE + REPRESENTATION_SLACK {
        return Err(ScoringError::InvalidWeights {
            context: context.to_string(),
            sum,
        });
    }
    Ok(sum)
}

/// Weighted percentage score: `100 * Σ(normalized * weight)`.
///
/// The result is clamped to `[0, 100]` and rounded half-to-even at
/// `precision` decimal places.
pub fn aggregate(factors: &[Factor], precision: u32) -> ScoringResult<f64> {
    check_precision(precision)?;
    validate_weights("factors", factors.iter().map(Factor::weight))?;

    let weighted: f64 = factors
        .iter()
        .map(|factor| factor.normalized_score() * factor.weight())
        .sum();

    Ok(round_half_even((weighted * 100.0).clamp(0.0, 100.0), precision))
}

/// Banker's rounding at `precision` decimal places.
pub fn round_half_even(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision.min(MAX_ROUNDING_PRECISION) as i32);
    (value * factor).round_ties_even() / factor
}

pub(crate) fn check_precision(precision: u32) -> ScoringResult<()> {
    if precision > MAX_ROUNDING_PRECISION {
        return Err(ScoringError::InvalidConfiguration(format!(
            "rounding precision {precision} exceeds maximum of {MAX_ROUNDING_PRECISION}"
        )));
    }
    Ok(())
}
