use super::domain::Factor;
use super::{ScoringError, ScoringResult};

/// Dispersion at which confidence bottoms out at zero.
pub const DEFAULT_SIGMA_MAX: f64 = 0.5;

/// Confidence from the spread of normalized factor scores.
///
/// `100 * (1 - min(σ / sigma_max, 1))` with σ the population standard
/// deviation. Fewer than two factors have no spread and yield exactly 100.
pub fn estimate_confidence(factors: &[Factor], sigma_max: f64) -> ScoringResult<f64> {
    check_sigma_max(sigma_max)?;
    if factors.len() < 2 {
        return Ok(100.0);
    }

    let count = factors.len() as f64;
    let mean = factors.iter().map(Factor::normalized_score).sum::<f64>() / count;
    let variance = factors
        .iter()
        .map(|factor| {
            let delta = factor.normalized_score() - mean;
            delta * delta
        })
        .sum::<f64>()
        / count;
    let sigma = variance.sqrt();

    Ok(100.0 * (1.0 - (sigma / sigma_max).min(1.0)))
}

pub(crate) fn check_sigma_max(sigma_max: f64) -> ScoringResult<()> {
    if !sigma_max.is_finite() || sigma_max <= 0.0 {
        return Err(ScoringError::InvalidConfiguration(format!(
            "sigma_max must be a positive number, got {sigma_max}"
        )));
    }
    Ok(())
}
