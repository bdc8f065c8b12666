use super::aggregator::validate_weights;
use super::domain::Metric;
use super::{ScoringError, ScoringResult};

/// Maps a metric onto `[0, 1]`: `clamp(value, 0, scale) / scale`.
///
/// `Metric::new` rejects a non-positive scale, so this cannot fail. Values at
/// or above the scale saturate at exactly `1.0`.
pub fn normalize(metric: &Metric) -> f64 {
    let scale = metric.scale();
    metric.value().clamp(0.0, scale) / scale
}

/// Combines the metrics of one factor into its normalized score.
///
/// Unweighted metrics are averaged. When every metric carries a sub-weight the
/// weighted average is used instead and the sub-weights must sum to one.
pub(crate) fn normalize_factor(factor_name: &str, metrics: &[Metric]) -> ScoringResult<f64> {
    if metrics.is_empty() {
        return Err(ScoringError::InvalidConfiguration(format!(
            "factor '{factor_name}' has no metrics"
        )));
    }

    let weighted = metrics.iter().filter(|metric| metric.weight().is_some()).count();
    let score = if weighted == 0 {
        let total: f64 = metrics.iter().map(normalize).sum();
        total / metrics.len() as f64
    } else if weighted == metrics.len() {
        validate_weights(
            &format!("metrics of factor '{factor_name}'"),
            metrics.iter().filter_map(Metric::weight),
        )?;
        metrics
            .iter()
            .map(|metric| normalize(metric) * metric.weight().unwrap_or_default())
            .sum()
    } else {
        return Err(ScoringError::InvalidConfiguration(format!(
            "factor '{factor_name}' mixes weighted and unweighted metrics ({weighted} of {} weighted)",
            metrics.len()
        )));
    };

    // sub-weights within tolerance can push the average just past 1.0
    Ok(score.clamp(0.0, 1.0))
}
