use gradecast::scoring::{
    aggregate, estimate_confidence, normalize, Factor, GradeScale, Metric, DEFAULT_SIGMA_MAX,
};
use proptest::prelude::*;

fn single_metric_factor(name: &str, weight: f64, value: f64, scale: f64) -> Factor {
    Factor::new(
        name,
        weight,
        vec![Metric::new("m", value, scale).expect("valid metric")],
    )
    .expect("valid factor")
}

proptest! {
    #[test]
    fn normalize_stays_in_unit_interval(value in 0.0f64..1e9, scale in 1e-6f64..1e9) {
        let normalized = normalize(&Metric::new("m", value, scale).expect("valid metric"));
        prop_assert!((0.0..=1.0).contains(&normalized));
    }

    #[test]
    fn values_at_or_above_scale_saturate(scale in 1e-6f64..1e6, excess in 0.0f64..1e6) {
        let metric = Metric::new("m", scale + excess, scale).expect("valid metric");
        prop_assert_eq!(normalize(&metric), 1.0);
    }

    #[test]
    fn zero_value_normalizes_to_zero(scale in 1e-6f64..1e9) {
        prop_assert_eq!(normalize(&Metric::new("m", 0.0, scale).expect("valid metric")), 0.0);
    }

    #[test]
    fn aggregate_is_bounded_and_repeatable(
        values in prop::collection::vec(0.0f64..200.0, 1..8),
        precision in 0u32..=6,
    ) {
        let weight = 1.0 / values.len() as f64;
        let factors: Vec<Factor> = values
            .iter()
            .enumerate()
            .map(|(index, value)| single_metric_factor(&format!("f{index}"), weight, *value, 100.0))
            .collect();

        let first = aggregate(&factors, precision).expect("weights sum to one");
        let second = aggregate(&factors, precision).expect("weights sum to one");
        prop_assert!((0.0..=100.0).contains(&first));
        prop_assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn confidence_stays_in_range(values in prop::collection::vec(0.0f64..100.0, 1..8)) {
        let factors: Vec<Factor> = values
            .iter()
            .map(|value| single_metric_factor("f", 0.5, *value, 100.0))
            .collect();

        let confidence = estimate_confidence(&factors, DEFAULT_SIGMA_MAX).expect("confidence");
        prop_assert!((0.0..=100.0).contains(&confidence));
    }

    #[test]
    fn every_valid_score_maps_to_a_grade(score in 0.0f64..=100.0) {
        prop_assert!(GradeScale::standard().grade_for(score).is_ok());
    }
}
