use crate::scoring::{Factor, GradeBreakpoint, GradeScale, Metric};

pub(super) fn metric(name: &str, value: f64, scale: f64) -> Metric {
    Metric::new(name, value, scale).expect("valid metric")
}

pub(super) fn weighted_metric(name: &str, value: f64, scale: f64, weight: f64) -> Metric {
    Metric::weighted(name, value, scale, weight).expect("valid weighted metric")
}

/// Single-metric factor whose normalized score is `value / scale`.
pub(super) fn factor(name: &str, weight: f64, value: f64, scale: f64) -> Factor {
    Factor::new(name, weight, vec![metric("count", value, scale)]).expect("valid factor")
}

pub(super) fn abcf_scale() -> GradeScale {
    GradeScale::new(vec![
        GradeBreakpoint::new(90.0, "A"),
        GradeBreakpoint::new(80.0, "B"),
        GradeBreakpoint::new(70.0, "C"),
        GradeBreakpoint::new(0.0, "F"),
    ])
    .expect("valid scale")
}

pub(super) fn commits_and_quality() -> Vec<Factor> {
    vec![
        Factor::new("Commits", 0.5, vec![metric("count", 40.0, 50.0)]).expect("commits factor"),
        Factor::new("Quality", 0.5, vec![metric("lint", 80.0, 100.0)]).expect("quality factor"),
    ]
}
