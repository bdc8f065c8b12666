use super::common::*;
use crate::predictions::{ApiResponse, MetricInput, PredictionView, ScoringRequest};
use crate::scoring::{GradeBreakpoint, PredictionEngine, ScoringError};

#[test]
fn request_deserializes_camel_case_payloads() {
    let request: ScoringRequest =
        serde_json::from_value(scoring_request_json()).expect("request parses");

    assert_eq!(request, scoring_request());
    assert!(!request.has_overrides());
}

#[test]
fn request_scores_with_default_engine() {
    let result = scoring_request()
        .score(&PredictionEngine::default())
        .expect("request scores");

    assert_eq!(result.score(), 80.0);
    assert_eq!(result.letter_grade(), "B");
    assert_eq!(result.confidence(), 100.0);
}

#[test]
fn missing_metric_value_is_rejected_not_defaulted() {
    let mut request = scoring_request();
    request.factors[0].metrics[0] = MetricInput {
        name: "count".to_string(),
        value: None,
        scale: Some(50.0),
        weight: None,
    };

    match request.score(&PredictionEngine::default()) {
        Err(ScoringError::InvalidConfiguration(message)) => {
            assert!(message.contains("'count'"));
            assert!(message.contains("'Commits'"));
            assert!(message.contains("missing a value"));
        }
        other => panic!("expected missing value error, got {other:?}"),
    }
}

#[test]
fn missing_scale_and_zero_scale_are_rejected() {
    let mut missing = scoring_request();
    missing.factors[1].metrics[0].scale = None;
    assert!(matches!(
        missing.score(&PredictionEngine::default()),
        Err(ScoringError::InvalidConfiguration(_))
    ));

    let mut zero = scoring_request();
    zero.factors[1].metrics[0].scale = Some(0.0);
    assert!(matches!(
        zero.score(&PredictionEngine::default()),
        Err(ScoringError::InvalidConfiguration(_))
    ));
}

#[test]
fn overrides_apply_to_a_single_request() {
    let engine = PredictionEngine::default();
    let mut request = scoring_request();
    request.breakpoints = Some(vec![
        GradeBreakpoint::new(75.0, "Pass"),
        GradeBreakpoint::new(0.0, "Fail"),
    ]);
    request.rounding_precision = Some(2);
    assert!(request.has_overrides());

    let result = request.score(&engine).expect("request scores");
    assert_eq!(result.letter_grade(), "Pass");
    assert!(result
        .summary()
        .last()
        .expect("overview")
        .contains("80.00"));
    assert_eq!(engine.config().rounding_precision, 1);
}

#[test]
fn invalid_override_breakpoints_are_rejected() {
    let mut request = scoring_request();
    request.breakpoints = Some(vec![GradeBreakpoint::new(60.0, "Pass")]);

    assert!(matches!(
        request.score(&PredictionEngine::default()),
        Err(ScoringError::IncompleteBreakpoints(_))
    ));
}

#[test]
fn response_envelope_round_trips_score_grade_and_confidence() {
    let result = scoring_request()
        .score(&PredictionEngine::default())
        .expect("request scores");

    let encoded = serde_json::to_string(&ApiResponse::ok(result.view())).expect("serializes");
    let decoded: ApiResponse<PredictionView> = serde_json::from_str(&encoded).expect("parses");

    assert!(decoded.success);
    let data = decoded.data.expect("data present");
    assert_eq!(data.score, result.score());
    assert_eq!(data.letter_grade, result.letter_grade());
    assert_eq!(data.confidence, result.confidence());
    assert_eq!(data.summary, result.summary());
    assert!(!encoded.contains("recordedAt"));
    assert!(!encoded.contains("\"error\""));
}

#[test]
fn failure_envelope_parses_without_data() {
    let encoded = serde_json::to_string(&ApiResponse::<PredictionView>::failure(
        "invalid weights for prediction: weights sum to 0.9, expected 1.0",
    ))
    .expect("serializes");
    assert!(!encoded.contains("\"data\""));

    let decoded: ApiResponse<PredictionView> = serde_json::from_str(&encoded).expect("parses");
    assert!(!decoded.success);
    assert!(decoded.data.is_none());
    assert_eq!(
        decoded.error.as_deref(),
        Some("invalid weights for prediction: weights sum to 0.9, expected 1.0")
    );
}
