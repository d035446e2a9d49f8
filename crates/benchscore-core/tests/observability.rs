//! Observability tests for evaluation lifecycle tracing.
//!
//! These tests verify that structured tracing events are emitted for the
//! evaluation lifecycle: start, task detection, scoring, degradation,
//! aggregation and finish.

use benchscore_core::metrics::METRICS;
use benchscore_core::obs::{
    emit_aggregation_completed, emit_analysis_degraded, emit_evaluation_finished,
    emit_evaluation_started, emit_metadata_extracted, emit_task_score, emit_task_type_detected,
    EvaluationSpan,
};
use benchscore_core::{EnhancedUniversalEvaluator, TestDefinition};
use tracing_test::traced_test;

/// Test: emit_evaluation_started creates an info-level event
#[traced_test]
#[test]
fn test_emit_evaluation_started_logs_test_id_and_category() {
    emit_evaluation_started("haiku_01", "creative");
}

/// Test: emit_evaluation_finished creates an info-level event
#[traced_test]
#[test]
fn test_emit_evaluation_finished_logs_score() {
    emit_evaluation_finished("haiku_01", "haiku_completion", 68.4);
}

/// Test: task detection and scoring events
#[traced_test]
#[test]
fn test_emit_task_events() {
    emit_task_type_detected("logic_07", "logical_reasoning");
    emit_task_score("logical_reasoning", 71.0);
}

/// Test: emit_analysis_degraded creates a warn-level event and counts it
#[traced_test]
#[test]
fn test_emit_analysis_degraded_logs_warning() {
    let before = METRICS.analyses_degraded();
    let error_msg = "similarity backend failed";
    emit_analysis_degraded("semantic_flow", &error_msg);

    assert!(METRICS.analyses_degraded() > before);
}

/// Test: aggregation and metadata events
#[traced_test]
#[test]
fn test_emit_aggregation_and_metadata_events() {
    emit_aggregation_completed(2, 0.64, 0.9);
    emit_metadata_extracted(Some("creativity"), Some("creative_expression"), 0.8);
    emit_metadata_extracted(None, None, 0.0);
}

/// Test: EvaluationSpan::enter creates an entered span without panicking
#[traced_test]
#[test]
fn test_evaluation_span_enter_creates_span() {
    let span = EvaluationSpan::enter("span-test");
    emit_task_score("general", 50.0);
    drop(span);
}

/// Test: a full evaluation emits its lifecycle events
#[traced_test]
#[test]
fn test_enhanced_evaluation_emits_lifecycle() {
    let definition = TestDefinition::from_json_str(
        r#"{"id": "traced_01", "prompt": "Summarise the water cycle."}"#,
    )
    .expect("definition");
    let result = EnhancedUniversalEvaluator::new()
        .evaluate_response_enhanced(
            "Water evaporates, condenses into clouds and falls as rain.",
            &definition,
            None,
            None,
            false,
        )
        .expect("evaluation");

    assert_eq!(result.test_id, "traced_01");
}
