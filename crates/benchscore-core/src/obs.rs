//! Structured observability hooks for evaluation lifecycle events.
//!
//! Provides an evaluation-scoped span guard ([`EvaluationSpan`]) and one
//! emitter per lifecycle event. Events are emitted at `info!` except
//! degraded analyses, which are `warn!`.

use tracing::info;

/// RAII guard that enters an evaluation-scoped span.
///
/// ```ignore
/// let _span = EvaluationSpan::enter("haiku_cherry_blossom");
/// // every event below carries test_id = "haiku_cherry_blossom"
/// ```
pub struct EvaluationSpan {
    _span: tracing::span::EnteredSpan,
}

impl EvaluationSpan {
    /// Create and enter a span tagged with the test id.
    pub fn enter(test_id: &str) -> Self {
        let span = tracing::info_span!("benchscore.evaluation", test_id = %test_id);
        Self {
            _span: span.entered(),
        }
    }
}

/// Emit event: an enhanced evaluation started.
pub fn emit_evaluation_started(test_id: &str, category: &str) {
    info!(event = "evaluation.started", test_id = %test_id, category = %category);
}

/// Emit event: an enhanced evaluation produced its final score.
pub fn emit_evaluation_finished(test_id: &str, task_type: &str, overall_score: f64) {
    info!(
        event = "evaluation.finished",
        test_id = %test_id,
        task_type = %task_type,
        overall_score = overall_score,
    );
}

/// Emit event: task type resolved for a test.
pub fn emit_task_type_detected(test_id: &str, task_type: &str) {
    info!(event = "task_type.detected", test_id = %test_id, task_type = %task_type);
}

/// Emit event: a task-specific formula computed a score.
pub fn emit_task_score(task_type: &str, score: f64) {
    info!(event = "task_score.computed", task_type = %task_type, score = score);
}

/// Emit event: an analysis step failed internally and fell back to its
/// neutral result (warning level).
pub fn emit_analysis_degraded(operation: &str, error: &dyn std::fmt::Display) {
    tracing::warn!(event = "analysis.degraded", operation = %operation, error = %error);
    crate::metrics::METRICS.inc_analyses_degraded();
}

/// Emit event: domain results aggregated.
pub fn emit_aggregation_completed(domains: usize, overall_score: f64, consensus: f64) {
    info!(
        event = "aggregation.completed",
        domains = domains,
        overall_score = overall_score,
        consensus = consensus,
    );
}

/// Emit event: metadata extraction finished.
pub fn emit_metadata_extracted(domain: Option<&str>, evaluation_type: Option<&str>, confidence: f64) {
    info!(
        event = "metadata.extracted",
        domain = domain.unwrap_or("unknown"),
        evaluation_type = evaluation_type.unwrap_or("unknown"),
        confidence = confidence,
    );
}
