//! Domain evaluation pipeline: intercultural assessment feeding the
//! cross-domain aggregator.

use benchscore_core::metrics::METRICS;
use benchscore_core::{
    AggregatorConfig, CulturalContext, EvaluationAggregator, InterculturalCompetenceAssessor,
    TestMetadata,
};

const COMPETENT: &str = "I want to respectfully acknowledge the diverse perspectives in our team. \
    Despite our differences, we share common ground, and by finding middle ground \
    we can avoid generalizing about any one culture.";

const NEUTRAL: &str = "The report was delivered on Tuesday and the meeting ended early.";

fn multicultural() -> CulturalContext {
    CulturalContext {
        cultural_groups: vec!["japanese".into(), "american".into(), "brazilian".into()],
        ..Default::default()
    }
}

#[test]
fn test_competent_response_outscores_neutral_response() {
    let runner = InterculturalCompetenceAssessor::new().into_runner();
    let metadata = TestMetadata::default();

    let competent = runner.evaluate(COMPETENT, &metadata, &multicultural());
    let neutral = runner.evaluate(NEUTRAL, &metadata, &multicultural());

    assert_eq!(competent.dimensions.len(), 8);
    assert!(competent.overall_score > neutral.overall_score);
    assert!((0.0..=1.0).contains(&competent.overall_score));
    assert!(competent
        .cultural_markers()
        .contains(&"respectful_communication".to_string()));
}

#[test]
fn test_blank_response_is_unknown_and_empty() {
    let before = METRICS.domain_evaluations();
    let runner = InterculturalCompetenceAssessor::new().into_runner();
    let result = runner.evaluate("   ", &TestMetadata::default(), &multicultural());

    assert_eq!(result.evaluation_type, "unknown");
    assert_eq!(result.overall_score, 0.0);
    assert!(result.dimensions.is_empty());
    assert!(METRICS.domain_evaluations() > before);
}

#[test]
fn test_aggregating_a_single_domain() {
    let runner = InterculturalCompetenceAssessor::new().into_runner();
    let result = runner.evaluate(COMPETENT, &TestMetadata::default(), &multicultural());

    let aggregator = EvaluationAggregator::default();
    let aggregated = aggregator.aggregate_results(
        std::slice::from_ref(&result),
        Some(&["intercultural_competence", "creativity"]),
    );

    assert_eq!(aggregated.evaluation_coverage, 0.5);
    assert_eq!(aggregated.consensus_level, 1.0);
    assert!((aggregated.overall_score - result.overall_score).abs() < 1e-6);
    assert_eq!(aggregated.dimension_scores.len(), result.dimensions.len());

    let report = aggregator.consensus_report(&aggregated);
    assert_eq!(report.dimension_analysis.len(), result.dimensions.len());
    assert!(report.outlier_summary.is_empty());
}

#[test]
fn test_custom_aggregator_config_is_kept() {
    let config = AggregatorConfig {
        outlier_threshold: 1.5,
        ..Default::default()
    };
    let aggregator = EvaluationAggregator::new(config);
    assert_eq!(aggregator.config().outlier_threshold, 1.5);
}
