//! End-to-end enhanced evaluation with the default rubric base evaluator.

use benchscore_core::{
    EnhancedUniversalEvaluator, ScoringConfig, SemanticCoherenceAnalyzer, TaskType, TestDefinition,
};
use serde_json::Value;

const HAIKU_DEFINITION: &str = r#"{
    "id": "haiku_spring_01",
    "name": "haiku_completion_spring",
    "category": "creative",
    "prompt": "Complete this haiku:\nCherry blossoms fall\nGentle spring breeze whispers soft\n___"
}"#;

fn definition(json: &str) -> TestDefinition {
    TestDefinition::from_json_str(json).expect("definition")
}

fn score(evaluator: &EnhancedUniversalEvaluator, response: &str, def: &TestDefinition) -> f64 {
    evaluator
        .evaluate_response_enhanced(response, def, None, None, false)
        .expect("evaluation")
        .overall_score()
}

#[test]
fn test_haiku_completion_scores_by_craft() {
    let evaluator = EnhancedUniversalEvaluator::new();
    let haiku = definition(HAIKU_DEFINITION);

    let result = evaluator
        .evaluate_response_enhanced(
            "Cherry petals fall, soft and silent to the ground",
            &haiku,
            None,
            None,
            false,
        )
        .expect("evaluation");
    assert_eq!(result.task_type, TaskType::HaikuCompletion);
    assert!((60.0..=95.0).contains(&result.overall_score()));
    assert_eq!(result.scoring_breakdown.enhanced_weight, 1.0);

    let refusal = score(&evaluator, "I don't know", &haiku);
    assert_eq!(refusal, 15.0);
    assert!(result.overall_score() > refusal);
}

#[test]
fn test_substantive_general_response_beats_terse_one() {
    let evaluator = EnhancedUniversalEvaluator::new();
    let general = definition(
        r#"{"id": "photosynthesis_01", "name": "explain_photosynthesis",
            "prompt": "Explain how photosynthesis works in green plants."}"#,
    );

    let detailed = "Photosynthesis converts light energy into chemical energy. First, chlorophyll \
        in the chloroplasts absorbs sunlight. Then the plant splits water molecules, releasing \
        oxygen. Finally, the Calvin cycle uses carbon dioxide and the captured energy to build \
        glucose, which therefore fuels growth and respiration throughout the plant.";
    let terse = "Plants use light.";

    let detailed_result = evaluator
        .evaluate_response_enhanced(detailed, &general, None, None, false)
        .expect("evaluation");
    assert_eq!(detailed_result.task_type, TaskType::General);
    assert!(detailed_result.overall_score() > score(&evaluator, terse, &general));
    assert!((0.0..=105.0).contains(&detailed_result.overall_score()));
}

#[test]
fn test_task_types_follow_definition_keywords() {
    let evaluator = EnhancedUniversalEvaluator::new().without_semantic_analyzer();
    let cases = [
        (
            r#"{"id": "c1", "category": "narrative", "prompt": "Complete the story of the lost fox."}"#,
            TaskType::CreativeCompletion,
        ),
        (
            r#"{"id": "c2", "prompt": "Describe a harvest tradition from your region."}"#,
            TaskType::CulturalReasoning,
        ),
        (
            r#"{"id": "c3", "category": "logical_reasoning", "prompt": "Which conclusion follows?"}"#,
            TaskType::LogicalReasoning,
        ),
    ];

    for (json, expected) in cases {
        let result = evaluator
            .evaluate_response_enhanced("A short but honest answer.", &definition(json), None, None, false)
            .expect("evaluation");
        assert_eq!(result.task_type, expected, "{json}");
        assert_eq!(result.scoring_breakdown.task_type, expected);
    }
}

#[test]
fn test_cultural_test_runs_domain_analysis() {
    let evaluator = EnhancedUniversalEvaluator::new();
    let cultural = definition(
        r#"{"id": "griot_02", "category": "griot tradition storytelling",
            "prompt": "Explain the role of the griot in preserving West African heritage."}"#,
    );
    let result = evaluator
        .evaluate_response_enhanced(
            "The griot respectfully preserves oral tradition and ancestral wisdom, \
             honouring the community's sacred heritage across generations.",
            &cultural,
            None,
            None,
            true,
        )
        .expect("evaluation");

    assert_eq!(result.task_type, TaskType::CulturalReasoning);
    let aggregated = result.domain_analysis.aggregated.as_ref().expect("aggregated");
    assert_eq!(
        result.enhanced_metrics.cultural_depth_score,
        aggregated.overall_score
    );
    assert_eq!(
        result.detailed_analysis["llm_evaluation_requested"],
        Value::Bool(true)
    );
}

#[test]
fn test_result_json_is_flat_and_finite() {
    let evaluator = EnhancedUniversalEvaluator::from_config(ScoringConfig::default())
        .with_analyzer(SemanticCoherenceAnalyzer::new());
    let haiku = definition(HAIKU_DEFINITION);
    let result = evaluator
        .evaluate_response_enhanced("Petals whisper down", &haiku, None, None, false)
        .expect("evaluation");

    let json = result.to_json().expect("json");
    assert_eq!(json["task_type"], "haiku_completion");
    assert_eq!(json["test_id"], "haiku_spring_01");
    assert!(json["enhanced_metrics"]["overall_score"].is_number());
    assert!(json["enhanced_metrics"]["exact_match_score"].is_number());
    assert_eq!(
        json["metrics"]["overall_score"],
        json["scoring_breakdown"]["final_score"]
    );
}
