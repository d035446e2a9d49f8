//! Enhanced universal evaluator.
//!
//! Runs the base rubric evaluator, adds the multi-tier scores, the
//! integration, cultural and domain analyses, then hands the final score to
//! the formula for the detected task type.
//!
//! ```ignore
//! let evaluator = EnhancedUniversalEvaluator::new();
//! let result = evaluator.evaluate_response_enhanced(response, &definition, None, None, false)?;
//! println!("{}", result.metrics.overall_score);
//! ```

pub mod formulas;
pub mod haiku;
pub mod task;
pub mod tiers;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::aggregator::{AggregatedEvaluationResult, EvaluationAggregator};
use crate::coherence::SemanticCoherenceAnalyzer;
use crate::config::ScoringConfig;
use crate::definition::TestDefinition;
use crate::domain::evaluator::MultiDimensionalEvaluator;
use crate::domain::CulturalContext;
use crate::error::Result;
use crate::intercultural::InterculturalCompetenceAssessor;
use crate::metadata::{DomainMetadataExtractor, ExtractionResult};
use crate::metrics::METRICS;
use crate::obs::{self, EvaluationSpan};
use crate::rubric::{
    BaseEvaluator, EvaluationMetrics, EvaluationRequest, ReasoningType, RubricEvaluator,
};
use crate::stats::{finite, round_to};

pub use formulas::{ComponentWeights, GeneralScore};
pub use haiku::HaikuScores;
pub use task::{detect_task_type, TaskType};
pub use tiers::{
    content_quality_score, response_substance_score, CulturalAnalysis, IntegrationAnalysis,
    MultiTierScores,
};

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Base metrics plus every enhanced signal.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EnhancedEvaluationMetrics {
    #[serde(flatten)]
    pub base: EvaluationMetrics,
    pub exact_match_score: f64,
    pub partial_match_score: f64,
    pub semantic_similarity_score: f64,
    pub domain_synthesis_score: f64,
    pub conceptual_creativity_score: f64,
    pub integration_quality: f64,
    pub synthesis_coherence: f64,
    /// Aggregated domain-analysis score; 0 for non-cultural material.
    pub cultural_depth_score: f64,
    pub tradition_accuracy_score: f64,
    pub cross_cultural_sensitivity: f64,
}

impl EnhancedEvaluationMetrics {
    fn sanitize(&mut self) {
        let base = &mut self.base;
        for value in [
            &mut base.organization_quality,
            &mut base.technical_accuracy,
            &mut base.completeness,
            &mut base.thoroughness,
            &mut base.reliability,
            &mut base.scope_coverage,
            &mut base.domain_appropriateness,
            &mut base.overall_score,
            &mut base.confidence_score,
            &mut self.exact_match_score,
            &mut self.partial_match_score,
            &mut self.semantic_similarity_score,
            &mut self.domain_synthesis_score,
            &mut self.conceptual_creativity_score,
            &mut self.integration_quality,
            &mut self.synthesis_coherence,
            &mut self.cultural_depth_score,
            &mut self.tradition_accuracy_score,
            &mut self.cross_cultural_sensitivity,
        ] {
            *value = finite(*value);
        }
    }
}

/// How the final score was put together.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ScoringBreakdown {
    pub task_type: TaskType,
    /// Base rubric score before the task formula.
    pub base_score: f64,
    pub final_score: f64,
    pub base_weight: f64,
    pub enhanced_weight: f64,
    /// Only the general formula weighs the enhanced components.
    pub component_weights: Option<ComponentWeights>,
    pub enhanced_score: Option<f64>,
    pub content_adjustment: f64,
    pub multi_tier_scores: MultiTierScores,
    /// Formula-specific sub-scores.
    pub task_components: Map<String, Value>,
    /// The test's own `scoring` block, echoed for reporting.
    pub test_specific_config: Map<String, Value>,
}

/// Domain metadata extraction and, for cultural material, the aggregated
/// domain evaluation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DomainAnalysis {
    pub extraction: ExtractionResult,
    pub validation_issues: Vec<String>,
    /// Extracted context merged with the definition's, domain defaults filled in.
    pub cultural_context: CulturalContext,
    pub aggregated: Option<AggregatedEvaluationResult>,
}

/// Output of [`EnhancedUniversalEvaluator::evaluate_response_enhanced`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnhancedEvaluationResult {
    pub test_id: String,
    /// Base metrics with `overall_score` replaced by the final score.
    pub metrics: EvaluationMetrics,
    pub reasoning_type: ReasoningType,
    pub detailed_analysis: Map<String, Value>,
    pub recommendations: Vec<String>,
    pub timestamp: DateTime<Utc>,
    pub enhanced_metrics: EnhancedEvaluationMetrics,
    pub scoring_breakdown: ScoringBreakdown,
    pub integration_analysis: IntegrationAnalysis,
    pub task_type: TaskType,
    pub domain_analysis: DomainAnalysis,
}

impl EnhancedEvaluationResult {
    pub fn overall_score(&self) -> f64 {
        self.metrics.overall_score
    }

    /// Serialize through [`ensure_json_serializable`].
    pub fn to_json(&self) -> Result<Value> {
        Ok(ensure_json_serializable(serde_json::to_value(self)?))
    }
}

/// Normalize a JSON tree for plain encoders: floats are rounded to six
/// places and whole floats are kept as floats.
pub fn ensure_json_serializable(value: Value) -> Value {
    match value {
        Value::Number(number) if number.is_f64() => {
            let rounded = round_to(finite(number.as_f64().unwrap_or(0.0)), 6);
            serde_json::Number::from_f64(rounded)
                .map(Value::Number)
                .unwrap_or_else(|| json!(0.0))
        }
        Value::Array(items) => Value::Array(items.into_iter().map(ensure_json_serializable).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, ensure_json_serializable(v)))
                .collect(),
        ),
        other => other,
    }
}

// ---------------------------------------------------------------------------
// EnhancedUniversalEvaluator
// ---------------------------------------------------------------------------

/// Multi-tier evaluator layered over a [`BaseEvaluator`].
///
/// Read-only after construction; share it behind an `Arc` for concurrent
/// evaluations.
#[derive(Clone)]
pub struct EnhancedUniversalEvaluator {
    base: Arc<dyn BaseEvaluator>,
    analyzer: Option<SemanticCoherenceAnalyzer>,
    extractor: DomainMetadataExtractor,
    assessor: MultiDimensionalEvaluator<InterculturalCompetenceAssessor>,
    aggregator: EvaluationAggregator,
    config: ScoringConfig,
}

impl Default for EnhancedUniversalEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EnhancedUniversalEvaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnhancedUniversalEvaluator")
            .field("analyzer", &self.analyzer)
            .field("config", &self.config)
            .finish()
    }
}

impl EnhancedUniversalEvaluator {
    /// Rubric base evaluator and TF-IDF analyzer with default settings.
    pub fn new() -> Self {
        Self::from_config(ScoringConfig::default())
    }

    pub fn from_config(config: ScoringConfig) -> Self {
        Self {
            base: Arc::new(RubricEvaluator::new().with_weights(config.rubric)),
            analyzer: Some(SemanticCoherenceAnalyzer::new().with_settings(config.coherence.clone())),
            extractor: DomainMetadataExtractor::new(),
            assessor: InterculturalCompetenceAssessor::new().into_runner(),
            aggregator: EvaluationAggregator::new(config.aggregation),
            config,
        }
    }

    pub fn with_base_evaluator(mut self, base: Arc<dyn BaseEvaluator>) -> Self {
        self.base = base;
        self
    }

    pub fn with_analyzer(mut self, analyzer: SemanticCoherenceAnalyzer) -> Self {
        self.analyzer = Some(analyzer);
        self
    }

    /// Use keyword overlap for `semantic_similarity`.
    pub fn without_semantic_analyzer(mut self) -> Self {
        self.analyzer = None;
        self
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Evaluate one response against its test definition.
    ///
    /// `test_name` defaults to the definition's name; `reasoning_type` is
    /// detected by the base evaluator when absent. No LLM judge is wired in,
    /// so `use_llm_evaluation` is only recorded in `detailed_analysis`.
    ///
    /// Errors from the base evaluator propagate.
    pub fn evaluate_response_enhanced(
        &self,
        response_text: &str,
        definition: &TestDefinition,
        test_name: Option<&str>,
        reasoning_type: Option<ReasoningType>,
        use_llm_evaluation: bool,
    ) -> Result<EnhancedEvaluationResult> {
        let test_id = definition.test_id();
        let _span = EvaluationSpan::enter(test_id);
        obs::emit_evaluation_started(test_id, definition.category_or_general());

        let name = test_name.unwrap_or_else(|| definition.display_name());
        let category = definition
            .category
            .as_deref()
            .or(definition.test_category.as_deref());
        let request = EvaluationRequest::new(response_text, name)
            .with_reasoning_type(reasoning_type)
            .with_category(category);
        let base = self.base.evaluate(&request)?;
        let base_score = finite(base.metrics.overall_score);

        let tiers = self.multi_tier_scores(response_text, definition, name);
        let integration =
            tiers::integration_analysis(response_text, &definition.metadata.domains_integrated);

        let cultural_test = tiers::has_cultural_content(definition)
            || !definition.cultural_context.traditions.is_empty();
        let cultural_material = cultural_test || tiers::mentions_culture(response_text);
        let domain_analysis = self.domain_analysis(response_text, definition, cultural_material);
        let mut cultural = tiers::cultural_analysis(response_text, definition);
        if let Some(aggregated) = &domain_analysis.aggregated {
            cultural.cultural_depth_score = aggregated.overall_score;
        }

        let task_type = detect_task_type(definition);
        obs::emit_task_type_detected(test_id, task_type.as_str());
        let mut breakdown =
            self.score_task(task_type, response_text, definition, base_score, &tiers, cultural_test);
        breakdown.final_score = round_to(finite(breakdown.final_score), 1);
        obs::emit_task_score(task_type.as_str(), breakdown.final_score);

        let mut metrics = base.metrics.clone();
        metrics.overall_score = breakdown.final_score;

        let mut enhanced_metrics = EnhancedEvaluationMetrics {
            base: metrics.clone(),
            exact_match_score: tiers.exact_match,
            partial_match_score: tiers.partial_match,
            semantic_similarity_score: tiers.semantic_similarity,
            domain_synthesis_score: tiers.domain_synthesis,
            conceptual_creativity_score: tiers.conceptual_creativity,
            integration_quality: integration.integration_quality,
            synthesis_coherence: integration.synthesis_coherence,
            cultural_depth_score: cultural.cultural_depth_score,
            tradition_accuracy_score: cultural.tradition_accuracy_score,
            cross_cultural_sensitivity: cultural.cross_cultural_sensitivity,
        };
        enhanced_metrics.sanitize();

        let mut detailed_analysis = base.detailed_analysis;
        detailed_analysis.insert("task_type".into(), json!(task_type.as_str()));
        detailed_analysis.insert("llm_evaluation_requested".into(), json!(use_llm_evaluation));
        detailed_analysis.insert("cultural_analysis".into(), serde_json::to_value(cultural)?);

        let mut recommendations = base.recommendations;
        recommendations.extend(enhanced_recommendations(
            definition,
            task_type,
            &tiers,
            &integration,
            &cultural,
            cultural_material,
        ));

        METRICS.inc_evaluations_completed();
        obs::emit_evaluation_finished(test_id, task_type.as_str(), metrics.overall_score);

        Ok(EnhancedEvaluationResult {
            test_id: test_id.to_string(),
            metrics,
            reasoning_type: base.reasoning_type,
            detailed_analysis,
            recommendations,
            timestamp: Utc::now(),
            enhanced_metrics,
            scoring_breakdown: breakdown,
            integration_analysis: integration,
            task_type,
            domain_analysis,
        })
    }

    fn multi_tier_scores(
        &self,
        response: &str,
        definition: &TestDefinition,
        test_name: &str,
    ) -> MultiTierScores {
        let semantic_similarity = match &self.analyzer {
            Some(analyzer) => {
                analyzer
                    .comprehensive_coherence_analysis(response, Some(definition.prompt_or_description()))
                    .overall_coherence_score
            }
            None => tiers::keyword_similarity(response, definition),
        };
        let scores = MultiTierScores {
            exact_match: tiers::exact_match_score(response, &definition.expected_patterns),
            partial_match: tiers::partial_match_score(response, definition, test_name),
            semantic_similarity: finite(semantic_similarity),
            domain_synthesis: tiers::domain_synthesis_score(
                response,
                &definition.metadata.domains_integrated,
            ),
            conceptual_creativity: tiers::creativity_score(response),
        };
        tracing::debug!(
            exact = scores.exact_match,
            partial = scores.partial_match,
            semantic = scores.semantic_similarity,
            synthesis = scores.domain_synthesis,
            creativity = scores.conceptual_creativity,
            "multi-tier scores"
        );
        scores
    }

    fn domain_analysis(&self, response: &str, definition: &TestDefinition, cultural: bool) -> DomainAnalysis {
        let metadata = definition.extraction_metadata();
        let extraction = self.extractor.extract_metadata(&metadata, response);
        let validation_issues = self.extractor.validate_extraction(&extraction);
        let merged = extraction.cultural_context.merge(&definition.cultural_context);
        let cultural_context = self
            .extractor
            .enhance_cultural_context(&merged, extraction.domain);

        let aggregated = cultural.then(|| {
            let result = self.assessor.evaluate(response, &metadata, &cultural_context);
            self.aggregator
                .aggregate_results(std::slice::from_ref(&result), None)
        });

        DomainAnalysis {
            extraction,
            validation_issues,
            cultural_context,
            aggregated,
        }
    }

    fn score_task(
        &self,
        task_type: TaskType,
        response: &str,
        definition: &TestDefinition,
        base_score: f64,
        tiers: &MultiTierScores,
        cultural_test: bool,
    ) -> ScoringBreakdown {
        let mut breakdown = ScoringBreakdown {
            task_type,
            base_score,
            multi_tier_scores: *tiers,
            test_specific_config: definition.scoring.clone(),
            ..Default::default()
        };
        let prompt = definition.prompt_or_description();

        match task_type {
            TaskType::HaikuCompletion => {
                let haiku = haiku::score_haiku(response, prompt);
                breakdown.final_score = haiku.final_score;
                breakdown.enhanced_weight = 1.0;
                if let Ok(Value::Object(components)) = serde_json::to_value(&haiku) {
                    breakdown.task_components = components;
                }
            }
            TaskType::CreativeCompletion => {
                breakdown.final_score = formulas::creative_completion_score(tiers);
                breakdown.enhanced_weight = 1.0;
            }
            TaskType::LogicalReasoning => {
                breakdown.final_score = formulas::logical_reasoning_score(response, base_score, tiers);
                breakdown.base_weight = 0.5;
                breakdown.task_components = components(&[
                    ("analysis_depth", formulas::analysis_depth(response)),
                    ("evidence_integration", formulas::evidence_integration(response)),
                    ("logical_progression", formulas::logical_progression(response)),
                    ("reasoning_completeness", formulas::reasoning_completeness(response)),
                ]);
            }
            TaskType::CulturalReasoning if cultural_test => {
                breakdown.final_score = formulas::cultural_reasoning_score(response, prompt, base_score);
                breakdown.base_weight = 0.6;
                breakdown.task_components = components(&[
                    ("cultural_authenticity", formulas::cultural_authenticity(response, prompt)),
                    ("cultural_sensitivity", formulas::cultural_sensitivity(response)),
                    ("thematic_depth", formulas::cultural_thematic_depth(response)),
                ]);
            }
            TaskType::CulturalReasoning => {
                breakdown.final_score = base_score;
                breakdown.base_weight = 1.0;
            }
            TaskType::General => {
                let content_adjustment = formulas::content_adjustment(
                    response,
                    prompt,
                    tiers,
                    !definition.expected_patterns.is_empty(),
                );
                let general = formulas::general_score(base_score, tiers, &self.config.blend, content_adjustment);
                breakdown.final_score = general.score;
                breakdown.base_weight = general.base_weight;
                breakdown.enhanced_weight = general.enhanced_weight;
                breakdown.component_weights = Some(general.component_weights);
                breakdown.enhanced_score = Some(general.enhanced_score);
                breakdown.content_adjustment = general.content_adjustment;
            }
        }
        breakdown
    }
}

fn components(values: &[(&str, f64)]) -> Map<String, Value> {
    values
        .iter()
        .map(|(name, value)| (name.to_string(), json!(value)))
        .collect()
}

fn enhanced_recommendations(
    definition: &TestDefinition,
    task_type: TaskType,
    tiers: &MultiTierScores,
    integration: &IntegrationAnalysis,
    cultural: &CulturalAnalysis,
    cultural_material: bool,
) -> Vec<String> {
    let mut recommendations = Vec::new();
    if !definition.expected_patterns.is_empty() && tiers.exact_match < 0.5 {
        recommendations.push("Cover more of the expected content patterns".to_string());
    }
    if integration.domains_integrated.len() >= 2 && integration.integration_quality < 0.3 {
        recommendations.push(format!(
            "Strengthen integration across domains: {}",
            integration.domains_integrated.join(", ")
        ));
    }
    if cultural_material && cultural.cross_cultural_sensitivity < 0.3 {
        recommendations.push("Acknowledge the cultural perspectives involved more explicitly".to_string());
    }
    if task_type == TaskType::CreativeCompletion && tiers.conceptual_creativity < 0.2 {
        recommendations.push("Offer a more original perspective".to_string());
    }
    recommendations
}
