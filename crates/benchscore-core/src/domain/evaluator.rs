//! Dimension evaluator trait and the multi-dimension runner.

use serde_json::{json, Map, Value};

use super::{weighted_dimension_score, CulturalContext, DomainEvaluationResult, EvaluationDimension};
use crate::definition::TestMetadata;
use crate::error::AnalysisResult;
use crate::metrics::METRICS;

/// A domain evaluator that scores a response one named dimension at a time.
pub trait DimensionEvaluator: Send + Sync {
    /// Domain tag reported on every result.
    fn domain_name(&self) -> &str;

    fn supported_evaluation_types(&self) -> &[&'static str];

    /// Dimensions evaluated by [`MultiDimensionalEvaluator::evaluate`], in order.
    fn dimension_names(&self) -> &[&'static str];

    fn version(&self) -> &str {
        "1.0.0"
    }

    fn evaluate_dimension(
        &self,
        dimension: &str,
        response_text: &str,
        metadata: &TestMetadata,
        context: &CulturalContext,
    ) -> AnalysisResult<EvaluationDimension>;
}

/// Runs every dimension of a [`DimensionEvaluator`] and combines them.
#[derive(Debug, Clone, Default)]
pub struct MultiDimensionalEvaluator<E> {
    inner: E,
}

impl<E: DimensionEvaluator> MultiDimensionalEvaluator<E> {
    pub fn new(inner: E) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &E {
        &self.inner
    }

    /// Evaluate all dimensions.
    ///
    /// Blank responses yield an empty result with evaluation type `unknown`.
    /// A failing dimension is recorded as a zeroed dimension and does not
    /// stop the others.
    pub fn evaluate(
        &self,
        response_text: &str,
        metadata: &TestMetadata,
        context: &CulturalContext,
    ) -> DomainEvaluationResult {
        METRICS.inc_domain_evaluations();

        let text = response_text.trim();
        if text.is_empty() {
            return DomainEvaluationResult {
                domain: self.inner.domain_name().to_string(),
                evaluation_type: "unknown".to_string(),
                overall_score: 0.0,
                dimensions: Vec::new(),
                cultural_context: context.clone(),
                metadata: self.evaluator_metadata(),
                processing_notes: vec!["Invalid inputs provided".to_string()],
            };
        }

        let dimensions: Vec<EvaluationDimension> = self
            .inner
            .dimension_names()
            .iter()
            .map(|name| {
                self.inner
                    .evaluate_dimension(name, text, metadata, context)
                    .unwrap_or_else(|err| {
                        tracing::debug!(dimension = %name, error = %err, "dimension evaluation failed");
                        EvaluationDimension::zeroed(*name, format!("Evaluation failed: {err}"))
                    })
            })
            .collect();

        DomainEvaluationResult {
            domain: self.inner.domain_name().to_string(),
            evaluation_type: metadata
                .evaluation_type
                .clone()
                .unwrap_or_else(|| "general".to_string()),
            overall_score: weighted_dimension_score(&dimensions),
            processing_notes: processing_notes(&dimensions),
            dimensions,
            cultural_context: context.clone(),
            metadata: self.evaluator_metadata(),
        }
    }

    fn evaluator_metadata(&self) -> Map<String, Value> {
        let class = std::any::type_name::<E>()
            .rsplit("::")
            .next()
            .unwrap_or("unknown");
        let mut map = Map::new();
        map.insert("evaluator_class".into(), json!(class));
        map.insert(
            "supported_types".into(),
            json!(self.inner.supported_evaluation_types()),
        );
        map.insert("version".into(), json!(self.inner.version()));
        map
    }
}

fn processing_notes(dimensions: &[EvaluationDimension]) -> Vec<String> {
    let mut notes = Vec::new();
    let successful = dimensions.iter().filter(|d| d.score > 0.0).count();
    let failed: Vec<&str> = dimensions
        .iter()
        .filter(|d| d.score == 0.0 && d.confidence == 0.0)
        .map(|d| d.name.as_str())
        .collect();

    if successful > 0 {
        notes.push(format!("Successfully evaluated {successful} dimensions"));
    }
    if !failed.is_empty() {
        notes.push(format!(
            "Failed to evaluate {} dimensions: {:?}",
            failed.len(),
            failed
        ));
    }
    notes
}
