//! Domain evaluation types shared by the evaluators and the aggregator.

pub mod evaluator;

pub use evaluator::{DimensionEvaluator, MultiDimensionalEvaluator};

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::stats::clamp_unit;

// ---------------------------------------------------------------------------
// CulturalContext
// ---------------------------------------------------------------------------

/// Detected cultural signal for a test or response.
///
/// Every field is a set-like list of tags: deduplicated, order irrelevant.
/// Values are never mutated in place; [`CulturalContext::merge`] and the
/// extractor's enhancement step return new instances.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CulturalContext {
    pub traditions: Vec<String>,
    pub knowledge_systems: Vec<String>,
    pub performance_aspects: Vec<String>,
    pub cultural_groups: Vec<String>,
    pub linguistic_varieties: Vec<String>,
}

impl CulturalContext {
    /// Build a context, deduplicating and sorting each field.
    pub fn new(
        traditions: Vec<String>,
        knowledge_systems: Vec<String>,
        performance_aspects: Vec<String>,
        cultural_groups: Vec<String>,
        linguistic_varieties: Vec<String>,
    ) -> Self {
        Self {
            traditions: dedup(traditions),
            knowledge_systems: dedup(knowledge_systems),
            performance_aspects: dedup(performance_aspects),
            cultural_groups: dedup(cultural_groups),
            linguistic_varieties: dedup(linguistic_varieties),
        }
    }

    /// Build a context from a loosely-typed JSON object. Unknown keys and
    /// non-string entries are ignored.
    pub fn from_map(map: &serde_json::Map<String, serde_json::Value>) -> Self {
        let field = |key: &str| -> Vec<String> {
            map.get(key)
                .and_then(|v| v.as_array())
                .map(|items| {
                    items
                        .iter()
                        .filter_map(|item| item.as_str().map(str::to_string))
                        .collect()
                })
                .unwrap_or_default()
        };
        Self::new(
            field("traditions"),
            field("knowledge_systems"),
            field("performance_aspects"),
            field("cultural_groups"),
            field("linguistic_varieties"),
        )
    }

    /// Union of both contexts.
    pub fn merge(&self, other: &CulturalContext) -> Self {
        let join = |a: &[String], b: &[String]| -> Vec<String> { a.iter().chain(b).cloned().collect() };
        Self::new(
            join(&self.traditions, &other.traditions),
            join(&self.knowledge_systems, &other.knowledge_systems),
            join(&self.performance_aspects, &other.performance_aspects),
            join(&self.cultural_groups, &other.cultural_groups),
            join(&self.linguistic_varieties, &other.linguistic_varieties),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.traditions.is_empty()
            && self.knowledge_systems.is_empty()
            && self.performance_aspects.is_empty()
            && self.cultural_groups.is_empty()
            && self.linguistic_varieties.is_empty()
    }

    /// Number of distinct cultural groups.
    pub fn group_count(&self) -> usize {
        self.cultural_groups.iter().collect::<BTreeSet<_>>().len()
    }
}

/// Build a [`CulturalContext`] from a JSON object.
pub fn create_cultural_context(map: &serde_json::Map<String, serde_json::Value>) -> CulturalContext {
    CulturalContext::from_map(map)
}

fn dedup(items: Vec<String>) -> Vec<String> {
    items.into_iter().collect::<BTreeSet<_>>().into_iter().collect()
}

// ---------------------------------------------------------------------------
// EvaluationDimension
// ---------------------------------------------------------------------------

/// A single named sub-score produced by a domain evaluator.
///
/// # Invariants
///
/// `score`, `confidence` and `cultural_relevance` are clamped to [0, 1] on
/// construction. Fields are not mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvaluationDimension {
    pub name: String,
    pub score: f64,
    pub confidence: f64,
    pub cultural_relevance: f64,
    /// Human-readable justification snippets, in detection order.
    pub evidence: Vec<String>,
    /// Tags of the cultural patterns that fired.
    pub cultural_markers: Vec<String>,
}

impl EvaluationDimension {
    pub fn new(
        name: impl Into<String>,
        score: f64,
        confidence: f64,
        cultural_relevance: f64,
        evidence: Vec<String>,
        cultural_markers: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            score: clamp_unit(score),
            confidence: clamp_unit(confidence),
            cultural_relevance: clamp_unit(cultural_relevance),
            evidence,
            cultural_markers,
        }
    }

    /// All-zero dimension carrying one evidence line that explains why.
    pub fn zeroed(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(name, 0.0, 0.0, 0.0, vec![reason.into()], Vec::new())
    }

    /// Weight used when combining dimensions: confidence × cultural relevance.
    pub fn weight(&self) -> f64 {
        self.confidence * self.cultural_relevance
    }
}

/// Confidence × relevance weighted mean of dimension scores; 0 without weight.
pub fn weighted_dimension_score(dimensions: &[EvaluationDimension]) -> f64 {
    let total_weight: f64 = dimensions.iter().map(EvaluationDimension::weight).sum();
    if total_weight <= 0.0 {
        return 0.0;
    }
    let weighted: f64 = dimensions.iter().map(|d| d.score * d.weight()).sum();
    clamp_unit(weighted / total_weight)
}

// ---------------------------------------------------------------------------
// DomainEvaluationResult
// ---------------------------------------------------------------------------

/// Output of one domain evaluator for one response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DomainEvaluationResult {
    pub domain: String,
    pub evaluation_type: String,
    /// Confidence × relevance weighted mean of `dimensions`, in [0, 1].
    pub overall_score: f64,
    pub dimensions: Vec<EvaluationDimension>,
    pub cultural_context: CulturalContext,
    /// Evaluator identity and configuration.
    pub metadata: serde_json::Map<String, serde_json::Value>,
    pub processing_notes: Vec<String>,
}

impl DomainEvaluationResult {
    /// Score of the named dimension, if this result reports it.
    pub fn dimension_score(&self, name: &str) -> Option<f64> {
        self.dimensions.iter().find(|d| d.name == name).map(|d| d.score)
    }

    /// Deduplicated union of markers across dimensions.
    pub fn cultural_markers(&self) -> Vec<String> {
        self.dimensions
            .iter()
            .flat_map(|d| d.cultural_markers.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Σ score·conf·rel / Σ conf·rel over dimensions; 0 when no weight.
    pub fn cultural_competence(&self) -> f64 {
        weighted_dimension_score(&self.dimensions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dim(name: &str, score: f64, confidence: f64, relevance: f64) -> EvaluationDimension {
        EvaluationDimension::new(name, score, confidence, relevance, Vec::new(), Vec::new())
    }

    #[test]
    fn test_dimension_clamps_on_construction() {
        let d = dim("x", 1.7, -0.2, f64::NAN);
        assert_eq!(d.score, 1.0);
        assert_eq!(d.confidence, 0.0);
        assert_eq!(d.cultural_relevance, 0.0);
    }

    #[test]
    fn test_zeroed_dimension() {
        let d = EvaluationDimension::zeroed("awareness", "Evaluation failed: boom");
        assert_eq!(d.score, 0.0);
        assert_eq!(d.evidence, vec!["Evaluation failed: boom".to_string()]);
    }

    #[test]
    fn test_cultural_context_dedups_and_merges() {
        let a = CulturalContext::new(
            vec!["griot".into(), "griot".into()],
            vec![],
            vec![],
            vec!["west african".into()],
            vec![],
        );
        assert_eq!(a.traditions, vec!["griot".to_string()]);

        let b = CulturalContext {
            cultural_groups: vec!["japanese".into(), "west african".into()],
            ..Default::default()
        };
        let merged = a.merge(&b);
        assert_eq!(merged.group_count(), 2);
        assert!(!merged.is_empty());
        // inputs untouched
        assert_eq!(a.group_count(), 1);
    }

    #[test]
    fn test_cultural_context_from_map() {
        let value = serde_json::json!({
            "cultural_groups": ["japanese", "american"],
            "traditions": ["business culture"],
            "knowledge_systems": ["corporate", 7],
            "linguistic_varieties": ["japanese", "english"],
            "unrelated": "ignored"
        });
        let map = value.as_object().cloned().unwrap_or_default();
        let context = create_cultural_context(&map);
        assert_eq!(context.cultural_groups.len(), 2);
        assert_eq!(context.traditions.len(), 1);
        assert_eq!(context.knowledge_systems.len(), 1);
        assert_eq!(context.linguistic_varieties.len(), 2);
        assert!(context.performance_aspects.is_empty());
    }

    #[test]
    fn test_result_helpers() {
        let mut a = dim("a", 0.8, 1.0, 1.0);
        a.cultural_markers = vec!["m1".into(), "m2".into()];
        let mut b = dim("b", 0.2, 1.0, 0.0);
        b.cultural_markers = vec!["m1".into()];
        let result = DomainEvaluationResult {
            domain: "test".into(),
            evaluation_type: "general".into(),
            overall_score: 0.8,
            dimensions: vec![a, b],
            cultural_context: CulturalContext::default(),
            metadata: serde_json::Map::new(),
            processing_notes: Vec::new(),
        };
        assert_eq!(result.dimension_score("a"), Some(0.8));
        assert_eq!(result.dimension_score("missing"), None);
        assert_eq!(result.cultural_markers(), vec!["m1".to_string(), "m2".to_string()]);
        // b carries no weight
        assert!((result.cultural_competence() - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_competence_without_weight_is_zero() {
        assert_eq!(weighted_dimension_score(&[dim("a", 0.9, 0.0, 1.0)]), 0.0);
        assert_eq!(weighted_dimension_score(&[]), 0.0);
    }
}
