//! benchscore core library
//!
//! Heuristic multi-tier scoring for language-model benchmark completions:
//! semantic coherence, domain metadata extraction, intercultural competence,
//! result aggregation and the task-aware enhanced evaluator.

pub mod aggregator;
pub mod coherence;
pub mod config;
pub mod definition;
pub mod domain;
pub mod enhanced;
pub mod error;
pub mod intercultural;
pub mod metadata;
pub mod metrics;
pub mod obs;
pub mod rubric;
pub mod similarity;
pub mod stats;
pub mod telemetry;
pub mod text;

/// Crate version, reported by the CLI.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use aggregator::{
    aggregate_results, AggregatedEvaluationResult, AggregatorConfig, ConsensusReport,
    DimensionConsensus, EvaluationAggregator,
};
pub use coherence::{CoherenceReport, CoherenceSettings, SemanticCoherenceAnalyzer};
pub use config::{BlendWeights, RubricWeights, ScoringConfig};
pub use definition::{TestDefinition, TestMetadata, TestResult};
pub use domain::evaluator::{DimensionEvaluator, MultiDimensionalEvaluator};
pub use domain::{
    create_cultural_context, CulturalContext, DomainEvaluationResult, EvaluationDimension,
};
pub use enhanced::{
    ensure_json_serializable, DomainAnalysis, EnhancedEvaluationMetrics, EnhancedEvaluationResult,
    EnhancedUniversalEvaluator, ScoringBreakdown, TaskType,
};
pub use error::{AnalysisError, AnalysisResult, EvalError, Result};
pub use intercultural::{CompetenceDimension, InterculturalCompetenceAssessor};
pub use metadata::{DomainMetadataExtractor, Domain, EvaluationType, ExtractionResult};
pub use rubric::{BaseEvaluation, BaseEvaluator, EvaluationRequest, ReasoningType, RubricEvaluator};
pub use similarity::{BackendKind, TextSimilarityBackend};
