//! Semantic coherence analysis.
//!
//! [`SemanticCoherenceAnalyzer`] measures how well a text hangs together:
//! - prompt-to-completion coherence over the "transition zone"
//! - drift between sliding token windows
//! - topic consistency across segments
//! - sentence-to-sentence flow and pairwise cross-sentence overlap
//!
//! Every public operation returns a well-formed report. Internal failures
//! are logged and replaced by the documented neutral value.

mod drift;
mod flow;
mod prompt;
mod report;
mod topic;

pub use report::{
    CoherenceReport, CrossSentenceCoherence, DriftReport, FlowReport, PromptCoherence,
    TopicConsistency,
};
pub use topic::TopicModel;

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::AnalysisResult;
use crate::obs;
use crate::similarity::{BackendKind, TextSimilarityBackend, TfIdfBackend};
use crate::stats::clamp_unit;
use crate::text::{RegexSegmenter, Segmenter};

/// Tunables for the coherence analyzer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CoherenceSettings {
    /// Tokens per drift window.
    pub drift_window_size: usize,
    /// Tokens between successive drift windows.
    pub drift_step_size: usize,
    /// Requested topic count for injected topic models.
    pub num_topics: usize,
}

impl Default for CoherenceSettings {
    fn default() -> Self {
        Self {
            drift_window_size: 100,
            drift_step_size: 50,
            num_topics: 5,
        }
    }
}

/// Coherence analyzer with an injected similarity backend.
///
/// Construction picks the backend once; the analyzer is read-only
/// afterwards and can be shared across threads.
#[derive(Clone)]
pub struct SemanticCoherenceAnalyzer {
    backend: Arc<dyn TextSimilarityBackend>,
    segmenter: Arc<dyn Segmenter>,
    topic_model: Option<Arc<dyn TopicModel>>,
    settings: CoherenceSettings,
}

impl Default for SemanticCoherenceAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SemanticCoherenceAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SemanticCoherenceAnalyzer")
            .field("backend", &self.backend.name())
            .field("topic_model", &self.topic_model.as_ref().map(|m| m.name().to_string()))
            .field("settings", &self.settings)
            .finish()
    }
}

impl SemanticCoherenceAnalyzer {
    /// TF-IDF backend, regex segmenter, no topic model.
    pub fn new() -> Self {
        Self {
            backend: Arc::new(TfIdfBackend::default()),
            segmenter: Arc::new(RegexSegmenter),
            topic_model: None,
            settings: CoherenceSettings::default(),
        }
    }

    pub fn with_backend(mut self, backend: Arc<dyn TextSimilarityBackend>) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_segmenter(mut self, segmenter: Arc<dyn Segmenter>) -> Self {
        self.segmenter = segmenter;
        self
    }

    pub fn with_topic_model(mut self, model: Arc<dyn TopicModel>) -> Self {
        self.topic_model = Some(model);
        self
    }

    pub fn with_settings(mut self, settings: CoherenceSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn backend_kind(&self) -> BackendKind {
        self.backend.kind()
    }

    pub fn settings(&self) -> &CoherenceSettings {
        &self.settings
    }

    /// Run every analysis and combine them:
    /// `0.3 × flow + 0.3 × drift stability + 0.2 × topic consistency + 0.2 × cross-sentence average`.
    pub fn comprehensive_coherence_analysis(
        &self,
        text: &str,
        prompt: Option<&str>,
    ) -> CoherenceReport {
        if text.trim().is_empty() {
            return CoherenceReport::empty();
        }

        let semantic_flow = self.semantic_flow(text);
        let semantic_drift = self.semantic_drift(
            text,
            self.settings.drift_window_size,
            self.settings.drift_step_size,
        );
        let topic_consistency = self.topic_consistency(text, self.settings.num_topics);
        let prompt_completion_coherence = prompt
            .filter(|p| !p.is_empty())
            .map(|p| self.prompt_completion_coherence(p, text));
        let cross_sentence_coherence = self.cross_sentence_coherence(text);

        let overall_coherence_score = clamp_unit(
            semantic_flow.flow_score * 0.3
                + semantic_drift.stability_score * 0.3
                + topic_consistency.consistency_score * 0.2
                + cross_sentence_coherence.average_coherence * 0.2,
        );

        CoherenceReport {
            overall_coherence_score,
            semantic_flow,
            semantic_drift,
            topic_consistency,
            cross_sentence_coherence,
            prompt_completion_coherence,
            text_length: text.chars().count(),
            sentence_count: self.segmenter.sentences(text).len(),
        }
    }
}

/// Boundary adapter: unwrap an internal result or log and fall back.
pub(crate) fn recover<T>(operation: &str, result: AnalysisResult<T>, fallback: impl FnOnce() -> T) -> T {
    match result {
        Ok(value) => value,
        Err(err) => {
            obs::emit_analysis_degraded(operation, &err);
            fallback()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_yields_empty_report() {
        let analyzer = SemanticCoherenceAnalyzer::new();
        let report = analyzer.comprehensive_coherence_analysis("", None);
        assert_eq!(report, CoherenceReport::empty());
        assert_eq!(report.semantic_drift.stability_score, 1.0);
        assert!(report.prompt_completion_coherence.is_none());
    }

    #[test]
    fn test_whitespace_text_yields_empty_report() {
        let analyzer = SemanticCoherenceAnalyzer::new();
        let report = analyzer.comprehensive_coherence_analysis("   \n\t", Some("prompt"));
        assert_eq!(report.overall_coherence_score, 0.0);
        assert_eq!(report.text_length, 0);
    }

    #[test]
    fn test_prompt_section_only_with_prompt() {
        let analyzer = SemanticCoherenceAnalyzer::new();
        let text = "The market reacted to the policy change. Investors adjusted their positions quickly.";
        assert!(analyzer
            .comprehensive_coherence_analysis(text, None)
            .prompt_completion_coherence
            .is_none());
        assert!(analyzer
            .comprehensive_coherence_analysis(text, Some("Describe the market reaction."))
            .prompt_completion_coherence
            .is_some());
    }

    #[test]
    fn test_overall_score_in_unit_range() {
        let analyzer = SemanticCoherenceAnalyzer::new();
        let text = "First, the system collects data from each node. Then the algorithm ranks the \
                    data by relevance. Therefore the network performance improves. However, the \
                    implementation must handle failures.";
        let report = analyzer.comprehensive_coherence_analysis(text, None);
        assert!((0.0..=1.0).contains(&report.overall_coherence_score));
        assert_eq!(report.sentence_count, 4);
        assert_eq!(report.text_length, text.chars().count());
    }

    #[test]
    fn test_settings_builder() {
        let settings = CoherenceSettings {
            drift_window_size: 10,
            drift_step_size: 5,
            num_topics: 3,
        };
        let analyzer = SemanticCoherenceAnalyzer::new().with_settings(settings.clone());
        assert_eq!(analyzer.settings(), &settings);
        assert_eq!(analyzer.backend_kind(), BackendKind::TfIdf);
    }
}
