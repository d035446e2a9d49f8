use serde::{Deserialize, Serialize};

/// Prompt-to-completion coherence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PromptCoherence {
    /// 0.7 × transition + 0.3 × topic alignment (plus technical boost on lexical backends).
    pub coherence_score: f64,
    /// Similarity of the prompt's last two sentences to the completion's first two.
    pub semantic_bridge: f64,
    /// Similarity of the full prompt to the full completion.
    pub topic_alignment: f64,
}

impl PromptCoherence {
    pub fn zero() -> Self {
        Self::uniform(0.0)
    }

    pub(crate) fn uniform(value: f64) -> Self {
        Self {
            coherence_score: value,
            semantic_bridge: value,
            topic_alignment: value,
        }
    }
}

/// Sliding-window drift measurement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DriftReport {
    pub drift_score: f64,
    /// Indices into `drift_curve` where drift exceeds mean + one std.
    pub drift_points: Vec<usize>,
    pub stability_score: f64,
    pub drift_curve: Vec<f64>,
}

impl DriftReport {
    /// No drift observed: stability 1, empty curve.
    pub fn neutral() -> Self {
        Self {
            drift_score: 0.0,
            drift_points: Vec::new(),
            stability_score: 1.0,
            drift_curve: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TopicConsistency {
    pub consistency_score: f64,
    pub topic_distribution: Vec<f64>,
    pub dominant_topic_ratio: f64,
}

impl TopicConsistency {
    pub fn zero() -> Self {
        Self {
            consistency_score: 0.0,
            topic_distribution: Vec::new(),
            dominant_topic_ratio: 0.0,
        }
    }

    pub fn perfect() -> Self {
        Self {
            consistency_score: 1.0,
            topic_distribution: vec![1.0],
            dominant_topic_ratio: 1.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlowReport {
    pub flow_score: f64,
    pub transition_quality: f64,
    pub narrative_coherence: f64,
    pub transition_scores: Vec<f64>,
    pub sentence_count: usize,
}

impl FlowReport {
    pub fn zero() -> Self {
        Self {
            flow_score: 0.0,
            transition_quality: 0.0,
            narrative_coherence: 0.0,
            transition_scores: Vec::new(),
            sentence_count: 0,
        }
    }

    /// Fewer than two sentences: nothing can break the flow.
    pub fn single(sentence_count: usize) -> Self {
        Self {
            flow_score: 1.0,
            transition_quality: 1.0,
            narrative_coherence: 1.0,
            transition_scores: Vec::new(),
            sentence_count,
        }
    }
}

/// Statistics over every sentence pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CrossSentenceCoherence {
    pub average_coherence: f64,
    pub coherence_variance: f64,
    pub min_coherence: f64,
    pub max_coherence: f64,
}

impl CrossSentenceCoherence {
    pub fn zero() -> Self {
        Self {
            average_coherence: 0.0,
            coherence_variance: 0.0,
            min_coherence: 0.0,
            max_coherence: 0.0,
        }
    }

    pub fn single() -> Self {
        Self {
            average_coherence: 1.0,
            coherence_variance: 0.0,
            min_coherence: 1.0,
            max_coherence: 1.0,
        }
    }
}

/// Full coherence report for one text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoherenceReport {
    pub overall_coherence_score: f64,
    pub semantic_flow: FlowReport,
    pub semantic_drift: DriftReport,
    pub topic_consistency: TopicConsistency,
    pub cross_sentence_coherence: CrossSentenceCoherence,
    /// Present only when a prompt was supplied.
    pub prompt_completion_coherence: Option<PromptCoherence>,
    /// Characters in the analysed text.
    pub text_length: usize,
    pub sentence_count: usize,
}

impl CoherenceReport {
    /// Report for empty input.
    pub fn empty() -> Self {
        Self {
            overall_coherence_score: 0.0,
            semantic_flow: FlowReport::zero(),
            semantic_drift: DriftReport::neutral(),
            topic_consistency: TopicConsistency::zero(),
            cross_sentence_coherence: CrossSentenceCoherence::zero(),
            prompt_completion_coherence: None,
            text_length: 0,
            sentence_count: 0,
        }
    }
}
