use std::collections::HashSet;

use super::{recover, PromptCoherence, SemanticCoherenceAnalyzer};
use crate::error::AnalysisResult;
use crate::similarity::BackendKind;
use crate::text::count_present;

/// Sentences taken from each side of the prompt/completion boundary.
const TRANSITION_SENTENCES: usize = 2;

/// Shared vocabulary that lexical similarity under-rates.
const TECHNICAL_TERMS: &[&str] = &[
    "algorithm", "implementation", "network", "distributed", "hash", "table", "system", "data",
    "structure", "node", "routing", "protocol", "consistent", "hashing", "fault", "tolerance",
    "mechanism", "computer", "science", "database", "key", "value", "lookup", "performance",
    "scalable",
];

impl SemanticCoherenceAnalyzer {
    /// Coherence between the end of `prompt` and the start of `completion`.
    ///
    /// Returns all zeros for blank input or on internal failure.
    pub fn prompt_completion_coherence(&self, prompt: &str, completion: &str) -> PromptCoherence {
        if prompt.trim().is_empty() || completion.trim().is_empty() {
            return PromptCoherence::zero();
        }
        recover(
            "prompt_completion_coherence",
            self.try_prompt_coherence(prompt, completion),
            PromptCoherence::zero,
        )
    }

    fn try_prompt_coherence(&self, prompt: &str, completion: &str) -> AnalysisResult<PromptCoherence> {
        let ending = self.prompt_ending(prompt);
        let beginning = self.completion_beginning(completion);

        if self.backend.kind() == BackendKind::Embedding {
            let transition = self.backend.similarity(&ending, &beginning)?;
            let alignment = self.backend.similarity(prompt, completion)?;
            return Ok(PromptCoherence {
                coherence_score: transition * 0.7 + alignment * 0.3,
                semantic_bridge: transition,
                topic_alignment: alignment,
            });
        }

        let joined = format!("{ending} {beginning}");
        if joined.split_whitespace().count() < 5 {
            return Ok(short_overlap(&ending, &beginning));
        }

        let transition = self.backend.similarity(&ending, &beginning)?;
        let alignment = self.backend.similarity(prompt, completion)?;
        let boost = technical_coherence_boost(prompt, completion);
        Ok(PromptCoherence {
            coherence_score: (transition * 0.7 + alignment * 0.3 + boost).min(1.0),
            semantic_bridge: transition,
            topic_alignment: alignment,
        })
    }

    fn prompt_ending(&self, prompt: &str) -> String {
        let sentences = self.segmenter.sentences(prompt);
        if sentences.len() <= TRANSITION_SENTENCES {
            return prompt.to_string();
        }
        sentences[sentences.len() - TRANSITION_SENTENCES..].join(" ")
    }

    fn completion_beginning(&self, completion: &str) -> String {
        let sentences = self.segmenter.sentences(completion);
        if sentences.len() <= TRANSITION_SENTENCES {
            return completion.to_string();
        }
        sentences[..TRANSITION_SENTENCES].join(" ")
    }
}

/// Whitespace-word overlap for transition zones too short to vectorise.
fn short_overlap(ending: &str, beginning: &str) -> PromptCoherence {
    let left_lower = ending.to_lowercase();
    let right_lower = beginning.to_lowercase();
    let left: HashSet<&str> = left_lower.split_whitespace().collect();
    let right: HashSet<&str> = right_lower.split_whitespace().collect();
    if left.is_empty() || right.is_empty() {
        return PromptCoherence::uniform(0.2);
    }
    let overlap =
        left.intersection(&right).count() as f64 / left.union(&right).count() as f64;
    PromptCoherence::uniform(overlap * 0.5)
}

/// Up to +0.30 when both texts use technical vocabulary, 0.05 per term.
pub(crate) fn technical_coherence_boost(prompt: &str, completion: &str) -> f64 {
    let prompt_terms = count_present(&prompt.to_lowercase(), TECHNICAL_TERMS);
    let completion_terms = count_present(&completion.to_lowercase(), TECHNICAL_TERMS);
    if prompt_terms > 0 && completion_terms > 0 {
        ((prompt_terms + completion_terms) as f64 * 0.05).min(0.3)
    } else {
        0.0
    }
}
