use std::collections::{BTreeSet, HashMap};

use super::{recover, SemanticCoherenceAnalyzer, TopicConsistency};
use crate::error::{AnalysisError, AnalysisResult};
use crate::text::{is_stop_word, tokenize};

/// Words per chunk when a text has too few sentences to segment on.
const SEGMENT_WORDS: usize = 100;

/// Fixed vocabularies for the domain classifier, in tie-break order.
const DOMAIN_VOCABULARIES: &[(&str, &[&str])] = &[
    (
        "economic",
        &[
            "economic", "market", "financial", "monetary", "policy", "analysis", "volatility",
            "confidence", "inflation", "investment", "growth", "budget", "trade", "economy",
        ],
    ),
    (
        "technical",
        &[
            "system", "data", "algorithm", "network", "implementation", "performance",
            "software", "computer", "technology", "digital", "code", "programming",
        ],
    ),
    (
        "academic",
        &[
            "research", "study", "analysis", "findings", "methodology", "evidence", "theory",
            "hypothesis", "conclusion", "investigation",
        ],
    ),
    (
        "medical",
        &[
            "health", "medical", "patient", "treatment", "diagnosis", "therapy", "disease",
            "clinical", "medicine", "healthcare",
        ],
    ),
    (
        "scientific",
        &[
            "experiment", "research", "hypothesis", "theory", "data", "results", "conclusion",
            "method", "observation", "analysis",
        ],
    ),
];

const GENERAL_TOPIC: &str = "general";

/// Probabilistic topic model assigning each segment a dominant topic.
pub trait TopicModel: Send + Sync {
    fn name(&self) -> &str;

    /// Dominant topic index for each segment, using at most `num_topics` topics.
    fn dominant_topics(&self, segments: &[String], num_topics: usize) -> AnalysisResult<Vec<usize>>;
}

impl SemanticCoherenceAnalyzer {
    /// How consistently the text stays on one topic.
    ///
    /// Uses the injected [`TopicModel`] when one is present and there are
    /// more than two segments, otherwise the domain-vocabulary classifier.
    pub fn topic_consistency(&self, text: &str, num_topics: usize) -> TopicConsistency {
        if text.trim().is_empty() {
            return TopicConsistency::zero();
        }
        recover(
            "topic_consistency",
            self.try_topic_consistency(text, num_topics),
            TopicConsistency::zero,
        )
    }

    fn try_topic_consistency(&self, text: &str, num_topics: usize) -> AnalysisResult<TopicConsistency> {
        let sentences = self.segmenter.sentences(text);
        let segments = if sentences.len() >= 3 {
            sentences
        } else {
            self.word_chunks(text)
        };

        if segments.len() < 2 {
            return Ok(TopicConsistency::perfect());
        }
        match &self.topic_model {
            Some(model) if segments.len() > 2 => model_consistency(model.as_ref(), &segments, num_topics),
            _ => Ok(vocabulary_consistency(&segments)),
        }
    }

    fn word_chunks(&self, text: &str) -> Vec<String> {
        let words = self.segmenter.words(text);
        let chunks: Vec<String> = words
            .chunks(SEGMENT_WORDS)
            .map(|chunk| chunk.join(" "))
            .filter(|chunk| chunk.trim().chars().count() > 20)
            .collect();
        if chunks.is_empty() {
            vec![text.to_string()]
        } else {
            chunks
        }
    }
}

/// Classify one segment: the first domain with the most (≥ 2) keyword hits.
fn classify_segment(segment: &str) -> &'static str {
    let keywords: Vec<String> = tokenize(segment)
        .into_iter()
        .filter(|w| w.len() > 3 && !is_stop_word(w))
        .collect();

    let mut best = (GENERAL_TOPIC, 0usize);
    for (domain, vocab) in DOMAIN_VOCABULARIES {
        let hits = keywords.iter().filter(|w| vocab.contains(&w.as_str())).count();
        if hits > best.1 {
            best = (*domain, hits);
        }
    }
    if best.1 >= 2 {
        best.0
    } else {
        GENERAL_TOPIC
    }
}

/// Share of segments on the dominant topic, penalised by 0.15 for each
/// distinct non-general topic beyond two (at most 0.4).
pub(crate) fn vocabulary_consistency(segments: &[String]) -> TopicConsistency {
    let topics: Vec<&str> = segments.iter().map(|s| classify_segment(s)).collect();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for topic in &topics {
        *counts.entry(*topic).or_insert(0) += 1;
    }

    let max_count = counts.values().copied().max().unwrap_or(0);
    let dominant_ratio = max_count as f64 / segments.len() as f64;

    let distinct: BTreeSet<&str> = topics.iter().copied().filter(|t| *t != GENERAL_TOPIC).collect();
    let penalty = if distinct.len() > 2 {
        ((distinct.len() - 2) as f64 * 0.15).min(0.4)
    } else {
        0.0
    };

    TopicConsistency {
        consistency_score: (dominant_ratio - penalty).clamp(0.0, 1.0),
        topic_distribution: vec![dominant_ratio],
        dominant_topic_ratio: dominant_ratio,
    }
}

fn model_consistency(
    model: &dyn TopicModel,
    segments: &[String],
    num_topics: usize,
) -> AnalysisResult<TopicConsistency> {
    let vocabulary: BTreeSet<String> = segments
        .iter()
        .flat_map(|s| tokenize(s))
        .filter(|w| !is_stop_word(w))
        .collect();
    let effective = num_topics.min(segments.len() - 1).min(vocabulary.len());
    if effective < 1 {
        return Ok(TopicConsistency::perfect());
    }

    let assignments = model.dominant_topics(segments, effective)?;
    if assignments.len() != segments.len() {
        return Err(AnalysisError::TopicModel(format!(
            "{} assigned {} topics for {} segments",
            model.name(),
            assignments.len(),
            segments.len()
        )));
    }
    Ok(entropy_consistency(&assignments))
}

/// `1 − normalised entropy` of the dominant-topic distribution.
pub(crate) fn entropy_consistency(assignments: &[usize]) -> TopicConsistency {
    if assignments.is_empty() {
        return TopicConsistency::zero();
    }
    let mut order: Vec<usize> = Vec::new();
    let mut counts: HashMap<usize, usize> = HashMap::new();
    for topic in assignments {
        let entry = counts.entry(*topic).or_insert(0);
        if *entry == 0 {
            order.push(*topic);
        }
        *entry += 1;
    }

    let n = assignments.len() as f64;
    let probs: Vec<f64> = order.iter().map(|t| counts[t] as f64 / n).collect();
    let entropy: f64 = -probs.iter().map(|p| p * (p + 1e-10).log2()).sum::<f64>();
    let max_entropy = (probs.len() as f64).log2();
    let consistency = if max_entropy > 0.0 {
        1.0 - entropy / max_entropy
    } else {
        1.0
    };
    let dominant = probs.iter().copied().fold(0.0, f64::max);

    TopicConsistency {
        consistency_score: consistency.clamp(0.0, 1.0),
        topic_distribution: probs,
        dominant_topic_ratio: dominant,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_repeated_sentence_is_consistent() {
        let analyzer = SemanticCoherenceAnalyzer::new();
        let result = analyzer.topic_consistency("The cat sat. The cat sat. The cat sat.", 5);
        assert!(result.consistency_score >= 0.8);
    }

    #[test]
    fn test_empty_is_zero() {
        let analyzer = SemanticCoherenceAnalyzer::new();
        assert_eq!(analyzer.topic_consistency("  ", 5), TopicConsistency::zero());
    }

    #[test]
    fn test_single_segment_is_perfect() {
        let analyzer = SemanticCoherenceAnalyzer::new();
        let result = analyzer.topic_consistency("A single short statement about nothing", 5);
        assert_eq!(result, TopicConsistency::perfect());
    }

    #[test]
    fn test_topic_jumping_is_penalised() {
        let segments = vec![
            "market inflation budget trade".to_string(),
            "patient diagnosis therapy clinical".to_string(),
            "software algorithm network code".to_string(),
            "experiment observation results method".to_string(),
        ];
        let result = vocabulary_consistency(&segments);
        // four domains, one segment each: ratio 0.25, penalty min(0.4, 0.30)
        assert!((result.dominant_topic_ratio - 0.25).abs() < 1e-9);
        assert_eq!(result.consistency_score, 0.0);
    }

    #[test]
    fn test_single_domain_segments() {
        let segments = vec![
            "market inflation shapes the budget".to_string(),
            "trade policy drives economic growth".to_string(),
            "nothing relevant here at all".to_string(),
        ];
        let result = vocabulary_consistency(&segments);
        assert!((result.consistency_score - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_entropy_consistency() {
        assert_eq!(entropy_consistency(&[0, 0, 0]).consistency_score, 1.0);
        let split = entropy_consistency(&[0, 1, 0, 1]);
        assert!(split.consistency_score < 0.01);
        assert_eq!(split.topic_distribution, vec![0.5, 0.5]);
    }

    struct AlternatingModel;

    impl TopicModel for AlternatingModel {
        fn name(&self) -> &str {
            "alternating"
        }

        fn dominant_topics(&self, segments: &[String], _num_topics: usize) -> AnalysisResult<Vec<usize>> {
            Ok((0..segments.len()).map(|i| i % 2).collect())
        }
    }

    struct BrokenModel;

    impl TopicModel for BrokenModel {
        fn name(&self) -> &str {
            "broken"
        }

        fn dominant_topics(&self, _segments: &[String], _num_topics: usize) -> AnalysisResult<Vec<usize>> {
            Err(AnalysisError::TopicModel("did not converge".to_string()))
        }
    }

    #[test]
    fn test_injected_topic_model_is_used() {
        let analyzer = SemanticCoherenceAnalyzer::new().with_topic_model(Arc::new(AlternatingModel));
        let text = "Rivers carve deep valleys. Mountains rise above the plains. \
                    Rivers feed the fertile plains. Mountains hold the winter snow.";
        let result = analyzer.topic_consistency(text, 5);
        assert!(result.consistency_score < 0.01);
        assert_eq!(result.topic_distribution.len(), 2);
    }

    #[test]
    fn test_failing_topic_model_degrades_to_zero() {
        let analyzer = SemanticCoherenceAnalyzer::new().with_topic_model(Arc::new(BrokenModel));
        let text = "Rivers carve deep valleys. Mountains rise above the plains. \
                    Rivers feed the fertile plains.";
        assert_eq!(analyzer.topic_consistency(text, 5), TopicConsistency::zero());
    }
}
