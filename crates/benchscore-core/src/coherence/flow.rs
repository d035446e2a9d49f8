use super::{recover, CrossSentenceCoherence, FlowReport, SemanticCoherenceAnalyzer};
use crate::similarity::BackendKind;
use crate::stats::{clamp_unit, mean, std_dev, variance};
use crate::text::{jaccard, tokenize, word_count};

/// Discourse-marker categories and the boost each contributes.
const TRANSITION_MARKERS: &[(&[&str], f64)] = &[
    (
        &["first", "second", "third", "then", "next", "after", "following", "subsequently"],
        0.4,
    ),
    (
        &[
            "therefore", "thus", "hence", "consequently", "as a result", "because", "since",
            "due to",
        ],
        0.4,
    ),
    (
        &["however", "nevertheless", "despite", "although", "while", "whereas", "in contrast"],
        0.3,
    ),
    (
        &[
            "furthermore", "moreover", "additionally", "also", "in fact", "indeed",
            "specifically",
        ],
        0.3,
    ),
    (
        &["finally", "in conclusion", "to summarize", "overall", "ultimately", "in summary"],
        0.2,
    ),
];

/// Domain terms that bind adjacent sentences when both use them.
const SHARED_DOMAIN_TERMS: &[&[&str]] = &[
    &[
        "economic", "market", "financial", "monetary", "policy", "analysis", "volatility",
        "confidence",
    ],
    &["system", "data", "algorithm", "network", "implementation", "performance"],
    &["research", "study", "analysis", "findings", "methodology", "evidence"],
];

/// Transition scores inside this band count as well-formed.
const GOOD_TRANSITION_MIN: f64 = 0.2;
const GOOD_TRANSITION_MAX: f64 = 0.7;

impl SemanticCoherenceAnalyzer {
    /// Sentence-to-sentence flow.
    pub fn semantic_flow(&self, text: &str) -> FlowReport {
        if text.trim().is_empty() {
            return FlowReport::zero();
        }
        let sentences = self.segmenter.sentences(text);
        if sentences.len() < 2 {
            return FlowReport::single(sentences.len());
        }

        let transitions = self.transition_scores(&sentences);
        let flow_score = mean(&transitions);
        let transition_quality = transition_quality(&transitions);

        let avg_words = mean(
            &sentences
                .iter()
                .map(|s| word_count(s) as f64)
                .collect::<Vec<_>>(),
        );
        let narrative_coherence = clamp_unit(
            0.4 * (1.0 - std_dev(&transitions))
                + 0.4 * flow_score
                + 0.2 * (avg_words / 10.0).min(1.0),
        );

        FlowReport {
            flow_score: clamp_unit(flow_score),
            transition_quality,
            narrative_coherence,
            transition_scores: transitions,
            sentence_count: sentences.len(),
        }
    }

    /// Statistics over every sentence pair.
    pub fn cross_sentence_coherence(&self, text: &str) -> CrossSentenceCoherence {
        let sentences = self.segmenter.sentences(text);
        if sentences.len() < 2 {
            return CrossSentenceCoherence::single();
        }

        let scores = if self.backend.kind() == BackendKind::Embedding {
            recover(
                "cross_sentence_coherence",
                self.backend.pairwise_similarities(&sentences),
                || lexical_pairwise(&sentences),
            )
        } else {
            lexical_pairwise(&sentences)
        };

        let min = scores.iter().copied().fold(f64::INFINITY, f64::min);
        let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        CrossSentenceCoherence {
            average_coherence: clamp_unit(mean(&scores)),
            coherence_variance: variance(&scores),
            min_coherence: clamp_unit(min),
            max_coherence: clamp_unit(max),
        }
    }

    fn transition_scores(&self, sentences: &[String]) -> Vec<f64> {
        if self.backend.kind() == BackendKind::Embedding {
            return recover(
                "semantic_flow",
                self.backend.consecutive_similarities(sentences),
                || lexical_transitions(sentences),
            );
        }
        lexical_transitions(sentences)
    }
}

fn lexical_transitions(sentences: &[String]) -> Vec<f64> {
    sentences
        .windows(2)
        .map(|pair| lexical_transition(&pair[0], &pair[1]))
        .collect()
}

/// Score one adjacent pair: 0.3 × word overlap, plus discourse-marker and
/// shared-domain boosts, capped at 1.
pub(crate) fn lexical_transition(previous: &str, next: &str) -> f64 {
    let prev_lower = previous.to_lowercase();
    let next_lower = next.to_lowercase();
    let prev_words = tokenize(&prev_lower);
    let next_words = tokenize(&next_lower);
    if prev_words.is_empty() || next_words.is_empty() {
        return 0.0;
    }

    let base = jaccard(&prev_words, &next_words) * 0.3;

    let marker_boost: f64 = TRANSITION_MARKERS
        .iter()
        .filter(|(markers, _)| markers.iter().any(|m| next_lower.contains(m)))
        .map(|(_, boost)| boost)
        .sum();

    let domain_boost: f64 = SHARED_DOMAIN_TERMS
        .iter()
        .map(|terms| {
            let shared = terms
                .iter()
                .filter(|t| prev_lower.contains(*t) && next_lower.contains(*t))
                .count();
            (shared as f64 * 0.15).min(0.3)
        })
        .sum();

    (base + marker_boost + domain_boost).min(1.0)
}

/// Mean per-transition quality: 1 inside [0.2, 0.7], linear fall-off outside.
pub(crate) fn transition_quality(transitions: &[f64]) -> f64 {
    if transitions.is_empty() {
        return 1.0;
    }
    let qualities: Vec<f64> = transitions
        .iter()
        .map(|&s| {
            if s < GOOD_TRANSITION_MIN {
                s / GOOD_TRANSITION_MIN
            } else if s > GOOD_TRANSITION_MAX {
                (1.0 - (s - GOOD_TRANSITION_MAX) / 0.3).max(0.0)
            } else {
                1.0
            }
        })
        .collect();
    clamp_unit(mean(&qualities))
}

fn lexical_pairwise(sentences: &[String]) -> Vec<f64> {
    let token_sets: Vec<Vec<String>> = sentences.iter().map(|s| tokenize(s)).collect();
    let mut scores = Vec::new();
    for i in 0..token_sets.len() {
        for j in i + 1..token_sets.len() {
            scores.push(jaccard(&token_sets[i], &token_sets[j]));
        }
    }
    scores
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_sentence_flow_is_perfect() {
        let analyzer = SemanticCoherenceAnalyzer::new();
        let report = analyzer.semantic_flow("Only one sentence lives here.");
        assert_eq!(report, FlowReport::single(1));
    }

    #[test]
    fn test_empty_flow_is_zero() {
        let analyzer = SemanticCoherenceAnalyzer::new();
        assert_eq!(analyzer.semantic_flow(""), FlowReport::zero());
    }

    #[test]
    fn test_marker_boosts_transition() {
        let plain = lexical_transition("The market fell sharply today", "Birds sang in the garden");
        let marked = lexical_transition(
            "The market fell sharply today",
            "Therefore birds sang in the garden",
        );
        assert!(marked > plain);
        assert!((marked - plain - 0.4).abs() < 0.05);
    }

    #[test]
    fn test_shared_domain_terms_boost() {
        let score = lexical_transition(
            "The market shows volatility",
            "Volatility unsettles the market",
        );
        // economic: market + volatility shared, 2 × 0.15
        assert!(score >= 0.3);
    }

    #[test]
    fn test_transition_capped_at_one() {
        let score = lexical_transition(
            "First the market analysis used data and research evidence",
            "Therefore, however, furthermore, finally the market analysis used data and research evidence",
        );
        assert_eq!(score, 1.0);
    }

    #[test]
    fn test_transition_quality_band() {
        assert_eq!(transition_quality(&[]), 1.0);
        assert_eq!(transition_quality(&[0.5]), 1.0);
        assert!((transition_quality(&[0.1]) - 0.5).abs() < 1e-9);
        assert_eq!(transition_quality(&[1.0]), 0.0);
    }

    #[test]
    fn test_flow_scores_in_range() {
        let analyzer = SemanticCoherenceAnalyzer::new();
        let text = "First, the system collects data. Then the algorithm ranks the data. \
                    Finally, the network reports the results.";
        let report = analyzer.semantic_flow(text);
        assert_eq!(report.sentence_count, 3);
        assert_eq!(report.transition_scores.len(), 2);
        assert!((0.0..=1.0).contains(&report.flow_score));
        assert!((0.0..=1.0).contains(&report.narrative_coherence));
    }

    #[test]
    fn test_cross_sentence_identical() {
        let analyzer = SemanticCoherenceAnalyzer::new();
        let result = analyzer.cross_sentence_coherence("The cat sat down. The cat sat down.");
        assert_eq!(result.average_coherence, 1.0);
        assert_eq!(result.coherence_variance, 0.0);
    }

    #[test]
    fn test_cross_sentence_single() {
        let analyzer = SemanticCoherenceAnalyzer::new();
        assert_eq!(
            analyzer.cross_sentence_coherence("Just one sentence here."),
            CrossSentenceCoherence::single()
        );
    }
}
