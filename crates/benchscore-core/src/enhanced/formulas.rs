//! Final-score formulas for the non-haiku task types.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::tiers::{MultiTierScores, DISMISSIVE_TERMS};
use crate::config::BlendWeights;
use crate::stats::clamp;
use crate::text::{content_words, count_present};

/// Enhanced-component weights of the general formula.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ComponentWeights {
    pub exact_match: f64,
    pub partial_match: f64,
    pub semantic_similarity: f64,
    pub domain_synthesis: f64,
    pub conceptual_creativity: f64,
}

impl Default for ComponentWeights {
    fn default() -> Self {
        Self {
            exact_match: 0.25,
            partial_match: 0.25,
            semantic_similarity: 0.30,
            domain_synthesis: 0.10,
            conceptual_creativity: 0.10,
        }
    }
}

impl ComponentWeights {
    /// Semantic weight cut to 0.10, the freed weight split onto exact and
    /// partial match.
    pub fn semantic_saturated() -> Self {
        Self {
            exact_match: 0.35,
            partial_match: 0.35,
            semantic_similarity: 0.10,
            ..Self::default()
        }
    }

    fn apply(&self, tiers: &MultiTierScores) -> f64 {
        tiers.exact_match * self.exact_match
            + tiers.partial_match * self.partial_match
            + tiers.semantic_similarity * self.semantic_similarity
            + tiers.domain_synthesis * self.domain_synthesis
            + tiers.conceptual_creativity * self.conceptual_creativity
    }
}

/// How the general formula arrived at its score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GeneralScore {
    pub score: f64,
    pub base_weight: f64,
    pub enhanced_weight: f64,
    pub component_weights: ComponentWeights,
    pub enhanced_score: f64,
    pub content_adjustment: f64,
}

// ---------------------------------------------------------------------------
// Creative completion
// ---------------------------------------------------------------------------

/// `50 + 30 × (0.3 exact + 0.4 partial + 0.2 semantic + 0.1 creativity)`,
/// clamped to [15, 105].
pub fn creative_completion_score(tiers: &MultiTierScores) -> f64 {
    let blend = 0.3 * tiers.exact_match
        + 0.4 * tiers.partial_match
        + 0.2 * tiers.semantic_similarity
        + 0.1 * tiers.conceptual_creativity;
    clamp(50.0 + 30.0 * blend, 15.0, 105.0)
}

// ---------------------------------------------------------------------------
// Logical reasoning
// ---------------------------------------------------------------------------

const ANALYSIS_TERMS: &[&str] = &[
    "analy", "examine", "evaluat", "assess", "consider", "premise", "systematic", "logical",
    "step", "first", "therefore", "conclu", "deduc", "infer",
];
const EVIDENCE_TERMS: &[&str] = &[
    "evidence", "data", "shows", "demonstrat", "proof", "based on", "support", "indicat",
    "combin", "pattern", "example",
];
const PROGRESSION_TERMS: &[&str] = &[
    "however", "moreover", "therefore", "furthermore", "consequently", "thus", "additionally",
    "leads to", "follows", "alternatively", "in contrast", "as a result",
];
const COMPLETENESS_TERMS: &[&str] = &[
    "comprehensive", "all aspects", "thorough", "each", "complete", "in conclusion", "detailed",
    "overall", "every", "fully",
];

/// Analytical depth, 8 to 25.
pub fn analysis_depth(text: &str) -> f64 {
    let hits = count_present(&text.to_lowercase(), ANALYSIS_TERMS) as f64;
    (8.0 + 3.0 * hits).min(25.0)
}

/// Evidence integration, 0 to 20.
pub fn evidence_integration(text: &str) -> f64 {
    let hits = count_present(&text.to_lowercase(), EVIDENCE_TERMS) as f64;
    (4.0 * hits).min(20.0)
}

/// Logical progression, 0 to 15.
pub fn logical_progression(text: &str) -> f64 {
    let hits = count_present(&text.to_lowercase(), PROGRESSION_TERMS) as f64;
    (3.0 * hits).min(15.0)
}

/// Reasoning completeness, 0 to 15.
pub fn reasoning_completeness(text: &str) -> f64 {
    let hits = count_present(&text.to_lowercase(), COMPLETENESS_TERMS) as f64;
    (3.0 * hits).min(15.0)
}

/// `0.5 × base + analysis + evidence + progression + completeness
/// + 10 × mean(exact, partial)`, clamped to [15, 100].
pub fn logical_reasoning_score(text: &str, base_score: f64, tiers: &MultiTierScores) -> f64 {
    let pattern_bonus = 10.0 * (tiers.exact_match + tiers.partial_match) / 2.0;
    clamp(
        0.5 * base_score
            + analysis_depth(text)
            + evidence_integration(text)
            + logical_progression(text)
            + reasoning_completeness(text)
            + pattern_bonus,
        15.0,
        100.0,
    )
}

// ---------------------------------------------------------------------------
// Cultural reasoning
// ---------------------------------------------------------------------------

struct TraditionVocabulary {
    triggers: &'static [&'static str],
    vocabulary: &'static [&'static str],
}

const TRADITIONS: &[TraditionVocabulary] = &[
    TraditionVocabulary {
        triggers: &["islam", "quran", "arabic", "muslim"],
        vocabulary: &[
            "allah", "quran", "insha", "prophet", "mercy", "compassion", "righteous", "ummah",
            "divine", "guidance", "faith",
        ],
    },
    TraditionVocabulary {
        triggers: &["ojibwe", "native", "indigenous", "anishinaabe", "lakota"],
        vocabulary: &[
            "elders", "ancestors", "seven generations", "land", "spirit", "ceremony", "medicine",
            "relatives", "circle", "teachings",
        ],
    },
    TraditionVocabulary {
        triggers: &["chinese", "confucian", "taoist", "daoist"],
        vocabulary: &[
            "harmony", "balance", "filial", "ancestors", "virtue", "dao", "tao", "yin", "yang",
            "propriety",
        ],
    },
    TraditionVocabulary {
        triggers: &["vedic", "hindu", "sanskrit", "dharma"],
        vocabulary: &["dharma", "karma", "atman", "brahman", "sacred", "yoga", "veda", "moksha"],
    },
    TraditionVocabulary {
        triggers: &["japanese", "haiku", "zen"],
        vocabulary: &[
            "mono no aware", "wabi", "sabi", "zen", "impermanence", "season", "kigo", "stillness",
        ],
    },
    TraditionVocabulary {
        triggers: &["african", "yoruba", "ubuntu", "griot"],
        vocabulary: &["ubuntu", "community", "ancestors", "griot", "oral", "proverb", "elders"],
    },
];

const RESPECTFUL_TERMS: &[&str] = &[
    "respect", "honor", "wisdom", "traditional", "sacred", "appreciat", "acknowledg", "revere",
    "heritage",
];
const HOSTILE_TERMS: &[&str] = &["wrong", "stupid", "nonsense", "silly"];
const CULTURAL_THEMES: &[&str] = &[
    "sacred", "divine", "spiritual", "tradition", "wisdom", "guidance", "ancestral", "ceremony",
    "ritual", "teaching", "harmony", "balance",
];

fn dismissive_count(lower: &str) -> usize {
    count_present(lower, DISMISSIVE_TERMS) + count_present(lower, HOSTILE_TERMS)
}

/// Authenticity of the response to the traditions named in the prompt or
/// response, 0 to 100.
pub fn cultural_authenticity(response: &str, prompt: &str) -> f64 {
    let lower = response.to_lowercase();
    let context = format!("{} {}", prompt.to_lowercase(), lower);

    let vocabulary_hits: usize = TRADITIONS
        .iter()
        .filter(|t| t.triggers.iter().any(|trigger| context.contains(trigger)))
        .map(|t| count_present(&lower, t.vocabulary))
        .sum();
    let vocabulary = (8.0 * vocabulary_hits as f64).min(50.0);
    let respect = (5.0 * count_present(&lower, RESPECTFUL_TERMS) as f64).min(20.0);
    let penalty = 15.0 * dismissive_count(&lower) as f64;

    clamp(30.0 + vocabulary + respect - penalty, 0.0, 100.0)
}

/// Respectful register minus dismissive framing, 0 to 20.
pub fn cultural_sensitivity(text: &str) -> f64 {
    let lower = text.to_lowercase();
    let respect = (5.0 * count_present(&lower, RESPECTFUL_TERMS) as f64).min(20.0);
    clamp(respect - 8.0 * dismissive_count(&lower) as f64, 0.0, 20.0)
}

/// Thematic depth, 5 to 15.
pub fn cultural_thematic_depth(text: &str) -> f64 {
    let hits = count_present(&text.to_lowercase(), CULTURAL_THEMES) as f64;
    (5.0 + 2.0 * hits).min(15.0)
}

/// `0.6 × base + pattern completion (8-20) + sensitivity (0-20)
/// + thematic depth (5-15)`, clamped to [15, 100].
pub fn cultural_reasoning_score(response: &str, prompt: &str, base_score: f64) -> f64 {
    let pattern_completion = 8.0 + 12.0 * cultural_authenticity(response, prompt) / 100.0;
    clamp(
        0.6 * base_score
            + pattern_completion
            + cultural_sensitivity(response)
            + cultural_thematic_depth(response),
        15.0,
        100.0,
    )
}

// ---------------------------------------------------------------------------
// General
// ---------------------------------------------------------------------------

const SOPHISTICATED_TERMS: &[&str] = &[
    "analysis", "perspective", "context", "tradition", "cultural", "significance", "framework",
    "nuance", "complex", "interpret", "heritage", "wisdom", "implication", "synthesis",
];

const SHORT_RESPONSE_WORDS: usize = 15;
const SHORT_RESPONSE_ALLOWANCE: f64 = 18.0;

fn length_bonus(words: usize) -> f64 {
    match words {
        0 => 0.0,
        1..=4 => 1.0,
        5..=14 => 3.0,
        15..=29 => 6.0,
        _ => 10.0,
    }
}

/// Bonus points for substance beyond the pattern tiers. Terse responses
/// keep only half of anything above 18 points.
pub fn content_adjustment(
    response: &str,
    prompt: &str,
    tiers: &MultiTierScores,
    has_patterns: bool,
) -> f64 {
    let words = response.split_whitespace().count();
    let lower = response.to_lowercase();

    let mut adjustment = length_bonus(words);
    adjustment += (3.0 * count_present(&lower, SOPHISTICATED_TERMS) as f64).min(12.0);

    let prompt_words: HashSet<String> = content_words(prompt).into_iter().collect();
    let thematic = content_words(response)
        .into_iter()
        .collect::<HashSet<_>>()
        .intersection(&prompt_words)
        .count();
    adjustment += (2.0 * thematic as f64).min(10.0);

    if has_patterns {
        if tiers.exact_match >= 0.8 {
            adjustment += 4.0;
        }
        if tiers.partial_match >= 0.8 {
            adjustment += 3.0;
        }
    }

    if words < SHORT_RESPONSE_WORDS && adjustment > SHORT_RESPONSE_ALLOWANCE {
        adjustment -= (adjustment - SHORT_RESPONSE_ALLOWANCE) / 2.0;
    }
    adjustment
}

/// Base/enhanced blend plus the content adjustment, clamped to [0, 105].
pub fn general_score(
    base_score: f64,
    tiers: &MultiTierScores,
    blend: &BlendWeights,
    content_adjustment: f64,
) -> GeneralScore {
    let (base_weight, enhanced_weight) = blend.for_base_score(base_score);
    let component_weights = if blend.is_semantic_saturated(tiers.semantic_similarity) {
        ComponentWeights::semantic_saturated()
    } else {
        ComponentWeights::default()
    };
    let enhanced_score = component_weights.apply(tiers) * 100.0;
    let score = clamp(
        base_score * base_weight + enhanced_score * enhanced_weight + content_adjustment,
        0.0,
        105.0,
    );
    GeneralScore {
        score,
        base_weight,
        enhanced_weight,
        component_weights,
        enhanced_score,
        content_adjustment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiers(exact: f64, partial: f64, semantic: f64, creativity: f64) -> MultiTierScores {
        MultiTierScores {
            exact_match: exact,
            partial_match: partial,
            semantic_similarity: semantic,
            domain_synthesis: 0.0,
            conceptual_creativity: creativity,
        }
    }

    #[test]
    fn test_creative_formula() {
        let score = creative_completion_score(&tiers(0.6, 0.7, 0.8, 0.9));
        assert!((score - 71.3).abs() < 1e-9);
        assert_eq!(creative_completion_score(&MultiTierScores::default()), 50.0);
    }

    #[test]
    fn test_analysis_depth_bounds() {
        assert_eq!(analysis_depth("Yes, this is correct."), 8.0);
        let analytical = "First, I analyze the premises systematically. Then I examine each \
            step and therefore conclude with a logical deduction.";
        let score = analysis_depth(analytical);
        assert!(score > 15.0 && score <= 25.0);
    }

    #[test]
    fn test_evidence_and_progression() {
        let evidence = "The evidence shows a clear pattern, and combining both sources supports it.";
        let score = evidence_integration(evidence);
        assert!((10.0..=20.0).contains(&score));

        let progression = "However, the data differs. Moreover, the sample is small. Therefore we wait.";
        let score = logical_progression(progression);
        assert!((7.0..=15.0).contains(&score));
    }

    #[test]
    fn test_completeness() {
        let text = "A comprehensive review covering all aspects in detailed fashion. In conclusion, every case holds.";
        let score = reasoning_completeness(text);
        assert!((8.0..=15.0).contains(&score));
        assert_eq!(reasoning_completeness("Short."), 0.0);
    }

    #[test]
    fn test_logical_formula_band() {
        let response = "First, we analyze the premises. Therefore, we can deduce the logical \
            implications. This evidence supports our conclusion.";
        let score = logical_reasoning_score(response, 55.0, &tiers(0.7, 0.8, 0.0, 0.0));
        assert!((60.0..=85.0).contains(&score), "score {score}");
        assert_eq!(logical_reasoning_score("", 0.0, &MultiTierScores::default()), 15.0);
    }

    #[test]
    fn test_cultural_sensitivity_levels() {
        let respectful = cultural_sensitivity("This traditional wisdom deserves respect and honor.");
        assert!((15.0..=20.0).contains(&respectful));
        assert!(cultural_sensitivity("This is wrong and stupid nonsense.") < 10.0);
    }

    #[test]
    fn test_cultural_thematic_depth() {
        let score = cultural_thematic_depth("sacred tradition reflects divine wisdom and spiritual guidance");
        assert!(score > 8.0 && score <= 15.0);
        assert_eq!(cultural_thematic_depth("nothing relevant"), 5.0);
    }

    #[test]
    fn test_cultural_authenticity_tradition_vocabulary() {
        let prompt = "Interpret this verse from the Quran";
        let authentic = cultural_authenticity(
            "Allah's guidance provides wisdom. The Quran teaches divine mercy and compassion.",
            prompt,
        );
        assert!(authentic >= 70.0);
        let generic = cultural_authenticity(
            "The divine guidance speaks to sacred wisdom and traditional respect.",
            "Reflect",
        );
        assert!((40.0..=65.0).contains(&generic));
        assert!(cultural_authenticity("This religious nonsense is outdated mythology.", prompt) < 30.0);
    }

    #[test]
    fn test_content_adjustment_short_penalty() {
        let tiers = tiers(1.0, 1.0, 0.5, 0.0);
        // 8 words: length 3, sophisticated 12, thematic 4, patterns 7 = 26 -> 22
        let adjustment = content_adjustment(
            "Cultural analysis framework heritage wisdom nuance context significance",
            "Discuss cultural heritage",
            &tiers,
            true,
        );
        assert!((adjustment - 22.0).abs() < 1e-9, "adjustment {adjustment}");
    }

    #[test]
    fn test_general_blend_switches_on_low_base() {
        let blend = BlendWeights::default();
        let t = tiers(0.5, 0.5, 0.5, 0.0);
        let low = general_score(10.0, &t, &blend, 0.0);
        assert_eq!((low.base_weight, low.enhanced_weight), (0.40, 0.60));
        let high = general_score(70.0, &t, &blend, 0.0);
        assert_eq!((high.base_weight, high.enhanced_weight), (0.65, 0.35));
        // enhanced = (0.125 + 0.125 + 0.15) * 100 = 40
        assert!((high.enhanced_score - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_general_redistributes_saturated_semantic() {
        let blend = BlendWeights::default();
        let saturated = general_score(50.0, &tiers(0.6, 0.6, 1.0, 0.0), &blend, 0.0);
        assert_eq!(saturated.component_weights, ComponentWeights::semantic_saturated());
        // 0.6*0.35*2 + 1.0*0.10 = 0.52
        assert!((saturated.enhanced_score - 52.0).abs() < 1e-9);

        let absent = general_score(50.0, &tiers(0.6, 0.6, 0.0, 0.0), &blend, 0.0);
        assert_eq!(absent.component_weights, ComponentWeights::semantic_saturated());
    }

    #[test]
    fn test_general_clamped() {
        let blend = BlendWeights::default();
        let score = general_score(100.0, &tiers(1.0, 1.0, 0.5, 1.0), &blend, 40.0);
        assert_eq!(score.score, 105.0);
    }
}
