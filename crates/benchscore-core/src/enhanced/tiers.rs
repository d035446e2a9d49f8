//! Multi-tier scores and the integration/cultural analyses built on the
//! same keyword tables.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::definition::TestDefinition;
use crate::stats::clamp_unit;
use crate::text::{content_words, count_present, split_sentences};

/// Per-tier scores, each in [0, 1].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct MultiTierScores {
    pub exact_match: f64,
    pub partial_match: f64,
    pub semantic_similarity: f64,
    pub domain_synthesis: f64,
    pub conceptual_creativity: f64,
}

/// Cross-domain integration signals for tests listing `domains_integrated`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct IntegrationAnalysis {
    pub is_multi_domain: bool,
    pub domains_integrated: Vec<String>,
    pub domain_coverage: usize,
    /// Weakest per-domain keyword coverage; 0 for fewer than two domains.
    pub integration_quality: f64,
    pub synthesis_coherence: f64,
}

/// Tradition-register scores; all zero for non-cultural material.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct CulturalAnalysis {
    pub cultural_depth_score: f64,
    pub tradition_accuracy_score: f64,
    pub cross_cultural_sensitivity: f64,
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

const DOMAIN_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "quantum_mechanics",
        &["quantum", "superposition", "entanglement", "wave", "particle", "uncertainty"],
    ),
    (
        "philosophy",
        &["consciousness", "existence", "reality", "knowledge", "ethics", "metaphysic"],
    ),
    (
        "sociology",
        &["society", "social", "culture", "community", "institution", "collective"],
    ),
    ("physics", &["energy", "force", "matter", "motion", "field", "mass"]),
    ("mathematics", &["equation", "proof", "theorem", "number", "function", "logic"]),
    (
        "linguistics",
        &["language", "meaning", "syntax", "semantic", "grammar", "communication"],
    ),
];

const CREATIVITY_INDICATORS: &[&str] = &[
    "novel",
    "innovative",
    "unique",
    "original",
    "creative",
    "new perspective",
    "fresh approach",
    "different way",
    "imagine",
    "envision",
    "conceive",
    "insight",
    "breakthrough",
];

const INTEGRATION_INDICATORS: &[&str] = &[
    "because",
    "therefore",
    "thus",
    "consequently",
    "bridges",
    "connects",
    "integrates",
    "synthesizes",
    "combines",
    "unifies",
    "relates to",
    "links",
    "intersection",
    "interplay",
    "both",
    "together",
    "in relation to",
    "draws on",
];

const CULTURAL_INDICATORS: &[&str] = &[
    "cultural",
    "culture",
    "tradition",
    "indigenous",
    "heritage",
    "ancestral",
    "ritual",
    "ceremony",
    "sacred",
    "spiritual",
    "customs",
    "folklore",
    "oral history",
    "ethnic",
    "elders",
    "community wisdom",
];

/// Indicators anchored at a word start, so `agriculture` is not cultural
/// while `traditions` still is.
static CULTURAL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let alternatives: Vec<String> = CULTURAL_INDICATORS.iter().map(|i| regex::escape(i)).collect();
    Regex::new(&format!(r"\b(inter|multi)?({})", alternatives.join("|")))
        .expect("cultural indicator pattern is valid")
});

const TRADITION_REGISTER: &[&str] = &[
    "traditional",
    "sacred",
    "ancestral",
    "heritage",
    "wisdom",
    "teachings",
    "elders",
    "ceremony",
    "respect",
    "honor",
];

pub(crate) const DISMISSIVE_TERMS: &[&str] = &[
    "primitive",
    "backward",
    "superstitio",
    "savage",
    "uncivilized",
    "exotic",
    "outdated",
    "mythology",
];

const SENSITIVITY_INDICATORS: &[&str] = &[
    "respect",
    "acknowledg",
    "understand",
    "appreciat",
    "honor",
    "recogni",
    "sensitiv",
    "diverse",
    "perspective",
];

const COHERENCE_MARKERS: &[&str] = &[
    "therefore",
    "because",
    "however",
    "thus",
    "furthermore",
    "moreover",
    "consequently",
    "additionally",
    "for example",
    "specifically",
    "as a result",
    "in addition",
    "which",
];

// ---------------------------------------------------------------------------
// Word helpers
// ---------------------------------------------------------------------------

/// Lowercased whitespace words with surrounding punctuation removed.
pub(crate) fn word_set(text: &str) -> HashSet<String> {
    text.split_whitespace()
        .map(|w| {
            w.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|w| !w.is_empty())
        .collect()
}

fn keyword_parts(raw: &str) -> impl Iterator<Item = String> + '_ {
    raw.split(|c: char| c == '_' || c.is_whitespace())
        .map(|w| {
            w.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|w| !w.is_empty())
}

// ---------------------------------------------------------------------------
// Heuristic fallbacks
// ---------------------------------------------------------------------------

/// Quality of a response on its own terms, in [0, 1]: length,
/// coherence-marker density, sentence count and vocabulary diversity.
pub fn content_quality_score(text: &str) -> f64 {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return 0.0;
    }
    let n = words.len() as f64;
    let lower = text.to_lowercase();

    let length = (n / 50.0).min(1.0) * 0.3;
    let markers = (count_present(&lower, COHERENCE_MARKERS) as f64 / 3.0).min(1.0) * 0.25;
    let sentences = (split_sentences(text).len() as f64 / 3.0).min(1.0) * 0.2;
    let unique = word_set(text).len() as f64;
    // Diversity of a three-word reply says little, so it is scaled by length.
    let diversity = (unique / n) * (n / 10.0).min(1.0) * 0.25;

    clamp_unit(length + markers + sentences + diversity)
}

/// Relevance of a response to the test's name, description and prompt,
/// blended with [`content_quality_score`].
pub fn response_substance_score(response: &str, definition: &TestDefinition, test_name: &str) -> f64 {
    let quality = content_quality_score(response);
    let context = format!(
        "{} {} {}",
        test_name.replace('_', " "),
        definition.description_text(),
        definition.prompt_text()
    );
    let context_words: HashSet<String> = content_words(&context).into_iter().collect();
    if context_words.is_empty() {
        return clamp_unit(0.1 + 0.4 * quality);
    }
    let response_words: HashSet<String> = content_words(response).into_iter().collect();
    let overlap = response_words.intersection(&context_words).count() as f64;
    let relevance = (overlap / context_words.len().min(5) as f64).min(1.0);
    clamp_unit(0.6 * relevance + 0.4 * quality)
}

fn concept_coverage(response_lower: &str, concepts: &[String]) -> f64 {
    let covered = concepts
        .iter()
        .filter(|concept| keyword_parts(concept).any(|word| response_lower.contains(&word)))
        .count();
    covered as f64 / concepts.len() as f64
}

// ---------------------------------------------------------------------------
// Tiers
// ---------------------------------------------------------------------------

/// Fraction of expected patterns present as case-insensitive substrings;
/// [`content_quality_score`] when the test lists none.
pub fn exact_match_score(response: &str, patterns: &[String]) -> f64 {
    if patterns.is_empty() {
        return content_quality_score(response);
    }
    let lower = response.to_lowercase();
    let hits = patterns
        .iter()
        .filter(|p| lower.contains(&p.to_lowercase()))
        .count();
    hits as f64 / patterns.len() as f64
}

/// Fraction of expected-pattern words present in the response. Without
/// patterns, concept coverage; without concepts either, the substance
/// heuristic.
pub fn partial_match_score(response: &str, definition: &TestDefinition, test_name: &str) -> f64 {
    let patterns = &definition.expected_patterns;
    if patterns.is_empty() {
        let concepts = &definition.metadata.concepts_tested;
        if concepts.is_empty() {
            return response_substance_score(response, definition, test_name);
        }
        return concept_coverage(&response.to_lowercase(), concepts);
    }

    let pattern_words: HashSet<String> = patterns.iter().flat_map(|p| word_set(p)).collect();
    if pattern_words.is_empty() {
        return 0.0;
    }
    let response_words = word_set(response);
    let matched = pattern_words.intersection(&response_words).count();
    matched as f64 / pattern_words.len() as f64
}

/// Keyword overlap against concepts and description, used when no semantic
/// analyzer is configured.
pub fn keyword_similarity(response: &str, definition: &TestDefinition) -> f64 {
    let keywords: HashSet<String> = definition
        .metadata
        .concepts_tested
        .iter()
        .map(String::as_str)
        .chain(std::iter::once(definition.description_text()))
        .flat_map(keyword_parts)
        .collect();
    if keywords.is_empty() {
        return 0.0;
    }
    let response_words = word_set(response);
    let matches = keywords.intersection(&response_words).count() as f64;
    (matches / keywords.len() as f64).min(1.0)
}

fn domain_coverage(response_lower: &str, domain: &str) -> f64 {
    let domain = domain.to_lowercase();
    let keywords: Vec<String> = match DOMAIN_KEYWORDS.iter().find(|(name, _)| *name == domain) {
        Some((_, words)) => words.iter().map(|w| w.to_string()).collect(),
        None => keyword_parts(&domain).collect(),
    };
    if keywords.is_empty() {
        return 0.0;
    }
    let hits = keywords
        .iter()
        .filter(|k| response_lower.contains(k.as_str()))
        .count();
    (hits as f64 / keywords.len() as f64).min(1.0)
}

/// Weakest per-domain keyword coverage; 0 unless two or more domains are
/// integrated.
pub fn domain_synthesis_score(response: &str, domains: &[String]) -> f64 {
    if domains.len() < 2 {
        return 0.0;
    }
    let lower = response.to_lowercase();
    domains
        .iter()
        .map(|d| domain_coverage(&lower, d))
        .fold(f64::INFINITY, f64::min)
}

/// Creativity-indicator density per fifty words, capped at 1.
pub fn creativity_score(response: &str) -> f64 {
    let words = response.split_whitespace().count() as f64;
    let signals = count_present(&response.to_lowercase(), CREATIVITY_INDICATORS) as f64;
    (signals / (words / 50.0).max(1.0)).min(1.0)
}

// ---------------------------------------------------------------------------
// Integration & cultural analysis
// ---------------------------------------------------------------------------

pub fn integration_analysis(response: &str, domains: &[String]) -> IntegrationAnalysis {
    if domains.is_empty() {
        return IntegrationAnalysis::default();
    }
    let expected_links = (domains.len().saturating_sub(1)).max(1) as f64;
    let signals = count_present(&response.to_lowercase(), INTEGRATION_INDICATORS) as f64;
    IntegrationAnalysis {
        is_multi_domain: true,
        domains_integrated: domains.to_vec(),
        domain_coverage: domains.len(),
        integration_quality: domain_synthesis_score(response, domains),
        synthesis_coherence: (signals / expected_links).min(1.0),
    }
}

/// Whether the test definition mentions cultural material.
pub fn has_cultural_content(definition: &TestDefinition) -> bool {
    mentions_culture(&definition.searchable_text())
}

/// Underscores count as word breaks so `griot_tradition` matches.
pub(crate) fn mentions_culture(text: &str) -> bool {
    CULTURAL_PATTERN.is_match(&text.to_lowercase().replace('_', " "))
}

/// Tradition accuracy and sensitivity. `cultural_depth_score` is left at
/// zero for the caller to fill from the domain analysis.
pub fn cultural_analysis(response: &str, definition: &TestDefinition) -> CulturalAnalysis {
    let has_traditions = !definition.cultural_context.traditions.is_empty();
    if !has_traditions && !has_cultural_content(definition) && !mentions_culture(response) {
        return CulturalAnalysis::default();
    }
    let lower = response.to_lowercase();

    let tradition_accuracy_score = if has_traditions {
        let accurate = count_present(&lower, TRADITION_REGISTER) as f64;
        let penalties = count_present(&lower, DISMISSIVE_TERMS) as f64;
        ((accurate - penalties) / 10.0).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let sensitivity = count_present(&lower, SENSITIVITY_INDICATORS) as f64;

    CulturalAnalysis {
        cultural_depth_score: 0.0,
        tradition_accuracy_score,
        cross_cultural_sensitivity: (sensitivity / 3.0).min(1.0),
    }
}
