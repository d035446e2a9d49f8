//! Word and sentence segmentation shared by every analyzer.
//!
//! The regex segmenter is always available. Richer tokenizers plug in
//! through the [`Segmenter`] trait; any implementation must be
//! deterministic and order-preserving for the same input.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use crate::error::AnalysisError;

static WORD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[a-zA-Z]+\b").expect("word pattern is valid"));

static SENTENCE_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+").expect("sentence pattern is valid"));

/// Sentences at or below this many characters are dropped as fragments.
pub const MIN_SENTENCE_CHARS: usize = 10;

static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
        "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers",
        "herself", "it", "its", "itself", "they", "them", "their", "theirs", "themselves",
        "what", "which", "who", "whom", "this", "that", "these", "those", "am", "is", "are",
        "was", "were", "be", "been", "being", "have", "has", "had", "having", "do", "does",
        "did", "doing", "a", "an", "the", "and", "but", "if", "or", "because", "as", "until",
        "while", "of", "at", "by", "for", "with", "through", "during", "before", "after",
        "above", "below", "up", "down", "in", "out", "on", "off", "over", "under", "again",
        "further", "then", "once", "to", "from", "into", "about", "against", "between", "here",
        "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
        "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so",
        "than", "too", "very", "can", "will", "just", "should", "now",
    ]
    .into_iter()
    .collect()
});

/// Splits text into words and sentences.
pub trait Segmenter: Send + Sync {
    /// Lowercase alphabetic tokens longer than one character, in order.
    fn words(&self, text: &str) -> Vec<String>;

    /// Trimmed sentences longer than [`MIN_SENTENCE_CHARS`], in order.
    fn sentences(&self, text: &str) -> Vec<String>;
}

/// Regex-only segmenter: `\b[a-zA-Z]+\b` words, `[.!?]+` sentence breaks.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexSegmenter;

impl Segmenter for RegexSegmenter {
    fn words(&self, text: &str) -> Vec<String> {
        tokenize(text)
    }

    fn sentences(&self, text: &str) -> Vec<String> {
        split_sentences(text)
    }
}

/// Tokenize into lowercase alphabetic words of length > 1.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    WORD_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|w| w.len() > 1)
        .map(str::to_string)
        .collect()
}

/// Split on runs of `.`, `!` and `?`, keeping trimmed pieces longer than
/// ten characters.
pub fn split_sentences(text: &str) -> Vec<String> {
    SENTENCE_BREAK
        .split(text)
        .map(str::trim)
        .filter(|s| s.chars().count() > MIN_SENTENCE_CHARS)
        .map(str::to_string)
        .collect()
}

/// Whitespace-delimited word count.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word)
}

/// Tokens longer than three characters that are not stop words.
pub fn content_words(text: &str) -> Vec<String> {
    tokenize(text)
        .into_iter()
        .filter(|w| w.len() > 3 && !is_stop_word(w))
        .collect()
}

/// Jaccard overlap of two word sets; 0.0 when either is empty.
pub fn jaccard<S: AsRef<str>>(a: &[S], b: &[S]) -> f64 {
    let left: HashSet<&str> = a.iter().map(AsRef::as_ref).collect();
    let right: HashSet<&str> = b.iter().map(AsRef::as_ref).collect();
    if left.is_empty() || right.is_empty() {
        return 0.0;
    }
    let intersection = left.intersection(&right).count();
    let union = left.union(&right).count();
    intersection as f64 / union as f64
}

/// Compile a case-insensitive pattern table. Invalid patterns are logged
/// and skipped so a bad table entry never disables the whole table.
pub fn compile_patterns(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .filter_map(|pattern| {
            match Regex::new(&format!("(?i){pattern}")).map_err(|err| AnalysisError::InvalidPattern {
                pattern: (*pattern).to_string(),
                reason: err.to_string(),
            }) {
                Ok(regex) => Some(regex),
                Err(err) => {
                    crate::obs::emit_analysis_degraded("compile_patterns", &err);
                    None
                }
            }
        })
        .collect()
}

/// Count how many of `terms` occur as substrings of `haystack`.
pub fn count_present(haystack: &str, terms: &[&str]) -> usize {
    terms.iter().filter(|t| haystack.contains(*t)).count()
}
