//! Haiku completion scoring: line extraction, syllables, theme,
//! authenticity and technique.

use serde::{Deserialize, Serialize};

use crate::stats::clamp;
use crate::text::is_stop_word;

/// Syllables expected in the closing line.
pub const TARGET_SYLLABLES: usize = 5;

const BASELINE: f64 = 25.0;
const FLOOR: f64 = 15.0;
const CEILING: f64 = 95.0;

const SEASONS: &[&[&str]] = &[
    &["spring", "cherry", "blossom", "petal", "bloom", "sakura", "breeze", "blossoms"],
    &["summer", "cicada", "firefly", "heat", "thunder", "sunlight"],
    &["autumn", "maple", "harvest", "leaves", "crimson", "geese"],
    &["winter", "snow", "frost", "ice", "cold", "bare"],
];

const NATURE: &[&str] = &[
    "wind", "tree", "river", "stone", "mountain", "sky", "rain", "cloud", "bird", "leaf", "leaves",
    "flower", "water", "moon", "sun", "ground", "earth", "snow", "sea", "wave", "pond", "frog",
    "grass", "field", "forest", "dew", "mist", "petal", "blossom", "branch", "breeze",
];

const IMAGERY: &[&str] = &[
    "light", "shadow", "color", "pink", "white", "gold", "silver", "red", "green", "blue", "dew",
    "drop", "shade", "glow", "shimmer", "petal", "blossom", "stone", "branch",
];

const EMOTION: &[&str] = &[
    "quiet", "soft", "gentle", "lonely", "still", "silent", "whisper", "fading", "longing",
    "tender", "calm", "peace",
];

const EVOCATIVE: &[&str] = &[
    "whisper", "dance", "silent", "soft", "gentle", "drift", "glow", "shimmer", "fall", "fade",
    "linger", "sigh", "still", "quiet",
];

const HUMAN_VERBS: &[&str] = &[
    "whisper", "dance", "sing", "weep", "sleep", "sigh", "smile", "embrace", "breathe", "dream",
    "laugh", "cry", "wander",
];

const TENSE_MARKERS: &[&str] = &["will", "was", "were", "had", "tomorrow", "yesterday", "shall"];

const META_PREFIXES: &[&str] = &[
    "here", "this haiku", "the completed", "completed", "completion", "i ", "my ", "note", "answer",
];

/// Sub-scores of a haiku completion, each out of 25.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HaikuScores {
    pub completion_line: String,
    pub syllable_count: usize,
    pub syllable_score: f64,
    pub thematic_coherence: f64,
    pub cultural_authenticity: f64,
    pub poetic_technique: f64,
    pub final_score: f64,
}

fn words(line: &str) -> Vec<String> {
    line.split_whitespace()
        .map(|w| {
            w.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|w| !w.is_empty())
        .collect()
}

/// Exact or simple-plural match against a term list.
fn matches(words: &[String], terms: &[&str]) -> usize {
    terms
        .iter()
        .filter(|&&term| {
            words.iter().any(|w| {
                w == term
                    || w.strip_suffix('s') == Some(term)
                    || w.strip_suffix("es") == Some(term)
            })
        })
        .count()
}

fn marker_count(words: &[String]) -> usize {
    matches(words, NATURE) + matches(words, IMAGERY) + matches(words, EVOCATIVE) + matches(words, EMOTION)
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

fn is_candidate(line: &str, prompt_lower: &str) -> bool {
    let lower = line.to_lowercase();
    if line.ends_with(':') || line.split_whitespace().count() > 10 {
        return false;
    }
    if META_PREFIXES.iter().any(|p| lower.starts_with(p)) {
        return false;
    }
    prompt_lower.is_empty() || !prompt_lower.contains(&lower)
}

/// Pull the completion line out of a possibly chatty response.
///
/// With three or more poem-like lines the last one is the completion;
/// otherwise the line with the most poetic markers wins, shorter lines
/// breaking ties. Falls back to the whole response.
pub fn extract_completion_line(response: &str, prompt: &str) -> String {
    let lines: Vec<&str> = response
        .lines()
        .map(|l| l.trim().trim_matches(|c: char| c == '"' || c == '*' || c == '-').trim())
        .filter(|l| !l.is_empty())
        .collect();
    if lines.len() <= 1 {
        return lines.first().copied().unwrap_or(response.trim()).to_string();
    }

    let prompt_lower = prompt.to_lowercase();
    let candidates: Vec<&str> = lines
        .iter()
        .copied()
        .filter(|l| is_candidate(l, &prompt_lower))
        .collect();

    if candidates.len() >= 3 {
        if let Some(last) = candidates.last() {
            return last.to_string();
        }
    }

    candidates
        .iter()
        .max_by_key(|line| {
            let w = words(line);
            (marker_count(&w), std::cmp::Reverse(w.len()))
        })
        .map(|l| l.to_string())
        .unwrap_or_else(|| response.trim().to_string())
}

// ---------------------------------------------------------------------------
// Sub-scores
// ---------------------------------------------------------------------------

/// Vowel-group syllable estimate; a trailing silent `e` is dropped.
pub fn count_syllables(word: &str) -> usize {
    let word: String = word
        .to_lowercase()
        .chars()
        .filter(char::is_ascii_alphabetic)
        .collect();
    if word.is_empty() {
        return 0;
    }
    let mut count = 0;
    let mut previous_vowel = false;
    for c in word.chars() {
        let vowel = "aeiouy".contains(c);
        if vowel && !previous_vowel {
            count += 1;
        }
        previous_vowel = vowel;
    }
    if word.ends_with('e') && !word.ends_with("le") && count > 1 {
        count -= 1;
    }
    count.max(1)
}

pub fn line_syllables(line: &str) -> usize {
    line.split_whitespace().map(count_syllables).sum()
}

/// 25 exact, 20 off by one, 15 off by two, else 5.
pub fn syllable_score(line: &str) -> f64 {
    match line_syllables(line).abs_diff(TARGET_SYLLABLES) {
        0 => 25.0,
        1 => 20.0,
        2 => 15.0,
        _ => 5.0,
    }
}

/// 22 when the line picks up the prompt's seasonal or nature vocabulary,
/// 15 for other nature words, 10 for other poetic imagery, else 5.
pub fn thematic_coherence(line: &str, prompt: &str) -> f64 {
    let prompt_words = words(prompt);
    let line_words = words(line);

    let mut theme: Vec<&str> = SEASONS
        .iter()
        .filter(|season| matches(&prompt_words, season) > 0)
        .flat_map(|season| season.iter().copied())
        .collect();
    theme.extend(NATURE.iter().copied().filter(|n| matches(&prompt_words, &[*n]) > 0));

    if matches(&line_words, &theme) > 0 {
        22.0
    } else if matches(&line_words, NATURE) > 0 {
        15.0
    } else if matches(&line_words, IMAGERY) + matches(&line_words, EVOCATIVE) > 0 {
        10.0
    } else {
        5.0
    }
}

/// Nature focus, subtle emotion, present moment and concrete imagery.
pub fn cultural_authenticity(line: &str) -> f64 {
    let w = words(line);
    if w.is_empty() {
        return 0.0;
    }
    let mut score = 0.0;
    if matches(&w, NATURE) > 0 {
        score += 6.0;
    }
    if matches(&w, EMOTION) > 0 {
        score += 5.0;
    }
    if matches(&w, TENSE_MARKERS) == 0 {
        score += 4.0;
    }
    if matches(&w, IMAGERY) > 0 {
        score += 5.0;
    }
    clamp(score, 0.0, 25.0)
}

fn has_alliteration(words: &[String]) -> bool {
    let initials: Vec<char> = words
        .iter()
        .filter(|w| w.len() > 2 && !is_stop_word(w))
        .filter_map(|w| w.chars().next())
        .collect();
    initials
        .iter()
        .enumerate()
        .any(|(i, c)| initials[i + 1..].contains(c))
}

/// Personification, alliteration, evocative words and brevity.
pub fn poetic_technique(line: &str) -> f64 {
    let w = words(line);
    if w.is_empty() {
        return 0.0;
    }
    let mut score = 0.0;
    if matches(&w, NATURE) > 0 && matches(&w, HUMAN_VERBS) > 0 {
        score += 8.0;
    }
    if has_alliteration(&w) {
        score += 5.0;
    }
    score += (matches(&w, EVOCATIVE) as f64 * 3.0).min(9.0);
    if w.len() <= 7 {
        score += 3.0;
    }
    clamp(score, 0.0, 25.0)
}

fn has_poetic_signal(line: &str) -> bool {
    let w = words(line);
    marker_count(&w) > 0
}

/// Score a haiku completion:
/// `25 + 0.8 × syllables + 0.85 × theme + 0.65 × authenticity + 0.55 × technique`,
/// clamped to [15, 95].
pub fn score_haiku(response: &str, prompt: &str) -> HaikuScores {
    let line = extract_completion_line(response, prompt);
    let syllable_count = line_syllables(&line);
    let syllables = syllable_score(&line);
    let theme = thematic_coherence(&line, prompt);
    let authenticity = cultural_authenticity(&line);
    let technique = poetic_technique(&line);

    let final_score = if has_poetic_signal(&line) {
        clamp(
            BASELINE + 0.8 * syllables + 0.85 * theme + 0.65 * authenticity + 0.55 * technique,
            FLOOR,
            CEILING,
        )
    } else {
        FLOOR
    };

    HaikuScores {
        completion_line: line,
        syllable_count,
        syllable_score: syllables,
        thematic_coherence: theme,
        cultural_authenticity: authenticity,
        poetic_technique: technique,
        final_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROMPT: &str = "Complete this haiku:\nCherry blossoms fall\nGentle spring breeze whispers soft\n___";

    #[test]
    fn test_extracts_last_poem_line() {
        let response = "Here's the completed haiku:\nCherry blossoms fall\nGentle spring breeze whispers soft\nPetals to the ground";
        let line = extract_completion_line(response, "");
        assert_eq!(line, "Petals to the ground");
    }

    #[test]
    fn test_extraction_skips_prompt_lines() {
        let response = "Here is my answer:\nGentle spring breeze whispers soft\nPetals drift to earth";
        assert_eq!(extract_completion_line(response, PROMPT), "Petals drift to earth");
    }

    #[test]
    fn test_single_line_returned_as_is() {
        assert_eq!(extract_completion_line("  Petals drift down  ", ""), "Petals drift down");
    }

    #[test]
    fn test_syllable_counting() {
        assert_eq!(count_syllables("petals"), 2);
        assert_eq!(count_syllables("dance"), 1);
        assert_eq!(count_syllables("here"), 1);
        assert_eq!(count_syllables("the"), 1);
        assert_eq!(count_syllables("gentle"), 2);
        assert_eq!(line_syllables("Petals dance and fall"), 5);
    }

    #[test]
    fn test_syllable_score_tiers() {
        assert_eq!(syllable_score("Petals dance and fall"), 25.0);
        assert_eq!(syllable_score("Petals dance and fall down"), 20.0);
        assert_eq!(syllable_score("Petals fall"), 15.0);
        assert_eq!(syllable_score("Very long line with many syllables here"), 5.0);
    }

    #[test]
    fn test_thematic_coherence() {
        assert_eq!(thematic_coherence("Cherry petals fall", PROMPT), 22.0);
        assert_eq!(thematic_coherence("Wind through quiet trees", PROMPT), 15.0);
        assert_eq!(thematic_coherence("Shimmer of a dream", PROMPT), 10.0);
        assert_eq!(thematic_coherence("The meeting starts soon", PROMPT), 5.0);
    }

    #[test]
    fn test_cultural_authenticity() {
        let score = cultural_authenticity("Petals whisper soft");
        assert!((10.0..=20.0).contains(&score));
        assert!(cultural_authenticity("This will happen next") < 10.0);
    }

    #[test]
    fn test_poetic_technique() {
        let score = poetic_technique("Petals whisper soft");
        assert!(score > 10.0 && score <= 25.0);
        assert!(poetic_technique("The end comes today") <= 10.0);
    }

    #[test]
    fn test_full_score_in_band() {
        let scores = score_haiku("Petals whisper down", PROMPT);
        assert_eq!(scores.syllable_count, 5);
        assert!((60.0..=95.0).contains(&scores.final_score));
    }

    #[test]
    fn test_no_signal_hits_floor() {
        assert_eq!(score_haiku("I don't know", PROMPT).final_score, FLOOR);
        assert_eq!(score_haiku("", PROMPT).final_score, FLOOR);
    }
}
