//! Task-type detection from prompt, description and category keywords.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::definition::TestDefinition;

/// Which final-score formula applies to a test.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    HaikuCompletion,
    CreativeCompletion,
    CulturalReasoning,
    LogicalReasoning,
    #[default]
    General,
}

impl TaskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::HaikuCompletion => "haiku_completion",
            TaskType::CreativeCompletion => "creative_completion",
            TaskType::CulturalReasoning => "cultural_reasoning",
            TaskType::LogicalReasoning => "logical_reasoning",
            TaskType::General => "general",
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static COMPLETION: Lazy<Regex> = Lazy::new(|| word_pattern(r"complet(e|es|ing|ion)"));
static HAIKU_MARKERS: Lazy<Regex> = Lazy::new(|| word_pattern(r"haikus?|5-7-5|syllables?"));
static CREATIVE_CATEGORIES: Lazy<Regex> =
    Lazy::new(|| word_pattern(r"creative|poetry|narratives?|story|stories"));
static CULTURAL_KEYWORDS: Lazy<Regex> = Lazy::new(|| {
    word_pattern(
        r"(multi|inter|cross-)?cultur(e|es|al|ally)|traditions?|traditional|haikus?|poetry|poems?|heritage|indigenous",
    )
});
static LOGICAL_CATEGORY: Lazy<Regex> = Lazy::new(|| word_pattern(r"logical"));
static LOGICAL_PROMPT_MARKERS: Lazy<Regex> = Lazy::new(|| word_pattern(r"multi-step|logical analysis"));

fn word_pattern(alternatives: &str) -> Regex {
    Regex::new(&format!(r"\b({alternatives})\b")).expect("task keyword pattern is valid")
}

/// Lowercase with underscores read as word breaks, so `logical_reasoning`
/// matches `logical`.
fn normalize(text: &str) -> String {
    text.to_lowercase().replace('_', " ")
}

/// Resolve the task type. Checked in order: haiku completion, creative
/// completion, cultural reasoning, logical reasoning, general.
///
/// Keywords match whole words: `incomplete` is not a completion request and
/// `agriculture` is not cultural.
pub fn detect_task_type(definition: &TestDefinition) -> TaskType {
    let prompt = normalize(definition.prompt_text());
    let description = normalize(definition.description_text());
    let category = normalize(
        &[
            definition.category.as_deref(),
            definition.test_category.as_deref(),
            definition.metadata.category.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" "),
    );
    let text = format!("{prompt} {description} {category}");

    let asks_completion = COMPLETION.is_match(&text);

    if asks_completion && HAIKU_MARKERS.is_match(&text) {
        TaskType::HaikuCompletion
    } else if asks_completion && CREATIVE_CATEGORIES.is_match(&category) {
        TaskType::CreativeCompletion
    } else if CULTURAL_KEYWORDS.is_match(&text) {
        TaskType::CulturalReasoning
    } else if LOGICAL_CATEGORY.is_match(&category)
        || LOGICAL_PROMPT_MARKERS.is_match(&prompt)
        || LOGICAL_PROMPT_MARKERS.is_match(&description)
    {
        TaskType::LogicalReasoning
    } else {
        TaskType::General
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(json: &str) -> TaskType {
        detect_task_type(&TestDefinition::from_json_str(json).expect("definition"))
    }

    #[test]
    fn test_haiku_completion() {
        assert_eq!(
            detect(r#"{"prompt": "Complete this haiku about spring", "category": "creative"}"#),
            TaskType::HaikuCompletion
        );
        assert_eq!(
            detect(r#"{"prompt": "Complete the final line following the 5-7-5 pattern"}"#),
            TaskType::HaikuCompletion
        );
    }

    #[test]
    fn test_haiku_without_completion_is_cultural() {
        assert_eq!(
            detect(r#"{"prompt": "Explain what makes a haiku moving"}"#),
            TaskType::CulturalReasoning
        );
    }

    #[test]
    fn test_creative_completion() {
        assert_eq!(
            detect(r#"{"prompt": "Complete this creative narrative", "category": "creative_writing"}"#),
            TaskType::CreativeCompletion
        );
    }

    #[test]
    fn test_cultural_reasoning() {
        assert_eq!(
            detect(
                r#"{"prompt": "Interpret this Arabic verse", "description": "Tests understanding of Islamic cultural concepts"}"#
            ),
            TaskType::CulturalReasoning
        );
        assert_eq!(detect(r#"{"category": "cultural"}"#), TaskType::CulturalReasoning);
    }

    #[test]
    fn test_logical_reasoning() {
        assert_eq!(
            detect(r#"{"prompt": "Provide a multi-step logical analysis", "category": "reasoning"}"#),
            TaskType::LogicalReasoning
        );
        assert_eq!(
            detect(r#"{"test_category": "logical_reasoning", "prompt": "Solve it"}"#),
            TaskType::LogicalReasoning
        );
    }

    #[test]
    fn test_words_containing_keywords_do_not_match() {
        assert_eq!(
            detect(r#"{"prompt": "Explain how agriculture shaped early cities"}"#),
            TaskType::General
        );
        assert_eq!(
            detect(
                r#"{"prompt": "Judge the completeness of this story's plot", "category": "creative_writing"}"#
            ),
            TaskType::General
        );
        assert_eq!(
            detect(r#"{"prompt": "Explain why this haiku feels incomplete"}"#),
            TaskType::CulturalReasoning
        );
        assert_eq!(
            detect(r#"{"prompt": "Point out the illogical analysis steps", "category": "general"}"#),
            TaskType::General
        );
    }

    #[test]
    fn test_underscored_categories_match_words() {
        assert_eq!(
            detect(r#"{"prompt": "Finish the poem", "category": "haiku_completion"}"#),
            TaskType::HaikuCompletion
        );
        assert_eq!(
            detect(r#"{"prompt": "Discuss norms", "category": "intercultural_ethics"}"#),
            TaskType::CulturalReasoning
        );
    }

    #[test]
    fn test_general_default() {
        assert_eq!(
            detect(r#"{"prompt": "Summarize the report", "category": "general"}"#),
            TaskType::General
        );
        assert_eq!(detect("{}"), TaskType::General);
    }

    #[test]
    fn test_serializes_snake_case() {
        let json = serde_json::to_string(&TaskType::HaikuCompletion).expect("serialize");
        assert_eq!(json, "\"haiku_completion\"");
        assert_eq!(TaskType::CreativeCompletion.to_string(), "creative_completion");
    }
}
