//! Typed test definitions and execution results.
//!
//! Every field is optional with a documented default so that sparse JSON
//! definitions deserialize without error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

use crate::domain::CulturalContext;
use crate::error::{EvalError, Result};

/// Metadata block of a test definition.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TestMetadata {
    /// Concept tags the response should cover (`snake_case` words).
    pub concepts_tested: Vec<String>,
    /// Knowledge domains the response must integrate.
    pub domains_integrated: Vec<String>,
    /// Evaluation domains the test requires.
    pub domains_required: Vec<String>,
    pub integration_focus: Option<String>,
    /// Explicit evaluation domain.
    pub domain: Option<String>,
    /// Explicit evaluation type.
    pub evaluation_type: Option<String>,
    /// Path of the file the test was loaded from.
    pub file_path: Option<String>,
    pub category: Option<String>,
    pub test_id: Option<String>,
    /// Any other keys, kept for cultural-context detection.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TestMetadata {
    /// Every string-valued field, in a stable order.
    pub fn string_values(&self) -> Vec<&str> {
        let mut values: Vec<&str> = [
            &self.integration_focus,
            &self.domain,
            &self.evaluation_type,
            &self.file_path,
            &self.category,
            &self.test_id,
        ]
        .into_iter()
        .filter_map(|v| v.as_deref())
        .collect();
        values.extend(self.extra.values().filter_map(Value::as_str));
        values
    }
}

/// One benchmark test case.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TestDefinition {
    #[serde(alias = "test_id")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub test_category: Option<String>,
    pub prompt: Option<String>,
    pub description: Option<String>,
    /// Substrings the response is expected to contain.
    pub expected_patterns: Vec<String>,
    /// Named weights for reporting; not read by the scoring formulas.
    pub scoring: Map<String, Value>,
    pub metadata: TestMetadata,
    pub cultural_context: CulturalContext,
}

impl TestDefinition {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let definition: Self = serde_json::from_str(json)?;
        Ok(definition)
    }

    /// Load a definition from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let mut definition = Self::from_json_str(&raw).map_err(|err| match err {
            EvalError::Serialization(inner) => {
                EvalError::InvalidDefinition(format!("{}: {inner}", path.display()))
            }
            other => other,
        })?;
        if definition.metadata.file_path.is_none() {
            definition.metadata.file_path = Some(path.display().to_string());
        }
        Ok(definition)
    }

    /// Identifier used in logs and results: id, then name, then `unknown`.
    pub fn test_id(&self) -> &str {
        self.id
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("unknown")
    }

    /// Name used for reasoning-type detection: name, then id, then `unknown`.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.id.as_deref())
            .unwrap_or("unknown")
    }

    pub fn category_or_general(&self) -> &str {
        self.category.as_deref().unwrap_or("general")
    }

    pub fn prompt_text(&self) -> &str {
        self.prompt.as_deref().unwrap_or("")
    }

    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// Prompt, or the description when no prompt is given.
    pub fn prompt_or_description(&self) -> &str {
        self.prompt
            .as_deref()
            .filter(|p| !p.is_empty())
            .or(self.description.as_deref())
            .unwrap_or("")
    }

    /// Metadata for domain extraction, with category and test id filled in
    /// from the definition when the metadata block omits them.
    pub fn extraction_metadata(&self) -> TestMetadata {
        let mut metadata = self.metadata.clone();
        if metadata.category.is_none() {
            metadata.category = self.category.clone();
        }
        if metadata.test_id.is_none() {
            metadata.test_id = self.id.clone();
        }
        metadata
    }

    /// Every string value in the definition (keys excluded), lowercased and
    /// space-joined, for indicator scans over the whole definition.
    pub fn searchable_text(&self) -> String {
        let Ok(value) = serde_json::to_value(self) else {
            return String::new();
        };
        let mut parts = Vec::new();
        collect_strings(&value, &mut parts);
        parts.join(" ").to_lowercase()
    }
}

fn collect_strings<'a>(value: &'a Value, into: &mut Vec<&'a str>) {
    match value {
        Value::String(s) => into.push(s),
        Value::Array(items) => items.iter().for_each(|v| collect_strings(v, into)),
        Value::Object(map) => map.values().for_each(|v| collect_strings(v, into)),
        _ => {}
    }
}

/// Result of executing one test against the model server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TestResult {
    pub test_id: String,
    pub success: bool,
    pub response_text: String,
    /// Wall-clock seconds.
    pub execution_time: f64,
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub error_message: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub api_response: Value,
}

impl TestResult {
    pub fn total_tokens(&self) -> u64 {
        self.prompt_tokens + self.completion_tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_sparse_definition_parses() {
        let def = TestDefinition::from_json_str("{}").expect("parse");
        assert_eq!(def.test_id(), "unknown");
        assert_eq!(def.category_or_general(), "general");
        assert!(def.expected_patterns.is_empty());
        assert!(def.cultural_context.is_empty());
    }

    #[test]
    fn test_full_definition_parses() {
        let json = r#"{
            "id": "haiku_01",
            "name": "Cherry blossom haiku",
            "category": "creative_completion",
            "prompt": "Complete the haiku",
            "expected_patterns": ["petals", "spring"],
            "scoring": {"syllables": 0.5},
            "metadata": {
                "concepts_tested": ["seasonal_imagery"],
                "domains_integrated": ["poetry", "linguistics"],
                "scenario": "japanese garden"
            },
            "cultural_context": {"traditions": ["haiku"]}
        }"#;
        let def = TestDefinition::from_json_str(json).expect("parse");
        assert_eq!(def.test_id(), "haiku_01");
        assert_eq!(def.metadata.concepts_tested, vec!["seasonal_imagery".to_string()]);
        assert_eq!(def.metadata.extra["scenario"], "japanese garden");
        assert_eq!(def.cultural_context.traditions, vec!["haiku".to_string()]);
        assert!(def.metadata.string_values().contains(&"japanese garden"));
    }

    #[test]
    fn test_searchable_text_skips_keys() {
        let def = TestDefinition::from_json_str(
            r#"{"prompt": "Add Numbers", "metadata": {"concepts_tested": ["sums"]}}"#,
        )
        .expect("parse");
        let text = def.searchable_text();
        assert!(text.contains("add numbers"));
        assert!(text.contains("sums"));
        assert!(!text.contains("cultural"));
        assert!(!text.contains("prompt"));
    }

    #[test]
    fn test_searchable_text_reaches_nested_strings() {
        let def = TestDefinition::from_json_str(
            r#"{
                "expected_patterns": ["Falling Petals"],
                "metadata": {"category": "Griot Tradition", "domains_integrated": ["social", "Language"]},
                "cultural_context": {"traditions": ["Oral Epic"]}
            }"#,
        )
        .expect("parse");
        let text = def.searchable_text();
        assert!(text.contains("falling petals"));
        assert!(text.contains("griot tradition"));
        assert!(text.contains("language"));
        assert!(text.contains("oral epic"));
    }

    #[test]
    fn test_test_id_alias() {
        let def = TestDefinition::from_json_str(r#"{"test_id": "t1"}"#).expect("parse");
        assert_eq!(def.id.as_deref(), Some("t1"));
    }

    #[test]
    fn test_prompt_or_description() {
        let def = TestDefinition {
            description: Some("describe".into()),
            prompt: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(def.prompt_or_description(), "describe");
    }

    #[test]
    fn test_extraction_metadata_fills_gaps() {
        let def = TestDefinition {
            id: Some("social_01".into()),
            category: Some("social_dynamics".into()),
            ..Default::default()
        };
        let metadata = def.extraction_metadata();
        assert_eq!(metadata.category.as_deref(), Some("social_dynamics"));
        assert_eq!(metadata.test_id.as_deref(), Some("social_01"));
    }

    #[test]
    fn test_load_records_file_path() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(file, r#"{{"id": "from_file"}}"#).expect("write");
        let def = TestDefinition::load(file.path()).expect("load");
        assert_eq!(def.test_id(), "from_file");
        assert!(def.metadata.file_path.is_some());
    }

    #[test]
    fn test_load_invalid_json_is_invalid_definition() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(file, "not json").expect("write");
        let err = TestDefinition::load(file.path()).expect_err("should fail");
        assert!(matches!(err, EvalError::InvalidDefinition(_)));
    }

    #[test]
    fn test_result_total_tokens() {
        let result = TestResult {
            test_id: "t".into(),
            success: true,
            response_text: "ok".into(),
            execution_time: 1.5,
            prompt_tokens: 10,
            completion_tokens: 5,
            error_message: None,
            timestamp: Utc::now(),
            api_response: Value::Null,
        };
        assert_eq!(result.total_tokens(), 15);
    }
}
