//! Metadata extraction over definitions loaded from disk.

use std::fs;

use benchscore_core::metadata::{EvaluationType, MetadataSource};
use benchscore_core::{Domain, DomainMetadataExtractor, TestDefinition};

fn write_definition(dir: &std::path::Path, relative: &str, json: &str) -> std::path::PathBuf {
    let path = dir.join(relative);
    fs::create_dir_all(path.parent().expect("parent")).expect("create dirs");
    fs::write(&path, json).expect("write definition");
    path
}

#[test]
fn test_loaded_definition_records_file_path_for_extraction() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_definition(
        dir.path(),
        "domains/creativity/narrative_tests.json",
        r#"{"id": "narrative_01", "prompt": "Continue the story of the river spirit."}"#,
    );

    let definition = TestDefinition::load(&path).expect("load");
    let metadata = definition.extraction_metadata();
    assert_eq!(metadata.test_id.as_deref(), Some("narrative_01"));

    let extractor = DomainMetadataExtractor::new();
    let extraction = extractor.extract_metadata(&metadata, definition.prompt_or_description());
    assert_eq!(extraction.domain, Some(Domain::Creativity));
    assert_eq!(extraction.evaluation_type, Some(EvaluationType::CreativeExpression));
    assert!(extraction.extraction_sources.contains_key(&MetadataSource::FilePath));
    assert!((0.0..=1.0).contains(&extraction.confidence));
}

#[test]
fn test_cultural_definition_extracts_and_enhances_context() {
    let definition = TestDefinition::from_json_str(
        r#"{
            "id": "griot_01",
            "category": "griot tradition storytelling",
            "prompt": "Retell a West African praise song in the griot style.",
            "metadata": {"domain": "creativity"}
        }"#,
    )
    .expect("definition");

    let extractor = DomainMetadataExtractor::new();
    let extraction =
        extractor.extract_metadata(&definition.extraction_metadata(), definition.prompt_text());
    assert_eq!(extraction.domain, Some(Domain::Creativity));
    assert!(extraction.cultural_context.traditions.contains(&"griot".to_string()));

    let enhanced =
        extractor.enhance_cultural_context(&extraction.cultural_context, extraction.domain);
    assert!(enhanced.traditions.contains(&"griot".to_string()));
    assert!(!enhanced.performance_aspects.is_empty());
}

#[test]
fn test_sparse_definition_reports_validation_issues() {
    let definition = TestDefinition::from_json_str(r#"{"prompt": "Hello there."}"#).expect("definition");
    let extractor = DomainMetadataExtractor::new();
    let extraction =
        extractor.extract_metadata(&definition.extraction_metadata(), definition.prompt_text());

    let issues = extractor.validate_extraction(&extraction);
    assert!(issues.contains(&"Could not determine domain".to_string()));
    assert!(issues.contains(&"Low overall extraction confidence".to_string()));
}

#[test]
fn test_malformed_definition_names_the_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_definition(dir.path(), "broken.json", "{ not json");
    let err = TestDefinition::load(&path).unwrap_err();
    assert!(err.to_string().contains("broken.json"));
}
