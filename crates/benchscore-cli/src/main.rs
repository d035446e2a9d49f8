//! benchscore - completion benchmark scoring CLI
//!
//! ## Commands
//!
//! - `evaluate`: Score one response against a test definition
//! - `coherence`: Run the semantic coherence analysis on a text
//! - `extract`: Show domain metadata extracted from a test definition
//! - `batch`: Score a JSONL file of records concurrently

use anyhow::{Context, Result};
use benchscore_core::telemetry;
use benchscore_core::{
    DomainMetadataExtractor, EnhancedUniversalEvaluator, ScoringConfig, SemanticCoherenceAnalyzer,
    TestDefinition,
};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, info_span, warn, Instrument};

#[derive(Parser)]
#[command(name = "benchscore")]
#[command(author = "Stevedores Org")]
#[command(version = benchscore_core::VERSION)]
#[command(about = "Heuristic scoring for language-model benchmark completions", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    /// Scoring configuration file (TOML)
    #[arg(long, global = true, env = "BENCHSCORE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score one response against a test definition
    Evaluate {
        /// Test definition (JSON)
        #[arg(short, long)]
        definition: PathBuf,

        /// File holding the response text
        #[arg(short, long, conflicts_with = "text")]
        response: Option<PathBuf>,

        /// Response text given inline
        #[arg(short, long)]
        text: Option<String>,
    },

    /// Run the comprehensive coherence analysis
    Coherence {
        /// File holding the text to analyse
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Text given inline
        #[arg(short, long)]
        text: Option<String>,

        /// Prompt the text answers
        #[arg(short, long)]
        prompt: Option<String>,
    },

    /// Extract domain metadata from a test definition
    Extract {
        /// Test definition (JSON)
        #[arg(short, long)]
        definition: PathBuf,

        /// Content to scan alongside the metadata
        #[arg(short, long, default_value = "")]
        content: String,
    },

    /// Score every record of a JSONL file
    Batch {
        /// One `{"test_definition": {...}, "response_text": "..."}` per line
        #[arg(short, long)]
        input: PathBuf,

        /// Maximum evaluations in flight
        #[arg(short, long, default_value_t = 4)]
        concurrency: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = telemetry::default_level(cli.verbose);
    telemetry::init_tracing(cli.json, level);

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Evaluate {
            definition,
            response,
            text,
        } => cmd_evaluate(&config, &definition, response.as_deref(), text.as_deref()),
        Commands::Coherence { file, text, prompt } => {
            cmd_coherence(&config, file.as_deref(), text.as_deref(), prompt.as_deref())
        }
        Commands::Extract {
            definition,
            content,
        } => cmd_extract(&definition, &content),
        Commands::Batch { input, concurrency } => cmd_batch(config, &input, concurrency).await,
    }
}

fn load_config(path: Option<&Path>) -> Result<ScoringConfig> {
    match path {
        Some(path) => ScoringConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None => Ok(ScoringConfig::default()),
    }
}

fn load_definition(path: &Path) -> Result<TestDefinition> {
    TestDefinition::load(path)
        .with_context(|| format!("Failed to load test definition: {}", path.display()))
}

/// Text from a file or inline argument; exactly one must be given.
fn read_text(file: Option<&Path>, inline: Option<&str>, what: &str) -> Result<String> {
    match (file, inline) {
        (Some(path), _) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {what}: {}", path.display())),
        (None, Some(text)) => Ok(text.to_string()),
        (None, None) => anyhow::bail!("Provide the {what} as a file or inline text"),
    }
}

fn cmd_evaluate(
    config: &ScoringConfig,
    definition: &Path,
    response: Option<&Path>,
    text: Option<&str>,
) -> Result<()> {
    let definition = load_definition(definition)?;
    let response_text = read_text(response, text, "response")?;

    let evaluator = EnhancedUniversalEvaluator::from_config(config.clone());
    let result = evaluator
        .evaluate_response_enhanced(&response_text, &definition, None, None, false)
        .with_context(|| format!("Evaluation failed for {}", definition.test_id()))?;

    println!("{}", serde_json::to_string_pretty(&result.to_json()?)?);
    Ok(())
}

fn cmd_coherence(
    config: &ScoringConfig,
    file: Option<&Path>,
    text: Option<&str>,
    prompt: Option<&str>,
) -> Result<()> {
    let text = read_text(file, text, "text")?;
    let analyzer = SemanticCoherenceAnalyzer::new().with_settings(config.coherence.clone());
    let report = analyzer.comprehensive_coherence_analysis(&text, prompt);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn cmd_extract(definition: &Path, content: &str) -> Result<()> {
    let definition = load_definition(definition)?;
    let extractor = DomainMetadataExtractor::new();
    let extraction = extractor.extract_metadata(&definition.extraction_metadata(), content);
    let issues = extractor.validate_extraction(&extraction);
    let output = json!({
        "extraction": extraction,
        "validation_issues": issues,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// Batch
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct BatchRecord {
    test_definition: TestDefinition,
    response_text: String,
}

#[derive(Debug, Serialize)]
struct BatchSummary {
    run_id: String,
    records: usize,
    evaluated: usize,
    failed: usize,
    mean_score: f64,
}

fn parse_batch(source: &str) -> Result<Vec<BatchRecord>> {
    source
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str(line).with_context(|| format!("Invalid record on line {}", idx + 1))
        })
        .collect()
}

/// Evaluate every record; output order follows input order.
async fn run_batch(
    evaluator: Arc<EnhancedUniversalEvaluator>,
    records: Vec<BatchRecord>,
    concurrency: usize,
) -> Vec<std::result::Result<Value, String>> {
    let sem = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut join_set = JoinSet::new();
    let total = records.len();

    for (idx, record) in records.into_iter().enumerate() {
        let evaluator = Arc::clone(&evaluator);
        let sem = Arc::clone(&sem);
        join_set.spawn(async move {
            let _permit = sem.acquire_owned().await.ok();
            let test_id = record.test_definition.test_id().to_string();
            let outcome = tokio::task::spawn_blocking(move || {
                evaluator
                    .evaluate_response_enhanced(
                        &record.response_text,
                        &record.test_definition,
                        None,
                        None,
                        false,
                    )
                    .and_then(|result| result.to_json())
            })
            .await;
            let outcome = match outcome {
                Ok(Ok(value)) => Ok(value),
                Ok(Err(e)) => Err(format!("{test_id}: {e}")),
                Err(e) => Err(format!("{test_id}: evaluation task join error: {e}")),
            };
            (idx, outcome)
        });
    }

    let mut ordered: Vec<Option<std::result::Result<Value, String>>> = vec![None; total];
    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok((idx, outcome)) => ordered[idx] = Some(outcome),
            Err(e) => warn!(error = %e, "batch task join error"),
        }
    }
    ordered
        .into_iter()
        .map(|slot| slot.unwrap_or_else(|| Err("evaluation did not complete".to_string())))
        .collect()
}

fn summarize(run_id: &str, outcomes: &[std::result::Result<Value, String>]) -> BatchSummary {
    let scores: Vec<f64> = outcomes
        .iter()
        .filter_map(|o| o.as_ref().ok())
        .filter_map(|v| v["metrics"]["overall_score"].as_f64())
        .collect();
    let mean_score = if scores.is_empty() {
        0.0
    } else {
        scores.iter().sum::<f64>() / scores.len() as f64
    };
    BatchSummary {
        run_id: run_id.to_string(),
        records: outcomes.len(),
        evaluated: scores.len(),
        failed: outcomes.iter().filter(|o| o.is_err()).count(),
        mean_score,
    }
}

async fn cmd_batch(config: ScoringConfig, input: &Path, concurrency: usize) -> Result<()> {
    let source = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read batch input: {}", input.display()))?;
    let records = parse_batch(&source)?;

    let run_id = uuid::Uuid::new_v4().to_string();
    let span = info_span!("benchscore.batch", run_id = %run_id, records = records.len());
    let evaluator = Arc::new(EnhancedUniversalEvaluator::from_config(config));

    let outcomes = run_batch(evaluator, records, concurrency)
        .instrument(span.clone())
        .await;

    for outcome in &outcomes {
        match outcome {
            Ok(value) => println!("{}", serde_json::to_string(value)?),
            Err(e) => {
                span.in_scope(|| warn!(error = %e, "record failed"));
                println!("{}", json!({ "error": e }));
            }
        }
    }

    let summary = summarize(&run_id, &outcomes);
    span.in_scope(|| {
        info!(
            evaluated = summary.evaluated,
            failed = summary.failed,
            mean_score = summary.mean_score,
            "batch complete"
        )
    });
    benchscore_core::metrics::METRICS.flush();
    println!("{}", serde_json::to_string(&summary)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::io::Write;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_batch_skips_blank_lines() {
        let source = "{\"test_definition\": {\"id\": \"a\"}, \"response_text\": \"x\"}\n\n\
                      {\"test_definition\": {}, \"response_text\": \"y\"}\n";
        let records = parse_batch(source).expect("parse");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].test_definition.test_id(), "a");
        assert_eq!(records[1].response_text, "y");
    }

    #[test]
    fn test_parse_batch_reports_line() {
        let err = parse_batch("{\"test_definition\": {}}\n").unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_read_text_requires_input() {
        assert!(read_text(None, None, "response").is_err());
        assert_eq!(read_text(None, Some("inline"), "response").unwrap(), "inline");
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[blend]\nbase_weight = 0.5").unwrap();
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.blend.base_weight, 0.5);
        assert_eq!(load_config(None).unwrap(), ScoringConfig::default());
    }

    #[tokio::test]
    async fn test_run_batch_preserves_order() {
        let records = vec![
            BatchRecord {
                test_definition: TestDefinition::from_json_str(r#"{"id": "first"}"#).unwrap(),
                response_text: "A short answer.".to_string(),
            },
            BatchRecord {
                test_definition: TestDefinition::from_json_str(r#"{"id": "second"}"#).unwrap(),
                response_text: "Another short answer.".to_string(),
            },
        ];
        let outcomes = run_batch(Arc::new(EnhancedUniversalEvaluator::new()), records, 2).await;
        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].as_ref().unwrap()["test_id"], "first");
        assert_eq!(outcomes[1].as_ref().unwrap()["test_id"], "second");

        let summary = summarize("run", &outcomes);
        assert_eq!(summary.evaluated, 2);
        assert_eq!(summary.failed, 0);
    }
}
