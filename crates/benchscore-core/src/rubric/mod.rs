//! Base rubric evaluation.
//!
//! The enhanced evaluator builds on a [`BaseEvaluator`]. [`RubricEvaluator`]
//! is the default: seven 0-100 metrics from weighted phrase tables chosen by
//! the test category, a formatting bonus and a weighted overall score.

mod tables;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::config::RubricWeights;
use crate::error::Result;
use crate::stats::round_to;
use crate::text::{compile_patterns, word_count};

use tables::Table;

/// Responses shorter than this many characters are not analysed.
pub const MIN_RESPONSE_CHARS: usize = 50;

/// Metrics below this produce a recommendation.
const RECOMMENDATION_THRESHOLD: f64 = 60.0;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Style of reasoning a test expects.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReasoningType {
    ChainOfThought,
    MultiStep,
    Verification,
    Mathematical,
    MultiHop,
    Scaffolded,
    Backward,
    #[default]
    General,
}

impl ReasoningType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasoningType::ChainOfThought => "chain_of_thought",
            ReasoningType::MultiStep => "multi_step",
            ReasoningType::Verification => "verification",
            ReasoningType::Mathematical => "mathematical",
            ReasoningType::MultiHop => "multi_hop",
            ReasoningType::Scaffolded => "scaffolded",
            ReasoningType::Backward => "backward",
            ReasoningType::General => "general",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        [
            ReasoningType::ChainOfThought,
            ReasoningType::MultiStep,
            ReasoningType::Verification,
            ReasoningType::Mathematical,
            ReasoningType::MultiHop,
            ReasoningType::Scaffolded,
            ReasoningType::Backward,
            ReasoningType::General,
        ]
        .into_iter()
        .find(|t| t.as_str() == name)
    }

    /// Infer from keywords in the test name, falling back to `General`.
    pub fn detect(test_name: &str) -> Self {
        let name = test_name.to_lowercase();
        let has = |needles: &[&str]| needles.iter().any(|n| name.contains(n));
        if has(&["chain-of-thought", "chain"]) {
            ReasoningType::ChainOfThought
        } else if has(&["multi-hop", "multi-source"]) {
            ReasoningType::MultiHop
        } else if has(&["verification", "self-check"]) {
            ReasoningType::Verification
        } else if has(&["mathematical", "probability"]) {
            ReasoningType::Mathematical
        } else if has(&["backward", "reverse"]) {
            ReasoningType::Backward
        } else if has(&["scaffolded", "structured"]) {
            ReasoningType::Scaffolded
        } else if has(&["multi-step", "decomposition"]) {
            ReasoningType::MultiStep
        } else {
            ReasoningType::General
        }
    }
}

impl std::fmt::Display for ReasoningType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Phrase-table family selected from the test category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TestType {
    Reasoning,
    Creative,
    Linux,
}

impl TestType {
    pub fn detect(category: Option<&str>) -> Self {
        let Some(category) = category else {
            return TestType::Reasoning;
        };
        let category = category.to_lowercase();
        const LINUX: &[&str] = &[
            "linux",
            "log_analysis",
            "containerization",
            "security",
            "monitoring",
            "backup",
            "service_management",
            "networking",
            "process_management",
            "system_management",
            "troubleshooting",
            "database",
            "deployment",
        ];
        const CREATIVE: &[&str] = &["creative", "strategic", "ambiguity", "metacognitive", "constraint"];
        if LINUX.iter().any(|k| category.contains(k)) {
            TestType::Linux
        } else if CREATIVE.iter().any(|k| category.contains(k)) {
            TestType::Creative
        } else {
            TestType::Reasoning
        }
    }
}

/// Input to a base evaluator.
#[derive(Debug, Clone, Copy)]
pub struct EvaluationRequest<'a> {
    pub response_text: &'a str,
    pub test_name: &'a str,
    /// Detected from `test_name` when absent.
    pub reasoning_type: Option<ReasoningType>,
    pub test_category: Option<&'a str>,
}

impl<'a> EvaluationRequest<'a> {
    pub fn new(response_text: &'a str, test_name: &'a str) -> Self {
        Self {
            response_text,
            test_name,
            reasoning_type: None,
            test_category: None,
        }
    }

    pub fn with_reasoning_type(mut self, reasoning_type: Option<ReasoningType>) -> Self {
        self.reasoning_type = reasoning_type;
        self
    }

    pub fn with_category(mut self, category: Option<&'a str>) -> Self {
        self.test_category = category;
        self
    }
}

/// Rubric metrics, each on a 0-100 scale.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EvaluationMetrics {
    pub organization_quality: f64,
    pub technical_accuracy: f64,
    pub completeness: f64,
    pub thoroughness: f64,
    pub reliability: f64,
    pub scope_coverage: f64,
    pub domain_appropriateness: f64,
    pub overall_score: f64,
    pub word_count: usize,
    pub confidence_score: f64,
}

/// Whitespace-level statistics of a response.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TextStatistics {
    pub word_count: usize,
    pub sentence_count: usize,
    pub avg_sentence_length: f64,
    pub unique_words: usize,
    pub vocabulary_diversity: f64,
}

impl TextStatistics {
    pub fn of(text: &str) -> Self {
        let words: Vec<&str> = text.split_whitespace().collect();
        let pieces = text.split('.').count();
        let sentence_count = text.split('.').filter(|s| !s.trim().is_empty()).count();
        let unique: std::collections::HashSet<String> = words
            .iter()
            .map(|w| w.to_lowercase().trim_matches(|c| ".,!?;:".contains(c)).to_string())
            .collect();
        Self {
            word_count: words.len(),
            sentence_count,
            avg_sentence_length: words.len() as f64 / pieces.max(1) as f64,
            unique_words: unique.len(),
            vocabulary_diversity: unique.len() as f64 / words.len().max(1) as f64,
        }
    }
}

/// Reasoning phrases found in a response.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReasoningIndicators {
    pub step_indicators_found: Vec<String>,
    pub logic_connectors_found: Vec<String>,
    pub evidence_indicators_found: Vec<String>,
    pub verification_indicators_found: Vec<String>,
}

impl ReasoningIndicators {
    pub fn of(text: &str) -> Self {
        let lower = text.to_lowercase();
        let found = |list: &[&str]| -> Vec<String> {
            list.iter()
                .filter(|p| lower.contains(*p))
                .map(|p| p.to_string())
                .collect()
        };
        Self {
            step_indicators_found: found(tables::STEP_INDICATORS),
            logic_connectors_found: found(tables::LOGIC_CONNECTORS),
            evidence_indicators_found: found(tables::EVIDENCE_INDICATORS),
            verification_indicators_found: found(tables::VERIFICATION_INDICATORS),
        }
    }
}

/// Output of a base evaluator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BaseEvaluation {
    pub metrics: EvaluationMetrics,
    pub reasoning_type: ReasoningType,
    pub detailed_analysis: Map<String, Value>,
    pub recommendations: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

/// Produces the base evaluation the enhanced evaluator builds on.
pub trait BaseEvaluator: Send + Sync {
    fn evaluate(&self, request: &EvaluationRequest<'_>) -> Result<BaseEvaluation>;
}

// ---------------------------------------------------------------------------
// RubricEvaluator
// ---------------------------------------------------------------------------

struct ReasoningPatterns {
    reasoning_type: ReasoningType,
    keywords: &'static [&'static str],
    patterns: Vec<Regex>,
}

static REASONING_PATTERNS: Lazy<Vec<ReasoningPatterns>> = Lazy::new(|| {
    vec![
        ReasoningPatterns {
            reasoning_type: ReasoningType::ChainOfThought,
            keywords: &["step", "first", "second", "then", "next", "finally", "therefore"],
            patterns: compile_patterns(&[r"step \d+", r"first.+second.+third", r"then.+therefore"]),
        },
        ReasoningPatterns {
            reasoning_type: ReasoningType::MultiHop,
            keywords: &["document", "source", "according to", "based on", "evidence from"],
            patterns: compile_patterns(&[
                r"document [a-z]\b",
                r"according to.+from.+",
                r"evidence.+suggests.+because",
            ]),
        },
        ReasoningPatterns {
            reasoning_type: ReasoningType::Verification,
            keywords: &["verify", "check", "confirm", "validate", "review", "double-check"],
            patterns: compile_patterns(&[r"let me.+check", r"verify.+assumption", r"review.+conclusion"]),
        },
        ReasoningPatterns {
            reasoning_type: ReasoningType::Mathematical,
            keywords: &["calculate", "equation", "formula", "probability", "statistics"],
            patterns: compile_patterns(&[r"\d+%", r"probability.+\d", r"equation.+equals"]),
        },
    ]
});

static QUANTITATIVE: Lazy<Vec<(Regex, f64)>> = Lazy::new(|| {
    tables::QUANTITATIVE_PATTERNS
        .iter()
        .filter_map(|(pattern, points)| {
            compile_patterns(&[*pattern]).into_iter().next().map(|re| (re, *points))
        })
        .collect()
});

/// Phrase-table rubric scorer.
#[derive(Debug, Clone, Default)]
pub struct RubricEvaluator {
    weights: RubricWeights,
}

impl RubricEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weights(mut self, weights: RubricWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn weights(&self) -> &RubricWeights {
        &self.weights
    }

    fn minimal_result(&self, response_text: &str, message: &str) -> BaseEvaluation {
        let mut detailed_analysis = Map::new();
        detailed_analysis.insert("error".into(), json!(message));
        BaseEvaluation {
            metrics: EvaluationMetrics {
                word_count: word_count(response_text),
                ..Default::default()
            },
            reasoning_type: ReasoningType::General,
            detailed_analysis,
            recommendations: vec![message.to_string()],
            timestamp: Utc::now(),
        }
    }

    /// Compute the seven metrics plus overall and confidence scores.
    pub fn score_metrics(
        &self,
        response_text: &str,
        reasoning_type: ReasoningType,
        test_type: TestType,
    ) -> EvaluationMetrics {
        let text = response_text.to_lowercase();
        let words = word_count(response_text) as f64;
        let w = &self.weights;

        let organization_quality = organization_quality(&text, words, test_type);
        let technical_accuracy = technical_accuracy(&text, words, test_type);
        let completeness = completeness(&text, words, test_type);
        let thoroughness = thoroughness(&text, words, test_type);
        let reliability = reliability(&text, words, test_type);
        let scope_coverage = scope_coverage(&text, words, test_type);
        let domain_appropriateness = domain_appropriateness(&text, words, reasoning_type, test_type);
        let formatting = formatting_bonus(response_text);

        let overall_score = organization_quality * w.organization_quality
            + technical_accuracy * w.technical_accuracy
            + completeness * w.completeness
            + thoroughness * w.thoroughness
            + reliability * w.reliability
            + scope_coverage * w.scope_coverage
            + domain_appropriateness * w.domain_appropriateness
            + formatting * w.formatting;

        EvaluationMetrics {
            organization_quality: round_to(organization_quality, 1),
            technical_accuracy: round_to(technical_accuracy, 1),
            completeness: round_to(completeness, 1),
            thoroughness: round_to(thoroughness, 1),
            reliability: round_to(reliability, 1),
            scope_coverage: round_to(scope_coverage, 1),
            domain_appropriateness: round_to(domain_appropriateness, 1),
            overall_score: round_to(overall_score, 1),
            word_count: words as usize,
            confidence_score: round_to(confidence_score(words, overall_score), 1),
        }
    }
}

impl BaseEvaluator for RubricEvaluator {
    fn evaluate(&self, request: &EvaluationRequest<'_>) -> Result<BaseEvaluation> {
        let response_text = request.response_text;
        if response_text.trim().chars().count() < MIN_RESPONSE_CHARS {
            return Ok(self.minimal_result(response_text, "Response too short for analysis"));
        }

        let reasoning_type = request
            .reasoning_type
            .unwrap_or_else(|| ReasoningType::detect(request.test_name));
        let test_type = TestType::detect(request.test_category);
        let metrics = self.score_metrics(response_text, reasoning_type, test_type);

        let mut detailed_analysis = Map::new();
        detailed_analysis.insert("core_metrics".into(), serde_json::to_value(&metrics)?);
        detailed_analysis.insert("test_type".into(), serde_json::to_value(test_type)?);
        detailed_analysis.insert(
            "text_statistics".into(),
            serde_json::to_value(TextStatistics::of(response_text))?,
        );
        detailed_analysis.insert(
            "reasoning_indicators".into(),
            serde_json::to_value(ReasoningIndicators::of(response_text))?,
        );

        Ok(BaseEvaluation {
            recommendations: recommendations(&metrics),
            metrics,
            reasoning_type,
            detailed_analysis,
            timestamp: Utc::now(),
        })
    }
}

// ---------------------------------------------------------------------------
// Metric helpers
// ---------------------------------------------------------------------------

fn table_points(text: &str, table: Table) -> f64 {
    table
        .iter()
        .filter(|(phrase, _)| text.contains(phrase))
        .map(|(_, points)| points)
        .sum()
}

fn tables_points(text: &str, tables: &[Table]) -> f64 {
    tables.iter().map(|t| table_points(text, t)).sum()
}

fn length_base(words: f64, divisor: f64, cap: f64) -> f64 {
    (words / divisor).min(cap)
}

fn organization_quality(text: &str, words: f64, test_type: TestType) -> f64 {
    let base = length_base(words, 20.0, 40.0);
    let points = match test_type {
        TestType::Linux => table_points(text, tables::ORGANIZATION_LINUX),
        TestType::Creative => table_points(text, tables::ORGANIZATION_CREATIVE),
        TestType::Reasoning => tables_points(text, tables::ORGANIZATION_REASONING),
    };
    (base + points).min(100.0)
}

fn technical_accuracy(text: &str, words: f64, test_type: TestType) -> f64 {
    let base = length_base(words, 30.0, 35.0);
    match test_type {
        TestType::Linux => {
            let earned = table_points(text, tables::TECHNICAL_LINUX);
            let penalty = table_points(text, tables::DANGEROUS_LINUX);
            (base + earned - penalty).clamp(0.0, 100.0)
        }
        TestType::Creative => (base + table_points(text, tables::TECHNICAL_CREATIVE)).min(100.0),
        TestType::Reasoning => {
            let quantitative: f64 = QUANTITATIVE
                .iter()
                .filter(|(re, _)| re.is_match(text))
                .map(|(_, points)| points)
                .sum();
            (base + tables_points(text, tables::TECHNICAL_REASONING) + quantitative).min(100.0)
        }
    }
}

fn completeness(text: &str, words: f64, test_type: TestType) -> f64 {
    let base = length_base(words, 50.0, 45.0);
    let points = match test_type {
        TestType::Linux => table_points(text, tables::COMPLETENESS_LINUX),
        TestType::Creative => table_points(text, tables::COMPLETENESS_CREATIVE),
        TestType::Reasoning => tables_points(text, tables::COMPLETENESS_REASONING),
    };
    (base + points).min(100.0)
}

fn thoroughness(text: &str, words: f64, test_type: TestType) -> f64 {
    let base = length_base(words, 40.0, 40.0);
    let points = match test_type {
        TestType::Linux => table_points(text, tables::THOROUGHNESS_LINUX),
        TestType::Creative => table_points(text, tables::THOROUGHNESS_CREATIVE),
        TestType::Reasoning => tables_points(text, tables::THOROUGHNESS_REASONING),
    };
    (base + points).min(100.0)
}

fn reliability(text: &str, words: f64, test_type: TestType) -> f64 {
    let base = length_base(words, 60.0, 30.0);
    let points = match test_type {
        TestType::Linux => table_points(text, tables::RELIABILITY_LINUX),
        TestType::Creative => table_points(text, tables::RELIABILITY_CREATIVE),
        TestType::Reasoning => tables_points(text, tables::RELIABILITY_REASONING),
    };
    (base + points).min(100.0)
}

fn scope_coverage(text: &str, words: f64, test_type: TestType) -> f64 {
    let (base, points) = match test_type {
        TestType::Linux => (length_base(words, 25.0, 60.0), table_points(text, tables::SCOPE_LINUX)),
        TestType::Creative => (
            length_base(words, 35.0, 70.0),
            table_points(text, tables::SCOPE_CREATIVE),
        ),
        TestType::Reasoning => (
            length_base(words, 40.0, 60.0),
            tables_points(text, tables::SCOPE_REASONING),
        ),
    };
    (base + points).min(100.0)
}

fn domain_appropriateness(
    text: &str,
    words: f64,
    reasoning_type: ReasoningType,
    test_type: TestType,
) -> f64 {
    let base = length_base(words, 80.0, 25.0);
    let points = match test_type {
        TestType::Linux => table_points(text, tables::DOMAIN_LINUX),
        TestType::Creative => table_points(text, tables::DOMAIN_CREATIVE),
        TestType::Reasoning => {
            tables_points(text, tables::DOMAIN_REASONING) + reasoning_type_bonus(text, reasoning_type)
        }
    };
    (base + points).min(100.0)
}

/// 15 points per reasoning-type keyword, 25 per structural pattern.
fn reasoning_type_bonus(text: &str, reasoning_type: ReasoningType) -> f64 {
    REASONING_PATTERNS
        .iter()
        .find(|p| p.reasoning_type == reasoning_type)
        .map(|p| {
            let keywords = p.keywords.iter().filter(|k| text.contains(*k)).count() as f64;
            let patterns = p.patterns.iter().filter(|re| re.is_match(text)).count() as f64;
            keywords * 15.0 + patterns * 25.0
        })
        .unwrap_or(0.0)
}

/// Bonus (0-100) for markdown structure, lists, tables and code blocks.
pub fn formatting_bonus(text: &str) -> f64 {
    let mut score: f64 = 0.0;
    if text.contains("###") || text.contains("##") || text.contains("**") {
        score += 15.0;
    }
    if text.contains("# ") {
        score += 10.0;
    }
    if text.contains("| ") && text.matches('|').count() >= 6 {
        score += 20.0;
    }
    if text.contains("---") || text.contains("===") {
        score += 10.0;
    }
    if text.contains("1.") && text.contains("2.") && text.contains("3.") {
        score += 15.0;
    }
    if text.matches("- ").count() >= 3 || text.matches("• ").count() >= 3 {
        score += 10.0;
    }
    if text.contains("Part I") || text.contains("Section") || text.contains("Chapter") {
        score += 15.0;
    }
    if text.contains("Introduction") && text.contains("Conclusion") {
        score += 15.0;
    }
    if text.contains("```") {
        score += 10.0;
    }
    if text.matches('`').count() >= 4 {
        score += 5.0;
    }
    if text.contains("**Example:**") || text.contains("**Note:**") {
        score += 10.0;
    }
    if text.matches("\n\n").count() >= 5 {
        score += 10.0;
    }
    score.min(100.0)
}

/// `(min(words / 500, 1) × 0.6 + overall / 100 × 0.4) × 100`.
fn confidence_score(words: f64, overall_score: f64) -> f64 {
    ((words / 500.0).min(1.0) * 0.6 + overall_score / 100.0 * 0.4) * 100.0
}

fn recommendations(metrics: &EvaluationMetrics) -> Vec<String> {
    let checks = [
        (
            metrics.organization_quality,
            "Improve step-by-step clarity by using explicit step indicators (first, second, then, etc.)",
        ),
        (
            metrics.technical_accuracy,
            "Strengthen logical flow with more connecting words (therefore, because, consequently)",
        ),
        (
            metrics.completeness,
            "Better integrate evidence with phrases like 'based on', 'according to', 'data shows'",
        ),
        (
            metrics.reliability,
            "Add verification steps with self-checking language (verify, confirm, review)",
        ),
    ];
    let mut out: Vec<String> = checks
        .iter()
        .filter(|(value, _)| *value < RECOMMENDATION_THRESHOLD)
        .map(|(_, message)| message.to_string())
        .collect();
    if out.is_empty() {
        out.push("Strong reasoning demonstrated across all metrics".to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANALYTICAL: &str = "First, we examine the evidence. Based on the data, the analysis \
        reveals a clear pattern. Therefore, the conclusion follows from the premise. \
        We verify the assumption and review the conclusion to confirm it is consistent.";

    #[test]
    fn test_short_response_minimal() {
        let result = RubricEvaluator::new()
            .evaluate(&EvaluationRequest::new("Too short.", "any"))
            .expect("evaluate");
        assert_eq!(result.metrics.overall_score, 0.0);
        assert_eq!(result.metrics.word_count, 2);
        assert_eq!(result.recommendations, vec!["Response too short for analysis"]);
        assert_eq!(result.reasoning_type, ReasoningType::General);
    }

    #[test]
    fn test_reasoning_type_detection() {
        assert_eq!(ReasoningType::detect("basic_chain_of_thought"), ReasoningType::ChainOfThought);
        assert_eq!(ReasoningType::detect("multi-hop-docs"), ReasoningType::MultiHop);
        assert_eq!(ReasoningType::detect("probability_puzzle"), ReasoningType::Mathematical);
        assert_eq!(ReasoningType::detect("haiku"), ReasoningType::General);
        assert_eq!(ReasoningType::parse("MULTI_STEP"), Some(ReasoningType::MultiStep));
    }

    #[test]
    fn test_test_type_detection() {
        assert_eq!(TestType::detect(None), TestType::Reasoning);
        assert_eq!(TestType::detect(Some("linux_log_analysis")), TestType::Linux);
        assert_eq!(TestType::detect(Some("creative_writing")), TestType::Creative);
        assert_eq!(TestType::detect(Some("logic")), TestType::Reasoning);
    }

    #[test]
    fn test_metrics_within_range() {
        let result = RubricEvaluator::new()
            .evaluate(&EvaluationRequest::new(ANALYTICAL, "verification_task"))
            .expect("evaluate");
        let m = &result.metrics;
        for value in [
            m.organization_quality,
            m.technical_accuracy,
            m.completeness,
            m.thoroughness,
            m.reliability,
            m.scope_coverage,
            m.domain_appropriateness,
            m.overall_score,
            m.confidence_score,
        ] {
            assert!((0.0..=100.0).contains(&value), "{value}");
        }
        assert!(m.overall_score > 0.0);
        assert_eq!(result.reasoning_type, ReasoningType::Verification);
        assert!(result.detailed_analysis.contains_key("text_statistics"));
    }

    #[test]
    fn test_dangerous_linux_commands_penalized() {
        let safe = "Use sudo systemctl restart nginx and check the status with systemctl status nginx afterwards.";
        let risky = "Use sudo rm -rf / and chmod 777 everything, then systemctl restart nginx afterwards.";
        let evaluator = RubricEvaluator::new();
        let safe_m = evaluator.score_metrics(safe, ReasoningType::General, TestType::Linux);
        let risky_m = evaluator.score_metrics(risky, ReasoningType::General, TestType::Linux);
        assert!(safe_m.technical_accuracy > risky_m.technical_accuracy);
    }

    #[test]
    fn test_formatting_bonus() {
        assert_eq!(formatting_bonus("plain text"), 0.0);
        let md = "## Overview\n\n- one\n- two\n- three\n\n```bash\nls\n```";
        assert!(formatting_bonus(md) >= 45.0);
    }

    #[test]
    fn test_text_statistics() {
        let stats = TextStatistics::of("One two. Two three.");
        assert_eq!(stats.word_count, 4);
        assert_eq!(stats.sentence_count, 2);
        assert_eq!(stats.unique_words, 3);
    }

    #[test]
    fn test_recommendations_for_weak_metrics() {
        let metrics = EvaluationMetrics::default();
        assert_eq!(recommendations(&metrics).len(), 4);
        let strong = EvaluationMetrics {
            organization_quality: 80.0,
            technical_accuracy: 80.0,
            completeness: 80.0,
            reliability: 80.0,
            ..Default::default()
        };
        assert_eq!(
            recommendations(&strong),
            vec!["Strong reasoning demonstrated across all metrics"]
        );
    }
}
