//! Combines the results of several domain evaluators into one verdict.
//!
//! Domains are weighted by their own cultural competence (floored at
//! [`MIN_DOMAIN_WEIGHT`]); per-dimension agreement between domains is
//! measured as `1 − stdev / mean`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::domain::DomainEvaluationResult;
use crate::metrics::METRICS;
use crate::obs;
use crate::stats::{clamp_unit, mean, sample_std_dev};

/// Floor weight so low-competence domains still count.
pub const MIN_DOMAIN_WEIGHT: f64 = 0.1;

/// Aggregation thresholds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AggregatorConfig {
    /// Dimensions whose consensus falls below this are reported.
    pub consensus_threshold: f64,
    /// z-score above which a domain is an outlier for a dimension.
    pub outlier_threshold: f64,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            consensus_threshold: 0.7,
            outlier_threshold: 2.0,
        }
    }
}

/// Combined view over several [`DomainEvaluationResult`]s.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AggregatedEvaluationResult {
    pub overall_score: f64,
    pub domain_scores: BTreeMap<String, f64>,
    pub dimension_scores: BTreeMap<String, f64>,
    pub cultural_competence: f64,
    /// Ordered by descending frequency across domains.
    pub cultural_markers: Vec<String>,
    pub consensus_level: f64,
    pub evaluation_coverage: f64,
    pub metadata: Map<String, Value>,
    pub processing_notes: Vec<String>,
    pub domain_results: Vec<DomainEvaluationResult>,
}

/// Agreement between domains on one dimension.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DimensionConsensus {
    pub dimension: String,
    pub scores: Vec<f64>,
    pub mean_score: f64,
    pub std_deviation: f64,
    pub consensus_level: f64,
    pub outlier_domains: Vec<String>,
}

/// Detailed consensus breakdown for an aggregated result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConsensusReport {
    pub overall_consensus: f64,
    pub dimension_analysis: BTreeMap<String, DimensionConsensus>,
    /// Domain -> dimensions on which it was an outlier.
    pub outlier_summary: BTreeMap<String, Vec<String>>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct EvaluationAggregator {
    config: AggregatorConfig,
}

impl EvaluationAggregator {
    pub fn new(config: AggregatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    /// Aggregate domain results.
    ///
    /// `expected_domains` drives `evaluation_coverage`; without it coverage
    /// is 1.0 for any non-empty input. Empty input yields a zeroed result.
    pub fn aggregate_results(
        &self,
        domain_results: &[DomainEvaluationResult],
        expected_domains: Option<&[&str]>,
    ) -> AggregatedEvaluationResult {
        METRICS.inc_aggregations();
        if domain_results.is_empty() {
            obs::emit_aggregation_completed(0, 0.0, 0.0);
            return empty_result(expected_domains.unwrap_or_default());
        }

        let domain_scores = domain_results
            .iter()
            .map(|r| (r.domain.clone(), r.overall_score))
            .collect();
        let consensus = self.dimension_consensus(domain_results);

        let result = AggregatedEvaluationResult {
            overall_score: overall_score(domain_results),
            domain_scores,
            dimension_scores: dimension_scores(domain_results),
            cultural_competence: clamp_unit(mean(
                &domain_results
                    .iter()
                    .map(DomainEvaluationResult::cultural_competence)
                    .collect::<Vec<_>>(),
            )),
            cultural_markers: ranked_markers(domain_results),
            consensus_level: overall_consensus(domain_results.len(), &consensus),
            evaluation_coverage: coverage(domain_results, expected_domains),
            metadata: self.metadata(domain_results, &consensus),
            processing_notes: self.notes(domain_results, &consensus),
            domain_results: domain_results.to_vec(),
        };

        obs::emit_aggregation_completed(
            domain_results.len(),
            result.overall_score,
            result.consensus_level,
        );
        result
    }

    /// Per-dimension consensus and outliers for an aggregated result.
    pub fn consensus_report(&self, aggregated: &AggregatedEvaluationResult) -> ConsensusReport {
        let dimension_analysis = self.dimension_consensus(&aggregated.domain_results);

        let mut outlier_summary: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for consensus in dimension_analysis.values() {
            for domain in &consensus.outlier_domains {
                outlier_summary
                    .entry(domain.clone())
                    .or_default()
                    .push(consensus.dimension.clone());
            }
        }

        let mut recommendations = Vec::new();
        if aggregated.consensus_level < self.config.consensus_threshold {
            recommendations
                .push("Consider reviewing evaluation criteria due to low consensus".to_string());
        }
        if !outlier_summary.is_empty() {
            let domains: Vec<&String> = outlier_summary.keys().collect();
            recommendations.push(format!("Review outlier domains: {domains:?}"));
        }

        ConsensusReport {
            overall_consensus: aggregated.consensus_level,
            dimension_analysis,
            outlier_summary,
            recommendations,
        }
    }

    fn dimension_consensus(
        &self,
        domain_results: &[DomainEvaluationResult],
    ) -> BTreeMap<String, DimensionConsensus> {
        let mut grouped: BTreeMap<&str, Vec<(f64, &str)>> = BTreeMap::new();
        for result in domain_results {
            for dim in &result.dimensions {
                grouped
                    .entry(dim.name.as_str())
                    .or_default()
                    .push((dim.score, result.domain.as_str()));
            }
        }

        grouped
            .into_iter()
            .map(|(name, entries)| {
                let scores: Vec<f64> = entries.iter().map(|(s, _)| *s).collect();
                let consensus = if scores.len() < 2 {
                    DimensionConsensus {
                        dimension: name.to_string(),
                        mean_score: scores.first().copied().unwrap_or(0.0),
                        scores,
                        std_deviation: 0.0,
                        consensus_level: 1.0,
                        outlier_domains: Vec::new(),
                    }
                } else {
                    let mean_score = mean(&scores);
                    let std_deviation = sample_std_dev(&scores);
                    let consensus_level = if mean_score > 0.0 {
                        (1.0 - std_deviation / mean_score).max(0.0)
                    } else if std_deviation == 0.0 {
                        1.0
                    } else {
                        0.0
                    };
                    let outlier_domains = if std_deviation > 0.0 {
                        entries
                            .iter()
                            .filter(|(score, _)| {
                                (score - mean_score).abs() / std_deviation
                                    > self.config.outlier_threshold
                            })
                            .map(|(_, domain)| domain.to_string())
                            .collect()
                    } else {
                        Vec::new()
                    };
                    DimensionConsensus {
                        dimension: name.to_string(),
                        scores,
                        mean_score,
                        std_deviation,
                        consensus_level,
                        outlier_domains,
                    }
                };
                (name.to_string(), consensus)
            })
            .collect()
    }

    fn metadata(
        &self,
        domain_results: &[DomainEvaluationResult],
        consensus: &BTreeMap<String, DimensionConsensus>,
    ) -> Map<String, Value> {
        let mut evaluation_types: Vec<&str> = domain_results
            .iter()
            .map(|r| r.evaluation_type.as_str())
            .collect();
        evaluation_types.sort_unstable();
        evaluation_types.dedup();

        let outliers: Map<String, Value> = consensus
            .values()
            .filter(|c| !c.outlier_domains.is_empty())
            .map(|c| (c.dimension.clone(), json!(c.outlier_domains)))
            .collect();

        let mut metadata = Map::new();
        metadata.insert("total_domains_evaluated".into(), json!(domain_results.len()));
        metadata.insert(
            "domains".into(),
            json!(domain_results.iter().map(|r| r.domain.as_str()).collect::<Vec<_>>()),
        );
        metadata.insert("evaluation_types".into(), json!(evaluation_types));
        metadata.insert(
            "total_dimensions".into(),
            json!(domain_results.iter().map(|r| r.dimensions.len()).sum::<usize>()),
        );
        metadata.insert("aggregation_method".into(), json!("weighted_cultural_competence"));
        metadata.insert("consensus_threshold".into(), json!(self.config.consensus_threshold));
        metadata.insert("outlier_threshold".into(), json!(self.config.outlier_threshold));
        metadata.insert("outliers".into(), Value::Object(outliers));
        metadata
    }

    fn notes(
        &self,
        domain_results: &[DomainEvaluationResult],
        consensus: &BTreeMap<String, DimensionConsensus>,
    ) -> Vec<String> {
        let mut notes = vec![format!(
            "Aggregated results from {} domain evaluators",
            domain_results.len()
        )];

        let (successful, failed): (Vec<&DomainEvaluationResult>, Vec<&DomainEvaluationResult>) =
            domain_results.iter().partition(|r| r.overall_score > 0.0);
        if !successful.is_empty() {
            let names: Vec<&str> = successful.iter().map(|r| r.domain.as_str()).collect();
            notes.push(format!("Successful domains: {names:?}"));
        }
        if !failed.is_empty() {
            let names: Vec<&str> = failed.iter().map(|r| r.domain.as_str()).collect();
            notes.push(format!("Failed domains: {names:?}"));
        }

        let low: Vec<&str> = consensus
            .values()
            .filter(|c| c.consensus_level < self.config.consensus_threshold)
            .map(|c| c.dimension.as_str())
            .collect();
        if !low.is_empty() {
            notes.push(format!("Low consensus on dimensions: {low:?}"));
        }

        let markers = ranked_markers(domain_results);
        if !markers.is_empty() {
            notes.push(format!("Detected {} unique cultural markers", markers.len()));
        }
        notes
    }
}

/// Aggregate with the default thresholds.
pub fn aggregate_results(
    domain_results: &[DomainEvaluationResult],
    expected_domains: Option<&[&str]>,
) -> AggregatedEvaluationResult {
    EvaluationAggregator::default().aggregate_results(domain_results, expected_domains)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn empty_result(expected_domains: &[&str]) -> AggregatedEvaluationResult {
    let mut metadata = Map::new();
    metadata.insert("total_domains_evaluated".into(), json!(0));
    metadata.insert("expected_domains".into(), json!(expected_domains));
    AggregatedEvaluationResult {
        overall_score: 0.0,
        domain_scores: BTreeMap::new(),
        dimension_scores: BTreeMap::new(),
        cultural_competence: 0.0,
        cultural_markers: Vec::new(),
        consensus_level: 0.0,
        evaluation_coverage: 0.0,
        metadata,
        processing_notes: vec!["No domain evaluation results to aggregate".to_string()],
        domain_results: Vec::new(),
    }
}

fn dimension_scores(domain_results: &[DomainEvaluationResult]) -> BTreeMap<String, f64> {
    let mut grouped: BTreeMap<&str, Vec<(f64, f64)>> = BTreeMap::new();
    for dim in domain_results.iter().flat_map(|r| r.dimensions.iter()) {
        grouped
            .entry(dim.name.as_str())
            .or_default()
            .push((dim.score, dim.weight()));
    }

    grouped
        .into_iter()
        .map(|(name, entries)| {
            let total_weight: f64 = entries.iter().map(|(_, w)| w).sum();
            let score = if total_weight > 0.0 {
                entries.iter().map(|(s, w)| s * w).sum::<f64>() / total_weight
            } else {
                mean(&entries.iter().map(|(s, _)| *s).collect::<Vec<_>>())
            };
            (name.to_string(), clamp_unit(score))
        })
        .collect()
}

fn overall_score(domain_results: &[DomainEvaluationResult]) -> f64 {
    let (weighted, total) = domain_results.iter().fold((0.0, 0.0), |(sum, total), r| {
        let weight = r.cultural_competence().max(MIN_DOMAIN_WEIGHT);
        (sum + r.overall_score * weight, total + weight)
    });
    if total > 0.0 {
        clamp_unit(weighted / total)
    } else {
        0.0
    }
}

fn overall_consensus(domains: usize, consensus: &BTreeMap<String, DimensionConsensus>) -> f64 {
    if domains < 2 {
        return 1.0;
    }
    if consensus.is_empty() {
        return 0.0;
    }
    let levels: Vec<f64> = consensus.values().map(|c| c.consensus_level).collect();
    clamp_unit(mean(&levels))
}

fn coverage(domain_results: &[DomainEvaluationResult], expected: Option<&[&str]>) -> f64 {
    match expected {
        Some(expected) if !expected.is_empty() => {
            let mut expected: Vec<&str> = expected.to_vec();
            expected.sort_unstable();
            expected.dedup();
            let present = expected
                .iter()
                .filter(|d| domain_results.iter().any(|r| r.domain == **d))
                .count();
            present as f64 / expected.len() as f64
        }
        _ if domain_results.is_empty() => 0.0,
        _ => 1.0,
    }
}

/// Markers by descending frequency; ties keep first-seen order.
fn ranked_markers(domain_results: &[DomainEvaluationResult]) -> Vec<String> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for marker in domain_results.iter().flat_map(|r| r.cultural_markers()) {
        match counts.iter_mut().find(|(m, _)| *m == marker) {
            Some((_, count)) => *count += 1,
            None => counts.push((marker, 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.into_iter().map(|(m, _)| m).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CulturalContext, EvaluationDimension};

    fn dim(name: &str, score: f64, markers: &[&str]) -> EvaluationDimension {
        EvaluationDimension::new(
            name,
            score,
            0.8,
            0.7,
            vec![format!("{name} evidence")],
            markers.iter().map(|m| m.to_string()).collect(),
        )
    }

    fn result(domain: &str, dims: Vec<EvaluationDimension>) -> DomainEvaluationResult {
        let overall = crate::domain::weighted_dimension_score(&dims);
        DomainEvaluationResult {
            domain: domain.to_string(),
            evaluation_type: "general".to_string(),
            overall_score: overall,
            dimensions: dims,
            cultural_context: CulturalContext::default(),
            metadata: Map::new(),
            processing_notes: Vec::new(),
        }
    }

    #[test]
    fn test_empty_input() {
        let agg = aggregate_results(&[], Some(&["creativity"]));
        assert_eq!(agg.overall_score, 0.0);
        assert_eq!(agg.evaluation_coverage, 0.0);
        assert_eq!(agg.consensus_level, 0.0);
        assert!(agg.processing_notes[0].starts_with("No domain evaluation results"));
        assert_eq!(agg.metadata["expected_domains"], json!(["creativity"]));
    }

    #[test]
    fn test_single_domain_full_consensus() {
        let r = result("creativity", vec![dim("a", 0.6, &["x"]), dim("b", 0.2, &[])]);
        let agg = aggregate_results(&[r], None);
        assert_eq!(agg.consensus_level, 1.0);
        assert_eq!(agg.evaluation_coverage, 1.0);
        let report = EvaluationAggregator::default().consensus_report(&agg);
        assert!(report
            .dimension_analysis
            .values()
            .all(|c| c.consensus_level == 1.0));
    }

    #[test]
    fn test_disagreement_lowers_consensus() {
        let a = result("creativity", vec![dim("shared", 0.9, &[])]);
        let b = result("language", vec![dim("shared", 0.1, &[])]);
        let agg = aggregate_results(&[a, b], None);
        assert!(agg.consensus_level < 0.5);
        assert!(agg
            .processing_notes
            .iter()
            .any(|n| n.starts_with("Low consensus on dimensions")));
    }

    #[test]
    fn test_dimension_scores_weighted_mean() {
        let a = result("creativity", vec![dim("shared", 0.8, &[])]);
        let b = result("language", vec![dim("shared", 0.4, &[])]);
        let agg = aggregate_results(&[a, b], None);
        assert!((agg.dimension_scores["shared"] - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_zero_weight_dimensions_use_plain_mean() {
        let zero = |s| EvaluationDimension::new("z", s, 0.0, 0.0, Vec::new(), Vec::new());
        let a = result("creativity", vec![zero(0.2)]);
        let b = result("language", vec![zero(0.6)]);
        let agg = aggregate_results(&[a, b], None);
        assert!((agg.dimension_scores["z"] - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_coverage_against_expected() {
        let a = result("creativity", vec![dim("a", 0.5, &[])]);
        let agg = aggregate_results(&[a], Some(&["creativity", "language"]));
        assert_eq!(agg.evaluation_coverage, 0.5);
    }

    #[test]
    fn test_markers_ranked_by_frequency() {
        let a = result("creativity", vec![dim("a", 0.5, &["rare", "common"])]);
        let b = result("language", vec![dim("a", 0.5, &["common"])]);
        let agg = aggregate_results(&[a, b], None);
        assert_eq!(agg.cultural_markers, vec!["common", "rare"]);
    }

    #[test]
    fn test_outlier_detection() {
        let config = AggregatorConfig {
            outlier_threshold: 1.0,
            ..Default::default()
        };
        let aggregator = EvaluationAggregator::new(config);
        let results: Vec<_> = [("a", 0.5), ("b", 0.5), ("c", 0.5), ("d", 0.5), ("e", 0.05)]
            .iter()
            .map(|(d, s)| result(d, vec![dim("shared", *s, &[])]))
            .collect();
        let agg = aggregator.aggregate_results(&results, None);
        let report = aggregator.consensus_report(&agg);
        assert_eq!(report.dimension_analysis["shared"].outlier_domains, vec!["e"]);
        assert_eq!(report.outlier_summary["e"], vec!["shared"]);
        assert!(report
            .recommendations
            .iter()
            .any(|r| r.starts_with("Review outlier domains")));
    }

    #[test]
    fn test_failed_domains_noted() {
        let ok = result("creativity", vec![dim("a", 0.5, &[])]);
        let failed = result("language", Vec::new());
        let agg = aggregate_results(&[ok, failed], None);
        assert!(agg.processing_notes.iter().any(|n| n.contains("Failed domains")));
    }
}
