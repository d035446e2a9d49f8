use super::{recover, DriftReport, SemanticCoherenceAnalyzer};
use crate::error::AnalysisResult;
use crate::stats::{clamp_unit, finite, mean, std_dev};

impl SemanticCoherenceAnalyzer {
    /// Drift between consecutive `window_size`-token windows advancing by
    /// `step_size` tokens.
    ///
    /// Texts shorter than two windows yield [`DriftReport::neutral`].
    pub fn semantic_drift(&self, text: &str, window_size: usize, step_size: usize) -> DriftReport {
        if text.trim().is_empty() {
            return DriftReport::neutral();
        }
        recover(
            "semantic_drift",
            self.try_drift(text, window_size.max(1), step_size.max(1)),
            DriftReport::neutral,
        )
    }

    fn try_drift(&self, text: &str, window_size: usize, step_size: usize) -> AnalysisResult<DriftReport> {
        let words = self.segmenter.words(text);
        if words.len() < window_size * 2 {
            return Ok(DriftReport::neutral());
        }

        let windows: Vec<String> = (0..=words.len() - window_size)
            .step_by(step_size)
            .map(|start| words[start..start + window_size].join(" "))
            .collect();
        if windows.len() < 2 {
            return Ok(DriftReport::neutral());
        }

        let similarities = self.backend.consecutive_similarities(&windows)?;
        Ok(drift_from_similarities(&similarities))
    }
}

/// Float noise tolerated before a window counts as a drift point.
const DRIFT_EPSILON: f64 = 1e-9;

pub(crate) fn drift_from_similarities(similarities: &[f64]) -> DriftReport {
    if similarities.is_empty() {
        return DriftReport::neutral();
    }
    let drift_curve: Vec<f64> = similarities.iter().map(|s| finite(1.0 - s)).collect();
    let drift_score = mean(&drift_curve);
    let stability = mean(similarities) * (1.0 - std_dev(similarities).min(0.5));

    let threshold = mean(&drift_curve) + std_dev(&drift_curve);
    let drift_points = drift_curve
        .iter()
        .enumerate()
        .filter(|(_, d)| **d > threshold + DRIFT_EPSILON)
        .map(|(i, _)| i)
        .collect();

    DriftReport {
        drift_score: clamp_unit(drift_score),
        drift_points,
        stability_score: clamp_unit(stability),
        drift_curve,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_neutral() {
        let analyzer = SemanticCoherenceAnalyzer::new();
        let report = analyzer.semantic_drift("only a handful of words here", 100, 50);
        assert_eq!(report, DriftReport::neutral());
        assert_eq!(report.drift_score, 0.0);
        assert_eq!(report.stability_score, 1.0);
    }

    #[test]
    fn test_repeated_text_is_stable() {
        let analyzer = SemanticCoherenceAnalyzer::new();
        let text = "river stone water flows gently ".repeat(20);
        let report = analyzer.semantic_drift(&text, 10, 5);
        assert!(!report.drift_curve.is_empty());
        assert!(report.drift_score < 0.05);
        assert!(report.stability_score > 0.9);
        assert!(report.drift_points.is_empty());
    }

    #[test]
    fn test_topic_shift_raises_drift() {
        let analyzer = SemanticCoherenceAnalyzer::new();
        let mut text = "market inflation policy budget trade ".repeat(6);
        text.push_str(&"cherry blossom petals spring breeze ".repeat(6));
        let report = analyzer.semantic_drift(&text, 10, 5);
        assert!(report.drift_score > 0.0);
        assert!(report.drift_curve.iter().all(|d| (0.0..=1.0).contains(d)));
    }

    #[test]
    fn test_drift_points_flag_outliers() {
        let report = drift_from_similarities(&[0.9, 0.9, 0.1, 0.9]);
        assert_eq!(report.drift_points, vec![2]);
        assert!(report.stability_score < 0.9);
    }
}
