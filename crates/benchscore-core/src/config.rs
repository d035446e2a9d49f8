//! Scoring configuration loaded from TOML.
//!
//! Every section defaults independently, so a file only needs the keys it
//! overrides:
//!
//! ```toml
//! [blend]
//! base_weight = 0.7
//! enhanced_weight = 0.3
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::aggregator::AggregatorConfig;
use crate::coherence::CoherenceSettings;
use crate::error::{EvalError, Result};

/// Top-level configuration for the scoring pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScoringConfig {
    pub coherence: CoherenceSettings,
    pub aggregation: AggregatorConfig,
    pub blend: BlendWeights,
    pub rubric: RubricWeights,
}

impl ScoringConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: ScoringConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loading scoring config");
        Self::from_toml_str(&source)
    }

    /// Reject settings the scorers cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.coherence.drift_window_size == 0 || self.coherence.drift_step_size == 0 {
            return Err(EvalError::Config(
                "drift window and step sizes must be positive".to_string(),
            ));
        }
        if self.coherence.num_topics == 0 {
            return Err(EvalError::Config("num_topics must be positive".to_string()));
        }
        if !(0.0..=1.0).contains(&self.aggregation.consensus_threshold) {
            return Err(EvalError::Config(format!(
                "consensus_threshold must be within [0, 1], got {}",
                self.aggregation.consensus_threshold
            )));
        }
        if self.aggregation.outlier_threshold <= 0.0 {
            return Err(EvalError::Config("outlier_threshold must be positive".to_string()));
        }
        self.blend.validate()?;
        self.rubric.validate()
    }
}

/// Base/enhanced blend used by the general task formula.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BlendWeights {
    pub base_weight: f64,
    pub enhanced_weight: f64,
    /// Base scores below this shift weight toward enhanced signals.
    pub low_base_threshold: f64,
    pub low_base_weight: f64,
    pub low_base_enhanced_weight: f64,
    /// Semantic similarity at or above this is treated as a backend artifact.
    pub semantic_saturation_high: f64,
    /// Semantic similarity at or below this is treated as an absent backend.
    pub semantic_saturation_low: f64,
}

impl Default for BlendWeights {
    fn default() -> Self {
        Self {
            base_weight: 0.65,
            enhanced_weight: 0.35,
            low_base_threshold: 20.0,
            low_base_weight: 0.40,
            low_base_enhanced_weight: 0.60,
            semantic_saturation_high: 0.95,
            semantic_saturation_low: 0.05,
        }
    }
}

impl BlendWeights {
    /// (base, enhanced) weights for a given base score.
    pub fn for_base_score(&self, base_score: f64) -> (f64, f64) {
        if base_score < self.low_base_threshold {
            (self.low_base_weight, self.low_base_enhanced_weight)
        } else {
            (self.base_weight, self.enhanced_weight)
        }
    }

    pub fn is_semantic_saturated(&self, semantic_similarity: f64) -> bool {
        semantic_similarity >= self.semantic_saturation_high
            || semantic_similarity <= self.semantic_saturation_low
    }

    fn validate(&self) -> Result<()> {
        let weights = [
            self.base_weight,
            self.enhanced_weight,
            self.low_base_weight,
            self.low_base_enhanced_weight,
        ];
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(EvalError::Config("blend weights must be non-negative".to_string()));
        }
        if self.semantic_saturation_low >= self.semantic_saturation_high {
            return Err(EvalError::Config(
                "semantic_saturation_low must be below semantic_saturation_high".to_string(),
            ));
        }
        Ok(())
    }
}

/// Weights of the rubric metrics in the base overall score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RubricWeights {
    pub organization_quality: f64,
    pub technical_accuracy: f64,
    pub completeness: f64,
    pub thoroughness: f64,
    pub reliability: f64,
    pub scope_coverage: f64,
    pub domain_appropriateness: f64,
    /// Scales the formatting bonus added on top of the weighted metrics.
    pub formatting: f64,
}

impl Default for RubricWeights {
    fn default() -> Self {
        Self {
            organization_quality: 0.14,
            technical_accuracy: 0.19,
            completeness: 0.14,
            thoroughness: 0.14,
            reliability: 0.10,
            scope_coverage: 0.09,
            domain_appropriateness: 0.15,
            formatting: 0.05,
        }
    }
}

impl RubricWeights {
    /// Sum of the seven metric weights (formatting excluded).
    pub fn metric_total(&self) -> f64 {
        self.organization_quality
            + self.technical_accuracy
            + self.completeness
            + self.thoroughness
            + self.reliability
            + self.scope_coverage
            + self.domain_appropriateness
    }

    fn validate(&self) -> Result<()> {
        let all = [
            self.organization_quality,
            self.technical_accuracy,
            self.completeness,
            self.thoroughness,
            self.reliability,
            self.scope_coverage,
            self.domain_appropriateness,
            self.formatting,
        ];
        if all.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(EvalError::Config("rubric weights must be non-negative".to_string()));
        }
        if self.metric_total() <= 0.0 {
            return Err(EvalError::Config("rubric weights must not all be zero".to_string()));
        }
        Ok(())
    }
}
