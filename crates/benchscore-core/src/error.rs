//! Error taxonomy for the scoring core.
//!
//! Analyzer internals fail with [`AnalysisError`], which never escapes a
//! public analyzer operation. Orchestration failures surface as [`EvalError`].

/// Internal failure inside a heuristic analysis step.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalysisError {
    #[error("empty input: {0}")]
    EmptyInput(String),

    #[error("empty vocabulary after stop-word filtering")]
    EmptyVocabulary,

    #[error("degenerate vector: {0}")]
    DegenerateVector(String),

    #[error("similarity backend {backend} failed: {reason}")]
    Backend { backend: String, reason: String },

    #[error("invalid pattern {pattern}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("unknown dimension: {0}")]
    UnknownDimension(String),

    #[error("topic model failed: {0}")]
    TopicModel(String),
}

/// Result type for analyzer internals.
pub type AnalysisResult<T> = std::result::Result<T, AnalysisError>;

/// Orchestration-level errors surfaced to callers.
#[derive(Debug, thiserror::Error)]
pub enum EvalError {
    #[error("base evaluator failed: {0}")]
    BaseEvaluator(String),

    #[error("invalid test definition: {0}")]
    InvalidDefinition(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for evaluator operations.
pub type Result<T> = std::result::Result<T, EvalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_error_display() {
        let err = AnalysisError::EmptyInput("completion".to_string());
        assert!(err.to_string().contains("empty input"));

        let err = AnalysisError::Backend {
            backend: "tfidf".to_string(),
            reason: "no terms".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("tfidf"));
        assert!(msg.contains("no terms"));
    }

    #[test]
    fn test_eval_error_display() {
        let err = EvalError::BaseEvaluator("rubric unavailable".to_string());
        assert!(err.to_string().contains("base evaluator failed"));
        assert!(err.to_string().contains("rubric unavailable"));
    }

    #[test]
    fn test_serde_error_converts() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{oops");
        let err: EvalError = parse.unwrap_err().into();
        assert!(err.to_string().contains("serialization error"));
    }
}
