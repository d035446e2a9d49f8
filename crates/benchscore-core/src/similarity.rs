//! Pluggable text-similarity backends.
//!
//! Analyzers hold one `Arc<dyn TextSimilarityBackend>` chosen at
//! construction. Three strategies ship with the crate:
//!
//! - [`EmbeddingBackend`]: cosine similarity over vectors from an injected [`Embedder`]
//! - [`TfIdfBackend`]: TF-IDF cosine similarity fitted on the texts being compared
//! - [`JaccardBackend`]: word-set overlap, for when nothing else is wanted

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{AnalysisError, AnalysisResult};
use crate::text::{is_stop_word, jaccard, tokenize};

static TFIDF_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("tfidf token pattern is valid"));

/// Default vocabulary cap for fitted TF-IDF models.
pub const DEFAULT_MAX_FEATURES: usize = 100;

/// Which family of similarity a backend computes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    Embedding,
    TfIdf,
    Lexical,
}

/// Strategy interface for text similarity.
pub trait TextSimilarityBackend: Send + Sync {
    fn name(&self) -> &str;

    fn kind(&self) -> BackendKind;

    /// Vectorise a batch of texts. Vectors are only comparable within one call.
    fn embed(&self, texts: &[String]) -> AnalysisResult<Vec<Vec<f64>>>;

    /// Similarity of two texts in [0, 1].
    fn similarity(&self, a: &str, b: &str) -> AnalysisResult<f64> {
        let vectors = self.embed(&[a.to_string(), b.to_string()])?;
        match vectors.as_slice() {
            [left, right] => Ok(cosine_similarity(left, right).clamp(0.0, 1.0)),
            _ => Err(AnalysisError::DegenerateVector(format!(
                "expected 2 vectors, got {}",
                vectors.len()
            ))),
        }
    }

    /// Similarity of each text to its successor.
    fn consecutive_similarities(&self, texts: &[String]) -> AnalysisResult<Vec<f64>> {
        let vectors = self.embed(texts)?;
        Ok(vectors
            .windows(2)
            .map(|pair| cosine_similarity(&pair[0], &pair[1]).clamp(0.0, 1.0))
            .collect())
    }

    /// Similarity of every unordered pair, upper triangle in row order.
    fn pairwise_similarities(&self, texts: &[String]) -> AnalysisResult<Vec<f64>> {
        let vectors = self.embed(texts)?;
        let mut out = Vec::new();
        for i in 0..vectors.len() {
            for j in (i + 1)..vectors.len() {
                out.push(cosine_similarity(&vectors[i], &vectors[j]).clamp(0.0, 1.0));
            }
        }
        Ok(out)
    }
}

/// Cosine similarity; 0.0 when either vector has zero norm.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    let sim = dot / (norm_a * norm_b);
    if sim.is_finite() {
        sim
    } else {
        0.0
    }
}

// ---------------------------------------------------------------------------
// TF-IDF
// ---------------------------------------------------------------------------

/// TF-IDF vectoriser fitted per call on the supplied texts.
///
/// Terms are `\b\w\w+\b` tokens minus English stop words. The vocabulary
/// keeps the `max_features` most frequent terms (ties broken
/// alphabetically), idf is smoothed as `ln((1+n)/(1+df)) + 1`, and rows are
/// L2-normalised.
#[derive(Debug, Clone)]
pub struct TfIdfBackend {
    max_features: usize,
}

impl Default for TfIdfBackend {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FEATURES)
    }
}

impl TfIdfBackend {
    pub fn new(max_features: usize) -> Self {
        Self {
            max_features: max_features.max(1),
        }
    }

    pub fn max_features(&self) -> usize {
        self.max_features
    }

    fn terms(text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        TFIDF_TOKEN
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .filter(|t| !is_stop_word(t))
            .map(str::to_string)
            .collect()
    }

    fn vocabulary(&self, docs: &[Vec<String>]) -> Vec<String> {
        let mut totals: HashMap<&str, usize> = HashMap::new();
        for doc in docs {
            for term in doc {
                *totals.entry(term.as_str()).or_insert(0) += 1;
            }
        }
        let mut ranked: Vec<(&str, usize)> = totals.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        let mut vocab: Vec<String> = ranked
            .into_iter()
            .take(self.max_features)
            .map(|(t, _)| t.to_string())
            .collect();
        vocab.sort();
        vocab
    }
}

impl TextSimilarityBackend for TfIdfBackend {
    fn name(&self) -> &str {
        "tfidf"
    }

    fn kind(&self) -> BackendKind {
        BackendKind::TfIdf
    }

    fn embed(&self, texts: &[String]) -> AnalysisResult<Vec<Vec<f64>>> {
        let docs: Vec<Vec<String>> = texts.iter().map(|t| Self::terms(t)).collect();
        let vocab = self.vocabulary(&docs);
        if vocab.is_empty() {
            return Err(AnalysisError::EmptyVocabulary);
        }
        let index: HashMap<&str, usize> = vocab
            .iter()
            .enumerate()
            .map(|(i, t)| (t.as_str(), i))
            .collect();

        let n = docs.len() as f64;
        let mut df = vec![0usize; vocab.len()];
        let mut counts: Vec<Vec<f64>> = Vec::with_capacity(docs.len());
        for doc in &docs {
            let mut row = vec![0.0; vocab.len()];
            for term in doc {
                if let Some(&i) = index.get(term.as_str()) {
                    row[i] += 1.0;
                }
            }
            for (i, c) in row.iter().enumerate() {
                if *c > 0.0 {
                    df[i] += 1;
                }
            }
            counts.push(row);
        }

        let idf: Vec<f64> = df
            .iter()
            .map(|&d| ((1.0 + n) / (1.0 + d as f64)).ln() + 1.0)
            .collect();

        Ok(counts
            .into_iter()
            .map(|row| {
                let weighted: Vec<f64> = row.iter().zip(&idf).map(|(tf, w)| tf * w).collect();
                let norm = weighted.iter().map(|x| x * x).sum::<f64>().sqrt();
                if norm > 0.0 {
                    weighted.into_iter().map(|x| x / norm).collect()
                } else {
                    weighted
                }
            })
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Embeddings
// ---------------------------------------------------------------------------

/// Source of dense sentence embeddings.
pub trait Embedder: Send + Sync {
    fn model_name(&self) -> &str;

    fn embed(&self, text: &str) -> AnalysisResult<Vec<f32>>;
}

/// Cosine similarity over vectors produced by an [`Embedder`].
pub struct EmbeddingBackend<E: Embedder> {
    embedder: E,
}

impl<E: Embedder> EmbeddingBackend<E> {
    pub fn new(embedder: E) -> Self {
        Self { embedder }
    }
}

impl<E: Embedder> TextSimilarityBackend for EmbeddingBackend<E> {
    fn name(&self) -> &str {
        self.embedder.model_name()
    }

    fn kind(&self) -> BackendKind {
        BackendKind::Embedding
    }

    fn embed(&self, texts: &[String]) -> AnalysisResult<Vec<Vec<f64>>> {
        texts
            .iter()
            .map(|t| {
                let v = self.embedder.embed(t)?;
                if v.is_empty() {
                    return Err(AnalysisError::DegenerateVector(format!(
                        "{} returned an empty embedding",
                        self.embedder.model_name()
                    )));
                }
                Ok(v.into_iter().map(f64::from).collect())
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Lexical
// ---------------------------------------------------------------------------

/// Word-set Jaccard overlap.
#[derive(Debug, Clone, Copy, Default)]
pub struct JaccardBackend;

impl TextSimilarityBackend for JaccardBackend {
    fn name(&self) -> &str {
        "jaccard"
    }

    fn kind(&self) -> BackendKind {
        BackendKind::Lexical
    }

    fn embed(&self, _texts: &[String]) -> AnalysisResult<Vec<Vec<f64>>> {
        Err(AnalysisError::Backend {
            backend: "jaccard".to_string(),
            reason: "lexical backend has no vector space".to_string(),
        })
    }

    fn similarity(&self, a: &str, b: &str) -> AnalysisResult<f64> {
        Ok(jaccard(&tokenize(a), &tokenize(b)))
    }

    fn consecutive_similarities(&self, texts: &[String]) -> AnalysisResult<Vec<f64>> {
        Ok(texts
            .windows(2)
            .map(|pair| jaccard(&tokenize(&pair[0]), &tokenize(&pair[1])))
            .collect())
    }

    fn pairwise_similarities(&self, texts: &[String]) -> AnalysisResult<Vec<f64>> {
        let tokens: Vec<Vec<String>> = texts.iter().map(|t| tokenize(t)).collect();
        let mut out = Vec::new();
        for i in 0..tokens.len() {
            for j in (i + 1)..tokens.len() {
                out.push(jaccard(&tokens[i], &tokens[j]));
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_zero_vector() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_tfidf_identical_texts_score_one() {
        let backend = TfIdfBackend::default();
        let text = "distributed hash tables route lookups across nodes";
        let sim = backend.similarity(text, text).unwrap();
        assert!((sim - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_tfidf_disjoint_texts_score_zero() {
        let backend = TfIdfBackend::default();
        let sim = backend
            .similarity("monetary policy inflation", "cherry blossoms petals")
            .unwrap();
        assert_eq!(sim, 0.0);
    }

    #[test]
    fn test_tfidf_stop_words_only_is_error() {
        let backend = TfIdfBackend::default();
        let err = backend.similarity("the and of", "is was were").unwrap_err();
        assert_eq!(err, AnalysisError::EmptyVocabulary);
    }

    #[test]
    fn test_tfidf_vocabulary_cap() {
        let backend = TfIdfBackend::new(2);
        let vectors = backend
            .embed(&["alpha alpha beta gamma".to_string(), "beta delta".to_string()])
            .unwrap();
        assert_eq!(vectors[0].len(), 2);
    }

    #[test]
    fn test_jaccard_backend_consecutive() {
        let backend = JaccardBackend;
        let sims = backend
            .consecutive_similarities(&[
                "cat sat mat".to_string(),
                "cat sat hat".to_string(),
                "dog ran".to_string(),
            ])
            .unwrap();
        assert_eq!(sims.len(), 2);
        assert!((sims[0] - 0.5).abs() < 1e-9);
        assert_eq!(sims[1], 0.0);
    }

    struct LengthEmbedder;

    impl Embedder for LengthEmbedder {
        fn model_name(&self) -> &str {
            "length"
        }

        fn embed(&self, text: &str) -> AnalysisResult<Vec<f32>> {
            Ok(vec![text.len() as f32, 1.0])
        }
    }

    #[test]
    fn test_embedding_backend_uses_embedder() {
        let backend = EmbeddingBackend::new(LengthEmbedder);
        assert_eq!(backend.kind(), BackendKind::Embedding);
        assert_eq!(backend.name(), "length");
        let sim = backend.similarity("abc", "abc").unwrap();
        assert!((sim - 1.0).abs() < 1e-6);
    }
}
