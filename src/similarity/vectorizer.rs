// src/similarity/vectorizer.rs
//! TF-IDF vectorization over a small set of documents fitted together.
//!
//! Tokens are lowercased runs of alphanumeric characters (or `_`) of at
//! least two characters. Weights are raw term counts times the smoothed
//! inverse document frequency `ln((1 + n) / (1 + df)) + 1`, and every
//! document vector is scaled to unit length.

use super::stop_words::ENGLISH_STOP_WORDS;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};

const MIN_TOKEN_CHARS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorizerConfig {
    pub min_df: usize,
    pub english_stop_words: bool,
    pub extra_stop_words: Vec<String>,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            min_df: 1,
            english_stop_words: true,
            extra_stop_words: Vec::new(),
        }
    }
}

/// Unit-length sparse vector keyed by term.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermVector {
    weights: BTreeMap<String, f64>,
}

impl TermVector {
    pub fn weight(&self, term: &str) -> f64 {
        self.weights.get(term).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Cosine of the angle between two unit vectors, in [0, 1].
    ///
    /// Shared terms are visited in key order so the sum is the same
    /// whichever side it is called on.
    pub fn cosine(&self, other: &TermVector) -> f64 {
        let dot: f64 = self
            .weights
            .iter()
            .filter_map(|(term, weight)| other.weights.get(term).map(|w| weight * w))
            .sum();
        dot.clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone)]
pub struct TfIdfVectorizer {
    stop_words: HashSet<String>,
    min_df: usize,
}

impl TfIdfVectorizer {
    pub fn new(config: &VectorizerConfig) -> Self {
        let mut stop_words: HashSet<String> = config
            .extra_stop_words
            .iter()
            .map(|word| word.to_lowercase())
            .collect();
        if config.english_stop_words {
            stop_words.extend(ENGLISH_STOP_WORDS.iter().map(|word| word.to_string()));
        }

        Self {
            stop_words,
            min_df: config.min_df.max(1),
        }
    }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.to_lowercase()
            .split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .filter(|token| token.chars().count() >= MIN_TOKEN_CHARS)
            .filter(|token| !self.stop_words.contains(*token))
            .map(str::to_string)
            .collect()
    }

    /// Fit the vocabulary on `documents` and return one vector per document.
    ///
    /// Fails when no term survives tokenization, stop words and `min_df`.
    pub fn fit_transform(&self, documents: &[&str]) -> Result<Vec<TermVector>> {
        let tokenized: Vec<Vec<String>> = documents.iter().map(|doc| self.tokenize(doc)).collect();

        let mut document_frequency: BTreeMap<&str, usize> = BTreeMap::new();
        for tokens in &tokenized {
            let unique: BTreeSet<&str> = tokens.iter().map(String::as_str).collect();
            for term in unique {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        let n = documents.len() as f64;
        let idf: BTreeMap<&str, f64> = document_frequency
            .into_iter()
            .filter(|(_, df)| *df >= self.min_df)
            .map(|(term, df)| (term, ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0))
            .collect();

        if idf.is_empty() {
            anyhow::bail!("Empty vocabulary; documents contain only stop words");
        }

        Ok(tokenized
            .iter()
            .map(|tokens| Self::weigh(tokens, &idf))
            .collect())
    }

    fn weigh(tokens: &[String], idf: &BTreeMap<&str, f64>) -> TermVector {
        let mut weights: BTreeMap<String, f64> = BTreeMap::new();
        for token in tokens {
            if let Some(term_idf) = idf.get(token.as_str()) {
                *weights.entry(token.clone()).or_insert(0.0) += term_idf;
            }
        }

        let norm = weights.values().map(|w| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for weight in weights.values_mut() {
                *weight /= norm;
            }
        }
        TermVector { weights }
    }
}

impl Default for TfIdfVectorizer {
    fn default() -> Self {
        Self::new(&VectorizerConfig::default())
    }
}
