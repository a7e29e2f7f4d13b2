// src/similarity/scorer.rs
use super::vectorizer::{TfIdfVectorizer, VectorizerConfig};
use scraper::Html;
use tracing::debug;

/// Bounded lexical similarity between two texts, as a percentage.
#[derive(Debug, Clone, Default)]
pub struct SimilarityScorer {
    vectorizer: TfIdfVectorizer,
}

impl SimilarityScorer {
    pub fn new(config: &VectorizerConfig) -> Self {
        Self {
            vectorizer: TfIdfVectorizer::new(config),
        }
    }

    /// Cosine similarity of the two texts' TF-IDF vectors, scaled to
    /// [0, 100]. Empty input or a degenerate vocabulary scores 0.
    pub fn score(&self, left: &str, right: &str) -> f64 {
        if left.is_empty() || right.is_empty() {
            return 0.0;
        }

        match self.vectorizer.fit_transform(&[left, right]) {
            Ok(vectors) => vectors[0].cosine(&vectors[1]) * 100.0,
            Err(e) => {
                debug!("Vectorization failed, scoring 0: {}", e);
                0.0
            }
        }
    }
}

/// Text content of an HTML fragment with all tags removed.
pub fn strip_markup(markup: &str) -> String {
    Html::parse_fragment(markup)
        .root_element()
        .text()
        .collect::<String>()
}
