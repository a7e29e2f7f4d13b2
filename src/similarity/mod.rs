// src/similarity/mod.rs
//! Lexical similarity between posting text and skill buckets.

pub mod scorer;
pub mod stop_words;
pub mod vectorizer;

pub use scorer::{strip_markup, SimilarityScorer};
pub use vectorizer::{TermVector, TfIdfVectorizer, VectorizerConfig};
