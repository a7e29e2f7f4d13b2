//! Resume skill extraction and lexical ranking of job postings.
//!
//! A resume exported as a two-column HTML table is scanned into rows,
//! the rows are decomposed into a soft and a hard skill bucket, and every
//! posting is scored against both buckets with TF-IDF cosine similarity.

pub mod cli;
pub mod config;
pub mod postings;
pub mod report;
pub mod resume;
pub mod similarity;

pub use config::AppConfig;
pub use postings::{Posting, PostingRanker, RankedResult, SimilarityRecord};
pub use resume::{SkillExtractor, SkillProfile};
pub use similarity::SimilarityScorer;

/// Convenience function: extract the profile from `resume` and rank
/// `postings` against it with the given configuration.
pub fn rank_postings(resume: &str, postings: &[Posting], config: &AppConfig) -> RankedResult {
    let extractor = SkillExtractor::new(config.markup.clone(), config.categories.clone());
    let profile = extractor.extract(resume);
    PostingRanker::new(&profile, SimilarityScorer::new(&config.scoring)).rank(postings)
}
