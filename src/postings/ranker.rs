// src/postings/ranker.rs
use super::Posting;
use crate::resume::SkillProfile;
use crate::similarity::{strip_markup, SimilarityScorer};
use serde::Serialize;
use std::cmp::Ordering;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, error, info};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarityRecord {
    pub id: String,
    pub name: String,
    pub soft_score: f64,
    pub hard_score: f64,
    pub overall_score: f64,
    pub description_length: usize,
}

/// Records in descending order of overall score; equal scores keep their
/// input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RankedResult {
    records: Vec<SimilarityRecord>,
}

impl RankedResult {
    pub fn from_records(mut records: Vec<SimilarityRecord>) -> Self {
        records.sort_by(|a, b| {
            b.overall_score
                .partial_cmp(&a.overall_score)
                .unwrap_or(Ordering::Equal)
        });
        Self { records }
    }

    pub fn records(&self) -> &[SimilarityRecord] {
        &self.records
    }

    pub fn top(&self, limit: usize) -> &[SimilarityRecord] {
        &self.records[..limit.min(self.records.len())]
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn summary(&self) -> RankSummary {
        RankSummary {
            count: self.records.len(),
            soft: ScoreStats::over(self.records.iter().map(|r| r.soft_score)),
            hard: ScoreStats::over(self.records.iter().map(|r| r.hard_score)),
            overall: ScoreStats::over(self.records.iter().map(|r| r.overall_score)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ScoreStats {
    pub mean: f64,
    pub max: f64,
}

impl ScoreStats {
    fn over(scores: impl Iterator<Item = f64>) -> Self {
        let (count, sum, max) = scores.fold((0usize, 0.0, 0.0f64), |(count, sum, max), score| {
            (count + 1, sum + score, max.max(score))
        });
        if count == 0 {
            return Self::default();
        }
        Self {
            mean: sum / count as f64,
            max,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RankSummary {
    pub count: usize,
    pub soft: ScoreStats,
    pub hard: ScoreStats,
    pub overall: ScoreStats,
}

/// Scores postings against the two skill buckets of one profile.
#[derive(Debug, Clone)]
pub struct PostingRanker {
    scorer: SimilarityScorer,
    soft_text: String,
    hard_text: String,
}

impl PostingRanker {
    pub fn new(profile: &SkillProfile, scorer: SimilarityScorer) -> Self {
        Self {
            scorer,
            soft_text: profile.soft_text(),
            hard_text: profile.hard_text(),
        }
    }

    /// `None` for a posting without description.
    pub fn score_posting(&self, posting: &Posting) -> Option<SimilarityRecord> {
        let description = match posting.description.as_deref() {
            Some(description) if !description.is_empty() => description,
            _ => {
                debug!(posting_id = %posting.id, "Skipping posting without description");
                return None;
            }
        };

        let text = strip_markup(description);
        let soft_score = self.scorer.score(&text, &self.soft_text);
        let hard_score = self.scorer.score(&text, &self.hard_text);

        Some(SimilarityRecord {
            id: posting.id.clone(),
            name: posting.name.clone(),
            soft_score,
            hard_score,
            overall_score: (soft_score + hard_score) / 2.0,
            description_length: text.chars().count(),
        })
    }

    pub fn rank(&self, postings: &[Posting]) -> RankedResult {
        let records: Vec<SimilarityRecord> = postings
            .iter()
            .filter_map(|posting| self.score_posting(posting))
            .collect();

        info!(
            scored = records.len(),
            total = postings.len(),
            "Ranked postings"
        );
        RankedResult::from_records(records)
    }

    /// Same result as [`rank`](Self::rank), with each posting scored on the
    /// blocking pool.
    pub async fn rank_concurrent(self: Arc<Self>, postings: Vec<Posting>) -> RankedResult {
        let total = postings.len();
        let mut tasks = JoinSet::new();
        for (index, posting) in postings.into_iter().enumerate() {
            let ranker = Arc::clone(&self);
            tasks.spawn_blocking(move || (index, ranker.score_posting(&posting)));
        }

        let mut indexed = Vec::with_capacity(total);
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, Some(record))) => indexed.push((index, record)),
                Ok((_, None)) => {}
                Err(e) => error!("Posting scoring task failed: {}", e),
            }
        }
        indexed.sort_by_key(|(index, _)| *index);

        info!(
            scored = indexed.len(),
            total,
            "Ranked postings concurrently"
        );
        RankedResult::from_records(indexed.into_iter().map(|(_, record)| record).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn profile() -> SkillProfile {
        SkillProfile {
            soft_skills: ["Teamwork", "Communication"]
                .iter()
                .map(|s| s.to_string())
                .collect::<BTreeSet<_>>(),
            hard_skills: ["Rust", "PostgreSQL", "Docker"]
                .iter()
                .map(|s| s.to_string())
                .collect::<BTreeSet<_>>(),
        }
    }

    fn ranker() -> PostingRanker {
        PostingRanker::new(&profile(), SimilarityScorer::default())
    }

    fn record(id: &str, overall: f64) -> SimilarityRecord {
        SimilarityRecord {
            id: id.to_string(),
            name: id.to_string(),
            soft_score: overall,
            hard_score: overall,
            overall_score: overall,
            description_length: 0,
        }
    }

    #[test]
    fn test_postings_without_description_are_skipped() {
        let postings = vec![
            Posting::new("1", "Rust dev", Some("<p>Rust and Docker</p>")),
            Posting::new("2", "Empty", None),
            Posting::new("3", "Team lead", Some("<p>Teamwork</p>")),
        ];
        let result = ranker().rank(&postings);
        assert_eq!(result.len(), 2);
        assert!(result.records().iter().all(|r| r.id != "2"));
    }

    #[test]
    fn test_posting_without_id_is_still_scored() {
        let postings: Vec<Posting> = serde_json::from_str(
            r#"[
                {"name": "Rust dev", "description": "<p>Rust</p>"},
                {"id": 2, "name": "Polyglot", "description": "<p>Rust Go</p>"}
            ]"#,
        )
        .unwrap();
        let result = ranker().rank(&postings);
        assert_eq!(result.len(), 2);
        assert!(result.records().iter().any(|r| r.id.is_empty() && r.name == "Rust dev"));
        assert!(result.records().iter().all(|r| r.hard_score > 0.0));
    }

    #[test]
    fn test_record_fields() {
        let posting = Posting::new("42", "Backend", Some("<p>Rust <b>PostgreSQL</b></p>"));
        let record = ranker().score_posting(&posting).unwrap();
        assert_eq!(record.id, "42");
        assert_eq!(record.description_length, "Rust PostgreSQL".chars().count());
        assert_eq!(record.soft_score, 0.0);
        assert!(record.hard_score > 0.0);
        assert!((record.overall_score - (record.soft_score + record.hard_score) / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_sort_is_descending_and_stable() {
        let result = RankedResult::from_records(vec![
            record("a", 10.0),
            record("b", 50.0),
            record("c", 30.0),
            record("d", 50.0),
            record("e", 10.0),
        ]);
        let ids: Vec<&str> = result.records().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "d", "c", "a", "e"]);
        assert_eq!(result.top(2).len(), 2);
        assert_eq!(result.top(10).len(), 5);
    }

    #[test]
    fn test_summary() {
        let result = RankedResult::from_records(vec![record("a", 10.0), record("b", 30.0)]);
        let summary = result.summary();
        assert_eq!(summary.count, 2);
        assert_eq!(summary.overall.mean, 20.0);
        assert_eq!(summary.overall.max, 30.0);
        assert_eq!(RankedResult::default().summary(), RankSummary::default());
    }

    #[tokio::test]
    async fn test_concurrent_matches_sequential() {
        let postings: Vec<Posting> = (0..20)
            .map(|i| {
                let description = match i % 3 {
                    0 => "<p>Rust Docker</p>",
                    1 => "<p>Teamwork Communication</p>",
                    _ => "<p>PostgreSQL</p>",
                };
                Posting::new(&i.to_string(), "posting", Some(description))
            })
            .collect();

        let ranker = Arc::new(ranker());
        let sequential = ranker.rank(&postings);
        let concurrent = Arc::clone(&ranker).rank_concurrent(postings).await;
        assert_eq!(sequential, concurrent);
    }
}
