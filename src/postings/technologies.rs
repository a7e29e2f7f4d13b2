// src/postings/technologies.rs
//! Counting of technology mentions across postings.
//!
//! Each technology has a list of lowercase aliases. A posting mentions a
//! technology when any alias occurs in its text as a whole word, that is
//! not glued to a letter or digit on either side. A posting counts at most
//! once per technology.

use super::Posting;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TechnologyTable {
    aliases: BTreeMap<String, Vec<String>>,
}

impl TechnologyTable {
    pub fn empty() -> Self {
        Self {
            aliases: BTreeMap::new(),
        }
    }

    pub fn with_technology(mut self, name: &str, aliases: &[&str]) -> Self {
        self.aliases.insert(
            name.to_string(),
            aliases.iter().map(|alias| alias.to_string()).collect(),
        );
        self
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// Technologies mentioned in `text`, matched case-insensitively.
    pub fn detect(&self, text: &str) -> BTreeSet<&str> {
        let text = text.to_lowercase();
        self.aliases
            .iter()
            .filter(|(_, aliases)| {
                aliases
                    .iter()
                    .map(|alias| alias.trim().to_lowercase())
                    .any(|alias| !alias.is_empty() && mentions(&text, &alias))
            })
            .map(|(name, _)| name.as_str())
            .collect()
    }

    pub fn tally(&self, postings: &[Posting]) -> TechnologyTally {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for posting in postings {
            let found = self.detect(&posting.mention_text());
            debug!(posting_id = %posting.id, technologies = found.len(), "Detected technologies");
            for name in found {
                *counts.entry(name).or_default() += 1;
            }
        }

        let total = postings.len();
        let mut counts: Vec<TechnologyCount> = counts
            .into_iter()
            .map(|(technology, count)| TechnologyCount {
                technology: technology.to_string(),
                count,
                percentage: count as f64 / total as f64 * 100.0,
            })
            .collect();
        counts.sort_by(|a, b| b.count.cmp(&a.count));

        TechnologyTally {
            postings: total,
            counts,
        }
    }
}

fn mentions(text: &str, alias: &str) -> bool {
    text.match_indices(alias).any(|(start, matched)| {
        let before = text[..start].chars().next_back();
        let after = text[start + matched.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

impl Default for TechnologyTable {
    fn default() -> Self {
        Self::empty()
            .with_technology("Python", &["python", "fastapi"])
            .with_technology("Django и др.", &["django", "flask"])
            .with_technology("JavaScript", &["javascript", "js", "node.js", "nodejs"])
            .with_technology("React и др.", &["react", "vue", "angular"])
            .with_technology("Java", &["java", "hibernate"])
            .with_technology("Spring", &["spring"])
            .with_technology("C++", &["c++", "cpp"])
            .with_technology("C# & .NET", &["c#", "csharp", ".net"])
            .with_technology("PHP", &["php", "laravel", "symfony"])
            .with_technology("Go", &["go", "golang"])
            .with_technology("Ruby", &["ruby", "rails"])
            .with_technology("SQL", &["sql", "mysql", "postgresql", "oracle"])
            .with_technology("NoSQL", &["mongodb", "redis", "cassandra"])
            .with_technology("Docker", &["docker", "container"])
            .with_technology("Kubernetes", &["kubernetes", "k8s"])
            .with_technology("AWS", &["aws", "amazon web services"])
            .with_technology("Azure", &["azure"])
            .with_technology("Git", &["git", "github", "gitlab"])
            .with_technology("Linux", &["linux", "unix"])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TechnologyCount {
    pub technology: String,
    pub count: usize,
    /// Share of all tallied postings, 0 to 100.
    pub percentage: f64,
}

/// Mention counts in descending order; ties are ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TechnologyTally {
    pub postings: usize,
    pub counts: Vec<TechnologyCount>,
}

impl TechnologyTally {
    pub fn top(&self, limit: usize) -> &[TechnologyCount] {
        &self.counts[..limit.min(self.counts.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_matches_whole_words_only() {
        let table = TechnologyTable::default();
        let found = table.detect("JavaScript, Google Docs and a good mood");
        assert_eq!(found, BTreeSet::from(["JavaScript"]));
    }

    #[test]
    fn test_detect_handles_symbols_and_phrases() {
        let table = TechnologyTable::default();
        let found = table.detect("C++ or C#/.NET on Amazon Web Services, deploy via K8s");
        assert_eq!(
            found,
            BTreeSet::from(["AWS", "C# & .NET", "C++", "Kubernetes"])
        );
    }

    #[test]
    fn test_detect_counts_technology_once() {
        let table = TechnologyTable::default();
        let found = table.detect("PostgreSQL, MySQL and plain SQL");
        assert_eq!(found, BTreeSet::from(["SQL"]));
    }

    #[test]
    fn test_tally_counts_postings_and_percentages() {
        let postings = vec![
            Posting::new("1", "Python developer", Some("<p>Django, PostgreSQL</p>")),
            Posting::new("2", "Data engineer", Some("<p>Python, SQL, Docker</p>")),
            Posting::new("3", "Go developer", Some("<p>Golang, Docker</p>")),
            Posting::new("4", "Office manager", None),
        ];
        let tally = TechnologyTable::default().tally(&postings);

        assert_eq!(tally.postings, 4);
        let ranked: Vec<(&str, usize)> = tally
            .counts
            .iter()
            .map(|c| (c.technology.as_str(), c.count))
            .collect();
        assert_eq!(
            ranked,
            vec![
                ("Docker", 2),
                ("Python", 2),
                ("SQL", 2),
                ("Django и др.", 1),
                ("Go", 1),
            ]
        );
        assert_eq!(tally.counts[0].percentage, 50.0);
        assert_eq!(tally.top(2).len(), 2);
        assert_eq!(tally.top(50).len(), 5);
    }

    #[test]
    fn test_tally_of_no_postings_is_empty() {
        let tally = TechnologyTable::default().tally(&[]);
        assert_eq!(tally, TechnologyTally::default());
    }

    #[test]
    fn test_table_deserializes_from_yaml() {
        let yaml = "Rust:\n  - rust\n  - cargo\n";
        let table: TechnologyTable = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.detect("Cargo workspaces"), BTreeSet::from(["Rust"]));
    }
}
