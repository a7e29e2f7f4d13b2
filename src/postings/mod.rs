// src/postings/mod.rs
use crate::similarity::strip_markup;
use serde::{Deserialize, Deserializer, Serialize};

pub mod loader;
pub mod ranker;
pub mod technologies;

pub use loader::load_postings;
pub use ranker::{PostingRanker, RankSummary, RankedResult, ScoreStats, SimilarityRecord};
pub use technologies::{TechnologyCount, TechnologyTable, TechnologyTally};

/// One job posting as handed over by the fetch layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Posting {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<Snippet>,
}

/// Short requirement/responsibility excerpts from a search results page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snippet {
    #[serde(default)]
    pub requirement: Option<String>,
    #[serde(default)]
    pub responsibility: Option<String>,
}

impl Posting {
    pub fn new(id: &str, name: &str, description: Option<&str>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.map(str::to_string),
            snippet: None,
        }
    }

    /// Name, snippet and markup-free description joined by spaces.
    pub fn mention_text(&self) -> String {
        let mut parts: Vec<String> = vec![self.name.clone()];
        if let Some(snippet) = &self.snippet {
            parts.extend(snippet.requirement.iter().map(|text| strip_markup(text)));
            parts.extend(snippet.responsibility.iter().map(|text| strip_markup(text)));
        }
        if let Some(description) = &self.description {
            parts.push(strip_markup(description));
        }
        parts.join(" ")
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(serde_json::Number),
        Missing(()),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(text) => text,
        Id::Number(number) => number.to_string(),
        Id::Missing(()) => String::new(),
    })
}
