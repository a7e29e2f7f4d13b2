// src/postings/loader.rs
//! Reads postings saved by the fetch layer.
//!
//! A directory is read as one posting per `*.json` file. A single file may
//! hold an array of postings, an API page with an `items` array, or one
//! posting object. Records that do not decode as a posting are logged and
//! skipped without dropping the rest of the file.

use super::Posting;
use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, warn};

#[derive(Deserialize)]
#[serde(untagged)]
enum PostingFile {
    List(Vec<Value>),
    Page { items: Vec<Value> },
    Single(Value),
}

impl PostingFile {
    fn into_records(self) -> Vec<Value> {
        match self {
            PostingFile::List(records) => records,
            PostingFile::Page { items } => items,
            PostingFile::Single(record) => vec![record],
        }
    }
}

fn decode_records(path: &Path, records: Vec<Value>) -> Vec<Posting> {
    records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| {
            let id = record.get("id").cloned().unwrap_or(Value::Null);
            match serde_json::from_value::<Posting>(record) {
                Ok(posting) => Some(posting),
                Err(e) => {
                    warn!(
                        posting_id = %id,
                        index,
                        "Skipping malformed posting in {}: {}",
                        path.display(),
                        e
                    );
                    None
                }
            }
        })
        .collect()
}

pub async fn load_postings(path: &Path) -> Result<Vec<Posting>> {
    let metadata = fs::metadata(path)
        .await
        .with_context(|| format!("Failed to access postings: {}", path.display()))?;

    let postings = if metadata.is_dir() {
        load_directory(path).await?
    } else {
        parse_file(path).await?
    };

    info!(
        count = postings.len(),
        "Loaded postings from {}",
        path.display()
    );
    Ok(postings)
}

async fn load_directory(dir: &Path) -> Result<Vec<Posting>> {
    let mut entries = fs::read_dir(dir)
        .await
        .with_context(|| format!("Failed to read postings directory: {}", dir.display()))?;

    let mut files: Vec<PathBuf> = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .context("Failed to read directory entry")?
    {
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
            files.push(path);
        }
    }
    files.sort();

    let mut postings = Vec::new();
    for file in &files {
        match parse_file(file).await {
            Ok(parsed) => postings.extend(parsed),
            Err(e) => warn!("Skipping posting file {}: {:#}", file.display(), e),
        }
    }
    Ok(postings)
}

async fn parse_file(path: &Path) -> Result<Vec<Posting>> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    let parsed: PostingFile = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse postings JSON: {}", path.display()))?;
    Ok(decode_records(path, parsed.into_records()))
}
