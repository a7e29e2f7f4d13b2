// src/resume/mod.rs
//! Skill extraction from the two-column resume table.

pub mod categories;
pub mod decomposer;
pub mod profile;
pub mod scanner;

pub use categories::{Bucket, SkillRule, SkillTable, SplitStrategy};
pub use profile::{ProfileBuilder, SkillProfile};
pub use scanner::{Row, RowMarkup, RowScanner};

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

pub struct SkillExtractor {
    markup: RowMarkup,
    table: SkillTable,
}

impl SkillExtractor {
    pub fn new(markup: RowMarkup, table: SkillTable) -> Self {
        Self { markup, table }
    }

    pub fn rows(&self, content: &str) -> Vec<Row> {
        let lines: Vec<&str> = content.split('\n').collect();
        RowScanner::new(&self.markup, &self.table).scan(&lines)
    }

    pub fn extract(&self, content: &str) -> SkillProfile {
        let rows = self.rows(content);
        ProfileBuilder::new(&self.table, &self.markup.line_break)
            .extend(&rows)
            .build()
    }

    pub async fn extract_file(&self, path: &Path) -> Result<SkillProfile> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read resume: {}", path.display()))?;
        info!("Extracting skills from resume: {}", path.display());
        Ok(self.extract(&content))
    }
}

impl Default for SkillExtractor {
    fn default() -> Self {
        Self::new(RowMarkup::default(), SkillTable::default())
    }
}
