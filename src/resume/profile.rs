// src/resume/profile.rs
use super::categories::{Bucket, SkillTable};
use super::decomposer::decompose;
use super::scanner::Row;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Leftover of a split `<br>` tag.
const MARKUP_ARTIFACT: &str = "br";
const MIN_SOFT_LEN: usize = 2;
const MIN_HARD_LEN: usize = 3;

/// Deduplicated soft and hard skills of one resume.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SkillProfile {
    pub soft_skills: BTreeSet<String>,
    pub hard_skills: BTreeSet<String>,
}

impl SkillProfile {
    pub fn soft_text(&self) -> String {
        join_skills(&self.soft_skills)
    }

    pub fn hard_text(&self) -> String {
        join_skills(&self.hard_skills)
    }

    pub fn is_empty(&self) -> bool {
        self.soft_skills.is_empty() && self.hard_skills.is_empty()
    }
}

fn join_skills(skills: &BTreeSet<String>) -> String {
    skills
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}

pub struct ProfileBuilder<'a> {
    table: &'a SkillTable,
    line_break: &'a str,
    soft: Vec<String>,
    hard: Vec<String>,
}

impl<'a> ProfileBuilder<'a> {
    pub fn new(table: &'a SkillTable, line_break: &'a str) -> Self {
        Self {
            table,
            line_break,
            soft: Vec::new(),
            hard: Vec::new(),
        }
    }

    /// Route one row into its bucket. Rows of unknown categories are ignored.
    pub fn push_row(&mut self, row: &Row) {
        let Some(rule) = self.table.rule(&row.category) else {
            debug!(category = %row.category, "Ignoring row of unknown category");
            return;
        };

        let skills = decompose(&row.value, rule.strategy, self.line_break);
        match rule.bucket {
            Bucket::Soft => self.soft.extend(skills),
            Bucket::Hard => self.hard.extend(skills),
        }
    }

    pub fn extend<'r>(mut self, rows: impl IntoIterator<Item = &'r Row>) -> Self {
        for row in rows {
            self.push_row(row);
        }
        self
    }

    pub fn build(self) -> SkillProfile {
        let profile = SkillProfile {
            soft_skills: clean(self.soft, MIN_SOFT_LEN),
            hard_skills: clean(self.hard, MIN_HARD_LEN),
        };
        info!(
            soft = profile.soft_skills.len(),
            hard = profile.hard_skills.len(),
            "Built skill profile"
        );
        profile
    }
}

fn clean(skills: Vec<String>, min_len: usize) -> BTreeSet<String> {
    skills
        .into_iter()
        .filter(|skill| skill != MARKUP_ARTIFACT && skill.chars().count() >= min_len)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resume::categories::{
        ACHIEVEMENTS_LABEL, HOBBIES_LABEL, LANGUAGES_LABEL, QUALITIES_LABEL,
        SPECIALIZATION_LABEL,
    };

    fn row(category: &str, value: &str) -> Row {
        Row {
            category: category.to_string(),
            value: value.to_string(),
        }
    }

    fn build(rows: &[Row]) -> SkillProfile {
        let table = SkillTable::default();
        ProfileBuilder::new(&table, "<br>").extend(rows).build()
    }

    #[test]
    fn test_routes_categories_to_buckets() {
        let profile = build(&[
            row(QUALITIES_LABEL, "Ответственность, Пунктуальность"),
            row(HOBBIES_LABEL, "Чтение;Игры: Шахматы, Го"),
            row(ACHIEVEMENTS_LABEL, "Призёр хакатона"),
            row(LANGUAGES_LABEL, "English - B2; German - A1"),
            row(SPECIALIZATION_LABEL, "1. Языки: Rust, Python<br>2. Git"),
            row("Город", "Москва"),
        ]);

        let soft: Vec<&str> = profile.soft_skills.iter().map(String::as_str).collect();
        assert_eq!(
            soft,
            vec!["Го", "Игры", "Ответственность", "Призёр хакатона", "Пунктуальность", "Чтение", "Шахматы"]
        );
        assert!(profile.hard_skills.contains("English (B2)"));
        assert!(profile.hard_skills.contains("German (A1)"));
        assert!(profile.hard_skills.contains("Rust"));
        assert!(profile.hard_skills.contains("Python"));
        assert!(profile.hard_skills.contains("Git"));
        assert!(!profile.soft_skills.contains("Москва"));
    }

    #[test]
    fn test_filters_artifacts_and_short_skills() {
        let profile = build(&[
            row(QUALITIES_LABEL, "br, a, ок"),
            row(SPECIALIZATION_LABEL, "br<br>Go<br>C<br>SQL<br>1. Утилиты: R, Vim"),
        ]);

        assert!(!profile.soft_skills.contains("br"));
        assert!(!profile.soft_skills.contains("a"));
        assert!(profile.soft_skills.contains("ок"));
        assert!(!profile.hard_skills.contains("br"));
        assert!(!profile.hard_skills.contains("Go"));
        assert!(!profile.hard_skills.contains("R"));
        assert!(profile.hard_skills.contains("SQL"));
        assert!(profile.hard_skills.contains("Vim"));
        assert!(profile.soft_skills.iter().all(|s| s.chars().count() > 1));
        assert!(profile.hard_skills.iter().all(|s| s.chars().count() > 2));
    }

    #[test]
    fn test_deduplicates_exact_matches_only() {
        let profile = build(&[
            row(QUALITIES_LABEL, "Честность, Честность, честность"),
            row(ACHIEVEMENTS_LABEL, "Честность"),
        ]);
        assert_eq!(profile.soft_skills.len(), 2);
    }

    #[test]
    fn test_bucket_texts_join_with_spaces() {
        let profile = build(&[row(QUALITIES_LABEL, "Бег, Сон")]);
        assert_eq!(profile.soft_text(), "Бег Сон");
        assert_eq!(profile.hard_text(), "");
    }
}
