// src/resume/categories.rs
//! Declarative category table: which resume rows carry skills, which
//! bucket they land in and how their values are split.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const QUALITIES_LABEL: &str = "Личные качества";
pub const HOBBIES_LABEL: &str = "Увлечения";
pub const ACHIEVEMENTS_LABEL: &str = "Личные достижения";
pub const LANGUAGES_LABEL: &str = "Владение языками";
pub const SPECIALIZATION_LABEL: &str = "Профессиональная специализация и владение компьютером";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    Soft,
    Hard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitStrategy {
    /// `"a, b, c"` -> `a`, `b`, `c`
    CommaList,
    /// Semicolon entries, each optionally `label: x, y`
    Hobbies,
    /// The value is a single skill
    WholeValue,
    /// `"English - B2; German - A1"` -> `English (B2)`, `German (A1)`
    Languages,
    /// Multi-line numbered sections of `label: x, y`
    Specialization,
}

impl SplitStrategy {
    /// Strategies whose value spans several lines of the document.
    pub fn is_multiline(self) -> bool {
        matches!(self, SplitStrategy::Specialization)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRule {
    pub bucket: Bucket,
    pub strategy: SplitStrategy,
}

impl SkillRule {
    pub fn new(bucket: Bucket, strategy: SplitStrategy) -> Self {
        Self { bucket, strategy }
    }
}

/// Category label -> rule. Labels missing from the table are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillTable {
    rules: BTreeMap<String, SkillRule>,
}

impl SkillTable {
    pub fn empty() -> Self {
        Self {
            rules: BTreeMap::new(),
        }
    }

    pub fn with_rule(mut self, label: impl Into<String>, rule: SkillRule) -> Self {
        self.rules.insert(label.into(), rule);
        self
    }

    pub fn rule(&self, label: &str) -> Option<SkillRule> {
        self.rules.get(label).copied()
    }

    pub fn is_multiline(&self, label: &str) -> bool {
        self.rule(label)
            .map(|rule| rule.strategy.is_multiline())
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for SkillTable {
    fn default() -> Self {
        Self::empty()
            .with_rule(
                QUALITIES_LABEL,
                SkillRule::new(Bucket::Soft, SplitStrategy::CommaList),
            )
            .with_rule(
                HOBBIES_LABEL,
                SkillRule::new(Bucket::Soft, SplitStrategy::Hobbies),
            )
            .with_rule(
                ACHIEVEMENTS_LABEL,
                SkillRule::new(Bucket::Soft, SplitStrategy::WholeValue),
            )
            .with_rule(
                LANGUAGES_LABEL,
                SkillRule::new(Bucket::Hard, SplitStrategy::Languages),
            )
            .with_rule(
                SPECIALIZATION_LABEL,
                SkillRule::new(Bucket::Hard, SplitStrategy::Specialization),
            )
    }
}
