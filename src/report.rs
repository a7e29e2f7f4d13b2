// src/report.rs
//! Rendering of profiles and ranked results for the terminal.

use crate::postings::{RankSummary, SimilarityRecord, TechnologyCount, TechnologyTally};
use crate::resume::SkillProfile;
use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;
use std::io::Write;

const NAME_WIDTH: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProfileFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    Table,
    Json,
    Csv,
}

pub fn write_profile<W: Write>(out: &mut W, profile: &SkillProfile, format: ProfileFormat) -> Result<()> {
    match format {
        ProfileFormat::Json => write_json(out, profile),
        ProfileFormat::Text => {
            writeln!(out, "Soft skills ({}):", profile.soft_skills.len())?;
            for skill in &profile.soft_skills {
                writeln!(out, "  - {}", skill)?;
            }
            writeln!(out, "Hard skills ({}):", profile.hard_skills.len())?;
            for skill in &profile.hard_skills {
                writeln!(out, "  - {}", skill)?;
            }
            Ok(())
        }
    }
}

#[derive(Serialize)]
struct RankReport<'a> {
    summary: &'a RankSummary,
    records: &'a [SimilarityRecord],
}

pub fn write_ranking<W: Write>(
    out: &mut W,
    records: &[SimilarityRecord],
    summary: &RankSummary,
    format: ListFormat,
) -> Result<()> {
    match format {
        ListFormat::Json => write_json(out, &RankReport { summary, records }),
        ListFormat::Csv => write_csv(out, records),
        ListFormat::Table => write_table(out, records, summary),
    }
}

#[derive(Serialize)]
struct TechnologyReport<'a> {
    postings: usize,
    technologies: &'a [TechnologyCount],
}

pub fn write_technologies<W: Write>(
    out: &mut W,
    tally: &TechnologyTally,
    counts: &[TechnologyCount],
    format: ListFormat,
) -> Result<()> {
    match format {
        ListFormat::Json => write_json(
            out,
            &TechnologyReport {
                postings: tally.postings,
                technologies: counts,
            },
        ),
        ListFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            for count in counts {
                writer
                    .serialize(count)
                    .with_context(|| format!("Failed to write CSV row for {}", count.technology))?;
            }
            writer.flush().context("Failed to flush CSV output")?;
            Ok(())
        }
        ListFormat::Table => {
            writeln!(out, "Postings analysed: {}", tally.postings)?;
            for (position, count) in counts.iter().enumerate() {
                writeln!(
                    out,
                    "{:>3}. {:<15} {:>4} mentions ({:.1}%)",
                    position + 1,
                    count.technology,
                    count.count,
                    count.percentage
                )?;
            }
            Ok(())
        }
    }
}

fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).context("Failed to serialize JSON output")?;
    writeln!(out)?;
    Ok(())
}

fn write_csv<W: Write>(out: &mut W, records: &[SimilarityRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for record in records {
        writer
            .serialize(record)
            .with_context(|| format!("Failed to write CSV row for posting {}", record.id))?;
    }
    writer.flush().context("Failed to flush CSV output")?;
    Ok(())
}

fn write_table<W: Write>(out: &mut W, records: &[SimilarityRecord], summary: &RankSummary) -> Result<()> {
    writeln!(
        out,
        "{:<4} {:<12} {:<width$} {:>8} {:>8} {:>8} {:>7}",
        "#",
        "ID",
        "Name",
        "Soft",
        "Hard",
        "Overall",
        "Length",
        width = NAME_WIDTH
    )?;
    writeln!(out, "{}", "-".repeat(NAME_WIDTH + 54))?;

    for (position, record) in records.iter().enumerate() {
        writeln!(
            out,
            "{:<4} {:<12} {:<width$} {:>8.3} {:>8.3} {:>8.3} {:>7}",
            position + 1,
            record.id,
            truncate(&record.name, NAME_WIDTH),
            record.soft_score,
            record.hard_score,
            record.overall_score,
            record.description_length,
            width = NAME_WIDTH
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Postings analysed: {}", summary.count)?;
    for (label, stats) in [
        ("Soft skills", &summary.soft),
        ("Hard skills", &summary.hard),
        ("Overall", &summary.overall),
    ] {
        writeln!(
            out,
            "{:<12} mean {:.3}%  max {:.3}%",
            label, stats.mean, stats.max
        )?;
    }
    Ok(())
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(3)).collect();
    cut.push_str("...");
    cut
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::postings::RankedResult;

    fn records() -> RankedResult {
        RankedResult::from_records(vec![SimilarityRecord {
            id: "101".to_string(),
            name: "Rust developer".to_string(),
            soft_score: 1.5,
            hard_score: 42.25,
            overall_score: 21.875,
            description_length: 350,
        }])
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Разработчик Rust", 10), "Разрабо...");
    }

    #[test]
    fn test_csv_has_header_and_row() {
        let result = records();
        let mut out = Vec::new();
        write_ranking(&mut out, result.records(), &result.summary(), ListFormat::Csv).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("id,name,soft_score,hard_score,overall_score,description_length")
        );
        assert_eq!(lines.next(), Some("101,Rust developer,1.5,42.25,21.875,350"));
    }

    #[test]
    fn test_json_contains_summary_and_records() {
        let result = records();
        let mut out = Vec::new();
        write_ranking(&mut out, result.records(), &result.summary(), ListFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["summary"]["count"], 1);
        assert_eq!(value["records"][0]["id"], "101");
    }

    #[test]
    fn test_table_lists_records_and_stats() {
        let result = records();
        let mut out = Vec::new();
        write_ranking(&mut out, result.records(), &result.summary(), ListFormat::Table).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Rust developer"));
        assert!(text.contains("21.875"));
        assert!(text.contains("Postings analysed: 1"));
    }

    fn tally() -> TechnologyTally {
        TechnologyTally {
            postings: 4,
            counts: vec![
                TechnologyCount {
                    technology: "Docker".to_string(),
                    count: 3,
                    percentage: 75.0,
                },
                TechnologyCount {
                    technology: "Go".to_string(),
                    count: 1,
                    percentage: 25.0,
                },
            ],
        }
    }

    #[test]
    fn test_technology_table() {
        let tally = tally();
        let mut out = Vec::new();
        write_technologies(&mut out, &tally, tally.top(1), ListFormat::Table).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Postings analysed: 4\n"));
        assert!(text.contains(&format!("  1. {:<15}    3 mentions (75.0%)", "Docker")));
        assert!(!text.contains("Go"));
    }

    #[test]
    fn test_technology_csv() {
        let tally = tally();
        let mut out = Vec::new();
        write_technologies(&mut out, &tally, &tally.counts, ListFormat::Csv).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec!["technology,count,percentage", "Docker,3,75.0", "Go,1,25.0"]
        );
    }

    #[test]
    fn test_profile_text() {
        let mut profile = SkillProfile::default();
        profile.hard_skills.insert("Rust".to_string());
        let mut out = Vec::new();
        write_profile(&mut out, &profile, ProfileFormat::Text).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Hard skills (1):\n  - Rust"));
    }
}
