// src/cli.rs
use crate::config::AppConfig;
use crate::postings::{load_postings, PostingRanker};
use crate::report::{write_profile, write_ranking, write_technologies, ListFormat, ProfileFormat};
use crate::resume::SkillExtractor;
use crate::similarity::SimilarityScorer;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "skillrank")]
#[command(about = "Extract resume skills and rank job postings by similarity")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// YAML configuration file
    #[arg(long, global = true, env = "SKILLRANK_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the skill profile extracted from a resume
    Skills {
        resume: PathBuf,
        #[arg(long, value_enum, default_value = "text")]
        format: ProfileFormat,
    },
    /// Rank postings against the skills of a resume
    Rank {
        resume: PathBuf,
        /// Directory of posting JSON files, or a single JSON file
        postings: PathBuf,
        /// Number of postings to print, 0 for all
        #[arg(long, default_value_t = 20)]
        top: usize,
        #[arg(long, value_enum, default_value = "table")]
        format: ListFormat,
        /// Score postings on the blocking thread pool
        #[arg(long)]
        concurrent: bool,
    },
    /// Count technology mentions across postings
    Technologies {
        /// Directory of posting JSON files, or a single JSON file
        postings: PathBuf,
        /// Number of technologies to print, 0 for all
        #[arg(long, default_value_t = 10)]
        top: usize,
        #[arg(long, value_enum, default_value = "table")]
        format: ListFormat,
    },
}

pub async fn handle_command(command: Command, config: AppConfig) -> Result<()> {
    let extractor = SkillExtractor::new(config.markup, config.categories);

    match command {
        Command::Skills { resume, format } => {
            let profile = extractor.extract_file(&resume).await?;
            let mut out = std::io::stdout().lock();
            write_profile(&mut out, &profile, format)?;
            out.flush()?;
        }

        Command::Rank {
            resume,
            postings,
            top,
            format,
            concurrent,
        } => {
            let profile = extractor.extract_file(&resume).await?;
            if profile.is_empty() {
                warn!("No skills extracted from {}; every score will be 0", resume.display());
            }

            let postings = load_postings(&postings).await?;
            let ranker = PostingRanker::new(&profile, SimilarityScorer::new(&config.scoring));
            let result = if concurrent {
                Arc::new(ranker).rank_concurrent(postings).await
            } else {
                ranker.rank(&postings)
            };

            let shown = if top == 0 {
                result.records()
            } else {
                result.top(top)
            };
            info!(shown = shown.len(), ranked = result.len(), "Writing ranking");
            let mut out = std::io::stdout().lock();
            write_ranking(&mut out, shown, &result.summary(), format)?;
            out.flush()?;
        }

        Command::Technologies {
            postings,
            top,
            format,
        } => {
            let postings = load_postings(&postings).await?;
            let tally = config.technologies.tally(&postings);

            let shown = if top == 0 {
                tally.counts.as_slice()
            } else {
                tally.top(top)
            };
            info!(
                shown = shown.len(),
                detected = tally.counts.len(),
                "Writing technology mentions"
            );
            let mut out = std::io::stdout().lock();
            write_technologies(&mut out, &tally, shown, format)?;
            out.flush()?;
        }
    }

    Ok(())
}
