use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use spanlight::pipeline::{DocumentInput, PipelineOptions, highlight_document};
use spanlight::{Alignment, BBox, MatchConfig, TargetSentence, WordToken, aggregate, locate};

/// Place highlight rectangles for sentences on extracted PDF words
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Align one sentence against one page of words
    Align {
        /// JSON array of words for a single page
        #[arg(short, long)]
        words: PathBuf,
        #[arg(short, long)]
        sentence: String,
        #[command(flatten)]
        matching: MatchArgs,
    },
    /// Highlight every page of a document, honouring the summariser's stop flag
    Document {
        /// JSON document: { "pages": [{ "page", "words", "reply" }] }
        #[arg(short, long)]
        input: PathBuf,
        /// Key rectangles by (block, line) instead of line alone
        #[arg(long)]
        block_lines: bool,
        #[command(flatten)]
        matching: MatchArgs,
    },
}

#[derive(Args, Debug)]
struct MatchArgs {
    /// JSON file with matcher settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,
    /// Minimum similarity (0-100) for a word to match
    #[arg(long)]
    threshold: Option<u8>,
    /// Consecutive misses before an alignment in progress is dropped
    #[arg(long)]
    max_miss_streak: Option<usize>,
    /// Grace-period seed, one matcher pass per value
    #[arg(long = "grace-seed")]
    grace_seeds: Vec<usize>,
    /// Drop consensus words with no neighbour this close in every pass
    #[arg(long)]
    consensus_radius: Option<f32>,
}

impl MatchArgs {
    fn into_config(self) -> Result<MatchConfig> {
        let mut config = match &self.config {
            Some(path) => MatchConfig::from_json_file(path)?,
            None => MatchConfig::default(),
        };
        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
        if let Some(streak) = self.max_miss_streak {
            config.max_miss_streak = streak;
        }
        if !self.grace_seeds.is_empty() {
            config.grace_seeds = self.grace_seeds;
        }
        if self.consensus_radius.is_some() {
            config.consensus_radius = self.consensus_radius;
        }
        config.validate()?;
        Ok(config)
    }
}

#[derive(Serialize)]
struct AlignOutput<'a> {
    sentence: &'a str,
    matched: bool,
    tokens: Vec<&'a WordToken>,
    lines: std::collections::BTreeMap<u32, BBox>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Align {
            words,
            sentence,
            matching,
        } => {
            let config = matching.into_config()?;
            let raw = std::fs::read_to_string(&words)
                .with_context(|| format!("reading words {}", words.display()))?;
            let tokens: Vec<WordToken> = serde_json::from_str(&raw)
                .with_context(|| format!("parsing words {}", words.display()))?;

            let target = TargetSentence::new(&sentence);
            let output = match locate(&target, &tokens, &config) {
                Alignment::Matched(span) => AlignOutput {
                    sentence: &sentence,
                    matched: true,
                    lines: aggregate(&span),
                    tokens: span,
                },
                Alignment::Unmatched => AlignOutput {
                    sentence: &sentence,
                    matched: false,
                    tokens: vec![],
                    lines: Default::default(),
                },
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Command::Document {
            input,
            block_lines,
            matching,
        } => {
            let options = PipelineOptions {
                config: matching.into_config()?,
                key_by_block: block_lines,
            };
            let doc = DocumentInput::from_json_file(&input)?;
            let report = highlight_document(&doc, &options);
            tracing::info!(
                highlighted = report.highlighted,
                failed = report.failed,
                pages = report.pages.len(),
                "done"
            );
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
