//! CLI commands for namerank
//!
//! Reads verification records as JSON and either scores them in place
//! (`score`) or splits their candidates into lexical groups (`group`).
//! Input is a JSON array of match records, read from a file or from stdin
//! when the path is `-`. Output goes to stdout as JSON.

#![forbid(unsafe_code)]

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use namerank_core::config::parse_id_list;
use namerank_core::{LexicalGroup, MatchRecord, RankConfig, RankError, RankResult};
use namerank_score::{finalize, name_to_lexical_groups};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error(transparent)]
    Rank(#[from] RankError),
}

pub type CliResult<T> = Result<T, CliError>;

#[derive(Parser, Debug)]
#[command(name = "namerank", version, about = "Relevance scoring and lexical grouping of name matches")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score and sort the candidates of each record, then fill its summary.
    Score {
        /// JSON file with an array of match records, or `-` for stdin.
        file: PathBuf,
        /// Comma-separated data source ids reported as preferred results.
        #[arg(long)]
        preferred: Option<String>,
        /// Keep only the best candidate of each record.
        #[arg(long)]
        best_only: bool,
    },
    /// Split the candidates of each record into lexical groups.
    Group {
        /// JSON file with an array of match records, or `-` for stdin.
        file: PathBuf,
    },
}

/// Grouping output for one input record.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedRecord {
    pub input_id: String,
    pub groups: Vec<LexicalGroup>,
}

pub fn run() -> i32 {
    init_tracing();
    let cli = Cli::parse();
    match execute(cli, &mut io::stdout().lock()) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {err}");
            1
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // A second init (tests calling `run` twice) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Run a parsed command, writing JSON to `out`.
pub fn execute(cli: Cli, out: &mut impl Write) -> CliResult<()> {
    let config = RankConfig::from_env();
    match cli.command {
        Commands::Score {
            file,
            preferred,
            best_only,
        } => {
            let config = score_config(config, preferred.as_deref(), best_only)?;
            let records = read_records(&file)?;
            let scored = score_records(records, &config);
            Ok(write_json(out, &scored)?)
        }
        Commands::Group { file } => {
            let records = read_records(&file)?;
            let grouped = group_records(&records, &config)?;
            Ok(write_json(out, &grouped)?)
        }
    }
}

fn score_config(
    mut config: RankConfig,
    preferred: Option<&str>,
    best_only: bool,
) -> CliResult<RankConfig> {
    if let Some(raw) = preferred {
        let ids = parse_id_list(raw);
        if ids.is_empty() && !raw.trim().is_empty() {
            return Err(CliError::InvalidArgument(format!(
                "--preferred expects comma-separated source ids, got {raw:?}"
            )));
        }
        config.preferred_sources = ids;
    }
    if best_only {
        config.with_all_matches = false;
    }
    Ok(config)
}

/// Finalize every record in input order.
#[must_use]
pub fn score_records(mut records: Vec<MatchRecord>, config: &RankConfig) -> Vec<MatchRecord> {
    for record in &mut records {
        finalize(record, config);
    }
    tracing::info!(records = records.len(), "scored records");
    records
}

/// Group every record in input order; the first failing record aborts.
pub fn group_records(
    records: &[MatchRecord],
    config: &RankConfig,
) -> CliResult<Vec<GroupedRecord>> {
    let grouped = records
        .iter()
        .map(|record| {
            Ok(GroupedRecord {
                input_id: record.input_id.clone(),
                groups: name_to_lexical_groups(record, config)?,
            })
        })
        .collect::<CliResult<Vec<_>>>()?;
    tracing::info!(records = grouped.len(), "grouped records");
    Ok(grouped)
}

fn read_records(path: &Path) -> RankResult<Vec<MatchRecord>> {
    let raw = if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)?
    };
    let records: Vec<MatchRecord> = serde_json::from_str(&raw)?;
    tracing::debug!(path = %path.display(), records = records.len(), "read input");
    Ok(records)
}

fn write_json<T: Serialize>(out: &mut impl Write, value: &T) -> RankResult<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
