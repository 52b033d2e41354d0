use std::{
    path::{Path, PathBuf},
    time::Instant,
};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use logmon_core::evtc::read_log_file;
use logmon_core::roster::{enrich_and_summarize, RosterTables};

use crate::report::{format_summary, FightSummary, OutputFormat};

/// LogMon - arcdps fight log monitor
///
/// Summarizes team colors, profession composition and squad membership
/// from arcdps EVTC combat logs.
#[derive(Parser, Debug, Clone)]
#[command(name = "logmon", author, version, about, long_about = None)]
pub struct Args {
    /// Uncompressed .evtc log files to summarize
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// JSON file replacing the built-in team/profession lookup tables
    #[arg(long, value_name = "PATH", env = "LOGMON_TABLES")]
    pub tables: Option<PathBuf>,

    /// Output format (text or json)
    #[arg(short, long, default_value = "text", env = "LOGMON_FORMAT")]
    pub format: OutputFormat,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub files: Vec<PathBuf>,
    pub verbose: bool,
    pub tables_path: Option<PathBuf>,
    pub format: OutputFormat,
}

impl From<Args> for AppConfig {
    fn from(value: Args) -> Self {
        Self {
            files: value.files,
            verbose: value.verbose,
            tables_path: value.tables,
            format: value.format,
        }
    }
}

impl AppConfig {
    pub fn load_tables(&self) -> Result<RosterTables> {
        match &self.tables_path {
            Some(path) => RosterTables::from_json_file(path)
                .with_context(|| format!("failed to load lookup tables from {}", path.display())),
            None => Ok(RosterTables::default()),
        }
    }
}

/// Logs go to stderr so stdout carries only the summaries.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn run(config: AppConfig) -> Result<()> {
    let tables = config.load_tables()?;

    info!(
        files = config.files.len(),
        custom_tables = config.tables_path.is_some(),
        "Starting log summary",
    );

    let mut failed = 0usize;
    for path in &config.files {
        match process_log(path, &tables) {
            Ok(summary) => println!("{}", format_summary(&summary, &tables, config.format)),
            Err(err) => {
                error!(path = %path.display(), error = %format!("{err:#}"), "Failed to process log");
                failed += 1;
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} log files failed", failed, config.files.len());
    }
    Ok(())
}

pub fn process_log(path: &Path, tables: &RosterTables) -> Result<FightSummary> {
    let start = Instant::now();
    info!(path = %path.display(), "Starting processing");

    let mut log = read_log_file(path).with_context(|| format!("failed to read {}", path.display()))?;
    info!(
        path = %path.display(),
        agents = log.agents.len(),
        skills = log.skills.len(),
        events = log.events.len(),
        "Parsed log",
    );

    let report = enrich_and_summarize(&mut log.agents, &log.events, tables);
    info!(
        squad_count = report.squad_count,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Processed log",
    );

    Ok(FightSummary {
        file_name: path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string()),
        version: log.header.version,
        agent_count: log.agents.len(),
        skill_count: log.skills.len(),
        event_count: log.events.len(),
        report,
    })
}
