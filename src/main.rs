//! journal-batch - submit spreadsheet journal rows to the accounting API
//!
//! Reads a JSON row table, runs a submission or status refresh, writes the
//! updated table back and prints the report as JSON on stdout.

#![allow(missing_docs)]

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use journal_batch::utils::logging::init_logging;
use journal_batch::{
    BatchSubmitter, CancellationFlag, Config, GraphqlClient, RowTable, StatusSynchronizer,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "journal-batch", version, about)]
struct Cli {
    /// YAML configuration file; environment variables alone are used when omitted
    #[arg(short, long, env = "JOURNAL_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Group, validate and submit every pending Group of the table
    Submit(TableArgs),
    /// Refresh status and warning of rows that carry a document number
    Sync(TableArgs),
}

#[derive(Debug, Args)]
struct TableArgs {
    /// JSON row table
    #[arg(short, long)]
    table: PathBuf,

    /// Where to write the updated table (defaults to overwriting --table)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl TableArgs {
    fn output(&self) -> &Path {
        self.output.as_deref().unwrap_or(&self.table)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        // Run completed, but some Groups or rows did not go through
        Ok(false) => ExitCode::from(2),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<bool> {
    let config = match &cli.config {
        Some(path) => Config::from_file(path).await,
        None => Config::from_env(),
    }
    .context("Failed to load configuration")?;

    init_logging(&config.logging).context("Failed to initialize logging")?;

    let cancel = CancellationFlag::new();
    spawn_interrupt_handler(cancel.clone());

    let client = GraphqlClient::from_config(&config)?;
    info!("Using API endpoint {}", client.endpoint());

    match cli.command {
        Command::Submit(args) => {
            let mut table = load_table(&args.table).await?;
            let report = BatchSubmitter::from_config(client, &config)
                .submit_with_cancel(&mut table, &cancel)
                .await?;
            save_table(&table, args.output()).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(report.is_clean())
        }
        Command::Sync(args) => {
            let mut table = load_table(&args.table).await?;
            let report = StatusSynchronizer::from_config(client, &config)
                .synchronize_with_cancel(&mut table, &cancel)
                .await?;
            save_table(&table, args.output()).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(report.failed == 0 && report.cancelled == 0)
        }
    }
}

fn spawn_interrupt_handler(cancel: CancellationFlag) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted: finishing in-flight submissions, starting no new ones");
            cancel.cancel();
        }
    });
}

async fn load_table(path: &Path) -> Result<RowTable> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read row table {}", path.display()))?;
    let table = RowTable::from_json_str(&content)
        .with_context(|| format!("Failed to parse row table {}", path.display()))?;
    info!("Loaded {} rows from {}", table.len(), path.display());
    Ok(table)
}

/// Write through a sibling temporary file so the table is never left half-written
async fn save_table(table: &RowTable, path: &Path) -> Result<()> {
    let temporary = path.with_extension("json.tmp");
    tokio::fs::write(&temporary, table.to_json_string()?)
        .await
        .with_context(|| format!("Failed to write {}", temporary.display()))?;
    tokio::fs::rename(&temporary, path)
        .await
        .with_context(|| format!("Failed to replace {}", path.display()))?;
    info!("Wrote {} rows to {}", table.len(), path.display());
    Ok(())
}
