//! CLI commands implementation.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::Settings;
use crate::models::load_courts;
use crate::pipeline::{run_week, RunOptions, RunOutcome};
use crate::portal::PortalClient;
use crate::report::{load_filter_terms, CaptionFilter};
use crate::sink::CsvSink;
use crate::state::JsonStateStore;

#[derive(Parser)]
#[command(name = "tablero")]
#[command(about = "Weekly courtroom assignment and case docket acquisition")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the current week and write the sheets
    Run {
        /// Process the week even when the marker says it was already done
        #[arg(short, long)]
        force: bool,
        /// Fetch and aggregate, but write neither sheets nor marker
        #[arg(long)]
        dry_run: bool,
    },
    /// Parse and list the court table (validation aid)
    Courts,
}

/// Parse arguments and dispatch.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Run { force, dry_run } => run_pipeline(&settings, force, dry_run).await,
        Commands::Courts => list_courts(&settings),
    }
}

fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner} {msg}").expect("static progress template"),
    );
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(120));
    bar
}

async fn run_pipeline(settings: &Settings, force: bool, dry_run: bool) -> anyhow::Result<()> {
    let courts = load_courts(&settings.inputs.courts_file)?;
    let terms = load_filter_terms(&settings.inputs.filter_terms_file)?;
    let filter = CaptionFilter::new(&terms)?;

    let client = PortalClient::new(&settings.portal)?;
    let sink = CsvSink::new(&settings.output.directory);
    let state = JsonStateStore::new(&settings.output.state_file);

    let bar = spinner("Consultando el portal...");
    let outcome = run_week(
        &client,
        courts,
        &filter,
        &sink,
        &state,
        RunOptions { force, dry_run },
    )
    .await;
    bar.finish_and_clear();

    match outcome? {
        RunOutcome::Skipped { week_label } => {
            println!(
                "{} {} ya procesada; use --force para repetir",
                style("≡").dim(),
                style(week_label).bold()
            );
        }
        RunOutcome::Completed {
            week_label,
            courts,
            rows,
            filtered,
        } => {
            println!(
                "{} {}: {} cortes, {} filas ({} filtradas){}",
                style("✓").green(),
                style(week_label).bold(),
                courts,
                rows,
                filtered,
                if dry_run {
                    style(" [dry run]").dim().to_string()
                } else {
                    String::new()
                }
            );
        }
    }
    Ok(())
}

fn list_courts(settings: &Settings) -> anyhow::Result<()> {
    let courts = load_courts(&settings.inputs.courts_file)?;
    for court in &courts {
        println!(
            "{:>6}  {}  {}",
            style(&court.code).cyan(),
            style(format!("cond={}", court.condition)).dim(),
            court.name
        );
    }
    println!("{} cortes", courts.len());
    Ok(())
}
