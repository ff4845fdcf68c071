//! Ringlens CLI tool.
//!
//! Runs one fraud-ring analysis over a transaction CSV and writes the
//! JSON report.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "ringlens")]
#[command(version, about = "Fraud-ring detection over transaction batches", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a transaction CSV and write the JSON report
    Analyze {
        /// Path to the transaction CSV
        input: PathBuf,

        /// Write the report here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON report
        #[arg(long)]
        pretty: bool,
    },

    /// Print summary counters for a transaction CSV without the full report
    Summary {
        /// Path to the transaction CSV
        input: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Analyze {
            input,
            output,
            pretty,
        } => cmd_analyze(&input, output.as_deref(), pretty),

        Commands::Summary { input } => cmd_summary(&input),
    }
}

fn cmd_analyze(
    input: &std::path::Path,
    output: Option<&std::path::Path>,
    pretty: bool,
) -> anyhow::Result<()> {
    let report = run(input)?;
    let json = if pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };

    match output {
        Some(path) => {
            std::fs::write(path, &json)?;
            tracing::info!(path = %path.display(), bytes = json.len(), "report written");
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_summary(input: &std::path::Path) -> anyhow::Result<()> {
    let report = run(input)?;
    let summary = &report.analysis.summary;

    println!("Accounts analyzed:    {}", summary.total_accounts_analyzed);
    println!("Suspicious accounts:  {}", summary.suspicious_accounts_flagged);
    println!("Fraud rings:          {}", summary.fraud_rings_detected);
    println!("Processing time:      {}s", summary.processing_time_seconds);

    for ring in &report.analysis.fraud_rings {
        println!(
            "  {} [{:>9}] risk {:>5.1}  members: {}",
            ring.ring_id,
            format!("{:?}", ring.pattern_type).to_lowercase(),
            ring.risk_score,
            ring.member_accounts.join(", ")
        );
    }
    Ok(())
}

fn run(input: &std::path::Path) -> anyhow::Result<ringlens_engine::AnalysisReport> {
    let transactions = ringlens_ingest::read_transactions_from_path(input)?;
    tracing::debug!(transactions = transactions.len(), input = %input.display(), "batch loaded");
    let report = ringlens_engine::analyze(&transactions)?;
    Ok(report)
}
