// In app/src/main.rs

use std::path::PathBuf;

use anyhow::{Context, Result};
use app_config::{ReportFormat, Settings};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use tracing_subscriber::prelude::*;

mod loader;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = "Performance analytics for AI trade recommendations.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Computes the statistics report for a trade ledger export.
    Report {
        /// Path to a JSON array of trade records.
        #[arg(short, long)]
        input: PathBuf,

        /// Reference instant for the trailing windows (RFC 3339). Defaults to now.
        #[arg(long)]
        as_of: Option<String>,

        /// Output format, overriding the configured one ("summary" or "json").
        #[arg(short, long)]
        format: Option<ReportFormat>,
    },

    /// Shows how each trade is classified for performance purposes.
    Classify {
        /// Path to a JSON array of trade records.
        #[arg(short, long)]
        input: PathBuf,
    },
}

// --- Main Application Entry Point ---

fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    // --help and --version must not depend on loadable settings.
    let cli = Cli::parse();

    let settings = app_config::load_settings()?;
    init_tracing(&settings.app.log_level);
    tracing::debug!(environment = %settings.app.environment, "Settings loaded");

    match cli.command {
        Commands::Report { input, as_of, format } => {
            handle_report(&settings, input, as_of, format)?;
        }
        Commands::Classify { input } => {
            handle_classify(input)?;
        }
    }

    Ok(())
}

/// Logs go to stderr so report output on stdout stays machine-readable.
fn init_tracing(log_level: &str) {
    let level = log_level.parse::<tracing::Level>().unwrap_or(tracing::Level::INFO);
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(tracing_subscriber::filter::Targets::new().with_default(level));
    tracing_subscriber::registry().with(fmt_layer).init();
}

// --- "Report" Subcommand Logic ---

fn handle_report(
    settings: &Settings,
    input: PathBuf,
    as_of: Option<String>,
    format: Option<ReportFormat>,
) -> Result<()> {
    let loaded = loader::load_trades(&input)?;
    warn_rejected(&loaded);

    let now = match as_of {
        Some(raw) => DateTime::parse_from_rfc3339(&raw)
            .with_context(|| format!("Invalid --as-of timestamp '{raw}'"))?
            .with_timezone(&Utc),
        None => Utc::now(),
    };
    let report = analytics::calculate_statistics_at(&loaded.trades, now);
    tracing::info!(
        closed = report.closed_trades,
        invalidated = report.invalidated_trades,
        win_rate = report.win_rate,
        "Statistics calculated"
    );

    match format.unwrap_or(settings.report.format) {
        ReportFormat::Summary => print!("{}", report.summary()),
        ReportFormat::Json => {
            let json = if settings.report.pretty_json {
                serde_json::to_string_pretty(&report)?
            } else {
                serde_json::to_string(&report)?
            };
            println!("{json}");
        }
    }
    Ok(())
}

// --- "Classify" Subcommand Logic ---

fn handle_classify(input: PathBuf) -> Result<()> {
    let loaded = loader::load_trades(&input)?;
    warn_rejected(&loaded);

    println!(
        "{:<24} {:<8} {:<12} {:<10} {:<9} {:<11}",
        "ID", "TICKER", "STATUS", "CONFIDENCE", "EXECUTED", "PERFORMANCE"
    );
    for trade in &loaded.trades {
        let performance = if trade.counts_for_performance() {
            format!("{:+.2}%", trade.profit_loss_percentage().unwrap_or_default())
        } else if trade.is_invalidated() {
            "invalidated".to_string()
        } else {
            "-".to_string()
        };
        println!(
            "{:<24} {:<8} {:<12} {:<10} {:<9} {:<11}",
            trade.id,
            trade.ticker,
            trade.status,
            trade.confidence_level(),
            if trade.is_executed() { "yes" } else { "no" },
            performance,
        );
    }
    Ok(())
}

fn warn_rejected(loaded: &loader::LoadedTrades) {
    if loaded.rejected > 0 {
        tracing::warn!(
            rejected = loaded.rejected,
            kept = loaded.trades.len(),
            "Some trade records were invalid and are left out of the output"
        );
    }
}
