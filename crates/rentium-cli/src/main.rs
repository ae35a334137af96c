mod commands;
mod input;
mod logging;
mod output;
mod plan;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::analyze::AnalyzeArgs;
use commands::compare::CompareArgs;
use commands::schedule::ScheduleArgs;

/// Rental property acquisition analysis
#[derive(Parser)]
#[command(
    name = "rentium",
    version,
    about = "Rental property acquisition analysis",
    long_about = "Analyse a buy-to-let acquisition with decimal precision: cashflow, \
                  French rental tax regimes, multi-year projection, the Rentium Score \
                  and ranked improvement levers."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyse an acquisition (cashflow, tax, projection, score, recommendations)
    Analyze(AnalyzeArgs),
    /// Print the loan amortization table
    Schedule(ScheduleArgs),
    /// Compare two or three saved scenarios
    Compare(CompareArgs),
    /// List supported tax regimes
    Regimes,
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    logging::setup_logging();
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Analyze(args) => commands::analyze::run_analyze(args),
        Commands::Schedule(args) => commands::schedule::run_schedule(args),
        Commands::Compare(args) => commands::compare::run_compare(args),
        Commands::Regimes => commands::regimes::run_regimes(),
        Commands::Version => {
            println!("rentium {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
