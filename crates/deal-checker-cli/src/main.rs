mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::analytics::AnalyticsArgs;
use commands::deal::{EvaluateArgs, ExplainArgs, ValidateArgs};

/// Halal property-investment deal evaluation
#[derive(Parser)]
#[command(
    name = "hdc",
    version,
    about = "Check whether a property deal stacks up under halal financing",
    long_about = "A CLI for evaluating property-investment deals under \
                  sharia-compliant financing. Validates deal inputs, computes \
                  yields, returns, lender coverage and break-even figures, \
                  and delivers a stacks/doesn't-stack verdict."
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
    /// Validate a deal input, then compute the full metrics and verdict
    Evaluate(EvaluateArgs),
    /// Check a deal input for missing or implausible values
    Validate(ValidateArgs),
    /// Explain a sharia-compliant financing method
    Explain(ExplainArgs),
    /// Inspect or reset the financing-method usage counters
    Analytics(AnalyticsArgs),
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
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Evaluate(args) => commands::deal::run_evaluate(args),
        Commands::Validate(args) => commands::deal::run_validate(args),
        Commands::Explain(args) => commands::deal::run_explain(args),
        Commands::Analytics(args) => commands::analytics::run_analytics(args),
        Commands::Version => {
            println!("hdc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
