use clap::Args;
use serde_json::{json, Value};
use std::path::PathBuf;

use deal_checker_core::analytics;

/// Arguments for the analytics counter store
#[derive(Args)]
pub struct AnalyticsArgs {
    /// Path to the analytics counter file
    #[arg(long, value_name = "FILE")]
    pub file: PathBuf,

    /// Reset the counters instead of printing them
    #[arg(long)]
    pub clear: bool,
}

pub fn run_analytics(args: AnalyticsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    if args.clear {
        analytics::clear(&args.file)?;
        return Ok(json!({ "cleared": true }));
    }

    let data = analytics::load(&args.file)?;
    Ok(serde_json::to_value(data)?)
}
