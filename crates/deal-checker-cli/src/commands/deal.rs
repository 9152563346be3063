use clap::Args;
use colored::Colorize;
use serde_json::{json, Value};
use std::path::PathBuf;

use deal_checker_core::analytics;
use deal_checker_core::deal::types::{DealInput, FinancingMethod, RentFrequency};
use deal_checker_core::deal::{evaluate_deal, validate_deal_input};

use crate::input;

/// Deal parameters shared by the evaluate and validate commands
#[derive(Args)]
pub struct DealInputArgs {
    /// Path to a JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Property purchase price
    #[arg(long)]
    pub purchase_price: Option<f64>,

    /// Expected rent, quoted per --rent-frequency period
    #[arg(long)]
    pub expected_rent: Option<f64>,

    /// Rent quotation frequency (weekly or monthly)
    #[arg(long, default_value = "monthly")]
    pub rent_frequency: RentFrequency,

    /// Upfront equity contribution (financed methods only)
    #[arg(long, default_value_t = 0.0)]
    pub deposit: f64,

    /// Financing method (musharakah, ijara, murabaha, crowdfunding, cash)
    #[arg(long)]
    pub financing_method: Option<FinancingMethod>,

    /// Monthly payment to the financier
    #[arg(long, default_value_t = 0.0)]
    pub monthly_finance_cost: f64,

    /// Monthly insurance, management and similar running costs
    #[arg(long, default_value_t = 0.0)]
    pub monthly_operating_costs: f64,

    /// Expected annual appreciation, percent
    #[arg(long, default_value_t = 0.0)]
    pub annual_appreciation: f64,

    /// Stamp duty
    #[arg(long, default_value_t = 0.0)]
    pub stamp_duty: f64,

    /// Legal fees
    #[arg(long, default_value_t = 0.0)]
    pub legal_fees: f64,

    /// Refurbishment costs
    #[arg(long, default_value_t = 0.0)]
    pub refurb_costs: f64,

    /// Other one-off upfront costs
    #[arg(long, default_value_t = 0.0)]
    pub other_upfront_costs: f64,
}

impl DealInputArgs {
    /// Resolve the deal input from file, piped stdin, or individual flags.
    fn resolve(&self) -> Result<DealInput, Box<dyn std::error::Error>> {
        if let Some(ref path) = self.input {
            input::file::read_input(path)
        } else if let Some(data) = input::stdin::read_stdin()? {
            Ok(serde_json::from_value(data)?)
        } else {
            Ok(DealInput {
                purchase_price: self
                    .purchase_price
                    .ok_or("--purchase-price is required (or provide --input)")?,
                expected_rent: self
                    .expected_rent
                    .ok_or("--expected-rent is required (or provide --input)")?,
                rent_frequency: self.rent_frequency,
                deposit: self.deposit,
                financing_method: self
                    .financing_method
                    .clone()
                    .ok_or("--financing-method is required (or provide --input)")?,
                monthly_finance_cost: self.monthly_finance_cost,
                monthly_operating_costs: self.monthly_operating_costs,
                annual_appreciation: self.annual_appreciation,
                stamp_duty: self.stamp_duty,
                legal_fees: self.legal_fees,
                refurb_costs: self.refurb_costs,
                other_upfront_costs: self.other_upfront_costs,
            })
        }
    }
}

/// Arguments for deal evaluation
#[derive(Args)]
pub struct EvaluateArgs {
    #[command(flatten)]
    pub deal: DealInputArgs,

    /// Evaluate even when validation reports errors
    #[arg(long)]
    pub skip_validation: bool,

    /// Record this calculation in the analytics counter file
    #[arg(long, value_name = "FILE")]
    pub track: Option<PathBuf>,
}

/// Arguments for input validation
#[derive(Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub deal: DealInputArgs,
}

/// Arguments for financing-method explanations
#[derive(Args)]
pub struct ExplainArgs {
    /// Financing method to explain
    pub method: FinancingMethod,
}

pub fn run_evaluate(args: EvaluateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let deal_input = args.deal.resolve()?;

    if !args.skip_validation {
        let errors = validate_deal_input(&deal_input);
        if !errors.is_empty() {
            let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            return Err(format!(
                "input failed validation:\n  {}",
                messages.join("\n  ")
            )
            .into());
        }
    }

    let result = evaluate_deal(&deal_input);

    if let Some(ref path) = args.track {
        // Fire and forget: a broken counter file must not fail the evaluation
        if let Err(e) = analytics::track(path, &deal_input.financing_method) {
            eprintln!(
                "{}: failed to record analytics: {}",
                "warning".yellow().bold(),
                e
            );
        }
    }

    Ok(serde_json::to_value(result)?)
}

pub fn run_validate(args: ValidateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let deal_input = args.deal.resolve()?;
    let errors = validate_deal_input(&deal_input);
    Ok(json!({
        "valid": errors.is_empty(),
        "errors": errors,
    }))
}

pub fn run_explain(args: ExplainArgs) -> Result<Value, Box<dyn std::error::Error>> {
    Ok(json!({
        "method": args.method.as_str(),
        "explanation": args.method.explanation(),
    }))
}
