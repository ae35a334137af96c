use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use rentium_core::acquisition::{loan_schedule, AcquisitionInputs};

use crate::input;

/// Arguments for a loan amortization table
#[derive(Args)]
pub struct ScheduleArgs {
    /// Path to a JSON or YAML acquisition record (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount borrowed
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent
    #[arg(long, default_value = "0")]
    pub rate: Decimal,

    /// Loan term in years
    #[arg(long, default_value = "20")]
    pub years: u32,

    /// Borrower insurance, percent of the loan per year
    #[arg(long, default_value = "0")]
    pub insurance_rate: Decimal,
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let inputs: AcquisitionInputs = match input::load(args.input.as_deref())? {
        Some(inputs) => inputs,
        None => {
            let principal = args
                .principal
                .ok_or("--principal is required (or provide --input)")?;
            // a loan is modelled as an acquisition financed without down payment
            AcquisitionInputs {
                purchase_price: principal,
                loan_years: args.years,
                interest_rate: args.rate,
                insurance_rate: args.insurance_rate,
                ..Default::default()
            }
        }
    };

    let schedule = loan_schedule(&inputs);
    Ok(serde_json::json!({ "result": schedule }))
}
