use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use rentium_core::acquisition::normalizer::{apply_average_rates, UnknownField};
use rentium_core::acquisition::{AcquisitionInputs, ProSettings};
use rentium_core::analysis::{self, AnalysisRequest};
use rentium_core::fiscal::TaxMode;

use crate::input;
use crate::plan::{self, Plan, PLAN_ENV};

/// Arguments for a full acquisition analysis
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Path to a JSON or YAML request (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Plan tier; free and essential stop at cashflow and uncertainty
    #[arg(long, env = PLAN_ENV, value_enum, default_value = "free")]
    pub plan: Plan,

    /// Use the 2026 average interest (3.1%) and insurance (0.34%) rates
    #[arg(long)]
    pub average_rates: bool,

    /// Purchase price
    #[arg(long)]
    pub price: Option<Decimal>,

    /// Notary fees
    #[arg(long, default_value = "0")]
    pub notary_fees: Decimal,

    /// Renovation works
    #[arg(long, default_value = "0")]
    pub works: Decimal,

    /// Down payment
    #[arg(long, default_value = "0")]
    pub down_payment: Decimal,

    /// Loan term in years
    #[arg(long, default_value = "20")]
    pub loan_years: u32,

    /// Annual interest rate in percent
    #[arg(long, default_value = "0")]
    pub interest_rate: Decimal,

    /// Borrower insurance, percent of the loan per year
    #[arg(long, default_value = "0")]
    pub insurance_rate: Decimal,

    /// Monthly rent
    #[arg(long)]
    pub rent: Option<Decimal>,

    /// Vacancy in percent (defaults to 8 when omitted)
    #[arg(long)]
    pub vacancy: Option<Decimal>,

    /// Management fee in percent of collected rent (defaults to 7 when omitted)
    #[arg(long)]
    pub management: Option<Decimal>,

    /// Non-recoverable monthly charges (defaults to 110 when omitted)
    #[arg(long)]
    pub charges: Option<Decimal>,

    /// Annual property tax (defaults to 1300 when omitted)
    #[arg(long)]
    pub property_tax: Option<Decimal>,

    /// Annual maintenance budget (defaults to 1000 when omitted)
    #[arg(long)]
    pub maintenance: Option<Decimal>,

    /// Tax regime: lmnp-micro, lmnp-real, nue-micro-foncier, nue-reel-foncier
    #[arg(long, default_value = "lmnp-micro")]
    pub tax_mode: String,

    /// Marginal income tax rate in percent; omit for no tax profile
    #[arg(long)]
    pub marginal_tax_rate: Option<Decimal>,

    /// Projection horizon in years
    #[arg(long, default_value = "20")]
    pub years: u32,
}

pub fn run_analyze(args: AnalyzeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut request: AnalysisRequest = match input::load(args.input.as_deref())? {
        Some(request) => request,
        None => request_from_flags(&args)?,
    };

    if args.average_rates {
        request.inputs = apply_average_rates(&request.inputs);
    }

    tracing::debug!(plan = ?args.plan, unknown = request.unknown_fields.len(), "running analysis");
    let output = analysis::analyze(&request);
    Ok(plan::restrict_analysis(args.plan, serde_json::to_value(output)?))
}

fn request_from_flags(args: &AnalyzeArgs) -> Result<AnalysisRequest, Box<dyn std::error::Error>> {
    let price = args
        .price
        .ok_or("--price is required (or provide --input)")?;
    let rent = args.rent.ok_or("--rent is required (or provide --input)")?;

    let mut unknown_fields = Vec::new();
    let mut known = |value: Option<Decimal>, field: UnknownField| {
        value.unwrap_or_else(|| {
            unknown_fields.push(field);
            Decimal::ZERO
        })
    };

    let inputs = AcquisitionInputs {
        purchase_price: price,
        notary_fees: args.notary_fees,
        works: args.works,
        down_payment: args.down_payment,
        loan_years: args.loan_years,
        interest_rate: args.interest_rate,
        insurance_rate: args.insurance_rate,
        monthly_rent: rent,
        vacancy_rate: known(args.vacancy, UnknownField::VacancyRate),
        management_rate: known(args.management, UnknownField::ManagementRate),
        monthly_charges: known(args.charges, UnknownField::MonthlyCharges),
        property_tax: known(args.property_tax, UnknownField::PropertyTax),
        annual_maintenance: known(args.maintenance, UnknownField::AnnualMaintenance),
    };

    let settings = ProSettings {
        tax_mode: args.tax_mode.parse::<TaxMode>()?,
        marginal_tax_rate: args.marginal_tax_rate,
        projection_years: args.years,
        ..Default::default()
    };

    Ok(AnalysisRequest {
        inputs,
        settings,
        unknown_fields,
    })
}
