use clap::Args;
use serde::Deserialize;
use serde_json::Value;

use rentium_core::acquisition::ProSettings;
use rentium_core::scenarios::{compare_scenarios, Scenario};

use crate::input;
use crate::plan::{Plan, PLAN_ENV};

/// Arguments for a side-by-side scenario comparison
#[derive(Args)]
pub struct CompareArgs {
    /// Path to a JSON or YAML document: `{scenarios: [...], settings: {...}}`
    #[arg(long)]
    pub input: Option<String>,

    /// Plan tier; comparison needs essential or pro
    #[arg(long, env = PLAN_ENV, value_enum, default_value = "free")]
    pub plan: Plan,
}

#[derive(Deserialize)]
struct CompareRequest {
    scenarios: Vec<Scenario>,
    #[serde(default)]
    settings: ProSettings,
}

pub fn run_compare(args: CompareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    if !args.plan.allows_compare() {
        return Err("scenario comparison requires the essential or pro plan".into());
    }

    let request: CompareRequest = input::load(args.input.as_deref())?
        .ok_or("--input <file> or stdin required for compare")?;

    let result = compare_scenarios(&request.scenarios, &request.settings)?;
    Ok(serde_json::to_value(result)?)
}
