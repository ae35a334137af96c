//! Plan tiers gate which parts of an analysis the CLI hands out.

use clap::ValueEnum;
use serde_json::Value;

pub const PLAN_ENV: &str = "RENTIUM_PLAN";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum Plan {
    Free,
    Essential,
    Pro,
}

/// Sections of the analysis bundle available on every plan.
const BASE_SECTIONS: [&str; 5] = ["inputs", "settings", "meta", "results", "uncertainty"];

impl Plan {
    pub fn allows_pro_analysis(self) -> bool {
        self == Plan::Pro
    }

    pub fn allows_compare(self) -> bool {
        self >= Plan::Essential
    }
}

/// Drop the pro-only sections of a serialized analysis envelope below the pro plan.
pub fn restrict_analysis(plan: Plan, mut envelope: Value) -> Value {
    if plan.allows_pro_analysis() {
        return envelope;
    }

    if let Some(Value::Object(result)) = envelope.get_mut("result") {
        result.retain(|key, _| BASE_SECTIONS.contains(&key.as_str()));
    }
    if let Some(Value::Array(warnings)) = envelope.get_mut("warnings") {
        warnings.push(Value::String(
            "Fiscal analysis, projection, score and recommendations require the pro plan".into(),
        ));
    }
    envelope
}
