use serde_json::Value;

use super::{result_of, scalar};

/// The headline figure of each document type, by JSON pointer under `result`.
const HEADLINES: [&str; 5] = [
    "/score/total",
    "/results/monthly_cashflow",
    "/best_name",
    "/monthly_payment",
    "/0/id",
];

/// Print just the headline answer.
pub fn print_minimal(value: &Value) {
    println!("{}", headline(result_of(value)));
}

fn headline(result: &Value) -> String {
    HEADLINES
        .iter()
        .filter_map(|pointer| result.pointer(pointer))
        .find(|v| !v.is_null())
        .map(scalar)
        .unwrap_or_else(|| scalar(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_score_preferred_over_cashflow() {
        let doc = json!({"results": {"monthly_cashflow": "-80"}, "score": {"total": "61.5"}});
        assert_eq!(headline(&doc), "61.5");
    }

    #[test]
    fn test_free_plan_falls_back_to_cashflow() {
        let doc = json!({"results": {"monthly_cashflow": "-80"}});
        assert_eq!(headline(&doc), "-80");
    }

    #[test]
    fn test_schedule_payment() {
        let doc = json!({"loan_amount": "100000", "monthly_payment": "585.11"});
        assert_eq!(headline(&doc), "585.11");
    }
}
