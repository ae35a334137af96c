use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::acquisition::AcquisitionInputs;

pub const DEFAULT_SCENARIO_NAME: &str = "Scenario";
pub const MAX_NAME_CHARS: usize = 120;

/// A saved acquisition, as stored by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub id: String,
    #[serde(default = "default_name", deserialize_with = "scenario_name")]
    pub name: String,
    /// Unix epoch when missing or unreadable
    #[serde(
        default = "epoch",
        alias = "createdAt",
        deserialize_with = "created_at"
    )]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub inputs: AcquisitionInputs,
}

impl Scenario {
    pub fn new(id: impl Into<String>, name: &str, inputs: AcquisitionInputs) -> Self {
        Self {
            id: id.into(),
            name: sanitize_name(name),
            created_at: Utc::now(),
            inputs,
        }
    }
}

/// Empty names fall back to the default; long ones are cut at 120 characters.
pub fn sanitize_name(raw: &str) -> String {
    if raw.is_empty() {
        return DEFAULT_SCENARIO_NAME.to_string();
    }
    raw.chars().take(MAX_NAME_CHARS).collect()
}

fn default_name() -> String {
    DEFAULT_SCENARIO_NAME.to_string()
}

fn epoch() -> DateTime<Utc> {
    DateTime::UNIX_EPOCH
}

fn scenario_name<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    let value = serde_json::Value::deserialize(d)?;
    Ok(match value {
        serde_json::Value::String(s) => sanitize_name(&s),
        serde_json::Value::Number(n) => sanitize_name(&n.to_string()),
        _ => default_name(),
    })
}

/// RFC 3339 strings or epoch milliseconds.
fn created_at<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
    let value = serde_json::Value::deserialize(d)?;
    let parsed = match value {
        serde_json::Value::String(s) => DateTime::parse_from_rfc3339(s.trim())
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        serde_json::Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    };
    Ok(parsed.unwrap_or_else(epoch))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults_when_missing() {
        let s: Scenario = serde_json::from_str(r#"{"inputs": {"monthly_rent": "750"}}"#).unwrap();
        assert_eq!(s.name, "Scenario");
        assert_eq!(s.id, "");
        assert_eq!(s.created_at, DateTime::UNIX_EPOCH);
        assert_eq!(s.inputs.monthly_rent, dec!(750));
    }

    #[test]
    fn test_name_truncated() {
        let long = "x".repeat(200);
        let json = format!(r#"{{"id": "a", "name": "{long}"}}"#);
        let s: Scenario = serde_json::from_str(&json).unwrap();
        assert_eq!(s.name.chars().count(), 120);
    }

    #[test]
    fn test_null_and_empty_name() {
        let s: Scenario = serde_json::from_str(r#"{"name": null}"#).unwrap();
        assert_eq!(s.name, "Scenario");
        let s: Scenario = serde_json::from_str(r#"{"name": ""}"#).unwrap();
        assert_eq!(s.name, "Scenario");
    }

    #[test]
    fn test_created_at_forms() {
        let s: Scenario =
            serde_json::from_str(r#"{"created_at": "2026-01-15T10:00:00Z"}"#).unwrap();
        assert_eq!(s.created_at.to_rfc3339(), "2026-01-15T10:00:00+00:00");

        let s: Scenario = serde_json::from_str(r#"{"createdAt": 1000}"#).unwrap();
        assert_eq!(s.created_at.timestamp_millis(), 1000);

        let s: Scenario = serde_json::from_str(r#"{"created_at": "yesterday"}"#).unwrap();
        assert_eq!(s.created_at, DateTime::UNIX_EPOCH);
    }

    #[test]
    fn test_new_sanitizes_name() {
        let s = Scenario::new("id-1", "", AcquisitionInputs::default());
        assert_eq!(s.name, "Scenario");
    }
}
