//! French rental-income tax regimes.
//!
//! Four regimes, each with its own taxable-base formula:
//! 1. **LMNP micro-BIC** -- 50% of collected rent (flat allowance).
//! 2. **LMNP reel** -- rent minus charges, loan interest and depreciation.
//! 3. **Location nue micro-foncier** -- 70% of collected rent.
//! 4. **Location nue reel foncier** -- rent minus charges and loan interest.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::RentiumError;
use crate::types::Money;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TaxMode {
    #[default]
    LmnpMicro,
    LmnpReal,
    NueMicroFoncier,
    NueReelFoncier,
}

impl TaxMode {
    pub const ALL: [TaxMode; 4] = [
        TaxMode::LmnpMicro,
        TaxMode::LmnpReal,
        TaxMode::NueMicroFoncier,
        TaxMode::NueReelFoncier,
    ];

    /// Stable identifier used in input records and query strings.
    pub fn id(self) -> &'static str {
        match self {
            TaxMode::LmnpMicro => "lmnp-micro",
            TaxMode::LmnpReal => "lmnp-real",
            TaxMode::NueMicroFoncier => "nue-micro-foncier",
            TaxMode::NueReelFoncier => "nue-reel-foncier",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TaxMode::LmnpMicro => "LMNP Micro-BIC",
            TaxMode::LmnpReal => "LMNP Reel",
            TaxMode::NueMicroFoncier => "Location nue Micro-foncier",
            TaxMode::NueReelFoncier => "Location nue Reel foncier",
        }
    }

    /// Lenient parse for externally supplied strings: legacy aliases are mapped
    /// and anything unrecognized falls back to LMNP micro-BIC.
    pub fn normalize(raw: &str) -> TaxMode {
        Self::parse(raw).unwrap_or_default()
    }

    fn parse(raw: &str) -> Option<TaxMode> {
        match raw.trim() {
            "micro" => Some(TaxMode::LmnpMicro),
            "real" => Some(TaxMode::LmnpReal),
            "bare" => Some(TaxMode::NueReelFoncier),
            other => Self::ALL.into_iter().find(|m| m.id() == other),
        }
    }

    /// The reel regime a micro regime can switch to, if any.
    pub fn real_counterpart(self) -> Option<TaxMode> {
        match self {
            TaxMode::LmnpMicro => Some(TaxMode::LmnpReal),
            TaxMode::NueMicroFoncier => Some(TaxMode::NueReelFoncier),
            TaxMode::LmnpReal | TaxMode::NueReelFoncier => None,
        }
    }
}

impl fmt::Display for TaxMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Strict parse: unknown identifiers are rejected.
impl FromStr for TaxMode {
    type Err = RentiumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| RentiumError::InvalidInput {
            field: "tax_mode".into(),
            reason: format!(
                "Unknown tax mode '{}'. Expected one of: lmnp-micro, lmnp-real, \
                 nue-micro-foncier, nue-reel-foncier",
                s.trim()
            ),
        })
    }
}

impl Serialize for TaxMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}

impl<'de> Deserialize<'de> for TaxMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(value.as_str().map(TaxMode::normalize).unwrap_or_default())
    }
}

/// Taxable base for one year under `mode`, never negative.
pub fn taxable_base(
    mode: TaxMode,
    collected_rent: Money,
    operating_charges: Money,
    interest: Money,
    depreciation: Money,
) -> Money {
    let base = match mode {
        TaxMode::LmnpMicro => collected_rent * dec!(0.5),
        TaxMode::LmnpReal => collected_rent
            .saturating_sub(operating_charges)
            .saturating_sub(interest)
            .saturating_sub(depreciation),
        TaxMode::NueMicroFoncier => collected_rent * dec!(0.7),
        TaxMode::NueReelFoncier => collected_rent
            .saturating_sub(operating_charges)
            .saturating_sub(interest),
    };
    base.max(Decimal::ZERO)
}
