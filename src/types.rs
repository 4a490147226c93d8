use std::str::FromStr;

use serde::Serialize;

use crate::error::ModelError;

/// The float-valued parameters the engine recognises for substitution —
/// sensitivity sweeps vary one of these, Monte Carlo draws sample several.
/// Horizon is deliberately absent: it is an integer year count and is varied
/// through scenario overrides instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamField {
    DiscountRate,
    GrowthRate,
    BaseAnnualValue,
    HoursMultiplier,
    WageMultiplier,
    LifecycleCost,
}

impl ParamField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamField::DiscountRate => "discount_rate",
            ParamField::GrowthRate => "growth_rate",
            ParamField::BaseAnnualValue => "base_annual_value",
            ParamField::HoursMultiplier => "hours_multiplier",
            ParamField::WageMultiplier => "wage_multiplier",
            ParamField::LifecycleCost => "lifecycle_cost",
        }
    }
}

impl FromStr for ParamField {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "discount_rate" => Ok(ParamField::DiscountRate),
            "growth_rate" => Ok(ParamField::GrowthRate),
            "base_annual_value" => Ok(ParamField::BaseAnnualValue),
            "hours_multiplier" => Ok(ParamField::HoursMultiplier),
            "wage_multiplier" => Ok(ParamField::WageMultiplier),
            "lifecycle_cost" => Ok(ParamField::LifecycleCost),
            other => Err(ModelError::UnknownParameter(other.to_string())),
        }
    }
}

impl std::fmt::Display for ParamField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Format a rupee amount with thousands separators, rounded to whole rupees.
/// Matches the study's table convention (₹1,963,765).
pub fn format_rupees(amount: f64) -> String {
    let negative = amount < 0.0;
    let n = amount.abs().round() as u64;
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if negative {
        format!("-₹{out}")
    } else {
        format!("₹{out}")
    }
}
