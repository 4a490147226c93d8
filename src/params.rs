use serde::Serialize;

use crate::error::{ModelError, Result};
use crate::types::ParamField;

pub const DAYS_PER_YEAR: f64 = 365.0;
pub const MINUTES_PER_HOUR: f64 = 60.0;

/// Upper bound on year counts. Far beyond any plausible horizon, and keeps
/// the exponent inside `i32` for the closed-form power.
pub const MAX_HORIZON_YEARS: u32 = 1_000;

/// The full parameter vector the Valuation Engine consumes.
///
/// `base_annual_value` is the unadjusted annual replacement value of the
/// labor stream; the two multipliers carry hours- and wage-level uncertainty
/// separately so sweeps and Monte Carlo draws can vary them independently.
/// `lifecycle_cost` is a signed one-off lump incurred at `lifecycle_year`
/// (positive = cost subtracted from the valuation, negative = transfer
/// received); zero in the plain replacement-cost baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Params {
    pub base_annual_value: f64,
    pub growth_rate: f64,
    pub discount_rate: f64,
    pub horizon_years: u32,
    pub hours_multiplier: f64,
    pub wage_multiplier: f64,
    pub lifecycle_cost: f64,
    pub lifecycle_year: u32,
}

impl Params {
    pub fn new(
        base_annual_value: f64,
        growth_rate: f64,
        discount_rate: f64,
        horizon_years: u32,
    ) -> Self {
        Params {
            base_annual_value,
            growth_rate,
            discount_rate,
            horizon_years,
            hours_multiplier: 1.0,
            wage_multiplier: 1.0,
            lifecycle_cost: 0.0,
            lifecycle_year: 3,
        }
    }

    /// Copy with a one-off lump of `cost` (signed) incurred at `year`.
    pub fn with_lifecycle(&self, cost: f64, year: u32) -> Self {
        let mut p = *self;
        p.lifecycle_cost = cost;
        p.lifecycle_year = year;
        p
    }

    /// Annual value in year 1 with both uncertainty multipliers applied.
    pub fn effective_annual_value(&self) -> f64 {
        self.base_annual_value * self.hours_multiplier * self.wage_multiplier
    }

    /// Check every documented domain constraint, failing on the first
    /// violation. Called by the engine before any arithmetic.
    pub fn validate(&self) -> Result<()> {
        check_finite("base_annual_value", self.base_annual_value)?;
        if self.base_annual_value < 0.0 {
            return Err(ModelError::InvalidParameter {
                name: "base_annual_value",
                value: self.base_annual_value,
                reason: "must be non-negative",
            });
        }
        check_finite("growth_rate", self.growth_rate)?;
        if self.growth_rate <= -1.0 {
            return Err(ModelError::InvalidParameter {
                name: "growth_rate",
                value: self.growth_rate,
                reason: "must be greater than -1 (-100%)",
            });
        }
        check_finite("discount_rate", self.discount_rate)?;
        if self.discount_rate <= -1.0 {
            return Err(ModelError::InvalidParameter {
                name: "discount_rate",
                value: self.discount_rate,
                reason: "must be greater than -1 (-100%)",
            });
        }
        if self.horizon_years < 1 {
            return Err(ModelError::InvalidParameter {
                name: "horizon_years",
                value: self.horizon_years as f64,
                reason: "must be at least 1",
            });
        }
        if self.horizon_years > MAX_HORIZON_YEARS {
            return Err(ModelError::InvalidParameter {
                name: "horizon_years",
                value: self.horizon_years as f64,
                reason: "must be at most 1000",
            });
        }
        check_finite("lifecycle_cost", self.lifecycle_cost)?;
        if self.lifecycle_year < 1 || self.lifecycle_year > MAX_HORIZON_YEARS {
            return Err(ModelError::InvalidParameter {
                name: "lifecycle_year",
                value: self.lifecycle_year as f64,
                reason: "must be within 1..=1000",
            });
        }
        for (name, m) in [
            ("hours_multiplier", self.hours_multiplier),
            ("wage_multiplier", self.wage_multiplier),
        ] {
            check_finite(name, m)?;
            if m <= 0.0 {
                return Err(ModelError::InvalidParameter {
                    name,
                    value: m,
                    reason: "must be positive",
                });
            }
        }
        Ok(())
    }

    pub fn get(&self, field: ParamField) -> f64 {
        match field {
            ParamField::DiscountRate => self.discount_rate,
            ParamField::GrowthRate => self.growth_rate,
            ParamField::BaseAnnualValue => self.base_annual_value,
            ParamField::HoursMultiplier => self.hours_multiplier,
            ParamField::WageMultiplier => self.wage_multiplier,
            ParamField::LifecycleCost => self.lifecycle_cost,
        }
    }

    /// Copy with one field substituted. Validation is the engine's job, not
    /// the substitution's — sweeps rely on invalid grid values propagating
    /// out of `present_value`, not being rejected here.
    pub fn with(&self, field: ParamField, value: f64) -> Params {
        let mut p = *self;
        match field {
            ParamField::DiscountRate => p.discount_rate = value,
            ParamField::GrowthRate => p.growth_rate = value,
            ParamField::BaseAnnualValue => p.base_annual_value = value,
            ParamField::HoursMultiplier => p.hours_multiplier = value,
            ParamField::WageMultiplier => p.wage_multiplier = value,
            ParamField::LifecycleCost => p.lifecycle_cost = value,
        }
        p
    }
}

fn check_finite(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ModelError::InvalidParameter { name, value, reason: "must be finite" })
    }
}

// ── Input tables ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillLevel {
    Basic,
    Skilled,
    Specialised,
}

/// One activity row from the time-use survey (minutes per day by gender).
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TimeUseRow {
    pub activity: &'static str,
    pub female_minutes: f64,
    pub male_minutes: f64,
}

/// Market replacement wage for one activity (₹ per hour).
#[derive(Debug, Clone, Copy, Serialize)]
pub struct WageRow {
    pub activity: &'static str,
    pub hourly_rate: f64,
    pub skill_level: SkillLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Female,
    Male,
}

/// Convert daily minutes to annual hours.
pub fn annual_hours(minutes_per_day: f64) -> f64 {
    minutes_per_day * DAYS_PER_YEAR / MINUTES_PER_HOUR
}

/// Derive the base annual replacement value for one gender by pricing each
/// time-use activity at its wage-proxy rate, with the emotional-labor premium
/// applied to hours.
///
/// Every time-use activity must have a wage row; a missing match is a table
/// integrity failure surfaced before any engine call.
pub fn base_annual_value(
    time_use: &[TimeUseRow],
    wages: &[WageRow],
    emotional_labor_premium: f64,
    gender: Gender,
) -> Result<f64> {
    if time_use.is_empty() {
        return Err(ModelError::DataIntegrity("time-use table is empty".to_string()));
    }
    if !(0.0..=0.5).contains(&emotional_labor_premium) {
        return Err(ModelError::InvalidParameter {
            name: "emotional_labor_premium",
            value: emotional_labor_premium,
            reason: "must be within [0, 0.5]",
        });
    }

    let mut total = 0.0;
    for row in time_use {
        let minutes = match gender {
            Gender::Female => row.female_minutes,
            Gender::Male => row.male_minutes,
        };
        if !minutes.is_finite() || minutes < 0.0 {
            return Err(ModelError::DataIntegrity(format!(
                "activity `{}`: minutes/day is {minutes}",
                row.activity
            )));
        }
        let wage = wages
            .iter()
            .find(|w| w.activity == row.activity)
            .ok_or_else(|| {
                ModelError::DataIntegrity(format!(
                    "activity `{}` has no wage-proxy row",
                    row.activity
                ))
            })?;
        if !wage.hourly_rate.is_finite() || wage.hourly_rate < 0.0 {
            return Err(ModelError::DataIntegrity(format!(
                "activity `{}`: hourly rate is {}",
                row.activity, wage.hourly_rate
            )));
        }
        total += annual_hours(minutes) * (1.0 + emotional_labor_premium) * wage.hourly_rate;
    }
    Ok(total)
}
