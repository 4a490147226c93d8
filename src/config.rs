use crate::error::Result;
use crate::montecarlo::{DistributionSpec, McParam};
use crate::params::{Gender, Params, SkillLevel, TimeUseRow, WageRow, base_annual_value};
use crate::policy::Policy;
use crate::scenarios::{Scenario, ScenarioOverride};
use crate::types::ParamField;

/// Reference-run seed. Every randomized behavior in the pipeline derives
/// from this one integer; re-running with the same seed and inputs must
/// reproduce identical output tables.
pub const RANDOM_SEED: u64 = 20_250_901;

pub const MC_ITERATIONS: usize = 10_000;

// ── Discount rate build-up (annual, decimal) ─────────────────────────────────

/// 10-year Government Securities yield.
pub const RISK_FREE_RATE: f64 = 0.072;
/// Average CPI inflation 2020-2025.
pub const INFLATION_PREMIUM: f64 = 0.024;
/// Additional household risk.
pub const HOUSEHOLD_RISK_PREMIUM: f64 = 0.010;
/// 10.60%.
pub const DISCOUNT_RATE: f64 = RISK_FREE_RATE + INFLATION_PREMIUM + HOUSEHOLD_RISK_PREMIUM;

// ── Growth rate build-up (annual, decimal) ───────────────────────────────────

/// ASI wage growth 2015-2024.
pub const WAGE_GROWTH_ASI: f64 = 0.062;
/// EPFO payroll growth 2020-2025.
pub const WAGE_GROWTH_EPFO: f64 = 0.058;
pub const CONSERVATIVE_ADJUSTMENT: f64 = -0.002;
/// 6.00%.
pub const GROWTH_RATE: f64 =
    (WAGE_GROWTH_ASI + WAGE_GROWTH_EPFO) / 2.0 + CONSERVATIVE_ADJUSTMENT;

/// Average marriage duration, years.
pub const TIME_HORIZON_YEARS: u32 = 55;

/// Adjustment for unmeasured mental load (20% premium on hours).
pub const EMOTIONAL_LABOR_PREMIUM: f64 = 0.20;

// ── Lifecycle cost (one-off, ₹) ──────────────────────────────────────────────

/// Wedding, dowry-adjacent transfers and early-marriage setup costs, taken
/// as a single lump.
pub const LIFECYCLE_COST_LUMP: f64 = 5_000_000.0;
/// Relative uncertainty on the lump under Monte Carlo.
pub const LIFECYCLE_COST_STD_FRACTION: f64 = 0.15;
/// Year after marriage at which the lump is incurred.
pub const LIFECYCLE_DISCOUNT_YEAR: u32 = 3;

// ── Policy scenario constants ────────────────────────────────────────────────

/// Wage growth assumed for female-dominated sectors under the progressive
/// wage growth scenario.
pub const POLICY_FEMALE_GROWTH_RATE: f64 = 0.08;
/// Reduction in unpaid hours under the care infrastructure scenario.
pub const CARE_INFRASTRUCTURE_HOUR_REDUCTION: f64 = 0.30;
/// One-off asset transfer to the non-earning partner, received at the
/// lifecycle year.
pub const POLICY_ASSET_TRANSFER: f64 = 1_500_000.0;

/// A named plausibility band the reference run's outputs are checked
/// against. The bands are wide; they catch regressions in the derivation
/// chain, not stochastic wobble.
#[derive(Debug, Clone, Copy)]
pub struct ExpectedRange {
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
}

/// The full canonical study configuration: financial constants, survey
/// tables, scenario set, sensitivity grids, Monte Carlo distributions and
/// policy counterfactuals. Mirrors the reference run exactly.
pub struct StudyConfig {
    pub seed: u64,
    pub iterations: usize,
    pub discount_rate: f64,
    pub growth_rate: f64,
    pub horizon_years: u32,
    pub emotional_labor_premium: f64,
    pub time_use: Vec<TimeUseRow>,
    pub wages: Vec<WageRow>,
    pub scenarios: Vec<Scenario>,
    pub discount_grid: Vec<f64>,
    pub growth_grid: Vec<f64>,
    pub hours_grid: Vec<f64>,
    pub wage_grid: Vec<f64>,
    pub mc_params: Vec<McParam>,
    pub policies: Vec<Policy>,
    pub expected_ranges: Vec<ExpectedRange>,
}

impl StudyConfig {
    pub fn canonical() -> Self {
        // Time Use Survey 2019, minutes per day by gender.
        let time_use = vec![
            TimeUseRow { activity: "food_preparation", female_minutes: 98.0, male_minutes: 12.0 },
            TimeUseRow { activity: "serving_food", female_minutes: 28.0, male_minutes: 3.0 },
            TimeUseRow { activity: "cleanup_meals", female_minutes: 34.0, male_minutes: 2.0 },
            TimeUseRow { activity: "cleaning_dwelling", female_minutes: 66.0, male_minutes: 8.0 },
            TimeUseRow { activity: "care_textiles", female_minutes: 30.0, male_minutes: 3.0 },
            TimeUseRow { activity: "gardening", female_minutes: 8.0, male_minutes: 4.0 },
            TimeUseRow { activity: "shopping", female_minutes: 30.0, male_minutes: 12.0 },
            TimeUseRow { activity: "childcare", female_minutes: 62.0, male_minutes: 18.0 },
            TimeUseRow { activity: "teaching_children", female_minutes: 15.0, male_minutes: 4.0 },
            TimeUseRow { activity: "adult_care", female_minutes: 35.0, male_minutes: 14.0 },
            TimeUseRow { activity: "other_domestic", female_minutes: 35.0, male_minutes: 14.0 },
        ];

        // Market replacement wages, ₹ per hour, keyed to the same activities.
        let wages = vec![
            WageRow { activity: "food_preparation", hourly_rate: 25.0, skill_level: SkillLevel::Skilled },
            WageRow { activity: "serving_food", hourly_rate: 15.0, skill_level: SkillLevel::Basic },
            WageRow { activity: "cleanup_meals", hourly_rate: 20.0, skill_level: SkillLevel::Basic },
            WageRow { activity: "cleaning_dwelling", hourly_rate: 20.0, skill_level: SkillLevel::Basic },
            WageRow { activity: "care_textiles", hourly_rate: 18.0, skill_level: SkillLevel::Basic },
            WageRow { activity: "gardening", hourly_rate: 12.0, skill_level: SkillLevel::Basic },
            WageRow { activity: "shopping", hourly_rate: 15.0, skill_level: SkillLevel::Basic },
            WageRow { activity: "childcare", hourly_rate: 30.0, skill_level: SkillLevel::Skilled },
            WageRow { activity: "teaching_children", hourly_rate: 30.0, skill_level: SkillLevel::Skilled },
            WageRow { activity: "adult_care", hourly_rate: 28.0, skill_level: SkillLevel::Specialised },
            WageRow { activity: "other_domestic", hourly_rate: 15.0, skill_level: SkillLevel::Basic },
        ];

        let scenarios = vec![
            Scenario::new("baseline", ScenarioOverride::default()),
            Scenario::new(
                "conservative",
                ScenarioOverride {
                    growth_rate: Some(0.0),
                    discount_rate: Some(0.12),
                    ..Default::default()
                },
            ),
            Scenario::new(
                "optimistic",
                ScenarioOverride {
                    growth_rate: Some(0.08),
                    discount_rate: Some(0.08),
                    ..Default::default()
                },
            ),
        ];

        let mc_params = vec![
            McParam::banded(
                ParamField::DiscountRate,
                DistributionSpec::Normal { mean: DISCOUNT_RATE, std_dev: 0.015 },
                0.05,
                0.15,
            ),
            McParam::banded(
                ParamField::GrowthRate,
                DistributionSpec::Normal { mean: GROWTH_RATE, std_dev: 0.012 },
                0.02,
                0.10,
            ),
            McParam::banded(
                ParamField::HoursMultiplier,
                DistributionSpec::Normal { mean: 1.0, std_dev: 0.10 },
                0.70,
                1.30,
            ),
            McParam::banded(
                ParamField::WageMultiplier,
                DistributionSpec::Normal { mean: 1.0, std_dev: 0.10 },
                0.80,
                1.30,
            ),
            McParam::banded(
                ParamField::LifecycleCost,
                DistributionSpec::Normal {
                    mean: LIFECYCLE_COST_LUMP,
                    std_dev: LIFECYCLE_COST_STD_FRACTION * LIFECYCLE_COST_LUMP,
                },
                0.5 * LIFECYCLE_COST_LUMP,
                1.5 * LIFECYCLE_COST_LUMP,
            ),
        ];

        let policies = vec![
            Policy {
                name: "progressive_wage_growth",
                adjust: |p| p.with(ParamField::GrowthRate, POLICY_FEMALE_GROWTH_RATE),
            },
            Policy {
                name: "care_infrastructure",
                adjust: |p| {
                    p.with(
                        ParamField::HoursMultiplier,
                        p.hours_multiplier * (1.0 - CARE_INFRASTRUCTURE_HOUR_REDUCTION),
                    )
                },
            },
            Policy {
                name: "household_risk_premium_removed",
                adjust: |p| {
                    p.with(ParamField::DiscountRate, p.discount_rate - HOUSEHOLD_RISK_PREMIUM)
                },
            },
            Policy {
                name: "asset_transfer",
                adjust: |p| {
                    p.with(ParamField::LifecycleCost, p.lifecycle_cost - POLICY_ASSET_TRANSFER)
                },
            },
        ];

        StudyConfig {
            seed: RANDOM_SEED,
            iterations: MC_ITERATIONS,
            discount_rate: DISCOUNT_RATE,
            growth_rate: GROWTH_RATE,
            horizon_years: TIME_HORIZON_YEARS,
            emotional_labor_premium: EMOTIONAL_LABOR_PREMIUM,
            time_use,
            wages,
            scenarios,
            discount_grid: vec![0.05, 0.07, 0.08, DISCOUNT_RATE, 0.12, 0.14],
            growth_grid: vec![0.00, 0.03, GROWTH_RATE, 0.08],
            hours_grid: vec![0.70, 0.80, 0.90, 1.00, 1.10, 1.20, 1.30],
            wage_grid: vec![0.75, 0.85, 0.90, 1.00, 1.10, 1.15, 1.25],
            mc_params,
            policies,
            expected_ranges: vec![
                ExpectedRange { name: "baseline_pv_unpaid", min: 620_000.0, max: 720_000.0 },
                ExpectedRange { name: "growth_pv_unpaid", min: 1_300_000.0, max: 1_500_000.0 },
            ],
        }
    }

    /// Derive the engine's base parameter vector from the survey tables.
    /// Table integrity failures surface here, before any valuation runs.
    pub fn base_params(&self) -> Result<Params> {
        let value = base_annual_value(
            &self.time_use,
            &self.wages,
            self.emotional_labor_premium,
            Gender::Female,
        )?;
        let params =
            Params::new(value, self.growth_rate, self.discount_rate, self.horizon_years);
        params.validate()?;
        Ok(params)
    }
}
