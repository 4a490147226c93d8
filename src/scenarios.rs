use serde::Serialize;

use crate::error::Result;
use crate::params::Params;
use crate::valuation::present_value;

/// Partial parameter override; `None` fields inherit the base unchanged.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ScenarioOverride {
    pub base_annual_value: Option<f64>,
    pub growth_rate: Option<f64>,
    pub discount_rate: Option<f64>,
    pub horizon_years: Option<u32>,
    pub hours_multiplier: Option<f64>,
    pub wage_multiplier: Option<f64>,
    pub lifecycle_cost: Option<f64>,
    pub lifecycle_year: Option<u32>,
}

impl ScenarioOverride {
    /// Merge onto `base`: override wins on every set field, base is untouched.
    pub fn apply(&self, base: &Params) -> Params {
        Params {
            base_annual_value: self.base_annual_value.unwrap_or(base.base_annual_value),
            growth_rate: self.growth_rate.unwrap_or(base.growth_rate),
            discount_rate: self.discount_rate.unwrap_or(base.discount_rate),
            horizon_years: self.horizon_years.unwrap_or(base.horizon_years),
            hours_multiplier: self.hours_multiplier.unwrap_or(base.hours_multiplier),
            wage_multiplier: self.wage_multiplier.unwrap_or(base.wage_multiplier),
            lifecycle_cost: self.lifecycle_cost.unwrap_or(base.lifecycle_cost),
            lifecycle_year: self.lifecycle_year.unwrap_or(base.lifecycle_year),
        }
    }
}

/// A named parameter override set, immutable once defined.
#[derive(Debug, Clone, Serialize)]
pub struct Scenario {
    pub name: String,
    pub overrides: ScenarioOverride,
}

impl Scenario {
    pub fn new(name: impl Into<String>, overrides: ScenarioOverride) -> Self {
        Scenario { name: name.into(), overrides }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    pub name: String,
    pub present_value: f64,
}

/// Value every scenario against the engine. Output order is the declaration
/// order of `scenarios`, never re-sorted.
pub fn run_scenarios(base: &Params, scenarios: &[Scenario]) -> Result<Vec<ScenarioResult>> {
    let mut results = Vec::with_capacity(scenarios.len());
    for scenario in scenarios {
        let params = scenario.overrides.apply(base);
        results.push(ScenarioResult {
            name: scenario.name.clone(),
            present_value: present_value(&params)?,
        });
    }
    Ok(results)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn base() -> Params {
        Params::new(100_000.0, 0.06, 0.106, 55)
    }

    #[test]
    fn empty_override_reproduces_base_exactly() {
        let merged = ScenarioOverride::default().apply(&base());
        assert_eq!(merged, base());
    }

    #[test]
    fn override_wins_only_on_set_fields() {
        let ov = ScenarioOverride { discount_rate: Some(0.08), ..Default::default() };
        let merged = ov.apply(&base());
        assert_eq!(merged.discount_rate, 0.08);
        assert_eq!(merged.growth_rate, base().growth_rate);
        assert_eq!(merged.horizon_years, base().horizon_years);
    }

    #[test]
    fn lifecycle_override_is_merged() {
        let ov = ScenarioOverride {
            lifecycle_cost: Some(5_000_000.0),
            lifecycle_year: Some(5),
            ..Default::default()
        };
        let merged = ov.apply(&base());
        assert_eq!(merged.lifecycle_cost, 5_000_000.0);
        assert_eq!(merged.lifecycle_year, 5);
    }

    #[test]
    fn base_params_are_not_mutated() {
        let b = base();
        let scenarios = vec![Scenario::new(
            "conservative",
            ScenarioOverride { growth_rate: Some(0.0), ..Default::default() },
        )];
        run_scenarios(&b, &scenarios).unwrap();
        assert_eq!(b, base());
    }

    #[test]
    fn output_order_is_declaration_order() {
        let scenarios = vec![
            Scenario::new("baseline", ScenarioOverride::default()),
            Scenario::new(
                "optimistic",
                ScenarioOverride {
                    growth_rate: Some(0.08),
                    discount_rate: Some(0.08),
                    ..Default::default()
                },
            ),
            Scenario::new(
                "conservative",
                ScenarioOverride {
                    growth_rate: Some(0.0),
                    discount_rate: Some(0.12),
                    ..Default::default()
                },
            ),
        ];
        let results = run_scenarios(&base(), &scenarios).unwrap();
        let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["baseline", "optimistic", "conservative"]);
    }

    #[test]
    fn baseline_scenario_matches_direct_engine_call() {
        let scenarios = vec![Scenario::new("baseline", ScenarioOverride::default())];
        let results = run_scenarios(&base(), &scenarios).unwrap();
        let direct = crate::valuation::present_value(&base()).unwrap();
        assert_relative_eq!(results[0].present_value, direct);
    }

    #[test]
    fn invalid_override_propagates_engine_error() {
        let scenarios = vec![Scenario::new(
            "broken",
            ScenarioOverride { discount_rate: Some(-2.0), ..Default::default() },
        )];
        assert!(run_scenarios(&base(), &scenarios).is_err());
    }
}
