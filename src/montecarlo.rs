use rand::SeedableRng;
use rand::distr::Uniform;
use rand_chacha::ChaCha20Rng;
use rand_distr::{Distribution, Normal, Triangular};
use rayon::prelude::*;
use serde::Serialize;

use crate::error::{ModelError, Result};
use crate::params::Params;
use crate::stats::percentile_stats;
use crate::types::ParamField;
use crate::valuation::present_value;

/// Resample attempts allowed per declared parameter per draw before the
/// whole simulation aborts. Dropping draws instead would bias the summary.
pub const RESAMPLE_BUDGET: u32 = 100;

/// Sampling specification for one uncertain parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DistributionSpec {
    Normal { mean: f64, std_dev: f64 },
    Uniform { min: f64, max: f64 },
    Triangular { min: f64, mode: f64, max: f64 },
}

impl DistributionSpec {
    fn sampler(&self) -> Result<Sampler> {
        match *self {
            DistributionSpec::Normal { mean, std_dev } => {
                let dist = Normal::new(mean, std_dev).map_err(|_| {
                    ModelError::InvalidParameter {
                        name: "normal.std_dev",
                        value: std_dev,
                        reason: "must be finite and non-negative",
                    }
                })?;
                Ok(Sampler::Normal(dist))
            }
            DistributionSpec::Uniform { min, max } => {
                let dist = Uniform::new(min, max).map_err(|_| {
                    ModelError::InvalidParameter {
                        name: "uniform.min",
                        value: min,
                        reason: "must be strictly below max",
                    }
                })?;
                Ok(Sampler::Uniform(dist))
            }
            DistributionSpec::Triangular { min, mode, max } => {
                let dist = Triangular::new(min, max, mode).map_err(|_| {
                    ModelError::InvalidParameter {
                        name: "triangular.mode",
                        value: mode,
                        reason: "requires min <= mode <= max and min < max",
                    }
                })?;
                Ok(Sampler::Triangular(dist))
            }
        }
    }
}

enum Sampler {
    Normal(Normal<f64>),
    Uniform(Uniform<f64>),
    Triangular(Triangular<f64>),
}

impl Sampler {
    fn sample(&self, rng: &mut ChaCha20Rng) -> f64 {
        match self {
            Sampler::Normal(d) => d.sample(rng),
            Sampler::Uniform(d) => d.sample(rng),
            Sampler::Triangular(d) => d.sample(rng),
        }
    }
}

/// One uncertain parameter: which field it perturbs, how it is sampled, and
/// an optional acceptance band (the study's clamp ranges). Draws outside the
/// band are resampled under the same retry budget as engine-constraint
/// violations.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct McParam {
    pub field: ParamField,
    pub distribution: DistributionSpec,
    pub band: Option<(f64, f64)>,
}

impl McParam {
    pub fn new(field: ParamField, distribution: DistributionSpec) -> Self {
        McParam { field, distribution, band: None }
    }

    pub fn banded(field: ParamField, distribution: DistributionSpec, min: f64, max: f64) -> Self {
        McParam { field, distribution, band: Some((min, max)) }
    }
}

/// Summary statistics over the simulated present-value distribution.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationSummary {
    pub sample_count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub p5: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub p95: f64,
    pub min: f64,
    pub max: f64,
    /// Raw valuations in draw order, kept for plotting.
    #[serde(skip)]
    pub samples: Vec<f64>,
}

/// Run the Monte Carlo simulation.
///
/// The draw matrix is generated sequentially from one ChaCha20 generator
/// seeded with `seed`, sampling declared parameters in declaration order, so
/// the draw sequence is a pure function of (declared, iterations, seed) —
/// machine, thread count and wall clock never enter. The valuation pass fans
/// out over rayon only after the matrix is fixed.
pub fn simulate(
    base: &Params,
    declared: &[McParam],
    iterations: usize,
    seed: u64,
) -> Result<SimulationSummary> {
    base.validate()?;
    if iterations == 0 {
        return Err(ModelError::InvalidParameter {
            name: "iterations",
            value: 0.0,
            reason: "must be at least 1",
        });
    }

    let samplers: Vec<(ParamField, Sampler, Option<(f64, f64)>)> = declared
        .iter()
        .map(|p| Ok((p.field, p.distribution.sampler()?, p.band)))
        .collect::<Result<_>>()?;

    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut draws = Vec::with_capacity(iterations);
    for draw_index in 0..iterations {
        let mut params = *base;
        for (field, sampler, band) in &samplers {
            let mut accepted = false;
            for _ in 0..RESAMPLE_BUDGET {
                let value = sampler.sample(&mut rng);
                if let Some((lo, hi)) = band
                    && !(*lo..=*hi).contains(&value)
                {
                    continue;
                }
                let candidate = params.with(*field, value);
                if candidate.validate().is_ok() {
                    params = candidate;
                    accepted = true;
                    break;
                }
            }
            if !accepted {
                return Err(ModelError::SimulationConvergence {
                    draw: draw_index,
                    attempts: RESAMPLE_BUDGET,
                });
            }
        }
        draws.push(params);
    }

    // Every draw already passed validation, so valuation errors cannot occur
    // here; propagate anyway rather than assert.
    let samples: Vec<f64> =
        draws.par_iter().map(present_value).collect::<Result<Vec<f64>>>()?;

    let mut sorted = samples.clone();
    // iterations >= 1, so the slice is non-empty.
    let stats = percentile_stats(&mut sorted).unwrap();

    Ok(SimulationSummary {
        sample_count: stats.n,
        mean: stats.mean,
        std_dev: stats.std_dev,
        p5: stats.p5,
        p25: stats.p25,
        p50: stats.p50,
        p75: stats.p75,
        p95: stats.p95,
        min: stats.min,
        max: stats.max,
        samples,
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn base() -> Params {
        Params::new(100_000.0, 0.06, 0.106, 55)
    }

    fn study_distributions() -> Vec<McParam> {
        vec![
            McParam::banded(
                ParamField::DiscountRate,
                DistributionSpec::Normal { mean: 0.106, std_dev: 0.015 },
                0.05,
                0.15,
            ),
            McParam::banded(
                ParamField::GrowthRate,
                DistributionSpec::Normal { mean: 0.06, std_dev: 0.012 },
                0.02,
                0.10,
            ),
            McParam::banded(
                ParamField::HoursMultiplier,
                DistributionSpec::Normal { mean: 1.0, std_dev: 0.10 },
                0.70,
                1.30,
            ),
        ]
    }

    #[test]
    fn same_seed_produces_bit_identical_summaries() {
        let run = || simulate(&base(), &study_distributions(), 2_000, 20_250_901).unwrap();
        let (a, b) = (run(), run());
        assert_eq!(a.mean.to_bits(), b.mean.to_bits());
        assert_eq!(a.std_dev.to_bits(), b.std_dev.to_bits());
        assert_eq!(a.p5.to_bits(), b.p5.to_bits());
        assert_eq!(a.p50.to_bits(), b.p50.to_bits());
        assert_eq!(a.p95.to_bits(), b.p95.to_bits());
        assert_eq!(a.samples, b.samples);
    }

    #[test]
    fn different_seeds_produce_different_samples() {
        let a = simulate(&base(), &study_distributions(), 500, 1).unwrap();
        let b = simulate(&base(), &study_distributions(), 500, 2).unwrap();
        assert_ne!(a.samples, b.samples);
    }

    #[test]
    fn no_declared_parameters_degenerates_to_the_baseline() {
        let summary = simulate(&base(), &[], 100, 7).unwrap();
        let pv = present_value(&base()).unwrap();
        assert_eq!(summary.sample_count, 100);
        assert_relative_eq!(summary.mean, pv, max_relative = 1e-12);
        assert_eq!(summary.std_dev, 0.0);
    }

    #[test]
    fn sample_count_matches_iterations() {
        let summary = simulate(&base(), &study_distributions(), 250, 3).unwrap();
        assert_eq!(summary.sample_count, 250);
        assert_eq!(summary.samples.len(), 250);
    }

    #[test]
    fn uniform_multiplier_mean_converges_to_analytic_expectation() {
        // PV is linear in hours_multiplier, so E[PV] under Uniform(0.8, 1.2)
        // equals PV at the mean multiplier 1.0. With 20k draws the standard
        // error of the mean is ~0.08%, far inside the 1% tolerance.
        let declared = [McParam::new(
            ParamField::HoursMultiplier,
            DistributionSpec::Uniform { min: 0.8, max: 1.2 },
        )];
        let summary = simulate(&base(), &declared, 20_000, 20_250_901).unwrap();
        let expected = present_value(&base()).unwrap();
        assert_relative_eq!(summary.mean, expected, max_relative = 0.01);
    }

    #[test]
    fn lifecycle_lump_sampling_shifts_the_mean_by_its_discounted_expectation() {
        // PV is linear in lifecycle_cost, so sampling the lump around ₹5M
        // lowers E[PV] by exactly 5M discounted from the lifecycle year.
        let declared = [McParam::banded(
            ParamField::LifecycleCost,
            DistributionSpec::Normal { mean: 5_000_000.0, std_dev: 750_000.0 },
            2_500_000.0,
            7_500_000.0,
        )];
        let summary = simulate(&base(), &declared, 20_000, 20_250_901).unwrap();
        let without_lump = present_value(&base()).unwrap();
        let expected_shift = 5_000_000.0 / 1.106_f64.powi(3);
        assert_relative_eq!(
            without_lump - summary.mean,
            expected_shift,
            max_relative = 0.01
        );
    }

    #[test]
    fn acceptance_band_bounds_the_valuation_range() {
        // PV falls as discount rises, so banded discount draws keep every
        // valuation inside [PV(0.15), PV(0.05)].
        let declared = [McParam::banded(
            ParamField::DiscountRate,
            DistributionSpec::Normal { mean: 0.106, std_dev: 0.05 },
            0.05,
            0.15,
        )];
        let summary = simulate(&base(), &declared, 2_000, 11).unwrap();
        let hi = present_value(&base().with(ParamField::DiscountRate, 0.05)).unwrap();
        let lo = present_value(&base().with(ParamField::DiscountRate, 0.15)).unwrap();
        assert!(summary.min >= lo, "min {} below band floor {lo}", summary.min);
        assert!(summary.max <= hi, "max {} above band ceiling {hi}", summary.max);
    }

    #[test]
    fn percentiles_bracket_the_median() {
        let summary = simulate(&base(), &study_distributions(), 5_000, 42).unwrap();
        assert!(summary.p5 <= summary.p25);
        assert!(summary.p25 <= summary.p50);
        assert!(summary.p50 <= summary.p75);
        assert!(summary.p75 <= summary.p95);
        assert!(summary.min <= summary.p5 && summary.p95 <= summary.max);
    }

    #[test]
    fn unsatisfiable_band_exhausts_the_retry_budget() {
        let declared = [McParam::banded(
            ParamField::DiscountRate,
            DistributionSpec::Normal { mean: 0.1, std_dev: 0.001 },
            5.0,
            6.0,
        )];
        let err = simulate(&base(), &declared, 10, 42).unwrap_err();
        assert!(
            matches!(err, ModelError::SimulationConvergence { draw: 0, attempts: RESAMPLE_BUDGET }),
            "got {err:?}"
        );
    }

    #[test]
    fn draws_violating_engine_constraints_are_resampled_then_fatal() {
        // Every draw lands at or below -1, so no retry can ever succeed.
        let declared = [McParam::new(
            ParamField::GrowthRate,
            DistributionSpec::Uniform { min: -1.5, max: -1.4 },
        )];
        let err = simulate(&base(), &declared, 5, 9).unwrap_err();
        assert!(matches!(err, ModelError::SimulationConvergence { .. }), "got {err:?}");
    }

    #[test]
    fn invalid_distribution_parameters_fail_fast() {
        let bad_normal = [McParam::new(
            ParamField::DiscountRate,
            DistributionSpec::Normal { mean: 0.1, std_dev: -1.0 },
        )];
        assert!(matches!(
            simulate(&base(), &bad_normal, 10, 1).unwrap_err(),
            ModelError::InvalidParameter { name: "normal.std_dev", .. }
        ));

        let bad_uniform = [McParam::new(
            ParamField::GrowthRate,
            DistributionSpec::Uniform { min: 0.2, max: 0.1 },
        )];
        assert!(simulate(&base(), &bad_uniform, 10, 1).is_err());

        let bad_triangular = [McParam::new(
            ParamField::WageMultiplier,
            DistributionSpec::Triangular { min: 0.8, mode: 1.5, max: 1.2 },
        )];
        assert!(simulate(&base(), &bad_triangular, 10, 1).is_err());
    }

    #[test]
    fn zero_iterations_is_rejected() {
        let err = simulate(&base(), &study_distributions(), 0, 1).unwrap_err();
        assert!(matches!(err, ModelError::InvalidParameter { name: "iterations", .. }));
    }

    #[test]
    fn triangular_sampling_stays_within_support() {
        let declared = [McParam::new(
            ParamField::WageMultiplier,
            DistributionSpec::Triangular { min: 0.8, mode: 1.0, max: 1.3 },
        )];
        let summary = simulate(&base(), &declared, 2_000, 5).unwrap();
        let pv_lo = present_value(&base().with(ParamField::WageMultiplier, 0.8)).unwrap();
        let pv_hi = present_value(&base().with(ParamField::WageMultiplier, 1.3)).unwrap();
        assert!(summary.min >= pv_lo && summary.max <= pv_hi);
    }
}
