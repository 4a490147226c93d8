//! Reference-run validator for the homeval pipeline.
//!
//! Recomputes the canonical study and prints PASS/FAIL per checked property:
//!   [1] golden present value for the documented reference case
//!   [2] discount sweep strictly decreasing
//!   [3] growth sweep strictly increasing
//!   [4] Monte Carlo determinism (bit-identical summaries, same seed)
//!   [5] policy delta identity
//!   [6] recomputed study outputs inside the expected ranges the
//!       configuration carries
//!
//! Exits non-zero if any check fails.

use std::process::ExitCode;

use homeval::config::StudyConfig;
use homeval::montecarlo::simulate;
use homeval::params::Params;
use homeval::policy::evaluate_policies;
use homeval::sensitivity::sweep;
use homeval::types::ParamField;
use homeval::valuation::present_value;

fn status(pass: bool) -> &'static str {
    if pass { "PASS" } else { "FAIL" }
}

fn main() -> ExitCode {
    let config = StudyConfig::canonical();
    let base = match config.base_params() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: cannot derive base parameters — {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut all_pass = true;
    let mut check = |label: &str, pass: bool| {
        println!("  [{}] {label}", status(pass));
        all_pass &= pass;
    };

    println!("=== homeval reference-run validation ===");

    // [1] Golden value: ₹100,000 base, 6.0% growth, 10.6% discount, 55 years.
    let reference = Params::new(100_000.0, 0.06, 0.106, 55);
    let golden = present_value(&reference).unwrap_or(f64::NAN);
    check(
        "golden present value (100k, 6%, 10.6%, 55y) ≈ ₹1,963,765",
        (golden - 1_963_765.0).abs() < 2_000.0,
    );

    // [2] and [3] Sweep monotonicity.
    let discount = sweep(&base, ParamField::DiscountRate, &config.discount_grid);
    check(
        "discount sweep strictly decreasing",
        discount
            .as_ref()
            .map(|s| s.points.windows(2).all(|w| w[1].present_value < w[0].present_value))
            .unwrap_or(false),
    );
    let growth = sweep(&base, ParamField::GrowthRate, &config.growth_grid);
    check(
        "growth sweep strictly increasing",
        growth
            .as_ref()
            .map(|s| s.points.windows(2).all(|w| w[1].present_value > w[0].present_value))
            .unwrap_or(false),
    );

    // [4] Monte Carlo determinism. Reduced draw count; determinism does not
    // depend on the iteration count.
    let a = simulate(&base, &config.mc_params, 2_000, config.seed);
    let b = simulate(&base, &config.mc_params, 2_000, config.seed);
    let deterministic = match (&a, &b) {
        (Ok(a), Ok(b)) => {
            a.mean.to_bits() == b.mean.to_bits()
                && a.std_dev.to_bits() == b.std_dev.to_bits()
                && a.p50.to_bits() == b.p50.to_bits()
        }
        _ => false,
    };
    check("monte carlo bit-identical across runs with the study seed", deterministic);

    // [5] Policy delta identity.
    let policies = evaluate_policies(&base, &config.policies);
    check(
        "policy delta equals adjusted minus baseline",
        policies
            .as_ref()
            .map(|rs| rs.iter().all(|r| r.delta == r.adjusted_pv - r.baseline_pv))
            .unwrap_or(false),
    );

    // [6] Expected ranges carried by the study configuration.
    for range in &config.expected_ranges {
        let value = match range.name {
            "baseline_pv_unpaid" => {
                present_value(&base.with(ParamField::GrowthRate, 0.0)).unwrap_or(f64::NAN)
            }
            "growth_pv_unpaid" => present_value(&base).unwrap_or(f64::NAN),
            other => {
                check(&format!("expected range `{other}` has no computed value"), false);
                continue;
            }
        };
        check(
            &format!(
                "{} = ₹{value:.0} inside expected [₹{:.0}, ₹{:.0}]",
                range.name, range.min, range.max
            ),
            (range.min..=range.max).contains(&value),
        );
    }

    if all_pass {
        println!("All checks PASS");
        ExitCode::SUCCESS
    } else {
        println!("One or more checks FAILED");
        ExitCode::FAILURE
    }
}
