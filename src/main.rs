use std::path::{Path, PathBuf};
use std::process::ExitCode;

use homeval::config::StudyConfig;
use homeval::error::ModelError;
use homeval::montecarlo::{SimulationSummary, simulate};
use homeval::policy::evaluate_policies;
use homeval::report;
use homeval::scenarios::run_scenarios;
use homeval::sensitivity::{SweepResult, sweep};
use homeval::types::{ParamField, format_rupees};

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    let mut seed_override: Option<u64> = None;
    let mut iterations_override: Option<usize> = None;
    let mut output_dir: Option<PathBuf> = None;
    let mut quiet = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                seed_override = Some(args[i].parse().expect("--seed requires a u64"));
            }
            "--iterations" => {
                i += 1;
                iterations_override =
                    Some(args[i].parse().expect("--iterations requires a positive integer"));
            }
            "--output-dir" => {
                i += 1;
                output_dir = Some(PathBuf::from(&args[i]));
            }
            "--quiet" => quiet = true,
            _ => {}
        }
        i += 1;
    }

    let config = StudyConfig::canonical();
    let seed = seed_override.unwrap_or(config.seed);
    let iterations = iterations_override.unwrap_or(config.iterations);

    // ── Pipeline: each step runs to completion before the next; a failed
    //    step names itself and halts the remaining steps (fail-fast). ───────
    let base = run_step("parameter-store", || config.base_params());

    let scenario_results = run_step("scenarios", || run_scenarios(&base, &config.scenarios));

    let sweeps: Vec<SweepResult> = run_step("sensitivity", || {
        Ok(vec![
            sweep(&base, ParamField::DiscountRate, &config.discount_grid)?,
            sweep(&base, ParamField::GrowthRate, &config.growth_grid)?,
            sweep(&base, ParamField::HoursMultiplier, &config.hours_grid)?,
            sweep(&base, ParamField::WageMultiplier, &config.wage_grid)?,
        ])
    });

    let mc_summary: SimulationSummary =
        run_step("monte-carlo", || simulate(&base, &config.mc_params, iterations, seed));

    let policy_results = run_step("policy", || evaluate_policies(&base, &config.policies));

    if let Some(ref dir) = output_dir {
        std::fs::create_dir_all(dir).expect("failed to create output directory");
        write_tables(dir, &scenario_results, &sweeps, &mc_summary, &policy_results);
        if !quiet {
            println!("Tables written to {}", dir.display());
        }
    }

    if !quiet {
        println!("Seed {seed}, {iterations} Monte Carlo iterations");
        println!("Base annual value: {}", format_rupees(base.base_annual_value));

        println!("\n=== Scenario results ===");
        for r in &scenario_results {
            println!("  {:<24} {:>16}", r.name, format_rupees(r.present_value));
        }

        println!("\n=== Sensitivity ===");
        for s in &sweeps {
            println!("  {}:", s.field);
            for p in &s.points {
                println!("    {:>8.3}  {:>16}", p.grid_value, format_rupees(p.present_value));
            }
        }

        println!("\n=== Monte Carlo ({} draws) ===", mc_summary.sample_count);
        println!("  mean     {:>16}", format_rupees(mc_summary.mean));
        println!("  std dev  {:>16}", format_rupees(mc_summary.std_dev));
        println!("  p5       {:>16}", format_rupees(mc_summary.p5));
        println!("  p50      {:>16}", format_rupees(mc_summary.p50));
        println!("  p95      {:>16}", format_rupees(mc_summary.p95));

        println!("\n=== Policy scenarios ===");
        for r in &policy_results {
            println!(
                "  {:<32} {:>16}  (Δ {:>16})",
                r.name,
                format_rupees(r.adjusted_pv),
                format_rupees(r.delta)
            );
        }
    }

    ExitCode::SUCCESS
}

/// Run one pipeline step; on failure report which step failed and halt the
/// remaining pipeline (no partial report generation).
fn run_step<T>(name: &str, f: impl FnOnce() -> Result<T, ModelError>) -> T {
    match f() {
        Ok(v) => v,
        Err(e) => {
            eprintln!("step `{name}` failed: {e}");
            std::process::exit(1);
        }
    }
}

fn write_tables(
    dir: &Path,
    scenarios: &[homeval::scenarios::ScenarioResult],
    sweeps: &[SweepResult],
    mc: &SimulationSummary,
    policies: &[homeval::policy::PolicyResult],
) {
    report::write_scenarios_csv(&dir.join("scenario_results.csv"), scenarios)
        .expect("failed to write scenario_results.csv");
    report::write_sensitivity_csv(&dir.join("sensitivity_results.csv"), sweeps)
        .expect("failed to write sensitivity_results.csv");
    report::write_mc_summary_csv(&dir.join("monte_carlo_summary.csv"), mc)
        .expect("failed to write monte_carlo_summary.csv");
    report::write_policies_csv(&dir.join("policy_results.csv"), policies)
        .expect("failed to write policy_results.csv");
    report::write_mc_samples_ndjson(&dir.join("monte_carlo_samples.ndjson"), &mc.samples)
        .expect("failed to write monte_carlo_samples.ndjson");
}
