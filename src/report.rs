//! Reporting boundary: formats the compute components' output tables as CSV
//! and NDJSON for the downstream charting scripts. Core results are handed in
//! by value; nothing here feeds back into the engine.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::montecarlo::SimulationSummary;
use crate::policy::PolicyResult;
use crate::scenarios::ScenarioResult;
use crate::sensitivity::SweepResult;

/// One NDJSON row per Monte Carlo draw, for distribution plots.
#[derive(Debug, Serialize)]
struct SampleRow {
    draw: usize,
    present_value: f64,
}

pub fn write_scenarios_csv(path: &Path, results: &[ScenarioResult]) -> io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(w, "scenario_name,present_value")?;
    for r in results {
        writeln!(w, "{},{:.2}", r.name, r.present_value)?;
    }
    w.flush()
}

/// All sweeps in one table, tagged by the varied parameter.
pub fn write_sensitivity_csv(path: &Path, sweeps: &[SweepResult]) -> io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(w, "varied_parameter,grid_value,present_value")?;
    for sweep in sweeps {
        for p in &sweep.points {
            writeln!(w, "{},{},{:.2}", sweep.field, p.grid_value, p.present_value)?;
        }
    }
    w.flush()
}

pub fn write_mc_summary_csv(path: &Path, summary: &SimulationSummary) -> io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(w, "statistic,value")?;
    writeln!(w, "sample_count,{}", summary.sample_count)?;
    writeln!(w, "mean,{:.2}", summary.mean)?;
    writeln!(w, "std_dev,{:.2}", summary.std_dev)?;
    writeln!(w, "min,{:.2}", summary.min)?;
    writeln!(w, "p5,{:.2}", summary.p5)?;
    writeln!(w, "p25,{:.2}", summary.p25)?;
    writeln!(w, "p50,{:.2}", summary.p50)?;
    writeln!(w, "p75,{:.2}", summary.p75)?;
    writeln!(w, "p95,{:.2}", summary.p95)?;
    writeln!(w, "max,{:.2}", summary.max)?;
    w.flush()
}

pub fn write_policies_csv(path: &Path, results: &[PolicyResult]) -> io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(w, "scenario_name,baseline_value,adjusted_value,delta")?;
    for r in results {
        writeln!(w, "{},{:.2},{:.2},{:.2}", r.name, r.baseline_pv, r.adjusted_pv, r.delta)?;
    }
    w.flush()
}

/// Raw Monte Carlo valuations as NDJSON, one row per draw in draw order.
pub fn write_mc_samples_ndjson(path: &Path, samples: &[f64]) -> io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    for (draw, &present_value) in samples.iter().enumerate() {
        let row = SampleRow { draw, present_value };
        serde_json::to_writer(&mut w, &row)?;
        writeln!(w)?;
    }
    w.flush()
}
