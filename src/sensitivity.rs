use serde::Serialize;

use crate::error::Result;
use crate::params::Params;
use crate::types::ParamField;
use crate::valuation::present_value;

/// One grid point of a sweep, in caller-supplied grid order.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SweepPoint {
    pub grid_value: f64,
    pub present_value: f64,
}

/// A completed sweep over one parameter.
#[derive(Debug, Clone, Serialize)]
pub struct SweepResult {
    pub field: ParamField,
    pub points: Vec<SweepPoint>,
}

/// Substitute each grid value for `field` in `base` and revalue.
///
/// Precondition (documented, not validated): callers supply the grid in
/// ascending order; output order follows the grid. Grid values that violate
/// the engine's constraints propagate as errors, never get swallowed.
pub fn sweep(base: &Params, field: ParamField, grid: &[f64]) -> Result<SweepResult> {
    let mut points = Vec::with_capacity(grid.len());
    for &value in grid {
        let params = base.with(field, value);
        points.push(SweepPoint { grid_value: value, present_value: present_value(&params)? });
    }
    Ok(SweepResult { field, points })
}
