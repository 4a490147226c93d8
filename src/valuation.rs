use crate::error::Result;
use crate::params::Params;

/// Below this gap the closed-form growing-annuity formula is numerically
/// unstable (0/0 at equality), so the limit branch takes over.
pub const RATE_EQUALITY_EPS: f64 = 1e-9;

/// Present value of an annual stream that pays `effective_annual_value` at
/// the end of year 1 and grows geometrically each subsequent year.
///
/// Closed form: PV = V × (1 − ((1+g)/(1+d))ⁿ) / (d − g). When d ≈ g every
/// discounted term collapses to V/(1+d), giving PV = V × n / (1+d).
///
/// A signed lifecycle lump, when present, is discounted back from
/// `lifecycle_year` and subtracted from the annuity stream.
///
/// Referentially transparent; all constraint violations surface as
/// `InvalidParameter` before any arithmetic.
pub fn present_value(params: &Params) -> Result<f64> {
    params.validate()?;

    let v = params.effective_annual_value();
    let g = params.growth_rate;
    let d = params.discount_rate;
    let n = params.horizon_years;

    // validate() caps lifecycle_year at MAX_HORIZON_YEARS, so the i32 cast
    // cannot wrap.
    let lump = params.lifecycle_cost / (1.0 + d).powi(params.lifecycle_year as i32);

    if (d - g).abs() < RATE_EQUALITY_EPS {
        return Ok(v * n as f64 / (1.0 + d) - lump);
    }

    let ratio = (1.0 + g) / (1.0 + d);
    Ok(v * (1.0 - ratio.powi(n as i32)) / (d - g) - lump)
}

/// Year-by-year discounted sum. O(n) and unused by the pipeline; kept as the
/// independent cross-check the closed form is tested against.
#[cfg(test)]
fn present_value_iterative(params: &Params) -> Result<f64> {
    params.validate()?;
    let v = params.effective_annual_value();
    let mut pv = 0.0;
    let mut cash_flow = v;
    let mut discount = 1.0 + params.discount_rate;
    for _ in 0..params.horizon_years {
        pv += cash_flow / discount;
        cash_flow *= 1.0 + params.growth_rate;
        discount *= 1.0 + params.discount_rate;
    }
    pv -= params.lifecycle_cost / (1.0 + params.discount_rate).powi(params.lifecycle_year as i32);
    Ok(pv)
}
