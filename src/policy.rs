use serde::Serialize;

use crate::error::Result;
use crate::params::Params;
use crate::valuation::present_value;

/// A named policy counterfactual: a pure transformation over the parameter
/// set. The modeler imposes no business rule of its own — it values the
/// baseline and the adjusted set and reports the difference.
#[derive(Debug, Clone, Copy)]
pub struct Policy {
    pub name: &'static str,
    pub adjust: fn(&Params) -> Params,
}

#[derive(Debug, Clone, Serialize)]
pub struct PolicyResult {
    pub name: String,
    pub baseline_pv: f64,
    pub adjusted_pv: f64,
    pub delta: f64,
}

/// Value `base` and `adjust(base)` and report both plus their exact delta.
pub fn evaluate_policy(
    base: &Params,
    name: &str,
    adjust: impl Fn(&Params) -> Params,
) -> Result<PolicyResult> {
    let baseline_pv = present_value(base)?;
    let adjusted_pv = present_value(&adjust(base))?;
    Ok(PolicyResult {
        name: name.to_string(),
        baseline_pv,
        adjusted_pv,
        delta: adjusted_pv - baseline_pv,
    })
}

/// Evaluate a list of policies in declaration order.
pub fn evaluate_policies(base: &Params, policies: &[Policy]) -> Result<Vec<PolicyResult>> {
    policies.iter().map(|p| evaluate_policy(base, p.name, p.adjust)).collect()
}
