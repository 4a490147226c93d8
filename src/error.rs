use thiserror::Error;

/// Errors raised by the valuation core. All are unrecoverable at the point
/// of computation: callers propagate them to the pipeline step, which aborts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// A numeric parameter violates a documented domain constraint.
    #[error("invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// A parameter name from an input table or CLI is not one the engine knows.
    #[error("unrecognised parameter name `{0}`")]
    UnknownParameter(String),

    /// A single Monte Carlo draw exhausted its resample budget. Fatal for the
    /// whole simulation — silently dropping draws would bias the summary.
    #[error("draw {draw}: no valid parameter vector after {attempts} attempts")]
    SimulationConvergence { draw: usize, attempts: u32 },

    /// Malformed or missing input table, surfaced before any engine call.
    #[error("input table: {0}")]
    DataIntegrity(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_parameter_display_names_the_parameter() {
        let e = ModelError::InvalidParameter {
            name: "discount_rate",
            value: -1.5,
            reason: "must be greater than -1",
        };
        let msg = e.to_string();
        assert!(msg.contains("discount_rate"), "message must name the parameter: {msg}");
        assert!(msg.contains("-1.5"), "message must carry the offending value: {msg}");
    }

    #[test]
    fn convergence_display_carries_draw_index() {
        let e = ModelError::SimulationConvergence { draw: 17, attempts: 100 };
        assert!(e.to_string().contains("17"));
    }
}
