use gradlab_core::GradLabError;
use thiserror::Error;

/// Errors raised by the optimizers and the minimization driver.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptimError {
    #[error("Invalid hyperparameter {name} = {value}: {reason}")]
    InvalidHyperparameter {
        name: String,
        value: f64,
        reason: String,
    },

    #[error("Optimizer created with an empty parameter list")]
    EmptyParameterList,

    #[error("Objective must return a single-element tensor, got shape {shape:?}")]
    NonScalarObjective { shape: Vec<usize> },

    #[error("Loss diverged at iteration {iteration}: {value}")]
    Diverged { iteration: usize, value: f64 },

    #[error("Tensor error: {0}")]
    Tensor(#[from] GradLabError),
}

impl OptimError {
    pub(crate) fn invalid(name: &str, value: f64, reason: &str) -> Self {
        OptimError::InvalidHyperparameter {
            name: name.to_string(),
            value,
            reason: reason.to_string(),
        }
    }
}
