use gradlab_core::nn::Parameter;

use crate::error::OptimError;

/// Common interface of the hand-written optimizers.
///
/// An optimizer owns shallow handles to the parameters it updates. The
/// usual cycle is `zero_grad`, forward, `backward`, `step`.
pub trait Optimizer {
    /// Applies one update to every parameter that has a gradient.
    ///
    /// Parameters without a gradient are left untouched.
    fn step(&mut self) -> Result<(), OptimError>;

    /// Drops the gradients of all managed parameters.
    fn zero_grad(&mut self) {
        for param in self.params() {
            param.clear_grad();
        }
    }

    fn params(&self) -> &[Parameter];

    fn learning_rate(&self) -> f64;

    fn set_learning_rate(&mut self, lr: f64) -> Result<(), OptimError>;
}

/// `lr` must be strictly positive and finite.
pub(crate) fn validate_learning_rate(lr: f64) -> Result<(), OptimError> {
    if !lr.is_finite() || lr <= 0.0 {
        return Err(OptimError::invalid(
            "lr",
            lr,
            "learning rate must be positive and finite",
        ));
    }
    Ok(())
}

pub(crate) fn validate_params(params: Vec<Parameter>) -> Result<Vec<Parameter>, OptimError> {
    if params.is_empty() {
        return Err(OptimError::EmptyParameterList);
    }
    Ok(params)
}
