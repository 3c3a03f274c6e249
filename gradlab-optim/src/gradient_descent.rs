use gradlab_core::nn::Parameter;
use gradlab_core::NoGradGuard;

use crate::error::OptimError;
use crate::optimizer::{validate_learning_rate, validate_params, Optimizer};

/// Plain gradient descent: `x ← x − lr·∇x`.
#[derive(Debug)]
pub struct GradientDescent {
    params: Vec<Parameter>,
    lr: f64,
}

impl GradientDescent {
    /// # Errors
    /// `EmptyParameterList` if `params` is empty, `InvalidHyperparameter`
    /// if `lr` is not positive and finite.
    pub fn new(params: impl IntoIterator<Item = Parameter>, lr: f64) -> Result<Self, OptimError> {
        validate_learning_rate(lr)?;
        let params = validate_params(params.into_iter().collect())?;
        Ok(GradientDescent { params, lr })
    }
}

impl Optimizer for GradientDescent {
    fn step(&mut self) -> Result<(), OptimError> {
        // Parameter updates are not part of any graph.
        let _guard = NoGradGuard::new();
        for param in &self.params {
            if let Some(grad) = param.grad() {
                param.sub_scaled_(&grad, self.lr)?;
            }
        }
        Ok(())
    }

    fn params(&self) -> &[Parameter] {
        &self.params
    }

    fn learning_rate(&self) -> f64 {
        self.lr
    }

    fn set_learning_rate(&mut self, lr: f64) -> Result<(), OptimError> {
        validate_learning_rate(lr)?;
        self.lr = lr;
        Ok(())
    }
}

#[cfg(test)]
#[path = "gradient_descent_test.rs"]
mod tests;
