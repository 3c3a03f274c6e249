use gradlab_core::nn::Parameter;
use gradlab_core::tensor::zeros_like;
use gradlab_core::{NoGradGuard, Tensor};

use crate::error::OptimError;
use crate::optimizer::{validate_learning_rate, validate_params, Optimizer};

/// Gradient descent with momentum:
///
/// ```text
/// v ← μ·v + ∇x
/// x ← x − lr·v
/// ```
///
/// The velocity of each parameter starts at zero and is created on the
/// first step where that parameter has a gradient.
#[derive(Debug)]
pub struct MomentumGradientDescent {
    params: Vec<Parameter>,
    lr: f64,
    momentum: f64,
    velocities: Vec<Option<Tensor>>,
}

impl MomentumGradientDescent {
    /// # Errors
    /// `EmptyParameterList`, or `InvalidHyperparameter` unless `lr > 0` is
    /// finite and `0 ≤ momentum < 1`.
    pub fn new(
        params: impl IntoIterator<Item = Parameter>,
        lr: f64,
        momentum: f64,
    ) -> Result<Self, OptimError> {
        validate_learning_rate(lr)?;
        if !(0.0..1.0).contains(&momentum) {
            return Err(OptimError::invalid(
                "momentum",
                momentum,
                "momentum must lie in [0, 1)",
            ));
        }
        let params = validate_params(params.into_iter().collect())?;
        let velocities = vec![None; params.len()];
        Ok(MomentumGradientDescent {
            params,
            lr,
            momentum,
            velocities,
        })
    }

    pub fn momentum(&self) -> f64 {
        self.momentum
    }

    /// Velocity of parameter `index`, `None` before its first update.
    pub fn velocity(&self, index: usize) -> Option<&Tensor> {
        self.velocities.get(index).and_then(Option::as_ref)
    }

    /// Forgets all velocities, as if no step had been taken.
    pub fn reset_state(&mut self) {
        self.velocities.iter_mut().for_each(|v| *v = None);
    }
}

impl Optimizer for MomentumGradientDescent {
    fn step(&mut self) -> Result<(), OptimError> {
        let _guard = NoGradGuard::new();
        for (param, velocity) in self.params.iter().zip(self.velocities.iter_mut()) {
            let grad = match param.grad() {
                Some(grad) => grad,
                None => continue,
            };
            if velocity.is_none() {
                *velocity = Some(zeros_like(param)?);
            }
            if let Some(v) = velocity.as_ref() {
                v.mul_scalar_(self.momentum)?;
                v.add_(&grad)?;
                param.sub_scaled_(v, self.lr)?;
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
#[path = "momentum_test.rs"]
mod tests;
