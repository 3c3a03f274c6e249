use gradlab_core::nn::{Module, Parameter};
use gradlab_core::{GradLabError, Tensor};

use super::frozen_parameter;
use crate::error::OptimError;

/// The isotropic bowl `½·c·‖p − m‖²`.
///
/// Gradient descent with step `lr` contracts the distance to `m` by
/// `|1 − lr·c|` per step, which makes it the reference case for checking
/// the optimizers.
#[derive(Debug, Clone)]
pub struct Quadratic {
    curvature: Parameter,
    minimum: Parameter,
}

impl Quadratic {
    /// # Errors
    /// `InvalidHyperparameter` unless `curvature` is positive and finite.
    pub fn new(curvature: f64, minimum: &[f64]) -> Result<Self, OptimError> {
        if !curvature.is_finite() || curvature <= 0.0 {
            return Err(OptimError::invalid(
                "curvature",
                curvature,
                "curvature must be positive and finite",
            ));
        }
        Ok(Quadratic {
            curvature: frozen_parameter(vec![curvature], vec![], "curvature")?,
            minimum: frozen_parameter(minimum.to_vec(), vec![minimum.len()], "minimum")?,
        })
    }

    pub fn curvature(&self) -> &Parameter {
        &self.curvature
    }

    pub fn minimum(&self) -> &Parameter {
        &self.minimum
    }
}

impl Module for Quadratic {
    fn forward(&self, input: &Tensor) -> Result<Tensor, GradLabError> {
        input
            .sub(&self.minimum)?
            .pow_scalar(2.0)?
            .sum()?
            .mul(&self.curvature)?
            .mul_scalar(0.5)
    }

    fn parameters(&self) -> Vec<&Parameter> {
        vec![&self.curvature, &self.minimum]
    }

    fn named_parameters(&self) -> Vec<(String, &Parameter)> {
        vec![
            ("curvature".to_string(), &self.curvature),
            ("minimum".to_string(), &self.minimum),
        ]
    }
}
