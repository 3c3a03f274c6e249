//! Toy objectives the optimizers are compared on.
//!
//! Each objective is a [`Module`](gradlab_core::nn::Module) whose
//! parameters describe the function's shape (centres, widths, curvature)
//! and whose input is the point being optimized. Their own parameters are
//! frozen, so only the point receives gradients.

pub mod gaussian;
pub mod quadratic;

pub use gaussian::{GaussianBump, GaussianDifference};
pub use quadratic::Quadratic;

use gradlab_core::nn::Parameter;
use gradlab_core::{GradLabError, Tensor};

use crate::error::OptimError;

/// An F64 parameter named `"p"` holding the starting point of a descent.
pub fn point_parameter(start: &[f64]) -> Result<Parameter, OptimError> {
    let tensor = Tensor::new_f64(start.to_vec(), vec![start.len()])?;
    Ok(Parameter::new(tensor, Some("p".to_string()))?)
}

/// Parameter of a fixed-function module, created frozen.
pub(crate) fn frozen_parameter(
    values: Vec<f64>,
    shape: Vec<usize>,
    name: &str,
) -> Result<Parameter, OptimError> {
    let param = Parameter::new(Tensor::new_f64(values, shape)?, Some(name.to_string()))?;
    param.set_requires_grad(false)?;
    Ok(param)
}

/// Reads a `[2]` point out of a tensor.
pub(crate) fn point2(t: &Tensor) -> Result<[f64; 2], OptimError> {
    match t.to_f64_vec().as_slice() {
        [x, y] => Ok([*x, *y]),
        _ => Err(OptimError::Tensor(GradLabError::ShapeMismatch {
            expected: vec![2],
            actual: t.shape(),
            operation: "point2".to_string(),
        })),
    }
}
