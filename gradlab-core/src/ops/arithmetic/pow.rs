use std::sync::Arc;

use crate::autograd::BackwardOp;
use crate::error::GradLabError;
use crate::ops::apply_unary_op;
use crate::ops::arithmetic::mul_op;
use crate::tensor::Tensor;

// --- Forward Operation ---

/// Raises every element to the power `exponent`.
///
/// Floating point only. For `f32` tensors the exponent is narrowed to `f32`.
pub fn pow_scalar_op(a: &Tensor, exponent: f64) -> Result<Tensor, GradLabError> {
    let input = a.clone();
    let saved_input = a.detach();
    let exponent_f32 = exponent as f32;
    apply_unary_op(
        a,
        "pow_scalar_op",
        move |x| x.powf(exponent_f32),
        move |x| x.powf(exponent),
        None,
        move |_| Arc::new(PowScalarBackward {
            input,
            saved_input,
            exponent,
        }),
    )
}

// --- Backward Operation ---

/// d(x^p)/dx = p * x^(p-1).
#[derive(Debug)]
struct PowScalarBackward {
    input: Tensor,
    saved_input: Tensor,
    exponent: f64,
}

impl BackwardOp for PowScalarBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, GradLabError> {
        let local = pow_scalar_op(&self.saved_input, self.exponent - 1.0)?.mul_scalar(self.exponent)?;
        Ok(vec![mul_op(grad_output, &local)?])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.input.clone()]
    }
}

#[cfg(test)]
#[path = "pow_test.rs"]
mod tests;
