use std::sync::Arc;

use crate::autograd::BackwardOp;
use crate::error::GradLabError;
use crate::ops::apply_unary_op;
use crate::ops::arithmetic::div_op;
use crate::tensor::Tensor;

/// Element-wise natural logarithm.
///
/// Non-positive inputs follow IEEE 754 (`-inf` for 0, `NaN` below).
pub fn ln_op(a: &Tensor) -> Result<Tensor, GradLabError> {
    let input = a.clone();
    let saved_input = a.detach();
    apply_unary_op(
        a,
        "ln_op",
        f32::ln,
        f64::ln,
        None,
        move |_| Arc::new(LnBackward { input, saved_input }),
    )
}

/// d(ln x)/dx = 1/x.
#[derive(Debug)]
struct LnBackward {
    input: Tensor,
    saved_input: Tensor,
}

impl BackwardOp for LnBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, GradLabError> {
        Ok(vec![div_op(grad_output, &self.saved_input)?])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.input.clone()]
    }
}

#[cfg(test)]
#[path = "ln_test.rs"]
mod tests;
