use std::sync::Arc;

use crate::autograd::BackwardOp;
use crate::error::GradLabError;
use crate::ops::arithmetic::{mul_op, neg_op};
use crate::ops::{apply_binary_op, reduce_to_shape};
use crate::tensor::Tensor;

// --- Forward Operation ---

/// Element-wise division `a / b` with broadcasting.
///
/// Floating point only; division by zero follows IEEE 754.
pub fn div_op(a: &Tensor, b: &Tensor) -> Result<Tensor, GradLabError> {
    let (a_shape, b_shape) = (a.shape(), b.shape());
    apply_binary_op(
        a,
        b,
        "div_op",
        |x, y| x / y,
        |x, y| x / y,
        None,
        || {
            Arc::new(DivBackward {
                a: a.clone(),
                b: b.clone(),
                a_saved: a.detach(),
                b_saved: b.detach(),
                a_shape,
                b_shape,
            })
        },
    )
}

// --- Backward Operation ---

/// d(a/b)/da = 1/b, d(a/b)/db = -a/b^2.
#[derive(Debug)]
struct DivBackward {
    a: Tensor,
    b: Tensor,
    a_saved: Tensor,
    b_saved: Tensor,
    a_shape: Vec<usize>,
    b_shape: Vec<usize>,
}

impl BackwardOp for DivBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, GradLabError> {
        let (a, b) = (&self.a_saved, &self.b_saved);
        let grad_a = div_op(grad_output, b)?;
        let b_squared = mul_op(b, b)?;
        let grad_b = neg_op(&div_op(&mul_op(grad_output, a)?, &b_squared)?)?;
        Ok(vec![
            reduce_to_shape(&grad_a, &self.a_shape)?,
            reduce_to_shape(&grad_b, &self.b_shape)?,
        ])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone(), self.b.clone()]
    }
}

#[cfg(test)]
#[path = "div_test.rs"]
mod tests;
