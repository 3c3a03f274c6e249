use std::sync::Arc;

use crate::autograd::BackwardOp;
use crate::error::GradLabError;
use crate::ops::{apply_binary_op, reduce_to_shape};
use crate::tensor::Tensor;

// --- Forward Operation ---

/// Element-wise multiplication with broadcasting.
pub fn mul_op(a: &Tensor, b: &Tensor) -> Result<Tensor, GradLabError> {
    let (a_shape, b_shape) = (a.shape(), b.shape());
    apply_binary_op(
        a,
        b,
        "mul_op",
        |x, y| x * y,
        |x, y| x * y,
        Some(i64::wrapping_mul),
        || {
            Arc::new(MulBackward {
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

/// d(a*b)/da = b, d(a*b)/db = a, each reduced over broadcast dimensions.
#[derive(Debug)]
struct MulBackward {
    a: Tensor,
    b: Tensor,
    // Forward-time values; `a`/`b` may be written in place later.
    a_saved: Tensor,
    b_saved: Tensor,
    a_shape: Vec<usize>,
    b_shape: Vec<usize>,
}

impl BackwardOp for MulBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, GradLabError> {
        let grad_a = mul_op(grad_output, &self.b_saved)?;
        let grad_b = mul_op(grad_output, &self.a_saved)?;
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
#[path = "mul_test.rs"]
mod tests;
