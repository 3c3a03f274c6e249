use std::sync::Arc;

use crate::autograd::BackwardOp;
use crate::error::GradLabError;
use crate::ops::arithmetic::neg_op;
use crate::ops::{apply_binary_op, reduce_to_shape};
use crate::tensor::Tensor;

// --- Forward Operation ---

/// Element-wise subtraction `a - b` with broadcasting.
pub fn sub_op(a: &Tensor, b: &Tensor) -> Result<Tensor, GradLabError> {
    let (a_shape, b_shape) = (a.shape(), b.shape());
    apply_binary_op(
        a,
        b,
        "sub_op",
        |x, y| x - y,
        |x, y| x - y,
        Some(i64::wrapping_sub),
        || {
            Arc::new(SubBackward {
                a: a.clone(),
                b: b.clone(),
                a_shape,
                b_shape,
            })
        },
    )
}

// --- Backward Operation ---

#[derive(Debug)]
struct SubBackward {
    a: Tensor,
    b: Tensor,
    a_shape: Vec<usize>,
    b_shape: Vec<usize>,
}

impl BackwardOp for SubBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, GradLabError> {
        let grad_a = reduce_to_shape(grad_output, &self.a_shape)?;
        let grad_b = reduce_to_shape(&neg_op(grad_output)?, &self.b_shape)?;
        Ok(vec![grad_a, grad_b])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone(), self.b.clone()]
    }
}

#[cfg(test)]
#[path = "sub_test.rs"]
mod tests;
