use std::sync::Arc;

use crate::autograd::BackwardOp;
use crate::error::GradLabError;
use crate::ops::{apply_binary_op, reduce_to_shape};
use crate::tensor::Tensor;

// --- Forward Operation ---

/// Element-wise addition with broadcasting.
///
/// Both operands must have the same dtype.
pub fn add_op(a: &Tensor, b: &Tensor) -> Result<Tensor, GradLabError> {
    let (a_shape, b_shape) = (a.shape(), b.shape());
    apply_binary_op(
        a,
        b,
        "add_op",
        |x, y| x + y,
        |x, y| x + y,
        Some(i64::wrapping_add),
        || {
            Arc::new(AddBackward {
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
struct AddBackward {
    a: Tensor,
    b: Tensor,
    a_shape: Vec<usize>,
    b_shape: Vec<usize>,
}

impl BackwardOp for AddBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, GradLabError> {
        Ok(vec![
            reduce_to_shape(grad_output, &self.a_shape)?,
            reduce_to_shape(grad_output, &self.b_shape)?,
        ])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone(), self.b.clone()]
    }
}

#[cfg(test)]
#[path = "add_test.rs"]
mod tests;
