use std::sync::Arc;

use crate::autograd::BackwardOp;
use crate::error::GradLabError;
use crate::ops::attach_grad_fn;
use crate::tensor::Tensor;

// --- Forward Operation ---

/// Returns a tensor with the same elements laid out with `new_shape`.
///
/// The result shares the input's storage; the first in-place write to either
/// side copies the buffer, so they never observe each other's mutations.
pub fn reshape_op(a: &Tensor, new_shape: Vec<usize>) -> Result<Tensor, GradLabError> {
    let snap = a.snapshot();
    let new_numel: usize = new_shape.iter().product();
    if new_numel != snap.buffer.len() {
        return Err(GradLabError::ShapeMismatch {
            expected: snap.shape,
            actual: new_shape,
            operation: "reshape_op (element count must be preserved)".to_string(),
        });
    }
    let output = Tensor::from_buffer(snap.buffer, new_shape)?;
    attach_grad_fn(&output, snap.requires_grad, || {
        Arc::new(ReshapeBackward {
            input: a.clone(),
            input_shape: snap.shape.clone(),
        })
    });
    Ok(output)
}

// --- Backward Operation ---

#[derive(Debug)]
struct ReshapeBackward {
    input: Tensor,
    input_shape: Vec<usize>,
}

impl BackwardOp for ReshapeBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, GradLabError> {
        Ok(vec![reshape_op(grad_output, self.input_shape.clone())?])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.input.clone()]
    }
}
