use std::sync::Arc;

use crate::autograd::BackwardOp;
use crate::buffer::Buffer;
use crate::error::GradLabError;
use crate::ops::{attach_grad_fn, expand_to_shape};
use crate::tensor::Tensor;

// --- Forward Operation ---

/// Sums all elements into a 0-dimensional tensor of the same dtype.
pub fn sum_op(a: &Tensor) -> Result<Tensor, GradLabError> {
    let snap = a.snapshot();
    let buffer = match &snap.buffer {
        Buffer::F32(x) => Buffer::F32(Arc::new(vec![x.iter().fold(0.0f32, |acc, &v| acc + v)])),
        Buffer::F64(x) => Buffer::F64(Arc::new(vec![x.iter().fold(0.0f64, |acc, &v| acc + v)])),
        Buffer::I64(x) => Buffer::I64(Arc::new(vec![x.iter().fold(0i64, |acc, &v| acc.wrapping_add(v))])),
    };
    let output = Tensor::from_buffer(buffer, vec![])?;
    attach_grad_fn(&output, snap.requires_grad, || {
        Arc::new(SumBackward {
            input: a.clone(),
            input_shape: snap.shape.clone(),
        })
    });
    Ok(output)
}

// --- Backward Operation ---

/// Every input element receives the upstream gradient unchanged.
#[derive(Debug)]
struct SumBackward {
    input: Tensor,
    input_shape: Vec<usize>,
}

impl BackwardOp for SumBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, GradLabError> {
        Ok(vec![expand_to_shape(grad_output, &self.input_shape)?])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.input.clone()]
    }
}

#[cfg(test)]
#[path = "sum_test.rs"]
mod tests;
