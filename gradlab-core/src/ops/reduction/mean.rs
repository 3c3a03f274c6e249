use std::sync::Arc;

use crate::autograd::{no_grad, BackwardOp};
use crate::error::GradLabError;
use crate::ops::reduction::sum_op;
use crate::ops::{attach_grad_fn, expand_to_shape};
use crate::tensor::Tensor;

/// Arithmetic mean of all elements, as a 0-dimensional tensor.
///
/// Floating point only. The mean of an empty tensor is `NaN`.
pub fn mean_op(a: &Tensor) -> Result<Tensor, GradLabError> {
    let dtype = a.dtype();
    if !dtype.is_floating_point() {
        return Err(GradLabError::UnsupportedOperation(format!(
            "mean_op is only supported for floating point tensors, got {:?}",
            dtype
        )));
    }
    let numel = a.numel();
    let input_shape = a.shape();
    let output = no_grad(|| -> Result<Tensor, GradLabError> {
        sum_op(a)?.div_scalar(numel as f64)
    })?;
    attach_grad_fn(&output, a.requires_grad(), || {
        Arc::new(MeanBackward {
            input: a.clone(),
            input_shape,
            numel,
        })
    });
    Ok(output)
}

/// d(mean)/dx_i = 1/n.
#[derive(Debug)]
struct MeanBackward {
    input: Tensor,
    input_shape: Vec<usize>,
    numel: usize,
}

impl BackwardOp for MeanBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, GradLabError> {
        let scaled = grad_output.div_scalar(self.numel as f64)?;
        Ok(vec![expand_to_shape(&scaled, &self.input_shape)?])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.input.clone()]
    }
}
