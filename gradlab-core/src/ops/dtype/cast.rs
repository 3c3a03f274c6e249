use std::sync::Arc;

use crate::autograd::BackwardOp;
use crate::buffer::Buffer;
use crate::error::GradLabError;
use crate::ops::attach_grad_fn;
use crate::tensor::Tensor;
use crate::types::DType;

// --- Forward Operation ---

/// Converts a tensor to `target` dtype.
///
/// Float to float casts are differentiable. Casting to or from `I64` yields
/// an untracked tensor; float to integer conversion truncates toward zero
/// and saturates at the `i64` bounds.
pub fn cast_op(a: &Tensor, target: DType) -> Result<Tensor, GradLabError> {
    let snap = a.snapshot();
    let buffer = if snap.dtype == target {
        snap.buffer.clone()
    } else {
        convert_buffer(&snap.buffer, target)
    };
    let output = Tensor::from_buffer(buffer, snap.shape)?;
    let differentiable = snap.dtype.is_floating_point() && target.is_floating_point();
    attach_grad_fn(&output, snap.requires_grad && differentiable, || {
        Arc::new(CastBackward {
            input: a.clone(),
            input_dtype: snap.dtype,
        })
    });
    Ok(output)
}

fn convert_buffer(buffer: &Buffer, target: DType) -> Buffer {
    match (buffer, target) {
        (Buffer::I64(x), DType::F32) => Buffer::F32(Arc::new(x.iter().map(|&v| v as f32).collect())),
        (Buffer::I64(x), DType::F64) => Buffer::F64(Arc::new(x.iter().map(|&v| v as f64).collect())),
        (Buffer::F32(x), DType::I64) => Buffer::I64(Arc::new(x.iter().map(|&v| v as i64).collect())),
        (Buffer::F32(x), DType::F64) => Buffer::F64(Arc::new(x.iter().map(|&v| v as f64).collect())),
        (Buffer::F64(x), DType::F32) => Buffer::F32(Arc::new(x.iter().map(|&v| v as f32).collect())),
        (Buffer::F64(x), DType::I64) => Buffer::I64(Arc::new(x.iter().map(|&v| v as i64).collect())),
        (same, _) => same.clone(),
    }
}

// --- Backward Operation ---

/// The gradient is cast back to the input's dtype.
#[derive(Debug)]
struct CastBackward {
    input: Tensor,
    input_dtype: DType,
}

impl BackwardOp for CastBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, GradLabError> {
        Ok(vec![cast_op(grad_output, self.input_dtype)?])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.input.clone()]
    }
}

#[cfg(test)]
#[path = "cast_test.rs"]
mod tests;
