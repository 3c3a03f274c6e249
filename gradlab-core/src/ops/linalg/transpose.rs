use std::sync::Arc;

use crate::autograd::BackwardOp;
use crate::buffer::Buffer;
use crate::error::GradLabError;
use crate::ops::attach_grad_fn;
use crate::tensor::Tensor;

/// Transposes a 2-D tensor into a new contiguous tensor.
pub fn transpose_op(a: &Tensor) -> Result<Tensor, GradLabError> {
    let snap = a.snapshot();
    if snap.shape.len() != 2 {
        return Err(GradLabError::UnsupportedOperation(format!(
            "transpose_op expects a 2-D tensor, got shape {:?}",
            snap.shape
        )));
    }
    let (rows, cols) = (snap.shape[0], snap.shape[1]);
    let buffer = match &snap.buffer {
        Buffer::F32(x) => Buffer::F32(Arc::new(transpose_kernel(x, rows, cols))),
        Buffer::F64(x) => Buffer::F64(Arc::new(transpose_kernel(x, rows, cols))),
        Buffer::I64(x) => Buffer::I64(Arc::new(transpose_kernel(x, rows, cols))),
    };
    let output = Tensor::from_buffer(buffer, vec![cols, rows])?;
    attach_grad_fn(&output, snap.requires_grad, || {
        Arc::new(TransposeBackward { input: a.clone() })
    });
    Ok(output)
}

fn transpose_kernel<T: Copy>(data: &[T], rows: usize, cols: usize) -> Vec<T> {
    (0..cols)
        .flat_map(|j| (0..rows).map(move |i| data[i * cols + j]))
        .collect()
}

#[derive(Debug)]
struct TransposeBackward {
    input: Tensor,
}

impl BackwardOp for TransposeBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, GradLabError> {
        Ok(vec![transpose_op(grad_output)?])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.input.clone()]
    }
}
