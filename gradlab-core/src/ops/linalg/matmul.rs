use std::ops::{AddAssign, Mul};
use std::sync::Arc;

use num_traits::Zero;

use crate::autograd::BackwardOp;
use crate::buffer::Buffer;
use crate::error::GradLabError;
use crate::ops::attach_grad_fn;
use crate::ops::linalg::transpose_op;
use crate::tensor::Tensor;

// --- Forward Operation ---

/// Matrix product of two 2-D tensors: `[m, k] x [k, n] -> [m, n]`.
pub fn matmul_op(a: &Tensor, b: &Tensor) -> Result<Tensor, GradLabError> {
    let a_snap = a.snapshot();
    let b_snap = b.snapshot();

    if a_snap.dtype != b_snap.dtype {
        return Err(GradLabError::DataTypeMismatch {
            expected: a_snap.dtype,
            actual: b_snap.dtype,
            operation: "matmul_op".to_string(),
        });
    }
    if a_snap.shape.len() != 2 || b_snap.shape.len() != 2 {
        return Err(GradLabError::UnsupportedOperation(format!(
            "matmul_op expects 2-D tensors, got shapes {:?} and {:?}",
            a_snap.shape, b_snap.shape
        )));
    }
    let (m, k) = (a_snap.shape[0], a_snap.shape[1]);
    let (k2, n) = (b_snap.shape[0], b_snap.shape[1]);
    if k != k2 {
        return Err(GradLabError::ShapeMismatch {
            expected: vec![k, n],
            actual: b_snap.shape.clone(),
            operation: "matmul_op".to_string(),
        });
    }

    let buffer = match (&a_snap.buffer, &b_snap.buffer) {
        (Buffer::F32(x), Buffer::F32(y)) => Buffer::F32(Arc::new(matmul_kernel(x, y, m, k, n))),
        (Buffer::F64(x), Buffer::F64(y)) => Buffer::F64(Arc::new(matmul_kernel(x, y, m, k, n))),
        (Buffer::I64(x), Buffer::I64(y)) => Buffer::I64(Arc::new(matmul_kernel(x, y, m, k, n))),
        _ => {
            return Err(GradLabError::InternalError(
                "matmul_op: buffer variants disagree with dtype".to_string(),
            ))
        }
    };

    let output = Tensor::from_buffer(buffer, vec![m, n])?;
    attach_grad_fn(&output, a_snap.requires_grad || b_snap.requires_grad, || {
        Arc::new(MatMulBackward {
            a: a.clone(),
            b: b.clone(),
            a_saved: a.detach(),
            b_saved: b.detach(),
        })
    });
    Ok(output)
}

fn matmul_kernel<T>(a: &[T], b: &[T], m: usize, k: usize, n: usize) -> Vec<T>
where
    T: Copy + Zero + Mul<Output = T> + AddAssign,
{
    let mut out = vec![T::zero(); m * n];
    for i in 0..m {
        for p in 0..k {
            let a_ip = a[i * k + p];
            for j in 0..n {
                out[i * n + j] += a_ip * b[p * n + j];
            }
        }
    }
    out
}

// --- Backward Operation ---

/// dA = G·Bᵀ, dB = Aᵀ·G.
#[derive(Debug)]
struct MatMulBackward {
    a: Tensor,
    b: Tensor,
    a_saved: Tensor,
    b_saved: Tensor,
}

impl BackwardOp for MatMulBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, GradLabError> {
        let b_t = transpose_op(&self.b_saved)?;
        let a_t = transpose_op(&self.a_saved)?;
        Ok(vec![matmul_op(grad_output, &b_t)?, matmul_op(&a_t, grad_output)?])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone(), self.b.clone()]
    }
}

#[cfg(test)]
#[path = "matmul_test.rs"]
mod tests;
