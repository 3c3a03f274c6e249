//! # Tensor Operations Module (`ops`)
//!
//! Operations are grouped by family into submodules. Each operation has:
//!
//! - an `xxx_op` function performing the forward computation and, when grad
//!   mode is enabled and an input requires grad, attaching a backward node;
//! - a `XxxBackward` struct implementing
//!   [`BackwardOp`](crate::autograd::BackwardOp) with the context saved
//!   from the forward pass.
//!
//! The same operations are available as methods on [`Tensor`].

use std::sync::Arc;

use num_traits::Zero;
use std::ops::AddAssign;

use crate::autograd::{is_grad_enabled, BackwardOp};
use crate::buffer::Buffer;
use crate::error::GradLabError;
use crate::tensor::broadcast_utils::{broadcast_shapes, broadcast_source_indices, sum_to_shape};
use crate::tensor::Tensor;
use crate::types::DType;

pub mod arithmetic;
pub mod dtype;
pub mod linalg;
pub mod math_elem;
pub mod reduction;
pub mod view;

/// Values read out of a tensor under a short-lived read lock.
pub(crate) struct Snapshot {
    pub buffer: Buffer,
    pub shape: Vec<usize>,
    pub dtype: DType,
    pub requires_grad: bool,
}

impl Tensor {
    /// Clones the buffer handle and metadata, releasing the lock right away.
    pub(crate) fn snapshot(&self) -> Snapshot {
        let guard = self.read_data();
        Snapshot {
            buffer: guard.buffer.clone(),
            shape: guard.shape.clone(),
            dtype: guard.dtype,
            requires_grad: guard.requires_grad,
        }
    }
}

/// Marks `output` as produced by a recorded op if any input requires grad.
pub(crate) fn attach_grad_fn<B>(output: &Tensor, inputs_require_grad: bool, builder: B)
where
    B: FnOnce() -> Arc<dyn BackwardOp>,
{
    if inputs_require_grad && is_grad_enabled() {
        let grad_fn = builder();
        let mut guard = output.write_data();
        guard.requires_grad = true;
        guard.grad_fn = Some(grad_fn);
    }
}

fn binary_kernel<T: Copy>(
    a: &[T],
    b: &[T],
    a_indices: &[usize],
    b_indices: &[usize],
    op: impl Fn(T, T) -> T,
) -> Vec<T> {
    a_indices
        .iter()
        .zip(b_indices.iter())
        .map(|(&ia, &ib)| op(a[ia], b[ib]))
        .collect()
}

/// Applies a broadcasting element-wise binary operation.
///
/// Handles dtype checking (no implicit promotion), shape broadcasting,
/// dtype dispatch and autograd linkage. `op_i64` is `None` for operations
/// that are only defined on floating point tensors.
pub(crate) fn apply_binary_op<F32Op, F64Op, B>(
    a: &Tensor,
    b: &Tensor,
    op_name: &str,
    op_f32: F32Op,
    op_f64: F64Op,
    op_i64: Option<fn(i64, i64) -> i64>,
    backward_builder: B,
) -> Result<Tensor, GradLabError>
where
    F32Op: Fn(f32, f32) -> f32,
    F64Op: Fn(f64, f64) -> f64,
    B: FnOnce() -> Arc<dyn BackwardOp>,
{
    let a_snap = a.snapshot();
    let b_snap = b.snapshot();

    if a_snap.dtype != b_snap.dtype {
        return Err(GradLabError::DataTypeMismatch {
            expected: a_snap.dtype,
            actual: b_snap.dtype,
            operation: op_name.to_string(),
        });
    }

    let output_shape = broadcast_shapes(&a_snap.shape, &b_snap.shape)?;
    let a_indices = broadcast_source_indices(&a_snap.shape, &output_shape);
    let b_indices = broadcast_source_indices(&b_snap.shape, &output_shape);

    let output_buffer = match (&a_snap.buffer, &b_snap.buffer) {
        (Buffer::F32(x), Buffer::F32(y)) => {
            Buffer::F32(Arc::new(binary_kernel(x, y, &a_indices, &b_indices, op_f32)))
        }
        (Buffer::F64(x), Buffer::F64(y)) => {
            Buffer::F64(Arc::new(binary_kernel(x, y, &a_indices, &b_indices, op_f64)))
        }
        (Buffer::I64(x), Buffer::I64(y)) => match op_i64 {
            Some(op) => Buffer::I64(Arc::new(binary_kernel(x, y, &a_indices, &b_indices, op))),
            None => {
                return Err(GradLabError::UnsupportedOperation(format!(
                    "{} is only supported for floating point tensors, got {:?}",
                    op_name, a_snap.dtype
                )))
            }
        },
        _ => {
            return Err(GradLabError::InternalError(format!(
                "{}: buffer variants disagree with dtype",
                op_name
            )))
        }
    };

    let output = Tensor::from_buffer(output_buffer, output_shape)?;
    attach_grad_fn(&output, a_snap.requires_grad || b_snap.requires_grad, backward_builder);
    Ok(output)
}

/// Applies an element-wise unary operation.
///
/// The backward builder receives a detached handle on the output so that
/// ops like `exp` can reuse their result without creating a reference cycle.
pub(crate) fn apply_unary_op<F32Op, F64Op, B>(
    a: &Tensor,
    op_name: &str,
    op_f32: F32Op,
    op_f64: F64Op,
    op_i64: Option<fn(i64) -> i64>,
    backward_builder: B,
) -> Result<Tensor, GradLabError>
where
    F32Op: Fn(f32) -> f32,
    F64Op: Fn(f64) -> f64,
    B: FnOnce(Tensor) -> Arc<dyn BackwardOp>,
{
    let a_snap = a.snapshot();

    let output_buffer = match &a_snap.buffer {
        Buffer::F32(x) => Buffer::F32(Arc::new(x.iter().map(|&v| op_f32(v)).collect())),
        Buffer::F64(x) => Buffer::F64(Arc::new(x.iter().map(|&v| op_f64(v)).collect())),
        Buffer::I64(x) => match op_i64 {
            Some(op) => Buffer::I64(Arc::new(x.iter().map(|&v| op(v)).collect())),
            None => {
                return Err(GradLabError::UnsupportedOperation(format!(
                    "{} is only supported for floating point tensors, got {:?}",
                    op_name, a_snap.dtype
                )))
            }
        },
    };

    let output = Tensor::from_buffer(output_buffer, a_snap.shape)?;
    let saved_output = output.detach();
    attach_grad_fn(&output, a_snap.requires_grad, move || backward_builder(saved_output));
    Ok(output)
}

fn reduce_slice<T>(data: &[T], from_shape: &[usize], to_shape: &[usize]) -> Arc<Vec<T>>
where
    T: Copy + Zero + AddAssign,
{
    Arc::new(sum_to_shape(data, from_shape, to_shape))
}

/// Sums a broadcast gradient back down to `target_shape`.
pub(crate) fn reduce_to_shape(grad: &Tensor, target_shape: &[usize]) -> Result<Tensor, GradLabError> {
    let snap = grad.snapshot();
    if snap.shape == target_shape {
        return Ok(grad.clone());
    }
    let buffer = match &snap.buffer {
        Buffer::F32(x) => Buffer::F32(reduce_slice(x, &snap.shape, target_shape)),
        Buffer::F64(x) => Buffer::F64(reduce_slice(x, &snap.shape, target_shape)),
        Buffer::I64(x) => Buffer::I64(reduce_slice(x, &snap.shape, target_shape)),
    };
    Tensor::from_buffer(buffer, target_shape.to_vec())
}

/// Broadcasts `tensor` to `shape` by materialising the repeated values.
pub(crate) fn expand_to_shape(tensor: &Tensor, shape: &[usize]) -> Result<Tensor, GradLabError> {
    let snap = tensor.snapshot();
    let target = broadcast_shapes(&snap.shape, shape)?;
    if target != shape {
        return Err(GradLabError::BroadcastError {
            shape1: snap.shape,
            shape2: shape.to_vec(),
        });
    }
    let indices = broadcast_source_indices(&snap.shape, shape);
    let buffer = match &snap.buffer {
        Buffer::F32(x) => Buffer::F32(Arc::new(indices.iter().map(|&i| x[i]).collect())),
        Buffer::F64(x) => Buffer::F64(Arc::new(indices.iter().map(|&i| x[i]).collect())),
        Buffer::I64(x) => Buffer::I64(Arc::new(indices.iter().map(|&i| x[i]).collect())),
    };
    Tensor::from_buffer(buffer, shape.to_vec())
}
