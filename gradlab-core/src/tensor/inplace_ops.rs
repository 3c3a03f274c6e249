//! In-place updates. They write straight into the tensor's buffer, bypass
//! autograd, and are refused on tensors requiring grad while grad mode is
//! enabled. Optimizers run them inside `no_grad`.

use std::ops::Mul;
use std::sync::Arc;

use crate::autograd::is_grad_enabled;
use crate::buffer::Buffer;
use crate::error::GradLabError;
use crate::tensor::broadcast_utils::{broadcast_shapes, broadcast_source_indices};
use crate::tensor::Tensor;
use crate::types::{DType, Element};

impl Tensor {
    fn check_inplace_allowed(&self, operation: &str) -> Result<(), GradLabError> {
        if self.requires_grad() && is_grad_enabled() {
            return Err(GradLabError::InPlaceOnLeafRequiringGrad {
                operation: operation.to_string(),
            });
        }
        Ok(())
    }

    /// In-place `self += other`. `other` may broadcast to `self`'s shape.
    pub fn add_(&self, other: &Tensor) -> Result<(), GradLabError> {
        self.zip_with_(
            other,
            "add_",
            |d, s| d + s,
            |d, s| d + s,
            |d, s| d.wrapping_add(s),
        )
    }

    /// In-place `self -= alpha * other`, the gradient descent update.
    ///
    /// For `I64` tensors `alpha` is truncated to an integer.
    pub fn sub_scaled_(&self, other: &Tensor, alpha: f64) -> Result<(), GradLabError> {
        let alpha_f32 = alpha as f32;
        let alpha_i64 = alpha as i64;
        self.zip_with_(
            other,
            "sub_scaled_",
            move |d, s| d - alpha_f32 * s,
            move |d, s| d - alpha * s,
            move |d, s| d.wrapping_sub(alpha_i64.wrapping_mul(s)),
        )
    }

    /// In-place multiplication by a scalar.
    pub fn mul_scalar_(&self, value: f64) -> Result<(), GradLabError> {
        self.check_inplace_allowed("mul_scalar_")?;
        let mut guard = self.write_data();
        match guard.dtype {
            DType::F32 => scale_typed::<f32>(&mut guard.buffer, value),
            DType::F64 => scale_typed::<f64>(&mut guard.buffer, value),
            DType::I64 => scale_typed::<i64>(&mut guard.buffer, value),
        }
    }

    /// Sets every element to `value`, converted to this tensor's dtype.
    pub fn fill_(&self, value: f64) -> Result<(), GradLabError> {
        self.check_inplace_allowed("fill_")?;
        let mut guard = self.write_data();
        match guard.dtype {
            DType::F32 => fill_typed::<f32>(&mut guard.buffer, value),
            DType::F64 => fill_typed::<f64>(&mut guard.buffer, value),
            DType::I64 => fill_typed::<i64>(&mut guard.buffer, value),
        }
    }

    /// Replaces this tensor's values with those of `other`.
    ///
    /// Shapes and dtypes must match exactly.
    pub fn copy_from_(&self, other: &Tensor) -> Result<(), GradLabError> {
        self.check_inplace_allowed("copy_from_")?;
        let source = other.snapshot();
        let mut guard = self.write_data();
        if guard.shape != source.shape {
            return Err(GradLabError::ShapeMismatch {
                expected: guard.shape.clone(),
                actual: source.shape,
                operation: "copy_from_".to_string(),
            });
        }
        if guard.dtype != source.dtype {
            return Err(GradLabError::DataTypeMismatch {
                expected: guard.dtype,
                actual: source.dtype,
                operation: "copy_from_".to_string(),
            });
        }
        // Storage is shared until either side is written again.
        guard.buffer = source.buffer;
        Ok(())
    }

    /// Resets an existing gradient to zeros. Does nothing if there is none.
    pub fn zero_grad(&self) -> Result<(), GradLabError> {
        match self.grad() {
            Some(grad) => grad.fill_(0.0),
            None => Ok(()),
        }
    }

    fn zip_with_<F32Op, F64Op, I64Op>(
        &self,
        other: &Tensor,
        op_name: &str,
        op_f32: F32Op,
        op_f64: F64Op,
        op_i64: I64Op,
    ) -> Result<(), GradLabError>
    where
        F32Op: Fn(f32, f32) -> f32,
        F64Op: Fn(f64, f64) -> f64,
        I64Op: Fn(i64, i64) -> i64,
    {
        self.check_inplace_allowed(op_name)?;
        let source = other.snapshot();
        let mut guard = self.write_data();

        if guard.dtype != source.dtype {
            return Err(GradLabError::DataTypeMismatch {
                expected: guard.dtype,
                actual: source.dtype,
                operation: op_name.to_string(),
            });
        }
        if broadcast_shapes(&guard.shape, &source.shape)? != guard.shape {
            return Err(GradLabError::BroadcastError {
                shape1: guard.shape.clone(),
                shape2: source.shape,
            });
        }
        let indices = broadcast_source_indices(&source.shape, &guard.shape);

        match (&mut guard.buffer, &source.buffer) {
            (Buffer::F32(dst), Buffer::F32(src)) => zip_kernel(Arc::make_mut(dst).as_mut_slice(), src.as_slice(), &indices, op_f32),
            (Buffer::F64(dst), Buffer::F64(src)) => zip_kernel(Arc::make_mut(dst).as_mut_slice(), src.as_slice(), &indices, op_f64),
            (Buffer::I64(dst), Buffer::I64(src)) => zip_kernel(Arc::make_mut(dst).as_mut_slice(), src.as_slice(), &indices, op_i64),
            _ => {
                return Err(GradLabError::InternalError(format!(
                    "{}: buffer variants disagree with dtype",
                    op_name
                )))
            }
        }
        Ok(())
    }
}

fn zip_kernel<T: Copy>(dst: &mut [T], src: &[T], indices: &[usize], op: impl Fn(T, T) -> T) {
    for (d, &i) in dst.iter_mut().zip(indices) {
        *d = op(*d, src[i]);
    }
}

fn fill_typed<T: Element>(buffer: &mut Buffer, value: f64) -> Result<(), GradLabError> {
    T::try_slice_mut(buffer)?.fill(T::from_f64(value));
    Ok(())
}

fn scale_typed<T: Element + Mul<Output = T>>(buffer: &mut Buffer, value: f64) -> Result<(), GradLabError> {
    let factor = T::from_f64(value);
    for x in T::try_slice_mut(buffer)?.iter_mut() {
        *x = *x * factor;
    }
    Ok(())
}

#[cfg(test)]
#[path = "inplace_ops_test.rs"]
mod tests;
