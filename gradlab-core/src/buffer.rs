use std::fmt::Debug;
use std::sync::Arc;

use crate::error::GradLabError;
use crate::types::{DType, Element};

/// Typed CPU storage behind a tensor.
///
/// Each variant holds its data in an `Arc` so that tensors created by
/// `reshape` or `detach` can share storage cheaply. Mutation goes through
/// `Arc::make_mut`, so a shared buffer is copied before it is written.
#[derive(Debug, Clone)]
pub enum Buffer {
    /// Buffer holding f32 data.
    F32(Arc<Vec<f32>>),
    /// Buffer holding f64 data.
    F64(Arc<Vec<f64>>),
    /// Buffer holding i64 data.
    I64(Arc<Vec<i64>>),
}

impl Buffer {
    /// The element type stored in this buffer.
    pub fn dtype(&self) -> DType {
        match self {
            Buffer::F32(_) => DType::F32,
            Buffer::F64(_) => DType::F64,
            Buffer::I64(_) => DType::I64,
        }
    }

    /// Number of elements in the buffer.
    pub fn len(&self) -> usize {
        match self {
            Buffer::F32(data) => data.len(),
            Buffer::F64(data) => data.len(),
            Buffer::I64(data) => data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Attempts to get the `f32` contents.
    pub fn try_get_f32(&self) -> Result<&[f32], GradLabError> {
        f32::try_slice(self)
    }

    /// Attempts to get the `f64` contents.
    pub fn try_get_f64(&self) -> Result<&[f64], GradLabError> {
        f64::try_slice(self)
    }

    /// Attempts to get the `i64` contents.
    pub fn try_get_i64(&self) -> Result<&[i64], GradLabError> {
        i64::try_slice(self)
    }

    /// Copies the contents into a `Vec<f64>` whatever the stored type.
    pub fn to_f64_vec(&self) -> Vec<f64> {
        match self {
            Buffer::F32(data) => data.iter().map(|&x| x as f64).collect(),
            Buffer::F64(data) => data.as_ref().clone(),
            Buffer::I64(data) => data.iter().map(|&x| x as f64).collect(),
        }
    }

    /// Builds a buffer of `dtype` from `f64` values, converting each element.
    pub fn from_f64_values(values: Vec<f64>, dtype: DType) -> Buffer {
        match dtype {
            DType::F32 => Buffer::F32(Arc::new(values.into_iter().map(|x| x as f32).collect())),
            DType::F64 => Buffer::F64(Arc::new(values)),
            DType::I64 => Buffer::I64(Arc::new(values.into_iter().map(|x| x as i64).collect())),
        }
    }

    /// Returns `true` if both buffers point to the same allocation.
    pub fn shares_storage_with(&self, other: &Buffer) -> bool {
        match (self, other) {
            (Buffer::F32(a), Buffer::F32(b)) => Arc::ptr_eq(a, b),
            (Buffer::F64(a), Buffer::F64(b)) => Arc::ptr_eq(a, b),
            (Buffer::I64(a), Buffer::I64(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}
