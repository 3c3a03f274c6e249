use std::fmt::Debug;
use std::sync::Arc;

use crate::autograd::BackwardOp;
use crate::buffer::Buffer;
use crate::error::GradLabError;
use crate::tensor::broadcast_utils::calculate_strides;
use crate::tensor::Tensor;
use crate::types::{DType, Element};

/// Internal storage and metadata for a Tensor.
///
/// This struct holds the data buffer, shape, strides, data type and the
/// autograd bookkeeping. It is wrapped in `Arc<RwLock<TensorData>>` by
/// [`Tensor`] so that metadata such as `grad` can be updated through shared
/// references.
#[derive(Debug)]
pub struct TensorData {
    /// The underlying typed buffer. Always contiguous, row-major.
    pub(crate) buffer: Buffer,
    /// The data type of the elements in the buffer.
    pub(crate) dtype: DType,
    /// The shape (dimensions) of the tensor. Empty for scalars.
    pub(crate) shape: Vec<usize>,
    /// Row-major strides matching `shape`.
    pub(crate) strides: Vec<usize>,

    /// If true, operations involving this tensor are recorded in the graph.
    pub(crate) requires_grad: bool,
    /// Accumulated gradient, populated by `backward()` on leaves.
    pub(crate) grad: Option<Tensor>,
    /// The operation that produced this tensor. `None` for leaves.
    pub(crate) grad_fn: Option<Arc<dyn BackwardOp>>,
}

impl TensorData {
    /// Creates a new `TensorData` from a typed vector and a shape.
    ///
    /// # Errors
    /// Returns `GradLabError::TensorCreationError` if the length of `data_vec`
    /// does not match the number of elements described by `shape`.
    pub fn new<T: Element>(data_vec: Vec<T>, shape: Vec<usize>) -> Result<Self, GradLabError> {
        Self::from_buffer(T::into_buffer(data_vec), shape)
    }

    /// Creates a new `TensorData` around an existing buffer.
    pub(crate) fn from_buffer(buffer: Buffer, shape: Vec<usize>) -> Result<Self, GradLabError> {
        let numel: usize = shape.iter().product();
        let data_len = buffer.len();
        if data_len != numel {
            return Err(GradLabError::TensorCreationError { data_len, shape });
        }
        let strides = calculate_strides(&shape);
        Ok(TensorData {
            dtype: buffer.dtype(),
            buffer,
            shape,
            strides,
            requires_grad: false,
            grad: None,
            grad_fn: None,
        })
    }

    /// Provides immutable access to the underlying buffer.
    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn numel(&self) -> usize {
        self.shape.iter().product()
    }

    /// Calculates the linear offset into the buffer for multi-dimensional indices.
    ///
    /// # Errors
    /// Returns `ShapeMismatch` if the rank or any index is out of bounds.
    pub fn get_offset(&self, indices: &[usize]) -> Result<usize, GradLabError> {
        if indices.len() != self.shape.len()
            || indices.iter().zip(self.shape.iter()).any(|(&i, &dim)| i >= dim)
        {
            return Err(GradLabError::ShapeMismatch {
                expected: self.shape.clone(),
                actual: indices.to_vec(),
                operation: "get_offset".to_string(),
            });
        }
        Ok(indices
            .iter()
            .zip(self.strides.iter())
            .map(|(i, s)| i * s)
            .sum())
    }
}
