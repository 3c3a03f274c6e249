use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::buffer::Buffer;
use crate::error::GradLabError;
use crate::tensor_data::TensorData;
use crate::types::{DType, Element};

mod autograd_methods;
pub mod broadcast_utils;
pub mod create;
mod inplace_ops;
mod interop;
mod op_methods;
mod traits;

pub use create::{
    arange, full, full_f64, full_like, linspace, ones, ones_f64, ones_like, rand_uniform, randn,
    randn_seeded, zeros, zeros_f64, zeros_like,
};

/// Represents a multi-dimensional array (tensor).
///
/// `Tensor` uses `Arc<RwLock<TensorData>>` internally to allow for:
/// 1.  **Shared Ownership:** cloning a `Tensor` is cheap and yields another
///     handle to the same graph node.
/// 2.  **Interior Mutability:** autograd metadata (`requires_grad`, `grad`)
///     can be modified through an immutable `Tensor` reference.
#[derive(Clone)]
pub struct Tensor {
    pub(crate) data: Arc<RwLock<TensorData>>,
}

impl Tensor {
    /// Creates a new F32 Tensor from data and shape.
    ///
    /// This is the primary constructor for creating tensors from raw data.
    pub fn new(data_vec: Vec<f32>, shape: Vec<usize>) -> Result<Self, GradLabError> {
        Self::from_vec(data_vec, shape)
    }

    /// Creates a new F64 Tensor from data and shape.
    pub fn new_f64(data_vec: Vec<f64>, shape: Vec<usize>) -> Result<Self, GradLabError> {
        Self::from_vec(data_vec, shape)
    }

    /// Creates a new I64 Tensor from data and shape.
    pub fn new_i64(data_vec: Vec<i64>, shape: Vec<usize>) -> Result<Self, GradLabError> {
        Self::from_vec(data_vec, shape)
    }

    /// Creates a tensor of whichever element type `T` is.
    pub fn from_vec<T: Element>(data_vec: Vec<T>, shape: Vec<usize>) -> Result<Self, GradLabError> {
        Ok(Self::from_tensor_data(TensorData::new(data_vec, shape)?))
    }

    /// Creates a 0-dimensional F32 tensor.
    pub fn scalar(value: f32) -> Self {
        Self::from_tensor_data_unchecked(f32::into_buffer(vec![value]))
    }

    /// Creates a 0-dimensional F64 tensor.
    pub fn scalar_f64(value: f64) -> Self {
        Self::from_tensor_data_unchecked(f64::into_buffer(vec![value]))
    }

    fn from_tensor_data_unchecked(buffer: Buffer) -> Self {
        // A single-element buffer always matches the empty shape.
        let tensor_data = TensorData {
            dtype: buffer.dtype(),
            buffer,
            shape: vec![],
            strides: vec![],
            requires_grad: false,
            grad: None,
            grad_fn: None,
        };
        Self::from_tensor_data(tensor_data)
    }

    pub(crate) fn from_tensor_data(tensor_data: TensorData) -> Self {
        Tensor {
            data: Arc::new(RwLock::new(tensor_data)),
        }
    }

    pub(crate) fn from_buffer(buffer: Buffer, shape: Vec<usize>) -> Result<Self, GradLabError> {
        Ok(Self::from_tensor_data(TensorData::from_buffer(buffer, shape)?))
    }

    /// Returns the data type (`DType`) of the tensor elements.
    pub fn dtype(&self) -> DType {
        self.read_data().dtype
    }

    /// Returns a clone of the tensor's shape.
    pub fn shape(&self) -> Vec<usize> {
        self.read_data().shape.clone()
    }

    /// Returns a clone of the tensor's strides.
    pub fn strides(&self) -> Vec<usize> {
        self.read_data().strides.clone()
    }

    /// Number of dimensions.
    pub fn rank(&self) -> usize {
        self.read_data().shape.len()
    }

    /// Returns the number of elements in the tensor.
    pub fn numel(&self) -> usize {
        self.read_data().numel()
    }

    /// Acquires a read lock on the tensor's data.
    ///
    /// Panics if the RwLock is poisoned.
    pub fn read_data(&self) -> RwLockReadGuard<'_, TensorData> {
        self.data.read().expect("RwLock poisoned")
    }

    /// Acquires a write lock on the tensor's data.
    ///
    /// Panics if the RwLock is poisoned.
    pub fn write_data(&self) -> RwLockWriteGuard<'_, TensorData> {
        self.data.write().expect("RwLock poisoned")
    }

    /// Copies the data out as `Vec<T>`. Fails if `T` does not match the dtype.
    pub fn to_vec<T: Element>(&self) -> Result<Vec<T>, GradLabError> {
        let guard = self.read_data();
        Ok(T::try_slice(&guard.buffer)?.to_vec())
    }

    /// Attempts to get the tensor data as a `Vec<f32>`.
    pub fn get_f32_data(&self) -> Result<Vec<f32>, GradLabError> {
        self.to_vec::<f32>()
    }

    /// Attempts to get the tensor data as a `Vec<f64>`.
    pub fn get_f64_data(&self) -> Result<Vec<f64>, GradLabError> {
        self.to_vec::<f64>()
    }

    /// Attempts to get the tensor data as a `Vec<i64>`.
    pub fn get_i64_data(&self) -> Result<Vec<i64>, GradLabError> {
        self.to_vec::<i64>()
    }

    /// Copies the data into `f64` values whatever the dtype.
    pub fn to_f64_vec(&self) -> Vec<f64> {
        self.read_data().buffer.to_f64_vec()
    }

    /// Returns the value of a single-element tensor as `f64`.
    pub fn item(&self) -> Result<f64, GradLabError> {
        let guard = self.read_data();
        if guard.numel() != 1 {
            return Err(GradLabError::NotAScalar {
                shape: guard.shape.clone(),
            });
        }
        Ok(guard.buffer.to_f64_vec()[0])
    }

    /// Returns the element at `indices` as `f64`.
    pub fn get(&self, indices: &[usize]) -> Result<f64, GradLabError> {
        let guard = self.read_data();
        let offset = guard.get_offset(indices)?;
        let value = match &guard.buffer {
            Buffer::F32(data) => data[offset] as f64,
            Buffer::F64(data) => data[offset],
            Buffer::I64(data) => data[offset] as f64,
        };
        Ok(value)
    }

    /// Identifier of the graph node, stable across clones of this handle.
    pub(crate) fn node_id(&self) -> usize {
        Arc::as_ptr(&self.data) as *const () as usize
    }

    /// Returns `true` if both tensors share the same storage allocation.
    pub fn shares_storage_with(&self, other: &Tensor) -> bool {
        if Arc::ptr_eq(&self.data, &other.data) {
            return true;
        }
        let a = self.read_data();
        let b = other.read_data();
        a.buffer.shares_storage_with(&b.buffer)
    }
}
