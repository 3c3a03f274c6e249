//! Conversions between [`Tensor`] and `ndarray` arrays.
//!
//! Both directions copy: a tensor never aliases an array's memory, and
//! mutating one side is never visible on the other.

use ndarray::{ArrayBase, ArrayD, Data, Dimension, IxDyn};

use crate::error::GradLabError;
use crate::tensor::Tensor;
use crate::types::Element;

impl Tensor {
    /// Creates a tensor from any `ndarray` array, copying its elements in
    /// logical row-major order. Non-contiguous and transposed arrays are
    /// handled.
    pub fn from_ndarray<T, S, D>(array: &ArrayBase<S, D>) -> Result<Tensor, GradLabError>
    where
        T: Element,
        S: Data<Elem = T>,
        D: Dimension,
    {
        let shape = array.shape().to_vec();
        let data_vec: Vec<T> = array.iter().copied().collect();
        Tensor::from_vec(data_vec, shape)
    }

    /// Copies the tensor's values into a dynamic-rank `ndarray` array.
    ///
    /// Only values travel; autograd state stays with the tensor.
    ///
    /// # Errors
    /// `DataTypeMismatch` if `T` is not this tensor's element type.
    pub fn to_ndarray<T: Element>(&self) -> Result<ArrayD<T>, GradLabError> {
        let shape = self.shape();
        let data_vec = self.to_vec::<T>()?;
        ArrayD::from_shape_vec(IxDyn(&shape), data_vec).map_err(|e| {
            GradLabError::InternalError(format!("to_ndarray: {} for shape {:?}", e, shape))
        })
    }
}
