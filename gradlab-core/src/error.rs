use crate::types::DType;
use thiserror::Error;

/// Custom error type for the GradLab tensor engine.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum GradLabError {
    #[error("Shape mismatch: expected {expected:?}, got {actual:?} during operation {operation}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
        operation: String,
    },

    #[error("Cannot broadcast shapes: {shape1:?} and {shape2:?}")]
    BroadcastError {
        shape1: Vec<usize>,
        shape2: Vec<usize>,
    },

    #[error("Tensor creation error: data length {data_len} does not match shape {shape:?}")]
    TensorCreationError { data_len: usize, shape: Vec<usize> },

    #[error("Data type mismatch for operation '{operation}': expected {expected:?}, got {actual:?}")]
    DataTypeMismatch {
        expected: DType,
        actual: DType,
        operation: String,
    },

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Backward called on a tensor that does not require grad and has no grad_fn.")]
    RequiresGradNotMet,

    #[error("Only floating point tensors can require gradients, got {0:?}")]
    NonFloatingPointGrad(DType),

    #[error("Backward called on non-scalar tensor without explicit gradient.")]
    BackwardNonScalar,

    #[error("In-place operation '{operation}' on a tensor that requires grad while grad mode is enabled. Wrap the update in no_grad().")]
    InPlaceOnLeafRequiringGrad { operation: String },

    #[error("Only single-element tensors can be converted to a scalar, got shape {shape:?}")]
    NotAScalar { shape: Vec<usize> },

    #[error("Internal error: {0}")]
    InternalError(String),
}
