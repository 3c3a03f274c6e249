use std::fmt::Debug;

use crate::error::GradLabError;
use crate::tensor::Tensor;

/// Defines the interface for the backward pass of a differentiable tensor operation.
///
/// Any operation that creates a non-leaf `Tensor` must attach an
/// implementation to the output's `grad_fn`. During `backward()` it receives
/// `dL/dOutput` and returns `dL/dInput_i` for each input, following the
/// chain rule:
///
/// `dL/dInput_i = dL/dOutput · dOutput/dInput_i`
pub trait BackwardOp: Debug + Send + Sync {
    /// Computes the gradients of the operation's inputs.
    ///
    /// The returned vector must follow the order of [`BackwardOp::inputs`],
    /// and each gradient must have the shape and dtype of its input.
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, GradLabError>;

    /// Returns the input tensors that participated in the forward operation.
    ///
    /// These are the edges the backward pass follows to reach the leaves.
    fn inputs(&self) -> Vec<Tensor>;
}
