//! Reverse-mode automatic differentiation.
//!
//! Every differentiable op attaches a [`BackwardOp`] to its output. The
//! backward pass (see `Tensor::backward`) sorts the recorded graph
//! topologically and hands each node's incoming gradient to its op, which
//! returns one gradient per input.

pub mod backward_op;
pub mod grad_check;
pub mod grad_mode;
pub mod graph;

pub use backward_op::BackwardOp;
pub use grad_check::{check_grad, GradCheckError};
pub use grad_mode::{is_grad_enabled, no_grad, NoGradGuard};
