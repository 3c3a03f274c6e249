//! # gradlab-core
//!
//! A small CPU tensor library with reverse-mode automatic differentiation.
//!
//! It is the engine the GradLab lessons are written against: tensors carry a
//! data type, a shape, an optional gradient and the backward node that
//! produced them. Calling [`Tensor::backward`] on a scalar walks the recorded
//! graph in reverse and accumulates gradients into every leaf that requires
//! them.
//!
//! ```
//! use gradlab_core::Tensor;
//!
//! let x = Tensor::scalar_f64(3.0);
//! x.set_requires_grad(true).unwrap();
//! let y = x.mul(&x).unwrap(); // y = x^2
//! y.backward(None).unwrap();
//! assert_eq!(x.grad().unwrap().item().unwrap(), 6.0);
//! ```

pub mod autograd;
pub mod buffer;
pub mod error;
pub mod nn;
pub mod ops;
pub mod tensor;
pub mod tensor_data;
pub mod types;
pub mod utils;

pub use autograd::grad_mode::{is_grad_enabled, no_grad, NoGradGuard};
pub use error::GradLabError;
pub use tensor::Tensor;
pub use types::{DType, Element};

// Re-export traits and crates required by public signatures
pub use ndarray;
pub use num_traits;
