use std::fmt;
use std::ops::Deref;

use crate::error::GradLabError;
use crate::tensor::Tensor;

/// A tensor registered as a learnable parameter of a [`Module`](crate::nn::Module).
///
/// Creating a `Parameter` turns on `requires_grad`. Cloning is shallow: the
/// clone is another handle to the same tensor, so an optimizer holding a
/// clone updates the module's parameter.
#[derive(Clone)]
pub struct Parameter {
    tensor: Tensor,
    name: Option<String>,
}

impl Parameter {
    /// Wraps `tensor` as a parameter.
    ///
    /// # Errors
    /// `NonFloatingPointGrad` for integer tensors.
    pub fn new(tensor: Tensor, name: Option<String>) -> Result<Self, GradLabError> {
        tensor.set_requires_grad(true)?;
        Ok(Parameter { tensor, name })
    }

    pub fn new_unnamed(tensor: Tensor) -> Result<Self, GradLabError> {
        Self::new(tensor, None)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns a handle to the underlying tensor.
    pub fn tensor(&self) -> &Tensor {
        &self.tensor
    }

    pub fn into_inner(self) -> Tensor {
        self.tensor
    }
}

impl Deref for Parameter {
    type Target = Tensor;

    fn deref(&self) -> &Self::Target {
        &self.tensor
    }
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "Parameter(name={:?}, {:?})", name, self.tensor),
            None => write!(f, "Parameter({:?})", self.tensor),
        }
    }
}

#[cfg(test)]
#[path = "parameter_test.rs"]
mod tests;
