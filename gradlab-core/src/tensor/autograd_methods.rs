use std::collections::HashMap;
use std::sync::Arc;

use crate::autograd::grad_mode::NoGradGuard;
use crate::autograd::graph::{topological_sort, NodeId};
use crate::autograd::BackwardOp;
use crate::error::GradLabError;
use crate::ops::arithmetic::add_op;
use crate::tensor::create::full_with_dtype;
use crate::tensor::Tensor;
use crate::tensor_data::TensorData;

impl Tensor {
    /// Checks if this tensor requires gradient computation.
    pub fn requires_grad(&self) -> bool {
        self.read_data().requires_grad
    }

    /// Sets the `requires_grad` flag for this tensor.
    ///
    /// # Errors
    /// Returns `NonFloatingPointGrad` when enabling it on an integer tensor.
    pub fn set_requires_grad(&self, requires_grad: bool) -> Result<(), GradLabError> {
        let mut guard = self.write_data();
        if requires_grad && !guard.dtype.is_floating_point() {
            return Err(GradLabError::NonFloatingPointGrad(guard.dtype));
        }
        if requires_grad && guard.grad_fn.is_some() {
            log::warn!(
                "Setting requires_grad=true on a non-leaf tensor of shape {:?}; gradients will not accumulate here. Did you mean detach()?",
                guard.shape
            );
        }
        guard.requires_grad = requires_grad;
        Ok(())
    }

    /// Builder-style variant of [`Tensor::set_requires_grad`].
    pub fn requires_grad_(self, requires_grad: bool) -> Result<Self, GradLabError> {
        self.set_requires_grad(requires_grad)?;
        Ok(self)
    }

    /// A tensor is a leaf if it was not produced by a recorded operation.
    pub fn is_leaf(&self) -> bool {
        self.read_data().grad_fn.is_none()
    }

    /// Returns a handle to the gradient tensor, if it exists.
    pub fn grad(&self) -> Option<Tensor> {
        self.read_data().grad.clone()
    }

    /// Returns the backward node that produced this tensor.
    pub fn grad_fn(&self) -> Option<Arc<dyn BackwardOp>> {
        self.read_data().grad_fn.clone()
    }

    /// Clears the gradient tensor associated with this tensor.
    pub fn clear_grad(&self) {
        self.write_data().grad = None;
    }

    /// Accumulates `grad_to_add` into the `grad` field.
    ///
    /// The first accumulation stores the gradient; later ones sum into it.
    pub fn acc_grad(&self, grad_to_add: Tensor) -> Result<(), GradLabError> {
        let (shape, dtype) = {
            let guard = self.read_data();
            (guard.shape.clone(), guard.dtype)
        };
        if grad_to_add.shape() != shape {
            return Err(GradLabError::ShapeMismatch {
                expected: shape,
                actual: grad_to_add.shape(),
                operation: "acc_grad".to_string(),
            });
        }
        if grad_to_add.dtype() != dtype {
            return Err(GradLabError::DataTypeMismatch {
                expected: dtype,
                actual: grad_to_add.dtype(),
                operation: "acc_grad".to_string(),
            });
        }

        let _guard = NoGradGuard::new();
        let existing = self.write_data().grad.take();
        let new_grad = match existing {
            Some(existing_grad) => add_op(&existing_grad, &grad_to_add)?,
            None => grad_to_add.detach(),
        };
        self.write_data().grad = Some(new_grad);
        Ok(())
    }

    /// Returns a new leaf tensor sharing this tensor's storage but cut off
    /// from the graph. It never requires grad.
    pub fn detach(&self) -> Tensor {
        let guard = self.read_data();
        Tensor::from_tensor_data(TensorData {
            buffer: guard.buffer.clone(),
            dtype: guard.dtype,
            shape: guard.shape.clone(),
            strides: guard.strides.clone(),
            requires_grad: false,
            grad: None,
            grad_fn: None,
        })
    }

    /// Performs the backward pass starting from this tensor.
    ///
    /// Computes the gradient of this tensor with respect to every leaf of the
    /// graph that requires grad and accumulates it into the leaf's `grad`.
    /// The graph is kept, so calling `backward` again accumulates again.
    ///
    /// # Arguments
    /// * `gradient`: Seed gradient `dL/dself`. If `None`, this tensor must
    ///   hold a single element and the seed is `1`.
    ///
    /// # Errors
    /// * `RequiresGradNotMet` if this tensor does not require grad.
    /// * `BackwardNonScalar` if `gradient` is `None` and the tensor has more
    ///   than one element.
    /// * `ShapeMismatch` / `DataTypeMismatch` for a malformed seed.
    pub fn backward(&self, gradient: Option<Tensor>) -> Result<(), GradLabError> {
        let (shape, dtype, requires_grad) = {
            let guard = self.read_data();
            (guard.shape.clone(), guard.dtype, guard.requires_grad)
        };
        if !requires_grad {
            return Err(GradLabError::RequiresGradNotMet);
        }

        let grad_init = match gradient {
            Some(g) => {
                if g.shape() != shape {
                    return Err(GradLabError::ShapeMismatch {
                        expected: shape,
                        actual: g.shape(),
                        operation: "backward seed".to_string(),
                    });
                }
                if g.dtype() != dtype {
                    return Err(GradLabError::DataTypeMismatch {
                        expected: dtype,
                        actual: g.dtype(),
                        operation: "backward seed".to_string(),
                    });
                }
                g.detach()
            }
            None => {
                if shape.iter().product::<usize>() != 1 {
                    return Err(GradLabError::BackwardNonScalar);
                }
                full_with_dtype(&shape, 1.0, dtype)?
            }
        };

        // Gradient computations must not themselves be recorded.
        let _no_grad = NoGradGuard::new();

        let sorted_nodes = topological_sort(self);
        log::trace!("backward: {} nodes in graph", sorted_nodes.len());

        let mut grad_map: HashMap<NodeId, Tensor> = HashMap::new();
        grad_map.insert(self.node_id(), grad_init);

        for node in sorted_nodes {
            let accumulated_grad = match grad_map.remove(&node.node_id()) {
                Some(grad) => grad,
                None => continue,
            };

            let grad_fn = match node.grad_fn() {
                Some(grad_fn) => grad_fn,
                None => {
                    if node.requires_grad() {
                        node.acc_grad(accumulated_grad)?;
                    }
                    continue;
                }
            };

            let input_grads = grad_fn.backward(&accumulated_grad)?;
            let inputs = grad_fn.inputs();
            if input_grads.len() != inputs.len() {
                return Err(GradLabError::InternalError(format!(
                    "BackwardOp returned {} gradients for {} inputs ({:?})",
                    input_grads.len(),
                    inputs.len(),
                    grad_fn
                )));
            }

            for (input, grad) in inputs.into_iter().zip(input_grads) {
                if !input.requires_grad() {
                    continue;
                }
                let id = input.node_id();
                let summed = match grad_map.remove(&id) {
                    Some(existing) => add_op(&existing, &grad)?,
                    None => grad,
                };
                grad_map.insert(id, summed);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "autograd_methods_test.rs"]
mod tests;
