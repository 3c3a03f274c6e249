use crate::error::GradLabError;
use crate::nn::Parameter;
use crate::tensor::Tensor;

/// The base trait for parametrized computations.
///
/// A module maps an input tensor to an output tensor through its learnable
/// [`Parameter`]s. Nested modules report their parameters with
/// dot-separated names (`"positive.center"`).
pub trait Module: std::fmt::Debug + Send + Sync {
    /// Performs a forward pass of the module.
    fn forward(&self, input: &Tensor) -> Result<Tensor, GradLabError>;

    /// All learnable parameters, including those of sub-modules.
    fn parameters(&self) -> Vec<&Parameter>;

    /// All learnable parameters with unique hierarchical names.
    fn named_parameters(&self) -> Vec<(String, &Parameter)>;

    /// Direct child modules with their field names. Empty for leaf modules.
    fn named_children(&self) -> Vec<(String, &dyn Module)> {
        Vec::new()
    }

    /// Freezes (`false`) or unfreezes (`true`) every parameter.
    fn set_requires_grad(&self, requires_grad: bool) -> Result<(), GradLabError> {
        for param in self.parameters() {
            param.set_requires_grad(requires_grad)?;
        }
        Ok(())
    }

    /// Drops the gradient of every parameter.
    fn zero_grad(&self) {
        for param in self.parameters() {
            param.clear_grad();
        }
    }
}
