use approx::relative_eq;
use thiserror::Error;

use crate::autograd::grad_mode::no_grad;
use crate::buffer::Buffer;
use crate::error::GradLabError;
use crate::tensor::Tensor;
use crate::types::DType;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for input {input_index}, element {element_index}: analytical {analytical_grad} != numerical {numerical_grad} (difference {difference})")]
    GradientMismatch {
        input_index: usize,
        element_index: usize,
        analytical_grad: f64,
        numerical_grad: f64,
        difference: f64,
    },

    #[error("Function must return a single-element tensor, got shape {0:?}")]
    NonScalarOutput(Vec<usize>),

    #[error("Unsupported data type for gradient check: {0:?}")]
    UnsupportedDType(DType),

    #[error("Input {input_index} requires grad but has no gradient after backward pass.")]
    MissingAnalyticalGrad { input_index: usize },

    #[error("Numerical gradient is not finite for input {input_index}, element {element_index} (f+ = {loss_plus}, f- = {loss_minus})")]
    NumericalGradNotFinite {
        input_index: usize,
        element_index: usize,
        loss_plus: f64,
        loss_minus: f64,
    },

    #[error("Gradient check input {input_index} must be a leaf tensor")]
    InputNotLeaf { input_index: usize },

    #[error("Tensor error during gradient check: {0}")]
    TensorError(#[from] GradLabError),
}

/// Compares the autograd gradient of a scalar function with central finite
/// differences.
///
/// `func` is evaluated once with graph recording to obtain the analytical
/// gradients of every input that requires grad, then twice per element with
/// `x ± epsilon` to obtain `(f(x + ε) − f(x − ε)) / 2ε`. An element passes
/// if the two values agree within `tolerance`, absolutely or relatively.
///
/// Existing gradients on `inputs` are cleared first and are left holding
/// the analytical gradient afterwards.
pub fn check_grad<F>(
    func: F,
    inputs: &[Tensor],
    epsilon: f64,
    tolerance: f64,
) -> Result<(), GradCheckError>
where
    F: Fn(&[Tensor]) -> Result<Tensor, GradLabError>,
{
    for (i, input) in inputs.iter().enumerate() {
        let dtype = input.dtype();
        if !dtype.is_floating_point() {
            return Err(GradCheckError::UnsupportedDType(dtype));
        }
        if !input.is_leaf() {
            return Err(GradCheckError::InputNotLeaf { input_index: i });
        }
        input.clear_grad();
    }

    let output = func(inputs)?;
    if output.numel() != 1 {
        return Err(GradCheckError::NonScalarOutput(output.shape()));
    }
    if output.requires_grad() {
        output.backward(None)?;
    }

    for (i, input) in inputs.iter().enumerate() {
        if !input.requires_grad() {
            continue;
        }
        let analytical = input
            .grad()
            .ok_or(GradCheckError::MissingAnalyticalGrad { input_index: i })?
            .to_f64_vec();
        let original = input.to_f64_vec();

        for elem_idx in 0..original.len() {
            let loss_plus = evaluate_perturbed(&func, inputs, i, &original, elem_idx, epsilon)?;
            let loss_minus = evaluate_perturbed(&func, inputs, i, &original, elem_idx, -epsilon)?;
            let numerical = (loss_plus - loss_minus) / (2.0 * epsilon);
            if !numerical.is_finite() {
                return Err(GradCheckError::NumericalGradNotFinite {
                    input_index: i,
                    element_index: elem_idx,
                    loss_plus,
                    loss_minus,
                });
            }

            let analytical_grad = analytical[elem_idx];
            if !relative_eq!(
                analytical_grad,
                numerical,
                epsilon = tolerance,
                max_relative = tolerance
            ) {
                return Err(GradCheckError::GradientMismatch {
                    input_index: i,
                    element_index: elem_idx,
                    analytical_grad,
                    numerical_grad: numerical,
                    difference: (analytical_grad - numerical).abs(),
                });
            }
        }
    }
    Ok(())
}

/// Evaluates `func` with element `elem_idx` of input `input_index` shifted by `delta`.
fn evaluate_perturbed<F>(
    func: &F,
    inputs: &[Tensor],
    input_index: usize,
    original: &[f64],
    elem_idx: usize,
    delta: f64,
) -> Result<f64, GradCheckError>
where
    F: Fn(&[Tensor]) -> Result<Tensor, GradLabError>,
{
    let original_input = &inputs[input_index];
    let mut values = original.to_vec();
    values[elem_idx] += delta;
    let perturbed = Tensor::from_buffer(
        Buffer::from_f64_values(values, original_input.dtype()),
        original_input.shape(),
    )?;

    let mut perturbed_inputs = inputs.to_vec();
    perturbed_inputs[input_index] = perturbed;
    let output = no_grad(|| func(&perturbed_inputs))?;
    Ok(output.item()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_grad_polynomial() -> Result<(), GradCheckError> {
        // f(x) = sum(x^3 + 2x)
        let x = Tensor::new_f64(vec![-1.5, 0.5, 2.0], vec![3])?;
        x.set_requires_grad(true)?;
        check_grad(
            |inputs| {
                let cube = inputs[0].pow_scalar(3.0)?;
                let lin = inputs[0].mul_scalar(2.0)?;
                cube.add(&lin)?.sum()
            },
            &[x.clone()],
            1e-6,
            1e-5,
        )?;
        // Analytical gradient left in place: 3x^2 + 2
        let grad = x.grad().unwrap().get_f64_data()?;
        assert!((grad[0] - 8.75).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn test_check_grad_detects_wrong_gradient() -> Result<(), GradCheckError> {
        // detach() hides the dependency on x from autograd, so the
        // analytical gradient (2) disagrees with the numerical one (4x + 2).
        let x = Tensor::new_f64(vec![1.0], vec![1])?;
        x.set_requires_grad(true)?;
        let result = check_grad(
            |inputs| {
                let hidden = inputs[0].detach().mul(&inputs[0].detach())?;
                inputs[0].mul_scalar(2.0)?.add(&hidden.mul_scalar(2.0)?)?.sum()
            },
            &[x],
            1e-6,
            1e-5,
        );
        assert!(matches!(result, Err(GradCheckError::GradientMismatch { .. })));
        Ok(())
    }

    #[test]
    fn test_check_grad_rejects_integer_inputs() -> Result<(), GradCheckError> {
        let x = Tensor::new_i64(vec![1, 2], vec![2])?;
        let result = check_grad(|inputs| inputs[0].sum(), &[x], 1e-6, 1e-5);
        assert_eq!(result, Err(GradCheckError::UnsupportedDType(DType::I64)));
        Ok(())
    }
}
