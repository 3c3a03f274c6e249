use std::sync::Arc;

use crate::autograd::BackwardOp;
use crate::error::GradLabError;
use crate::ops::apply_unary_op;
use crate::ops::arithmetic::div_op;
use crate::tensor::Tensor;

/// Element-wise square root.
pub fn sqrt_op(a: &Tensor) -> Result<Tensor, GradLabError> {
    let input = a.clone();
    apply_unary_op(
        a,
        "sqrt_op",
        f32::sqrt,
        f64::sqrt,
        None,
        move |output| Arc::new(SqrtBackward { input, output }),
    )
}

/// d(sqrt x)/dx = 1 / (2 sqrt x).
#[derive(Debug)]
struct SqrtBackward {
    input: Tensor,
    output: Tensor,
}

impl BackwardOp for SqrtBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, GradLabError> {
        let twice_output = self.output.mul_scalar(2.0)?;
        Ok(vec![div_op(grad_output, &twice_output)?])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.input.clone()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autograd::grad_check::{check_grad, GradCheckError};

    #[test]
    fn test_sqrt_forward_and_backward() -> Result<(), GradLabError> {
        let x = Tensor::new_f64(vec![4.0, 9.0], vec![2])?;
        x.set_requires_grad(true)?;
        let y = sqrt_op(&x)?;
        assert_eq!(y.get_f64_data()?, vec![2.0, 3.0]);
        y.sum()?.backward(None)?;
        let grad = x.grad().unwrap().get_f64_data()?;
        assert!((grad[0] - 0.25).abs() < 1e-12);
        assert!((grad[1] - 1.0 / 6.0).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn test_sqrt_check_grad() -> Result<(), GradCheckError> {
        let x = Tensor::new_f64(vec![0.5, 2.0, 10.0], vec![3])?;
        x.set_requires_grad(true)?;
        check_grad(|inputs| sqrt_op(&inputs[0])?.sum(), &[x], 1e-6, 1e-5)
    }
}
