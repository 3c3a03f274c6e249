use std::sync::Arc;

use crate::autograd::BackwardOp;
use crate::error::GradLabError;
use crate::ops::apply_unary_op;
use crate::ops::arithmetic::mul_op;
use crate::tensor::Tensor;

/// Element-wise natural exponential.
pub fn exp_op(a: &Tensor) -> Result<Tensor, GradLabError> {
    let input = a.clone();
    apply_unary_op(
        a,
        "exp_op",
        f32::exp,
        f64::exp,
        None,
        move |output| Arc::new(ExpBackward { input, output }),
    )
}

/// d(e^x)/dx = e^x, reusing the forward result.
#[derive(Debug)]
struct ExpBackward {
    input: Tensor,
    output: Tensor,
}

impl BackwardOp for ExpBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, GradLabError> {
        Ok(vec![mul_op(grad_output, &self.output)?])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.input.clone()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autograd::grad_check::{check_grad, GradCheckError};
    use approx::assert_relative_eq;

    #[test]
    fn test_exp_forward() -> Result<(), GradLabError> {
        let a = Tensor::new_f64(vec![0.0, 1.0, -1.0], vec![3])?;
        let out = exp_op(&a)?.get_f64_data()?;
        assert_relative_eq!(out[0], 1.0);
        assert_relative_eq!(out[1], std::f64::consts::E);
        assert_relative_eq!(out[2], 1.0 / std::f64::consts::E);
        Ok(())
    }

    #[test]
    fn test_exp_check_grad() -> Result<(), GradCheckError> {
        let a = Tensor::new_f64(vec![-0.5, 0.0, 0.75], vec![3])?;
        a.set_requires_grad(true)?;
        check_grad(|inputs| exp_op(&inputs[0])?.sum(), &[a], 1e-6, 1e-5)
    }

    #[test]
    fn test_exp_rejects_integers() -> Result<(), GradLabError> {
        let a = Tensor::new_i64(vec![1], vec![1])?;
        assert!(matches!(exp_op(&a), Err(GradLabError::UnsupportedOperation(_))));
        Ok(())
    }
}
