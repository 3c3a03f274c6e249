use super::*;
use crate::autograd::grad_check::{check_grad, GradCheckError};

#[test]
fn test_pow_scalar_forward() -> Result<(), GradLabError> {
    let a = Tensor::new_f64(vec![1.0, 2.0, 3.0], vec![3])?;
    assert_eq!(pow_scalar_op(&a, 2.0)?.get_f64_data()?, vec![1.0, 4.0, 9.0]);
    let roots = pow_scalar_op(&a, 0.5)?.get_f64_data()?;
    assert!((roots[1] - 2f64.sqrt()).abs() < 1e-12);
    Ok(())
}

#[test]
fn test_pow_scalar_backward() -> Result<(), GradLabError> {
    let x = Tensor::scalar_f64(2.0);
    x.set_requires_grad(true)?;
    pow_scalar_op(&x, 3.0)?.backward(None)?;
    assert_eq!(x.grad().unwrap().item()?, 12.0);
    Ok(())
}

#[test]
fn test_pow_scalar_rejects_integers() -> Result<(), GradLabError> {
    let a = Tensor::new_i64(vec![2], vec![1])?;
    assert!(pow_scalar_op(&a, 2.0).is_err());
    Ok(())
}

#[test]
fn test_pow_scalar_check_grad() -> Result<(), GradCheckError> {
    let a = Tensor::new_f64(vec![0.5, 1.5, 2.5], vec![3])?;
    a.set_requires_grad(true)?;
    check_grad(|inputs| pow_scalar_op(&inputs[0], 1.5)?.sum(), &[a], 1e-6, 1e-5)
}
