use super::*;
use crate::autograd::grad_check::{check_grad, GradCheckError};
use crate::utils::testing::check_tensor_near;

#[test]
fn test_mul_forward() -> Result<(), GradLabError> {
    let a = Tensor::new(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2])?;
    let b = Tensor::new(vec![2.0, 0.5], vec![2])?;
    let result = mul_op(&a, &b)?;
    check_tensor_near(&result, &[2, 2], &[2.0, 1.0, 6.0, 2.0], 1e-6);
    Ok(())
}

#[test]
fn test_mul_same_tensor_twice() -> Result<(), GradLabError> {
    // x * x must accumulate both contributions: d/dx = 2x
    let x = Tensor::scalar_f64(3.0);
    x.set_requires_grad(true)?;
    let y = mul_op(&x, &x)?;
    y.backward(None)?;
    assert_eq!(x.grad().unwrap().item()?, 6.0);
    Ok(())
}

#[test]
fn test_mul_backward_only_where_required() -> Result<(), GradLabError> {
    let a = Tensor::new_f64(vec![1.0, 2.0], vec![2])?;
    let b = Tensor::new_f64(vec![3.0, 4.0], vec![2])?;
    a.set_requires_grad(true)?;
    mul_op(&a, &b)?.sum()?.backward(None)?;
    assert_eq!(a.grad().unwrap().get_f64_data()?, vec![3.0, 4.0]);
    assert!(b.grad().is_none());
    Ok(())
}

#[test]
fn test_mul_check_grad_broadcast() -> Result<(), GradCheckError> {
    let a = Tensor::new_f64(vec![0.5, -1.0, 2.0, 3.0, 1.5, -0.5], vec![2, 3])?;
    let b = Tensor::new_f64(vec![1.5, -2.5, 0.25], vec![1, 3])?;
    a.set_requires_grad(true)?;
    b.set_requires_grad(true)?;
    check_grad(
        |inputs| mul_op(&inputs[0], &inputs[1])?.sum(),
        &[a, b],
        1e-6,
        1e-5,
    )
}
