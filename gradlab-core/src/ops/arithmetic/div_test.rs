use super::*;
use crate::autograd::grad_check::{check_grad, GradCheckError};

#[test]
fn test_div_forward() -> Result<(), GradLabError> {
    let a = Tensor::new_f64(vec![1.0, 4.0, 9.0], vec![3])?;
    let b = Tensor::new_f64(vec![2.0, 2.0, 3.0], vec![3])?;
    assert_eq!(div_op(&a, &b)?.get_f64_data()?, vec![0.5, 2.0, 3.0]);
    Ok(())
}

#[test]
fn test_div_by_zero_is_infinite() -> Result<(), GradLabError> {
    let a = Tensor::new(vec![1.0, -1.0], vec![2])?;
    let b = Tensor::scalar(0.0);
    let data = div_op(&a, &b)?.get_f32_data()?;
    assert!(data[0].is_infinite() && data[0] > 0.0);
    assert!(data[1].is_infinite() && data[1] < 0.0);
    Ok(())
}

#[test]
fn test_div_rejects_integers() -> Result<(), GradLabError> {
    let a = Tensor::new_i64(vec![4], vec![1])?;
    let b = Tensor::new_i64(vec![2], vec![1])?;
    assert!(matches!(
        div_op(&a, &b),
        Err(GradLabError::UnsupportedOperation(_))
    ));
    Ok(())
}

#[test]
fn test_div_check_grad() -> Result<(), GradCheckError> {
    let a = Tensor::new_f64(vec![1.0, -2.0, 3.0], vec![3])?;
    let b = Tensor::new_f64(vec![0.5, 1.5, -2.0], vec![3])?;
    a.set_requires_grad(true)?;
    b.set_requires_grad(true)?;
    check_grad(
        |inputs| div_op(&inputs[0], &inputs[1])?.sum(),
        &[a, b],
        1e-6,
        1e-5,
    )
}
