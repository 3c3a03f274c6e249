use super::*;
use approx::assert_relative_eq;
use gradlab_core::{GradLabError, Tensor};

fn param(data: Vec<f64>) -> Parameter {
    let n = data.len();
    Parameter::new_unnamed(Tensor::new_f64(data, vec![n]).unwrap()).unwrap()
}

#[test]
fn test_gd_step() -> Result<(), OptimError> {
    let p1 = param(vec![1.0, 2.0]);
    let p2 = param(vec![5.0]);
    p1.acc_grad(Tensor::new_f64(vec![10.0, -20.0], vec![2])?)?;

    let mut optim = GradientDescent::new(vec![p1.clone(), p2.clone()], 0.1)?;
    optim.step()?;

    let data = p1.get_f64_data()?;
    assert_relative_eq!(data[0], 0.0, epsilon = 1e-12);
    assert_relative_eq!(data[1], 4.0, epsilon = 1e-12);
    // No gradient: untouched.
    assert_eq!(p2.get_f64_data()?, vec![5.0]);
    Ok(())
}

#[test]
fn test_gd_step_on_f32_parameter() -> Result<(), OptimError> {
    let p = Parameter::new_unnamed(Tensor::new(vec![1.0, 1.0], vec![2])?)?;
    p.acc_grad(Tensor::new(vec![0.5, -0.5], vec![2])?)?;
    let mut optim = GradientDescent::new(vec![p.clone()], 0.1)?;
    optim.step()?;
    let data = p.get_f32_data()?;
    assert_relative_eq!(data[0], 0.95, epsilon = 1e-6);
    assert_relative_eq!(data[1], 1.05, epsilon = 1e-6);
    Ok(())
}

#[test]
fn test_gd_zero_grad() -> Result<(), OptimError> {
    let p = param(vec![3.0]);
    p.pow_scalar(2.0)?.sum()?.backward(None)?;
    assert!(p.grad().is_some());
    let mut optim = GradientDescent::new(vec![p.clone()], 0.1)?;
    optim.zero_grad();
    assert!(p.grad().is_none());
    Ok(())
}

#[test]
fn test_gd_keeps_parameter_tracked() -> Result<(), OptimError> {
    let p = param(vec![3.0]);
    let mut optim = GradientDescent::new(vec![p.clone()], 0.25)?;
    p.pow_scalar(2.0)?.sum()?.backward(None)?;
    optim.step()?;
    // 3 - 0.25 * 6
    assert_eq!(p.get_f64_data()?, vec![1.5]);
    assert!(p.requires_grad());
    assert!(p.is_leaf());
    Ok(())
}

#[test]
fn test_gd_hyperparameter_validation() -> Result<(), GradLabError> {
    let p = param(vec![0.0]);
    for lr in [0.0, -0.1, f64::NAN, f64::INFINITY] {
        assert!(matches!(
            GradientDescent::new(vec![p.clone()], lr),
            Err(OptimError::InvalidHyperparameter { .. })
        ));
    }
    assert_eq!(
        GradientDescent::new(Vec::new(), 0.1).unwrap_err(),
        OptimError::EmptyParameterList
    );

    let mut optim = GradientDescent::new(vec![p], 0.1).unwrap();
    assert!(optim.set_learning_rate(-1.0).is_err());
    assert_eq!(optim.learning_rate(), 0.1);
    optim.set_learning_rate(0.05).unwrap();
    assert_eq!(optim.learning_rate(), 0.05);
    assert_eq!(optim.params().len(), 1);
    Ok(())
}
