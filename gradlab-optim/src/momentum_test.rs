use super::*;
use approx::assert_relative_eq;

fn param(data: Vec<f64>) -> Parameter {
    let n = data.len();
    Parameter::new_unnamed(Tensor::new_f64(data, vec![n]).unwrap()).unwrap()
}

fn set_grad(p: &Parameter, data: Vec<f64>) {
    p.clear_grad();
    let n = data.len();
    p.acc_grad(Tensor::new_f64(data, vec![n]).unwrap()).unwrap();
}

#[test]
fn test_momentum_update_rule() -> Result<(), OptimError> {
    let p = param(vec![1.0]);
    let mut optim = MomentumGradientDescent::new(vec![p.clone()], 0.1, 0.9)?;
    assert!(optim.velocity(0).is_none());

    // v1 = 1, x1 = 1 - 0.1 = 0.9
    set_grad(&p, vec![1.0]);
    optim.step()?;
    assert_relative_eq!(p.item()?, 0.9, epsilon = 1e-12);
    assert_relative_eq!(optim.velocity(0).unwrap().item()?, 1.0);

    // v2 = 0.9 * 1 + 1 = 1.9, x2 = 0.9 - 0.19 = 0.71
    set_grad(&p, vec![1.0]);
    optim.step()?;
    assert_relative_eq!(optim.velocity(0).unwrap().item()?, 1.9, epsilon = 1e-12);
    assert_relative_eq!(p.item()?, 0.71, epsilon = 1e-12);
    Ok(())
}

#[test]
fn test_zero_momentum_matches_gradient_descent() -> Result<(), OptimError> {
    let p = param(vec![2.0, -1.0]);
    let mut optim = MomentumGradientDescent::new(vec![p.clone()], 0.5, 0.0)?;
    for _ in 0..3 {
        set_grad(&p, vec![1.0, 2.0]);
        optim.step()?;
    }
    let data = p.get_f64_data()?;
    assert_relative_eq!(data[0], 0.5, epsilon = 1e-12);
    assert_relative_eq!(data[1], -4.0, epsilon = 1e-12);
    Ok(())
}

#[test]
fn test_parameters_without_gradient_are_skipped() -> Result<(), OptimError> {
    let a = param(vec![1.0]);
    let b = param(vec![1.0]);
    let mut optim = MomentumGradientDescent::new(vec![a.clone(), b.clone()], 0.1, 0.5)?;
    set_grad(&a, vec![1.0]);
    optim.step()?;
    assert!(optim.velocity(0).is_some());
    assert!(optim.velocity(1).is_none());
    assert_eq!(b.item()?, 1.0);
    assert!(optim.velocity(7).is_none());
    Ok(())
}

#[test]
fn test_reset_state() -> Result<(), OptimError> {
    let p = param(vec![0.0]);
    let mut optim = MomentumGradientDescent::new(vec![p.clone()], 0.1, 0.9)?;
    set_grad(&p, vec![1.0]);
    optim.step()?;
    optim.reset_state();
    assert!(optim.velocity(0).is_none());
    // Behaves like a first step again: x = -0.1 - 0.1
    optim.step()?;
    assert_relative_eq!(p.item()?, -0.2, epsilon = 1e-12);
    Ok(())
}

#[test]
fn test_velocity_is_independent_of_gradient() -> Result<(), OptimError> {
    let p = param(vec![0.0]);
    let mut optim = MomentumGradientDescent::new(vec![p.clone()], 0.1, 0.5)?;
    set_grad(&p, vec![2.0]);
    optim.step()?;
    optim.step()?;
    // The gradient tensor itself must not be modified by the velocity update.
    assert_eq!(p.grad().unwrap().item()?, 2.0);
    assert_relative_eq!(optim.velocity(0).unwrap().item()?, 3.0, epsilon = 1e-12);
    Ok(())
}

#[test]
fn test_momentum_validation() {
    let p = param(vec![0.0]);
    for mu in [-0.1, 1.0, 1.5, f64::NAN] {
        assert!(matches!(
            MomentumGradientDescent::new(vec![p.clone()], 0.1, mu),
            Err(OptimError::InvalidHyperparameter { .. })
        ));
    }
    assert!(matches!(
        MomentumGradientDescent::new(vec![p.clone()], 0.0, 0.5),
        Err(OptimError::InvalidHyperparameter { .. })
    ));
    assert_eq!(
        MomentumGradientDescent::new(Vec::new(), 0.1, 0.5).unwrap_err(),
        OptimError::EmptyParameterList
    );
}
