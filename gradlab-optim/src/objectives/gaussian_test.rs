use super::*;
use crate::objectives::point_parameter;
use approx::assert_relative_eq;
use gradlab_core::autograd::check_grad;

#[test]
fn test_bump_value() -> Result<(), OptimError> {
    let bump = GaussianBump::new([1.0, -1.0], 2.0, 0.5)?;
    let peak = bump.forward(&Tensor::new_f64(vec![1.0, -1.0], vec![2])?)?;
    assert_eq!(peak.shape(), Vec::<usize>::new());
    assert_relative_eq!(peak.item()?, 2.0);

    // r^2 = 0.25, 2σ^2 = 0.5 -> 2·e^{-0.5}
    let off = bump.forward(&Tensor::new_f64(vec![1.5, -1.0], vec![2])?)?;
    assert_relative_eq!(off.item()?, 2.0 * (-0.5f64).exp(), epsilon = 1e-12);
    Ok(())
}

#[test]
fn test_bump_rejects_bad_width() {
    for width in [0.0, -1.0, f64::INFINITY] {
        assert!(matches!(
            GaussianBump::new([0.0, 0.0], 1.0, width),
            Err(OptimError::InvalidHyperparameter { .. })
        ));
    }
}

#[test]
fn test_default_landscape_values() -> Result<(), OptimError> {
    let f = GaussianDifference::default_landscape()?;
    assert_relative_eq!(f.value_at([0.0, 0.0])?, 1.0 - (-4.5f64).exp(), epsilon = 1e-12);
    assert_relative_eq!(f.value_at([1.5, 1.5])?, (-4.5f64).exp() - 1.0, epsilon = 1e-12);
    // symmetric around the diagonal midpoint
    assert_relative_eq!(
        f.value_at([0.75, 0.75])?,
        0.0,
        epsilon = 1e-12
    );
    Ok(())
}

#[test]
fn test_default_landscape_parameters_frozen_and_named() -> Result<(), OptimError> {
    let f = GaussianDifference::default_landscape()?;
    let names: Vec<String> = f.named_parameters().into_iter().map(|(n, _)| n).collect();
    assert_eq!(
        names,
        vec![
            "positive.center",
            "positive.amplitude",
            "positive.width",
            "negative.center",
            "negative.amplitude",
            "negative.width",
        ]
    );
    assert_eq!(f.parameters().len(), 6);
    assert!(f.parameters().iter().all(|p| !p.requires_grad()));
    assert_eq!(f.named_children().len(), 2);
    assert_eq!(f.negative().center().to_f64_vec(), vec![1.5, 1.5]);
    Ok(())
}

#[test]
fn test_autograd_matches_analytic_gradient() -> Result<(), OptimError> {
    let f = GaussianDifference::default_landscape()?;
    for start in [[0.5, 0.5], [-0.3, 1.2], [2.0, 0.1]] {
        let p = point_parameter(&start)?;
        f.forward(&p)?.backward(None)?;
        let grad = p.grad().unwrap().to_f64_vec();
        let expected = f.analytic_gradient(start)?;
        assert_relative_eq!(grad[0], expected[0], epsilon = 1e-12);
        assert_relative_eq!(grad[1], expected[1], epsilon = 1e-12);
        // only the point receives a gradient
        assert!(f.parameters().iter().all(|q| q.grad().is_none()));
    }
    let g = f.analytic_gradient([0.5, 0.5])?;
    assert_relative_eq!(g[0], -0.8772012261858588, epsilon = 1e-12);
    assert_relative_eq!(g[1], g[0]);
    Ok(())
}

#[test]
fn test_gradient_check_with_unfrozen_parameters() -> Result<(), OptimError> {
    let bump = GaussianBump::new([0.2, -0.4], 1.5, 0.8)?;
    bump.set_requires_grad(true)?;
    let point = Tensor::new_f64(vec![0.5, 0.1], vec![2])?;
    point.set_requires_grad(true)?;
    let inputs = [
        point,
        bump.center().tensor().clone(),
        bump.amplitude().tensor().clone(),
        bump.width().tensor().clone(),
    ];
    let result = check_grad(
        |t| {
            let sq_dist = t[0].sub(&t[1])?.pow_scalar(2.0)?.sum()?;
            let two_var = t[3].pow_scalar(2.0)?.mul_scalar(2.0)?;
            sq_dist.div(&two_var)?.neg()?.exp()?.mul(&t[2])
        },
        &inputs,
        1e-6,
        1e-5,
    );
    assert!(result.is_ok(), "{:?}", result);
    Ok(())
}

#[test]
fn test_module_freeze_roundtrip() -> Result<(), OptimError> {
    let bump = GaussianBump::new([0.0, 0.0], 1.0, 1.0)?;
    bump.set_requires_grad(true)?;
    let y = bump.forward(&Tensor::new_f64(vec![1.0, 0.0], vec![2])?)?;
    y.backward(None)?;
    // dA = exp(-1/2)
    assert_relative_eq!(
        bump.amplitude().grad().unwrap().item()?,
        (-0.5f64).exp(),
        epsilon = 1e-12
    );
    bump.zero_grad();
    bump.set_requires_grad(false)?;
    assert!(bump.amplitude().grad().is_none());
    assert!(!bump.width().requires_grad());
    Ok(())
}
