use approx::assert_relative_eq;
use gradlab_core::nn::Module;
use gradlab_optim::objectives::{point_parameter, GaussianDifference};
use gradlab_optim::{GradientDescent, Landscape, MinimizeConfig, OptimError};

mod common;
use common::{descend_gaussian, grad_norm_at, init_logging};

#[test]
fn test_gradient_descent_finds_the_well() {
    init_logging();
    let outcome = descend_gaussian(
        [0.5, 0.5],
        |params| GradientDescent::new(params, 0.1).expect("optimizer"),
        &MinimizeConfig::default(),
    );
    assert!(outcome.converged);
    assert!((50..=60).contains(&outcome.iterations), "took {}", outcome.iterations);

    let end = outcome.trajectory.last_point().expect("non-empty trajectory");
    // The well is slightly pushed outward by the positive bump.
    assert!(end[0] > 1.5 && end[0] < 1.53, "ended at {:?}", end);
    assert_relative_eq!(end[0], end[1], epsilon = 1e-12);
    assert_relative_eq!(outcome.final_loss, -0.98940, epsilon = 1e-4);

    let objective = GaussianDifference::default_landscape().expect("landscape");
    assert!(grad_norm_at(&objective, end) < 1e-4);
}

#[test]
fn test_losses_decrease_along_gd_path() {
    let outcome = descend_gaussian(
        [0.5, 0.5],
        |params| GradientDescent::new(params, 0.1).expect("optimizer"),
        &MinimizeConfig::default(),
    );
    let losses = outcome.trajectory.losses();
    assert!(losses.windows(2).all(|w| w[1] <= w[0] + 1e-15));
    assert!(outcome.trajectory.path_length() > (2.0f64).sqrt());
}

#[test]
fn test_autograd_matches_closed_form_on_a_grid() -> Result<(), OptimError> {
    let objective = GaussianDifference::default_landscape()?;
    for &x in &[-1.0, 0.25, 0.9, 2.5] {
        for &y in &[-0.5, 0.7, 1.5] {
            let p = point_parameter(&[x, y])?;
            objective.forward(&p)?.backward(None)?;
            let grad = p.grad().expect("gradient").to_f64_vec();
            let expected = objective.analytic_gradient([x, y])?;
            assert_relative_eq!(grad[0], expected[0], epsilon = 1e-12);
            assert_relative_eq!(grad[1], expected[1], epsilon = 1e-12);
        }
    }
    Ok(())
}

#[test]
fn test_landscape_minimum_is_the_negative_bump() -> Result<(), OptimError> {
    let objective = GaussianDifference::default_landscape()?;
    let land = Landscape::sample(|p| objective.forward(p), (-1.0, 3.0), (-1.0, 3.0), 41)?;
    let (x, y, v) = land.argmin();
    assert_relative_eq!(x, 1.5, epsilon = 1e-9);
    assert_relative_eq!(y, 1.5, epsilon = 1e-9);
    assert_relative_eq!(v, (-4.5f64).exp() - 1.0, epsilon = 1e-9);
    // the peak sits at the positive bump
    let max = land.values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    assert_relative_eq!(max, objective.value_at([0.0, 0.0])?, epsilon = 1e-9);
    Ok(())
}
