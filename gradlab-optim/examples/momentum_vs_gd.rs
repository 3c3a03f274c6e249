//! Lesson 5: gradient descent vs. momentum on a difference of two Gaussians.
//!
//! Both optimizers start on the slope of the positive bump and roll into
//! the well of the negative one. Momentum gets there in fewer steps when
//! it is light, and overshoots back and forth when it is heavy.
//!
//! Run with `RUST_LOG=debug` to see the per-iteration log.

use gradlab_core::nn::Module;
use gradlab_optim::objectives::{point_parameter, GaussianDifference};
use gradlab_optim::{
    minimize, GradientDescent, Landscape, MinimizeConfig, MinimizeOutcome,
    MomentumGradientDescent, OptimError, Optimizer,
};

fn run<O: Optimizer>(
    label: &str,
    objective: &GaussianDifference,
    start: [f64; 2],
    make: impl FnOnce(Vec<gradlab_core::nn::Parameter>) -> Result<O, OptimError>,
) -> Result<MinimizeOutcome, OptimError> {
    let p = point_parameter(&start)?;
    let mut optimizer = make(vec![p.clone()])?;
    let config = MinimizeConfig::default().max_iter(5000).log_every(25);
    let outcome = minimize(|| objective.forward(&p), &mut optimizer, &config)?;
    let end = outcome.trajectory.last_point().unwrap_or(&start[..]);
    println!(
        "{:<16} iterations = {:4}  converged = {:5}  end = ({:.5}, {:.5})  f = {:.5}  path = {:.3}",
        label,
        outcome.iterations,
        outcome.converged,
        end[0],
        end[1],
        outcome.final_loss,
        outcome.trajectory.path_length()
    );
    Ok(outcome)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let objective = GaussianDifference::default_landscape()?;
    for (name, param) in objective.named_parameters() {
        println!("{:<20} {:?}", name, param.to_f64_vec());
    }

    println!("\n--- The landscape ---");
    let land = Landscape::sample(|p| objective.forward(p), (-1.0, 3.0), (-1.0, 3.0), 41)?;
    let (x, y, v) = land.argmin();
    println!("grid minimum at ({:.2}, {:.2}) with f = {:.5}", x, y, v);
    // Coarse text contour: one character per 4x4 block of the grid.
    for row in land.values.outer_iter().step_by(4).rev() {
        let line: String = row
            .iter()
            .step_by(4)
            .map(|&f| match f {
                f if f < -0.5 => '#',
                f if f < -0.1 => '+',
                f if f < 0.1 => '.',
                f if f < 0.5 => '-',
                _ => '^',
            })
            .collect();
        println!("  {}", line);
    }

    println!("\n--- Descent from (0.5, 0.5), lr = 0.1 ---");
    let start = [0.5, 0.5];
    let grad = objective.analytic_gradient(start)?;
    println!("gradient at start: ({:.5}, {:.5})", grad[0], grad[1]);

    let gd = run("gd", &objective, start, |p| GradientDescent::new(p, 0.1))?;
    let light = run("momentum 0.5", &objective, start, |p| {
        MomentumGradientDescent::new(p, 0.1, 0.5)
    })?;
    run("momentum 0.9", &objective, start, |p| {
        MomentumGradientDescent::new(p, 0.1, 0.9)
    })?;
    println!(
        "momentum 0.5 needed {} fewer steps than plain gradient descent",
        gd.iterations.saturating_sub(light.iterations)
    );

    println!("\n--- First steps of each path ---");
    for (label, outcome) in [("gd", &gd), ("momentum 0.5", &light)] {
        let path = outcome.trajectory.to_array();
        let shown: Vec<String> = path
            .outer_iter()
            .take(5)
            .map(|r| format!("({:.3}, {:.3})", r[0], r[1]))
            .collect();
        println!("{:<14} {}", label, shown.join(" -> "));
    }

    Ok(())
}
