use gradlab_core::nn::Module;
use gradlab_core::Tensor;
use gradlab_optim::objectives::{point_parameter, GaussianDifference};
use gradlab_optim::{minimize, MinimizeConfig, MinimizeOutcome, Optimizer};

// Shared by several integration test crates; not every crate uses every helper.
#[allow(dead_code)]
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Runs `make_optimizer` from `start` on the default Gaussian landscape.
#[allow(dead_code)]
pub fn descend_gaussian<O, F>(start: [f64; 2], make_optimizer: F, config: &MinimizeConfig) -> MinimizeOutcome
where
    O: Optimizer,
    F: FnOnce(Vec<gradlab_core::nn::Parameter>) -> O,
{
    let objective = GaussianDifference::default_landscape().expect("landscape");
    let p = point_parameter(&start).expect("start point");
    let mut optimizer = make_optimizer(vec![p.clone()]);
    minimize(|| objective.forward(&p), &mut optimizer, config).expect("minimize failed")
}

#[allow(dead_code)]
pub fn grad_norm_at(objective: &GaussianDifference, point: &[f64]) -> f64 {
    let p = Tensor::new_f64(point.to_vec(), vec![point.len()])
        .expect("point")
        .requires_grad_(true)
        .expect("requires_grad");
    objective.forward(&p).expect("forward").backward(None).expect("backward");
    p.grad()
        .expect("gradient")
        .to_f64_vec()
        .iter()
        .map(|g| g * g)
        .sum::<f64>()
        .sqrt()
}
