//! The iterative minimization driver.

use gradlab_core::{no_grad, GradLabError, Tensor};

use crate::error::OptimError;
use crate::optimizer::Optimizer;
use crate::trajectory::Trajectory;

/// Stopping rules and logging cadence for [`minimize`].
#[derive(Debug, Clone, PartialEq)]
pub struct MinimizeConfig {
    /// Maximum number of optimizer steps.
    pub max_iter: usize,
    /// Converged once the L2 norm of one step's parameter update is at most
    /// this value.
    pub tolerance: f64,
    /// Emit a `debug!` line every `n` iterations.
    pub log_every: Option<usize>,
}

impl Default for MinimizeConfig {
    fn default() -> Self {
        MinimizeConfig {
            max_iter: 1000,
            tolerance: 1e-6,
            log_every: None,
        }
    }
}

impl MinimizeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn log_every(mut self, every: usize) -> Self {
        self.log_every = Some(every);
        self
    }

    fn validate(&self) -> Result<(), OptimError> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(OptimError::invalid(
                "tolerance",
                self.tolerance,
                "tolerance must be finite and non-negative",
            ));
        }
        if self.log_every == Some(0) {
            return Err(OptimError::invalid("log_every", 0.0, "must be at least 1"));
        }
        Ok(())
    }
}

/// Result of a [`minimize`] run.
#[derive(Debug, Clone, PartialEq)]
pub struct MinimizeOutcome {
    /// Starting point plus the point after every step, with their losses.
    pub trajectory: Trajectory,
    /// Number of optimizer steps taken.
    pub iterations: usize,
    /// `true` if the update norm fell below the tolerance.
    pub converged: bool,
    /// Objective value at the final point.
    pub final_loss: f64,
}

/// Runs `optimizer` on `objective` until convergence or `max_iter` steps.
///
/// Each iteration clears the gradients, evaluates the objective (which must
/// return a single-element tensor depending on the optimizer's parameters),
/// back-propagates, and steps. The run stops as soon as the L2 norm of the
/// update over all parameters is `≤ tolerance`.
///
/// # Errors
/// * `NonScalarObjective` if the objective returns more than one element.
/// * `Diverged` if the loss becomes `NaN` or infinite.
/// * `Tensor` for errors raised while evaluating or differentiating.
pub fn minimize<O, F>(
    mut objective: F,
    optimizer: &mut O,
    config: &MinimizeConfig,
) -> Result<MinimizeOutcome, OptimError>
where
    O: Optimizer + ?Sized,
    F: FnMut() -> Result<Tensor, GradLabError>,
{
    config.validate()?;

    let mut trajectory = Trajectory::new();
    let mut iterations = 0;
    let mut converged = false;

    for iteration in 1..=config.max_iter {
        optimizer.zero_grad();
        let loss = objective()?;
        let loss_value = scalar_loss(&loss, iteration)?;
        let before = flatten_params(optimizer);
        trajectory.push(before.clone(), loss_value);

        loss.backward(None)?;
        optimizer.step()?;
        iterations = iteration;

        let after = flatten_params(optimizer);
        let update_norm = before
            .iter()
            .zip(after.iter())
            .map(|(b, a)| (a - b).powi(2))
            .sum::<f64>()
            .sqrt();

        if let Some(every) = config.log_every {
            if iteration % every == 0 {
                log::debug!(
                    "iteration {}: loss = {:.6e}, update norm = {:.3e}",
                    iteration,
                    loss_value,
                    update_norm
                );
            }
        }

        if update_norm <= config.tolerance {
            converged = true;
            break;
        }
    }
    optimizer.zero_grad();

    let final_loss_tensor = no_grad(&mut objective)?;
    let final_loss = scalar_loss(&final_loss_tensor, iterations + 1)?;
    trajectory.push(flatten_params(optimizer), final_loss);

    if converged {
        log::info!(
            "converged after {} iterations, final loss {:.6e}",
            iterations,
            final_loss
        );
    } else {
        log::warn!(
            "stopped after max_iter = {} iterations without converging (final loss {:.6e})",
            config.max_iter,
            final_loss
        );
    }

    Ok(MinimizeOutcome {
        trajectory,
        iterations,
        converged,
        final_loss,
    })
}

fn scalar_loss(loss: &Tensor, iteration: usize) -> Result<f64, OptimError> {
    if loss.numel() != 1 {
        return Err(OptimError::NonScalarObjective { shape: loss.shape() });
    }
    let value = loss.item()?;
    if !value.is_finite() {
        return Err(OptimError::Diverged { iteration, value });
    }
    Ok(value)
}

fn flatten_params<O: Optimizer + ?Sized>(optimizer: &O) -> Vec<f64> {
    optimizer
        .params()
        .iter()
        .flat_map(|p| p.to_f64_vec())
        .collect()
}

#[cfg(test)]
#[path = "minimize_test.rs"]
mod tests;
