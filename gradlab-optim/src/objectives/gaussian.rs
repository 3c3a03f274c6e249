use gradlab_core::nn::{Module, Parameter};
use gradlab_core::{no_grad, GradLabError, Tensor};

use super::{frozen_parameter, point2};
use crate::error::OptimError;

/// A radial Gaussian bump `A·exp(−‖p − μ‖² / (2σ²))` over the plane.
///
/// Parameters: `center` (μ, shape `[2]`), `amplitude` (A, 0-d) and `width`
/// (σ, 0-d). The input is a point of shape `[2]`; the output is 0-d.
#[derive(Debug, Clone)]
pub struct GaussianBump {
    center: Parameter,
    amplitude: Parameter,
    width: Parameter,
}

impl GaussianBump {
    /// # Errors
    /// `InvalidHyperparameter` unless `width` is positive and finite.
    pub fn new(center: [f64; 2], amplitude: f64, width: f64) -> Result<Self, OptimError> {
        if !width.is_finite() || width <= 0.0 {
            return Err(OptimError::invalid(
                "width",
                width,
                "width must be positive and finite",
            ));
        }
        Ok(GaussianBump {
            center: frozen_parameter(center.to_vec(), vec![2], "center")?,
            amplitude: frozen_parameter(vec![amplitude], vec![], "amplitude")?,
            width: frozen_parameter(vec![width], vec![], "width")?,
        })
    }

    pub fn center(&self) -> &Parameter {
        &self.center
    }

    pub fn amplitude(&self) -> &Parameter {
        &self.amplitude
    }

    pub fn width(&self) -> &Parameter {
        &self.width
    }

    /// `(A, μ, σ)` read out as plain numbers.
    fn values(&self) -> Result<(f64, [f64; 2], f64), OptimError> {
        Ok((self.amplitude.item()?, point2(&self.center)?, self.width.item()?))
    }

    /// Closed-form gradient `−A·exp(−r²/2σ²)·(p − μ)/σ²`.
    pub fn analytic_gradient(&self, p: [f64; 2]) -> Result<[f64; 2], OptimError> {
        let (a, mu, sigma) = self.values()?;
        let (dx, dy) = (p[0] - mu[0], p[1] - mu[1]);
        let s2 = sigma * sigma;
        let g = a * (-(dx * dx + dy * dy) / (2.0 * s2)).exp();
        Ok([-g * dx / s2, -g * dy / s2])
    }
}

impl Module for GaussianBump {
    fn forward(&self, input: &Tensor) -> Result<Tensor, GradLabError> {
        let sq_dist = input.sub(&self.center)?.pow_scalar(2.0)?.sum()?;
        let two_var = self.width.pow_scalar(2.0)?.mul_scalar(2.0)?;
        sq_dist.div(&two_var)?.neg()?.exp()?.mul(&self.amplitude)
    }

    fn parameters(&self) -> Vec<&Parameter> {
        vec![&self.center, &self.amplitude, &self.width]
    }

    fn named_parameters(&self) -> Vec<(String, &Parameter)> {
        self.parameters()
            .into_iter()
            .map(|p| (p.name().unwrap_or("param").to_string(), p))
            .collect()
    }
}

/// `positive(p) − negative(p)`: a hill to roll away from and a well to
/// settle into.
#[derive(Debug, Clone)]
pub struct GaussianDifference {
    positive: GaussianBump,
    negative: GaussianBump,
}

impl GaussianDifference {
    pub fn new(positive: GaussianBump, negative: GaussianBump) -> Self {
        GaussianDifference { positive, negative }
    }

    /// Unit bumps of width `1/√2` at `(0, 0)` (positive) and `(1.5, 1.5)`
    /// (negative), so that `f(p) = exp(−‖p‖²) − exp(−‖p − (1.5, 1.5)‖²)`.
    pub fn default_landscape() -> Result<Self, OptimError> {
        let width = std::f64::consts::FRAC_1_SQRT_2;
        Ok(GaussianDifference::new(
            GaussianBump::new([0.0, 0.0], 1.0, width)?,
            GaussianBump::new([1.5, 1.5], 1.0, width)?,
        ))
    }

    pub fn positive(&self) -> &GaussianBump {
        &self.positive
    }

    pub fn negative(&self) -> &GaussianBump {
        &self.negative
    }

    pub fn analytic_gradient(&self, p: [f64; 2]) -> Result<[f64; 2], OptimError> {
        let gp = self.positive.analytic_gradient(p)?;
        let gn = self.negative.analytic_gradient(p)?;
        Ok([gp[0] - gn[0], gp[1] - gn[1]])
    }

    /// Evaluates the objective at `p` without recording a graph.
    pub fn value_at(&self, p: [f64; 2]) -> Result<f64, OptimError> {
        let point = Tensor::new_f64(p.to_vec(), vec![2])?;
        let value = no_grad(|| self.forward(&point))?;
        Ok(value.item()?)
    }
}

impl Module for GaussianDifference {
    fn forward(&self, input: &Tensor) -> Result<Tensor, GradLabError> {
        self.positive.forward(input)?.sub(&self.negative.forward(input)?)
    }

    fn parameters(&self) -> Vec<&Parameter> {
        let mut params = self.positive.parameters();
        params.extend(self.negative.parameters());
        params
    }

    fn named_parameters(&self) -> Vec<(String, &Parameter)> {
        self.named_children()
            .into_iter()
            .flat_map(|(prefix, child)| {
                child
                    .named_parameters()
                    .into_iter()
                    .map(move |(name, p)| (format!("{}.{}", prefix, name), p))
            })
            .collect()
    }

    fn named_children(&self) -> Vec<(String, &dyn Module)> {
        vec![
            ("positive".to_string(), &self.positive as &dyn Module),
            ("negative".to_string(), &self.negative as &dyn Module),
        ]
    }
}

#[cfg(test)]
#[path = "gaussian_test.rs"]
mod tests;
