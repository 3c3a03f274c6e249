use ndarray::{Array1, Array2};
use gradlab_core::{no_grad, GradLabError, Tensor};

use crate::error::OptimError;

/// An objective sampled on a regular 2-D grid, for contour plots.
///
/// `values[[iy, ix]]` holds `f(xs[ix], ys[iy])`.
#[derive(Debug, Clone, PartialEq)]
pub struct Landscape {
    pub xs: Array1<f64>,
    pub ys: Array1<f64>,
    pub values: Array2<f64>,
}

impl Landscape {
    /// Evaluates `objective` at every grid point of `x_range × y_range`
    /// with `steps` points per axis, both ends included.
    ///
    /// The objective receives an F64 point of shape `[2]` and must return a
    /// single-element tensor. Nothing is recorded for autograd.
    pub fn sample<F>(
        mut objective: F,
        x_range: (f64, f64),
        y_range: (f64, f64),
        steps: usize,
    ) -> Result<Landscape, OptimError>
    where
        F: FnMut(&Tensor) -> Result<Tensor, GradLabError>,
    {
        if steps < 2 {
            return Err(OptimError::invalid(
                "steps",
                steps as f64,
                "a landscape needs at least 2 steps per axis",
            ));
        }
        let xs = Array1::linspace(x_range.0, x_range.1, steps);
        let ys = Array1::linspace(y_range.0, y_range.1, steps);
        let mut values = Array2::zeros((steps, steps));

        no_grad(|| -> Result<(), OptimError> {
            for (iy, &y) in ys.iter().enumerate() {
                for (ix, &x) in xs.iter().enumerate() {
                    let point = Tensor::new_f64(vec![x, y], vec![2])?;
                    let value = objective(&point)?;
                    if value.numel() != 1 {
                        return Err(OptimError::NonScalarObjective { shape: value.shape() });
                    }
                    values[[iy, ix]] = value.item()?;
                }
            }
            Ok(())
        })?;

        log::debug!("sampled landscape on a {}x{} grid", steps, steps);
        Ok(Landscape { xs, ys, values })
    }

    /// Grid point with the smallest value, as `(x, y, value)`.
    pub fn argmin(&self) -> (f64, f64, f64) {
        let mut best = (self.xs[0], self.ys[0], f64::INFINITY);
        for ((iy, ix), &v) in self.values.indexed_iter() {
            if v < best.2 {
                best = (self.xs[ix], self.ys[iy], v);
            }
        }
        best
    }
}
