use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

use crate::buffer::Buffer;
use crate::error::GradLabError;
use crate::tensor::Tensor;
use crate::types::DType;

/// Creates a new F32 tensor filled with zeros.
pub fn zeros(shape: &[usize]) -> Result<Tensor, GradLabError> {
    full(shape, 0.0)
}

/// Creates a new F64 tensor filled with zeros.
pub fn zeros_f64(shape: &[usize]) -> Result<Tensor, GradLabError> {
    full_f64(shape, 0.0)
}

/// Creates a new F32 tensor filled with ones.
pub fn ones(shape: &[usize]) -> Result<Tensor, GradLabError> {
    full(shape, 1.0)
}

/// Creates a new F64 tensor filled with ones.
pub fn ones_f64(shape: &[usize]) -> Result<Tensor, GradLabError> {
    full_f64(shape, 1.0)
}

/// Creates a new F32 tensor filled with `value`.
pub fn full(shape: &[usize], value: f32) -> Result<Tensor, GradLabError> {
    let numel = shape.iter().product();
    Tensor::new(vec![value; numel], shape.to_vec())
}

/// Creates a new F64 tensor filled with `value`.
pub fn full_f64(shape: &[usize], value: f64) -> Result<Tensor, GradLabError> {
    let numel = shape.iter().product();
    Tensor::new_f64(vec![value; numel], shape.to_vec())
}

/// Creates a tensor with the shape and dtype of `tensor`, filled with `value`.
///
/// The value is converted to the tensor's element type.
pub fn full_like(tensor: &Tensor, value: f64) -> Result<Tensor, GradLabError> {
    let (shape, dtype) = {
        let guard = tensor.read_data();
        (guard.shape.clone(), guard.dtype)
    };
    full_with_dtype(&shape, value, dtype)
}

/// Creates a tensor of zeros with the shape and dtype of `tensor`.
pub fn zeros_like(tensor: &Tensor) -> Result<Tensor, GradLabError> {
    full_like(tensor, 0.0)
}

/// Creates a tensor of ones with the shape and dtype of `tensor`.
pub fn ones_like(tensor: &Tensor) -> Result<Tensor, GradLabError> {
    full_like(tensor, 1.0)
}

pub(crate) fn full_with_dtype(shape: &[usize], value: f64, dtype: DType) -> Result<Tensor, GradLabError> {
    let numel = shape.iter().product();
    Tensor::from_buffer(Buffer::from_f64_values(vec![value; numel], dtype), shape.to_vec())
}

/// Values `start, start + step, ...` strictly below `end`, as a 1-D F32 tensor.
pub fn arange(start: f32, end: f32, step: f32) -> Result<Tensor, GradLabError> {
    if step == 0.0 || (end > start && step < 0.0) || (end < start && step > 0.0) {
        return Err(GradLabError::UnsupportedOperation(format!(
            "Invalid step {} for arange({}, {})",
            step, start, end
        )));
    }
    let numel = ((end - start) / step).ceil().max(0.0) as usize;
    let data_vec: Vec<f32> = (0..numel).map(|i| start + i as f32 * step).collect();
    Tensor::new(data_vec, vec![numel])
}

/// `steps` evenly spaced F64 values from `start` to `end`, both included.
pub fn linspace(start: f64, end: f64, steps: usize) -> Result<Tensor, GradLabError> {
    if steps < 2 {
        return Err(GradLabError::UnsupportedOperation(format!(
            "linspace requires at least 2 steps, got {}",
            steps
        )));
    }
    let step = (end - start) / (steps - 1) as f64;
    let mut data_vec: Vec<f64> = (0..steps).map(|i| start + i as f64 * step).collect();
    // Pin the last value to avoid accumulated rounding.
    data_vec[steps - 1] = end;
    Tensor::new_f64(data_vec, vec![steps])
}

/// F32 tensor with values drawn uniformly from `[low, high)`.
pub fn rand_uniform(shape: &[usize], low: f32, high: f32) -> Result<Tensor, GradLabError> {
    if !(low < high) {
        return Err(GradLabError::UnsupportedOperation(format!(
            "rand_uniform requires low < high, got [{}, {})",
            low, high
        )));
    }
    let numel = shape.iter().product();
    let mut rng = rand::thread_rng();
    let data_vec: Vec<f32> = (0..numel).map(|_| rng.gen_range(low..high)).collect();
    Tensor::new(data_vec, shape.to_vec())
}

/// F32 tensor with values drawn from the standard normal distribution.
pub fn randn(shape: &[usize]) -> Result<Tensor, GradLabError> {
    let mut rng = rand::thread_rng();
    randn_with_rng(shape, &mut rng)
}

/// Same as [`randn`], but reproducible for a given `seed`.
pub fn randn_seeded(shape: &[usize], seed: u64) -> Result<Tensor, GradLabError> {
    let mut rng = StdRng::seed_from_u64(seed);
    randn_with_rng(shape, &mut rng)
}

fn randn_with_rng<R: Rng>(shape: &[usize], rng: &mut R) -> Result<Tensor, GradLabError> {
    let numel = shape.iter().product();
    let data_vec: Vec<f32> = (0..numel).map(|_| rng.sample::<f32, _>(StandardNormal)).collect();
    Tensor::new(data_vec, shape.to_vec())
}

#[cfg(test)]
#[path = "create_test.rs"]
mod tests;
