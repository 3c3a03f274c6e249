//! Assertion helpers shared by the unit tests and integration tests.

use approx::relative_eq;

use crate::tensor::Tensor;

/// Asserts that `actual` has `expected_shape` and that every element is
/// within `tolerance` of `expected_data`. Works for any dtype; values are
/// compared as `f64`.
///
/// # Panics
/// On a shape, length or value mismatch.
pub fn check_tensor_near(actual: &Tensor, expected_shape: &[usize], expected_data: &[f64], tolerance: f64) {
    assert_eq!(actual.shape(), expected_shape, "Shape mismatch");
    let actual_data = actual.to_f64_vec();
    assert_eq!(actual_data.len(), expected_data.len(), "Data length mismatch");
    for (i, (a, e)) in actual_data.iter().zip(expected_data.iter()).enumerate() {
        if !relative_eq!(*a, *e, epsilon = tolerance, max_relative = tolerance) {
            panic!(
                "Data mismatch at index {}: actual={:?}, expected={:?}, diff={:?}, tolerance={:?}",
                i,
                a,
                e,
                (a - e).abs(),
                tolerance
            );
        }
    }
}
