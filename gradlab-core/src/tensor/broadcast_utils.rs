//! Shape arithmetic shared by the element-wise kernels and their backward passes.

use std::ops::AddAssign;

use num_traits::Zero;

use crate::error::GradLabError;

/// Row-major strides for a contiguous tensor of `shape`.
pub fn calculate_strides(shape: &[usize]) -> Vec<usize> {
    let mut strides = vec![0; shape.len()];
    if shape.is_empty() {
        return strides;
    }
    strides[shape.len() - 1] = 1;
    for i in (0..shape.len() - 1).rev() {
        strides[i] = strides[i + 1] * shape[i + 1];
    }
    strides
}

/// Converts a linear index into coordinates for a row-major `shape`.
pub fn index_to_coord(index: usize, strides: &[usize], shape: &[usize]) -> Vec<usize> {
    let mut coords = vec![0; shape.len()];
    let mut remainder = index;
    for (dim, &stride) in strides.iter().enumerate() {
        if stride == 0 {
            continue;
        }
        coords[dim] = remainder / stride;
        remainder %= stride;
    }
    coords
}

/// Computes the broadcast shape of two shapes following NumPy rules.
///
/// Shapes are aligned on their trailing dimensions; each pair of dimensions
/// must be equal or one of them must be 1.
pub fn broadcast_shapes(shape1: &[usize], shape2: &[usize]) -> Result<Vec<usize>, GradLabError> {
    let rank = shape1.len().max(shape2.len());
    let mut result = vec![0; rank];
    for i in 0..rank {
        let d1 = if i < rank - shape1.len() { 1 } else { shape1[i - (rank - shape1.len())] };
        let d2 = if i < rank - shape2.len() { 1 } else { shape2[i - (rank - shape2.len())] };
        result[i] = match (d1, d2) {
            (a, b) if a == b => a,
            (1, b) => b,
            (a, 1) => a,
            _ => {
                return Err(GradLabError::BroadcastError {
                    shape1: shape1.to_vec(),
                    shape2: shape2.to_vec(),
                })
            }
        };
    }
    Ok(result)
}

/// Maps every linear index of `output_shape` to the linear index of the
/// input with `input_shape` it reads from under broadcasting.
///
/// `input_shape` must be broadcast-compatible with `output_shape`.
pub(crate) fn broadcast_source_indices(input_shape: &[usize], output_shape: &[usize]) -> Vec<usize> {
    let numel: usize = output_shape.iter().product();
    if input_shape == output_shape {
        return (0..numel).collect();
    }
    let output_strides = calculate_strides(output_shape);
    let input_strides = calculate_strides(input_shape);
    let rank_diff = output_shape.len() - input_shape.len();

    (0..numel)
        .map(|i| {
            let coords = index_to_coord(i, &output_strides, output_shape);
            input_shape
                .iter()
                .enumerate()
                .map(|(dim, &size)| {
                    let coord = if size == 1 { 0 } else { coords[rank_diff + dim] };
                    coord * input_strides[dim]
                })
                .sum()
        })
        .collect()
}

/// Sums `data` (laid out with `from_shape`) down to `to_shape`.
///
/// This is the adjoint of broadcasting: every element of the gradient is
/// added to the input element it was broadcast from.
pub(crate) fn sum_to_shape<T>(data: &[T], from_shape: &[usize], to_shape: &[usize]) -> Vec<T>
where
    T: Copy + Zero + AddAssign,
{
    if from_shape == to_shape {
        return data.to_vec();
    }
    let target_numel: usize = to_shape.iter().product();
    let mut result = vec![T::zero(); target_numel];
    for (i, target) in broadcast_source_indices(to_shape, from_shape).into_iter().enumerate() {
        result[target] += data[i];
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_strides() {
        assert_eq!(calculate_strides(&[2, 3, 4]), vec![12, 4, 1]);
        assert_eq!(calculate_strides(&[5]), vec![1]);
        assert!(calculate_strides(&[]).is_empty());
    }

    #[test]
    fn test_broadcast_shapes() {
        assert_eq!(broadcast_shapes(&[2, 3], &[3]).unwrap(), vec![2, 3]);
        assert_eq!(broadcast_shapes(&[2, 1], &[1, 4]).unwrap(), vec![2, 4]);
        assert_eq!(broadcast_shapes(&[], &[3]).unwrap(), vec![3]);
        assert!(matches!(
            broadcast_shapes(&[2, 2], &[3]),
            Err(GradLabError::BroadcastError { .. })
        ));
    }

    #[test]
    fn test_broadcast_source_indices_row_vector() {
        // [3] broadcast over [2, 3] reads 0,1,2 twice
        assert_eq!(broadcast_source_indices(&[3], &[2, 3]), vec![0, 1, 2, 0, 1, 2]);
        // [2, 1] broadcast over [2, 3] repeats each row value
        assert_eq!(broadcast_source_indices(&[2, 1], &[2, 3]), vec![0, 0, 0, 1, 1, 1]);
    }

    #[test]
    fn test_sum_to_shape() {
        let grad = vec![1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0];
        assert_eq!(sum_to_shape(&grad, &[2, 3], &[3]), vec![5.0, 7.0, 9.0]);
        assert_eq!(sum_to_shape(&grad, &[2, 3], &[2, 1]), vec![6.0, 15.0]);
        assert_eq!(sum_to_shape(&grad, &[2, 3], &[]), vec![21.0]);
    }
}
