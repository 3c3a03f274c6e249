use ndarray::Array2;

/// The sequence of points visited by a minimization run and the loss at
/// each of them. A point is all optimized parameters flattened, in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trajectory {
    points: Vec<Vec<f64>>,
    losses: Vec<f64>,
}

impl Trajectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, point: Vec<f64>, loss: f64) {
        self.points.push(point);
        self.losses.push(loss);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Vec<f64>] {
        &self.points
    }

    pub fn losses(&self) -> &[f64] {
        &self.losses
    }

    pub fn last_point(&self) -> Option<&[f64]> {
        self.points.last().map(Vec::as_slice)
    }

    /// Total Euclidean length of the polyline through the visited points.
    pub fn path_length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| {
                pair[0]
                    .iter()
                    .zip(pair[1].iter())
                    .map(|(a, b)| (b - a).powi(2))
                    .sum::<f64>()
                    .sqrt()
            })
            .sum()
    }

    /// Points as rows of a `[len, dim]` array, ready for plotting.
    pub fn to_array(&self) -> Array2<f64> {
        let dim = self.points.first().map_or(0, Vec::len);
        Array2::from_shape_fn((self.points.len(), dim), |(i, j)| self.points[i][j])
    }
}
