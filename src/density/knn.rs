//! k-th nearest neighbour density (SPEA2).

use super::{objective_width, DensityEstimator};
use crate::error::{ParetoError, Result};

/// Distance to the k-th nearest neighbour in objective space.
///
/// The SPEA2 density estimator, expressed with this crate's convention that
/// a larger value means a more isolated solution. Distances are Euclidean on
/// the raw objective values. When a front has `k` or fewer other members the
/// farthest available neighbour is used; a lone solution gets `+inf`.
///
/// # Complexity
///
/// O(m * n² + n² * log n)
///
/// # Example
///
/// ```
/// use u_pareto::density::{DensityEstimator, KnnDensity};
///
/// let objectives: &[&[f64]] = &[&[0.0, 0.0], &[1.0, 0.0], &[5.0, 0.0]];
/// let density = KnnDensity::new(1).unwrap().estimate(&objectives).unwrap();
///
/// assert_eq!(density, vec![1.0, 1.0, 4.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnnDensity {
    k: usize,
}

impl Default for KnnDensity {
    fn default() -> Self {
        Self { k: 1 }
    }
}

impl KnnDensity {
    /// # Errors
    ///
    /// [`ParetoError::InvalidArgument`] if `k` is zero.
    pub fn new(k: usize) -> Result<Self> {
        if k == 0 {
            return Err(ParetoError::InvalidArgument(
                "knn density needs at least one neighbour".into(),
            ));
        }
        Ok(Self { k })
    }

    pub fn k(&self) -> usize {
        self.k
    }
}

fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Symmetric matrix of pairwise Euclidean distances.
pub(crate) fn distance_matrix(objectives: &[&[f64]]) -> Vec<Vec<f64>> {
    let n = objectives.len();
    let mut matrix = vec![vec![0.0f64; n]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            let d = euclidean(objectives[i], objectives[j]);
            matrix[i][j] = d;
            matrix[j][i] = d;
        }
    }
    matrix
}

impl DensityEstimator for KnnDensity {
    fn estimate(&self, objectives: &[&[f64]]) -> Result<Vec<f64>> {
        objective_width(objectives)?;
        let n = objectives.len();
        if n <= 1 {
            return Ok(vec![f64::INFINITY; n]);
        }

        let matrix = distance_matrix(objectives);
        let neighbour = self.k.min(n - 1) - 1;
        let density = matrix
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let mut distances: Vec<f64> = row
                    .iter()
                    .enumerate()
                    .filter(|&(j, _)| j != i)
                    .map(|(_, &d)| d)
                    .collect();
                distances.sort_by(f64::total_cmp);
                distances[neighbour]
            })
            .collect();
        Ok(density)
    }
}
