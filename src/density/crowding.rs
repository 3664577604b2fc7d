//! Crowding distance (NSGA-II).

use super::{objective_width, DensityEstimator};
use crate::error::Result;

/// Crowding distance assignment for diversity preservation.
///
/// Measures how spread out the solutions of a front are in objective space.
/// Higher distance means the solution is more isolated.
///
/// # Algorithm (Deb et al., 2002)
///
/// Fronts of at most two solutions get `+inf` everywhere. Otherwise, for
/// each objective:
/// 1. Sort solutions by objective value
/// 2. Assign infinity to the first and last solution
/// 3. For interior solutions, add `(next - prev) / (max - min)`
///
/// An objective whose values are all equal, or whose range is infinite,
/// contributes nothing.
///
/// # Complexity
///
/// O(m * n * log n) where m = number of objectives, n = number of solutions
///
/// # Example
///
/// ```
/// use u_pareto::density::{CrowdingDistance, DensityEstimator};
///
/// let objectives: &[&[f64]] = &[&[1.0, 5.0], &[3.0, 3.0], &[5.0, 1.0]];
/// let distances = CrowdingDistance.estimate(&objectives).unwrap();
///
/// // Boundary solutions get infinity
/// assert!(distances[0].is_infinite());
/// assert!(distances[2].is_infinite());
/// // Interior solution gets (5 - 1) / 4 per objective
/// assert!((distances[1] - 2.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrowdingDistance;

impl DensityEstimator for CrowdingDistance {
    fn estimate(&self, objectives: &[&[f64]]) -> Result<Vec<f64>> {
        let Some(m) = objective_width(objectives)? else {
            return Ok(Vec::new());
        };
        let n = objectives.len();
        if n <= 2 {
            return Ok(vec![f64::INFINITY; n]);
        }

        let mut distances = vec![0.0f64; n];

        #[allow(clippy::needless_range_loop)] // obj_idx is a column index into 2D data
        for obj_idx in 0..m {
            // ties keep input order
            let mut indices: Vec<usize> = (0..n).collect();
            indices.sort_by(|&a, &b| objectives[a][obj_idx].total_cmp(&objectives[b][obj_idx]));

            distances[indices[0]] = f64::INFINITY;
            distances[indices[n - 1]] = f64::INFINITY;

            let min_val = objectives[indices[0]][obj_idx];
            let max_val = objectives[indices[n - 1]][obj_idx];
            let range = max_val - min_val;

            if range.is_finite() && range > 0.0 {
                for i in 1..(n - 1) {
                    let prev = objectives[indices[i - 1]][obj_idx];
                    let next = objectives[indices[i + 1]][obj_idx];
                    distances[indices[i]] += (next - prev) / range;
                }
            }
        }

        Ok(distances)
    }
}
