//! Angle-based density for many-objective fronts.

use super::{objective_width, DensityEstimator};
use crate::error::{ParetoError, Result};

const DEGENERATE_NORM: f64 = 1e-10;

/// Sum of the angles to the nearest angular neighbours.
///
/// Every objective vector is translated by a reference point (the origin by
/// default) and compared by direction only. The density of a solution is the
/// sum of its `neighbours` smallest angles to the other members, so a larger
/// value means a more isolated direction. For each objective, the first
/// solution holding the minimum and the last one holding the maximum get
/// `+inf`. A lone solution gets `+inf`.
///
/// With normalization enabled each objective is min-max scaled to `[0, 1]`
/// first; an objective with a zero or infinite range maps to 0.
///
/// # References
///
/// - Xiang et al. (2016), "A Vector Angle-Based Evolutionary Algorithm for
///   Unconstrained Many-Objective Optimization"
/// - Liu et al. (2020), "An angle dominance criterion for evolutionary
///   many-objective optimization"
///
/// # Complexity
///
/// O(m * n² + n² * log n)
///
/// # Example
///
/// ```
/// use u_pareto::density::{AngleDensity, DensityEstimator};
///
/// let objectives: &[&[f64]] = &[&[1.0, 0.0], &[0.5, 0.5], &[0.0, 1.0]];
/// let density = AngleDensity::new(1).unwrap().estimate(objectives).unwrap();
///
/// assert!(density[0].is_infinite());
/// assert!((density[1] - std::f64::consts::FRAC_PI_4).abs() < 1e-12);
/// assert!(density[2].is_infinite());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AngleDensity {
    reference_point: Option<Vec<f64>>,
    normalize: bool,
    neighbours: usize,
}

impl Default for AngleDensity {
    fn default() -> Self {
        Self {
            reference_point: None,
            normalize: false,
            neighbours: 2,
        }
    }
}

impl AngleDensity {
    /// # Errors
    ///
    /// [`ParetoError::InvalidArgument`] if `neighbours` is zero.
    pub fn new(neighbours: usize) -> Result<Self> {
        if neighbours == 0 {
            return Err(ParetoError::InvalidArgument(
                "angle density needs at least one neighbour".into(),
            ));
        }
        Ok(Self {
            neighbours,
            ..Self::default()
        })
    }

    /// Measures angles around `point` instead of the origin.
    pub fn with_reference_point(mut self, point: Vec<f64>) -> Self {
        self.reference_point = Some(point);
        self
    }

    pub fn with_normalization(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    pub fn reference_point(&self) -> Option<&[f64]> {
        self.reference_point.as_deref()
    }

    pub fn normalize(&self) -> bool {
        self.normalize
    }

    pub fn neighbours(&self) -> usize {
        self.neighbours
    }

    /// Objective vectors relative to the reference point, normalized if asked.
    fn translate(&self, objectives: &[&[f64]], m: usize) -> Result<Vec<Vec<f64>>> {
        let mut rows: Vec<Vec<f64>> = objectives.iter().map(|row| row.to_vec()).collect();

        if self.normalize {
            for j in 0..m {
                let min = rows.iter().map(|r| r[j]).fold(f64::INFINITY, f64::min);
                let max = rows.iter().map(|r| r[j]).fold(f64::NEG_INFINITY, f64::max);
                let range = max - min;
                for row in &mut rows {
                    row[j] = if range.is_finite() && range > 0.0 {
                        (row[j] - min) / range
                    } else {
                        0.0
                    };
                }
            }
        }

        if let Some(point) = &self.reference_point {
            if point.len() != m {
                return Err(ParetoError::InvalidArgument(format!(
                    "reference point has {} values, objectives have {}",
                    point.len(),
                    m
                )));
            }
            for row in &mut rows {
                for (value, origin) in row.iter_mut().zip(point) {
                    *value -= origin;
                }
            }
        }
        Ok(rows)
    }
}

/// Angle between two vectors in `[0, pi]`; 0 when either is at the origin.
fn angle(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm_a < DEGENERATE_NORM || norm_b < DEGENERATE_NORM {
        return 0.0;
    }
    (dot / (norm_a * norm_b)).clamp(-1.0, 1.0).acos()
}

impl DensityEstimator for AngleDensity {
    fn estimate(&self, objectives: &[&[f64]]) -> Result<Vec<f64>> {
        let Some(m) = objective_width(objectives)? else {
            return Ok(Vec::new());
        };
        let n = objectives.len();
        if n == 1 {
            return Ok(vec![f64::INFINITY]);
        }

        let rows = self.translate(objectives, m)?;
        let mut angles = vec![vec![0.0f64; n]; n];
        for i in 0..n {
            for j in (i + 1)..n {
                let a = angle(&rows[i], &rows[j]);
                angles[i][j] = a;
                angles[j][i] = a;
            }
        }

        let k = self.neighbours.min(n - 1);
        let mut density: Vec<f64> = angles
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let mut others: Vec<f64> = row
                    .iter()
                    .enumerate()
                    .filter(|&(j, _)| j != i)
                    .map(|(_, &a)| a)
                    .collect();
                others.sort_by(f64::total_cmp);
                others[..k].iter().sum()
            })
            .collect();

        // extremes on the raw objective values
        for j in 0..m {
            let mut indices: Vec<usize> = (0..n).collect();
            indices.sort_by(|&a, &b| objectives[a][j].total_cmp(&objectives[b][j]));
            density[indices[0]] = f64::INFINITY;
            density[indices[n - 1]] = f64::INFINITY;
        }

        Ok(density)
    }
}
