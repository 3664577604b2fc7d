//! Density estimation within a front.
//!
//! A [`DensityEstimator`] assigns each solution a scalar describing how
//! sparsely populated its neighbourhood in objective space is. Throughout
//! this crate **larger density means more isolated**, i.e. more desirable
//! when truncating for diversity; extreme solutions receive `+inf`.
//!
//! Density is only meaningful among mutually non-dominated solutions, so
//! estimators operate on a single front (or on an archive, which is one
//! front by construction).
//!
//! # Strategies
//!
//! - [`CrowdingDistance`]: NSGA-II crowding distance (Deb et al., 2002)
//! - [`KnnDensity`]: distance to the k-th nearest neighbour (SPEA2)
//! - [`AngleDensity`]: sum of angles to the nearest angular neighbours, seen
//!   from a reference point (many-objective fronts)
//! - [`DensityStrategy`]: enum over all three, for configuration-driven selection

mod angle;
mod crowding;
mod knn;

pub use angle::AngleDensity;
pub use crowding::CrowdingDistance;
pub use knn::KnnDensity;

pub(crate) use knn::distance_matrix;

use std::cmp::Ordering;

use crate::error::{ParetoError, Result};
use crate::solution::{objective_count_of, Solution};

/// A strategy that estimates density within a front.
pub trait DensityEstimator {
    /// Returns one density value per objective vector.
    ///
    /// # Errors
    ///
    /// Vectors of different lengths, or empty vectors.
    fn estimate(&self, objectives: &[&[f64]]) -> Result<Vec<f64>>;

    /// Writes the density of every solution whose index is in `front`.
    ///
    /// Solutions outside `front` are left untouched.
    ///
    /// # Errors
    ///
    /// Mismatched or empty objective vectors, or an out-of-bounds index.
    fn compute_front<V>(&self, solutions: &mut [Solution<V>], front: &[usize]) -> Result<()> {
        if objective_count_of(solutions, front)?.is_none() {
            return Ok(());
        }
        let values = {
            let objectives: Vec<&[f64]> = front
                .iter()
                .map(|&i| solutions[i].objectives.as_slice())
                .collect();
            self.estimate(&objectives)?
        };
        for (&i, value) in front.iter().zip(values) {
            solutions[i].density = Some(value);
        }
        Ok(())
    }

    /// Treats all of `solutions` as one front.
    fn compute<V>(&self, solutions: &mut [Solution<V>]) -> Result<()> {
        let all: Vec<usize> = (0..solutions.len()).collect();
        self.compute_front(solutions, &all)
    }
}

/// Orders solutions by density, most isolated first.
///
/// Solutions without a density sort last.
pub fn density_descending<V>(a: &Solution<V>, b: &Solution<V>) -> Ordering {
    let da = a.density.unwrap_or(f64::NEG_INFINITY);
    let db = b.density.unwrap_or(f64::NEG_INFINITY);
    db.total_cmp(&da)
}

/// Shared objective count of `objectives`; `None` when there are no rows.
pub(crate) fn objective_width(objectives: &[&[f64]]) -> Result<Option<usize>> {
    let Some(first) = objectives.first() else {
        return Ok(None);
    };
    let expected = first.len();
    if expected == 0 {
        return Err(ParetoError::NoObjectives);
    }
    match objectives.iter().find(|row| row.len() != expected) {
        Some(row) => Err(ParetoError::ObjectiveCountMismatch {
            expected,
            found: row.len(),
        }),
        None => Ok(Some(expected)),
    }
}

/// Density estimator selected by value, e.g. from a configuration file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DensityStrategy {
    /// [`CrowdingDistance`].
    #[default]
    CrowdingDistance,
    /// [`KnnDensity`] with the given neighbour count.
    Knn { k: usize },
    /// [`AngleDensity`] around the origin.
    Angle { neighbours: usize, normalize: bool },
}

impl DensityStrategy {
    /// Rejects a neighbour count of zero.
    pub fn validate(&self) -> Result<()> {
        match self {
            DensityStrategy::Knn { k: 0 } => Err(ParetoError::InvalidArgument(
                "knn density needs at least one neighbour".into(),
            )),
            DensityStrategy::Angle { neighbours: 0, .. } => Err(ParetoError::InvalidArgument(
                "angle density needs at least one neighbour".into(),
            )),
            _ => Ok(()),
        }
    }
}

impl DensityEstimator for DensityStrategy {
    fn estimate(&self, objectives: &[&[f64]]) -> Result<Vec<f64>> {
        match *self {
            DensityStrategy::CrowdingDistance => CrowdingDistance.estimate(objectives),
            DensityStrategy::Knn { k } => KnnDensity::new(k)?.estimate(objectives),
            DensityStrategy::Angle {
                neighbours,
                normalize,
            } => AngleDensity::new(neighbours)?
                .with_normalization(normalize)
                .estimate(objectives),
        }
    }
}
