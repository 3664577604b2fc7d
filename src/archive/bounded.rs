//! Capacity-limited archive with density-based eviction.

use std::cmp::Ordering;

use super::{ArchiveConfig, NonDominatedArchive};
use crate::density::{CrowdingDistance, DensityEstimator, DensityStrategy};
use crate::dominance::DominanceComparator;
use crate::error::{ParetoError, Result};
use crate::solution::Solution;

/// A non-dominated archive holding at most `capacity` solutions.
///
/// When an accepted solution pushes the archive over capacity, density is
/// recomputed over the whole archive and the member with the smallest
/// density (the first one found, on ties) is evicted. Insertion is one
/// solution at a time, so a single eviction restores the bound.
///
/// # Example
///
/// ```
/// use u_pareto::archive::CrowdingDistanceArchive;
/// use u_pareto::Solution;
///
/// let mut archive = CrowdingDistanceArchive::new(3);
/// for o in [[0.0, 4.0], [1.0, 3.0], [1.5, 2.5], [4.0, 0.0]] {
///     archive.add(&Solution::<f64>::from_objectives(o.to_vec())).unwrap();
/// }
///
/// assert_eq!(archive.len(), 3);
/// // the extremes always survive
/// assert!(archive.iter().any(|s| s.objectives == vec![0.0, 4.0]));
/// assert!(archive.iter().any(|s| s.objectives == vec![4.0, 0.0]));
/// ```
#[derive(Debug, Clone)]
pub struct BoundedArchive<V, D = CrowdingDistance> {
    archive: NonDominatedArchive<V>,
    capacity: usize,
    estimator: D,
}

/// Bounded archive pruned by crowding distance (NSGA-II / SMPSO style).
pub type CrowdingDistanceArchive<V> = BoundedArchive<V, CrowdingDistance>;

impl<V> BoundedArchive<V, CrowdingDistance> {
    /// Creates a crowding distance archive.
    pub fn new(capacity: usize) -> Self {
        Self::with_estimator(capacity, CrowdingDistance)
    }
}

impl<V> BoundedArchive<V, DensityStrategy> {
    /// Creates an archive from a validated configuration.
    ///
    /// # Errors
    ///
    /// [`ParetoError::InvalidArgument`] if the configuration is invalid.
    pub fn from_config(config: &ArchiveConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_estimator(config.capacity, config.density))
    }
}

impl<V, D> BoundedArchive<V, D> {
    pub fn with_estimator(capacity: usize, estimator: D) -> Self {
        Self {
            archive: NonDominatedArchive::new(),
            capacity,
            estimator,
        }
    }

    /// Creates an archive that uses `comparator` on insertion.
    pub fn with_comparator(capacity: usize, estimator: D, comparator: DominanceComparator) -> Self {
        Self {
            archive: NonDominatedArchive::with_comparator(comparator),
            capacity,
            estimator,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.archive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archive.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.archive.len() >= self.capacity
    }

    pub fn get(&self, index: usize) -> Option<&Solution<V>> {
        self.archive.get(index)
    }

    pub fn solutions(&self) -> &[Solution<V>] {
        self.archive.solutions()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Solution<V>> {
        self.archive.iter()
    }

    pub fn into_solutions(self) -> Vec<Solution<V>> {
        self.archive.into_solutions()
    }

    pub fn estimator(&self) -> &D {
        &self.estimator
    }
}

impl<V: Clone, D: DensityEstimator> BoundedArchive<V, D> {
    /// Offers a solution to the archive.
    ///
    /// Returns `Ok(true)` when the candidate passed the dominance and
    /// duplicate checks. If that insertion overflowed the archive, one member
    /// was evicted, and it may be the candidate itself when it is the most
    /// crowded. A zero-capacity archive always returns `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Same input-shape errors as [`NonDominatedArchive::add`].
    pub fn add(&mut self, candidate: &Solution<V>) -> Result<bool> {
        if self.capacity == 0 {
            return Ok(false);
        }
        let inserted = self.archive.add(candidate)?;
        if inserted && self.archive.len() > self.capacity {
            self.prune()?;
        }
        Ok(inserted)
    }

    /// Offers every solution in turn; returns how many were accepted.
    pub fn join<'a, I>(&mut self, solutions: I) -> Result<usize>
    where
        I: IntoIterator<Item = &'a Solution<V>>,
        V: 'a,
    {
        let mut accepted = 0;
        for solution in solutions {
            if self.add(solution)? {
                accepted += 1;
            }
        }
        Ok(accepted)
    }

    /// Recomputes the density attribute of every member.
    ///
    /// Useful for density-based leader selection between insertions.
    pub fn compute_density(&mut self) -> Result<()> {
        self.estimator.compute(self.archive.solutions_mut())
    }

    fn prune(&mut self) -> Result<()> {
        self.compute_density()?;

        let mut worst: Option<(usize, f64)> = None;
        for (i, s) in self.archive.iter().enumerate() {
            let density = s.density.unwrap_or(f64::NEG_INFINITY);
            match worst {
                Some((_, d)) if density.total_cmp(&d) != Ordering::Less => {}
                _ => worst = Some((i, density)),
            }
        }

        let (index, density) = worst.ok_or_else(|| {
            ParetoError::InvariantViolation("pruning an empty archive".into())
        })?;
        log::debug!(
            "archive over capacity {}: evicting member {} with density {}",
            self.capacity,
            index,
            density
        );
        self.archive.remove(index);
        Ok(())
    }
}

impl<'a, V, D> IntoIterator for &'a BoundedArchive<V, D> {
    type Item = &'a Solution<V>;
    type IntoIter = std::slice::Iter<'a, Solution<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::density::{AngleDensity, KnnDensity};
    use crate::dominance::{pareto_cmp, Dominance};
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn sol(objectives: &[f64]) -> Solution<f64> {
        Solution::from_objectives(objectives.to_vec())
    }

    fn contains(archive: &CrowdingDistanceArchive<f64>, objectives: &[f64]) -> bool {
        archive.iter().any(|s| s.objectives == objectives)
    }

    #[test]
    fn test_zero_capacity_always_rejects() {
        let mut archive = CrowdingDistanceArchive::new(0);
        assert!(!archive.add(&sol(&[1.0, 1.0])).unwrap());
        assert!(archive.is_empty());
        assert!(archive.is_full());
    }

    #[test]
    fn test_below_capacity_behaves_like_unbounded() {
        let mut archive = CrowdingDistanceArchive::new(10);
        assert!(archive.add(&sol(&[1.0, 3.0])).unwrap());
        assert!(archive.add(&sol(&[3.0, 1.0])).unwrap());
        assert!(!archive.add(&sol(&[4.0, 4.0])).unwrap());
        assert!(!archive.add(&sol(&[1.0, 3.0])).unwrap());
        assert_eq!(archive.len(), 2);
        assert!(!archive.is_full());
    }

    #[test]
    fn test_evicts_most_crowded_member() {
        let mut archive = CrowdingDistanceArchive::new(4);
        for o in [[0.0, 10.0], [1.0, 9.0], [5.0, 5.0], [10.0, 0.0]] {
            archive.add(&sol(&o)).unwrap();
        }
        assert_eq!(archive.len(), 4);

        // [1.2, 8.8] lands right next to [1, 9]
        assert!(archive.add(&sol(&[1.2, 8.8])).unwrap());
        assert_eq!(archive.len(), 4);
        assert!(contains(&archive, &[0.0, 10.0]));
        assert!(contains(&archive, &[10.0, 0.0]));
        assert!(contains(&archive, &[5.0, 5.0]));
        // exactly one of the close pair survives
        assert!(contains(&archive, &[1.0, 9.0]) ^ contains(&archive, &[1.2, 8.8]));
    }

    #[test]
    fn test_candidate_can_be_evicted_immediately() {
        let mut archive = CrowdingDistanceArchive::new(3);
        for o in [[0.0, 10.0], [5.0, 5.0], [10.0, 0.0]] {
            archive.add(&sol(&o)).unwrap();
        }
        // just beside [5, 5] and slightly more crowded than it
        let accepted = archive.add(&sol(&[5.001, 4.999])).unwrap();
        assert!(accepted);
        assert_eq!(archive.len(), 3);
        assert!(contains(&archive, &[5.0, 5.0]));
        assert!(!contains(&archive, &[5.001, 4.999]));
    }

    #[test]
    fn test_tie_evicts_first_encountered() {
        let mut archive = CrowdingDistanceArchive::new(3);
        for o in [[0.0, 6.0], [6.0, 0.0], [2.0, 4.0]] {
            archive.add(&sol(&o)).unwrap();
        }
        // [2, 4] and [4, 2] get identical crowding distances
        assert!(archive.add(&sol(&[4.0, 2.0])).unwrap());
        assert_eq!(archive.len(), 3);
        assert!(!contains(&archive, &[2.0, 4.0]));
        assert!(contains(&archive, &[4.0, 2.0]));
    }

    #[test]
    fn test_compute_density_marks_extremes() {
        let mut archive = CrowdingDistanceArchive::new(10);
        for o in [[0.0, 4.0], [2.0, 2.0], [4.0, 0.0]] {
            archive.add(&sol(&o)).unwrap();
        }
        archive.compute_density().unwrap();
        let densities: Vec<_> = archive.iter().map(|s| s.density.unwrap()).collect();
        assert!(densities[0].is_infinite());
        assert!(densities[1].is_finite());
        assert!(densities[2].is_infinite());
    }

    #[test]
    fn test_knn_estimator() {
        let mut archive = BoundedArchive::with_estimator(2, KnnDensity::default());
        archive.add(&sol(&[0.0, 10.0])).unwrap();
        archive.add(&sol(&[10.0, 0.0])).unwrap();
        archive.add(&sol(&[9.0, 1.0])).unwrap();
        assert_eq!(archive.len(), 2);
        assert!(archive.iter().any(|s| s.objectives == vec![0.0, 10.0]));
    }

    #[test]
    fn test_infinite_objective_keeps_boundaries() {
        let inf = f64::INFINITY;
        let mut archive = CrowdingDistanceArchive::new(3);
        for o in [[0.0, inf], [1.0, 5.0], [2.0, 3.0], [inf, 0.0]] {
            assert!(archive.add(&sol(&o)).unwrap());
        }
        assert_eq!(archive.len(), 3);
        assert!(contains(&archive, &[0.0, inf]));
        assert!(contains(&archive, &[inf, 0.0]));
        assert!(!contains(&archive, &[1.0, 5.0]));
    }

    #[test]
    fn test_angle_archive_prunes_to_capacity() {
        let mut archive = BoundedArchive::with_estimator(3, AngleDensity::default());
        for i in 0..4 {
            let x = f64::from(i) * 0.25;
            archive.add(&sol(&[x, 1.0 - x])).unwrap();
        }
        assert_eq!(archive.len(), 3);
    }

    #[test]
    fn test_angle_archive_evicts_narrowest_direction() {
        let mut archive = BoundedArchive::with_estimator(3, AngleDensity::default());
        for o in [[0.0, 1.0], [1.0, 0.0], [0.5, 0.5], [0.1, 0.9]] {
            archive.add(&sol(&o)).unwrap();
        }
        let kept: Vec<&[f64]> = archive.iter().map(|s| s.objectives.as_slice()).collect();
        assert_eq!(kept, vec![&[0.0, 1.0][..], &[1.0, 0.0][..], &[0.5, 0.5][..]]);
    }

    #[test]
    fn test_angle_archive_three_objectives() {
        let mut archive = BoundedArchive::with_estimator(5, AngleDensity::default());
        for o in [
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
            [0.33, 0.33, 0.34],
            [0.5, 0.25, 0.25],
            [0.25, 0.5, 0.25],
        ] {
            archive.add(&sol(&o)).unwrap();
        }
        assert_eq!(archive.len(), 5);
        for unit in [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]] {
            assert!(archive.iter().any(|s| s.objectives == unit));
        }
    }

    #[test]
    fn test_angle_archive_keeps_extremes_over_many_additions() {
        let mut archive = BoundedArchive::with_estimator(10, AngleDensity::default());
        for i in 0..=20 {
            let x = f64::from(i) / 20.0;
            archive.add(&sol(&[x, 1.0 - x])).unwrap();
        }
        // dominated candidates never get in
        assert!(!archive.add(&sol(&[0.9, 0.9])).unwrap());
        assert_eq!(archive.len(), 10);
        assert!(archive.iter().any(|s| s.objectives[0] == 0.0));
        assert!(archive.iter().any(|s| s.objectives[1] == 0.0));
    }

    #[test]
    fn test_from_config() {
        let config = ArchiveConfig::default()
            .with_capacity(5)
            .with_density(DensityStrategy::Knn { k: 2 });
        let archive: BoundedArchive<f64, _> = BoundedArchive::from_config(&config).unwrap();
        assert_eq!(archive.capacity(), 5);
        assert_eq!(*archive.estimator(), DensityStrategy::Knn { k: 2 });

        let invalid = ArchiveConfig::default().with_density(DensityStrategy::Knn { k: 0 });
        assert!(BoundedArchive::<f64, _>::from_config(&invalid).is_err());
    }

    #[test]
    fn test_join_respects_capacity() {
        let mut rng = StdRng::seed_from_u64(7);
        let candidates: Vec<Solution<f64>> = (0..200)
            .map(|_| {
                let x: f64 = rng.random_range(0.0..1.0);
                sol(&[x, 1.0 - x])
            })
            .collect();

        let mut archive = CrowdingDistanceArchive::new(20);
        let accepted = archive.join(&candidates).unwrap();
        assert!(accepted >= 20);
        assert_eq!(archive.len(), 20);
    }

    proptest! {
        #[test]
        fn prop_capacity_and_non_dominance(
            capacity in 0usize..12,
            objectives in prop::collection::vec(prop::collection::vec(0.0f64..10.0, 2), 0..100)
        ) {
            let mut archive = CrowdingDistanceArchive::new(capacity);
            for o in objectives {
                archive.add(&Solution::<f64>::from_objectives(o)).unwrap();
                prop_assert!(archive.len() <= capacity);
            }
            let members = archive.solutions();
            for (i, a) in members.iter().enumerate() {
                for b in &members[i + 1..] {
                    prop_assert_eq!(pareto_cmp(&a.objectives, &b.objectives), Dominance::NonDominated);
                }
            }
        }
    }
}
