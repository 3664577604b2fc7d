//! Mating selection driven by rank and density.
//!
//! After a [`Replacement`](crate::replacement::Replacement) every solution
//! carries a rank and a density. NSGA-II style algorithms then pick parents
//! by binary tournament: lower rank wins, and within a rank the more
//! isolated solution wins.
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use std::cmp::Ordering;

use rand::Rng;

use crate::density::density_descending;
use crate::error::{ParetoError, Result};
use crate::solution::Solution;

/// Total preorder on solutions by rank, then density.
///
/// `Ordering::Less` means the first solution is preferred. Rank is compared
/// ascending and density descending; a missing rank or density sorts after
/// any present value.
///
/// # Example
///
/// ```
/// use std::cmp::Ordering;
/// use u_pareto::selection::RankingAndDensityComparator;
/// use u_pareto::Solution;
///
/// let mut a = Solution::<f64>::from_objectives(vec![1.0, 2.0]);
/// let mut b = a.clone();
/// a.rank = Some(0);
/// a.density = Some(0.5);
/// b.rank = Some(0);
/// b.density = Some(f64::INFINITY);
///
/// assert_eq!(RankingAndDensityComparator.compare(&a, &b), Ordering::Greater);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RankingAndDensityComparator;

impl RankingAndDensityComparator {
    pub fn compare<V>(&self, a: &Solution<V>, b: &Solution<V>) -> Ordering {
        let rank = |s: &Solution<V>| s.rank.unwrap_or(usize::MAX);
        rank(a)
            .cmp(&rank(b))
            .then_with(|| density_descending(a, b))
    }
}

/// Binary tournament selection.
///
/// Draws two indices uniformly (with replacement) and returns the one the
/// [`RankingAndDensityComparator`] prefers. Exact ties are broken by a coin
/// flip from the same generator.
///
/// # Complexity
/// O(1) per selection
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryTournament {
    comparator: RankingAndDensityComparator,
}

impl BinaryTournament {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects a parent index from `population`.
    ///
    /// # Errors
    ///
    /// [`ParetoError::InvalidArgument`] if `population` is empty.
    pub fn select<V, R: Rng>(&self, population: &[Solution<V>], rng: &mut R) -> Result<usize> {
        if population.is_empty() {
            return Err(ParetoError::InvalidArgument(
                "cannot select from an empty population".into(),
            ));
        }

        let n = population.len();
        let first = rng.random_range(0..n);
        let second = rng.random_range(0..n);

        let winner = match self.comparator.compare(&population[first], &population[second]) {
            Ordering::Less => first,
            Ordering::Greater => second,
            Ordering::Equal => {
                if rng.random_bool(0.5) {
                    first
                } else {
                    second
                }
            }
        };
        Ok(winner)
    }

    /// Selects `count` parent indices.
    pub fn select_many<V, R: Rng>(
        &self,
        population: &[Solution<V>],
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<usize>> {
        (0..count).map(|_| self.select(population, rng)).collect()
    }
}
