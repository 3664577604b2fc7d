//! Ranking of a solution collection into Pareto fronts.
//!
//! A [`Ranking`] partitions solutions into an ordered sequence of fronts and
//! writes each solution's [`rank`](crate::Solution::rank). Front 0 holds the
//! non-dominated solutions; front `k` holds solutions dominated only by
//! members of earlier fronts.
//!
//! # Strategies
//!
//! - [`FastNonDominatedSort`]: Deb et al. (2002), used by NSGA-II and most
//!   archive-based algorithms
//! - [`EfficientNonDominatedSort`]: same fronts as the fast sort, fewer
//!   comparisons when there are few fronts (Zhang et al., 2015)
//! - [`StrengthRanking`]: SPEA2 raw fitness (Zitzler et al., 2001)
//! - [`RankingStrategy`]: enum over all three, for configuration-driven selection
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II"
//! - Zitzler, Laumanns & Thiele (2001), "SPEA2: Improving the Strength Pareto
//!   Evolutionary Algorithm"

mod efficient;
mod fast;
mod strength;

pub use efficient::EfficientNonDominatedSort;
pub use fast::FastNonDominatedSort;
pub use strength::StrengthRanking;

use crate::error::{ParetoError, Result};
use crate::solution::Solution;

/// A strategy that partitions solutions into fronts.
pub trait Ranking {
    /// Ranks `solutions`, writing each one's `rank`, and returns the fronts
    /// as indices into `solutions`.
    ///
    /// An empty slice yields empty [`Fronts`].
    ///
    /// # Errors
    ///
    /// Invalid input shapes (mismatched or empty objective vectors) and
    /// [`ParetoError::InvariantViolation`] if a solution ends up in no front.
    fn compute<V>(&self, solutions: &mut [Solution<V>]) -> Result<Fronts>;
}

/// Ordered fronts produced by a [`Ranking`].
///
/// Each front lists indices into the ranked slice. Fronts are produced fresh
/// by every call and never updated incrementally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fronts {
    fronts: Vec<Vec<usize>>,
}

impl Fronts {
    pub(crate) fn new(fronts: Vec<Vec<usize>>) -> Self {
        Self { fronts }
    }

    /// Number of fronts.
    pub fn len(&self) -> usize {
        self.fronts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fronts.is_empty()
    }

    /// Indices of the solutions with the given rank.
    pub fn front(&self, rank: usize) -> Option<&[usize]> {
        self.fronts.get(rank).map(Vec::as_slice)
    }

    /// Iterates over the fronts, best first.
    pub fn iter(&self) -> impl Iterator<Item = &[usize]> + '_ {
        self.fronts.iter().map(Vec::as_slice)
    }

    /// Total number of ranked solutions.
    pub fn number_of_solutions(&self) -> usize {
        self.fronts.iter().map(Vec::len).sum()
    }

    pub fn into_vec(self) -> Vec<Vec<usize>> {
        self.fronts
    }

    /// Verifies that the fronts partition `0..n`.
    pub(crate) fn check_partition(&self, n: usize) -> Result<()> {
        let mut seen = vec![false; n];
        for &i in self.fronts.iter().flatten() {
            match seen.get_mut(i) {
                Some(flag) if !*flag => *flag = true,
                Some(_) => {
                    return Err(ParetoError::InvariantViolation(format!(
                        "solution {i} assigned to more than one front"
                    )))
                }
                None => {
                    return Err(ParetoError::InvariantViolation(format!(
                        "front index {i} out of bounds for {n} solutions"
                    )))
                }
            }
        }
        match seen.iter().position(|&flag| !flag) {
            Some(i) => Err(ParetoError::InvariantViolation(format!(
                "solution {i} was not assigned to any front"
            ))),
            None => Ok(()),
        }
    }

    /// Writes each solution's rank from its front index.
    pub(crate) fn assign_ranks<V>(&self, solutions: &mut [Solution<V>]) {
        for (rank, front) in self.fronts.iter().enumerate() {
            for &i in front {
                solutions[i].rank = Some(rank);
            }
        }
    }
}

/// Ranking selected by value, e.g. from a configuration file.
///
/// Every variant uses a constraint-aware
/// [`DominanceComparator`](crate::dominance::DominanceComparator).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RankingStrategy {
    /// [`FastNonDominatedSort`].
    #[default]
    FastNonDominatedSort,
    /// [`EfficientNonDominatedSort`].
    Efficient,
    /// [`StrengthRanking`].
    Strength,
}

impl Ranking for RankingStrategy {
    fn compute<V>(&self, solutions: &mut [Solution<V>]) -> Result<Fronts> {
        match self {
            RankingStrategy::FastNonDominatedSort => FastNonDominatedSort::new().compute(solutions),
            RankingStrategy::Efficient => EfficientNonDominatedSort::new().compute(solutions),
            RankingStrategy::Strength => StrengthRanking::new().compute(solutions),
        }
    }
}
