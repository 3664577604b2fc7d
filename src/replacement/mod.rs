//! Environmental selection: merging a population with its offspring.
//!
//! A [`Replacement`] takes the current population and the offspring of one
//! generation and returns the next population, which always has the size of
//! the current one.
//!
//! # Key Types
//!
//! - [`RankingAndDensityReplacement`]: ranks the union, keeps whole fronts and
//!   truncates the boundary front by density (NSGA-II, SPEA2)
//! - [`RemovalPolicy`]: how the boundary front is truncated
//! - [`ReplacementConfig`]: ranking, density and policy chosen by value
//!
//! # Example
//!
//! ```
//! use u_pareto::replacement::{RankingAndDensityReplacement, Replacement};
//! use u_pareto::Solution;
//!
//! let population: Vec<Solution<f64>> = vec![
//!     Solution::from_objectives(vec![2.0, 2.0]),
//!     Solution::from_objectives(vec![3.0, 3.0]),
//! ];
//! let offspring = vec![
//!     Solution::from_objectives(vec![1.0, 1.0]),
//!     Solution::from_objectives(vec![4.0, 4.0]),
//! ];
//!
//! let next = RankingAndDensityReplacement::nsga2()
//!     .replace(population, offspring)
//!     .unwrap();
//!
//! assert_eq!(next.len(), 2);
//! assert_eq!(next[0].objectives, vec![1.0, 1.0]);
//! assert_eq!(next[1].objectives, vec![2.0, 2.0]);
//! ```

mod config;
mod ranking_and_density;

pub use config::ReplacementConfig;
pub use ranking_and_density::RankingAndDensityReplacement;

use crate::error::Result;
use crate::solution::Solution;

/// A strategy that builds the next population.
pub trait Replacement {
    /// Returns exactly `population.len()` solutions drawn from
    /// `population` and `offspring`.
    ///
    /// # Errors
    ///
    /// Invalid input shapes, and
    /// [`ParetoError::InvariantViolation`](crate::ParetoError::InvariantViolation)
    /// if the result would have the wrong size.
    fn replace<V>(
        &self,
        population: Vec<Solution<V>>,
        offspring: Vec<Solution<V>>,
    ) -> Result<Vec<Solution<V>>>;
}

/// How the front that overflows the target size is truncated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RemovalPolicy {
    /// Removes the least isolated member one at a time, recomputing density
    /// on the remaining members after every removal.
    ///
    /// # Complexity
    /// O(r * cost(density)) for r removals
    #[default]
    Sequential,

    /// Computes density once and keeps the most isolated members.
    ///
    /// Cheaper, but ignores how each removal changes its neighbours'
    /// density.
    OneShot,

    /// SPEA2 archive truncation: removes, one at a time, the member whose
    /// sorted distances to the remaining members are lexicographically
    /// smallest.
    ///
    /// The density estimator does not take part in the choice; it only
    /// annotates the retained members afterwards.
    ///
    /// # Complexity
    /// O(r * n² * log n) for r removals from a front of n
    NeighbourDistances,
}
