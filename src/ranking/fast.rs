//! Fast non-dominated sorting (Deb et al., 2002).
//!
//! Time complexity is `O(M * N²)`, where `M` is the number of objectives and
//! `N` the number of solutions.

use super::{Fronts, Ranking};
use crate::dominance::{Dominance, DominanceComparator, DominanceKey};
use crate::error::Result;
use crate::solution::{objective_count, Solution};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Below this size the comparison phase always runs sequentially.
#[cfg(feature = "parallel")]
const PARALLEL_THRESHOLD: usize = 256;

/// Fast non-dominated sort.
///
/// Front 0 lists its members in ascending index order; later fronts list
/// them in the order they are released by earlier fronts. The result is
/// therefore deterministic for a given input order.
///
/// # Example
///
/// ```
/// use u_pareto::ranking::{FastNonDominatedSort, Ranking};
/// use u_pareto::Solution;
///
/// let mut solutions: Vec<Solution<f64>> = vec![
///     Solution::from_objectives(vec![1.0, 5.0]), // front 0
///     Solution::from_objectives(vec![3.0, 3.0]), // front 0
///     Solution::from_objectives(vec![5.0, 1.0]), // front 0
///     Solution::from_objectives(vec![4.0, 4.0]), // dominated by [3, 3]
/// ];
///
/// let fronts = FastNonDominatedSort::new().compute(&mut solutions).unwrap();
///
/// assert_eq!(fronts.len(), 2);
/// assert_eq!(fronts.front(0), Some(&[0, 1, 2][..]));
/// assert_eq!(fronts.front(1), Some(&[3][..]));
/// assert_eq!(solutions[3].rank, Some(1));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FastNonDominatedSort {
    comparator: DominanceComparator,
}

impl FastNonDominatedSort {
    /// Sort with a constraint-aware comparator.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_comparator(comparator: DominanceComparator) -> Self {
        Self { comparator }
    }

    /// Dominance relations of every `i` against every `j > i`.
    ///
    /// Pairs that are mutually non-dominated are omitted.
    fn relations(&self, keys: &[DominanceKey<'_>]) -> Vec<Vec<(usize, Dominance)>> {
        let row = |i: usize| -> Vec<(usize, Dominance)> {
            ((i + 1)..keys.len())
                .filter_map(|j| match self.comparator.compare_keys(&keys[i], &keys[j]) {
                    Dominance::NonDominated => None,
                    d => Some((j, d)),
                })
                .collect()
        };

        #[cfg(feature = "parallel")]
        if keys.len() >= PARALLEL_THRESHOLD {
            return (0..keys.len()).into_par_iter().map(row).collect();
        }

        (0..keys.len()).map(row).collect()
    }
}

impl Ranking for FastNonDominatedSort {
    fn compute<V>(&self, solutions: &mut [Solution<V>]) -> Result<Fronts> {
        if objective_count(solutions)?.is_none() {
            return Ok(Fronts::default());
        }
        let n = solutions.len();

        let keys: Vec<DominanceKey<'_>> = solutions.iter().map(DominanceKey::of).collect();

        // number of solutions dominating i
        let mut domination_count = vec![0usize; n];
        // solutions dominated by i
        let mut dominated: Vec<Vec<usize>> = vec![Vec::new(); n];

        for (i, row) in self.relations(&keys).into_iter().enumerate() {
            for (j, relation) in row {
                match relation {
                    Dominance::Dominates => {
                        dominated[i].push(j);
                        domination_count[j] += 1;
                    }
                    Dominance::DominatedBy => {
                        dominated[j].push(i);
                        domination_count[i] += 1;
                    }
                    Dominance::NonDominated => {}
                }
            }
        }
        drop(keys);

        let mut fronts = Vec::new();
        let mut current: Vec<usize> = (0..n).filter(|&i| domination_count[i] == 0).collect();

        while !current.is_empty() {
            let mut next = Vec::new();
            for &i in &current {
                for &j in &dominated[i] {
                    domination_count[j] -= 1;
                    if domination_count[j] == 0 {
                        next.push(j);
                    }
                }
            }
            fronts.push(current);
            current = next;
        }

        let fronts = Fronts::new(fronts);
        fronts.check_partition(n)?;
        fronts.assign_ranks(solutions);

        log::trace!("ranked {} solutions into {} fronts", n, fronts.len());
        Ok(fronts)
    }
}
