//! Efficient non-dominated sorting, sequential search variant
//! (Zhang et al., 2015).
//!
//! Worst case is still `O(M * N²)`, but solutions are only compared against
//! members of fronts built so far, which is far fewer comparisons on
//! populations with few fronts.

use std::cmp::Ordering;

use super::{Fronts, Ranking};
use crate::dominance::{Dominance, DominanceComparator, DominanceKey};
use crate::error::Result;
use crate::solution::{objective_count, Solution};

/// Non-dominated sort over a presorted population.
///
/// Solutions are visited in an order no solution can be dominated by a
/// later one: least violated first (when the comparator is constraint
/// aware), then lexicographically by objectives. Each one joins the first
/// front none of whose members dominates it. The fronts are the same sets as
/// [`FastNonDominatedSort`](super::FastNonDominatedSort) produces; every
/// front lists its members in ascending index order.
///
/// # Example
///
/// ```
/// use u_pareto::ranking::{EfficientNonDominatedSort, Ranking};
/// use u_pareto::Solution;
///
/// let mut solutions: Vec<Solution<f64>> = [[4.0, 4.0], [1.0, 5.0], [3.0, 3.0], [5.0, 1.0]]
///     .iter()
///     .map(|o| Solution::from_objectives(o.to_vec()))
///     .collect();
///
/// let fronts = EfficientNonDominatedSort::new().compute(&mut solutions).unwrap();
/// assert_eq!(fronts.into_vec(), vec![vec![1, 2, 3], vec![0]]);
/// ```
///
/// # Reference
///
/// Zhang, Tian, Cheng & Jin (2015), "An Efficient Approach to Nondominated
/// Sorting for Evolutionary Multiobjective Optimization"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EfficientNonDominatedSort {
    comparator: DominanceComparator,
}

/// `-0.0` and `0.0` compare equal, as they do for dominance.
fn value_cmp(a: f64, b: f64) -> Ordering {
    (a + 0.0).total_cmp(&(b + 0.0))
}

impl EfficientNonDominatedSort {
    /// Sort with a constraint-aware comparator.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_comparator(comparator: DominanceComparator) -> Self {
        Self { comparator }
    }

    /// Visiting order: dominators always come before the solutions they
    /// dominate. Stable, so equal keys keep index order.
    fn presort(&self, keys: &[DominanceKey<'_>]) -> Vec<usize> {
        let mut order: Vec<usize> = (0..keys.len()).collect();
        order.sort_by(|&a, &b| {
            let (ka, kb) = (&keys[a], &keys[b]);
            let by_violation = if self.comparator.is_constraint_aware() {
                // larger (closer to zero) violation first
                value_cmp(kb.violation, ka.violation)
            } else {
                Ordering::Equal
            };
            by_violation.then_with(|| {
                ka.objectives
                    .iter()
                    .zip(kb.objectives)
                    .map(|(&x, &y)| value_cmp(x, y))
                    .find(|o| o.is_ne())
                    .unwrap_or(Ordering::Equal)
            })
        });
        order
    }
}

impl Ranking for EfficientNonDominatedSort {
    fn compute<V>(&self, solutions: &mut [Solution<V>]) -> Result<Fronts> {
        if objective_count(solutions)?.is_none() {
            return Ok(Fronts::default());
        }
        let n = solutions.len();

        let keys: Vec<DominanceKey<'_>> = solutions.iter().map(DominanceKey::of).collect();

        let mut fronts: Vec<Vec<usize>> = Vec::new();
        let mut comparisons = 0usize;
        for i in self.presort(&keys) {
            let mut target = fronts.len();
            for (rank, front) in fronts.iter().enumerate() {
                let dominated = front.iter().any(|&j| {
                    comparisons += 1;
                    self.comparator.compare_keys(&keys[j], &keys[i]) == Dominance::Dominates
                });
                if !dominated {
                    target = rank;
                    break;
                }
            }
            match fronts.get_mut(target) {
                Some(front) => front.push(i),
                None => fronts.push(vec![i]),
            }
        }
        drop(keys);

        for front in &mut fronts {
            front.sort_unstable();
        }

        let fronts = Fronts::new(fronts);
        fronts.check_partition(n)?;
        fronts.assign_ranks(solutions);

        log::trace!(
            "ranked {} solutions into {} fronts with {} comparisons",
            n,
            fronts.len(),
            comparisons
        );
        Ok(fronts)
    }
}
