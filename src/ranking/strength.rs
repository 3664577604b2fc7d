//! SPEA2 strength-based ranking.
//!
//! The strength of a solution is the number of solutions it dominates; its
//! raw fitness is the sum of the strengths of the solutions dominating it.
//! Solutions with equal raw fitness form a front, fronts are ordered by raw
//! fitness, and non-dominated solutions (raw fitness 0) form front 0.

use std::collections::BTreeMap;

use super::{Fronts, Ranking};
use crate::dominance::{Dominance, DominanceComparator, DominanceKey};
use crate::error::Result;
use crate::solution::{objective_count, Solution};

/// Strength ranking (Zitzler et al., 2001).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StrengthRanking {
    comparator: DominanceComparator,
}

impl StrengthRanking {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_comparator(comparator: DominanceComparator) -> Self {
        Self { comparator }
    }

    /// SPEA2 raw fitness of every solution (0 = non-dominated).
    ///
    /// # Errors
    ///
    /// Same input-shape errors as [`Ranking::compute`].
    pub fn raw_fitness<V>(&self, solutions: &[Solution<V>]) -> Result<Vec<usize>> {
        if objective_count(solutions)?.is_none() {
            return Ok(Vec::new());
        }
        let n = solutions.len();
        let keys: Vec<DominanceKey<'_>> = solutions.iter().map(DominanceKey::of).collect();

        let mut strength = vec![0usize; n];
        let mut dominators: Vec<Vec<usize>> = vec![Vec::new(); n];

        for i in 0..n {
            for j in (i + 1)..n {
                match self.comparator.compare_keys(&keys[i], &keys[j]) {
                    Dominance::Dominates => {
                        strength[i] += 1;
                        dominators[j].push(i);
                    }
                    Dominance::DominatedBy => {
                        strength[j] += 1;
                        dominators[i].push(j);
                    }
                    Dominance::NonDominated => {}
                }
            }
        }

        Ok(dominators
            .iter()
            .map(|by| by.iter().map(|&k| strength[k]).sum())
            .collect())
    }
}

impl Ranking for StrengthRanking {
    fn compute<V>(&self, solutions: &mut [Solution<V>]) -> Result<Fronts> {
        let raw = self.raw_fitness(solutions)?;

        let mut groups: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for (i, &fitness) in raw.iter().enumerate() {
            groups.entry(fitness).or_default().push(i);
        }

        let fronts = Fronts::new(groups.into_values().collect());
        fronts.check_partition(solutions.len())?;
        fronts.assign_ranks(solutions);
        Ok(fronts)
    }
}
