//! Unbounded archive of mutually non-dominated solutions.

use crate::dominance::{Dominance, DominanceComparator};
use crate::error::{ParetoError, Result};
use crate::solution::Solution;

/// An unbounded archive of mutually non-dominated solutions.
///
/// # Example
///
/// ```
/// use u_pareto::archive::NonDominatedArchive;
/// use u_pareto::Solution;
///
/// let mut archive = NonDominatedArchive::new();
///
/// assert!(archive.add(&Solution::<f64>::from_objectives(vec![2.0, 2.0])).unwrap());
/// assert!(archive.add(&Solution::from_objectives(vec![1.0, 3.0])).unwrap());
/// // dominated by [2, 2]
/// assert!(!archive.add(&Solution::from_objectives(vec![3.0, 3.0])).unwrap());
/// // dominates both members
/// assert!(archive.add(&Solution::from_objectives(vec![0.5, 0.5])).unwrap());
///
/// assert_eq!(archive.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct NonDominatedArchive<V> {
    solutions: Vec<Solution<V>>,
    comparator: DominanceComparator,
}

impl<V> Default for NonDominatedArchive<V> {
    fn default() -> Self {
        Self::with_comparator(DominanceComparator::new())
    }
}

impl<V> NonDominatedArchive<V> {
    /// Creates an empty archive with a constraint-aware comparator.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_comparator(comparator: DominanceComparator) -> Self {
        Self {
            solutions: Vec::new(),
            comparator,
        }
    }

    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Solution<V>> {
        self.solutions.get(index)
    }

    pub fn solutions(&self) -> &[Solution<V>] {
        &self.solutions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Solution<V>> {
        self.solutions.iter()
    }

    pub fn into_solutions(self) -> Vec<Solution<V>> {
        self.solutions
    }

    /// Mutable access for density updates; objectives must not be changed.
    pub(crate) fn solutions_mut(&mut self) -> &mut [Solution<V>] {
        &mut self.solutions
    }

    pub(crate) fn remove(&mut self, index: usize) -> Solution<V> {
        self.solutions.remove(index)
    }

    fn check_shape(&self, candidate: &Solution<V>) -> Result<()> {
        match self.solutions.first() {
            Some(first) if first.objectives.len() != candidate.objectives.len() => {
                Err(ParetoError::ObjectiveCountMismatch {
                    expected: first.objectives.len(),
                    found: candidate.objectives.len(),
                })
            }
            None if candidate.objectives.is_empty() => Err(ParetoError::NoObjectives),
            _ => Ok(()),
        }
    }
}

impl<V: Clone> NonDominatedArchive<V> {
    /// Offers a solution to the archive.
    ///
    /// Returns `Ok(false)` without touching the archive if a member
    /// dominates the candidate or already has the same objective vector.
    /// Otherwise removes every member the candidate dominates, stores a
    /// clone of the candidate and returns `Ok(true)`.
    ///
    /// # Errors
    ///
    /// The candidate's objective count differs from the members', or it has
    /// no objectives.
    pub fn add(&mut self, candidate: &Solution<V>) -> Result<bool> {
        self.check_shape(candidate)?;

        let mut dominated = Vec::new();
        for (i, member) in self.solutions.iter().enumerate() {
            match self.comparator.compare_unchecked(candidate, member) {
                Dominance::Dominates => dominated.push(i),
                Dominance::DominatedBy => return Ok(false),
                Dominance::NonDominated => {
                    if member.has_same_objectives(candidate) {
                        return Ok(false);
                    }
                }
            }
        }

        for &i in dominated.iter().rev() {
            self.solutions.remove(i);
        }
        self.solutions.push(candidate.clone());
        Ok(true)
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
}

impl<'a, V> IntoIterator for &'a NonDominatedArchive<V> {
    type Item = &'a Solution<V>;
    type IntoIter = std::slice::Iter<'a, Solution<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
