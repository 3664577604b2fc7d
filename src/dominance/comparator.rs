//! Pareto dominance with constraint-violation precedence.

use super::ConstraintViolationComparator;
use crate::error::{ParetoError, Result};
use crate::solution::Solution;

/// Outcome of a dominance comparison, seen from the left operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dominance {
    /// Left dominates right.
    Dominates,
    /// Neither dominates the other.
    NonDominated,
    /// Right dominates left.
    DominatedBy,
}

impl Dominance {
    /// `-1` if left dominates, `0` if neither does, `+1` if right dominates.
    pub fn sign(self) -> i32 {
        match self {
            Dominance::Dominates => -1,
            Dominance::NonDominated => 0,
            Dominance::DominatedBy => 1,
        }
    }

    /// The same relation seen from the other operand.
    pub fn reverse(self) -> Self {
        match self {
            Dominance::Dominates => Dominance::DominatedBy,
            Dominance::NonDominated => Dominance::NonDominated,
            Dominance::DominatedBy => Dominance::Dominates,
        }
    }
}

/// Pareto comparison of two objective vectors (minimization).
///
/// `a` dominates `b` iff it is no worse in every objective and strictly
/// better in at least one. Extra trailing values of the longer slice are
/// ignored; use [`DominanceComparator`] for checked comparisons.
///
/// # Example
///
/// ```
/// use u_pareto::dominance::{pareto_cmp, Dominance};
///
/// assert_eq!(pareto_cmp(&[1.0, 2.0], &[2.0, 3.0]), Dominance::Dominates);
/// assert_eq!(pareto_cmp(&[1.0, 3.0], &[2.0, 2.0]), Dominance::NonDominated);
/// assert_eq!(pareto_cmp(&[2.0, 2.0], &[2.0, 2.0]), Dominance::NonDominated);
/// ```
pub fn pareto_cmp(a: &[f64], b: &[f64]) -> Dominance {
    let mut a_better_in_some = false;
    let mut b_better_in_some = false;

    for (&va, &vb) in a.iter().zip(b.iter()) {
        if va < vb {
            a_better_in_some = true;
        } else if vb < va {
            b_better_in_some = true;
        }
        if a_better_in_some && b_better_in_some {
            return Dominance::NonDominated;
        }
    }

    match (a_better_in_some, b_better_in_some) {
        (true, false) => Dominance::Dominates,
        (false, true) => Dominance::DominatedBy,
        _ => Dominance::NonDominated,
    }
}

/// Constraint-aware Pareto dominance comparator.
///
/// Constraint violation is checked first (see
/// [`ConstraintViolationComparator`]); only when it does not decide are the
/// objectives compared.
///
/// # Example
///
/// ```
/// use u_pareto::dominance::{Dominance, DominanceComparator};
/// use u_pareto::Solution;
///
/// let a: Solution<f64> = Solution::from_objectives(vec![1.0, 2.0]);
/// let b: Solution<f64> = Solution::from_objectives(vec![2.0, 3.0]);
///
/// let cmp = DominanceComparator::new();
/// assert_eq!(cmp.compare(&a, &b).unwrap().sign(), -1);
/// assert_eq!(cmp.compare(&b, &a).unwrap().sign(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DominanceComparator {
    constraints: Option<ConstraintViolationComparator>,
}

impl Default for DominanceComparator {
    fn default() -> Self {
        Self::new()
    }
}

impl DominanceComparator {
    /// Comparator that checks constraint violation before objectives.
    pub fn new() -> Self {
        Self {
            constraints: Some(ConstraintViolationComparator),
        }
    }

    /// Comparator that looks at objectives only.
    pub fn unconstrained() -> Self {
        Self { constraints: None }
    }

    pub fn is_constraint_aware(&self) -> bool {
        self.constraints.is_some()
    }

    /// Compares two solutions.
    ///
    /// # Errors
    ///
    /// [`ParetoError::ObjectiveCountMismatch`] if the objective vectors
    /// differ in length.
    pub fn compare<V>(&self, a: &Solution<V>, b: &Solution<V>) -> Result<Dominance> {
        if a.objectives.len() != b.objectives.len() {
            return Err(ParetoError::ObjectiveCountMismatch {
                expected: a.objectives.len(),
                found: b.objectives.len(),
            });
        }
        Ok(self.compare_unchecked(a, b))
    }

    /// [`compare`](Self::compare) without the length check.
    ///
    /// Callers validate the whole collection once up front.
    pub(crate) fn compare_unchecked<V>(&self, a: &Solution<V>, b: &Solution<V>) -> Dominance {
        self.compare_keys(&DominanceKey::of(a), &DominanceKey::of(b))
    }

    pub(crate) fn compare_keys(&self, a: &DominanceKey<'_>, b: &DominanceKey<'_>) -> Dominance {
        if a.objectives.is_empty() {
            return Dominance::NonDominated;
        }
        if let Some(constraints) = &self.constraints {
            let by_violation = constraints.compare_violation(a.violation, b.violation);
            if by_violation != Dominance::NonDominated {
                return by_violation;
            }
        }
        pareto_cmp(a.objectives, b.objectives)
    }
}

/// The parts of a solution that decide dominance.
///
/// Extracted once per solution so that pairwise loops do not recompute the
/// overall violation, and so they can be shared across threads without
/// bounds on the variable type.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DominanceKey<'a> {
    pub objectives: &'a [f64],
    pub violation: f64,
}

impl<'a> DominanceKey<'a> {
    pub fn of<V>(solution: &'a Solution<V>) -> Self {
        Self {
            objectives: &solution.objectives,
            violation: solution.overall_constraint_violation(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sol(objectives: &[f64]) -> Solution<f64> {
        Solution::from_objectives(objectives.to_vec())
    }

    #[test]
    fn test_first_dominates() {
        let cmp = DominanceComparator::new();
        let result = cmp.compare(&sol(&[1.0, 2.0]), &sol(&[2.0, 3.0])).unwrap();
        assert_eq!(result, Dominance::Dominates);
        assert_eq!(result.sign(), -1);
    }

    #[test]
    fn test_second_dominates() {
        let cmp = DominanceComparator::new();
        let result = cmp.compare(&sol(&[2.0, 3.0]), &sol(&[1.0, 2.0])).unwrap();
        assert_eq!(result, Dominance::DominatedBy);
        assert_eq!(result.sign(), 1);
    }

    #[test]
    fn test_equal_in_one_better_in_other() {
        let cmp = DominanceComparator::new();
        let result = cmp.compare(&sol(&[2.0, 2.0]), &sol(&[2.0, 3.0])).unwrap();
        assert_eq!(result, Dominance::Dominates);
    }

    #[test]
    fn test_identical_vectors_are_non_dominated() {
        let cmp = DominanceComparator::new();
        let result = cmp.compare(&sol(&[1.0, 1.0]), &sol(&[1.0, 1.0])).unwrap();
        assert_eq!(result, Dominance::NonDominated);
    }

    #[test]
    fn test_trade_off_is_non_dominated() {
        let cmp = DominanceComparator::new();
        let result = cmp.compare(&sol(&[1.0, 4.0]), &sol(&[4.0, 1.0])).unwrap();
        assert_eq!(result.sign(), 0);
    }

    #[test]
    fn test_single_objective() {
        let cmp = DominanceComparator::new();
        assert_eq!(cmp.compare(&sol(&[1.0]), &sol(&[2.0])).unwrap(), Dominance::Dominates);
        assert_eq!(cmp.compare(&sol(&[1.0]), &sol(&[1.0])).unwrap(), Dominance::NonDominated);
    }

    #[test]
    fn test_zero_objectives_are_non_dominated() {
        let cmp = DominanceComparator::new();
        let a = sol(&[]).with_constraints(vec![0.0]);
        let b = sol(&[]).with_constraints(vec![-5.0]);
        assert_eq!(cmp.compare(&a, &b).unwrap(), Dominance::NonDominated);
    }

    #[test]
    fn test_mismatched_lengths_fail() {
        let cmp = DominanceComparator::new();
        let err = cmp.compare(&sol(&[1.0, 2.0]), &sol(&[1.0])).unwrap_err();
        assert_eq!(
            err,
            ParetoError::ObjectiveCountMismatch {
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_violation_short_circuits_objectives() {
        let cmp = DominanceComparator::new();
        // better objectives but infeasible
        let a = sol(&[0.0, 0.0]).with_constraints(vec![-1.0]);
        let b = sol(&[5.0, 5.0]).with_constraints(vec![1.0]);
        assert_eq!(cmp.compare(&a, &b).unwrap(), Dominance::DominatedBy);
    }

    #[test]
    fn test_unconstrained_ignores_violation() {
        let cmp = DominanceComparator::unconstrained();
        let a = sol(&[0.0, 0.0]).with_constraints(vec![-1.0]);
        let b = sol(&[5.0, 5.0]).with_constraints(vec![1.0]);
        assert!(!cmp.is_constraint_aware());
        assert_eq!(cmp.compare(&a, &b).unwrap(), Dominance::Dominates);
    }

    #[test]
    fn test_equal_violation_falls_back_to_objectives() {
        let cmp = DominanceComparator::new();
        let a = sol(&[1.0, 1.0]).with_constraints(vec![-2.0]);
        let b = sol(&[2.0, 2.0]).with_constraints(vec![-2.0]);
        assert_eq!(cmp.compare(&a, &b).unwrap(), Dominance::Dominates);
    }

    #[test]
    fn test_reverse_round_trip() {
        for d in [Dominance::Dominates, Dominance::NonDominated, Dominance::DominatedBy] {
            assert_eq!(d.reverse().reverse(), d);
            assert_eq!(d.reverse().sign(), -d.sign());
        }
    }

    proptest! {
        #[test]
        fn prop_antisymmetric(
            a in prop::collection::vec(-10.0f64..10.0, 3),
            b in prop::collection::vec(-10.0f64..10.0, 3),
            ca in -1.0f64..1.0,
            cb in -1.0f64..1.0,
        ) {
            let cmp = DominanceComparator::new();
            let sa = Solution::<f64>::from_objectives(a).with_constraints(vec![ca]);
            let sb = Solution::<f64>::from_objectives(b).with_constraints(vec![cb]);
            let ab = cmp.compare(&sa, &sb).unwrap();
            let ba = cmp.compare(&sb, &sa).unwrap();
            prop_assert_eq!(ab.sign(), -ba.sign());
        }

        #[test]
        fn prop_irreflexive(a in prop::collection::vec(-10.0f64..10.0, 1..5)) {
            let s = Solution::<f64>::from_objectives(a);
            let cmp = DominanceComparator::new();
            prop_assert_eq!(cmp.compare(&s, &s).unwrap(), Dominance::NonDominated);
        }
    }
}
