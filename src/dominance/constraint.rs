//! Feasibility-first comparison.

use super::Dominance;
use crate::solution::Solution;

/// Orders solutions by their overall constraint violation.
///
/// - A feasible solution dominates an infeasible one.
/// - Between two infeasible solutions, the one whose overall violation is
///   closer to zero dominates.
/// - Otherwise (both feasible, or equal violation) the pair is
///   [`Dominance::NonDominated`] and the objectives decide.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConstraintViolationComparator;

impl ConstraintViolationComparator {
    pub fn compare<V>(&self, a: &Solution<V>, b: &Solution<V>) -> Dominance {
        self.compare_violation(
            a.overall_constraint_violation(),
            b.overall_constraint_violation(),
        )
    }

    /// Compares two precomputed overall violation degrees.
    pub(crate) fn compare_violation(&self, va: f64, vb: f64) -> Dominance {
        // violation degrees are <= 0; the larger one is the less violated
        if va < 0.0 && vb < 0.0 {
            if va > vb {
                Dominance::Dominates
            } else if vb > va {
                Dominance::DominatedBy
            } else {
                Dominance::NonDominated
            }
        } else if va == 0.0 && vb < 0.0 {
            Dominance::Dominates
        } else if va < 0.0 && vb == 0.0 {
            Dominance::DominatedBy
        } else {
            Dominance::NonDominated
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constrained(constraints: &[f64]) -> Solution<f64> {
        Solution::from_objectives(vec![1.0, 1.0]).with_constraints(constraints.to_vec())
    }

    #[test]
    fn test_both_feasible_is_undecided() {
        let cmp = ConstraintViolationComparator;
        let a = constrained(&[0.0, 1.0]);
        let b = constrained(&[2.0, 0.5]);
        assert_eq!(cmp.compare(&a, &b), Dominance::NonDominated);
    }

    #[test]
    fn test_feasible_beats_infeasible() {
        let cmp = ConstraintViolationComparator;
        let feasible = constrained(&[0.0, 1.0]);
        let infeasible = constrained(&[-0.1, 1.0]);
        assert_eq!(cmp.compare(&feasible, &infeasible), Dominance::Dominates);
        assert_eq!(cmp.compare(&infeasible, &feasible), Dominance::DominatedBy);
    }

    #[test]
    fn test_smaller_violation_wins() {
        let cmp = ConstraintViolationComparator;
        let slightly = constrained(&[-0.5, 1.0]);
        let badly = constrained(&[-1.0, -2.0]);
        assert_eq!(cmp.compare(&slightly, &badly), Dominance::Dominates);
        assert_eq!(cmp.compare(&badly, &slightly), Dominance::DominatedBy);
    }

    #[test]
    fn test_equal_violation_is_undecided() {
        let cmp = ConstraintViolationComparator;
        let a = constrained(&[-1.0, 0.0]);
        let b = constrained(&[0.0, -1.0]);
        assert_eq!(cmp.compare(&a, &b), Dominance::NonDominated);
    }

    #[test]
    fn test_unconstrained_against_unconstrained() {
        let cmp = ConstraintViolationComparator;
        let a: Solution<f64> = Solution::from_objectives(vec![1.0]);
        let b: Solution<f64> = Solution::from_objectives(vec![2.0]);
        assert_eq!(cmp.compare(&a, &b), Dominance::NonDominated);
    }
}
