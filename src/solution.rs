//! The solution record shared by every engine component.
//!
//! A [`Solution`] carries opaque decision variables, the evaluated objective
//! and constraint values, and the two attributes written by the engine:
//! [`rank`](Solution::rank) (by a [`Ranking`](crate::ranking::Ranking)) and
//! [`density`](Solution::density) (by a
//! [`DensityEstimator`](crate::density::DensityEstimator)).
//!
//! All objectives are **minimized**. A constraint value below zero means the
//! constraint is violated; an empty constraint vector means the problem is
//! unconstrained.

use crate::error::{ParetoError, Result};

/// An evaluated candidate solution.
///
/// # Example
///
/// ```
/// use u_pareto::Solution;
///
/// let s = Solution::new(vec![0.5_f64, 0.25], vec![1.0, 2.0])
///     .with_constraints(vec![0.0, -0.5]);
///
/// assert_eq!(s.number_of_objectives(), 2);
/// assert!(!s.is_feasible());
/// assert_eq!(s.overall_constraint_violation(), -0.5);
/// assert!(s.rank.is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution<V> {
    /// Decision variables. Never inspected by the engine.
    pub variables: Vec<V>,

    /// Objective values, all minimized.
    pub objectives: Vec<f64>,

    /// Constraint values; `< 0` means violated.
    pub constraints: Vec<f64>,

    /// Front index assigned by the last ranking (0 = non-dominated).
    pub rank: Option<usize>,

    /// Density assigned by the last density estimation.
    ///
    /// Larger means more isolated. Extreme solutions receive `+inf`.
    pub density: Option<f64>,
}

impl<V> Solution<V> {
    /// Creates an unconstrained solution.
    pub fn new(variables: Vec<V>, objectives: Vec<f64>) -> Self {
        Self {
            variables,
            objectives,
            constraints: Vec::new(),
            rank: None,
            density: None,
        }
    }

    /// Creates a solution with no decision variables.
    ///
    /// Handy when only the objective space matters.
    pub fn from_objectives(objectives: Vec<f64>) -> Self {
        Self::new(Vec::new(), objectives)
    }

    /// Sets the constraint values.
    pub fn with_constraints(mut self, constraints: Vec<f64>) -> Self {
        self.constraints = constraints;
        self
    }

    pub fn number_of_objectives(&self) -> usize {
        self.objectives.len()
    }

    /// Sum of the violated (negative) constraint values.
    ///
    /// Zero for feasible solutions, negative otherwise.
    pub fn overall_constraint_violation(&self) -> f64 {
        self.constraints.iter().filter(|&&c| c < 0.0).sum()
    }

    pub fn number_of_violated_constraints(&self) -> usize {
        self.constraints.iter().filter(|&&c| c < 0.0).count()
    }

    pub fn is_feasible(&self) -> bool {
        self.number_of_violated_constraints() == 0
    }

    /// Returns `true` if both solutions have the same objective vector.
    pub fn has_same_objectives(&self, other: &Self) -> bool {
        self.objectives == other.objectives
    }

    /// Clears the engine-written attributes.
    pub fn reset_attributes(&mut self) {
        self.rank = None;
        self.density = None;
    }
}

/// Checks that all solutions share one non-zero objective count.
///
/// Returns `Ok(None)` for an empty slice and `Ok(Some(m))` otherwise.
pub(crate) fn objective_count<V>(solutions: &[Solution<V>]) -> Result<Option<usize>> {
    let Some(first) = solutions.first() else {
        return Ok(None);
    };
    let expected = first.objectives.len();
    if expected == 0 {
        return Err(ParetoError::NoObjectives);
    }
    check_all(solutions.iter().map(|s| s.objectives.len()), expected)?;
    Ok(Some(expected))
}

/// Like [`objective_count`], restricted to the solutions at `indices`.
pub(crate) fn objective_count_of<V>(
    solutions: &[Solution<V>],
    indices: &[usize],
) -> Result<Option<usize>> {
    let mut lengths = Vec::with_capacity(indices.len());
    for &i in indices {
        let s = solutions.get(i).ok_or_else(|| {
            ParetoError::InvalidArgument(format!(
                "index {i} out of bounds for {} solutions",
                solutions.len()
            ))
        })?;
        lengths.push(s.objectives.len());
    }
    let Some(&expected) = lengths.first() else {
        return Ok(None);
    };
    if expected == 0 {
        return Err(ParetoError::NoObjectives);
    }
    check_all(lengths.into_iter(), expected)?;
    Ok(Some(expected))
}

fn check_all(mut lengths: impl Iterator<Item = usize>, expected: usize) -> Result<()> {
    match lengths.find(|&found| found != expected) {
        Some(found) => Err(ParetoError::ObjectiveCountMismatch { expected, found }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sol(objectives: &[f64]) -> Solution<f64> {
        Solution::from_objectives(objectives.to_vec())
    }

    #[test]
    fn test_unconstrained_is_feasible() {
        let s = sol(&[1.0, 2.0]);
        assert!(s.is_feasible());
        assert_eq!(s.overall_constraint_violation(), 0.0);
        assert_eq!(s.number_of_violated_constraints(), 0);
    }

    #[test]
    fn test_violation_sums_only_negative_values() {
        let s = sol(&[1.0]).with_constraints(vec![-1.0, 3.0, -0.5, 0.0]);
        assert_eq!(s.number_of_violated_constraints(), 2);
        assert!((s.overall_constraint_violation() + 1.5).abs() < 1e-12);
        assert!(!s.is_feasible());
    }

    #[test]
    fn test_same_objectives() {
        assert!(sol(&[1.0, 2.0]).has_same_objectives(&sol(&[1.0, 2.0])));
        assert!(!sol(&[1.0, 2.0]).has_same_objectives(&sol(&[1.0, 2.5])));
    }

    #[test]
    fn test_reset_attributes() {
        let mut s = sol(&[1.0]);
        s.rank = Some(3);
        s.density = Some(0.5);
        s.reset_attributes();
        assert!(s.rank.is_none());
        assert!(s.density.is_none());
    }

    #[test]
    fn test_objective_count_empty() {
        let empty: Vec<Solution<f64>> = Vec::new();
        assert_eq!(objective_count(&empty), Ok(None));
    }

    #[test]
    fn test_objective_count_mismatch() {
        let solutions = vec![sol(&[1.0, 2.0]), sol(&[1.0])];
        assert_eq!(
            objective_count(&solutions),
            Err(ParetoError::ObjectiveCountMismatch {
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_objective_count_zero_objectives() {
        let solutions = vec![sol(&[]), sol(&[])];
        assert_eq!(objective_count(&solutions), Err(ParetoError::NoObjectives));
    }

    #[test]
    fn test_objective_count_of_subset() {
        let solutions = vec![sol(&[1.0, 2.0]), sol(&[1.0]), sol(&[3.0, 4.0])];
        assert_eq!(objective_count_of(&solutions, &[0, 2]), Ok(Some(2)));
        assert!(objective_count_of(&solutions, &[0, 1]).is_err());
        assert!(matches!(
            objective_count_of(&solutions, &[7]),
            Err(ParetoError::InvalidArgument(_))
        ));
    }
}
