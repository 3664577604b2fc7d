//! Pareto dominance between solutions.
//!
//! # Key Types
//!
//! - [`Dominance`]: Outcome of comparing two solutions, from the left operand's view
//! - [`DominanceComparator`]: Constraint-aware Pareto comparison
//! - [`ConstraintViolationComparator`]: Feasibility-first comparison used by the above
//!
//! # Sign Convention
//!
//! [`Dominance::sign`] maps the outcome to `-1` (left dominates), `0`
//! (mutually non-dominated) and `+1` (right dominates). Every comparator in
//! this crate follows it, so `compare(a, b) == compare(b, a).reverse()`.

mod comparator;
mod constraint;

pub(crate) use comparator::DominanceKey;
pub use comparator::{pareto_cmp, Dominance, DominanceComparator};
pub use constraint::ConstraintViolationComparator;
