//! Pareto ranking, density estimation and elitist archiving for
//! multi-objective evolutionary algorithms.
//!
//! Provides the selection machinery shared by NSGA-II, SPEA2 and the
//! archive-based algorithms (SMPSO, MOCell, GDE3):
//!
//! - **Dominance**: Pareto comparison with constraint-violation precedence.
//! - **Ranking**: Fast and efficient non-dominated sorting, and SPEA2
//!   strength ranking, into ordered fronts.
//! - **Density**: Crowding distance, k-th nearest neighbour distance and
//!   angular spread within a front.
//! - **Archive**: Unbounded and capacity-limited archives of mutually
//!   non-dominated solutions.
//! - **Replacement**: Environmental selection over population and offspring,
//!   preferring whole fronts and truncating the boundary front by density.
//! - **Selection**: Binary tournament on rank and density.
//!
//! All objectives are **minimized**. Solutions arrive already evaluated; the
//! engine never calls an objective function.
//!
//! # Example
//!
//! ```
//! use u_pareto::density::{CrowdingDistance, DensityEstimator};
//! use u_pareto::ranking::{FastNonDominatedSort, Ranking};
//! use u_pareto::Solution;
//!
//! let mut population: Vec<Solution<f64>> = [[1.0, 4.0], [2.0, 3.0], [3.0, 2.0], [4.0, 1.0], [2.0, 2.0]]
//!     .iter()
//!     .map(|o| Solution::from_objectives(o.to_vec()))
//!     .collect();
//!
//! let fronts = FastNonDominatedSort::new().compute(&mut population).unwrap();
//! assert_eq!(fronts.front(0), Some(&[0, 3, 4][..]));
//!
//! for front in fronts.iter() {
//!     CrowdingDistance.compute_front(&mut population, front).unwrap();
//! }
//! assert_eq!(population[0].density, Some(f64::INFINITY));
//! ```
//!
//! # Features
//!
//! - `parallel`: computes pairwise dominance with rayon for large inputs.
//! - `serde`: serialization of solutions and configuration types.

pub mod archive;
pub mod density;
pub mod dominance;
mod error;
pub mod ranking;
pub mod replacement;
pub mod selection;
mod solution;

pub use error::{ParetoError, Result};
pub use solution::Solution;
