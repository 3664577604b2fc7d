//! External archives of non-dominated solutions.
//!
//! Archive-based algorithms (SMPSO, OMOPSO, MOCell, GDE3 variants) keep the
//! best solutions found so far in an archive that is updated one solution at
//! a time. Archives store their own clones, so later changes to the working
//! population never reach archived solutions.
//!
//! # Key Types
//!
//! - [`NonDominatedArchive`]: Unbounded; keeps every non-dominated, non-duplicate solution
//! - [`BoundedArchive`]: Capacity-limited; evicts the most crowded member on overflow
//! - [`CrowdingDistanceArchive`]: [`BoundedArchive`] using crowding distance
//! - [`ArchiveConfig`]: Capacity and density estimator, buildable from configuration
//!
//! # Insertion Order
//!
//! Eviction depends on the order in which solutions are added: the member
//! removed on overflow is the least isolated one *at that moment*. Two
//! different insertion orders of the same solutions may therefore leave
//! different archives behind.

mod bounded;
mod config;
mod non_dominated;

pub use bounded::{BoundedArchive, CrowdingDistanceArchive};
pub use config::ArchiveConfig;
pub use non_dominated::NonDominatedArchive;
