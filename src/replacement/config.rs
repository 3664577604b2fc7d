//! Replacement configuration.

use super::RemovalPolicy;
use crate::density::DensityStrategy;
use crate::error::Result;
use crate::ranking::RankingStrategy;

/// Configuration for a
/// [`RankingAndDensityReplacement`](super::RankingAndDensityReplacement).
///
/// # Presets
///
/// ```
/// use u_pareto::replacement::{RemovalPolicy, ReplacementConfig};
/// use u_pareto::ranking::RankingStrategy;
///
/// let config = ReplacementConfig::spea2();
/// assert_eq!(config.ranking, RankingStrategy::Strength);
/// assert_eq!(config.removal_policy, RemovalPolicy::NeighbourDistances);
/// assert_eq!(ReplacementConfig::default(), ReplacementConfig::nsga2());
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_pareto::density::DensityStrategy;
/// use u_pareto::replacement::{RemovalPolicy, ReplacementConfig};
///
/// let config = ReplacementConfig::default()
///     .with_density(DensityStrategy::Knn { k: 2 })
///     .with_removal_policy(RemovalPolicy::OneShot);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReplacementConfig {
    /// How the union of population and offspring is split into fronts.
    pub ranking: RankingStrategy,

    /// Density estimator for accepted fronts and truncation.
    pub density: DensityStrategy,

    /// How the boundary front is truncated.
    pub removal_policy: RemovalPolicy,
}

impl Default for ReplacementConfig {
    fn default() -> Self {
        Self::nsga2()
    }
}

impl ReplacementConfig {
    /// Fast non-dominated sorting with crowding distance, sequential removal.
    pub fn nsga2() -> Self {
        Self {
            ranking: RankingStrategy::FastNonDominatedSort,
            density: DensityStrategy::CrowdingDistance,
            removal_policy: RemovalPolicy::Sequential,
        }
    }

    /// Strength ranking with nearest-neighbour density and SPEA2 truncation.
    pub fn spea2() -> Self {
        Self {
            ranking: RankingStrategy::Strength,
            density: DensityStrategy::Knn { k: 1 },
            removal_policy: RemovalPolicy::NeighbourDistances,
        }
    }

    pub fn with_ranking(mut self, ranking: RankingStrategy) -> Self {
        self.ranking = ranking;
        self
    }

    pub fn with_density(mut self, density: DensityStrategy) -> Self {
        self.density = density;
        self
    }

    pub fn with_removal_policy(mut self, removal_policy: RemovalPolicy) -> Self {
        self.removal_policy = removal_policy;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        self.density.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_nsga2() {
        let config = ReplacementConfig::default();
        assert_eq!(config.ranking, RankingStrategy::FastNonDominatedSort);
        assert_eq!(config.density, DensityStrategy::CrowdingDistance);
        assert_eq!(config.removal_policy, RemovalPolicy::Sequential);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_spea2_preset() {
        let config = ReplacementConfig::spea2();
        assert_eq!(config.ranking, RankingStrategy::Strength);
        assert_eq!(config.density, DensityStrategy::Knn { k: 1 });
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = ReplacementConfig::nsga2()
            .with_ranking(RankingStrategy::Strength)
            .with_removal_policy(RemovalPolicy::OneShot);
        assert_eq!(config.ranking, RankingStrategy::Strength);
        assert_eq!(config.density, DensityStrategy::CrowdingDistance);
        assert_eq!(config.removal_policy, RemovalPolicy::OneShot);
    }

    #[test]
    fn test_validate_zero_neighbours() {
        let config = ReplacementConfig::spea2().with_density(DensityStrategy::Knn { k: 0 });
        assert!(config.validate().is_err());
        let angle = ReplacementConfig::nsga2().with_density(DensityStrategy::Angle {
            neighbours: 0,
            normalize: true,
        });
        assert!(angle.validate().is_err());
    }

    #[test]
    fn test_many_objective_setup() {
        let config = ReplacementConfig::nsga2()
            .with_ranking(RankingStrategy::Efficient)
            .with_density(DensityStrategy::Angle {
                neighbours: 2,
                normalize: true,
            });
        assert!(config.validate().is_ok());
        assert_eq!(config.removal_policy, RemovalPolicy::Sequential);
    }
}
