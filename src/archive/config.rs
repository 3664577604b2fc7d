//! Bounded archive configuration.

use crate::density::DensityStrategy;
use crate::error::Result;

/// Configuration for a [`BoundedArchive`](super::BoundedArchive).
///
/// # Defaults
///
/// ```
/// use u_pareto::archive::ArchiveConfig;
/// use u_pareto::density::DensityStrategy;
///
/// let config = ArchiveConfig::default();
/// assert_eq!(config.capacity, 100);
/// assert_eq!(config.density, DensityStrategy::CrowdingDistance);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_pareto::archive::ArchiveConfig;
/// use u_pareto::density::DensityStrategy;
///
/// let config = ArchiveConfig::default()
///     .with_capacity(50)
///     .with_density(DensityStrategy::Knn { k: 1 });
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArchiveConfig {
    /// Maximum number of stored solutions.
    ///
    /// Zero is allowed and yields an archive that rejects everything.
    /// Typical values match the population size (100–200).
    pub capacity: usize,

    /// Density estimator used to pick the member evicted on overflow.
    pub density: DensityStrategy,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            capacity: 100,
            density: DensityStrategy::CrowdingDistance,
        }
    }
}

impl ArchiveConfig {
    /// Sets the capacity.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the density estimator.
    pub fn with_density(mut self, density: DensityStrategy) -> Self {
        self.density = density;
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
    fn test_default_config() {
        let config = ArchiveConfig::default();
        assert_eq!(config.capacity, 100);
        assert_eq!(config.density, DensityStrategy::CrowdingDistance);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = ArchiveConfig::default()
            .with_capacity(0)
            .with_density(DensityStrategy::Knn { k: 3 });
        assert_eq!(config.capacity, 0);
        assert_eq!(config.density, DensityStrategy::Knn { k: 3 });
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_neighbours() {
        let config = ArchiveConfig::default().with_density(DensityStrategy::Knn { k: 0 });
        assert!(config.validate().is_err());
    }
}
