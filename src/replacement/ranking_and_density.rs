//! Environmental selection by rank, then density on the boundary front.

use std::cmp::Ordering;

use super::{RemovalPolicy, Replacement, ReplacementConfig};
use crate::density::{
    density_descending, distance_matrix, CrowdingDistance, DensityEstimator, DensityStrategy,
    KnnDensity,
};
use crate::error::{ParetoError, Result};
use crate::ranking::{FastNonDominatedSort, Ranking, RankingStrategy, StrengthRanking};
use crate::solution::Solution;

/// Replacement by Pareto rank first and density second.
///
/// The union of population and offspring is ranked. Whole fronts are
/// accepted in rank order while they fit; the first front that does not fit
/// is truncated according to the [`RemovalPolicy`]. Every retained solution
/// carries its `rank` and a `density` computed within its front, ready for
/// [`BinaryTournament`](crate::selection::BinaryTournament) selection.
///
/// The result lists accepted fronts in rank order; the truncated front comes
/// last, most isolated first.
///
/// # References
///
/// - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II"
/// - Zitzler, Laumanns & Thiele (2001), "SPEA2: Improving the Strength Pareto
///   Evolutionary Algorithm"
#[derive(Debug, Clone)]
pub struct RankingAndDensityReplacement<R, D> {
    ranking: R,
    density: D,
    removal_policy: RemovalPolicy,
}

impl RankingAndDensityReplacement<FastNonDominatedSort, CrowdingDistance> {
    /// NSGA-II environmental selection.
    pub fn nsga2() -> Self {
        Self::new(
            FastNonDominatedSort::new(),
            CrowdingDistance,
            RemovalPolicy::Sequential,
        )
    }
}

impl RankingAndDensityReplacement<StrengthRanking, KnnDensity> {
    /// SPEA2 environmental selection.
    pub fn spea2() -> Self {
        Self::new(
            StrengthRanking::new(),
            KnnDensity::default(),
            RemovalPolicy::NeighbourDistances,
        )
    }
}

impl RankingAndDensityReplacement<RankingStrategy, DensityStrategy> {
    /// Creates a replacement from a validated configuration.
    ///
    /// # Errors
    ///
    /// [`ParetoError::InvalidArgument`] if the configuration is invalid.
    pub fn from_config(config: &ReplacementConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(
            config.ranking,
            config.density,
            config.removal_policy,
        ))
    }
}

impl<R, D> RankingAndDensityReplacement<R, D> {
    pub fn new(ranking: R, density: D, removal_policy: RemovalPolicy) -> Self {
        Self {
            ranking,
            density,
            removal_policy,
        }
    }

    pub fn ranking(&self) -> &R {
        &self.ranking
    }

    pub fn density(&self) -> &D {
        &self.density
    }

    pub fn removal_policy(&self) -> RemovalPolicy {
        self.removal_policy
    }
}

impl<R: Ranking, D: DensityEstimator> RankingAndDensityReplacement<R, D> {
    /// Returns the members of `front` to keep, `keep` of them, most isolated
    /// first.
    fn truncate<V>(
        &self,
        solutions: &mut [Solution<V>],
        front: &[usize],
        keep: usize,
    ) -> Result<Vec<usize>> {
        let mut kept = match self.removal_policy {
            RemovalPolicy::OneShot => {
                self.density.compute_front(solutions, front)?;
                front.to_vec()
            }
            RemovalPolicy::Sequential => {
                let mut kept = front.to_vec();
                while kept.len() > keep {
                    self.density.compute_front(solutions, &kept)?;
                    let position = least_isolated(solutions, &kept)?;
                    kept.remove(position);
                }
                self.density.compute_front(solutions, &kept)?;
                kept
            }
            RemovalPolicy::NeighbourDistances => {
                let kept = truncate_by_neighbour_distances(solutions, front, keep);
                self.density.compute_front(solutions, &kept)?;
                kept
            }
        };

        // stable: equal densities keep front order
        kept.sort_by(|&a, &b| density_descending(&solutions[a], &solutions[b]));
        kept.truncate(keep);
        Ok(kept)
    }
}

impl<R: Ranking, D: DensityEstimator> Replacement for RankingAndDensityReplacement<R, D> {
    fn replace<V>(
        &self,
        population: Vec<Solution<V>>,
        offspring: Vec<Solution<V>>,
    ) -> Result<Vec<Solution<V>>> {
        let target = population.len();
        let mut union = population;
        union.extend(offspring);

        let fronts = self.ranking.compute(&mut union)?;

        let mut selected: Vec<usize> = Vec::with_capacity(target);
        for (rank, front) in fronts.iter().enumerate() {
            let remaining = target - selected.len();
            if remaining == 0 {
                break;
            }
            if front.len() <= remaining {
                self.density.compute_front(&mut union, front)?;
                selected.extend_from_slice(front);
            } else {
                log::debug!(
                    "truncating front {} from {} to {} solutions ({:?})",
                    rank,
                    front.len(),
                    remaining,
                    self.removal_policy
                );
                let kept = self.truncate(&mut union, front, remaining)?;
                selected.extend(kept);
            }
        }

        if selected.len() != target {
            return Err(ParetoError::InvariantViolation(format!(
                "replacement selected {} solutions, expected {}",
                selected.len(),
                target
            )));
        }

        let mut slots: Vec<Option<Solution<V>>> = union.into_iter().map(Some).collect();
        selected
            .iter()
            .map(|&i| {
                slots.get_mut(i).and_then(Option::take).ok_or_else(|| {
                    ParetoError::InvariantViolation(format!("solution {i} selected twice"))
                })
            })
            .collect()
    }
}

/// Position in `members` of the smallest density, the last one on ties.
fn least_isolated<V>(solutions: &[Solution<V>], members: &[usize]) -> Result<usize> {
    let mut worst: Option<(usize, f64)> = None;
    for (position, &i) in members.iter().enumerate() {
        let density = solutions[i].density.unwrap_or(f64::NEG_INFINITY);
        match worst {
            Some((_, d)) if density.total_cmp(&d) == Ordering::Greater => {}
            _ => worst = Some((position, density)),
        }
    }
    worst
        .map(|(position, _)| position)
        .ok_or_else(|| ParetoError::InvariantViolation("truncating an empty front".into()))
}

/// SPEA2 archive truncation over the members of `front`.
///
/// Keeps `keep` members in front order.
fn truncate_by_neighbour_distances<V>(
    solutions: &[Solution<V>],
    front: &[usize],
    keep: usize,
) -> Vec<usize> {
    let objectives: Vec<&[f64]> = front
        .iter()
        .map(|&i| solutions[i].objectives.as_slice())
        .collect();
    let matrix = distance_matrix(&objectives);

    // positions into `front`
    let mut alive: Vec<usize> = (0..front.len()).collect();
    while alive.len() > keep {
        let mut worst: Option<(usize, Vec<f64>)> = None;
        for (position, &i) in alive.iter().enumerate() {
            let mut distances: Vec<f64> = alive
                .iter()
                .filter(|&&j| j != i)
                .map(|&j| matrix[i][j])
                .collect();
            distances.sort_by(f64::total_cmp);
            match &worst {
                Some((_, w)) if lexicographic(&distances, w) != Ordering::Less => {}
                _ => worst = Some((position, distances)),
            }
        }
        match worst {
            Some((position, _)) => {
                alive.remove(position);
            }
            None => break,
        }
    }

    alive.into_iter().map(|p| front[p]).collect()
}

fn lexicographic(a: &[f64], b: &[f64]) -> Ordering {
    a.iter()
        .zip(b)
        .map(|(x, y)| x.total_cmp(y))
        .find(|o| o.is_ne())
        .unwrap_or_else(|| a.len().cmp(&b.len()))
}
