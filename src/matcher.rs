//! Route ranking and pairwise comparison.
//!
//! [`ElevationMatcher`] runs the full pipeline: start-point filter,
//! per-candidate scoring, descending sort and truncation. It holds only its
//! validated configuration, so one matcher can serve any number of calls,
//! including concurrent ones.

use log::{debug, info, warn};

use crate::error::{ElevationMatchError, OptionExt, Result};
use crate::geo_utils::within_radius;
use crate::profile::NormalizedProfile;
use crate::scoring::{profile_similarity, score_routes};
use crate::{ComparisonReport, MatchConfig, MatchResult, Route};

/// Elevation profile matcher.
#[derive(Debug, Clone, Default)]
pub struct ElevationMatcher {
    config: MatchConfig,
}

impl ElevationMatcher {
    /// Create a matcher, rejecting invalid configuration up front.
    pub fn new(config: MatchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Keep candidates whose start lies within `max_distance_km` of the
    /// target's start.
    ///
    /// If the target has no usable start coordinate, every candidate is
    /// kept. Candidates without a usable start coordinate are dropped.
    pub fn filter_by_location<'a>(&self, target: &Route, candidates: &'a [Route]) -> Vec<&'a Route> {
        let Some(origin) = target.start_latlng.filter(|p| p.is_valid()) else {
            return candidates.iter().collect();
        };

        candidates
            .iter()
            .filter(|route| match route.start_latlng.filter(|p| p.is_valid()) {
                Some(start) => {
                    let keep = within_radius(&origin, &start, self.config.max_distance_km);
                    if !keep {
                        debug!(
                            "[ElevationMatcher] '{}' starts beyond {}km, skipped",
                            route.id, self.config.max_distance_km
                        );
                    }
                    keep
                }
                None => {
                    debug!("[ElevationMatcher] '{}' has no start point, skipped", route.id);
                    false
                }
            })
            .collect()
    }

    /// Rank candidates by similarity to the target.
    ///
    /// Candidates are filtered by start location, unmatchable ones (no
    /// elevation samples or no positive distance) are dropped, and the rest
    /// are kept if their similarity is at least `min_similarity`. Results are
    /// sorted by descending similarity; equal scores keep input order.
    ///
    /// An unmatchable target yields an empty result.
    pub fn find_matches<'a>(
        &self,
        target: &Route,
        candidates: &'a [Route],
        min_similarity: f64,
        max_results: Option<usize>,
    ) -> Vec<MatchResult<'a>> {
        if target.elevation_points.is_empty() {
            warn!("[ElevationMatcher] Target '{}' has no elevation data", target.id);
            return Vec::new();
        }
        if !target.has_positive_distance() {
            warn!("[ElevationMatcher] Target '{}' has no usable distance", target.id);
            return Vec::new();
        }

        let local = self.filter_by_location(target, candidates);
        let local_count = local.len();

        let matchable: Vec<&Route> = local
            .into_iter()
            .filter(|route| {
                let ok = !route.elevation_points.is_empty() && route.has_positive_distance();
                if !ok {
                    debug!("[ElevationMatcher] '{}' is unmatchable, skipped", route.id);
                }
                ok
            })
            .collect();

        let mut matches = self.score_candidates(target, &matchable);
        matches.retain(|m| m.similarity >= min_similarity);
        matches.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));

        if let Some(limit) = max_results {
            matches.truncate(limit);
        }

        info!(
            "[ElevationMatcher] '{}': {} candidates, {} local, {} matches",
            target.id,
            candidates.len(),
            local_count,
            matches.len()
        );

        matches
    }

    #[cfg(not(feature = "parallel"))]
    fn score_candidates<'a>(&self, target: &Route, candidates: &[&'a Route]) -> Vec<MatchResult<'a>> {
        candidates
            .iter()
            .filter_map(|&route| self.score_candidate(target, route))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn score_candidates<'a>(&self, target: &Route, candidates: &[&'a Route]) -> Vec<MatchResult<'a>> {
        use rayon::prelude::*;

        // Indexed collect keeps input order, so the stable sort stays deterministic
        candidates
            .par_iter()
            .filter_map(|&route| self.score_candidate(target, route))
            .collect()
    }

    fn score_candidate<'a>(&self, target: &Route, route: &'a Route) -> Option<MatchResult<'a>> {
        let score = score_routes(target, route, &self.config)?;
        Some(MatchResult {
            route,
            similarity: score.similarity,
            elevation_similarity: score.elevation_similarity,
        })
    }

    /// Overall similarity between two routes, or `None` if either is
    /// unmatchable.
    pub fn similarity(&self, route1: &Route, route2: &Route) -> Option<f64> {
        score_routes(route1, route2, &self.config).map(|s| s.similarity)
    }

    /// Elevation-only similarity between two normalized profiles.
    ///
    /// Returns 0.0 if either profile is empty.
    pub fn elevation_similarity(
        &self,
        profile1: &NormalizedProfile,
        profile2: &NormalizedProfile,
    ) -> f64 {
        profile_similarity(profile1, profile2, self.config.max_elevation_delta)
    }

    /// Produce a detailed comparison of two routes.
    ///
    /// Both routes need elevation samples and a positive distance.
    pub fn compare(&self, route1: &Route, route2: &Route) -> Result<ComparisonReport> {
        for route in [route1, route2] {
            ensure_matchable(route).inspect_err(|e| {
                warn!("[ElevationMatcher] Cannot compare: {}", e);
            })?;
        }

        let score = score_routes(route1, route2, &self.config)
            .ok_or_missing_elevation(&route1.id)?;

        let distance1 = route1.distance.unwrap_or(0.0);
        let distance2 = route2.distance.unwrap_or(0.0);
        // A non-finite gain is as good as unknown
        let gain1 = route1.elevation_gain.filter(|g| g.is_finite()).unwrap_or(0.0);
        let gain2 = route2.elevation_gain.filter(|g| g.is_finite()).unwrap_or(0.0);

        let (elevation_gain_diff, elevation_gain_diff_percent) = abs_and_percent_diff(gain1, gain2);
        let (distance_diff, distance_diff_percent) = abs_and_percent_diff(distance1, distance2);

        Ok(ComparisonReport {
            similarity: score.similarity,
            elevation_similarity: score.elevation_similarity,
            elevation_gain_diff,
            elevation_gain_diff_percent,
            distance_diff,
            distance_diff_percent,
            route1_stats: route1.elevation_stats(),
            route2_stats: route2.elevation_stats(),
        })
    }
}

fn ensure_matchable(route: &Route) -> Result<()> {
    if route.elevation_points.is_empty() {
        return Err(ElevationMatchError::MissingElevation {
            route_id: route.id.clone(),
        });
    }
    route
        .distance
        .filter(|d| d.is_finite() && *d > 0.0)
        .ok_or_missing_distance(&route.id, route.distance)?;
    Ok(())
}

/// Absolute difference and percentage of the larger value; 0% when the
/// larger value is not positive.
fn abs_and_percent_diff(value1: f64, value2: f64) -> (f64, f64) {
    let diff = (value1 - value2).abs();
    let max_value = value1.max(value2);
    let percent = if max_value > 0.0 {
        diff / max_value * 100.0
    } else {
        0.0
    };
    (diff, percent)
}
