//! Similarity scoring.
//!
//! Combines the DTW elevation similarity with a total-distance similarity
//! into one weighted score in [0, 1].

use serde::{Deserialize, Serialize};

use crate::dtw::{cost_to_similarity, dtw_cost};
use crate::profile::NormalizedProfile;
use crate::{MatchConfig, Route};

/// Breakdown of a pairwise similarity score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityScore {
    /// Weighted overall similarity (0-1, higher = more similar)
    pub similarity: f64,
    /// Elevation-shape similarity from DTW (0-1)
    pub elevation_similarity: f64,
    /// Total-distance similarity (0-1)
    pub distance_similarity: f64,
    /// Raw DTW alignment cost in meters
    pub dtw_cost: f64,
}

/// Elevation similarity between two normalized profiles.
///
/// Returns 0.0 if either profile is empty.
pub fn profile_similarity(
    profile1: &NormalizedProfile,
    profile2: &NormalizedProfile,
    max_elevation_delta: f64,
) -> f64 {
    let elevations1 = profile1.elevations();
    let elevations2 = profile2.elevations();

    match dtw_cost(&elevations1, &elevations2) {
        Some(cost) => cost_to_similarity(
            cost,
            elevations1.len(),
            elevations2.len(),
            max_elevation_delta,
        ),
        None => 0.0,
    }
}

/// Similarity of two total distances.
///
/// `1 - |d1 - d2| / max(d1, d2)`, clamped to [0, 1]. Two zero distances are
/// identical and score 1.0.
pub fn distance_similarity(distance1: f64, distance2: f64) -> f64 {
    let max_distance = distance1.max(distance2);
    if max_distance <= 0.0 {
        return 1.0;
    }
    let ratio = (distance1 - distance2).abs() / max_distance;
    1.0 - ratio.clamp(0.0, 1.0)
}

/// Score two routes against each other.
///
/// Returns `None` if either route has an empty normalized profile (no
/// elevation samples, or no positive distance).
pub fn score_routes(route1: &Route, route2: &Route, config: &MatchConfig) -> Option<SimilarityScore> {
    let profile1 = route1.normalized_profile();
    let profile2 = route2.normalized_profile();

    let elevations1 = profile1.elevations();
    let elevations2 = profile2.elevations();
    let cost = dtw_cost(&elevations1, &elevations2)?;

    let elevation_similarity = cost_to_similarity(
        cost,
        elevations1.len(),
        elevations2.len(),
        config.max_elevation_delta,
    );

    // Both distances are positive here, the profiles would be empty otherwise
    let distance_similarity = distance_similarity(
        route1.distance.unwrap_or(0.0),
        route2.distance.unwrap_or(0.0),
    );

    let similarity = config.elevation_weight * elevation_similarity
        + config.distance_weight * distance_similarity;

    Some(SimilarityScore {
        similarity,
        elevation_similarity,
        distance_similarity,
        dtw_cost: cost,
    })
}
