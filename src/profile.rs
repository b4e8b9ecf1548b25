//! Elevation profile normalization.
//!
//! Reindexes raw elevation samples by relative position along the route
//! (0.0 at the start, 1.0 at the finish). No smoothing, resampling or
//! interpolation happens here: two routes with different sample counts keep
//! different profile lengths, which is why comparison goes through DTW.

use serde::{Deserialize, Serialize};

use crate::ElevationStats;

/// A single point of a normalized profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfilePoint {
    /// Relative position along the route in [0, 1]
    pub position: f64,
    /// Elevation in meters
    pub elevation: f64,
}

/// Elevation samples indexed by relative position along the route.
///
/// Positions are non-decreasing, start at exactly 0.0 and, for two or more
/// samples, end at exactly 1.0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedProfile {
    pub points: Vec<ProfilePoint>,
}

impl NormalizedProfile {
    /// An empty profile marks a route that cannot be matched.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Elevation component of the profile, in order.
    pub fn elevations(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.elevation).collect()
    }
}

/// Normalize elevation samples into a length-independent profile.
///
/// Returns an empty profile when there are no samples or when the route
/// distance is unknown, non-finite or not positive.
///
/// # Example
/// ```
/// use elevation_matcher::profile::normalize_profile;
///
/// let profile = normalize_profile(&[100.0, 150.0, 120.0], Some(5000.0));
/// assert_eq!(profile.points[0].position, 0.0);
/// assert_eq!(profile.points[1].position, 0.5);
/// assert_eq!(profile.points[2].position, 1.0);
///
/// assert!(normalize_profile(&[100.0, 150.0], None).is_empty());
/// ```
pub fn normalize_profile(elevations: &[f64], distance: Option<f64>) -> NormalizedProfile {
    let has_distance = matches!(distance, Some(d) if d.is_finite() && d > 0.0);
    if elevations.is_empty() || !has_distance {
        return NormalizedProfile::default();
    }

    let n = elevations.len();
    let last = n.saturating_sub(1);

    let points = elevations
        .iter()
        .enumerate()
        .map(|(i, &elevation)| {
            // Divide per point so the final position is exactly 1.0
            let position = if last == 0 {
                0.0
            } else {
                i as f64 / last as f64
            };
            ProfilePoint {
                position,
                elevation,
            }
        })
        .collect();

    NormalizedProfile { points }
}

/// Compute min/max/mean over elevation samples.
///
/// `gain` is passed through unchanged; it comes from the route record, not
/// from the samples.
pub fn elevation_stats(elevations: &[f64], gain: Option<f64>) -> ElevationStats {
    if elevations.is_empty() {
        return ElevationStats {
            gain,
            min: None,
            max: None,
            avg: None,
        };
    }

    let min = elevations.iter().copied().fold(f64::INFINITY, f64::min);
    let max = elevations.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let avg = elevations.iter().sum::<f64>() / elevations.len() as f64;

    ElevationStats {
        gain,
        min: Some(min),
        max: Some(max),
        avg: Some(avg),
    }
}

/// Uniformly downsample elevation samples to at most `max_points`.
///
/// DTW cost is quadratic in sample count; callers that need bounded latency
/// can cap their inputs with this before matching. The first and last
/// samples are always kept. Never applied implicitly by the matcher.
pub fn downsample(elevations: &[f64], max_points: usize) -> Vec<f64> {
    if max_points == 0 {
        return Vec::new();
    }
    if elevations.len() <= max_points {
        return elevations.to_vec();
    }
    if max_points == 1 {
        return vec![elevations[0]];
    }

    let last = elevations.len() - 1;
    let step = last as f64 / (max_points - 1) as f64;
    (0..max_points)
        .map(|i| {
            let idx = ((i as f64 * step).round() as usize).min(last);
            elevations[idx]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_span_unit_interval() {
        let samples: Vec<f64> = (0..7).map(|i| 100.0 + i as f64 * 3.0).collect();
        let profile = normalize_profile(&samples, Some(1234.0));

        assert_eq!(profile.len(), 7);
        assert_eq!(profile.points.first().unwrap().position, 0.0);
        assert_eq!(profile.points.last().unwrap().position, 1.0);
        assert!(profile
            .points
            .windows(2)
            .all(|w| w[0].position <= w[1].position));
        assert_eq!(profile.elevations(), samples);
    }

    #[test]
    fn test_single_sample_profile() {
        let profile = normalize_profile(&[250.0], Some(10.0));
        assert_eq!(profile.len(), 1);
        assert_eq!(profile.points[0].position, 0.0);
        assert_eq!(profile.points[0].elevation, 250.0);
    }

    #[test]
    fn test_unmatchable_inputs_give_empty_profile() {
        assert!(normalize_profile(&[], Some(1000.0)).is_empty());
        assert!(normalize_profile(&[1.0, 2.0], None).is_empty());
        assert!(normalize_profile(&[1.0, 2.0], Some(0.0)).is_empty());
        assert!(normalize_profile(&[1.0, 2.0], Some(-5.0)).is_empty());
        assert!(normalize_profile(&[1.0, 2.0], Some(f64::INFINITY)).is_empty());
        assert!(normalize_profile(&[1.0, 2.0], Some(f64::NAN)).is_empty());
    }

    #[test]
    fn test_elevation_stats() {
        let stats = elevation_stats(&[100.0, 300.0, 200.0], Some(250.0));
        assert_eq!(stats.min, Some(100.0));
        assert_eq!(stats.max, Some(300.0));
        assert_eq!(stats.avg, Some(200.0));
        assert_eq!(stats.gain, Some(250.0));

        let empty = elevation_stats(&[], None);
        assert_eq!(empty.min, None);
        assert_eq!(empty.avg, None);
    }

    #[test]
    fn test_downsample_keeps_endpoints() {
        let samples: Vec<f64> = (0..1000).map(|i| i as f64).collect();
        let reduced = downsample(&samples, 50);
        assert_eq!(reduced.len(), 50);
        assert_eq!(reduced[0], 0.0);
        assert_eq!(*reduced.last().unwrap(), 999.0);

        // Short inputs pass through
        assert_eq!(downsample(&samples[..10], 50).len(), 10);
        assert!(downsample(&samples, 0).is_empty());
    }
}
