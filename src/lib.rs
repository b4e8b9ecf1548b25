//! # Elevation Matcher
//!
//! Elevation profile similarity matching for routes.
//!
//! This library provides:
//! - Length-independent elevation profiles
//! - Dynamic Time Warping (DTW) comparison of profiles of different lengths
//! - Weighted elevation + distance similarity scoring
//! - Start-point radius filtering and top-k ranking of candidate routes
//!
//! ## Features
//!
//! - **`parallel`** - Score candidates in parallel with rayon
//!
//! ## Quick Start
//!
//! ```rust
//! use elevation_matcher::{ElevationMatcher, Route};
//!
//! let target = Route::new("target", "Morning climb", Some(10000.0))
//!     .with_elevation_stream(vec![100.0, 120.0, 150.0, 180.0, 150.0, 100.0]);
//!
//! let candidates = vec![
//!     Route::new("a", "Hill loop", Some(12000.0))
//!         .with_elevation_stream(vec![110.0, 130.0, 160.0, 190.0, 160.0, 110.0]),
//!     Route::new("b", "Valley loop", Some(8000.0))
//!         .with_elevation_stream(vec![200.0, 180.0, 150.0, 120.0, 150.0, 200.0]),
//! ];
//!
//! let matcher = ElevationMatcher::default();
//! let matches = matcher.find_matches(&target, &candidates, 0.0, Some(5));
//! assert_eq!(matches[0].route.id, "a");
//! ```

use serde::{Deserialize, Serialize};

// Unified error handling
pub mod error;
pub use error::{ElevationMatchError, OptionExt, Result};

// Geographic utilities (haversine, track length)
pub mod geo_utils;

// Profile normalization and elevation statistics
pub mod profile;
pub use profile::{normalize_profile, NormalizedProfile, ProfilePoint};

// Dynamic Time Warping
pub mod dtw;
pub use dtw::dtw_cost;

// Similarity scoring
pub mod scoring;
pub use scoring::{score_routes, SimilarityScore};

// Filtering, ranking and comparison
pub mod matcher;
pub use matcher::ElevationMatcher;

// Keyed route store
pub mod store;
pub use store::RouteStore;

// ============================================================================
// Core Types
// ============================================================================

/// A GPS coordinate with latitude and longitude.
///
/// # Example
/// ```
/// use elevation_matcher::GpsPoint;
/// let point = GpsPoint::new(37.7749, -122.4194); // San Francisco
/// assert!(point.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GpsPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GpsPoint {
    /// Create a new GPS point.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Check if the point has valid coordinates.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }
}

fn default_source() -> String {
    "unknown".to_string()
}

/// A route with its elevation and coordinate streams.
///
/// Streams are attached with the `with_*` builders before the route is
/// handed to the matcher; matching only ever borrows routes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Unique identifier within a session
    pub id: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Total distance in meters
    #[serde(default)]
    pub distance: Option<f64>,
    /// Total elevation gain in meters
    #[serde(default)]
    pub elevation_gain: Option<f64>,
    #[serde(default)]
    pub start_latlng: Option<GpsPoint>,
    #[serde(default)]
    pub end_latlng: Option<GpsPoint>,
    /// Elevation samples in meters, index-aligned with `latlng_points`
    #[serde(default)]
    pub elevation_points: Vec<f64>,
    #[serde(default)]
    pub latlng_points: Vec<GpsPoint>,
    /// Where the route came from (e.g. "strava", "local")
    #[serde(default = "default_source")]
    pub source: String,
}

impl Route {
    /// Create a route with no streams attached.
    pub fn new(id: &str, name: &str, distance: Option<f64>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            distance,
            elevation_gain: None,
            start_latlng: None,
            end_latlng: None,
            elevation_points: Vec::new(),
            latlng_points: Vec::new(),
            source: default_source(),
        }
    }

    /// Attach an elevation stream, replacing any existing samples.
    pub fn with_elevation_stream(mut self, elevations: Vec<f64>) -> Self {
        self.elevation_points = elevations;
        self
    }

    /// Attach a coordinate stream, replacing any existing samples.
    ///
    /// Missing start/end coordinates are taken from the first and last
    /// samples, and a missing distance from the track length.
    pub fn with_latlng_stream(mut self, points: Vec<GpsPoint>) -> Self {
        if self.start_latlng.is_none() {
            self.start_latlng = points.first().copied();
        }
        if self.end_latlng.is_none() {
            self.end_latlng = points.last().copied();
        }
        self.latlng_points = points;
        if self.distance.is_none() && self.latlng_points.len() >= 2 {
            self.distance = Some(self.track_distance());
        }
        self
    }

    pub fn with_start(mut self, start: GpsPoint) -> Self {
        self.start_latlng = Some(start);
        self
    }

    pub fn with_end(mut self, end: GpsPoint) -> Self {
        self.end_latlng = Some(end);
        self
    }

    pub fn with_elevation_gain(mut self, gain: f64) -> Self {
        self.elevation_gain = Some(gain);
        self
    }

    pub fn with_source(mut self, source: &str) -> Self {
        self.source = source.to_string();
        self
    }

    /// Whether the route has a known, finite, positive total distance.
    pub fn has_positive_distance(&self) -> bool {
        matches!(self.distance, Some(d) if d.is_finite() && d > 0.0)
    }

    /// Length of the coordinate track in meters (0.0 without a track).
    pub fn track_distance(&self) -> f64 {
        geo_utils::track_length(&self.latlng_points)
    }

    /// Normalized elevation profile; empty if the route is unmatchable.
    pub fn normalized_profile(&self) -> NormalizedProfile {
        normalize_profile(&self.elevation_points, self.distance)
    }

    /// Elevation statistics over the samples, plus the recorded gain.
    pub fn elevation_stats(&self) -> ElevationStats {
        profile::elevation_stats(&self.elevation_points, self.elevation_gain)
    }

    /// Reject routes carrying out-of-range or non-finite coordinates.
    pub fn check_coordinates(&self) -> Result<()> {
        let endpoints = [("start", self.start_latlng), ("end", self.end_latlng)];
        for (label, point) in endpoints {
            if let Some(p) = point.filter(|p| !p.is_valid()) {
                return Err(ElevationMatchError::InvalidCoordinates {
                    route_id: self.id.clone(),
                    message: format!("{} point ({}, {})", label, p.latitude, p.longitude),
                });
            }
        }
        if let Some(index) = self.latlng_points.iter().position(|p| !p.is_valid()) {
            return Err(ElevationMatchError::InvalidCoordinates {
                route_id: self.id.clone(),
                message: format!("track sample {}", index),
            });
        }
        Ok(())
    }
}

/// Elevation statistics for a route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElevationStats {
    /// Recorded total elevation gain in meters
    pub gain: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub avg: Option<f64>,
}

/// A ranked candidate.
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult<'a> {
    pub route: &'a Route,
    /// Overall similarity (0-1, higher = better match)
    pub similarity: f64,
    /// Elevation-shape similarity (0-1)
    pub elevation_similarity: f64,
}

/// Detailed comparison of two routes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// Overall similarity (0-1)
    pub similarity: f64,
    /// Elevation-shape similarity (0-1)
    pub elevation_similarity: f64,
    /// Absolute elevation gain difference in meters
    pub elevation_gain_diff: f64,
    /// Elevation gain difference as a percentage of the larger gain
    pub elevation_gain_diff_percent: f64,
    /// Absolute distance difference in meters
    pub distance_diff: f64,
    /// Distance difference as a percentage of the larger distance
    pub distance_diff_percent: f64,
    pub route1_stats: ElevationStats,
    pub route2_stats: ElevationStats,
}

/// Configuration for elevation matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Maximum distance between start points for a candidate to be considered.
    /// Default: 50.0 km
    pub max_distance_km: f64,

    /// Weight of the elevation similarity in the overall score.
    /// Default: 0.7
    pub elevation_weight: f64,

    /// Weight of the distance similarity in the overall score.
    /// Default: 0.3
    pub distance_weight: f64,

    /// Worst plausible per-sample elevation difference, used to normalize DTW cost.
    /// Default: 1000.0 meters
    pub max_elevation_delta: f64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_distance_km: 50.0,
            elevation_weight: 0.7,
            distance_weight: 0.3,
            max_elevation_delta: 1000.0,
        }
    }
}

/// Allowed deviation of the weight sum from 1.0.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

impl MatchConfig {
    /// Check that the configuration produces scores in [0, 1].
    pub fn validate(&self) -> Result<()> {
        let weights = [
            ("elevation_weight", self.elevation_weight),
            ("distance_weight", self.distance_weight),
        ];
        for (name, weight) in weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(config_error(format!("{} must be non-negative, got {}", name, weight)));
            }
        }

        let sum = self.elevation_weight + self.distance_weight;
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(config_error(format!("weights must sum to 1, got {}", sum)));
        }

        if !self.max_elevation_delta.is_finite() || self.max_elevation_delta <= 0.0 {
            return Err(config_error(format!(
                "max_elevation_delta must be positive, got {}",
                self.max_elevation_delta
            )));
        }

        if self.max_distance_km.is_nan() || self.max_distance_km < 0.0 {
            return Err(config_error(format!(
                "max_distance_km must be non-negative, got {}",
                self.max_distance_km
            )));
        }

        Ok(())
    }
}

fn config_error(message: String) -> ElevationMatchError {
    ElevationMatchError::ConfigError { message }
}

// ============================================================================
// Tests
// ============================================================================
