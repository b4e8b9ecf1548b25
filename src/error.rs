//! Unified error handling for the elevation-matcher library.
//!
//! Ranking never fails: routes that cannot be matched are dropped from the
//! result set. Errors surface from pairwise comparison and from matcher
//! construction, where a caller needs to know *why* nothing was produced.

use std::fmt;

/// Unified error type for elevation-matcher operations.
#[derive(Debug, Clone, PartialEq)]
pub enum ElevationMatchError {
    /// Route has no elevation samples
    MissingElevation { route_id: String },
    /// Route has no known, positive total distance
    MissingDistance {
        route_id: String,
        distance: Option<f64>,
    },
    /// Route carries a coordinate outside the WGS84 range
    InvalidCoordinates { route_id: String, message: String },
    /// Matcher configuration is unusable
    ConfigError { message: String },
}

impl fmt::Display for ElevationMatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElevationMatchError::MissingElevation { route_id } => {
                write!(f, "Route '{}' has no elevation data", route_id)
            }
            ElevationMatchError::MissingDistance { route_id, distance } => match distance {
                Some(d) => write!(
                    f,
                    "Route '{}' has distance {:.1}m, a positive distance is required",
                    route_id, d
                ),
                None => write!(f, "Route '{}' has no distance", route_id),
            },
            ElevationMatchError::InvalidCoordinates { route_id, message } => {
                write!(
                    f,
                    "Route '{}' has invalid coordinates: {}",
                    route_id, message
                )
            }
            ElevationMatchError::ConfigError { message } => {
                write!(f, "Configuration error: {}", message)
            }
        }
    }
}

impl std::error::Error for ElevationMatchError {}

/// Result type alias for elevation-matcher operations.
pub type Result<T> = std::result::Result<T, ElevationMatchError>;

/// Extension trait for converting missing route data into errors.
pub trait OptionExt<T> {
    /// Convert Option to Result with a missing distance error.
    fn ok_or_missing_distance(self, route_id: &str, distance: Option<f64>) -> Result<T>;

    /// Convert Option to Result with a missing elevation error.
    fn ok_or_missing_elevation(self, route_id: &str) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_missing_distance(self, route_id: &str, distance: Option<f64>) -> Result<T> {
        self.ok_or_else(|| ElevationMatchError::MissingDistance {
            route_id: route_id.to_string(),
            distance,
        })
    }

    fn ok_or_missing_elevation(self, route_id: &str) -> Result<T> {
        self.ok_or_else(|| ElevationMatchError::MissingElevation {
            route_id: route_id.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ElevationMatchError::MissingDistance {
            route_id: "route-1".to_string(),
            distance: Some(0.0),
        };
        assert!(err.to_string().contains("route-1"));
        assert!(err.to_string().contains("0.0m"));

        let err = ElevationMatchError::MissingDistance {
            route_id: "route-2".to_string(),
            distance: None,
        };
        assert_eq!(err.to_string(), "Route 'route-2' has no distance");
    }

    #[test]
    fn test_option_ext() {
        let none: Option<f64> = None;
        let result = none.ok_or_missing_elevation("route-1");
        assert!(matches!(
            result,
            Err(ElevationMatchError::MissingElevation { .. })
        ));

        let some = Some(42.0);
        assert_eq!(some.ok_or_missing_distance("route-1", None), Ok(42.0));
    }
}
