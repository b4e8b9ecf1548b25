//! Tests for JSON representation of routes and results

use elevation_matcher::{ElevationMatcher, Route};

#[test]
fn test_route_from_partial_record() {
    let json = r#"{
        "id": "strava_route_42",
        "name": "Ridge",
        "distance": 8000.0,
        "start_latlng": {"latitude": 46.5, "longitude": 7.9},
        "elevation_points": [1200.0, 1350.0, 1500.0]
    }"#;

    let route: Route = serde_json::from_str(json).unwrap();
    assert_eq!(route.id, "strava_route_42");
    assert_eq!(route.source, "unknown");
    assert_eq!(route.elevation_gain, None);
    assert!(route.latlng_points.is_empty());
    assert_eq!(route.normalized_profile().len(), 3);
}

#[test]
fn test_report_field_names() {
    let r1 = Route::new("a", "a", Some(1000.0)).with_elevation_stream(vec![10.0, 20.0]);
    let r2 = Route::new("b", "b", Some(2000.0)).with_elevation_stream(vec![10.0, 30.0]);

    let report = ElevationMatcher::default().compare(&r1, &r2).unwrap();
    let value = serde_json::to_value(&report).unwrap();

    for field in [
        "similarity",
        "elevation_similarity",
        "elevation_gain_diff",
        "elevation_gain_diff_percent",
        "distance_diff",
        "distance_diff_percent",
    ] {
        assert!(value.get(field).is_some(), "missing {}", field);
    }
    assert_eq!(value["distance_diff_percent"], 50.0);
}

#[test]
fn test_match_result_embeds_route() {
    let target = Route::new("t", "t", Some(1000.0)).with_elevation_stream(vec![10.0, 20.0]);
    let candidates = vec![target.clone()];

    let matches = ElevationMatcher::default().find_matches(&target, &candidates, 0.0, None);
    let value = serde_json::to_value(&matches[0]).unwrap();

    assert_eq!(value["route"]["id"], "t");
    assert_eq!(value["route"]["distance"], 1000.0);
    assert!((value["similarity"].as_f64().unwrap() - 1.0).abs() < 1e-12);
}
