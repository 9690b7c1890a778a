use chartinfo::bodies::CANONICAL_DISPLAY;
use chartinfo::chart::ChartRequest;
use chartinfo::{CelestialBody, HouseSystem};
use std::collections::HashMap;

fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_empty_query_gives_defaults() {
    let request = ChartRequest::from_query(&HashMap::new());
    assert_eq!(request, ChartRequest::default());
    assert_eq!(request.year, 1970);
    assert_eq!(request.house_system, HouseSystem::new('E'));
    assert_eq!(request.display.as_str(), CANONICAL_DISPLAY.as_str());
}

#[test]
fn test_full_query() {
    let request = ChartRequest::from_query(&query(&[
        ("year", "2019"),
        ("month", "2"),
        ("day", "18"),
        ("time", "16.083334"),
        ("lat", "-33.5"),
        ("lon", "151.25"),
        ("hsys", "Placidus"),
        ("display", "0,1,2,3,4,5,6,7,8,9,10,12,23"),
        ("name", "Ada"),
        ("city", "Sydney"),
    ]));

    assert_eq!(request.year, 2019);
    assert_eq!(request.month, 2);
    assert_eq!(request.day, 18);
    assert_eq!(request.time, 16.083334);
    assert_eq!(request.lat, -33.5);
    assert_eq!(request.lon, 151.25);
    assert_eq!(request.house_system.code(), 'P');
    assert!(request.display.contains(CelestialBody::MeanSouthNode));
    assert!(!request.display.contains(CelestialBody::TrueNode));
    assert_eq!(request.name, "Ada");
    assert_eq!(request.city, "Sydney");
}

#[test]
fn test_malformed_values_fall_back() {
    let request = ChartRequest::from_query(&query(&[
        ("year", "nineteen"),
        ("month", "13"),
        ("day", "0"),
        ("time", "24"),
        ("lat", "91"),
        ("lon", "NaN"),
        ("hsys", ""),
        ("display", "0,1,x"),
    ]));
    let defaults = ChartRequest::default();

    assert_eq!(request.year, defaults.year);
    assert_eq!(request.month, defaults.month);
    assert_eq!(request.day, defaults.day);
    assert_eq!(request.time, defaults.time);
    assert_eq!(request.lat, defaults.lat);
    assert_eq!(request.lon, defaults.lon);
    assert_eq!(request.house_system, defaults.house_system);
    assert_eq!(request.display, defaults.display);
}

#[test]
fn test_unknown_display_id_falls_back() {
    let request = ChartRequest::from_query(&query(&[("display", "0,99")]));
    assert_eq!(request.display.as_str(), CANONICAL_DISPLAY.as_str());
}

#[test]
fn test_non_graphic_hsys_falls_back() {
    let request = ChartRequest::from_query(&query(&[("hsys", " P")]));
    assert_eq!(request.house_system, HouseSystem::EQUAL);
    let request = ChartRequest::from_query(&query(&[("hsys", "G")]));
    assert_eq!(request.house_system.house_count(), 36);
}
