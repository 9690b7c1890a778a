use chartinfo::aspects::{AspectCalculator, AspectKind, ASPECT_DEFINITIONS};
use chartinfo::{CelestialBody, PlacedBody};

fn placed(body: CelestialBody, lon: f64) -> PlacedBody {
    PlacedBody::new(body, lon, false)
}

#[test]
fn test_definitions_order_and_orbs() {
    let summary: Vec<_> = ASPECT_DEFINITIONS
        .iter()
        .map(|d| (d.kind.label(), d.angle, d.orb))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("Opposition", 180.0, 10.0),
            ("Quincunx", 150.0, 2.0),
            ("Trine", 120.0, 8.0),
            ("Square", 90.0, 6.0),
            ("Sextile", 60.0, 4.0),
            ("Semi-sextile", 30.0, 1.0),
            ("Conjunction", 0.0, 10.0),
        ]
    );
}

#[test]
fn test_calculate_trine_across_zero() {
    let calculator = AspectCalculator::new();
    // Ascendant at 0: relative degrees are 185 and 305
    let a = placed(CelestialBody::Mars, 5.0);
    let b = placed(CelestialBody::Jupiter, 125.0);
    let trine = &ASPECT_DEFINITIONS[2];

    let aspect = calculator.detect_aspect(&b, &a, 0.0, trine).unwrap();
    assert_eq!(aspect.kind, AspectKind::Trine);
    assert_eq!(aspect.body1, CelestialBody::Jupiter);
    assert_eq!(aspect.degree1, 305.0);
    assert_eq!(aspect.degree2, 185.0);
    assert!(calculator.detect_aspect(&a, &b, 0.0, trine).is_none());
}

#[test]
fn test_compute_aspects_at_most_once_per_pair_and_kind() {
    let calculator = AspectCalculator::new();
    let bodies: Vec<_> = [0.0, 3.0, 61.0, 90.0, 179.0, 181.0, 240.0, 300.0, 330.0]
        .iter()
        .zip(CelestialBody::ALL)
        .map(|(&lon, body)| placed(body, lon))
        .collect();

    let aspects = calculator.compute_aspects(&bodies, 17.0);
    assert!(!aspects.is_empty());
    for (i, a) in aspects.iter().enumerate() {
        assert_ne!(a.body1, a.body2);
        assert!(a.degree1 > a.degree2);
        for b in &aspects[i + 1..] {
            let same_pair = (a.body1, a.body2) == (b.body1, b.body2) || (a.body1, a.body2) == (b.body2, b.body1);
            assert!(!(same_pair && a.kind == b.kind), "duplicate {:?}", a);
        }
    }
}

#[test]
fn test_no_aspects_for_single_body() {
    let calculator = AspectCalculator::new();
    let bodies = vec![placed(CelestialBody::Sun, 42.0)];
    assert!(calculator.compute_aspects(&bodies, 0.0).is_empty());
    assert!(calculator.compute_aspects(&[], 0.0).is_empty());
}
