use crate::aspects::types::{Aspect, AspectDefinition, ASPECT_DEFINITIONS};
use crate::bodies::PlacedBody;
use crate::zodiac::normalize;
use log::debug;

/// Degree measured from the point opposite the ascendant, in [0, 360).
pub fn relative_degree(degree_ut: f64, ascendant: f64) -> f64 {
    normalize(degree_ut - ascendant + 180.0)
}

/// Aspect calculator
pub struct AspectCalculator {
    definitions: Vec<AspectDefinition>,
}

impl AspectCalculator {
    /// Create a calculator using the standard definitions
    pub fn new() -> Self {
        Self::with_definitions(ASPECT_DEFINITIONS.to_vec())
    }

    pub fn with_definitions(definitions: Vec<AspectDefinition>) -> Self {
        Self { definitions }
    }

    /// Test one ordered pair against one definition.
    ///
    /// The separation is probed in six windows so that pairs straddling
    /// 0/360 match whichever way round they sit. Only the ordering where the
    /// first body has the strictly larger relative degree emits, which keeps a
    /// single aspect per unordered pair.
    pub fn detect_aspect(
        &self,
        a: &PlacedBody,
        b: &PlacedBody,
        ascendant: f64,
        definition: &AspectDefinition,
    ) -> Option<Aspect> {
        let degree1 = relative_degree(a.degree_ut, ascendant);
        let degree2 = relative_degree(b.degree_ut, ascendant);
        let target = definition.angle;
        let orb = definition.orb;

        let windows = [
            degree2 + target,
            degree2 - target,
            degree2 + 360.0 + target,
            degree2 - 360.0 + target,
            degree2 + 360.0 - target,
            degree2 - 360.0 - target,
        ];
        let matched = windows
            .iter()
            .any(|&window| window - orb < degree1 && degree1 < window + orb);

        if matched && degree1 > degree2 {
            Some(Aspect {
                kind: definition.kind,
                body1: a.body,
                body2: b.body,
                degree1,
                degree2,
            })
        } else {
            None
        }
    }

    /// All aspects over every ordered pair, in body then definition order.
    pub fn compute_aspects(&self, bodies: &[PlacedBody], ascendant: f64) -> Vec<Aspect> {
        let mut aspects = Vec::new();
        for a in bodies {
            for b in bodies {
                for definition in &self.definitions {
                    if let Some(aspect) = self.detect_aspect(a, b, ascendant, definition) {
                        aspects.push(aspect);
                    }
                }
            }
        }
        debug!("Found {} aspects among {} bodies", aspects.len(), bodies.len());
        aspects
    }
}

impl Default for AspectCalculator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aspects::AspectKind;
    use crate::catalogue::CelestialBody;
    use crate::zodiac::ZodiacSign;

    /// Body at a raw, possibly unnormalized degree.
    fn body_at(body: CelestialBody, degree_ut: f64) -> PlacedBody {
        PlacedBody {
            body,
            sign: ZodiacSign::Aries,
            degree: 0.0,
            degree_ut,
            retrograde: false,
            cluster: 0,
        }
    }

    fn opposition(a: f64, b: f64, ascendant: f64) -> Option<(f64, f64)> {
        let calculator = AspectCalculator::new();
        calculator
            .detect_aspect(
                &body_at(CelestialBody::Sun, a),
                &body_at(CelestialBody::Moon, b),
                ascendant,
                &ASPECT_DEFINITIONS[0],
            )
            .map(|aspect| (aspect.degree1, aspect.degree2))
    }

    #[test]
    fn test_opposition_one_direction_only() {
        assert_eq!(opposition(0.0, 180.0, 0.0), Some((180.0, 0.0)));
        assert_eq!(opposition(180.0, 0.0, 0.0), None);
    }

    #[test]
    fn test_opposition_within_orb() {
        assert_eq!(opposition(0.0, 189.0, 0.0), Some((180.0, 9.0)));
        assert_eq!(opposition(-15.0, 180.0, 0.0), None);
    }

    #[test]
    fn test_opposition_unnormalized_inputs() {
        assert_eq!(opposition(365.0, 185.0, 0.0), Some((185.0, 5.0)));
        assert_eq!(opposition(130.0, -50.0, 50.0), Some((260.0, 80.0)));
        assert_eq!(opposition(175.0, -5.0, 0.0), Some((355.0, 175.0)));
        assert_eq!(opposition(260.0, 80.0, -100.0), Some((180.0, 0.0)));
    }

    #[test]
    fn test_orb_bounds_are_exclusive() {
        // Quincunx orb is 2: exactly 152 apart does not match
        let calculator = AspectCalculator::new();
        let quincunx = &ASPECT_DEFINITIONS[1];
        assert_eq!(quincunx.kind, AspectKind::Quincunx);
        let a = body_at(CelestialBody::Sun, 152.0);
        let b = body_at(CelestialBody::Moon, 0.0);
        assert!(calculator.detect_aspect(&a, &b, 0.0, quincunx).is_none());
        let a = body_at(CelestialBody::Sun, 151.5);
        assert!(calculator.detect_aspect(&a, &b, 0.0, quincunx).is_some());
    }

    #[test]
    fn test_compute_aspects_one_per_pair_and_kind() {
        let calculator = AspectCalculator::new();
        let bodies = vec![
            body_at(CelestialBody::Sun, 10.0),
            body_at(CelestialBody::Moon, 190.0),
            body_at(CelestialBody::Venus, 12.0),
        ];
        let aspects = calculator.compute_aspects(&bodies, 0.0);
        let summary: Vec<_> = aspects
            .iter()
            .map(|a| (a.kind, a.body1, a.body2))
            .collect();
        assert_eq!(
            summary,
            vec![
                (AspectKind::Opposition, CelestialBody::Sun, CelestialBody::Moon),
                (AspectKind::Conjunction, CelestialBody::Venus, CelestialBody::Sun),
                (AspectKind::Opposition, CelestialBody::Venus, CelestialBody::Moon),
            ]
        );
    }
}
