use crate::catalogue::CelestialBody;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AspectKind {
    Opposition,
    Quincunx,
    Trine,
    Square,
    Sextile,
    SemiSextile,
    Conjunction,
}

impl AspectKind {
    /// Display label, also used as the XML element name.
    pub fn label(self) -> &'static str {
        match self {
            AspectKind::Opposition => "Opposition",
            AspectKind::Quincunx => "Quincunx",
            AspectKind::Trine => "Trine",
            AspectKind::Square => "Square",
            AspectKind::Sextile => "Sextile",
            AspectKind::SemiSextile => "Semi-sextile",
            AspectKind::Conjunction => "Conjunction",
        }
    }
}

impl fmt::Display for AspectKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Target separation and tolerance of one aspect kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectDefinition {
    pub kind: AspectKind,
    /// Target separation in degrees
    pub angle: f64,
    /// Allowed deviation, exclusive
    pub orb: f64,
}

/// Aspect definitions in detection order.
pub const ASPECT_DEFINITIONS: [AspectDefinition; 7] = [
    AspectDefinition { kind: AspectKind::Opposition, angle: 180.0, orb: 10.0 },
    AspectDefinition { kind: AspectKind::Quincunx, angle: 150.0, orb: 2.0 },
    AspectDefinition { kind: AspectKind::Trine, angle: 120.0, orb: 8.0 },
    AspectDefinition { kind: AspectKind::Square, angle: 90.0, orb: 6.0 },
    AspectDefinition { kind: AspectKind::Sextile, angle: 60.0, orb: 4.0 },
    AspectDefinition { kind: AspectKind::SemiSextile, angle: 30.0, orb: 1.0 },
    AspectDefinition { kind: AspectKind::Conjunction, angle: 0.0, orb: 10.0 },
];

/// A detected aspect between two bodies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aspect {
    pub kind: AspectKind,
    pub body1: CelestialBody,
    pub body2: CelestialBody,
    /// Ascendant-relative degree of `body1`
    pub degree1: f64,
    /// Ascendant-relative degree of `body2`
    pub degree2: f64,
}
