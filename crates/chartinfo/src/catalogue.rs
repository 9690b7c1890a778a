//! Fixed catalogues: celestial bodies, angular marks and house labels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Catalogue of bodies a chart can display.
///
/// The discriminant is the stable wire identifier (`id` attribute, `display`
/// filter). Tags 0..=22 coincide with the Swiss Ephemeris body numbers; the
/// two south nodes are derived from their north node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(i32)]
pub enum CelestialBody {
    Sun = 0,
    Moon = 1,
    Mercury = 2,
    Venus = 3,
    Mars = 4,
    Jupiter = 5,
    Saturn = 6,
    Uranus = 7,
    Neptune = 8,
    Pluto = 9,
    MeanNode = 10,
    TrueNode = 11,
    MeanApogee = 12,
    OscuApogee = 13,
    Earth = 14,
    Chiron = 15,
    Pholus = 16,
    Ceres = 17,
    Pallas = 18,
    Juno = 19,
    Vesta = 20,
    InterpretedApogee = 21,
    InterpretedPerigee = 22,
    MeanSouthNode = 23,
    TrueSouthNode = 24,
}

impl CelestialBody {
    pub const ALL: [CelestialBody; 25] = [
        CelestialBody::Sun,
        CelestialBody::Moon,
        CelestialBody::Mercury,
        CelestialBody::Venus,
        CelestialBody::Mars,
        CelestialBody::Jupiter,
        CelestialBody::Saturn,
        CelestialBody::Uranus,
        CelestialBody::Neptune,
        CelestialBody::Pluto,
        CelestialBody::MeanNode,
        CelestialBody::TrueNode,
        CelestialBody::MeanApogee,
        CelestialBody::OscuApogee,
        CelestialBody::Earth,
        CelestialBody::Chiron,
        CelestialBody::Pholus,
        CelestialBody::Ceres,
        CelestialBody::Pallas,
        CelestialBody::Juno,
        CelestialBody::Vesta,
        CelestialBody::InterpretedApogee,
        CelestialBody::InterpretedPerigee,
        CelestialBody::MeanSouthNode,
        CelestialBody::TrueSouthNode,
    ];

    pub fn id(self) -> i32 {
        self as i32
    }

    pub fn from_id(id: i32) -> Option<CelestialBody> {
        Self::ALL.iter().copied().find(|body| body.id() == id)
    }

    /// Display name, also used as the XML element name.
    pub fn name(self) -> &'static str {
        match self {
            CelestialBody::Sun => "Sun",
            CelestialBody::Moon => "Moon",
            CelestialBody::Mercury => "Mercury",
            CelestialBody::Venus => "Venus",
            CelestialBody::Mars => "Mars",
            CelestialBody::Jupiter => "Jupiter",
            CelestialBody::Saturn => "Saturn",
            CelestialBody::Uranus => "Uranus",
            CelestialBody::Neptune => "Neptune",
            CelestialBody::Pluto => "Pluto",
            CelestialBody::MeanNode => "MeanNode",
            CelestialBody::TrueNode => "TrueNode",
            CelestialBody::MeanApogee => "MeanApogee",
            CelestialBody::OscuApogee => "OscuApogee",
            CelestialBody::Earth => "Earth",
            CelestialBody::Chiron => "Chiron",
            CelestialBody::Pholus => "Pholus",
            CelestialBody::Ceres => "Ceres",
            CelestialBody::Pallas => "Pallas",
            CelestialBody::Juno => "Juno",
            CelestialBody::Vesta => "Vesta",
            CelestialBody::InterpretedApogee => "InterpretedApogee",
            CelestialBody::InterpretedPerigee => "InterpretedPerigee",
            CelestialBody::MeanSouthNode => "MeanSouthNode",
            CelestialBody::TrueSouthNode => "TrueSouthNode",
        }
    }

    /// North node whose antipode gives this body, for the two south nodes.
    pub fn north_node(self) -> Option<CelestialBody> {
        match self {
            CelestialBody::MeanSouthNode => Some(CelestialBody::MeanNode),
            CelestialBody::TrueSouthNode => Some(CelestialBody::TrueNode),
            _ => None,
        }
    }

    /// Bodies shown when the caller does not pass a display filter.
    pub fn is_displayed_by_default(self) -> bool {
        self.north_node().is_none()
    }
}

impl fmt::Display for CelestialBody {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reference points returned by the house computation, in provider order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AngularMarkKind {
    Ascendant,
    Mc,
    Armc,
    Vertex,
    EquatorialAscendant,
    CoAscendant1,
    CoAscendant2,
    PolarAscendant,
}

impl AngularMarkKind {
    pub const ALL: [AngularMarkKind; 8] = [
        AngularMarkKind::Ascendant,
        AngularMarkKind::Mc,
        AngularMarkKind::Armc,
        AngularMarkKind::Vertex,
        AngularMarkKind::EquatorialAscendant,
        AngularMarkKind::CoAscendant1,
        AngularMarkKind::CoAscendant2,
        AngularMarkKind::PolarAscendant,
    ];

    /// 1-based identifier.
    pub fn id(self) -> usize {
        self as usize + 1
    }

    pub fn name(self) -> &'static str {
        match self {
            AngularMarkKind::Ascendant => "Ascendant",
            AngularMarkKind::Mc => "MC",
            AngularMarkKind::Armc => "ARMC",
            AngularMarkKind::Vertex => "Vertex",
            AngularMarkKind::EquatorialAscendant => "EquatorialAscendant",
            AngularMarkKind::CoAscendant1 => "Co-Ascendant1",
            AngularMarkKind::CoAscendant2 => "Co-Ascendant2",
            AngularMarkKind::PolarAscendant => "PolarAscendant",
        }
    }
}

const HOUSE_LABELS: [&str; 37] = [
    "0", "I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X", "XI", "XII", "XIII", "XIV",
    "XV", "XVI", "XVII", "XVIII", "XIX", "XX", "XXI", "XXII", "XXIII", "XXIV", "XXV", "XXVI",
    "XXVII", "XXVIII", "XXIX", "XXX", "XXXI", "XXXII", "XXXIII", "XXXIV", "XXXV", "XXXVI",
];

/// Roman numeral label for a 1-based house number (up to 36 Gauquelin sectors).
pub fn house_label(number: usize) -> Option<&'static str> {
    match number {
        0 => None,
        n => HOUSE_LABELS.get(n).copied(),
    }
}
