//! House cusps and angular marks, labelled and placed in the zodiac.

use crate::catalogue::{house_label, AngularMarkKind};
use crate::zodiac::{normalize, place_in_zodiac, ZodiacSign};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Single-character house system code, handed to the provider verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HouseSystem(char);

impl HouseSystem {
    pub const EQUAL: HouseSystem = HouseSystem('E');
    pub const GAUQUELIN: HouseSystem = HouseSystem('G');

    pub fn new(code: char) -> Self {
        Self(code)
    }

    pub fn code(self) -> char {
        self.0
    }

    /// 36 Gauquelin sectors for `G`, 12 houses otherwise.
    pub fn house_count(self) -> usize {
        if self == Self::GAUQUELIN {
            36
        } else {
            12
        }
    }
}

impl Default for HouseSystem {
    fn default() -> Self {
        Self::EQUAL
    }
}

impl fmt::Display for HouseSystem {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct House {
    /// 1-based house number
    pub number: usize,
    pub label: &'static str,
    pub sign: ZodiacSign,
    /// Degree within the sign
    pub degree: f64,
    /// Absolute degree, [0, 360)
    pub degree_ut: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AngularMark {
    pub kind: AngularMarkKind,
    pub sign: ZodiacSign,
    pub degree: f64,
    pub degree_ut: f64,
}

impl AngularMark {
    pub fn id(&self) -> usize {
        self.kind.id()
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }
}

/// Label the first `system.house_count()` cusps.
pub fn label_houses(cusps: &[f64], system: HouseSystem) -> Vec<House> {
    let expected = system.house_count();
    if cusps.len() < expected {
        warn!(
            "House system {} returned {} cusps, expected {}",
            system,
            cusps.len(),
            expected
        );
    }

    cusps
        .iter()
        .take(expected)
        .enumerate()
        .filter_map(|(index, &cusp)| {
            let number = index + 1;
            let label = house_label(number)?;
            let degree_ut = normalize(cusp);
            let placement = place_in_zodiac(degree_ut);
            Some(House {
                number,
                label,
                sign: placement.sign,
                degree: placement.degree,
                degree_ut,
            })
        })
        .collect()
}

/// The first eight provider angles, in mark order.
pub fn label_angular_marks(angles: &[f64]) -> Vec<AngularMark> {
    AngularMarkKind::ALL
        .iter()
        .zip(angles)
        .map(|(&kind, &angle)| {
            let degree_ut = normalize(angle);
            let placement = place_in_zodiac(degree_ut);
            AngularMark {
                kind,
                sign: placement.sign,
                degree: placement.degree,
                degree_ut,
            }
        })
        .collect()
}
