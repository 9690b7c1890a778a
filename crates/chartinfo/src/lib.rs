pub mod aspects;
pub mod bodies;
pub mod catalogue;
pub mod chart;
pub mod cluster;
pub mod document;
pub mod ephemeris;
pub mod houses;
pub mod zodiac;

pub use bodies::{DisplayFilter, PlacedBody};
pub use catalogue::{AngularMarkKind, CelestialBody};
pub use chart::{Chart, ChartAssembler, ChartError, ChartRequest};
pub use ephemeris::{EphemerisError, EphemerisProvider, FixedEphemeris, SwissEphemerisAdapter};
pub use houses::HouseSystem;
pub use zodiac::{normalize, place_in_zodiac, ZodiacSign};
