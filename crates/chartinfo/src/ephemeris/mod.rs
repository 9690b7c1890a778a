pub mod adapter;
pub mod fixed;
pub mod types;

pub use adapter::{SwissEphemerisAdapter, DEFAULT_EPHEMERIS_PATH};
pub use fixed::FixedEphemeris;
pub use types::{
    julian_day_to_utc, EphemerisError, EphemerisProvider, GeoLocation, HousePositions, PlanetPosition,
};
