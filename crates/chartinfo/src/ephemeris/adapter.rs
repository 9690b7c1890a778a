use crate::catalogue::CelestialBody;
use crate::ephemeris::types::{
    EphemerisError, EphemerisProvider, GeoLocation, HousePositions, PlanetPosition,
};
use crate::houses::HouseSystem;
use log::{debug, warn};
use std::env;
use std::path::{Path, PathBuf};
use swisseph::swe::{calc_ut, julday};

/// Default install location of the Swiss Ephemeris data files.
pub const DEFAULT_EPHEMERIS_PATH: &str = "/usr/local/share/swisseph";

/// Variable consulted by the Swiss Ephemeris library on first use.
const SE_EPHE_PATH: &str = "SE_EPHE_PATH";

const SEFLG_SWIEPH: i32 = 2;
const SEFLG_MOSEPH: i32 = 4;
const SEFLG_SPEED: i32 = 256;
const GREG_CAL: u32 = 1;

// Gauquelin sectors fill cusps[1..=36]
const CUSP_SLOTS: usize = 37;
const ASCMC_SLOTS: usize = 10;

/// Swiss Ephemeris adapter implementation
pub struct SwissEphemerisAdapter {
    ephemeris_path: Option<PathBuf>,
    /// SEFLG_SWIEPH or SEFLG_MOSEPH
    ephemeris_flag: i32,
}

impl SwissEphemerisAdapter {
    /// Create a new adapter with optional ephemeris path.
    ///
    /// An explicit path must exist. Without one, `SWISS_EPHEMERIS_PATH` and
    /// then [`DEFAULT_EPHEMERIS_PATH`] are tried; if neither exists the
    /// library falls back to its built-in Moshier model.
    ///
    /// The path is process-global, so construct the adapter before any worker
    /// threads start computing.
    pub fn new(ephemeris_path: Option<PathBuf>) -> Result<Self, EphemerisError> {
        let path = match ephemeris_path {
            Some(path) => {
                if !path.exists() {
                    return Err(EphemerisError::FileNotFound {
                        path: path.display().to_string(),
                        message: "Ephemeris path does not exist. Please ensure Swiss Ephemeris data files are installed.".to_string(),
                    });
                }
                Some(path)
            }
            None => {
                let candidate = env::var("SWISS_EPHEMERIS_PATH")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from(DEFAULT_EPHEMERIS_PATH));
                if candidate.exists() {
                    Some(candidate)
                } else {
                    warn!(
                        "No ephemeris data at {}; using the library's fallback model",
                        candidate.display()
                    );
                    None
                }
            }
        };

        if let Some(path) = &path {
            debug!("Using ephemeris data from {}", path.display());
            env::set_var(SE_EPHE_PATH, path);
        }

        Ok(Self {
            ephemeris_path: path,
            ephemeris_flag: SEFLG_SWIEPH,
        })
    }

    /// Adapter on the library's built-in Moshier model. Needs no data files
    /// and gives the same positions on every machine.
    pub fn moshier() -> Self {
        Self {
            ephemeris_path: None,
            ephemeris_flag: SEFLG_MOSEPH,
        }
    }

    pub fn is_moshier(&self) -> bool {
        self.ephemeris_flag == SEFLG_MOSEPH
    }

    pub fn ephemeris_path(&self) -> Option<&Path> {
        self.ephemeris_path.as_deref()
    }

    /// Swiss body number, `None` for bodies derived from another one.
    fn swiss_code(body: CelestialBody) -> Option<i32> {
        match body.north_node() {
            Some(_) => None,
            None => Some(body.id()),
        }
    }
}

impl EphemerisProvider for SwissEphemerisAdapter {
    fn julian_day(&self, year: i32, month: u32, day: u32, hour: f64) -> f64 {
        julday(year, month as i32, day as i32, hour, GREG_CAL)
    }

    fn calc_houses(
        &mut self,
        julian_day: f64,
        location: &GeoLocation,
        system: HouseSystem,
    ) -> Result<HousePositions, EphemerisError> {
        let mut cusps = [0.0_f64; CUSP_SLOTS];
        let mut ascmc = [0.0_f64; ASCMC_SLOTS];
        let code = unsafe {
            libswisseph_sys::swe_houses_ex(
                julian_day,
                self.ephemeris_flag & SEFLG_MOSEPH,
                location.lat,
                location.lon,
                system.code() as i32,
                cusps.as_mut_ptr(),
                ascmc.as_mut_ptr(),
            )
        };
        if code < 0 {
            return Err(EphemerisError::HouseCalculationFailed {
                system,
                message: format!("swe_houses_ex returned {code} at JD {julian_day}"),
            });
        }

        // cusps[0] is unused by the library
        let cusps: Vec<f64> = cusps[1..=system.house_count()].to_vec();
        let angles: Vec<f64> = ascmc.to_vec();

        if cusps.iter().chain(angles.iter()).any(|value| !value.is_finite()) {
            return Err(EphemerisError::HouseCalculationFailed {
                system,
                message: format!("non-finite value at JD {julian_day}"),
            });
        }

        Ok(HousePositions { system, cusps, angles })
    }

    fn calc_body(&mut self, julian_day: f64, body: CelestialBody) -> Result<PlanetPosition, EphemerisError> {
        let code = Self::swiss_code(body).ok_or_else(|| {
            EphemerisError::calculation_failed(body, julian_day, "derived body, query its north node")
        })?;
        let result = calc_ut(julian_day, code as u32, (self.ephemeris_flag | SEFLG_SPEED) as u32).map_err(|e| {
            EphemerisError::calculation_failed(body, julian_day, format!("Swiss Ephemeris error: {}", e))
        })?;

        let out = result.out;
        Ok(PlanetPosition::new(out[0], out[1], out[3]))
    }
}
