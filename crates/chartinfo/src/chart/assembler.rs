use crate::aspects::{Aspect, AspectCalculator};
use crate::bodies::{place_bodies, PlacedBody};
use crate::chart::request::ChartRequest;
use crate::cluster::assign_clusters;
use crate::ephemeris::{EphemerisError, EphemerisProvider};
use crate::houses::{label_angular_marks, label_houses, AngularMark, House};
use log::debug;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),
    #[error("House computation returned no ascendant")]
    MissingAscendant,
}

/// A computed chart. Bodies are in cluster (absolute degree) order.
#[derive(Debug, Clone, Serialize)]
pub struct Chart {
    pub request: ChartRequest,
    pub julian_day: f64,
    pub houses: Vec<House>,
    pub marks: Vec<AngularMark>,
    pub bodies: Vec<PlacedBody>,
    pub aspects: Vec<Aspect>,
}

impl Chart {
    pub fn ascendant(&self) -> Option<&AngularMark> {
        self.marks.first()
    }
}

/// Runs the chart pipeline against an ephemeris provider.
#[derive(Default)]
pub struct ChartAssembler {
    calculator: AspectCalculator,
}

impl ChartAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_calculator(calculator: AspectCalculator) -> Self {
        Self { calculator }
    }

    pub fn assemble<P: EphemerisProvider + ?Sized>(
        &self,
        provider: &mut P,
        request: &ChartRequest,
    ) -> Result<Chart, ChartError> {
        let julian_day = provider.julian_day(request.year, request.month, request.day, request.time);
        debug!(
            "Assembling chart for {}-{:02}-{:02} {}h (JD {})",
            request.year, request.month, request.day, request.time, julian_day
        );

        let positions = provider.calc_houses(julian_day, &request.location(), request.house_system)?;
        let houses = label_houses(&positions.cusps, request.house_system);
        let marks = label_angular_marks(&positions.angles);

        let mut bodies = place_bodies(provider, julian_day, &request.display)?;

        let ascendant = marks.first().ok_or(ChartError::MissingAscendant)?.degree_ut;

        // Aspects follow placement order; clustering re-sorts
        let aspects = self.calculator.compute_aspects(&bodies, ascendant);
        assign_clusters(&mut bodies, ascendant);

        Ok(Chart {
            request: request.clone(),
            julian_day,
            houses,
            marks,
            bodies,
            aspects,
        })
    }
}
