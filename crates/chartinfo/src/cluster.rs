//! Stacking indices for bodies that would overlap on a rendered wheel.

use crate::bodies::PlacedBody;

/// Bodies closer than this share a stack.
pub const CLUSTER_SPREAD: f64 = 5.0;

/// Sort `bodies` by absolute degree and number each run of neighbours.
///
/// The relative degree is not normalized: bodies at opposite ends of the
/// zodiac never share a stack.
pub fn assign_clusters(bodies: &mut [PlacedBody], ascendant: f64) {
    bodies.sort_by(|a, b| a.degree_ut.total_cmp(&b.degree_ut));

    let mut previous = -1000.0;
    let mut cluster = 0;
    for body in bodies.iter_mut() {
        let relative = body.degree_ut - ascendant + 180.0;
        cluster = if (previous - relative).abs() < CLUSTER_SPREAD {
            cluster + 1
        } else {
            0
        };
        body.cluster = cluster;
        previous = relative;
    }
}
