//! Evenly spaced states along a single orbit, used to draw its track.

use std::f64::consts::TAU;

use crate::conversion::elements_to_state;
use crate::elements::{CartesianState, KeplerianElements};
use crate::{DegenerateOrbitError, DegenerateReason};

/// Fraction of the asymptotic true anomaly covered when sampling hyperbolae.
const ASYMPTOTE_FRACTION: f64 = 0.95;

/// Sample `count` states spaced uniformly in true anomaly.
///
/// Elliptical orbits are covered over one full revolution starting at
/// periapsis. Hyperbolic orbits (`e > 1`, `a < 0`) are covered symmetrically
/// about periapsis, stopping short of the asymptotes.
pub fn sample_orbit(
    elements: &KeplerianElements,
    mu_km3_s2: f64,
    count: usize,
) -> Result<Vec<CartesianState>, DegenerateOrbitError> {
    if count == 0 {
        return Ok(Vec::new());
    }

    let anomalies: Vec<f64> = if elements.e < 1.0 {
        (0..count)
            .map(|k| TAU * k as f64 / count as f64)
            .collect()
    } else if elements.e > 1.0 {
        let limit = (-1.0 / elements.e).acos() * ASYMPTOTE_FRACTION;
        if count == 1 {
            vec![0.0]
        } else {
            (0..count)
                .map(|k| -limit + 2.0 * limit * k as f64 / (count - 1) as f64)
                .collect()
        }
    } else {
        return Err(DegenerateReason::NonPositiveSemiLatusRectum.into());
    };

    anomalies
        .into_iter()
        .map(|theta| elements_to_state(&elements.with_true_anomaly(theta), mu_km3_s2))
        .collect()
}
