//! True, eccentric, and mean anomaly relations for elliptical orbits.

use qspace_core::angles::wrap_two_pi;

use crate::elements::KeplerianElements;
use crate::{DegenerateOrbitError, DegenerateReason, check_mu};

const KEPLER_TOLERANCE: f64 = 1e-14;
const KEPLER_MAX_ITERATIONS: usize = 50;

fn check_elliptical(e: f64) -> Result<(), DegenerateOrbitError> {
    if (0.0..1.0).contains(&e) {
        Ok(())
    } else {
        Err(DegenerateReason::NotElliptical.into())
    }
}

/// Eccentric anomaly for a true anomaly, in `[0, 2π)`.
pub fn true_to_eccentric(theta: f64, e: f64) -> Result<f64, DegenerateOrbitError> {
    check_elliptical(e)?;
    let (sin_t, cos_t) = theta.sin_cos();
    let big_e = ((1.0 - e * e).sqrt() * sin_t).atan2(e + cos_t);
    Ok(wrap_two_pi(big_e))
}

/// True anomaly for an eccentric anomaly, in `[0, 2π)`.
pub fn eccentric_to_true(big_e: f64, e: f64) -> Result<f64, DegenerateOrbitError> {
    check_elliptical(e)?;
    let (sin_e, cos_e) = big_e.sin_cos();
    let theta = ((1.0 - e * e).sqrt() * sin_e).atan2(cos_e - e);
    Ok(wrap_two_pi(theta))
}

/// Kepler's equation `M = E - e·sin E`, in `[0, 2π)`.
pub fn eccentric_to_mean(big_e: f64, e: f64) -> Result<f64, DegenerateOrbitError> {
    check_elliptical(e)?;
    Ok(wrap_two_pi(big_e - e * big_e.sin()))
}

/// Solve Kepler's equation for the eccentric anomaly by Newton iteration.
pub fn mean_to_eccentric(mean: f64, e: f64) -> Result<f64, DegenerateOrbitError> {
    check_elliptical(e)?;
    let m = wrap_two_pi(mean);
    let mut big_e = if e < 0.8 { m } else { std::f64::consts::PI };
    for _ in 0..KEPLER_MAX_ITERATIONS {
        let step = (big_e - e * big_e.sin() - m) / (1.0 - e * big_e.cos());
        big_e -= step;
        if step.abs() < KEPLER_TOLERANCE {
            break;
        }
    }
    Ok(wrap_two_pi(big_e))
}

/// Seconds elapsed since the last periapsis passage.
pub fn time_since_periapsis(
    elements: &KeplerianElements,
    mu_km3_s2: f64,
) -> Result<f64, DegenerateOrbitError> {
    check_mu(mu_km3_s2)?;
    let n = elements
        .mean_motion(mu_km3_s2)
        .ok_or(DegenerateOrbitError::from(DegenerateReason::NotElliptical))?;
    let big_e = true_to_eccentric(elements.theta, elements.e)?;
    let mean = eccentric_to_mean(big_e, elements.e)?;
    Ok(mean / n)
}
