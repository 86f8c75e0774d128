//! Two-body orbit representations and the conversions between them.
//!
//! A [`CartesianState`] (inertial position and velocity) and a set of
//! [`KeplerianElements`] describe the same instant of an idealized two-body
//! orbit. [`state_to_elements`] and [`elements_to_state`] translate between
//! the two for any central body, given its gravitational parameter.

pub mod anomaly;
pub mod conversion;
pub mod elements;
pub mod sampling;

pub use conversion::{
    elements_to_state, perifocal_to_inertial, state_to_elements, state_to_elements_rv,
};
pub use elements::{CartesianState, KeplerianElements};
pub use sampling::sample_orbit;

use thiserror::Error;

/// Why a state or element set has no classical counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DegenerateReason {
    #[error("position vector has zero magnitude")]
    ZeroPosition,
    #[error("specific orbital energy is zero (parabolic trajectory)")]
    ParabolicEnergy,
    #[error("angular momentum is zero (rectilinear trajectory)")]
    ZeroAngularMomentum,
    #[error("radius is singular at this true anomaly (1 + e·cos θ = 0)")]
    RadiusSingularity,
    #[error("semi-latus rectum a·(1 - e²) is not positive")]
    NonPositiveSemiLatusRectum,
    #[error("gravitational parameter must be finite and positive")]
    InvalidGravitationalParameter,
    #[error("input contains a non-finite component")]
    NonFinite,
    #[error("orbit is not elliptical")]
    NotElliptical,
}

/// The classical element set or Cartesian state is mathematically undefined for the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("degenerate orbit: {reason}")]
pub struct DegenerateOrbitError {
    pub reason: DegenerateReason,
}

impl From<DegenerateReason> for DegenerateOrbitError {
    fn from(reason: DegenerateReason) -> Self {
        Self { reason }
    }
}

pub(crate) fn check_mu(mu_km3_s2: f64) -> Result<(), DegenerateOrbitError> {
    if mu_km3_s2.is_finite() && mu_km3_s2 > 0.0 {
        Ok(())
    } else {
        Err(DegenerateReason::InvalidGravitationalParameter.into())
    }
}
