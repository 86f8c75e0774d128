//! State and element value types.

use qspace_core::units::{deg_to_rad, rad_to_deg};
use qspace_core::vector::{self, Vector3};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Position (km) and velocity (km/s) in an inertial frame centred on the body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CartesianState {
    pub position_km: Vector3,
    pub velocity_km_s: Vector3,
}

impl CartesianState {
    pub fn new(position_km: Vector3, velocity_km_s: Vector3) -> Self {
        Self {
            position_km,
            velocity_km_s,
        }
    }

    /// Distance from the central body (km).
    pub fn radius(&self) -> f64 {
        vector::norm(&self.position_km)
    }

    /// Inertial speed (km/s).
    pub fn speed(&self) -> f64 {
        vector::norm(&self.velocity_km_s)
    }

    /// Specific orbital energy `v²/2 - μ/r` (km²/s²).
    pub fn specific_energy(&self, mu_km3_s2: f64) -> f64 {
        0.5 * vector::dot(&self.velocity_km_s, &self.velocity_km_s) - mu_km3_s2 / self.radius()
    }

    /// Specific angular momentum `r × v` (km²/s).
    pub fn angular_momentum(&self) -> Vector3 {
        vector::cross(&self.position_km, &self.velocity_km_s)
    }

    pub(crate) fn is_finite(&self) -> bool {
        vector::is_finite(&self.position_km) && vector::is_finite(&self.velocity_km_s)
    }
}

/// Classical osculating elements. Angles are in radians.
///
/// `a` is positive for elliptical orbits and negative for hyperbolic ones.
/// When recovered from a state, `raan`, `omega` and `theta` lie in `[0, 2π)`
/// and `i` in `[0, π]`. A circular orbit carries `omega = 0`; an equatorial
/// orbit measures its angles from the frame's X axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeplerianElements {
    /// Semi-major axis (km)
    pub a: f64,
    /// Eccentricity
    pub e: f64,
    /// Inclination (rad)
    pub i: f64,
    /// Right ascension of the ascending node (rad)
    pub raan: f64,
    /// Argument of perigee (rad)
    pub omega: f64,
    /// True anomaly (rad)
    pub theta: f64,
}

impl KeplerianElements {
    pub fn new(a: f64, e: f64, i: f64, raan: f64, omega: f64, theta: f64) -> Self {
        Self {
            a,
            e,
            i,
            raan,
            omega,
            theta,
        }
    }

    /// Build elements from angles given in degrees.
    pub fn from_degrees(
        a: f64,
        e: f64,
        i_deg: f64,
        raan_deg: f64,
        omega_deg: f64,
        theta_deg: f64,
    ) -> Self {
        Self::new(
            a,
            e,
            deg_to_rad(i_deg),
            deg_to_rad(raan_deg),
            deg_to_rad(omega_deg),
            deg_to_rad(theta_deg),
        )
    }

    /// Angles `[i, raan, omega, theta]` in degrees.
    pub fn angles_deg(&self) -> [f64; 4] {
        [
            rad_to_deg(self.i),
            rad_to_deg(self.raan),
            rad_to_deg(self.omega),
            rad_to_deg(self.theta),
        ]
    }

    /// Same orbit with a different true anomaly.
    pub fn with_true_anomaly(&self, theta: f64) -> Self {
        Self { theta, ..*self }
    }

    /// `p = a·(1 - e²)` (km).
    pub fn semi_latus_rectum(&self) -> f64 {
        self.a * (1.0 - self.e * self.e)
    }

    pub fn is_elliptical(&self) -> bool {
        self.a > 0.0 && (0.0..1.0).contains(&self.e)
    }

    /// Closest approach distance `a·(1 - e)` (km).
    pub fn periapsis_radius(&self) -> f64 {
        self.a * (1.0 - self.e)
    }

    /// Farthest distance `a·(1 + e)`; `None` unless elliptical.
    pub fn apoapsis_radius(&self) -> Option<f64> {
        self.is_elliptical().then(|| self.a * (1.0 + self.e))
    }

    /// Mean motion `sqrt(μ/a³)` (rad/s); `None` unless elliptical.
    pub fn mean_motion(&self, mu_km3_s2: f64) -> Option<f64> {
        self.is_elliptical()
            .then(|| (mu_km3_s2 / self.a.powi(3)).sqrt())
    }

    /// Orbital period (s); `None` unless elliptical.
    pub fn period(&self, mu_km3_s2: f64) -> Option<f64> {
        self.mean_motion(mu_km3_s2).map(|n| TAU / n)
    }

    pub(crate) fn is_finite(&self) -> bool {
        [self.a, self.e, self.i, self.raan, self.omega, self.theta]
            .iter()
            .all(|v| v.is_finite())
    }
}
