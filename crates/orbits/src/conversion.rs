//! Cartesian state ⇄ classical element conversions.
//!
//! Degenerate geometry is handled by convention rather than failure where the
//! element set is still well defined:
//!
//! - circular orbits (`e ≈ 0`) take `omega = 0`, so `theta` becomes the
//!   argument of latitude;
//! - equatorial orbits (node vector ≈ 0) take the frame's X axis as the node
//!   direction, so `raan = 0` and the remaining angles are measured from X.
//!   The usual "below the equator" quadrant test never fires in that plane,
//!   so equatorial orbits pick the quadrant from the sense of rotation
//!   about `h` instead.
//!
//! Inputs with no classical counterpart at all (zero radius, parabolic energy,
//! zero angular momentum) fail with [`DegenerateOrbitError`].

use std::f64::consts::TAU;

use qspace_core::angles::{acos_clamped, wrap_two_pi};
use qspace_core::vector::{
    Matrix3, Vector3, X_AXIS, Y_AXIS, Z_AXIS, cross, dot, mat_vec, norm, normalize, scale, sub,
};
use tracing::trace;

use crate::elements::{CartesianState, KeplerianElements};
use crate::{DegenerateOrbitError, DegenerateReason, check_mu};

/// Eccentricities at or below this are treated as exactly circular.
pub const CIRCULAR_ECCENTRICITY: f64 = 1e-11;

/// Node-vector magnitude, relative to `|h|`, at or below which the orbit is equatorial.
pub const EQUATORIAL_NODE_RATIO: f64 = 1e-11;

/// Convert an inertial position/velocity pair into classical elements.
pub fn state_to_elements(
    state: &CartesianState,
    mu_km3_s2: f64,
) -> Result<KeplerianElements, DegenerateOrbitError> {
    check_mu(mu_km3_s2)?;
    if !state.is_finite() {
        return Err(DegenerateReason::NonFinite.into());
    }
    let r = &state.position_km;
    let v = &state.velocity_km_s;

    let radius = norm(r);
    if radius == 0.0 {
        return Err(DegenerateReason::ZeroPosition.into());
    }

    let energy = 0.5 * dot(v, v) - mu_km3_s2 / radius;
    if energy == 0.0 {
        return Err(DegenerateReason::ParabolicEnergy.into());
    }
    let a = -0.5 * mu_km3_s2 / energy;

    let h = cross(r, v);
    let h_mag = norm(&h);
    if h_mag == 0.0 {
        return Err(DegenerateReason::ZeroAngularMomentum.into());
    }

    let e_vec = sub(&scale(&cross(v, &h), 1.0 / mu_km3_s2), &scale(r, 1.0 / radius));
    let e = norm(&e_vec);

    let i = acos_clamped(dot(&h, &Z_AXIS) / h_mag);

    let node = cross(&Z_AXIS, &h);
    let node_mag = norm(&node);
    let equatorial = node_mag <= EQUATORIAL_NODE_RATIO * h_mag;
    let n = match normalize(&node) {
        Some(unit) if !equatorial => unit,
        _ => {
            trace!(node_mag, h_mag, "equatorial orbit, node taken along X");
            X_AXIS
        }
    };

    let mut raan = acos_clamped(dot(&n, &X_AXIS));
    if dot(&n, &Y_AXIS) < 0.0 {
        raan = TAU - raan;
    }

    let omega = if e <= CIRCULAR_ECCENTRICITY {
        trace!(e, "circular orbit, argument of perigee fixed at zero");
        0.0
    } else {
        let angle = acos_clamped(dot(&n, &e_vec) / e);
        if past_half_turn(&n, &e_vec, &h, equatorial) {
            TAU - angle
        } else {
            angle
        }
    };

    let mut u = acos_clamped(dot(&n, r) / radius);
    if past_half_turn(&n, r, &h, equatorial) {
        u = TAU - u;
    }

    Ok(KeplerianElements {
        a,
        e,
        i,
        raan: wrap_two_pi(raan),
        omega: wrap_two_pi(omega),
        theta: wrap_two_pi(u - omega),
    })
}

/// [`state_to_elements`] for a bare position and velocity.
pub fn state_to_elements_rv(
    position_km: Vector3,
    velocity_km_s: Vector3,
    mu_km3_s2: f64,
) -> Result<KeplerianElements, DegenerateOrbitError> {
    state_to_elements(&CartesianState::new(position_km, velocity_km_s), mu_km3_s2)
}

/// Whether `target`, measured from the node `n` in the direction of motion,
/// lies more than half a turn away.
///
/// For inclined orbits that is the sign of the polar component. In the
/// equatorial plane the polar component vanishes, so the in-plane orientation
/// relative to `h` decides instead. The two agree whenever `0 < i < π`.
fn past_half_turn(n: &Vector3, target: &Vector3, h: &Vector3, equatorial: bool) -> bool {
    if equatorial {
        dot(&cross(n, target), h) < 0.0
    } else {
        target[2] < 0.0
    }
}

/// Rotation taking perifocal coordinates into the inertial frame (3-1-3: RAAN, i, omega).
pub fn perifocal_to_inertial(raan: f64, i: f64, omega: f64) -> Matrix3 {
    let (s_o, c_o) = raan.sin_cos();
    let (s_i, c_i) = i.sin_cos();
    let (s_w, c_w) = omega.sin_cos();

    [
        [
            c_o * c_w - s_o * c_i * s_w,
            -c_o * s_w - s_o * c_i * c_w,
            s_o * s_i,
        ],
        [
            s_o * c_w + c_o * c_i * s_w,
            -s_o * s_w + c_o * c_i * c_w,
            -c_o * s_i,
        ],
        [s_i * s_w, s_i * c_w, c_i],
    ]
}

/// Convert classical elements into an inertial position/velocity pair.
///
/// Fails when the radius formula is singular at `theta` or when
/// `a·(1 - e²) <= 0`, where the closed-form velocity does not apply.
pub fn elements_to_state(
    elements: &KeplerianElements,
    mu_km3_s2: f64,
) -> Result<CartesianState, DegenerateOrbitError> {
    check_mu(mu_km3_s2)?;
    if !elements.is_finite() {
        return Err(DegenerateReason::NonFinite.into());
    }

    let rotation = perifocal_to_inertial(elements.raan, elements.i, elements.omega);
    let (sin_t, cos_t) = elements.theta.sin_cos();

    let p = elements.semi_latus_rectum();
    let denominator = 1.0 + elements.e * cos_t;
    if denominator == 0.0 {
        return Err(DegenerateReason::RadiusSingularity.into());
    }
    if p <= 0.0 {
        return Err(DegenerateReason::NonPositiveSemiLatusRectum.into());
    }

    let radius = p / denominator;
    let position_pf = [radius * cos_t, radius * sin_t, 0.0];

    let speed_scale = (mu_km3_s2 / p).sqrt();
    let velocity_pf = [-speed_scale * sin_t, speed_scale * (elements.e + cos_t), 0.0];

    Ok(CartesianState::new(
        mat_vec(&rotation, &position_pf),
        mat_vec(&rotation, &velocity_pf),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_is_orthonormal() {
        let m = perifocal_to_inertial(1.1, 0.7, 2.3);
        for row in 0..3 {
            for col in 0..3 {
                let column_dot: f64 = (0..3).map(|k| m[k][row] * m[k][col]).sum();
                let expected = if row == col { 1.0 } else { 0.0 };
                assert!((column_dot - expected).abs() < 1e-14);
            }
        }
    }

    #[test]
    fn half_turn_tests_agree_on_inclined_orbits() {
        let h = [0.0, -3.0, 4.0];
        let n = normalize(&cross(&Z_AXIS, &h)).expect("inclined node");
        // in-plane targets: y = 4z/3
        for target in [[1.0, 4.0, 3.0], [2.0, -4.0, -3.0], [-5.0, 0.8, 0.6]] {
            assert_eq!(
                past_half_turn(&n, &target, &h, false),
                past_half_turn(&n, &target, &h, true)
            );
        }
    }
}
