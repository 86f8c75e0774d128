//! Units, constants, and vector primitives shared by the qspace crates.

/// Physical and time constants (km, s, days unless stated otherwise).
pub mod constants {
    /// Earth's standard gravitational parameter (km³/s²).
    pub const MU_EARTH_KM3_S2: f64 = 398_600.441_8;
    /// Earth's equatorial radius (km).
    pub const EARTH_RADIUS_KM: f64 = 6_378.137;
    /// Julian Date of the J2000.0 epoch (2000-01-01T12:00:00).
    pub const J2000_JD: f64 = 2_451_545.0;
    /// Offset between Julian Date and Modified Julian Date.
    pub const MJD_OFFSET: f64 = 2_400_000.5;
}

/// Basic unit conversion helpers.
pub mod units {
    /// Convert degrees to radians.
    #[inline]
    pub fn deg_to_rad(v: f64) -> f64 {
        v.to_radians()
    }

    /// Convert radians to degrees.
    #[inline]
    pub fn rad_to_deg(v: f64) -> f64 {
        v.to_degrees()
    }
}

/// Angle helpers that keep inverse trigonometry inside its domain.
pub mod angles {
    use std::f64::consts::TAU;

    /// `acos` with its argument clamped to `[-1, 1]`.
    ///
    /// Dot-product ratios of unit vectors routinely land a few ulps outside
    /// the domain; those are treated as the nearest boundary instead of NaN.
    #[inline]
    pub fn acos_clamped(x: f64) -> f64 {
        x.clamp(-1.0, 1.0).acos()
    }

    /// Reduce an angle to `[0, 2π)`.
    #[inline]
    pub fn wrap_two_pi(angle: f64) -> f64 {
        let wrapped = angle.rem_euclid(TAU);
        // rem_euclid can round a tiny negative input up to exactly TAU
        if wrapped >= TAU { 0.0 } else { wrapped }
    }
}

/// Minimal vector helpers to avoid ad-hoc `[f64; 3]` math everywhere.
pub mod vector {
    /// Alias for a 3D vector in kilometres or km/s depending on context.
    pub type Vector3 = [f64; 3];

    /// Row-major 3×3 matrix.
    pub type Matrix3 = [[f64; 3]; 3];

    /// Reference direction of the inertial frame.
    pub const X_AXIS: Vector3 = [1.0, 0.0, 0.0];
    /// Second in-plane axis of the inertial frame.
    pub const Y_AXIS: Vector3 = [0.0, 1.0, 0.0];
    /// Polar axis of the inertial frame.
    pub const Z_AXIS: Vector3 = [0.0, 0.0, 1.0];

    /// Euclidean norm of a vector.
    #[inline]
    pub fn norm(v: &Vector3) -> f64 {
        dot(v, v).sqrt()
    }

    /// Dot product of two vectors.
    #[inline]
    pub fn dot(a: &Vector3, b: &Vector3) -> f64 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    /// Right-handed cross product `a × b`.
    #[inline]
    pub fn cross(a: &Vector3, b: &Vector3) -> Vector3 {
        [
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]
    }

    /// Vector subtraction.
    #[inline]
    pub fn sub(a: &Vector3, b: &Vector3) -> Vector3 {
        [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
    }

    /// Scale a vector by a scalar.
    #[inline]
    pub fn scale(v: &Vector3, s: f64) -> Vector3 {
        [v[0] * s, v[1] * s, v[2] * s]
    }

    /// Unit vector along `v`, or `None` for the zero vector.
    #[inline]
    pub fn normalize(v: &Vector3) -> Option<Vector3> {
        let n = norm(v);
        if n == 0.0 || !n.is_finite() {
            None
        } else {
            Some(scale(v, 1.0 / n))
        }
    }

    /// Matrix-vector product `m · v`.
    #[inline]
    pub fn mat_vec(m: &Matrix3, v: &Vector3) -> Vector3 {
        [dot(&m[0], v), dot(&m[1], v), dot(&m[2], v)]
    }

    /// True when every component is finite.
    #[inline]
    pub fn is_finite(v: &Vector3) -> bool {
        v.iter().all(|c| c.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::angles::wrap_two_pi;
    use super::vector::normalize;

    #[test]
    fn normalize_rejects_zero_and_non_finite_vectors() {
        assert_eq!(normalize(&[0.0, 0.0, 0.0]), None);
        assert_eq!(normalize(&[f64::INFINITY, 0.0, 0.0]), None);
        assert_eq!(normalize(&[0.0, 0.0, -2.0]), Some([0.0, 0.0, -1.0]));
    }

    #[test]
    fn wrap_stays_below_a_full_turn() {
        assert_eq!(wrap_two_pi(-1e-18), 0.0);
        let wrapped = wrap_two_pi(-std::f64::consts::FRAC_PI_2);
        assert!((wrapped - 1.5 * std::f64::consts::PI).abs() < 1e-12);
    }
}
