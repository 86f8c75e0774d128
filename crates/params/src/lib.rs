//! Value models for the draggable numeric fields used to edit an orbit.
//!
//! A [`Parameter`] owns one bounded number: cyclical parameters wrap around
//! their range, the rest clamp to whichever bounds are present. Every update
//! is rounded to the displayed precision, so the stored value is always the
//! one the user sees. [`ElementPanel`] groups the six classical elements
//! (angles in degrees) and turns them into orbit states for rendering.

use qspace_core::units::rad_to_deg;
use qspace_orbits::{
    CartesianState, DegenerateOrbitError, KeplerianElements, elements_to_state, sample_orbit,
};

/// Wheel delta reported for one notch.
const WHEEL_NOTCH: f64 = 120.0;

/// One editable numeric value with its range and step.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub label: String,
    pub units: String,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub cyclical: bool,
    /// Change per pixel of drag and per wheel notch.
    pub increment: f64,
    /// Decimal places kept.
    pub precision: u32,
    value: f64,
}

impl Parameter {
    pub fn new(
        label: &str,
        value: f64,
        units: &str,
        min: Option<f64>,
        max: Option<f64>,
        cyclical: bool,
        increment: f64,
    ) -> Self {
        let mut parameter = Self {
            label: label.to_string(),
            units: units.to_string(),
            min,
            max,
            cyclical,
            increment,
            precision: 2,
            value: 0.0,
        };
        parameter.set(value);
        parameter
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Store `value` after wrapping or clamping it into range; returns the stored value.
    pub fn set(&mut self, value: f64) -> f64 {
        let bounded = match (self.cyclical, self.min, self.max) {
            (true, Some(min), Some(max)) if max > min => (value - min).rem_euclid(max - min) + min,
            _ => {
                let mut v = value;
                if let Some(max) = self.max {
                    if v > max {
                        v = max;
                    }
                }
                if let Some(min) = self.min {
                    if v < min {
                        v = min;
                    }
                }
                v
            }
        };
        self.value = round_to(bounded, self.precision);
        self.value
    }

    /// Apply a horizontal drag of `dx` pixels.
    pub fn drag(&mut self, dx: f64) -> f64 {
        self.set(self.value + self.increment * dx)
    }

    /// Apply a wheel movement; one notch is a delta of 120.
    pub fn wheel(&mut self, delta: f64) -> f64 {
        self.set(self.value + self.increment * delta / WHEEL_NOTCH)
    }

    /// Value formatted at the parameter's precision, e.g. `"a: 7000.00 km"`.
    pub fn display(&self) -> String {
        let text = format!("{}: {:.*}", self.label, self.precision as usize, self.value);
        if self.units.is_empty() {
            text
        } else {
            format!("{text} {}", self.units)
        }
    }
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// The six element fields of the orbit editor. Angles are in degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementPanel {
    pub a: Parameter,
    pub e: Parameter,
    pub i: Parameter,
    pub raan: Parameter,
    pub omega: Parameter,
    pub theta: Parameter,
}

impl Default for ElementPanel {
    fn default() -> Self {
        Self {
            a: Parameter::new("a", 7000.0, "km", Some(0.0), None, false, 500.0),
            e: Parameter::new("e", 0.0, "", Some(0.0), Some(0.95), false, 0.01),
            i: Parameter::new("i", 45.0, "°", Some(-90.0), Some(90.0), false, 0.5),
            raan: Parameter::new("Ω", 0.0, "°", Some(0.0), Some(360.0), true, 0.5),
            omega: Parameter::new("ω", 0.0, "°", Some(-180.0), Some(180.0), true, 0.5),
            theta: Parameter::new("ν", 0.0, "°", Some(0.0), Some(360.0), true, 0.5),
        }
    }
}

impl ElementPanel {
    pub fn parameters(&self) -> [&Parameter; 6] {
        [
            &self.a,
            &self.e,
            &self.i,
            &self.raan,
            &self.omega,
            &self.theta,
        ]
    }

    /// Current values as elements, degrees converted to radians.
    pub fn elements(&self) -> KeplerianElements {
        KeplerianElements::from_degrees(
            self.a.value(),
            self.e.value(),
            self.i.value(),
            self.raan.value(),
            self.omega.value(),
            self.theta.value(),
        )
    }

    /// Load an element set into the fields (subject to each field's range and precision).
    pub fn set_elements(&mut self, elements: &KeplerianElements) {
        self.a.set(elements.a);
        self.e.set(elements.e);
        self.i.set(rad_to_deg(elements.i));
        self.raan.set(rad_to_deg(elements.raan));
        self.omega.set(rad_to_deg(elements.omega));
        self.theta.set(rad_to_deg(elements.theta));
    }

    /// Cartesian state at the current true anomaly.
    pub fn state(&self, mu_km3_s2: f64) -> Result<CartesianState, DegenerateOrbitError> {
        elements_to_state(&self.elements(), mu_km3_s2)
    }

    /// Points along the whole orbit for drawing its track.
    pub fn orbit_track(
        &self,
        mu_km3_s2: f64,
        count: usize,
    ) -> Result<Vec<CartesianState>, DegenerateOrbitError> {
        sample_orbit(&self.elements(), mu_km3_s2, count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_keeps_two_decimals() {
        assert_eq!(round_to(1.23456, 2), 1.23);
        assert_eq!(round_to(-0.005001, 2), -0.01);
    }
}
