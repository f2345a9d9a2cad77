//! Circumferential pressure profile.
//!
//! Full-circle bearings use a half-Sommerfeld shape: positive only over the
//! half of the clearance opposite the load, peaking at `load_angle + π`.
//! Tilting-pad bearings get a sine bump on each pad, weighted by how directly
//! that pad's center faces away from the load. Gaps carry no pressure.

use std::f64::consts::{PI, TAU};

use crate::load::{BearingLoadConfig, PadLayout};

/// Normalized pressure magnitude in [0, 1] at angle `theta` (radians).
///
/// Pure: the same `(theta, config)` always gives the same result.
pub fn pressure_magnitude(theta: f64, config: &BearingLoadConfig) -> f64 {
    config.layout().magnitude(theta, config.load_angle)
}

/// Half-Sommerfeld load factor for a point (or pad center) at `angle`.
fn sommerfeld(angle: f64, load_angle: f64) -> f64 {
    (-(angle - load_angle).cos()).max(0.0)
}

impl PadLayout {
    /// Pressure magnitude for an already-resolved layout.
    ///
    /// The evaluator resolves the layout once per bearing and calls this per
    /// vertex.
    pub fn magnitude(&self, theta: f64, load_angle: f64) -> f64 {
        match *self {
            PadLayout::FullCircle => sommerfeld(theta, load_angle),
            PadLayout::Pads {
                count,
                pad_angle,
                segment,
                ..
            } => {
                let theta = theta.rem_euclid(TAU);
                // Rounding just below 2π can produce `count`; that point lies in
                // the last gap either way.
                let index = ((theta / segment).floor() as u32).min(count - 1);
                let offset = theta - index as f64 * segment;
                if offset >= pad_angle {
                    return 0.0;
                }
                let profile = (PI * offset / pad_angle).sin();
                let center = index as f64 * segment + pad_angle / 2.0;
                profile * sommerfeld(center, load_angle)
            }
        }
    }
}
