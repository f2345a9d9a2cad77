//! Per-bearing load direction and pad configuration.
//!
//! A [`BearingLoadConfig`] is what the user edits; a [`PadLayout`] is what the
//! pressure profile actually evaluates. Resolving the layout is where an
//! impossible pad arrangement turns into a full-circle bearing, so that branch
//! is explicit and testable instead of falling out of unguarded arithmetic.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

/// Load direction and pad arrangement of one bearing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BearingLoadConfig {
    /// Direction of the applied load, in radians.
    pub load_angle: f64,
    /// Number of pads. 0 means a full-circle journal bearing.
    #[serde(default)]
    pub pad_count: u32,
    /// Angular span of each pad, in degrees.
    #[serde(default)]
    pub pad_angle: f64,
}

impl BearingLoadConfig {
    /// A full-circle bearing loaded along `load_angle` (radians).
    pub fn full_circle(load_angle: f64) -> Self {
        Self {
            load_angle,
            pad_count: 0,
            pad_angle: 0.0,
        }
    }

    /// A tilting-pad bearing with `pad_count` pads of `pad_angle` degrees each.
    pub fn tilting_pad(load_angle: f64, pad_count: u32, pad_angle: f64) -> Self {
        Self {
            load_angle,
            pad_count,
            pad_angle,
        }
    }

    /// Resolves the pad arrangement the profile will evaluate.
    pub fn layout(&self) -> PadLayout {
        PadLayout::from_config(self)
    }

    /// True if pads were requested but the arrangement is impossible, so the
    /// bearing is evaluated as a full circle.
    pub fn is_degraded(&self) -> bool {
        self.pad_count > 0 && self.layout() == PadLayout::FullCircle
    }
}

/// Resolved circumferential layout of a bearing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PadLayout {
    /// Continuous journal bearing.
    FullCircle,
    /// `count` equal pads separated by equal gaps. Angles are in radians.
    Pads {
        count: u32,
        pad_angle: f64,
        gap: f64,
        segment: f64,
    },
}

impl PadLayout {
    /// Resolves a layout, falling back to [`PadLayout::FullCircle`] when the pad
    /// count is zero, the pad angle is not in (0°, 360°), or the pads would
    /// occupy the whole circumference.
    pub fn from_config(config: &BearingLoadConfig) -> Self {
        let count = config.pad_count;
        let degrees = config.pad_angle;
        if count == 0 || !degrees.is_finite() || degrees <= 0.0 || degrees >= 360.0 {
            return PadLayout::FullCircle;
        }
        let pad_angle = degrees.to_radians();
        let occupied = count as f64 * pad_angle;
        if occupied >= TAU {
            return PadLayout::FullCircle;
        }
        let gap = (TAU - occupied) / count as f64;
        PadLayout::Pads {
            count,
            pad_angle,
            gap,
            segment: pad_angle + gap,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    const EPSILON: f64 = 1e-12;

    #[test]
    fn zero_pads_is_full_circle() {
        assert_eq!(BearingLoadConfig::full_circle(0.3).layout(), PadLayout::FullCircle);
    }

    #[test]
    fn non_positive_or_full_turn_pad_angle_is_full_circle() {
        for angle in [0.0, -10.0, 360.0, 720.0, f64::NAN, f64::INFINITY] {
            let cfg = BearingLoadConfig::tilting_pad(0.0, 3, angle);
            assert_eq!(cfg.layout(), PadLayout::FullCircle, "pad_angle = {angle}");
        }
    }

    #[test]
    fn oversubscribed_pads_fall_back_to_full_circle() {
        // 4 x 90 degrees fills the circle exactly.
        let exact = BearingLoadConfig::tilting_pad(0.0, 4, 90.0);
        assert_eq!(exact.layout(), PadLayout::FullCircle);
        assert!(exact.is_degraded());

        let over = BearingLoadConfig::tilting_pad(0.0, 5, 80.0);
        assert_eq!(over.layout(), PadLayout::FullCircle);
        assert!(over.is_degraded());
    }

    #[test]
    fn full_circle_config_is_not_degraded() {
        assert!(!BearingLoadConfig::full_circle(0.0).is_degraded());
    }

    #[test]
    fn two_pads_of_ninety_degrees() {
        match BearingLoadConfig::tilting_pad(0.0, 2, 90.0).layout() {
            PadLayout::Pads {
                count,
                pad_angle,
                gap,
                segment,
            } => {
                assert_eq!(count, 2);
                assert!((pad_angle - FRAC_PI_2).abs() < EPSILON);
                assert!((gap - FRAC_PI_2).abs() < EPSILON);
                assert!((segment - PI).abs() < EPSILON);
            }
            other => panic!("expected pads, got {other:?}"),
        }
    }

    #[test]
    fn segments_tile_the_circle() {
        if let PadLayout::Pads { count, segment, .. } =
            BearingLoadConfig::tilting_pad(0.0, 5, 50.0).layout()
        {
            assert!((count as f64 * segment - TAU).abs() < 1e-9);
        } else {
            panic!("expected pads");
        }
    }

    #[test]
    fn config_deserializes_with_missing_pad_fields() {
        let cfg: BearingLoadConfig = serde_json::from_str(r#"{"load_angle": 1.5}"#).unwrap();
        assert_eq!(cfg, BearingLoadConfig::full_circle(1.5));
    }
}
