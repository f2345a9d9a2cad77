//! Per-vertex field evaluation for one bearing.
//!
//! One pass over the original vertex samples produces pressure, film
//! thickness and temperature for every vertex together with the bearing's
//! extrema. The model is a closed-form approximation tuned for real-time
//! display, not a Reynolds-equation solve.

use crate::field::{BearingStats, FieldSample, FieldValues};
use crate::geometry::BearingGeometry;
use crate::load::BearingLoadConfig;

/// Speed at which visual effects saturate.
pub const DESIGN_RPM: f64 = 4000.0;

const SHIMMER_RATE: f64 = 8.0;
const SHIMMER_PHASE_STEP: f64 = 0.5;
const SHIMMER_AMPLITUDE: f64 = 0.08;

/// Nonlinear speed ramp `clamp(rpm / 4000, 0, 1)^1.5`.
pub fn speed_factor(rpm: f64) -> f64 {
    (rpm / DESIGN_RPM).clamp(0.0, 1.0).powf(1.5)
}

/// Deterministic temporal oscillation, phase-staggered by vertex index.
pub fn shimmer(index: usize, elapsed: f64, speed_factor: f64) -> f64 {
    let phase = elapsed * SHIMMER_RATE + index as f64 * SHIMMER_PHASE_STEP;
    1.0 + phase.sin() * SHIMMER_AMPLITUDE * (1.0 + speed_factor)
}

/// Derives the three fields from a normalized base pressure.
///
/// High pressure means a thin, hot film.
pub fn field_sample(base_pressure: f64, speed_factor: f64, shimmer: f64) -> FieldSample {
    FieldSample {
        pressure: base_pressure * (2.0 + speed_factor * 15.0) * shimmer,
        thickness: (5.0 + (1.0 - base_pressure) * 50.0) + speed_factor * 60.0 * shimmer,
        temperature: 40.0 + base_pressure * 40.0 + speed_factor * 75.0 * shimmer,
    }
}

/// Fields and extrema of one bearing for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BearingField {
    pub values: FieldValues,
    pub stats: BearingStats,
}

/// Evaluates all three fields for one bearing into fresh buffers.
pub fn evaluate(
    geometry: &BearingGeometry,
    load: &BearingLoadConfig,
    rpm: f64,
    elapsed: f64,
) -> BearingField {
    evaluate_into(
        geometry,
        load,
        rpm,
        elapsed,
        FieldValues::with_capacity(geometry.len()),
    )
}

/// Evaluates all three fields for one bearing, reusing `buffers`.
///
/// Whatever `buffers` held before is discarded. The geometry is only read.
/// A bearing with no vertices yields all-zero stats.
pub fn evaluate_into(
    geometry: &BearingGeometry,
    load: &BearingLoadConfig,
    rpm: f64,
    elapsed: f64,
    mut buffers: FieldValues,
) -> BearingField {
    buffers.clear();
    let sf = speed_factor(rpm);
    let layout = load.layout();
    let mut stats: Option<BearingStats> = None;

    for (i, point) in geometry.points().iter().enumerate() {
        let base = layout.magnitude(point.theta, load.load_angle)
            * geometry.axial_falloff(point.axial);
        let sample = field_sample(base, sf, shimmer(i, elapsed, sf));
        match stats.as_mut() {
            Some(s) => s.include(sample),
            None => stats = Some(BearingStats::from_sample(sample)),
        }
        buffers.push(sample);
    }

    BearingField {
        values: buffers,
        stats: stats.unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldType;
    use glam::DVec3;
    use std::f64::consts::PI;

    /// Two vertices at mid-width: one at theta = 0, one at theta = π.
    fn probe_geometry() -> BearingGeometry {
        BearingGeometry::from_positions(
            1.0,
            1.0,
            vec![DVec3::new(1.0, 0.0, 0.0), DVec3::new(-1.0, 0.0, 0.0)],
        )
        .unwrap()
    }

    // -- Speed factor and shimmer --

    #[test]
    fn speed_factor_ramp() {
        assert_eq!(speed_factor(0.0), 0.0);
        assert_eq!(speed_factor(-500.0), 0.0);
        assert!((speed_factor(4000.0) - 1.0).abs() < 1e-12);
        assert!((speed_factor(9000.0) - 1.0).abs() < 1e-12);
        assert!((speed_factor(1000.0) - 0.125).abs() < 1e-12);
    }

    #[test]
    fn shimmer_is_reproducible_and_bounded() {
        for i in 0..50 {
            let a = shimmer(i, 1.234, 0.5);
            let b = shimmer(i, 1.234, 0.5);
            assert_eq!(a.to_bits(), b.to_bits());
            assert!((a - 1.0).abs() <= 0.08 * 1.5 + 1e-12);
        }
        assert_eq!(shimmer(0, 0.0, 1.0), 1.0);
    }

    #[test]
    fn shimmer_is_staggered_across_vertices() {
        assert_ne!(shimmer(0, 0.3, 0.0), shimmer(1, 0.3, 0.0));
    }

    // -- Field relations --

    #[test]
    fn base_pressure_drives_fields_monotonically() {
        for &(sf, sh) in &[(0.0, 1.0), (0.4, 0.95), (1.0, 1.12)] {
            let mut prev = field_sample(0.0, sf, sh);
            for step in 1..=20 {
                let next = field_sample(step as f64 / 20.0, sf, sh);
                assert!(next.pressure > prev.pressure);
                assert!(next.thickness < prev.thickness);
                assert!(next.temperature > prev.temperature);
                prev = next;
            }
        }
    }

    #[test]
    fn zero_base_at_rest_gives_ambient_film() {
        let s = field_sample(0.0, 0.0, 1.0);
        assert_eq!(s.pressure, 0.0);
        assert_eq!(s.thickness, 55.0);
        assert_eq!(s.temperature, 40.0);
    }

    // -- Evaluation --

    #[test]
    fn full_circle_at_rest_matches_hand_computed_values() {
        let geometry = probe_geometry();
        let field = evaluate(&geometry, &BearingLoadConfig::full_circle(0.0), 0.0, 0.0);
        let at_zero = field.values.sample(0).unwrap();
        let at_pi = field.values.sample(1).unwrap();

        assert!(at_zero.pressure.abs() < 1e-12, "theta=0: {at_zero:?}");
        // shimmer(1, 0) = 1 + sin(0.5) * 0.08
        let expected = 2.0 * (1.0 + 0.5_f64.sin() * 0.08);
        assert!((at_pi.pressure - expected).abs() < 1e-12, "theta=π: {at_pi:?}");
        assert!((at_pi.pressure - 2.0).abs() < 0.05);
    }

    #[test]
    fn stats_match_value_arrays() {
        let geometry = BearingGeometry::cylinder(0.5, 0.3, 48, 6).unwrap();
        let field = evaluate(&geometry, &BearingLoadConfig::full_circle(0.4), 2500.0, 1.7);
        let p = field.values.get(FieldType::Pressure);
        let h = field.values.get(FieldType::Thickness);
        let t = field.values.get(FieldType::Temperature);
        assert_eq!(p.len(), geometry.len());
        assert_eq!(field.stats.max_pressure, p.iter().cloned().fold(f64::MIN, f64::max));
        assert_eq!(field.stats.min_thickness, h.iter().cloned().fold(f64::MAX, f64::min));
        assert_eq!(field.stats.max_temperature, t.iter().cloned().fold(f64::MIN, f64::max));
    }

    #[test]
    fn axial_edges_carry_no_pressure() {
        let geometry = BearingGeometry::cylinder(1.0, 0.5, 16, 4).unwrap();
        let field = evaluate(&geometry, &BearingLoadConfig::full_circle(0.0), 3000.0, 0.2);
        let p = field.values.get(FieldType::Pressure);
        // First and last rings sit at y = ±width/2.
        assert!(p[..16].iter().all(|&v| v.abs() < 1e-12));
        assert!(p[p.len() - 16..].iter().all(|&v| v.abs() < 1e-12));
    }

    #[test]
    fn two_pad_bearing_pressure_rises_with_speed() {
        let geometry = BearingGeometry::cylinder(0.5, 0.4, 72, 8).unwrap();
        let load = BearingLoadConfig::tilting_pad(0.0, 2, 90.0);
        let slow = evaluate(&geometry, &load, 0.0, 0.5);
        let fast = evaluate(&geometry, &load, 4000.0, 0.5);
        assert!(
            fast.stats.max_pressure > slow.stats.max_pressure,
            "fast {} vs slow {}",
            fast.stats.max_pressure,
            slow.stats.max_pressure
        );
    }

    #[test]
    fn evaluate_into_reuses_buffers_and_discards_old_values() {
        let geometry = BearingGeometry::cylinder(0.5, 0.4, 24, 3).unwrap();
        let load = BearingLoadConfig::full_circle(PI / 3.0);
        let first = evaluate(&geometry, &load, 1200.0, 0.1);
        let expected = evaluate(&geometry, &load, 1800.0, 0.2);
        let second = evaluate_into(&geometry, &load, 1800.0, 0.2, first.values);
        assert_eq!(second, expected);
    }

    #[test]
    fn evaluation_never_touches_original_positions() {
        let geometry = BearingGeometry::cylinder(0.5, 0.4, 24, 3).unwrap();
        let before = geometry.positions().to_vec();
        let load = BearingLoadConfig::tilting_pad(0.5, 3, 80.0);
        let mut buffers = FieldValues::default();
        for frame in 0..5 {
            let elapsed = frame as f64 * 0.016;
            buffers = evaluate_into(&geometry, &load, 3000.0, elapsed, buffers).values;
        }
        assert_eq!(geometry.positions(), before.as_slice());
    }

    #[test]
    fn empty_geometry_yields_zero_stats() {
        let geometry = BearingGeometry::from_positions(1.0, 1.0, vec![]).unwrap();
        let field = evaluate(&geometry, &BearingLoadConfig::default(), 4000.0, 1.0);
        assert!(field.values.is_empty());
        assert_eq!(field.stats, BearingStats::default());
    }

    #[test]
    fn evaluation_is_deterministic() {
        let geometry = BearingGeometry::cylinder(0.5, 0.4, 32, 4).unwrap();
        let load = BearingLoadConfig::tilting_pad(-0.8, 4, 70.0);
        let a = evaluate(&geometry, &load, 3300.0, 12.5);
        let b = evaluate(&geometry, &load, 3300.0, 12.5);
        assert_eq!(a, b);
    }
}
