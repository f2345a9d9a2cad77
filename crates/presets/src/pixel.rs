//! Pure-computation rasterization of a bearing's unrolled inner surface.
//!
//! The surface is cut along theta = 0 and laid flat: x runs around the
//! circumference over [0, 2π), y runs across the axial width from −w/2 (top
//! row) to +w/2 (bottom row). Each vertex paints the pixel it falls on.

use std::f64::consts::TAU;

use rotor_field_core::color::Srgb;
use rotor_field_core::display::DisplayBuffers;
use rotor_field_core::error::FieldError;
use rotor_field_core::geometry::BearingGeometry;

/// Pixel `(x, y)` a vertex at `(theta, axial)` lands on.
fn pixel_of(
    theta: f64,
    axial: f64,
    geometry: &BearingGeometry,
    width: usize,
    height: usize,
) -> (usize, usize) {
    let u = theta.rem_euclid(TAU) / TAU;
    let x = ((u * width as f64).round() as usize) % width;
    let v = (axial / geometry.width() + 0.5).clamp(0.0, 1.0);
    let y = ((v * (height - 1) as f64).round() as usize).min(height - 1);
    (x, y)
}

/// Maps per-vertex display colors onto an RGBA8 buffer of `width * height`
/// pixels. Pixels no vertex lands on stay opaque [`Srgb::BLACK`].
///
/// A `BearingGeometry::cylinder` mesh with `radial_segments = width` and
/// `axial_segments = height - 1` covers every pixel exactly once.
pub fn surface_to_rgba(
    geometry: &BearingGeometry,
    display: &DisplayBuffers,
    width: usize,
    height: usize,
) -> Result<Vec<u8>, FieldError> {
    if width == 0 || height == 0 {
        return Err(FieldError::InvalidDimensions);
    }
    let len = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(4))
        .ok_or(FieldError::InvalidDimensions)?;

    let [r, g, b] = Srgb::BLACK.to_rgb8();
    let mut rgba = [r, g, b, 255].repeat(len / 4);
    for (point, color) in geometry.points().iter().zip(&display.colors) {
        let (x, y) = pixel_of(point.theta, point.axial, geometry, width, height);
        let i = (y * width + x) * 4;
        let [r, g, b] = color.to_rgb8();
        rgba[i..i + 3].copy_from_slice(&[r, g, b]);
    }
    Ok(rgba)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rotor_field_core::aggregate::LegendRange;
    use rotor_field_core::evaluator::evaluate;
    use rotor_field_core::field::FieldType;
    use rotor_field_core::load::BearingLoadConfig;

    fn display_for(geometry: &BearingGeometry) -> DisplayBuffers {
        let field = evaluate(geometry, &BearingLoadConfig::full_circle(0.0), 3000.0, 0.0);
        let range = LegendRange::aggregate(&[field.stats], FieldType::Pressure, 3000.0);
        DisplayBuffers::map_bearing(geometry, &field.values, range, FieldType::Pressure)
    }

    #[test]
    fn rgba_has_correct_length_and_opaque_alpha() {
        let geometry = BearingGeometry::cylinder(0.5, 0.4, 32, 7).unwrap();
        let buf = surface_to_rgba(&geometry, &display_for(&geometry), 32, 8).unwrap();
        assert_eq!(buf.len(), 32 * 8 * 4);
        assert!(buf.iter().skip(3).step_by(4).all(|&a| a == 255));
    }

    #[test]
    fn matching_grid_covers_every_pixel() {
        let geometry = BearingGeometry::cylinder(0.5, 0.4, 24, 5).unwrap();
        let display = display_for(&geometry);
        let buf = surface_to_rgba(&geometry, &display, 24, 6).unwrap();
        // Heat colors always have one saturated channel, so a covered pixel
        // is never black.
        for (i, px) in buf.chunks_exact(4).enumerate() {
            assert!(px[..3].iter().any(|&c| c > 0), "pixel {i} not painted");
        }
    }

    #[test]
    fn uncovered_pixels_are_opaque_black() {
        // Two rings land on the first and last rows only.
        let geometry = BearingGeometry::cylinder(0.5, 0.4, 3, 1).unwrap();
        let buf = surface_to_rgba(&geometry, &display_for(&geometry), 16, 8).unwrap();
        let [r, g, b] = Srgb::BLACK.to_rgb8();
        for row in 1..7 {
            for col in 0..16 {
                let i = (row * 16 + col) * 4;
                assert_eq!(&buf[i..i + 4], &[r, g, b, 255], "pixel ({col}, {row})");
            }
        }
    }

    #[test]
    fn hottest_column_sits_opposite_the_load() {
        let geometry = BearingGeometry::cylinder(0.5, 0.4, 36, 4).unwrap();
        let buf = surface_to_rgba(&geometry, &display_for(&geometry), 36, 5).unwrap();
        // Middle row, column at theta = π is the hot (red) end of the ramp.
        let mid = (2 * 36 + 18) * 4;
        assert!(buf[mid] > 200 && buf[mid + 2] < 60, "got {:?}", &buf[mid..mid + 4]);
        // Column at theta = 0 has zero pressure: cold (blue) end.
        let cold = (2 * 36) * 4;
        assert!(buf[cold + 2] > 200, "got {:?}", &buf[cold..cold + 4]);
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        let geometry = BearingGeometry::cylinder(0.5, 0.4, 8, 1).unwrap();
        let display = display_for(&geometry);
        assert!(matches!(
            surface_to_rgba(&geometry, &display, 0, 4),
            Err(FieldError::InvalidDimensions)
        ));
        assert!(surface_to_rgba(&geometry, &display, 4, 0).is_err());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn any_raster_size_is_filled_without_panicking(
                radial in 3_usize..40,
                axial in 1_usize..10,
                w in 1_usize..64,
                h in 1_usize..32,
            ) {
                let geometry = BearingGeometry::cylinder(0.5, 0.4, radial, axial).unwrap();
                let buf = surface_to_rgba(&geometry, &display_for(&geometry), w, h).unwrap();
                prop_assert_eq!(buf.len(), w * h * 4);
            }
        }
    }
}
