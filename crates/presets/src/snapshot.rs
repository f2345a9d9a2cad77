//! PNG output of one bearing's unrolled surface.
//!
//! Feature-gated behind `png` (default on) so hosts that only need the
//! presets do not pull in the `image` crate. The rasterization itself lives
//! in [`crate::pixel`].

use std::path::Path;

use rotor_field_core::display::DisplayBuffers;
use rotor_field_core::error::FieldError;
use rotor_field_core::geometry::BearingGeometry;
use tracing::debug;

use crate::pixel::surface_to_rgba;

/// Writes the bearing surface colors as a `width x height` PNG.
///
/// Returns `FieldError::InvalidDimensions` if a dimension is zero or does not
/// fit in `u32`, or `FieldError::Io` on write failure.
pub fn write_png(
    geometry: &BearingGeometry,
    display: &DisplayBuffers,
    width: usize,
    height: usize,
    path: &Path,
) -> Result<(), FieldError> {
    let rgba = surface_to_rgba(geometry, display, width, height)?;
    let w = u32::try_from(width).map_err(|_| FieldError::InvalidDimensions)?;
    let h = u32::try_from(height).map_err(|_| FieldError::InvalidDimensions)?;
    let img = image::RgbaImage::from_raw(w, h, rgba)
        .ok_or_else(|| FieldError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| FieldError::Io(e.to_string()))?;
    debug!(path = %path.display(), width, height, "wrote surface snapshot");
    Ok(())
}
