//! Undeformed bearing surface geometry.
//!
//! A [`BearingGeometry`] is captured once from the mesh and never mutated.
//! Every frame's displacement is computed from these original positions, so
//! displaced vertices can never leak back in as the next frame's base.
//!
//! The bearing axis is the local y axis: a vertex at `(x, y, z)` sits at angle
//! `atan2(z, x)` around the circumference and `y` along the axial width.

use std::f64::consts::TAU;

use glam::DVec3;

use crate::error::FieldError;

/// Cylindrical sample of one surface vertex, derived from its original position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfacePoint {
    /// Circumferential angle `atan2(z, x)`, in (−π, π].
    pub theta: f64,
    /// Axial offset from the bearing mid-plane.
    pub axial: f64,
    /// Outward radial unit normal at the original position (zero on the axis).
    pub normal: DVec3,
}

impl SurfacePoint {
    fn from_position(p: DVec3) -> Self {
        let radial = DVec3::new(p.x, 0.0, p.z);
        Self {
            theta: p.z.atan2(p.x),
            axial: p.y,
            normal: radial.normalize_or_zero(),
        }
    }
}

/// Read-only bearing geometry: radius, axial width, and the original vertex
/// positions with their cylindrical samples.
#[derive(Debug, Clone)]
pub struct BearingGeometry {
    radius: f64,
    width: f64,
    positions: Vec<DVec3>,
    points: Vec<SurfacePoint>,
}

impl BearingGeometry {
    /// Captures geometry from vertex positions in the bearing-local frame.
    ///
    /// Returns `FieldError::InvalidGeometry` if `radius` or `width` is not a
    /// positive finite number, or if any vertex has a non-finite coordinate.
    pub fn from_positions(
        radius: f64,
        width: f64,
        positions: Vec<DVec3>,
    ) -> Result<Self, FieldError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(FieldError::InvalidGeometry(format!(
                "radius must be positive and finite, got {radius}"
            )));
        }
        if !(width.is_finite() && width > 0.0) {
            return Err(FieldError::InvalidGeometry(format!(
                "width must be positive and finite, got {width}"
            )));
        }
        if let Some(i) = positions.iter().position(|p| !p.is_finite()) {
            return Err(FieldError::InvalidGeometry(format!(
                "vertex {i} has a non-finite coordinate"
            )));
        }
        let points = positions
            .iter()
            .copied()
            .map(SurfacePoint::from_position)
            .collect();
        Ok(Self {
            radius,
            width,
            positions,
            points,
        })
    }

    /// Builds the inner surface of an open cylinder as a vertex grid.
    ///
    /// Vertices are laid out row-major: `axial_segments + 1` rings from
    /// `y = -width/2` to `y = +width/2`, each with `radial_segments` vertices at
    /// angles `2π·j / radial_segments`. Requires at least 3 radial and 1 axial
    /// segment.
    pub fn cylinder(
        radius: f64,
        width: f64,
        radial_segments: usize,
        axial_segments: usize,
    ) -> Result<Self, FieldError> {
        if radial_segments < 3 || axial_segments < 1 {
            return Err(FieldError::InvalidGeometry(format!(
                "cylinder needs >= 3 radial and >= 1 axial segments, \
                 got {radial_segments}x{axial_segments}"
            )));
        }
        let positions = (0..=axial_segments)
            .flat_map(|row| {
                let y = width * (row as f64 / axial_segments as f64 - 0.5);
                (0..radial_segments).map(move |col| {
                    let theta = TAU * col as f64 / radial_segments as f64;
                    DVec3::new(radius * theta.cos(), y, radius * theta.sin())
                })
            })
            .collect();
        Self::from_positions(radius, width, positions)
    }

    /// Bearing bore radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Axial width of the bearing surface.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Number of surface vertices.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// True if the geometry has no vertices.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Original (undeformed) vertex positions.
    pub fn positions(&self) -> &[DVec3] {
        &self.positions
    }

    /// Cylindrical samples, one per vertex, in the same order as `positions`.
    pub fn points(&self) -> &[SurfacePoint] {
        &self.points
    }

    /// Parabolic axial falloff: 1 at mid-width, 0 at (and beyond) the edges.
    pub fn axial_falloff(&self, axial: f64) -> f64 {
        let u = 2.0 * axial / self.width;
        (1.0 - u * u).max(0.0)
    }
}
