//! Mapping of field values to display color and radial displacement.
//!
//! Displacements are always measured from the original vertex position along
//! its outward radial normal, so applying them every frame never compounds.

use glam::DVec3;
use serde::Serialize;

use crate::aggregate::LegendRange;
use crate::color::{heat_color, Srgb};
use crate::field::{FieldType, FieldValues};
use crate::geometry::BearingGeometry;

/// Display quantities of one vertex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DisplaySample {
    /// `(value - min) / (max - min)`; may fall slightly outside [0, 1].
    pub normalized: f64,
    pub color: Srgb,
    /// Radial displacement magnitude.
    pub displacement: f64,
}

/// Position in the legend range. Not clamped; an empty range yields 0.
pub fn normalize(value: f64, range: LegendRange) -> f64 {
    if range.max > range.min {
        (value - range.min) / (range.max - range.min)
    } else {
        0.0
    }
}

/// Maps one value of `field` to its color and displacement.
pub fn map(value: f64, range: LegendRange, field: FieldType) -> DisplaySample {
    let normalized = normalize(value, range);
    DisplaySample {
        normalized,
        color: heat_color(normalized),
        displacement: normalized * field.displacement_factor(),
    }
}

/// Per-vertex colors and displacement vectors for one bearing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DisplayBuffers {
    pub colors: Vec<Srgb>,
    pub displacements: Vec<DVec3>,
}

impl DisplayBuffers {
    /// Maps the selected field of every vertex.
    ///
    /// `values` must come from evaluating `geometry`; vertices are paired by
    /// index and any surplus on either side is ignored.
    pub fn map_bearing(
        geometry: &BearingGeometry,
        values: &FieldValues,
        range: LegendRange,
        field: FieldType,
    ) -> Self {
        let (colors, displacements) = geometry
            .points()
            .iter()
            .zip(values.get(field))
            .map(|(point, &value)| {
                let sample = map(value, range, field);
                (sample.color, point.normal * sample.displacement)
            })
            .unzip();
        Self {
            colors,
            displacements,
        }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Original positions plus this frame's displacement.
    pub fn displaced_positions(&self, geometry: &BearingGeometry) -> Vec<DVec3> {
        geometry
            .positions()
            .iter()
            .zip(&self.displacements)
            .map(|(&p, &d)| p + d)
            .collect()
    }
}
