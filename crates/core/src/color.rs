//! Color types and the heat-map hue ramp used by the display mapper.
//!
//! Colors are produced in HSL (hue in turns, so 1.0 is a full rotation) and
//! converted to `Srgb` with the standard piecewise formula. Uses `f64`
//! throughout so the mapper never loses precision before quantization.

use serde::{Serialize, Serializer};

/// Hue (in turns) assigned to a normalized intensity of 0. 0.7 turns is blue.
pub const COLD_HUE: f64 = 0.7;

/// sRGB color with components in [0, 1].
///
/// Serializes as a hex string `"#rrggbb"`, quantized to 8 bits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Hue/saturation/lightness with hue measured in turns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Srgb {
    pub const BLACK: Srgb = Srgb {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    /// Quantizes to 8-bit channels with rounding, clamping out-of-range values.
    pub fn to_rgb8(self) -> [u8; 3] {
        let q = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }

    /// Converts the color to a hex string like `"#rrggbb"`.
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

impl Serialize for Srgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// One channel of the HSL → RGB conversion. `t` is a hue offset in turns.
fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * 6.0 * (2.0 / 3.0 - t)
    } else {
        p
    }
}

/// Converts HSL to sRGB. Hue wraps (any real value is accepted); saturation
/// and lightness are clamped to [0, 1].
pub fn hsl_to_srgb(c: Hsl) -> Srgb {
    let s = c.s.clamp(0.0, 1.0);
    let l = c.l.clamp(0.0, 1.0);
    if s == 0.0 {
        return Srgb { r: l, g: l, b: l };
    }
    let q = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    Srgb {
        r: hue_to_channel(p, q, c.h + 1.0 / 3.0),
        g: hue_to_channel(p, q, c.h),
        b: hue_to_channel(p, q, c.h - 1.0 / 3.0),
    }
}

/// Heat-map color for a normalized intensity: blue at 0, red at 1, full
/// saturation and 50% lightness.
///
/// Intensities outside [0, 1] are not clamped; the hue simply keeps rotating.
pub fn heat_color(normalized: f64) -> Srgb {
    hsl_to_srgb(Hsl {
        h: COLD_HUE * (1.0 - normalized),
        s: 1.0,
        l: 0.5,
    })
}
