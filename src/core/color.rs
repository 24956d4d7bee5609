//! Stroke and fill colors.

use serde::{Deserialize, Serialize};

/// RGBA color with channels on the 0-255 scale and alpha in 0.0-1.0.
///
/// Channels are kept as `f32` so signed deviations can be applied before
/// the color is quantized for rasterization.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Self = Self::rgb(250, 250, 250);
    pub const TRANSPARENT: Self = Self { r: 0.0, g: 0.0, b: 0.0, a: 0.0 };

    /// Opaque color from 8-bit channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r: r as f32, g: g as f32, b: b as f32, a: 1.0 }
    }

    /// Color from 8-bit channels and an alpha in 0.0-1.0.
    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r: r as f32, g: g as f32, b: b as f32, a }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Shift all three color channels by the same amount.
    pub fn shifted(self, delta: f32) -> Self {
        Self {
            r: self.r + delta,
            g: self.g + delta,
            b: self.b + delta,
            a: self.a,
        }
    }

    /// Quantize to 8-bit RGBA, clamping out-of-range channels.
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f32| c.round().clamp(0.0, 255.0) as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a * 255.0)]
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::WHITE
    }
}
