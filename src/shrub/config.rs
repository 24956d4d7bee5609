//! Shrub configuration.

use serde::{Deserialize, Serialize};

use crate::core::Rgba;

/// How leaf colors cycle through the palette.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaletteCycle {
    /// `(layer + position) % (len - 1)`: the last entry is never chosen.
    /// This is the look the reference shrubs were tuned with.
    #[default]
    SkipLast,
    /// `(layer + position) % len`: every entry is used.
    Full,
}

impl PaletteCycle {
    /// Palette index for a leaf, or 0 for a palette too short to cycle.
    pub fn index(self, layer: usize, position: usize, len: usize) -> usize {
        let modulus = match self {
            PaletteCycle::SkipLast => len.saturating_sub(1),
            PaletteCycle::Full => len,
        };
        if modulus == 0 { 0 } else { (layer + position) % modulus }
    }
}

/// How a leaf's stored angle (degrees) becomes a surface rotation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeafAngleUnit {
    /// `degrees / 180` used directly as radians: a fan about 1 radian wide
    /// each side instead of a full half-turn.
    #[default]
    RawDegreeDivision,
    /// Proper degrees-to-radians conversion.
    Radians,
}

impl LeafAngleUnit {
    pub fn to_radians(self, degrees: f32) -> f32 {
        match self {
            LeafAngleUnit::RawDegreeDivision => degrees / 180.0,
            LeafAngleUnit::Radians => degrees.to_radians(),
        }
    }
}

/// Shrub generation and stroke settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ShrubConfig {
    /// Number of stacked leaf layers.
    pub thickness: u32,
    /// First angle of each layer in degrees; layers span `[rot_start, -rot_start)`.
    pub rot_start: i32,
    /// Widest the shrub gets, however wide its container.
    pub default_width: f32,
    /// Leaf height of the back layer.
    pub height: f32,
    /// How far the canopy edge droops at the extremes.
    pub height_sag: f32,
    pub line_width: f32,
    pub palette: Vec<Rgba>,
    pub palette_cycle: PaletteCycle,
    pub angle_unit: LeafAngleUnit,
}

impl ShrubConfig {
    pub fn rot_end(&self) -> i32 {
        -self.rot_start
    }

    /// One-degree steps per layer
    pub fn step_count(&self) -> u32 {
        (self.rot_end() - self.rot_start).max(0) as u32
    }

    /// Leaves in a fully generated shrub
    pub fn leaf_count(&self) -> usize {
        self.thickness as usize * self.step_count() as usize
    }
}

impl Default for ShrubConfig {
    fn default() -> Self {
        Self {
            thickness: 6,
            rot_start: -90,
            default_width: 120.0,
            height: 60.0,
            height_sag: 5.0,
            line_width: 2.0,
            palette: vec![
                Rgba::rgba(33, 29, 16, 0.3),
                Rgba::rgba(43, 42, 25, 0.3),
                Rgba::rgba(55, 50, 32, 0.3),
            ],
            palette_cycle: PaletteCycle::default(),
            angle_unit: LeafAngleUnit::default(),
        }
    }
}
