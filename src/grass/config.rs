//! Grass configuration.
//!
//! Per-clump placement and color live in [`ClumpConfig`]; everything else
//! is shared by every blade in the field.

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result, Rgba};

/// Upper bound on `num_blades`; larger values are rejected instead of allocated.
pub const MAX_BLADES_PER_CLUMP: usize = 100_000;

/// Straw base color of the back and front clumps.
pub const STRAW: Rgba = Rgba::rgb(123, 102, 78);
/// Slightly darker straw for the middle clump.
pub const STRAW_LIGHT: Rgba = Rgba::rgb(114, 95, 71);

/// Placement and base color of one clump.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClumpConfig {
    /// Offset of the clump origin from the surface center, in pixels.
    pub offset: [f32; 2],
    /// Base color every blade in the clump deviates from.
    pub color: Rgba,
}

impl ClumpConfig {
    pub fn new(offset: [f32; 2], color: Rgba) -> Self {
        Self { offset, color }
    }
}

/// Grass configuration shared by every clump.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GrassConfig {
    /// Blades per clump.
    pub num_blades: usize,
    /// Nominal blade height before deviation.
    pub blade_height: f32,
    /// Nominal arc radius of the curved stroke.
    pub arc_radius: f32,
    /// Stroke width in pixels.
    pub line_width: f32,
    /// Clumps in the field, in any order; they are layered by origin y.
    pub clumps: Vec<ClumpConfig>,
}

impl Default for GrassConfig {
    fn default() -> Self {
        Self {
            num_blades: 600,
            blade_height: 120.0,
            arc_radius: 30.0,
            line_width: 1.0,
            clumps: vec![
                ClumpConfig::new([-30.0, -10.0], STRAW),
                ClumpConfig::new([20.0, -5.0], STRAW_LIGHT),
                ClumpConfig::new([0.0, 0.0], STRAW),
            ],
        }
    }
}

impl GrassConfig {
    /// Reject settings that cannot produce a drawable field.
    pub fn validate(&self) -> Result<()> {
        if self.num_blades > MAX_BLADES_PER_CLUMP {
            return Err(Error::InvalidConfig(format!(
                "num_blades {} exceeds {}",
                self.num_blades, MAX_BLADES_PER_CLUMP
            )));
        }
        Ok(())
    }
}
