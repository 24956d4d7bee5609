//! Field configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::anim::FrameCacheConfig;
use crate::core::types::Vec2;
use crate::core::{Result, Rgba};
use crate::grass::GrassConfig;
use crate::math::DeviationEngine;
use crate::shrub::ShrubConfig;

/// Where a cached shrub loop is presented and how big its offscreen surface is.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShrubPlacement {
    /// Top-left of the shrub surface, relative to the field center.
    pub offset: [f32; 2],
    /// Offscreen surface size in pixels.
    pub size: [u32; 2],
}

/// Configuration for a whole field
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Surface width in pixels
    pub width: u32,
    /// Surface height in pixels
    pub height: u32,
    /// Random seed; `None` seeds from the OS
    pub seed: Option<u64>,
    /// Static background fill
    pub background: Rgba,
    pub grass: GrassConfig,
    pub shrub: ShrubConfig,
    pub shrubs: Vec<ShrubPlacement>,
    pub frame_cache: FrameCacheConfig,
    /// Draw the frame-rate overlay
    pub overlay: bool,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 448,    // 0.56 aspect
            seed: None,
            background: Rgba::rgb(14, 14, 14),
            grass: GrassConfig::default(),
            shrub: ShrubConfig::default(),
            shrubs: vec![ShrubPlacement {
                offset: [-260.0, -20.0],
                size: [160, 100],
            }],
            frame_cache: FrameCacheConfig::default(),
            overlay: true,
        }
    }
}

impl FieldConfig {
    /// Parse a JSON config; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.grass.validate()?;
        Ok(config)
    }

    /// Load a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn surface_size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// Deviation engine for this config's seed
    pub fn engine(&self) -> DeviationEngine {
        match self.seed {
            Some(seed) => DeviationEngine::from_seed(seed),
            None => DeviationEngine::from_entropy(),
        }
    }
}
