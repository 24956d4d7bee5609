//! Shrub leaves: grid-shaped generation and straight-stroke drawing.

use crate::core::types::Vec2;
use crate::core::{Result, Rgba};
use crate::math::DeviationEngine;
use crate::shrub::config::ShrubConfig;
use crate::surface::{StrokeStyle, Surface};

/// One straight leaf stroke.
#[derive(Clone, Debug, PartialEq)]
pub struct ShrubLeaf {
    pub position: Vec2,
    pub height: f32,
    pub color: Rgba,
    /// Angle index in degrees, fixed at generation.
    pub rotation: f32,
    /// Extra rotation for the current frame only.
    pub jitter: f32,
}

impl ShrubLeaf {
    /// Rotation used for the current frame, in the configured angle unit.
    pub fn frame_rotation(&self, config: &ShrubConfig) -> f32 {
        config.angle_unit.to_radians(self.rotation + self.jitter)
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, config: &ShrubConfig) {
        surface.begin_path();
        surface.translate(self.position);
        surface.move_to(Vec2::ZERO);
        surface.rotate(self.frame_rotation(config));
        surface.line_to(Vec2::new(0.0, -self.height));
        surface.stroke(StrokeStyle::new(self.color, config.line_width));
        surface.reset_transform();
    }
}

/// A small bush made of `thickness` fanned layers of leaves.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Shrub {
    leaves: Vec<ShrubLeaf>,
}

impl Shrub {
    /// Generate a shrub centered in a container of `container_width` starting at `x`,
    /// with its base at `y`.
    pub fn generate(
        container_width: f32,
        x: f32,
        y: f32,
        config: &ShrubConfig,
        engine: &mut DeviationEngine,
    ) -> Result<Self> {
        let steps = config.step_count() as f32;
        let layers = config.thickness as f32;
        let center = x + container_width / 2.0;
        let shrub_width = config.default_width.min(container_width * 0.7);

        let mut leaves = Vec::with_capacity(config.leaf_count());
        for layer in 0..config.thickness {
            let t = layer as f32;
            let layer_width = shrub_width - t * 2.0;
            let base_height = config.height - (config.height / layers) * t;

            for (position, angle) in (config.rot_start..config.rot_end()).enumerate() {
                let i = angle as f32;
                let palette_index = config.palette_cycle.index(layer as usize, position, config.palette.len());
                let color = config.palette.get(palette_index).copied().unwrap_or_default();

                let leaf_x = center + layer_width / steps * i + engine.uniform(-2.0, 2.0);
                // Zero at the center, about -4.5 at the extremes for the default sag
                let curve = -i.abs();
                let sag = config.height_sag / (steps / 2.0) * curve - curve / steps;
                let height = base_height - engine.deviate(base_height / 4.0, 1.5, -1.5)? + sag;

                leaves.push(ShrubLeaf {
                    position: Vec2::new(leaf_x + 0.5, y + t + sag + 0.5),
                    height,
                    color,
                    rotation: i,
                    jitter: 0.0,
                });
            }
        }

        Ok(Self { leaves })
    }

    /// Generate leaves if there are none. Returns true if it generated.
    pub fn ensure_initialized(
        &mut self,
        container_width: f32,
        x: f32,
        y: f32,
        config: &ShrubConfig,
        engine: &mut DeviationEngine,
    ) -> Result<bool> {
        if !self.leaves.is_empty() {
            return Ok(false);
        }
        *self = Self::generate(container_width, x, y, config, engine)?;
        log::debug!("Shrub generated: {} leaves for width {container_width}", self.leaves.len());
        Ok(true)
    }

    /// Draw a fresh per-frame rotation jitter for every leaf.
    pub fn refresh_jitter(&mut self, engine: &mut DeviationEngine) -> Result<()> {
        for leaf in &mut self.leaves {
            leaf.jitter = engine.deviate(2.0, 2.0, 0.0)?;
        }
        Ok(())
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, config: &ShrubConfig) {
        for leaf in &self.leaves {
            leaf.draw(surface, config);
        }
    }

    pub fn leaves(&self) -> &[ShrubLeaf] {
        &self.leaves
    }

    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Drop all leaves; the next `ensure_initialized` regenerates them.
    pub fn clear(&mut self) {
        self.leaves.clear();
    }
}
