//! Procedural 2D grass.
//!
//! A field is a set of [`Clump`]s, each a fixed number of curved blades
//! scattered around one origin. Every tick each blade random-walks its
//! control points and bends when a scene presence covers its root.

pub mod blade;
pub mod clump;
pub mod config;

pub use blade::GrassBlade;
pub use clump::Clump;
pub use config::{ClumpConfig, GrassConfig};

use crate::collision::{BendRotations, Presence};
use crate::core::Result;
use crate::core::types::Vec2;
use crate::math::DeviationEngine;
use crate::surface::Surface;

/// Owns the clumps of a field and the rotations they share.
pub struct GrassField {
    config: GrassConfig,
    rotations: BendRotations,
    /// Back to front (ascending origin y)
    clumps: Vec<Clump>,
}

impl GrassField {
    /// Lay out clumps around the center of a `surface_size` surface and
    /// sample the bend rotations for the run.
    pub fn new(config: GrassConfig, surface_size: Vec2, engine: &mut DeviationEngine) -> Result<Self> {
        config.validate()?;
        let rotations = BendRotations::sample(engine)?;
        Ok(Self::with_rotations(config, surface_size, rotations))
    }

    pub fn with_rotations(config: GrassConfig, surface_size: Vec2, rotations: BendRotations) -> Self {
        let center = surface_size / 2.0;
        let mut clumps: Vec<Clump> = config
            .clumps
            .iter()
            .map(|c| Clump::new(center + Vec2::from(c.offset), c.color, config.num_blades))
            .collect();
        clumps.sort_by(|a, b| a.origin().y.total_cmp(&b.origin().y));

        Self { config, rotations, clumps }
    }

    pub fn config(&self) -> &GrassConfig {
        &self.config
    }

    pub fn rotations(&self) -> &BendRotations {
        &self.rotations
    }

    pub fn clumps(&self) -> &[Clump] {
        &self.clumps
    }

    /// Total blades currently alive across all clumps.
    pub fn blade_count(&self) -> usize {
        self.clumps.iter().map(Clump::len).sum()
    }

    /// Populate every clump that has not been filled yet.
    pub fn ensure_initialized(&mut self, engine: &mut DeviationEngine) -> Result<()> {
        for clump in &mut self.clumps {
            clump.ensure_initialized(&self.config, &self.rotations, engine)?;
        }
        Ok(())
    }

    /// Update and draw every clump, back to front.
    pub fn update_and_draw<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        presences: &[Presence],
        engine: &mut DeviationEngine,
    ) -> Result<()> {
        for clump in &mut self.clumps {
            clump.update_and_draw(surface, presences, &self.rotations, engine)?;
        }
        Ok(())
    }
}
