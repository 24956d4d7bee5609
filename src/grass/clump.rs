//! Fixed-capacity group of blades sharing an origin and base color.

use crate::collision::{BendRotations, Presence};
use crate::core::types::Vec2;
use crate::core::{Result, Rgba};
use crate::grass::blade::GrassBlade;
use crate::grass::config::GrassConfig;
use crate::math::DeviationEngine;
use crate::surface::Surface;

pub struct Clump {
    origin: Vec2,
    base_color: Rgba,
    capacity: usize,
    blades: Vec<GrassBlade>,
}

impl Clump {
    /// Empty clump; blades are created by [`Clump::ensure_initialized`].
    pub fn new(origin: Vec2, base_color: Rgba, capacity: usize) -> Self {
        Self {
            origin,
            base_color,
            capacity,
            blades: Vec::new(),
        }
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn base_color(&self) -> Rgba {
        self.base_color
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn blades(&self) -> &[GrassBlade] {
        &self.blades
    }

    pub fn len(&self) -> usize {
        self.blades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blades.is_empty()
    }

    pub fn is_initialized(&self) -> bool {
        self.blades.len() >= self.capacity
    }

    /// Fill the clump up to capacity. Does nothing once full.
    ///
    /// Returns true if any blades were created by this call.
    pub fn ensure_initialized(
        &mut self,
        config: &GrassConfig,
        rotations: &BendRotations,
        engine: &mut DeviationEngine,
    ) -> Result<bool> {
        if self.is_initialized() {
            return Ok(false);
        }

        self.blades.reserve(self.capacity - self.blades.len());
        while self.blades.len() < self.capacity {
            let blade = GrassBlade::create(self.origin, self.base_color, config, rotations, engine)?;
            self.blades.push(blade);
        }

        log::debug!("Clump at ({:.0}, {:.0}): created {} blades", self.origin.x, self.origin.y, self.blades.len());
        Ok(true)
    }

    /// Update every blade against `presences` without drawing.
    pub fn update(
        &mut self,
        presences: &[Presence],
        rotations: &BendRotations,
        engine: &mut DeviationEngine,
    ) -> Result<()> {
        for blade in &mut self.blades {
            blade.update(presences, rotations, engine)?;
        }
        Ok(())
    }

    /// Update then stroke each blade in stored order.
    pub fn update_and_draw<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        presences: &[Presence],
        rotations: &BendRotations,
        engine: &mut DeviationEngine,
    ) -> Result<()> {
        for blade in &mut self.blades {
            blade.update(presences, rotations, engine)?;
            blade.draw(surface);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grass::config::STRAW;
    use crate::surface::RasterSurface;

    fn setup() -> (DeviationEngine, BendRotations, GrassConfig) {
        let mut engine = DeviationEngine::from_seed(42);
        let rotations = BendRotations::sample(&mut engine).unwrap();
        (engine, rotations, GrassConfig::default())
    }

    #[test]
    fn test_ensure_initialized_is_idempotent() {
        let (mut engine, rotations, config) = setup();
        let mut clump = Clump::new(Vec2::new(100.0, 100.0), STRAW, 25);
        assert!(!clump.is_initialized());

        assert!(clump.ensure_initialized(&config, &rotations, &mut engine).unwrap());
        assert_eq!(clump.len(), 25);
        let first = clump.blades().to_vec();

        for _ in 0..5 {
            assert!(!clump.ensure_initialized(&config, &rotations, &mut engine).unwrap());
        }
        assert_eq!(clump.len(), 25);
        assert_eq!(clump.blades(), &first[..]);
    }

    #[test]
    fn test_blades_allocated_on_fill() {
        let (mut engine, rotations, config) = setup();
        // Construction never sizes storage from the configured capacity
        let huge = Clump::new(Vec2::ZERO, STRAW, usize::MAX);
        assert_eq!(huge.capacity(), usize::MAX);
        assert!(huge.is_empty());

        let mut small = Clump::new(Vec2::new(50.0, 50.0), STRAW, 3);
        small.ensure_initialized(&config, &rotations, &mut engine).unwrap();
        assert_eq!(small.len(), 3);
    }

    #[test]
    fn test_zero_capacity_clump() {
        let (mut engine, rotations, config) = setup();
        let mut clump = Clump::new(Vec2::ZERO, STRAW, 0);
        assert!(clump.is_initialized());
        assert!(!clump.ensure_initialized(&config, &rotations, &mut engine).unwrap());
        assert!(clump.is_empty());
    }

    #[test]
    fn test_update_bends_covered_blades() {
        let (mut engine, rotations, config) = setup();
        let mut clump = Clump::new(Vec2::new(100.0, 100.0), STRAW, 50);
        clump.ensure_initialized(&config, &rotations, &mut engine).unwrap();

        // Covers every blade origin: x in (50, 150], y in [99, 101]
        let everything = [Presence::new(100.0, 100.0, 400.0)];
        clump.update(&everything, &rotations, &mut engine).unwrap();
        assert!(clump.blades().iter().all(|b| b.rotation == rotations.bent));

        clump.update(&[], &rotations, &mut engine).unwrap();
        assert!(clump.blades().iter().all(|b| b.rotation == rotations.upright));
    }

    #[test]
    fn test_drawing_twice_keeps_count_and_walks() {
        let (mut engine, rotations, config) = setup();
        let mut surface = RasterSurface::new(400, 300).unwrap();
        let mut clump = Clump::new(Vec2::new(200.0, 150.0), STRAW, 600);

        clump.ensure_initialized(&config, &rotations, &mut engine).unwrap();
        clump.update_and_draw(&mut surface, &[], &rotations, &mut engine).unwrap();
        assert_eq!(clump.len(), 600);
        let after_first = clump.blades().to_vec();

        clump.ensure_initialized(&config, &rotations, &mut engine).unwrap();
        clump.update_and_draw(&mut surface, &[], &rotations, &mut engine).unwrap();
        assert_eq!(clump.len(), 600);

        for (before, after) in after_first.iter().zip(clump.blades()) {
            assert_ne!(before.near.x, after.near.x);
            assert_ne!(before.far.x, after.far.x);
        }
        assert!(surface.pixels().pixels().any(|p| p[3] > 0));
    }
}
