//! Shrub drawn through the frame cache.

use crate::anim::{FrameCache, FrameCacheConfig, Loopable};
use crate::core::Result;
use crate::core::types::Vec2;
use crate::math::DeviationEngine;
use crate::shrub::config::ShrubConfig;
use crate::shrub::leaf::Shrub;
use crate::surface::{RasterSurface, Surface};

/// A shrub that redraws with fresh leaf jitter on every captured frame.
///
/// The shrub is laid out on its own offscreen surface (centered, base at
/// half height); `position` is where that surface is presented on the
/// main surface.
pub struct ShrubLoop {
    position: Vec2,
    config: ShrubConfig,
    shrub: Shrub,
    engine: DeviationEngine,
}

impl ShrubLoop {
    pub fn new(position: Vec2, config: ShrubConfig, engine: DeviationEngine) -> Self {
        Self {
            position,
            config,
            shrub: Shrub::default(),
            engine,
        }
    }

    /// Wrap the loop in a frame cache backed by a `width` x `height` offscreen surface.
    pub fn into_cache(self, width: u32, height: u32, config: &FrameCacheConfig) -> Result<FrameCache<Self>> {
        Ok(FrameCache::new(self, RasterSurface::new(width, height)?, config))
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn config(&self) -> &ShrubConfig {
        &self.config
    }

    pub fn shrub(&self) -> &Shrub {
        &self.shrub
    }
}

impl Loopable for ShrubLoop {
    type State = Shrub;

    fn ensure_initialized(&mut self, width: u32, height: u32) -> Result<()> {
        self.shrub.ensure_initialized(width as f32, 0.0, height as f32 / 2.0, &self.config, &mut self.engine)?;
        Ok(())
    }

    fn draw<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Result<()> {
        self.shrub.refresh_jitter(&mut self.engine)?;
        self.shrub.draw(surface, &self.config);
        Ok(())
    }

    fn snapshot(&self) -> Option<Shrub> {
        Some(self.shrub.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shrub_cache(target: usize) -> FrameCache<ShrubLoop> {
        let shrub_loop = ShrubLoop::new(Vec2::new(10.0, 20.0), ShrubConfig::default(), DeviationEngine::from_seed(12));
        let config = FrameCacheConfig { target_frame_count: target, reverse_loop: false };
        shrub_loop.into_cache(160, 100, &config).unwrap()
    }

    #[test]
    fn test_shrub_generated_on_first_capture() {
        let mut cache = shrub_cache(3);
        assert!(cache.source().shrub().is_empty());

        let out = cache.render().unwrap();
        assert!(out.bitmap.unwrap().pixels().any(|p| p[3] > 0));
        assert_eq!(cache.source().shrub().len(), ShrubConfig::default().leaf_count());

        // Laid out around the offscreen center, base at half height
        let first = &cache.source().shrub().leaves()[90];
        assert!((first.position.x - 80.5).abs() <= 2.0);
        assert!((first.position.y - 50.5).abs() < 1e-4);
    }

    #[test]
    fn test_frames_differ_by_jitter_only() {
        let mut cache = shrub_cache(3);
        for _ in 0..3 {
            cache.render().unwrap();
        }

        let bucket = cache.bucket(0).unwrap();
        assert_eq!(bucket.len(), 3);
        assert_eq!(bucket.states().len(), 3);

        let a = &bucket.states()[0].leaves()[0];
        let b = &bucket.states()[1].leaves()[0];
        assert_eq!(a.position, b.position);
        assert_eq!(a.rotation, b.rotation);
        assert_ne!(a.jitter, b.jitter);
    }

    #[test]
    fn test_position_is_kept() {
        let cache = shrub_cache(1);
        assert_eq!(cache.source().position(), Vec2::new(10.0, 20.0));
        assert_eq!(cache.source().config().thickness, 6);
    }
}
