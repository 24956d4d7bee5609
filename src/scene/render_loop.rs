//! Per-tick composition of the field.
//!
//! Each tick clears the surface, paints the background, presents the cached
//! shrub loops, updates and draws the grass against the presences of the
//! scene objects, then draws the objects and the frame-rate overlay.

use std::time::Duration;

use crate::anim::FrameCache;
use crate::collision::Presence;
use crate::core::time::FrameRateCounter;
use crate::core::types::Vec2;
use crate::core::{Error, Result, Rgba};
use crate::grass::GrassField;
use crate::math::DeviationEngine;
use crate::scene::config::FieldConfig;
use crate::scene::object::SceneObject;
use crate::shrub::ShrubLoop;
use crate::surface::Surface;

/// Overlay text positions: frame rate, surface width, surface height.
const OVERLAY_LINES: [Vec2; 3] = [Vec2::new(10.0, 20.0), Vec2::new(10.0, 60.0), Vec2::new(10.0, 100.0)];
const OVERLAY_COLOR: Rgba = Rgba::rgb(255, 255, 255);

/// Host-provided tick source.
pub trait FrameScheduler {
    /// Timestamp of the next frame, or `None` once the host stops presenting.
    fn next_frame(&mut self) -> Option<Duration>;
}

/// Yields a fixed number of evenly spaced timestamps starting at zero.
#[derive(Clone, Debug)]
pub struct FixedStepScheduler {
    step: Duration,
    now: Duration,
    remaining: u64,
}

impl FixedStepScheduler {
    pub fn new(frames: u64, step: Duration) -> Self {
        Self { step, now: Duration::ZERO, remaining: frames }
    }

    /// `frames` ticks spaced for `fps` frames per second.
    pub fn at_fps(frames: u64, fps: u32) -> Self {
        Self::new(frames, Duration::from_secs(1) / fps.max(1))
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }
}

impl FrameScheduler for FixedStepScheduler {
    fn next_frame(&mut self) -> Option<Duration> {
        if self.remaining == 0 {
            return None;
        }
        let now = self.now;
        self.now += self.step;
        self.remaining -= 1;
        Some(now)
    }
}

/// Collects what a [`RenderLoop`] needs before it can start.
pub struct RenderLoopBuilder<S: Surface, F: FrameScheduler> {
    config: FieldConfig,
    surface: Option<S>,
    scheduler: Option<F>,
    engine: Option<DeviationEngine>,
    objects: Vec<Box<dyn SceneObject>>,
}

impl<S: Surface, F: FrameScheduler> RenderLoopBuilder<S, F> {
    pub fn new(config: FieldConfig) -> Self {
        Self {
            config,
            surface: None,
            scheduler: None,
            engine: None,
            objects: Vec::new(),
        }
    }

    pub fn surface(mut self, surface: S) -> Self {
        self.surface = Some(surface);
        self
    }

    pub fn scheduler(mut self, scheduler: F) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    /// Use `engine` instead of one seeded from the config.
    pub fn engine(mut self, engine: DeviationEngine) -> Self {
        self.engine = Some(engine);
        self
    }

    pub fn object(mut self, object: impl SceneObject + 'static) -> Self {
        self.objects.push(Box::new(object));
        self
    }

    /// Lay out the grass and shrubs for the surface and assemble the loop.
    pub fn build(self) -> Result<RenderLoop<S, F>> {
        let Some(surface) = self.surface else {
            log::error!("Render loop has no drawing surface");
            return Err(Error::MissingSurface);
        };
        let Some(scheduler) = self.scheduler else {
            log::error!("Render loop has no frame scheduler");
            return Err(Error::MissingScheduler);
        };

        let config = self.config;
        let mut engine = self.engine.unwrap_or_else(|| config.engine());
        let size = Vec2::new(surface.width() as f32, surface.height() as f32);

        let grass = GrassField::new(config.grass.clone(), size, &mut engine)?;
        let center = size / 2.0;
        let shrubs = config
            .shrubs
            .iter()
            .map(|placement| {
                let position = center + Vec2::from(placement.offset);
                ShrubLoop::new(position, config.shrub.clone(), engine.fork())
                    .into_cache(placement.size[0], placement.size[1], &config.frame_cache)
            })
            .collect::<Result<Vec<_>>>()?;

        log::info!(
            "Field {}x{}: {} clumps of {} blades, {} shrubs, {} objects",
            surface.width(), surface.height(), grass.clumps().len(), config.grass.num_blades,
            shrubs.len(), self.objects.len()
        );

        Ok(RenderLoop {
            config,
            surface,
            scheduler,
            engine,
            grass,
            shrubs,
            objects: self.objects,
            frame_rate: FrameRateCounter::new(),
            ticks: 0,
        })
    }
}

/// Drives the field one tick per scheduler frame.
pub struct RenderLoop<S: Surface, F: FrameScheduler> {
    config: FieldConfig,
    surface: S,
    scheduler: F,
    engine: DeviationEngine,
    grass: GrassField,
    shrubs: Vec<FrameCache<ShrubLoop>>,
    objects: Vec<Box<dyn SceneObject>>,
    frame_rate: FrameRateCounter,
    ticks: u64,
}

impl<S: Surface, F: FrameScheduler> RenderLoop<S, F> {
    /// Tick until the scheduler stops. Returns the number of ticks run.
    pub fn run(&mut self) -> Result<u64> {
        let start = self.ticks;
        while let Some(now) = self.scheduler.next_frame() {
            self.tick(now)?;
        }
        log::info!("Render loop stopped after {} ticks", self.ticks - start);
        Ok(self.ticks - start)
    }

    /// Compose one frame for timestamp `now`.
    pub fn tick(&mut self, now: Duration) -> Result<()> {
        let size = self.surface_size();

        self.surface.reset_transform();
        self.surface.clear();
        self.surface.fill_rect(Vec2::ZERO, size, self.config.background);

        for shrub in &mut self.shrubs {
            let position = shrub.source().position();
            let out = shrub.render()?;
            if let Some(bitmap) = out.bitmap {
                self.surface.draw_bitmap(bitmap, position);
            }
        }

        let presences = self.presences();
        self.grass.ensure_initialized(&mut self.engine)?;
        self.grass.update_and_draw(&mut self.surface, &presences, &mut self.engine)?;

        for object in &mut self.objects {
            object.update(size);
            object.draw(&mut self.surface);
        }

        let fps = self.frame_rate.record(now);
        if self.config.overlay {
            self.draw_overlay(fps);
        }

        self.ticks += 1;
        if self.ticks == 1 {
            log::debug!("First frame composed: {} blades", self.grass.blade_count());
        }
        Ok(())
    }

    fn draw_overlay(&mut self, fps: usize) {
        let lines = [fps.to_string(), self.surface.width().to_string(), self.surface.height().to_string()];
        for (text, origin) in lines.iter().zip(OVERLAY_LINES) {
            self.surface.fill_text(text, origin, OVERLAY_COLOR);
        }
    }

    /// Footprints of every scene object, as the grass sees them this tick.
    pub fn presences(&self) -> Vec<Presence> {
        self.objects.iter().map(|o| o.presence()).collect()
    }

    pub fn surface_size(&self) -> Vec2 {
        Vec2::new(self.surface.width() as f32, self.surface.height() as f32)
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn grass(&self) -> &GrassField {
        &self.grass
    }

    pub fn shrubs(&self) -> &[FrameCache<ShrubLoop>] {
        &self.shrubs
    }

    pub fn frame_rate(&self) -> &FrameRateCounter {
        &self.frame_rate
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grass::GrassConfig;
    use crate::scene::config::ShrubPlacement;
    use crate::surface::{RasterSurface, StrokeStyle};
    use std::cell::Cell;
    use std::rc::Rc;

    /// Stationary square that counts its updates.
    struct Marker {
        presence: Presence,
        updates: Rc<Cell<u32>>,
    }

    impl SceneObject for Marker {
        fn presence(&self) -> Presence {
            self.presence
        }

        fn update(&mut self, _surface_size: Vec2) {
            self.updates.set(self.updates.get() + 1);
        }

        fn draw(&self, surface: &mut dyn Surface) {
            let center = self.presence.center();
            surface.begin_path();
            surface.move_to(center - Vec2::new(2.0, 0.0));
            surface.line_to(center + Vec2::new(2.0, 0.0));
            surface.stroke(StrokeStyle::new(Rgba::rgb(200, 0, 0), 4.0));
        }
    }

    fn small_config() -> FieldConfig {
        FieldConfig {
            width: 200,
            height: 120,
            seed: Some(21),
            grass: GrassConfig { num_blades: 10, ..GrassConfig::default() },
            shrubs: vec![ShrubPlacement { offset: [-100.0, -60.0], size: [80, 50] }],
            ..FieldConfig::default()
        }
    }

    fn builder(config: FieldConfig) -> RenderLoopBuilder<RasterSurface, FixedStepScheduler> {
        let surface = RasterSurface::new(config.width, config.height).unwrap();
        RenderLoopBuilder::new(config).surface(surface)
    }

    #[test]
    fn test_missing_surface() {
        let result = RenderLoopBuilder::<RasterSurface, _>::new(small_config())
            .scheduler(FixedStepScheduler::at_fps(1, 60))
            .build();
        assert!(matches!(result, Err(Error::MissingSurface)));
    }

    #[test]
    fn test_missing_scheduler() {
        let result = builder(small_config()).build();
        assert!(matches!(result, Err(Error::MissingScheduler)));
    }

    #[test]
    fn test_fixed_step_scheduler() {
        let mut scheduler = FixedStepScheduler::new(3, Duration::from_millis(10));
        assert_eq!(scheduler.next_frame(), Some(Duration::ZERO));
        assert_eq!(scheduler.next_frame(), Some(Duration::from_millis(10)));
        assert_eq!(scheduler.remaining(), 1);
        assert_eq!(scheduler.next_frame(), Some(Duration::from_millis(20)));
        assert_eq!(scheduler.next_frame(), None);
    }

    #[test]
    fn test_run_until_scheduler_stops() {
        let mut render_loop = builder(small_config())
            .scheduler(FixedStepScheduler::at_fps(15, 60))
            .build()
            .unwrap();

        assert_eq!(render_loop.run().unwrap(), 15);
        assert_eq!(render_loop.ticks(), 15);
        assert_eq!(render_loop.grass().blade_count(), 30);
        assert_eq!(render_loop.frame_rate().fps(), 15);

        // Shrub capture stops at the frame budget
        let shrub = &render_loop.shrubs()[0];
        assert_eq!(shrub.render_pass(), 15);
        assert_eq!(shrub.bucket(0).unwrap().len(), 10);
        assert_eq!(shrub.source().position(), Vec2::new(0.0, 0.0));
    }

    #[test]
    fn test_objects_bend_grass_and_draw() {
        let updates = Rc::new(Cell::new(0));
        let marker = Marker { presence: Presence::new(100.0, 60.0, 1_000.0), updates: Rc::clone(&updates) };
        let mut render_loop = builder(FieldConfig { overlay: false, ..small_config() })
            .scheduler(FixedStepScheduler::at_fps(2, 60))
            .object(marker)
            .build()
            .unwrap();

        render_loop.run().unwrap();
        assert_eq!(updates.get(), 2);
        assert_eq!(render_loop.presences().len(), 1);

        let bent = render_loop.grass().rotations().bent;
        for clump in render_loop.grass().clumps() {
            assert!(clump.blades().iter().all(|b| b.rotation == bent));
        }
        assert_eq!(*render_loop.surface().pixels().get_pixel(100, 60), image::Rgba([200, 0, 0, 255]));
    }

    #[test]
    fn test_background_and_overlay() {
        let config = FieldConfig {
            grass: GrassConfig { num_blades: 0, ..GrassConfig::default() },
            shrubs: Vec::new(),
            ..small_config()
        };
        let mut render_loop = builder(config.clone())
            .scheduler(FixedStepScheduler::at_fps(1, 60))
            .build()
            .unwrap();
        render_loop.run().unwrap();

        let pixels = render_loop.into_surface().into_bitmap();
        assert_eq!(*pixels.get_pixel(150, 110), image::Rgba([14, 14, 14, 255]));
        // Top stroke of the "1" frame-rate glyph
        assert_eq!(*pixels.get_pixel(12, 10), image::Rgba([255, 255, 255, 255]));

        let mut quiet = builder(FieldConfig { overlay: false, ..config })
            .scheduler(FixedStepScheduler::at_fps(1, 60))
            .build()
            .unwrap();
        quiet.run().unwrap();
        assert_eq!(*quiet.surface().pixels().get_pixel(12, 10), image::Rgba([14, 14, 14, 255]));
    }

    #[test]
    fn test_final_frame_saves_as_png() {
        let mut render_loop = builder(small_config())
            .scheduler(FixedStepScheduler::at_fps(2, 60))
            .build()
            .unwrap();
        render_loop.run().unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("field.png");
        render_loop.surface().pixels().save(&path).unwrap();

        let loaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(loaded.dimensions(), (200, 120));
        assert_eq!(loaded, render_loop.surface().pixels());
    }

    #[test]
    fn test_seeded_runs_match() {
        let render = || {
            let mut render_loop = builder(small_config())
                .scheduler(FixedStepScheduler::at_fps(3, 60))
                .build()
                .unwrap();
            render_loop.run().unwrap();
            render_loop.into_surface().into_bitmap()
        };
        assert_eq!(render(), render());
    }
}
