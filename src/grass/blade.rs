//! Single grass blade: creation, per-tick random walk, and stroking.

use crate::collision::{self, BendRotations, BendState, Presence};
use crate::core::types::Vec2;
use crate::core::{Result, Rgba};
use crate::grass::config::GrassConfig;
use crate::math::{clamp, DeviationEngine};
use crate::surface::{StrokeStyle, Surface};

/// Walk limit for the near control point's x.
pub const NEAR_LIMIT: f32 = 10.0;
/// Walk limit for the far control point's x.
pub const FAR_LIMIT: f32 = 50.0;

/// One curved blade rooted at `origin`.
///
/// `near` and `far` are the local arc-to control points, drawn after the
/// blade is rotated about its origin.
#[derive(Clone, Debug, PartialEq)]
pub struct GrassBlade {
    /// Direction the blade curls toward: -1.0 (left) or 1.0 (right).
    pub facing: f32,
    pub height: f32,
    pub origin: Vec2,
    pub near: Vec2,
    pub far: Vec2,
    pub radius: f32,
    pub color: Rgba,
    pub line_width: f32,
    /// Current rotation in degrees.
    pub rotation: f32,
}

impl GrassBlade {
    /// Create a blade scattered around `origin`, standing upright.
    pub fn create(
        origin: Vec2,
        base_color: Rgba,
        config: &GrassConfig,
        rotations: &BendRotations,
        engine: &mut DeviationEngine,
    ) -> Result<Self> {
        let x = engine.deviate(origin.x, 1.5, 0.5)?;
        let y = origin.y + engine.deviate(1.0, 1.0, 0.0)? * engine.sign();
        let facing = engine.sign();
        let height = engine.deviate(config.blade_height, 2.0, 0.3)?;
        let shade = engine.deviate(5.0, 1.0, -1.0)? * engine.sign();
        let alpha = 0.5 + engine.deviate(0.25, 1.5, 0.5)?;

        Ok(Self {
            facing,
            height,
            origin: Vec2::new(x, y),
            near: Vec2::new(5.0 * facing, -height / 2.0),
            far: Vec2::new(35.0 * facing, -height),
            radius: engine.deviate(config.arc_radius, 1.5, 0.5)?,
            color: base_color.shifted(shade).with_alpha(alpha),
            line_width: config.line_width,
            rotation: rotations.upright,
        })
    }

    /// Advance the control-point random walk and pick the bend state.
    pub fn update(
        &mut self,
        presences: &[Presence],
        rotations: &BendRotations,
        engine: &mut DeviationEngine,
    ) -> Result<BendState> {
        let shift = engine.deviate(0.5, 1.0, -1.0)? * engine.sign();
        self.near.x = clamp(self.near.x + shift, NEAR_LIMIT, -NEAR_LIMIT);
        self.far.x = clamp(self.far.x + shift, FAR_LIMIT, -FAR_LIMIT);

        let state = collision::bend_state(self.origin, presences);
        self.rotation = rotations.rotation_for(state);
        Ok(state)
    }

    /// Stroke the blade. The surface transform is reset afterwards.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.begin_path();
        surface.translate(self.origin);
        surface.move_to(Vec2::ZERO);
        surface.rotate(self.rotation.to_radians());
        surface.arc_to(self.near, self.far, self.radius);
        surface.stroke(StrokeStyle::new(self.color, self.line_width));
        surface.reset_transform();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grass::config::STRAW;
    use crate::surface::RasterSurface;

    fn setup(seed: u64) -> (DeviationEngine, BendRotations, GrassConfig) {
        let mut engine = DeviationEngine::from_seed(seed);
        let rotations = BendRotations::sample(&mut engine).unwrap();
        (engine, rotations, GrassConfig::default())
    }

    #[test]
    fn test_control_points_follow_facing() {
        let (mut engine, rotations, config) = setup(1);
        for _ in 0..500 {
            let b = GrassBlade::create(Vec2::new(200.0, 150.0), STRAW, &config, &rotations, &mut engine).unwrap();
            assert!(b.facing == 1.0 || b.facing == -1.0);
            assert_eq!(b.near.x.signum(), b.facing);
            assert_eq!(b.far.x.signum(), b.facing);
            assert_eq!(b.near.y, -b.height / 2.0);
            assert_eq!(b.far.y, -b.height);
        }
    }

    #[test]
    fn test_created_blade_ranges() {
        let (mut engine, rotations, config) = setup(2);
        for _ in 0..500 {
            let b = GrassBlade::create(Vec2::new(200.0, 150.0), STRAW, &config, &rotations, &mut engine).unwrap();
            assert!(b.origin.x > 100.0 && b.origin.x <= 300.0);
            assert!((b.origin.y - 150.0).abs() <= 1.0 && (b.origin.y - 150.0).abs() >= 0.5);
            assert!(b.height > 36.0 && b.height < 180.0);
            assert!(b.radius > 15.0 && b.radius <= 45.0);
            assert!(b.color.a > 0.5 && b.color.a <= 0.875);
            assert!((b.color.r - STRAW.r).abs() <= 5.0);
            assert!((b.color.g - STRAW.g).abs() <= 5.0);
            assert_eq!(b.rotation, rotations.upright);
        }
    }

    #[test]
    fn test_random_walk_stays_clamped() {
        let (mut engine, rotations, config) = setup(3);
        let mut b = GrassBlade::create(Vec2::new(50.0, 50.0), STRAW, &config, &rotations, &mut engine).unwrap();
        for _ in 0..5_000 {
            b.update(&[], &rotations, &mut engine).unwrap();
            assert!((-NEAR_LIMIT..=NEAR_LIMIT).contains(&b.near.x));
            assert!((-FAR_LIMIT..=FAR_LIMIT).contains(&b.far.x));
        }
    }

    #[test]
    fn test_bends_only_when_strictly_covered() {
        let (mut engine, rotations, config) = setup(4);
        let mut b = GrassBlade::create(Vec2::new(50.0, 50.0), STRAW, &config, &rotations, &mut engine).unwrap();
        b.origin = Vec2::new(50.0, 50.0);
        let origin = b.origin;

        let over = [Presence::new(origin.x, origin.y, 20.0)];
        assert_eq!(b.update(&over, &rotations, &mut engine).unwrap(), BendState::Bent);
        assert_eq!(b.rotation, rotations.bent);

        // Presence edge exactly on the blade origin
        let edge = [Presence::new(origin.x + 10.0, origin.y, 20.0)];
        assert_eq!(b.update(&edge, &rotations, &mut engine).unwrap(), BendState::Upright);
        assert_eq!(b.rotation, rotations.upright);

        let far_away = [Presence::new(origin.x + 100.0, origin.y, 20.0)];
        b.update(&far_away, &rotations, &mut engine).unwrap();
        assert_eq!(b.rotation, rotations.upright);
    }

    #[test]
    fn test_draw_paints_and_resets_transform() {
        let (mut engine, rotations, config) = setup(5);
        let b = GrassBlade::create(Vec2::new(100.0, 150.0), STRAW, &config, &rotations, &mut engine).unwrap();
        let mut surface = RasterSurface::new(200, 200).unwrap();
        b.draw(&mut surface);

        assert_eq!(surface.transform(), tiny_skia::Transform::identity());
        assert!(surface.pixels().pixels().any(|p| p[3] > 0));
    }
}
