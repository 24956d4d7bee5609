//! Presence collision and blade bend state.
//!
//! Grass reacts to anything in the scene that exposes a [`Presence`]: a
//! square footprint centered on the object. A blade whose origin falls
//! strictly inside any footprint is bent, otherwise it stands upright.

use serde::{Deserialize, Serialize};

use crate::core::Result;
use crate::core::types::Vec2;
use crate::math::{Bounds, DeviationEngine};

/// Square footprint of a scene object: side `width`, centered at `(x, y)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Presence {
    pub x: f32,
    pub y: f32,
    pub width: f32,
}

impl Presence {
    pub fn new(x: f32, y: f32, width: f32) -> Self {
        Self { x, y, width }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Bounding square of the presence
    pub fn bounds(&self) -> Bounds {
        Bounds::square(self.center(), self.width)
    }
}

/// Binary rotation mode of a blade.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BendState {
    #[default]
    Upright,
    Bent,
}

/// True if `point` lies strictly inside at least one presence.
pub fn is_covered(point: Vec2, presences: &[Presence]) -> bool {
    presences.iter().any(|p| p.bounds().strictly_contains(point))
}

/// Bend state for a blade rooted at `point`.
pub fn bend_state(point: Vec2, presences: &[Presence]) -> BendState {
    if is_covered(point, presences) {
        BendState::Bent
    } else {
        BendState::Upright
    }
}

/// Blade rotations (degrees) for each bend state.
///
/// Sampled once per field and shared by every clump for the whole run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BendRotations {
    pub upright: f32,
    pub bent: f32,
}

impl BendRotations {
    /// Draw the two rotations: bent leans roughly 70 degrees, upright roughly 30.
    pub fn sample(engine: &mut DeviationEngine) -> Result<Self> {
        let bent = -engine.deviate(70.0, 1.5, -1.5)?;
        let upright = -engine.deviate(30.0, 1.5, -1.5)?;
        Ok(Self { upright, bent })
    }

    pub fn rotation_for(&self, state: BendState) -> f32 {
        match state {
            BendState::Upright => self.upright,
            BendState::Bent => self.bent,
        }
    }
}
