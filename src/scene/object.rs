//! Dynamic objects that move through the field.

use crate::collision::Presence;
use crate::core::types::Vec2;
use crate::surface::Surface;

/// Anything that moves over the grass and bends the blades under it.
pub trait SceneObject {
    /// Square footprint the grass tests blade roots against this tick.
    fn presence(&self) -> Presence;

    /// Advance one tick on a surface of `surface_size`.
    fn update(&mut self, _surface_size: Vec2) {}

    fn draw(&self, surface: &mut dyn Surface);
}
