//! Immediate-mode 2D drawing surface.
//!
//! Everything in the field draws through the [`Surface`] trait: paths are
//! built in local coordinates under the current affine transform, stroked,
//! and the transform is reset after every entity. [`RasterSurface`] is the
//! software implementation used for offscreen frame caches and headless runs.

pub mod glyphs;
pub mod raster;

pub use raster::RasterSurface;

use crate::core::Rgba;
use crate::core::types::Vec2;

/// Captured pixels of a surface.
pub type Bitmap = image::RgbaImage;

/// Color and width used when stroking a path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    pub color: Rgba,
    pub width: f32,
}

impl StrokeStyle {
    pub fn new(color: Rgba, width: f32) -> Self {
        Self { color, width }
    }
}

/// 2D raster drawing surface.
///
/// Path points and transforms follow HTML canvas conventions: y grows
/// downward, rotations are in radians and positive angles turn clockwise on
/// screen. Rectangle fills, text, and bitmap blits use device coordinates
/// and ignore the current transform.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Discard the current path.
    fn begin_path(&mut self);
    /// Start a new subpath at `p`.
    fn move_to(&mut self, p: Vec2);
    /// Straight segment from the current point to `p`.
    fn line_to(&mut self, p: Vec2);
    /// Canvas `arcTo`: a line toward `control` ending in a circular arc of
    /// `radius` tangent to both `current -> control` and `control -> end`.
    fn arc_to(&mut self, control: Vec2, end: Vec2, radius: f32);
    /// Stroke the current path.
    fn stroke(&mut self, style: StrokeStyle);

    fn translate(&mut self, offset: Vec2);
    fn rotate(&mut self, radians: f32);
    fn reset_transform(&mut self);

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Rgba);
    /// Set the rectangle to fully transparent.
    fn clear_rect(&mut self, origin: Vec2, size: Vec2);
    /// Draw `text` with its baseline-left corner at `origin`.
    fn fill_text(&mut self, text: &str, origin: Vec2, color: Rgba);
    /// Composite `bitmap` over the surface with its top-left at `origin`.
    fn draw_bitmap(&mut self, bitmap: &Bitmap, origin: Vec2);
    /// Copy of the current pixels.
    fn capture(&self) -> Bitmap;

    /// Clear the whole surface.
    fn clear(&mut self) {
        let size = Vec2::new(self.width() as f32, self.height() as f32);
        self.clear_rect(Vec2::ZERO, size);
    }
}
