//! Software raster surface backed by a tiny-skia pixmap.

use std::f32::consts::PI;

use tiny_skia::{BlendMode, Color, ColorU8, Paint, PathBuilder, Pixmap, PixmapPaint, Point, Rect, Stroke, Transform};

use crate::core::types::Vec2;
use crate::core::{Error, Result, Rgba};
use crate::surface::glyphs::{self, GLYPH_HEIGHT, GLYPH_WIDTH};
use crate::surface::{Bitmap, StrokeStyle, Surface};

/// Pixels per glyph cell
const TEXT_SCALE: u32 = 2;

/// CPU surface drawing into a premultiplied [`Pixmap`].
///
/// Path points are mapped to device space as they are added, so a transform
/// change mid-path only affects later points (canvas semantics). Strokes are
/// aliased: pixel centers inside the stroke outline are painted, once per stroke.
pub struct RasterSurface {
    pixmap: Pixmap,
    transform: Transform,
    path: PathBuilder,
    /// Last path point in device space
    current: Option<Vec2>,
}

impl RasterSurface {
    /// Fully transparent surface. Fails for a zero dimension.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let pixmap = Pixmap::new(width, height).ok_or(Error::SurfaceSize { width, height })?;
        Ok(Self {
            pixmap,
            transform: Transform::identity(),
            path: PathBuilder::new(),
            current: None,
        })
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Current pixels with straight (non-premultiplied) alpha.
    pub fn pixels(&self) -> Bitmap {
        to_bitmap(&self.pixmap)
    }

    pub fn into_bitmap(self) -> Bitmap {
        to_bitmap(&self.pixmap)
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Last point of the current path in device space
    pub fn current_point(&self) -> Option<Vec2> {
        self.current
    }

    fn device_point(&self, p: Vec2) -> Vec2 {
        let mut points = [Point::from_xy(p.x, p.y)];
        self.transform.map_points(&mut points);
        Vec2::new(points[0].x, points[0].y)
    }

    /// Uniform scale factor of the current transform
    fn scale(&self) -> f32 {
        let origin = self.device_point(Vec2::ZERO);
        let x = self.device_point(Vec2::X) - origin;
        let y = self.device_point(Vec2::Y) - origin;
        x.perp_dot(y).abs().sqrt()
    }

    fn move_device(&mut self, p: Vec2) {
        self.path.move_to(p.x, p.y);
        self.current = Some(p);
    }

    fn line_device(&mut self, p: Vec2) {
        if self.current.is_none() {
            self.move_device(p);
            return;
        }
        self.path.line_to(p.x, p.y);
        self.current = Some(p);
    }

    fn fill_device_rect(&mut self, origin: Vec2, size: Vec2, paint: &Paint) {
        if let Some(rect) = Rect::from_xywh(origin.x, origin.y, size.x, size.y) {
            self.pixmap.fill_rect(rect, paint, Transform::identity(), None);
        }
    }
}

fn solid(color: Rgba) -> Paint<'static> {
    let [r, g, b, a] = color.to_rgba8();
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = false;
    paint
}

fn to_bitmap(pixmap: &Pixmap) -> Bitmap {
    let mut bitmap = Bitmap::new(pixmap.width(), pixmap.height());
    for (dst, src) in bitmap.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = image::Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    bitmap
}

/// Premultiplied copy of `bitmap`, or `None` if it is empty.
fn to_pixmap(bitmap: &Bitmap) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(bitmap.width(), bitmap.height())?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(bitmap.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Some(pixmap)
}

impl Surface for RasterSurface {
    fn width(&self) -> u32 {
        self.pixmap.width()
    }

    fn height(&self) -> u32 {
        self.pixmap.height()
    }

    fn begin_path(&mut self) {
        self.path = PathBuilder::new();
        self.current = None;
    }

    fn move_to(&mut self, p: Vec2) {
        let device = self.device_point(p);
        self.move_device(device);
    }

    fn line_to(&mut self, p: Vec2) {
        let device = self.device_point(p);
        self.line_device(device);
    }

    fn arc_to(&mut self, control: Vec2, end: Vec2, radius: f32) {
        let p1 = self.device_point(control);
        let Some(p0) = self.current else {
            self.move_device(p1);
            return;
        };
        let p2 = self.device_point(end);
        let r = radius.abs() * self.scale();

        let u1 = (p0 - p1).normalize_or_zero();
        let u2 = (p2 - p1).normalize_or_zero();
        let cos = u1.dot(u2).clamp(-1.0, 1.0);

        // Degenerate corner: canvas falls back to a straight line to the control point
        if r <= f32::EPSILON || u1 == Vec2::ZERO || u2 == Vec2::ZERO || 1.0 - cos.abs() < 1e-6 {
            self.line_device(p1);
            return;
        }

        let half_angle = cos.acos() * 0.5;
        let tangent = r / half_angle.tan();
        let t1 = p1 + u1 * tangent;
        let t2 = p1 + u2 * tangent;

        // One cubic per arc; the sweep is always below a half turn
        let sweep = PI - 2.0 * half_angle;
        let handle = 4.0 / 3.0 * (sweep / 4.0).tan() * r;
        let c1 = t1 - u1 * handle;
        let c2 = t2 - u2 * handle;

        self.line_device(t1);
        self.path.cubic_to(c1.x, c1.y, c2.x, c2.y, t2.x, t2.y);
        self.current = Some(t2);
    }

    fn stroke(&mut self, style: StrokeStyle) {
        let Some(path) = self.path.clone().finish() else { return };
        let stroke = Stroke {
            width: (style.width * self.scale()).max(1.0),
            ..Stroke::default()
        };
        self.pixmap.stroke_path(&path, &solid(style.color), &stroke, Transform::identity(), None);
    }

    fn translate(&mut self, offset: Vec2) {
        self.transform = self.transform.pre_concat(Transform::from_translate(offset.x, offset.y));
    }

    fn rotate(&mut self, radians: f32) {
        self.transform = self.transform.pre_concat(Transform::from_rotate(radians.to_degrees()));
    }

    fn reset_transform(&mut self) {
        self.transform = Transform::identity();
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Rgba) {
        self.fill_device_rect(origin, size, &solid(color));
    }

    fn clear_rect(&mut self, origin: Vec2, size: Vec2) {
        let mut paint = solid(Rgba::TRANSPARENT);
        paint.blend_mode = BlendMode::Clear;
        self.fill_device_rect(origin, size, &paint);
    }

    fn fill_text(&mut self, text: &str, origin: Vec2, color: Rgba) {
        let paint = solid(color);
        let cell = TEXT_SCALE as f32;
        let top = origin.y - (GLYPH_HEIGHT * TEXT_SCALE) as f32;

        for (i, c) in text.chars().enumerate() {
            let Some(rows) = glyphs::glyph(c) else { continue };
            let left = origin.x + (i as u32 * (GLYPH_WIDTH + 1) * TEXT_SCALE) as f32;
            for row in 0..GLYPH_HEIGHT {
                for col in 0..GLYPH_WIDTH {
                    if glyphs::is_lit(rows, col, row) {
                        let at = Vec2::new(left + col as f32 * cell, top + row as f32 * cell);
                        self.fill_device_rect(at, Vec2::splat(cell), &paint);
                    }
                }
            }
        }
    }

    fn draw_bitmap(&mut self, bitmap: &Bitmap, origin: Vec2) {
        let Some(sprite) = to_pixmap(bitmap) else { return };
        self.pixmap.draw_pixmap(
            origin.x.round() as i32,
            origin.y.round() as i32,
            sprite.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
    }

    fn capture(&self) -> Bitmap {
        to_bitmap(&self.pixmap)
    }

    fn clear(&mut self) {
        self.pixmap.fill(Color::TRANSPARENT);
    }
}
