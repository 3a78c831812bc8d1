//! Canvas abstraction and recorded display lists.
//!
//! The render tree never rasterizes anything. It sequences calls on a
//! [`Canvas`] supplied by the paint backend. [`DisplayList`] is a canvas that
//! records those calls so they can be replayed later, which is how repaint
//! boundaries cache their output.

use serde::Serialize;

use crate::primitives::{Color, Offset, Rect};

/// Fill or stroke.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum PaintStyle {
    #[default]
    Fill,
    Stroke,
}

/// How a shape is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Paint {
    pub color: Color,
    pub style: PaintStyle,
    pub stroke_width: f32,
}

impl Paint {
    pub fn fill(color: Color) -> Self {
        Self {
            color,
            style: PaintStyle::Fill,
            stroke_width: 0.0,
        }
    }

    pub fn stroke(color: Color, width: f32) -> Self {
        Self {
            color,
            style: PaintStyle::Stroke,
            stroke_width: width,
        }
    }
}

/// A polyline path in local coordinates.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Path {
    pub points: Vec<Offset>,
    pub closed: bool,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line_to(mut self, point: Offset) -> Self {
        self.points.push(point);
        self
    }

    pub fn close(mut self) -> Self {
        self.closed = true;
        self
    }
}

/// Opaque handle to an image owned by the paint backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ImageHandle(pub u32);

/// Drawing surface implemented by a paint backend.
///
/// `save`/`restore` scope both the translation and the clip.
pub trait Canvas {
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, offset: Offset);
    fn clip_rect(&mut self, rect: Rect);
    fn draw_rect(&mut self, rect: Rect, paint: &Paint);
    fn draw_rounded_rect(&mut self, rect: Rect, radius: f32, paint: &Paint);
    fn draw_path(&mut self, path: &Path, paint: &Paint);
    fn draw_text(&mut self, text: &str, origin: Offset, font_size: f32, color: Color);
    fn draw_image(&mut self, image: ImageHandle, rect: Rect);
}

/// One recorded canvas call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    Save,
    Restore,
    Translate { offset: Offset },
    ClipRect { rect: Rect },
    Rect { rect: Rect, paint: Paint },
    RoundedRect { rect: Rect, radius: f32, paint: Paint },
    Path { path: Path, paint: Paint },
    Text { text: String, origin: Offset, font_size: f32, color: Color },
    Image { image: ImageHandle, rect: Rect },
}

/// A recording canvas.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DisplayList {
    ops: Vec<DrawOp>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// Replay every recorded call onto `canvas`, in order.
    pub fn replay(&self, canvas: &mut dyn Canvas) {
        for op in &self.ops {
            match op {
                DrawOp::Save => canvas.save(),
                DrawOp::Restore => canvas.restore(),
                DrawOp::Translate { offset } => canvas.translate(*offset),
                DrawOp::ClipRect { rect } => canvas.clip_rect(*rect),
                DrawOp::Rect { rect, paint } => canvas.draw_rect(*rect, paint),
                DrawOp::RoundedRect { rect, radius, paint } => {
                    canvas.draw_rounded_rect(*rect, *radius, paint)
                }
                DrawOp::Path { path, paint } => canvas.draw_path(path, paint),
                DrawOp::Text {
                    text,
                    origin,
                    font_size,
                    color,
                } => canvas.draw_text(text, *origin, *font_size, *color),
                DrawOp::Image { image, rect } => canvas.draw_image(*image, *rect),
            }
        }
    }

    /// Filled rects in global coordinates, resolving recorded translations.
    ///
    /// Used by tests and the inspector to check what landed where.
    pub fn filled_rects(&self) -> Vec<(Rect, Color)> {
        let mut origin = Offset::ZERO;
        let mut saved = Vec::new();
        let mut out = Vec::new();
        for op in &self.ops {
            match op {
                DrawOp::Save => saved.push(origin),
                DrawOp::Restore => origin = saved.pop().unwrap_or(Offset::ZERO),
                DrawOp::Translate { offset } => origin = origin + *offset,
                DrawOp::Rect { rect, paint } if paint.style == PaintStyle::Fill => {
                    out.push((rect.translate(origin), paint.color));
                }
                _ => {}
            }
        }
        out
    }
}

impl Canvas for DisplayList {
    fn save(&mut self) {
        self.ops.push(DrawOp::Save);
    }

    fn restore(&mut self) {
        self.ops.push(DrawOp::Restore);
    }

    fn translate(&mut self, offset: Offset) {
        self.ops.push(DrawOp::Translate { offset });
    }

    fn clip_rect(&mut self, rect: Rect) {
        self.ops.push(DrawOp::ClipRect { rect });
    }

    fn draw_rect(&mut self, rect: Rect, paint: &Paint) {
        self.ops.push(DrawOp::Rect { rect, paint: *paint });
    }

    fn draw_rounded_rect(&mut self, rect: Rect, radius: f32, paint: &Paint) {
        self.ops.push(DrawOp::RoundedRect {
            rect,
            radius,
            paint: *paint,
        });
    }

    fn draw_path(&mut self, path: &Path, paint: &Paint) {
        self.ops.push(DrawOp::Path {
            path: path.clone(),
            paint: *paint,
        });
    }

    fn draw_text(&mut self, text: &str, origin: Offset, font_size: f32, color: Color) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            origin,
            font_size,
            color,
        });
    }

    fn draw_image(&mut self, image: ImageHandle, rect: Rect) {
        self.ops.push(DrawOp::Image { image, rect });
    }
}
