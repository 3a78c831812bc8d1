//! ColoredBox - solid background behind an optional child.

use super::context::LayoutCx;
use super::object::RenderObject;
use super::paint::PaintContext;
use crate::canvas::Paint;
use crate::error::LayoutResult;
use crate::primitives::{Color, Rect, Size};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColoredBox {
    pub color: Color,
}

impl ColoredBox {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl RenderObject for ColoredBox {
    fn kind_name(&self) -> &'static str {
        "ColoredBox"
    }

    fn max_children(&self) -> Option<usize> {
        Some(1)
    }

    fn perform_layout(&mut self, cx: &mut LayoutCx<'_>) -> LayoutResult<Size> {
        if cx.only_child().is_some() {
            return cx.layout_passthrough();
        }
        Ok(cx.constraints().biggest())
    }

    fn paint(&self, cx: &mut PaintContext<'_>) {
        let size = cx.size();
        if !size.is_empty() && self.color.a > 0.0 {
            cx.canvas().draw_rect(Rect::from_size(size), &Paint::fill(self.color));
        }
        cx.paint_children();
    }
}
