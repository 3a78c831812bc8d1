//! SizedBox - fixed dimensions on either axis.

use super::context::LayoutCx;
use super::object::RenderObject;
use crate::error::LayoutResult;
use crate::primitives::{Offset, Size};

/// A box with an optional explicit width and height.
///
/// Explicit dimensions are clamped into the incoming constraints and made
/// tight for the child; the other axis is sized by the child.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SizedBox {
    pub width: Option<f32>,
    pub height: Option<f32>,
}

impl SizedBox {
    pub fn new(width: Option<f32>, height: Option<f32>) -> Self {
        Self { width, height }
    }

    /// Zero-sized box.
    pub fn shrink() -> Self {
        Self::new(Some(0.0), Some(0.0))
    }

    /// As large as the constraints allow on bounded axes.
    pub fn expand() -> Self {
        Self::new(Some(f32::INFINITY), Some(f32::INFINITY))
    }
}

impl RenderObject for SizedBox {
    fn kind_name(&self) -> &'static str {
        "SizedBox"
    }

    fn max_children(&self) -> Option<usize> {
        Some(1)
    }

    fn perform_layout(&mut self, cx: &mut LayoutCx<'_>) -> LayoutResult<Size> {
        let incoming = cx.constraints();
        // An infinite request means "as big as allowed".
        let width = self.width.map(|w| if w.is_finite() { w } else { incoming.max_width });
        let height = self.height.map(|h| if h.is_finite() { h } else { incoming.max_height });
        let constraints = incoming.tighten(width, height);

        match cx.only_child() {
            Some(child) => {
                let size = cx.layout_child(child, constraints, true)?;
                cx.set_child_offset(child, Offset::ZERO);
                Ok(constraints.constrain(size))
            }
            None => Ok(constraints.constrain(Size::new(
                width.unwrap_or(0.0),
                height.unwrap_or(0.0),
            ))),
        }
    }
}
