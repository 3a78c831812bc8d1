//! Align - positions a single child inside itself.

use super::context::LayoutCx;
use super::object::RenderObject;
use crate::error::LayoutResult;
use crate::layout::Alignment;
use crate::primitives::{Rect, Size};

/// Places its child by [`Alignment`].
///
/// On a bounded axis without a factor the box fills the available space. On
/// an unbounded axis, or when a factor is set, it is the child's extent times
/// the factor.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Align {
    pub alignment: Alignment,
    pub width_factor: Option<f32>,
    pub height_factor: Option<f32>,
}

impl Align {
    pub fn new(alignment: Alignment) -> Self {
        Self {
            alignment,
            ..Default::default()
        }
    }

    /// Centers the child.
    pub fn center() -> Self {
        Self::new(Alignment::CENTER)
    }

    pub fn width_factor(mut self, factor: f32) -> Self {
        self.width_factor = Some(factor.max(0.0));
        self
    }

    pub fn height_factor(mut self, factor: f32) -> Self {
        self.height_factor = Some(factor.max(0.0));
        self
    }
}

impl RenderObject for Align {
    fn kind_name(&self) -> &'static str {
        if self.alignment == Alignment::CENTER {
            "Center"
        } else {
            "Align"
        }
    }

    fn max_children(&self) -> Option<usize> {
        Some(1)
    }

    fn perform_layout(&mut self, cx: &mut LayoutCx<'_>) -> LayoutResult<Size> {
        let constraints = cx.constraints();
        let child = cx.only_child();
        let child_size = match child {
            Some(child) => cx.layout_child(child, constraints.loosen(), true)?,
            None => Size::ZERO,
        };

        let extent = |factor: Option<f32>, max: f32, child: f32| match factor {
            None if max.is_finite() => max,
            factor => child * factor.unwrap_or(1.0),
        };
        let size = constraints.constrain(Size::new(
            extent(self.width_factor, constraints.max_width, child_size.width),
            extent(self.height_factor, constraints.max_height, child_size.height),
        ));

        if let Some(child) = child {
            let offset = self.alignment.within_rect(Rect::from_size(size), child_size);
            cx.set_child_offset(child, offset);
        }
        Ok(size)
    }
}
