//! Padding - insets around a single child.

use super::context::LayoutCx;
use super::object::RenderObject;
use crate::error::LayoutResult;
use crate::layout::EdgeInsets;
use crate::primitives::{Offset, Size};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Padding {
    pub insets: EdgeInsets,
}

impl Padding {
    pub fn new(insets: EdgeInsets) -> Self {
        Self { insets }
    }
}

impl RenderObject for Padding {
    fn kind_name(&self) -> &'static str {
        "Padding"
    }

    fn max_children(&self) -> Option<usize> {
        Some(1)
    }

    fn perform_layout(&mut self, cx: &mut LayoutCx<'_>) -> LayoutResult<Size> {
        let constraints = cx.constraints();
        let insets = self.insets.total();

        let Some(child) = cx.only_child() else {
            return Ok(constraints.constrain(insets));
        };

        let child_size = cx.layout_child(child, constraints.deflate(&self.insets), true)?;
        cx.set_child_offset(child, self.insets.top_left());
        Ok(constraints.constrain(Size::new(
            child_size.width + insets.width,
            child_size.height + insets.height,
        )))
    }
}
