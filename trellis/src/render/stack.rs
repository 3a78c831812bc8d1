//! Stack and IndexedStack - overlay containers.
//!
//! Layout runs in three passes:
//!
//! 1. size every child (positioned children with constraints derived from
//!    their [`PositionedSpec`]),
//! 2. fix the stack size and re-lay out positioned children whose placement
//!    depends on it (edge stretching, anchored children under expand),
//! 3. place every child.
//!
//! Children paint in list order and are hit-tested in reverse.

use super::context::LayoutCx;
use super::hit_test::HitTestCx;
use super::object::RenderObject;
use super::paint::PaintContext;
use super::positioned::PositionedSpec;
use super::tree::NodeId;
use crate::error::LayoutResult;
use crate::layout::{Alignment, BoxConstraints, StackFit};
use crate::primitives::{Offset, Rect, Size};

/// Children layered on top of each other.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Stack {
    /// Placement of non-positioned children, and of positioned children on
    /// axes with no edge set.
    pub alignment: Alignment,
    pub fit: StackFit,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn fit(mut self, fit: StackFit) -> Self {
        self.fit = fit;
        self
    }
}

impl RenderObject for Stack {
    fn kind_name(&self) -> &'static str {
        "Stack"
    }

    fn perform_layout(&mut self, cx: &mut LayoutCx<'_>) -> LayoutResult<Size> {
        let children = cx.children();
        layout_stack(cx, &children, self.alignment, self.fit)
    }
}

/// A stack that shows one child at a time.
///
/// Under [`StackFit::Expand`] only the active child is laid out, so pages
/// that are not visible cost nothing. Under [`StackFit::Loose`] every child
/// is laid out so the stack keeps a stable size when the index changes.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IndexedStack {
    pub index: usize,
    pub alignment: Alignment,
    pub fit: StackFit,
}

impl IndexedStack {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            ..Default::default()
        }
    }

    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn fit(mut self, fit: StackFit) -> Self {
        self.fit = fit;
        self
    }
}

impl RenderObject for IndexedStack {
    fn kind_name(&self) -> &'static str {
        "IndexedStack"
    }

    fn perform_layout(&mut self, cx: &mut LayoutCx<'_>) -> LayoutResult<Size> {
        let children = cx.children();
        if self.fit == StackFit::Loose {
            return layout_stack(cx, &children, self.alignment, self.fit);
        }

        let constraints = cx.constraints();
        let size = constraints.biggest();
        let Some(&active) = children.get(self.index) else {
            return Ok(size);
        };

        cx.layout_child(active, BoxConstraints::tight(size.width, size.height), true)?;
        match cx.positioned(active) {
            Some(spec) => finish_positioned(cx, active, &spec, size, self.alignment, true)?,
            None => {
                let offset = self.alignment.within_rect(
                    Rect::from_size(size),
                    cx.child_size(active),
                );
                cx.set_child_offset(active, offset);
            }
        }
        Ok(size)
    }

    fn paint(&self, cx: &mut PaintContext<'_>) {
        if let Some(&child) = cx.children().get(self.index) {
            let offset = cx.child_offset(child);
            cx.paint_child(child, offset);
        }
    }

    fn hit_test(&self, cx: &mut HitTestCx<'_>, position: Offset) -> bool {
        if !cx.contains(position) {
            return false;
        }
        let Some(&child) = cx.children().get(self.index) else {
            return false;
        };
        cx.hit_test_child(child, position);
        cx.add_self(position);
        true
    }
}

/// Shared three-pass stack layout over `children`.
fn layout_stack(
    cx: &mut LayoutCx<'_>,
    children: &[NodeId],
    alignment: Alignment,
    fit: StackFit,
) -> LayoutResult<Size> {
    let constraints = cx.constraints();
    let expand = fit == StackFit::Expand;

    // =========================================================================
    // First pass: size children
    // =========================================================================

    let mut specs = Vec::with_capacity(children.len());
    let mut max_width = 0.0f32;
    let mut max_height = 0.0f32;

    for &child in children {
        let spec = cx.positioned(child);
        let child_constraints = match (&spec, expand) {
            (_, true) => constraints.expand(),
            (Some(spec), false) => spec.first_pass_constraints(constraints),
            (None, false) => constraints.loosen(),
        };
        let size = cx.layout_child(child, child_constraints, true)?;
        max_width = max_width.max(size.width);
        max_height = max_height.max(size.height);
        specs.push(spec);
    }

    let size = if expand {
        constraints.biggest()
    } else {
        constraints.constrain(Size::new(max_width, max_height))
    };

    // =========================================================================
    // Second and third pass: resolve positioned children, place everything
    // =========================================================================

    let bounds = Rect::from_size(size);
    for (&child, spec) in children.iter().zip(&specs) {
        match spec {
            Some(spec) => finish_positioned(cx, child, spec, size, alignment, expand)?,
            None => {
                let offset = alignment.within_rect(bounds, cx.child_size(child));
                cx.set_child_offset(child, offset);
            }
        }
    }

    Ok(size)
}

/// Re-lay out a positioned child against the final stack size if needed,
/// then store its offset.
fn finish_positioned(
    cx: &mut LayoutCx<'_>,
    child: NodeId,
    spec: &PositionedSpec,
    stack: Size,
    alignment: Alignment,
    expand: bool,
) -> LayoutResult<()> {
    if expand && spec.is_anchored() {
        cx.layout_child(child, spec.natural_constraints(stack), true)?;
    }
    if let Some(constraints) = spec.stretch_constraints(stack, cx.child_size(child)) {
        cx.layout_child(child, constraints, true)?;
    }
    let offset = spec.offset(stack, cx.child_size(child), alignment);
    cx.set_child_offset(child, offset);
    Ok(())
}
