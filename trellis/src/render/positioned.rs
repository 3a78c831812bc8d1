//! Positioned - placement policy for one child of a stack.
//!
//! Two modes:
//!
//! - **Absolute** (no anchor): `left`/`top`/`right`/`bottom` are distances
//!   from the stack's edges. They shrink the child's constraints, and a pair
//!   of opposite edges without an explicit dimension stretches the child
//!   once the stack's size is known.
//! - **Anchored** (`alignment` set): the edges are offsets from the anchor
//!   point (`left`/`top` positive, `right`/`bottom` negative) and never touch
//!   constraints.

use super::context::LayoutCx;
use super::hit_test::HitTestCx;
use super::object::RenderObject;
use crate::error::LayoutResult;
use crate::layout::{Alignment, BoxConstraints};
use crate::primitives::{Offset, Rect, Size};

/// Value-comparable placement configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PositionedSpec {
    pub left: Option<f32>,
    pub top: Option<f32>,
    pub right: Option<f32>,
    pub bottom: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub alignment: Option<Alignment>,
}

impl PositionedSpec {
    pub fn is_anchored(&self) -> bool {
        self.alignment.is_some()
    }

    /// Both horizontal edges set, no width, absolute mode.
    pub fn stretches_width(&self) -> bool {
        !self.is_anchored() && self.width.is_none() && self.left.is_some() && self.right.is_some()
    }

    /// Both vertical edges set, no height, absolute mode.
    pub fn stretches_height(&self) -> bool {
        !self.is_anchored() && self.height.is_none() && self.top.is_some() && self.bottom.is_some()
    }

    /// Constraints for the sizing pass, before the stack size is known.
    pub fn first_pass_constraints(&self, stack: BoxConstraints) -> BoxConstraints {
        let (min_width, max_width) = self.first_pass_axis(
            self.width,
            self.left,
            self.right,
            stack.max_width,
        );
        let (min_height, max_height) = self.first_pass_axis(
            self.height,
            self.top,
            self.bottom,
            stack.max_height,
        );
        BoxConstraints::new(min_width, max_width, min_height, max_height)
    }

    fn first_pass_axis(
        &self,
        extent: Option<f32>,
        leading: Option<f32>,
        trailing: Option<f32>,
        max: f32,
    ) -> (f32, f32) {
        if let Some(extent) = extent {
            let extent = extent.max(0.0);
            return (extent, extent);
        }
        if self.is_anchored() {
            return (0.0, max);
        }
        match (leading, trailing) {
            // Stretch: resolved in the second pass.
            (Some(_), Some(_)) => (0.0, max),
            (leading, trailing) => {
                let reduced = max - leading.unwrap_or(0.0) - trailing.unwrap_or(0.0);
                (0.0, reduced.max(0.0))
            }
        }
    }

    /// Loose constraints against the final stack size, keeping explicit
    /// dimensions tight. Anchored children are re-laid out with these when an
    /// expanding stack forced them to its full size in the first pass.
    pub fn natural_constraints(&self, stack: Size) -> BoxConstraints {
        let (min_width, max_width) = self.width.map_or((0.0, stack.width), |w| (w.max(0.0), w.max(0.0)));
        let (min_height, max_height) = self.height.map_or((0.0, stack.height), |h| (h.max(0.0), h.max(0.0)));
        BoxConstraints::new(min_width, max_width, min_height, max_height)
    }

    /// Constraints that resolve edge stretching against the final stack size,
    /// or `None` if neither axis stretches. The other axis keeps the size the
    /// child already has.
    pub fn stretch_constraints(&self, stack: Size, current: Size) -> Option<BoxConstraints> {
        let stretch_w = self.stretches_width();
        let stretch_h = self.stretches_height();
        if !stretch_w && !stretch_h {
            return None;
        }

        let (min_width, max_width) = if stretch_w {
            let w = (stack.width - self.left.unwrap_or(0.0) - self.right.unwrap_or(0.0)).max(0.0);
            (w, w)
        } else {
            (0.0, current.width)
        };
        let (min_height, max_height) = if stretch_h {
            let h = (stack.height - self.top.unwrap_or(0.0) - self.bottom.unwrap_or(0.0)).max(0.0);
            (h, h)
        } else {
            (0.0, current.height)
        };
        Some(BoxConstraints::new(min_width, max_width, min_height, max_height))
    }

    /// Where a child of `child` size lands inside a stack of `stack` size.
    /// `fallback` places axes with no edge set in absolute mode.
    pub fn offset(&self, stack: Size, child: Size, fallback: Alignment) -> Offset {
        let bounds = Rect::from_size(stack);

        if let Some(anchor) = self.alignment {
            let point = anchor.resolve(bounds);
            let x = point.x - child.width / 2.0 + self.left.unwrap_or(0.0) - self.right.unwrap_or(0.0);
            let y = point.y - child.height / 2.0 + self.top.unwrap_or(0.0) - self.bottom.unwrap_or(0.0);
            return Offset::new(x, y);
        }

        let aligned = fallback.within_rect(bounds, child);
        let x = match (self.left, self.right) {
            (Some(left), _) => left,
            (None, Some(right)) => stack.width - right - child.width,
            (None, None) => aligned.x,
        };
        let y = match (self.top, self.bottom) {
            (Some(top), _) => top,
            (None, Some(bottom)) => stack.height - bottom - child.height,
            (None, None) => aligned.y,
        };
        Offset::new(x, y)
    }
}

/// Wraps one stack child with a [`PositionedSpec`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Positioned {
    pub spec: PositionedSpec,
}

impl Positioned {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stretch over the whole stack.
    pub fn fill() -> Self {
        Self::new().left(0.0).top(0.0).right(0.0).bottom(0.0)
    }

    /// Anchored mode: edges become offsets from `alignment`'s point.
    pub fn anchored(alignment: Alignment) -> Self {
        Self::new().alignment(alignment)
    }

    pub fn left(mut self, value: f32) -> Self {
        self.spec.left = Some(value);
        self
    }

    pub fn top(mut self, value: f32) -> Self {
        self.spec.top = Some(value);
        self
    }

    pub fn right(mut self, value: f32) -> Self {
        self.spec.right = Some(value);
        self
    }

    pub fn bottom(mut self, value: f32) -> Self {
        self.spec.bottom = Some(value);
        self
    }

    pub fn width(mut self, value: f32) -> Self {
        self.spec.width = Some(value);
        self
    }

    pub fn height(mut self, value: f32) -> Self {
        self.spec.height = Some(value);
        self
    }

    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.spec.alignment = Some(alignment);
        self
    }
}

impl RenderObject for Positioned {
    fn kind_name(&self) -> &'static str {
        "Positioned"
    }

    /// Outside a stack this only tightens explicit dimensions.
    fn max_children(&self) -> Option<usize> {
        Some(1)
    }

    fn perform_layout(&mut self, cx: &mut LayoutCx<'_>) -> LayoutResult<Size> {
        let constraints = cx.constraints().tighten(self.spec.width, self.spec.height);
        match cx.only_child() {
            Some(child) => {
                let size = cx.layout_child(child, constraints, true)?;
                cx.set_child_offset(child, Offset::ZERO);
                Ok(size)
            }
            None => Ok(constraints.smallest()),
        }
    }

    /// Transparent to hit testing: only the child can be hit.
    fn hit_test(&self, cx: &mut HitTestCx<'_>, position: Offset) -> bool {
        match cx.children().first() {
            Some(&child) => cx.hit_test_child(child, position),
            None => false,
        }
    }

    fn positioned(&self) -> Option<PositionedSpec> {
        Some(self.spec)
    }
}
