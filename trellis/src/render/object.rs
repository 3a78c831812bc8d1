//! The render object contract.
//!
//! A render object holds only its own configuration (direction, alignment,
//! colour...). Everything the protocol tracks per node (cached constraints,
//! size, offset, dirty bits, boundaries) lives in the [`RenderTree`] arena,
//! so implementations stay small and never hold references to each other.
//!
//! [`RenderTree`]: super::RenderTree

use std::any::Any;

use super::context::LayoutCx;
use super::hit_test::HitTestCx;
use super::paint::PaintContext;
use super::positioned::PositionedSpec;
use crate::error::LayoutResult;
use crate::layout::FlexFit;
use crate::primitives::{Offset, Size};

/// Downcasting support for boxed render objects.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Flex factor and fit reported by a child of a flex container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlexParams {
    pub flex: u32,
    pub fit: FlexFit,
}

/// A node kind in the render tree.
pub trait RenderObject: AsAny {
    /// Short name used in logs and diagnostics.
    fn kind_name(&self) -> &'static str;

    /// Lay out children through `cx` and return this node's size.
    ///
    /// The returned size is passed through the incoming constraints by the
    /// tree before it is committed. Returning `Err` aborts the pass for this
    /// subtree without committing a size.
    fn perform_layout(&mut self, cx: &mut LayoutCx<'_>) -> LayoutResult<Size>;

    /// Paint own content, then children in list order.
    fn paint(&self, cx: &mut PaintContext<'_>) {
        cx.paint_children();
    }

    /// Test `position` (local coordinates) against this node.
    ///
    /// Children are tested in reverse paint order and the first hit wins;
    /// the node then adds itself after the hit descendants.
    fn hit_test(&self, cx: &mut HitTestCx<'_>, position: Offset) -> bool {
        if !cx.contains(position) {
            return false;
        }
        for &child in cx.children().iter().rev() {
            if cx.hit_test_child(child, position) {
                break;
            }
        }
        cx.add_self(position);
        true
    }

    /// Whether this node records its painting into a cached layer.
    fn is_repaint_boundary(&self) -> bool {
        false
    }

    /// Flex participation, for children of a flex container.
    fn flex_params(&self) -> Option<FlexParams> {
        None
    }

    /// Placement policy, for children of a stack.
    fn positioned(&self) -> Option<PositionedSpec> {
        None
    }

    /// Most children this kind lays out, or `None` for any number.
    fn max_children(&self) -> Option<usize> {
        None
    }
}
