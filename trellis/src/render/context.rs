//! Layout context handed to `perform_layout`.
//!
//! The context is the only way an object reaches its children during layout:
//! it exposes the incoming constraints, the child list, the narrow child
//! queries flex and stack containers need, and the calls that lay out and
//! position a child.

use super::object::FlexParams;
use super::positioned::PositionedSpec;
use super::tree::{NodeId, RenderTree};
use crate::error::LayoutResult;
use crate::layout::BoxConstraints;
use crate::primitives::{Offset, Size};

/// Layout context for one node's `perform_layout` call.
pub struct LayoutCx<'a> {
    tree: &'a mut RenderTree,
    id: NodeId,
    constraints: BoxConstraints,
}

impl<'a> LayoutCx<'a> {
    pub(crate) fn new(tree: &'a mut RenderTree, id: NodeId, constraints: BoxConstraints) -> Self {
        Self {
            tree,
            id,
            constraints,
        }
    }

    /// The node being laid out.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Constraints supplied by the parent for this pass.
    pub fn constraints(&self) -> BoxConstraints {
        self.constraints
    }

    /// Children in list order.
    pub fn children(&self) -> Vec<NodeId> {
        self.tree.children(self.id).to_vec()
    }

    /// The first child, for single-child boxes.
    pub fn only_child(&self) -> Option<NodeId> {
        self.tree.children(self.id).first().copied()
    }

    /// Lay out `child` and return its committed size.
    ///
    /// Pass `parent_uses_size = false` only if this node's own size does not
    /// depend on the child's.
    pub fn layout_child(
        &mut self,
        child: NodeId,
        constraints: BoxConstraints,
        parent_uses_size: bool,
    ) -> LayoutResult<Size> {
        debug_assert_eq!(self.tree.parent(child), Some(self.id), "laid out a non-child");
        self.tree.layout(child, constraints, parent_uses_size)
    }

    /// Size of a child from its most recent layout.
    pub fn child_size(&self, child: NodeId) -> Size {
        self.tree.size(child)
    }

    /// Store the offset at which `child` is painted and hit-tested.
    pub fn set_child_offset(&mut self, child: NodeId, offset: Offset) {
        if let Some(node) = self.tree.nodes.get_mut(child) {
            node.parent_data.offset = offset;
        }
    }

    pub fn child_offset(&self, child: NodeId) -> Offset {
        self.tree.offset(child)
    }

    /// Flex participation reported by a child, if any.
    pub fn flex_params(&self, child: NodeId) -> Option<FlexParams> {
        self.tree
            .nodes
            .get(child)?
            .object
            .as_deref()?
            .flex_params()
    }

    /// Stack placement reported by a child, if any.
    pub fn positioned(&self, child: NodeId) -> Option<PositionedSpec> {
        self.tree
            .nodes
            .get(child)?
            .object
            .as_deref()?
            .positioned()
    }

    /// Lay out the only child with this node's constraints at offset zero and
    /// adopt its size; with no child, take the smallest allowed size.
    pub fn layout_passthrough(&mut self) -> LayoutResult<Size> {
        let constraints = self.constraints;
        match self.only_child() {
            Some(child) => {
                let size = self.layout_child(child, constraints, true)?;
                self.set_child_offset(child, Offset::ZERO);
                Ok(size)
            }
            None => Ok(constraints.smallest()),
        }
    }
}
