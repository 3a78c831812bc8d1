//! The render tree arena.
//!
//! Nodes live in a [`SlotMap`] keyed by [`NodeId`]. A parent's ordered
//! `children` list is the only ownership edge: removing a node removes its
//! subtree. Children keep a plain `parent` handle for dirty propagation and
//! coordinate queries.
//!
//! While a node's object runs `perform_layout` or `paint` it is taken out of
//! its slot, so the object can be handed a context with mutable access to the
//! rest of the tree. Re-entering a node whose object is out is reported as
//! [`LayoutError::NodeBusy`].

use std::any::type_name;

use slotmap::{SlotMap, new_key_type};

use super::context::LayoutCx;
use super::object::RenderObject;
use super::pipeline::PipelineOwner;
use crate::canvas::DisplayList;
use crate::config::PipelineConfig;
use crate::error::{LayoutError, LayoutResult};
use crate::layout::BoxConstraints;
use crate::primitives::{Offset, Rect, Size};

new_key_type! {
    /// Opaque identifier for a node stored in the render tree.
    pub struct NodeId;
}

/// Data a parent stores on each child. Currently just the paint offset.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ParentData {
    pub offset: Offset,
}

/// Per-node protocol state.
pub(crate) struct Node {
    /// Node behaviour. `None` only while the object is running.
    pub(crate) object: Option<Box<dyn RenderObject>>,
    /// Cached so logs can name a node whose object is out.
    pub(crate) kind: &'static str,

    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) depth: usize,

    /// Constraints from the last layout pass.
    pub(crate) constraints: Option<BoxConstraints>,
    pub(crate) size: Size,
    pub(crate) parent_data: ParentData,

    pub(crate) needs_layout: bool,
    pub(crate) needs_paint: bool,
    pub(crate) relayout_boundary: Option<NodeId>,
    pub(crate) repaint_boundary: Option<NodeId>,

    /// Recorded paint output of a repaint boundary.
    pub(crate) layer: Option<DisplayList>,
}

impl Node {
    fn new(object: Box<dyn RenderObject>) -> Self {
        Self {
            kind: object.kind_name(),
            object: Some(object),
            parent: None,
            children: Vec::new(),
            depth: 0,
            constraints: None,
            size: Size::ZERO,
            parent_data: ParentData::default(),
            needs_layout: true,
            needs_paint: true,
            relayout_boundary: None,
            repaint_boundary: None,
            layer: None,
        }
    }
}

/// Owns every render node plus the pipeline bookkeeping for one tree.
pub struct RenderTree {
    pub(crate) nodes: SlotMap<NodeId, Node>,
    pub(crate) owner: PipelineOwner,
    pub(crate) config: PipelineConfig,
}

impl Default for RenderTree {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

impl RenderTree {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            nodes: SlotMap::with_key(),
            owner: PipelineOwner::default(),
            config,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: PipelineConfig) {
        self.config = config;
    }

    pub fn owner(&self) -> &PipelineOwner {
        &self.owner
    }

    // =========================================================================
    // Structure
    // =========================================================================

    /// Mount a detached node. It starts dirty for both layout and paint.
    pub fn insert<R: RenderObject>(&mut self, object: R) -> NodeId {
        self.nodes.insert(Node::new(Box::new(object)))
    }

    /// Mount a node and attach `children` to it in order.
    pub fn insert_with_children<R: RenderObject>(
        &mut self,
        object: R,
        children: &[NodeId],
    ) -> LayoutResult<NodeId> {
        let id = self.insert(object);
        self.set_children(id, children)?;
        Ok(id)
    }

    /// Replace `parent`'s child list.
    ///
    /// Children no longer listed are detached (not destroyed). Listed children
    /// are moved from any previous parent.
    pub fn set_children(&mut self, parent: NodeId, children: &[NodeId]) -> LayoutResult<()> {
        let object = self.node(parent)?.object.as_deref().ok_or(LayoutError::NodeBusy(parent))?;
        if let Some(max) = object.max_children() {
            if children.len() > max {
                return Err(LayoutError::TooManyChildren {
                    parent,
                    kind: object.kind_name(),
                    max,
                    given: children.len(),
                });
            }
        }
        for &child in children {
            self.node(child)?;
            if child == parent || self.is_ancestor(child, parent) {
                return Err(LayoutError::CycleDetected { parent, child });
            }
        }

        let old = std::mem::take(&mut self.node_mut(parent)?.children);
        for child in old {
            if let Some(node) = self.nodes.get_mut(child) {
                node.parent = None;
            }
        }

        let mut previous_parents = Vec::new();
        for &child in children {
            if let Some(previous) = self.nodes[child].parent {
                if let Some(prev) = self.nodes.get_mut(previous) {
                    prev.children.retain(|&c| c != child);
                    previous_parents.push(previous);
                }
            }
            self.nodes[child].parent = Some(parent);
        }
        for previous in previous_parents {
            self.mark_needs_layout(previous);
            self.mark_needs_paint(previous);
        }

        self.nodes[parent].children = children.to_vec();
        let depth = self.nodes[parent].depth;
        for &child in children {
            self.set_depth(child, depth + 1);
        }

        self.mark_needs_layout(parent);
        self.mark_needs_paint(parent);
        Ok(())
    }

    /// Append one child to the end of `parent`'s list.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> LayoutResult<()> {
        let mut children = self.node(parent)?.children.clone();
        children.retain(|&c| c != child);
        children.push(child);
        self.set_children(parent, &children)
    }

    /// Unmount a node and its whole subtree.
    pub fn remove(&mut self, id: NodeId) -> LayoutResult<()> {
        let parent = self.node(id)?.parent;
        if let Some(parent) = parent {
            if let Some(node) = self.nodes.get_mut(parent) {
                node.children.retain(|&c| c != id);
            }
            self.mark_needs_layout(parent);
            self.mark_needs_paint(parent);
        }

        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(current) {
                stack.extend(node.children);
            }
            self.owner.forget(current);
        }
        Ok(())
    }

    /// Mutate a node's configuration and schedule it for layout and paint.
    pub fn update<T: RenderObject>(&mut self, id: NodeId, f: impl FnOnce(&mut T)) -> LayoutResult<()> {
        let node = self.node_mut(id)?;
        let object: &mut dyn RenderObject = node.object.as_deref_mut().ok_or(LayoutError::NodeBusy(id))?;
        let typed = object
            .as_any_mut()
            .downcast_mut::<T>()
            .ok_or(LayoutError::WrongKind {
                id,
                expected: type_name::<T>(),
            })?;
        f(typed);
        self.mark_needs_layout(id);
        self.mark_needs_paint(id);
        Ok(())
    }

    /// Borrow a node's object as a concrete type.
    pub fn get<T: RenderObject>(&self, id: NodeId) -> Option<&T> {
        let object: &dyn RenderObject = self.nodes.get(id)?.object.as_deref()?;
        object.as_any().downcast_ref::<T>()
    }

    fn is_ancestor(&self, candidate: NodeId, of: NodeId) -> bool {
        let mut current = self.nodes.get(of).and_then(|n| n.parent);
        while let Some(id) = current {
            if id == candidate {
                return true;
            }
            current = self.nodes.get(id).and_then(|n| n.parent);
        }
        false
    }

    fn set_depth(&mut self, id: NodeId, depth: usize) {
        let mut stack = vec![(id, depth)];
        while let Some((current, depth)) = stack.pop() {
            if let Some(node) = self.nodes.get_mut(current) {
                node.depth = depth;
                stack.extend(node.children.iter().map(|&c| (c, depth + 1)));
            }
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub(crate) fn node(&self, id: NodeId) -> LayoutResult<&Node> {
        self.nodes.get(id).ok_or(LayoutError::NodeNotFound(id))
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> LayoutResult<&mut Node> {
        self.nodes.get_mut(id).ok_or(LayoutError::NodeNotFound(id))
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id).map_or(&[], |n| n.children.as_slice())
    }

    pub fn kind_name(&self, id: NodeId) -> Option<&'static str> {
        self.nodes.get(id).map(|n| n.kind)
    }

    pub fn depth(&self, id: NodeId) -> Option<usize> {
        self.nodes.get(id).map(|n| n.depth)
    }

    /// Size from the last completed layout. Zero before the first one.
    pub fn size(&self, id: NodeId) -> Size {
        self.nodes.get(id).map_or(Size::ZERO, |n| n.size)
    }

    /// Offset assigned by the parent, in the parent's coordinate space.
    pub fn offset(&self, id: NodeId) -> Offset {
        self.nodes.get(id).map_or(Offset::ZERO, |n| n.parent_data.offset)
    }

    pub fn parent_data(&self, id: NodeId) -> Option<ParentData> {
        self.nodes.get(id).map(|n| n.parent_data)
    }

    /// Constraints from the last layout pass.
    pub fn constraints(&self, id: NodeId) -> Option<BoxConstraints> {
        self.nodes.get(id).and_then(|n| n.constraints)
    }

    pub fn needs_layout(&self, id: NodeId) -> bool {
        self.nodes.get(id).is_some_and(|n| n.needs_layout)
    }

    pub fn needs_paint(&self, id: NodeId) -> bool {
        self.nodes.get(id).is_some_and(|n| n.needs_paint)
    }

    pub fn relayout_boundary(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|n| n.relayout_boundary)
    }

    pub fn repaint_boundary(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|n| n.repaint_boundary)
    }

    /// Whether a repaint boundary currently holds a recorded layer.
    pub fn has_layer(&self, id: NodeId) -> bool {
        self.nodes.get(id).is_some_and(|n| n.layer.is_some())
    }

    /// Offset of `id`'s origin relative to the root of its tree.
    pub fn global_offset(&self, id: NodeId) -> Offset {
        let mut offset = Offset::ZERO;
        let mut current = Some(id);
        while let Some(node) = current.and_then(|c| self.nodes.get(c)) {
            offset = offset + node.parent_data.offset;
            current = node.parent;
        }
        offset
    }

    /// Screen-space rectangle of a node.
    pub fn global_rect(&self, id: NodeId) -> Rect {
        Rect::from_origin_size(self.global_offset(id), self.size(id))
    }

    /// `root` and its descendants in pre-order (paint order).
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            out.push(id);
            stack.extend(node.children.iter().rev());
        }
        out
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Lay out `id` under `constraints`.
    ///
    /// `parent_uses_size` never changes the result. It only decides whether
    /// this node may act as a relayout boundary.
    pub fn layout(
        &mut self,
        id: NodeId,
        constraints: BoxConstraints,
        parent_uses_size: bool,
    ) -> LayoutResult<Size> {
        let node = self.node(id)?;
        let object = node.object.as_deref().ok_or(LayoutError::NodeBusy(id))?;
        let is_repaint_boundary = object.is_repaint_boundary();
        let parent = node.parent;
        let (parent_relayout, parent_repaint) = parent
            .and_then(|p| self.nodes.get(p))
            .map_or((None, None), |p| (p.relayout_boundary, p.repaint_boundary));

        let node = &mut self.nodes[id];
        node.relayout_boundary = if constraints.is_tight() || parent.is_none() || !parent_uses_size {
            Some(id)
        } else {
            parent_relayout
        };
        node.repaint_boundary = if is_repaint_boundary {
            Some(id)
        } else {
            parent_repaint
        };

        if !node.needs_layout && node.constraints == Some(constraints) {
            return Ok(node.size);
        }

        node.constraints = Some(constraints);
        let kind = node.kind;
        let depth = node.depth;
        let Some(mut object) = node.object.take() else {
            return Err(LayoutError::NodeBusy(id));
        };

        let result = {
            let mut cx = LayoutCx::new(self, id, constraints);
            object.perform_layout(&mut cx)
        };

        let node = self.node_mut(id)?;
        node.object = Some(object);

        let proposed = match result {
            Ok(size) => size,
            Err(err) => {
                node.needs_layout = true;
                tracing::debug!(kind, depth, %constraints, error = %err, "layout aborted");
                return Err(err);
            }
        };

        let size = constraints.constrain(proposed);
        if size != proposed {
            tracing::warn!(
                kind,
                %constraints,
                proposed = ?proposed,
                clamped = ?size,
                "layout produced a size outside its constraints"
            );
        }
        node.size = size;
        node.needs_layout = false;

        tracing::trace!(
            "[LAYOUT] {}{} | {} -> {{w:{:.0}, h:{:.0}}}",
            "  ".repeat(depth),
            kind,
            constraints,
            size.width,
            size.height,
        );

        self.mark_needs_paint(id);
        Ok(size)
    }

    // =========================================================================
    // Invalidation
    // =========================================================================

    /// Mark `id` dirty for layout and walk up to its relayout boundary, which
    /// is scheduled with the pipeline owner.
    pub fn mark_needs_layout(&mut self, id: NodeId) {
        let mut current = id;
        loop {
            let Some(node) = self.nodes.get_mut(current) else {
                return;
            };
            if node.needs_layout {
                return;
            }
            node.needs_layout = true;

            if node.relayout_boundary == Some(current) {
                self.owner.schedule_layout(current);
                return;
            }
            match node.parent {
                Some(parent) => current = parent,
                None => {
                    self.owner.schedule_layout(current);
                    return;
                }
            }
        }
    }

    /// Mark `id` dirty for paint, dropping cached layers up to and including
    /// its repaint boundary, which is scheduled with the pipeline owner.
    pub fn mark_needs_paint(&mut self, id: NodeId) {
        let mut current = id;
        loop {
            let Some(node) = self.nodes.get_mut(current) else {
                return;
            };
            node.layer = None;
            node.needs_paint = true;

            if node.repaint_boundary == Some(current) {
                let parent = node.parent;
                self.owner.schedule_paint(current);
                self.drop_enclosing_layers(parent);
                return;
            }
            match node.parent {
                Some(parent) => current = parent,
                None => {
                    self.owner.schedule_paint(current);
                    return;
                }
            }
        }
    }

    /// Outer layers embed the ops of inner ones, so they go stale too.
    fn drop_enclosing_layers(&mut self, mut next: Option<NodeId>) {
        while let Some(id) = next {
            let Some(node) = self.nodes.get_mut(id) else {
                return;
            };
            node.layer = None;
            next = node.parent;
        }
    }
}
