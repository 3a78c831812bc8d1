//! Paint traversal.
//!
//! [`PaintContext`] walks the tree depth-first, translating the canvas to
//! each child's offset. It keeps its own translation and clip stacks in
//! global coordinates so it can cull children that fall outside the current
//! clip without asking the canvas.

use super::tree::{NodeId, RenderTree};
use crate::canvas::{Canvas, DisplayList, Paint};
use crate::primitives::{Color, Offset, Rect, Size};

/// Debug bounds colours, cycled by paint depth.
const DEBUG_BOUNDS_COLORS: [Color; 6] = [
    Color::rgba(1.0, 0.39, 0.39, 0.71),
    Color::rgba(0.39, 1.0, 0.39, 0.71),
    Color::rgba(0.39, 0.39, 1.0, 0.71),
    Color::rgba(1.0, 1.0, 0.39, 0.71),
    Color::rgba(1.0, 0.39, 1.0, 0.71),
    Color::rgba(0.39, 1.0, 1.0, 0.71),
];

/// Paint context for one traversal.
pub struct PaintContext<'a> {
    tree: &'a mut RenderTree,
    canvas: &'a mut dyn Canvas,
    /// The node whose `paint` is running.
    current: Option<NodeId>,
    /// Each entry is already intersected with the one below it.
    clip_stack: Vec<Rect>,
    translation_stack: Vec<Offset>,
    transform: Offset,
    debug_depth: usize,
}

impl<'a> PaintContext<'a> {
    pub fn new(tree: &'a mut RenderTree, canvas: &'a mut dyn Canvas) -> Self {
        Self {
            tree,
            canvas,
            current: None,
            clip_stack: Vec::new(),
            translation_stack: Vec::new(),
            transform: Offset::ZERO,
            debug_depth: 0,
        }
    }

    /// The canvas, already translated to the current node's origin.
    pub fn canvas(&mut self) -> &mut dyn Canvas {
        &mut *self.canvas
    }

    /// Size of the node being painted.
    pub fn size(&self) -> Size {
        self.current.map_or(Size::ZERO, |id| self.tree.size(id))
    }

    pub fn children(&self) -> Vec<NodeId> {
        self.current
            .map(|id| self.tree.children(id).to_vec())
            .unwrap_or_default()
    }

    pub fn child_offset(&self, child: NodeId) -> Offset {
        self.tree.offset(child)
    }

    /// Accumulated translation from the root to the current origin.
    pub fn current_transform(&self) -> Offset {
        self.transform
    }

    /// The effective clip in global coordinates, if any clip is active.
    pub fn current_clip_bounds(&self) -> Option<Rect> {
        self.clip_stack.last().copied()
    }

    pub fn push_translation(&mut self, offset: Offset) {
        self.translation_stack.push(offset);
        self.transform = self.transform + offset;
    }

    pub fn pop_translation(&mut self) {
        if let Some(last) = self.translation_stack.pop() {
            self.transform = self.transform - last;
        }
    }

    /// Clip to a rect in current local coordinates. Pair with
    /// [`pop_clip_rect`](Self::pop_clip_rect).
    pub fn push_clip_rect(&mut self, local: Rect) {
        let global = local.translate(self.transform);
        let effective = match self.clip_stack.last() {
            Some(current) => current.intersection(&global).unwrap_or(Rect::ZERO),
            None => global,
        };
        self.clip_stack.push(effective);
        self.canvas.save();
        self.canvas.clip_rect(local);
    }

    pub fn pop_clip_rect(&mut self) {
        if self.clip_stack.pop().is_some() {
            self.canvas.restore();
        }
    }

    /// Paint every child of the current node at its stored offset.
    pub fn paint_children(&mut self) {
        for child in self.children() {
            let offset = self.tree.offset(child);
            self.paint_child(child, offset);
        }
    }

    /// Paint `child` translated by `offset`, unless it lies outside the clip.
    pub fn paint_child(&mut self, child: NodeId, offset: Offset) {
        if self.should_cull(child, offset) {
            tracing::trace!(node = ?child, "culled outside clip");
            return;
        }

        self.canvas.save();
        self.canvas.translate(offset);
        self.push_translation(offset);

        let show_bounds = self.tree.config.show_layout_bounds;
        if show_bounds {
            self.debug_depth += 1;
        }

        self.paint_node(child);

        if show_bounds {
            self.draw_debug_bounds(self.tree.size(child));
            self.debug_depth -= 1;
        }

        self.pop_translation();
        self.canvas.restore();
    }

    fn paint_node(&mut self, id: NodeId) {
        let Some(node) = self.tree.nodes.get(id) else {
            return;
        };
        let is_boundary = node.repaint_boundary == Some(id);
        if !is_boundary {
            self.paint_object(id);
            return;
        }

        if !node.needs_paint {
            if let Some(layer) = &node.layer {
                layer.replay(&mut *self.canvas);
                return;
            }
        }

        let mut layer = DisplayList::new();
        {
            let mut recorder = PaintContext::new(&mut *self.tree, &mut layer);
            recorder.debug_depth = self.debug_depth;
            recorder.paint_object(id);
        }
        layer.replay(&mut *self.canvas);
        if let Some(node) = self.tree.nodes.get_mut(id) {
            node.layer = Some(layer);
        }
    }

    fn paint_object(&mut self, id: NodeId) {
        let Some(object) = self.tree.nodes.get_mut(id).and_then(|n| n.object.take()) else {
            tracing::warn!(node = ?id, "skipped painting a node that is already running");
            return;
        };
        let previous = self.current.replace(id);
        object.paint(self);
        self.current = previous;

        if let Some(node) = self.tree.nodes.get_mut(id) {
            node.object = Some(object);
            node.needs_paint = false;
        }
    }

    fn should_cull(&self, child: NodeId, offset: Offset) -> bool {
        let Some(clip) = self.current_clip_bounds() else {
            return false;
        };
        let size = self.tree.size(child);
        if size.is_empty() {
            // Zero-sized nodes may still paint overflow; never cull them.
            return false;
        }
        let global = Rect::from_size(size).translate(self.transform + offset);
        clip.intersection(&global).is_none_or(|r| r.is_empty())
    }

    fn draw_debug_bounds(&mut self, size: Size) {
        if size.is_empty() {
            return;
        }
        let color = DEBUG_BOUNDS_COLORS[self.debug_depth % DEBUG_BOUNDS_COLORS.len()];
        let width = self.tree.config.effective_stroke_width();
        self.canvas
            .draw_rect(Rect::from_size(size), &Paint::stroke(color, width));
    }
}

impl RenderTree {
    /// Paint the tree rooted at `root` onto `canvas`.
    ///
    /// With `cull_offscreen` set, painting is clipped to the root's bounds.
    pub fn paint(&mut self, root: NodeId, canvas: &mut dyn Canvas) {
        let clip = self.config.cull_offscreen.then(|| Rect::from_size(self.size(root)));
        let mut cx = PaintContext::new(self, canvas);
        if let Some(clip) = clip {
            cx.push_clip_rect(clip);
        }
        cx.paint_child(root, Offset::ZERO);
        if clip.is_some() {
            cx.pop_clip_rect();
        }
    }
}
