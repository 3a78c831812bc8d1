//! Frame pipeline: dirty-boundary scheduling and per-frame flushes.

use indexmap::IndexSet;

use super::tree::{NodeId, RenderTree};
use crate::canvas::Canvas;
use crate::error::LayoutResult;
use crate::layout::BoxConstraints;

/// Tracks relayout and repaint boundaries that were dirtied since the last
/// flush. Insertion order is kept so flushes are deterministic.
#[derive(Debug, Default)]
pub struct PipelineOwner {
    dirty_layout: IndexSet<NodeId>,
    dirty_paint: IndexSet<NodeId>,
}

impl PipelineOwner {
    /// Returns false if `id` was already scheduled.
    pub fn schedule_layout(&mut self, id: NodeId) -> bool {
        let added = self.dirty_layout.insert(id);
        if added {
            tracing::debug!(node = ?id, "scheduled relayout boundary");
        }
        added
    }

    /// Returns false if `id` was already scheduled.
    pub fn schedule_paint(&mut self, id: NodeId) -> bool {
        self.dirty_paint.insert(id)
    }

    pub fn needs_layout(&self) -> bool {
        !self.dirty_layout.is_empty()
    }

    pub fn needs_paint(&self) -> bool {
        !self.dirty_paint.is_empty()
    }

    pub fn is_layout_scheduled(&self, id: NodeId) -> bool {
        self.dirty_layout.contains(&id)
    }

    pub fn is_paint_scheduled(&self, id: NodeId) -> bool {
        self.dirty_paint.contains(&id)
    }

    pub fn scheduled_layout(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.dirty_layout.iter().copied()
    }

    pub(crate) fn take_dirty_layout(&mut self) -> Vec<NodeId> {
        self.dirty_layout.drain(..).collect()
    }

    pub(crate) fn clear_paint(&mut self) {
        self.dirty_paint.clear();
    }

    /// Drop a destroyed node from both schedules.
    pub(crate) fn forget(&mut self, id: NodeId) {
        self.dirty_layout.shift_remove(&id);
        self.dirty_paint.shift_remove(&id);
    }
}

impl RenderTree {
    /// Bring the tree rooted at `root` up to date for `constraints`.
    ///
    /// The root is laid out when it is dirty or the viewport changed. Any
    /// boundary that is still dirty afterwards is re-laid out with its cached
    /// constraints, shallowest first.
    pub fn flush_layout(&mut self, root: NodeId, constraints: BoxConstraints) -> LayoutResult<()> {
        if self.needs_layout(root) || self.constraints(root) != Some(constraints) {
            if let Err(err) = self.layout(root, constraints, false) {
                self.owner.schedule_layout(root);
                return Err(err);
            }
        }

        let mut pending = self.owner.take_dirty_layout();
        pending.retain(|&id| self.contains(id));
        pending.sort_by_key(|&id| self.depth(id).unwrap_or(0));

        for (index, &id) in pending.iter().enumerate() {
            if !self.needs_layout(id) {
                continue;
            }
            let Some(cached) = self.constraints(id) else {
                // Never laid out: it is detached or waiting for its parent.
                continue;
            };
            if let Err(err) = self.layout(id, cached, false) {
                for &rest in &pending[index..] {
                    self.owner.schedule_layout(rest);
                }
                return Err(err);
            }
        }
        Ok(())
    }

    /// Paint the tree rooted at `root` onto `canvas` and clear the paint
    /// schedule. Clean repaint boundaries replay their cached layers.
    pub fn flush_paint(&mut self, root: NodeId, canvas: &mut dyn Canvas) {
        self.paint(root, canvas);
        self.owner.clear_paint();
    }
}
