//! RepaintBoundary - isolates a subtree's painting into a cached layer.

use super::context::LayoutCx;
use super::hit_test::HitTestCx;
use super::object::RenderObject;
use crate::error::LayoutResult;
use crate::primitives::{Offset, Size};

/// Pass-through box whose paint output is recorded and replayed while clean.
///
/// Use it around subtrees that repaint at a different rate than their
/// surroundings: a dirty descendant only re-records this layer, and a dirty
/// sibling outside it replays the layer untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepaintBoundary;

impl RepaintBoundary {
    pub fn new() -> Self {
        Self
    }
}

impl RenderObject for RepaintBoundary {
    fn kind_name(&self) -> &'static str {
        "RepaintBoundary"
    }

    fn max_children(&self) -> Option<usize> {
        Some(1)
    }

    fn perform_layout(&mut self, cx: &mut LayoutCx<'_>) -> LayoutResult<Size> {
        cx.layout_passthrough()
    }

    fn hit_test(&self, cx: &mut HitTestCx<'_>, position: Offset) -> bool {
        if !cx.contains(position) {
            return false;
        }
        match cx.children().first() {
            Some(&child) => cx.hit_test_child(child, position),
            None => false,
        }
    }

    fn is_repaint_boundary(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::DisplayList;
    use crate::layout::BoxConstraints;
    use crate::primitives::Color;
    use crate::render::{ColoredBox, Flex, RenderTree, SizedBox};

    #[test]
    fn is_its_own_repaint_boundary() {
        let mut tree = RenderTree::default();
        let leaf = tree.insert(SizedBox::new(Some(10.0), Some(10.0)));
        let boundary = tree.insert_with_children(RepaintBoundary::new(), &[leaf]).unwrap();
        let root = tree.insert_with_children(Flex::row(), &[boundary]).unwrap();
        tree.layout(root, BoxConstraints::loose(100.0, 100.0), false).unwrap();

        assert_eq!(tree.repaint_boundary(boundary), Some(boundary));
        assert_eq!(tree.repaint_boundary(leaf), Some(boundary));
        assert_eq!(tree.repaint_boundary(root), None);
        assert_eq!(tree.size(boundary), Size::new(10.0, 10.0));
    }

    #[test]
    fn transparent_to_hit_testing() {
        let mut tree = RenderTree::default();
        let leaf = tree.insert(SizedBox::new(Some(10.0), Some(10.0)));
        let boundary = tree.insert_with_children(RepaintBoundary::new(), &[leaf]).unwrap();
        tree.layout(boundary, BoxConstraints::loose(100.0, 100.0), false).unwrap();

        assert_eq!(tree.hit_test(boundary, Offset::new(5.0, 5.0)).ids(), vec![leaf]);
        assert!(tree.hit_test(boundary, Offset::new(50.0, 5.0)).is_empty());
    }

    #[test]
    fn dirty_sibling_does_not_repaint_layer_contents() {
        let mut tree = RenderTree::default();
        let cached = tree.insert(ColoredBox::new(Color::RED));
        let sized = tree.insert_with_children(SizedBox::new(Some(10.0), Some(10.0)), &[cached]).unwrap();
        let boundary = tree.insert_with_children(RepaintBoundary::new(), &[sized]).unwrap();
        let sibling = tree.insert(SizedBox::new(Some(10.0), Some(10.0)));
        let root = tree.insert_with_children(Flex::row(), &[boundary, sibling]).unwrap();
        tree.flush_layout(root, BoxConstraints::loose(100.0, 100.0)).unwrap();

        let mut list = DisplayList::new();
        tree.flush_paint(root, &mut list);
        assert!(tree.has_layer(boundary));

        tree.mark_needs_paint(sibling);
        assert!(tree.has_layer(boundary));
        assert!(!tree.needs_paint(cached));
    }
}
