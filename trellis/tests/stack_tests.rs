//! Integration tests for Stack, Positioned and IndexedStack.

use std::cell::Cell;
use std::rc::Rc;

use trellis::{
    Alignment, BoxConstraints, IndexedStack, LayoutCx, LayoutResult, NodeId, Offset, Positioned,
    RenderObject, RenderTree, Size, SizedBox, Stack, StackFit,
};

fn fixed(tree: &mut RenderTree, width: f32, height: f32) -> NodeId {
    tree.insert(SizedBox::new(Some(width), Some(height)))
}

/// Leaf that counts how often it is laid out.
struct Probe {
    layouts: Rc<Cell<usize>>,
}

impl RenderObject for Probe {
    fn kind_name(&self) -> &'static str {
        "Probe"
    }

    fn perform_layout(&mut self, cx: &mut LayoutCx<'_>) -> LayoutResult<Size> {
        self.layouts.set(self.layouts.get() + 1);
        Ok(cx.constraints().biggest())
    }
}

fn probe(tree: &mut RenderTree) -> (NodeId, Rc<Cell<usize>>) {
    let layouts = Rc::new(Cell::new(0));
    let id = tree.insert(Probe {
        layouts: layouts.clone(),
    });
    (id, layouts)
}

#[test]
fn test_loose_stack_sizes_to_largest_child() {
    let mut tree = RenderTree::default();
    let a = fixed(&mut tree, 40.0, 40.0);
    let b = fixed(&mut tree, 60.0, 20.0);
    let stack = tree.insert_with_children(Stack::new(), &[a, b]).unwrap();

    tree.flush_layout(stack, BoxConstraints::loose(500.0, 500.0)).unwrap();
    assert_eq!(tree.size(stack), Size::new(60.0, 40.0));
}

#[test]
fn test_expand_stack_ignores_child_sizes() {
    let mut tree = RenderTree::default();
    let a = fixed(&mut tree, 40.0, 40.0);
    let b = fixed(&mut tree, 60.0, 20.0);
    let stack = tree
        .insert_with_children(Stack::new().fit(StackFit::Expand), &[a, b])
        .unwrap();

    tree.flush_layout(stack, BoxConstraints::loose(100.0, 80.0)).unwrap();
    assert_eq!(tree.size(stack), Size::new(100.0, 80.0));
}

#[test]
fn test_left_right_positioned_is_tight_to_the_gap() {
    let mut tree = RenderTree::default();
    let base = fixed(&mut tree, 100.0, 30.0);
    let inner = fixed(&mut tree, 5.0, 5.0);
    let pos = tree
        .insert_with_children(Positioned::new().left(10.0).right(10.0), &[inner])
        .unwrap();
    let stack = tree.insert_with_children(Stack::new(), &[base, pos]).unwrap();

    tree.flush_layout(stack, BoxConstraints::loose(400.0, 400.0)).unwrap();
    assert_eq!(tree.size(stack).width, 100.0);
    let c = tree.constraints(pos).unwrap();
    assert_eq!(c.min_width, 80.0);
    assert_eq!(c.max_width, 80.0);
    assert_eq!(tree.global_rect(inner).x, 10.0);
    assert_eq!(tree.global_rect(inner).width, 80.0);
}

#[test]
fn test_anchored_edges_do_not_shrink_first_pass() {
    let mut tree = RenderTree::default();
    let (anchored_leaf, _) = probe(&mut tree);
    let anchored = tree
        .insert_with_children(Positioned::anchored(Alignment::CENTER).left(5.0), &[anchored_leaf])
        .unwrap();
    let (absolute_leaf, _) = probe(&mut tree);
    let absolute = tree
        .insert_with_children(Positioned::new().left(5.0), &[absolute_leaf])
        .unwrap();
    let stack = tree.insert_with_children(Stack::new(), &[anchored, absolute]).unwrap();

    tree.flush_layout(stack, BoxConstraints::loose(100.0, 50.0)).unwrap();
    assert_eq!(tree.constraints(anchored).unwrap().max_width, 100.0);
    assert_eq!(tree.constraints(absolute).unwrap().max_width, 95.0);
}

#[test]
fn test_hit_test_returns_top_child_first() {
    let mut tree = RenderTree::default();
    let bottom = fixed(&mut tree, 50.0, 50.0);
    let top = fixed(&mut tree, 50.0, 50.0);
    let stack = tree.insert_with_children(Stack::new(), &[bottom, top]).unwrap();
    tree.flush_layout(stack, BoxConstraints::loose(100.0, 100.0)).unwrap();

    let hits = tree.hit_test(stack, Offset::new(25.0, 25.0));
    assert_eq!(hits.first(), Some(top));
    assert!(!hits.contains(bottom), "a hit child stops the search");
    assert_eq!(hits.ids(), vec![top, stack]);
}

#[test]
fn test_indexed_stack_expand_never_lays_out_inactive_children() {
    let mut tree = RenderTree::default();
    let (a, a_layouts) = probe(&mut tree);
    let (b, b_layouts) = probe(&mut tree);
    let (c, c_layouts) = probe(&mut tree);
    let stack = tree
        .insert_with_children(IndexedStack::new(0).fit(StackFit::Expand), &[a, b, c])
        .unwrap();
    let viewport = BoxConstraints::loose(120.0, 90.0);

    tree.flush_layout(stack, viewport).unwrap();
    assert_eq!(tree.size(stack), Size::new(120.0, 90.0));
    assert_eq!((a_layouts.get(), b_layouts.get(), c_layouts.get()), (1, 0, 0));

    tree.update::<IndexedStack>(stack, |s| s.index = 2).unwrap();
    tree.flush_layout(stack, viewport).unwrap();
    assert_eq!((a_layouts.get(), b_layouts.get(), c_layouts.get()), (1, 0, 1));
    assert_eq!(tree.constraints(b), None, "inactive sibling state is untouched");

    let hits = tree.hit_test(stack, Offset::new(10.0, 10.0));
    assert_eq!(hits.ids(), vec![c, stack]);
}
