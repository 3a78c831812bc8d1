//! Property tests: every node kind honours the constraints it is given.

use proptest::prelude::*;
use trellis::render::within_bounds;
use trellis::{
    Align, Alignment, BoxConstraints, Color, ColoredBox, CrossAxisAlignment, EdgeInsets, Flex,
    Flexible, IndexedStack, NodeId, Offset, Padding, Positioned, RenderTree, RepaintBoundary, SizedBox,
    Stack, StackFit,
};

const KINDS: usize = 10;

/// Bounds with `min <= max`; each max is unbounded a quarter of the time.
fn constraints_strategy() -> impl Strategy<Value = BoxConstraints> {
    let axis = (0.0f32..400.0, prop_oneof![3 => (0.0f32..400.0).prop_map(Some), 1 => Just(None)])
        .prop_map(|(min, extra)| (min, extra.map_or(f32::INFINITY, |e| min + e)));
    (axis.clone(), axis).prop_map(|((min_w, max_w), (min_h, max_h))| {
        BoxConstraints::new(min_w, max_w, min_h, max_h)
    })
}

fn fixed(tree: &mut RenderTree, w: f32, h: f32) -> NodeId {
    tree.insert(SizedBox::new(Some(w), Some(h)))
}

fn build(tree: &mut RenderTree, kind: usize, w: f32, h: f32, inset: f32) -> NodeId {
    match kind {
        0 => fixed(tree, w, h),
        1 => {
            let child = fixed(tree, w, h);
            tree.insert_with_children(Padding::new(EdgeInsets::all(inset)), &[child])
                .unwrap()
        }
        2 => {
            let child = fixed(tree, w, h);
            tree.insert_with_children(Align::center(), &[child]).unwrap()
        }
        3 => tree.insert(ColoredBox::new(Color::RED)),
        4 => {
            let a = fixed(tree, w, h);
            let b = tree.insert(Flexible::expanded(1));
            let inner = fixed(tree, h, w);
            let c = tree.insert_with_children(Flexible::new(2), &[inner]).unwrap();
            tree.insert_with_children(Flex::row(), &[a, b, c]).unwrap()
        }
        5 => {
            let a = fixed(tree, w, h);
            let b = fixed(tree, h, w);
            tree.insert_with_children(
                Flex::column().cross_axis_alignment(CrossAxisAlignment::Stretch),
                &[a, b],
            )
            .unwrap()
        }
        6 | 7 => {
            let base = fixed(tree, w, h);
            let stretched_leaf = fixed(tree, h, w);
            let stretched = tree
                .insert_with_children(Positioned::new().left(inset).right(inset), &[stretched_leaf])
                .unwrap();
            let anchored_leaf = fixed(tree, w / 2.0, h / 2.0);
            let anchored = tree
                .insert_with_children(Positioned::anchored(Alignment::BOTTOM_RIGHT).top(inset), &[anchored_leaf])
                .unwrap();
            let fit = if kind == 6 { StackFit::Loose } else { StackFit::Expand };
            tree.insert_with_children(Stack::new().fit(fit), &[base, stretched, anchored])
                .unwrap()
        }
        8 => {
            let a = fixed(tree, w, h);
            let b = fixed(tree, h, w);
            tree.insert_with_children(IndexedStack::new(1).fit(StackFit::Expand), &[a, b])
                .unwrap()
        }
        _ => {
            let child = fixed(tree, w, h);
            tree.insert_with_children(RepaintBoundary::new(), &[child]).unwrap()
        }
    }
}

proptest! {
    #[test]
    fn every_laid_out_node_satisfies_its_constraints(
        kind in 0..KINDS,
        constraints in constraints_strategy(),
        w in 0.0f32..300.0,
        h in 0.0f32..300.0,
        inset in 0.0f32..50.0,
    ) {
        let mut tree = RenderTree::default();
        let root = build(&mut tree, kind, w, h, inset);

        // Flex containers legitimately refuse some unbounded inputs.
        if tree.flush_layout(root, constraints).is_err() {
            prop_assert!(kind == 4 || kind == 5);
            return Ok(());
        }

        for id in tree.descendants(root) {
            let Some(c) = tree.constraints(id) else {
                continue;
            };
            let size = tree.size(id);
            prop_assert!(size.is_finite(), "{:?} produced {:?}", tree.kind_name(id), size);
            prop_assert!(
                c.is_satisfied_by(size),
                "{:?} produced {:?} under {}",
                tree.kind_name(id),
                size,
                c
            );
            let offset = tree.offset(id);
            prop_assert!(offset.x.is_finite() && offset.y.is_finite());
        }
    }

    #[test]
    fn hit_test_entries_are_inside_their_nodes(
        kind in 0..KINDS,
        x in -20.0f32..420.0,
        y in -20.0f32..420.0,
    ) {
        let mut tree = RenderTree::default();
        let root = build(&mut tree, kind, 120.0, 80.0, 10.0);
        tree.flush_layout(root, BoxConstraints::loose(400.0, 400.0)).unwrap();

        let result = tree.hit_test(root, Offset::new(x, y));
        for entry in result.entries() {
            prop_assert!(within_bounds(entry.local_position, tree.size(entry.id)));
        }
        // RepaintBoundary is transparent and never reports itself.
        if let (Some(last), true) = (result.entries().last(), kind != 9) {
            prop_assert_eq!(last.id, root);
        }
    }
}
