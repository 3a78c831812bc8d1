//! Sample trees for the inspector.

use anyhow::Result;
use clap::ValueEnum;
use trellis::{
    Align, Alignment, Color, ColoredBox, CrossAxisAlignment, EdgeInsets, Flex, Flexible,
    IndexedStack, NodeId, Padding, Positioned, RenderTree, SizedBox, Stack, StackFit,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneKind {
    /// Column with a header, a flexible row body and a footer.
    Flex,
    /// Expanding stack with edge-positioned and anchored overlays.
    Stack,
    /// Indexed stack of pages; only the active one is laid out.
    Indexed,
}

/// A built tree plus human names for its interesting nodes.
pub struct Scene {
    pub root: NodeId,
    labels: Vec<(NodeId, &'static str)>,
}

impl Scene {
    pub fn label(&self, id: NodeId) -> Option<&'static str> {
        self.labels
            .iter()
            .find_map(|&(node, label)| (node == id).then_some(label))
    }
}

struct Builder<'a> {
    tree: &'a mut RenderTree,
    labels: Vec<(NodeId, &'static str)>,
}

impl Builder<'_> {
    /// A solid box of optional fixed dimensions.
    fn block(&mut self, label: &'static str, color: Color, width: Option<f32>, height: Option<f32>) -> Result<NodeId> {
        let fill = self.tree.insert(ColoredBox::new(color));
        self.labels.push((fill, label));
        Ok(self.tree.insert_with_children(SizedBox::new(width, height), &[fill])?)
    }

    fn wrap<R: trellis::RenderObject>(&mut self, object: R, child: NodeId) -> Result<NodeId> {
        Ok(self.tree.insert_with_children(object, &[child])?)
    }

    fn finish(self, root: NodeId) -> Scene {
        Scene {
            root,
            labels: self.labels,
        }
    }
}

pub fn build(kind: SceneKind, tree: &mut RenderTree, index: usize) -> Result<Scene> {
    let mut b = Builder {
        tree,
        labels: Vec::new(),
    };
    let root = match kind {
        SceneKind::Flex => flex_scene(&mut b)?,
        SceneKind::Stack => stack_scene(&mut b)?,
        SceneKind::Indexed => indexed_scene(&mut b, index)?,
    };
    Ok(b.finish(root))
}

fn flex_scene(b: &mut Builder<'_>) -> Result<NodeId> {
    let header = b.block("header", Color::rgba8(40, 44, 52, 1.0), None, Some(48.0))?;

    let sidebar = b.block("sidebar", Color::rgba8(33, 37, 43, 1.0), Some(120.0), None)?;
    let content_fill = b.tree.insert(ColoredBox::new(Color::rgba8(30, 30, 30, 1.0)));
    b.labels.push((content_fill, "content"));
    let content = b.wrap(Flexible::expanded(2), content_fill)?;
    let aside_fill = b.tree.insert(ColoredBox::new(Color::rgba8(50, 56, 66, 1.0)));
    b.labels.push((aside_fill, "aside"));
    let aside_pad = b.wrap(Padding::new(EdgeInsets::all(8.0)), aside_fill)?;
    let aside = b.wrap(Flexible::new(1), aside_pad)?;
    let row = b.tree.insert_with_children(Flex::row(), &[sidebar, content, aside])?;
    let body = b.wrap(Flexible::expanded(1), row)?;

    let footer = b.block("footer", Color::rgba8(0, 122, 204, 1.0), None, Some(24.0))?;

    Ok(b.tree.insert_with_children(
        Flex::column().cross_axis_alignment(CrossAxisAlignment::Stretch),
        &[header, body, footer],
    )?)
}

fn stack_scene(b: &mut Builder<'_>) -> Result<NodeId> {
    let background = b.tree.insert(ColoredBox::new(Color::rgba8(30, 30, 30, 1.0)));
    b.labels.push((background, "background"));

    let toolbar_fill = b.tree.insert(ColoredBox::new(Color::rgba8(40, 44, 52, 1.0)));
    b.labels.push((toolbar_fill, "toolbar"));
    let toolbar = b.wrap(
        Positioned::new().left(10.0).right(10.0).bottom(10.0).height(40.0),
        toolbar_fill,
    )?;

    let dialog_box = b.block("dialog", Color::WHITE, Some(160.0), Some(90.0))?;
    let dialog = b.wrap(Positioned::anchored(Alignment::CENTER), dialog_box)?;

    let badge_box = b.block("badge", Color::RED, Some(24.0), Some(24.0))?;
    // Expanding stacks force absolute children to full size; anchor keeps 24x24.
    let badge = b.wrap(
        Positioned::anchored(Alignment::TOP_RIGHT).right(22.0).top(22.0),
        badge_box,
    )?;

    Ok(b.tree.insert_with_children(
        Stack::new().fit(StackFit::Expand),
        &[background, toolbar, dialog, badge],
    )?)
}

fn indexed_scene(b: &mut Builder<'_>, index: usize) -> Result<NodeId> {
    let first = b.tree.insert(ColoredBox::new(Color::rgba8(97, 175, 239, 1.0)));
    b.labels.push((first, "page-0"));

    let card = b.block("page-1-card", Color::rgba8(152, 195, 121, 1.0), Some(100.0), Some(100.0))?;
    let second = b.wrap(Align::center(), card)?;
    b.labels.push((second, "page-1"));

    let third = b.tree.insert(ColoredBox::new(Color::rgba8(224, 108, 117, 1.0)));
    b.labels.push((third, "page-2"));

    Ok(b.tree.insert_with_children(
        IndexedStack::new(index).fit(StackFit::Expand),
        &[first, second, third],
    )?)
}
