//! Flex - Row and Column container.
//!
//! Children flow along the main axis in list order. Inflexible children are
//! measured first; whatever main-axis space is left is split between flex
//! children in proportion to their factors.

use super::context::LayoutCx;
use super::object::{FlexParams, RenderObject};
use crate::error::{LayoutError, LayoutResult};
use crate::layout::{Axis, BoxConstraints, CrossAxisAlignment, FlexFit, MainAxisAlignment, MainAxisSize};
use crate::primitives::{Offset, Size};

/// A row or column of children.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Flex {
    pub direction: Axis,
    pub main_axis_alignment: MainAxisAlignment,
    pub cross_axis_alignment: CrossAxisAlignment,
    pub main_axis_size: MainAxisSize,
}

impl Flex {
    pub fn new(direction: Axis) -> Self {
        Self {
            direction,
            ..Default::default()
        }
    }

    /// Children flow left to right.
    pub fn row() -> Self {
        Self::new(Axis::Horizontal)
    }

    /// Children flow top to bottom.
    pub fn column() -> Self {
        Self::new(Axis::Vertical)
    }

    pub fn main_axis_alignment(mut self, alignment: MainAxisAlignment) -> Self {
        self.main_axis_alignment = alignment;
        self
    }

    pub fn cross_axis_alignment(mut self, alignment: CrossAxisAlignment) -> Self {
        self.cross_axis_alignment = alignment;
        self
    }

    pub fn main_axis_size(mut self, size: MainAxisSize) -> Self {
        self.main_axis_size = size;
        self
    }
}

impl RenderObject for Flex {
    fn kind_name(&self) -> &'static str {
        match self.direction {
            Axis::Horizontal => "Row",
            Axis::Vertical => "Column",
        }
    }

    fn perform_layout(&mut self, cx: &mut LayoutCx<'_>) -> LayoutResult<Size> {
        let constraints = cx.constraints();
        let axis = self.direction;
        let max_main = constraints.max_along(axis);
        let max_cross = constraints.max_along(axis.flip());
        let stretch = self.cross_axis_alignment == CrossAxisAlignment::Stretch;

        // =====================================================================
        // Classify
        // =====================================================================

        let children = cx.children();
        let flex: Vec<Option<FlexParams>> = children
            .iter()
            .map(|&child| cx.flex_params(child).filter(|p| p.flex > 0))
            .collect();
        let total_flex: f32 = flex.iter().flatten().map(|p| p.flex as f32).sum();

        if total_flex > 0.0 && !max_main.is_finite() {
            return Err(LayoutError::UnboundedFlex {
                container: self.kind_name(),
                axis: axis.extent_name(),
            });
        }
        if stretch && !max_cross.is_finite() {
            return Err(LayoutError::UnboundedStretch {
                container: self.kind_name(),
                axis: axis.flip().extent_name(),
            });
        }

        let min_cross = if stretch { max_cross } else { 0.0 };
        let mut used_main = 0.0f32;
        let mut child_cross = 0.0f32;

        // =====================================================================
        // First pass: inflexible children
        // =====================================================================

        for (&child, params) in children.iter().zip(&flex) {
            if params.is_some() {
                continue;
            }
            let child_constraints = BoxConstraints::for_axis(axis, 0.0, max_main, min_cross, max_cross);
            let size = cx.layout_child(child, child_constraints, true)?;
            used_main += size.main(axis);
            child_cross = child_cross.max(size.cross(axis));
        }

        // =====================================================================
        // Second pass: flex children share what is left
        // =====================================================================

        let fills = self.main_axis_size == MainAxisSize::Max && max_main.is_finite();
        let remaining = if fills { (max_main - used_main).max(0.0) } else { 0.0 };

        for (&child, params) in children.iter().zip(&flex) {
            let Some(params) = params else {
                continue;
            };
            let allocated = remaining * params.flex as f32 / total_flex;
            let min_main = match params.fit {
                FlexFit::Tight => allocated,
                FlexFit::Loose => 0.0,
            };
            let child_constraints =
                BoxConstraints::for_axis(axis, min_main, allocated, min_cross, max_cross);
            let size = cx.layout_child(child, child_constraints, true)?;
            used_main += size.main(axis);
            child_cross = child_cross.max(size.cross(axis));
        }

        // =====================================================================
        // Size and position
        // =====================================================================

        let main_extent = if fills { max_main } else { used_main };
        let size = constraints.constrain(Size::from_axis(axis, main_extent, child_cross));

        if used_main > size.main(axis) {
            tracing::debug!(
                "{} overflowed: children need {:.0} {} but only {:.0} available",
                self.kind_name(),
                used_main,
                axis.extent_name(),
                size.main(axis),
            );
        }

        let free = (size.main(axis) - used_main).max(0.0);
        let (leading, between) = self.main_axis_alignment.spacing(free, children.len());
        let mut cursor = leading;
        for &child in &children {
            let child_size = cx.child_size(child);
            let cross = self
                .cross_axis_alignment
                .offset(size.cross(axis) - child_size.cross(axis));
            cx.set_child_offset(child, Offset::from_axis(axis, cursor, cross));
            cursor += child_size.main(axis) + between;
        }

        Ok(size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Flexible, NodeId, RenderTree, SizedBox};

    fn fixed(tree: &mut RenderTree, width: f32, height: f32) -> NodeId {
        tree.insert(SizedBox::new(Some(width), Some(height)))
    }

    #[test]
    fn space_between_places_children_at_edges() {
        let mut tree = RenderTree::default();
        let a = fixed(&mut tree, 50.0, 20.0);
        let b = fixed(&mut tree, 50.0, 20.0);
        let row = tree
            .insert_with_children(
                Flex::row().main_axis_alignment(MainAxisAlignment::SpaceBetween),
                &[a, b],
            )
            .unwrap();

        let size = tree.layout(row, BoxConstraints::loose(300.0, 100.0), false).unwrap();
        assert_eq!(size, Size::new(300.0, 20.0));
        assert_eq!(tree.offset(a), Offset::new(0.0, 0.0));
        assert_eq!(tree.offset(b), Offset::new(250.0, 0.0));
    }

    #[test]
    fn flex_children_split_remaining_space() {
        let mut tree = RenderTree::default();
        let fixed_child = fixed(&mut tree, 60.0, 10.0);
        let one = tree.insert(Flexible::expanded(1));
        let three = tree.insert(Flexible::expanded(3));
        let row = tree
            .insert_with_children(Flex::row(), &[fixed_child, one, three])
            .unwrap();

        tree.layout(row, BoxConstraints::loose(300.0, 50.0), false).unwrap();
        assert_eq!(tree.size(one).width, 60.0);
        assert_eq!(tree.size(three).width, 180.0);
        assert_eq!(tree.offset(one).x, 60.0);
        assert_eq!(tree.offset(three).x, 120.0);
    }

    #[test]
    fn loose_flex_child_may_be_smaller_than_its_share() {
        let mut tree = RenderTree::default();
        let inner = fixed(&mut tree, 40.0, 10.0);
        let loose = tree.insert_with_children(Flexible::new(1), &[inner]).unwrap();
        let row = tree.insert_with_children(Flex::row(), &[loose]).unwrap();

        tree.layout(row, BoxConstraints::loose(200.0, 50.0), false).unwrap();
        assert_eq!(tree.size(loose).width, 40.0);
        assert_eq!(tree.constraints(loose).unwrap().max_width, 200.0);
        assert_eq!(tree.constraints(loose).unwrap().min_width, 0.0);
    }

    #[test]
    fn unbounded_main_axis_with_flex_child_fails() {
        let mut tree = RenderTree::default();
        let child = tree.insert(Flexible::expanded(1));
        let row = tree.insert_with_children(Flex::row(), &[child]).unwrap();

        let err = tree
            .layout(row, BoxConstraints::loose(f32::INFINITY, 100.0), false)
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Row"), "{message}");
        assert!(message.contains("width"), "{message}");
        // Nothing committed: the row stays dirty with no size.
        assert!(tree.needs_layout(row));
        assert_eq!(tree.size(row), Size::ZERO);
    }

    #[test]
    fn unbounded_cross_axis_with_stretch_fails() {
        let mut tree = RenderTree::default();
        let child = fixed(&mut tree, 10.0, 10.0);
        let column = tree
            .insert_with_children(
                Flex::column().cross_axis_alignment(CrossAxisAlignment::Stretch),
                &[child],
            )
            .unwrap();

        let err = tree
            .layout(column, BoxConstraints::loose(f32::INFINITY, 100.0), false)
            .unwrap_err();
        assert_eq!(
            err,
            LayoutError::UnboundedStretch {
                container: "Column",
                axis: "width"
            }
        );
    }

    #[test]
    fn stretch_forces_cross_extent() {
        let mut tree = RenderTree::default();
        let child = fixed(&mut tree, 10.0, 10.0);
        let row = tree
            .insert_with_children(
                Flex::row().cross_axis_alignment(CrossAxisAlignment::Stretch),
                &[child],
            )
            .unwrap();

        tree.layout(row, BoxConstraints::loose(100.0, 40.0), false).unwrap();
        assert_eq!(tree.size(child), Size::new(10.0, 40.0));
        assert_eq!(tree.size(row), Size::new(100.0, 40.0));
    }

    #[test]
    fn column_centers_on_cross_axis() {
        let mut tree = RenderTree::default();
        let narrow = fixed(&mut tree, 20.0, 10.0);
        let wide = fixed(&mut tree, 60.0, 10.0);
        let column = tree
            .insert_with_children(
                Flex::column()
                    .main_axis_alignment(MainAxisAlignment::End)
                    .cross_axis_alignment(CrossAxisAlignment::Center),
                &[narrow, wide],
            )
            .unwrap();

        let size = tree.layout(column, BoxConstraints::loose(100.0, 100.0), false).unwrap();
        assert_eq!(size, Size::new(60.0, 100.0));
        assert_eq!(tree.offset(narrow), Offset::new(20.0, 80.0));
        assert_eq!(tree.offset(wide), Offset::new(0.0, 90.0));
    }

    #[test]
    fn min_main_axis_size_shrink_wraps() {
        let mut tree = RenderTree::default();
        let a = fixed(&mut tree, 30.0, 10.0);
        let b = fixed(&mut tree, 40.0, 15.0);
        let row = tree
            .insert_with_children(Flex::row().main_axis_size(MainAxisSize::Min), &[a, b])
            .unwrap();

        let size = tree.layout(row, BoxConstraints::loose(300.0, 100.0), false).unwrap();
        assert_eq!(size, Size::new(70.0, 15.0));
        assert_eq!(tree.offset(b).x, 30.0);
    }

    #[test]
    fn unbounded_row_without_flex_wraps_children() {
        let mut tree = RenderTree::default();
        let a = fixed(&mut tree, 30.0, 10.0);
        let row = tree.insert_with_children(Flex::row(), &[a]).unwrap();

        let size = tree.layout(row, BoxConstraints::UNBOUNDED, false).unwrap();
        assert_eq!(size, Size::new(30.0, 10.0));
    }

    #[test]
    fn huge_flex_factors_still_split_evenly() {
        let mut tree = RenderTree::default();
        let a = tree.insert(Flexible::expanded(u32::MAX));
        let b = tree.insert(Flexible::expanded(u32::MAX));
        let row = tree.insert_with_children(Flex::row(), &[a, b]).unwrap();

        let size = tree.layout(row, BoxConstraints::loose(100.0, 10.0), false).unwrap();
        assert_eq!(size.width, 100.0);
        assert_eq!(tree.size(a).width, 50.0);
        assert_eq!(tree.size(b).width, 50.0);
        assert_eq!(tree.offset(b).x, 50.0);
    }

    #[test]
    fn space_evenly_and_around() {
        let mut tree = RenderTree::default();
        let a = fixed(&mut tree, 20.0, 10.0);
        let b = fixed(&mut tree, 20.0, 10.0);
        let row = tree
            .insert_with_children(
                Flex::row().main_axis_alignment(MainAxisAlignment::SpaceEvenly),
                &[a, b],
            )
            .unwrap();

        tree.layout(row, BoxConstraints::loose(100.0, 10.0), false).unwrap();
        assert_eq!(tree.offset(a).x, 20.0);
        assert_eq!(tree.offset(b).x, 60.0);

        tree.update::<Flex>(row, |f| f.main_axis_alignment = MainAxisAlignment::SpaceAround)
            .unwrap();
        tree.layout(row, BoxConstraints::loose(100.0, 10.0), false).unwrap();
        assert_eq!(tree.offset(a).x, 15.0);
        assert_eq!(tree.offset(b).x, 65.0);
    }
}
