//! Layout policy types.
//!
//! Axes, flex alignment modes, fit modes, two-dimensional alignment and edge
//! insets. These are pure values; the containers in `render` interpret them.

use crate::primitives::{Offset, Rect, Size};

/// Direction of a flex container's main axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Axis {
    #[default]
    Horizontal,
    Vertical,
}

impl Axis {
    /// The perpendicular axis.
    pub fn flip(self) -> Self {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    /// Name of the size dimension along this axis, used in diagnostics.
    pub fn extent_name(self) -> &'static str {
        match self {
            Axis::Horizontal => "width",
            Axis::Vertical => "height",
        }
    }
}

/// Alignment on the main axis (direction of flow).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MainAxisAlignment {
    /// Pack children at the start.
    #[default]
    Start,
    /// Pack children at the end.
    End,
    /// Center children.
    Center,
    /// Free space only between children.
    SpaceBetween,
    /// Equal gaps around each child; the outer gaps are half size.
    SpaceAround,
    /// Equal gaps between children and at both ends.
    SpaceEvenly,
}

impl MainAxisAlignment {
    /// Leading offset and inter-child gap for `count` children sharing
    /// `free` leftover main-axis space.
    pub fn spacing(self, free: f32, count: usize) -> (f32, f32) {
        let free = free.max(0.0);
        if count == 0 {
            return (0.0, 0.0);
        }
        let n = count as f32;
        match self {
            MainAxisAlignment::Start => (0.0, 0.0),
            MainAxisAlignment::End => (free, 0.0),
            MainAxisAlignment::Center => (free / 2.0, 0.0),
            MainAxisAlignment::SpaceBetween => {
                if count > 1 {
                    (0.0, free / (n - 1.0))
                } else {
                    (0.0, 0.0)
                }
            }
            MainAxisAlignment::SpaceAround => {
                let gap = free / n;
                (gap / 2.0, gap)
            }
            MainAxisAlignment::SpaceEvenly => {
                let gap = free / (n + 1.0);
                (gap, gap)
            }
        }
    }
}

/// Alignment on the cross axis (perpendicular to flow).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CrossAxisAlignment {
    #[default]
    Start,
    End,
    Center,
    /// Force children to the container's cross extent.
    Stretch,
}

impl CrossAxisAlignment {
    /// Cross-axis offset for a child given the container's free cross space.
    pub fn offset(self, free: f32) -> f32 {
        if free <= 0.0 {
            return 0.0;
        }
        match self {
            CrossAxisAlignment::Start | CrossAxisAlignment::Stretch => 0.0,
            CrossAxisAlignment::End => free,
            CrossAxisAlignment::Center => free / 2.0,
        }
    }
}

/// How much main-axis space a flex container occupies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MainAxisSize {
    /// Shrink to the children's combined extent.
    Min,
    /// Fill the bounded maximum.
    #[default]
    Max,
}

/// Whether a flex child must fill its allocated span.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FlexFit {
    Tight,
    #[default]
    Loose,
}

/// How a stack sizes its non-positioned children.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StackFit {
    /// Children get loose constraints; the stack wraps the largest.
    #[default]
    Loose,
    /// Children are forced to the incoming maximum.
    Expand,
}

/// A point within a rectangle, `-1.0` being the leading edge and `1.0` the
/// trailing edge on each axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Alignment {
    pub x: f32,
    pub y: f32,
}

impl Alignment {
    pub const TOP_LEFT: Self = Self::new(-1.0, -1.0);
    pub const TOP_CENTER: Self = Self::new(0.0, -1.0);
    pub const TOP_RIGHT: Self = Self::new(1.0, -1.0);
    pub const CENTER_LEFT: Self = Self::new(-1.0, 0.0);
    pub const CENTER: Self = Self::new(0.0, 0.0);
    pub const CENTER_RIGHT: Self = Self::new(1.0, 0.0);
    pub const BOTTOM_LEFT: Self = Self::new(-1.0, 1.0);
    pub const BOTTOM_CENTER: Self = Self::new(0.0, 1.0);
    pub const BOTTOM_RIGHT: Self = Self::new(1.0, 1.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Offset that places a `child` box inside `rect` at this alignment.
    pub fn within_rect(&self, rect: Rect, child: Size) -> Offset {
        Offset::new(
            rect.x + (rect.width - child.width) * (self.x + 1.0) / 2.0,
            rect.y + (rect.height - child.height) * (self.y + 1.0) / 2.0,
        )
    }

    /// The point inside `rect` that this alignment names.
    pub fn resolve(&self, rect: Rect) -> Offset {
        Offset::new(
            rect.x + rect.width * (self.x + 1.0) / 2.0,
            rect.y + rect.height * (self.y + 1.0) / 2.0,
        )
    }
}

impl Default for Alignment {
    fn default() -> Self {
        Self::TOP_LEFT
    }
}

/// Insets on each side of a box.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EdgeInsets {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl EdgeInsets {
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self { top, right, bottom, left }
    }

    pub fn all(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn symmetric(horizontal: f32, vertical: f32) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }

    /// Total horizontal inset.
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Total vertical inset.
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    pub fn top_left(&self) -> Offset {
        Offset::new(self.left, self.top)
    }

    pub fn total(&self) -> Size {
        Size::new(self.horizontal(), self.vertical())
    }
}
