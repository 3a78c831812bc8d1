//! Trellis: retained-mode box layout and paint engine.
//!
//! Trellis keeps a tree of render nodes in an arena and brings it up to date
//! once per frame:
//!
//! - **Layout** passes [`BoxConstraints`] down and sizes up. Each node sizes
//!   itself within the constraints it receives and positions its children.
//! - **Paint** walks the tree in child-list order onto a [`Canvas`], caching
//!   the output of repaint boundaries as replayable [`DisplayList`] layers.
//! - **Hit testing** walks children in reverse paint order and returns the
//!   hit nodes nearest-first.
//!
//! Only dirty relayout and repaint boundaries are revisited between frames;
//! the [`PipelineOwner`] tracks them.
//!
//! # Usage
//!
//! ```ignore
//! use trellis::{BoxConstraints, Flex, Flexible, RenderTree, SizedBox};
//!
//! let mut tree = RenderTree::default();
//! let label = tree.insert(SizedBox::new(Some(80.0), Some(20.0)));
//! let fill = tree.insert(Flexible::expanded(1));
//! let row = tree.insert_with_children(Flex::row(), &[label, fill])?;
//!
//! tree.flush_layout(row, BoxConstraints::tight(400.0, 20.0))?;
//! assert_eq!(tree.size(fill).width, 320.0);
//! ```

// Core primitives
pub mod primitives;

// Constraints and layout policies
pub mod layout;

pub mod canvas;
pub mod config;
pub mod error;

// Render tree and node kinds
pub mod render;

pub use canvas::{Canvas, DisplayList, DrawOp, ImageHandle, Paint, PaintStyle, Path};
pub use config::PipelineConfig;
pub use error::{LayoutError, LayoutResult};
pub use layout::{
    Alignment, Axis, BoxConstraints, CrossAxisAlignment, EdgeInsets, FlexFit, MainAxisAlignment,
    MainAxisSize, StackFit,
};
pub use primitives::{Color, Offset, Rect, Size};
pub use render::{
    Align, ColoredBox, Flex, FlexParams, Flexible, HitTestCx, HitTestEntry, HitTestResult,
    IndexedStack, LayoutCx, NodeId, Padding, PaintContext, ParentData, PipelineOwner, Positioned,
    PositionedSpec, RenderObject, RenderTree, RepaintBoundary, SizedBox, Stack,
};
