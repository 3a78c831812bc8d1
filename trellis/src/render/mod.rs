//! Render tree: nodes, the layout protocol, painting and hit testing.
//!
//! # Architecture
//!
//! ```text
//! RenderTree (slotmap arena of nodes)
//!   ├── layout(id, constraints)    ── perform_layout via LayoutCx
//!   ├── paint(root, canvas)        ── paint via PaintContext
//!   ├── hit_test(root, position)   ── hit_test via HitTestCx
//!   └── PipelineOwner              ── dirty relayout/repaint boundaries
//! ```
//!
//! Node kinds implement [`RenderObject`]. Containers live alongside:
//! [`Flex`] (Row/Column), [`Stack`] and [`IndexedStack`], plus the
//! single-child boxes.

mod context;
mod object;
mod paint;
mod pipeline;
mod tree;

mod align;
mod colored_box;
mod flex;
mod flexible;
mod padding;
mod positioned;
mod repaint_boundary;
mod sized_box;
mod stack;

pub use context::LayoutCx;
pub use hit_test::{within_bounds, HitTestCx, HitTestEntry, HitTestResult};
pub use object::{AsAny, FlexParams, RenderObject};
pub use paint::PaintContext;
pub use pipeline::PipelineOwner;
pub use tree::{NodeId, ParentData, RenderTree};

pub use align::Align;
pub use colored_box::ColoredBox;
pub use flex::Flex;
pub use flexible::Flexible;
pub use padding::Padding;
pub use positioned::{Positioned, PositionedSpec};
pub use repaint_boundary::RepaintBoundary;
pub use sized_box::SizedBox;
pub use stack::{IndexedStack, Stack};
