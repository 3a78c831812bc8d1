//! Layout value types: constraints and the policies containers interpret.

pub mod alignment;
pub mod constraints;

pub use alignment::{
    Alignment, Axis, CrossAxisAlignment, EdgeInsets, FlexFit, MainAxisAlignment, MainAxisSize,
    StackFit,
};
pub use constraints::BoxConstraints;
