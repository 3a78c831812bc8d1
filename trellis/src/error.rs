//! Layout error types.

use thiserror::Error;

use crate::render::NodeId;

/// Errors that abort a layout pass for a subtree.
///
/// The two unbounded variants are widget-composition mistakes: the message
/// names the container and the axis so the tree can be fixed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("Expanded/Flexible used in {container} with unbounded {axis}")]
    UnboundedFlex {
        container: &'static str,
        axis: &'static str,
    },

    #[error("CrossAxisAlignmentStretch used in {container} with unbounded {axis}")]
    UnboundedStretch {
        container: &'static str,
        axis: &'static str,
    },

    #[error("render node not found: {0:?}")]
    NodeNotFound(NodeId),

    #[error("render node {0:?} re-entered during its own layout or paint")]
    NodeBusy(NodeId),

    #[error("render node {id:?} is not a {expected}")]
    WrongKind { id: NodeId, expected: &'static str },

    #[error("cannot attach {child:?} under {parent:?}: it is an ancestor")]
    CycleDetected { parent: NodeId, child: NodeId },

    #[error("{kind} {parent:?} takes at most {max} child(ren), got {given}")]
    TooManyChildren {
        parent: NodeId,
        kind: &'static str,
        max: usize,
        given: usize,
    },
}

pub type LayoutResult<T> = Result<T, LayoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbounded_flex_message_names_container_and_axis() {
        let err = LayoutError::UnboundedFlex {
            container: "Row",
            axis: "width",
        };
        assert_eq!(err.to_string(), "Expanded/Flexible used in Row with unbounded width");
    }

    #[test]
    fn unbounded_stretch_message() {
        let err = LayoutError::UnboundedStretch {
            container: "Column",
            axis: "width",
        };
        assert_eq!(
            err.to_string(),
            "CrossAxisAlignmentStretch used in Column with unbounded width"
        );
    }
}
