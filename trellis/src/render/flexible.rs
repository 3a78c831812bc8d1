//! Flexible and Expanded wrappers for flex children.

use super::context::LayoutCx;
use super::object::{FlexParams, RenderObject};
use crate::error::LayoutResult;
use crate::layout::FlexFit;
use crate::primitives::Size;

/// Wraps one child of a [`Flex`](super::Flex) and claims a share of its
/// leftover main-axis space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flexible {
    pub flex: u32,
    pub fit: FlexFit,
}

impl Flexible {
    /// Loose fit: the child may end up smaller than its share.
    /// A zero factor is treated as 1.
    pub fn new(flex: u32) -> Self {
        Self {
            flex: flex.max(1),
            fit: FlexFit::Loose,
        }
    }

    /// Tight fit: the child fills its share exactly.
    pub fn expanded(flex: u32) -> Self {
        Self {
            flex: flex.max(1),
            fit: FlexFit::Tight,
        }
    }
}

impl RenderObject for Flexible {
    fn kind_name(&self) -> &'static str {
        match self.fit {
            FlexFit::Tight => "Expanded",
            FlexFit::Loose => "Flexible",
        }
    }

    fn max_children(&self) -> Option<usize> {
        Some(1)
    }

    fn perform_layout(&mut self, cx: &mut LayoutCx<'_>) -> LayoutResult<Size> {
        cx.layout_passthrough()
    }

    fn flex_params(&self) -> Option<FlexParams> {
        Some(FlexParams {
            flex: self.flex,
            fit: self.fit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_factor_defaults_to_one() {
        assert_eq!(Flexible::new(0).flex, 1);
        assert_eq!(Flexible::expanded(0).flex, 1);
        assert_eq!(Flexible::expanded(3).flex, 3);
    }

    #[test]
    fn reports_fit() {
        assert_eq!(
            Flexible::new(2).flex_params(),
            Some(FlexParams { flex: 2, fit: FlexFit::Loose })
        );
        assert_eq!(Flexible::expanded(1).flex_params().map(|p| p.fit), Some(FlexFit::Tight));
        assert_eq!(Flexible::expanded(1).kind_name(), "Expanded");
    }
}
