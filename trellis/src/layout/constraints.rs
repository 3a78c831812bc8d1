//! Box constraints for constraint-based layout.
//!
//! Constraints flow down the render tree, specifying the min/max bounds a
//! node may occupy. Sizes flow back up through [`BoxConstraints::constrain`].

use std::fmt;

use super::alignment::{Axis, EdgeInsets};
use crate::primitives::Size;

/// Constraints passed down to children during layout.
///
/// `max_width`/`max_height` may be `f32::INFINITY` (unbounded). Minimums are
/// always finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxConstraints {
    pub min_width: f32,
    pub max_width: f32,
    pub min_height: f32,
    pub max_height: f32,
}

impl BoxConstraints {
    /// Unbounded constraints (infinite max, zero min).
    pub const UNBOUNDED: Self = Self {
        min_width: 0.0,
        max_width: f32::INFINITY,
        min_height: 0.0,
        max_height: f32::INFINITY,
    };

    #[inline]
    pub fn new(min_width: f32, max_width: f32, min_height: f32, max_height: f32) -> Self {
        Self {
            min_width,
            max_width,
            min_height,
            max_height,
        }
    }

    /// Create tight constraints (exact size required).
    #[inline]
    pub fn tight(width: f32, height: f32) -> Self {
        Self::new(width, width, height, height)
    }

    /// Create loose constraints with maximum bounds.
    #[inline]
    pub fn loose(max_width: f32, max_height: f32) -> Self {
        Self::new(0.0, max_width, 0.0, max_height)
    }

    /// Tight on the axes that are given, unbounded on the others.
    #[inline]
    pub fn tight_for(width: Option<f32>, height: Option<f32>) -> Self {
        let (min_width, max_width) = width.map_or((0.0, f32::INFINITY), |w| (w, w));
        let (min_height, max_height) = height.map_or((0.0, f32::INFINITY), |h| (h, h));
        Self::new(min_width, max_width, min_height, max_height)
    }

    /// Build constraints from main/cross axis ranges.
    #[inline]
    pub fn for_axis(axis: Axis, min_main: f32, max_main: f32, min_cross: f32, max_cross: f32) -> Self {
        match axis {
            Axis::Horizontal => Self::new(min_main, max_main, min_cross, max_cross),
            Axis::Vertical => Self::new(min_cross, max_cross, min_main, max_main),
        }
    }

    /// Constrain a size to these bounds.
    ///
    /// A non-finite proposed dimension is replaced by that axis's minimum, so
    /// the result is finite even under unbounded constraints.
    #[inline]
    pub fn constrain(&self, size: Size) -> Size {
        Size {
            width: clamp_axis(size.width, self.min_width, self.max_width),
            height: clamp_axis(size.height, self.min_height, self.max_height),
        }
    }

    /// Whether `size` already lies within these bounds.
    #[inline]
    pub fn is_satisfied_by(&self, size: Size) -> bool {
        size.width >= self.min_width
            && size.width <= self.max_width
            && size.height >= self.min_height
            && size.height <= self.max_height
    }

    #[inline]
    pub fn has_bounded_width(&self) -> bool {
        self.max_width.is_finite()
    }

    #[inline]
    pub fn has_bounded_height(&self) -> bool {
        self.max_height.is_finite()
    }

    /// Whether these are tight constraints (min == max on both axes).
    #[inline]
    pub fn is_tight(&self) -> bool {
        self.min_width == self.max_width && self.min_height == self.max_height
    }

    /// Maximum extent along `axis`.
    #[inline]
    pub fn max_along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.max_width,
            Axis::Vertical => self.max_height,
        }
    }

    /// Same maximums, zero minimums.
    #[inline]
    pub fn loosen(&self) -> Self {
        Self::new(0.0, self.max_width, 0.0, self.max_height)
    }

    /// Tighten the given axes to a value clamped into the current range.
    #[inline]
    pub fn tighten(&self, width: Option<f32>, height: Option<f32>) -> Self {
        let mut c = *self;
        if let Some(w) = width {
            let w = clamp_axis(w, self.min_width, self.max_width);
            c.min_width = w;
            c.max_width = w;
        }
        if let Some(h) = height {
            let h = clamp_axis(h, self.min_height, self.max_height);
            c.min_height = h;
            c.max_height = h;
        }
        c
    }

    /// Tight to the maximum on bounded axes; unbounded axes keep their range.
    #[inline]
    pub fn expand(&self) -> Self {
        let mut c = *self;
        if self.has_bounded_width() {
            c.min_width = self.max_width;
        }
        if self.has_bounded_height() {
            c.min_height = self.max_height;
        }
        c
    }

    /// Shrink constraints by insets.
    #[inline]
    pub fn deflate(&self, insets: &EdgeInsets) -> Self {
        let horizontal = insets.horizontal();
        let vertical = insets.vertical();
        let min_width = (self.min_width - horizontal).max(0.0);
        let min_height = (self.min_height - vertical).max(0.0);
        Self {
            min_width,
            max_width: (self.max_width - horizontal).max(min_width),
            min_height,
            max_height: (self.max_height - vertical).max(min_height),
        }
    }

    /// The biggest finite size that satisfies these constraints.
    #[inline]
    pub fn biggest(&self) -> Size {
        self.constrain(Size::new(self.max_width, self.max_height))
    }

    /// The smallest size that satisfies these constraints.
    #[inline]
    pub fn smallest(&self) -> Size {
        Size::new(self.min_width, self.min_height)
    }
}

impl Default for BoxConstraints {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

impl fmt::Display for BoxConstraints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{w:{:.0}-{:.0}, h:{:.0}-{:.0}}}",
            self.min_width, self.max_width, self.min_height, self.max_height
        )
    }
}

#[inline]
fn clamp_axis(value: f32, min: f32, max: f32) -> f32 {
    let value = if value.is_finite() { value } else { min };
    // `max(min)` before `min(max)` keeps the result at `min` if a caller
    // built inverted bounds.
    value.min(max).max(min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tight_constraints() {
        let c = BoxConstraints::tight(100.0, 50.0);
        assert!(c.is_tight());
        assert_eq!(c.min_width, 100.0);
        assert_eq!(c.max_width, 100.0);
        assert_eq!(c.min_height, 50.0);
        assert_eq!(c.max_height, 50.0);
    }

    #[test]
    fn test_loose_constraints() {
        let c = BoxConstraints::loose(100.0, 50.0);
        assert!(!c.is_tight());
        assert_eq!(c.min_width, 0.0);
        assert_eq!(c.max_width, 100.0);
    }

    #[test]
    fn test_constrain() {
        let c = BoxConstraints::loose(100.0, 50.0);
        assert_eq!(c.constrain(Size::new(50.0, 25.0)), Size::new(50.0, 25.0));
        assert_eq!(c.constrain(Size::new(200.0, 100.0)), Size::new(100.0, 50.0));
    }

    #[test]
    fn test_constrain_never_yields_non_finite() {
        let c = BoxConstraints::new(10.0, f32::INFINITY, 0.0, f32::INFINITY);
        let s = c.constrain(Size::new(f32::INFINITY, f32::NAN));
        assert_eq!(s, Size::new(10.0, 0.0));
        assert!(s.is_finite());
    }

    #[test]
    fn test_tighten_clamps_into_range() {
        let c = BoxConstraints::loose(100.0, 50.0).tighten(Some(150.0), None);
        assert_eq!(c.min_width, 100.0);
        assert_eq!(c.max_width, 100.0);
        assert_eq!(c.max_height, 50.0);
        assert_eq!(c.min_height, 0.0);
    }

    #[test]
    fn test_expand_keeps_unbounded_axes() {
        let c = BoxConstraints::loose(100.0, f32::INFINITY).expand();
        assert_eq!(c.min_width, 100.0);
        assert_eq!(c.min_height, 0.0);
        assert!(!c.has_bounded_height());
    }

    #[test]
    fn test_deflate() {
        let c = BoxConstraints::tight(100.0, 50.0);
        let deflated = c.deflate(&EdgeInsets::all(10.0));
        assert_eq!(deflated.max_width, 80.0);
        assert_eq!(deflated.max_height, 30.0);

        let tiny = BoxConstraints::loose(5.0, 5.0).deflate(&EdgeInsets::all(10.0));
        assert_eq!(tiny.max_width, 0.0);
        assert_eq!(tiny.min_width, 0.0);
    }

    #[test]
    fn test_bounded_checks() {
        let unbounded = BoxConstraints::UNBOUNDED;
        assert!(!unbounded.has_bounded_width());
        assert!(!unbounded.has_bounded_height());
        assert_eq!(unbounded.biggest(), Size::ZERO);

        let bounded = BoxConstraints::loose(100.0, 50.0);
        assert!(bounded.has_bounded_width());
        assert!(bounded.has_bounded_height());
        assert_eq!(bounded.biggest(), Size::new(100.0, 50.0));
    }

    #[test]
    fn test_for_axis() {
        let row = BoxConstraints::for_axis(Axis::Horizontal, 0.0, 300.0, 10.0, 40.0);
        assert_eq!(row, BoxConstraints::new(0.0, 300.0, 10.0, 40.0));
        let column = BoxConstraints::for_axis(Axis::Vertical, 0.0, 300.0, 10.0, 40.0);
        assert_eq!(column, BoxConstraints::new(10.0, 40.0, 0.0, 300.0));
    }

    #[test]
    fn test_display() {
        let c = BoxConstraints::loose(300.0, f32::INFINITY);
        assert_eq!(c.to_string(), "{w:0-300, h:0-inf}");
    }
}
