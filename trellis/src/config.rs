//! Pipeline configuration.

use serde::{Deserialize, Serialize};

/// Settings for a render tree's paint pass.
///
/// Every field has a default, so a partial JSON document is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Stroke each painted node's bounds, cycling colours by depth.
    pub show_layout_bounds: bool,

    /// Stroke width for layout bounds. Values <= 0 fall back to 1.0.
    pub debug_stroke_width: f32,

    /// Clip the paint pass to the root's bounds and skip children that fall
    /// entirely outside the current clip.
    pub cull_offscreen: bool,
}

impl PipelineConfig {
    /// Stroke width actually used for debug bounds.
    pub fn effective_stroke_width(&self) -> f32 {
        if self.debug_stroke_width > 0.0 {
            self.debug_stroke_width
        } else {
            1.0
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            show_layout_bounds: false,
            debug_stroke_width: 1.0,
            cull_offscreen: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_uses_defaults() {
        let config: PipelineConfig = serde_json::from_str(r#"{"show_layout_bounds": true}"#).unwrap();
        assert!(config.show_layout_bounds);
        assert!(config.cull_offscreen);
        assert_eq!(config.debug_stroke_width, 1.0);
    }

    #[test]
    fn non_positive_stroke_width_falls_back() {
        let config = PipelineConfig {
            debug_stroke_width: 0.0,
            ..Default::default()
        };
        assert_eq!(config.effective_stroke_width(), 1.0);
    }
}
