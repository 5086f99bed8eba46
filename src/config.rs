//! Visual configuration shared by the render engines.
//!
//! A config is immutable once an engine holds it. Hosts start from
//! [`RenderEngineConfig::default`] or override any subset of fields from JSON
//! with [`RenderEngineConfig::from_json`].

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    ACTIVE_ANCHOR_COLOR, ANCHOR_HOVER_SIZE_PX, ANCHOR_SIZE_PX, RECT_ACTIVE_COLOR, RECT_INACTIVE_COLOR,
    RECT_THICKNESS_PX,
};
use crate::geom::Size;

/// Error returned by [`RenderEngineConfig::from_json`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The input is not valid JSON for a config object.
    #[error("config parse failed: {0}")]
    Parse(#[from] serde_json::Error),
    /// A field parsed but holds an unusable value.
    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

/// Colors, stroke widths and handle sizes used when drawing and hit-testing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderEngineConfig {
    /// Outline width of label rects, in canvas pixels.
    pub rect_thickness: f64,
    /// Outline color for the active or highlighted rect.
    pub rect_active_color: String,
    /// Outline color for every other rect.
    pub rect_inactive_color: String,
    /// Fill color for drawn resize handles.
    pub active_anchor_color: String,
    /// Size of a drawn resize handle.
    pub anchor_size: Size,
    /// Size of the hover box around each anchor; half of it is the edge tolerance.
    pub anchor_hover_size: Size,
}

impl Default for RenderEngineConfig {
    fn default() -> Self {
        Self {
            rect_thickness: RECT_THICKNESS_PX,
            rect_active_color: RECT_ACTIVE_COLOR.to_owned(),
            rect_inactive_color: RECT_INACTIVE_COLOR.to_owned(),
            active_anchor_color: ACTIVE_ANCHOR_COLOR.to_owned(),
            anchor_size: Size::new(ANCHOR_SIZE_PX, ANCHOR_SIZE_PX),
            anchor_hover_size: Size::new(ANCHOR_HOVER_SIZE_PX, ANCHOR_HOVER_SIZE_PX),
        }
    }
}

impl RenderEngineConfig {
    /// Parse a (possibly partial) JSON object; missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] when a value fails [`Self::validate`].
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every value can be drawn with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_positive(self.rect_thickness) {
            return Err(ConfigError::Invalid { field: "rect_thickness", reason: "must be positive" });
        }
        for (field, color) in [
            ("rect_active_color", &self.rect_active_color),
            ("rect_inactive_color", &self.rect_inactive_color),
            ("active_anchor_color", &self.active_anchor_color),
        ] {
            if color.trim().is_empty() {
                return Err(ConfigError::Invalid { field, reason: "must not be empty" });
            }
        }
        for (field, size) in [("anchor_size", self.anchor_size), ("anchor_hover_size", self.anchor_hover_size)] {
            if !(is_positive(size.width) && is_positive(size.height)) {
                return Err(ConfigError::Invalid { field, reason: "width and height must be positive" });
            }
        }
        Ok(())
    }
}

/// False for zero, negatives and NaN.
fn is_positive(value: f64) -> bool {
    value > 0.0
}
