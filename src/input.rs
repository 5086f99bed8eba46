//! Input model: the per-event editor snapshot and the rect gesture state machine.
//!
//! `EditorData` is what the host hands every handler: where the pointer is and
//! where the active image sits on the canvas. `RectInputState` is the gesture
//! the rect engine is tracking between mouse-down and mouse-up.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::geom::{Point, Rect, RectAnchor, is_point_inside};

/// Snapshot supplied by the host with every input event and render tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorData {
    /// Pointer position in canvas pixels, absent when the pointer is unknown.
    pub mouse_position_on_canvas: Option<Point>,
    /// Where the active image is drawn on the canvas.
    pub active_image_rect_on_canvas: Option<Rect>,
    /// Canvas pixels per image pixel.
    pub active_image_scale: f64,
}

impl Default for EditorData {
    fn default() -> Self {
        Self { mouse_position_on_canvas: None, active_image_rect_on_canvas: None, active_image_scale: 1.0 }
    }
}

impl EditorData {
    /// Image rect and scale, when both are usable for image<->canvas mapping.
    ///
    /// A zero, negative or non-finite scale counts as absent.
    #[must_use]
    pub fn image_transform(&self) -> Option<(Rect, f64)> {
        let image_rect = self.active_image_rect_on_canvas?;
        let scale = self.active_image_scale;
        (scale.is_finite() && scale > 0.0).then_some((image_rect, scale))
    }

    /// Whether the pointer is over the active image.
    #[must_use]
    pub fn is_mouse_over_image(&self) -> bool {
        match (self.active_image_rect_on_canvas, self.mouse_position_on_canvas) {
            (Some(image_rect), Some(mouse)) => is_point_inside(image_rect, mouse),
            _ => false,
        }
    }
}

/// Gesture the rect engine is tracking.
///
/// Each transition replaces the whole value, so a creation drag and a resize
/// drag can never be active together.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RectInputState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Dragging out a new rect.
    Creating {
        /// Canvas-space corner where the drag started.
        start: Point,
    },
    /// Dragging one of the active rect's anchors.
    Resizing {
        /// The grabbed anchor. Its position is in canvas pixels relative to
        /// the image's top-left corner, so the drag survives a pan.
        anchor: RectAnchor,
    },
}

impl RectInputState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    #[must_use]
    pub fn creation_start(&self) -> Option<Point> {
        match self {
            Self::Creating { start } => Some(*start),
            _ => None,
        }
    }

    #[must_use]
    pub fn resize_anchor(&self) -> Option<RectAnchor> {
        match self {
            Self::Resizing { anchor } => Some(*anchor),
            _ => None,
        }
    }
}
