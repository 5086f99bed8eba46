//! Default visual constants for the annotation engines.

// ── Strokes ─────────────────────────────────────────────────────

/// Outline width of a label rectangle, in canvas pixels.
pub const RECT_THICKNESS_PX: f64 = 1.0;

/// Outline color of the active (or highlighted) rectangle.
pub const RECT_ACTIVE_COLOR: &str = "#ff3434";

/// Outline color of every other rectangle.
pub const RECT_INACTIVE_COLOR: &str = "#ffff00";

// ── Anchors ─────────────────────────────────────────────────────

/// Fill color of the resize handles drawn on the active rectangle.
pub const ACTIVE_ANCHOR_COLOR: &str = "#ffffff";

/// Side length of a drawn resize handle, in canvas pixels.
pub const ANCHOR_SIZE_PX: f64 = 8.0;

/// Side length of the hover box around each anchor, in canvas pixels.
///
/// Half of this is also the width of the tolerance band on either side of a
/// rectangle's border.
pub const ANCHOR_HOVER_SIZE_PX: f64 = 20.0;

// ── Cursors ─────────────────────────────────────────────────────

/// Native cursor CSS value used while the custom cursor is drawn instead.
pub const NATIVE_CURSOR_HIDDEN: &str = "none";

/// Native cursor CSS value restored outside the canvas.
pub const NATIVE_CURSOR_DEFAULT: &str = "default";
