//! Drawing: the 2D surface abstraction and pixel-aligned rect primitives.
//!
//! Engines never talk to [`web_sys::CanvasRenderingContext2d`] directly. They
//! draw through [`DrawSurface`], which [`CanvasSurface`] implements for a real
//! `<canvas>` element and tests implement with a recorder.

#[cfg(test)]
#[path = "draw_test.rs"]
mod draw_test;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::geom::{Point, Rect, Size};

/// Error raised while binding to a canvas element.
#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    /// `getContext("2d")` returned `null`.
    #[error("canvas has no 2d context")]
    ContextUnavailable,
    /// The context object is not a `CanvasRenderingContext2d`.
    #[error("canvas context is not a CanvasRenderingContext2d")]
    NotCanvas2d,
    /// A browser call threw.
    #[error("canvas call failed: {0}")]
    Js(String),
}

impl From<JsValue> for SurfaceError {
    fn from(value: JsValue) -> Self {
        Self::Js(format!("{value:?}"))
    }
}

/// The drawing surface an engine renders onto.
///
/// Mirrors the subset of the Canvas 2D API the engines need, plus the element
/// level queries (pixel size, native cursor).
pub trait DrawSurface {
    /// Pixel dimensions of the surface.
    fn size(&self) -> Size;

    fn save(&mut self);
    fn restore(&mut self);
    fn set_stroke_style(&mut self, color: &str);
    fn set_fill_style(&mut self, color: &str);
    fn set_line_width(&mut self, width: f64);
    fn stroke_rect(&mut self, rect: Rect);
    fn fill_rect(&mut self, rect: Rect);

    /// Set the CSS `cursor` of the underlying element.
    fn set_native_cursor(&mut self, cursor: &str);
}

/// Round a point to the nearest pixel and shift it onto the pixel center.
#[must_use]
pub fn set_point_between_pixels(point: Point) -> Point {
    Point::new((point.x + 0.5).floor() + 0.5, (point.y + 0.5).floor() + 0.5)
}

/// Align both corners of `rect` to pixel centers so a 1px stroke covers one
/// row/column instead of blurring across two.
#[must_use]
pub fn set_rect_between_pixels(rect: Rect) -> Rect {
    let top_left = set_point_between_pixels(rect.origin());
    let bottom_right = set_point_between_pixels(Point::new(rect.x + rect.width, rect.y + rect.height));
    Rect::new(top_left.x, top_left.y, bottom_right.x - top_left.x, bottom_right.y - top_left.y)
}

/// Stroke the outline of `rect`.
pub fn draw_rect(surface: &mut impl DrawSurface, rect: Rect, color: &str, thickness: f64) {
    surface.save();
    surface.set_stroke_style(color);
    surface.set_line_width(thickness);
    surface.stroke_rect(rect);
    surface.restore();
}

/// Fill `rect` with a solid color.
pub fn draw_rect_with_fill(surface: &mut impl DrawSurface, rect: Rect, color: &str) {
    surface.save();
    surface.set_fill_style(color);
    surface.fill_rect(rect);
    surface.restore();
}

// =============================================================
// Browser canvas
// =============================================================

/// [`DrawSurface`] backed by an `HtmlCanvasElement` and its 2D context.
#[derive(Clone)]
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Bind to `canvas`, acquiring its 2D context.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError`] if the element has no usable 2D context.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, SurfaceError> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or(SurfaceError::ContextUnavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SurfaceError::NotCanvas2d)?;
        Ok(Self { canvas, ctx })
    }
}

impl DrawSurface for CanvasSurface {
    fn size(&self) -> Size {
        Size::new(f64::from(self.canvas.width()), f64::from(self.canvas.height()))
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn set_stroke_style(&mut self, color: &str) {
        self.ctx.set_stroke_style_str(color);
    }

    fn set_fill_style(&mut self, color: &str) {
        self.ctx.set_fill_style_str(color);
    }

    fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }

    fn stroke_rect(&mut self, rect: Rect) {
        self.ctx.stroke_rect(rect.x, rect.y, rect.width, rect.height);
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.ctx.fill_rect(rect.x, rect.y, rect.width, rect.height);
    }

    fn set_native_cursor(&mut self, cursor: &str) {
        if let Err(err) = self.canvas.style().set_property("cursor", cursor) {
            tracing::warn!(?err, cursor, "failed to set canvas cursor");
        }
    }
}
