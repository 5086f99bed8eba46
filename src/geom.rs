//! Plane geometry for label rectangles: points, sizes, rects, resize anchors.
//!
//! Nothing here knows which coordinate space a value lives in. Callers track
//! whether a point or rect is in canvas space or image space, and convert
//! between the two with [`image_to_canvas`] / [`canvas_to_image`], passing the
//! image origin and scale explicitly.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// A point in either canvas or image space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

/// Width and height of a box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Half extents as a point, the delta used to build tolerance bands.
    #[must_use]
    pub fn half(self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Axis-aligned rectangle.
///
/// `width` and `height` may be negative while a drag is in flight; use
/// [`Rect::normalized`] before storing one.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Rect with origin `(0, 0)` and the given size.
    #[must_use]
    pub fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    /// Smallest rect containing both corners.
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        let min_x = a.x.min(b.x);
        let min_y = a.y.min(b.y);
        Self::new(min_x, min_y, a.x.max(b.x) - min_x, a.y.max(b.y) - min_y)
    }

    #[must_use]
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Same box with non-negative width and height.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self::from_corners(self.origin(), Point::new(self.x + self.width, self.y + self.height))
    }
}

/// Which handle of a rectangle an anchor represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnchorType {
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// A resize handle: its type and where it sits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectAnchor {
    pub kind: AnchorType,
    pub position: Point,
}

/// Inclusive bounds test. Only meaningful for normalized rects.
#[must_use]
pub fn is_point_inside(rect: Rect, point: Point) -> bool {
    rect.x <= point.x && point.x <= rect.x + rect.width && rect.y <= point.y && point.y <= rect.y + rect.height
}

/// Offset `rect` by the origin of `by`.
#[must_use]
pub fn translate(rect: Rect, by: Rect) -> Rect {
    Rect { x: rect.x + by.x, y: rect.y + by.y, ..rect }
}

/// Multiply every component of `rect` by `factor`.
#[must_use]
pub fn scale(rect: Rect, factor: f64) -> Rect {
    Rect::new(rect.x * factor, rect.y * factor, rect.width * factor, rect.height * factor)
}

/// Grow `rect` by `delta` on every side. A negative delta shrinks it.
#[must_use]
pub fn expand(rect: Rect, delta: Point) -> Rect {
    Rect::new(
        rect.x - delta.x,
        rect.y - delta.y,
        delta.x.mul_add(2.0, rect.width),
        delta.y.mul_add(2.0, rect.height),
    )
}

/// Clamp `point` into `rect`, one axis at a time.
#[must_use]
pub fn snap_point_to_rect(point: Point, rect: Rect) -> Point {
    if is_point_inside(rect, point) {
        return point;
    }
    Point::new(
        point.x.max(rect.x).min(rect.x + rect.width),
        point.y.max(rect.y).min(rect.y + rect.height),
    )
}

/// The eight resize anchors of `rect`, clockwise from the top-left corner.
#[must_use]
pub fn map_rect_to_anchors(rect: Rect) -> [RectAnchor; 8] {
    let left = rect.x;
    let center = rect.width.mul_add(0.5, rect.x);
    let right = rect.x + rect.width;
    let top = rect.y;
    let middle = rect.height.mul_add(0.5, rect.y);
    let bottom = rect.y + rect.height;

    [
        RectAnchor { kind: AnchorType::TopLeft, position: Point::new(left, top) },
        RectAnchor { kind: AnchorType::Top, position: Point::new(center, top) },
        RectAnchor { kind: AnchorType::TopRight, position: Point::new(right, top) },
        RectAnchor { kind: AnchorType::Right, position: Point::new(right, middle) },
        RectAnchor { kind: AnchorType::BottomRight, position: Point::new(right, bottom) },
        RectAnchor { kind: AnchorType::Bottom, position: Point::new(center, bottom) },
        RectAnchor { kind: AnchorType::BottomLeft, position: Point::new(left, bottom) },
        RectAnchor { kind: AnchorType::Left, position: Point::new(left, middle) },
    ]
}

/// Rect of `size` centered on `center`.
#[must_use]
pub fn rect_with_center_and_size(center: Point, size: Size) -> Rect {
    Rect::new(
        size.width.mul_add(-0.5, center.x),
        size.height.mul_add(-0.5, center.y),
        size.width,
        size.height,
    )
}

/// Move the edge(s) that `anchor` controls by `delta`.
///
/// The opposite edges stay put. The result is not normalized: dragging an
/// edge past its opposite produces a negative width or height.
#[must_use]
pub fn resize_rect(rect: Rect, anchor: AnchorType, delta: Point) -> Rect {
    let mut out = rect;

    if matches!(anchor, AnchorType::Left | AnchorType::TopLeft | AnchorType::BottomLeft) {
        out.x += delta.x;
        out.width -= delta.x;
    }
    if matches!(anchor, AnchorType::Right | AnchorType::TopRight | AnchorType::BottomRight) {
        out.width += delta.x;
    }
    if matches!(anchor, AnchorType::Top | AnchorType::TopLeft | AnchorType::TopRight) {
        out.y += delta.y;
        out.height -= delta.y;
    }
    if matches!(anchor, AnchorType::Bottom | AnchorType::BottomLeft | AnchorType::BottomRight) {
        out.height += delta.y;
    }

    out
}

// =============================================================
// Image <-> canvas transforms
// =============================================================

/// Map an image-space rect onto the canvas, given where the image sits on the
/// canvas and how many canvas pixels one image pixel covers.
#[must_use]
pub fn image_to_canvas(rect: Rect, image_rect_on_canvas: Rect, image_scale: f64) -> Rect {
    translate(scale(rect, image_scale), image_rect_on_canvas)
}

/// Inverse of [`image_to_canvas`].
#[must_use]
pub fn canvas_to_image(rect: Rect, image_rect_on_canvas: Rect, image_scale: f64) -> Rect {
    let relative = Rect { x: rect.x - image_rect_on_canvas.x, y: rect.y - image_rect_on_canvas.y, ..rect };
    scale(relative, 1.0 / image_scale)
}
