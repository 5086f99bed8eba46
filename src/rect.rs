//! Rectangle annotation engine: create, select, highlight and resize label
//! rects with the mouse, and draw them.
//!
//! Labels are stored in image pixels. Every handler maps them onto the canvas
//! with the snapshot's image rect and scale, hit-tests there, and maps results
//! back before writing to the store.
//!
//! Hit-testing only looks at a band around each rect's border (half the
//! anchor hover size on either side). A click deep inside a rect misses it
//! and starts a new rect instead; there is no body-drag.

#[cfg(test)]
#[path = "rect_test.rs"]
mod rect_test;

use tracing::{debug, trace, warn};
use uuid::Uuid;

use crate::config::RenderEngineConfig;
use crate::consts::{NATIVE_CURSOR_DEFAULT, NATIVE_CURSOR_HIDDEN};
use crate::draw::{DrawSurface, draw_rect, draw_rect_with_fill, set_rect_between_pixels};
use crate::engine::RenderEngine;
use crate::geom::{
    Point, Rect, RectAnchor, canvas_to_image, expand, image_to_canvas, is_point_inside, map_rect_to_anchors,
    rect_with_center_and_size, resize_rect, snap_point_to_rect,
};
use crate::input::{EditorData, RectInputState};
use crate::store::{CustomCursorStyle, EditorStore, ImageData, LabelRect};

/// Engine for [`crate::engine::LabelType::Rectangle`].
pub struct RectRenderEngine<S, D> {
    config: RenderEngineConfig,
    store: S,
    surface: D,
    state: RectInputState,
}

impl<S: EditorStore, D: DrawSurface> RectRenderEngine<S, D> {
    #[must_use]
    pub fn new(store: S, surface: D, config: RenderEngineConfig) -> Self {
        Self { config, store, surface, state: RectInputState::Idle }
    }

    // --- Accessors ---

    #[must_use]
    pub fn state(&self) -> RectInputState {
        self.state
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn surface(&self) -> &D {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut D {
        &mut self.surface
    }

    // --- Hit-testing ---

    /// Whether `mouse` lies in the tolerance band around `rect_on_canvas`'s
    /// border: inside the rect grown by half the hover size, outside the rect
    /// shrunk by the same amount.
    #[must_use]
    pub fn is_mouse_over_rect_edges(&self, rect_on_canvas: Rect, mouse: Point) -> bool {
        let delta = self.config.anchor_hover_size.half();
        let outer = expand(rect_on_canvas, delta);
        let inner = expand(rect_on_canvas, Point::new(-delta.x, -delta.y));
        is_point_inside(outer, mouse) && !is_point_inside(inner, mouse)
    }

    /// The label whose border is under the pointer. The active label wins,
    /// then list order.
    #[must_use]
    pub fn label_rect_under_mouse(&self, data: &EditorData) -> Option<LabelRect> {
        let mouse = data.mouse_position_on_canvas?;
        let (image_rect, scale) = data.image_transform()?;
        let image = self.store.active_image()?;
        self.find_label_rect_under_mouse(&image, image_rect, scale, mouse)
            .cloned()
    }

    /// The first anchor, over all labels in list order, whose hover box
    /// contains the pointer.
    #[must_use]
    pub fn anchor_under_mouse(&self, data: &EditorData) -> Option<RectAnchor> {
        let mouse = data.mouse_position_on_canvas?;
        let (image_rect, scale) = data.image_transform()?;
        let image = self.store.active_image()?;
        self.find_anchor_under_mouse(&image, image_rect, scale, mouse)
    }

    fn find_label_rect_under_mouse<'a>(
        &self,
        image: &'a ImageData,
        image_rect: Rect,
        scale: f64,
        mouse: Point,
    ) -> Option<&'a LabelRect> {
        let is_over = |label: &LabelRect| {
            self.is_mouse_over_rect_edges(image_to_canvas(label.rect, image_rect, scale), mouse)
        };

        let active = self
            .store
            .active_label_id()
            .and_then(|id| image.label_rect(&id));
        if let Some(active) = active.filter(|&label| is_over(label)) {
            return Some(active);
        }

        image.label_rects.iter().find(|&label| is_over(label))
    }

    fn find_anchor_under_mouse(&self, image: &ImageData, image_rect: Rect, scale: f64, mouse: Point) -> Option<RectAnchor> {
        image
            .label_rects
            .iter()
            .find_map(|label| self.anchor_under_mouse_by_rect(image_to_canvas(label.rect, image_rect, scale), mouse))
    }

    /// First of `rect_on_canvas`'s eight anchors whose hover box contains `mouse`.
    fn anchor_under_mouse_by_rect(&self, rect_on_canvas: Rect, mouse: Point) -> Option<RectAnchor> {
        map_rect_to_anchors(rect_on_canvas)
            .into_iter()
            .find(|anchor| is_point_inside(rect_with_center_and_size(anchor.position, self.config.anchor_hover_size), mouse))
    }

    // --- Transitions ---

    fn start_rect_creation(&mut self, mouse: Point, image_rect: Rect) {
        let start = snap_point_to_rect(mouse, image_rect);
        self.state = RectInputState::Creating { start };
        self.store.update_active_label_id(None);
        debug!(x = start.x, y = start.y, "rect creation started");
    }

    fn start_rect_resize(&mut self, anchor: RectAnchor, image_rect: Rect) {
        let relative = RectAnchor { kind: anchor.kind, position: anchor.position - image_rect.origin() };
        self.state = RectInputState::Resizing { anchor: relative };
        debug!(anchor = ?anchor.kind, "rect resize started");
    }

    fn end_rect_transformation(&mut self) {
        if !self.state.is_idle() {
            debug!(state = ?self.state, "rect gesture ended");
        }
        self.state = RectInputState::Idle;
    }

    // --- Commits ---

    /// Store `rect_on_canvas` as a new label on the active image and select it.
    fn add_rect_label(&mut self, rect_on_canvas: Rect, image_rect: Rect, scale: f64) {
        let Some(mut image) = self.store.active_image() else {
            warn!("rect created with no active image");
            return;
        };

        let label = LabelRect {
            id: Uuid::new_v4(),
            label_index: self.store.active_label_name_index(),
            rect: canvas_to_image(rect_on_canvas, image_rect, scale),
        };
        let id = label.id;
        debug!(%id, image_id = %image.id, rect = ?label.rect, "label rect created");

        image.label_rects.push(label);
        self.store.update_image_label_rects(image.id, image.label_rects);
        self.store.update_first_label_created_flag(true);
        self.store.update_active_label_id(Some(id));
    }

    /// Apply the drag from `anchor` to `mouse_snapped` to the active label.
    fn commit_resize(&mut self, anchor: RectAnchor, mouse_snapped: Point, image_rect: Rect, scale: f64) {
        let Some(target) = self.store.active_label_rect() else {
            warn!(active_id = ?self.store.active_label_id(), "rect resize target is missing");
            return;
        };
        let Some(mut image) = self.store.active_image() else {
            return;
        };

        let rect = image_to_canvas(target.rect, image_rect, scale);
        let delta = mouse_snapped - (anchor.position + image_rect.origin());
        let resized = canvas_to_image(resize_rect(rect, anchor.kind, delta), image_rect, scale).normalized();
        debug!(id = %target.id, rect = ?resized, "label rect resized");

        for label in image.label_rects.iter_mut().filter(|l| l.id == target.id) {
            label.rect = resized;
        }
        self.store.update_image_label_rects(image.id, image.label_rects);
    }

    // --- Rendering ---

    fn draw_inactive_rect(&mut self, label: &LabelRect, image_rect: Rect, scale: f64, highlighted: bool) {
        let rect = image_to_canvas(label.rect, image_rect, scale);
        self.render_rect(rect, highlighted);
    }

    /// Draw the active label, previewing an in-flight resize.
    fn draw_active_rect(&mut self, label: &LabelRect, mouse: Option<Point>, image_rect: Rect, scale: f64) {
        let mut rect = image_to_canvas(label.rect, image_rect, scale);
        if let (Some(anchor), Some(mouse)) = (self.state.resize_anchor(), mouse) {
            let start = anchor.position + image_rect.origin();
            let end = snap_point_to_rect(mouse, image_rect);
            rect = resize_rect(rect, anchor.kind, end - start);
        }
        self.render_rect(rect, true);
    }

    fn draw_currently_created_rect(&mut self, mouse: Option<Point>, image_rect: Rect) {
        let (Some(start), Some(mouse)) = (self.state.creation_start(), mouse) else {
            return;
        };
        let end = snap_point_to_rect(mouse, image_rect);
        let rect = Rect::new(start.x, start.y, end.x - start.x, end.y - start.y);
        draw_rect(
            &mut self.surface,
            set_rect_between_pixels(rect),
            &self.config.rect_active_color,
            self.config.rect_thickness,
        );
    }

    fn render_rect(&mut self, rect_on_canvas: Rect, is_active: bool) {
        let color = if is_active {
            &self.config.rect_active_color
        } else {
            &self.config.rect_inactive_color
        };
        draw_rect(&mut self.surface, set_rect_between_pixels(rect_on_canvas), color, self.config.rect_thickness);

        if is_active {
            for anchor in map_rect_to_anchors(rect_on_canvas) {
                let handle = rect_with_center_and_size(anchor.position, self.config.anchor_size);
                draw_rect_with_fill(
                    &mut self.surface,
                    set_rect_between_pixels(handle),
                    &self.config.active_anchor_color,
                );
            }
        }
    }

    /// Pick the custom and native cursors for the pointer position.
    pub fn update_cursor_style(&mut self, data: &EditorData) {
        let Some(mouse) = data.mouse_position_on_canvas else {
            return;
        };

        if self.anchor_under_mouse(data).is_some() || self.state.resize_anchor().is_some() {
            self.store.update_custom_cursor_style(CustomCursorStyle::Move);
            return;
        }

        if is_point_inside(Rect::from_size(self.surface.size()), mouse) {
            let style = if !data.is_mouse_over_image() && self.state.creation_start().is_some() {
                CustomCursorStyle::Move
            } else {
                CustomCursorStyle::Default
            };
            self.store.update_custom_cursor_style(style);
            self.surface.set_native_cursor(NATIVE_CURSOR_HIDDEN);
        } else {
            self.surface.set_native_cursor(NATIVE_CURSOR_DEFAULT);
        }
    }
}

impl<S: EditorStore, D: DrawSurface> RenderEngine for RectRenderEngine<S, D> {
    fn on_mouse_down(&mut self, data: &EditorData) {
        let Some(mouse) = data.mouse_position_on_canvas else {
            return;
        };
        let Some((image_rect, scale)) = data.image_transform() else {
            return;
        };
        if !is_point_inside(Rect::from_size(self.surface.size()), mouse) {
            return;
        }
        let Some(image) = self.store.active_image() else {
            return;
        };

        if let Some(label) = self.find_label_rect_under_mouse(&image, image_rect, scale, mouse) {
            let rect = image_to_canvas(label.rect, image_rect, scale);
            match self.anchor_under_mouse_by_rect(rect, mouse) {
                Some(anchor) => {
                    self.store.update_active_label_id(Some(label.id));
                    self.start_rect_resize(anchor, image_rect);
                }
                None => self.start_rect_creation(mouse, image_rect),
            }
        } else if is_point_inside(image_rect, mouse) {
            self.start_rect_creation(mouse, image_rect);
        }
    }

    fn on_mouse_up(&mut self, data: &EditorData) {
        if let (Some(mouse), Some((image_rect, scale))) = (data.mouse_position_on_canvas, data.image_transform()) {
            let snapped = snap_point_to_rect(mouse, image_rect);
            match self.state {
                RectInputState::Creating { start } if start != snapped => {
                    self.add_rect_label(Rect::from_corners(start, snapped), image_rect, scale);
                }
                RectInputState::Resizing { anchor } => self.commit_resize(anchor, snapped, image_rect, scale),
                RectInputState::Creating { .. } | RectInputState::Idle => {}
            }
        }
        self.end_rect_transformation();
    }

    fn on_mouse_move(&mut self, data: &EditorData) {
        if self.state.resize_anchor().is_some() {
            return;
        }
        let Some(mouse) = data.mouse_position_on_canvas else {
            return;
        };
        let Some((image_rect, scale)) = data.image_transform() else {
            return;
        };
        let Some(image) = self.store.active_image() else {
            return;
        };

        // Only a pointer over the image can highlight; leaving it clears.
        let under = if is_point_inside(image_rect, mouse) {
            self.find_label_rect_under_mouse(&image, image_rect, scale, mouse)
                .map(|label| label.id)
        } else {
            None
        };
        if under != self.store.highlighted_label_id() {
            trace!(highlighted = ?under, "highlight changed");
            self.store.update_highlighted_label_id(under);
        }
    }

    fn render(&mut self, data: &EditorData) {
        let Some(image) = self.store.active_image() else {
            return;
        };

        if let Some((image_rect, scale)) = data.image_transform() {
            let active_id = self.store.active_label_id();
            let highlighted_id = self.store.highlighted_label_id();
            for label in &image.label_rects {
                if Some(label.id) == active_id {
                    self.draw_active_rect(label, data.mouse_position_on_canvas, image_rect, scale);
                } else {
                    self.draw_inactive_rect(label, image_rect, scale, Some(label.id) == highlighted_id);
                }
            }
            self.draw_currently_created_rect(data.mouse_position_on_canvas, image_rect);
        }

        self.update_cursor_style(data);
    }

    fn is_in_progress(&self) -> bool {
        !self.state.is_idle()
    }
}
