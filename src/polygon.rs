//! Polygon annotation engine. Not implemented yet: it tracks no gestures and
//! only keeps the cursors in step with the pointer.

#[cfg(test)]
#[path = "polygon_test.rs"]
mod polygon_test;

use crate::consts::{NATIVE_CURSOR_DEFAULT, NATIVE_CURSOR_HIDDEN};
use crate::draw::DrawSurface;
use crate::engine::RenderEngine;
use crate::input::EditorData;
use crate::store::{CustomCursorStyle, EditorStore};

/// Engine for [`crate::engine::LabelType::Polygon`].
pub struct PolygonRenderEngine<S, D> {
    store: S,
    surface: D,
}

impl<S: EditorStore, D: DrawSurface> PolygonRenderEngine<S, D> {
    #[must_use]
    pub fn new(store: S, surface: D) -> Self {
        Self { store, surface }
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn surface(&self) -> &D {
        &self.surface
    }

    fn update_cursor_style(&mut self, data: &EditorData) {
        if data.mouse_position_on_canvas.is_none() {
            return;
        }
        if data.is_mouse_over_image() {
            self.store.update_custom_cursor_style(CustomCursorStyle::Default);
            self.surface.set_native_cursor(NATIVE_CURSOR_HIDDEN);
        } else {
            self.surface.set_native_cursor(NATIVE_CURSOR_DEFAULT);
        }
    }
}

impl<S: EditorStore, D: DrawSurface> RenderEngine for PolygonRenderEngine<S, D> {
    fn on_mouse_down(&mut self, _data: &EditorData) {}

    fn on_mouse_up(&mut self, _data: &EditorData) {}

    fn on_mouse_move(&mut self, _data: &EditorData) {}

    fn render(&mut self, data: &EditorData) {
        self.update_cursor_style(data);
    }

    fn is_in_progress(&self) -> bool {
        false
    }
}
