use uuid::Uuid;

use super::*;
use crate::geom::{Point, Rect};
use crate::store::{ImageData, MemoryStore};
use crate::testing::RecordingSurface;

fn engine() -> PolygonRenderEngine<MemoryStore, RecordingSurface> {
    let mut store = MemoryStore::new();
    store.add_image(ImageData::new(Uuid::new_v4()));
    store.update_custom_cursor_style(CustomCursorStyle::Move);
    PolygonRenderEngine::new(store, RecordingSurface::new(400.0, 300.0))
}

fn data(x: f64, y: f64) -> EditorData {
    EditorData {
        mouse_position_on_canvas: Some(Point::new(x, y)),
        active_image_rect_on_canvas: Some(Rect::new(50.0, 50.0, 200.0, 100.0)),
        active_image_scale: 1.0,
    }
}

#[test]
fn handlers_never_start_a_gesture() {
    let mut engine = engine();
    engine.on_mouse_down(&data(100.0, 100.0));
    assert!(!engine.is_in_progress());
    engine.on_mouse_move(&data(120.0, 120.0));
    engine.on_mouse_up(&data(120.0, 120.0));
    assert!(!engine.is_in_progress());
    assert!(engine.store().active_image().is_some_and(|i| i.label_rects.is_empty()));
}

#[test]
fn render_over_image_hides_native_cursor() {
    let mut engine = engine();
    engine.render(&data(100.0, 100.0));
    assert_eq!(engine.surface().last_cursor(), Some(NATIVE_CURSOR_HIDDEN));
    assert_eq!(engine.store().custom_cursor_style(), CustomCursorStyle::Default);
}

#[test]
fn render_outside_image_restores_native_cursor() {
    let mut engine = engine();
    engine.render(&data(10.0, 10.0));
    assert_eq!(engine.surface().last_cursor(), Some(NATIVE_CURSOR_DEFAULT));
    assert_eq!(engine.store().custom_cursor_style(), CustomCursorStyle::Move);
}

#[test]
fn render_without_mouse_touches_nothing() {
    let mut engine = engine();
    engine.render(&EditorData { mouse_position_on_canvas: None, ..data(0.0, 0.0) });
    assert!(engine.surface().ops.is_empty());
}
