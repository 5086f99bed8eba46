#![allow(clippy::float_cmp)]

use super::*;
use crate::testing::RecordingSurface;

const IMAGE: Rect = Rect { x: 100.0, y: 50.0, width: 400.0, height: 300.0 };

fn editor() -> (EditorCore<RecordingSurface>, ImageId) {
    let mut editor = EditorCore::new(RecordingSurface::new(800.0, 600.0), RenderEngineConfig::default());
    let image_id = editor.add_image();
    editor.set_image_rect(Some(IMAGE), 1.0);
    (editor, image_id)
}

fn drag(editor: &mut EditorCore<RecordingSurface>, from: (f64, f64), to: (f64, f64)) {
    editor.mouse_down(Point::new(from.0, from.1));
    editor.mouse_move(Point::new(to.0, to.1));
    editor.mouse_up(Point::new(to.0, to.1));
}

// =============================================================
// Setup
// =============================================================

#[test]
fn starts_in_rectangle_mode() {
    let editor = EditorCore::new(RecordingSurface::new(10.0, 10.0), RenderEngineConfig::default());
    assert_eq!(editor.label_type(), LabelType::Rectangle);
    assert!(editor.store().borrow().images().is_empty());
    assert_eq!(editor.data(), EditorData::default());
}

#[test]
fn first_image_is_active() {
    let (mut editor, first) = editor();
    editor.add_image();
    assert_eq!(editor.store().borrow().active_image().map(|i| i.id), Some(first));
}

// =============================================================
// Gestures
// =============================================================

#[test]
fn drag_creates_and_selects_label() {
    let (mut editor, image_id) = editor();
    editor.set_active_label_name_index(4);

    drag(&mut editor, (150.0, 100.0), (250.0, 200.0));

    let labels = editor.labels(image_id).unwrap();
    assert_eq!(labels.len(), 1);
    assert_eq!(labels[0].rect, Rect::new(50.0, 50.0, 100.0, 100.0));
    assert_eq!(labels[0].label_index, 4);
    assert_eq!(editor.active_label_id(), Some(labels[0].id));
    assert!(!editor.is_in_progress());
}

#[test]
fn gesture_without_image_rect_is_ignored() {
    let (mut editor, image_id) = editor();
    editor.set_image_rect(None, 1.0);
    drag(&mut editor, (150.0, 100.0), (250.0, 200.0));
    assert!(editor.labels(image_id).unwrap().is_empty());
}

#[test]
fn hover_highlights_label() {
    let (mut editor, _) = editor();
    drag(&mut editor, (150.0, 100.0), (250.0, 200.0));
    let id = editor.active_label_id();

    editor.mouse_move(Point::new(150.0, 150.0));
    assert_eq!(editor.highlighted_label_id(), id);
    editor.mouse_move(Point::new(200.0, 150.0));
    assert!(editor.highlighted_label_id().is_none());
}

#[test]
fn render_updates_cursor_style() {
    let (mut editor, _) = editor();
    drag(&mut editor, (150.0, 100.0), (250.0, 200.0));

    editor.set_mouse(Some(Point::new(250.0, 200.0)));
    editor.render();
    assert_eq!(editor.custom_cursor_style(), CustomCursorStyle::Move);

    editor.set_mouse(Some(Point::new(400.0, 300.0)));
    editor.render();
    assert_eq!(editor.custom_cursor_style(), CustomCursorStyle::Default);
}

#[test]
fn switching_image_drops_selection() {
    let (mut editor, _) = editor();
    let second = editor.add_image();
    drag(&mut editor, (150.0, 100.0), (250.0, 200.0));
    assert!(editor.active_label_id().is_some());

    editor.set_active_image(1);
    assert!(editor.active_label_id().is_none());
    drag(&mut editor, (300.0, 200.0), (350.0, 260.0));
    assert_eq!(editor.labels(second).unwrap().len(), 1);
}

// =============================================================
// Label type
// =============================================================

#[test]
fn polygon_mode_ignores_gestures() {
    let (mut editor, image_id) = editor();
    editor.set_label_type(LabelType::Polygon);
    assert_eq!(editor.label_type(), LabelType::Polygon);

    drag(&mut editor, (150.0, 100.0), (250.0, 200.0));
    assert!(editor.labels(image_id).unwrap().is_empty());

    editor.set_label_type(LabelType::Rectangle);
    drag(&mut editor, (150.0, 100.0), (250.0, 200.0));
    assert_eq!(editor.labels(image_id).unwrap().len(), 1);
}

#[test]
fn switching_mode_drops_gesture_in_progress() {
    let (mut editor, image_id) = editor();
    editor.mouse_down(Point::new(150.0, 100.0));
    assert!(editor.is_in_progress());

    editor.set_label_type(LabelType::Polygon);
    editor.set_label_type(LabelType::Rectangle);
    assert!(!editor.is_in_progress());

    editor.mouse_up(Point::new(250.0, 200.0));
    assert!(editor.labels(image_id).unwrap().is_empty());
}

#[test]
fn setting_same_mode_keeps_engine() {
    let (mut editor, _) = editor();
    editor.mouse_down(Point::new(150.0, 100.0));
    editor.set_label_type(LabelType::Rectangle);
    assert!(editor.is_in_progress());
}

// =============================================================
// Label import / export
// =============================================================

#[test]
fn labels_for_unknown_image_fail() {
    let (mut editor, _) = editor();
    let missing = Uuid::new_v4();
    assert!(matches!(editor.labels(missing), Err(HostError::UnknownImage(id)) if id == missing));
    assert!(matches!(editor.load_labels(missing, Vec::new()), Err(HostError::UnknownImage(_))));
}

#[test]
fn loaded_labels_are_drawn() {
    let (mut editor, image_id) = editor();
    let label = LabelRect { id: Uuid::new_v4(), label_index: 1, rect: Rect::new(0.0, 0.0, 50.0, 50.0) };
    editor.load_labels(image_id, vec![label.clone()]).unwrap();
    assert_eq!(editor.labels(image_id).unwrap(), vec![label]);

    editor.set_mouse(Some(Point::new(700.0, 500.0)));
    editor.render();
    let AnnotationEngine::Rect(engine) = editor.engine() else {
        panic!("expected rect engine");
    };
    assert_eq!(engine.surface().stroked(), vec![Rect::new(100.5, 50.5, 50.0, 50.0)]);
}

#[test]
fn loaded_flipped_rect_is_normalized_and_selectable() {
    let (mut editor, image_id) = editor();
    let label = LabelRect { id: Uuid::new_v4(), label_index: 0, rect: Rect::new(150.0, 150.0, -100.0, -100.0) };
    editor.load_labels(image_id, vec![label.clone()]).unwrap();
    assert_eq!(editor.labels(image_id).unwrap()[0].rect, Rect::new(50.0, 50.0, 100.0, 100.0));

    // Visible top-left corner: image (50, 50) -> canvas (150, 100).
    editor.mouse_move(Point::new(150.0, 100.0));
    assert_eq!(editor.highlighted_label_id(), Some(label.id));

    editor.mouse_down(Point::new(150.0, 100.0));
    assert_eq!(editor.active_label_id(), Some(label.id));
    let AnnotationEngine::Rect(engine) = editor.engine() else {
        panic!("expected rect engine");
    };
    assert!(engine.state().resize_anchor().is_some());
}

#[test]
fn labels_survive_json_round_trip() {
    let (mut editor, image_id) = editor();
    drag(&mut editor, (150.0, 100.0), (250.0, 200.0));
    let json = serde_json::to_string(&editor.labels(image_id).unwrap()).unwrap();

    let other = editor.add_image();
    let labels: Vec<LabelRect> = serde_json::from_str(&json).unwrap();
    editor.load_labels(other, labels).unwrap();

    assert_eq!(editor.labels(other).unwrap(), editor.labels(image_id).unwrap());
}

// =============================================================
// Errors
// =============================================================

#[test]
fn host_error_messages() {
    let id = Uuid::nil();
    assert_eq!(
        HostError::UnknownImage(id).to_string(),
        "unknown image: 00000000-0000-0000-0000-000000000000"
    );
    let err = HostError::from(UnknownLabelType("circle".into()));
    assert_eq!(err.to_string(), "unknown label type: circle");
    let err = HostError::from(Uuid::parse_str("nope").unwrap_err());
    assert!(err.to_string().starts_with("invalid id:"));
}
