use super::*;

fn label(x: f64) -> LabelRect {
    LabelRect { id: Uuid::new_v4(), label_index: 0, rect: Rect::new(x, 0.0, 10.0, 10.0) }
}

fn store_with_images(n: usize) -> (MemoryStore, Vec<ImageId>) {
    let mut store = MemoryStore::new();
    let ids: Vec<ImageId> = (0..n).map(|_| Uuid::new_v4()).collect();
    for id in &ids {
        store.add_image(ImageData::new(*id));
    }
    (store, ids)
}

// =============================================================
// Images
// =============================================================

#[test]
fn new_store_has_no_active_image() {
    let store = MemoryStore::new();
    assert!(store.active_image().is_none());
    assert!(store.active_image_index().is_none());
}

#[test]
fn first_added_image_becomes_active() {
    let (store, ids) = store_with_images(2);
    assert_eq!(store.active_image().map(|i| i.id), Some(ids[0]));
}

#[test]
fn switching_image_clears_selection_and_highlight() {
    let (mut store, ids) = store_with_images(2);
    store.update_active_label_id(Some(Uuid::new_v4()));
    store.update_highlighted_label_id(Some(Uuid::new_v4()));
    store.set_active_image_index(1);
    assert_eq!(store.active_image().map(|i| i.id), Some(ids[1]));
    assert!(store.active_label_id().is_none());
    assert!(store.highlighted_label_id().is_none());
}

#[test]
fn out_of_range_image_index_is_ignored() {
    let (mut store, ids) = store_with_images(1);
    store.set_active_image_index(5);
    assert_eq!(store.active_image().map(|i| i.id), Some(ids[0]));
}

// =============================================================
// Labels
// =============================================================

#[test]
fn update_image_label_rects_replaces_list() {
    let (mut store, ids) = store_with_images(2);
    let labels = vec![label(0.0), label(20.0)];
    store.update_image_label_rects(ids[1], labels.clone());
    assert_eq!(store.image(&ids[1]).map(|i| i.label_rects.clone()), Some(labels));
    assert!(store.image(&ids[0]).is_some_and(|i| i.label_rects.is_empty()));
}

#[test]
fn update_for_unknown_image_is_ignored() {
    let (mut store, _) = store_with_images(1);
    store.update_image_label_rects(Uuid::new_v4(), vec![label(0.0)]);
    assert!(store.images().iter().all(|i| i.label_rects.is_empty()));
}

#[test]
fn active_label_rect_resolves_through_active_image() {
    let (mut store, ids) = store_with_images(1);
    let l = label(5.0);
    store.update_image_label_rects(ids[0], vec![label(0.0), l.clone()]);
    store.update_active_label_id(Some(l.id));
    assert_eq!(store.active_label_rect(), Some(l));
}

#[test]
fn active_label_rect_missing_id_is_none() {
    let (mut store, ids) = store_with_images(1);
    store.update_image_label_rects(ids[0], vec![label(0.0)]);
    store.update_active_label_id(Some(Uuid::new_v4()));
    assert!(store.active_label_rect().is_none());
}

// =============================================================
// Flags
// =============================================================

#[test]
fn flags_and_cursor_round_trip() {
    let mut store = MemoryStore::new();
    assert!(!store.first_label_created());
    store.update_first_label_created_flag(true);
    assert!(store.first_label_created());

    assert_eq!(store.custom_cursor_style(), CustomCursorStyle::Default);
    store.update_custom_cursor_style(CustomCursorStyle::Move);
    assert_eq!(store.custom_cursor_style(), CustomCursorStyle::Move);

    store.set_active_label_name_index(3);
    assert_eq!(store.active_label_name_index(), 3);
}

// =============================================================
// Shared handle
// =============================================================

#[test]
fn shared_handle_forwards_reads_and_writes() {
    let (inner, ids) = store_with_images(1);
    let shared = Rc::new(RefCell::new(inner));
    let mut handle = Rc::clone(&shared);

    let l = label(1.0);
    handle.update_image_label_rects(ids[0], vec![l.clone()]);
    handle.update_highlighted_label_id(Some(l.id));

    assert_eq!(shared.borrow().highlighted_label_id(), Some(l.id));
    assert_eq!(handle.active_image().map(|i| i.label_rects), Some(vec![l]));
}

#[test]
fn label_rect_json_shape() {
    let l = LabelRect { id: Uuid::nil(), label_index: 2, rect: Rect::new(1.0, 2.0, 3.0, 4.0) };
    let value = serde_json::to_value(&l).unwrap();
    assert_eq!(value["label_index"], 2);
    assert_eq!(value["rect"]["width"], 3.0);
    let back: LabelRect = serde_json::from_value(value).unwrap();
    assert_eq!(back, l);
}
