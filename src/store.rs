//! Editor state: label types, the store interface engines read and write, and
//! an in-memory store.
//!
//! Engines never own editor state. They read a few typed queries and send
//! write commands through [`EditorStore`]; the host decides where that state
//! actually lives. [`MemoryStore`] is the plain in-process implementation,
//! and `Rc<RefCell<S>>` forwards to any store so the host and an engine can
//! share one.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geom::Rect;

/// Unique identifier for a label.
pub type LabelId = Uuid;

/// Unique identifier for an image.
pub type ImageId = Uuid;

/// A rectangle label on an image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelRect {
    pub id: LabelId,
    /// Index into the host's list of label names.
    pub label_index: usize,
    /// Box in original image pixels, independent of zoom and pan.
    pub rect: Rect,
}

/// One image and the labels drawn on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageData {
    pub id: ImageId,
    pub label_rects: Vec<LabelRect>,
}

impl ImageData {
    #[must_use]
    pub fn new(id: ImageId) -> Self {
        Self { id, label_rects: Vec::new() }
    }

    #[must_use]
    pub fn label_rect(&self, id: &LabelId) -> Option<&LabelRect> {
        self.label_rects.iter().find(|l| &l.id == id)
    }
}

/// Style of the custom cursor the host draws over the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CustomCursorStyle {
    #[default]
    Default,
    Move,
}

/// Typed access to the shared editor state.
///
/// Reads return owned snapshots; writes are fire-and-forget.
pub trait EditorStore {
    // --- Queries ---

    /// The image currently being annotated.
    fn active_image(&self) -> Option<ImageData>;
    /// The selected label, if any.
    fn active_label_id(&self) -> Option<LabelId>;
    /// The label under the pointer, if any.
    fn highlighted_label_id(&self) -> Option<LabelId>;
    /// Label-name index attached to newly created labels.
    fn active_label_name_index(&self) -> usize;

    // --- Commands ---

    fn update_active_label_id(&mut self, id: Option<LabelId>);
    fn update_highlighted_label_id(&mut self, id: Option<LabelId>);
    /// Replace the full label list of image `image_id`.
    fn update_image_label_rects(&mut self, image_id: ImageId, label_rects: Vec<LabelRect>);
    fn update_first_label_created_flag(&mut self, created: bool);
    fn update_custom_cursor_style(&mut self, style: CustomCursorStyle);

    /// The active image's label with the active id.
    fn active_label_rect(&self) -> Option<LabelRect> {
        let id = self.active_label_id()?;
        self.active_image()?.label_rect(&id).cloned()
    }
}

/// Editor state held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    images: Vec<ImageData>,
    active_image_index: Option<usize>,
    active_label_id: Option<LabelId>,
    highlighted_label_id: Option<LabelId>,
    active_label_name_index: usize,
    first_label_created: bool,
    custom_cursor_style: CustomCursorStyle,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an image. The first image added becomes active.
    pub fn add_image(&mut self, image: ImageData) {
        self.images.push(image);
        if self.active_image_index.is_none() {
            self.active_image_index = Some(self.images.len() - 1);
        }
    }

    /// Switch the active image. Clears selection and highlight; out-of-range
    /// indices are ignored.
    pub fn set_active_image_index(&mut self, index: usize) {
        if index >= self.images.len() || self.active_image_index == Some(index) {
            return;
        }
        self.active_image_index = Some(index);
        self.active_label_id = None;
        self.highlighted_label_id = None;
    }

    pub fn set_active_label_name_index(&mut self, index: usize) {
        self.active_label_name_index = index;
    }

    #[must_use]
    pub fn images(&self) -> &[ImageData] {
        &self.images
    }

    #[must_use]
    pub fn image(&self, id: &ImageId) -> Option<&ImageData> {
        self.images.iter().find(|i| &i.id == id)
    }

    #[must_use]
    pub fn active_image_index(&self) -> Option<usize> {
        self.active_image_index
    }

    #[must_use]
    pub fn first_label_created(&self) -> bool {
        self.first_label_created
    }

    #[must_use]
    pub fn custom_cursor_style(&self) -> CustomCursorStyle {
        self.custom_cursor_style
    }
}

impl EditorStore for MemoryStore {
    fn active_image(&self) -> Option<ImageData> {
        self.active_image_index
            .and_then(|index| self.images.get(index))
            .cloned()
    }

    fn active_label_id(&self) -> Option<LabelId> {
        self.active_label_id
    }

    fn highlighted_label_id(&self) -> Option<LabelId> {
        self.highlighted_label_id
    }

    fn active_label_name_index(&self) -> usize {
        self.active_label_name_index
    }

    fn update_active_label_id(&mut self, id: Option<LabelId>) {
        self.active_label_id = id;
    }

    fn update_highlighted_label_id(&mut self, id: Option<LabelId>) {
        self.highlighted_label_id = id;
    }

    fn update_image_label_rects(&mut self, image_id: ImageId, label_rects: Vec<LabelRect>) {
        match self.images.iter_mut().find(|i| i.id == image_id) {
            Some(image) => image.label_rects = label_rects,
            None => tracing::warn!(%image_id, "label update for unknown image"),
        }
    }

    fn update_first_label_created_flag(&mut self, created: bool) {
        self.first_label_created = created;
    }

    fn update_custom_cursor_style(&mut self, style: CustomCursorStyle) {
        self.custom_cursor_style = style;
    }
}

impl<S: EditorStore> EditorStore for Rc<RefCell<S>> {
    fn active_image(&self) -> Option<ImageData> {
        self.borrow().active_image()
    }

    fn active_label_id(&self) -> Option<LabelId> {
        self.borrow().active_label_id()
    }

    fn highlighted_label_id(&self) -> Option<LabelId> {
        self.borrow().highlighted_label_id()
    }

    fn active_label_name_index(&self) -> usize {
        self.borrow().active_label_name_index()
    }

    fn update_active_label_id(&mut self, id: Option<LabelId>) {
        self.borrow_mut().update_active_label_id(id);
    }

    fn update_highlighted_label_id(&mut self, id: Option<LabelId>) {
        self.borrow_mut().update_highlighted_label_id(id);
    }

    fn update_image_label_rects(&mut self, image_id: ImageId, label_rects: Vec<LabelRect>) {
        self.borrow_mut().update_image_label_rects(image_id, label_rects);
    }

    fn update_first_label_created_flag(&mut self, created: bool) {
        self.borrow_mut().update_first_label_created_flag(created);
    }

    fn update_custom_cursor_style(&mut self, style: CustomCursorStyle) {
        self.borrow_mut().update_custom_cursor_style(style);
    }
}
