//! JavaScript-facing editor facade.
//!
//! [`EditorCore`] owns the shared store, the drawing surface and the engine for
//! the current [`LabelType`], and keeps the latest [`EditorData`] snapshot so
//! the host only reports what changed. [`Editor`] is the `wasm_bindgen` wrapper
//! around an `EditorCore<CanvasSurface>`; everything testable lives in the core.

#[cfg(test)]
#[path = "host_test.rs"]
mod host_test;

use std::cell::RefCell;
use std::rc::Rc;

use uuid::Uuid;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use crate::config::{ConfigError, RenderEngineConfig};
use crate::draw::{CanvasSurface, DrawSurface, SurfaceError};
use crate::engine::{AnnotationEngine, LabelType, RenderEngine, UnknownLabelType};
use crate::geom::{Point, Rect};
use crate::input::EditorData;
use crate::store::{CustomCursorStyle, EditorStore, ImageData, ImageId, LabelId, LabelRect, MemoryStore};

/// Store handle shared between the host and the active engine.
pub type SharedStore = Rc<RefCell<MemoryStore>>;

/// Error surfaced to the host.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    #[error(transparent)]
    LabelType(#[from] UnknownLabelType),
    #[error("label json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid id: {0}")]
    InvalidId(#[from] uuid::Error),
    #[error("unknown image: {0}")]
    UnknownImage(ImageId),
}

impl From<HostError> for JsValue {
    fn from(err: HostError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Browser-independent editor state and engine routing.
pub struct EditorCore<D> {
    store: SharedStore,
    surface: D,
    config: RenderEngineConfig,
    engine: AnnotationEngine<SharedStore, D>,
    data: EditorData,
}

impl<D: DrawSurface + Clone> EditorCore<D> {
    /// Start in rectangle mode with an empty store.
    #[must_use]
    pub fn new(surface: D, config: RenderEngineConfig) -> Self {
        let store = Rc::new(RefCell::new(MemoryStore::new()));
        let engine = AnnotationEngine::new(LabelType::Rectangle, Rc::clone(&store), surface.clone(), config.clone());
        Self { store, surface, config, engine, data: EditorData::default() }
    }

    // --- Mode ---

    #[must_use]
    pub fn label_type(&self) -> LabelType {
        self.engine.label_type()
    }

    /// Switch engines. Any gesture in progress on the old engine is dropped.
    pub fn set_label_type(&mut self, label_type: LabelType) {
        if label_type == self.engine.label_type() {
            return;
        }
        self.engine = AnnotationEngine::new(
            label_type,
            Rc::clone(&self.store),
            self.surface.clone(),
            self.config.clone(),
        );
    }

    // --- Images and labels ---

    /// Add an empty image and return its id.
    pub fn add_image(&mut self) -> ImageId {
        let id = Uuid::new_v4();
        self.store.borrow_mut().add_image(ImageData::new(id));
        tracing::debug!(%id, "image added");
        id
    }

    pub fn set_active_image(&mut self, index: usize) {
        self.store.borrow_mut().set_active_image_index(index);
    }

    pub fn set_active_label_name_index(&mut self, index: usize) {
        self.store.borrow_mut().set_active_label_name_index(index);
    }

    /// The label list of `image_id`.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::UnknownImage`] if no such image exists.
    pub fn labels(&self, image_id: ImageId) -> Result<Vec<LabelRect>, HostError> {
        self.store
            .borrow()
            .image(&image_id)
            .map(|image| image.label_rects.clone())
            .ok_or(HostError::UnknownImage(image_id))
    }

    /// Replace the label list of `image_id`. Rects with a negative extent are
    /// normalized, since hit-testing only sees non-negative boxes.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::UnknownImage`] if no such image exists.
    pub fn load_labels(&mut self, image_id: ImageId, mut labels: Vec<LabelRect>) -> Result<(), HostError> {
        if self.store.borrow().image(&image_id).is_none() {
            return Err(HostError::UnknownImage(image_id));
        }
        for label in &mut labels {
            label.rect = label.rect.normalized();
        }
        tracing::debug!(%image_id, count = labels.len(), "labels loaded");
        self.store.borrow_mut().update_image_label_rects(image_id, labels);
        Ok(())
    }

    // --- Snapshot ---

    pub fn set_mouse(&mut self, position: Option<Point>) {
        self.data.mouse_position_on_canvas = position;
    }

    /// Where the active image is drawn and at what scale.
    pub fn set_image_rect(&mut self, rect: Option<Rect>, scale: f64) {
        self.data.active_image_rect_on_canvas = rect;
        self.data.active_image_scale = scale;
    }

    #[must_use]
    pub fn data(&self) -> EditorData {
        self.data
    }

    // --- Events ---

    pub fn mouse_down(&mut self, position: Point) {
        self.set_mouse(Some(position));
        self.engine.on_mouse_down(&self.data);
    }

    pub fn mouse_up(&mut self, position: Point) {
        self.set_mouse(Some(position));
        self.engine.on_mouse_up(&self.data);
    }

    pub fn mouse_move(&mut self, position: Point) {
        self.set_mouse(Some(position));
        self.engine.on_mouse_move(&self.data);
    }

    pub fn render(&mut self) {
        self.engine.render(&self.data);
    }

    // --- Queries ---

    #[must_use]
    pub fn is_in_progress(&self) -> bool {
        self.engine.is_in_progress()
    }

    #[must_use]
    pub fn active_label_id(&self) -> Option<LabelId> {
        self.store.borrow().active_label_id()
    }

    #[must_use]
    pub fn highlighted_label_id(&self) -> Option<LabelId> {
        self.store.borrow().highlighted_label_id()
    }

    #[must_use]
    pub fn custom_cursor_style(&self) -> CustomCursorStyle {
        self.store.borrow().custom_cursor_style()
    }

    #[must_use]
    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    #[must_use]
    pub fn engine(&self) -> &AnnotationEngine<SharedStore, D> {
        &self.engine
    }
}

/// Annotation editor bound to a browser canvas.
#[wasm_bindgen]
pub struct Editor {
    core: EditorCore<CanvasSurface>,
}

#[wasm_bindgen]
impl Editor {
    /// Bind to `canvas`. `config_json` overrides any subset of the default
    /// visual config.
    ///
    /// # Errors
    ///
    /// Fails if the config is invalid or the canvas has no 2D context.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, config_json: Option<String>) -> Result<Editor, JsValue> {
        Ok(Self::try_new(canvas, config_json.as_deref())?)
    }

    /// # Errors
    ///
    /// Fails on anything but a rectangle or polygon label type.
    #[wasm_bindgen(js_name = setLabelType)]
    pub fn set_label_type(&mut self, label_type: &str) -> Result<(), JsValue> {
        let label_type = label_type.parse::<LabelType>().map_err(HostError::from)?;
        self.core.set_label_type(label_type);
        Ok(())
    }

    #[must_use]
    #[wasm_bindgen(js_name = labelType)]
    pub fn label_type(&self) -> String {
        self.core.label_type().to_string()
    }

    #[wasm_bindgen(js_name = addImage)]
    pub fn add_image(&mut self) -> String {
        self.core.add_image().to_string()
    }

    #[wasm_bindgen(js_name = setActiveImage)]
    pub fn set_active_image(&mut self, index: usize) {
        self.core.set_active_image(index);
    }

    #[wasm_bindgen(js_name = setActiveLabelNameIndex)]
    pub fn set_active_label_name_index(&mut self, index: usize) {
        self.core.set_active_label_name_index(index);
    }

    /// Report where the active image is drawn. A non-positive size clears it.
    #[wasm_bindgen(js_name = setImageRect)]
    pub fn set_image_rect(&mut self, x: f64, y: f64, width: f64, height: f64, scale: f64) {
        let rect = (width > 0.0 && height > 0.0).then(|| Rect::new(x, y, width, height));
        self.core.set_image_rect(rect, scale);
    }

    #[wasm_bindgen(js_name = clearMouse)]
    pub fn clear_mouse(&mut self) {
        self.core.set_mouse(None);
    }

    #[wasm_bindgen(js_name = mouseDown)]
    pub fn mouse_down(&mut self, x: f64, y: f64) {
        self.core.mouse_down(Point::new(x, y));
    }

    #[wasm_bindgen(js_name = mouseUp)]
    pub fn mouse_up(&mut self, x: f64, y: f64) {
        self.core.mouse_up(Point::new(x, y));
    }

    #[wasm_bindgen(js_name = mouseMove)]
    pub fn mouse_move(&mut self, x: f64, y: f64) {
        self.core.mouse_move(Point::new(x, y));
    }

    pub fn render(&mut self) {
        self.core.render();
    }

    #[must_use]
    #[wasm_bindgen(js_name = isInProgress)]
    pub fn is_in_progress(&self) -> bool {
        self.core.is_in_progress()
    }

    #[must_use]
    #[wasm_bindgen(js_name = activeLabelId)]
    pub fn active_label_id(&self) -> Option<String> {
        self.core.active_label_id().map(|id| id.to_string())
    }

    #[must_use]
    #[wasm_bindgen(js_name = highlightedLabelId)]
    pub fn highlighted_label_id(&self) -> Option<String> {
        self.core.highlighted_label_id().map(|id| id.to_string())
    }

    /// `"DEFAULT"` or `"MOVE"`.
    #[must_use]
    #[wasm_bindgen(js_name = customCursorStyle)]
    pub fn custom_cursor_style(&self) -> String {
        match self.core.custom_cursor_style() {
            CustomCursorStyle::Default => "DEFAULT".to_owned(),
            CustomCursorStyle::Move => "MOVE".to_owned(),
        }
    }

    /// The labels of `image_id` as a JSON array.
    ///
    /// # Errors
    ///
    /// Fails on a malformed id or an unknown image.
    #[wasm_bindgen(js_name = labelsJson)]
    pub fn labels_json(&self, image_id: &str) -> Result<String, JsValue> {
        Ok(self.labels_json_inner(image_id)?)
    }

    /// Replace the labels of `image_id` from a JSON array.
    ///
    /// # Errors
    ///
    /// Fails on a malformed id, malformed JSON or an unknown image.
    #[wasm_bindgen(js_name = loadLabelsJson)]
    pub fn load_labels_json(&mut self, image_id: &str, json: &str) -> Result<(), JsValue> {
        Ok(self.load_labels_json_inner(image_id, json)?)
    }
}

impl Editor {
    fn try_new(canvas: HtmlCanvasElement, config_json: Option<&str>) -> Result<Self, HostError> {
        let config = match config_json {
            Some(json) => RenderEngineConfig::from_json(json)?,
            None => RenderEngineConfig::default(),
        };
        let surface = CanvasSurface::new(canvas)?;
        Ok(Self { core: EditorCore::new(surface, config) })
    }

    fn labels_json_inner(&self, image_id: &str) -> Result<String, HostError> {
        let labels = self.core.labels(Uuid::parse_str(image_id)?)?;
        Ok(serde_json::to_string(&labels)?)
    }

    fn load_labels_json_inner(&mut self, image_id: &str, json: &str) -> Result<(), HostError> {
        let image_id = Uuid::parse_str(image_id)?;
        let labels: Vec<LabelRect> = serde_json::from_str(json)?;
        self.core.load_labels(image_id, labels)
    }
}
