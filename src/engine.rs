use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::RenderEngineConfig;
use crate::draw::DrawSurface;
use crate::input::EditorData;
use crate::polygon::PolygonRenderEngine;
use crate::rect::RectRenderEngine;
use crate::store::EditorStore;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Lifecycle shared by every annotation engine.
///
/// The host calls the mouse handlers on input events and `render` on every
/// redraw tick, always with a fresh [`EditorData`] snapshot.
pub trait RenderEngine {
    fn on_mouse_down(&mut self, data: &EditorData);
    fn on_mouse_up(&mut self, data: &EditorData);
    fn on_mouse_move(&mut self, data: &EditorData);
    fn render(&mut self, data: &EditorData);
    /// Whether a drag gesture is currently being tracked.
    fn is_in_progress(&self) -> bool;
}

/// Annotation mode the host has selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LabelType {
    #[default]
    Rectangle,
    Polygon,
}

/// Error returned when parsing a [`LabelType`] from a string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown label type: {0}")]
pub struct UnknownLabelType(pub String);

impl FromStr for LabelType {
    type Err = UnknownLabelType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rect" | "rectangle" => Ok(Self::Rectangle),
            "polygon" => Ok(Self::Polygon),
            _ => Err(UnknownLabelType(s.to_owned())),
        }
    }
}

impl fmt::Display for LabelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rectangle => f.write_str("RECTANGLE"),
            Self::Polygon => f.write_str("POLYGON"),
        }
    }
}

/// The engine for the active [`LabelType`].
pub enum AnnotationEngine<S, D> {
    Rect(RectRenderEngine<S, D>),
    Polygon(PolygonRenderEngine<S, D>),
}

impl<S: EditorStore, D: DrawSurface> AnnotationEngine<S, D> {
    /// Build the engine for `label_type`.
    #[must_use]
    pub fn new(label_type: LabelType, store: S, surface: D, config: RenderEngineConfig) -> Self {
        tracing::debug!(%label_type, "annotation engine selected");
        match label_type {
            LabelType::Rectangle => Self::Rect(RectRenderEngine::new(store, surface, config)),
            LabelType::Polygon => Self::Polygon(PolygonRenderEngine::new(store, surface)),
        }
    }

    #[must_use]
    pub fn label_type(&self) -> LabelType {
        match self {
            Self::Rect(_) => LabelType::Rectangle,
            Self::Polygon(_) => LabelType::Polygon,
        }
    }

    fn inner(&self) -> &dyn RenderEngine {
        match self {
            Self::Rect(engine) => engine,
            Self::Polygon(engine) => engine,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn RenderEngine {
        match self {
            Self::Rect(engine) => engine,
            Self::Polygon(engine) => engine,
        }
    }
}

impl<S: EditorStore, D: DrawSurface> RenderEngine for AnnotationEngine<S, D> {
    fn on_mouse_down(&mut self, data: &EditorData) {
        self.inner_mut().on_mouse_down(data);
    }

    fn on_mouse_up(&mut self, data: &EditorData) {
        self.inner_mut().on_mouse_up(data);
    }

    fn on_mouse_move(&mut self, data: &EditorData) {
        self.inner_mut().on_mouse_move(data);
    }

    fn render(&mut self, data: &EditorData) {
        self.inner_mut().render(data);
    }

    fn is_in_progress(&self) -> bool {
        self.inner().is_in_progress()
    }
}
