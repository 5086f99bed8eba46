//! Rectangle annotation engine for a browser image-labeling editor.
//!
//! This crate is compiled to WebAssembly and drives an HTML canvas laid over
//! the image being labeled. It turns mouse input into label rectangles stored
//! in image pixels, hit-tests them under pan and zoom, and draws them with
//! resize handles. Editor state lives behind [`store::EditorStore`]; the host
//! JavaScript layer reports pointer and image placement through [`host::Editor`]
//! and draws the image itself.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`host`] | `wasm_bindgen` facade and the testable [`host::EditorCore`] |
//! | [`engine`] | [`engine::RenderEngine`] lifecycle and per-label-type dispatch |
//! | [`rect`] | Rectangle engine: create, select, highlight, resize, draw |
//! | [`polygon`] | Polygon engine placeholder (cursor handling only) |
//! | [`store`] | Label and image types, the store trait, the in-memory store |
//! | [`input`] | Per-event editor snapshot and the rect gesture state machine |
//! | [`geom`] | Points, rects, anchors and image/canvas coordinate mapping |
//! | [`draw`] | Drawing surface trait, pixel snapping, the canvas surface |
//! | [`config`] | Visual configuration and its JSON loading |
//! | [`consts`] | Default colors and sizes |

pub mod config;
pub mod consts;
pub mod draw;
pub mod engine;
pub mod geom;
pub mod host;
pub mod input;
pub mod polygon;
pub mod rect;
pub mod store;

#[cfg(test)]
mod testing;
