//! Test doubles shared by the engine test modules.

use crate::draw::DrawSurface;
use crate::geom::{Rect, Size};

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Save,
    Restore,
    StrokeStyle(String),
    FillStyle(String),
    LineWidth(f64),
    StrokeRect(Rect),
    FillRect(Rect),
    Cursor(String),
}

/// [`DrawSurface`] that records every call instead of drawing.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    pub size: Size,
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self { size: Size::new(width, height), ops: Vec::new() }
    }

    pub fn stroked(&self) -> Vec<Rect> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::StrokeRect(r) => Some(*r),
                _ => None,
            })
            .collect()
    }

    pub fn filled(&self) -> Vec<Rect> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillRect(r) => Some(*r),
                _ => None,
            })
            .collect()
    }

    pub fn stroke_styles(&self) -> Vec<String> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::StrokeStyle(s) => Some(s.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn last_cursor(&self) -> Option<&str> {
        self.ops.iter().rev().find_map(|op| match op {
            DrawOp::Cursor(c) => Some(c.as_str()),
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }
}

impl DrawSurface for RecordingSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn save(&mut self) {
        self.ops.push(DrawOp::Save);
    }

    fn restore(&mut self) {
        self.ops.push(DrawOp::Restore);
    }

    fn set_stroke_style(&mut self, color: &str) {
        self.ops.push(DrawOp::StrokeStyle(color.to_owned()));
    }

    fn set_fill_style(&mut self, color: &str) {
        self.ops.push(DrawOp::FillStyle(color.to_owned()));
    }

    fn set_line_width(&mut self, width: f64) {
        self.ops.push(DrawOp::LineWidth(width));
    }

    fn stroke_rect(&mut self, rect: Rect) {
        self.ops.push(DrawOp::StrokeRect(rect));
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.ops.push(DrawOp::FillRect(rect));
    }

    fn set_native_cursor(&mut self, cursor: &str) {
        self.ops.push(DrawOp::Cursor(cursor.to_owned()));
    }
}
