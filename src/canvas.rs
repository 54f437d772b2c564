//! The rendering boundary.
//!
//! The engine never touches pixels: shapes emit local-space primitives into
//! a [`Canvas`] sink, bracketing them with save/rotate/restore when rotated.
//! A real backend maps these calls onto its painter; tests use
//! [`RecordingCanvas`].

use egui::{Color32, Pos2, Rect, Stroke};

use crate::document::Document;
use crate::shape::Shape;

/// Sink for shape draw calls. Implementations own the mapping to an actual
/// drawing surface; the engine knows nothing about pixels or windows.
pub trait Canvas {
    /// Pushes the current transform state.
    fn save(&mut self);

    /// Composes a rotation of `angle_deg` about `center` onto the current
    /// transform.
    fn rotate_about(&mut self, center: Pos2, angle_deg: f32);

    /// Pops back to the most recently saved transform state.
    fn restore(&mut self);

    fn line(&mut self, start: Pos2, end: Pos2, stroke: Stroke);

    fn rect(&mut self, rect: Rect, stroke: Stroke, fill: Option<Color32>);

    fn ellipse(&mut self, rect: Rect, stroke: Stroke, fill: Option<Color32>);

    fn polygon(&mut self, points: &[Pos2], stroke: Stroke, fill: Option<Color32>);

    fn polyline(&mut self, points: &[Pos2], stroke: Stroke);
}

/// Draws every document shape in paint order, then the in-progress preview
/// shape (if any) on top.
pub fn render_document(document: &Document, preview: Option<&Shape>, canvas: &mut dyn Canvas) {
    for shape in document.shapes() {
        shape.draw(canvas);
    }
    if let Some(shape) = preview {
        shape.draw(canvas);
    }
}

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Save,
    RotateAbout { center: Pos2, angle_deg: f32 },
    Restore,
    Line { start: Pos2, end: Pos2, stroke: Stroke },
    Rect {
        rect: Rect,
        stroke: Stroke,
        fill: Option<Color32>,
    },
    Ellipse {
        rect: Rect,
        stroke: Stroke,
        fill: Option<Color32>,
    },
    Polygon {
        points: Vec<Pos2>,
        stroke: Stroke,
        fill: Option<Color32>,
    },
    Polyline { points: Vec<Pos2>, stroke: Stroke },
}

/// A canvas that records draw calls instead of painting.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub ops: Vec<DrawOp>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count of primitive (non-transform) draw calls.
    pub fn primitive_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| {
                !matches!(
                    op,
                    DrawOp::Save | DrawOp::Restore | DrawOp::RotateAbout { .. }
                )
            })
            .count()
    }
}

impl Canvas for RecordingCanvas {
    fn save(&mut self) {
        self.ops.push(DrawOp::Save);
    }

    fn rotate_about(&mut self, center: Pos2, angle_deg: f32) {
        self.ops.push(DrawOp::RotateAbout { center, angle_deg });
    }

    fn restore(&mut self) {
        self.ops.push(DrawOp::Restore);
    }

    fn line(&mut self, start: Pos2, end: Pos2, stroke: Stroke) {
        self.ops.push(DrawOp::Line { start, end, stroke });
    }

    fn rect(&mut self, rect: Rect, stroke: Stroke, fill: Option<Color32>) {
        self.ops.push(DrawOp::Rect { rect, stroke, fill });
    }

    fn ellipse(&mut self, rect: Rect, stroke: Stroke, fill: Option<Color32>) {
        self.ops.push(DrawOp::Ellipse { rect, stroke, fill });
    }

    fn polygon(&mut self, points: &[Pos2], stroke: Stroke, fill: Option<Color32>) {
        self.ops.push(DrawOp::Polygon {
            points: points.to_vec(),
            stroke,
            fill,
        });
    }

    fn polyline(&mut self, points: &[Pos2], stroke: Stroke) {
        self.ops.push(DrawOp::Polyline {
            points: points.to_vec(),
            stroke,
        });
    }
}
