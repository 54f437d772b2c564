//! The document: the ordered, owning collection of top-level shapes, plus
//! the (non-persisted) selection.
//!
//! Insertion order is paint order is z-order. The shape list is mutated only
//! through the command engine — the mutation API is `pub(crate)` so the
//! undo/redo invariant cannot be bypassed from outside the crate.

use egui::Pos2;

use crate::shape::{Shape, ShapeId};

#[derive(Debug, Default)]
pub struct Document {
    shapes: Vec<Shape>,
    selection: Vec<ShapeId>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    // --- read access ---

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn find(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|shape| shape.id() == id)
    }

    pub fn index_of(&self, id: ShapeId) -> Option<usize> {
        self.shapes.iter().position(|shape| shape.id() == id)
    }

    /// Topmost shape containing `point`, if any. Later shapes paint on top,
    /// so the scan runs back to front. Eraser trails are background paint,
    /// not selectable content, and are skipped.
    pub fn hit_test_top(&self, point: Pos2) -> Option<ShapeId> {
        self.shapes
            .iter()
            .rev()
            .filter(|shape| !matches!(shape, Shape::Eraser(_)))
            .find(|shape| shape.contains_point(point))
            .map(|shape| shape.id())
    }

    /// Every shape hit at `point` that is eligible for stroke-erasure.
    /// Eraser trails themselves are excluded.
    pub fn erase_candidates_at(&self, point: Pos2) -> Vec<ShapeId> {
        self.shapes
            .iter()
            .filter(|shape| !matches!(shape, Shape::Eraser(_)))
            .filter(|shape| shape.contains_point(point))
            .map(|shape| shape.id())
            .collect()
    }

    // --- selection (by identity; never persisted) ---

    pub fn selected_ids(&self) -> &[ShapeId] {
        &self.selection
    }

    pub fn is_selected(&self, id: ShapeId) -> bool {
        self.selection.contains(&id)
    }

    pub fn set_selection(&mut self, ids: Vec<ShapeId>) {
        let known: Vec<ShapeId> = ids
            .into_iter()
            .filter(|&id| self.index_of(id).is_some())
            .collect();
        self.selection = known;
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // --- mutation, reserved for the command engine ---

    pub(crate) fn find_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|shape| shape.id() == id)
    }

    pub(crate) fn append(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub(crate) fn insert_at(&mut self, index: usize, shape: Shape) {
        self.shapes.insert(index, shape);
    }

    pub(crate) fn remove_by_id(&mut self, id: ShapeId) -> Option<Shape> {
        let index = self.index_of(id)?;
        self.selection.retain(|&selected| selected != id);
        Some(self.shapes.remove(index))
    }

    /// Moves the entire shape list out of the document.
    pub(crate) fn take_all(&mut self) -> Vec<Shape> {
        self.selection.clear();
        std::mem::take(&mut self.shapes)
    }

    /// Replaces the shape list wholesale (undo of a clear-all).
    pub(crate) fn restore(&mut self, shapes: Vec<Shape>) {
        self.shapes = shapes;
    }
}
