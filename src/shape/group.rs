use egui::{Pos2, Rect, Vec2};

use crate::canvas::Canvas;
use crate::geometry;
use crate::id_generator::generate_id;
use crate::shape::{Shape, ShapeId};

/// A composite shape owning an ordered list of child shapes.
///
/// A group has no geometry of its own: bounds, core geometry and center are
/// unions over the children. Its rotation angle is bookkeeping only — calling
/// [`Group::set_rotation`] immediately propagates the delta into the
/// children, so child geometry always reflects the compound rotation.
#[derive(Debug, Clone)]
pub struct Group {
    id: ShapeId,
    pub(crate) children: Vec<Shape>,
    pub(crate) rotation: f32,
}

impl Group {
    /// Takes ownership of a non-empty list of shapes already removed from
    /// the document.
    pub fn new(children: Vec<Shape>) -> Self {
        Self {
            id: generate_id(),
            children,
            rotation: 0.0,
        }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn children(&self) -> &[Shape] {
        &self.children
    }

    /// Transfers ownership of all children back to the caller, leaving the
    /// group empty. Used by ungrouping so that dropping the hollow group
    /// cannot drop the children with it.
    pub fn take_children(&mut self) -> Vec<Shape> {
        std::mem::take(&mut self.children)
    }

    /// Re-populates the group, e.g. when a group command is redone.
    pub fn add_children(&mut self, children: Vec<Shape>) {
        self.children.extend(children);
    }

    pub(crate) fn bounding_rect(&self) -> Rect {
        self.children
            .iter()
            .fold(Rect::NOTHING, |acc, child| acc.union(child.bounding_rect()))
    }

    pub(crate) fn core_geometry(&self) -> Rect {
        self.children
            .iter()
            .fold(Rect::NOTHING, |acc, child| acc.union(child.core_geometry()))
    }

    pub(crate) fn center(&self) -> Pos2 {
        self.bounding_rect().center()
    }

    pub(crate) fn contains_point(&self, point: Pos2) -> bool {
        self.children.iter().any(|child| child.contains_point(point))
    }

    pub(crate) fn move_by(&mut self, offset: Vec2) {
        for child in &mut self.children {
            child.move_by(offset);
        }
    }

    /// Rotates the whole group to `new_angle`.
    ///
    /// Each child's center is swung by the angle delta around the group
    /// center, the child is translated to its new center, and the delta is
    /// added to the child's own rotation. Compound rotation falls out of
    /// this without nested coordinate frames.
    pub(crate) fn set_rotation(&mut self, new_angle: f32) {
        let delta = new_angle - self.rotation;
        self.rotation = new_angle;
        if delta == 0.0 {
            return;
        }

        let group_center = self.center();
        for child in &mut self.children {
            let old_center = child.center();
            let new_center = geometry::rotate_point(old_center, delta, group_center);
            child.move_by(new_center - old_center);
            let child_angle = child.rotation();
            child.set_rotation(child_angle + delta);
        }
    }

    pub(crate) fn draw(&self, canvas: &mut dyn Canvas) {
        for child in &self.children {
            child.draw(canvas);
        }
    }
}
