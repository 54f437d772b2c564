use egui::{Pos2, Rect, Stroke, Vec2};

use super::common::{ShapeStyle, near_polyline};
use crate::canvas::Canvas;
use crate::geometry;
use crate::id_generator::generate_id;
use crate::shape::ShapeId;

/// A straight segment between two endpoints.
#[derive(Debug, Clone)]
pub struct Line {
    id: ShapeId,
    pub(crate) start: Pos2,
    pub(crate) end: Pos2,
    pub(crate) style: ShapeStyle,
    pub(crate) rotation: f32,
}

impl Line {
    pub fn new(start: Pos2, end: Pos2, style: ShapeStyle) -> Self {
        Self {
            id: generate_id(),
            start,
            end,
            // Lines have no interior to fill.
            style: ShapeStyle::stroke(style.border_color, style.pen_width),
            rotation: 0.0,
        }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn start(&self) -> Pos2 {
        self.start
    }

    pub fn end(&self) -> Pos2 {
        self.end
    }

    pub(crate) fn core_geometry(&self) -> Rect {
        geometry::normalized(Rect::from_two_pos(self.start, self.end))
    }

    pub(crate) fn center(&self) -> Pos2 {
        self.core_geometry().center()
    }

    pub(crate) fn bounding_rect(&self) -> Rect {
        geometry::rotated_bounds(self.core_geometry(), self.rotation, self.center())
    }

    pub(crate) fn contains_point(&self, point: Pos2) -> bool {
        let local = geometry::unrotate_point(point, self.rotation, self.center());
        near_polyline(local, &[self.start, self.end], self.style.hit_half_width())
    }

    pub(crate) fn move_by(&mut self, offset: Vec2) {
        self.start += offset;
        self.end += offset;
    }

    pub(crate) fn update_drag(&mut self, point: Pos2) {
        self.end = point;
    }

    pub(crate) fn is_valid_commit(&self) -> bool {
        self.start != self.end
    }

    pub(crate) fn draw(&self, canvas: &mut dyn Canvas) {
        let stroke = Stroke::new(self.style.pen_width as f32, self.style.border_color);
        if self.rotation != 0.0 {
            canvas.save();
            canvas.rotate_about(self.center(), self.rotation);
            canvas.line(self.start, self.end, stroke);
            canvas.restore();
        } else {
            canvas.line(self.start, self.end, stroke);
        }
    }
}
