use egui::{Pos2, Rect, Stroke, Vec2};

use super::common::{ShapeStyle, near_polyline};
use crate::canvas::Canvas;
use crate::geometry;
use crate::id_generator::generate_id;
use crate::shape::ShapeId;

/// An ordered polyline of at least one point.
///
/// Backs both freehand strokes and normal-eraser trails; the two differ only
/// in their schema tag, their paint color (an eraser paints with the canvas
/// background color) and in that erasers are not eligible targets for
/// stroke-erasure.
#[derive(Debug, Clone)]
pub struct PathShape {
    id: ShapeId,
    pub(crate) points: Vec<Pos2>,
    pub(crate) style: ShapeStyle,
    pub(crate) rotation: f32,
}

impl PathShape {
    pub fn new(points: Vec<Pos2>, style: ShapeStyle) -> Self {
        Self {
            id: generate_id(),
            points,
            style: ShapeStyle::stroke(style.border_color, style.pen_width),
            rotation: 0.0,
        }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub(crate) fn core_geometry(&self) -> Rect {
        geometry::bounds_of_points(&self.points)
    }

    pub(crate) fn center(&self) -> Pos2 {
        self.core_geometry().center()
    }

    pub(crate) fn bounding_rect(&self) -> Rect {
        // Pad by the pen so thick strokes are fully enclosed.
        let padding = self.style.pen_width as f32 / 2.0;
        let core = self.core_geometry().expand(padding);
        geometry::rotated_bounds(core, self.rotation, self.center())
    }

    pub(crate) fn contains_point(&self, point: Pos2) -> bool {
        let local = geometry::unrotate_point(point, self.rotation, self.center());
        near_polyline(local, &self.points, self.style.hit_half_width())
    }

    pub(crate) fn move_by(&mut self, offset: Vec2) {
        for point in &mut self.points {
            *point += offset;
        }
    }

    pub(crate) fn update_drag(&mut self, point: Pos2) {
        self.points.push(point);
    }

    pub(crate) fn is_valid_commit(&self) -> bool {
        self.points.len() >= 2
    }

    pub(crate) fn draw(&self, canvas: &mut dyn Canvas) {
        if self.points.is_empty() {
            return;
        }
        let stroke = Stroke::new(self.style.pen_width as f32, self.style.border_color);
        if self.rotation != 0.0 {
            canvas.save();
            canvas.rotate_about(self.center(), self.rotation);
            canvas.polyline(&self.points, stroke);
            canvas.restore();
        } else {
            canvas.polyline(&self.points, stroke);
        }
    }
}
