use egui::{Pos2, Rect, Stroke, Vec2};

use super::common::{MIN_SHAPE_SIZE, ShapeStyle, ellipse_contains, near_ellipse_outline};
use crate::canvas::Canvas;
use crate::geometry;
use crate::id_generator::generate_id;
use crate::shape::ShapeId;

/// An ellipse inscribed in its defining rect.
#[derive(Debug, Clone)]
pub struct Ellipse {
    id: ShapeId,
    pub(crate) rect: Rect,
    pub(crate) style: ShapeStyle,
    pub(crate) rotation: f32,
}

impl Ellipse {
    pub fn new(rect: Rect, style: ShapeStyle) -> Self {
        Self {
            id: generate_id(),
            rect,
            style,
            rotation: 0.0,
        }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub(crate) fn core_geometry(&self) -> Rect {
        geometry::normalized(self.rect)
    }

    pub(crate) fn center(&self) -> Pos2 {
        self.rect.center()
    }

    pub(crate) fn bounding_rect(&self) -> Rect {
        geometry::rotated_bounds(self.rect, self.rotation, self.center())
    }

    pub(crate) fn contains_point(&self, point: Pos2) -> bool {
        let local = geometry::unrotate_point(point, self.rotation, self.center());
        let rect = self.core_geometry();
        if self.style.filled {
            ellipse_contains(local, rect)
        } else {
            near_ellipse_outline(local, rect, self.style.hit_half_width())
        }
    }

    pub(crate) fn move_by(&mut self, offset: Vec2) {
        self.rect = self.rect.translate(offset);
    }

    pub(crate) fn set_geometry(&mut self, rect: Rect) {
        self.rect = rect;
    }

    pub(crate) fn update_drag(&mut self, point: Pos2) {
        self.rect.max = point;
    }

    pub(crate) fn is_valid_commit(&self) -> bool {
        let rect = self.core_geometry();
        rect.width() >= MIN_SHAPE_SIZE && rect.height() >= MIN_SHAPE_SIZE
    }

    pub(crate) fn draw(&self, canvas: &mut dyn Canvas) {
        let stroke = Stroke::new(self.style.pen_width as f32, self.style.border_color);
        let fill = self.style.filled.then_some(self.style.fill_color);
        let rect = self.core_geometry();
        if self.rotation != 0.0 {
            canvas.save();
            canvas.rotate_about(self.center(), self.rotation);
            canvas.ellipse(rect, stroke, fill);
            canvas.restore();
        } else {
            canvas.ellipse(rect, stroke, fill);
        }
    }
}
