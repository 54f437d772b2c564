use egui::{Pos2, Rect, Stroke, Vec2, pos2};

use super::common::{
    MIN_SHAPE_SIZE, ShapeStyle, near_polygon_outline, polygon_contains_even_odd,
};
use crate::canvas::Canvas;
use crate::geometry;
use crate::id_generator::generate_id;
use crate::shape::ShapeId;

/// Inner/outer radius ratio for a five-pointed star. Golden-ratio derived:
/// 1 / phi^2, which gives the classic pentagram silhouette.
const FIVE_POINT_RATIO: f32 = 0.381966;

/// Ratio used for every other point count.
const DEFAULT_RATIO: f32 = 0.45;

pub const DEFAULT_NUM_POINTS: u32 = 5;
pub const MIN_NUM_POINTS: u32 = 3;

/// A star polygon inscribed in its defining rect.
#[derive(Debug, Clone)]
pub struct Star {
    id: ShapeId,
    pub(crate) rect: Rect,
    pub(crate) num_points: u32,
    pub(crate) style: ShapeStyle,
    pub(crate) rotation: f32,
}

impl Star {
    pub fn new(rect: Rect, style: ShapeStyle, num_points: u32) -> Self {
        Self {
            id: generate_id(),
            rect,
            num_points: num_points.max(MIN_NUM_POINTS),
            style,
            rotation: 0.0,
        }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn num_points(&self) -> u32 {
        self.num_points
    }

    /// All `2 * num_points` vertices, alternating between the outer and
    /// inner radius, starting with a point straight up.
    pub fn vertices(&self) -> Vec<Pos2> {
        let bounds = self.core_geometry();
        if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
            return Vec::new();
        }

        let center = bounds.center();
        let outer_radius = bounds.width().min(bounds.height()) / 2.0;
        let ratio = if self.num_points == 5 {
            FIVE_POINT_RATIO
        } else {
            DEFAULT_RATIO
        };
        let inner_radius = outer_radius * ratio;

        let angle_step = std::f32::consts::PI / self.num_points as f32;
        let start_angle = -std::f32::consts::FRAC_PI_2;

        (0..self.num_points * 2)
            .map(|i| {
                let radius = if i % 2 == 0 { outer_radius } else { inner_radius };
                let angle = start_angle + i as f32 * angle_step;
                pos2(
                    center.x + radius * angle.cos(),
                    center.y + radius * angle.sin(),
                )
            })
            .collect()
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
        let vertices = self.vertices();
        if self.style.filled {
            polygon_contains_even_odd(local, &vertices)
        } else {
            near_polygon_outline(local, &vertices, self.style.hit_half_width())
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
        let vertices = self.vertices();
        if vertices.is_empty() {
            return;
        }
        let stroke = Stroke::new(self.style.pen_width as f32, self.style.border_color);
        let fill = self.style.filled.then_some(self.style.fill_color);
        if self.rotation != 0.0 {
            canvas.save();
            canvas.rotate_about(self.center(), self.rotation);
            canvas.polygon(&vertices, stroke, fill);
            canvas.restore();
        } else {
            canvas.polygon(&vertices, stroke, fill);
        }
    }
}
