//! The polymorphic shape model.
//!
//! `Shape` is a closed sum type over every drawable kind; all capability
//! dispatch is an exhaustive match, so adding a kind is a compile-enforced
//! change everywhere it matters (draw, bounds, hit-test, schema).

use egui::{Color32, Pos2, Rect, Vec2};

mod common;
mod ellipse;
mod group;
mod line;
mod path;
mod rect;
mod star;

pub use common::{HIT_TOLERANCE, MIN_SHAPE_SIZE, ShapeStyle};
pub(crate) use common::{color_from_hex, color_to_hex_argb, color_to_hex_rgb};
pub use ellipse::Ellipse;
pub use group::Group;
pub use line::Line;
pub use path::PathShape;
pub use rect::Rectangle;
pub use star::{DEFAULT_NUM_POINTS, MIN_NUM_POINTS, Star};

use crate::canvas::Canvas;

/// Runtime identity of a shape. Selection and the command engine track
/// shapes by id, never by position or value.
pub type ShapeId = usize;

#[derive(Debug, Clone)]
pub enum Shape {
    Line(Line),
    Rectangle(Rectangle),
    Ellipse(Ellipse),
    Star(Star),
    Freehand(PathShape),
    Eraser(PathShape),
    Group(Group),
}

impl Shape {
    // --- construction ---

    pub fn line(start: Pos2, end: Pos2, style: ShapeStyle) -> Self {
        Shape::Line(Line::new(start, end, style))
    }

    pub fn rectangle(rect: Rect, style: ShapeStyle) -> Self {
        Shape::Rectangle(Rectangle::new(rect, style))
    }

    pub fn ellipse(rect: Rect, style: ShapeStyle) -> Self {
        Shape::Ellipse(Ellipse::new(rect, style))
    }

    pub fn star(rect: Rect, style: ShapeStyle, num_points: u32) -> Self {
        Shape::Star(Star::new(rect, style, num_points))
    }

    pub fn freehand(points: Vec<Pos2>, style: ShapeStyle) -> Self {
        Shape::Freehand(PathShape::new(points, style))
    }

    /// An eraser trail paints with the canvas background color.
    pub fn eraser(points: Vec<Pos2>, pen_width: u32, background: Color32) -> Self {
        Shape::Eraser(PathShape::new(
            points,
            ShapeStyle::stroke(background, pen_width),
        ))
    }

    pub fn group(children: Vec<Shape>) -> Self {
        Shape::Group(Group::new(children))
    }

    /// Starts an interactive drag for the given kind at `start`. The result
    /// is degenerate until [`Shape::update_drag`] has stretched it out, and
    /// must pass [`Shape::is_valid_commit`] before entering the document.
    pub fn begin_drag_line(start: Pos2, style: ShapeStyle) -> Self {
        Shape::line(start, start, style)
    }

    pub fn begin_drag_rectangle(start: Pos2, style: ShapeStyle) -> Self {
        Shape::rectangle(Rect::from_min_max(start, start), style)
    }

    pub fn begin_drag_ellipse(start: Pos2, style: ShapeStyle) -> Self {
        Shape::ellipse(Rect::from_min_max(start, start), style)
    }

    pub fn begin_drag_star(start: Pos2, style: ShapeStyle) -> Self {
        Shape::star(Rect::from_min_max(start, start), style, DEFAULT_NUM_POINTS)
    }

    pub fn begin_drag_freehand(start: Pos2, style: ShapeStyle) -> Self {
        Shape::freehand(vec![start], style)
    }

    pub fn begin_drag_eraser(start: Pos2, pen_width: u32, background: Color32) -> Self {
        Shape::eraser(vec![start], pen_width, background)
    }

    // --- common capability set ---

    pub fn id(&self) -> ShapeId {
        match self {
            Shape::Line(s) => s.id(),
            Shape::Rectangle(s) => s.id(),
            Shape::Ellipse(s) => s.id(),
            Shape::Star(s) => s.id(),
            Shape::Freehand(s) => s.id(),
            Shape::Eraser(s) => s.id(),
            Shape::Group(s) => s.id(),
        }
    }

    /// The schema type tag for this shape.
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Line(_) => "Line",
            Shape::Rectangle(_) => "Rectangle",
            Shape::Ellipse(_) => "Ellipse",
            Shape::Star(_) => "Star",
            Shape::Freehand(_) => "Freehand",
            Shape::Eraser(_) => "NormalEraser",
            Shape::Group(_) => "Group",
        }
    }

    /// Style attributes. Groups have none: they ignore border and fill.
    pub fn style(&self) -> Option<&ShapeStyle> {
        match self {
            Shape::Line(s) => Some(&s.style),
            Shape::Rectangle(s) => Some(&s.style),
            Shape::Ellipse(s) => Some(&s.style),
            Shape::Star(s) => Some(&s.style),
            Shape::Freehand(s) => Some(&s.style),
            Shape::Eraser(s) => Some(&s.style),
            Shape::Group(_) => None,
        }
    }

    pub fn style_mut(&mut self) -> Option<&mut ShapeStyle> {
        match self {
            Shape::Line(s) => Some(&mut s.style),
            Shape::Rectangle(s) => Some(&mut s.style),
            Shape::Ellipse(s) => Some(&mut s.style),
            Shape::Star(s) => Some(&mut s.style),
            Shape::Freehand(s) => Some(&mut s.style),
            Shape::Eraser(s) => Some(&mut s.style),
            Shape::Group(_) => None,
        }
    }

    /// Rotation angle in degrees, default 0.
    pub fn rotation(&self) -> f32 {
        match self {
            Shape::Line(s) => s.rotation,
            Shape::Rectangle(s) => s.rotation,
            Shape::Ellipse(s) => s.rotation,
            Shape::Star(s) => s.rotation,
            Shape::Freehand(s) => s.rotation,
            Shape::Eraser(s) => s.rotation,
            Shape::Group(s) => s.rotation,
        }
    }

    /// Sets the rotation angle. Groups propagate the delta into their
    /// children (see [`Group::set_rotation`]); leaf shapes just store it.
    pub fn set_rotation(&mut self, angle_deg: f32) {
        match self {
            Shape::Line(s) => s.rotation = angle_deg,
            Shape::Rectangle(s) => s.rotation = angle_deg,
            Shape::Ellipse(s) => s.rotation = angle_deg,
            Shape::Star(s) => s.rotation = angle_deg,
            Shape::Freehand(s) => s.rotation = angle_deg,
            Shape::Eraser(s) => s.rotation = angle_deg,
            Shape::Group(s) => s.set_rotation(angle_deg),
        }
    }

    /// Axis-aligned bounds of the rotated silhouette.
    pub fn bounding_rect(&self) -> Rect {
        match self {
            Shape::Line(s) => s.bounding_rect(),
            Shape::Rectangle(s) => s.bounding_rect(),
            Shape::Ellipse(s) => s.bounding_rect(),
            Shape::Star(s) => s.bounding_rect(),
            Shape::Freehand(s) => s.bounding_rect(),
            Shape::Eraser(s) => s.bounding_rect(),
            Shape::Group(s) => s.bounding_rect(),
        }
    }

    /// The un-rotated defining rect (normalized). Groups report the union
    /// over their children.
    pub fn core_geometry(&self) -> Rect {
        match self {
            Shape::Line(s) => s.core_geometry(),
            Shape::Rectangle(s) => s.core_geometry(),
            Shape::Ellipse(s) => s.core_geometry(),
            Shape::Star(s) => s.core_geometry(),
            Shape::Freehand(s) => s.core_geometry(),
            Shape::Eraser(s) => s.core_geometry(),
            Shape::Group(s) => s.core_geometry(),
        }
    }

    pub fn center(&self) -> Pos2 {
        match self {
            Shape::Line(s) => s.center(),
            Shape::Rectangle(s) => s.center(),
            Shape::Ellipse(s) => s.center(),
            Shape::Star(s) => s.center(),
            Shape::Freehand(s) => s.center(),
            Shape::Eraser(s) => s.center(),
            Shape::Group(s) => s.center(),
        }
    }

    /// Hit-test with the outline tolerance described in [`HIT_TOLERANCE`].
    pub fn contains_point(&self, point: Pos2) -> bool {
        match self {
            Shape::Line(s) => s.contains_point(point),
            Shape::Rectangle(s) => s.contains_point(point),
            Shape::Ellipse(s) => s.contains_point(point),
            Shape::Star(s) => s.contains_point(point),
            Shape::Freehand(s) => s.contains_point(point),
            Shape::Eraser(s) => s.contains_point(point),
            Shape::Group(s) => s.contains_point(point),
        }
    }

    pub fn move_by(&mut self, offset: Vec2) {
        match self {
            Shape::Line(s) => s.move_by(offset),
            Shape::Rectangle(s) => s.move_by(offset),
            Shape::Ellipse(s) => s.move_by(offset),
            Shape::Star(s) => s.move_by(offset),
            Shape::Freehand(s) => s.move_by(offset),
            Shape::Eraser(s) => s.move_by(offset),
            Shape::Group(s) => s.move_by(offset),
        }
    }

    /// Replaces the local (un-rotated) defining rect. Only rect-defined
    /// shapes respond; lines, paths and groups keep their geometry.
    pub fn set_geometry(&mut self, rect: Rect) {
        match self {
            Shape::Rectangle(s) => s.set_geometry(rect),
            Shape::Ellipse(s) => s.set_geometry(rect),
            Shape::Star(s) => s.set_geometry(rect),
            Shape::Line(_) | Shape::Freehand(_) | Shape::Eraser(_) | Shape::Group(_) => {}
        }
    }

    /// Extends an interactive drag to `point`.
    pub fn update_drag(&mut self, point: Pos2) {
        match self {
            Shape::Line(s) => s.update_drag(point),
            Shape::Rectangle(s) => s.update_drag(point),
            Shape::Ellipse(s) => s.update_drag(point),
            Shape::Star(s) => s.update_drag(point),
            Shape::Freehand(s) => s.update_drag(point),
            Shape::Eraser(s) => s.update_drag(point),
            Shape::Group(_) => {}
        }
    }

    /// Whether a freshly dragged shape is worth committing: degenerate lines,
    /// single-point paths and sub-2-unit rects are discarded instead.
    pub fn is_valid_commit(&self) -> bool {
        match self {
            Shape::Line(s) => s.is_valid_commit(),
            Shape::Rectangle(s) => s.is_valid_commit(),
            Shape::Ellipse(s) => s.is_valid_commit(),
            Shape::Star(s) => s.is_valid_commit(),
            Shape::Freehand(s) => s.is_valid_commit(),
            Shape::Eraser(s) => s.is_valid_commit(),
            Shape::Group(s) => !s.children().is_empty(),
        }
    }

    /// Emits the shape's primitive into the canvas sink. Rotation is applied
    /// as a save/rotate/restore bracket around the local-space primitive and
    /// is never baked into the stored geometry.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        match self {
            Shape::Line(s) => s.draw(canvas),
            Shape::Rectangle(s) => s.draw(canvas),
            Shape::Ellipse(s) => s.draw(canvas),
            Shape::Star(s) => s.draw(canvas),
            Shape::Freehand(s) => s.draw(canvas),
            Shape::Eraser(s) => s.draw(canvas),
            Shape::Group(s) => s.draw(canvas),
        }
    }

    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Shape::Group(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_group_mut(&mut self) -> Option<&mut Group> {
        match self {
            Shape::Group(g) => Some(g),
            _ => None,
        }
    }
}
