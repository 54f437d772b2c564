//! Pure transform kernel: rotated bounding boxes, inverse point mapping and
//! resize-handle math. Stateless and freely reentrant; everything works on
//! `egui` geometry types.

use egui::emath::Rot2;
use egui::{Pos2, Rect, pos2};

/// Normalizes a rect so that `min` is component-wise below `max`.
/// Handles rects that were dragged through their own origin.
pub fn normalized(rect: Rect) -> Rect {
    Rect::from_two_pos(rect.min, rect.max)
}

/// The smallest integer-aligned rect enclosing `rect`.
pub fn aligned(rect: Rect) -> Rect {
    Rect::from_min_max(
        pos2(rect.min.x.floor(), rect.min.y.floor()),
        pos2(rect.max.x.ceil(), rect.max.y.ceil()),
    )
}

/// Rotates `point` by `angle_deg` around `center`.
pub fn rotate_point(point: Pos2, angle_deg: f32, center: Pos2) -> Pos2 {
    if angle_deg == 0.0 {
        return point;
    }
    let rot = Rot2::from_angle(angle_deg.to_radians());
    center + rot * (point - center)
}

/// Applies the inverse rotation: maps a screen-space point back into the
/// shape's local (un-rotated) coordinate space. Hit-testing and handle math
/// both work in that space.
pub fn unrotate_point(point: Pos2, angle_deg: f32, center: Pos2) -> Pos2 {
    rotate_point(point, -angle_deg, center)
}

/// Axis-aligned bounds of `rect` after rotating it by `angle_deg` about
/// `center`.
///
/// Angle zero short-circuits to the normalized rect, bit-exact with no trig,
/// so un-rotated shapes never pick up transform round-off. Rotated rects map
/// all four corners and return the integer-aligned enclosing box.
pub fn rotated_bounds(rect: Rect, angle_deg: f32, center: Pos2) -> Rect {
    let rect = normalized(rect);
    if angle_deg == 0.0 {
        return rect;
    }

    let corners = [
        rect.left_top(),
        rect.right_top(),
        rect.right_bottom(),
        rect.left_bottom(),
    ];
    let mut bounds = Rect::NOTHING;
    for corner in corners {
        bounds.extend_with(rotate_point(corner, angle_deg, center));
    }
    aligned(bounds)
}

/// Bounding box of a point sequence. Empty input yields `Rect::NOTHING`.
pub fn bounds_of_points(points: &[Pos2]) -> Rect {
    let mut bounds = Rect::NOTHING;
    for p in points {
        bounds.extend_with(*p);
    }
    bounds
}

/// One of the eight resize handles around a selected shape.
///
/// Indices 0-3 are corners (the opposite corner stays anchored), 4-7 are
/// edge midpoints (only one dimension changes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
    Top,
    Bottom,
    Left,
    Right,
}

impl Handle {
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Handle::TopLeft),
            1 => Some(Handle::TopRight),
            2 => Some(Handle::BottomRight),
            3 => Some(Handle::BottomLeft),
            4 => Some(Handle::Top),
            5 => Some(Handle::Bottom),
            6 => Some(Handle::Left),
            7 => Some(Handle::Right),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Handle::TopLeft => 0,
            Handle::TopRight => 1,
            Handle::BottomRight => 2,
            Handle::BottomLeft => 3,
            Handle::Top => 4,
            Handle::Bottom => 5,
            Handle::Left => 6,
            Handle::Right => 7,
        }
    }
}

/// Computes the new local rect while dragging `handle`, given the rect at
/// drag start and the mouse position mapped into local space (see
/// [`unrotate_point`]).
///
/// The result is intentionally *not* normalized: the caller normalizes it so
/// that dragging a handle through the opposite edge flips cleanly.
pub fn resize_from_handle(handle: Handle, original: Rect, local_mouse: Pos2) -> Rect {
    let (mut left, mut top, mut right, mut bottom) = (
        original.left(),
        original.top(),
        original.right(),
        original.bottom(),
    );
    match handle {
        Handle::TopLeft => {
            left = local_mouse.x;
            top = local_mouse.y;
        }
        Handle::TopRight => {
            right = local_mouse.x;
            top = local_mouse.y;
        }
        Handle::BottomRight => {
            right = local_mouse.x;
            bottom = local_mouse.y;
        }
        Handle::BottomLeft => {
            left = local_mouse.x;
            bottom = local_mouse.y;
        }
        Handle::Top => top = local_mouse.y,
        Handle::Bottom => bottom = local_mouse.y,
        Handle::Left => left = local_mouse.x,
        Handle::Right => right = local_mouse.x,
    }
    Rect::from_min_max(pos2(left, top), pos2(right, bottom))
}
