use egui::{Color32, Pos2, Rect};

/// Extra thickness, in device units, added to a shape's pen width when
/// hit-testing unfilled outlines. Keeps thin lines clickable.
pub const HIT_TOLERANCE: f32 = 4.0;

/// Shapes whose defining rect ends up narrower or shorter than this are
/// discarded on commit instead of being added to the document.
pub const MIN_SHAPE_SIZE: f32 = 2.0;

/// Style attributes shared by every concrete shape.
///
/// Group shapes carry one of these too but ignore it; a group has no border
/// or fill of its own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeStyle {
    pub border_color: Color32,
    /// Always > 0.
    pub pen_width: u32,
    pub filled: bool,
    pub fill_color: Color32,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            border_color: Color32::BLACK,
            pen_width: 1,
            filled: false,
            fill_color: Color32::TRANSPARENT,
        }
    }
}

impl ShapeStyle {
    pub fn new(border_color: Color32, pen_width: u32, filled: bool, fill_color: Color32) -> Self {
        Self {
            border_color,
            pen_width: pen_width.max(1),
            filled,
            fill_color,
        }
    }

    pub fn stroke(border_color: Color32, pen_width: u32) -> Self {
        Self::new(border_color, pen_width, false, Color32::TRANSPARENT)
    }

    /// Half-width of the thickened outline used for hit-testing.
    pub(crate) fn hit_half_width(&self) -> f32 {
        (self.pen_width as f32 + HIT_TOLERANCE) / 2.0
    }
}

/// Distance from a point to a line segment.
pub(crate) fn distance_to_segment(point: Pos2, a: Pos2, b: Pos2) -> f32 {
    let seg = b - a;
    let to_point = a - point;
    let len_sq = seg.length_sq();
    if len_sq == 0.0 {
        return to_point.length();
    }
    let t = ((point - a).dot(seg) / len_sq).clamp(0.0, 1.0);
    let projection = a + seg * t;
    (point - projection).length()
}

/// Whether `point` lies within `half_width` of any segment of the polyline.
pub(crate) fn near_polyline(point: Pos2, points: &[Pos2], half_width: f32) -> bool {
    match points {
        [] => false,
        [only] => (point - *only).length() <= half_width,
        _ => points
            .windows(2)
            .any(|pair| distance_to_segment(point, pair[0], pair[1]) <= half_width),
    }
}

/// Whether `point` lies within `half_width` of the closed polygon outline.
pub(crate) fn near_polygon_outline(point: Pos2, points: &[Pos2], half_width: f32) -> bool {
    if points.len() < 2 {
        return false;
    }
    let closing = [points[points.len() - 1], points[0]];
    near_polyline(point, points, half_width)
        || distance_to_segment(point, closing[0], closing[1]) <= half_width
}

/// Even-odd point-in-polygon test. The even-odd rule is what makes
/// self-intersecting star polygons fill as expected.
pub(crate) fn polygon_contains_even_odd(point: Pos2, points: &[Pos2]) -> bool {
    if points.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (pi, pj) = (points[i], points[j]);
        if (pi.y > point.y) != (pj.y > point.y) {
            let x_cross = pj.x + (point.y - pj.y) / (pi.y - pj.y) * (pi.x - pj.x);
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Whether `point` lies on the thickened outline of an axis-aligned rect.
pub(crate) fn near_rect_outline(point: Pos2, rect: Rect, half_width: f32) -> bool {
    rect.expand(half_width).contains(point) && !rect.shrink(half_width).contains(point)
}

/// Interior test for the ellipse inscribed in `rect`.
pub(crate) fn ellipse_contains(point: Pos2, rect: Rect) -> bool {
    let rx = rect.width() / 2.0;
    let ry = rect.height() / 2.0;
    if rx <= 0.0 || ry <= 0.0 {
        return false;
    }
    let center = rect.center();
    let dx = (point.x - center.x) / rx;
    let dy = (point.y - center.y) / ry;
    dx * dx + dy * dy <= 1.0
}

/// Whether `point` lies on the thickened outline of the ellipse inscribed in
/// `rect`. Approximates the stroked ellipse as the ring between an outer and
/// an inner ellipse grown/shrunk by `half_width`.
pub(crate) fn near_ellipse_outline(point: Pos2, rect: Rect, half_width: f32) -> bool {
    ellipse_contains(point, rect.expand(half_width))
        && !ellipse_contains(point, rect.shrink(half_width))
}

/// Formats a color as `#RRGGBB`, the schema form used for border colors.
pub(crate) fn color_to_hex_rgb(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

/// Formats a color as `#AARRGGBB`, the schema form used for fill colors so
/// that transparency survives the round trip.
pub(crate) fn color_to_hex_argb(color: Color32) -> String {
    format!(
        "#{:02x}{:02x}{:02x}{:02x}",
        color.a(),
        color.r(),
        color.g(),
        color.b()
    )
}

/// Parses `#RRGGBB` or `#AARRGGBB`. Returns `None` for anything else.
pub(crate) fn color_from_hex(hex: &str) -> Option<Color32> {
    let digits = hex.strip_prefix('#')?;
    let parse = |range: std::ops::Range<usize>| u8::from_str_radix(digits.get(range)?, 16).ok();
    match digits.len() {
        6 => Some(Color32::from_rgb(parse(0..2)?, parse(2..4)?, parse(4..6)?)),
        8 => Some(Color32::from_rgba_premultiplied(
            parse(2..4)?,
            parse(4..6)?,
            parse(6..8)?,
            parse(0..2)?,
        )),
        _ => None,
    }
}
