//! Structured serialization: the bidirectional mapping between shapes and a
//! JSON-like tree of string-keyed maps, arrays and scalars.
//!
//! One node per shape. Persistence stores these nodes, and any external
//! producer of shapes (e.g. an AI-assisted generator) speaks the same
//! schema. Malformed or unknown nodes are skipped with a warning; they never
//! abort the parse of their siblings.

use egui::{Pos2, Rect, pos2, vec2};
use log::warn;
use serde_json::{Value, json};

use crate::shape::{
    DEFAULT_NUM_POINTS, Shape, ShapeStyle, color_from_hex, color_to_hex_argb, color_to_hex_rgb,
};

/// Maximum group nesting accepted from untrusted input. Deeper nodes are
/// dropped with a warning so a hostile payload cannot blow the stack.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Serializes a shape (recursively, for groups) into its schema node.
pub fn shape_to_value(shape: &Shape) -> Value {
    match shape {
        Shape::Line(line) => leaf_node(
            shape,
            json!({
                "p1": [line.start().x, line.start().y],
                "p2": [line.end().x, line.end().y],
            }),
        ),
        Shape::Rectangle(_) | Shape::Ellipse(_) => {
            let rect = shape.core_geometry();
            leaf_node(
                shape,
                json!({
                    "x": rect.min.x,
                    "y": rect.min.y,
                    "width": rect.width(),
                    "height": rect.height(),
                }),
            )
        }
        Shape::Star(star) => {
            let rect = shape.core_geometry();
            leaf_node(
                shape,
                json!({
                    "x": rect.min.x,
                    "y": rect.min.y,
                    "width": rect.width(),
                    "height": rect.height(),
                    "num_points": star.num_points(),
                }),
            )
        }
        Shape::Freehand(path) | Shape::Eraser(path) => leaf_node(
            shape,
            json!({
                "points": path
                    .points()
                    .iter()
                    .map(|p| json!([p.x, p.y]))
                    .collect::<Vec<_>>(),
            }),
        ),
        // Group rotation is already propagated into the children's geometry,
        // so the node carries only the children.
        Shape::Group(group) => json!({
            "type": "Group",
            "children": group
                .children()
                .iter()
                .map(shape_to_value)
                .collect::<Vec<_>>(),
        }),
    }
}

/// Reconstructs a shape from its schema node. Unknown types and malformed
/// geometry yield `None` (with a warning); missing optional fields fall back
/// to documented defaults (rotation 0.0, star points 5, unfilled).
pub fn shape_from_value(value: &Value) -> Option<Shape> {
    shape_from_value_at(value, 0)
}

/// Parses a `{shapes: [...]}` payload from an external shape producer.
/// Undecodable entries are skipped; the surviving shapes are returned in
/// payload order so the caller can wrap them in one multi-add command.
pub fn parse_shape_document(value: &Value) -> Vec<Shape> {
    let Some(nodes) = value.get("shapes").and_then(Value::as_array) else {
        warn!("shape document payload has no \"shapes\" array");
        return Vec::new();
    };
    nodes.iter().filter_map(shape_from_value).collect()
}

fn leaf_node(shape: &Shape, geometry: Value) -> Value {
    let style = shape.style().copied().unwrap_or_default();
    json!({
        "type": shape.kind(),
        "pen_width": style.pen_width,
        "border_color": color_to_hex_rgb(style.border_color),
        "is_filled": style.filled,
        "fill_color": color_to_hex_argb(style.fill_color),
        "rotation": shape.rotation(),
        "geometry": geometry,
    })
}

fn shape_from_value_at(value: &Value, depth: usize) -> Option<Shape> {
    if depth > MAX_NESTING_DEPTH {
        warn!("shape node nested deeper than {MAX_NESTING_DEPTH}, dropping");
        return None;
    }

    let type_tag = value.get("type").and_then(Value::as_str).unwrap_or("");
    let style = style_from_value(value);
    let rotation = field_f32(value, "rotation").unwrap_or(0.0);
    let geometry = value.get("geometry").unwrap_or(&Value::Null);

    let mut shape = match type_tag {
        "Line" => {
            let p1 = point_from_value(geometry.get("p1")?)?;
            let p2 = point_from_value(geometry.get("p2")?)?;
            Shape::line(p1, p2, style)
        }
        "Rectangle" => Shape::rectangle(rect_from_value(geometry)?, style),
        "Ellipse" => Shape::ellipse(rect_from_value(geometry)?, style),
        "Star" => {
            let num_points = geometry
                .get("num_points")
                .and_then(Value::as_u64)
                .map(|n| n as u32)
                .unwrap_or(DEFAULT_NUM_POINTS);
            Shape::star(rect_from_value(geometry)?, style, num_points)
        }
        "Freehand" => Shape::freehand(points_from_value(geometry)?, style),
        "NormalEraser" => {
            let points = points_from_value(geometry)?;
            Shape::eraser(points, style.pen_width, style.border_color)
        }
        "Group" => {
            let children: Vec<Shape> = value
                .get("children")
                .and_then(Value::as_array)
                .map(|nodes| {
                    nodes
                        .iter()
                        .filter_map(|node| shape_from_value_at(node, depth + 1))
                        .collect()
                })
                .unwrap_or_default();
            if children.is_empty() {
                warn!("group node with no decodable children, dropping");
                return None;
            }
            // Falls through to set_rotation below, which propagates a
            // producer-supplied angle into the children.
            Shape::group(children)
        }
        other => {
            warn!("unknown shape type in node: {other:?}");
            return None;
        }
    };

    shape.set_rotation(rotation);
    Some(shape)
}

fn style_from_value(value: &Value) -> ShapeStyle {
    let defaults = ShapeStyle::default();
    let pen_width = value
        .get("pen_width")
        .and_then(Value::as_u64)
        .map(|w| w as u32)
        .unwrap_or(defaults.pen_width);
    let border_color = value
        .get("border_color")
        .and_then(Value::as_str)
        .and_then(color_from_hex)
        .unwrap_or(defaults.border_color);
    let filled = value
        .get("is_filled")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let fill_color = value
        .get("fill_color")
        .and_then(Value::as_str)
        .and_then(color_from_hex)
        .unwrap_or(defaults.fill_color);
    ShapeStyle::new(border_color, pen_width, filled, fill_color)
}

fn field_f32(value: &Value, key: &str) -> Option<f32> {
    value.get(key).and_then(Value::as_f64).map(|v| v as f32)
}

fn rect_from_value(geometry: &Value) -> Option<Rect> {
    let x = field_f32(geometry, "x")?;
    let y = field_f32(geometry, "y")?;
    let width = field_f32(geometry, "width")?;
    let height = field_f32(geometry, "height")?;
    Some(Rect::from_min_size(pos2(x, y), vec2(width, height)))
}

fn point_from_value(value: &Value) -> Option<Pos2> {
    let coords = value.as_array()?;
    let x = coords.first().and_then(Value::as_f64)? as f32;
    let y = coords.get(1).and_then(Value::as_f64)? as f32;
    Some(pos2(x, y))
}

fn points_from_value(geometry: &Value) -> Option<Vec<Pos2>> {
    let nodes = geometry.get("points")?.as_array()?;
    let points: Vec<Pos2> = nodes.iter().filter_map(point_from_value).collect();
    if points.is_empty() { None } else { Some(points) }
}
