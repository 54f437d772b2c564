use artboard::command::{Command, CommandHistory};
use artboard::document::Document;
use artboard::shape::{Shape, ShapeId, ShapeStyle};
use egui::{Color32, Rect, pos2, vec2};

// Helper: a document with three shapes, built through the command engine.
// Returns the document, its history and the three ids in z-order.
fn document_with_three_shapes() -> (Document, CommandHistory, [ShapeId; 3]) {
    let mut document = Document::new();
    let mut history = CommandHistory::new();

    let style = ShapeStyle::new(Color32::RED, 2, true, Color32::YELLOW);
    let shapes = [
        Shape::rectangle(Rect::from_min_max(pos2(0.0, 0.0), pos2(20.0, 20.0)), style),
        Shape::ellipse(Rect::from_min_max(pos2(30.0, 0.0), pos2(60.0, 20.0)), style),
        Shape::line(pos2(0.0, 40.0), pos2(60.0, 40.0), ShapeStyle::default()),
    ];
    let ids = [shapes[0].id(), shapes[1].id(), shapes[2].id()];
    for shape in shapes {
        history.execute(Command::add_shape(shape), &mut document);
    }
    (document, history, ids)
}

fn ids_in_order(document: &Document) -> Vec<ShapeId> {
    document.shapes().iter().map(Shape::id).collect()
}

#[test]
fn test_add_execute_undo_redo() {
    let mut document = Document::new();
    let mut history = CommandHistory::new();

    let shape = Shape::rectangle(
        Rect::from_min_max(pos2(0.0, 0.0), pos2(10.0, 10.0)),
        ShapeStyle::default(),
    );
    let id = shape.id();

    history.execute(Command::add_shape(shape), &mut document);
    assert_eq!(document.len(), 1);
    assert!(document.find(id).is_some());

    history.undo(&mut document);
    assert!(document.is_empty());
    assert!(history.can_redo());

    history.redo(&mut document);
    assert_eq!(document.len(), 1);
    assert!(document.find(id).is_some());
}

#[test]
fn test_delete_restores_original_index() {
    let (mut document, mut history, ids) = document_with_three_shapes();

    let delete = Command::delete_shape(&document, ids[1]).unwrap();
    history.execute(delete, &mut document);
    assert_eq!(ids_in_order(&document), vec![ids[0], ids[2]]);

    history.undo(&mut document);
    assert_eq!(ids_in_order(&document), ids.to_vec());
}

#[test]
fn test_multi_delete_restores_z_order() {
    let (mut document, mut history, ids) = document_with_three_shapes();

    // Deleting first and last together; the macro removes in descending
    // index order so neither sub-delete invalidates the other.
    let delete = Command::delete_shapes(&document, &[ids[0], ids[2]]).unwrap();
    history.execute(delete, &mut document);
    assert_eq!(ids_in_order(&document), vec![ids[1]]);

    history.undo(&mut document);
    assert_eq!(ids_in_order(&document), ids.to_vec());

    history.redo(&mut document);
    assert_eq!(ids_in_order(&document), vec![ids[1]]);
}

#[test]
fn test_delete_of_unknown_id_is_rejected() {
    let (document, _, _) = document_with_three_shapes();
    assert!(Command::delete_shape(&document, 999_999).is_none());
}

#[test]
fn test_move_undo_restores_geometry() {
    let (mut document, mut history, ids) = document_with_three_shapes();
    let before = document.find(ids[0]).unwrap().core_geometry();

    history.execute(
        Command::move_shapes(vec![ids[0], ids[1]], vec2(5.0, 7.0)),
        &mut document,
    );
    assert_eq!(
        document.find(ids[0]).unwrap().core_geometry(),
        before.translate(vec2(5.0, 7.0))
    );

    history.undo(&mut document);
    assert_eq!(document.find(ids[0]).unwrap().core_geometry(), before);
}

#[test]
fn test_resize_undo_restores_rect() {
    let (mut document, mut history, ids) = document_with_three_shapes();
    let old_rect = document.find(ids[0]).unwrap().core_geometry();
    let new_rect = Rect::from_min_max(pos2(0.0, 0.0), pos2(50.0, 35.0));

    history.execute(Command::resize_shape(ids[0], old_rect, new_rect), &mut document);
    assert_eq!(document.find(ids[0]).unwrap().core_geometry(), new_rect);

    history.undo(&mut document);
    assert_eq!(document.find(ids[0]).unwrap().core_geometry(), old_rect);
}

#[test]
fn test_rotate_undo_restores_angle() {
    let (mut document, mut history, ids) = document_with_three_shapes();

    history.execute(Command::rotate_shape(ids[0], 0.0, 45.0), &mut document);
    assert_eq!(document.find(ids[0]).unwrap().rotation(), 45.0);

    history.undo(&mut document);
    assert_eq!(document.find(ids[0]).unwrap().rotation(), 0.0);

    history.redo(&mut document);
    assert_eq!(document.find(ids[0]).unwrap().rotation(), 45.0);
}

#[test]
fn test_clear_all_round_trip() {
    let (mut document, mut history, ids) = document_with_three_shapes();

    history.execute(Command::clear_all(), &mut document);
    assert!(document.is_empty());

    history.undo(&mut document);
    assert_eq!(ids_in_order(&document), ids.to_vec());

    history.redo(&mut document);
    assert!(document.is_empty());
}

#[test]
fn test_group_and_undo() {
    let (mut document, mut history, ids) = document_with_three_shapes();

    let group = Command::group_shapes(&document, &[ids[0], ids[1]]).unwrap();
    history.execute(group, &mut document);

    assert_eq!(document.len(), 2);
    let group_id = document
        .shapes()
        .iter()
        .find_map(|s| s.as_group().map(|_| s.id()))
        .unwrap();
    let group_shape = document.find(group_id).unwrap();
    assert_eq!(group_shape.as_group().unwrap().children().len(), 2);
    assert_eq!(document.selected_ids(), &[group_id]);

    history.undo(&mut document);
    assert_eq!(ids_in_order(&document), ids.to_vec());
    assert!(document.find(group_id).is_none());
    assert_eq!(document.selected_ids(), &[ids[0], ids[1]]);
}

#[test]
fn test_group_redo_preserves_group_identity() {
    let (mut document, mut history, ids) = document_with_three_shapes();

    let group = Command::group_shapes(&document, &[ids[0], ids[2]]).unwrap();
    history.execute(group, &mut document);
    let group_id = document
        .shapes()
        .iter()
        .find_map(|s| s.as_group().map(|_| s.id()))
        .unwrap();

    history.undo(&mut document);
    history.redo(&mut document);

    // Redo re-populates the same group shape rather than minting a new one.
    let regrouped = document.find(group_id).unwrap();
    assert_eq!(regrouped.as_group().unwrap().children().len(), 2);
}

#[test]
fn test_group_requires_two_members() {
    let (document, _, ids) = document_with_three_shapes();
    assert!(Command::group_shapes(&document, &[ids[0]]).is_none());
    assert!(Command::group_shapes(&document, &[]).is_none());
}

#[test]
fn test_ungroup_and_undo() {
    let (mut document, mut history, ids) = document_with_three_shapes();

    history.execute(
        Command::group_shapes(&document, &[ids[0], ids[1]]).unwrap(),
        &mut document,
    );
    let group_id = document
        .shapes()
        .iter()
        .find_map(|s| s.as_group().map(|_| s.id()))
        .unwrap();
    let group_index = document.index_of(group_id).unwrap();

    history.execute(
        Command::ungroup_shape(&document, group_id).unwrap(),
        &mut document,
    );
    assert!(document.find(group_id).is_none());
    assert!(document.find(ids[0]).is_some());
    assert!(document.find(ids[1]).is_some());
    assert_eq!(document.selected_ids(), &[ids[0], ids[1]]);

    history.undo(&mut document);
    let restored = document.find(group_id).unwrap();
    assert_eq!(restored.as_group().unwrap().children().len(), 2);
    assert_eq!(document.index_of(group_id).unwrap(), group_index);
}

#[test]
fn test_ungroup_rejects_non_group() {
    let (document, _, ids) = document_with_three_shapes();
    assert!(Command::ungroup_shape(&document, ids[0]).is_none());
}

#[test]
fn test_new_command_invalidates_redo() {
    let (mut document, mut history, ids) = document_with_three_shapes();

    history.execute(Command::rotate_shape(ids[0], 0.0, 90.0), &mut document);
    history.undo(&mut document);
    assert!(history.can_redo());

    history.execute(Command::move_shapes(vec![ids[0]], vec2(1.0, 1.0)), &mut document);
    assert!(!history.can_redo());
}

#[test]
fn test_empty_stack_operations_are_noops() {
    let mut document = Document::new();
    let mut history = CommandHistory::new();

    history.undo(&mut document);
    history.redo(&mut document);
    assert!(document.is_empty());
    assert!(!history.can_undo());
    assert!(!history.can_redo());
}

#[test]
fn test_macro_add_is_one_undo_step() {
    let mut document = Document::new();
    let mut history = CommandHistory::new();

    let shapes = vec![
        Shape::rectangle(Rect::from_min_max(pos2(0.0, 0.0), pos2(5.0, 5.0)), ShapeStyle::default()),
        Shape::line(pos2(0.0, 0.0), pos2(9.0, 9.0), ShapeStyle::default()),
        Shape::ellipse(Rect::from_min_max(pos2(10.0, 10.0), pos2(20.0, 20.0)), ShapeStyle::default()),
    ];
    history.execute(Command::add_shapes(shapes), &mut document);
    assert_eq!(document.len(), 3);

    history.undo(&mut document);
    assert!(document.is_empty());
    assert!(!history.can_undo());
}

#[test]
fn test_deleting_selected_shape_prunes_selection() {
    let (mut document, mut history, ids) = document_with_three_shapes();
    document.set_selection(vec![ids[0], ids[1]]);

    history.execute(Command::delete_shape(&document, ids[0]).unwrap(), &mut document);
    assert_eq!(document.selected_ids(), &[ids[1]]);
}

#[test]
fn test_hit_test_prefers_topmost_shape() {
    let mut document = Document::new();
    let mut history = CommandHistory::new();
    let style = ShapeStyle::new(Color32::BLUE, 1, true, Color32::BLUE);

    let bottom = Shape::rectangle(Rect::from_min_max(pos2(0.0, 0.0), pos2(50.0, 50.0)), style);
    let top = Shape::rectangle(Rect::from_min_max(pos2(25.0, 25.0), pos2(75.0, 75.0)), style);
    let (bottom_id, top_id) = (bottom.id(), top.id());
    history.execute(Command::add_shape(bottom), &mut document);
    history.execute(Command::add_shape(top), &mut document);

    // Overlap region belongs to the later (topmost) shape.
    assert_eq!(document.hit_test_top(pos2(30.0, 30.0)), Some(top_id));
    assert_eq!(document.hit_test_top(pos2(5.0, 5.0)), Some(bottom_id));
    assert_eq!(document.hit_test_top(pos2(200.0, 200.0)), None);
}

#[test]
fn test_eraser_trails_are_not_selectable() {
    let mut document = Document::new();
    let mut history = CommandHistory::new();

    let rect = Shape::rectangle(
        Rect::from_min_max(pos2(0.0, 0.0), pos2(50.0, 50.0)),
        ShapeStyle::new(Color32::BLACK, 1, true, Color32::GREEN),
    );
    let rect_id = rect.id();
    let eraser = Shape::eraser(vec![pos2(10.0, 10.0), pos2(40.0, 40.0)], 10, Color32::WHITE);
    history.execute(Command::add_shape(rect), &mut document);
    history.execute(Command::add_shape(eraser), &mut document);

    // The eraser is topmost where the trail crosses the rect, but it is
    // background paint: selection falls through to the shape underneath.
    assert_eq!(document.hit_test_top(pos2(25.0, 25.0)), Some(rect_id));

    // A point covered only by the eraser trail hits nothing.
    let mut lone = Document::new();
    let mut lone_history = CommandHistory::new();
    let trail = Shape::eraser(vec![pos2(0.0, 0.0), pos2(20.0, 0.0)], 10, Color32::WHITE);
    lone_history.execute(Command::add_shape(trail), &mut lone);
    assert_eq!(lone.hit_test_top(pos2(10.0, 0.0)), None);
}

#[test]
fn test_eraser_trails_are_not_erase_candidates() {
    let mut document = Document::new();
    let mut history = CommandHistory::new();

    let rect = Shape::rectangle(
        Rect::from_min_max(pos2(0.0, 0.0), pos2(50.0, 50.0)),
        ShapeStyle::new(Color32::BLACK, 1, true, Color32::GREEN),
    );
    let rect_id = rect.id();
    let eraser = Shape::eraser(vec![pos2(10.0, 10.0), pos2(40.0, 40.0)], 10, Color32::WHITE);
    history.execute(Command::add_shape(rect), &mut document);
    history.execute(Command::add_shape(eraser), &mut document);

    let candidates = document.erase_candidates_at(pos2(25.0, 25.0));
    assert_eq!(candidates, vec![rect_id]);
}
