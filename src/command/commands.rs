//! Reversible document mutations.
//!
//! Each variant captures enough state to both perform and reverse one
//! mutation. Ownership of shapes transfers by moving them in and out of the
//! command: `Some` means the command currently owns the shape, `None` means
//! the document does. Dropping a command drops exactly the shapes it still
//! holds, so neither leaks nor double-frees are possible.
//!
//! Inconsistent undo state (missing shape, out-of-range index) is logged and
//! skipped rather than panicking: corrupting history is worse than a visible
//! no-op.

use egui::{Rect, Vec2};
use log::warn;

use crate::document::Document;
use crate::shape::{Shape, ShapeId};

/// One reversible document mutation.
#[derive(Debug)]
pub enum Command {
    /// Appends a shape to the document tail.
    Add {
        id: ShapeId,
        /// `Some` while the command owns the shape (fresh or undone).
        shape: Option<Shape>,
    },

    /// Removes a shape; undo restores it at its original index.
    Delete {
        id: ShapeId,
        /// Index the shape occupied when the command was constructed.
        index: usize,
        /// `Some` while the command owns the removed shape.
        shape: Option<Shape>,
    },

    /// Translates one or more shapes by a net offset.
    Move { ids: Vec<ShapeId>, delta: Vec2 },

    /// Replaces a shape's local defining rect.
    Resize {
        id: ShapeId,
        old_rect: Rect,
        new_rect: Rect,
    },

    /// Replaces a shape's rotation angle.
    Rotate {
        id: ShapeId,
        old_angle: f32,
        new_angle: f32,
    },

    /// Empties the document; undo restores the snapshot wholesale.
    ///
    /// Undoing a clear after further shapes were added overwrites those
    /// shapes (logged). Known limitation carried over from the original
    /// behavior.
    ClearAll { snapshot: Vec<Shape> },

    /// Collapses a set of shapes into one group shape.
    Group {
        ids: Vec<ShapeId>,
        /// Indices the members occupied at construction time, aligned with
        /// `ids`. Undo restores each child at its recorded index.
        original_indices: Vec<usize>,
        /// Set on first execute, when the group shape is created.
        group_id: Option<ShapeId>,
        /// `Some` while the command owns the (hollow, after undo) group.
        group: Option<Shape>,
    },

    /// Dissolves a group back into its children.
    Ungroup {
        group_id: ShapeId,
        /// Index the group occupied when the command was constructed.
        original_index: usize,
        child_ids: Vec<ShapeId>,
        /// `Some` while the command owns the hollow group (after execute).
        group: Option<Shape>,
    },

    /// An ordered list of sub-commands executed as one undo step.
    /// Execution runs in construction order, undo in reverse.
    Macro { commands: Vec<Command> },
}

impl Command {
    // --- constructors ---

    pub fn add_shape(shape: Shape) -> Self {
        Command::Add {
            id: shape.id(),
            shape: Some(shape),
        }
    }

    /// Multi-add as a single undo step (used by the shape-producer boundary).
    pub fn add_shapes(shapes: Vec<Shape>) -> Self {
        Command::Macro {
            commands: shapes.into_iter().map(Command::add_shape).collect(),
        }
    }

    /// `None` if `id` is not in the document.
    pub fn delete_shape(document: &Document, id: ShapeId) -> Option<Self> {
        let index = document.index_of(id)?;
        Some(Command::Delete {
            id,
            index,
            shape: None,
        })
    }

    /// Multi-delete as a single undo step. Sub-deletes are ordered by
    /// descending original index so sequential removal cannot invalidate a
    /// later sub-command's index; reverse-order undo then restores the
    /// lowest indices first, reconstructing the original order.
    pub fn delete_shapes(document: &Document, ids: &[ShapeId]) -> Option<Self> {
        let mut indexed: Vec<(usize, ShapeId)> = ids
            .iter()
            .filter_map(|&id| document.index_of(id).map(|index| (index, id)))
            .collect();
        if indexed.is_empty() {
            return None;
        }
        indexed.sort_by(|a, b| b.0.cmp(&a.0));
        Some(Command::Macro {
            commands: indexed
                .into_iter()
                .map(|(index, id)| Command::Delete {
                    id,
                    index,
                    shape: None,
                })
                .collect(),
        })
    }

    pub fn move_shapes(ids: Vec<ShapeId>, delta: Vec2) -> Self {
        Command::Move { ids, delta }
    }

    pub fn resize_shape(id: ShapeId, old_rect: Rect, new_rect: Rect) -> Self {
        Command::Resize {
            id,
            old_rect,
            new_rect,
        }
    }

    pub fn rotate_shape(id: ShapeId, old_angle: f32, new_angle: f32) -> Self {
        Command::Rotate {
            id,
            old_angle,
            new_angle,
        }
    }

    pub fn clear_all() -> Self {
        Command::ClearAll {
            snapshot: Vec::new(),
        }
    }

    /// `None` unless at least two of the ids are present in the document.
    pub fn group_shapes(document: &Document, ids: &[ShapeId]) -> Option<Self> {
        let mut members = Vec::with_capacity(ids.len());
        let mut indices = Vec::with_capacity(ids.len());
        for &id in ids {
            let index = document.index_of(id)?;
            members.push(id);
            indices.push(index);
        }
        if members.len() < 2 {
            return None;
        }
        Some(Command::Group {
            ids: members,
            original_indices: indices,
            group_id: None,
            group: None,
        })
    }

    /// `None` if `id` does not name a group in the document.
    pub fn ungroup_shape(document: &Document, id: ShapeId) -> Option<Self> {
        let original_index = document.index_of(id)?;
        let group = document.find(id)?.as_group()?;
        Some(Command::Ungroup {
            group_id: id,
            original_index,
            child_ids: group.children().iter().map(Shape::id).collect(),
            group: None,
        })
    }

    // --- execution ---

    pub fn execute(&mut self, document: &mut Document) {
        match self {
            Command::Add { id, shape } => match shape.take() {
                Some(shape) => document.append(shape),
                None => warn!("add: shape {id} is already in the document"),
            },

            Command::Delete { id, shape, .. } => match document.remove_by_id(*id) {
                Some(removed) => *shape = Some(removed),
                None => warn!("delete: shape {id} not found in document"),
            },

            Command::Move { ids, delta } => translate_all(document, ids, *delta),

            Command::Resize { id, new_rect, .. } => match document.find_mut(*id) {
                Some(shape) => shape.set_geometry(*new_rect),
                None => warn!("resize: shape {id} not found in document"),
            },

            Command::Rotate { id, new_angle, .. } => match document.find_mut(*id) {
                Some(shape) => shape.set_rotation(*new_angle),
                None => warn!("rotate: shape {id} not found in document"),
            },

            Command::ClearAll { snapshot } => {
                *snapshot = document.take_all();
            }

            Command::Group {
                ids,
                group_id,
                group,
                ..
            } => {
                let mut children = Vec::with_capacity(ids.len());
                for &id in ids.iter() {
                    match document.remove_by_id(id) {
                        Some(shape) => children.push(shape),
                        None => warn!("group: member shape {id} not found in document"),
                    }
                }
                if children.is_empty() {
                    warn!("group: no member shapes found, nothing to group");
                    return;
                }

                // First execute creates the group; redo re-populates the one
                // the undo hollowed out, preserving its identity.
                let shape = match group.take() {
                    Some(mut existing) => {
                        if let Some(g) = existing.as_group_mut() {
                            g.add_children(children);
                        }
                        existing
                    }
                    None => {
                        let created = Shape::group(children);
                        *group_id = Some(created.id());
                        created
                    }
                };
                let gid = shape.id();
                document.append(shape);
                document.set_selection(vec![gid]);
            }

            Command::Ungroup {
                group_id,
                child_ids,
                group,
                ..
            } => match document.remove_by_id(*group_id) {
                Some(mut shape) => {
                    let children = match shape.as_group_mut() {
                        Some(g) => g.take_children(),
                        None => {
                            warn!("ungroup: shape {group_id} is not a group");
                            document.append(shape);
                            return;
                        }
                    };
                    // Children may have changed since construction; refresh.
                    *child_ids = children.iter().map(Shape::id).collect();
                    for child in children {
                        document.append(child);
                    }
                    document.set_selection(child_ids.clone());
                    *group = Some(shape);
                }
                None => warn!("ungroup: group {group_id} not found in document"),
            },

            Command::Macro { commands } => {
                for command in commands.iter_mut() {
                    command.execute(document);
                }
            }
        }
    }

    pub fn undo(&mut self, document: &mut Document) {
        match self {
            Command::Add { id, shape } => match document.remove_by_id(*id) {
                Some(removed) => *shape = Some(removed),
                None => warn!("undo add: shape {id} not found in document"),
            },

            Command::Delete { id, index, shape } => match shape.take() {
                Some(removed) => {
                    if *index <= document.len() {
                        document.insert_at(*index, removed);
                    } else {
                        // History-ordering bug upstream; keep holding the
                        // shape so it is not leaked or misplaced.
                        warn!(
                            "undo delete: index {index} out of bounds (len {}), shape {id} not restored",
                            document.len()
                        );
                        *shape = Some(removed);
                    }
                }
                None => warn!("undo delete: shape {id} is not held by the command"),
            },

            Command::Move { ids, delta } => translate_all(document, ids, -*delta),

            Command::Resize { id, old_rect, .. } => match document.find_mut(*id) {
                Some(shape) => shape.set_geometry(*old_rect),
                None => warn!("undo resize: shape {id} not found in document"),
            },

            Command::Rotate { id, old_angle, .. } => match document.find_mut(*id) {
                Some(shape) => shape.set_rotation(*old_angle),
                None => warn!("undo rotate: shape {id} not found in document"),
            },

            Command::ClearAll { snapshot } => {
                if !document.is_empty() {
                    // Shapes added after the clear are overwritten, not
                    // merged. Documented limitation.
                    warn!(
                        "undo clear-all: overwriting {} shapes added after the clear",
                        document.len()
                    );
                    document.take_all();
                }
                document.restore(std::mem::take(snapshot));
            }

            Command::Group {
                ids,
                original_indices,
                group_id,
                group,
            } => {
                let Some(gid) = *group_id else {
                    warn!("undo group: command was never executed");
                    return;
                };
                let Some(mut shape) = document.remove_by_id(gid) else {
                    warn!("undo group: group {gid} not found in document");
                    return;
                };
                let children = match shape.as_group_mut() {
                    Some(g) => g.take_children(),
                    None => Vec::new(),
                };

                // The group may return children in any order; match each one
                // back to its recorded index by identity, then restore the
                // lowest indices first so later insertions are not shifted.
                let mut restored: Vec<(usize, Shape)> = Vec::with_capacity(children.len());
                let mut selection = Vec::with_capacity(children.len());
                for child in children {
                    match ids.iter().position(|&id| id == child.id()) {
                        Some(pos) => restored.push((original_indices[pos], child)),
                        None => {
                            warn!(
                                "undo group: child {} has no recorded index, appending",
                                child.id()
                            );
                            restored.push((usize::MAX, child));
                        }
                    }
                }
                restored.sort_by_key(|(index, _)| *index);
                for (index, child) in restored {
                    selection.push(child.id());
                    if index <= document.len() {
                        document.insert_at(index, child);
                    } else {
                        document.append(child);
                    }
                }
                document.set_selection(selection);
                *group = Some(shape);
            }

            Command::Ungroup {
                group_id,
                original_index,
                child_ids,
                group,
            } => {
                let Some(mut shape) = group.take() else {
                    warn!("undo ungroup: command does not hold the group");
                    return;
                };
                let mut children = Vec::with_capacity(child_ids.len());
                for &id in child_ids.iter() {
                    match document.remove_by_id(id) {
                        Some(child) => children.push(child),
                        None => warn!("undo ungroup: child {id} not found in document"),
                    }
                }
                if let Some(g) = shape.as_group_mut() {
                    g.add_children(children);
                }
                let index = (*original_index).min(document.len());
                if index != *original_index {
                    warn!(
                        "undo ungroup: original index {original_index} out of bounds, inserting at {index}"
                    );
                }
                document.insert_at(index, shape);
                document.set_selection(vec![*group_id]);
            }

            Command::Macro { commands } => {
                for command in commands.iter_mut().rev() {
                    command.undo(document);
                }
            }
        }
    }
}

fn translate_all(document: &mut Document, ids: &[ShapeId], delta: Vec2) {
    for &id in ids {
        match document.find_mut(id) {
            Some(shape) => shape.move_by(delta),
            None => warn!("move: shape {id} not found in document"),
        }
    }
}
