use log::debug;

use super::Command;
use crate::document::Document;

/// The undo/redo engine: two explicit LIFO stacks of executed commands.
///
/// Commands move between the stacks any number of times and are dropped when
/// evicted from both (history cleared, or the redo stack invalidated by a
/// new command). Dropping a command frees whatever shapes it still owns.
#[derive(Debug, Default)]
pub struct CommandHistory {
    undo_stack: Vec<Command>,
    redo_stack: Vec<Command>,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes `command` against the document and records it. Executing a
    /// new command invalidates the whole redo "future".
    pub fn execute(&mut self, mut command: Command, document: &mut Document) {
        command.execute(document);
        self.undo_stack.push(command);
        self.redo_stack.clear();
    }

    /// Reverts the most recent command. No-op on an empty stack.
    pub fn undo(&mut self, document: &mut Document) {
        if let Some(mut command) = self.undo_stack.pop() {
            command.undo(document);
            self.redo_stack.push(command);
        } else {
            debug!("undo requested with empty undo stack");
        }
    }

    /// Re-applies the most recently undone command. No-op on an empty stack.
    pub fn redo(&mut self, document: &mut Document) {
        if let Some(mut command) = self.redo_stack.pop() {
            command.execute(document);
            self.undo_stack.push(command);
        } else {
            debug!("redo requested with empty redo stack");
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Drops all history. Shapes still owned by evicted commands are freed
    /// with them.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
