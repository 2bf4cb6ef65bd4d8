//! Command-based edit history with undo/redo stacks.

use crate::canvas::Canvas;
use crate::shapes::{Group, Shape, ShapeId};

/// Maximum number of edits to keep on the undo stack.
pub const MAX_HISTORY: usize = 50;

/// A recorded, reversible description of a single user mutation.
///
/// An edit is created at gesture completion, after its effect has already
/// been applied to the canvas, and is immutable from then on: `undo` and
/// `redo` replay against the canvas from the data captured here. Shape
/// payloads are owned clones that keep the original identity, so replay
/// always targets the same entity.
#[derive(Debug, Clone)]
pub enum Edit {
    /// A shape was drawn and added to the canvas.
    Draw { shape: Shape },
    /// A shape was deleted from the canvas.
    Delete { shape: Shape },
    /// An existing shape was duplicated; the copy is a fully independent
    /// shape by the time the edit is recorded, so it reverses like a draw.
    Copy { shape: Shape },
    /// A shape was translated by the net displacement of a whole drag.
    Move { id: ShapeId, dx: f64, dy: f64 },
    /// Shapes were swept off the top level into a group.
    Group { group: Group },
}

impl Edit {
    /// Invert this edit's effect on the canvas.
    pub fn undo(&self, canvas: &mut Canvas) {
        match self {
            Edit::Draw { shape } | Edit::Copy { shape } => {
                canvas.delete_shape(shape.id());
            }
            Edit::Delete { shape } => {
                canvas.add_shape(shape.clone());
            }
            Edit::Move { id, dx, dy } => {
                if let Some(shape) = canvas.shape_mut(*id) {
                    shape.translate(-dx, -dy);
                }
            }
            Edit::Group { group } => {
                canvas.delete_shape(group.id());
                for member in group.members() {
                    canvas.add_shape(member.clone());
                }
            }
        }
    }

    /// Re-apply this edit's effect on the canvas.
    pub fn redo(&self, canvas: &mut Canvas) {
        match self {
            Edit::Draw { shape } | Edit::Copy { shape } => {
                canvas.add_shape(shape.clone());
            }
            Edit::Delete { shape } => {
                canvas.delete_shape(shape.id());
            }
            Edit::Move { id, dx, dy } => {
                if let Some(shape) = canvas.shape_mut(*id) {
                    shape.translate(*dx, *dy);
                }
            }
            Edit::Group { group } => {
                for member in group.members() {
                    canvas.delete_shape(member.id());
                }
                canvas.add_shape(Shape::Group(group.clone()));
            }
        }
    }
}

/// Undo and redo stacks over recorded edits.
///
/// Redo is only valid immediately after one or more undos: recording a new
/// edit discards everything on the redo stack, so history never branches.
#[derive(Debug, Default)]
pub struct History {
    undo_stack: Vec<Edit>,
    redo_stack: Vec<Edit>,
}

impl History {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an edit whose effect has already been applied to the canvas.
    pub fn record(&mut self, edit: Edit) {
        self.undo_stack.push(edit);
        self.redo_stack.clear();

        if self.undo_stack.len() > MAX_HISTORY {
            self.undo_stack.remove(0);
        }
    }

    /// Undo the most recent edit. No-op if there is nothing to undo.
    pub fn undo(&mut self, canvas: &mut Canvas) {
        if let Some(edit) = self.undo_stack.pop() {
            edit.undo(canvas);
            self.redo_stack.push(edit);
        }
    }

    /// Re-apply the most recently undone edit. No-op if there is nothing
    /// to redo.
    pub fn redo(&mut self, canvas: &mut Canvas) {
        if let Some(edit) = self.redo_stack.pop() {
            edit.redo(canvas);
            self.undo_stack.push(edit);
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Drop both stacks.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
