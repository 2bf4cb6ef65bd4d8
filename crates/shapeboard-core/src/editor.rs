//! Editor facade: the boundary the host UI drives.
//!
//! Owns the canvas, the edit history and the active tool, and wires the
//! three together: pointer gestures come in, reversible edits and redraws
//! come out. File operations replace the whole canvas and reset history.

use crate::canvas::Canvas;
use crate::history::{Edit, History};
use crate::render::Surface;
use crate::shapes::{Shape, ShapeColor, ShapeId};
use crate::storage::{self, StorageError, StorageResult};
use crate::tools::{GestureDriver, ToolKind};
use std::path::Path;

/// The shape editor core.
pub struct Editor {
    canvas: Canvas,
    history: History,
    tool: ToolKind,
    gesture: GestureDriver,
}

impl Editor {
    /// Create an editor with an empty canvas of the given pixel size.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            canvas: Canvas::new(width, height),
            history: History::new(),
            tool: ToolKind::default(),
            gesture: GestureDriver::new(),
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tool = tool;
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn set_cur_color(&mut self, color: ShapeColor) {
        self.canvas.set_cur_color(color);
    }

    pub fn set_cur_filled(&mut self, filled: bool) {
        self.canvas.set_cur_filled(filled);
    }

    // --- canvas boundary operations -----------------------------------

    pub fn add_shape(&mut self, shape: Shape) {
        self.canvas.add_shape(shape);
    }

    pub fn delete_shape(&mut self, id: ShapeId) -> Option<Shape> {
        self.canvas.delete_shape(id)
    }

    pub fn set_current_shape(&mut self, shape: Option<Shape>) {
        self.canvas.set_current_shape(shape);
    }

    pub fn closest_shape(&self, x: f64, y: f64) -> Option<&Shape> {
        self.canvas.closest_shape(x, y)
    }

    pub fn shapes(&self) -> &[Shape] {
        self.canvas.shapes()
    }

    /// Empty the canvas. Also drops both history stacks: an undo recorded
    /// before a clear would otherwise reference shapes that no longer
    /// exist anywhere.
    pub fn clear(&mut self) {
        self.canvas.clear();
        self.canvas.set_current_shape(None);
        self.history.clear();
    }

    /// Record an edit whose effect is already applied to the canvas.
    pub fn add_edit(&mut self, edit: Edit) {
        self.history.record(edit);
    }

    pub fn undo(&mut self) {
        self.history.undo(&mut self.canvas);
    }

    pub fn redo(&mut self) {
        self.history.redo(&mut self.canvas);
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Redraw everything onto the host surface.
    pub fn paint(&self, surface: &mut dyn Surface) {
        self.canvas.paint(surface);
    }

    // --- pointer gestures ---------------------------------------------

    pub fn pointer_pressed(&mut self, x: f64, y: f64) {
        self.gesture
            .pressed(self.tool, &mut self.canvas, &mut self.history, x, y);
    }

    pub fn pointer_dragged(&mut self, x: f64, y: f64) {
        self.gesture.dragged(&mut self.canvas, x, y);
    }

    pub fn pointer_released(&mut self) {
        self.gesture.released(&mut self.canvas, &mut self.history);
    }

    // --- persistence --------------------------------------------------

    /// Write the shape list to a text file.
    pub fn to_text_file(&self, path: impl AsRef<Path>) -> StorageResult<()> {
        storage::text::save(path.as_ref(), self.canvas.shapes())
    }

    /// Replace the canvas contents from a text file. The canvas is cleared
    /// before parsing; a failed load leaves it cleared.
    pub fn from_text_file(&mut self, path: impl AsRef<Path>) -> StorageResult<()> {
        let path = path.as_ref();
        self.clear();
        match storage::text::load(path) {
            Ok(shapes) => {
                self.install(shapes);
                Ok(())
            }
            Err(e) => {
                log::warn!("text load of {} failed, canvas cleared: {e}", path.display());
                Err(e)
            }
        }
    }

    /// Write the shape list to a binary file.
    pub fn to_binary_file(&self, path: impl AsRef<Path>) -> StorageResult<()> {
        storage::binary::save(path.as_ref(), self.canvas.shapes())
    }

    /// Replace the canvas contents from a binary file. The canvas is
    /// cleared before parsing; a failed load leaves it cleared.
    pub fn from_binary_file(&mut self, path: impl AsRef<Path>) -> StorageResult<()> {
        let path = path.as_ref();
        self.clear();
        match storage::binary::load(path) {
            Ok(shapes) => {
                self.install(shapes);
                Ok(())
            }
            Err(e) => {
                log::warn!(
                    "binary load of {} failed, canvas cleared: {e}",
                    path.display()
                );
                Err(e)
            }
        }
    }

    /// Write the whole canvas (shapes, defaults, dimensions) as JSON.
    pub fn to_json_file(&self, path: impl AsRef<Path>) -> StorageResult<()> {
        let path = path.as_ref();
        let json = self
            .canvas
            .to_json()
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        std::fs::write(path, json).map_err(|e| storage::io_error(path, e))
    }

    /// Replace the whole canvas from a JSON file. Drops the edit history.
    pub fn from_json_file(&mut self, path: impl AsRef<Path>) -> StorageResult<()> {
        let path = path.as_ref();
        self.clear();
        let content = std::fs::read_to_string(path).map_err(|e| storage::io_error(path, e))?;
        match Canvas::from_json(&content) {
            Ok(canvas) => {
                log::info!("loaded {} shapes", canvas.len());
                self.canvas = canvas;
                Ok(())
            }
            Err(e) => {
                log::warn!("json load of {} failed, canvas cleared: {e}", path.display());
                Err(StorageError::Serialization(e.to_string()))
            }
        }
    }

    fn install(&mut self, shapes: Vec<Shape>) {
        log::info!("loaded {} shapes", shapes.len());
        for shape in shapes {
            self.canvas.add_shape(shape);
        }
    }
}
