//! Gesture tools: how press/drag/release sequences mutate the canvas.
//!
//! Each tool is a small state machine over one pointer gesture. A completed
//! gesture that changed the canvas records an [`Edit`]; gestures that find
//! nothing to act on (empty canvas, empty selection rectangle) are silent
//! no-ops and record nothing.

use crate::canvas::Canvas;
use crate::history::{Edit, History};
use crate::shapes::{Group, Line, Oval, Rectangle, Shape, ShapeId};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Which primitive the draw tool creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrimitiveKind {
    Line,
    Oval,
    Rect,
}

impl PrimitiveKind {
    /// Create a degenerate shape of this kind anchored at `p1`. The second
    /// corner starts equal to the first, so a zero-drag click still yields
    /// a shape with well-defined bounds.
    pub fn create(self, p1: Point) -> Shape {
        match self {
            PrimitiveKind::Line => Shape::Line(Line::new(p1)),
            PrimitiveKind::Oval => Shape::Oval(Oval::new(p1)),
            PrimitiveKind::Rect => Shape::Rectangle(Rectangle::new(p1)),
        }
    }
}

/// Active editing tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolKind {
    /// Drag out a new primitive shape.
    Draw(PrimitiveKind),
    /// Drag the shape nearest the press point.
    Move,
    /// Duplicate the shape nearest the press point and drag the copy.
    Copy,
    /// Delete the shape nearest the press point.
    Delete,
    /// Drag out a rectangle and group the shapes whose centers it encloses.
    Group,
}

impl Default for ToolKind {
    fn default() -> Self {
        ToolKind::Draw(PrimitiveKind::Line)
    }
}

/// In-flight gesture state.
#[derive(Debug, Clone, Default)]
enum GestureState {
    #[default]
    Idle,
    /// The pending shape lives in the canvas's current-shape slot.
    Drawing,
    /// Dragging an existing shape; `origin` is the press point, `last` the
    /// most recent drag point, so release can compute the net displacement.
    Moving {
        id: ShapeId,
        origin: Point,
        last: Point,
    },
    /// Dragging a freshly added copy.
    Copying { id: ShapeId, last: Point },
    /// Dragging out a group selection rectangle (also in the current-shape
    /// slot).
    Grouping,
}

/// Drives one pointer gesture at a time against the canvas and history.
#[derive(Debug, Default)]
pub struct GestureDriver {
    state: GestureState,
}

impl GestureDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a gesture is in flight.
    pub fn is_active(&self) -> bool {
        !matches!(self.state, GestureState::Idle)
    }

    /// Pointer went down at (x, y).
    pub fn pressed(
        &mut self,
        tool: ToolKind,
        canvas: &mut Canvas,
        history: &mut History,
        x: f64,
        y: f64,
    ) {
        let point = Point::new(x, y);
        self.state = match tool {
            ToolKind::Draw(kind) => {
                canvas.set_current_shape(Some(kind.create(point)));
                GestureState::Drawing
            }
            ToolKind::Move => match canvas.closest_shape(x, y) {
                Some(shape) => GestureState::Moving {
                    id: shape.id(),
                    origin: point,
                    last: point,
                },
                None => GestureState::Idle,
            },
            ToolKind::Copy => {
                let copy = canvas.closest_shape(x, y).map(|shape| {
                    let mut copy = shape.clone();
                    copy.regenerate_id();
                    copy
                });
                match copy {
                    Some(copy) => {
                        let id = copy.id();
                        canvas.add_shape(copy);
                        GestureState::Copying { id, last: point }
                    }
                    None => GestureState::Idle,
                }
            }
            ToolKind::Delete => {
                let target = canvas.closest_shape(x, y).map(Shape::id);
                if let Some(id) = target {
                    if let Some(shape) = canvas.delete_shape(id) {
                        history.record(Edit::Delete { shape });
                    }
                }
                GestureState::Idle
            }
            ToolKind::Group => {
                canvas.set_current_shape(Some(Shape::Group(Group::new(point))));
                GestureState::Grouping
            }
        };
    }

    /// Pointer moved to (x, y) while down.
    pub fn dragged(&mut self, canvas: &mut Canvas, x: f64, y: f64) {
        match &mut self.state {
            GestureState::Drawing | GestureState::Grouping => {
                if let Some(shape) = canvas.current_shape_mut() {
                    shape.set_p2(x, y);
                }
            }
            GestureState::Moving { id, last, .. } | GestureState::Copying { id, last } => {
                if let Some(shape) = canvas.shape_mut(*id) {
                    shape.translate(x - last.x, y - last.y);
                }
                *last = Point::new(x, y);
            }
            GestureState::Idle => {}
        }
    }

    /// Pointer came up. Completes the gesture and records its edit.
    pub fn released(&mut self, canvas: &mut Canvas, history: &mut History) {
        match std::mem::take(&mut self.state) {
            GestureState::Drawing => {
                if let Some(shape) = canvas.take_current_shape() {
                    canvas.add_shape(shape.clone());
                    history.record(Edit::Draw { shape });
                }
            }
            GestureState::Moving { id, origin, last } => {
                history.record(Edit::Move {
                    id,
                    dx: last.x - origin.x,
                    dy: last.y - origin.y,
                });
            }
            GestureState::Copying { id, .. } => {
                if let Some(copy) = canvas.shape(id) {
                    history.record(Edit::Copy {
                        shape: copy.clone(),
                    });
                }
            }
            GestureState::Grouping => {
                let Some(Shape::Group(mut group)) = canvas.take_current_shape() else {
                    return;
                };

                // Sweep enclosed shapes off the top level into the group,
                // preserving their display order.
                let enclosed: Vec<ShapeId> = canvas
                    .shapes()
                    .iter()
                    .filter(|s| group.contains_center(s))
                    .map(Shape::id)
                    .collect();
                for id in enclosed {
                    if let Some(shape) = canvas.delete_shape(id) {
                        group.add_member(shape);
                    }
                }

                // A rectangle that enclosed nothing adds nothing.
                if !group.is_empty() {
                    canvas.add_shape(Shape::Group(group.clone()));
                    history.record(Edit::Group { group });
                }
            }
            GestureState::Idle => {}
        }
    }
}
