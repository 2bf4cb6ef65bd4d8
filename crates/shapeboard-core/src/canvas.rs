//! Canvas state: the shape collection and the shape under construction.

use crate::render::Surface;
use crate::shapes::{Shape, ShapeColor, ShapeId};
use serde::{Deserialize, Serialize};

/// The drawing canvas: an ordered collection of top-level shapes plus the
/// shape currently being dragged out, with the style defaults new shapes
/// are stamped with.
///
/// Insertion order is display order: later shapes draw on top. A shape is
/// never simultaneously top-level and a member of a group: the grouping
/// gesture removes members from this collection before inserting the
/// group, and the group edit's undo/redo re-establishes each side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Canvas {
    shapes: Vec<Shape>,
    /// Shape under interactive construction (not yet committed).
    #[serde(skip)]
    current: Option<Shape>,
    cur_color: ShapeColor,
    cur_filled: bool,
    width: f64,
    height: f64,
}

impl Canvas {
    /// Create an empty canvas with fixed pixel dimensions.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            shapes: Vec::new(),
            current: None,
            cur_color: ShapeColor::BLACK,
            cur_filled: false,
            width,
            height,
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Append a shape to the top-level collection. Callers trigger their
    /// own redraw; this is a pure data operation.
    pub fn add_shape(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Remove the first shape with the given identity. Absent shapes are a
    /// no-op, not an error.
    pub fn delete_shape(&mut self, id: ShapeId) -> Option<Shape> {
        let pos = self.shapes.iter().position(|s| s.id() == id)?;
        Some(self.shapes.remove(pos))
    }

    /// The top-level shape whose center is nearest to the query point, or
    /// `None` on an empty canvas. Ties resolve to the earliest shape in
    /// display order.
    pub fn closest_shape(&self, x: f64, y: f64) -> Option<&Shape> {
        let mut closest: Option<&Shape> = None;
        let mut min_distance = f64::INFINITY;
        for shape in &self.shapes {
            let distance = shape.distance_to(x, y);
            if distance < min_distance {
                closest = Some(shape);
                min_distance = distance;
            }
        }
        closest
    }

    /// Set (or clear) the shape under construction. A newly set shape is
    /// stamped with the canvas's current color and fill defaults.
    pub fn set_current_shape(&mut self, shape: Option<Shape>) {
        self.current = shape;
        if let Some(s) = &mut self.current {
            s.set_color(self.cur_color);
            s.set_filled(self.cur_filled);
        }
    }

    pub fn current_shape(&self) -> Option<&Shape> {
        self.current.as_ref()
    }

    pub fn current_shape_mut(&mut self) -> Option<&mut Shape> {
        self.current.as_mut()
    }

    /// Take the shape under construction out of the canvas.
    pub fn take_current_shape(&mut self) -> Option<Shape> {
        self.current.take()
    }

    pub fn set_cur_color(&mut self, color: ShapeColor) {
        self.cur_color = color;
    }

    pub fn cur_color(&self) -> ShapeColor {
        self.cur_color
    }

    pub fn set_cur_filled(&mut self, filled: bool) {
        self.cur_filled = filled;
    }

    pub fn cur_filled(&self) -> bool {
        self.cur_filled
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id() == id)
    }

    pub fn shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id() == id)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Empty the top-level collection. Edit history is owned elsewhere and
    /// is the editor's responsibility.
    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    /// Redraw everything: clear, then every shape in display order, then
    /// the shape under construction so it tracks the pointer on top.
    pub fn paint(&self, surface: &mut dyn Surface) {
        surface.clear(self.width, self.height);
        for shape in &self.shapes {
            shape.draw(surface);
        }
        if let Some(current) = &self.current {
            current.draw(surface);
        }
    }

    /// Serialize the canvas to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a canvas from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::recording::{Op, RecordingSurface};
    use crate::shapes::{Line, Oval, Rectangle};
    use kurbo::Point;

    fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Shape {
        Shape::Line(Line::from_corners(Point::new(x1, y1), Point::new(x2, y2)))
    }

    #[test]
    fn add_and_delete_by_identity() {
        let mut canvas = Canvas::new(800.0, 600.0);
        let shape = line(0.0, 0.0, 10.0, 10.0);
        let id = shape.id();

        canvas.add_shape(shape);
        assert_eq!(canvas.len(), 1);

        assert!(canvas.delete_shape(id).is_some());
        assert!(canvas.is_empty());

        // Deleting an absent shape is a no-op.
        assert!(canvas.delete_shape(id).is_none());
    }

    #[test]
    fn closest_shape_empty_canvas() {
        let canvas = Canvas::new(800.0, 600.0);
        assert!(canvas.closest_shape(10.0, 10.0).is_none());
    }

    #[test]
    fn closest_shape_picks_nearest_center() {
        let mut canvas = Canvas::new(800.0, 600.0);
        let near = line(-5.0, -5.0, 5.0, 5.0); // center (0, 0)
        let far = line(5.0, 5.0, 15.0, 15.0); // center (10, 10)
        let near_id = near.id();

        canvas.add_shape(near);
        canvas.add_shape(far);

        assert_eq!(canvas.closest_shape(1.0, 1.0).unwrap().id(), near_id);
    }

    #[test]
    fn closest_shape_tie_goes_to_first_in_order() {
        let mut canvas = Canvas::new(800.0, 600.0);
        let first = line(0.0, 0.0, 10.0, 10.0); // center (5, 5)
        let second = line(10.0, 0.0, 20.0, 10.0); // center (15, 5)
        let first_id = first.id();

        canvas.add_shape(first);
        canvas.add_shape(second);

        // (10, 5) is equidistant from both centers.
        assert_eq!(canvas.closest_shape(10.0, 5.0).unwrap().id(), first_id);
    }

    #[test]
    fn current_shape_is_stamped_with_defaults() {
        let mut canvas = Canvas::new(800.0, 600.0);
        canvas.set_cur_color(ShapeColor::new(1.0, 0.0, 0.5));
        canvas.set_cur_filled(true);

        canvas.set_current_shape(Some(Shape::Oval(Oval::new(Point::new(0.0, 0.0)))));

        let current = canvas.current_shape().unwrap();
        assert_eq!(current.color(), ShapeColor::new(1.0, 0.0, 0.5));
        assert!(current.filled());
    }

    #[test]
    fn paint_draws_shapes_then_current() {
        let mut canvas = Canvas::new(800.0, 600.0);
        canvas.add_shape(line(0.0, 0.0, 10.0, 10.0));
        canvas.set_current_shape(Some(Shape::Rectangle(Rectangle::new(Point::new(5.0, 5.0)))));

        let mut surface = RecordingSurface::default();
        canvas.paint(&mut surface);

        assert_eq!(surface.ops.len(), 3);
        assert!(matches!(surface.ops[0], Op::Clear));
        assert!(matches!(surface.ops[1], Op::Line(..)));
        assert!(matches!(surface.ops[2], Op::StrokeRect(_)));
    }

    #[test]
    fn json_round_trip() {
        let mut canvas = Canvas::new(800.0, 600.0);
        canvas.add_shape(line(1.0, 2.0, 3.0, 4.0));

        let json = canvas.to_json().unwrap();
        let restored = Canvas::from_json(&json).unwrap();

        assert_eq!(restored.len(), 1);
        assert_eq!(restored.shapes()[0].p1(), Point::new(1.0, 2.0));
        assert_eq!(restored.shapes()[0].p2(), Point::new(3.0, 4.0));
    }
}
