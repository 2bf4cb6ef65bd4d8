//! Line shape.

use super::ShapeBase;
use crate::render::Surface;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// A straight line segment between two corner points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Line {
    pub(crate) base: ShapeBase,
}

impl Line {
    /// Create a degenerate line anchored at a single point.
    pub fn new(p1: Point) -> Self {
        Self {
            base: ShapeBase::new(p1),
        }
    }

    /// Create a line between two points.
    pub fn from_corners(p1: Point, p2: Point) -> Self {
        Self {
            base: ShapeBase::from_corners(p1, p2),
        }
    }

    /// Length of the segment.
    pub fn length(&self) -> f64 {
        self.base.p1().distance(self.base.p2())
    }

    pub(crate) fn draw(&self, surface: &mut dyn Surface) {
        surface.stroke_line(self.base.p1(), self.base.p2(), self.base.color().into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length() {
        let line = Line::from_corners(Point::new(0.0, 0.0), Point::new(30.0, 40.0));
        assert!((line.length() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn center_is_midpoint() {
        let line = Line::from_corners(Point::new(0.0, 0.0), Point::new(100.0, 100.0));
        assert_eq!(line.base.center(), Point::new(50.0, 50.0));
    }
}
