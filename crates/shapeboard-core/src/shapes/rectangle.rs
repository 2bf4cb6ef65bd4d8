//! Rectangle shape.

use super::ShapeBase;
use crate::render::Surface;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle spanned by its two corner points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rectangle {
    pub(crate) base: ShapeBase,
}

impl Rectangle {
    /// Create a degenerate rectangle anchored at a single point.
    pub fn new(p1: Point) -> Self {
        Self {
            base: ShapeBase::new(p1),
        }
    }

    /// Create a rectangle from two corner points. The corners may be given
    /// in any order; the bounding box is normalized.
    pub fn from_corners(p1: Point, p2: Point) -> Self {
        Self {
            base: ShapeBase::from_corners(p1, p2),
        }
    }

    pub(crate) fn draw(&self, surface: &mut dyn Surface) {
        let color = self.base.color().into();
        if self.base.filled() {
            surface.fill_rect(self.base.bounds(), color);
        } else {
            surface.stroke_rect(self.base.bounds(), color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_normalize_into_bounds() {
        let rect = Rectangle::from_corners(Point::new(100.0, 100.0), Point::new(50.0, 50.0));
        let bounds = rect.base.bounds();
        assert!((bounds.x0 - 50.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 50.0).abs() < f64::EPSILON);
        assert!((bounds.width() - 50.0).abs() < f64::EPSILON);
        assert!((bounds.height() - 50.0).abs() < f64::EPSILON);
        // Corner points themselves are preserved as given.
        assert_eq!(rect.base.p1(), Point::new(100.0, 100.0));
    }
}
