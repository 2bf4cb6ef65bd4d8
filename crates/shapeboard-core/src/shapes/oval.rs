//! Oval shape.

use super::ShapeBase;
use crate::render::Surface;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// An oval inscribed in the bounding box spanned by its two corner points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Oval {
    pub(crate) base: ShapeBase,
}

impl Oval {
    /// Create a degenerate oval anchored at a single point.
    pub fn new(p1: Point) -> Self {
        Self {
            base: ShapeBase::new(p1),
        }
    }

    /// Create an oval from the two corners of its bounding box.
    pub fn from_corners(p1: Point, p2: Point) -> Self {
        Self {
            base: ShapeBase::from_corners(p1, p2),
        }
    }

    pub(crate) fn draw(&self, surface: &mut dyn Surface) {
        let color = self.base.color().into();
        if self.base.filled() {
            surface.fill_oval(self.base.bounds(), color);
        } else {
            surface.stroke_oval(self.base.bounds(), color);
        }
    }
}
