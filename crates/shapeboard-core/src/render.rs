//! Renderer abstraction.
//!
//! The core never draws pixels itself: shapes describe themselves to a
//! [`Surface`] supplied by the host, and the host decides what a stroke or a
//! fill actually looks like on screen.

use kurbo::{Point, Rect};
use peniko::Color;

/// Drawing surface the host renderer implements.
///
/// Coordinates are canvas pixels; ovals and rectangles are described by
/// their axis-aligned bounding box.
pub trait Surface {
    /// Erase the whole canvas area.
    fn clear(&mut self, width: f64, height: f64);

    /// Stroke a straight line segment.
    fn stroke_line(&mut self, from: Point, to: Point, color: Color);

    /// Stroke a rectangle outline.
    fn stroke_rect(&mut self, rect: Rect, color: Color);

    /// Fill a rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Stroke an oval outline inscribed in `rect`.
    fn stroke_oval(&mut self, rect: Rect, color: Color);

    /// Fill an oval inscribed in `rect`.
    fn fill_oval(&mut self, rect: Rect, color: Color);

    /// Stroke a dashed rectangle outline (selection/group indicator).
    fn dashed_rect(&mut self, rect: Rect, color: Color);
}
