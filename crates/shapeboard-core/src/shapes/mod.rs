//! Shape definitions for the canvas.

mod group;
mod line;
mod oval;
mod rectangle;

pub use group::Group;
pub use line::Line;
pub use oval::Oval;
pub use rectangle::Rectangle;

use kurbo::{Point, Rect, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::render::Surface;

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Shape color with floating-point channels in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl ShapeColor {
    /// Default stroke color for new shapes.
    pub const BLACK: Self = Self { r: 0.0, g: 0.0, b: 0.0 };

    /// Fixed indicator color for group outlines (light gray), applied
    /// regardless of the colors of the group's members.
    pub const GROUP_OUTLINE: Self = Self { r: 0.827, g: 0.827, b: 0.827 };

    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// True if every channel lies in [0, 1].
    pub fn in_range(&self) -> bool {
        let ok = |c: f64| (0.0..=1.0).contains(&c);
        ok(self.r) && ok(self.g) && ok(self.b)
    }
}

impl Default for ShapeColor {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<ShapeColor> for Color {
    fn from(color: ShapeColor) -> Self {
        let ch = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        Color::from_rgba8(ch(color.r), ch(color.g), ch(color.b), 255)
    }
}

impl From<Color> for ShapeColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r as f64 / 255.0,
            g: rgba.g as f64 / 255.0,
            b: rgba.b as f64 / 255.0,
        }
    }
}

/// Geometry and style fields shared by every shape variant.
///
/// The bounding box and center are cached alongside the two corner points:
/// [`ShapeBase::set_p2`] and [`ShapeBase::translate`] recompute them, while
/// [`ShapeBase::set_p1`] deliberately does not: a shape being dragged out
/// always has p2 set after p1, so the derived fields are refreshed by the
/// p2 update that follows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeBase {
    pub(crate) id: ShapeId,
    p1: Point,
    p2: Point,
    color: ShapeColor,
    filled: bool,
    bounds: Rect,
    center: Point,
}

impl ShapeBase {
    /// Create a degenerate shape anchored at a single point (p2 == p1).
    ///
    /// This is the state of a shape the instant a drag starts; a zero-drag
    /// click leaves it degenerate, with an empty but well-defined bounding
    /// box.
    pub fn new(p1: Point) -> Self {
        Self::from_corners(p1, p1)
    }

    /// Create a shape from both corner points.
    pub fn from_corners(p1: Point, p2: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            p1,
            p2,
            color: ShapeColor::BLACK,
            filled: false,
            bounds: Rect::from_points(p1, p2),
            center: p1.midpoint(p2),
        }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn p1(&self) -> Point {
        self.p1
    }

    pub fn p2(&self) -> Point {
        self.p2
    }

    /// Axis-aligned bounding box, as of the last p2 update or translation.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn color(&self) -> ShapeColor {
        self.color
    }

    pub fn set_color(&mut self, color: ShapeColor) {
        self.color = color;
    }

    pub fn filled(&self) -> bool {
        self.filled
    }

    pub fn set_filled(&mut self, filled: bool) {
        self.filled = filled;
    }

    /// Replace the first corner point. Bounds and center are left stale
    /// until the next `set_p2`.
    pub fn set_p1(&mut self, x: f64, y: f64) {
        self.p1 = Point::new(x, y);
    }

    /// Replace the second corner point and refresh bounds and center.
    pub fn set_p2(&mut self, x: f64, y: f64) {
        self.p2 = Point::new(x, y);
        self.refresh();
    }

    /// Translate both corners and the cached bounds/center by the same
    /// delta. Translating by (dx, dy) and then (-dx, -dy) restores the
    /// original geometry exactly.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        let delta = Vec2::new(dx, dy);
        self.p1 += delta;
        self.p2 += delta;
        self.bounds = self.bounds + delta;
        self.center += delta;
    }

    /// Euclidean distance from the shape's center to a query point.
    ///
    /// Hit-testing considers center proximity only, not the outline or the
    /// area: a large shape may win a hit-test far from its own edge if its
    /// center is nearest.
    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        self.center.distance(Point::new(x, y))
    }

    pub(crate) fn set_center(&mut self, center: Point) {
        self.center = center;
    }

    fn refresh(&mut self) {
        self.bounds = Rect::from_points(self.p1, self.p2);
        self.center = self.p1.midpoint(self.p2);
    }
}

/// Enum wrapper for all shape types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Shape {
    Line(Line),
    Oval(Oval),
    Rectangle(Rectangle),
    Group(Group),
}

impl Shape {
    fn base(&self) -> &ShapeBase {
        match self {
            Shape::Line(s) => &s.base,
            Shape::Oval(s) => &s.base,
            Shape::Rectangle(s) => &s.base,
            Shape::Group(s) => &s.base,
        }
    }

    fn base_mut(&mut self) -> &mut ShapeBase {
        match self {
            Shape::Line(s) => &mut s.base,
            Shape::Oval(s) => &mut s.base,
            Shape::Rectangle(s) => &mut s.base,
            Shape::Group(s) => &mut s.base,
        }
    }

    pub fn id(&self) -> ShapeId {
        self.base().id
    }

    pub fn p1(&self) -> Point {
        self.base().p1()
    }

    pub fn p2(&self) -> Point {
        self.base().p2()
    }

    pub fn bounds(&self) -> Rect {
        self.base().bounds()
    }

    pub fn center(&self) -> Point {
        self.base().center()
    }

    pub fn color(&self) -> ShapeColor {
        self.base().color()
    }

    pub fn set_color(&mut self, color: ShapeColor) {
        self.base_mut().set_color(color);
    }

    pub fn filled(&self) -> bool {
        self.base().filled()
    }

    pub fn set_filled(&mut self, filled: bool) {
        self.base_mut().set_filled(filled);
    }

    pub fn set_p1(&mut self, x: f64, y: f64) {
        self.base_mut().set_p1(x, y);
    }

    pub fn set_p2(&mut self, x: f64, y: f64) {
        self.base_mut().set_p2(x, y);
    }

    /// Distance from the shape's center to a query point.
    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        self.base().distance_to(x, y)
    }

    /// Translate the shape by (dx, dy). Groups translate every member by
    /// the same delta.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        match self {
            Shape::Line(s) => s.base.translate(dx, dy),
            Shape::Oval(s) => s.base.translate(dx, dy),
            Shape::Rectangle(s) => s.base.translate(dx, dy),
            Shape::Group(g) => g.translate(dx, dy),
        }
    }

    /// Render the shape onto a host surface.
    pub fn draw(&self, surface: &mut dyn Surface) {
        match self {
            Shape::Line(s) => s.draw(surface),
            Shape::Oval(s) => s.draw(surface),
            Shape::Rectangle(s) => s.draw(surface),
            Shape::Group(g) => g.draw(surface),
        }
    }

    /// Regenerate the shape's ID with a new unique identifier.
    /// Used when copying shapes so the copy is a distinct entity; for
    /// groups, members are re-keyed as well.
    pub fn regenerate_id(&mut self) {
        self.base_mut().id = Uuid::new_v4();
        if let Shape::Group(g) = self {
            for member in g.members_mut() {
                member.regenerate_id();
            }
        }
    }

    /// Check if this shape is a group.
    pub fn is_group(&self) -> bool {
        matches!(self, Shape::Group(_))
    }

    /// Get the group if this shape is a group.
    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Shape::Group(g) => Some(g),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_shape_has_empty_bounds() {
        let base = ShapeBase::new(Point::new(10.0, 20.0));
        assert_eq!(base.p1(), base.p2());
        assert!((base.bounds().width()).abs() < f64::EPSILON);
        assert!((base.bounds().height()).abs() < f64::EPSILON);
        assert_eq!(base.center(), Point::new(10.0, 20.0));
    }

    #[test]
    fn set_p2_refreshes_bounds_and_center() {
        let mut base = ShapeBase::new(Point::new(100.0, 100.0));
        base.set_p2(40.0, 60.0);

        let bounds = base.bounds();
        assert!((bounds.x0 - 40.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 60.0).abs() < f64::EPSILON);
        assert!((bounds.width() - 60.0).abs() < f64::EPSILON);
        assert!((bounds.height() - 40.0).abs() < f64::EPSILON);
        assert_eq!(base.center(), Point::new(70.0, 80.0));
    }

    #[test]
    fn set_p1_leaves_bounds_stale() {
        let mut base = ShapeBase::from_corners(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        let before = base.bounds();
        base.set_p1(100.0, 100.0);
        assert_eq!(base.bounds(), before);

        base.set_p2(110.0, 110.0);
        assert!((base.bounds().x0 - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn translate_round_trip_restores_geometry() {
        let mut shape = Shape::Rectangle(Rectangle::from_corners(
            Point::new(3.5, 7.25),
            Point::new(42.0, 19.75),
        ));
        let (p1, p2, bounds, center) =
            (shape.p1(), shape.p2(), shape.bounds(), shape.center());

        shape.translate(13.75, -4.5);
        shape.translate(-13.75, 4.5);

        assert_eq!(shape.p1(), p1);
        assert_eq!(shape.p2(), p2);
        assert_eq!(shape.bounds(), bounds);
        assert_eq!(shape.center(), center);
    }

    #[test]
    fn distance_is_measured_from_center() {
        let shape = Shape::Oval(Oval::from_corners(Point::new(0.0, 0.0), Point::new(10.0, 10.0)));
        assert!(shape.distance_to(5.0, 5.0).abs() < f64::EPSILON);
        assert!((shape.distance_to(8.0, 9.0) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn regenerate_id_rekeys_group_members() {
        let line = Line::from_corners(Point::new(0.0, 0.0), Point::new(1.0, 1.0));
        let member_id = line.base.id();
        let mut group = Group::new(Point::new(0.0, 0.0));
        group.add_member(Shape::Line(line));

        let mut copy = Shape::Group(group);
        let group_id = copy.id();
        copy.regenerate_id();

        assert_ne!(copy.id(), group_id);
        let copied_member = &copy.as_group().unwrap().members()[0];
        assert_ne!(copied_member.id(), member_id);
    }

    #[test]
    fn color_round_trip_through_peniko() {
        let color = ShapeColor::new(0.25, 0.5, 1.0);
        let peniko: Color = color.into();
        let back: ShapeColor = peniko.into();
        assert!((back.r - color.r).abs() < 0.005);
        assert!((back.g - color.g).abs() < 0.005);
        assert!((back.b - color.b).abs() < 0.005);
    }
}
