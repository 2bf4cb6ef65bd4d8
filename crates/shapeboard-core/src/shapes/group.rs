//! Group shape for combining multiple shapes.

use super::{Shape, ShapeBase, ShapeColor, ShapeId};
use crate::render::Surface;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// A group of shapes that can be moved and undone as a single unit.
/// Groups can contain other groups, enabling nested hierarchies.
///
/// The group carries its own pair of corner points (the selection
/// rectangle dragged out by the grouping gesture), independent of its
/// members' bounds. Its center, however, is the arithmetic mean of the
/// members' centers, not the center of that rectangle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub(crate) base: ShapeBase,
    members: Vec<Shape>,
}

impl Group {
    /// Start an empty group anchored at a single point. The selection
    /// rectangle is dragged out with `set_p2` as the gesture progresses.
    pub fn new(p1: Point) -> Self {
        Self {
            base: ShapeBase::new(p1),
            members: Vec::new(),
        }
    }

    /// Create an empty group with a fixed selection rectangle (used when
    /// reconstructing a group from a file).
    pub fn from_corners(p1: Point, p2: Point) -> Self {
        Self {
            base: ShapeBase::from_corners(p1, p2),
            members: Vec::new(),
        }
    }

    pub fn id(&self) -> ShapeId {
        self.base.id()
    }

    pub fn p1(&self) -> Point {
        self.base.p1()
    }

    pub fn p2(&self) -> Point {
        self.base.p2()
    }

    pub fn members(&self) -> &[Shape] {
        &self.members
    }

    pub(crate) fn members_mut(&mut self) -> &mut [Shape] {
        &mut self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// A group with zero members is invalid and never added to a canvas.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Add a shape to the group. Membership is keyed by identity: a shape
    /// whose ID is already present is not added twice.
    pub fn add_member(&mut self, shape: Shape) {
        if !self.members.iter().any(|m| m.id() == shape.id()) {
            self.members.push(shape);
            self.refresh_center();
        }
    }

    /// Remove a member by identity and return it.
    pub fn remove_member(&mut self, id: ShapeId) -> Option<Shape> {
        let pos = self.members.iter().position(|m| m.id() == id)?;
        let shape = self.members.remove(pos);
        self.refresh_center();
        Some(shape)
    }

    /// Dissolve this group and return its members.
    pub fn ungroup(self) -> Vec<Shape> {
        self.members
    }

    /// True if `shape`'s center lies strictly inside this group's
    /// selection rectangle. This is the enclosure test the grouping
    /// gesture sweeps the canvas with.
    pub fn contains_center(&self, shape: &Shape) -> bool {
        let bounds = self.base.bounds();
        let center = shape.center();
        center.x > bounds.x0 && center.x < bounds.x1 && center.y > bounds.y0 && center.y < bounds.y1
    }

    /// Translate the selection rectangle and every member by the same
    /// delta.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.base.translate(dx, dy);
        for member in &mut self.members {
            member.translate(dx, dy);
        }
    }

    /// Recompute the group center as the mean of member centers. With no
    /// members the midpoint of the selection rectangle is left in place.
    fn refresh_center(&mut self) {
        if self.members.is_empty() {
            return;
        }
        let sum = self
            .members
            .iter()
            .fold(Vec2::ZERO, |acc, m| acc + m.center().to_vec2());
        self.base
            .set_center((sum / self.members.len() as f64).to_point());
    }

    /// Draw every member, then the group's own dashed outline in the fixed
    /// group-indicator color.
    pub(crate) fn draw(&self, surface: &mut dyn Surface) {
        for member in &self.members {
            member.draw(surface);
        }
        surface.dashed_rect(self.base.bounds(), ShapeColor::GROUP_OUTLINE.into());
    }
}
