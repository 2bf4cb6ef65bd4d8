//! Persistence codecs for the canvas shape list.
//!
//! Two formats represent the full top-level shape sequence: a line-oriented
//! text format and a length-prefixed binary format. The text format writes
//! coordinates as integers and is lossy by design; the binary format keeps
//! full f64 precision and is the faithful round-trip path.

pub mod binary;
pub mod text;

use std::path::Path;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("{0} could not be opened: {1}")]
    Io(String, std::io::Error),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("unsupported file format version {0}")]
    UnsupportedVersion(u32),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

pub(crate) fn io_error(path: &Path, source: std::io::Error) -> StorageError {
    StorageError::Io(path.display().to_string(), source)
}

/// A mixed shape list shared by the codec tests: three primitives and one
/// group with two members, one of them nested one level deep.
#[cfg(test)]
pub(crate) mod fixtures {
    use crate::shapes::{Group, Line, Oval, Rectangle, Shape, ShapeColor};
    use kurbo::Point;

    pub(crate) fn sample_shapes() -> Vec<Shape> {
        let mut line = Shape::Line(Line::from_corners(
            Point::new(10.0, 20.0),
            Point::new(110.0, 40.0),
        ));
        line.set_color(ShapeColor::new(1.0, 0.0, 0.0));

        let mut oval = Shape::Oval(Oval::from_corners(
            Point::new(50.0, 50.0),
            Point::new(150.0, 100.0),
        ));
        oval.set_filled(true);
        oval.set_color(ShapeColor::new(0.0, 0.5, 0.25));

        let rect = Shape::Rectangle(Rectangle::from_corners(
            Point::new(200.0, 10.0),
            Point::new(260.0, 90.0),
        ));

        let mut group = Group::from_corners(Point::new(300.0, 300.0), Point::new(400.0, 400.0));
        group.add_member(Shape::Line(Line::from_corners(
            Point::new(310.0, 310.0),
            Point::new(330.0, 330.0),
        )));
        let mut inner = Group::from_corners(Point::new(340.0, 340.0), Point::new(390.0, 390.0));
        inner.add_member(Shape::Rectangle(Rectangle::from_corners(
            Point::new(350.0, 350.0),
            Point::new(380.0, 380.0),
        )));
        group.add_member(Shape::Group(inner));

        vec![line, oval, rect, Shape::Group(group)]
    }
}
