//! Line-oriented text format.
//!
//! The file starts with the shape count, followed by one record per shape:
//!
//! ```text
//! <count>
//! <type> <x1> <y1> <x2> <y2> <filled> <r> <g> <b>
//! ShapeGroup <memberCount> <x1> <y1> <x2> <y2>
//! ...member records...
//! ```
//!
//! Type tags are `line`, `oval` and `rect`, case-insensitive on read.
//! Coordinates are written rounded to integers and parsed as integers, so
//! the text format is lossy for fractional geometry. Color channels are
//! written with three decimals. The reader tokenizes on whitespace, so
//! line boundaries carry no meaning beyond readability.

use super::{io_error, StorageError, StorageResult};
use crate::shapes::{Group, Line, Oval, Rectangle, Shape, ShapeColor};
use kurbo::Point;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Serialize a shape list to the text format.
pub fn write_shapes(shapes: &[Shape]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", shapes.len());
    for shape in shapes {
        write_shape(&mut out, shape);
    }
    out
}

/// Parse a shape list from text-format content.
pub fn read_shapes(content: &str) -> StorageResult<Vec<Shape>> {
    let mut tokens = Tokens::new(content);
    let count = tokens.next_usize("shape count")?;

    let mut shapes = Vec::with_capacity(count.min(1024));
    for _ in 0..count {
        shapes.push(read_shape(&mut tokens)?);
    }
    Ok(shapes)
}

/// Write a shape list to a text file.
pub fn save(path: &Path, shapes: &[Shape]) -> StorageResult<()> {
    fs::write(path, write_shapes(shapes)).map_err(|e| io_error(path, e))
}

/// Load a shape list from a text file.
pub fn load(path: &Path) -> StorageResult<Vec<Shape>> {
    let content = fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    read_shapes(&content)
}

fn write_shape(out: &mut String, shape: &Shape) {
    match shape {
        Shape::Group(group) => {
            let (p1, p2) = (group.p1(), group.p2());
            let _ = writeln!(
                out,
                "ShapeGroup {} {:.0} {:.0} {:.0} {:.0}",
                group.len(),
                p1.x,
                p1.y,
                p2.x,
                p2.y
            );
            for member in group.members() {
                write_shape(out, member);
            }
        }
        _ => {
            let tag = match shape {
                Shape::Line(_) => "line",
                Shape::Oval(_) => "oval",
                _ => "rect",
            };
            let (p1, p2) = (shape.p1(), shape.p2());
            let color = shape.color();
            let _ = writeln!(
                out,
                "{} {:.0} {:.0} {:.0} {:.0} {} {:.3} {:.3} {:.3}",
                tag,
                p1.x,
                p1.y,
                p2.x,
                p2.y,
                shape.filled(),
                color.r,
                color.g,
                color.b
            );
        }
    }
}

fn read_shape(tokens: &mut Tokens<'_>) -> StorageResult<Shape> {
    let tag = tokens.next("shape type")?;
    if tag.eq_ignore_ascii_case("ShapeGroup") {
        read_group(tokens)
    } else {
        read_primitive(tokens, tag)
    }
}

fn read_primitive(tokens: &mut Tokens<'_>, tag: &str) -> StorageResult<Shape> {
    let x1 = tokens.next_i32("x1")?;
    let y1 = tokens.next_i32("y1")?;
    let x2 = tokens.next_i32("x2")?;
    let y2 = tokens.next_i32("y2")?;
    let filled = tokens.next_bool("filled flag")?;
    let r = tokens.next_f64("red channel")?;
    let g = tokens.next_f64("green channel")?;
    let b = tokens.next_f64("blue channel")?;

    let color = ShapeColor::new(r, g, b);
    if !color.in_range() {
        return Err(StorageError::Parse(format!(
            "color channel out of range: {r} {g} {b}"
        )));
    }

    let p1 = Point::new(x1 as f64, y1 as f64);
    let p2 = Point::new(x2 as f64, y2 as f64);

    let mut shape = if tag.eq_ignore_ascii_case("line") {
        Shape::Line(Line::from_corners(p1, p2))
    } else if tag.eq_ignore_ascii_case("oval") {
        Shape::Oval(Oval::from_corners(p1, p2))
    } else if tag.eq_ignore_ascii_case("rect") {
        Shape::Rectangle(Rectangle::from_corners(p1, p2))
    } else {
        return Err(StorageError::Parse(format!("unknown shape type `{tag}`")));
    };

    shape.set_filled(filled);
    shape.set_color(color);
    Ok(shape)
}

fn read_group(tokens: &mut Tokens<'_>) -> StorageResult<Shape> {
    let count = tokens.next_usize("group member count")?;
    let x1 = tokens.next_i32("x1")?;
    let y1 = tokens.next_i32("y1")?;
    let x2 = tokens.next_i32("x2")?;
    let y2 = tokens.next_i32("y2")?;

    let mut group = Group::from_corners(
        Point::new(x1 as f64, y1 as f64),
        Point::new(x2 as f64, y2 as f64),
    );
    for _ in 0..count {
        group.add_member(read_shape(tokens)?);
    }
    Ok(Shape::Group(group))
}

/// Whitespace tokenizer over the whole file content.
struct Tokens<'a> {
    iter: std::str::SplitAsciiWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn new(content: &'a str) -> Self {
        Self {
            iter: content.split_ascii_whitespace(),
        }
    }

    fn next(&mut self, what: &str) -> StorageResult<&'a str> {
        self.iter
            .next()
            .ok_or_else(|| StorageError::Parse(format!("unexpected end of input, expected {what}")))
    }

    fn next_i32(&mut self, what: &str) -> StorageResult<i32> {
        let token = self.next(what)?;
        token
            .parse()
            .map_err(|_| StorageError::Parse(format!("expected integer {what}, got `{token}`")))
    }

    fn next_usize(&mut self, what: &str) -> StorageResult<usize> {
        let token = self.next(what)?;
        token
            .parse()
            .map_err(|_| StorageError::Parse(format!("expected count {what}, got `{token}`")))
    }

    fn next_f64(&mut self, what: &str) -> StorageResult<f64> {
        let token = self.next(what)?;
        token
            .parse()
            .map_err(|_| StorageError::Parse(format!("expected number {what}, got `{token}`")))
    }

    fn next_bool(&mut self, what: &str) -> StorageResult<bool> {
        let token = self.next(what)?;
        token
            .parse()
            .map_err(|_| StorageError::Parse(format!("expected boolean {what}, got `{token}`")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::fixtures::sample_shapes;

    #[test]
    fn round_trip_preserves_structure() {
        let shapes = sample_shapes();
        let text = write_shapes(&shapes);
        let restored = read_shapes(&text).unwrap();

        assert_eq!(restored.len(), shapes.len());

        // Types, integer corners, fill flags and colors survive.
        for (orig, back) in shapes.iter().zip(&restored) {
            assert_eq!(
                std::mem::discriminant(orig),
                std::mem::discriminant(back)
            );
            assert_eq!(back.p1().x, orig.p1().x.round());
            assert_eq!(back.p1().y, orig.p1().y.round());
            assert_eq!(back.filled(), orig.filled());
        }

        let group = restored[3].as_group().unwrap();
        assert_eq!(group.len(), 2);
        let inner = group.members()[1].as_group().unwrap();
        assert_eq!(inner.len(), 1);
    }

    #[test]
    fn coordinates_are_written_as_integers() {
        let mut shape = Shape::Line(Line::from_corners(
            Point::new(10.6, 20.4),
            Point::new(30.5, 40.0),
        ));
        shape.set_color(ShapeColor::new(0.123, 0.456, 0.789));

        let text = write_shapes(&[shape]);
        let line = text.lines().nth(1).unwrap();
        assert!(line.starts_with("line 11 20 "));
        assert!(line.ends_with("false 0.123 0.456 0.789"));
    }

    #[test]
    fn colors_keep_three_decimals() {
        let shapes = sample_shapes();
        let restored = read_shapes(&write_shapes(&shapes)).unwrap();
        let color = restored[1].color();
        assert!((color.g - 0.5).abs() < 1e-9);
        assert!((color.b - 0.25).abs() < 1e-9);
    }

    #[test]
    fn type_tags_are_case_insensitive() {
        let text = "1\nOVAL 0 0 10 10 true 0.0 0.0 0.0\n";
        let shapes = read_shapes(text).unwrap();
        assert!(matches!(shapes[0], Shape::Oval(_)));
        assert!(shapes[0].filled());
    }

    #[test]
    fn unknown_type_tag_is_rejected() {
        let text = "1\ntriangle 0 0 10 10 false 0.0 0.0 0.0\n";
        assert!(matches!(read_shapes(text), Err(StorageError::Parse(_))));
    }

    #[test]
    fn malformed_token_aborts_load() {
        // "ShapeGroup" where a color float was expected.
        let text = "1\nline 0 0 10 10 false ShapeGroup 0.0 0.0\n";
        assert!(matches!(
            read_shapes(text),
            Err(StorageError::Parse(_))
        ));
    }

    #[test]
    fn truncated_input_aborts_load() {
        let text = "2\nline 0 0 10 10 false 0.0 0.0 0.0\n";
        assert!(matches!(read_shapes(text), Err(StorageError::Parse(_))));
    }

    #[test]
    fn out_of_range_color_is_rejected() {
        let text = "1\nrect 0 0 10 10 false 1.5 0.0 0.0\n";
        assert!(matches!(read_shapes(text), Err(StorageError::Parse(_))));
    }

    #[test]
    fn save_and_load_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shapes.txt");

        let shapes = sample_shapes();
        save(&path, &shapes).unwrap();
        let restored = load(&path).unwrap();
        assert_eq!(restored.len(), shapes.len());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load(Path::new("/nonexistent/shapes.txt")).unwrap_err();
        assert!(err.to_string().contains("shapes.txt"));
    }
}
