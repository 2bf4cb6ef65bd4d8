//! Length-prefixed binary format.
//!
//! Explicit, versioned layout: every field is written in a fixed order,
//! nothing relies on a language serialization mechanism.
//!
//! ```text
//! magic      8 bytes  "SHPBOARD"
//! version    u32 LE
//! count      u32 LE
//! records    one per shape:
//!   tag      u8       0 = line, 1 = oval, 2 = rect, 3 = group
//!   primitives: filled u8, r/g/b f64, x1/y1/x2/y2 f64
//!   groups:     member count u32, x1/y1/x2/y2 f64, member records
//! ```
//!
//! All multi-byte values are little-endian; coordinates and color channels
//! keep their full f64 bit patterns, making this the precision-preserving
//! format.

use super::{io_error, StorageError, StorageResult};
use crate::shapes::{Group, Line, Oval, Rectangle, Shape, ShapeColor};
use kurbo::Point;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Magic bytes identifying a shapeboard binary file.
pub const MAGIC: &[u8; 8] = b"SHPBOARD";

/// Current binary format version.
pub const VERSION: u32 = 1;

const TAG_LINE: u8 = 0;
const TAG_OVAL: u8 = 1;
const TAG_RECT: u8 = 2;
const TAG_GROUP: u8 = 3;

/// Serialize a shape list to a binary stream.
pub fn write_shapes<W: Write>(writer: &mut W, shapes: &[Shape]) -> std::io::Result<()> {
    writer.write_all(MAGIC)?;
    writer.write_all(&VERSION.to_le_bytes())?;
    writer.write_all(&(shapes.len() as u32).to_le_bytes())?;
    for shape in shapes {
        write_shape(writer, shape)?;
    }
    Ok(())
}

/// Parse a shape list from a binary stream.
pub fn read_shapes<R: Read>(reader: &mut R) -> StorageResult<Vec<Shape>> {
    let mut magic = [0u8; 8];
    read_exact(reader, &mut magic)?;
    if &magic != MAGIC {
        return Err(StorageError::Parse(
            "not a shapeboard binary file (bad magic)".to_string(),
        ));
    }

    let version = read_u32(reader)?;
    if version > VERSION {
        return Err(StorageError::UnsupportedVersion(version));
    }

    let count = read_u32(reader)? as usize;
    let mut shapes = Vec::with_capacity(count.min(1024));
    for _ in 0..count {
        shapes.push(read_shape(reader)?);
    }
    Ok(shapes)
}

/// Write a shape list to a binary file.
pub fn save(path: &Path, shapes: &[Shape]) -> StorageResult<()> {
    let file = File::create(path).map_err(|e| io_error(path, e))?;
    let mut writer = BufWriter::new(file);
    write_shapes(&mut writer, shapes).map_err(|e| io_error(path, e))?;
    writer.flush().map_err(|e| io_error(path, e))
}

/// Load a shape list from a binary file.
pub fn load(path: &Path) -> StorageResult<Vec<Shape>> {
    let file = File::open(path).map_err(|e| io_error(path, e))?;
    let mut reader = BufReader::new(file);
    read_shapes(&mut reader)
}

fn write_shape<W: Write>(writer: &mut W, shape: &Shape) -> std::io::Result<()> {
    match shape {
        Shape::Group(group) => {
            writer.write_all(&[TAG_GROUP])?;
            writer.write_all(&(group.len() as u32).to_le_bytes())?;
            write_points(writer, group.p1(), group.p2())?;
            for member in group.members() {
                write_shape(writer, member)?;
            }
        }
        _ => {
            let tag = match shape {
                Shape::Line(_) => TAG_LINE,
                Shape::Oval(_) => TAG_OVAL,
                _ => TAG_RECT,
            };
            let color = shape.color();
            writer.write_all(&[tag, shape.filled() as u8])?;
            writer.write_all(&color.r.to_le_bytes())?;
            writer.write_all(&color.g.to_le_bytes())?;
            writer.write_all(&color.b.to_le_bytes())?;
            write_points(writer, shape.p1(), shape.p2())?;
        }
    }
    Ok(())
}

fn write_points<W: Write>(writer: &mut W, p1: Point, p2: Point) -> std::io::Result<()> {
    writer.write_all(&p1.x.to_le_bytes())?;
    writer.write_all(&p1.y.to_le_bytes())?;
    writer.write_all(&p2.x.to_le_bytes())?;
    writer.write_all(&p2.y.to_le_bytes())
}

fn read_shape<R: Read>(reader: &mut R) -> StorageResult<Shape> {
    let tag = read_u8(reader)?;
    match tag {
        TAG_GROUP => {
            let count = read_u32(reader)? as usize;
            let (p1, p2) = read_points(reader)?;
            let mut group = Group::from_corners(p1, p2);
            for _ in 0..count {
                group.add_member(read_shape(reader)?);
            }
            Ok(Shape::Group(group))
        }
        TAG_LINE | TAG_OVAL | TAG_RECT => {
            let filled = match read_u8(reader)? {
                0 => false,
                1 => true,
                other => {
                    return Err(StorageError::Parse(format!(
                        "invalid filled flag {other}"
                    )))
                }
            };
            let r = read_f64(reader)?;
            let g = read_f64(reader)?;
            let b = read_f64(reader)?;
            let color = ShapeColor::new(r, g, b);
            if !color.in_range() {
                return Err(StorageError::Parse(format!(
                    "color channel out of range: {r} {g} {b}"
                )));
            }
            let (p1, p2) = read_points(reader)?;

            let mut shape = match tag {
                TAG_LINE => Shape::Line(Line::from_corners(p1, p2)),
                TAG_OVAL => Shape::Oval(Oval::from_corners(p1, p2)),
                _ => Shape::Rectangle(Rectangle::from_corners(p1, p2)),
            };
            shape.set_filled(filled);
            shape.set_color(color);
            Ok(shape)
        }
        other => Err(StorageError::Parse(format!("unknown shape tag {other}"))),
    }
}

fn read_points<R: Read>(reader: &mut R) -> StorageResult<(Point, Point)> {
    let x1 = read_f64(reader)?;
    let y1 = read_f64(reader)?;
    let x2 = read_f64(reader)?;
    let y2 = read_f64(reader)?;
    Ok((Point::new(x1, y1), Point::new(x2, y2)))
}

fn read_exact<R: Read>(reader: &mut R, buf: &mut [u8]) -> StorageResult<()> {
    reader
        .read_exact(buf)
        .map_err(|_| StorageError::Parse("unexpected end of file".to_string()))
}

fn read_u8<R: Read>(reader: &mut R) -> StorageResult<u8> {
    let mut buf = [0u8; 1];
    read_exact(reader, &mut buf)?;
    Ok(buf[0])
}

fn read_u32<R: Read>(reader: &mut R) -> StorageResult<u32> {
    let mut buf = [0u8; 4];
    read_exact(reader, &mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

fn read_f64<R: Read>(reader: &mut R) -> StorageResult<f64> {
    let mut buf = [0u8; 8];
    read_exact(reader, &mut buf)?;
    Ok(f64::from_le_bytes(buf))
}
