//! Reading and writing of Wavefront `.obj` files. Only the records the
//! viewer cares about are understood:
//! ```text
//! v  x y z      - vertex position
//! vn x y z      - vertex normal
//! vt u v        - texture coordinate
//! f  1/1/1 2//2 - face, one index tuple per corner
//! ```
//! Numbers past the position or coordinate (vertex colours, `w`) are kept as
//! extras and written back out. Everything else (comments, groups,
//! materials, ...) is skipped on read.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use anyhow::{ensure, Context, Result};
use nalgebra::{Vector2, Vector3};
use tracing::debug;

use crate::{push_extra, Corner, Mesh};

/// One line of an `.obj` file, tagged by its leading token. The payload is
/// the rest of the line after the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjLine<'a> {
    Vertex(&'a str),
    Normal(&'a str),
    TexCoord(&'a str),
    Face(&'a str),
    Unknown(&'a str),
}

impl<'a> ObjLine<'a> {
    pub fn classify(line: &'a str) -> Self {
        let line = line.trim();
        let (tag, rest) = line
            .split_once(char::is_whitespace)
            .unwrap_or((line, ""));

        match tag {
            "v" => Self::Vertex(rest),
            "vn" => Self::Normal(rest),
            "vt" => Self::TexCoord(rest),
            "f" => Self::Face(rest),
            _ => Self::Unknown(line),
        }
    }
}

/// Loads the `.obj` file at `path`.
pub fn load(path: &Path) -> Result<Mesh> {
    let file =
        File::open(path).with_context(|| format!("Failed to open `{}`", path.display()))?;
    let mesh = parse(BufReader::new(file))
        .with_context(|| format!("Failed to parse `{}`", path.display()))?;

    debug!(
        "Loaded `{}`. {{ vert: {}, face: {} }}",
        path.display(),
        mesh.vertex_count(),
        mesh.face_count()
    );
    Ok(mesh)
}

/// Parses an `.obj` file. A malformed number anywhere fails the whole parse.
pub fn parse<R: BufRead>(reader: R) -> Result<Mesh> {
    let mut mesh = Mesh::default();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        parse_line(&mut mesh, ObjLine::classify(&line))
            .with_context(|| format!("Invalid record on line {}", idx + 1))?;
    }

    Ok(mesh)
}

fn parse_line(mesh: &mut Mesh, line: ObjLine) -> Result<()> {
    match line {
        ObjLine::Vertex(raw) => {
            let (v, extra) = components::<3>(raw)?;
            push_extra(&mut mesh.vertex_extras, mesh.vertices.len(), extra);
            mesh.vertices.push(Vector3::from(v));
        }
        ObjLine::Normal(raw) => {
            let (n, extra) = components::<3>(raw)?;
            push_extra(&mut mesh.normal_extras, mesh.normals.len(), extra);
            mesh.normals.push(Vector3::from(n));
        }
        ObjLine::TexCoord(raw) => {
            let (uv, extra) = components::<2>(raw)?;
            push_extra(&mut mesh.uv_extras, mesh.uvs.len(), extra);
            mesh.uvs.push(Vector2::from(uv));
        }
        ObjLine::Face(raw) => mesh
            .faces
            .push(raw.split_whitespace().map(Corner::parse).collect()),
        ObjLine::Unknown(_) => {}
    }

    Ok(())
}

/// Parses every number on the line. The first `N` are returned as the
/// attribute itself and anything after them as its extras.
fn components<const N: usize>(raw: &str) -> Result<([f64; N], Vec<f64>)> {
    let mut values = raw
        .split_whitespace()
        .map(|token| {
            token
                .parse::<f64>()
                .with_context(|| format!("Invalid number `{token}`"))
        })
        .collect::<Result<Vec<_>>>()?;

    ensure!(
        values.len() >= N,
        "Expected at least {N} components, found {}",
        values.len()
    );

    let extra = values.split_off(N);
    let mut out = [0.0; N];
    out.copy_from_slice(&values);
    Ok((out, extra))
}

/// Writes `mesh` to `path`, replacing anything already there.
pub fn save(path: &Path, mesh: &Mesh) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create `{}`", path.display()))?;

    let mut writer = BufWriter::new(file);
    write(&mut writer, mesh)?;
    writer.flush()?;
    Ok(())
}

/// Serializes a mesh in the same layout [`parse`] reads: positions, normals,
/// texture coordinates, then faces. Floats use the shortest representation
/// that parses back to the same value.
pub fn write<W: Write>(mut writer: W, mesh: &Mesh) -> Result<()> {
    for (i, v) in mesh.vertices.iter().enumerate() {
        write!(writer, "v {} {} {}", v.x, v.y, v.z)?;
        write_extra(&mut writer, mesh.vertex_extra(i))?;
    }

    for (i, n) in mesh.normals.iter().enumerate() {
        write!(writer, "vn {} {} {}", n.x, n.y, n.z)?;
        write_extra(&mut writer, mesh.normal_extra(i))?;
    }

    for (i, uv) in mesh.uvs.iter().enumerate() {
        write!(writer, "vt {} {}", uv.x, uv.y)?;
        write_extra(&mut writer, mesh.uv_extra(i))?;
    }

    for face in &mesh.faces {
        let corners = face.iter().map(Corner::to_string).collect::<Vec<_>>();
        writeln!(writer, "f {}", corners.join(" "))?;
    }

    Ok(())
}

/// Finishes a record with its extra values, if any.
fn write_extra<W: Write>(writer: &mut W, extra: &[f64]) -> Result<()> {
    for value in extra {
        write!(writer, " {value}")?;
    }
    writeln!(writer)?;
    Ok(())
}
