use std::fmt::{self, Display};

use nalgebra::{Vector2, Vector3};

pub mod obj;

/// A mesh as it is stored on disk. Normals, texture coordinates and faces may
/// all be empty, a point cloud is just a mesh with vertices.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vector3<f64>>,
    pub normals: Vec<Vector3<f64>>,
    pub uvs: Vec<Vector2<f64>>,
    pub faces: Vec<Face>,

    /// Values after the first three of a `v` line, such as vertex colours or
    /// a `w` weight. Either empty or one entry per vertex.
    pub vertex_extras: Vec<Vec<f64>>,
    /// Values after the first three of a `vn` line. Either empty or one entry
    /// per normal.
    pub normal_extras: Vec<Vec<f64>>,
    /// Values after the first two of a `vt` line, usually `w`. Either empty or
    /// one entry per texture coordinate.
    pub uv_extras: Vec<Vec<f64>>,
}

/// A polygon, one [`Corner`] per vertex.
pub type Face = Vec<Corner>;

/// One corner of a face: the `vertex/uv/normal` index tuple exactly as it
/// appeared in the file. Indices are 1-based and any of them may be empty
/// (`1//3`), they are kept as text so the face is written back untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corner(pub Vec<String>);

impl Mesh {
    /// A mesh with only vertex positions.
    pub fn from_points(vertices: Vec<Vector3<f64>>) -> Self {
        Self {
            vertices,
            ..Default::default()
        }
    }

    /// Extra values of the vertex at `index`, empty if it has none.
    pub fn vertex_extra(&self, index: usize) -> &[f64] {
        extra(&self.vertex_extras, index)
    }

    pub fn normal_extra(&self, index: usize) -> &[f64] {
        extra(&self.normal_extras, index)
    }

    pub fn uv_extra(&self, index: usize) -> &[f64] {
        extra(&self.uv_extras, index)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }
}

impl Corner {
    pub fn parse(raw: &str) -> Self {
        Self(raw.split('/').map(str::to_owned).collect())
    }
}

/// Records extras for the element about to be pushed at `len`. Nothing is
/// stored until some element actually has extras, then the list is padded so
/// it stays parallel to its attribute.
pub(crate) fn push_extra(extras: &mut Vec<Vec<f64>>, len: usize, extra: Vec<f64>) {
    if extra.is_empty() && extras.is_empty() {
        return;
    }

    extras.resize(len, Vec::new());
    extras.push(extra);
}

fn extra(extras: &[Vec<f64>], index: usize) -> &[f64] {
    extras.get(index).map(Vec::as_slice).unwrap_or_default()
}

impl Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("/"))
    }
}
