use common::clip::Clip;
use mesh_format::Mesh;

use crate::Pos;

/// A box centered on the centroid of a set of vertices. Along each axis it
/// extends as far as the vertex furthest from the centroid on that axis, in
/// both directions, so it is symmetric about the centroid rather than tight
/// around the extremes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Pos,
    pub max: Pos,
}

/// A mesh along with its bounding box.
#[derive(Debug, Clone)]
pub struct BoundedMesh {
    pub mesh: Mesh,
    pub bounds: BoundingBox,
}

impl BoundingBox {
    /// Returns `None` when there are no vertices, as there is no centroid.
    pub fn from_vertices(vertices: &[Pos]) -> Option<Self> {
        if vertices.is_empty() {
            return None;
        }

        let centroid = vertices.iter().sum::<Pos>() / vertices.len() as f64;
        let deviation = vertices
            .iter()
            .fold(Pos::zeros(), |dev, v| dev.sup(&(v - centroid).abs()));

        Some(Self {
            min: centroid - deviation,
            max: centroid + deviation,
        })
    }

    pub fn center(&self) -> Pos {
        (self.min + self.max) / 2.0
    }

    /// The integer clip the viewer uses to place this box.
    pub fn clip(&self) -> Clip {
        Clip::from_bounds(self.min.into(), self.max.into())
    }

    /// Checks if the box, floored at zero and truncated like its clip, comes
    /// within `gap` of `layer` on the Z axis. Touching the edge of the window
    /// does not count.
    pub fn near_layer(&self, layer: u32, gap: u32) -> bool {
        let low = self.min.z.max(0.0) as i64;
        let high = self.max.z.max(0.0) as i64;
        let (layer, gap) = (layer as i64, gap as i64);

        low - gap < layer && layer < high + gap
    }
}

impl BoundedMesh {
    /// Computes the bounding box of `mesh`. The mesh itself is left as is.
    pub fn new(mesh: Mesh) -> Option<Self> {
        let bounds = BoundingBox::from_vertices(&mesh.vertices)?;
        Some(Self { mesh, bounds })
    }
}
