use mesh_format::Mesh;

/// Keeps the vertices whose Z coordinate is within `gap` of `layer`, bounds
/// included, in their original order. The result is a point cloud: vertex
/// extras such as colours go along with their vertex, while normals, texture
/// coordinates and faces are not carried over.
pub fn clip_to_layer(mesh: &Mesh, layer: f64, gap: f64) -> Mesh {
    let window = (layer - gap)..=(layer + gap);
    let kept = (0..mesh.vertex_count())
        .filter(|&i| window.contains(&mesh.vertices[i].z))
        .collect::<Vec<_>>();

    let mut points = Mesh::from_points(kept.iter().map(|&i| mesh.vertices[i]).collect());
    if !mesh.vertex_extras.is_empty() {
        points.vertex_extras = kept.iter().map(|&i| mesh.vertex_extra(i).to_vec()).collect();
    }

    points
}
