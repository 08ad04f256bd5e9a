use glam::Vec3;

use super::mesh::Mesh;

/// Unnormalized face normal using the right-hand rule: `(v1 - v0) x (v2 - v0)`.
pub fn face_normal(v0: Vec3, v1: Vec3, v2: Vec3) -> Vec3 {
    (v1 - v0).cross(v2 - v0)
}

/// Returns the index of the first triangle whose winding disagrees with the
/// normals stored on its vertices, or `None` if every triangle is CCW when
/// seen from the side its normals point to.
pub fn find_winding_mismatch(mesh: &Mesh) -> Option<usize> {
    mesh.triangles().position(|[a, b, c]| {
        let n = face_normal(a.pos, b.pos, c.pos);
        [a, b, c].iter().any(|v| n.dot(v.norm) <= 0.0)
    })
}
