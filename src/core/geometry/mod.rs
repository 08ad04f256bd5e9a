mod mesh;
mod process;
mod vert;

pub use mesh::{Mesh, GROUND_SEGMENT_LENGTH};
pub use process::{face_normal, find_winding_mismatch};
pub use vert::Vertex;

/// The four static meshes, built once before the first frame and shared
/// read-only afterwards.
#[derive(Debug, Clone)]
pub struct GeometrySet {
    pub ground: Mesh,
    pub cube: Mesh,
    pub watch: Mesh,
    pub screen: Mesh,
}

impl GeometrySet {
    pub fn build() -> Self {
        let set = Self {
            ground: Mesh::ground_quad(),
            cube: Mesh::unit_cube(),
            watch: Mesh::watch_quad(),
            screen: Mesh::screen_quad(),
        };
        log::debug!(
            "Built geometry: ground {} tris, cube {} tris, watch {} tris, screen {} tris",
            set.ground.triangle_count(),
            set.cube.triangle_count(),
            set.watch.triangle_count(),
            set.screen.triangle_count()
        );
        set
    }
}

impl Default for GeometrySet {
    fn default() -> Self {
        Self::build()
    }
}
