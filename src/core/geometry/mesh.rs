use super::Vertex;
use glam::{Vec2, Vec3};

/// Length of one ground tile along -Z.
pub const GROUND_SEGMENT_LENGTH: f32 = 20.0;
const GROUND_HALF_WIDTH: f32 = 50.0;
const WATCH_HALF_EXTENT: f32 = 0.15;

/// An indexed triangle list. Immutable once built.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub label: &'static str,
    pub vertices: Vec<Vertex>, // Vertex buffer
    pub indices: Vec<[u32; 3]>, // Triangles, CCW seen from outside
}

impl Mesh {
    pub fn new(label: &'static str, vertices: Vec<Vertex>, indices: Vec<[u32; 3]>) -> Self {
        Self {
            label,
            vertices,
            indices,
        }
    }

    /// Vertices of every triangle, in index order.
    pub fn triangles(&self) -> impl Iterator<Item = [Vertex; 3]> + '_ {
        self.indices.iter().map(move |tri| {
            [
                self.vertices[tri[0] as usize],
                self.vertices[tri[1] as usize],
                self.vertices[tri[2] as usize],
            ]
        })
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// Two triangles sharing the 0-2 diagonal.
    fn quad(label: &'static str, corners: [Vertex; 4]) -> Self {
        Self::new(label, corners.to_vec(), vec![[0, 1, 2], [0, 2, 3]])
    }

    /// 100 x 20 tile lying in the XZ plane, spanning `z` in `[-20, 0]`.
    /// Texcoords run 0..10 across and 0..4 along so the grass tiles.
    pub fn ground_quad() -> Self {
        let (w, l) = (GROUND_HALF_WIDTH, GROUND_SEGMENT_LENGTH);
        Self::quad(
            "ground",
            [
                Vertex::new(Vec3::new(-w, 0.0, 0.0), Vec3::Y, Vec2::new(0.0, 0.0)),
                Vertex::new(Vec3::new(w, 0.0, 0.0), Vec3::Y, Vec2::new(10.0, 0.0)),
                Vertex::new(Vec3::new(w, 0.0, -l), Vec3::Y, Vec2::new(10.0, 4.0)),
                Vertex::new(Vec3::new(-w, 0.0, -l), Vec3::Y, Vec2::new(0.0, 4.0)),
            ],
        )
    }

    /// Unit cube centred on the origin, 36 vertices with flat outward normals.
    pub fn unit_cube() -> Self {
        // (normal, u, v) with u x v == normal so each face winds CCW from outside
        let faces = [
            (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
            (Vec3::Z, Vec3::X, Vec3::Y),
            (Vec3::NEG_X, Vec3::Z, Vec3::Y),
            (Vec3::X, Vec3::NEG_Z, Vec3::Y),
            (Vec3::NEG_Y, Vec3::X, Vec3::Z),
            (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        ];
        let corners = [
            (-1.0, -1.0, Vec2::new(0.0, 0.0)),
            (1.0, -1.0, Vec2::new(1.0, 0.0)),
            (1.0, 1.0, Vec2::new(1.0, 1.0)),
            (1.0, 1.0, Vec2::new(1.0, 1.0)),
            (-1.0, 1.0, Vec2::new(0.0, 1.0)),
            (-1.0, -1.0, Vec2::new(0.0, 0.0)),
        ];

        let mut vertices = Vec::with_capacity(36);
        for (norm, u, v) in faces {
            for (a, b, uv) in corners {
                let pos = 0.5 * (norm + a * u + b * v);
                vertices.push(Vertex::new(pos, norm, uv));
            }
        }
        let indices = (0..12u32).map(|t| [3 * t, 3 * t + 1, 3 * t + 2]).collect();
        Self::new("cube", vertices, indices)
    }

    /// 0.3 x 0.3 face at `z = 0` facing +Z. Carries the off-screen UI.
    pub fn watch_quad() -> Self {
        let h = WATCH_HALF_EXTENT;
        Self::quad(
            "watch",
            [
                Vertex::new(Vec3::new(-h, -h, 0.0), Vec3::Z, Vec2::new(0.0, 0.0)),
                Vertex::new(Vec3::new(h, -h, 0.0), Vec3::Z, Vec2::new(1.0, 0.0)),
                Vertex::new(Vec3::new(h, h, 0.0), Vec3::Z, Vec2::new(1.0, 1.0)),
                Vertex::new(Vec3::new(-h, h, 0.0), Vec3::Z, Vec2::new(0.0, 1.0)),
            ],
        )
    }

    /// Full NDC square, used to place 2D quads on the watch UI.
    pub fn screen_quad() -> Self {
        Self::quad(
            "screen",
            [
                Vertex::new(Vec3::new(-1.0, 1.0, 0.0), Vec3::Z, Vec2::new(0.0, 1.0)),
                Vertex::new(Vec3::new(-1.0, -1.0, 0.0), Vec3::Z, Vec2::new(0.0, 0.0)),
                Vertex::new(Vec3::new(1.0, -1.0, 0.0), Vec3::Z, Vec2::new(1.0, 0.0)),
                Vertex::new(Vec3::new(1.0, 1.0, 0.0), Vec3::Z, Vec2::new(1.0, 1.0)),
            ],
        )
    }
}
