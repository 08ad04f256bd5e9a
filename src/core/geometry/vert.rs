use glam::{Vec2, Vec3};

/// Interleaved vertex layout shared by every mesh: position, normal, texcoord.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    pub pos: Vec3,
    pub norm: Vec3,
    pub uv: Vec2,
}

impl Vertex {
    pub const fn new(pos: Vec3, norm: Vec3, uv: Vec2) -> Self {
        Self { pos, norm, uv }
    }
}

impl Default for Vertex {
    fn default() -> Self {
        Self {
            pos: Vec3::ZERO,
            norm: Vec3::Y,
            uv: Vec2::ZERO,
        }
    }
}
