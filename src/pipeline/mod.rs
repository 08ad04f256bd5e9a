use crate::core::{Color, Light, Material, Mesh, TextureSource};
use glam::{Mat4, UVec2, Vec2, Vec3, Vec4};

mod buffer;
mod clipper;
#[allow(clippy::module_inception)]
pub mod pipeline;
pub mod rasterizer;
mod render_target;

pub use buffer::{Buffer, FrameBuffer};
pub use clipper::{ClipTriangle, ClipVertex, Clipper, CLIP_SPACE_PLANES};
pub use pipeline::{Pipeline, States};
pub use render_target::RenderTarget;

/// How a draw call turns interpolated attributes into a color.
pub enum Shading<'a> {
    /// Phong-lit surface. The albedo is `texel * tint`, or `tint` alone.
    Lit {
        material: Material,
        tint: Color,
        texture: Option<&'a dyn TextureSource>,
    },
    /// Lighting is bypassed; the output is `texel * tint` (RGBA), with the
    /// texcoord remapped as `uv * uv_scale + uv_offset` first.
    Emissive {
        texture: Option<&'a dyn TextureSource>,
        tint: Vec4,
        uv_scale: Vec2,
        uv_offset: Vec2,
    },
}

impl<'a> Shading<'a> {
    /// Unremapped emissive texture, e.g. the watch screen.
    pub fn emissive(texture: &'a dyn TextureSource) -> Self {
        Shading::Emissive {
            texture: Some(texture),
            tint: Vec4::ONE,
            uv_scale: Vec2::ONE,
            uv_offset: Vec2::ZERO,
        }
    }
}

pub struct DrawCall<'a> {
    pub mesh: &'a Mesh,
    pub model: Mat4,
    pub shading: Shading<'a>,
}

/// Per-frame values shared by every draw call.
pub struct FrameUniforms<'a> {
    pub view_proj: Mat4,
    /// Camera position, for specular.
    pub eye: Vec3,
    pub lights: &'a [Light],
}

impl FrameUniforms<'static> {
    /// Identity projection: mesh coordinates are already NDC.
    pub fn screen_space() -> Self {
        Self {
            view_proj: Mat4::IDENTITY,
            eye: Vec3::Z,
            lights: &[],
        }
    }
}

#[derive(Clone, Debug)]
pub struct Fragment {
    pub screen_pos: UVec2,
    pub depth: f32,
    pub world_pos: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
}

