pub mod camera;
pub mod color;
pub mod geometry;
pub mod light;
pub mod texture;

pub use camera::{Camera, EYE_HEIGHT, MAX_PITCH};
pub use color::Color;
pub use geometry::{GeometrySet, Mesh, Vertex};
pub use light::{Light, LightingModel, Material, PhongShading};
pub use texture::{Texture, TextureFilter, TextureSource, WrapMode};
