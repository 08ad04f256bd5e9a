use std::cell::RefCell;

use glam::Mat3;
use rayon::prelude::*;

use crate::core::{Color, LightingModel, PhongShading};

use super::{
    buffer::{Buffer, FrameBuffer},
    rasterizer::Rasterizer,
    ClipTriangle, ClipVertex, Clipper, DrawCall, Fragment, FrameUniforms, Shading,
};
use crate::error::WatchError;

/// Fixed-function toggles, flipped at runtime from the keyboard.
#[derive(Debug, Clone, Copy)]
pub struct States {
    pub depth_test: bool,
    pub backface_culling: bool,
}

impl Default for States {
    fn default() -> Self {
        Self {
            depth_test: true,
            backface_culling: true,
        }
    }
}

/// A fragment after shading, ready for the output merger.
struct ShadedFragment {
    pos: (usize, usize),
    depth: f32,
    color: Color,
    alpha: f32,
}

/// A graphics rendering pipeline that processes 3D geometry into 2D output
///
/// The pipeline handles:
/// - Vertex processing and transformation to clip space
/// - Triangle clipping against view frustum
/// - Rasterization of triangles to fragments
/// - Fragment shading and writing to the back buffer
pub struct Pipeline<B: Buffer> {
    pub width: usize,                    // Target width in pixels
    pub height: usize,                   // Target height in pixels
    front_buffer: RefCell<B>,            // Last finished frame
    back_buffer: RefCell<B>,             // Buffer being rendered to
    geometry: RefCell<Vec<ClipTriangle>>, // Clipped triangles of the current draw
    rasterizer: Rasterizer,              // Converts triangles to fragments
    clipper: RefCell<Clipper>,           // Clips triangles against view frustum
    fragments: RefCell<Vec<Fragment>>,   // Output fragments from rasterization
    lighting: Box<dyn LightingModel>,
    pub states: RefCell<States>,
}

impl<B: Buffer> Pipeline<B> {
    pub fn new(width: usize, height: usize) -> Self {
        Self::from_buffers(B::new(width, height), B::new(width, height))
    }

    /// Builds the pipeline around pre-made buffers of identical size.
    pub fn from_buffers(front: B, back: B) -> Self {
        let (width, height) = (back.width(), back.height());
        Self {
            width,
            height,
            front_buffer: RefCell::new(front),
            back_buffer: RefCell::new(back),
            geometry: RefCell::new(Vec::with_capacity(1024)),
            rasterizer: Rasterizer::new(width, height),
            clipper: RefCell::new(Clipper::new()),
            fragments: RefCell::new(Vec::with_capacity(1024)),
            lighting: Box::new(PhongShading),
            states: RefCell::new(States::default()),
        }
    }

    pub fn with_states(self, states: States) -> Self {
        *self.states.borrow_mut() = states;
        self
    }

    pub fn front_buffer(&self) -> &RefCell<B> {
        &self.front_buffer
    }

    pub fn back_buffer(&self) -> &RefCell<B> {
        &self.back_buffer
    }

    /// Clears the back buffer and syncs the clipper with the current states.
    pub fn begin_frame(&self, clear: Color) {
        self.back_buffer.borrow_mut().clear(clear);
        let culling = self.states.borrow().backface_culling;
        self.clipper.borrow_mut().set_backface_culling(culling);
    }

    /// Runs one draw call through every stage, writing into the back buffer.
    pub fn draw(&self, call: &DrawCall, uniforms: &FrameUniforms) {
        self.process_geometry(call, uniforms);
        self.rasterize();
        self.process_fragments(call, uniforms);
    }

    /// Transforms the mesh to clip space and clips it against the frustum.
    fn process_geometry(&self, call: &DrawCall, uniforms: &FrameUniforms) {
        let mvp = uniforms.view_proj * call.model;
        let normal_matrix = Mat3::from_mat4(call.model).inverse().transpose();

        let clipper = self.clipper.borrow();
        let mut geo = self.geometry.borrow_mut();
        geo.clear();

        for tri in call.mesh.triangles() {
            let vertices = tri.map(|v| ClipVertex {
                position: mvp * v.pos.extend(1.0),
                world_pos: call.model.transform_point3(v.pos),
                normal: normal_matrix * v.norm,
                uv: v.uv,
            });
            geo.extend(clipper.clip_triangle(&ClipTriangle { vertices }));
        }
    }

    fn rasterize(&self) {
        self.rasterizer
            .rasterize(&self.geometry.borrow(), &mut self.fragments.borrow_mut());
    }

    /// Shades fragments in parallel, then merges them into the back buffer
    /// in rasterization order.
    fn process_fragments(&self, call: &DrawCall, uniforms: &FrameUniforms) {
        let fragments = self.fragments.borrow();
        let lighting = self.lighting.as_ref();

        let shaded: Vec<ShadedFragment> = fragments
            .par_iter()
            .filter_map(|frag| shade(frag, &call.shading, uniforms, lighting))
            .collect();

        let depth_test = self.states.borrow().depth_test;
        let mut buffer = self.back_buffer.borrow_mut();
        for frag in shaded {
            if frag.alpha >= 1.0 {
                buffer.set_pixel(frag.pos, frag.depth, frag.color, depth_test);
            } else {
                buffer.blend_pixel(frag.pos, frag.depth, frag.color, frag.alpha, depth_test);
            }
        }
    }

    pub fn swap_buffers(&self) {
        std::mem::swap(
            &mut *self.front_buffer.borrow_mut(),
            &mut *self.back_buffer.borrow_mut(),
        );
    }
}

impl Pipeline<FrameBuffer> {
    /// Shows the back buffer in `window` (when there is one), then swaps.
    pub fn present(&self, window: Option<&mut minifb::Window>) -> Result<(), WatchError> {
        if let Some(window) = window {
            self.back_buffer.borrow().present_window(window)?;
        }
        self.swap_buffers();
        Ok(())
    }
}

fn shade(
    frag: &Fragment,
    shading: &Shading,
    uniforms: &FrameUniforms,
    lighting: &dyn LightingModel,
) -> Option<ShadedFragment> {
    let (color, alpha) = match shading {
        Shading::Lit {
            material,
            tint,
            texture,
        } => {
            let albedo = match texture {
                Some(tex) => tex.sample_color(frag.uv) * *tint,
                None => *tint,
            };
            let normal = frag.normal.normalize_or_zero();
            let view_dir = (uniforms.eye - frag.world_pos).normalize_or_zero();
            let color = lighting.shade(
                frag.world_pos,
                normal,
                view_dir,
                uniforms.lights,
                material,
                albedo,
            );
            (color, 1.0)
        }
        Shading::Emissive {
            texture,
            tint,
            uv_scale,
            uv_offset,
        } => {
            let rgba = match texture {
                Some(tex) => tex.sample(frag.uv * *uv_scale + *uv_offset) * *tint,
                None => *tint,
            };
            (Color::from_vec4(rgba), rgba.w)
        }
    };

    // fully transparent texels are discarded
    (alpha > 0.0).then(|| ShadedFragment {
        pos: (frag.screen_pos.x as usize, frag.screen_pos.y as usize),
        depth: frag.depth,
        color,
        alpha,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Light, Material, Mesh};
    use crate::pipeline::RenderTarget;
    use glam::{Mat4, Vec2, Vec3, Vec4};

    fn flat(tint: Vec4) -> Shading<'static> {
        Shading::Emissive {
            texture: None,
            tint,
            uv_scale: Vec2::ONE,
            uv_offset: Vec2::ZERO,
        }
    }

    #[test]
    fn screen_quad_fills_target() {
        let pipeline = Pipeline::<RenderTarget>::new(16, 16);
        pipeline.begin_frame(Color::BLACK);
        let mesh = Mesh::screen_quad();
        let call = DrawCall {
            mesh: &mesh,
            model: Mat4::IDENTITY,
            shading: flat(Vec4::new(1.0, 0.0, 0.0, 1.0)),
        };
        pipeline.draw(&call, &FrameUniforms::screen_space());
        let target = pipeline.back_buffer().borrow();
        assert!(target.texels().iter().all(|c| *c == Color::RED));
    }

    #[test]
    fn translucent_quad_blends_once() {
        let pipeline = Pipeline::<RenderTarget>::new(8, 8);
        pipeline.begin_frame(Color::BLACK);
        let mesh = Mesh::screen_quad();
        let call = DrawCall {
            mesh: &mesh,
            model: Mat4::IDENTITY,
            shading: flat(Vec4::new(1.0, 1.0, 1.0, 0.5)),
        };
        pipeline.draw(&call, &FrameUniforms::screen_space());
        let target = pipeline.back_buffer().borrow();
        // a double blend along the diagonal would give 0.75
        assert!(target.texels().iter().all(|c| (c.r - 0.5).abs() < 1e-6));
    }

    #[test]
    fn nearer_geometry_wins_with_depth_test() {
        let pipeline = Pipeline::<FrameBuffer>::new(8, 8);
        pipeline.begin_frame(Color::BLACK);
        let mesh = Mesh::screen_quad();
        let uniforms = FrameUniforms::screen_space();
        let near = DrawCall {
            mesh: &mesh,
            model: Mat4::from_translation(Vec3::new(0.0, 0.0, -0.5)),
            shading: flat(Vec4::new(1.0, 0.0, 0.0, 1.0)),
        };
        let far = DrawCall {
            mesh: &mesh,
            model: Mat4::from_translation(Vec3::new(0.0, 0.0, 0.5)),
            shading: flat(Vec4::new(0.0, 1.0, 0.0, 1.0)),
        };
        pipeline.draw(&near, &uniforms);
        pipeline.draw(&far, &uniforms);
        assert_eq!(pipeline.back_buffer().borrow().get_pixel((4, 4)), Some(Color::RED));

        pipeline.states.borrow_mut().depth_test = false;
        pipeline.draw(&far, &uniforms);
        assert_eq!(pipeline.back_buffer().borrow().get_pixel((4, 4)), Some(Color::GREEN));
    }

    #[test]
    fn lit_surface_responds_to_light() {
        let pipeline = Pipeline::<FrameBuffer>::new(4, 4);
        pipeline.begin_frame(Color::BLACK);
        let mesh = Mesh::screen_quad();
        let facing = [Light::Directional {
            direction: Vec3::Z,
            ambient: Color::BLACK,
            diffuse: Color::WHITE,
            specular: Color::BLACK,
        }];
        let uniforms = FrameUniforms {
            view_proj: Mat4::IDENTITY,
            eye: Vec3::new(0.0, 0.0, 5.0),
            lights: &facing,
        };
        let call = DrawCall {
            mesh: &mesh,
            model: Mat4::IDENTITY,
            shading: Shading::Lit {
                material: Material::new(Color::BLACK, Color::WHITE, Color::BLACK, 1.0),
                tint: Color::new(0.0, 0.0, 1.0),
                texture: None,
            },
        };
        pipeline.draw(&call, &uniforms);
        assert_eq!(
            pipeline.back_buffer().borrow().get_pixel((1, 1)),
            Some(Color::new(0.0, 0.0, 1.0))
        );
    }

    #[test]
    fn present_without_window_swaps() {
        let pipeline = Pipeline::<FrameBuffer>::new(2, 2);
        pipeline.begin_frame(Color::RED);
        pipeline.present(None).unwrap();
        assert_eq!(pipeline.front_buffer().borrow().get_pixel((0, 0)), Some(Color::RED));
    }
}
