use std::cell::Ref;
use std::path::Path;

use glam::{Mat4, Vec2, Vec3, Vec4};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::pose::WatchPose;
use crate::core::geometry::GROUND_SEGMENT_LENGTH;
use crate::core::{Camera, Color, GeometrySet, Material, Texture, TextureSource, WrapMode};
use crate::error::WatchError;
use crate::pipeline::{DrawCall, FrameBuffer, FrameUniforms, Pipeline, Shading};
use crate::procedural::{building_texture, ground_texture, overlay_banner, road_texture};
use crate::sim::buildings::NUM_GROUND_SEGMENTS;
use crate::sim::Simulation;

pub const SKY: Color = Color::new(0.4, 0.6, 0.9);

const ROAD_LIFT: f32 = 0.01;
/// Road width as a fraction of the ground quad.
const ROAD_X_SCALE: f32 = 0.08;
const SKIN_TINT: Color = Color::new(0.9, 0.75, 0.65);
const BEZEL_TINT: Color = Color::new(0.2, 0.2, 0.25);

/// Banner placement in window NDC: centre and half extents.
const OVERLAY_CENTER: Vec3 = Vec3::new(0.79, 0.93, 0.0);
const OVERLAY_HALF: Vec3 = Vec3::new(0.20, 0.06, 1.0);

pub struct SceneTextures {
    pub ground: Texture,
    pub road: Texture,
    pub building: Texture,
    pub bezel: Option<Texture>,
}

impl SceneTextures {
    /// Ground and road share one seeded stream, ground first.
    pub fn generate(ground_seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(ground_seed);
        let ground = ground_texture(&mut rng);
        let road = road_texture(&mut rng);
        Self {
            ground: Texture::from_rgb_image("ground", &ground, WrapMode::Repeat),
            road: Texture::from_rgb_image("road", &road, WrapMode::Repeat),
            building: Texture::from_rgb_image("building", &building_texture(), WrapMode::Repeat),
            bezel: None,
        }
    }

    /// Tries to load a bezel texture. A failed load is logged and the bezel
    /// stays untextured.
    pub fn with_bezel(mut self, path: Option<&Path>) -> Self {
        self.bezel = path.and_then(|p| match Texture::load_from_file(p) {
            Ok(tex) => Some(tex),
            Err(e) => {
                log::warn!("{e}; bezel renders untextured");
                None
            }
        });
        self
    }
}

/// Draws the lit world, the watch and the corner banner into the window's
/// framebuffer.
pub struct SceneRenderer {
    pipeline: Pipeline<FrameBuffer>,
    geometry: GeometrySet,
    textures: SceneTextures,
    overlay: Texture,
}

impl SceneRenderer {
    pub fn new(width: usize, height: usize, textures: SceneTextures, overlay: (&str, &str)) -> Self {
        let (title, subtitle) = overlay;
        Self {
            pipeline: Pipeline::new(width, height),
            geometry: GeometrySet::build(),
            textures,
            overlay: Texture::from_rgba_image(
                "overlay",
                &overlay_banner(title, subtitle),
                WrapMode::ClampToEdge,
            ),
        }
    }

    pub fn pipeline(&self) -> &Pipeline<FrameBuffer> {
        &self.pipeline
    }

    /// The last presented frame.
    pub fn frame(&self) -> Ref<'_, FrameBuffer> {
        self.pipeline.front_buffer().borrow()
    }

    pub fn toggle_depth_test(&self) -> bool {
        let mut states = self.pipeline.states.borrow_mut();
        states.depth_test = !states.depth_test;
        log::info!("Depth test {}", if states.depth_test { "on" } else { "off" });
        states.depth_test
    }

    pub fn toggle_backface_culling(&self) -> bool {
        let mut states = self.pipeline.states.borrow_mut();
        states.backface_culling = !states.backface_culling;
        log::info!(
            "Back-face culling {}",
            if states.backface_culling { "on" } else { "off" }
        );
        states.backface_culling
    }

    /// Renders one frame into the back buffer, sampling `ui` for the watch
    /// face.
    pub fn render(&self, camera: &Camera, sim: &Simulation, ui: &dyn TextureSource) {
        let pose = WatchPose::new(camera.watch_view, camera.eye(), sim.run.bob);
        let lights = pose.lights();
        let uniforms = FrameUniforms {
            view_proj: camera.view_projection(),
            eye: camera.eye(),
            lights: &lights,
        };

        self.pipeline.begin_frame(SKY);
        for call in self.draw_list(sim, &pose, ui) {
            self.pipeline.draw(&call, &uniforms);
        }
        self.draw_overlay();
    }

    pub fn present(&self, window: Option<&mut minifb::Window>) -> Result<(), WatchError> {
        self.pipeline.present(window)
    }

    /// Ground, road, buildings, hand, bezel, then the emissive watch face.
    pub fn draw_list<'a>(
        &'a self,
        sim: &Simulation,
        pose: &WatchPose,
        ui: &'a dyn TextureSource,
    ) -> Vec<DrawCall<'a>> {
        let offset = sim.run.ground_offset;
        let geo = &self.geometry;
        let tex = &self.textures;
        let mut calls = Vec::with_capacity(NUM_GROUND_SEGMENTS * 2 + sim.buildings.len() + 3);

        for i in 0..NUM_GROUND_SEGMENTS {
            let z = offset - i as f32 * GROUND_SEGMENT_LENGTH;
            calls.push(DrawCall {
                mesh: &geo.ground,
                model: Mat4::from_translation(Vec3::new(0.0, 0.0, z)),
                shading: Shading::Lit {
                    material: Material::GRASS,
                    tint: Color::WHITE,
                    texture: Some(&tex.ground),
                },
            });
        }
        for i in 0..NUM_GROUND_SEGMENTS {
            let z = offset - i as f32 * GROUND_SEGMENT_LENGTH;
            calls.push(DrawCall {
                mesh: &geo.ground,
                model: Mat4::from_translation(Vec3::new(0.0, ROAD_LIFT, z))
                    * Mat4::from_scale(Vec3::new(ROAD_X_SCALE, 1.0, 1.0)),
                shading: Shading::Lit {
                    material: Material::CONCRETE,
                    tint: Color::WHITE,
                    texture: Some(&tex.road),
                },
            });
        }
        for building in &sim.buildings {
            calls.push(DrawCall {
                mesh: &geo.cube,
                model: building.model_matrix(offset),
                shading: Shading::Lit {
                    material: Material::CONCRETE,
                    tint: building.color,
                    texture: Some(&tex.building),
                },
            });
        }

        calls.push(DrawCall {
            mesh: &geo.cube,
            model: pose.hand,
            shading: Shading::Lit {
                material: Material::SKIN,
                tint: SKIN_TINT,
                texture: None,
            },
        });
        calls.push(DrawCall {
            mesh: &geo.cube,
            model: pose.bezel,
            shading: Shading::Lit {
                material: Material::BRUSHED_METAL,
                tint: BEZEL_TINT,
                texture: tex.bezel.as_ref().map(|t| t as &dyn TextureSource),
            },
        });
        calls.push(DrawCall {
            mesh: &geo.watch,
            model: pose.screen,
            shading: Shading::emissive(ui),
        });

        calls
    }

    /// Blends the banner over the finished 3D frame, ignoring depth.
    fn draw_overlay(&self) {
        let depth_test = self.pipeline.states.borrow().depth_test;
        self.pipeline.states.borrow_mut().depth_test = false;

        let call = DrawCall {
            mesh: &self.geometry.screen,
            model: Mat4::from_translation(OVERLAY_CENTER) * Mat4::from_scale(OVERLAY_HALF),
            shading: Shading::Emissive {
                texture: Some(&self.overlay),
                tint: Vec4::ONE,
                uv_scale: Vec2::ONE,
                uv_offset: Vec2::ZERO,
            },
        };
        self.pipeline.draw(&call, &FrameUniforms::screen_space());

        self.pipeline.states.borrow_mut().depth_test = depth_test;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{Buffer, RenderTarget};
    use crate::sim::WatchState;

    const W: usize = 64;
    const H: usize = 36;

    fn sim() -> Simulation {
        let mut rng = StdRng::seed_from_u64(1);
        let watch = WatchState::new(8, 0, 0, &mut rng);
        Simulation::from_parts(watch, 42, rng)
    }

    fn solid_ui(color: Color) -> RenderTarget {
        let mut ui = RenderTarget::new(8, 8);
        ui.clear(color);
        ui
    }

    fn renderer() -> SceneRenderer {
        SceneRenderer::new(W, H, SceneTextures::generate(12345), ("TEST", "overlay"))
    }

    fn close(a: Color, b: Color) -> bool {
        (a.r - b.r).abs() < 0.01 && (a.g - b.g).abs() < 0.01 && (a.b - b.b).abs() < 0.01
    }

    #[test]
    fn draw_order_ends_with_the_emissive_face() {
        let scene = renderer();
        let sim = sim();
        let ui = solid_ui(Color::RED);
        let pose = WatchPose::new(false, Vec3::new(0.0, 1.6, 0.0), 0.0);
        let calls = scene.draw_list(&sim, &pose, &ui);
        assert_eq!(calls.len(), 2 * NUM_GROUND_SEGMENTS + 12 + 3);
        assert!(matches!(calls.last().map(|c| &c.shading), Some(Shading::Emissive { .. })));
        assert_eq!(calls[0].mesh.label, "ground");
        assert_eq!(calls[calls.len() - 2].mesh.label, "cube");
    }

    #[test]
    fn watch_view_shows_the_ui_unlit() {
        let scene = renderer();
        let sim = sim();
        let ui = solid_ui(Color::RED);
        let mut camera = Camera::new(W as f32 / H as f32);
        camera.toggle_watch_view();

        scene.render(&camera, &sim, &ui);
        scene.present(None).unwrap();
        assert_eq!(scene.frame().get_pixel((W / 2, H / 2)), Some(Color::RED));
    }

    #[test]
    fn worn_watch_face_is_not_hidden_by_the_bezel() {
        let (w, h) = (320, 180);
        let scene = SceneRenderer::new(w, h, SceneTextures::generate(12345), ("TEST", "overlay"));
        let sim = sim();
        let face = Color::new(1.0, 0.0, 1.0);
        let ui = solid_ui(face);
        let mut camera = Camera::new(w as f32 / h as f32);
        assert!(scene.pipeline().states.borrow().depth_test);

        for pitch in [-45.0, -30.0, -15.0] {
            camera.base_pitch = pitch;
            scene.render(&camera, &sim, &ui);
            scene.present(None).unwrap();
            let frame = scene.frame();
            let visible = (0..h)
                .flat_map(|y| (0..w).map(move |x| (x, y)))
                .filter(|&pos| frame.get_pixel(pos) == Some(face))
                .count();
            assert!(visible > 100, "only {visible} face pixels at pitch {pitch}");
        }
    }

    #[test]
    fn sky_fills_the_top_of_the_frame() {
        let scene = renderer();
        let sim = sim();
        let ui = solid_ui(Color::RED);
        let camera = Camera::new(W as f32 / H as f32);

        scene.render(&camera, &sim, &ui);
        scene.present(None).unwrap();
        let top = scene.frame().get_pixel((W / 2, 0)).unwrap();
        assert!(close(top, SKY), "{top:?}");
        // the road below the horizon
        let bottom = scene.frame().get_pixel((W / 4, H - 1)).unwrap();
        assert!(!close(bottom, SKY));
    }

    #[test]
    fn overlay_restores_depth_state() {
        let scene = renderer();
        scene.render(&Camera::new(1.0), &sim(), &solid_ui(Color::BLACK));
        assert!(scene.pipeline().states.borrow().depth_test);
    }

    #[test]
    fn toggles_flip_pipeline_states() {
        let scene = renderer();
        assert!(!scene.toggle_depth_test());
        assert!(!scene.toggle_backface_culling());
        assert!(scene.toggle_depth_test());
    }

    #[test]
    fn missing_bezel_texture_is_tolerated() {
        let textures = SceneTextures::generate(1).with_bezel(Some(Path::new("/nonexistent/bezel.png")));
        assert!(textures.bezel.is_none());
    }
}
