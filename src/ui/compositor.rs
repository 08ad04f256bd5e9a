use std::cell::Ref;

use glam::{Mat4, Vec2, Vec3};

use super::cache::{DigitSlot, DigitTextureCache};
use super::commands::{cursor_command, draw_commands, DrawCommand, UiTexture, UI_CLEAR};
use super::screen::Screen;
use crate::core::{Color, Mesh, Texture, TextureFilter, TextureSource, WrapMode};
use crate::pipeline::{DrawCall, FrameUniforms, Pipeline, RenderTarget, Shading, States};
use crate::procedural::{arrow_texture, ekg_texture, heart_texture, ArrowDirection};
use crate::sim::WatchState;

/// Pointer state captured for one frame, in window NDC.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerInput {
    pub position: Vec2,
    /// Position of this frame's left-button press, if any. Taken by the
    /// compositor exactly once.
    pub click: Option<Vec2>,
}

impl PointerInput {
    /// Window pixels (y down) to NDC (y up).
    pub fn window_to_ndc(x: f32, y: f32, width: f32, height: f32) -> Vec2 {
        Vec2::new((x / width) * 2.0 - 1.0, -((y / height) * 2.0 - 1.0))
    }
}

/// Static UI textures, generated once.
struct UiTextures {
    ekg: Texture,
    arrow_left: Texture,
    arrow_right: Texture,
    heart: Texture,
}

impl UiTextures {
    fn generate() -> Self {
        let icon = |label: &str, img| {
            Texture::from_rgba_image(label, &img, WrapMode::ClampToEdge)
                .with_filter(TextureFilter::Nearest)
        };
        Self {
            ekg: Texture::from_rgba_image("ekg", &ekg_texture(), WrapMode::Repeat)
                .with_wrap(WrapMode::Repeat, WrapMode::ClampToEdge),
            arrow_left: icon("arrow/left", arrow_texture(ArrowDirection::Left)),
            arrow_right: icon("arrow/right", arrow_texture(ArrowDirection::Right)),
            heart: icon("heart", heart_texture()),
        }
    }
}

/// Renders the watch UI into an off-screen square target each frame.
///
/// The pipeline is double buffered: the back target is drawn, then swapped
/// to the front, so [`WatchCompositor::target`] always holds a finished
/// frame for the scene pass to sample.
pub struct WatchCompositor {
    pipeline: Pipeline<RenderTarget>,
    quad: Mesh,
    digits: DigitTextureCache,
    textures: UiTextures,
}

impl WatchCompositor {
    pub fn new(size: usize) -> Self {
        let pipeline = Pipeline::from_buffers(
            RenderTarget::square_or_fallback(size),
            RenderTarget::square_or_fallback(size),
        )
        .with_states(States {
            depth_test: false,
            backface_culling: false,
        });
        log::debug!("Watch UI target {}x{}", pipeline.width, pipeline.height);
        Self {
            pipeline,
            quad: Mesh::screen_quad(),
            digits: DigitTextureCache::new(),
            textures: UiTextures::generate(),
        }
    }

    /// The last finished UI frame.
    pub fn target(&self) -> Ref<'_, RenderTarget> {
        self.pipeline.front_buffer().borrow()
    }

    pub fn digits(&self) -> &DigitTextureCache {
        &self.digits
    }

    /// Draws the page `state` is on and resolves this frame's click, which
    /// is consumed whether or not it hits an arrow. Returns the page to show
    /// next frame.
    pub fn render(
        &mut self,
        state: &WatchState,
        pointer: &mut PointerInput,
        watch_view: bool,
    ) -> Screen {
        self.digits.refresh_all(state);

        let [r, g, b] = UI_CLEAR;
        self.pipeline.begin_frame(Color::new(r, g, b));

        let mut commands = draw_commands(state);
        if watch_view {
            commands.push(cursor_command(pointer.position));
        }
        for command in &commands {
            self.draw(command);
        }
        self.pipeline.swap_buffers();

        let click = pointer.click.take();
        state.current_screen.navigate(click, watch_view)
    }

    fn texture(&self, texture: UiTexture) -> &dyn TextureSource {
        match texture {
            UiTexture::Time => self.digits.texture(DigitSlot::Time),
            UiTexture::Bpm => self.digits.texture(DigitSlot::Bpm),
            UiTexture::Battery => self.digits.texture(DigitSlot::Battery),
            UiTexture::Ekg => &self.textures.ekg,
            UiTexture::ArrowLeft => &self.textures.arrow_left,
            UiTexture::ArrowRight => &self.textures.arrow_right,
            UiTexture::Heart => &self.textures.heart,
        }
    }

    fn draw(&self, command: &DrawCommand) {
        let rect = command.rect;
        let model = Mat4::from_translation(rect.center.extend(0.0))
            * Mat4::from_scale(Vec3::new(rect.half.x, rect.half.y, 1.0));
        let call = DrawCall {
            mesh: &self.quad,
            model,
            shading: Shading::Emissive {
                texture: command.texture.map(|t| self.texture(t)),
                tint: command.tint,
                uv_scale: command.uv_scale,
                uv_offset: command.uv_offset,
            },
        };
        self.pipeline.draw(&call, &FrameUniforms::screen_space());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::Buffer;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn state(screen: Screen) -> WatchState {
        let mut w = WatchState::new(9, 30, 0, &mut StdRng::seed_from_u64(5));
        w.current_screen = screen;
        w
    }

    #[test]
    fn window_coordinates_map_to_ndc() {
        assert_eq!(PointerInput::window_to_ndc(0.0, 0.0, 200.0, 100.0), Vec2::new(-1.0, 1.0));
        assert_eq!(PointerInput::window_to_ndc(200.0, 100.0, 200.0, 100.0), Vec2::new(1.0, -1.0));
        assert_eq!(PointerInput::window_to_ndc(100.0, 50.0, 200.0, 100.0), Vec2::ZERO);
    }

    #[test]
    fn click_is_consumed_once() {
        let mut ui = WatchCompositor::new(64);
        let w = state(Screen::Clock);
        let mut pointer = PointerInput {
            position: Vec2::new(0.8, 0.0),
            click: Some(Vec2::new(0.8, 0.0)),
        };
        assert_eq!(ui.render(&w, &mut pointer, true), Screen::HeartRate);
        assert!(pointer.click.is_none());
        assert_eq!(ui.render(&w, &mut pointer, true), Screen::Clock);
    }

    #[test]
    fn click_outside_watch_view_is_still_consumed() {
        let mut ui = WatchCompositor::new(32);
        let mut pointer = PointerInput {
            position: Vec2::ZERO,
            click: Some(Vec2::new(0.8, 0.0)),
        };
        assert_eq!(ui.render(&state(Screen::Clock), &mut pointer, false), Screen::Clock);
        assert!(pointer.click.is_none());
    }

    #[test]
    fn background_is_cleared_and_panels_drawn() {
        let mut ui = WatchCompositor::new(64);
        let mut pointer = PointerInput::default();
        ui.render(&state(Screen::Battery), &mut pointer, false);
        let target = ui.target();
        // a corner is untouched background
        assert_eq!(target.get_pixel((0, 0)), Some(Color::new(0.05, 0.05, 0.1)));
        // battery outline top edge, between outline and inner panel
        let outline = target.get_pixel((32, 64 * 43 / 100)).unwrap();
        assert!((outline.r - 0.8).abs() < 1e-5);
    }

    #[test]
    fn warning_tints_the_whole_face() {
        let mut ui = WatchCompositor::new(32);
        let mut w = state(Screen::HeartRate);
        w.bpm = 210.0;
        ui.render(&w, &mut PointerInput::default(), false);
        let corner = ui.target().get_pixel((0, 0)).unwrap();
        assert!((corner.r - (0.05 * 0.7 + 0.3)).abs() < 1e-5);
    }

    #[test]
    fn digits_regenerate_only_on_change() {
        let mut ui = WatchCompositor::new(16);
        let w = state(Screen::Clock);
        let mut pointer = PointerInput::default();
        ui.render(&w, &mut pointer, false);
        ui.render(&w, &mut pointer, false);
        assert_eq!(ui.digits().regenerations(DigitSlot::Time), 1);
    }
}
