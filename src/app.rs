use std::time::{Duration, Instant};

use glam::Vec2;
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Scale, Window, WindowOptions};

use crate::config::Config;
use crate::core::Camera;
use crate::error::WatchError;
use crate::render::{SceneRenderer, SceneTextures};
use crate::sim::Simulation;
use crate::ui::{PointerInput, WatchCompositor};
use crate::Metrics;

/// Everything the input layer staged for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    /// Pointer in window NDC.
    pub pointer: Vec2,
    /// Pointer position of a left-button press that started this frame.
    pub click: Option<Vec2>,
    /// Vertical mouse travel in pixels, positive upwards.
    pub pitch_delta: f32,
    pub run_held: bool,
    pub toggle_watch_view: bool,
    pub toggle_depth_test: bool,
    pub toggle_backface_culling: bool,
}

/// The frame driver's state, free of any window so it can run headless.
pub struct WatchApp {
    pub camera: Camera,
    pub sim: Simulation,
    pub ui: WatchCompositor,
    pub scene: SceneRenderer,
}

impl WatchApp {
    pub fn new(config: &Config) -> Self {
        let textures = SceneTextures::generate(config.ground_seed)
            .with_bezel(config.bezel_texture.as_deref());
        let subtitle = config.overlay_subtitle();
        let scene = SceneRenderer::new(
            config.width,
            config.height,
            textures,
            (config.overlay_text.as_str(), subtitle.as_str()),
        );
        Self::from_parts(
            Camera::new(config.width as f32 / config.height.max(1) as f32),
            Simulation::new(config.building_seed),
            WatchCompositor::new(config.ui_size),
            scene,
        )
    }

    pub fn from_parts(
        camera: Camera,
        sim: Simulation,
        ui: WatchCompositor,
        scene: SceneRenderer,
    ) -> Self {
        Self {
            camera,
            sim,
            ui,
            scene,
        }
    }

    /// One frame: apply input, advance the world, draw the watch UI, then
    /// draw the scene around it. Presenting is left to the caller.
    pub fn step(&mut self, dt: f32, input: FrameInput) {
        if input.toggle_watch_view {
            let on = self.camera.toggle_watch_view();
            log::info!("Watch view {}", if on { "on" } else { "off" });
        }
        if input.toggle_depth_test {
            self.scene.toggle_depth_test();
        }
        if input.toggle_backface_culling {
            self.scene.toggle_backface_culling();
        }
        self.camera.apply_mouse_pitch(input.pitch_delta);

        self.sim.update(dt, input.run_held);
        self.camera.bob = self.sim.run.bob;

        let mut pointer = PointerInput {
            position: input.pointer,
            click: input.click,
        };
        let next = self
            .ui
            .render(&self.sim.watch, &mut pointer, self.camera.watch_view);
        self.sim.watch.current_screen = next;

        let ui = self.ui.target();
        self.scene.render(&self.camera, &self.sim, &*ui);
    }
}

/// Sleeps off whatever is left of the frame budget.
pub struct FrameLimiter {
    budget: Duration,
}

impl FrameLimiter {
    pub fn new(fps: u32) -> Self {
        Self {
            budget: Duration::from_secs_f64(1.0 / f64::from(fps.max(1))),
        }
    }

    pub fn remaining(&self, elapsed: Duration) -> Option<Duration> {
        self.budget.checked_sub(elapsed).filter(|d| !d.is_zero())
    }

    pub fn wait(&self, frame_start: Instant) {
        if let Some(rest) = self.remaining(frame_start.elapsed()) {
            std::thread::sleep(rest);
        }
    }
}

/// Reports a button only on the frame it goes down.
#[derive(Debug, Default, Clone, Copy)]
struct ButtonEdge {
    was_down: bool,
}

impl ButtonEdge {
    fn pressed(&mut self, down: bool) -> bool {
        let pressed = down && !self.was_down;
        self.was_down = down;
        pressed
    }
}

/// Polls minifb once per frame and turns edges into one-shot flags.
#[derive(Default)]
struct WindowInput {
    last_mouse: Option<(f32, f32)>,
    left_button: ButtonEdge,
}

impl WindowInput {
    fn poll(&mut self, window: &Window) -> FrameInput {
        let (w, h) = window.get_size();
        let mouse = window.get_mouse_pos(MouseMode::Pass).or(self.last_mouse);
        let pointer = mouse
            .map(|(x, y)| PointerInput::window_to_ndc(x, y, w.max(1) as f32, h.max(1) as f32))
            .unwrap_or(Vec2::ZERO);

        // window y grows downwards
        let pitch_delta = match (self.last_mouse, mouse) {
            (Some((_, last_y)), Some((_, y))) => last_y - y,
            _ => 0.0,
        };
        self.last_mouse = mouse;

        let click = self
            .left_button
            .pressed(window.get_mouse_down(MouseButton::Left))
            .then_some(pointer);

        FrameInput {
            pointer,
            click,
            pitch_delta,
            run_held: window.is_key_down(Key::D),
            toggle_watch_view: window.is_key_pressed(Key::Space, KeyRepeat::No),
            toggle_depth_test: window.is_key_pressed(Key::F1, KeyRepeat::No),
            toggle_backface_culling: window.is_key_pressed(Key::F2, KeyRepeat::No),
        }
    }
}

/// Opens the window and drives frames until it closes or ESC is pressed.
pub fn run(config: &Config) -> Result<(), WatchError> {
    let mut window = Window::new(
        "SmartWatch 3D",
        config.width,
        config.height,
        WindowOptions {
            resize: false,
            scale: Scale::X1,
            ..WindowOptions::default()
        },
    )
    .map_err(|e| WatchError::Window(e.to_string()))?;

    let mut app = WatchApp::new(config);
    let mut input = WindowInput::default();
    let mut metrics = Metrics::new();
    let limiter = FrameLimiter::new(config.fps);
    log::info!(
        "Running at {}x{}, {} fps cap, UI {}px",
        config.width,
        config.height,
        config.fps,
        config.ui_size
    );

    while window.is_open() && !window.is_key_down(Key::Escape) {
        let frame_start = Instant::now();
        let dt = frame_start - metrics.last_frame;
        metrics.last_frame = frame_start;

        let frame_input = input.poll(&window);
        app.step(dt.as_secs_f32(), frame_input);
        app.scene.present(Some(&mut window))?;

        if metrics.update(dt) {
            log::debug!("{metrics}");
            metrics.reset_window();
        }
        limiter.wait(frame_start);
    }

    log::info!("Window closed");
    Ok(())
}
