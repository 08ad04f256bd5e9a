use glam::{Vec2, Vec4};

use super::screen::{HotRect, Screen, LEFT_ARROW, RIGHT_ARROW};
use crate::sim::WatchState;

/// Textures the UI pass can bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiTexture {
    Time,
    Bpm,
    Battery,
    Ekg,
    ArrowLeft,
    ArrowRight,
    Heart,
}

/// One screen-space quad of the watch UI.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub rect: HotRect,
    /// Multiplied with the texel, or used alone when untextured.
    pub tint: Vec4,
    pub texture: Option<UiTexture>,
    pub uv_scale: Vec2,
    pub uv_offset: Vec2,
}

impl DrawCommand {
    pub fn solid(rect: HotRect, tint: Vec4) -> Self {
        Self {
            rect,
            tint,
            texture: None,
            uv_scale: Vec2::ONE,
            uv_offset: Vec2::ZERO,
        }
    }

    pub fn textured(rect: HotRect, texture: UiTexture) -> Self {
        Self {
            texture: Some(texture),
            ..Self::solid(rect, Vec4::ONE)
        }
    }

    pub fn tinted(mut self, tint: Vec4) -> Self {
        self.tint = tint;
        self
    }
}

pub const UI_CLEAR: [f32; 3] = [0.05, 0.05, 0.1];
pub const CURSOR_HALF: f32 = 0.04;

const PANEL: Vec4 = Vec4::new(0.1, 0.1, 0.15, 1.0);
const OUTLINE: Vec4 = Vec4::new(0.8, 0.8, 0.8, 1.0);
const BPM_TINT: Vec4 = Vec4::new(0.0, 1.0, 0.4, 1.0);
const WARNING: Vec4 = Vec4::new(1.0, 0.0, 0.0, 0.3);

const TIME_RECT: HotRect = HotRect::new(0.0, 0.0, 0.6, 0.15);
const EKG_PANEL_RECT: HotRect = HotRect::new(0.0, -0.1, 0.5, 0.2);
const EKG_RECT: HotRect = HotRect::new(0.0, -0.1, 0.48, 0.18);
const BPM_RECT: HotRect = HotRect::new(0.0, 0.25, 0.2, 0.1);
const FULL_SCREEN: HotRect = HotRect::new(0.0, 0.0, 1.0, 1.0);

const BATTERY_OUTLINE: HotRect = HotRect::new(0.0, 0.0, 0.3, 0.15);
const BATTERY_INNER: HotRect = HotRect::new(0.0, 0.0, 0.28, 0.13);
const BATTERY_CAP: HotRect = HotRect::new(0.32, 0.0, 0.02, 0.06);
const BATTERY_LABEL: HotRect = HotRect::new(0.0, 0.3, 0.15, 0.08);
const BATTERY_FILL_MAX: f32 = 0.26;
const BATTERY_FILL_HALF_HEIGHT: f32 = 0.11;

/// EKG strip repeats `EKG_REPEATS / ekg_scale` times across its panel.
const EKG_REPEATS: f32 = 3.0;

/// Draw list for the current page, back to front.
pub fn draw_commands(state: &WatchState) -> Vec<DrawCommand> {
    match state.current_screen {
        Screen::Clock => clock_screen(),
        Screen::HeartRate => heart_rate_screen(state),
        Screen::Battery => battery_screen(state),
    }
}

fn clock_screen() -> Vec<DrawCommand> {
    vec![
        DrawCommand::textured(TIME_RECT, UiTexture::Time),
        DrawCommand::textured(RIGHT_ARROW, UiTexture::ArrowRight),
    ]
}

fn heart_rate_screen(state: &WatchState) -> Vec<DrawCommand> {
    let repeats = if state.ekg_scale > f32::EPSILON {
        EKG_REPEATS / state.ekg_scale
    } else {
        EKG_REPEATS
    };

    let mut commands = vec![
        DrawCommand::textured(LEFT_ARROW, UiTexture::ArrowLeft),
        DrawCommand::textured(RIGHT_ARROW, UiTexture::ArrowRight),
        DrawCommand::solid(EKG_PANEL_RECT, PANEL),
        DrawCommand {
            uv_scale: Vec2::new(repeats, 1.0),
            uv_offset: Vec2::new(state.ekg_offset, 0.0),
            ..DrawCommand::textured(EKG_RECT, UiTexture::Ekg)
        },
        DrawCommand::textured(BPM_RECT, UiTexture::Bpm).tinted(BPM_TINT),
    ];
    if state.bpm_warning() {
        commands.push(DrawCommand::solid(FULL_SCREEN, WARNING));
    }
    commands
}

pub fn battery_fill_color(percent: u8) -> Vec4 {
    match percent {
        0..=10 => Vec4::new(1.0, 0.2, 0.2, 1.0),
        11..=20 => Vec4::new(1.0, 0.8, 0.0, 1.0),
        _ => Vec4::new(0.2, 0.9, 0.3, 1.0),
    }
}

/// Fill bar anchored at the left edge of the inner panel, or `None` when
/// the battery is empty.
pub fn battery_fill_rect(percent: u8) -> Option<HotRect> {
    let fraction = f32::from(percent.min(100)) / 100.0;
    let half_w = BATTERY_FILL_MAX * fraction;
    (half_w > 0.0).then(|| {
        HotRect::new(
            -(BATTERY_FILL_MAX - half_w),
            0.0,
            half_w,
            BATTERY_FILL_HALF_HEIGHT,
        )
    })
}

fn battery_screen(state: &WatchState) -> Vec<DrawCommand> {
    let mut commands = vec![
        DrawCommand::textured(LEFT_ARROW, UiTexture::ArrowLeft),
        DrawCommand::solid(BATTERY_OUTLINE, OUTLINE),
        DrawCommand::solid(BATTERY_INNER, PANEL),
        DrawCommand::solid(BATTERY_CAP, OUTLINE),
    ];
    if let Some(fill) = battery_fill_rect(state.battery_percent) {
        commands.push(DrawCommand::solid(
            fill,
            battery_fill_color(state.battery_percent),
        ));
    }
    commands.push(DrawCommand::textured(BATTERY_LABEL, UiTexture::Battery));
    commands
}

/// Heart cursor centred on the pointer.
pub fn cursor_command(pointer: Vec2) -> DrawCommand {
    DrawCommand::textured(
        HotRect::new(pointer.x, pointer.y, CURSOR_HALF, CURSOR_HALF),
        UiTexture::Heart,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn state(screen: Screen) -> WatchState {
        let mut w = WatchState::new(10, 0, 0, &mut StdRng::seed_from_u64(0));
        w.current_screen = screen;
        w
    }

    fn textures(cmds: &[DrawCommand]) -> Vec<UiTexture> {
        cmds.iter().filter_map(|c| c.texture).collect()
    }

    #[test]
    fn clock_shows_time_and_right_arrow() {
        let cmds = draw_commands(&state(Screen::Clock));
        assert_eq!(textures(&cmds), vec![UiTexture::Time, UiTexture::ArrowRight]);
    }

    #[test]
    fn heart_rate_warns_above_200() {
        let mut w = state(Screen::HeartRate);
        assert_eq!(draw_commands(&w).len(), 5);
        w.bpm = 201.0;
        let cmds = draw_commands(&w);
        let last = cmds.last().unwrap();
        assert_eq!(last.rect, FULL_SCREEN);
        assert_eq!(last.tint.w, 0.3);
    }

    #[test]
    fn ekg_strip_scrolls_with_offset() {
        let mut w = state(Screen::HeartRate);
        w.ekg_offset = 0.25;
        w.ekg_scale = 0.5;
        let strip = draw_commands(&w)
            .into_iter()
            .find(|c| c.texture == Some(UiTexture::Ekg))
            .unwrap();
        assert_eq!(strip.uv_scale, Vec2::new(6.0, 1.0));
        assert_eq!(strip.uv_offset, Vec2::new(0.25, 0.0));
    }

    #[test]
    fn battery_fill_tracks_percent() {
        let full = battery_fill_rect(100).unwrap();
        assert_eq!(full.center.x, 0.0);
        assert_eq!(full.half.x, BATTERY_FILL_MAX);

        let half = battery_fill_rect(50).unwrap();
        // left edge stays put
        assert!((half.center.x - half.half.x + BATTERY_FILL_MAX).abs() < 1e-6);
        assert!(battery_fill_rect(0).is_none());
    }

    #[test]
    fn battery_colour_thresholds() {
        assert_eq!(battery_fill_color(10).x, 1.0);
        assert_eq!(battery_fill_color(10).y, 0.2);
        assert_eq!(battery_fill_color(20).y, 0.8);
        assert_eq!(battery_fill_color(21).y, 0.9);
    }

    #[test]
    fn empty_battery_draws_no_fill() {
        let mut w = state(Screen::Battery);
        w.battery_percent = 0;
        assert_eq!(draw_commands(&w).len(), 5);
        w.battery_percent = 55;
        assert_eq!(draw_commands(&w).len(), 6);
    }
}
