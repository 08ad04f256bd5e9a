use crate::core::geometry::GROUND_SEGMENT_LENGTH;

/// Forward speed of the figure, world units per second.
pub const RUN_SPEED: f32 = 8.0;
/// Peak vertical bob while running.
pub const BOB_AMPLITUDE: f32 = 0.05;
/// Per-frame decay applied to the bob once running stops.
const BOB_DAMPING: f32 = 0.9;

/// Running phase, camera bob and the scroll offset of the world.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunState {
    pub run_time: f32,
    pub bob: f32,
    /// Scroll of the ground under the figure, in `[0, GROUND_SEGMENT_LENGTH)`.
    pub ground_offset: f32,
}

impl RunState {
    pub fn update(&mut self, dt: f32, running: bool) {
        if running {
            self.run_time += RUN_SPEED * dt;
            self.bob = BOB_AMPLITUDE * self.run_time.sin();
            self.ground_offset = (self.ground_offset + RUN_SPEED * dt).rem_euclid(GROUND_SEGMENT_LENGTH);
        } else {
            self.bob *= BOB_DAMPING;
        }
    }
}
