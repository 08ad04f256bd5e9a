//! Per-frame world update: watch readings, running motion and the building
//! rows. Nothing in here touches the renderer.

pub mod buildings;
pub mod motion;
pub mod watch;

pub use buildings::{generate_buildings, wrapped_z, Building};
pub use motion::RunState;
pub use watch::WatchState;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::ui::Screen;

/// The simulation context owned by the frame driver.
pub struct Simulation {
    pub watch: WatchState,
    pub run: RunState,
    pub buildings: Vec<Building>,
    rng: StdRng,
}

impl Simulation {
    /// Buildings come from `building_seed`; the resting heart rate from an
    /// independent entropy-seeded stream.
    pub fn new(building_seed: u64) -> Self {
        let mut rng = StdRng::from_entropy();
        let watch = WatchState::from_local_time(&mut rng);
        Self::from_parts(watch, building_seed, rng)
    }

    pub fn from_parts(watch: WatchState, building_seed: u64, rng: StdRng) -> Self {
        let buildings = generate_buildings(&mut StdRng::seed_from_u64(building_seed));
        Self {
            watch,
            run: RunState::default(),
            buildings,
            rng,
        }
    }

    /// Running only counts while the run key is held on the HeartRate screen.
    pub fn update(&mut self, dt: f32, run_held: bool) {
        let running = run_held && self.watch.current_screen == Screen::HeartRate;
        self.run.update(dt, running);
        self.watch.update(dt, running, &mut self.rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sim() -> Simulation {
        let mut rng = StdRng::seed_from_u64(3);
        let watch = WatchState::new(12, 0, 0, &mut rng);
        Simulation::from_parts(watch, 42, rng)
    }

    #[test]
    fn run_key_is_ignored_off_the_heart_rate_screen() {
        let mut sim = sim();
        for _ in 0..60 {
            sim.update(1.0 / 60.0, true);
        }
        assert!(!sim.watch.is_running);
        assert_eq!(sim.run.ground_offset, 0.0);
    }

    #[test]
    fn run_key_moves_the_world_on_heart_rate() {
        let mut sim = sim();
        sim.watch.current_screen = Screen::HeartRate;
        for _ in 0..60 {
            sim.update(1.0 / 60.0, true);
        }
        assert!(sim.watch.is_running);
        assert!(sim.run.ground_offset > 7.0);
        assert!(sim.watch.target_bpm > 90.0);
    }
}
