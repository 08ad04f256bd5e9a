use chrono::Timelike;
use rand::Rng;

use crate::ui::Screen;

pub const INITIAL_BPM: f32 = 70.0;
pub const MAX_BPM: f32 = 220.0;
/// BPM above which the HeartRate screen flashes a warning.
pub const WARNING_BPM: f32 = 200.0;
/// Seconds of elapsed time per 1% of battery.
pub const BATTERY_DRAIN_INTERVAL: f32 = 10.0;

const BPM_RISE_PER_SEC: f32 = 30.0;
const BPM_FALL_PER_SEC: f32 = 20.0;
const BPM_CONVERGENCE: f32 = 2.0;
const EKG_SPEED: f32 = 0.5;

/// Everything the watch face displays. Advanced once per frame by
/// [`WatchState::update`] and read by the UI compositor.
#[derive(Debug, Clone, PartialEq)]
pub struct WatchState {
    pub current_screen: Screen,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    pub bpm: f32,
    pub target_bpm: f32,
    /// Where `target_bpm` settles while not running, in `[60, 80)`.
    pub resting_bpm: f32,
    /// Horizontal scroll of the EKG strip, always in `[0, 1)`.
    pub ekg_offset: f32,
    /// Seconds per beat, smoothed.
    pub ekg_scale: f32,
    pub is_running: bool,
    pub battery_percent: u8,
    clock_accumulator: f32,
    battery_accumulator: f32,
}

impl WatchState {
    pub fn new(hours: u32, minutes: u32, seconds: u32, rng: &mut impl Rng) -> Self {
        Self {
            current_screen: Screen::Clock,
            hours: hours % 24,
            minutes: minutes % 60,
            seconds: seconds % 60,
            bpm: INITIAL_BPM,
            target_bpm: INITIAL_BPM,
            resting_bpm: draw_resting_bpm(rng),
            ekg_offset: 0.0,
            ekg_scale: 60.0 / INITIAL_BPM,
            is_running: false,
            battery_percent: 100,
            clock_accumulator: 0.0,
            battery_accumulator: 0.0,
        }
    }

    /// Starts the clock from the local wall-clock time.
    pub fn from_local_time(rng: &mut impl Rng) -> Self {
        let now = chrono::Local::now();
        log::info!("Watch clock starts at {}", now.format("%H:%M:%S"));
        Self::new(now.hour(), now.minute(), now.second(), rng)
    }

    pub fn time_string(&self) -> String {
        format!("{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }

    pub fn bpm_string(&self) -> String {
        format!("{:03}", self.bpm.max(0.0) as u32)
    }

    pub fn battery_string(&self) -> String {
        format!("{:03}", self.battery_percent)
    }

    pub fn bpm_warning(&self) -> bool {
        self.bpm > WARNING_BPM
    }

    /// Advances the watch by `dt` seconds. `running` is whether the figure is
    /// running this frame.
    pub fn update(&mut self, dt: f32, running: bool, rng: &mut impl Rng) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        self.update_clock(dt);
        self.update_heart_rate(dt, running, rng);
        self.update_battery(dt);
    }

    fn update_clock(&mut self, dt: f32) {
        self.clock_accumulator += dt;
        while self.clock_accumulator >= 1.0 {
            self.clock_accumulator -= 1.0;
            self.tick_second();
        }
    }

    fn tick_second(&mut self) {
        self.seconds += 1;
        if self.seconds >= 60 {
            self.seconds = 0;
            self.minutes += 1;
            if self.minutes >= 60 {
                self.minutes = 0;
                self.hours = (self.hours + 1) % 24;
            }
        }
    }

    fn update_heart_rate(&mut self, dt: f32, running: bool, rng: &mut impl Rng) {
        if self.is_running && !running {
            self.resting_bpm = draw_resting_bpm(rng);
            log::debug!("Stopped running, resting BPM now {:.1}", self.resting_bpm);
        }
        self.is_running = running;

        self.target_bpm = if running {
            (self.target_bpm + BPM_RISE_PER_SEC * dt).min(MAX_BPM)
        } else {
            (self.target_bpm - BPM_FALL_PER_SEC * dt).max(self.resting_bpm)
        };

        self.bpm += (self.target_bpm - self.bpm) * BPM_CONVERGENCE * dt;

        let offset = (self.ekg_offset + self.bpm / 60.0 * dt * EKG_SPEED).rem_euclid(1.0);
        self.ekg_offset = if offset < 1.0 { offset } else { 0.0 };

        if self.bpm > 0.0 {
            self.ekg_scale += (60.0 / self.bpm - self.ekg_scale) * BPM_CONVERGENCE * dt;
        }
    }

    fn update_battery(&mut self, dt: f32) {
        if self.battery_percent == 0 {
            return;
        }
        self.battery_accumulator += dt;
        while self.battery_accumulator >= BATTERY_DRAIN_INTERVAL && self.battery_percent > 0 {
            self.battery_accumulator -= BATTERY_DRAIN_INTERVAL;
            self.battery_percent -= 1;
        }
    }
}

fn draw_resting_bpm(rng: &mut impl Rng) -> f32 {
    rng.gen_range(60..80) as f32
}
