use std::{
    fmt::Display,
    time::{Duration, Instant},
};

pub mod app;
pub mod config;
pub mod core;
pub mod error;
pub mod pipeline;
pub mod procedural;
pub mod render;
pub mod sim;
pub mod ui;

pub use crate::core::Camera;
pub use crate::core::Color;
pub use config::Config;
pub use error::WatchError;

/// How often the FPS figure is refreshed.
const FPS_WINDOW: Duration = Duration::from_secs(1);

pub struct Metrics {
    pub last_frame: Instant,
    pub frame_time: Duration,
    pub fps_counter: u32,
    pub fps_update_timer: Instant,
    pub current_fps: f32,
    pub frame_times: Vec<f32>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
impl Metrics {
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            frame_time: Duration::from_secs_f32(1.0 / 75.0),
            fps_counter: 0,
            fps_update_timer: Instant::now(),
            current_fps: 0.0,
            frame_times: Vec::with_capacity(120),
        }
    }

    /// Records a frame. Returns true once per second, after the FPS and
    /// frame time averages have been refreshed.
    pub fn update(&mut self, frame_delta: Duration) -> bool {
        self.fps_counter += 1;
        self.frame_times.push(frame_delta.as_secs_f32() * 1000.0);

        let elapsed = self.fps_update_timer.elapsed();
        if elapsed < FPS_WINDOW {
            return false;
        }
        self.refresh(elapsed);
        true
    }

    fn refresh(&mut self, elapsed: Duration) {
        self.current_fps = self.fps_counter as f32 / elapsed.as_secs_f32();
        self.frame_time = elapsed / self.fps_counter.max(1);
        self.fps_counter = 0;
        self.fps_update_timer = Instant::now();
    }

    /// Forgets the min/max window after it has been reported.
    pub fn reset_window(&mut self) {
        self.frame_times.clear();
    }
}
impl Display for Metrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "FPS: {:.2} | Avg: {:.2}ms | Min: {:.2}ms | Max: {:.2}ms",
            self.current_fps,
            self.frame_time.as_secs_f32() * 1000.0,
            self.frame_times
                .iter()
                .copied()
                .reduce(f32::min)
                .unwrap_or(0.0),
            self.frame_times
                .iter()
                .copied()
                .reduce(f32::max)
                .unwrap_or(0.0)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_report_after_a_second() {
        let mut metrics = Metrics::new();
        assert!(!metrics.update(Duration::from_millis(10)));
        metrics.fps_update_timer = Instant::now() - Duration::from_secs(2);
        metrics.fps_counter = 99;
        assert!(metrics.update(Duration::from_millis(30)));
        assert!((metrics.current_fps - 50.0).abs() < 1.0);
        assert_eq!(metrics.fps_counter, 0);
        let line = metrics.to_string();
        assert!(line.contains("Min: 10.00ms"), "{line}");
        assert!(line.contains("Max: 30.00ms"), "{line}");
    }
}
