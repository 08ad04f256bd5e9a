use super::canvas::Canvas;
use image::{Rgba, RgbaImage};
use std::f32::consts::PI;

pub const EKG_WIDTH: u32 = 256;
pub const EKG_HEIGHT: u32 = 128;
/// Consecutive samples are joined by a span this many pixels either side.
const TRACE_HALF_WIDTH: i32 = 2;
const TRACE: Rgba<u8> = Rgba([0, 255, 0, 255]);
const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Vertical displacement (pixels, up is positive) of one heartbeat at
/// phase `t` in `[0, 1)`.
pub fn ekg_displacement(t: f32) -> f32 {
    let bump = |start: f32, len: f32, amplitude: f32| amplitude * ((t - start) / len * PI).sin();
    match t {
        t if t < 0.10 => 0.0,
        // P wave
        t if t < 0.15 => bump(0.10, 0.05, 10.0),
        t if t < 0.25 => 0.0,
        // Q
        t if t < 0.30 => bump(0.25, 0.05, -8.0),
        // R: linear up then down
        t if t < 0.40 => {
            let local = (t - 0.30) / 0.10;
            if local < 0.5 {
                50.0 * local * 2.0
            } else {
                50.0 * (1.0 - (local - 0.5) * 2.0)
            }
        }
        // S
        t if t < 0.48 => bump(0.40, 0.08, -15.0),
        // T wave
        t if t < 0.65 => bump(0.48, 0.17, 15.0),
        _ => 0.0,
    }
}

/// One heartbeat on a transparent strip, meant to be repeated horizontally.
pub fn ekg_texture() -> RgbaImage {
    let mut canvas = Canvas::new(EKG_WIDTH, EKG_HEIGHT, CLEAR);
    let baseline = (EKG_HEIGHT / 2) as i32;
    let mut last_y = baseline;

    for x in 0..EKG_WIDTH as i32 {
        let t = x as f32 / EKG_WIDTH as f32;
        let y = baseline + ekg_displacement(t) as i32;
        for yy in last_y.min(y)..=last_y.max(y) {
            for dx in -TRACE_HALF_WIDTH..=TRACE_HALF_WIDTH {
                canvas.put(x + dx, yy, TRACE);
            }
        }
        last_y = y;
    }

    canvas.into_image()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displacement_windows() {
        assert_eq!(ekg_displacement(0.05), 0.0);
        assert!((ekg_displacement(0.125) - 10.0).abs() < 1e-3);
        assert_eq!(ekg_displacement(0.2), 0.0);
        assert!((ekg_displacement(0.275) + 8.0).abs() < 1e-3);
        assert!((ekg_displacement(0.35) - 50.0).abs() < 1e-3);
        assert!((ekg_displacement(0.44) + 15.0).abs() < 1e-3);
        assert!(ekg_displacement(0.565) > 14.9);
        assert_eq!(ekg_displacement(0.9), 0.0);
    }

    #[test]
    fn trace_stays_within_the_waveform_envelope() {
        let img = ekg_texture();
        assert_eq!((img.width(), img.height()), (EKG_WIDTH, EKG_HEIGHT));
        let baseline = (EKG_HEIGHT / 2) as i32;
        let mut canvas = Canvas::new(EKG_WIDTH, EKG_HEIGHT, CLEAR);
        for (x, row, px) in img.enumerate_pixels() {
            canvas.put(x as i32, (EKG_HEIGHT - 1 - row) as i32, *px);
        }
        // baseline is drawn at the left edge, the R peak reaches high up
        assert_eq!(canvas.get(0, baseline), Some(TRACE));
        assert!((0..EKG_WIDTH as i32).any(|x| canvas.get(x, baseline + 45) == Some(TRACE)));
        // nothing dips below the S wave
        assert!((0..EKG_WIDTH as i32).all(|x| canvas.get(x, baseline - 16) == Some(CLEAR)));
        // corners are transparent
        assert_eq!(canvas.get(0, EKG_HEIGHT as i32 - 1), Some(CLEAR));
    }
}
