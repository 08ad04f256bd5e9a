use super::canvas::Canvas;
use image::{Rgb, RgbImage};
use rand::Rng;

pub const GROUND_SIZE: u32 = 256;
pub const ROAD_SIZE: u32 = 256;
pub const BUILDING_SIZE: u32 = 128;

const CENTRE_LINE: Rgb<u8> = Rgb([255, 255, 200]);
const CENTRE_LINE_HALF_WIDTH: i32 = 4;
/// Length of one dash (and one gap) of the centre line, in texels.
const DASH_LENGTH: i32 = 32;

const FACADE: Rgb<u8> = Rgb([120, 110, 100]);
const WINDOW: Rgb<u8> = Rgb([180, 200, 220]);

/// Jittered grass. Every texel draws two values from `rng`.
pub fn ground_texture(rng: &mut impl Rng) -> RgbImage {
    let mut canvas = Canvas::new(GROUND_SIZE, GROUND_SIZE, Rgb([0, 0, 0]));
    for y in 0..GROUND_SIZE as i32 {
        for x in 0..GROUND_SIZE as i32 {
            let base: u8 = 60 + rng.gen_range(0..30);
            let green = base + 20 + rng.gen_range(0..20);
            canvas.put(x, y, Rgb([base, green, base - 20]));
        }
    }
    canvas.into_image()
}

/// Grey asphalt with a dashed centre line running along `v`.
pub fn road_texture(rng: &mut impl Rng) -> RgbImage {
    let mut canvas = Canvas::new(ROAD_SIZE, ROAD_SIZE, Rgb([0, 0, 0]));
    for y in 0..ROAD_SIZE as i32 {
        for x in 0..ROAD_SIZE as i32 {
            let base: u8 = 50 + rng.gen_range(0..15);
            canvas.put(x, y, Rgb([base, base, base]));
        }
    }

    let mid = (ROAD_SIZE / 2) as i32;
    for y in (0..ROAD_SIZE as i32).filter(|y| (y / DASH_LENGTH) % 2 == 0) {
        for x in mid - CENTRE_LINE_HALF_WIDTH..mid + CENTRE_LINE_HALF_WIDTH {
            canvas.put(x, y, CENTRE_LINE);
        }
    }
    canvas.into_image()
}

/// Beige facade with a 4x4 grid of 18x20 windows on a 30 px pitch.
pub fn building_texture() -> RgbImage {
    let mut canvas = Canvas::new(BUILDING_SIZE, BUILDING_SIZE, FACADE);
    for wy in 0..4 {
        for wx in 0..4 {
            canvas.fill_rect(8 + wx * 30, 8 + wy * 30, 18, 20, WINDOW);
        }
    }
    canvas.into_image()
}
