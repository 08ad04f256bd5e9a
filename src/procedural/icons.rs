use super::canvas::Canvas;
use image::{Rgba, RgbaImage};

pub const ARROW_SIZE: u32 = 64;
pub const HEART_SIZE: u32 = 32;
const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);
const ARROW_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);
const HEART_COLOR: Rgba<u8> = Rgba([255, 50, 80, 255]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowDirection {
    Left,
    Right,
}

/// A white shaft from x = 15 to 49 with a 15 px head, 7 px thick.
pub fn arrow_texture(direction: ArrowDirection) -> RgbaImage {
    let mut canvas = Canvas::new(ARROW_SIZE, ARROW_SIZE, CLEAR);
    let cy = (ARROW_SIZE / 2) as i32;

    for thickness in -3..=3 {
        for x in 15..50 {
            canvas.put(x, cy + thickness, ARROW_COLOR);
        }
        for i in 0..15 {
            let x = match direction {
                ArrowDirection::Right => 49 - i,
                ArrowDirection::Left => 15 + i,
            };
            canvas.put(x, cy - i + thickness, ARROW_COLOR);
            canvas.put(x, cy + i + thickness, ARROW_COLOR);
        }
    }

    canvas.into_image()
}

/// Filled heart from the implicit curve `(x^2 + y^2 - 0.5)^3 - x^2 y^3 < 0`.
pub fn heart_texture() -> RgbaImage {
    let mut canvas = Canvas::new(HEART_SIZE, HEART_SIZE, CLEAR);
    let half = (HEART_SIZE / 2) as i32;

    for y in 0..HEART_SIZE as i32 {
        for x in 0..HEART_SIZE as i32 {
            let fx = (x - half) as f32 / half as f32;
            let fy = (y - half) as f32 / half as f32;
            let val = (fx * fx + fy * fy - 0.5).powi(3) - fx * fx * fy * fy * fy;
            if val < 0.0 {
                canvas.put(x, y, HEART_COLOR);
            }
        }
    }

    canvas.into_image()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alpha_at(img: &RgbaImage, x: u32, y_up: u32) -> u8 {
        img.get_pixel(x, img.height() - 1 - y_up)[3]
    }

    #[test]
    fn arrows_mirror_each_other() {
        let right = arrow_texture(ArrowDirection::Right);
        let left = arrow_texture(ArrowDirection::Left);
        // the head of the right arrow flares out near x = 49 - 14
        assert_eq!(alpha_at(&right, 35, 32 + 14), 255);
        assert_eq!(alpha_at(&left, 35, 32 + 14), 0);
        assert_eq!(alpha_at(&left, 29, 32 + 14), 255);
        // shaft is shared
        assert_eq!(alpha_at(&right, 30, 32), 255);
        assert_eq!(alpha_at(&left, 30, 32), 255);
        assert_eq!(alpha_at(&right, 5, 5), 0);
    }

    #[test]
    fn heart_is_filled_in_the_middle_and_clear_at_corners() {
        let heart = heart_texture();
        assert_eq!(alpha_at(&heart, 16, 16), 255);
        assert_eq!(heart.get_pixel(16, 15).0, [255, 50, 80, 255]);
        assert_eq!(alpha_at(&heart, 0, 0), 0);
        assert_eq!(alpha_at(&heart, 31, 31), 0);
    }
}
