use super::canvas::Canvas;
use image::{Rgba, RgbaImage};

pub const DIGIT_CELL_WIDTH: u32 = 30;
pub const DIGIT_CELL_HEIGHT: u32 = 50;
const SEGMENT_COLOR: Rgba<u8> = Rgba([200, 230, 255, 255]);
const THICK: i32 = 4;
const MARGIN: i32 = 3;
const COLON_DOT: i32 = 4;

/// Seven-segment patterns for `'0'..='9'`. Bit `i` lights segment `i`:
/// top, upper-left, upper-right, middle, lower-left, lower-right, bottom.
const SEGMENTS: [u8; 10] = [0x77, 0x24, 0x5D, 0x6D, 0x2E, 0x6B, 0x7B, 0x25, 0x7F, 0x6F];

fn draw_segment(canvas: &mut Canvas<Rgba<u8>>, offset_x: i32, segment: usize) {
    let w = DIGIT_CELL_WIDTH as i32;
    let h = DIGIT_CELL_HEIGHT as i32;
    let seg_w = w - 2 * MARGIN;
    let upper = h / 2 + MARGIN / 2..h - MARGIN;
    let lower = MARGIN..h / 2 - MARGIN / 2;

    for t in 0..THICK {
        match segment {
            0 => (MARGIN..MARGIN + seg_w).for_each(|x| canvas.put(offset_x + x, h - MARGIN - t, SEGMENT_COLOR)),
            1 => upper.clone().for_each(|y| canvas.put(offset_x + MARGIN + t, y, SEGMENT_COLOR)),
            2 => upper.clone().for_each(|y| canvas.put(offset_x + w - MARGIN - t, y, SEGMENT_COLOR)),
            3 => (MARGIN..MARGIN + seg_w).for_each(|x| canvas.put(offset_x + x, h / 2 + t - THICK / 2, SEGMENT_COLOR)),
            4 => lower.clone().for_each(|y| canvas.put(offset_x + MARGIN + t, y, SEGMENT_COLOR)),
            5 => lower.clone().for_each(|y| canvas.put(offset_x + w - MARGIN - t, y, SEGMENT_COLOR)),
            6 => (MARGIN..MARGIN + seg_w).for_each(|x| canvas.put(offset_x + x, MARGIN + t, SEGMENT_COLOR)),
            _ => {}
        }
    }
}

fn draw_colon(canvas: &mut Canvas<Rgba<u8>>, offset_x: i32) {
    let h = DIGIT_CELL_HEIGHT as i32;
    let cx = offset_x + DIGIT_CELL_WIDTH as i32 / 2;
    for dy in -COLON_DOT / 2..=COLON_DOT / 2 {
        for dx in -COLON_DOT / 2..=COLON_DOT / 2 {
            canvas.put(cx + dx, h * 3 / 4 + dy, SEGMENT_COLOR);
            canvas.put(cx + dx, h / 4 + dy, SEGMENT_COLOR);
        }
    }
}

/// Renders `text` as seven-segment glyphs on a transparent strip, one
/// 30x50 cell per character. Characters other than digits and `':'` leave
/// their cell blank.
pub fn digit_texture(text: &str) -> RgbaImage {
    let len = text.chars().count() as u32;
    let mut canvas = Canvas::new(DIGIT_CELL_WIDTH * len, DIGIT_CELL_HEIGHT, Rgba([0, 0, 0, 0]));

    for (i, c) in text.chars().enumerate() {
        let offset_x = i as i32 * DIGIT_CELL_WIDTH as i32;
        match c {
            ':' => draw_colon(&mut canvas, offset_x),
            '0'..='9' => {
                let pattern = SEGMENTS[c as usize - '0' as usize];
                (0..7)
                    .filter(|s| pattern & (1 << s) != 0)
                    .for_each(|s| draw_segment(&mut canvas, offset_x, s));
            }
            _ => {}
        }
    }

    canvas.into_image()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(img: &RgbaImage, x: u32, y_up: u32) -> bool {
        img.get_pixel(x, img.height() - 1 - y_up)[3] == 255
    }

    #[test]
    fn eight_lights_every_segment() {
        let img = digit_texture("8");
        assert_eq!((img.width(), img.height()), (30, 50));
        assert!(lit(&img, 15, 46)); // top
        assert!(lit(&img, 15, 24)); // middle
        assert!(lit(&img, 15, 4)); // bottom
        assert!(lit(&img, 4, 35)); // upper-left
        assert!(lit(&img, 26, 10)); // lower-right
    }

    #[test]
    fn one_only_lights_the_right_side() {
        let img = digit_texture("1");
        assert!(!lit(&img, 15, 46));
        assert!(!lit(&img, 4, 35));
        assert!(lit(&img, 26, 35));
        assert!(lit(&img, 26, 10));
    }

    #[test]
    fn colon_and_unknown_characters() {
        let img = digit_texture(":x");
        assert_eq!(img.width(), 60);
        assert!(lit(&img, 15, 37));
        assert!(lit(&img, 15, 12));
        assert!(!lit(&img, 15, 25));
        assert!(img.enumerate_pixels().filter(|(x, _, _)| *x >= 30).all(|(_, _, p)| p[3] == 0));
    }

    #[test]
    fn clock_string_width() {
        assert_eq!(digit_texture("12:34:56").width(), 240);
        assert_eq!(digit_texture("070").width(), 90);
    }
}
