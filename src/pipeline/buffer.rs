use crate::core::Color;
use crate::error::WatchError;
use minifb::Window;
use rayon::slice::ParallelSliceMut;
use rayon::iter::ParallelIterator;

/// A 2D color target the fragment stage writes into. Row 0 is the top row.
pub trait Buffer {
    fn new(width: usize, height: usize) -> Self
    where
        Self: Sized;
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn clear(&mut self, color: Color);
    /// Opaque write. When `depth_test` is set the fragment must be strictly
    /// nearer than what is stored; targets without depth ignore it.
    fn set_pixel(&mut self, pos: (usize, usize), depth: f32, color: Color, depth_test: bool);
    /// Source-over blend. Tests depth like `set_pixel` but never writes it.
    fn blend_pixel(
        &mut self,
        pos: (usize, usize),
        depth: f32,
        color: Color,
        alpha: f32,
        depth_test: bool,
    );
    fn get_pixel(&self, pos: (usize, usize)) -> Option<Color>;
}

/// The on-screen framebuffer, stored in minifb's `0x00RRGGBB` layout.
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u32>,
    pub depth: Vec<f32>,
}

impl FrameBuffer {
    #[inline]
    fn index(&self, pos: (usize, usize)) -> Option<usize> {
        (pos.0 < self.width && pos.1 < self.height).then(|| pos.0 + pos.1 * self.width)
    }

    pub fn present_window(&self, window: &mut Window) -> Result<(), WatchError> {
        window.update_with_buffer(&self.data, self.width, self.height)?;
        Ok(())
    }
}

impl Buffer for FrameBuffer {
    fn new(width: usize, height: usize) -> Self {
        let buf_size = width * height;
        FrameBuffer {
            width,
            height,
            data: vec![0; buf_size],
            depth: vec![f32::INFINITY; buf_size],
        }
    }

    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn clear(&mut self, color: Color) {
        let packed = color.to_u32();
        self.data.par_chunks_mut(1024).for_each(|chunk| chunk.fill(packed));
        self.depth
            .par_chunks_mut(1024)
            .for_each(|chunk| chunk.fill(f32::INFINITY));
    }

    fn set_pixel(&mut self, pos: (usize, usize), depth: f32, color: Color, depth_test: bool) {
        if let Some(index) = self.index(pos) {
            if !depth_test || depth < self.depth[index] {
                self.data[index] = color.to_u32();
                self.depth[index] = depth;
            }
        }
    }

    fn blend_pixel(
        &mut self,
        pos: (usize, usize),
        depth: f32,
        color: Color,
        alpha: f32,
        depth_test: bool,
    ) {
        if let Some(index) = self.index(pos) {
            if depth_test && depth >= self.depth[index] {
                return;
            }
            let dst = Color::from_u32(self.data[index]);
            self.data[index] = color.blend_over(&dst, alpha).to_u32();
        }
    }

    fn get_pixel(&self, pos: (usize, usize)) -> Option<Color> {
        self.index(pos).map(|i| Color::from_u32(self.data[i]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_test_keeps_nearest() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.clear(Color::BLACK);
        fb.set_pixel((1, 1), 0.5, Color::RED, true);
        fb.set_pixel((1, 1), 0.8, Color::GREEN, true);
        assert_eq!(fb.get_pixel((1, 1)), Some(Color::RED));
        // without the test the later write wins
        fb.set_pixel((1, 1), 0.8, Color::GREEN, false);
        assert_eq!(fb.get_pixel((1, 1)), Some(Color::GREEN));
    }

    #[test]
    fn out_of_bounds_writes_are_dropped() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.set_pixel((5, 0), 0.0, Color::RED, false);
        assert_eq!(fb.get_pixel((5, 0)), None);
        assert!(fb.data.iter().all(|&p| p == 0));
    }

    #[test]
    fn blending_does_not_write_depth() {
        let mut fb = FrameBuffer::new(1, 1);
        fb.clear(Color::BLACK);
        fb.blend_pixel((0, 0), 0.1, Color::WHITE, 0.5, true);
        assert_eq!(fb.depth[0], f32::INFINITY);
        assert_eq!(fb.data[0], 0x00808080);
    }
}
