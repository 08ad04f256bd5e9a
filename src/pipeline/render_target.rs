use super::Buffer;
use crate::core::{Color, TextureSource};
use crate::error::WatchError;
use glam::{Vec2, Vec4};
use rayon::iter::ParallelIterator;
use rayon::slice::ParallelSliceMut;

/// Off-screen color target the watch UI is drawn into and the scene pass
/// later samples as an emissive texture. No depth attachment.
///
/// Texel rows are stored top-down like the framebuffer; sampling maps
/// `v = 0` to the bottom row, matching the texcoords of the watch quad.
#[derive(Debug, Clone)]
pub struct RenderTarget {
    width: usize,
    height: usize,
    data: Vec<Color>,
}

impl RenderTarget {
    /// A square target, rejecting a zero size.
    pub fn square(size: usize) -> Result<Self, WatchError> {
        if size == 0 {
            return Err(WatchError::IncompleteRenderTarget {
                width: size,
                height: size,
            });
        }
        Ok(Self::new(size, size))
    }

    /// Like [`RenderTarget::square`], but an incomplete target is logged and
    /// replaced by a 1x1 one so the frame loop can keep going.
    pub fn square_or_fallback(size: usize) -> Self {
        Self::square(size).unwrap_or_else(|e| {
            log::error!("{e}; falling back to a 1x1 watch screen");
            Self::new(1, 1)
        })
    }

    pub fn texels(&self) -> &[Color] {
        &self.data
    }
}

impl Buffer for RenderTarget {
    fn new(width: usize, height: usize) -> Self {
        let (width, height) = (width.max(1), height.max(1));
        Self {
            width,
            height,
            data: vec![Color::BLACK; width * height],
        }
    }

    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn clear(&mut self, color: Color) {
        self.data
            .par_chunks_mut(1024)
            .for_each(|chunk| chunk.fill(color));
    }

    fn set_pixel(&mut self, pos: (usize, usize), _depth: f32, color: Color, _depth_test: bool) {
        if pos.0 < self.width && pos.1 < self.height {
            self.data[pos.0 + pos.1 * self.width] = color;
        }
    }

    fn blend_pixel(
        &mut self,
        pos: (usize, usize),
        _depth: f32,
        color: Color,
        alpha: f32,
        _depth_test: bool,
    ) {
        if pos.0 < self.width && pos.1 < self.height {
            let index = pos.0 + pos.1 * self.width;
            self.data[index] = color.blend_over(&self.data[index], alpha);
        }
    }

    fn get_pixel(&self, pos: (usize, usize)) -> Option<Color> {
        (pos.0 < self.width && pos.1 < self.height).then(|| self.data[pos.0 + pos.1 * self.width])
    }
}

impl TextureSource for RenderTarget {
    fn sample(&self, uv: Vec2) -> Vec4 {
        let u = uv.x.clamp(0.0, 1.0);
        let v = (1.0 - uv.y).clamp(0.0, 1.0);
        let x = ((u * self.width as f32) as usize).min(self.width - 1);
        let y = ((v * self.height as f32) as usize).min(self.height - 1);
        self.data[x + y * self.width].with_alpha(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_size_is_incomplete() {
        assert!(matches!(
            RenderTarget::square(0),
            Err(WatchError::IncompleteRenderTarget { width: 0, height: 0 })
        ));
        let fallback = RenderTarget::square_or_fallback(0);
        assert_eq!((fallback.width(), fallback.height()), (1, 1));
    }

    #[test]
    fn sampling_reads_bottom_row_at_v_zero() {
        let mut target = RenderTarget::square(4).unwrap();
        target.clear(Color::BLACK);
        target.set_pixel((0, 3), 0.0, Color::RED, false);
        target.set_pixel((3, 0), 0.0, Color::GREEN, false);
        assert_eq!(target.sample_color(Vec2::new(0.0, 0.0)), Color::RED);
        assert_eq!(target.sample_color(Vec2::new(1.0, 1.0)), Color::GREEN);
    }

    #[test]
    fn clear_resets_every_texel() {
        let mut target = RenderTarget::square(8).unwrap();
        target.set_pixel((2, 2), 0.0, Color::RED, false);
        target.clear(Color::new(0.05, 0.05, 0.1));
        assert!(target.texels().iter().all(|c| *c == Color::new(0.05, 0.05, 0.1)));
    }
}
