use crate::core::Color;
use crate::error::WatchError;
use glam::{Vec2, Vec4};
use image::{RgbImage, RgbaImage};
use std::path::Path;
use std::sync::Arc;

/// Anything the shading stage can read texels from.
///
/// UV origin is the bottom-left corner (`v = 0` is the last stored row), the
/// same convention the geometry builder writes into its texcoords.
pub trait TextureSource: Sync {
    /// Returns RGBA in `[0, 1]`.
    fn sample(&self, uv: Vec2) -> Vec4;

    fn sample_color(&self, uv: Vec2) -> Color {
        Color::from_vec4(self.sample(uv))
    }
}

/// How coordinates outside `[0, 1]` are resolved, per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapMode {
    Repeat,
    ClampToEdge,
}

/// Texture filtering modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFilter {
    Nearest,
    Bilinear,
}

/// An immutable RGBA texture with sampling capabilities
#[derive(Debug, Clone)]
pub struct Texture {
    pub width: u32,
    pub height: u32,
    pub data: Arc<Vec<Vec4>>,
    pub label: String,
    pub wrap_s: WrapMode,
    pub wrap_t: WrapMode,
    pub filter: TextureFilter,
}

impl Texture {
    /// Load a texture from a file path
    pub fn load_from_file(path: &Path) -> Result<Self, WatchError> {
        let img = image::open(path).map_err(|source| WatchError::TextureLoad {
            path: path.to_path_buf(),
            source,
        })?;
        let rgba = img.to_rgba8();
        log::info!(
            "Loaded texture {} ({}x{})",
            path.display(),
            rgba.width(),
            rgba.height()
        );
        Ok(Self::from_rgba_image(
            path.to_string_lossy().as_ref(),
            &rgba,
            WrapMode::Repeat,
        ))
    }

    pub fn from_rgba_image(label: &str, img: &RgbaImage, wrap: WrapMode) -> Self {
        let data = img
            .pixels()
            .map(|p| {
                Vec4::new(
                    p[0] as f32 / 255.0,
                    p[1] as f32 / 255.0,
                    p[2] as f32 / 255.0,
                    p[3] as f32 / 255.0,
                )
            })
            .collect();
        Self::from_texels(label, img.width(), img.height(), data, wrap)
    }

    pub fn from_rgb_image(label: &str, img: &RgbImage, wrap: WrapMode) -> Self {
        let data = img
            .pixels()
            .map(|p| {
                Vec4::new(
                    p[0] as f32 / 255.0,
                    p[1] as f32 / 255.0,
                    p[2] as f32 / 255.0,
                    1.0,
                )
            })
            .collect();
        Self::from_texels(label, img.width(), img.height(), data, wrap)
    }

    /// Zero-sized inputs collapse to a single transparent texel so sampling
    /// never has to special-case an empty buffer.
    fn from_texels(label: &str, width: u32, height: u32, data: Vec<Vec4>, wrap: WrapMode) -> Self {
        let (width, height, data) = if width == 0 || height == 0 {
            (1, 1, vec![Vec4::ZERO])
        } else {
            (width, height, data)
        };
        Texture {
            width,
            height,
            data: Arc::new(data),
            label: label.to_string(),
            wrap_s: wrap,
            wrap_t: wrap,
            filter: TextureFilter::Bilinear,
        }
    }

    /// Repeat horizontally but clamp vertically, e.g. for scrolling strips.
    pub fn with_wrap(mut self, wrap_s: WrapMode, wrap_t: WrapMode) -> Self {
        self.wrap_s = wrap_s;
        self.wrap_t = wrap_t;
        self
    }

    pub fn with_filter(mut self, filter: TextureFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Sample the texture with specified filtering
    pub fn sample_filtered(&self, uv: Vec2, filter: TextureFilter) -> Vec4 {
        let u = resolve(uv.x, self.wrap_s);
        let v = resolve(1.0 - uv.y, self.wrap_t);

        match filter {
            TextureFilter::Nearest => self.sample_nearest(u, v),
            TextureFilter::Bilinear => self.sample_bilinear(u, v),
        }
    }

    /// Sample using nearest neighbor filtering
    fn sample_nearest(&self, u: f32, v: f32) -> Vec4 {
        let x = ((u * self.width as f32) as u32).min(self.width - 1);
        let y = ((v * self.height as f32) as u32).min(self.height - 1);
        self.data[(y * self.width + x) as usize]
    }

    /// Sample using bilinear filtering
    fn sample_bilinear(&self, u: f32, v: f32) -> Vec4 {
        let x_f = u * (self.width - 1) as f32;
        let y_f = v * (self.height - 1) as f32;

        let x0 = x_f.floor() as u32;
        let y0 = y_f.floor() as u32;
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);

        let dx = x_f - x0 as f32;
        let dy = y_f - y0 as f32;

        // Get the four neighboring pixels
        let c00 = self.data[(y0 * self.width + x0) as usize];
        let c10 = self.data[(y0 * self.width + x1) as usize];
        let c01 = self.data[(y1 * self.width + x0) as usize];
        let c11 = self.data[(y1 * self.width + x1) as usize];

        let c0 = c00.lerp(c10, dx);
        let c1 = c01.lerp(c11, dx);
        c0.lerp(c1, dy)
    }
}

impl TextureSource for Texture {
    fn sample(&self, uv: Vec2) -> Vec4 {
        self.sample_filtered(uv, self.filter)
    }
}

fn resolve(value: f32, mode: WrapMode) -> f32 {
    match mode {
        // euclidean modulo handles negatives
        WrapMode::Repeat => value.rem_euclid(1.0),
        WrapMode::ClampToEdge => value.clamp(0.0, 1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn two_by_one() -> Texture {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        img.put_pixel(1, 0, Rgba([0, 0, 255, 0]));
        Texture::from_rgba_image("test", &img, WrapMode::Repeat).with_filter(TextureFilter::Nearest)
    }

    #[test]
    fn nearest_sampling_picks_texels() {
        let tex = two_by_one();
        assert_eq!(tex.sample(Vec2::new(0.1, 0.5)), Vec4::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(tex.sample(Vec2::new(0.9, 0.5)), Vec4::new(0.0, 0.0, 1.0, 0.0));
    }

    #[test]
    fn repeat_wraps_negative_and_large_coords() {
        let tex = two_by_one();
        assert_eq!(tex.sample(Vec2::new(1.1, 0.5)), tex.sample(Vec2::new(0.1, 0.5)));
        assert_eq!(tex.sample(Vec2::new(-0.1, 0.5)), tex.sample(Vec2::new(0.9, 0.5)));
    }

    #[test]
    fn clamp_holds_edge_texel() {
        let tex = two_by_one().with_wrap(WrapMode::ClampToEdge, WrapMode::ClampToEdge);
        assert_eq!(tex.sample(Vec2::new(3.0, 0.5)), tex.sample(Vec2::new(0.99, 0.5)));
    }

    #[test]
    fn rows_are_sampled_bottom_up() {
        let mut img = RgbImage::new(1, 2);
        img.put_pixel(0, 0, image::Rgb([255, 255, 255])); // stored first = top
        img.put_pixel(0, 1, image::Rgb([0, 0, 0]));
        let tex = Texture::from_rgb_image("rows", &img, WrapMode::ClampToEdge)
            .with_filter(TextureFilter::Nearest);
        assert_eq!(tex.sample_color(Vec2::new(0.5, 0.9)), Color::WHITE);
        assert_eq!(tex.sample_color(Vec2::new(0.5, 0.1)), Color::BLACK);
    }

    #[test]
    fn empty_image_becomes_transparent_texel() {
        let tex = Texture::from_rgba_image("empty", &RgbaImage::new(0, 0), WrapMode::Repeat);
        assert_eq!((tex.width, tex.height), (1, 1));
        assert_eq!(tex.sample(Vec2::new(0.3, 0.3)), Vec4::ZERO);
    }

    #[test]
    fn missing_file_is_reported() {
        let err = Texture::load_from_file(Path::new("/definitely/not/here.png")).unwrap_err();
        assert!(matches!(err, WatchError::TextureLoad { .. }));
    }
}
