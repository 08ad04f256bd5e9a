use glam::Vec4;
use std::ops::{Add, Mul};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32, // Red component (0.0 - 1.0)
    pub g: f32, // Green component (0.0 - 1.0)
    pub b: f32, // Blue component (0.0 - 1.0)
}

impl Color {
    /// Create a new color with RGB components normalized.
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create a color from 8-bit channels.
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    pub const fn splat(v: f32) -> Self {
        Self::new(v, v, v)
    }

    const fn hex_char_to_u8(c: char) -> u8 {
        match c {
            '0'..='9' => (c as u8) - b'0',
            'a'..='f' => (c as u8) - b'a' + 10,
            'A'..='F' => (c as u8) - b'A' + 10,
            _ => 0,
        }
    }

    /// Convert two hex characters to a single byte (u8).
    const fn hex_pair_to_u8(high: char, low: char) -> u8 {
        (Self::hex_char_to_u8(high) << 4) | Self::hex_char_to_u8(low)
    }

    /// Only for the palette constants below.
    const fn hex(hex: &str) -> Self {
        let bytes = hex.as_bytes();
        let offset = if bytes[0] == b'#' { 1 } else { 0 };

        let r =
            Self::hex_pair_to_u8(bytes[offset] as char, bytes[offset + 1] as char) as f32 / 255.0;
        let g = Self::hex_pair_to_u8(bytes[offset + 2] as char, bytes[offset + 3] as char) as f32
            / 255.0;
        let b = Self::hex_pair_to_u8(bytes[offset + 4] as char, bytes[offset + 5] as char) as f32
            / 255.0;

        Self { r, g, b }
    }

    /// Pack into minifb's `0x00RRGGBB` layout. Channels are clamped first.
    pub fn to_u32(&self) -> u32 {
        let r = (self.r.clamp(0.0, 1.0) * 255.0).round() as u32;
        let g = (self.g.clamp(0.0, 1.0) * 255.0).round() as u32;
        let b = (self.b.clamp(0.0, 1.0) * 255.0).round() as u32;
        (r << 16) | (g << 8) | b
    }

    pub fn from_u32(packed: u32) -> Self {
        Self::from_u8(
            ((packed >> 16) & 0xFF) as u8,
            ((packed >> 8) & 0xFF) as u8,
            (packed & 0xFF) as u8,
        )
    }

    pub fn lerp(&self, end: &Color, t: f32) -> Color {
        Color {
            r: self.r + (end.r - self.r) * t,
            g: self.g + (end.g - self.g) * t,
            b: self.b + (end.b - self.b) * t,
        }
    }

    /// Source-over blend: `self * alpha + dst * (1 - alpha)`.
    pub fn blend_over(&self, dst: &Color, alpha: f32) -> Color {
        dst.lerp(self, alpha.clamp(0.0, 1.0))
    }

    pub fn clamped(&self) -> Color {
        Color::new(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
        )
    }

    /// Drops the alpha channel.
    pub fn from_vec4(v: Vec4) -> Self {
        Self::new(v.x, v.y, v.z)
    }

    pub fn with_alpha(&self, a: f32) -> Vec4 {
        Vec4::new(self.r, self.g, self.b, a)
    }
}

// Predefined colors
impl Color {
    pub const BLACK: Color = Color::hex("000000");
    pub const WHITE: Color = Color::hex("FFFFFF");
    pub const RED: Color = Color::hex("FF0000");
    pub const GREEN: Color = Color::hex("00FF00");
}

impl Add for Color {
    type Output = Color;
    fn add(self, rhs: Color) -> Color {
        Color::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }
}

impl Mul for Color {
    type Output = Color;
    fn mul(self, rhs: Color) -> Color {
        Color::new(self.r * rhs.r, self.g * rhs.g, self.b * rhs.b)
    }
}

impl Mul<f32> for Color {
    type Output = Color;
    fn mul(self, k: f32) -> Color {
        Color::new(self.r * k, self.g * k, self.b * k)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE // Default to white color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_into_minifb_layout() {
        assert_eq!(Color::RED.to_u32(), 0x00FF0000);
        assert_eq!(Color::new(0.0, 1.0, 0.0).to_u32(), 0x0000FF00);
        // Overbright channels saturate instead of bleeding into neighbours.
        assert_eq!(Color::new(2.0, 0.0, 0.0).to_u32(), 0x00FF0000);
    }

    #[test]
    fn u32_roundtrip_is_lossless_for_bytes() {
        let c = Color::from_u8(12, 200, 255);
        assert_eq!(Color::from_u32(c.to_u32()), c);
    }

    #[test]
    fn blend_over_respects_alpha() {
        let dst = Color::BLACK;
        let src = Color::WHITE;
        assert_eq!(src.blend_over(&dst, 0.0), dst);
        assert_eq!(src.blend_over(&dst, 1.0), src);
        let half = src.blend_over(&dst, 0.5);
        assert!((half.r - 0.5).abs() < 1e-6);
    }
}
