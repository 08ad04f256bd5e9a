//! Bitmap generators for every texture in the scene and on the watch.
//!
//! All generators are pure: a handful of parameters in, an `image` buffer
//! out. Anything random takes its RNG explicitly so callers control seeding.

mod canvas;
pub mod digits;
pub mod ekg;
pub mod font;
pub mod icons;
pub mod noise;

pub use canvas::Canvas;
pub use digits::digit_texture;
pub use ekg::{ekg_displacement, ekg_texture};
pub use font::{draw_string, overlay_banner};
pub use icons::{arrow_texture, heart_texture, ArrowDirection};
pub use noise::{building_texture, ground_texture, road_texture};
