//! The watch face: page state machine, per-page draw lists, and the
//! off-screen pass that turns them into a texture.

mod cache;
pub mod commands;
mod compositor;
mod screen;

pub use cache::{DigitSlot, DigitTextureCache};
pub use commands::{draw_commands, DrawCommand, UiTexture};
pub use compositor::{PointerInput, WatchCompositor};
pub use screen::{HotRect, Screen, LEFT_ARROW, RIGHT_ARROW};
