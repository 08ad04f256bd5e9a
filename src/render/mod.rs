//! The 3D pass: lit world, watch parts placed relative to the eye, and the
//! watch face drawn from the UI target.

mod pose;
mod scene;

pub use pose::{WatchPose, BEZEL_SCALE, HAND_SCALE};
pub use scene::{SceneRenderer, SceneTextures, SKY};
