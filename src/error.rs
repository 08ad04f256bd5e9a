use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WatchError {
    #[error("failed to create window: {0}")]
    Window(String),

    #[error("failed to present frame: {0}")]
    Present(String),

    #[error("failed to load texture '{path}': {source}")]
    TextureLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("off-screen render target incomplete: {width}x{height}")]
    IncompleteRenderTarget { width: usize, height: usize },

    #[error("logger initialisation failed: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<minifb::Error> for WatchError {
    fn from(e: minifb::Error) -> Self {
        WatchError::Present(e.to_string())
    }
}
