//! Error types for the states view.

use std::path::PathBuf;

use thiserror::Error;

/// A dataset whose total and parts do not accompany each other.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DatasetError {
    /// Parts were supplied without a total to divide them by.
    #[error("invalid dataset: total must accompany parts (got {parts} parts and no total)")]
    MissingTotal { parts: usize },

    /// A total was supplied with nothing to split it into.
    #[error("invalid dataset: total must accompany parts (got a total and no parts)")]
    MissingParts,
}

/// Style configuration that cannot produce a widget.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Animation attribute outside the recognised values.
    #[error("animation can only be 0 (synchronized) or 1 (staggered), got {0}")]
    UnknownAnimationMode(i64),

    /// Color string that is not `#RRGGBB` or `#AARRGGBB`.
    #[error("invalid color {0:?} (expected #RRGGBB or #AARRGGBB)")]
    InvalidColor(String),

    /// No segment colors to draw with.
    #[error("segment palette must hold at least one color")]
    EmptyPalette,

    #[error("failed to read style file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse style file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Top-level error for hosting the view in a window.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("window creation failed: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("pixel surface error: {0}")]
    Pixels(#[from] pixels::Error),

    #[error("failed to load font {path}: {reason}")]
    Font { path: PathBuf, reason: String },
}

/// Result type alias using the crate's top-level Error.
pub type Result<T> = std::result::Result<T, Error>;
