//! Error types for podcast playback

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Playlist index does not address an episode
    #[error("Index {index} out of range for playlist of {len} episodes")]
    OutOfRange { index: usize, len: usize },

    /// Media output refused a command (e.g. autoplay blocked)
    #[error("Media output rejected command: {0}")]
    MediaRejected(String),

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
