//! Error types for descriptor extraction and matching

extern crate image as image_rs;

use std::collections::TryReserveError;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Image has no pixels or is too small to build a single octave
    #[error("Invalid image of size {width}x{height}")]
    InvalidImage {
        width: usize,
        height: usize
    },

    /// Options that cannot configure a scale space
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// External keypoints are not contiguous by octave
    #[error("Keypoint {index} belongs to octave {keypoint_octave} but octave {current_octave} is already being processed")]
    KeypointOrder {
        index: usize,
        keypoint_octave: i32,
        current_octave: i32
    },

    /// Output buffers could not grow
    #[error("Allocation failed: {0}")]
    Allocation(#[from] TryReserveError),

    /// Malformed yaml configuration
    #[error("Config error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image decode error: {0}")]
    ImageDecode(#[from] image_rs::ImageError),
}
