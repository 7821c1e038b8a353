//! Error types for surface-bridge.

use thiserror::Error;

/// Result type alias using SurfaceError.
pub type SurfaceResult<T> = Result<T, SurfaceError>;

/// Errors that can occur while creating, drawing or recording surfaces.
#[derive(Debug, Error)]
pub enum SurfaceError {
    /// A required handle was not supplied.
    #[error("Invalid operand: {0} must not be absent")]
    InvalidOperand(&'static str),

    /// The pixel buffer for a surface could not be allocated.
    #[error("Unable to allocate surface: width={width}, height={height}")]
    ResourceExhaustion { width: u32, height: u32 },

    /// Pixel data length does not match the declared dimensions.
    #[error("Invalid pixel data: expected {expected} bytes for {width}x{height}, got {actual}")]
    InvalidPixelData {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// Failed to parse color value.
    #[error("Failed to parse color: {0}")]
    ColorParseError(String),

    /// PNG encoding or decoding error.
    #[error("PNG error: {0}")]
    PngError(String),

    /// Invalid factory configuration.
    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

impl From<png::EncodingError> for SurfaceError {
    fn from(err: png::EncodingError) -> Self {
        SurfaceError::PngError(err.to_string())
    }
}

impl From<png::DecodingError> for SurfaceError {
    fn from(err: png::DecodingError) -> Self {
        SurfaceError::PngError(err.to_string())
    }
}

impl From<serde_json::Error> for SurfaceError {
    fn from(err: serde_json::Error) -> Self {
        SurfaceError::ConfigError(err.to_string())
    }
}
