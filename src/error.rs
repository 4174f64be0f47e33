//! Error types for dabble operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in dabble operations.
///
/// Degenerate drawing inputs (zero radius, zero-area rectangles) are never
/// errors; those draws are silent no-ops.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG decoding error.
    #[error("PNG decoding error: {0}")]
    PngDecoding(#[from] png::DecodingError),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// Invalid dimensions for a framebuffer or window.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// A texture could not be loaded from disk.
    ///
    /// Local to the image that requested the load; the frame loop keeps
    /// running.
    #[error("failed to load texture {path:?}: {reason}")]
    TextureLoad {
        /// Path the load was attempted from.
        path: PathBuf,
        /// Human-readable failure reason.
        reason: String,
    },

    /// A window or renderer could not be created.
    ///
    /// Fatal: without a backend the frame loop cannot run at all.
    #[error("window initialization failed: {0}")]
    WindowInit(String),
}
