//! Error types for pixel capture.

use thiserror::Error;

/// Result type for capture operations.
pub type Result<T> = std::result::Result<T, CaptureError>;

/// Errors that can occur while turning a frame into pixels.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CaptureError {
    /// The pixel buffer could not be allocated for this size.
    #[error("cannot capture a {width}x{height} surface")]
    InvalidSize { width: u32, height: u32 },

    /// A layer was popped without a matching push, or left open.
    #[error("display list has unbalanced layers")]
    UnbalancedLayers,

    /// Timeout waiting for the frame to settle.
    #[error("capture timed out after {waited_ms}ms waiting for animations to settle")]
    Timeout { waited_ms: u64 },
}
