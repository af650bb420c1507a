//! Error types for raster processing operations.
//!
//! The pipeline has a deliberately small failure surface: bad target
//! dimensions, malformed kernels, and internal buffer invariant violations.
//! Per-channel numeric overflow is *not* an error anywhere in the pipeline —
//! values outside [0, 255] are silently clamped at every stage boundary.
//!
//! All variants abort the whole pipeline; there is no partial-result
//! recovery, and no retries exist because every operation is deterministic
//! and pure.

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while transforming a raster image.
#[derive(Debug, Error)]
pub enum Error {
    /// Target width or height resolved to zero (or overflowed).
    ///
    /// Produced by resize when asked for an empty destination, or by
    /// [`ScaleSpec`](crate::ScaleSpec) resolution with a non-positive
    /// factor. Not recoverable.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimension {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why the dimensions are invalid
        reason: String,
    },

    /// Convolution kernel has an even or zero side length, or the weight
    /// count doesn't match the declared side.
    ///
    /// Indicates a programming error in the caller rather than bad user
    /// input; fatal.
    #[error("invalid kernel: side {side} ({reason})")]
    InvalidKernel {
        /// Declared kernel side length
        side: usize,
        /// Reason why the kernel is invalid
        reason: String,
    },

    /// Buffer length doesn't match `stride * height`.
    ///
    /// Internal invariant violation — should never occur for images built
    /// through [`RasterImage`](crate::RasterImage) constructors. Treated as
    /// a fatal assertion failure, never silently repaired.
    #[error("corrupt buffer: expected {expected} bytes for {width}x{height}, got {got}")]
    CorruptBuffer {
        /// Expected buffer length (`stride * height`)
        expected: usize,
        /// Actual buffer length
        got: usize,
        /// Image width
        width: u32,
        /// Image height
        height: u32,
    },
}

impl Error {
    /// Creates an [`Error::InvalidDimension`] error.
    #[inline]
    pub fn invalid_dimension(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimension {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::InvalidKernel`] error.
    #[inline]
    pub fn invalid_kernel(side: usize, reason: impl Into<String>) -> Self {
        Self::InvalidKernel {
            side,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::CorruptBuffer`] error.
    #[inline]
    pub fn corrupt_buffer(expected: usize, got: usize, width: u32, height: u32) -> Self {
        Self::CorruptBuffer {
            expected,
            got,
            width,
            height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_dimension_message() {
        let err = Error::invalid_dimension(0, 480, "width must be > 0");
        let msg = err.to_string();
        assert!(msg.contains("0x480"));
        assert!(msg.contains("width must be > 0"));
    }

    #[test]
    fn test_invalid_kernel_message() {
        let err = Error::invalid_kernel(4, "side must be odd");
        assert!(err.to_string().contains("side 4"));
    }

    #[test]
    fn test_corrupt_buffer_message() {
        let err = Error::corrupt_buffer(64, 60, 4, 4);
        let msg = err.to_string();
        assert!(msg.contains("64"));
        assert!(msg.contains("60"));
        assert!(msg.contains("4x4"));
    }
}
