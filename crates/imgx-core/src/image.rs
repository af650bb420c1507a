//! Raster buffer type for premultiplied BGRA pixel processing.
//!
//! [`RasterImage`] is the single container every pipeline stage consumes and
//! produces. It owns a contiguous byte buffer in **row-major** order,
//! top-to-bottom, four bytes per pixel:
//!
//! ```text
//! Memory: [B G R A B G R A ...]  ← Row 0
//!         [B G R A B G R A ...]  ← Row 1
//!         ...
//! ```
//!
//! Color channels are premultiplied by alpha. Stages that do color math
//! unpremultiply first and repremultiply before storing; geometric stages
//! (resize, mirror) move the premultiplied bytes as-is.
//!
//! # Immutability
//!
//! Once constructed, a `RasterImage` is never mutated: every operation
//! allocates a fresh output buffer (copy-on-transform). This is what makes
//! stage-to-stage hand-off and row-parallel reads safe without locking.
//!
//! # Usage
//!
//! ```rust
//! use imgx_core::RasterImage;
//!
//! // 2x2 opaque black
//! let img = RasterImage::filled(2, 2, [0, 0, 0, 255]).unwrap();
//! assert_eq!(img.stride(), 8);
//! assert_eq!(img.pixel(1, 1), Some([0, 0, 0, 255]));
//! ```

use crate::{Error, Result};

/// Bytes per pixel: B, G, R, A.
pub const CHANNELS: usize = 4;

/// Blue channel offset within a pixel.
pub const CH_B: usize = 0;
/// Green channel offset within a pixel.
pub const CH_G: usize = 1;
/// Red channel offset within a pixel.
pub const CH_R: usize = 2;
/// Alpha channel offset within a pixel.
pub const CH_A: usize = 3;

/// Owned 8-bit BGRA raster with premultiplied alpha.
///
/// Invariants, enforced by the constructors:
/// - `width > 0`, `height > 0`
/// - buffer length is exactly `stride() * height` where
///   `stride() == width * 4`
///
/// The optional DPI pair is metadata handed through the pipeline unchanged;
/// no pixel computation reads it.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    /// Pixel bytes, `stride * height` long
    data: Vec<u8>,
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Optional (x, y) resolution in dots per inch
    dpi: Option<(f64, f64)>,
}

impl RasterImage {
    /// Creates a fully transparent image (all bytes zero).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if either dimension is zero or
    /// the buffer size would overflow.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let len = buffer_len(width, height)?;
        Ok(Self {
            data: vec![0u8; len],
            width,
            height,
            dpi: None,
        })
    }

    /// Creates an image from existing pixel bytes.
    ///
    /// `data` must be exactly `width * 4 * height` bytes of premultiplied
    /// BGRA, top row first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for zero dimensions and
    /// [`Error::CorruptBuffer`] if the byte count doesn't match.
    pub fn from_data(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = buffer_len(width, height)?;
        if data.len() != expected {
            return Err(Error::corrupt_buffer(expected, data.len(), width, height));
        }
        Ok(Self {
            data,
            width,
            height,
            dpi: None,
        })
    }

    /// Creates an image filled with one BGRA pixel value.
    pub fn filled(width: u32, height: u32, pixel: [u8; CHANNELS]) -> Result<Self> {
        let len = buffer_len(width, height)?;
        let mut data = Vec::with_capacity(len);
        for _ in 0..len / CHANNELS {
            data.extend_from_slice(&pixel);
        }
        Ok(Self {
            data,
            width,
            height,
            dpi: None,
        })
    }

    /// Attaches a DPI pair, consuming self. Metadata only.
    #[must_use]
    pub fn with_dpi(mut self, dpi_x: f64, dpi_y: f64) -> Self {
        self.dpi = Some((dpi_x, dpi_y));
        self
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per row (`width * 4`, no padding).
    #[inline]
    pub fn stride(&self) -> usize {
        self.width as usize * CHANNELS
    }

    /// Optional (x, y) DPI metadata.
    #[inline]
    pub fn dpi(&self) -> Option<(f64, f64)> {
        self.dpi
    }

    /// Read-only pixel bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the image, returning the pixel bytes.
    #[inline]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// One row of pixel bytes.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.stride();
        let start = y as usize * stride;
        &self.data[start..start + stride]
    }

    /// BGRA bytes at (x, y), or `None` when out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; CHANNELS]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * CHANNELS;
        Some([
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ])
    }

    /// Checks the buffer-length invariant.
    ///
    /// Constructors already enforce it; operations re-check at entry so a
    /// violation surfaces as [`Error::CorruptBuffer`] instead of a panic
    /// deep inside pixel loops.
    pub fn validate(&self) -> Result<()> {
        let expected = self.stride() * self.height as usize;
        if self.data.len() != expected {
            return Err(Error::corrupt_buffer(
                expected,
                self.data.len(),
                self.width,
                self.height,
            ));
        }
        Ok(())
    }
}

/// Buffer length for the given dimensions, rejecting zero and overflow.
fn buffer_len(width: u32, height: u32) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::invalid_dimension(
            width,
            height,
            "width and height must be > 0",
        ));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(CHANNELS))
        .ok_or_else(|| Error::invalid_dimension(width, height, "buffer size overflow"))
}
