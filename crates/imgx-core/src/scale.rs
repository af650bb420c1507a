//! Target-size specification for the resample stage.

use crate::{Error, Result};

/// How the resample stage picks its destination size.
///
/// Either a uniform factor applied to both axes or an explicit pixel size.
/// Factor targets are rounded to the nearest pixel and floored at 1 so a
/// tiny factor on a small image still yields a valid raster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScaleSpec {
    /// Multiply both dimensions by this factor (must be > 0).
    Factor(f64),
    /// Resize to an exact pixel size (both must be > 0).
    Exact {
        /// Target width in pixels
        width: u32,
        /// Target height in pixels
        height: u32,
    },
}

impl Default for ScaleSpec {
    /// Identity: factor 1.0.
    fn default() -> Self {
        Self::Factor(1.0)
    }
}

impl ScaleSpec {
    /// Resolves the destination size for a source of `src_w` x `src_h`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for a non-positive or non-finite
    /// factor, or an explicit size with a zero dimension.
    pub fn resolve(&self, src_w: u32, src_h: u32) -> Result<(u32, u32)> {
        match *self {
            Self::Factor(f) => {
                if !f.is_finite() || f <= 0.0 {
                    return Err(Error::invalid_dimension(
                        src_w,
                        src_h,
                        format!("scale factor must be > 0, got {f}"),
                    ));
                }
                let w = ((src_w as f64 * f).round() as u32).max(1);
                let h = ((src_h as f64 * f).round() as u32).max(1);
                Ok((w, h))
            }
            Self::Exact { width, height } => {
                if width == 0 || height == 0 {
                    return Err(Error::invalid_dimension(
                        width,
                        height,
                        "target width and height must be > 0",
                    ));
                }
                Ok((width, height))
            }
        }
    }

    /// Whether this spec leaves a source of the given size unchanged.
    pub fn is_identity_for(&self, src_w: u32, src_h: u32) -> bool {
        matches!(self.resolve(src_w, src_h), Ok((w, h)) if w == src_w && h == src_h)
    }
}
