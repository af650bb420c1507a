//! # imgx-ops
//!
//! Pixel operations for premultiplied BGRA rasters.
//!
//! Every operation consumes an immutable [`RasterImage`] snapshot and
//! produces a new one — nothing is transformed in place. Within each
//! operation, work is partitioned by destination scanline and processed in
//! parallel: workers share read-only access to the source and write
//! disjoint output rows, so no synchronization is needed.
//!
//! # Modules
//!
//! - [`resize`] - bilinear resampling
//! - [`mirror`] - horizontal/vertical reflection
//! - [`color`] - combined saturation/brightness/contrast grading
//! - [`filter`] - kernel convolution and sharpening
//! - [`pipeline`] - fixed-order stage orchestration
//!
//! # Example
//!
//! ```rust
//! use imgx_core::{ColorAdjust, RasterImage, ScaleSpec};
//! use imgx_ops::pipeline::{process, PipelineOptions};
//!
//! let src = RasterImage::filled(8, 8, [32, 64, 96, 255]).unwrap();
//! let opts = PipelineOptions {
//!     scale: ScaleSpec::Factor(2.0),
//!     sharpen: 1.0,
//!     ..Default::default()
//! };
//! let out = process(&src, &opts).unwrap();
//! assert_eq!((out.width(), out.height()), (16, 16));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod color;
pub mod filter;
pub mod mirror;
pub mod pipeline;
pub mod resize;

pub use imgx_core::{Error, Result};

use imgx_core::RasterImage;

/// Copies the source's DPI metadata onto a freshly produced image.
///
/// The DPI pair is pass-through metadata: no pixel computation reads it,
/// but every stage must hand it along unchanged.
pub(crate) fn inherit_dpi(out: RasterImage, src: &RasterImage) -> RasterImage {
    match src.dpi() {
        Some((x, y)) => out.with_dpi(x, y),
        None => out,
    }
}
