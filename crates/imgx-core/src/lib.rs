//! # imgx-core
//!
//! Core types for premultiplied BGRA raster processing.
//!
//! This crate provides the data model shared by every stage of the imgx
//! transform pipeline:
//!
//! - [`RasterImage`] - owned 8-bit BGRA buffer with premultiplied alpha
//! - [`ScaleSpec`] - factor-or-exact target size for resampling
//! - [`ColorAdjust`] - saturation/brightness/contrast parameters
//! - [`MirrorAxis`] - reflection axis
//! - [`Error`] / [`Result`] - the pipeline's error taxonomy
//!
//! The operations themselves live in `imgx-ops`.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod adjust;
mod error;
mod image;
mod scale;

pub use adjust::{ColorAdjust, LUMA_B, LUMA_G, LUMA_R};
pub use error::{Error, Result};
pub use image::{RasterImage, CHANNELS, CH_A, CH_B, CH_G, CH_R};
pub use scale::ScaleSpec;

/// Reflection axis for the mirror stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MirrorAxis {
    /// Left-right reflection: destination (x, y) reads source (w-1-x, y).
    #[default]
    Horizontal,
    /// Top-bottom reflection: destination (x, y) reads source (x, h-1-y).
    Vertical,
}
