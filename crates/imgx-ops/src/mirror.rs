//! Geometric reflection.
//!
//! Pure index remap, no pixel recomputation: horizontal mirroring reads
//! `(w-1-x, y)`, vertical reads `(x, h-1-y)`. Applying the same axis twice
//! returns the original image byte-for-byte.

use crate::inherit_dpi;
use imgx_core::{MirrorAxis, RasterImage, CHANNELS};
use rayon::prelude::*;

/// Mirrors an image across the given axis.
///
/// Infallible: the output has the source's dimensions and every pixel is
/// copied verbatim from its reflected position.
///
/// # Example
///
/// ```rust
/// use imgx_core::{MirrorAxis, RasterImage};
/// use imgx_ops::mirror::mirror;
///
/// let src = RasterImage::from_data(2, 1, vec![1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
/// let out = mirror(&src, MirrorAxis::Horizontal);
/// assert_eq!(out.pixel(0, 0), src.pixel(1, 0));
/// ```
pub fn mirror(src: &RasterImage, axis: MirrorAxis) -> RasterImage {
    let out = match axis {
        MirrorAxis::Horizontal => mirror_h(src),
        MirrorAxis::Vertical => mirror_v(src),
    };
    inherit_dpi(out, src)
}

/// Left-right reflection: pixels swap within each row.
fn mirror_h(src: &RasterImage) -> RasterImage {
    let width = src.width() as usize;
    let stride = src.stride();
    let mut dst = vec![0u8; src.data().len()];

    dst.par_chunks_mut(stride)
        .enumerate()
        .for_each(|(y, row)| {
            let src_row = src.row(y as u32);
            for x in 0..width {
                let flipped = (width - 1 - x) * CHANNELS;
                row[x * CHANNELS..(x + 1) * CHANNELS]
                    .copy_from_slice(&src_row[flipped..flipped + CHANNELS]);
            }
        });

    RasterImage::from_data(src.width(), src.height(), dst)
        .expect("mirrored buffer matches source dimensions")
}

/// Top-bottom reflection: whole rows swap, copied as slices.
fn mirror_v(src: &RasterImage) -> RasterImage {
    let height = src.height();
    let stride = src.stride();
    let mut dst = vec![0u8; src.data().len()];

    dst.par_chunks_mut(stride)
        .enumerate()
        .for_each(|(y, row)| {
            row.copy_from_slice(src.row(height - 1 - y as u32));
        });

    RasterImage::from_data(src.width(), src.height(), dst)
        .expect("mirrored buffer matches source dimensions")
}
