//! Bilinear resampling.
//!
//! Maps every destination pixel to continuous source coordinates
//! `src_x = x * (src_w - 1) / target_w` (same for y), takes the floor/ceil
//! neighbors on each axis with the ceil clamped at the last valid index,
//! and lerps horizontally then vertically.
//!
//! All four channels, alpha included, are interpolated identically on the
//! premultiplied bytes. At partially transparent edges this can bleed color
//! slightly compared to an unpremultiply-interpolate-repremultiply scheme;
//! the behavior is kept as-is so sample outputs stay stable.
//!
//! # Example
//!
//! ```rust
//! use imgx_core::RasterImage;
//! use imgx_ops::resize::resize;
//!
//! let src = RasterImage::filled(2, 2, [0, 0, 0, 255]).unwrap();
//! let dst = resize(&src, 4, 4).unwrap();
//! assert_eq!(dst.width(), 4);
//! ```

use crate::inherit_dpi;
use imgx_core::{Error, RasterImage, Result, CHANNELS};
use rayon::prelude::*;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Resizes an image with bilinear interpolation.
///
/// Destination rows are computed in parallel; each worker writes one
/// disjoint output scanline while reading the shared source buffer.
///
/// A target equal to the source size returns a byte-exact copy: the
/// fractional mapping doesn't reduce to the identity on its own, and
/// callers rely on same-size resizes being lossless.
///
/// # Errors
///
/// Returns [`Error::InvalidDimension`] if `target_w` or `target_h` is zero
/// and [`Error::CorruptBuffer`] if the source violates its length invariant.
pub fn resize(src: &RasterImage, target_w: u32, target_h: u32) -> Result<RasterImage> {
    trace!(
        src_w = src.width(),
        src_h = src.height(),
        target_w,
        target_h,
        "resize"
    );
    src.validate()?;
    if target_w == 0 || target_h == 0 {
        return Err(Error::invalid_dimension(
            target_w,
            target_h,
            "target width and height must be > 0",
        ));
    }
    if target_w == src.width() && target_h == src.height() {
        return Ok(src.clone());
    }

    let src_w = src.width() as usize;
    let src_h = src.height() as usize;
    let dst_w = target_w as usize;
    let dst_h = target_h as usize;

    let x_ratio = (src_w - 1) as f32 / dst_w as f32;
    let y_ratio = (src_h - 1) as f32 / dst_h as f32;

    let pixels = src.data();
    let mut dst = vec![0u8; dst_w * dst_h * CHANNELS];

    dst.par_chunks_mut(dst_w * CHANNELS)
        .enumerate()
        .for_each(|(y, row)| {
            let src_y = y as f32 * y_ratio;
            let y0 = src_y.floor() as usize;
            let y_frac = src_y - y0 as f32;
            let y1 = (y0 + 1).min(src_h - 1);

            for x in 0..dst_w {
                let src_x = x as f32 * x_ratio;
                let x0 = src_x.floor() as usize;
                let x_frac = src_x - x0 as f32;
                let x1 = (x0 + 1).min(src_w - 1);

                // Four neighbor pixels
                let tl = (y0 * src_w + x0) * CHANNELS;
                let tr = (y0 * src_w + x1) * CHANNELS;
                let bl = (y1 * src_w + x0) * CHANNELS;
                let br = (y1 * src_w + x1) * CHANNELS;

                for c in 0..CHANNELS {
                    let top = pixels[tl + c] as f32 * (1.0 - x_frac)
                        + pixels[tr + c] as f32 * x_frac;
                    let bottom = pixels[bl + c] as f32 * (1.0 - x_frac)
                        + pixels[br + c] as f32 * x_frac;
                    let value = top * (1.0 - y_frac) + bottom * y_frac;
                    row[x * CHANNELS + c] = value.round() as u8;
                }
            }
        });

    debug!(target_w, target_h, "resized");
    let out = RasterImage::from_data(target_w, target_h, dst)?;
    Ok(inherit_dpi(out, src))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(w: u32, h: u32) -> RasterImage {
        let mut data = Vec::with_capacity((w * h) as usize * CHANNELS);
        for y in 0..h {
            for x in 0..w {
                data.extend_from_slice(&[
                    (x * 17 % 256) as u8,
                    (y * 31 % 256) as u8,
                    ((x + y) * 13 % 256) as u8,
                    255,
                ]);
            }
        }
        RasterImage::from_data(w, h, data).unwrap()
    }

    #[test]
    fn test_same_size_is_byte_exact() {
        let src = gradient(7, 5);
        let dst = resize(&src, 7, 5).unwrap();
        assert_eq!(dst.data(), src.data());
    }

    #[test]
    fn test_one_pixel_replicates() {
        let src = RasterImage::filled(1, 1, [40, 80, 120, 200]).unwrap();
        let dst = resize(&src, 4, 4).unwrap();
        assert_eq!(dst.width(), 4);
        assert_eq!(dst.height(), 4);
        // No neighbors exist to interpolate toward
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(dst.pixel(x, y), Some([40, 80, 120, 200]));
            }
        }
    }

    #[test]
    fn test_zero_target_rejected() {
        let src = gradient(4, 4);
        assert!(matches!(
            resize(&src, 0, 4),
            Err(Error::InvalidDimension { .. })
        ));
        assert!(matches!(
            resize(&src, 4, 0),
            Err(Error::InvalidDimension { .. })
        ));
    }

    #[test]
    fn test_output_buffer_size() {
        let src = gradient(3, 3);
        let dst = resize(&src, 10, 6).unwrap();
        assert_eq!(dst.data().len(), 10 * 6 * CHANNELS);
    }

    #[test]
    fn test_constant_image_stays_constant() {
        let src = RasterImage::filled(8, 8, [50, 100, 150, 255]).unwrap();
        let dst = resize(&src, 20, 14).unwrap();
        // Every interpolated sample is a weighted average of equal values
        for y in 0..14 {
            for x in 0..20 {
                assert_eq!(dst.pixel(x, y), Some([50, 100, 150, 255]));
            }
        }
    }

    #[test]
    fn test_upscale_interpolates_between_neighbors() {
        // 2x1: black then white, opaque
        let src = RasterImage::from_data(
            2,
            1,
            vec![0, 0, 0, 255, 255, 255, 255, 255],
        )
        .unwrap();
        let dst = resize(&src, 4, 1).unwrap();

        // x_ratio = 1/4; destination x samples source at 0, .25, .5, .75
        let expected = [0, 64, 128, 191];
        for (x, &e) in expected.iter().enumerate() {
            let px = dst.pixel(x as u32, 0).unwrap();
            assert_eq!(px[0], e, "pixel {x}");
            assert_eq!(px[3], 255);
        }
    }

    #[test]
    fn test_dpi_carried_through() {
        let src = gradient(4, 4).with_dpi(96.0, 96.0);
        let dst = resize(&src, 8, 8).unwrap();
        assert_eq!(dst.dpi(), Some((96.0, 96.0)));
    }
}
