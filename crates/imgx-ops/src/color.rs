//! Combined saturation/brightness/contrast grading.
//!
//! All three adjustments run in a single per-pixel pass. The math happens
//! in unpremultiplied [0,1] space: color channels are divided by alpha
//! before grading and multiplied back before storage, so partially
//! transparent pixels don't skew toward black. Saturation is applied before
//! contrast/brightness so both operate on the same linear values.
//!
//! The alpha byte itself is never modified.

use crate::inherit_dpi;
use imgx_core::{ColorAdjust, RasterImage, CHANNELS, CH_A, CH_B, CH_G, CH_R, LUMA_B, LUMA_G, LUMA_R};
use rayon::prelude::*;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Applies saturation, brightness, and contrast in one pass.
///
/// Per pixel (channel order B, G, R, A):
/// 1. normalize bytes to [0,1]
/// 2. unpremultiply by alpha (skipped entirely when alpha is 0)
/// 3. blend each channel toward Rec.709 luma by the saturation factor
/// 4. `c = (c - 0.5) * contrast_factor + 0.5 + brightness_offset`
/// 5. repremultiply, clamp to [0,1], scale to [0,255], round to nearest
///
/// Identity parameters (100, 0, 0) reproduce the input byte-exactly: every
/// factor reduces to 1.0 or 0.0 and the residual float error is orders of
/// magnitude below half a byte step.
pub fn adjust(src: &RasterImage, params: &ColorAdjust) -> RasterImage {
    trace!(
        saturation = params.saturation,
        brightness = params.brightness,
        contrast = params.contrast,
        "adjust"
    );

    let sat = params.sat_factor();
    let contrast = params.contrast_factor();
    let brightness = params.brightness_offset();

    let mut dst = src.data().to_vec();

    dst.par_chunks_mut(src.stride()).for_each(|row| {
        for px in row.chunks_exact_mut(CHANNELS) {
            let a = px[CH_A];
            if a == 0 {
                // Valid premultiplied color is already 0; leave it be
                continue;
            }
            let alpha = a as f32 / 255.0;

            let mut b = px[CH_B] as f32 / 255.0 / alpha;
            let mut g = px[CH_G] as f32 / 255.0 / alpha;
            let mut r = px[CH_R] as f32 / 255.0 / alpha;

            let gray = LUMA_R * r + LUMA_G * g + LUMA_B * b;
            r = gray + (r - gray) * sat;
            g = gray + (g - gray) * sat;
            b = gray + (b - gray) * sat;

            r = (r - 0.5) * contrast + 0.5 + brightness;
            g = (g - 0.5) * contrast + 0.5 + brightness;
            b = (b - 0.5) * contrast + 0.5 + brightness;

            px[CH_B] = to_byte(b * alpha);
            px[CH_G] = to_byte(g * alpha);
            px[CH_R] = to_byte(r * alpha);
            // alpha unchanged
        }
    });

    let out = RasterImage::from_data(src.width(), src.height(), dst)
        .expect("adjusted buffer matches source dimensions");
    inherit_dpi(out, src)
}

/// Clamp to [0,1], scale, round to nearest byte.
#[inline]
fn to_byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}
