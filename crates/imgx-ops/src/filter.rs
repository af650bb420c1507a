//! Kernel convolution and sharpening.
//!
//! Convolution runs over the three color channels of the raw premultiplied
//! bytes; the alpha byte is copied through untouched for any kernel. Border
//! sampling clamps to the nearest edge pixel — never wraps, never zero-pads.
//!
//! # Kernels
//!
//! - [`Kernel::identity`] - pass-through (center weight 1)
//! - [`Kernel::sharpen`] - edge-enhance `[[0,-1,0],[-1,5,-1],[0,-1,0]]` scaled by strength
//! - [`Kernel::box_blur`] - simple average
//! - [`Kernel::gaussian`] - smooth blur
//!
//! # Example
//!
//! ```rust
//! use imgx_core::RasterImage;
//! use imgx_ops::filter::{convolve, Kernel};
//!
//! let src = RasterImage::filled(8, 8, [40, 40, 40, 255]).unwrap();
//! let out = convolve(&src, &Kernel::sharpen(1.0)).unwrap();
//! assert_eq!(out.width(), 8);
//! ```

use crate::inherit_dpi;
use imgx_core::{Error, RasterImage, Result, CHANNELS, CH_A};
use rayon::prelude::*;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Square convolution kernel with an odd side length.
///
/// Immutable once built; callers pass it explicitly to [`convolve`]. The
/// only way to obtain one is through constructors that enforce the odd,
/// non-zero side invariant, so a `Kernel` in hand is always valid.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    /// Row-major weights, `side * side` long
    data: Vec<f32>,
    /// Side length (odd, >= 1)
    side: usize,
}

impl Kernel {
    /// Creates a kernel from row-major weights.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKernel`] if `side` is even or zero, or the
    /// weight count isn't `side * side`.
    pub fn new(data: Vec<f32>, side: usize) -> Result<Self> {
        if side == 0 || side % 2 == 0 {
            return Err(Error::invalid_kernel(side, "side must be odd and > 0"));
        }
        if data.len() != side * side {
            return Err(Error::invalid_kernel(
                side,
                format!("expected {} weights, got {}", side * side, data.len()),
            ));
        }
        Ok(Self { data, side })
    }

    /// The 3x3 identity kernel: output equals input everywhere.
    pub fn identity() -> Self {
        Self {
            data: vec![0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0],
            side: 3,
        }
    }

    /// Identity-plus-edge-enhance sharpening kernel scaled by `strength`.
    ///
    /// At strength 1.0 the weights sum to 1 and brightness is preserved;
    /// larger strengths enhance edges more aggressively.
    pub fn sharpen(strength: f32) -> Self {
        Self {
            data: vec![0.0, -1.0, 0.0, -1.0, 5.0, -1.0, 0.0, -1.0, 0.0],
            side: 3,
        }
        .scaled(strength)
    }

    /// Box blur: every weight `1 / (side * side)`. Even sizes are bumped up
    /// to the next odd value.
    pub fn box_blur(size: usize) -> Self {
        let side = if size % 2 == 0 { size + 1 } else { size.max(1) };
        let count = side * side;
        Self {
            data: vec![1.0 / count as f32; count],
            side,
        }
    }

    /// Gaussian blur kernel, normalized so the weights sum to 1.
    ///
    /// Even sizes are bumped up to the next odd value.
    pub fn gaussian(size: usize, sigma: f32) -> Self {
        let side = if size % 2 == 0 { size + 1 } else { size.max(1) };
        let half = (side / 2) as i32;
        let sigma2 = 2.0 * sigma * sigma;

        let mut data = Vec::with_capacity(side * side);
        let mut sum = 0.0f32;
        for y in -half..=half {
            for x in -half..=half {
                let d = (x * x + y * y) as f32;
                let w = (-d / sigma2).exp();
                data.push(w);
                sum += w;
            }
        }
        for w in &mut data {
            *w /= sum;
        }

        Self { data, side }
    }

    /// Returns a copy with every weight multiplied by `strength`.
    #[must_use]
    pub fn scaled(&self, strength: f32) -> Self {
        Self {
            data: self.data.iter().map(|w| w * strength).collect(),
            side: self.side,
        }
    }

    /// Side length (odd, >= 1).
    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    /// Half-size used to center the kernel over a pixel.
    #[inline]
    pub fn radius(&self) -> usize {
        self.side / 2
    }

    /// Row-major weights.
    #[inline]
    pub fn weights(&self) -> &[f32] {
        &self.data
    }
}

/// Convolves the color channels with `kernel`.
///
/// For each output pixel and each of B, G, R independently, sums
/// `kernel[ky][kx] * src[clamp(y + ky - half)][clamp(x + kx - half)]` over
/// the kernel extent, clamping coordinates to the image edge. Sums are
/// clamped to [0, 255]; alpha is copied from the source unchanged.
///
/// Output rows are computed in parallel; the fresh destination buffer never
/// aliases the source.
///
/// # Errors
///
/// Returns [`Error::CorruptBuffer`] if the source violates its length
/// invariant. Kernel validity is enforced at [`Kernel`] construction.
pub fn convolve(src: &RasterImage, kernel: &Kernel) -> Result<RasterImage> {
    trace!(
        width = src.width(),
        height = src.height(),
        kernel_side = kernel.side(),
        "convolve"
    );
    src.validate()?;

    let width = src.width() as usize;
    let height = src.height() as usize;
    let side = kernel.side();
    let half = kernel.radius() as isize;
    let weights = kernel.weights();
    let pixels = src.data();

    let mut dst = vec![0u8; pixels.len()];

    dst.par_chunks_mut(width * CHANNELS)
        .enumerate()
        .for_each(|(y, row)| {
            for x in 0..width {
                let mut sums = [0.0f32; 3];

                for ky in 0..side {
                    let sy = (y as isize + ky as isize - half)
                        .clamp(0, height as isize - 1) as usize;
                    for kx in 0..side {
                        let sx = (x as isize + kx as isize - half)
                            .clamp(0, width as isize - 1) as usize;

                        let idx = (sy * width + sx) * CHANNELS;
                        let w = weights[ky * side + kx];
                        sums[0] += pixels[idx] as f32 * w;
                        sums[1] += pixels[idx + 1] as f32 * w;
                        sums[2] += pixels[idx + 2] as f32 * w;
                    }
                }

                let out = (y * width + x) * CHANNELS;
                let out_idx = x * CHANNELS;
                row[out_idx] = sums[0].clamp(0.0, 255.0).round() as u8;
                row[out_idx + 1] = sums[1].clamp(0.0, 255.0).round() as u8;
                row[out_idx + 2] = sums[2].clamp(0.0, 255.0).round() as u8;
                row[out_idx + CH_A] = pixels[out + CH_A];
            }
        });

    let out = RasterImage::from_data(src.width(), src.height(), dst)?;
    Ok(inherit_dpi(out, src))
}

/// Sharpens with the edge-enhance kernel at the given strength.
///
/// Equivalent to `convolve(src, &Kernel::sharpen(strength))`. The pipeline
/// orchestrator skips this stage entirely for strengths <= 0; calling it
/// directly with strength 0 yields an all-zero kernel (black color
/// channels, alpha preserved).
pub fn sharpen(src: &RasterImage, strength: f32) -> Result<RasterImage> {
    debug!(strength, "sharpen");
    convolve(src, &Kernel::sharpen(strength))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn gradient(w: u32, h: u32) -> RasterImage {
        let mut data = Vec::with_capacity((w * h) as usize * CHANNELS);
        for y in 0..h {
            for x in 0..w {
                data.extend_from_slice(&[
                    (x * 29 % 256) as u8,
                    (y * 53 % 256) as u8,
                    ((x ^ y) % 256) as u8,
                    (255 - (x * 7 % 60)) as u8,
                ]);
            }
        }
        RasterImage::from_data(w, h, data).unwrap()
    }

    #[test]
    fn test_kernel_rejects_even_or_zero_side() {
        assert!(matches!(
            Kernel::new(vec![0.0; 4], 2),
            Err(Error::InvalidKernel { .. })
        ));
        assert!(matches!(
            Kernel::new(vec![], 0),
            Err(Error::InvalidKernel { .. })
        ));
    }

    #[test]
    fn test_kernel_rejects_weight_mismatch() {
        assert!(matches!(
            Kernel::new(vec![0.0; 8], 3),
            Err(Error::InvalidKernel { .. })
        ));
    }

    #[test]
    fn test_sharpen_kernel_weights() {
        let k = Kernel::sharpen(2.0);
        assert_eq!(k.side(), 3);
        assert_relative_eq!(k.weights()[4], 10.0);
        assert_relative_eq!(k.weights()[1], -2.0);
        // Base kernel sums to 1, so scaled sum equals the strength
        let sum: f32 = k.weights().iter().sum();
        assert_relative_eq!(sum, 2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_gaussian_normalized() {
        let k = Kernel::gaussian(5, 1.5);
        assert_eq!(k.side(), 5);
        let sum: f32 = k.weights().iter().sum();
        assert_relative_eq!(sum, 1.0, epsilon = 1e-4);
        // Center dominates the corners
        assert!(k.weights()[12] > k.weights()[0]);
    }

    #[test]
    fn test_box_blur_bumps_even_size() {
        let k = Kernel::box_blur(4);
        assert_eq!(k.side(), 5);
    }

    #[test]
    fn test_identity_kernel_is_byte_exact() {
        let src = gradient(9, 7);
        let out = convolve(&src, &Kernel::identity()).unwrap();
        assert_eq!(out.data(), src.data());
    }

    #[test]
    fn test_alpha_passthrough_any_kernel() {
        let src = gradient(8, 8);
        for kernel in [
            Kernel::sharpen(2.5),
            Kernel::gaussian(5, 2.0),
            Kernel::box_blur(3),
            Kernel::new(vec![-3.0; 9], 3).unwrap(),
        ] {
            let out = convolve(&src, &kernel).unwrap();
            for (s, o) in src
                .data()
                .chunks_exact(CHANNELS)
                .zip(out.data().chunks_exact(CHANNELS))
            {
                assert_eq!(s[CH_A], o[CH_A]);
            }
        }
    }

    #[test]
    fn test_sharpen_preserves_constant_regions() {
        // Kernel sums to strength 1.0, so flat areas are unchanged
        let src = RasterImage::filled(6, 6, [80, 120, 160, 255]).unwrap();
        let out = sharpen(&src, 1.0).unwrap();
        assert_eq!(out.data(), src.data());
    }

    #[test]
    fn test_sharpen_boosts_edges() {
        // Vertical edge: dark left half, bright right half
        let mut data = Vec::new();
        for _y in 0..4 {
            for x in 0..4 {
                let v = if x < 2 { 60u8 } else { 180 };
                data.extend_from_slice(&[v, v, v, 255]);
            }
        }
        let src = RasterImage::from_data(4, 4, data).unwrap();
        let out = sharpen(&src, 1.0).unwrap();

        // Bright side of the edge overshoots, dark side undershoots
        assert!(out.pixel(2, 1).unwrap()[0] > 180);
        assert!(out.pixel(1, 1).unwrap()[0] < 60);
    }

    #[test]
    fn test_edge_clamp_replicates_border() {
        // 1x1 image: every kernel tap reads the same pixel
        let src = RasterImage::filled(1, 1, [100, 100, 100, 255]).unwrap();
        let out = convolve(&src, &Kernel::box_blur(5)).unwrap();
        assert_eq!(out.pixel(0, 0), Some([100, 100, 100, 255]));
    }

    #[test]
    fn test_negative_sums_clamp_to_zero() {
        let src = gradient(5, 5);
        let negate = Kernel::new(vec![0.0, 0.0, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0, 0.0], 3).unwrap();
        let out = convolve(&src, &negate).unwrap();
        for px in out.data().chunks_exact(CHANNELS) {
            assert_eq!(px[0], 0);
            assert_eq!(px[1], 0);
            assert_eq!(px[2], 0);
        }
    }
}
