//! Combined saturation/brightness/contrast parameters.
//!
//! One parameter struct drives the whole color grading stage so the pixel
//! loop runs once regardless of how many of the three knobs are active.
//!
//! - Saturation: 0 = grayscale, 100 = unchanged, >100 = oversaturated
//! - Brightness: 0 = unchanged, -100 = fully dark, +100 = fully bright
//! - Contrast:   0 = unchanged, -100 = flat gray, +100 = strong contrast

/// Rec.709 luma weight for red.
pub const LUMA_R: f32 = 0.2126;
/// Rec.709 luma weight for green.
pub const LUMA_G: f32 = 0.7152;
/// Rec.709 luma weight for blue.
pub const LUMA_B: f32 = 0.0722;

/// Parameters for the color grading stage.
///
/// Integer percentages, matching the external CLI/config contract.
/// Saturation below 0 is clamped before use; brightness and contrast are
/// specified for -100..100 and values outside that range are not rejected —
/// the final per-channel clamp bounds the damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorAdjust {
    /// Saturation percentage (100 = unchanged).
    pub saturation: i32,
    /// Additive brightness (-100..100, 0 = unchanged).
    pub brightness: i32,
    /// Contrast (-100..100, 0 = unchanged); applied as a squared curve.
    pub contrast: i32,
}

impl Default for ColorAdjust {
    fn default() -> Self {
        Self {
            saturation: 100,
            brightness: 0,
            contrast: 0,
        }
    }
}

impl ColorAdjust {
    /// Create identity (no change).
    pub fn identity() -> Self {
        Self::default()
    }

    /// Check if this is identity (no-op); the orchestrator skips the stage.
    pub fn is_identity(&self) -> bool {
        self.saturation == 100 && self.brightness == 0 && self.contrast == 0
    }

    /// Saturation blend factor: `max(0, saturation) / 100`.
    #[inline]
    pub fn sat_factor(&self) -> f32 {
        self.saturation.max(0) as f32 / 100.0
    }

    /// Additive brightness offset in normalized [0,1] space.
    #[inline]
    pub fn brightness_offset(&self) -> f32 {
        self.brightness as f32 / 100.0
    }

    /// Multiplicative contrast factor, squared for a steeper response curve.
    #[inline]
    pub fn contrast_factor(&self) -> f32 {
        let linear = (100 + self.contrast) as f32 / 100.0;
        linear * linear
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_is_identity() {
        let adj = ColorAdjust::default();
        assert!(adj.is_identity());
        assert_relative_eq!(adj.sat_factor(), 1.0);
        assert_relative_eq!(adj.brightness_offset(), 0.0);
        assert_relative_eq!(adj.contrast_factor(), 1.0);
    }

    #[test]
    fn test_negative_saturation_clamped() {
        let adj = ColorAdjust { saturation: -50, ..Default::default() };
        assert_relative_eq!(adj.sat_factor(), 0.0);
    }

    #[test]
    fn test_contrast_curve_is_squared() {
        let adj = ColorAdjust { contrast: 100, ..Default::default() };
        // (200/100)^2 = 4
        assert_relative_eq!(adj.contrast_factor(), 4.0);

        let flat = ColorAdjust { contrast: -100, ..Default::default() };
        assert_relative_eq!(flat.contrast_factor(), 0.0);
    }

    #[test]
    fn test_luma_weights_sum_to_one() {
        assert_relative_eq!(LUMA_R + LUMA_G + LUMA_B, 1.0, epsilon = 1e-6);
    }
}
