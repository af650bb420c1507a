//! Pipeline orchestration.
//!
//! Runs the stages in a fixed order — Resize → Mirror → ColorAdjust →
//! Sharpen — threading an immutable [`RasterImage`] snapshot from stage to
//! stage. Stages whose parameters are at the identity default are skipped
//! without touching the buffer; the first stage failure aborts the run and
//! propagates to the caller.

use crate::{color, filter, mirror, resize};
use imgx_core::{ColorAdjust, MirrorAxis, RasterImage, Result, ScaleSpec};
use std::borrow::Cow;
use tracing::{debug, trace};

/// Parameters for a full pipeline run.
///
/// Defaults to the full identity: no resize, no mirror, identity color
/// grading, sharpening off. Callers (a CLI or config layer) populate only
/// the knobs they care about.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PipelineOptions {
    /// Target size for the resample stage.
    pub scale: ScaleSpec,
    /// Optional reflection, applied after resizing.
    pub mirror: Option<MirrorAxis>,
    /// Saturation/brightness/contrast grading.
    pub adjust: ColorAdjust,
    /// Sharpening strength; <= 0 disables the stage.
    pub sharpen: f32,
}

/// Runs the pipeline over `src` and returns the transformed image.
///
/// Stage order is fixed: resize, then mirror (if requested), then color
/// adjustment (if not identity), then sharpen (if strength > 0). Each
/// executed stage consumes the previous snapshot and produces a new one;
/// skipped stages cost nothing.
///
/// # Errors
///
/// Propagates the first stage error ([`imgx_core::Error::InvalidDimension`],
/// [`imgx_core::Error::CorruptBuffer`]) and aborts — there is no
/// partial-result recovery.
///
/// # Example
///
/// ```rust
/// use imgx_core::{ColorAdjust, RasterImage, ScaleSpec};
/// use imgx_ops::pipeline::{process, PipelineOptions};
///
/// let src = RasterImage::filled(4, 4, [10, 20, 30, 255]).unwrap();
/// let opts = PipelineOptions {
///     scale: ScaleSpec::Factor(2.0),
///     adjust: ColorAdjust { saturation: 0, ..Default::default() },
///     ..Default::default()
/// };
/// let out = process(&src, &opts).unwrap();
/// assert_eq!((out.width(), out.height()), (8, 8));
/// ```
pub fn process(src: &RasterImage, opts: &PipelineOptions) -> Result<RasterImage> {
    src.validate()?;
    let (target_w, target_h) = opts.scale.resolve(src.width(), src.height())?;

    let mut image: Cow<'_, RasterImage> = Cow::Borrowed(src);

    if target_w != src.width() || target_h != src.height() {
        debug!(target_w, target_h, "stage: resize");
        image = Cow::Owned(resize::resize(&image, target_w, target_h)?);
    } else {
        trace!("stage: resize skipped (identity)");
    }

    if let Some(axis) = opts.mirror {
        debug!(?axis, "stage: mirror");
        image = Cow::Owned(mirror::mirror(&image, axis));
    }

    if !opts.adjust.is_identity() {
        debug!(
            saturation = opts.adjust.saturation,
            brightness = opts.adjust.brightness,
            contrast = opts.adjust.contrast,
            "stage: color adjust"
        );
        image = Cow::Owned(color::adjust(&image, &opts.adjust));
    } else {
        trace!("stage: color adjust skipped (identity)");
    }

    if opts.sharpen > 0.0 {
        debug!(strength = opts.sharpen, "stage: sharpen");
        image = Cow::Owned(filter::sharpen(&image, opts.sharpen)?);
    } else {
        trace!("stage: sharpen skipped");
    }

    Ok(image.into_owned())
}
