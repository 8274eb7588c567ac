//! Alignment of a panchromatic/multispectral image pair onto a shared pixel grid.
//!
//! All three fusion operations start here: the multispectral image is
//! resampled by the `ms_width / pan_width` ratio with a cubic (Catmull-Rom)
//! kernel, then both images are cropped, top-left anchored, to the overlapping
//! region. Alignment is purely pixel-grid cropping; there is no georeferenced
//! resampling, and a native aspect-ratio mismatch between the two inputs is
//! not an error — it silently results in anisotropic cropping.

use image::{Luma, Rgb, imageops};
use imageproc::definitions::Image;

use crate::error::AlignError;
use crate::utils::validate_non_empty_image;

/// A panchromatic/multispectral pair sharing identical dimensions.
///
/// Produced by [`align`]; both images are guaranteed to have equal width and
/// height. The pair is call-local: each fusion invocation creates and owns its
/// own `AlignedPair`, so concurrent fusion calls never share state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedPair {
    /// Panchromatic image, cropped to the common extent
    pub pan: Image<Luma<u8>>,
    /// Multispectral image, resampled and cropped to the common extent
    pub ms: Image<Rgb<u8>>,
}

impl AlignedPair {
    /// Common dimensions of the pair as `(width, height)`.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        self.pan.dimensions()
    }
}

/// Aligns a multispectral image onto a panchromatic image's pixel grid.
///
/// The multispectral image is resampled on both axes by the real-valued ratio
/// `ms_width / pan_width` using Catmull-Rom interpolation. Because the target
/// dimensions come from rounding, they are not guaranteed to equal the
/// panchromatic dimensions; each axis is then reconciled independently by
/// cropping whichever image is larger down to the other's extent, keeping the
/// top rows and left columns.
///
/// Aligning a pair that already shares dimensions is a no-op: the resample is
/// skipped (the ratio maps the image onto itself) and both crops are
/// identities, so the returned pair is bit-identical to the inputs.
///
/// # Arguments
///
/// * `pan` - Panchromatic (single-band) image
/// * `ms` - Multispectral (3-band) image
///
/// # Returns
///
/// An [`AlignedPair`] whose images share identical dimensions
///
/// # Errors
///
/// * [`AlignError::EmptyImage`] - When either input has zero width or height
/// * [`AlignError::ResampledToEmpty`] - When the resample ratio rounds a
///   target axis down to zero pixels
///
/// # Examples
///
/// ```
/// use image::{ImageBuffer, Luma, Rgb};
/// use imageproc::definitions::Image;
/// use pansharpen_kit::align;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pan: Image<Luma<u8>> = ImageBuffer::from_pixel(2, 2, Luma([100]));
/// let ms: Image<Rgb<u8>> = ImageBuffer::from_pixel(4, 4, Rgb([50, 60, 70]));
///
/// let pair = align(&pan, &ms)?;
/// assert_eq!(pair.pan.dimensions(), pair.ms.dimensions());
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
pub fn align(pan: &Image<Luma<u8>>, ms: &Image<Rgb<u8>>) -> Result<AlignedPair, AlignError> {
    validate_non_empty_image(pan)?;
    validate_non_empty_image(ms)?;

    let rescaled_ms = resample_to_pan_grid_impl(pan, ms)?;

    let (pan, rescaled_ms) = reconcile_heights_impl(pan.clone(), rescaled_ms);
    let (pan, ms) = reconcile_widths_impl(pan, rescaled_ms);

    debug_assert_eq!(pan.dimensions(), ms.dimensions());
    Ok(AlignedPair { pan, ms })
}

/// Resamples the multispectral image by the `ms_width / pan_width` ratio.
///
/// Target dimensions mirror OpenCV's `resize` rounding: `round(axis * ratio)`.
/// The resample is skipped when the target equals the current dimensions,
/// which keeps alignment of an already-aligned pair bit-exact.
fn resample_to_pan_grid_impl(
    pan: &Image<Luma<u8>>,
    ms: &Image<Rgb<u8>>,
) -> Result<Image<Rgb<u8>>, AlignError> {
    let ratio = ms.width() as f32 / pan.width() as f32;
    let target_width = (ms.width() as f32 * ratio).round() as u32;
    let target_height = (ms.height() as f32 * ratio).round() as u32;

    if target_width == 0 || target_height == 0 {
        return Err(AlignError::ResampledToEmpty {
            width: target_width,
            height: target_height,
        });
    }

    if (target_width, target_height) == ms.dimensions() {
        return Ok(ms.clone());
    }

    Ok(imageops::resize(
        ms,
        target_width,
        target_height,
        imageops::FilterType::CatmullRom,
    ))
}

/// Crops the taller image down to the shorter one's height, keeping top rows.
fn reconcile_heights_impl(
    pan: Image<Luma<u8>>,
    ms: Image<Rgb<u8>>,
) -> (Image<Luma<u8>>, Image<Rgb<u8>>) {
    if pan.height() < ms.height() {
        let cropped = imageops::crop_imm(&ms, 0, 0, ms.width(), pan.height()).to_image();
        (pan, cropped)
    } else if ms.height() < pan.height() {
        let cropped = imageops::crop_imm(&pan, 0, 0, pan.width(), ms.height()).to_image();
        (cropped, ms)
    } else {
        (pan, ms)
    }
}

/// Crops the wider image down to the narrower one's width, keeping left columns.
fn reconcile_widths_impl(
    pan: Image<Luma<u8>>,
    ms: Image<Rgb<u8>>,
) -> (Image<Luma<u8>>, Image<Rgb<u8>>) {
    if pan.width() < ms.width() {
        let cropped = imageops::crop_imm(&ms, 0, 0, pan.width(), ms.height()).to_image();
        (pan, cropped)
    } else if ms.width() < pan.width() {
        let cropped = imageops::crop_imm(&pan, 0, 0, ms.width(), pan.height()).to_image();
        (cropped, ms)
    } else {
        (pan, ms)
    }
}
