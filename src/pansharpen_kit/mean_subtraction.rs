//! Esri-style mean-subtraction fusion.
//!
//! Per pixel, the panchromatic intensity minus the mean of the three
//! multispectral bands forms an adjustment term that is injected into every
//! band:
//!
//! ```text
//! ADJ      = pan - (ms0 + ms1 + ms2) / 3
//! fused[b] = narrow(ms[b] + ADJ)
//! ```
//!
//! The mean and the adjustment are computed in `f32`, so ADJ may be negative;
//! the narrowing back to 8-bit storage follows the selected [`CastPolicy`]
//! (wraparound by default, matching the reference).

use image::{ImageBuffer, Luma, Rgb};
use imageproc::definitions::Image;
use itertools::izip;

use crate::error::FusionError;
use crate::pansharpen_kit::align::align;
use crate::pansharpen_kit::stack::{FUSED_BAND_COUNT, stack_bands};
use crate::utils::{CastPolicy, narrow_to_u8};

/// Esri-style mean-subtraction fusion operation.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanSubtractionFusion {
    /// Narrowing-cast policy for the fused samples
    pub cast_policy: CastPolicy,
}

impl MeanSubtractionFusion {
    /// Create a mean-subtraction operation with the default wraparound cast.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cast_policy: CastPolicy::Wraparound,
        }
    }

    /// Fuse a panchromatic/multispectral pair by mean-subtraction injection.
    ///
    /// Aligns the pair first, then adds the per-pixel adjustment term to each
    /// band.
    ///
    /// # Arguments
    ///
    /// * `pan` - Panchromatic (single-band) image
    /// * `ms` - Multispectral (3-band) image
    ///
    /// # Returns
    ///
    /// The fused 3-band raster with the aligned pair's dimensions
    ///
    /// # Errors
    ///
    /// * [`FusionError::Align`] - When either input is empty or the resample
    ///   collapses to zero pixels
    pub fn fuse(
        &self,
        pan: &Image<Luma<u8>>,
        ms: &Image<Rgb<u8>>,
    ) -> Result<Image<Rgb<u8>>, FusionError> {
        let pair = align(pan, ms)?;
        let (width, height) = pair.dimensions();

        let adjustment: Vec<f32> = izip!(pair.pan.pixels(), pair.ms.pixels())
            .map(|(pan, ms)| {
                let band_sum = f32::from(ms[0]) + f32::from(ms[1]) + f32::from(ms[2]);
                f32::from(pan[0]) - band_sum / FUSED_BAND_COUNT as f32
            })
            .collect();

        let bands: Vec<Image<Luma<u8>>> = (0..FUSED_BAND_COUNT)
            .map(|band| {
                ImageBuffer::from_fn(width, height, |x, y| {
                    let index = (y * width + x) as usize;
                    let sample = f32::from(pair.ms.get_pixel(x, y)[band]) + adjustment[index];
                    Luma([narrow_to_u8(sample, self.cast_policy)])
                })
            })
            .collect();

        stack_bands(&bands).map_err(FusionError::from)
    }
}

/// Fuse by mean subtraction with the default wraparound cast.
///
/// # Errors
///
/// See [`MeanSubtractionFusion::fuse`].
///
/// # Examples
///
/// ```
/// use image::{ImageBuffer, Luma, Rgb};
/// use imageproc::definitions::Image;
/// use pansharpen_kit::mean_subtraction_fusion;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pan: Image<Luma<u8>> = ImageBuffer::from_pixel(2, 2, Luma([200]));
/// let ms: Image<Rgb<u8>> = ImageBuffer::from_pixel(2, 2, Rgb([50, 60, 70]));
///
/// let fused = mean_subtraction_fusion(&pan, &ms)?;
/// assert_eq!(fused.get_pixel(0, 0).0, [190, 200, 210]);
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
pub fn mean_subtraction_fusion(
    pan: &Image<Luma<u8>>,
    ms: &Image<Rgb<u8>>,
) -> Result<Image<Rgb<u8>>, FusionError> {
    MeanSubtractionFusion::new().fuse(pan, ms)
}

/// Extension trait providing mean-subtraction fusion on multispectral images.
///
/// This consumes the multispectral image.
pub trait MeanSubtractionFusionExt {
    /// Fuse this multispectral image with the given panchromatic image.
    ///
    /// # Errors
    ///
    /// See [`MeanSubtractionFusion::fuse`].
    fn fuse_mean_subtraction(self, pan: &Image<Luma<u8>>) -> Result<Image<Rgb<u8>>, FusionError>;
}

impl MeanSubtractionFusionExt for Image<Rgb<u8>> {
    fn fuse_mean_subtraction(self, pan: &Image<Luma<u8>>) -> Result<Image<Rgb<u8>>, FusionError> {
        MeanSubtractionFusion::new().fuse(pan, &self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AlignError;
    use crate::test_utils::*;

    #[test]
    fn fuse_with_exact_mean_applies_adjustment_to_every_band() {
        // mean = 60, ADJ = 140, bands = (190, 200, 210), all in range
        let pan = create_uniform_pan_image(2, 2, 200);
        let ms = create_uniform_ms_image(2, 2, [50, 60, 70]);

        let fused = mean_subtraction_fusion(&pan, &ms).unwrap();
        assert_eq!(*fused.get_pixel(1, 1), Rgb([190, 200, 210]));
    }

    #[test]
    fn fuse_with_wraparound_policy_wraps_overflowing_samples() {
        // mean = 100/3, ADJ = 216.666…; band 0 = trunc(316.66) mod 256 = 60,
        // bands 1 and 2 = trunc(216.66) = 216
        let pan = create_uniform_pan_image(2, 2, 250);
        let ms = create_uniform_ms_image(2, 2, [100, 0, 0]);

        let fused = mean_subtraction_fusion(&pan, &ms).unwrap();
        assert_eq!(*fused.get_pixel(0, 0), Rgb([60, 216, 216]));
    }

    #[test]
    fn fuse_with_saturating_policy_clamps_overflowing_samples() {
        let pan = create_uniform_pan_image(2, 2, 250);
        let ms = create_uniform_ms_image(2, 2, [100, 0, 0]);

        let op = MeanSubtractionFusion {
            cast_policy: CastPolicy::Saturating,
        };

        let fused = op.fuse(&pan, &ms).unwrap();
        assert_eq!(*fused.get_pixel(0, 0), Rgb([255, 216, 216]));
    }

    #[test]
    fn fuse_with_negative_adjustment_wraps_below_zero() {
        // mean = (10 + 34 + 0) / 3 = 14.666…, ADJ = -4.666…
        // bands = (trunc(5.33), trunc(29.33), trunc(-4.66) wrapped) = (5, 29, 252)
        let pan = create_uniform_pan_image(2, 2, 10);
        let ms = create_uniform_ms_image(2, 2, [10, 34, 0]);

        let fused = mean_subtraction_fusion(&pan, &ms).unwrap();
        assert_eq!(*fused.get_pixel(0, 0), Rgb([5, 29, 252]));
    }

    #[test]
    fn fuse_with_mismatched_resolutions_aligns_first() {
        let pan = create_uniform_pan_image(2, 2, 200);
        let ms = create_gradient_ms_image(4, 4);

        let fused = mean_subtraction_fusion(&pan, &ms).unwrap();
        assert_eq!(fused.dimensions(), (2, 2));
    }

    #[test]
    fn fuse_is_deterministic() {
        let pan = create_uniform_pan_image(4, 4, 200);
        let ms = create_gradient_ms_image(8, 6);

        let first = mean_subtraction_fusion(&pan, &ms).unwrap();
        let second = mean_subtraction_fusion(&pan, &ms).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn fuse_with_empty_input_returns_align_error() {
        let pan = create_test_pan_image();
        let ms: Image<Rgb<u8>> = ImageBuffer::new(3, 0);

        let result = mean_subtraction_fusion(&pan, &ms);
        assert_eq!(
            result,
            Err(FusionError::Align(AlignError::EmptyImage {
                width: 3,
                height: 0
            }))
        );
    }

    #[test]
    fn fuse_mean_subtraction_ext_matches_free_function() {
        let pan = create_test_pan_image();
        let ms = create_test_ms_image();

        let from_fn = mean_subtraction_fusion(&pan, &ms).unwrap();
        let from_ext = ms.fuse_mean_subtraction(&pan).unwrap();
        assert_eq!(from_fn, from_ext);
    }
}
