//! Simple mean fusion.
//!
//! The least sophisticated of the three operations: each fused band is the
//! unweighted average of the band and the panchromatic intensity, computed in
//! `f32` and narrowed once at the end:
//!
//! ```text
//! fused[b] = narrow(0.5 · (ms[b] + pan))
//! ```

use image::{ImageBuffer, Luma, Rgb};
use imageproc::definitions::Image;

use crate::error::FusionError;
use crate::pansharpen_kit::align::align;
use crate::pansharpen_kit::stack::{FUSED_BAND_COUNT, stack_bands};
use crate::utils::{CastPolicy, narrow_to_u8};

/// Simple mean fusion operation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleMeanFusion {
    /// Narrowing-cast policy for the fused samples
    pub cast_policy: CastPolicy,
}

impl SimpleMeanFusion {
    /// Create a simple mean operation with the default wraparound cast.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cast_policy: CastPolicy::Wraparound,
        }
    }

    /// Fuse a panchromatic/multispectral pair by per-band averaging.
    ///
    /// Aligns the pair first.
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

        let bands: Vec<Image<Luma<u8>>> = (0..FUSED_BAND_COUNT)
            .map(|band| {
                ImageBuffer::from_fn(width, height, |x, y| {
                    let pan = f32::from(pair.pan.get_pixel(x, y)[0]);
                    let sample = 0.5 * (f32::from(pair.ms.get_pixel(x, y)[band]) + pan);
                    Luma([narrow_to_u8(sample, self.cast_policy)])
                })
            })
            .collect();

        stack_bands(&bands).map_err(FusionError::from)
    }
}

/// Fuse by per-band averaging with the default wraparound cast.
///
/// # Errors
///
/// See [`SimpleMeanFusion::fuse`].
///
/// # Examples
///
/// ```
/// use image::{ImageBuffer, Luma, Rgb};
/// use imageproc::definitions::Image;
/// use pansharpen_kit::simple_mean_fusion;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pan: Image<Luma<u8>> = ImageBuffer::from_pixel(2, 2, Luma([100]));
/// let ms: Image<Rgb<u8>> = ImageBuffer::from_pixel(2, 2, Rgb([50, 50, 50]));
///
/// let fused = simple_mean_fusion(&pan, &ms)?;
/// assert_eq!(fused.get_pixel(0, 0).0, [75, 75, 75]);
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
pub fn simple_mean_fusion(
    pan: &Image<Luma<u8>>,
    ms: &Image<Rgb<u8>>,
) -> Result<Image<Rgb<u8>>, FusionError> {
    SimpleMeanFusion::new().fuse(pan, ms)
}

/// Extension trait providing simple mean fusion on multispectral images.
///
/// This consumes the multispectral image.
pub trait SimpleMeanFusionExt {
    /// Fuse this multispectral image with the given panchromatic image.
    ///
    /// # Errors
    ///
    /// See [`SimpleMeanFusion::fuse`].
    fn fuse_simple_mean(self, pan: &Image<Luma<u8>>) -> Result<Image<Rgb<u8>>, FusionError>;
}

impl SimpleMeanFusionExt for Image<Rgb<u8>> {
    fn fuse_simple_mean(self, pan: &Image<Luma<u8>>) -> Result<Image<Rgb<u8>>, FusionError> {
        SimpleMeanFusion::new().fuse(pan, &self)
    }
}
