//! Brovey transform pansharpening.
//!
//! The Brovey transform injects panchromatic detail into each multispectral
//! band through a per-pixel detail normalization factor:
//!
//! ```text
//! DNF      = (pan - w·ms0) / (w·ms0 + w·ms1 + w·ms2)
//! fused[b] = narrow(ms[b] · DNF)
//! ```
//!
//! where `w` is a tuning weight (default [`DEFAULT_BROVEY_WEIGHT`]) and all
//! arithmetic runs in `f32`.
//!
//! ## Zero-denominator behavior
//!
//! When the weighted band sum is zero (a black multispectral pixel), the DNF
//! division is deliberately left unguarded under the default
//! [`DnfPolicy::Propagate`]: it produces IEEE NaN or ±Inf, and the narrowing
//! cast then maps the non-finite band values per [`CastPolicy`] (0 under the
//! default wraparound policy). This replicates the reference arithmetic
//! exactly. [`DnfPolicy::ClampZero`] is the stricter alternative that
//! substitutes a DNF of 0 for such pixels. Either way, affected pixels are
//! counted and reported through a single `log::warn!` per fusion call; they
//! never abort the fusion.

use image::{ImageBuffer, Luma, Rgb};
use imageproc::definitions::Image;
use itertools::izip;

use crate::error::FusionError;
use crate::pansharpen_kit::align::{AlignedPair, align};
use crate::pansharpen_kit::stack::{FUSED_BAND_COUNT, stack_bands};
use crate::utils::{CastPolicy, narrow_to_u8};

/// Default Brovey tuning weight.
pub const DEFAULT_BROVEY_WEIGHT: f32 = 0.2;

/// Handling of pixels whose weighted band sum is zero (or vanishingly small).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DnfPolicy {
    /// Divide unguarded; NaN/±Inf flow into the narrowing cast.
    ///
    /// This is the reference-parity default.
    #[default]
    Propagate,
    /// Substitute a DNF of 0 for affected pixels.
    ClampZero,
}

/// Brovey transform pansharpening operation.
#[derive(Debug, Clone, Copy)]
pub struct BroveyPansharpen {
    /// Brovey tuning weight; the recognized range is `(0, 1]` but other
    /// positive values are accepted unchecked
    pub weight: f32,
    /// Zero-denominator handling
    pub dnf_policy: DnfPolicy,
    /// Narrowing-cast policy for the fused samples
    pub cast_policy: CastPolicy,
}

impl Default for BroveyPansharpen {
    fn default() -> Self {
        Self::new(DEFAULT_BROVEY_WEIGHT)
    }
}

impl BroveyPansharpen {
    /// Create a Brovey operation with the given weight and default policies.
    #[must_use]
    pub const fn new(weight: f32) -> Self {
        Self {
            weight,
            dnf_policy: DnfPolicy::Propagate,
            cast_policy: CastPolicy::Wraparound,
        }
    }

    /// Fuse a panchromatic/multispectral pair with the Brovey transform.
    ///
    /// Aligns the pair first, then applies the per-pixel DNF arithmetic.
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
        let (dnf, degenerate_pixels) = compute_dnf_impl(&pair, self.weight, self.dnf_policy);

        if degenerate_pixels > 0 {
            log::warn!(
                "brovey fusion: weighted band sum was zero or near-zero for \
                 {degenerate_pixels} pixel(s) ({:?} policy applied)",
                self.dnf_policy
            );
        }

        let (width, height) = pair.dimensions();
        let bands: Vec<Image<Luma<u8>>> = (0..FUSED_BAND_COUNT)
            .map(|band| {
                ImageBuffer::from_fn(width, height, |x, y| {
                    let index = (y * width + x) as usize;
                    let sample = f32::from(pair.ms.get_pixel(x, y)[band]) * dnf[index];
                    Luma([narrow_to_u8(sample, self.cast_policy)])
                })
            })
            .collect();

        stack_bands(&bands).map_err(FusionError::from)
    }
}

/// Computes the per-pixel detail normalization factor grid in row-major order.
///
/// Returns the grid together with the number of pixels whose weighted band
/// sum was zero or near-zero.
fn compute_dnf_impl(pair: &AlignedPair, weight: f32, policy: DnfPolicy) -> (Vec<f32>, usize) {
    let mut degenerate_pixels = 0usize;

    let dnf = izip!(pair.pan.pixels(), pair.ms.pixels())
        .map(|(pan, ms)| {
            let pan = f32::from(pan[0]);
            let weighted0 = weight * f32::from(ms[0]);
            let weighted1 = weight * f32::from(ms[1]);
            let weighted2 = weight * f32::from(ms[2]);
            let denominator = weighted0 + weighted1 + weighted2;

            if denominator.abs() < f32::EPSILON {
                degenerate_pixels += 1;
                if policy == DnfPolicy::ClampZero {
                    return 0.0;
                }
            }

            (pan - weighted0) / denominator
        })
        .collect();

    (dnf, degenerate_pixels)
}

/// Fuse with the Brovey transform using the given weight and default policies.
///
/// # Errors
///
/// See [`BroveyPansharpen::fuse`].
///
/// # Examples
///
/// ```
/// use image::{ImageBuffer, Luma, Rgb};
/// use imageproc::definitions::Image;
/// use pansharpen_kit::{DEFAULT_BROVEY_WEIGHT, brovey_pansharpen};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pan: Image<Luma<u8>> = ImageBuffer::from_pixel(2, 2, Luma([120]));
/// let ms: Image<Rgb<u8>> = ImageBuffer::from_pixel(2, 2, Rgb([40, 60, 80]));
///
/// let fused = brovey_pansharpen(&pan, &ms, DEFAULT_BROVEY_WEIGHT)?;
/// assert_eq!(fused.dimensions(), (2, 2));
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
pub fn brovey_pansharpen(
    pan: &Image<Luma<u8>>,
    ms: &Image<Rgb<u8>>,
    weight: f32,
) -> Result<Image<Rgb<u8>>, FusionError> {
    BroveyPansharpen::new(weight).fuse(pan, ms)
}

/// Extension trait providing Brovey pansharpening on multispectral images.
///
/// This consumes the multispectral image.
pub trait BroveyPansharpenExt {
    /// Pansharpen this multispectral image with the given panchromatic image.
    ///
    /// # Errors
    ///
    /// See [`BroveyPansharpen::fuse`].
    fn pansharpen_brovey(
        self,
        pan: &Image<Luma<u8>>,
        weight: f32,
    ) -> Result<Image<Rgb<u8>>, FusionError>;
}

impl BroveyPansharpenExt for Image<Rgb<u8>> {
    fn pansharpen_brovey(
        self,
        pan: &Image<Luma<u8>>,
        weight: f32,
    ) -> Result<Image<Rgb<u8>>, FusionError> {
        BroveyPansharpen::new(weight).fuse(pan, &self)
    }
}
