//! Stacking per-band sample grids into a fused multispectral raster.

use image::{ImageBuffer, Luma, Rgb};
use imageproc::definitions::Image;

use crate::error::StackError;

/// Number of bands in a fused raster, fixed by the `Rgb<u8>` output type.
pub const FUSED_BAND_COUNT: usize = 3;

/// Stacks per-band grids into a single 3-band raster.
///
/// Grids are interleaved in the order supplied: `bands[0]` becomes band 0 of
/// the output, and so on. All grids must share identical dimensions; the
/// fusion operations guarantee this by computing every band from one aligned
/// pair, so a mismatch here signals an internal contract violation rather
/// than a user error.
///
/// # Arguments
///
/// * `bands` - Ordered per-band grids, exactly [`FUSED_BAND_COUNT`] of them
///
/// # Returns
///
/// A 3-band raster with the grids' shared dimensions
///
/// # Errors
///
/// * [`StackError::BandCountMismatch`] - When the slice does not hold exactly
///   three grids
/// * [`StackError::BandShapeMismatch`] - When any grid's dimensions differ
///   from the first grid's
///
/// # Examples
///
/// ```
/// use image::{ImageBuffer, Luma};
/// use imageproc::definitions::Image;
/// use pansharpen_kit::stack_bands;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let band: Image<Luma<u8>> = ImageBuffer::from_pixel(2, 2, Luma([40]));
/// let fused = stack_bands(&[band.clone(), band.clone(), band])?;
/// assert_eq!(fused.dimensions(), (2, 2));
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
pub fn stack_bands(bands: &[Image<Luma<u8>>]) -> Result<Image<Rgb<u8>>, StackError> {
    let [band0, band1, band2] = bands else {
        return Err(StackError::BandCountMismatch {
            expected: FUSED_BAND_COUNT,
            actual: bands.len(),
        });
    };

    let (width, height) = band0.dimensions();
    for (index, band) in bands.iter().enumerate() {
        let (actual_width, actual_height) = band.dimensions();
        if (actual_width, actual_height) != (width, height) {
            return Err(StackError::BandShapeMismatch {
                band: index,
                expected_width: width,
                expected_height: height,
                actual_width,
                actual_height,
            });
        }
    }

    Ok(ImageBuffer::from_fn(width, height, |x, y| {
        Rgb([
            band0.get_pixel(x, y)[0],
            band1.get_pixel(x, y)[0],
            band2.get_pixel(x, y)[0],
        ])
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::ImageBuffer;

    fn uniform_band(width: u32, height: u32, value: u8) -> Image<Luma<u8>> {
        ImageBuffer::from_pixel(width, height, Luma([value]))
    }

    #[test]
    fn stack_bands_with_valid_grids_preserves_band_order() {
        let bands = [
            uniform_band(2, 2, 10),
            uniform_band(2, 2, 20),
            uniform_band(2, 2, 30),
        ];

        let fused = stack_bands(&bands).unwrap();

        assert_eq!(fused.dimensions(), (2, 2));
        assert_eq!(*fused.get_pixel(1, 1), Rgb([10, 20, 30]));
    }

    #[test]
    fn stack_bands_with_wrong_band_count_returns_error() {
        let bands = [uniform_band(2, 2, 10), uniform_band(2, 2, 20)];

        let result = stack_bands(&bands);
        assert_eq!(
            result,
            Err(StackError::BandCountMismatch {
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn stack_bands_with_mismatched_shape_returns_error() {
        let bands = [
            uniform_band(2, 2, 10),
            uniform_band(2, 3, 20),
            uniform_band(2, 2, 30),
        ];

        let result = stack_bands(&bands);
        assert_eq!(
            result,
            Err(StackError::BandShapeMismatch {
                band: 1,
                expected_width: 2,
                expected_height: 2,
                actual_width: 2,
                actual_height: 3,
            })
        );
    }
}
