//! Internal utility functions for pansharpen-kit.
//!
//! This module contains common functionality used across different fusion
//! operations.

mod narrow;
pub use narrow::{CastPolicy, narrow_to_u8};

use image::Pixel;
use imageproc::definitions::Image;

use crate::error::AlignError;

/// Validates that an image has non-zero dimensions.
///
/// # Arguments
///
/// * `image` - The image to validate
///
/// # Returns
///
/// `Ok(())` if the dimensions are valid, otherwise [`AlignError::EmptyImage`]
pub fn validate_non_empty_image<P>(image: &Image<P>) -> Result<(), AlignError>
where
    P: Pixel,
{
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        Err(AlignError::EmptyImage { width, height })
    } else {
        Ok(())
    }
}
