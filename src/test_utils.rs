//! Shared fixture builders for unit tests.

use image::{ImageBuffer, Luma, Rgb};
use imageproc::definitions::Image;

/// Creates a 2x2 panchromatic image with distinct pixel values.
pub fn create_test_pan_image() -> Image<Luma<u8>> {
    ImageBuffer::from_fn(2, 2, |x, y| Luma([(100 + 10 * (y * 2 + x)) as u8]))
}

/// Creates a 2x2 multispectral image with distinct pixel values.
pub fn create_test_ms_image() -> Image<Rgb<u8>> {
    ImageBuffer::from_fn(2, 2, |x, y| {
        let base = (20 * (y * 2 + x)) as u8;
        Rgb([40 + base, 60 + base, 80 + base])
    })
}

/// Creates a uniform panchromatic image of the given dimensions.
pub fn create_uniform_pan_image(width: u32, height: u32, value: u8) -> Image<Luma<u8>> {
    ImageBuffer::from_pixel(width, height, Luma([value]))
}

/// Creates a uniform multispectral image of the given dimensions.
pub fn create_uniform_ms_image(width: u32, height: u32, bands: [u8; 3]) -> Image<Rgb<u8>> {
    ImageBuffer::from_pixel(width, height, Rgb(bands))
}

/// Creates a multispectral image with a per-pixel gradient, useful when a
/// test needs non-trivial resampling input.
pub fn create_gradient_ms_image(width: u32, height: u32) -> Image<Rgb<u8>> {
    ImageBuffer::from_fn(width, height, |x, y| {
        Rgb([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            ((x + y) * 255 / (width + height).max(1)) as u8,
        ])
    })
}
