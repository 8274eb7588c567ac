//! # pansharpen-kit
//!
//! A Rust library for pansharpening: fusing a high-resolution panchromatic
//! image with a lower-resolution multispectral image into a single raster
//! that combines the spatial detail of the former with the color information
//! of the latter.
//!
//! This crate provides three alternative fusion operations sharing one
//! alignment stage:
//!
//! - **Brovey Transform**: Ratio-based band injection via a per-pixel detail
//!   normalization factor with a tunable weight
//! - **Mean-Subtraction Fusion**: Esri-style injection of the pan-minus-band-mean
//!   adjustment into every band
//! - **Simple Mean Fusion**: Unweighted average of the panchromatic intensity
//!   and each band
//! - **Alignment**: Cubic resampling of the multispectral image onto the
//!   panchromatic pixel grid, followed by top-left-anchored cropping to the
//!   common extent
//! - **Band Stacking**: Assembly of per-band sample grids into the fused raster
//!
//! All per-pixel arithmetic runs in `f32` and is narrowed back to 8-bit
//! storage under an explicit, tested [`CastPolicy`] (reference-parity
//! wraparound by default, saturating clamp as an opt-in deviation).
//!
//! The core is pure, synchronous array arithmetic: it performs no file or
//! network I/O, holds no state across calls, and every intermediate is owned
//! by the calling invocation, so independent fusion calls can run in parallel
//! without coordination. Decoding input rasters and encoding the fused result
//! are left to the caller (the `image` crate's readers and writers slot in
//! directly).
//!
//! ## Example Usage
//!
//! ```no_run
//! use pansharpen_kit::{BroveyPansharpenExt, MeanSubtractionFusionExt, SimpleMeanFusionExt};
//! use imageproc::definitions::Image;
//! use image::{Luma, Rgb};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Brovey pansharpening with the default weight
//! let pan: Image<Luma<u8>> = Image::new(200, 200);
//! let ms: Image<Rgb<u8>> = Image::new(100, 100);
//! let fused = ms.pansharpen_brovey(&pan, 0.2)?;
//!
//! // Esri-style mean-subtraction fusion
//! let ms: Image<Rgb<u8>> = Image::new(100, 100);
//! let fused = ms.fuse_mean_subtraction(&pan)?;
//!
//! // Simple per-band averaging
//! let ms: Image<Rgb<u8>> = Image::new(100, 100);
//! let fused = ms.fuse_simple_mean(&pan)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! - `serde`: Enables serialization support for the policy enums (optional)

mod error;
mod pansharpen_kit;
mod utils;

#[cfg(test)]
mod test_utils;

pub use error::{AlignError, FusionError, StackError};
pub use pansharpen_kit::align::{AlignedPair, align};
pub use pansharpen_kit::brovey::{
    BroveyPansharpen, BroveyPansharpenExt, DEFAULT_BROVEY_WEIGHT, DnfPolicy, brovey_pansharpen,
};
pub use pansharpen_kit::mean_subtraction::{
    MeanSubtractionFusion, MeanSubtractionFusionExt, mean_subtraction_fusion,
};
pub use pansharpen_kit::simple_mean::{SimpleMeanFusion, SimpleMeanFusionExt, simple_mean_fusion};
pub use pansharpen_kit::stack::{FUSED_BAND_COUNT, stack_bands};
pub use utils::CastPolicy;

// Re-export imageproc::definitions::Image for convenience
pub use imageproc::definitions::Image;
