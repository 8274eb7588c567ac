use thiserror::Error;

/// Errors raised by the alignment stage.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AlignError {
    /// An input raster has zero width or height.
    #[error("input image must have non-zero dimensions, got {width}x{height}")]
    EmptyImage {
        /// Width of the offending image
        width: u32,
        /// Height of the offending image
        height: u32,
    },

    /// Resampling the multispectral image rounded one of its axes down to zero.
    #[error("resampling collapsed the multispectral image to {width}x{height}")]
    ResampledToEmpty {
        /// Resample target width
        width: u32,
        /// Resample target height
        height: u32,
    },
}

/// Errors raised when stacking per-band grids into a fused raster.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StackError {
    /// The number of supplied band grids does not match the output band count.
    #[error("expected {expected} band grids, got {actual}")]
    BandCountMismatch {
        /// Band count of the output raster
        expected: usize,
        /// Number of grids supplied
        actual: usize,
    },

    /// A band grid's dimensions differ from the first grid's.
    #[error(
        "band {band} has dimensions {actual_width}x{actual_height}, \
         expected {expected_width}x{expected_height}"
    )]
    BandShapeMismatch {
        /// Index of the offending grid
        band: usize,
        /// Expected width (taken from band 0)
        expected_width: u32,
        /// Expected height (taken from band 0)
        expected_height: u32,
        /// Actual width of the offending grid
        actual_width: u32,
        /// Actual height of the offending grid
        actual_height: u32,
    },
}

/// Errors raised by the fusion operations.
///
/// A fusion call either fully succeeds or fails before producing output;
/// per-pixel numeric edge cases (see the Brovey zero-denominator behavior)
/// are not errors and never abort a call.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FusionError {
    /// The alignment stage rejected the inputs.
    #[error(transparent)]
    Align(#[from] AlignError),

    /// Band stacking failed; signals an internal contract violation since
    /// aligned inputs always produce same-shaped band grids.
    #[error(transparent)]
    Stack(#[from] StackError),
}
