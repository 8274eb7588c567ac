//! Narrowing casts from the floating-point working domain to 8-bit samples.
//!
//! The fusion formulas compute in `f32` and narrow each result back to `u8`
//! storage. Two policies are offered:
//!
//! - [`CastPolicy::Wraparound`] reproduces the NumPy reference's
//!   `astype(np.uint8)` behavior: truncate toward zero, then wrap modulo 256
//!   (`-1.0` → 255, `256.0` → 0). Non-finite values (NaN, ±Inf) map to 0,
//!   matching the x86 float-to-int conversion path the reference rides on.
//! - [`CastPolicy::Saturating`] truncates toward zero and clamps to
//!   `[0, 255]`; NaN maps to 0, `+Inf` to 255, `-Inf` to 0.
//!
//! Neither policy rounds; both truncate, as the reference does.

/// Policy for narrowing `f32` working values to `u8` samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CastPolicy {
    /// Truncate toward zero, wrap modulo 256; non-finite values become 0.
    ///
    /// This is the reference-parity default.
    #[default]
    Wraparound,
    /// Truncate toward zero, clamp to `[0, 255]`; NaN becomes 0.
    Saturating,
}

/// Narrow a working value to a `u8` sample under the given policy.
#[inline]
#[must_use]
pub fn narrow_to_u8(value: f32, policy: CastPolicy) -> u8 {
    match policy {
        CastPolicy::Wraparound => wrap_to_u8_impl(value),
        CastPolicy::Saturating => saturate_to_u8_impl(value),
    }
}

#[inline]
fn wrap_to_u8_impl(value: f32) -> u8 {
    if !value.is_finite() {
        return 0;
    }
    value.trunc().rem_euclid(256.0) as u8
}

#[inline]
fn saturate_to_u8_impl(value: f32) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.trunc().clamp(0.0, 255.0) as u8
}
