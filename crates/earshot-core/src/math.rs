//! Scalar helpers for levels, pitch intervals and buffers.
//!
//! Nothing here allocates, so all of it is available without `std`.
//!
//! # Levels
//!
//! - [`linear_to_db`] - Magnitude ratio in dB
//! - [`level_db`] - Level of one magnitude relative to another
//!
//! # Pitch Intervals
//!
//! - [`cents`] - Interval between two frequencies in cents (1200 per octave)
//! - [`semitones`] - Interval between two frequencies in equal-tempered semitones
//!
//! # Buffers
//!
//! - [`peak_abs`] - Largest absolute sample value
//! - [`normalize_peak`] - Scale a buffer so its peak is 1.0

use libm::{fabsf, log10f, log2f};

/// Magnitude ratio in decibels, `20 log10(ratio)`.
///
/// Ratios at or below `1e-10` are floored there, so silence reads as
/// -200 dB instead of negative infinity.
///
/// ```rust
/// use earshot_core::linear_to_db;
///
/// assert!(linear_to_db(1.0).abs() < 1e-6);
/// assert!((linear_to_db(0.5) + 6.0206).abs() < 1e-3);
/// ```
#[inline]
pub fn linear_to_db(ratio: f32) -> f32 {
    20.0 * log10f(ratio.max(1e-10))
}

/// Level of `magnitude` relative to `reference`, in dB.
///
/// Used for harmonic levels relative to the fundamental: equal magnitudes
/// give 0 dB, half the reference gives about -6 dB.
#[inline]
pub fn level_db(magnitude: f32, reference: f32) -> f32 {
    if reference <= 0.0 {
        return 0.0;
    }
    linear_to_db(magnitude / reference)
}

/// Interval from `reference_hz` to `freq_hz` in cents.
///
/// `1200 * log2(freq / reference)`. Positive when `freq_hz` is sharp of the
/// reference.
///
/// # Example
/// ```rust
/// use earshot_core::cents;
///
/// assert!((cents(880.0, 440.0) - 1200.0).abs() < 1e-3);
/// assert!(cents(440.0, 440.0).abs() < 1e-6);
/// ```
#[inline]
pub fn cents(freq_hz: f32, reference_hz: f32) -> f32 {
    1200.0 * log2f(freq_hz / reference_hz)
}

/// Interval from `reference_hz` to `freq_hz` in equal-tempered semitones.
#[inline]
pub fn semitones(freq_hz: f32, reference_hz: f32) -> f32 {
    12.0 * log2f(freq_hz / reference_hz)
}

/// Zero out magnitudes below 1e-20.
///
/// Applied to recursive filter state after every sample.
#[inline]
pub fn flush_denormal(x: f32) -> f32 {
    if fabsf(x) < 1e-20 { 0.0 } else { x }
}

/// Largest absolute sample value in a buffer (0.0 for an empty buffer).
pub fn peak_abs(samples: &[f32]) -> f32 {
    samples.iter().fold(0.0f32, |acc, &s| acc.max(fabsf(s)))
}

/// Scale `samples` in place so the peak absolute value is 1.0.
///
/// Returns the gain that was applied. Silent buffers are left untouched and
/// report a gain of 1.0.
pub fn normalize_peak(samples: &mut [f32]) -> f32 {
    let peak = peak_abs(samples);
    if peak <= 0.0 {
        return 1.0;
    }
    let gain = 1.0 / peak;
    for s in samples.iter_mut() {
        *s *= gain;
    }
    gain
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decade_is_twenty_db() {
        assert!((linear_to_db(0.1) + 20.0).abs() < 1e-4);
        assert!((linear_to_db(10.0) - 20.0).abs() < 1e-4);
    }

    #[test]
    fn silence_floors_at_minus_200_db() {
        assert!(linear_to_db(0.0).is_finite());
        assert!((linear_to_db(0.0) - (-200.0)).abs() < 0.01);
    }

    #[test]
    fn level_is_relative_to_reference() {
        assert!(level_db(1.0, 1.0).abs() < 1e-6);
        assert!((level_db(0.5, 1.0) - (-6.0206)).abs() < 1e-3);
        assert_eq!(level_db(1.0, 0.0), 0.0);
    }

    #[test]
    fn octave_is_1200_cents() {
        assert!((cents(880.0, 440.0) - 1200.0).abs() < 1e-3);
        assert!((cents(220.0, 440.0) + 1200.0).abs() < 1e-3);
        assert!((semitones(466.1638, 440.0) - 1.0).abs() < 1e-3);
    }

    #[test]
    fn tiny_state_flushes_to_zero() {
        assert_eq!(flush_denormal(1.0), 1.0);
        assert_eq!(flush_denormal(-0.5), -0.5);
        assert_eq!(flush_denormal(1e-21), 0.0);
        assert_eq!(flush_denormal(-1e-21), 0.0);
    }

    #[test]
    fn normalize_scales_peak_to_one() {
        let mut buf = [0.25, -0.5, 0.1];
        let gain = normalize_peak(&mut buf);
        assert_eq!(gain, 2.0);
        assert_eq!(buf, [0.5, -1.0, 0.2]);

        let mut silent = [0.0; 4];
        assert_eq!(normalize_peak(&mut silent), 1.0);
        assert_eq!(silent, [0.0; 4]);
    }

    #[test]
    fn empty_buffer_has_zero_peak() {
        assert_eq!(peak_abs(&[]), 0.0);
    }
}
