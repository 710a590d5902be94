//! First-order (one-pole, one-zero) IIR filter.
//!
//! Implements the difference equation:
//!
//! ```text
//! y[n] = b0*x[n] + b1*x[n-1] - a1*y[n-1]
//! ```
//!
//! This is the discrete form of every shelving section produced by a bilinear
//! transform of a first-order analog prototype. The coefficient set is kept
//! separate from the filter state so designs can be inspected, compared and
//! evaluated in the frequency domain without running samples through them.
//!
//! # Usage
//!
//! ```rust
//! use earshot_core::{FirstOrderCoefficients, FirstOrderFilter};
//!
//! // y[n] = 0.5 x[n] + 0.5 x[n-1]: a two-tap averager
//! let coeffs = FirstOrderCoefficients::new(0.5, 0.5, 1.0, 0.0);
//! assert!((coeffs.dc_gain() - 1.0).abs() < 1e-6);
//! assert!(coeffs.nyquist_gain().abs() < 1e-6);
//!
//! let mut filter = FirstOrderFilter::new(coeffs);
//! assert_eq!(filter.process(1.0), 0.5);
//! assert_eq!(filter.process(1.0), 1.0);
//! ```

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::flush_denormal;
use core::f32::consts::TAU;
use libm::{cosf, sinf, sqrtf};

/// Normalized first-order IIR coefficients (`a0 == 1`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FirstOrderCoefficients {
    /// Feedforward coefficient applied to `x[n]`.
    pub b0: f32,
    /// Feedforward coefficient applied to `x[n-1]`.
    pub b1: f32,
    /// Feedback coefficient applied to `y[n-1]` (denominator `1 + a1 z^-1`).
    pub a1: f32,
}

impl FirstOrderCoefficients {
    /// Build coefficients from an un-normalized numerator/denominator pair.
    ///
    /// `H(z) = (b0 + b1 z^-1) / (a0 + a1 z^-1)`. All terms are divided by `a0`.
    pub fn new(b0: f32, b1: f32, a0: f32, a1: f32) -> Self {
        Self {
            b0: b0 / a0,
            b1: b1 / a0,
            a1: a1 / a0,
        }
    }

    /// Passthrough coefficients: `y[n] = x[n]`.
    pub const fn identity() -> Self {
        Self {
            b0: 1.0,
            b1: 0.0,
            a1: 0.0,
        }
    }

    /// Numerator as `[b0, b1]`.
    pub fn numerator(&self) -> [f32; 2] {
        [self.b0, self.b1]
    }

    /// Denominator as `[1, a1]`.
    pub fn denominator(&self) -> [f32; 2] {
        [1.0, self.a1]
    }

    /// Gain at 0 Hz (`z = 1`).
    pub fn dc_gain(&self) -> f32 {
        (self.b0 + self.b1) / (1.0 + self.a1)
    }

    /// Gain at the Nyquist frequency (`z = -1`).
    pub fn nyquist_gain(&self) -> f32 {
        (self.b0 - self.b1) / (1.0 - self.a1)
    }

    /// Linear magnitude response at `freq_hz`.
    pub fn magnitude_at(&self, freq_hz: f32, sample_rate: f32) -> f32 {
        let omega = TAU * freq_hz / sample_rate;
        let (s, c) = (sinf(omega), cosf(omega));

        // H(e^jw) = (b0 + b1 e^-jw) / (1 + a1 e^-jw)
        let num_re = self.b0 + self.b1 * c;
        let num_im = -self.b1 * s;
        let den_re = 1.0 + self.a1 * c;
        let den_im = -self.a1 * s;

        let num = sqrtf(num_re * num_re + num_im * num_im);
        let den = sqrtf(den_re * den_re + den_im * den_im);
        if den <= 0.0 { 0.0 } else { num / den }
    }

    /// True when the pole lies strictly inside the unit circle.
    pub fn is_stable(&self) -> bool {
        self.a1.abs() < 1.0
    }

    /// Response of the filter to a unit impulse, truncated to `len` samples.
    pub fn impulse_response(&self, len: usize) -> Vec<f32> {
        let mut out = Vec::with_capacity(len);
        out.resize(len, 0.0);
        if let Some(first) = out.first_mut() {
            *first = 1.0;
        }
        FirstOrderFilter::new(*self).process_block(&mut out);
        out
    }
}

impl Default for FirstOrderCoefficients {
    fn default() -> Self {
        Self::identity()
    }
}

/// Direct Form I first-order filter.
///
/// # Invariants
///
/// - State is flushed to zero when it decays below 1e-20 (denormal protection)
#[derive(Debug, Clone)]
pub struct FirstOrderFilter {
    coeffs: FirstOrderCoefficients,
    /// x[n-1]
    x1: f32,
    /// y[n-1]
    y1: f32,
}

impl FirstOrderFilter {
    /// Create a filter with cleared state.
    pub fn new(coeffs: FirstOrderCoefficients) -> Self {
        Self {
            coeffs,
            x1: 0.0,
            y1: 0.0,
        }
    }

    /// Process one sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let c = &self.coeffs;
        let output = flush_denormal(c.b0 * input + c.b1 * self.x1 - c.a1 * self.y1);
        self.x1 = input;
        self.y1 = output;
        output
    }

    /// Process a block of samples in place.
    pub fn process_block(&mut self, samples: &mut [f32]) {
        for s in samples.iter_mut() {
            *s = self.process(*s);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_passes_input() {
        let mut filter = FirstOrderFilter::new(FirstOrderCoefficients::identity());
        for x in [1.0, -0.5, 0.25, 0.0] {
            assert_eq!(filter.process(x), x);
        }
    }

    #[test]
    fn normalizes_by_a0() {
        let c = FirstOrderCoefficients::new(2.0, 1.0, 2.0, -1.0);
        assert_eq!(c.b0, 1.0);
        assert_eq!(c.b1, 0.5);
        assert_eq!(c.a1, -0.5);
        assert_eq!(c.numerator(), [1.0, 0.5]);
        assert_eq!(c.denominator(), [1.0, -0.5]);
    }

    #[test]
    fn one_pole_impulse_response_decays_geometrically() {
        // y[n] = x[n] + 0.5 y[n-1]
        let c = FirstOrderCoefficients::new(1.0, 0.0, 1.0, -0.5);
        let h = c.impulse_response(5);
        assert_eq!(h, vec![1.0, 0.5, 0.25, 0.125, 0.0625]);
    }

    #[test]
    fn magnitude_matches_dc_and_nyquist() {
        let c = FirstOrderCoefficients::new(0.8, -0.2, 1.0, -0.3);
        let sr = 48000.0;
        assert!((c.magnitude_at(0.0, sr) - c.dc_gain().abs()).abs() < 1e-5);
        assert!((c.magnitude_at(sr / 2.0, sr) - c.nyquist_gain().abs()).abs() < 1e-4);
    }

    #[test]
    fn empty_impulse_response() {
        let identity = FirstOrderCoefficients::identity();
        assert!(identity.impulse_response(0).is_empty());
        assert_eq!(identity.impulse_response(3), vec![1.0, 0.0, 0.0]);
    }

    #[test]
    fn stability_check() {
        assert!(FirstOrderCoefficients::new(1.0, 0.0, 1.0, -0.99).is_stable());
        assert!(!FirstOrderCoefficients::new(1.0, 0.0, 1.0, -1.0).is_stable());
    }
}
