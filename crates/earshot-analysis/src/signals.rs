//! Test signal generators
//!
//! - [`pink_noise`] - 1/f noise synthesized in the frequency domain
//! - [`harmonic_tone`] - sum of harmonics of a fundamental

use crate::fft::Fft;
use earshot_core::normalize_peak;
use rand::Rng;
use rand_distr::StandardNormal;
use rustfft::num_complex::Complex;
use std::f32::consts::PI;

/// Generate `len` samples of pink (1/f power) noise, peak-normalized to 1.0.
///
/// Each non-negative frequency bin `k` gets an independent complex Gaussian
/// value scaled by `1/sqrt(k + 1)`, and the half spectrum is transformed
/// back to a real signal of exactly `len` samples. Deterministic for a given
/// RNG state.
///
/// # Example
/// ```rust
/// use earshot_analysis::pink_noise;
/// use rand::{SeedableRng, rngs::StdRng};
///
/// let noise = pink_noise(4096, &mut StdRng::seed_from_u64(7));
/// assert_eq!(noise.len(), 4096);
/// ```
pub fn pink_noise<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Vec<f32> {
    if len == 0 {
        return Vec::new();
    }

    let half = len / 2 + 1;
    let spectrum: Vec<Complex<f32>> = (0..half)
        .map(|k| {
            let re: f32 = rng.sample(StandardNormal);
            let im: f32 = rng.sample(StandardNormal);
            Complex::new(re, im) / (k as f32 + 1.0).sqrt()
        })
        .collect();

    let mut noise = Fft::new(len).inverse(&spectrum);
    normalize_peak(&mut noise);
    noise
}

/// Sum of harmonics of `fundamental`.
///
/// `amplitudes[i]` is the amplitude of harmonic `i + 1`. Harmonics at or
/// above Nyquist are skipped.
pub fn harmonic_tone(
    sample_rate: f32,
    fundamental: f32,
    amplitudes: &[f32],
    num_samples: usize,
) -> Vec<f32> {
    let nyquist = sample_rate / 2.0;
    let mut out = vec![0.0; num_samples];

    for (i, &amp) in amplitudes.iter().enumerate() {
        let freq = fundamental * (i + 1) as f32;
        if freq >= nyquist {
            break;
        }
        let omega = 2.0 * PI * freq / sample_rate;
        for (n, s) in out.iter_mut().enumerate() {
            *s += amp * (omega * n as f32).sin();
        }
    }

    out
}
