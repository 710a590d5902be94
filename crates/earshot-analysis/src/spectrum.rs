//! Magnitude spectra and peak picking
//!
//! [`Spectrum`] is the single-sided magnitude spectrum of one analysis frame:
//! bins `0..fft_size/2` (the Nyquist bin is dropped), each paired with its
//! centre frequency `i * sample_rate / fft_size`.
//!
//! Peak picking follows the usual "strict local maximum" rule: a bin is a
//! peak when it is higher than both neighbours, a flat-topped run of equal
//! values counts once (at its middle bin), and the first and last bins are
//! never peaks.

use crate::fft::{Fft, Window};

/// Single-sided magnitude spectrum of one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    /// Bin centre frequencies in Hz.
    pub frequencies: Vec<f32>,
    /// Linear magnitudes (unnormalized FFT output).
    pub magnitudes: Vec<f32>,
    /// Sample rate of the analyzed signal.
    pub sample_rate: f32,
    /// Transform size the spectrum was computed with.
    pub fft_size: usize,
}

/// A located spectral peak.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectralPeak {
    /// Bin index in the spectrum.
    pub bin: usize,
    /// Bin centre frequency in Hz.
    pub frequency: f32,
    /// Linear magnitude at the bin.
    pub magnitude: f32,
}

impl Spectrum {
    /// Compute the spectrum of `signal`.
    ///
    /// The signal is truncated or zero-padded to `fft_size` samples, then
    /// windowed and transformed.
    pub fn analyze(signal: &[f32], sample_rate: f32, fft_size: usize, window: Window) -> Self {
        let fft = Fft::new(fft_size);
        Self::with_fft(&fft, signal, sample_rate, window)
    }

    /// Compute the spectrum with an already planned [`Fft`].
    ///
    /// The transform size is taken from `fft`.
    pub fn with_fft(fft: &Fft, signal: &[f32], sample_rate: f32, window: Window) -> Self {
        let fft_size = fft.size();

        let mut frame: Vec<f32> = signal.iter().take(fft_size).copied().collect();
        frame.resize(fft_size, 0.0);
        window.apply(&mut frame);

        let bins = fft_size / 2;
        let spectrum = fft.forward(&frame);
        let magnitudes: Vec<f32> = spectrum.iter().take(bins).map(|c| c.norm()).collect();

        let bin_width = sample_rate / fft_size as f32;
        let frequencies = (0..magnitudes.len()).map(|i| i as f32 * bin_width).collect();

        Self {
            frequencies,
            magnitudes,
            sample_rate,
            fft_size,
        }
    }

    /// Number of bins.
    pub fn len(&self) -> usize {
        self.magnitudes.len()
    }

    /// True when the spectrum has no bins.
    pub fn is_empty(&self) -> bool {
        self.magnitudes.is_empty()
    }

    /// Frequency resolution in Hz (`sample_rate / fft_size`).
    pub fn bin_width(&self) -> f32 {
        self.sample_rate / self.fft_size as f32
    }

    /// Largest magnitude in the spectrum (0.0 when empty).
    pub fn max_magnitude(&self) -> f32 {
        self.magnitudes.iter().copied().fold(0.0, f32::max)
    }

    /// Magnitudes in dB (20·log10, clamped at -200 dB).
    pub fn magnitude_db(&self) -> Vec<f32> {
        self.magnitudes
            .iter()
            .map(|&m| 20.0 * m.max(1e-10).log10())
            .collect()
    }

    /// Peak record for bin `bin`.
    pub fn peak_at(&self, bin: usize) -> SpectralPeak {
        SpectralPeak {
            bin,
            frequency: self.frequencies[bin],
            magnitude: self.magnitudes[bin],
        }
    }

    /// All local-maximum peaks, in ascending frequency order.
    pub fn peaks(&self) -> Vec<SpectralPeak> {
        find_local_maxima(&self.magnitudes)
            .into_iter()
            .map(|bin| self.peak_at(bin))
            .collect()
    }

    /// Peaks at or above `rel_height` times the largest bin, strongest first,
    /// at most `count` of them.
    pub fn strongest_peaks(&self, rel_height: f32, count: usize) -> Vec<SpectralPeak> {
        let floor = rel_height * self.max_magnitude();
        let mut peaks: Vec<SpectralPeak> = self
            .peaks()
            .into_iter()
            .filter(|p| p.magnitude >= floor)
            .collect();
        peaks.sort_by(|a, b| b.magnitude.total_cmp(&a.magnitude));
        peaks.truncate(count);
        peaks
    }

    /// Frequency of the largest bin, or `None` for an empty spectrum.
    pub fn dominant_frequency(&self) -> Option<f32> {
        self.magnitudes
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| self.frequencies[i])
    }
}

/// Indices of strict local maxima in `x`.
///
/// A run of equal values bounded by strictly smaller neighbours on both sides
/// is one peak, reported at the middle of the run (rounding down). Endpoints
/// are never peaks.
///
/// # Example
/// ```rust
/// use earshot_analysis::spectrum::find_local_maxima;
///
/// assert_eq!(find_local_maxima(&[0.0, 2.0, 1.0, 3.0, 3.0, 3.0, 0.0]), vec![1, 4]);
/// assert!(find_local_maxima(&[3.0, 2.0, 1.0]).is_empty());
/// ```
pub fn find_local_maxima(x: &[f32]) -> Vec<usize> {
    let mut peaks = Vec::new();
    if x.len() < 3 {
        return peaks;
    }

    let last = x.len() - 1;
    let mut i = 1;
    while i < last {
        if x[i - 1] < x[i] {
            // Walk across a plateau
            let mut ahead = i + 1;
            while ahead < last && x[ahead] == x[i] {
                ahead += 1;
            }
            if x[ahead] < x[i] {
                let right = ahead - 1;
                peaks.push((i + right) / 2);
                i = ahead;
            }
        }
        i += 1;
    }

    peaks
}
