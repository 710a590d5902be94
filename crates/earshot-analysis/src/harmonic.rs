//! Harmonic analysis: fundamental detection and partial classification
//!
//! A single frame of the signal is transformed, its local-maximum peaks are
//! picked, and the peaks are sorted into two groups relative to the lowest
//! surviving peak (taken as the fundamental `f0`):
//!
//! - **Harmonic** peaks lie within one bin width of an integer multiple
//!   `k * f0`. Each carries its deviation in Hz and cents and its level
//!   relative to the fundamental.
//! - **Non-harmonic** peaks are everything else above the fundamental.
//!
//! ## Peak selection
//!
//! 1. Keep local maxima whose magnitude is at least `threshold` times the
//!    strongest local maximum.
//! 2. Drop peaks below `min_frequency`.
//! 3. The lowest remaining peak is `f0`; if none remain the frame has no
//!    fundamental.
//!
//! ## Example
//!
//! ```rust
//! use earshot_analysis::{HarmonicAnalyzer, HarmonicConfig};
//! use std::f32::consts::PI;
//!
//! // 250 Hz and 500 Hz, both exactly on FFT bins
//! let sr = 8000.0;
//! let signal: Vec<f32> = (0..4096)
//!     .map(|i| {
//!         let t = i as f32 / sr;
//!         (2.0 * PI * 250.0 * t).sin() + 0.5 * (2.0 * PI * 500.0 * t).sin()
//!     })
//!     .collect();
//!
//! let analyzer = HarmonicAnalyzer::new(HarmonicConfig::default().with_fft_size(4096)).unwrap();
//! let analysis = analyzer.analyze(&signal, sr).unwrap();
//! assert_eq!(analysis.f0, 250.0);
//! assert_eq!(analysis.harmonics.len(), 2);
//! assert_eq!(analysis.harmonics[1].k, 2);
//! ```

use crate::error::{AnalysisError, Result};
use crate::fft::{Fft, Window};
use crate::note::{NoteMapping, nearest_note};
use crate::spectrum::{SpectralPeak, Spectrum};
use earshot_core::{cents, level_db};

/// Default relative peak threshold.
pub const DEFAULT_THRESHOLD: f32 = 0.1;
/// Default transform size.
pub const DEFAULT_FFT_SIZE: usize = 16384;
/// Default lowest accepted peak frequency, in Hz.
pub const DEFAULT_MIN_FREQUENCY: f32 = 20.0;

/// Harmonic analyzer settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HarmonicConfig {
    /// Peaks below `threshold * strongest peak` are ignored, within `(0, 1]`.
    pub threshold: f32,
    /// FFT size; the signal is truncated or zero-padded to this length.
    pub fft_size: usize,
    /// Peaks below this frequency are ignored, in Hz.
    pub min_frequency: f32,
    /// Analysis window.
    pub window: Window,
}

impl Default for HarmonicConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            fft_size: DEFAULT_FFT_SIZE,
            min_frequency: DEFAULT_MIN_FREQUENCY,
            window: Window::Rectangular,
        }
    }
}

impl HarmonicConfig {
    /// Set the relative peak threshold
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the FFT size
    pub fn with_fft_size(mut self, fft_size: usize) -> Self {
        self.fft_size = fft_size;
        self
    }

    /// Set the minimum peak frequency
    pub fn with_min_frequency(mut self, min_frequency: f32) -> Self {
        self.min_frequency = min_frequency;
        self
    }

    /// Set the analysis window
    pub fn with_window(mut self, window: Window) -> Self {
        self.window = window;
        self
    }

    /// Check that every field is usable.
    pub fn validate(&self) -> Result<()> {
        if !(self.threshold > 0.0 && self.threshold <= 1.0) {
            return Err(AnalysisError::InvalidConfig(format!(
                "threshold must be within (0, 1], got {}",
                self.threshold
            )));
        }
        if self.fft_size < 4 {
            return Err(AnalysisError::InvalidConfig(format!(
                "fft_size must be at least 4, got {}",
                self.fft_size
            )));
        }
        if !self.min_frequency.is_finite() || self.min_frequency < 0.0 {
            return Err(AnalysisError::InvalidConfig(format!(
                "min_frequency must be a non-negative number, got {}",
                self.min_frequency
            )));
        }
        Ok(())
    }
}

/// A peak classified as a harmonic of the fundamental.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Harmonic {
    /// Harmonic number (1 is the fundamental).
    pub k: u32,
    /// Measured frequency in Hz.
    pub frequency: f32,
    /// Linear magnitude.
    pub magnitude: f32,
    /// `frequency - k * f0`, in Hz.
    pub deviation_hz: f32,
    /// Deviation from `k * f0`, in cents.
    pub deviation_cents: f32,
    /// Level relative to the fundamental, in dB.
    pub level_db: f32,
}

/// Result of analyzing one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct HarmonicAnalysis {
    /// Fundamental frequency in Hz.
    pub f0: f32,
    /// Magnitude of the fundamental peak.
    pub f0_magnitude: f32,
    /// Classification tolerance (one bin width), in Hz.
    pub tolerance_hz: f32,
    /// Sample rate of the analyzed signal.
    pub sample_rate: f32,
    /// FFT size used.
    pub fft_size: usize,
    /// Harmonic peaks, ordered by `k`.
    pub harmonics: Vec<Harmonic>,
    /// Non-harmonic peaks, in ascending frequency.
    pub non_harmonic: Vec<SpectralPeak>,
}

impl HarmonicAnalysis {
    /// Frequency resolution in Hz.
    pub fn resolution_hz(&self) -> f32 {
        self.sample_rate / self.fft_size as f32
    }

    /// Nearest equal-tempered note to the fundamental.
    pub fn note(&self) -> NoteMapping {
        nearest_note(self.f0)
    }

    /// First peak classified as harmonic `k`, if any.
    pub fn harmonic(&self, k: u32) -> Option<&Harmonic> {
        self.harmonics.iter().find(|h| h.k == k)
    }
}

/// Harmonic analyzer with a pre-planned FFT.
pub struct HarmonicAnalyzer {
    config: HarmonicConfig,
    fft: Fft,
}

impl HarmonicAnalyzer {
    /// Create an analyzer, validating `config`.
    pub fn new(config: HarmonicConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            fft: Fft::new(config.fft_size),
            config,
        })
    }

    /// Settings in use.
    pub fn config(&self) -> &HarmonicConfig {
        &self.config
    }

    /// Magnitude spectrum of `signal` with this analyzer's settings.
    pub fn spectrum(&self, signal: &[f32], sample_rate: f32) -> Spectrum {
        Spectrum::with_fft(&self.fft, signal, sample_rate, self.config.window)
    }

    /// Analyze one frame of `signal`.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::InvalidSampleRate`] for a non-positive rate and
    /// [`AnalysisError::NoFundamentalFound`] when no peak passes the filters.
    pub fn analyze(&self, signal: &[f32], sample_rate: f32) -> Result<HarmonicAnalysis> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(AnalysisError::InvalidSampleRate(sample_rate));
        }
        let spectrum = self.spectrum(signal, sample_rate);
        self.classify(&spectrum)
    }

    /// Classify the peaks of an already computed spectrum.
    pub fn classify(&self, spectrum: &Spectrum) -> Result<HarmonicAnalysis> {
        let peaks = self.select_peaks(spectrum);

        let Some(fundamental) = peaks.first().copied() else {
            return Err(AnalysisError::NoFundamentalFound {
                threshold: self.config.threshold,
                min_frequency: self.config.min_frequency,
            });
        };

        let f0 = fundamental.frequency;
        let mag0 = fundamental.magnitude;
        let tolerance = spectrum.bin_width();

        let mut harmonics = Vec::new();
        let mut non_harmonic = Vec::new();

        for peak in peaks {
            let f = peak.frequency;
            if f < f0 - tolerance {
                continue;
            }

            let k = (f / f0).round();
            if k < 1.0 {
                non_harmonic.push(peak);
                continue;
            }

            let expected = k * f0;
            let deviation_hz = f - expected;
            if deviation_hz.abs() <= tolerance {
                harmonics.push(Harmonic {
                    k: k as u32,
                    frequency: f,
                    magnitude: peak.magnitude,
                    deviation_hz,
                    deviation_cents: cents(f, expected),
                    level_db: level_db(peak.magnitude, mag0),
                });
            } else {
                non_harmonic.push(peak);
            }
        }

        harmonics.sort_by_key(|h| h.k);

        tracing::debug!(
            f0,
            harmonics = harmonics.len(),
            non_harmonic = non_harmonic.len(),
            "classified spectral peaks"
        );

        Ok(HarmonicAnalysis {
            f0,
            f0_magnitude: mag0,
            tolerance_hz: tolerance,
            sample_rate: spectrum.sample_rate,
            fft_size: spectrum.fft_size,
            harmonics,
            non_harmonic,
        })
    }

    /// Thresholded, frequency-filtered peaks in ascending frequency.
    fn select_peaks(&self, spectrum: &Spectrum) -> Vec<SpectralPeak> {
        let all = spectrum.peaks();
        let strongest = all.iter().map(|p| p.magnitude).fold(0.0f32, f32::max);
        let floor = self.config.threshold * strongest;

        all.into_iter()
            .filter(|p| p.magnitude >= floor && p.frequency >= self.config.min_frequency)
            .collect()
    }
}

/// Analyze `signal` in one call.
pub fn analyze_harmonics(
    signal: &[f32],
    sample_rate: f32,
    config: &HarmonicConfig,
) -> Result<HarmonicAnalysis> {
    HarmonicAnalyzer::new(*config)?.analyze(signal, sample_rate)
}
