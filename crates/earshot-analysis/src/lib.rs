//! Earshot Analysis - harmonic structure of recorded tones
//!
//! This crate turns a mono signal into a description of its partials:
//!
//! - [`fft`] - FFT wrapper with windowing functions
//! - [`spectrum`] - Single-sided magnitude spectra and local-maximum peak picking
//! - [`harmonic`] - Fundamental detection and harmonic / non-harmonic classification
//! - [`note`] - Nearest equal-tempered note and cents deviation
//! - [`signals`] - Pink noise and harmonic test tones
//!
//! ## Example Workflow
//!
//! ```rust,ignore
//! use earshot_analysis::{HarmonicAnalyzer, HarmonicConfig};
//!
//! // 1. Read a recording (earshot-io)
//! let (samples, info) = earshot_io::read_wav("a4_flute.wav")?;
//!
//! // 2. Analyze the first frame
//! let analyzer = HarmonicAnalyzer::new(HarmonicConfig::default())?;
//! let analysis = analyzer.analyze(&samples, info.sample_rate as f32)?;
//!
//! // 3. Inspect
//! println!("f0 = {:.3} Hz ({})", analysis.f0, analysis.note());
//! for h in &analysis.harmonics {
//!     println!("{:>2} {:>10.3} Hz {:+.2} cents", h.k, h.frequency, h.deviation_cents);
//! }
//! ```

pub mod error;
pub mod fft;
pub mod harmonic;
pub mod note;
pub mod signals;
pub mod spectrum;

pub use error::{AnalysisError, Result};
pub use fft::{Fft, UnknownWindow, Window, window_names};
pub use harmonic::{
    DEFAULT_FFT_SIZE, DEFAULT_MIN_FREQUENCY, DEFAULT_THRESHOLD, Harmonic, HarmonicAnalysis,
    HarmonicAnalyzer, HarmonicConfig, analyze_harmonics,
};
pub use note::{A4_HZ, NOTE_NAMES, NoteMapping, nearest_note, note_frequency};
pub use signals::{harmonic_tone, pink_noise};
pub use spectrum::{SpectralPeak, Spectrum, find_local_maxima};
