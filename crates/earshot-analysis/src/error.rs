//! Error types for harmonic analysis.

use thiserror::Error;

/// Errors produced by the harmonic analyzer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// No spectral peak survived the relative threshold and the minimum
    /// frequency filter.
    #[error(
        "no fundamental found (no peak above {threshold} x max at or above {min_frequency} Hz)"
    )]
    NoFundamentalFound {
        /// Relative threshold in effect.
        threshold: f32,
        /// Minimum frequency in effect, in Hz.
        min_frequency: f32,
    },

    /// The analyzer configuration is unusable.
    #[error("invalid analysis configuration: {0}")]
    InvalidConfig(String),

    /// The sample rate is not a positive finite number.
    #[error("invalid sample rate: {0} Hz")]
    InvalidSampleRate(f32),
}

/// Result type for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;
