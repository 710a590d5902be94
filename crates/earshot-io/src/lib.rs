//! Audio file layer for earshot.
//!
//! This crate provides:
//!
//! - **WAV reading**: [`read_wav`] loads the first channel of any PCM or float
//!   WAV file; [`read_wav_info`] reads only the header
//! - **WAV writing**: [`write_wav`] (mono) and [`write_wav_stereo`]
//! - **Segmentation**: [`split_wav`] cuts a recording into numbered files from
//!   `[start, end]` second pairs
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use earshot_io::{read_wav, write_wav_stereo, WavSpec};
//!
//! let (samples, spec) = read_wav("note.wav")?;
//! println!("{} samples at {} Hz", samples.len(), spec.sample_rate);
//! ```

mod split;
mod wav;

use std::path::PathBuf;

pub use split::{SplitSegment, TimeSplit, parse_splits, split_wav};
pub use wav::{
    StereoSamples, WavFormat, WavInfo, WavSpec, read_wav, read_wav_info, write_wav,
    write_wav_stereo,
};

/// Error types for audio file operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The file could not be opened or decoded as WAV.
    #[error("cannot read WAV file {}: {source}", path.display())]
    Unreadable {
        /// Offending file.
        path: PathBuf,
        /// Decoder error.
        #[source]
        source: hound::Error,
    },

    /// The file could not be created or encoded.
    #[error("cannot write WAV file {}: {source}", path.display())]
    Unwritable {
        /// Offending file.
        path: PathBuf,
        /// Encoder error.
        #[source]
        source: hound::Error,
    },

    /// A line of a time-split list could not be parsed.
    #[error("invalid time split on line {line}: {reason}")]
    InvalidSplit {
        /// 1-based line number.
        line: usize,
        /// What was wrong.
        reason: String,
    },

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for audio file operations.
pub type Result<T> = std::result::Result<T, Error>;
