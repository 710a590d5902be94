//! Cutting a recording into numbered segments.
//!
//! Segments are given as `[start, end]` pairs in seconds. Each pair is
//! converted to sample indices by truncation and clamped to the file, then
//! the first channel of that range is written to
//! `<out_dir>/<stem>_<NNN>.wav` (1-based, zero-padded to three digits) at the
//! source's sample rate and bit depth.

use crate::wav::{WavSpec, read_wav, write_wav};
use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// A `[start, end]` interval in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSplit {
    /// Start time in seconds.
    pub start_secs: f64,
    /// End time in seconds.
    pub end_secs: f64,
}

impl TimeSplit {
    /// Create an interval.
    pub fn new(start_secs: f64, end_secs: f64) -> Self {
        Self {
            start_secs,
            end_secs,
        }
    }

    /// Sample range `[start, end)` for a file of `len` frames at
    /// `sample_rate`, clamped to the file. Inverted intervals are empty.
    pub fn sample_range(&self, sample_rate: u32, len: usize) -> std::ops::Range<usize> {
        let to_index = |secs: f64| {
            let idx = (secs * f64::from(sample_rate)).trunc();
            if idx <= 0.0 { 0 } else { (idx as usize).min(len) }
        };
        let start = to_index(self.start_secs);
        let end = to_index(self.end_secs).max(start);
        start..end
    }
}

/// One written segment.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitSegment {
    /// 1-based segment number.
    pub index: usize,
    /// Written file.
    pub path: PathBuf,
    /// Requested interval.
    pub split: TimeSplit,
    /// Number of frames written.
    pub frames: usize,
    /// Duration actually written, in seconds.
    pub duration_secs: f64,
}

/// Parse a time-split list.
///
/// One `start end` pair per line, separated by whitespace and/or a comma.
/// Blank lines and `#` comments are ignored.
///
/// # Example
/// ```rust
/// use earshot_io::parse_splits;
///
/// let splits = parse_splits("# intro\n0.0 1.5\n1.5, 3.25\n").unwrap();
/// assert_eq!(splits.len(), 2);
/// assert_eq!(splits[1].end_secs, 3.25);
/// ```
pub fn parse_splits(text: &str) -> Result<Vec<TimeSplit>> {
    let mut splits = Vec::new();

    for (i, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        let invalid = |reason: String| Error::InvalidSplit { line: i + 1, reason };

        let fields: Vec<&str> = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|f| !f.is_empty())
            .collect();
        let [start, end] = fields.as_slice() else {
            return Err(invalid(format!(
                "expected two numbers, found {}",
                fields.len()
            )));
        };

        let parse = |field: &str| {
            field
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| invalid(format!("'{field}' is not a number")))
        };

        splits.push(TimeSplit::new(parse(*start)?, parse(*end)?));
    }

    Ok(splits)
}

/// Split `input` into one WAV file per interval under `out_dir`.
///
/// The output directory is created if needed. Intervals are written in the
/// order given; an interval entirely outside the file yields an empty
/// segment file.
pub fn split_wav(input: &Path, splits: &[TimeSplit], out_dir: &Path) -> Result<Vec<SplitSegment>> {
    let (samples, spec) = read_wav(input)?;
    std::fs::create_dir_all(out_dir)?;

    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "segment".to_string());
    let out_spec = WavSpec::mono(spec.sample_rate, spec.bits_per_sample);

    tracing::info!(
        input = %input.display(),
        sample_rate = spec.sample_rate,
        duration_secs = samples.len() as f64 / f64::from(spec.sample_rate),
        segments = splits.len(),
        "splitting recording"
    );

    let mut segments = Vec::with_capacity(splits.len());
    for (i, split) in splits.iter().enumerate() {
        let range = split.sample_range(spec.sample_rate, samples.len());
        let frames = range.len();
        let path = out_dir.join(format!("{stem}_{:03}.wav", i + 1));

        write_wav(&path, &samples[range], out_spec)?;
        tracing::debug!(path = %path.display(), frames, "wrote segment");

        segments.push(SplitSegment {
            index: i + 1,
            path,
            split: *split,
            frames,
            duration_secs: frames as f64 / f64::from(spec.sample_rate),
        });
    }

    Ok(segments)
}
