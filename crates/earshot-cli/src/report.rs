//! Batch report generation.
//!
//! A batch expands a glob pattern, analyzes each matching file, and renders
//! two text documents: a detailed per-file report and a fixed-width summary
//! table. A file that fails to load or analyze becomes an error entry in
//! both; the rest of the batch is unaffected.

use earshot_analysis::{AnalysisError, HarmonicAnalysis, HarmonicAnalyzer};
use earshot_io::read_wav;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failures of a whole batch.
#[derive(Debug, Error)]
pub enum BatchError {
    /// The pattern matched no files.
    #[error("no files found matching pattern: {pattern}")]
    EmptyBatch {
        /// Pattern as given.
        pattern: String,
    },

    /// The pattern itself is malformed.
    #[error("invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

/// Failures of a single file within a batch.
#[derive(Debug, Error)]
pub enum FileError {
    /// The WAV file could not be read.
    #[error(transparent)]
    Io(#[from] earshot_io::Error),

    /// The analyzer rejected the signal.
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

/// Outcome of analyzing one file.
#[derive(Debug)]
pub struct FileOutcome {
    /// File that was analyzed.
    pub path: PathBuf,
    /// Analysis, or why there is none.
    pub result: Result<HarmonicAnalysis, FileError>,
}

impl FileOutcome {
    /// File name for display.
    pub fn name(&self) -> String {
        crate::commands::common::display_name(&self.path)
    }
}

/// Expand `pattern` into a sorted list of files.
///
/// Entries the glob walker cannot read are logged and skipped.
pub fn expand_pattern(pattern: &str) -> Result<Vec<PathBuf>, BatchError> {
    let mut paths: Vec<PathBuf> = glob::glob(pattern)?
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable path");
                None
            }
        })
        .filter(|path| path.is_file())
        .collect();

    if paths.is_empty() {
        return Err(BatchError::EmptyBatch {
            pattern: pattern.to_string(),
        });
    }

    paths.sort();
    Ok(paths)
}

/// Read channel 0 of `path` and analyze it.
pub fn analyze_file(
    analyzer: &HarmonicAnalyzer,
    path: &Path,
) -> Result<HarmonicAnalysis, FileError> {
    let (samples, spec) = read_wav(path)?;
    Ok(analyzer.analyze(&samples, spec.sample_rate as f32)?)
}

/// Render one analysis: fundamental, note, and both peak groups.
pub fn format_analysis(analysis: &HarmonicAnalysis) -> String {
    let mut out = String::new();
    let note = analysis.note();

    out.push_str(&format!("Fundamental frequency (f0): {:.3} Hz\n", analysis.f0));
    out.push_str(&format!("Frequency resolution: {:.3} Hz\n", analysis.resolution_hz()));
    out.push_str(&format!("Tolerance: ±{:.3} Hz\n", analysis.tolerance_hz));
    out.push_str(&format!("Musical note: {note}\n"));
    out.push_str(&format!("Theoretical frequency: {:.3} Hz\n", note.theoretical_hz));
    out.push_str(&format!(
        "Deviation from equal temperament: {:+.2} cents\n",
        note.cents
    ));

    out.push_str(&format!(
        "\nGroup A (Harmonics): {} peaks\n",
        analysis.harmonics.len()
    ));
    out.push_str("k   Frequency [Hz]   Dev [Hz]   Dev [cents]   Level [dB]\n");
    for h in &analysis.harmonics {
        out.push_str(&format!(
            "{:>2}  {:>11.3}   {:>+8.3}   {:>+8.2}   {:>+8.2}\n",
            h.k, h.frequency, h.deviation_hz, h.deviation_cents, h.level_db
        ));
    }

    if !analysis.non_harmonic.is_empty() {
        out.push_str(&format!(
            "\nGroup B (Non-harmonic): {} peaks\n",
            analysis.non_harmonic.len()
        ));
        let freqs: Vec<String> = analysis
            .non_harmonic
            .iter()
            .map(|p| format!("{:.2}", p.frequency))
            .collect();
        out.push_str(&format!("Frequencies [Hz]: {}\n", freqs.join(", ")));
    }

    out
}

/// Detailed report for a batch.
pub fn detailed_report(outcomes: &[FileOutcome]) -> String {
    let mut out = String::new();
    out.push_str("Harmonic analysis\n");
    out.push_str(&format!("{}\n\n", "=".repeat(50)));

    for (i, outcome) in outcomes.iter().enumerate() {
        out.push_str(&format!("File {}: {}\n", i + 1, outcome.name()));
        out.push_str(&format!("{}\n", "-".repeat(40)));

        match &outcome.result {
            Ok(analysis) => {
                out.push_str(&format_analysis(analysis));
                out.push_str(&format!("\n{}\n\n", "=".repeat(50)));
            }
            Err(e) => {
                out.push_str(&format!("ERROR processing file: {e}\n\n"));
            }
        }
    }

    out
}

/// Fixed-width summary table for a batch.
pub fn summary_table(outcomes: &[FileOutcome]) -> String {
    let mut out = String::new();
    out.push_str("Fundamental frequencies and musical notes\n");
    out.push_str(&format!("{}\n\n", "=".repeat(80)));
    out.push_str(&format!(
        "{:<30} {:<10} {:<6} {:<15} {:<15}\n",
        "File", "f0 [Hz]", "Note", "Theoretical [Hz]", "Deviation [cents]"
    ));
    out.push_str(&format!("{}\n", "-".repeat(80)));

    for outcome in outcomes {
        let name = outcome.name();
        match &outcome.result {
            Ok(analysis) => {
                let note = analysis.note();
                out.push_str(&format!(
                    "{:<30} {:<10.3} {:<6} {:<15.3} {:<+15.2}\n",
                    name,
                    analysis.f0,
                    note.name(),
                    note.theoretical_hz,
                    note.cents
                ));
            }
            Err(e) => {
                out.push_str(&format!("{name:<30} ERROR: {e}\n"));
            }
        }
    }

    out
}
