//! Batch harmonic analysis over a glob pattern.

use super::common::AnalysisFlags;
use crate::report::{
    BatchError, FileOutcome, analyze_file, detailed_report, expand_pattern, summary_table,
};
use clap::Args;
use earshot_config::EarshotConfig;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

/// Analyze every file matching a pattern.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern, e.g. "tones/*.wav" (quote it to stop shell expansion)
    #[arg(value_name = "PATTERN")]
    pattern: String,

    #[command(flatten)]
    analysis: AnalysisFlags,

    /// Detailed report file
    #[arg(long, value_name = "OUT", default_value = "harmonic_analysis_results.txt")]
    report: PathBuf,

    /// Summary table file
    #[arg(long, value_name = "OUT", default_value = "summary_table.txt")]
    summary: PathBuf,

    /// Hide the progress bar
    #[arg(long)]
    no_progress: bool,
}

/// Run the batch command.
pub fn run(args: BatchArgs, mut config: EarshotConfig) -> anyhow::Result<()> {
    let analyzer = args.analysis.analyzer(&mut config)?;

    let paths = match expand_pattern(&args.pattern) {
        Ok(paths) => paths,
        Err(e @ BatchError::EmptyBatch { .. }) => {
            println!("{e}");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    println!("Found {} files to process", paths.len());

    let pb = if args.no_progress {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(paths.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
                .progress_chars("##-"),
        );
        pb
    };

    let mut outcomes = Vec::with_capacity(paths.len());
    let mut failures = 0usize;
    for path in paths {
        let outcome = FileOutcome {
            result: analyze_file(&analyzer, &path),
            path,
        };
        pb.set_message(outcome.name());

        match &outcome.result {
            Ok(analysis) => {
                tracing::info!(file = %outcome.path.display(), f0 = analysis.f0, "analyzed");
            }
            Err(e) => {
                failures += 1;
                tracing::error!(file = %outcome.path.display(), error = %e, "analysis failed");
            }
        }

        outcomes.push(outcome);
        pb.inc(1);
    }
    pb.finish_and_clear();

    std::fs::write(&args.report, detailed_report(&outcomes))?;
    println!("Results written to: {}", args.report.display());

    std::fs::write(&args.summary, summary_table(&outcomes))?;
    println!("Summary table written to: {}", args.summary.display());

    if failures > 0 {
        println!("{failures} of {} files failed", outcomes.len());
    }

    Ok(())
}
