//! Single-file harmonic analysis.

use super::common::{AnalysisFlags, display_name};
use crate::report::{analyze_file, format_analysis};
use clap::Args;
use earshot_analysis::HarmonicAnalysis;
use earshot_config::EarshotConfig;
use serde::Serialize;
use std::path::PathBuf;

/// Analyze the harmonics of one WAV file.
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Input WAV file (channel 0 is analyzed)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    #[command(flatten)]
    analysis: AnalysisFlags,

    /// Also write the result as JSON
    #[arg(long, value_name = "OUT")]
    json: Option<PathBuf>,
}

/// JSON form of an analysis.
#[derive(Serialize)]
struct AnalysisJson {
    file: String,
    f0_hz: f32,
    resolution_hz: f32,
    tolerance_hz: f32,
    note: String,
    theoretical_hz: f32,
    cents: f32,
    harmonics: Vec<HarmonicJson>,
    non_harmonic_hz: Vec<f32>,
    window: &'static str,
}

#[derive(Serialize)]
struct HarmonicJson {
    k: u32,
    frequency_hz: f32,
    deviation_hz: f32,
    deviation_cents: f32,
    level_db: f32,
}

impl AnalysisJson {
    fn new(file: String, analysis: &HarmonicAnalysis, window: &'static str) -> Self {
        let note = analysis.note();
        Self {
            file,
            f0_hz: analysis.f0,
            resolution_hz: analysis.resolution_hz(),
            tolerance_hz: analysis.tolerance_hz,
            note: note.name(),
            theoretical_hz: note.theoretical_hz,
            cents: note.cents,
            harmonics: analysis
                .harmonics
                .iter()
                .map(|h| HarmonicJson {
                    k: h.k,
                    frequency_hz: h.frequency,
                    deviation_hz: h.deviation_hz,
                    deviation_cents: h.deviation_cents,
                    level_db: h.level_db,
                })
                .collect(),
            non_harmonic_hz: analysis.non_harmonic.iter().map(|p| p.frequency).collect(),
            window,
        }
    }
}

/// Run the analyze command.
pub fn run(args: AnalyzeArgs, mut config: EarshotConfig) -> anyhow::Result<()> {
    let analyzer = args.analysis.analyzer(&mut config)?;
    let analysis = analyze_file(&analyzer, &args.input)?;
    let name = display_name(&args.input);

    println!("File: {name}");
    println!("{}", "-".repeat(40));
    print!("{}", format_analysis(&analysis));

    if let Some(path) = args.json {
        let window = analyzer.config().window.name();
        let json = AnalysisJson::new(name, &analysis, window);
        std::fs::write(&path, serde_json::to_string_pretty(&json)?)?;
        println!("\nWrote analysis to {}", path.display());
    }

    Ok(())
}
