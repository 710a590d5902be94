//! Spectral peak listing.

use super::common::window_help;
use clap::Args;
use earshot_analysis::{Spectrum, nearest_note};
use earshot_config::EarshotConfig;
use earshot_core::level_db;
use earshot_io::read_wav;
use std::path::PathBuf;

/// List the strongest spectral peaks of a WAV file.
#[derive(Args)]
pub struct SpectrumArgs {
    /// Input WAV file (channel 0 is analyzed)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// FFT size (defaults to the configured analysis size)
    #[arg(long)]
    fft_size: Option<usize>,

    /// Window function (defaults to the configured window)
    #[arg(long, long_help = window_help())]
    window: Option<String>,

    /// Show at most N peaks
    #[arg(long, default_value = "5")]
    peaks: usize,

    /// Minimum peak height relative to the largest bin
    #[arg(long, default_value = "0.1")]
    threshold: f32,

    /// Write the full spectrum as CSV
    #[arg(long, value_name = "OUT")]
    csv: Option<PathBuf>,
}

/// Run the spectrum command.
pub fn run(args: SpectrumArgs, mut config: EarshotConfig) -> anyhow::Result<()> {
    if let Some(fft_size) = args.fft_size {
        config.analysis.fft_size = fft_size;
    }
    if let Some(window) = &args.window {
        config.analysis.window.clone_from(window);
    }
    let settings = config.harmonic_config()?;
    if !(args.threshold > 0.0 && args.threshold <= 1.0) {
        anyhow::bail!("threshold must be within (0, 1], got {}", args.threshold);
    }

    let (samples, spec) = read_wav(&args.input)?;
    let sample_rate = spec.sample_rate as f32;
    println!(
        "{}: {} samples, {} Hz, {:.2}s",
        args.input.display(),
        samples.len(),
        spec.sample_rate,
        samples.len() as f32 / sample_rate
    );

    let spectrum = Spectrum::analyze(&samples, sample_rate, settings.fft_size, settings.window);
    let max = spectrum.max_magnitude();
    let peaks = spectrum.strongest_peaks(args.threshold, args.peaks);

    println!(
        "\nStrongest {} peaks (>= {} x max, {} window, resolution {:.3} Hz):",
        peaks.len(),
        args.threshold,
        settings.window,
        spectrum.bin_width()
    );
    println!("  {:>12}  {:>10}  {:<6}", "Freq [Hz]", "Level [dB]", "Note");
    for peak in &peaks {
        println!(
            "  {:>12.2}  {:>+10.2}  {:<6}",
            peak.frequency,
            level_db(peak.magnitude, max),
            nearest_note(peak.frequency).name()
        );
    }

    if let Some(path) = args.csv {
        let mut csv = String::from("frequency_hz,magnitude,magnitude_db\n");
        for ((freq, mag), db) in spectrum
            .frequencies
            .iter()
            .zip(&spectrum.magnitudes)
            .zip(spectrum.magnitude_db())
        {
            csv.push_str(&format!("{freq:.4},{mag:.6},{db:.2}\n"));
        }
        std::fs::write(&path, csv)?;
        println!("\nWrote spectrum to {}", path.display());
    }

    Ok(())
}
