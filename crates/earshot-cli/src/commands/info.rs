//! WAV metadata and what the analyzer will see of it.

use clap::Args;
use earshot_config::EarshotConfig;
use earshot_io::read_wav_info;
use std::path::PathBuf;

/// Display WAV file information.
#[derive(Args)]
pub struct InfoArgs {
    /// WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,
}

/// Run the info command.
pub fn run(args: InfoArgs, config: EarshotConfig) -> anyhow::Result<()> {
    let info = read_wav_info(&args.input)?;
    let bytes = std::fs::metadata(&args.input)?.len();

    println!("File:        {}", args.input.display());
    println!("Format:      {} {}-bit", info.format.name(), info.bits_per_sample);
    println!("Channels:    {}", info.channels);
    println!("Sample Rate: {} Hz", info.sample_rate);
    println!(
        "Duration:    {:.3}s ({} frames)",
        info.duration_secs, info.num_frames
    );
    println!("Size:        {:.1} KiB", bytes as f64 / 1024.0);

    // The analyzer reads channel 0 and one FFT frame from the start
    let fft_size = config.analysis.fft_size as u64;
    let used = info.num_frames.min(fft_size);
    println!("\nAnalysis frame (channel 0):");
    println!(
        "  {} of {} samples, {}",
        used,
        fft_size,
        match info.num_frames.cmp(&fft_size) {
            std::cmp::Ordering::Less => "zero-padded",
            std::cmp::Ordering::Equal => "exact fit",
            std::cmp::Ordering::Greater => "rest ignored",
        }
    );
    if info.sample_rate > 0 && fft_size > 0 {
        println!(
            "  Resolution: {:.3} Hz",
            f64::from(info.sample_rate) / fft_size as f64
        );
    }

    Ok(())
}
