//! Cut a recording into numbered segments.

use clap::Args;
use earshot_io::{parse_splits, read_wav_info, split_wav};
use std::path::PathBuf;

/// Cut a WAV file into segments.
#[derive(Args)]
pub struct SplitArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Text file with one "start end" pair (seconds) per line
    #[arg(long, value_name = "FILE")]
    splits: PathBuf,

    /// Output directory
    #[arg(long, value_name = "DIR", default_value = "split_audio")]
    out_dir: PathBuf,
}

/// Run the split command.
pub fn run(args: SplitArgs) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&args.splits)?;
    let splits = parse_splits(&text)?;
    if splits.is_empty() {
        anyhow::bail!("{} lists no time splits", args.splits.display());
    }

    let info = read_wav_info(&args.input)?;
    println!("Original file: {}", args.input.display());
    println!("Sample rate: {} Hz", info.sample_rate);
    println!("Duration: {:.2} seconds", info.duration_secs);
    println!("Splitting into {} segments...", splits.len());

    let segments = split_wav(&args.input, &splits, &args.out_dir)?;
    for seg in &segments {
        let name = seg
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        println!(
            "Segment {:2}: {:6.2}s - {:6.2}s ({:5.2}s) -> {}",
            seg.index, seg.split.start_secs, seg.split.end_secs, seg.duration_secs, name
        );
    }

    println!("\nAll segments saved to: {}/", args.out_dir.display());
    Ok(())
}
