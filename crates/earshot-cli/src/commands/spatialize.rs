//! Binaural rendering.

use super::common::{HeadFlags, parse_angles};
use clap::{Args, Subcommand};
use earshot_analysis::pink_noise;
use earshot_config::EarshotConfig;
use earshot_io::{WavSpec, read_wav, write_wav_stereo};
use earshot_spatial::spatialize;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;

/// Render sources at azimuths to stereo WAV.
#[derive(Args)]
pub struct SpatializeArgs {
    #[command(subcommand)]
    command: SpatializeCommand,
}

#[derive(Subcommand)]
enum SpatializeCommand {
    /// Pink-noise bursts hopping across azimuths
    Demo {
        /// Output stereo WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Comma-separated azimuths in degrees (defaults to the configured list)
        #[arg(long, value_parser = parse_angles, allow_hyphen_values = true)]
        angles: Option<std::vec::Vec<f32>>,

        /// Burst duration in seconds
        #[arg(long)]
        burst: Option<f32>,

        /// Silence after each burst in seconds
        #[arg(long)]
        gap: Option<f32>,

        /// Noise seed for a reproducible render
        #[arg(long)]
        seed: Option<u64>,

        #[command(flatten)]
        head: HeadFlags,
    },

    /// Render a mono file at a fixed azimuth
    File {
        /// Input WAV file (channel 0 is used)
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output stereo WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Source azimuth in degrees
        #[arg(long, allow_negative_numbers = true)]
        angle: f32,

        /// Normalize the output to peak 1.0
        #[arg(long)]
        normalize: bool,

        /// Head radius in metres
        #[arg(long)]
        radius: Option<f32>,

        /// Speed of sound in m/s
        #[arg(long)]
        speed_of_sound: Option<f32>,
    },
}

/// Run the spatialize command.
pub fn run(args: SpatializeArgs, mut config: EarshotConfig) -> anyhow::Result<()> {
    match args.command {
        SpatializeCommand::Demo {
            output,
            angles,
            burst,
            gap,
            seed,
            head,
        } => {
            let model = head.head_model(&mut config)?;

            let demo = &mut config.demo;
            if let Some(angles) = angles {
                demo.angles = angles;
            }
            if let Some(burst) = burst {
                demo.burst_secs = burst;
            }
            if let Some(gap) = gap {
                demo.gap_secs = gap;
            }
            let scene = config.moving_source()?;

            let seed = seed.or(config.demo.seed).unwrap_or_else(rand::random);
            tracing::info!(seed, "pink noise seed");
            let mut rng = StdRng::seed_from_u64(seed);

            println!(
                "Rendering {} bursts at {:?} deg (seed {seed})...",
                scene.angles().len(),
                scene.angles()
            );
            let rendered = scene.render(&model, |len| pink_noise(len, &mut rng));

            let spec = WavSpec {
                channels: 2,
                sample_rate: config.head.sample_rate,
                bits_per_sample: 32,
            };
            write_wav_stereo(&output, &rendered, spec)?;
            println!(
                "Wrote {:.2}s to {}",
                rendered.len() as f32 / model.sample_rate(),
                output.display()
            );
        }

        SpatializeCommand::File {
            input,
            output,
            angle,
            normalize,
            radius,
            speed_of_sound,
        } => {
            let (samples, spec) = read_wav(&input)?;

            // Render at the file's own rate
            let head = HeadFlags {
                radius,
                speed_of_sound,
                sample_rate: Some(spec.sample_rate),
            };
            let model = head.head_model(&mut config)?;

            let mut rendered = spatialize(&model, angle, &samples);
            if normalize {
                let gain = rendered.normalize();
                tracing::debug!(gain, "normalized output");
            }

            let out_spec = WavSpec {
                channels: 2,
                sample_rate: spec.sample_rate,
                bits_per_sample: 32,
            };
            write_wav_stereo(&output, &rendered, out_spec)?;
            println!(
                "Rendered {} at {angle:.1} deg -> {}",
                input.display(),
                output.display()
            );
        }
    }

    Ok(())
}
