//! Test signals for the analyzer and the spatializer.

use clap::{Args, Subcommand};
use earshot_analysis::{harmonic_tone, pink_noise};
use earshot_config::EarshotConfig;
use earshot_core::normalize_peak;
use earshot_io::{WavSpec, write_wav};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::{Path, PathBuf};

/// Write a synthetic test signal to a mono float WAV file.
#[derive(Args)]
pub struct GenerateArgs {
    #[command(subcommand)]
    signal: Signal,
}

#[derive(Subcommand)]
enum Signal {
    /// Pink (1/f) noise, the spatializer's demo source
    Pink {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        #[command(flatten)]
        shape: Shape,

        /// Noise seed (random when omitted)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Harmonic tone with partial k at amplitude 1/k
    Tone {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        #[command(flatten)]
        shape: Shape,

        /// Fundamental in Hz
        #[arg(long, default_value = "440.0")]
        freq: f32,

        /// Partials, counting the fundamental
        #[arg(long, default_value = "1")]
        harmonics: usize,
    },
}

/// Length, rate and level shared by every signal.
#[derive(Args)]
struct Shape {
    /// Length in seconds
    #[arg(long, default_value = "1.0")]
    duration: f32,

    /// Sample rate in Hz (defaults to head.sample_rate)
    #[arg(long)]
    sample_rate: Option<u32>,

    /// Peak level, 0 to 1
    #[arg(long, default_value = "0.8")]
    amplitude: f32,
}

impl Shape {
    fn resolve(&self, config: &EarshotConfig) -> anyhow::Result<(u32, usize)> {
        let rate = self.sample_rate.unwrap_or(config.head.sample_rate);
        if rate == 0 {
            anyhow::bail!("sample rate must be positive");
        }
        if !(self.duration.is_finite() && self.duration > 0.0) {
            anyhow::bail!("duration must be positive, got {}", self.duration);
        }
        Ok((rate, (self.duration * rate as f32) as usize))
    }

    fn write(&self, output: &Path, mut samples: Vec<f32>, rate: u32) -> anyhow::Result<()> {
        samples.iter_mut().for_each(|x| *x *= self.amplitude);
        write_wav(output, &samples, WavSpec::mono(rate, 32))?;
        println!("Wrote {} ({} samples at {rate} Hz)", output.display(), samples.len());
        Ok(())
    }
}

/// Run the generate command.
pub fn run(args: GenerateArgs, config: EarshotConfig) -> anyhow::Result<()> {
    match args.signal {
        Signal::Pink {
            output,
            shape,
            seed,
        } => {
            let (rate, len) = shape.resolve(&config)?;
            let seed = seed.unwrap_or_else(rand::random);
            tracing::info!(seed, len, "generating pink noise");
            println!("Pink noise, {}s, seed {seed}", shape.duration);

            let noise = pink_noise(len, &mut StdRng::seed_from_u64(seed));
            shape.write(&output, noise, rate)
        }

        Signal::Tone {
            output,
            shape,
            freq,
            harmonics,
        } => {
            let (rate, len) = shape.resolve(&config)?;
            if !(freq.is_finite() && freq > 0.0) {
                anyhow::bail!("frequency must be positive, got {freq}");
            }
            if harmonics == 0 {
                anyhow::bail!("need at least one harmonic");
            }
            println!("{freq} Hz tone, {harmonics} partial(s), {}s", shape.duration);

            let amplitudes: Vec<f32> = (1..=harmonics).map(|k| (k as f32).recip()).collect();
            let mut tone = harmonic_tone(rate as f32, freq, &amplitudes, len);
            normalize_peak(&mut tone);
            shape.write(&output, tone, rate)
        }
    }
}
