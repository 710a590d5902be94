//! Head-related impulse response for one direction.

use super::common::HeadFlags;
use clap::Args;
use earshot_config::EarshotConfig;
use earshot_core::StereoSamples;
use earshot_io::{WavSpec, write_wav_stereo};
use earshot_spatial::{Ear, Hrir};
use std::path::PathBuf;

/// Show the HRIR for one source direction.
#[derive(Args)]
pub struct HrirArgs {
    /// Source azimuth in degrees (0 = front, 90 = right, -90 = left)
    #[arg(value_name = "ANGLE", allow_negative_numbers = true)]
    angle: f32,

    #[command(flatten)]
    head: HeadFlags,

    /// Write both kernels as CSV (index, left, right)
    #[arg(long, value_name = "OUT")]
    csv: Option<PathBuf>,

    /// Write both kernels as a stereo WAV file
    #[arg(long, value_name = "OUT")]
    wav: Option<PathBuf>,
}

/// Run the hrir command.
pub fn run(args: HrirArgs, mut config: EarshotConfig) -> anyhow::Result<()> {
    let model = args.head.head_model(&mut config)?;
    let hrir = Hrir::generate(&model, args.angle);

    println!("Source angle: {:.1} deg", hrir.angle_deg);
    println!(
        "Head: radius {} m, c {} m/s, fs {} Hz",
        model.radius(),
        model.speed_of_sound(),
        model.sample_rate()
    );

    println!("\nInteraural delay:");
    println!("  Near ear:    {:?}", hrir.itd.near_ear());
    println!("  Left delay:  {} samples", hrir.itd.left_delay);
    println!("  Right delay: {} samples", hrir.itd.right_delay);
    println!(
        "  ITD:         {:.3} ms",
        hrir.itd.delay_samples() as f32 * 1000.0 / model.sample_rate()
    );

    println!(
        "\nHead shadow (beta = {:.1} rad/s, corner {:.1} Hz):",
        hrir.shelf.beta,
        model.corner_hz()
    );
    for ear in [Ear::Left, Ear::Right] {
        let c = hrir.coefficients.ear(ear);
        let [b0, b1] = c.numerator();
        let [a0, a1] = c.denominator();
        println!(
            "  {:<5}  alpha {:.4}  b = [{b0:+.6}, {b1:+.6}]  a = [{a0:.1}, {a1:+.6}]",
            format!("{ear:?}"),
            hrir.shelf.alpha(ear),
        );
    }

    println!("\nHRIR length: {} samples per ear", hrir.len());

    if let Some(path) = args.csv {
        let mut csv = String::from("index,left,right\n");
        for (i, (l, r)) in hrir.left.iter().zip(&hrir.right).enumerate() {
            csv.push_str(&format!("{i},{l:.8},{r:.8}\n"));
        }
        std::fs::write(&path, csv)?;
        println!("Wrote HRIR to {}", path.display());
    }

    if let Some(path) = args.wav {
        let kernels = StereoSamples::new(hrir.left.clone(), hrir.right.clone());
        let spec = WavSpec {
            channels: 2,
            sample_rate: config.head.sample_rate,
            bits_per_sample: 32,
        };
        write_wav_stereo(&path, &kernels, spec)?;
        println!("Wrote HRIR to {}", path.display());
    }

    Ok(())
}
