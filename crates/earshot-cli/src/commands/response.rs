//! Analog versus digital head-shadow magnitude response.

use super::common::{HeadFlags, parse_angles};
use clap::Args;
use earshot_config::EarshotConfig;
use earshot_spatial::ResponseTable;
use std::path::PathBuf;

/// Compare analog and digital head-shadow responses.
#[derive(Args)]
pub struct ResponseArgs {
    /// Comma-separated azimuths in degrees
    #[arg(
        long,
        value_parser = parse_angles,
        default_value = "0,45,90",
        allow_hyphen_values = true
    )]
    // Full path stops clap from treating the list as a repeated argument
    angles: std::vec::Vec<f32>,

    /// Number of log-spaced frequencies from 20 Hz to Nyquist
    #[arg(long, default_value = "12")]
    points: usize,

    #[command(flatten)]
    head: HeadFlags,

    /// Write every table as CSV
    #[arg(long, value_name = "OUT")]
    csv: Option<PathBuf>,
}

/// Run the response command.
pub fn run(args: ResponseArgs, mut config: EarshotConfig) -> anyhow::Result<()> {
    if args.points < 2 {
        anyhow::bail!("need at least 2 frequency points, got {}", args.points);
    }
    let model = args.head.head_model(&mut config)?;

    let tables: Vec<ResponseTable> = args
        .angles
        .iter()
        .map(|&angle| ResponseTable::audio_band(&model, angle, args.points))
        .collect();

    for table in &tables {
        println!("\nAngle {:.1} deg", table.angle_deg);
        println!(
            "  {:>10}  {:>10}  {:>10}  {:>10}  {:>10}",
            "Freq [Hz]", "Analog L", "Digital L", "Analog R", "Digital R"
        );
        for p in &table.points {
            println!(
                "  {:>10.1}  {:>+10.2}  {:>+10.2}  {:>+10.2}  {:>+10.2}",
                p.frequency_hz,
                p.analog_left_db,
                p.digital_left_db,
                p.analog_right_db,
                p.digital_right_db
            );
        }
        println!(
            "  max analog/digital difference: {:.2} dB",
            table.max_deviation_db()
        );
    }

    if let Some(path) = args.csv {
        let mut csv = String::from(
            "angle_deg,frequency_hz,analog_left_db,digital_left_db,analog_right_db,digital_right_db\n",
        );
        for table in &tables {
            for p in &table.points {
                csv.push_str(&format!(
                    "{},{:.3},{:.4},{:.4},{:.4},{:.4}\n",
                    table.angle_deg,
                    p.frequency_hz,
                    p.analog_left_db,
                    p.digital_left_db,
                    p.analog_right_db,
                    p.digital_right_db
                ));
            }
        }
        std::fs::write(&path, csv)?;
        println!("\nWrote response tables to {}", path.display());
    }

    Ok(())
}
