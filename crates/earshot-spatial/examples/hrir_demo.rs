//! HRIR demo: interaural delays, shelf gains and kernel shapes across azimuth.
//!
//! Run with: cargo run -p earshot-spatial --example hrir_demo

use earshot_spatial::{Ear, HeadModel, Hrir, ResponseTable};

fn main() {
    let head = HeadModel::default();

    println!(
        "=== Spherical head: r = {} m, c = {} m/s, fs = {} Hz ===\n",
        head.radius(),
        head.speed_of_sound(),
        head.sample_rate()
    );
    println!("Head-shadow corner: {:.1} Hz\n", head.corner_hz());

    println!(
        "{:>8} {:>6} {:>8} {:>8} {:>10} {:>10}",
        "Angle", "Near", "ITD", "ITD(ms)", "aL", "aR"
    );
    println!("{:->8} {:->6} {:->8} {:->8} {:->10} {:->10}", "", "", "", "", "", "");

    for angle in [-90.0, -60.0, -30.0, 0.0, 30.0, 60.0, 90.0, 180.0] {
        let hrir = Hrir::generate(&head, angle);
        let delay = hrir.itd.delay_samples();
        let near = match hrir.itd.near_ear() {
            Ear::Left => "L",
            Ear::Right => "R",
        };
        println!(
            "{:>8.1} {:>6} {:>8} {:>8.3} {:>10.4} {:>10.4}",
            angle,
            near,
            delay,
            delay as f32 / head.sample_rate() * 1000.0,
            hrir.shelf.alpha_left,
            hrir.shelf.alpha_right,
        );
    }

    println!("\n=== Analog vs digital magnitude at 60 degrees ===\n");
    let table = ResponseTable::audio_band(&head, 60.0, 12);
    println!(
        "{:>10} {:>10} {:>10} {:>10} {:>10}",
        "Freq(Hz)", "L analog", "L digital", "R analog", "R digital"
    );
    for p in &table.points {
        println!(
            "{:>10.1} {:>10.2} {:>10.2} {:>10.2} {:>10.2}",
            p.frequency_hz,
            p.analog_left_db,
            p.digital_left_db,
            p.analog_right_db,
            p.digital_right_db
        );
    }
    println!("\nLargest deviation: {:.3} dB", table.max_deviation_db());
}
