//! Harmonic analysis demo: a slightly stretched tone split into harmonic and
//! non-harmonic partials.
//!
//! Run with: cargo run -p earshot-analysis --example harmonic_demo

use earshot_analysis::{HarmonicAnalyzer, HarmonicConfig, Window};
use std::f32::consts::PI;

fn main() {
    let sample_rate = 44100.0;
    let fft_size = 16384;
    let f0 = 220.0;

    // Harmonics 1-5, plus an inharmonic partial at 2.5 * f0
    let partials = [(1.0, 1.0), (2.0, 0.5), (2.5, 0.3), (3.0, 0.25), (4.0, 0.12), (5.0, 0.1)];
    let signal: Vec<f32> = (0..fft_size)
        .map(|i| {
            let t = i as f32 / sample_rate;
            partials
                .iter()
                .map(|&(ratio, amp)| amp * (2.0 * PI * f0 * ratio * t).sin())
                .sum()
        })
        .collect();

    let config = HarmonicConfig::default()
        .with_fft_size(fft_size)
        .with_window(Window::Hann);
    let analyzer = match HarmonicAnalyzer::new(config) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{e}");
            return;
        }
    };

    let analysis = match analyzer.analyze(&signal, sample_rate) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{e}");
            return;
        }
    };

    let note = analysis.note();
    println!("=== Harmonic analysis of a {} Hz tone ===\n", f0);
    println!("f0: {:.3} Hz  ({} {:+.2} cents)", analysis.f0, note, note.cents);
    println!("Resolution: {:.3} Hz\n", analysis.resolution_hz());

    println!("{:>3} {:>12} {:>10} {:>10}", "k", "Freq (Hz)", "Cents", "Level dB");
    println!("{:->3} {:->12} {:->10} {:->10}", "", "", "", "");
    for h in &analysis.harmonics {
        println!(
            "{:>3} {:>12.3} {:>+10.2} {:>+10.2}",
            h.k, h.frequency, h.deviation_cents, h.level_db
        );
    }

    println!("\nNon-harmonic peaks:");
    for p in &analysis.non_harmonic {
        println!("  {:.2} Hz", p.frequency);
    }
}
