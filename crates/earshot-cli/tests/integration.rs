//! Integration tests for earshot-cli.
//!
//! Every test runs the built binary against files in a temporary directory
//! and an empty configuration file, so a user configuration never leaks in.

use earshot_io::{WavSpec, read_wav, read_wav_info, write_wav};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Helper to get the path to the `earshot` binary built by cargo.
fn earshot_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_earshot"))
}

/// Run `earshot --config <empty> args...` inside `dir`.
fn earshot(dir: &Path, args: &[&str]) -> Output {
    let config = dir.join("earshot.toml");
    if !config.exists() {
        std::fs::write(&config, "").unwrap();
    }
    earshot_bin()
        .current_dir(dir)
        .arg("--config")
        .arg(&config)
        .args(args)
        .output()
        .expect("failed to run earshot")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "earshot failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

/// 250 Hz with harmonics 2 and 3 at 8 kHz: bins 128, 256, 384 of a 4096 FFT.
fn write_tone(dir: &Path, name: &str) -> PathBuf {
    let out = earshot(
        dir,
        &[
            "generate",
            "tone",
            name,
            "--freq",
            "250",
            "--harmonics",
            "3",
            "--sample-rate",
            "8000",
        ],
    );
    assert_success(&out);
    dir.join(name)
}

// ---------------------------------------------------------------------------
// Help and version
// ---------------------------------------------------------------------------

#[test]
fn cli_help_lists_commands() {
    let output = earshot_bin().arg("--help").output().unwrap();
    assert!(output.status.success());

    let text = stdout(&output);
    for command in [
        "analyze",
        "batch",
        "note",
        "spectrum",
        "info",
        "split",
        "hrir",
        "response",
        "spatialize",
        "generate",
    ] {
        assert!(text.contains(command), "help should list '{command}'");
    }
}

#[test]
fn cli_window_help_lists_windows() {
    let output = earshot_bin().args(["analyze", "--help"]).output().unwrap();
    assert!(output.status.success());
    assert!(stdout(&output).contains("hann, hamming, blackman, blackman-harris"));
}

#[test]
fn cli_version_works() {
    let output = earshot_bin().arg("--version").output().unwrap();
    assert!(output.status.success());
    assert!(stdout(&output).contains("earshot"));
}

// ---------------------------------------------------------------------------
// Analysis
// ---------------------------------------------------------------------------

#[test]
fn cli_note_maps_frequencies() {
    let dir = TempDir::new().unwrap();
    let output = earshot(dir.path(), &["note", "440", "261.63", "880"]);
    assert_success(&output);

    let text = stdout(&output);
    assert!(text.contains("A4"));
    assert!(text.contains("C4"));
    assert!(text.contains("A5"));
}

#[test]
fn cli_analyze_reports_harmonics() {
    let dir = TempDir::new().unwrap();
    write_tone(dir.path(), "tone.wav");

    let output = earshot(
        dir.path(),
        &["analyze", "tone.wav", "--fft-size", "4096", "--json", "tone.json"],
    );
    assert_success(&output);

    let text = stdout(&output);
    assert!(text.contains("Fundamental frequency (f0): 250.000 Hz"));
    assert!(text.contains("Musical note: B3"));
    assert!(text.contains("Group A (Harmonics): 3 peaks"));
    assert!(!text.contains("Group B"));

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("tone.json")).unwrap())
            .unwrap();
    assert_eq!(json["f0_hz"], 250.0);
    assert_eq!(json["note"], "B3");
    assert_eq!(json["harmonics"].as_array().unwrap().len(), 3);
    assert_eq!(json["harmonics"][2]["k"], 3);
}

#[test]
fn cli_analyze_silence_fails_with_no_fundamental() {
    let dir = TempDir::new().unwrap();
    write_wav(
        dir.path().join("silence.wav"),
        &vec![0.0; 4096],
        WavSpec::mono(8000, 32),
    )
    .unwrap();

    let output = earshot(dir.path(), &["analyze", "silence.wav", "--fft-size", "4096"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("no fundamental found"));
}

#[test]
fn cli_analyze_rejects_bad_window_in_config() {
    let dir = TempDir::new().unwrap();
    write_tone(dir.path(), "tone.wav");
    std::fs::write(
        dir.path().join("earshot.toml"),
        "[analysis]\nwindow = \"triangle\"\n",
    )
    .unwrap();

    let output = earshot(dir.path(), &["analyze", "tone.wav"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("analysis.window"));
}

#[test]
fn cli_spectrum_lists_peaks_and_writes_csv() {
    let dir = TempDir::new().unwrap();
    write_tone(dir.path(), "tone.wav");

    let output = earshot(
        dir.path(),
        &[
            "spectrum",
            "tone.wav",
            "--fft-size",
            "4096",
            "--peaks",
            "2",
            "--csv",
            "spectrum.csv",
        ],
    );
    assert_success(&output);

    let text = stdout(&output);
    assert!(text.contains("Strongest 2 peaks"));
    assert!(text.contains("250.00"));
    assert!(text.contains("500.00"));

    let csv = std::fs::read_to_string(dir.path().join("spectrum.csv")).unwrap();
    assert_eq!(csv.lines().count(), 1 + 2048);
}

// ---------------------------------------------------------------------------
// Batch reports
// ---------------------------------------------------------------------------

#[test]
fn cli_batch_writes_report_and_summary() {
    let dir = TempDir::new().unwrap();
    write_tone(dir.path(), "a.wav");
    write_tone(dir.path(), "b.wav");
    std::fs::write(dir.path().join("c.wav"), b"not a wav file").unwrap();

    let output = earshot(
        dir.path(),
        &[
            "batch",
            "*.wav",
            "--fft-size",
            "4096",
            "--report",
            "report.txt",
            "--summary",
            "summary.txt",
            "--no-progress",
        ],
    );
    assert_success(&output);
    assert!(stdout(&output).contains("Found 3 files to process"));

    let report = std::fs::read_to_string(dir.path().join("report.txt")).unwrap();
    assert!(report.starts_with("Harmonic analysis\n"));
    assert!(report.contains("File 1: a.wav"));
    assert!(report.contains("File 2: b.wav"));
    assert!(report.contains("File 3: c.wav"));
    assert_eq!(report.matches("Musical note: B3").count(), 2);
    assert_eq!(report.matches("ERROR processing file:").count(), 1);

    let summary = std::fs::read_to_string(dir.path().join("summary.txt")).unwrap();
    let rows: Vec<&str> = summary
        .lines()
        .filter(|l| l.ends_with(".wav") || l.contains(".wav "))
        .collect();
    assert_eq!(rows.len(), 3);
    assert!(rows[2].contains("ERROR:"));
}

#[test]
fn cli_batch_with_no_matches_is_a_no_op() {
    let dir = TempDir::new().unwrap();
    let output = earshot(
        dir.path(),
        &["batch", "*.wav", "--report", "report.txt", "--summary", "summary.txt"],
    );
    assert_success(&output);
    assert!(stdout(&output).contains("no files found"));
    assert!(!dir.path().join("report.txt").exists());
    assert!(!dir.path().join("summary.txt").exists());
}

// ---------------------------------------------------------------------------
// File utilities
// ---------------------------------------------------------------------------

#[test]
fn cli_info_shows_metadata() {
    let dir = TempDir::new().unwrap();
    write_tone(dir.path(), "tone.wav");

    let output = earshot(dir.path(), &["info", "tone.wav"]);
    assert_success(&output);

    let text = stdout(&output);
    assert!(text.contains("Channels:    1"));
    assert!(text.contains("Sample Rate: 8000 Hz"));
    assert!(text.contains("8000 frames"));
    assert!(text.contains("8000 of 16384 samples, zero-padded"));
}

#[test]
fn cli_split_writes_numbered_segments() {
    let dir = TempDir::new().unwrap();
    let samples: Vec<f32> = (0..1000).map(|i| i as f32 / 1000.0).collect();
    write_wav(dir.path().join("take.wav"), &samples, WavSpec::mono(1000, 32)).unwrap();
    std::fs::write(dir.path().join("splits.txt"), "0.0 0.25\n0.5, 0.75\n").unwrap();

    let output = earshot(
        dir.path(),
        &["split", "take.wav", "--splits", "splits.txt", "--out-dir", "parts"],
    );
    assert_success(&output);

    let text = stdout(&output);
    assert!(text.contains("Splitting into 2 segments"));
    assert!(text.contains("Segment  1:   0.00s -   0.25s ( 0.25s) -> take_001.wav"));

    let (second, spec) = read_wav(dir.path().join("parts").join("take_002.wav")).unwrap();
    assert_eq!(spec.sample_rate, 1000);
    assert_eq!(second.len(), 250);
    assert_eq!(second[0], 0.5);
}

// ---------------------------------------------------------------------------
// Spatial rendering
// ---------------------------------------------------------------------------

#[test]
fn cli_hrir_reports_delays() {
    let dir = TempDir::new().unwrap();
    let output = earshot(dir.path(), &["hrir", "90", "--csv", "hrir.csv"]);
    assert_success(&output);

    let text = stdout(&output);
    assert!(text.contains("Left delay:  30 samples"));
    assert!(text.contains("Right delay: 0 samples"));
    assert!(text.contains("HRIR length: 542 samples per ear"));
    let sections: Vec<&str> = text.lines().filter(|l| l.contains("b = [")).collect();
    assert_eq!(sections.len(), 2);
    assert!(sections.iter().all(|l| l.contains("a = [1.0, ")));

    let csv = std::fs::read_to_string(dir.path().join("hrir.csv")).unwrap();
    assert_eq!(csv.lines().count(), 1 + 542);
}

#[test]
fn cli_hrir_accepts_negative_angle() {
    let dir = TempDir::new().unwrap();
    let output = earshot(dir.path(), &["hrir", "-90", "--wav", "hrir.wav"]);
    assert_success(&output);
    assert!(stdout(&output).contains("Right delay: 30 samples"));

    let info = read_wav_info(dir.path().join("hrir.wav")).unwrap();
    assert_eq!(info.channels, 2);
    assert_eq!(info.num_frames, 542);
}

#[test]
fn cli_response_tables() {
    let dir = TempDir::new().unwrap();
    let output = earshot(
        dir.path(),
        &["response", "--angles", "-90,0,90", "--points", "5", "--csv", "resp.csv"],
    );
    assert_success(&output);
    assert_eq!(stdout(&output).matches("Angle ").count(), 3);

    let csv = std::fs::read_to_string(dir.path().join("resp.csv")).unwrap();
    assert_eq!(csv.lines().count(), 1 + 3 * 5);
}

#[test]
fn cli_spatialize_demo_renders_stereo() {
    let dir = TempDir::new().unwrap();
    let output = earshot(
        dir.path(),
        &[
            "spatialize",
            "demo",
            "demo.wav",
            "--angles",
            "-90,90",
            "--burst",
            "0.1",
            "--gap",
            "0.05",
            "--seed",
            "1",
        ],
    );
    assert_success(&output);

    let info = read_wav_info(dir.path().join("demo.wav")).unwrap();
    assert_eq!(info.channels, 2);
    assert_eq!(info.sample_rate, 44100);
    assert_eq!(info.num_frames, 2 * (4410 + 2205));
}

#[test]
fn cli_spatialize_file_keeps_rate_and_length() {
    let dir = TempDir::new().unwrap();
    write_tone(dir.path(), "tone.wav");

    let output = earshot(
        dir.path(),
        &[
            "spatialize",
            "file",
            "tone.wav",
            "left.wav",
            "--angle",
            "-60",
            "--normalize",
        ],
    );
    assert_success(&output);

    let info = read_wav_info(dir.path().join("left.wav")).unwrap();
    assert_eq!(info.channels, 2);
    assert_eq!(info.sample_rate, 8000);
    assert_eq!(info.num_frames, 8000);
}

#[test]
fn cli_generate_pink_is_seeded() {
    let dir = TempDir::new().unwrap();
    for name in ["p1.wav", "p2.wav"] {
        let output = earshot(
            dir.path(),
            &["generate", "pink", name, "--duration", "0.1", "--seed", "5"],
        );
        assert_success(&output);
    }

    let (a, _) = read_wav(dir.path().join("p1.wav")).unwrap();
    let (b, _) = read_wav(dir.path().join("p2.wav")).unwrap();
    assert_eq!(a.len(), 4410);
    assert_eq!(a, b);
}
