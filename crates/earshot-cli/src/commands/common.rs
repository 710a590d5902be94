//! Flags shared by several commands.
//!
//! Flags override the values loaded from the configuration file; the merged
//! settings are validated when they are turned into library types.

use clap::Args;
use earshot_analysis::{HarmonicAnalyzer, window_names};
use earshot_config::EarshotConfig;
use earshot_spatial::HeadModel;

/// Harmonic analyzer overrides.
#[derive(Args, Debug, Default)]
pub struct AnalysisFlags {
    /// Relative peak threshold in (0, 1]
    #[arg(long)]
    pub threshold: Option<f32>,

    /// FFT size
    #[arg(long)]
    pub fft_size: Option<usize>,

    /// Lowest accepted peak frequency in Hz
    #[arg(long = "min-freq")]
    pub min_freq: Option<f32>,

    /// Window function
    #[arg(long, long_help = window_help())]
    pub window: Option<String>,
}

impl AnalysisFlags {
    /// Merge into `config`.
    pub fn apply(&self, config: &mut EarshotConfig) {
        let analysis = &mut config.analysis;
        if let Some(threshold) = self.threshold {
            analysis.threshold = threshold;
        }
        if let Some(fft_size) = self.fft_size {
            analysis.fft_size = fft_size;
        }
        if let Some(min_freq) = self.min_freq {
            analysis.min_frequency = min_freq;
        }
        if let Some(window) = &self.window {
            analysis.window.clone_from(window);
        }
    }

    /// Merge into `config` and build the analyzer.
    pub fn analyzer(&self, config: &mut EarshotConfig) -> anyhow::Result<HarmonicAnalyzer> {
        self.apply(config);
        Ok(HarmonicAnalyzer::new(config.harmonic_config()?)?)
    }
}

/// Long help for `--window`, listing every window the analyzer knows.
pub fn window_help() -> String {
    format!(
        "Window function applied before the FFT [possible values: {}]",
        window_names()
    )
}

/// Head model overrides.
#[derive(Args, Debug, Default)]
pub struct HeadFlags {
    /// Head radius in metres
    #[arg(long)]
    pub radius: Option<f32>,

    /// Speed of sound in m/s
    #[arg(long)]
    pub speed_of_sound: Option<f32>,

    /// Sample rate in Hz
    #[arg(long)]
    pub sample_rate: Option<u32>,
}

impl HeadFlags {
    /// Merge into `config` and build the head model.
    pub fn head_model(&self, config: &mut EarshotConfig) -> anyhow::Result<HeadModel> {
        let head = &mut config.head;
        if let Some(radius) = self.radius {
            head.radius = radius;
        }
        if let Some(speed) = self.speed_of_sound {
            head.speed_of_sound = speed;
        }
        if let Some(sample_rate) = self.sample_rate {
            head.sample_rate = sample_rate;
        }
        Ok(config.head_model()?)
    }
}

/// Parse a comma-separated angle list such as `-90,-45,0,45,90`.
pub fn parse_angles(s: &str) -> Result<Vec<f32>, String> {
    let angles = s
        .split(',')
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(|a| {
            a.parse::<f32>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| format!("invalid angle '{a}'"))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if angles.is_empty() {
        return Err("expected at least one angle".to_string());
    }
    Ok(angles)
}

/// File name of `path` for display.
pub fn display_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_angles_accepts_lists() {
        assert_eq!(parse_angles("-90, 0,90").unwrap(), vec![-90.0, 0.0, 90.0]);
        assert_eq!(parse_angles("45").unwrap(), vec![45.0]);
    }

    #[test]
    fn parse_angles_rejects_garbage() {
        assert!(parse_angles("").is_err());
        assert!(parse_angles("10,left").is_err());
        assert!(parse_angles("inf").is_err());
    }

    #[test]
    fn window_help_lists_every_window() {
        let help = window_help();
        for window in earshot_analysis::Window::ALL {
            assert!(help.contains(window.name()), "{help}");
        }
    }

    #[test]
    fn flags_override_config() {
        let mut config = EarshotConfig::default();
        let flags = AnalysisFlags {
            threshold: Some(0.3),
            window: Some("hann".into()),
            ..Default::default()
        };
        flags.apply(&mut config);
        assert_eq!(config.analysis.threshold, 0.3);
        assert_eq!(config.analysis.window, "hann");
        assert_eq!(config.analysis.fft_size, 16384);
    }

    #[test]
    fn bad_override_is_rejected() {
        let mut config = EarshotConfig::default();
        let flags = AnalysisFlags {
            fft_size: Some(2),
            ..Default::default()
        };
        assert!(flags.analyzer(&mut config).is_err());

        let head = HeadFlags {
            radius: Some(0.0),
            ..Default::default()
        };
        assert!(head.head_model(&mut EarshotConfig::default()).is_err());
    }
}
