//! Configuration file format and operations.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::paths::user_config_path;
use earshot_analysis::{
    DEFAULT_FFT_SIZE, DEFAULT_MIN_FREQUENCY, DEFAULT_THRESHOLD, HarmonicConfig, Window,
};
use earshot_spatial::{
    DEFAULT_ANGLES, DEFAULT_BURST_SECS, DEFAULT_GAP_SECS, DEFAULT_HEAD_RADIUS,
    DEFAULT_SPEED_OF_SOUND, HeadModel, MovingSource,
};

/// Top-level configuration.
///
/// Every field has a default, so an empty file (or no file at all) is a
/// valid configuration.
///
/// # TOML Format
///
/// ```toml
/// [analysis]
/// threshold = 0.1
/// fft_size = 16384
/// min_frequency = 20.0
/// window = "rectangular"
///
/// [head]
/// radius = 0.09
/// speed_of_sound = 343.0
/// sample_rate = 44100
///
/// [demo]
/// angles = [-90.0, -60.0, -30.0, 0.0, 30.0, 60.0, 90.0]
/// burst_secs = 0.25
/// gap_secs = 0.05
/// seed = 7
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct EarshotConfig {
    /// Harmonic analyzer settings.
    pub analysis: AnalysisSettings,
    /// Head model settings.
    pub head: HeadSettings,
    /// Moving-source demo settings.
    pub demo: DemoSettings,
}

/// `[analysis]` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisSettings {
    /// Relative peak threshold, in `(0, 1]`.
    pub threshold: f32,
    /// FFT size (at least 4).
    pub fft_size: usize,
    /// Lowest accepted peak frequency in Hz.
    pub min_frequency: f32,
    /// Window name (`rectangular`, `hann`, `hamming`, `blackman`,
    /// `blackman-harris`).
    pub window: String,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            fft_size: DEFAULT_FFT_SIZE,
            min_frequency: DEFAULT_MIN_FREQUENCY,
            window: Window::Rectangular.name().to_string(),
        }
    }
}

/// `[head]` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct HeadSettings {
    /// Head radius in metres.
    pub radius: f32,
    /// Speed of sound in m/s.
    pub speed_of_sound: f32,
    /// Rendering sample rate in Hz.
    pub sample_rate: u32,
}

impl Default for HeadSettings {
    fn default() -> Self {
        Self {
            radius: DEFAULT_HEAD_RADIUS,
            speed_of_sound: DEFAULT_SPEED_OF_SOUND,
            sample_rate: 44100,
        }
    }
}

/// `[demo]` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DemoSettings {
    /// Azimuths visited, in degrees.
    pub angles: Vec<f32>,
    /// Burst duration in seconds.
    pub burst_secs: f32,
    /// Silence after each burst in seconds.
    pub gap_secs: f32,
    /// Noise seed; entropy-seeded when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            angles: DEFAULT_ANGLES.to_vec(),
            burst_secs: DEFAULT_BURST_SECS,
            gap_secs: DEFAULT_GAP_SECS,
            seed: None,
        }
    }
}

impl EarshotConfig {
    /// Load a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read(path, e))?;
        let config = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Load a configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Convert the configuration to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save the configuration to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        // Ensure parent directory exists
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::write(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write(path, e))?;
        Ok(())
    }

    /// Resolve the configuration to use.
    ///
    /// An explicit path must exist. Without one, the user configuration file
    /// is used when present, otherwise the built-in defaults. Returns the
    /// file that was read, if any.
    pub fn resolve(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>), ConfigError> {
        if let Some(path) = explicit {
            return Ok((Self::load(path)?, Some(path.to_path_buf())));
        }

        let user = user_config_path();
        if user.is_file() {
            return Ok((Self::load(&user)?, Some(user)));
        }

        tracing::debug!("no configuration file, using defaults");
        Ok((Self::default(), None))
    }

    /// Check every setting for range errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let a = &self.analysis;
        if !(a.threshold > 0.0 && a.threshold <= 1.0) {
            return Err(ConfigError::invalid(
                "analysis.threshold",
                format!("must be within (0, 1], got {}", a.threshold),
            ));
        }
        if a.fft_size < 4 {
            return Err(ConfigError::invalid(
                "analysis.fft_size",
                format!("must be at least 4, got {}", a.fft_size),
            ));
        }
        if !a.min_frequency.is_finite() || a.min_frequency < 0.0 {
            return Err(ConfigError::invalid(
                "analysis.min_frequency",
                format!("must be non-negative, got {}", a.min_frequency),
            ));
        }
        self.window()?;

        let h = &self.head;
        positive("head.radius", h.radius)?;
        positive("head.speed_of_sound", h.speed_of_sound)?;
        if h.sample_rate == 0 {
            return Err(ConfigError::invalid("head.sample_rate", "must be positive, got 0"));
        }

        let d = &self.demo;
        if d.angles.is_empty() {
            return Err(ConfigError::invalid("demo.angles", "must list at least one angle"));
        }
        if let Some(bad) = d.angles.iter().find(|a| !a.is_finite()) {
            return Err(ConfigError::invalid(
                "demo.angles",
                format!("angles must be finite, got {bad}"),
            ));
        }
        positive("demo.burst_secs", d.burst_secs)?;
        if !d.gap_secs.is_finite() || d.gap_secs < 0.0 {
            return Err(ConfigError::invalid(
                "demo.gap_secs",
                format!("must be non-negative, got {}", d.gap_secs),
            ));
        }

        Ok(())
    }

    /// Parsed analysis window.
    pub fn window(&self) -> Result<Window, ConfigError> {
        self.analysis
            .window
            .parse()
            .map_err(|e: earshot_analysis::UnknownWindow| {
                ConfigError::invalid("analysis.window", e.to_string())
            })
    }

    /// Analyzer settings.
    pub fn harmonic_config(&self) -> Result<HarmonicConfig, ConfigError> {
        let config = HarmonicConfig {
            threshold: self.analysis.threshold,
            fft_size: self.analysis.fft_size,
            min_frequency: self.analysis.min_frequency,
            window: self.window()?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Head model.
    pub fn head_model(&self) -> Result<HeadModel, ConfigError> {
        Ok(HeadModel::new(
            self.head.radius,
            self.head.speed_of_sound,
            self.head.sample_rate as f32,
        )?)
    }

    /// Moving-source scene.
    pub fn moving_source(&self) -> Result<MovingSource, ConfigError> {
        Ok(MovingSource::new(
            self.demo.angles.clone(),
            self.demo.burst_secs,
            self.demo.gap_secs,
        )?)
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            field,
            format!("must be positive, got {value}"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = EarshotConfig::default();
        config.validate().unwrap();
        assert_eq!(config.analysis.fft_size, 16384);
        assert_eq!(config.head.sample_rate, 44100);
        assert_eq!(config.demo.angles.len(), 7);
        assert_eq!(config.window().unwrap(), Window::Rectangular);
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(EarshotConfig::from_toml("").unwrap(), EarshotConfig::default());
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config = EarshotConfig::from_toml("[head]\nradius = 0.1\n").unwrap();
        assert_eq!(config.head.radius, 0.1);
        assert_eq!(config.head.speed_of_sound, 343.0);
        assert_eq!(config.analysis, AnalysisSettings::default());
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = EarshotConfig::from_toml("[head]\nradious = 0.1\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn toml_roundtrip() {
        let mut config = EarshotConfig::default();
        config.demo.seed = Some(42);
        config.analysis.window = "hann".to_string();

        let text = config.to_toml().unwrap();
        assert!(text.contains("[demo]"));
        assert_eq!(EarshotConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn validation_names_the_field() {
        let mut config = EarshotConfig::default();
        config.analysis.threshold = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "analysis.threshold", .. })
        ));

        let mut config = EarshotConfig::default();
        config.head.radius = -0.09;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "head.radius", .. })
        ));

        let mut config = EarshotConfig::default();
        config.demo.angles.clear();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "demo.angles", .. })
        ));

        let mut config = EarshotConfig::default();
        config.analysis.window = "triangle".into();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "analysis.window", .. })
        ));
    }

    #[test]
    fn conversions() {
        let config = EarshotConfig::from_toml(
            "[analysis]\nwindow = \"blackman\"\nfft_size = 4096\n[head]\nsample_rate = 48000\n",
        )
        .unwrap();
        let harmonic = config.harmonic_config().unwrap();
        assert_eq!(harmonic.window, Window::Blackman);
        assert_eq!(harmonic.fft_size, 4096);
        assert_eq!(config.head_model().unwrap().sample_rate(), 48000.0);
        assert_eq!(config.moving_source().unwrap().angles().len(), 7);
    }
}
