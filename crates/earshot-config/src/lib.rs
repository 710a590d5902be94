//! Configuration for earshot.
//!
//! One TOML file carries the analyzer settings, the head model and the
//! moving-source demo scene. Every field is optional; anything left out
//! falls back to the built-in defaults.
//!
//! # Example
//!
//! ```rust
//! use earshot_config::EarshotConfig;
//!
//! let config = EarshotConfig::from_toml("[analysis]\nthreshold = 0.2\n").unwrap();
//! config.validate().unwrap();
//!
//! let analyzer = config.harmonic_config().unwrap();
//! assert_eq!(analyzer.threshold, 0.2);
//! assert_eq!(config.head_model().unwrap().radius(), 0.09);
//! ```

mod config;
mod error;

/// Platform-specific configuration paths.
pub mod paths;

pub use config::{AnalysisSettings, DemoSettings, EarshotConfig, HeadSettings};
pub use error::ConfigError;
pub use paths::{CONFIG_FILE_NAME, user_config_dir, user_config_path};
