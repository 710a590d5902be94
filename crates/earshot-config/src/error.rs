//! Configuration errors.

use earshot_analysis::AnalysisError;
use earshot_spatial::SpatialError;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Everything that can go wrong loading, saving or applying a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("cannot read configuration {}: {source}", path.display())]
    Read {
        /// Offending file.
        path: PathBuf,
        /// I/O failure.
        #[source]
        source: io::Error,
    },

    /// The configuration file (or its directory) could not be written.
    #[error("cannot write configuration {}: {source}", path.display())]
    Write {
        /// File or directory that could not be created.
        path: PathBuf,
        /// I/O failure.
        #[source]
        source: io::Error,
    },

    /// The file is not valid TOML or has unknown keys.
    #[error("malformed configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration could not be rendered as TOML.
    #[error("cannot render configuration: {0}")]
    Render(#[from] toml::ser::Error),

    /// A setting is out of range.
    #[error("invalid setting '{field}': {reason}")]
    Invalid {
        /// Dotted name of the setting, e.g. `head.radius`.
        field: &'static str,
        /// What is wrong with the value.
        reason: String,
    },

    /// Analyzer settings rejected by the analyzer.
    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    /// Head or scene settings rejected by the spatial model.
    #[error(transparent)]
    Spatial(#[from] SpatialError),
}

impl ConfigError {
    pub(crate) fn read(path: &Path, source: io::Error) -> Self {
        Self::Read {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn write(path: &Path, source: io::Error) -> Self {
        Self::Write {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Out-of-range setting.
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }

    /// Dotted setting name for [`ConfigError::Invalid`], `None` otherwise.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Invalid { field, .. } => Some(field),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn read_error_names_path_and_keeps_source() {
        let err = ConfigError::read(
            Path::new("/etc/earshot.toml"),
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        let msg = err.to_string();
        assert!(msg.starts_with("cannot read configuration /etc/earshot.toml"), "{msg}");
        assert!(err.source().is_some());
        assert_eq!(err.field(), None);
    }

    #[test]
    fn invalid_names_the_field() {
        let err = ConfigError::invalid("head.radius", "must be positive, got -1");
        assert_eq!(
            err.to_string(),
            "invalid setting 'head.radius': must be positive, got -1"
        );
        assert_eq!(err.field(), Some("head.radius"));
    }

    #[test]
    fn library_errors_pass_through() {
        let err: ConfigError = SpatialError::InvalidScene("no angles given".into()).into();
        assert_eq!(err.to_string(), "invalid scene: no angles given");
        assert!(matches!(err, ConfigError::Spatial(SpatialError::InvalidScene(_))));
    }
}
