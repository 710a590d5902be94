//! Error types for the spatial model.

use thiserror::Error;

/// Errors produced when building head models or scenes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpatialError {
    /// A head-model parameter is not a positive finite number.
    #[error("invalid head model: {name} must be positive and finite, got {value}")]
    InvalidHeadModel {
        /// Parameter name.
        name: &'static str,
        /// Rejected value.
        value: f32,
    },

    /// A moving-source scene is unusable.
    #[error("invalid scene: {0}")]
    InvalidScene(String),
}

/// Result type for spatial operations.
pub type Result<T> = std::result::Result<T, SpatialError>;
