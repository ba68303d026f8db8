//! Error types for the Bubble workspace.

use thiserror::Error;

/// Top-level error type for Bubble operations.
#[derive(Debug, Error)]
pub enum BubbleError {
    /// Configuration errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Configuration file could not be parsed
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Invalid per-instance tunables.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Wander radius must be finite and positive
    #[error("wander radius must be positive, got {0}")]
    InvalidWanderRadius(f32),

    /// Wander interval bounds are inverted or negative
    #[error("wander change interval [{min}, {max}] is invalid")]
    InvalidWanderInterval {
        /// Lower bound in seconds
        min: f32,
        /// Upper bound in seconds
        max: f32,
    },

    /// A distance or speed tunable is negative or not finite
    #[error("{name} must be a finite non-negative number, got {value}")]
    InvalidScalar {
        /// Tunable name
        name: &'static str,
        /// Offending value
        value: f32,
    },

    /// A movement profile has a negative or non-finite constant
    #[error("movement profile '{profile}' is invalid: {reason}")]
    InvalidProfile {
        /// Profile name (wander / follow / tethered)
        profile: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

/// Result type alias for Bubble operations.
pub type BubbleResult<T> = Result<T, BubbleError>;
