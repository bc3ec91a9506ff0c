//! Error types for the acceleration core.

use thiserror::Error;

/// Errors that can occur while building or querying a scene.
#[derive(Error, Debug)]
pub enum AccelError {
    /// A query was issued before `build`.
    #[error("scene has not been built; call build() before querying")]
    NotBuilt,

    /// `add` or `build` was called on a scene that is already built.
    #[error("scene is already built; call clear() before modifying it")]
    AlreadyBuilt,

    /// Build settings failed validation.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// Build settings document could not be parsed.
    #[error("failed to parse settings: {0}")]
    SettingsParse(#[from] toml::de::Error),
}

/// Result type for acceleration-structure operations.
pub type Result<T> = std::result::Result<T, AccelError>;
