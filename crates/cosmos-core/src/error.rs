//! Error types for the COSMOS application.

use thiserror::Error;

/// A shared error type for the entire COSMOS application.
///
/// None of these errors ever reach the meditating user: audio failures are
/// absorbed by the sequencer, configuration errors are reported at startup,
/// and an empty worry keeps the user on the entry screen.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CosmosError {
    /// Audio acquisition or playback failed
    #[error("Audio error: {message}")]
    Audio { message: String },

    /// A static asset could not be found
    #[error("Asset not found: {path}")]
    AssetNotFound { path: String },

    /// The entry form was submitted without a worry
    #[error("Worry text must not be empty")]
    EmptyWorry,

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CosmosError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an Audio error
    pub fn audio(message: impl Into<String>) -> Self {
        Self::Audio {
            message: message.into(),
        }
    }

    /// Creates an AssetNotFound error
    pub fn asset_not_found(path: impl Into<String>) -> Self {
        Self::AssetNotFound { path: path.into() }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this error came from the audio layer (including missing assets)
    pub fn is_audio(&self) -> bool {
        matches!(self, Self::Audio { .. } | Self::AssetNotFound { .. })
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for CosmosError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<toml::de::Error> for CosmosError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for CosmosError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, CosmosError>`.
pub type Result<T> = std::result::Result<T, CosmosError>;
