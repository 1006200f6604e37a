//! Error types for frost

use thiserror::Error;

/// The main error type for frost operations
#[derive(Debug, Error)]
pub enum FrostError {
    #[error("Entity not found: {0}")]
    EntityNotFound(String),

    #[error("Duplicate entity name: {0}")]
    DuplicateEntityName(String),

    #[error("Invalid lifecycle transition: cannot {action} while {from}")]
    InvalidTransition { from: String, action: String },

    #[error("Scene error: {0}")]
    SceneError(String),

    #[error("Level error: {0}")]
    LevelError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("System '{system}' failed: {message}")]
    SystemError { system: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),
}

impl FrostError {
    /// Shorthand for a rejected lifecycle transition.
    pub fn invalid_transition(from: impl Into<String>, action: impl Into<String>) -> Self {
        FrostError::InvalidTransition {
            from: from.into(),
            action: action.into(),
        }
    }
}

/// Result type alias for frost operations
pub type Result<T> = std::result::Result<T, FrostError>;

impl From<toml::de::Error> for FrostError {
    fn from(err: toml::de::Error) -> Self {
        FrostError::TomlParseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_transition_message() {
        let err = FrostError::invalid_transition("running", "resume");
        assert_eq!(
            err.to_string(),
            "Invalid lifecycle transition: cannot resume while running"
        );
    }

    #[test]
    fn toml_errors_convert() {
        let parsed: std::result::Result<toml::Value, _> = toml::from_str("a = ");
        let err: FrostError = parsed.unwrap_err().into();
        assert!(matches!(err, FrostError::TomlParseError(_)));
    }
}
