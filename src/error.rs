//! Error handling for audio-cue
//!
//! The facade operations never fail. These errors come from the layers
//! around it: config loading and the simulator's script parsing.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for audio-cue operations
pub type Result<T> = std::result::Result<T, CueError>;

/// Main error type for audio-cue operations
#[derive(Error, Debug)]
pub enum CueError {
    // Config Errors
    #[error("Cannot read config file: {path}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    ConfigParse(#[source] serde_json::Error),

    // Script Errors
    #[error("Invalid step '{step}': {reason}")]
    InvalidStep { step: String, reason: String },

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CueError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            CueError::ConfigRead { .. } => "CONFIG_READ",
            CueError::ConfigParse(_) => "CONFIG_PARSE",
            CueError::InvalidStep { .. } => "INVALID_STEP",
            CueError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    pub(crate) fn invalid_step(step: &str, reason: impl Into<String>) -> Self {
        CueError::InvalidStep {
            step: step.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = CueError::invalid_step("play:x", "bad position");
        assert_eq!(err.error_code(), "INVALID_STEP");
    }

    #[test]
    fn test_json_errors_default_to_serialization() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: CueError = json_err.into();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
        assert!(err.to_string().starts_with("Serialization error:"));
    }

    #[test]
    fn test_display_includes_step() {
        let err = CueError::invalid_step("wait:", "missing duration");
        assert_eq!(err.to_string(), "Invalid step 'wait:': missing duration");
    }

    #[test]
    fn test_config_read_keeps_source() {
        use std::error::Error as _;

        let err = CueError::ConfigRead {
            path: PathBuf::from("/nope/cue.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(err.error_code(), "CONFIG_READ");
        assert!(err.source().is_some());
        assert!(err.to_string().contains("/nope/cue.json"));
    }
}
