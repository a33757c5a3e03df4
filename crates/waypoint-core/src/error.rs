#![forbid(unsafe_code)]

//! Error types for the few fallible edges of the engine.
//!
//! Session transitions never fail; only registry validation and
//! configuration loading do.

use thiserror::Error;

/// A step list violates its invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("duplicate step id {id:?} at index {index}")]
    DuplicateStepId { id: String, index: usize },

    #[error("step at index {index} has an empty id")]
    EmptyStepId { index: usize },
}

/// Errors that can occur when loading a [`TourConfig`](crate::config::TourConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "config-files")]
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[cfg(feature = "config-files")]
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported config format: {extension:?}")]
    UnsupportedFormat { extension: Option<String> },

    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_joins_errors() {
        let err = ConfigError::Validation(vec!["a".into(), "b".into()]);
        assert_eq!(err.to_string(), "validation errors: a; b");
    }

    #[test]
    fn duplicate_id_message_names_id() {
        let err = RegistryError::DuplicateStepId {
            id: "intro".into(),
            index: 3,
        };
        assert_eq!(err.to_string(), "duplicate step id \"intro\" at index 3");
    }
}
