use thiserror::Error;

use waypoint_core::{ConfigError, RegistryError, UnknownPage, UnknownStateFlag};

pub type Result<T> = std::result::Result<T, ShowcaseError>;

#[derive(Debug, Error)]
pub enum ShowcaseError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("step registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    UnknownPage(#[from] UnknownPage),

    #[error(transparent)]
    UnknownStateFlag(#[from] UnknownStateFlag),

    #[error("script action {index} ({token:?}): {reason}")]
    InvalidScript {
        index: usize,
        token: String,
        reason: String,
    },
}

impl ShowcaseError {
    /// Process exit code: 2 for bad input, 1 for everything else.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_)
            | Self::UnknownPage(_)
            | Self::UnknownStateFlag(_)
            | Self::InvalidScript { .. } => 2,
            Self::Registry(_) | Self::Io(_) | Self::Json(_) => 1,
        }
    }

    #[must_use]
    pub fn invalid_script(index: usize, token: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidScript {
            index,
            token: token.into(),
            reason: reason.into(),
        }
    }
}
