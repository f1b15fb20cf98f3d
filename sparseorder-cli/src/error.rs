//! CLI error types and exit codes.

use sparseorder_core::{ConfigError, OrderError};

/// Exit codes for CLI operations
pub mod exit_codes {
    /// General error - layout, settings, validation or IO errors
    pub const GENERAL_ERROR: i32 = 1;
    /// Ordering failure - unknown collection or anchor, or no position left
    /// after a cleanup
    pub const ORDERING_FAILURE: i32 = 2;
}

/// CLI error type
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Settings error
    #[error("Settings error: {0}")]
    Settings(String),

    /// Layout file error
    #[error("Layout error: {0}")]
    Layout(String),

    /// Invalid combination of arguments
    #[error("Invalid arguments: {0}")]
    Invalid(String),

    /// Collection or anchor not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// No position left after renumbering
    #[error("Ordering failed: {0}")]
    Exhausted(String),

    /// Rejected or failed ordering request
    #[error("Ordering error: {0}")]
    Order(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<OrderError> for CliError {
    fn from(err: OrderError) -> Self {
        if err.is_not_found() {
            return Self::NotFound(err.to_string());
        }
        match err {
            OrderError::CollectionNotFound(_) | OrderError::AnchorNotFound { .. } => {
                Self::NotFound(err.to_string())
            }
            OrderError::PositionSpaceExhausted { .. } => Self::Exhausted(err.to_string()),
            OrderError::CorruptSnapshot { .. } => Self::Layout(err.to_string()),
            OrderError::SelfAnchor(_)
            | OrderError::DuplicateItem { .. }
            | OrderError::Store(_) => Self::Order(err.to_string()),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Settings(err.to_string())
    }
}

impl CliError {
    /// Returns the appropriate exit code for this error type.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: General error (settings, layout, arguments, IO, store)
    /// - 2: Ordering failure (not found, exhausted)
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound(_) | Self::Exhausted(_) => exit_codes::ORDERING_FAILURE,
            Self::Settings(_)
            | Self::Layout(_)
            | Self::Invalid(_)
            | Self::Order(_)
            | Self::Io(_) => exit_codes::GENERAL_ERROR,
        }
    }
}
