//! Infrastructure errors shared by repositories, the unit of work and
//! configuration loading.
//!
//! Lifecycle handlers report their own taxonomy from `lessonhub-service`
//! and convert into [`AppError`] only at the outer boundary.

use std::fmt;

use thiserror::Error;

/// Category of an [`AppError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A row the caller referenced does not exist.
    NotFound,
    /// The actor is not allowed to do this.
    Authorization,
    /// Caller input is malformed.
    Validation,
    /// The row is in a status that does not permit the change.
    InvalidState,
    /// A write raced with another writer or violated a uniqueness rule.
    Conflict,
    /// The backing store failed.
    Database,
    /// Settings are missing or unreadable.
    Configuration,
    /// Anything else.
    Internal,
}

impl ErrorKind {
    /// Stable upper-case code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::Authorization => "AUTHORIZATION",
            Self::Validation => "VALIDATION",
            Self::InvalidState => "INVALID_STATE",
            Self::Conflict => "CONFLICT",
            Self::Database => "DATABASE",
            Self::Configuration => "CONFIGURATION",
            Self::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type BoxedCause = Box<dyn std::error::Error + Send + Sync>;

/// Error returned by every fallible infrastructure call.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// Category.
    pub kind: ErrorKind,
    /// What went wrong, for humans.
    pub message: String,
    /// Underlying driver or parser error, when there is one.
    #[source]
    pub source: Option<BoxedCause>,
}

impl AppError {
    /// Error without an underlying cause.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Error wrapping the failure that caused it.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authorization, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidState, message)
    }

    /// A staged write no longer applies, e.g. its row vanished.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Failed to load configuration: {err}"),
            err,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_kind() {
        let err = AppError::invalid_state("folder is archived");
        assert_eq!(err.to_string(), "INVALID_STATE: folder is archived");
    }

    #[test]
    fn test_with_source_keeps_cause() {
        let io = std::io::Error::other("disk");
        let err = AppError::with_source(ErrorKind::Database, "write failed", io);
        let cause = std::error::Error::source(&err).map(|c| c.to_string());
        assert_eq!(cause.as_deref(), Some("disk"));
        assert!(std::error::Error::source(&AppError::conflict("gone")).is_none());
    }

    #[test]
    fn test_config_error_maps_to_configuration() {
        let err: AppError = config::ConfigError::Message("bad".into()).into();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }
}
