//! Error types returned by the Outlook events client.

use std::fmt;

use crate::config::ConfigError;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The calendar operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// `create_event`
    Create,
    /// `cancel_event`
    Cancel,
    /// `update_event`
    Update,
}

impl Operation {
    /// Label written to the diagnostic sink before the error is returned.
    pub fn diagnostic_label(self) -> &'static str {
        match self {
            Operation::Create => "Error creating event:",
            Operation::Cancel => "Error canceling event:",
            Operation::Update => "Error updating event:",
        }
    }

    /// Fixed message carried by [`Error::OperationFailed`].
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::Create => "Failed to create event",
            Operation::Cancel => "Failed to cancel event",
            Operation::Update => "Failed to update event",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.failure_message())
    }
}

/// Errors surfaced to callers of the client.
///
/// Request failures are deliberately flattened into
/// [`Error::OperationFailed`]: the underlying cause is written to the
/// diagnostic sink and is not reachable through this value.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A required credential field is missing or empty.
    #[error("{0}")]
    InvalidCredential(&'static str),

    /// An argument failed validation; no request was issued.
    #[error("{0}")]
    Validation(&'static str),

    /// The request was issued and failed.
    #[error("{0}")]
    OperationFailed(Operation),

    /// The client configuration is unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn test_operation_failed_display_is_fixed_message() {
        assert_eq!(
            Error::OperationFailed(Operation::Create).to_string(),
            "Failed to create event"
        );
        assert_eq!(
            Error::OperationFailed(Operation::Cancel).to_string(),
            "Failed to cancel event"
        );
        assert_eq!(
            Error::OperationFailed(Operation::Update).to_string(),
            "Failed to update event"
        );
    }

    #[test]
    fn test_operation_failed_has_no_source() {
        let error = Error::OperationFailed(Operation::Update);
        assert!(error.source().is_none());
    }

    #[test]
    fn test_diagnostic_labels() {
        assert_eq!(Operation::Create.diagnostic_label(), "Error creating event:");
        assert_eq!(Operation::Cancel.diagnostic_label(), "Error canceling event:");
        assert_eq!(Operation::Update.diagnostic_label(), "Error updating event:");
    }

    #[test]
    fn test_validation_display_is_message() {
        let error = Error::Validation("A valid eventId is required");
        assert_eq!(error.to_string(), "A valid eventId is required");
    }
}
