//! Failure values produced by a [`GraphTransport`](crate::GraphTransport).

use std::fmt;

use serde::Deserialize;
use serde_json::Value;

/// Why a transport request did not produce a response value.
///
/// A recognized failure carries a message; an opaque failure is whatever
/// value the collaborator produced, kept as-is for diagnostics.
#[derive(Debug)]
pub enum RequestFailure {
    /// An error value; its message is what gets logged.
    Recognized(Box<dyn std::error::Error + Send + Sync>),
    /// Anything else, logged as the raw value.
    Opaque(Value),
}

impl RequestFailure {
    /// Wraps an error or message string.
    pub fn recognized(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Recognized(error.into())
    }

    /// Wraps a value that is not an error.
    pub fn opaque(value: impl Into<Value>) -> Self {
        Self::Opaque(value.into())
    }

    /// Text written to the diagnostic sink: the message of a recognized
    /// failure, or the raw value of an opaque one.
    pub fn detail(&self) -> String {
        match self {
            Self::Recognized(error) => error.to_string(),
            Self::Opaque(Value::String(raw)) => raw.clone(),
            Self::Opaque(value) => value.to_string(),
        }
    }
}

impl fmt::Display for RequestFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.detail())
    }
}

impl From<reqwest::Error> for RequestFailure {
    fn from(error: reqwest::Error) -> Self {
        Self::Recognized(Box::new(error))
    }
}

impl From<serde_json::Error> for RequestFailure {
    fn from(error: serde_json::Error) -> Self {
        Self::Recognized(Box::new(error))
    }
}

/// Error body returned by Graph for a non-success status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} ({status} {code})")]
pub struct GraphError {
    pub status: u16,
    pub code: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct GraphErrorEnvelope {
    error: GraphErrorBody,
}

#[derive(Debug, Deserialize)]
struct GraphErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

impl GraphError {
    /// Builds the failure for a non-success response body.
    ///
    /// A Graph error envelope yields a recognized [`GraphError`]; any other
    /// body is kept as an opaque value (JSON if it parses, the raw text
    /// otherwise).
    pub(crate) fn failure_from_body(status: u16, body: &str) -> RequestFailure {
        if let Ok(envelope) = serde_json::from_str::<GraphErrorEnvelope>(body) {
            return RequestFailure::recognized(GraphError {
                status,
                code: envelope.error.code,
                message: envelope.error.message,
            });
        }
        match serde_json::from_str::<Value>(body) {
            Ok(value) => RequestFailure::Opaque(value),
            Err(_) => RequestFailure::Opaque(Value::String(body.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_recognized_detail_is_message() {
        let failure = RequestFailure::recognized("fail");
        assert_eq!(failure.detail(), "fail");
    }

    #[test]
    fn test_opaque_string_detail_is_raw() {
        let failure = RequestFailure::opaque("fail-string");
        assert_eq!(failure.detail(), "fail-string");
    }

    #[test]
    fn test_opaque_object_detail_is_compact_json() {
        let failure = RequestFailure::opaque(json!({ "custom": "fail" }));
        assert_eq!(failure.detail(), r#"{"custom":"fail"}"#);
    }

    #[test]
    fn test_failure_from_graph_envelope_is_recognized() {
        let failure = GraphError::failure_from_body(
            404,
            r#"{ "error": { "code": "ErrorItemNotFound", "message": "The specified object was not found in the store." } }"#,
        );

        let RequestFailure::Recognized(error) = failure else {
            panic!("expected recognized failure");
        };
        assert_eq!(
            error.to_string(),
            "The specified object was not found in the store. (404 ErrorItemNotFound)"
        );
    }

    #[test]
    fn test_failure_from_other_json_is_opaque() {
        let failure = GraphError::failure_from_body(500, r#"{ "oops": true }"#);
        assert!(matches!(failure, RequestFailure::Opaque(ref v) if v == &json!({ "oops": true })));
    }

    #[test]
    fn test_failure_from_plain_text_is_opaque_string() {
        let failure = GraphError::failure_from_body(502, "Bad Gateway");
        assert_eq!(failure.detail(), "Bad Gateway");
    }
}
