//! Outlook calendar events over Microsoft Graph.
//!
//! [`OutlookEventsClient`] creates, cancels and updates events in a user's
//! default calendar using application (client-credentials) authentication.
//!
//! ```no_run
//! use outlook_events::{ClientCredential, EventPatch, OutlookEventsClient};
//!
//! # async fn example() -> outlook_events::Result<()> {
//! let credential = ClientCredential::new("client-id", "client-secret", Some("tenant-id".into()));
//! let client = OutlookEventsClient::new(&credential)?;
//!
//! let patch = EventPatch {
//!     subject: Some("Rescheduled sync".to_string()),
//!     ..EventPatch::default()
//! };
//! client
//!     .update_event("AAMkAGI2TG93AAA=", "alice@contoso.com", &patch)
//!     .await?;
//! client
//!     .cancel_event("AAMkAGI2TG93AAA=", "alice@contoso.com", "No longer needed")
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! Request failures are reported as [`Error::OperationFailed`] with a fixed
//! message per operation; the underlying cause goes to the client's
//! [`DiagnosticSink`] (by default, a `tracing` error event).

#![warn(clippy::missing_errors_doc, clippy::missing_panics_doc, dead_code)]
#![recursion_limit = "256"]

mod client;
mod config;
mod credential;
mod diagnostics;
mod error;
mod failure;
mod graph;
mod identity;
mod types;

pub use client::OutlookEventsClient;
pub use config::{ClientConfig, ConfigError, DEFAULT_AUTHORITY_HOST, DEFAULT_GRAPH_ENDPOINT};
pub use credential::ClientCredential;
pub use diagnostics::{DiagnosticSink, MemorySink, TracingSink};
pub use error::{Error, Operation, Result};
pub use failure::{GraphError, RequestFailure};
pub use graph::{
    AuthProvider, GRAPH_DEFAULT_SCOPE, GraphClient, GraphTransport, TokenCredentialAuthProvider,
    create_graph_client,
};
pub use identity::{AccessToken, ClientSecretCredential, TokenCredential};
pub use reqwest::Method;
pub use types::*;
