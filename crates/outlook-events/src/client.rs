//! Calendar event operations for a user's default calendar.

use std::sync::Arc;

use reqwest::Method;
use serde::Serialize;
use serde_json::{Value, json};

use crate::{
    config::ClientConfig,
    credential::ClientCredential,
    diagnostics::{DiagnosticSink, TracingSink},
    error::{Error, Operation, Result},
    failure::RequestFailure,
    graph::{GraphClient, GraphTransport, create_graph_client},
    types::OutlookEvent,
};

/// Creates, cancels and updates events in `/users/{upn}/calendar`.
///
/// Arguments are validated before any request is made. When a request
/// fails, the cause is written to the diagnostic sink and the caller gets
/// [`Error::OperationFailed`] with a fixed message.
pub struct OutlookEventsClient<T = GraphClient> {
    transport: T,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl OutlookEventsClient<GraphClient> {
    /// Builds a client with its own Graph handle.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCredential`] if `client_id` or
    /// `client_secret` is empty.
    pub fn new(credential: &ClientCredential) -> Result<Self> {
        Self::with_config(credential, &ClientConfig::default())
    }

    /// Builds a client against the endpoints in `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `client_id` or `client_secret` is empty
    /// - An endpoint in `config` is not a valid base URL
    /// - The request timeout in `config` is zero
    pub fn with_config(credential: &ClientCredential, config: &ClientConfig) -> Result<Self> {
        Ok(Self::with_transport(create_graph_client(credential, config)?))
    }
}

impl<T: GraphTransport> OutlookEventsClient<T> {
    /// Wraps an existing transport. Failures go to a [`TracingSink`].
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            diagnostics: Arc::new(TracingSink),
        }
    }

    /// Replaces the sink that receives failure details.
    #[must_use]
    pub fn with_diagnostics(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = sink;
        self
    }

    /// Creates an event in the user's default calendar.
    ///
    /// `event` may be an [`Event`](crate::Event) or any value that
    /// serializes to a JSON object. The response is returned as received.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `event` does not serialize to a JSON object ([`Error::Validation`])
    /// - `user_principal_name` is empty or whitespace ([`Error::Validation`])
    /// - The request fails ([`Error::OperationFailed`])
    pub async fn create_event<E>(
        &self,
        event: &E,
        user_principal_name: &str,
    ) -> Result<OutlookEvent>
    where
        E: Serialize + ?Sized,
    {
        let payload = object_payload(event, "A valid event object is required")?;
        require_text(user_principal_name, "A valid userPrincipalName is required")?;

        let path = format!("/users/{user_principal_name}/calendar/events");
        let response = self
            .send(Operation::Create, Method::POST, &path, payload)
            .await?;
        Ok(OutlookEvent::from(response))
    }

    /// Cancels an event and notifies its attendees with `comment`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `event_id` or `user_principal_name` is empty or whitespace
    ///   ([`Error::Validation`])
    /// - The request fails ([`Error::OperationFailed`])
    pub async fn cancel_event(
        &self,
        event_id: &str,
        user_principal_name: &str,
        comment: &str,
    ) -> Result<()> {
        require_text(event_id, "A valid eventId is required")?;
        require_text(user_principal_name, "A valid userPrincipalName is required")?;

        let path = format!("/users/{user_principal_name}/calendar/events/{event_id}/cancel");
        // Graph expects the capitalized key for this action.
        let payload = json!({ "Comment": comment });
        self.send(Operation::Cancel, Method::POST, &path, payload)
            .await?;
        Ok(())
    }

    /// Applies a partial update to an event.
    ///
    /// `event_patch` may be an [`EventPatch`](crate::EventPatch) or any
    /// value that serializes to a JSON object; it is sent unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `event_patch` does not serialize to a JSON object
    ///   ([`Error::Validation`])
    /// - `event_id` or `user_principal_name` is empty or whitespace
    ///   ([`Error::Validation`])
    /// - The request fails ([`Error::OperationFailed`])
    pub async fn update_event<P>(
        &self,
        event_id: &str,
        user_principal_name: &str,
        event_patch: &P,
    ) -> Result<()>
    where
        P: Serialize + ?Sized,
    {
        let payload = object_payload(event_patch, "A valid eventPatch object is required")?;
        require_text(event_id, "A valid eventId is required")?;
        require_text(user_principal_name, "A valid userPrincipalName is required")?;

        let path = format!("/users/{user_principal_name}/calendar/events/{event_id}");
        self.send(Operation::Update, Method::PATCH, &path, payload)
            .await?;
        Ok(())
    }

    async fn send(
        &self,
        operation: Operation,
        method: Method,
        path: &str,
        payload: Value,
    ) -> Result<Value> {
        self.transport
            .request(method, path, Some(payload))
            .await
            .map_err(|failure| self.fail(operation, &failure))
    }

    fn fail(&self, operation: Operation, failure: &RequestFailure) -> Error {
        self.diagnostics
            .record(operation.diagnostic_label(), &failure.detail());
        Error::OperationFailed(operation)
    }
}

fn object_payload<V: Serialize + ?Sized>(value: &V, message: &'static str) -> Result<Value> {
    match serde_json::to_value(value) {
        Ok(payload @ Value::Object(_)) => Ok(payload),
        _ => Err(Error::Validation(message)),
    }
}

fn require_text(value: &str, message: &'static str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Validation(message));
    }
    Ok(())
}
