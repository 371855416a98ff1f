//! Authenticated Microsoft Graph transport.
//!
//! [`create_graph_client`] assembles a [`GraphClient`] from application
//! credentials: an identity credential, an auth provider bound to the Graph
//! default scope, and an HTTP client. No request is sent until the handle is
//! first used.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, Method, Url, header};
use serde_json::Value;
use tracing::debug;

use crate::{
    config::{ClientConfig, ConfigError},
    credential::ClientCredential,
    error::Result,
    failure::{GraphError, RequestFailure},
    identity::{ClientSecretCredential, TokenCredential},
};

/// The single scope requested for every Graph call.
pub const GRAPH_DEFAULT_SCOPE: &str = "https://graph.microsoft.com/.default";

/// Issues one request against the Graph API.
///
/// `path` is relative to the configured endpoint (for example
/// `/users/alice@example.com/calendar/events`). A successful response with
/// an empty body resolves to [`Value::Null`].
#[async_trait]
pub trait GraphTransport: Send + Sync {
    /// Sends `body` (if any) to `path` and returns the decoded response.
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, RequestFailure>;
}

#[async_trait]
impl<T: GraphTransport + ?Sized> GraphTransport for Arc<T> {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, RequestFailure> {
        (**self).request(method, path, body).await
    }
}

/// Produces the `Authorization` header value for outgoing requests.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Full header value, e.g. `Bearer eyJ0...`.
    async fn authorization(&self) -> Result<String, RequestFailure>;
}

/// Bearer tokens from a [`TokenCredential`] for a fixed scope set.
pub struct TokenCredentialAuthProvider {
    credential: Arc<dyn TokenCredential>,
    scopes: Vec<String>,
}

impl TokenCredentialAuthProvider {
    /// Requests tokens for `scopes` from `credential` on every call; any
    /// caching is up to the credential.
    pub fn new(credential: Arc<dyn TokenCredential>, scopes: Vec<String>) -> Self {
        Self { credential, scopes }
    }
}

#[async_trait]
impl AuthProvider for TokenCredentialAuthProvider {
    async fn authorization(&self) -> Result<String, RequestFailure> {
        let scopes: Vec<&str> = self.scopes.iter().map(String::as_str).collect();
        let token = self.credential.get_token(&scopes).await?;
        Ok(format!("Bearer {}", token.token))
    }
}

/// Graph handle owned by a single calendar client.
pub struct GraphClient {
    http: Client,
    base_url: Url,
    auth: Box<dyn AuthProvider>,
}

impl std::fmt::Debug for GraphClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

/// Builds a Graph handle for the given application credentials.
///
/// The identity credential is bound to [`GRAPH_DEFAULT_SCOPE`]; an absent
/// tenant is passed to the identity provider as `""`.
///
/// # Errors
///
/// Returns an error if:
/// - `client_id` or `client_secret` is empty
///   ([`Error::InvalidCredential`](crate::Error::InvalidCredential))
/// - An endpoint in `config` is not a valid base URL
/// - The request timeout in `config` is zero
/// - The HTTP client cannot be constructed
pub fn create_graph_client(
    credential: &ClientCredential,
    config: &ClientConfig,
) -> Result<GraphClient> {
    credential.validate()?;

    let base_url = config.graph_url()?;
    let authority = config.authority_url()?;

    let mut builder = Client::builder();
    if let Some(timeout) = config.request_timeout()? {
        builder = builder.timeout(timeout);
    }
    let http = builder.build().map_err(ConfigError::HttpClient)?;

    let identity = ClientSecretCredential::new(http.clone(), &authority, credential);
    let auth = TokenCredentialAuthProvider::new(
        Arc::new(identity),
        vec![GRAPH_DEFAULT_SCOPE.to_string()],
    );

    Ok(GraphClient::with_auth_provider(http, base_url, auth))
}

impl GraphClient {
    /// [`create_graph_client`] with the default endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCredential`](crate::Error::InvalidCredential)
    /// if `client_id` or `client_secret` is empty.
    pub fn from_credential(credential: &ClientCredential) -> Result<Self> {
        create_graph_client(credential, &ClientConfig::default())
    }

    /// Assembles a handle around an arbitrary auth provider.
    pub fn with_auth_provider(
        http: Client,
        base_url: Url,
        auth: impl AuthProvider + 'static,
    ) -> Self {
        Self {
            http,
            base_url,
            auth: Box::new(auth),
        }
    }

    /// Endpoint that request paths are appended to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(path.split('/').filter(|segment| !segment.is_empty()));
        }
        url
    }
}

#[async_trait]
impl GraphTransport for GraphClient {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, RequestFailure> {
        let url = self.url_for(path);
        debug!(%method, %url, "sending Graph request");

        let authorization = self.auth.authorization().await?;
        let mut request = self
            .http
            .request(method, url)
            .header(header::AUTHORIZATION, authorization)
            .header(header::ACCEPT, "application/json");
        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(GraphError::failure_from_body(status.as_u16(), &text));
        }
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}
