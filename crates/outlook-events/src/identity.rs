//! Token acquisition from the Microsoft identity platform.
//!
//! [`ClientSecretCredential`] implements the OAuth2 client-credentials grant
//! (`{authority}/{tenant}/oauth2/v2.0/token`). Nothing is requested until the
//! first call to [`TokenCredential::get_token`]; the token is then reused
//! until shortly before it expires.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::debug;

use crate::{
    credential::ClientCredential,
    failure::{GraphError, RequestFailure},
};

/// Tokens closer than this to expiry are requested again.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// Bearer token and the instant it stops being valid.
#[derive(Clone)]
pub struct AccessToken {
    /// Value sent after `Bearer` in the `Authorization` header.
    pub token: String,
    /// Moment the authority stops accepting the token.
    pub expires_at: Instant,
}

impl AccessToken {
    fn is_fresh(&self) -> bool {
        Instant::now() + EXPIRY_MARGIN < self.expires_at
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Source of access tokens for a set of scopes.
#[async_trait]
pub trait TokenCredential: Send + Sync {
    /// Returns a token valid for `scopes`, requesting one if needed.
    async fn get_token(&self, scopes: &[&str]) -> Result<AccessToken, RequestFailure>;
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: String,
}

/// Client-credentials grant against a single tenant.
///
/// An empty tenant is rejected when a token is first requested, without
/// contacting the authority.
pub struct ClientSecretCredential {
    http: Client,
    token_url: Option<Url>,
    client_id: String,
    client_secret: String,
    cached: Mutex<Option<AccessToken>>,
}

impl ClientSecretCredential {
    /// Assembles the credential without any network traffic.
    ///
    /// `authority` must be a base URL (checked by
    /// [`ClientConfig::authority_url`](crate::ClientConfig::authority_url)).
    pub(crate) fn new(http: Client, authority: &Url, credential: &ClientCredential) -> Self {
        let tenant = credential.tenant().trim();
        let token_url = (!tenant.is_empty()).then(|| {
            let mut url = authority.clone();
            if let Ok(mut segments) = url.path_segments_mut() {
                segments
                    .pop_if_empty()
                    .push(tenant)
                    .extend(["oauth2", "v2.0", "token"]);
            }
            url
        });

        Self {
            http,
            token_url,
            client_id: credential.client_id.clone(),
            client_secret: credential.client_secret.clone(),
            cached: Mutex::new(None),
        }
    }

    /// Token endpoint for the tenant; `None` when the tenant is empty.
    pub fn token_url(&self) -> Option<&Url> {
        self.token_url.as_ref()
    }

    async fn request_token(&self, scopes: &[&str]) -> Result<AccessToken, RequestFailure> {
        let Some(token_url) = &self.token_url else {
            return Err(RequestFailure::recognized("tenantId is required"));
        };
        let scope = scopes.join(" ");
        debug!(url = %token_url, %scope, "requesting access token");

        let response = self
            .http
            .post(token_url.clone())
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("scope", scope.as_str()),
                ("grant_type", "client_credentials"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(token_failure(status.as_u16(), &body));
        }

        let token: TokenResponse = response.json().await?;
        let now = Instant::now();
        Ok(AccessToken {
            token: token.access_token,
            // An unrepresentable lifetime is treated as already expired.
            expires_at: now
                .checked_add(Duration::from_secs(token.expires_in))
                .unwrap_or(now),
        })
    }
}

/// OAuth errors arrive as `{"error", "error_description"}`, unlike the
/// nested envelope the Graph endpoints use.
fn token_failure(status: u16, body: &str) -> RequestFailure {
    match serde_json::from_str::<TokenErrorResponse>(body) {
        Ok(oauth) => RequestFailure::recognized(GraphError {
            status,
            code: oauth.error,
            message: oauth.error_description,
        }),
        Err(_) => GraphError::failure_from_body(status, body),
    }
}

#[async_trait]
impl TokenCredential for ClientSecretCredential {
    async fn get_token(&self, scopes: &[&str]) -> Result<AccessToken, RequestFailure> {
        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref()
            && token.is_fresh()
        {
            return Ok(token.clone());
        }

        let token = self.request_token(scopes).await?;
        *cached = Some(token.clone());
        Ok(token)
    }
}
