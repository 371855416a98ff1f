//! Application credentials for the client-credentials flow.

use std::fmt;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Client id, secret and tenant of an Entra ID (Azure AD) application.
///
/// Missing fields deserialize to empty strings and are rejected when a
/// Graph handle is built from the credential.
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientCredential {
    #[serde(default, alias = "client_id")]
    pub client_id: String,
    #[serde(default, alias = "client_secret")]
    pub client_secret: String,
    #[serde(default, alias = "tenant_id")]
    pub tenant_id: Option<String>,
}

impl ClientCredential {
    /// Builds a credential; nothing is checked until a handle is created.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        tenant_id: Option<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            tenant_id,
        }
    }

    /// Tenant passed to the identity provider; absent means `""`.
    pub fn tenant(&self) -> &str {
        self.tenant_id.as_deref().unwrap_or_default()
    }

    /// Checks that the fields required to request a token are present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCredential`] if `client_id` or
    /// `client_secret` is empty or whitespace.
    pub fn validate(&self) -> Result<()> {
        if self.client_id.trim().is_empty() {
            return Err(Error::InvalidCredential("clientId is required"));
        }
        if self.client_secret.trim().is_empty() {
            return Err(Error::InvalidCredential("clientSecret is required"));
        }
        Ok(())
    }
}

impl fmt::Debug for ClientCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredential")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("tenant_id", &self.tenant_id)
            .finish()
    }
}
