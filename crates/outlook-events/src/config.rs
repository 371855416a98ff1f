//! Endpoint configuration for the Graph transport and identity provider.
//!
//! Defaults target the public Microsoft cloud. A configuration can be
//! built in code or read from a TOML file:
//!
//! ```toml
//! graph_endpoint = "https://graph.microsoft.com/v1.0"
//! authority_host = "https://login.microsoftonline.com"
//! request_timeout_ms = 30000
//! ```
//!
//! Keys that are absent from the file take their default values.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use reqwest::Url;
use serde::{Deserialize, Serialize};

/// Graph v1.0 endpoint of the public cloud.
pub const DEFAULT_GRAPH_ENDPOINT: &str = "https://graph.microsoft.com/v1.0";
/// Microsoft identity platform host of the public cloud.
pub const DEFAULT_AUTHORITY_HOST: &str = "https://login.microsoftonline.com";

/// Errors that can occur while loading or interpreting a [`ClientConfig`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// I/O error when reading a config file.
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error when a config file is malformed.
    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// An endpoint is not an absolute URL that can carry path segments.
    #[error("invalid endpoint '{0}'")]
    InvalidEndpoint(String),

    /// A request timeout of zero would fail every request.
    #[error("request timeout must be greater than zero")]
    ZeroTimeout,

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// Endpoints and transport settings used when building a Graph handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL that request paths are appended to.
    pub graph_endpoint: String,

    /// Microsoft identity platform host used for token requests.
    pub authority_host: String,

    /// Per-request timeout in milliseconds. `None` keeps the HTTP client's
    /// default.
    pub request_timeout_ms: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            graph_endpoint: DEFAULT_GRAPH_ENDPOINT.to_string(),
            authority_host: DEFAULT_AUTHORITY_HOST.to_string(),
            request_timeout_ms: None,
        }
    }
}

impl ClientConfig {
    /// Loads a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `Err(ConfigError)` if:
    /// - The file cannot be read
    /// - The file cannot be parsed as TOML
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the string is not valid TOML or has
    /// fields of the wrong type.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Sets the Graph base URL, e.g. `https://graph.microsoft.us/v1.0`.
    #[must_use]
    pub fn with_graph_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.graph_endpoint = endpoint.into();
        self
    }

    /// Sets the identity platform host used for token requests.
    #[must_use]
    pub fn with_authority_host(mut self, host: impl Into<String>) -> Self {
        self.authority_host = host.into();
        self
    }

    /// Sets the per-request timeout, rounded up to whole milliseconds.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        let millis = timeout.as_nanos().div_ceil(1_000_000);
        self.request_timeout_ms = Some(u64::try_from(millis).unwrap_or(u64::MAX));
        self
    }

    /// The configured request timeout, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroTimeout`] if the timeout is zero.
    pub fn request_timeout(&self) -> Result<Option<Duration>, ConfigError> {
        match self.request_timeout_ms {
            Some(0) => Err(ConfigError::ZeroTimeout),
            millis => Ok(millis.map(Duration::from_millis)),
        }
    }

    /// Parsed Graph base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEndpoint`] if the endpoint is empty or
    /// not an absolute hierarchical URL.
    pub fn graph_url(&self) -> Result<Url, ConfigError> {
        parse_base_url(&self.graph_endpoint)
    }

    /// Parsed identity authority URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEndpoint`] if the host is empty or not
    /// an absolute hierarchical URL.
    pub fn authority_url(&self) -> Result<Url, ConfigError> {
        parse_base_url(&self.authority_host)
    }
}

fn parse_base_url(endpoint: &str) -> Result<Url, ConfigError> {
    let trimmed = endpoint.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ConfigError::InvalidEndpoint(endpoint.to_string()));
    }
    let url = Url::parse(trimmed).map_err(|_| ConfigError::InvalidEndpoint(endpoint.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidEndpoint(endpoint.to_string()));
    }
    Ok(url)
}
