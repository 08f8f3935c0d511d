//! Record server connection configuration.
//!
//! Settings are resolved once at process startup and then passed into the
//! gateway. The intent is to avoid reading process-wide environment variables
//! during submission, which can lead to inconsistent behaviour in
//! multi-threaded runtimes and test harnesses.

/// Errors raised while building a [`ServerConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("server base URL cannot be empty")]
    EmptyBaseUrl,
    #[error("server base URL must start with http:// or https://")]
    InvalidScheme,
    #[error("bearer token cannot be empty")]
    EmptyToken,
}

/// Connection settings for the FHIR record server.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    base_url: String,
    bearer_token: Option<String>,
}

impl ServerConfig {
    /// Create a new `ServerConfig`.
    ///
    /// The base URL is trimmed and stripped of trailing slashes so resource
    /// paths can be appended directly. A bearer token, when given, must be
    /// non-empty.
    pub fn new(
        base_url: impl Into<String>,
        bearer_token: Option<String>,
    ) -> Result<Self, ConfigError> {
        let base_url = base_url.into().trim().trim_end_matches('/').to_owned();
        if base_url.is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::InvalidScheme);
        }

        let bearer_token = match bearer_token {
            Some(token) => {
                let token = token.trim().to_owned();
                if token.is_empty() {
                    return Err(ConfigError::EmptyToken);
                }
                Some(token)
            }
            None => None,
        };

        Ok(Self {
            base_url,
            bearer_token,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn bearer_token(&self) -> Option<&str> {
        self.bearer_token.as_deref()
    }

    /// URL for creating a resource of the given kind, e.g. `<base>/Goal`.
    pub fn create_url(&self, resource_kind: &str) -> String {
        format!("{}/{resource_kind}", self.base_url)
    }
}
