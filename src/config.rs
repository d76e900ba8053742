//! Per-client configuration.

use crate::error::{Result, SemanticScholarError};
use std::fmt;
use std::time::Duration;

/// Public Graph API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.semanticscholar.org/graph/v1";

/// Partner endpoint, used by default when an API key is configured.
pub const DEFAULT_PARTNER_API_URL: &str = "https://partner.semanticscholar.org/graph/v1";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings held by each [`SemanticScholar`](crate::SemanticScholar) instance.
#[derive(Clone)]
pub struct Config {
    /// Explicit base URL. `None` selects the public or partner endpoint.
    pub api_url: Option<String>,
    /// Private API key, sent as `x-api-key`.
    pub api_key: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Use the Graph API (`/graph/v1`). When false, `/graph` is dropped from the base URL.
    pub graph_api: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: None,
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
            graph_api: true,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_url", &self.api_url)
            .field("api_key", &redacted(&self.api_key))
            .field("timeout", &self.timeout)
            .field("graph_api", &self.graph_api)
            .finish()
    }
}

/// Stand-in printed for an API key in `Debug` output.
pub(crate) fn redacted(key: &Option<String>) -> Option<&'static str> {
    key.as_ref().map(|_| "<redacted>")
}

impl Config {
    /// Read `SEMANTIC_SCHOLAR_API_KEY` and `SEMANTIC_SCHOLAR_API_URL` from the environment.
    ///
    /// Both are optional; empty values are ignored.
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
        Self {
            api_url: var("SEMANTIC_SCHOLAR_API_URL"),
            api_key: var("SEMANTIC_SCHOLAR_API_KEY"),
            ..Self::default()
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Override the base URL (useful for testing).
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_graph_api(mut self, graph_api: bool) -> Self {
        self.graph_api = graph_api;
        self
    }

    /// The base URL requests are built from, without a trailing slash.
    ///
    /// An explicit `api_url` wins; otherwise the partner endpoint is chosen
    /// when an API key is set.
    pub fn resolved_api_url(&self) -> Result<String> {
        let mut base = match (&self.api_url, &self.api_key) {
            (Some(url), _) => url.clone(),
            (None, Some(_)) => DEFAULT_PARTNER_API_URL.to_string(),
            (None, None) => DEFAULT_API_URL.to_string(),
        };

        if !self.graph_api {
            base = base.replace("/graph", "");
        }

        url::Url::parse(&base)
            .map_err(|e| SemanticScholarError::Config(format!("Invalid API URL {:?}: {}", base, e)))?;

        Ok(base.trim_end_matches('/').to_string())
    }
}
