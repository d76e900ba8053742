//! The Semantic Scholar API client.

use crate::config::Config;
use crate::error::{Result, SemanticScholarError};
use crate::requester::ApiRequester;
use std::time::Duration;
use url::Url;

/// Async client for the Semantic Scholar Academic Graph API.
///
/// Each instance carries its own [`Config`]; nothing is shared between
/// instances. Cloning yields an independent client whose settings can be
/// changed separately.
///
/// # Example
///
/// ```no_run
/// # async fn example() -> semanticscholar::Result<()> {
/// let sch = semanticscholar::SemanticScholar::new()?;
/// let paper = sch.get_paper("10.1093/mind/lix.236.433", &[]).await?;
/// println!("{}", paper.title().unwrap_or_default());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SemanticScholar {
    pub(crate) requester: ApiRequester,
    api_url: String,
    config: Config,
}

impl SemanticScholar {
    /// Create a client for the public API with default settings.
    pub fn new() -> Result<Self> {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Result<Self> {
        let api_url = config.resolved_api_url()?;
        let requester = ApiRequester::new(config.timeout, config.api_key.clone())?;
        tracing::debug!(%api_url, timeout = ?config.timeout, "client configured");

        Ok(Self {
            requester,
            api_url,
            config,
        })
    }

    /// Create a client configured from `SEMANTIC_SCHOLAR_API_KEY` / `SEMANTIC_SCHOLAR_API_URL`.
    pub fn from_env() -> Result<Self> {
        Self::with_config(Config::from_env())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Base URL every endpoint path is appended to.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn timeout(&self) -> Duration {
        self.config.timeout
    }

    /// Change the timeout for every later request made through this client.
    ///
    /// Result sets that were already returned keep the timeout they were created with.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.config.timeout = timeout;
        self.requester.set_timeout(timeout);
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    /// `{api_url}/{collection}/{id}[/{tail}]`.
    ///
    /// The id is percent-encoded segment by segment, so `?`, `#` and `%` in
    /// `URL:` ids stay part of the path while DOI slashes are kept.
    pub(crate) fn object_endpoint(
        &self,
        collection: &str,
        id: &str,
        tail: Option<&str>,
    ) -> Result<String> {
        let invalid = || SemanticScholarError::Config(format!("Invalid API URL {:?}", self.api_url));
        let mut url = Url::parse(&self.api_url).map_err(|_| invalid())?;
        {
            let mut segments = url.path_segments_mut().map_err(|_| invalid())?;
            segments.pop_if_empty().push(collection).extend(id.split('/'));
            if let Some(tail) = tail {
                segments.push(tail);
            }
        }
        Ok(url.into())
    }
}

/// `fields`, or `default` when the caller asked for no particular fields.
pub(crate) fn fields_or<'a>(fields: &'a [&'a str], default: &'a [&'a str]) -> &'a [&'a str] {
    if fields.is_empty() {
        default
    } else {
        fields
    }
}

/// Reject page sizes the endpoint would refuse, before any request is made.
pub(crate) fn check_limit(limit: u32, max: u32) -> Result<()> {
    if limit == 0 || limit > max {
        return Err(SemanticScholarError::BadQueryParameters(format!(
            "limit must be between 1 and {}, got {}",
            max, limit
        )));
    }
    Ok(())
}
