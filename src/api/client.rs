use super::types::{ArticlePage, SearchResponse};
use crate::config::Config;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Per-request timeout. The upstream search endpoint normally answers in
/// well under a second; anything past this is treated as a dead request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Path of the search endpoint under the API base.
const SEARCH_PATH: &str = "v2/everything";

/// Upstream bound on the `pageSize` parameter.
const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Error)]
pub enum FetchError {
    /// No API key is configured. Fatal precondition for any fetch; the
    /// client refuses to send a request rather than send a malformed one.
    #[error("News API key is not configured (set NEWS_API_KEY or api_key in config.toml)")]
    MissingApiKey,
    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
    /// The API key travels as a query parameter, so the base must be HTTPS.
    /// HTTP is allowed only for localhost (integration tests).
    #[error("Insecure API base URL: HTTPS required (except localhost for testing)")]
    InsecureBaseUrl,
    #[error("Request timed out after 20s")]
    Timeout,
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    #[error("Malformed response body: {0}")]
    Decode(#[source] reqwest::Error),
}

/// HTTP client for the article-search API.
///
/// Cheap to clone: the inner `reqwest::Client` is reference-counted and the
/// key is a shared `SecretString`. One instance is created at startup and
/// cloned into each fetch task.
#[derive(Clone)]
pub struct NewsClient {
    http: reqwest::Client,
    base: Url,
    api_key: Option<SecretString>,
    from_date: String,
    page_size: u32,
}

impl NewsClient {
    /// Build a client from the resolved configuration.
    ///
    /// `api_key` is the already-resolved credential (env var over config
    /// file); `None` is accepted here so the caller decides how loudly to
    /// fail, but every call to [`search`](Self::search) will then refuse
    /// with [`FetchError::MissingApiKey`].
    pub fn new(config: &Config, api_key: Option<String>) -> Result<Self, FetchError> {
        let base = Url::parse(&config.api_base)?;

        // Never send the key over cleartext to a remote host.
        if base.scheme() != "https" {
            let is_localhost = matches!(base.host_str(), Some("localhost") | Some("127.0.0.1"));
            if !(base.scheme() == "http" && is_localhost) {
                tracing::error!(base = %base, "Rejecting non-HTTPS API base URL");
                return Err(FetchError::InsecureBaseUrl);
            }
            tracing::warn!(base = %base, "Using non-HTTPS API base URL (localhost only)");
        }

        let page_size = config.page_size.clamp(1, MAX_PAGE_SIZE);
        if page_size != config.page_size {
            tracing::warn!(
                configured = config.page_size,
                effective = page_size,
                "page_size outside the 1..=100 bound, clamped"
            );
        }

        let http = reqwest::Client::builder()
            .pool_max_idle_per_host(4)
            .pool_idle_timeout(Duration::from_secs(30))
            .tcp_keepalive(Duration::from_secs(60))
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            base,
            api_key: api_key.map(SecretString::from),
            from_date: config.from_date.clone(),
            page_size,
        })
    }

    /// Whether a credential is configured at all.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Articles requested per page (after clamping).
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Fetch one page of articles matching `query`, newest first.
    ///
    /// Pages are 1-based. Transport failures, non-2xx statuses, and
    /// undecodable bodies all surface as [`FetchError`]; the caller decides
    /// what state to keep.
    pub async fn search(&self, query: &str, page: u32) -> Result<ArticlePage, FetchError> {
        let key = self.api_key.as_ref().ok_or(FetchError::MissingApiKey)?;

        let url = self.base.join(SEARCH_PATH)?;
        let page_param = page.to_string();
        let size_param = self.page_size.to_string();
        let request = self.http.get(url).query(&[
            ("q", query),
            ("from", self.from_date.as_str()),
            ("sortBy", "publishedAt"),
            ("apiKey", key.expose_secret()),
            ("page", page_param.as_str()),
            ("pageSize", size_param.as_str()),
        ]);

        // Log the request by its parameters, never by URL: the full URL
        // carries the API key.
        tracing::debug!(query, page, page_size = self.page_size, "Requesting article page");

        let response = tokio::time::timeout(REQUEST_TIMEOUT, request.send())
            .await
            .map_err(|_| FetchError::Timeout)?
            .map_err(FetchError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let body: SearchResponse = response.json().await.map_err(FetchError::Decode)?;
        tracing::debug!(
            query,
            page,
            received = body.articles.len(),
            total = body.total_results,
            "Article page fetched"
        );

        Ok(ArticlePage::from(body))
    }
}
