use std::future::Future;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use url::Url;

/// Header carrying the Jellyfin API key on every request.
pub const TOKEN_HEADER: &str = "X-MediaBrowser-Token";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("API returned {status}: {body}")]
    ApiResponse { status: u16, body: String },
    #[error("API key contains invalid characters (non-visible ASCII)")]
    InvalidApiKey,
}

/// A single authenticated POST against a Jellyfin server.
///
/// Query parameters are expected to already be encoded into `url`.
#[derive(Debug, Clone)]
pub struct PostRequest {
    pub url: Url,
    pub api_key: String,
    pub json: Option<serde_json::Value>,
}

impl PostRequest {
    pub fn new(url: Url, api_key: impl Into<String>) -> Self {
        Self {
            url,
            api_key: api_key.into(),
            json: None,
        }
    }

    /// Attach a JSON body. The request is then sent with
    /// `Content-Type: application/json`.
    pub fn with_json(mut self, body: serde_json::Value) -> Self {
        self.json = Some(body);
        self
    }
}

/// Transport used by the notifier.
///
/// Implementations return the response body on 2xx and an [`ApiError`]
/// for everything else; they never panic on a bad status.
pub trait Session: Send + Sync {
    fn post(
        &self,
        request: PostRequest,
    ) -> impl Future<Output = Result<String, ApiError>> + Send;
}

/// Shared HTTP session backed by [`reqwest::Client`].
///
/// Cloning is cheap and shares the underlying connection pool, so one
/// instance can be handed to any number of notifiers.
#[derive(Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
    timeout: Option<Duration>,
}

impl HttpClient {
    /// Create a new session. `timeout` bounds each whole request; `None`
    /// leaves reqwest's default (no timeout).
    pub fn new(timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            inner: builder.build()?,
            timeout,
        })
    }

    /// Return a reference to the underlying [`reqwest::Client`].
    pub fn inner(&self) -> &reqwest::Client {
        &self.inner
    }

    async fn handle_response(resp: reqwest::Response) -> Result<String, ApiError> {
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::ApiResponse { status, body });
        }
        Ok(resp.text().await?)
    }
}

impl Session for HttpClient {
    async fn post(&self, request: PostRequest) -> Result<String, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            TOKEN_HEADER,
            HeaderValue::from_str(&request.api_key).map_err(|_| ApiError::InvalidApiKey)?,
        );

        let mut builder = self.inner.post(request.url).headers(headers);
        if let Some(body) = &request.json {
            builder = builder.json(body);
        }

        let resp = builder.send().await?;
        Self::handle_response(resp).await
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("timeout", &self.timeout)
            .finish()
    }
}
