use serde_json::json;
use tracing::{debug, info, warn};
use url::Url;

use crate::client::{ApiError, HttpClient, PostRequest, Session};
use crate::config::JellyfinConfig;
use crate::show::{Indexer, Show};

/// `Name` shown on admin notifications.
pub const APP_NAME: &str = "Medusa";
pub const TEST_MESSAGE: &str = "This is a test notification from Medusa";

const NOTIFICATIONS_PATH: &str = "/Notifications/Admin";
const REFRESH_PATH: &str = "/Library/Refresh";
const SERIES_UPDATED_PATH: &str = "/Library/Series/Updated";
const TVDB_PARAM: &str = "tvdbid";

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Jellyfin notifications are disabled")]
    Disabled,
    #[error("no Jellyfin host configured")]
    MissingHost,
    #[error("no TVDB id for {series} and the {indexer} indexer is unsupported")]
    NoTvdbId { series: String, indexer: Indexer },
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl NotifyError {
    /// True when the failure was detected before any request was sent.
    pub fn is_config(&self) -> bool {
        !matches!(self, NotifyError::Api(_))
    }
}

/// Notifies a Jellyfin server of library changes and sends admin
/// notifications.
///
/// Every public operation returns `bool`; failures are logged and never
/// surface to the caller. Use the `try_*` variants to get the
/// [`NotifyError`] instead.
#[derive(Debug, Clone)]
pub struct JellyfinNotifier<S = HttpClient> {
    session: S,
    config: JellyfinConfig,
}

impl<S: Session> JellyfinNotifier<S> {
    pub fn new(session: S, config: JellyfinConfig) -> Self {
        Self { session, config }
    }

    pub fn config(&self) -> &JellyfinConfig {
        &self.config
    }

    /// Send a test notification. Empty or missing `host`/`api_key` fall
    /// back to the configured values.
    pub async fn test_notify(&self, host: Option<&str>, api_key: Option<&str>) -> bool {
        self.try_test_notify(host, api_key).await.is_ok()
    }

    pub async fn try_test_notify(
        &self,
        host: Option<&str>,
        api_key: Option<&str>,
    ) -> Result<(), NotifyError> {
        let host = host.filter(|h| !h.is_empty()).unwrap_or(&self.config.host);
        let api_key = api_key
            .filter(|k| !k.is_empty())
            .unwrap_or(&self.config.api_key);

        let body = json!({
            "Name": APP_NAME,
            "Description": TEST_MESSAGE,
            "ImageUrl": self.config.logo_url,
        });

        self.dispatch(
            host,
            NOTIFICATIONS_PATH,
            &[],
            api_key,
            Some(body),
            "a test notification",
        )
        .await
    }

    /// Ask Jellyfin to rescan. With a show, only that series is refreshed
    /// (by TVDB id); without one, the whole library is.
    pub async fn update_library(&self, show: Option<&Show>) -> bool {
        self.try_update_library(show).await.is_ok()
    }

    pub async fn try_update_library(&self, show: Option<&Show>) -> Result<(), NotifyError> {
        if !self.config.enabled {
            return Err(NotifyError::Disabled);
        }
        if self.config.host.is_empty() {
            debug!("No Jellyfin host specified, check your settings");
            return Err(NotifyError::MissingHost);
        }

        let (path, params) = match show {
            None => (REFRESH_PATH, Vec::new()),
            Some(show) => {
                let Some(tvdb_id) = show.tvdb_id() else {
                    if show.indexer == Indexer::Tvrage {
                        warn!(series = %show.name, "TVRage indexer no longer valid");
                    } else {
                        warn!(
                            series = %show.name,
                            indexer = %show.indexer,
                            "Unable to find a TVDB ID for {}, and {} indexer is unsupported",
                            show.name,
                            show.indexer
                        );
                    }
                    return Err(NotifyError::NoTvdbId {
                        series: show.name.clone(),
                        indexer: show.indexer,
                    });
                };
                (SERIES_UPDATED_PATH, vec![(TVDB_PARAM, tvdb_id.to_string())])
            }
        };

        self.dispatch(
            &self.config.host,
            path,
            &params,
            &self.config.api_key,
            None,
            "a \"Series Library Updated\" command",
        )
        .await
    }

    async fn dispatch(
        &self,
        host: &str,
        path: &str,
        params: &[(&str, String)],
        api_key: &str,
        body: Option<serde_json::Value>,
        what: &str,
    ) -> Result<(), NotifyError> {
        let url = endpoint(host, path);
        let response = match build_request(host, path, params, api_key, body) {
            Ok(request) => self.session.post(request).await,
            Err(e) => Err(e),
        };

        match response {
            Ok(text) => {
                if !text.is_empty() {
                    debug!(response = %text.replace('\n', ""), "Jellyfin HTTP response");
                }
                info!(%url, "Successfully sent {what}");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Unable to contact Jellyfin at {url}");
                Err(e.into())
            }
        }
    }
}

fn endpoint(host: &str, path: &str) -> String {
    format!("http://{host}{path}")
}

fn build_request(
    host: &str,
    path: &str,
    params: &[(&str, String)],
    api_key: &str,
    body: Option<serde_json::Value>,
) -> Result<PostRequest, ApiError> {
    // `http:///x` would otherwise parse with `x` as the host.
    if host.trim().is_empty() {
        return Err(ApiError::InvalidUrl(url::ParseError::EmptyHost));
    }

    let mut url = Url::parse(&endpoint(host, path))?;
    if !params.is_empty() {
        url.query_pairs_mut().extend_pairs(params);
    }

    let request = PostRequest::new(url, api_key);
    Ok(match body {
        Some(body) => request.with_json(body),
        None => request,
    })
}
