use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Logo shown next to admin notifications in the Jellyfin dashboard.
pub const DEFAULT_LOGO_URL: &str = "https://cdn.pymedusa.com/images/ico/favicon-310.png";

/// Settings consumed by [`JellyfinNotifier`](crate::JellyfinNotifier).
///
/// The notifier only ever reads these; callers that need to change them
/// build a new notifier.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct JellyfinConfig {
    /// Gate for library updates. Test notifications ignore it.
    #[serde(default)]
    pub enabled: bool,
    /// `host[:port]` of the Jellyfin server, without scheme.
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_logo_url")]
    pub logo_url: String,
}

fn default_logo_url() -> String {
    DEFAULT_LOGO_URL.to_string()
}

impl Default for JellyfinConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            host: String::new(),
            api_key: String::new(),
            logo_url: default_logo_url(),
        }
    }
}

impl JellyfinConfig {
    /// Build a config from `JELLYFIN_ENABLED`, `JELLYFIN_HOST`,
    /// `JELLYFIN_APIKEY` and `JELLYFIN_LOGO_URL`, falling back to
    /// [`Default`] for anything unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let enabled = match std::env::var("JELLYFIN_ENABLED") {
            Ok(s) => match parse_bool(&s) {
                Some(b) => {
                    debug!(enabled = b, "using JELLYFIN_ENABLED from env");
                    b
                }
                None => {
                    warn!(value = %s, "invalid JELLYFIN_ENABLED, using default {}", defaults.enabled);
                    defaults.enabled
                }
            },
            Err(_) => defaults.enabled,
        };

        Self {
            enabled,
            host: std::env::var("JELLYFIN_HOST").unwrap_or(defaults.host),
            api_key: std::env::var("JELLYFIN_APIKEY").unwrap_or(defaults.api_key),
            logo_url: std::env::var("JELLYFIN_LOGO_URL").unwrap_or(defaults.logo_url),
        }
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
