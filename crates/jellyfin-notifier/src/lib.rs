//! Client for notifying a Jellyfin media server of library changes.

pub mod client;
pub mod config;
pub mod jellyfin;
pub mod show;

pub use client::{ApiError, HttpClient, PostRequest, Session, TOKEN_HEADER};
pub use config::{DEFAULT_LOGO_URL, JellyfinConfig};
pub use jellyfin::{APP_NAME, JellyfinNotifier, NotifyError, TEST_MESSAGE};
pub use show::{Indexer, Show, UnknownIndexer};
