pub mod config;
pub mod posts;
pub mod session;

use std::path::PathBuf;

use anyhow::{Context, Result};
use shared::api::HttpClient;
use shared::config::ClientConfig;
use shared::store::Store;

use crate::storage::FileProfileStorage;

/// What every command runs against: the API client and a store whose auth
/// slice lives in the profile file.
#[derive(Debug)]
pub struct Session {
    pub config: ClientConfig,
    pub client: HttpClient,
    pub store: Store<FileProfileStorage>,
}

impl Session {
    /// Build the client from `config` and restore the stored profile.
    ///
    /// # Errors
    /// Fails when the HTTP client cannot be built or the base URL is invalid.
    pub fn open(config: ClientConfig, profile_path: Option<PathBuf>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .user_agent("postboard-cli")
            .build()
            .context("failed to build HTTP client")?;
        let client = HttpClient::with_client(&config.api_base_url, http)
            .context("invalid api_base_url")?;

        let storage =
            FileProfileStorage::new(profile_path.unwrap_or_else(FileProfileStorage::default_path));
        tracing::debug!(path = %storage.path().display(), "using profile file");
        let store = Store::new(storage);
        client.set_token(store.state().auth.token().map(ToString::to_string));

        Ok(Self {
            config,
            client,
            store,
        })
    }
}
