use once_cell::unsync::OnceCell;
use shared::api::{ApiError, ApiResult, HttpClient};
use shared::storage::ProfileStorage;
use url::Url;

use crate::config::FrontendConfig;
use crate::storage::LocalProfileStorage;

thread_local! {
    static SHARED_CLIENT: OnceCell<HttpClient> = const { OnceCell::new() };
}

/// The page-wide API client, built on first use.
///
/// It is seeded with the token of the profile restored from `localStorage`, so
/// a reload keeps the session authorized.
///
/// # Errors
/// Fails when the configured base URL cannot be resolved.
pub fn shared_client() -> ApiResult<HttpClient> {
    SHARED_CLIENT.with(|cell| cell.get_or_try_init(build_client).cloned())
}

fn build_client() -> ApiResult<HttpClient> {
    let config = FrontendConfig::new();
    let base_url = resolve_base_url(config.api_base_url(), current_origin().as_deref())?;
    let client = HttpClient::new(&base_url)?;

    match LocalProfileStorage.load_profile() {
        Ok(profile) => client.set_token(profile.and_then(|profile| profile.token)),
        Err(err) => tracing::warn!(error = %err, "could not read stored profile"),
    }

    tracing::debug!(base_url = %client.base_url(), "api client ready");
    Ok(client)
}

fn current_origin() -> Option<String> {
    web_sys::window().and_then(|window| window.location().origin().ok())
}

/// Absolute URLs pass through; anything else is joined onto `origin`.
fn resolve_base_url(base_url: &str, origin: Option<&str>) -> ApiResult<String> {
    if let Ok(url) = Url::parse(base_url) {
        return Ok(url.to_string());
    }

    let origin = origin.ok_or_else(|| {
        ApiError::InvalidUrl(format!("{base_url}: relative url without a page origin"))
    })?;
    Url::parse(origin)
        .and_then(|origin| origin.join(base_url))
        .map(|url| url.to_string())
        .map_err(|err| ApiError::InvalidUrl(format!("{base_url}: {err}")))
}
