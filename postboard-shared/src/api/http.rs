use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::sync::{Arc, Mutex};
use url::Url;

use super::{ApiError, ApiResult, AuthApi, PostsApi};
use crate::models::{
    AuthProfile, ErrorResponse, Post, PostDraft, PostId, SignInRequest, SignUpRequest,
};

const POSTS: &str = "posts";
const LIKE: &str = "likePost";
const USER: &str = "user";

/// reqwest-backed client for the posts backend.
///
/// Clones share the bearer token, so a sign-in through one handle
/// authorizes requests made through every other.
#[derive(Clone, Debug)]
pub struct HttpClient {
    base_url: Url,
    client: Client,
    token: Arc<Mutex<Option<String>>>,
}

impl HttpClient {
    /// Create a client rooted at `base_url` (e.g. `http://localhost:5000/api`).
    ///
    /// # Errors
    /// Returns [`ApiError::InvalidUrl`] when the URL is not an absolute http(s) URL.
    pub fn new(base_url: &str) -> ApiResult<Self> {
        Self::with_client(base_url, Client::new())
    }

    /// Create a client around a preconfigured reqwest [`Client`].
    ///
    /// # Errors
    /// Returns [`ApiError::InvalidUrl`] when the URL is not an absolute http(s) URL.
    pub fn with_client(base_url: &str, client: Client) -> ApiResult<Self> {
        let base_url = Url::parse(base_url.trim())
            .map_err(|err| ApiError::InvalidUrl(format!("{base_url}: {err}")))?;
        if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(format!(
                "{base_url}: expected an http(s) base url"
            )));
        }

        Ok(Self {
            base_url,
            client,
            token: Arc::new(Mutex::new(None)),
        })
    }

    /// Root every endpoint is joined onto.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Replace the bearer token, or stop sending one with `None`.
    pub fn set_token(&self, token: Option<String>) {
        if let Ok(mut guard) = self.token.lock() {
            *guard = token;
        }
    }

    /// Token attached to the next request.
    #[must_use]
    pub fn current_token(&self) -> Option<String> {
        self.token
            .lock()
            .ok()
            .and_then(|guard| guard.as_ref().cloned())
    }

    /// Join path segments onto the base URL, percent-encoding each one.
    ///
    /// # Errors
    /// Returns [`ApiError::InvalidUrl`] if the base cannot take path segments.
    pub fn endpoint(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.current_token() {
            Some(token) => request.header(AUTHORIZATION, format!("Bearer {token}")),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> ApiResult<Response> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(ApiError::Transport)?;
        check_status(response).await
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = self.send(request).await?;
        let body = response.text().await.map_err(ApiError::Transport)?;
        serde_json::from_str(&body).map_err(|err| ApiError::Decode(err.to_string()))
    }

    fn remember_token(&self, profile: &AuthProfile) {
        if let Some(token) = profile.token.clone() {
            self.set_token(Some(token));
        }
    }
}

async fn check_status(response: Response) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ErrorResponse>(&body) {
        Ok(error) => error.to_string(),
        Err(_) if !body.trim().is_empty() => body.trim().to_string(),
        Err(_) => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string(),
    };

    tracing::debug!(status = status.as_u16(), %message, "request rejected");
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

#[async_trait(?Send)]
impl PostsApi for HttpClient {
    async fn fetch_posts(&self) -> ApiResult<Vec<Post>> {
        let url = self.endpoint(&[POSTS])?;
        tracing::debug!(%url, "fetching posts");
        self.send_json(self.client.get(url)).await
    }

    async fn create_post(&self, draft: &PostDraft) -> ApiResult<Post> {
        let url = self.endpoint(&[POSTS])?;
        tracing::debug!(%url, title = %draft.title, "creating post");
        self.send_json(self.client.post(url).json(draft)).await
    }

    async fn update_post(&self, id: &PostId, draft: &PostDraft) -> ApiResult<Post> {
        let url = self.endpoint(&[POSTS, id.as_str()])?;
        tracing::debug!(%url, post_id = %id, "updating post");
        self.send_json(self.client.patch(url).json(draft)).await
    }

    async fn delete_post(&self, id: &PostId) -> ApiResult<()> {
        let url = self.endpoint(&[POSTS, id.as_str()])?;
        tracing::debug!(%url, post_id = %id, "deleting post");
        self.send(self.client.delete(url)).await?;
        Ok(())
    }

    async fn like_post(&self, id: &PostId) -> ApiResult<Post> {
        let url = self.endpoint(&[POSTS, id.as_str(), LIKE])?;
        tracing::debug!(%url, post_id = %id, "liking post");
        self.send_json(self.client.post(url)).await
    }
}

#[async_trait(?Send)]
impl AuthApi for HttpClient {
    async fn sign_in(&self, request: &SignInRequest) -> ApiResult<AuthProfile> {
        let url = self.endpoint(&[USER, "signin"])?;
        let profile: AuthProfile = self.send_json(self.client.post(url).json(request)).await?;
        self.remember_token(&profile);
        Ok(profile)
    }

    async fn sign_up(&self, request: &SignUpRequest) -> ApiResult<AuthProfile> {
        let url = self.endpoint(&[USER, "signup"])?;
        let profile: AuthProfile = self.send_json(self.client.post(url).json(request)).await?;
        self.remember_token(&profile);
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_relative_and_non_http_urls() {
        assert!(matches!(
            HttpClient::new("/api"),
            Err(ApiError::InvalidUrl(_))
        ));
        assert!(matches!(
            HttpClient::new("mailto:someone@example.com"),
            Err(ApiError::InvalidUrl(_))
        ));
        assert!(HttpClient::new("http://localhost:5000").is_ok());
    }

    #[test]
    fn endpoint_keeps_base_path() {
        let client = HttpClient::new("http://localhost:5000/api").unwrap();
        assert_eq!(
            client.endpoint(&["posts"]).unwrap().as_str(),
            "http://localhost:5000/api/posts"
        );

        let trailing = HttpClient::new("http://localhost:5000/api/").unwrap();
        assert_eq!(
            trailing.endpoint(&["posts", "7", "likePost"]).unwrap().as_str(),
            "http://localhost:5000/api/posts/7/likePost"
        );
    }

    #[test]
    fn endpoint_encodes_ids_as_one_segment() {
        let client = HttpClient::new("http://localhost:5000").unwrap();
        assert_eq!(
            client.endpoint(&["posts", "a/b c"]).unwrap().as_str(),
            "http://localhost:5000/posts/a%2Fb%20c"
        );
    }

    #[test]
    fn clones_share_the_token() {
        let client = HttpClient::new("http://localhost:5000").unwrap();
        let clone = client.clone();
        client.set_token(Some("jwt".into()));
        assert_eq!(clone.current_token().as_deref(), Some("jwt"));
        clone.set_token(None);
        assert_eq!(client.current_token(), None);
    }
}
