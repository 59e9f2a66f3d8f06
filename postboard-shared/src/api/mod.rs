//! # Posts API
//!
//! The REST surface the clients talk to, expressed as two traits so action
//! creators can be driven by the real [`HttpClient`] or by an in-memory fake.

mod http;

pub use http::HttpClient;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{AuthProfile, Post, PostDraft, PostId, SignInRequest, SignUpRequest};

/// Result type alias for API calls
pub type ApiResult<T> = Result<T, ApiError>;

/// Everything that can go wrong while talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The base URL or a derived endpoint is not usable
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// The request never produced a response
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The backend answered with a non-success status
    #[error("server responded with {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Message from the error body, or the status text
        message: String,
    },

    /// The response body did not have the expected shape
    #[error("could not decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status of the failed response, if there was one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }

    /// True for a 401, which means the stored session is no longer valid.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Short text suitable for showing next to a form.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Status { message, .. } => message.clone(),
            Self::Transport(_) => "Unable to connect to server".to_string(),
            Self::InvalidUrl(_) | Self::Decode(_) => "Unexpected response from server".to_string(),
        }
    }
}

/// Post collection endpoints.
#[async_trait(?Send)]
pub trait PostsApi {
    /// `GET /posts`
    async fn fetch_posts(&self) -> ApiResult<Vec<Post>>;

    /// `POST /posts`
    async fn create_post(&self, draft: &PostDraft) -> ApiResult<Post>;

    /// `PATCH /posts/:id`
    async fn update_post(&self, id: &PostId, draft: &PostDraft) -> ApiResult<Post>;

    /// `DELETE /posts/:id`
    async fn delete_post(&self, id: &PostId) -> ApiResult<()>;

    /// `POST /posts/:id/likePost`
    async fn like_post(&self, id: &PostId) -> ApiResult<Post>;
}

/// Account endpoints.
#[async_trait(?Send)]
pub trait AuthApi {
    /// `POST /user/signin`
    async fn sign_in(&self, request: &SignInRequest) -> ApiResult<AuthProfile>;

    /// `POST /user/signup`
    async fn sign_up(&self, request: &SignUpRequest) -> ApiResult<AuthProfile>;
}
