//! Asynchronous action creators.
//!
//! Each creator awaits exactly one API call. On success it dispatches the
//! matching [`Action`]; on failure it logs, dispatches nothing, and returns
//! the error so the caller can show it.

use super::{Action, Dispatcher};
use crate::api::{ApiResult, AuthApi, PostsApi};
use crate::models::{AuthProfile, Post, PostDraft, PostId, SignInRequest, SignUpRequest};

/// Load the feed and replace the store's list with it.
///
/// # Errors
/// Returns the API error; the store is left untouched.
pub async fn get_posts<A, D>(api: &A, dispatch: &D) -> ApiResult<Vec<Post>>
where
    A: PostsApi + ?Sized,
    D: Dispatcher + ?Sized,
{
    match api.fetch_posts().await {
        Ok(posts) => {
            tracing::info!(count = posts.len(), "fetched posts");
            dispatch.dispatch(Action::FetchAll(posts.clone()));
            Ok(posts)
        }
        Err(err) => {
            tracing::error!(error = %err, "failed to fetch posts");
            Err(err)
        }
    }
}

/// Publish `draft` and append the result to the feed.
///
/// # Errors
/// Returns the API error; the store is left untouched.
pub async fn create_post<A, D>(api: &A, draft: &PostDraft, dispatch: &D) -> ApiResult<Post>
where
    A: PostsApi + ?Sized,
    D: Dispatcher + ?Sized,
{
    match api.create_post(draft).await {
        Ok(post) => {
            tracing::info!(post_id = %post.id, "created post");
            dispatch.dispatch(Action::Create(post.clone()));
            Ok(post)
        }
        Err(err) => {
            tracing::error!(error = %err, "failed to create post");
            Err(err)
        }
    }
}

/// Save an edit and replace the post in the feed.
///
/// # Errors
/// Returns the API error; the store is left untouched.
pub async fn update_post<A, D>(
    api: &A,
    id: &PostId,
    draft: &PostDraft,
    dispatch: &D,
) -> ApiResult<Post>
where
    A: PostsApi + ?Sized,
    D: Dispatcher + ?Sized,
{
    match api.update_post(id, draft).await {
        Ok(post) => {
            tracing::info!(post_id = %post.id, "updated post");
            dispatch.dispatch(Action::Update(post.clone()));
            Ok(post)
        }
        Err(err) => {
            tracing::error!(post_id = %id, error = %err, "failed to update post");
            Err(err)
        }
    }
}

/// Delete a post on the server, then drop it from the feed.
///
/// # Errors
/// Returns the API error; the store is left untouched.
pub async fn delete_post<A, D>(api: &A, id: &PostId, dispatch: &D) -> ApiResult<()>
where
    A: PostsApi + ?Sized,
    D: Dispatcher + ?Sized,
{
    match api.delete_post(id).await {
        Ok(()) => {
            tracing::info!(post_id = %id, "deleted post");
            dispatch.dispatch(Action::Delete(id.clone()));
            Ok(())
        }
        Err(err) => {
            tracing::error!(post_id = %id, error = %err, "failed to delete post");
            Err(err)
        }
    }
}

/// The server answers a like with the whole updated post, which replaces
/// the local copy.
///
/// Like a post and store the updated count.
///
/// # Errors
/// Returns the API error; the store is left untouched.
pub async fn like_post<A, D>(api: &A, id: &PostId, dispatch: &D) -> ApiResult<Post>
where
    A: PostsApi + ?Sized,
    D: Dispatcher + ?Sized,
{
    match api.like_post(id).await {
        Ok(post) => {
            tracing::info!(post_id = %post.id, likes = post.total_likes(), "liked post");
            dispatch.dispatch(Action::Update(post.clone()));
            Ok(post)
        }
        Err(err) => {
            tracing::error!(post_id = %id, error = %err, "failed to like post");
            Err(err)
        }
    }
}

/// Sign in and record the returned profile.
///
/// # Errors
/// Returns the API error; the store is left untouched.
pub async fn sign_in<A, D>(api: &A, request: &SignInRequest, dispatch: &D) -> ApiResult<AuthProfile>
where
    A: AuthApi + ?Sized,
    D: Dispatcher + ?Sized,
{
    match api.sign_in(request).await {
        Ok(profile) => {
            tracing::info!(email = %request.email, "signed in");
            dispatch.dispatch(Action::Auth(Some(profile.clone())));
            Ok(profile)
        }
        Err(err) => {
            tracing::error!(email = %request.email, error = %err, "sign in failed");
            Err(err)
        }
    }
}

/// Create an account and record the returned profile.
///
/// # Errors
/// Returns the API error; the store is left untouched.
pub async fn sign_up<A, D>(api: &A, request: &SignUpRequest, dispatch: &D) -> ApiResult<AuthProfile>
where
    A: AuthApi + ?Sized,
    D: Dispatcher + ?Sized,
{
    match api.sign_up(request).await {
        Ok(profile) => {
            tracing::info!(email = %request.email, "signed up");
            dispatch.dispatch(Action::Auth(Some(profile.clone())));
            Ok(profile)
        }
        Err(err) => {
            tracing::error!(email = %request.email, error = %err, "sign up failed");
            Err(err)
        }
    }
}

/// Sign out locally. There is no server round trip.
pub fn logout<D: Dispatcher + ?Sized>(dispatch: &D) {
    tracing::info!("signing out");
    dispatch.dispatch(Action::Logout);
}
