//! # Models
//!
//! Wire types exchanged with the posts backend.

pub mod auth;
pub mod errors;
pub mod post;
pub mod timestamp;

pub use auth::{AuthProfile, SignInRequest, SignUpRequest, UserProfile};
pub use errors::ErrorResponse;
pub use post::{Post, PostDraft, PostId};
pub use timestamp::Timestamp;
