//! # Configuration
//!
//! Settings shared by the native clients: where the posts backend lives,
//! how chatty logging is, and how long a request may take.

mod client;

pub use client::{ClientConfig, ConfigError};
