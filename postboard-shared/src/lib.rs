#![cfg_attr(not(test), forbid(unsafe_code))]
#![deny(warnings, clippy::pedantic)]
#![allow(clippy::multiple_crate_versions)]

//! Shared building blocks for the Postboard clients: wire models, the REST
//! client, actions, reducers, the store, and the action creators that tie
//! them together.

pub mod api;
pub mod config;
pub mod models;
pub mod storage;
pub mod store;
