//! Typed HTTP client for the NexusTrack API.
//!
//! [`ApiClient`] attaches the stored bearer token to every request and, on
//! any 401, clears the token and emits [`Notice::SessionExpired`] through
//! the configured [`Notifier`].

pub mod client;
pub mod error;
pub mod filter;
pub mod form;
pub mod models;
pub mod notify;
pub mod token_store;

pub use client::ApiClient;
pub use error::ClientError;
pub use notify::{Notice, Notifier};
pub use token_store::TokenStore;
