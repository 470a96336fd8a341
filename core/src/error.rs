//! Error types for the member API client.
//!
//! # Design
//! Failures split by where they happened: the request never completed
//! (`Transport`), the server answered outside 2xx (`Api`), or a 2xx body did
//! not have the expected shape (`Decode`). Nothing is retried; each error goes
//! straight back to the caller.

use thiserror::Error;

/// The underlying network call failed.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] ureq::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors returned by `BlogMemberClient` operations.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server returned a status outside `[200, 300)`. `body` is the raw
    /// response text, not parsed.
    #[error("unexpected status code: {status}, body: {body}")]
    Api { status: u16, body: String },

    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Invalid or missing client configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// A role name outside `admin`, `editor` and `contributor`.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown role: {0} (expected admin, editor or contributor)")]
pub struct ParseRoleError(pub String);
