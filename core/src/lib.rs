//! Blocking client for the Hatena Blog member-management API.
//!
//! # Overview
//! `BlogMemberClient` adds, lists, and deletes members of one blog. Requests
//! go through a `SigningTransport`, which attaches the WSSE authentication
//! header and the project user agent before handing them to ureq.
//!
//! # Design
//! - Requests and responses are plain data (`HttpRequest` / `HttpResponse`),
//!   so signing and test doubles sit behind the `Transport` trait.
//! - `list_members` is read-through cached per client; any successful
//!   mutation drops the snapshot.
//! - One HTTP request per operation. No retries, no pagination.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;
pub mod url;
pub mod wsse;

pub use cache::MemberCache;
pub use client::BlogMemberClient;
pub use config::{ClientConfig, ClientConfigBuilder, DEFAULT_API_HOST};
pub use error::{ClientError, ConfigError, ParseRoleError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{SigningTransport, Transport, UreqTransport};
pub use types::{BlogMember, MembersResponse, Role};
pub use wsse::Credentials;
