//! Blocking client for the Hatena Blog member API.
//!
//! # Design
//! Each operation is split into a `build_*` step that produces a plain
//! `HttpRequest` and a parse step that interprets the `HttpResponse`; the
//! public methods glue the two together through a `Transport`. The production
//! transport is a `SigningTransport` over ureq, so every request carries the
//! WSSE header and the project user agent.
//!
//! `list_members` is read-through cached. Any successful `add_member` or
//! `delete_member` drops the whole snapshot; failures leave it alone. The
//! cache lock is never held while a request is in flight, so two concurrent
//! misses may both fetch and the later store wins.

use tracing::{debug, warn};

use crate::cache::MemberCache;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::{SigningTransport, Transport, UreqTransport};
use crate::types::{BlogMember, MembersResponse};
use crate::url::build_url;

const MEMBERS: &str = "members";

/// Client for one blog's member list. Safe to share across threads.
#[derive(Debug)]
pub struct BlogMemberClient<T = SigningTransport<UreqTransport>> {
    transport: T,
    config: ClientConfig,
    cache: MemberCache,
}

impl BlogMemberClient {
    /// Create a client that signs requests with `config`'s credentials and
    /// reports `version` in its user agent.
    pub fn new(version: &str, config: ClientConfig) -> Self {
        let transport = SigningTransport::new(UreqTransport::new(), config.credentials(), version);
        Self::with_transport(transport, config)
    }

    /// Like [`BlogMemberClient::new`] with this crate's version.
    pub fn from_config(config: ClientConfig) -> Self {
        Self::new(env!("CARGO_PKG_VERSION"), config)
    }
}

impl<T: Transport> BlogMemberClient<T> {
    /// Use `transport` as is. Wrap it in a `SigningTransport` if requests
    /// must be authenticated.
    pub fn with_transport(transport: T, config: ClientConfig) -> Self {
        Self {
            transport,
            config,
            cache: MemberCache::new(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Point the client at another API host, e.g. a local test server.
    pub fn set_api_host(&mut self, api_host: impl Into<String>) {
        self.config.set_api_host(api_host.into());
    }

    pub fn set_insecure(&mut self, insecure: bool) {
        self.config.set_insecure(insecure);
    }

    pub fn build_url(&self, segments: &[&str]) -> String {
        build_url(&self.config, segments)
    }

    pub fn build_add_member(&self, username: &str, role: &str) -> Result<HttpRequest, ClientError> {
        let member = BlogMember {
            username: username.to_string(),
            role: role.to_string(),
        };
        let body = serde_json::to_string(&member).map_err(ClientError::Encode)?;
        Ok(HttpRequest::new(HttpMethod::Post, self.build_url(&[MEMBERS])).with_json_body(body))
    }

    pub fn build_list_members(&self) -> HttpRequest {
        HttpRequest::new(HttpMethod::Get, self.build_url(&[MEMBERS]))
    }

    pub fn build_delete_member(&self, username: &str) -> HttpRequest {
        HttpRequest::new(HttpMethod::Delete, self.build_url(&[MEMBERS, username]))
    }

    /// Add `username` with `role`, or change the role of an existing member.
    ///
    /// Returns the member as the server recorded it.
    pub fn add_member(&self, username: &str, role: &str) -> Result<BlogMember, ClientError> {
        let request = self.build_add_member(username, role)?;
        let response = self.execute(request)?;
        let member: BlogMember = decode(&response)?;

        self.invalidate_cache();
        Ok(member)
    }

    /// All members of the blog, served from the cache when it is populated.
    pub fn list_members(&self) -> Result<Vec<BlogMember>, ClientError> {
        if let Some(members) = self.cache.get() {
            debug!(count = members.len(), "member list served from cache");
            return Ok(members);
        }

        let response = self.execute(self.build_list_members())?;
        let MembersResponse { members } = decode(&response)?;

        self.cache.store(&members);
        debug!(count = members.len(), "member list cached");
        Ok(members)
    }

    /// Look up a single member by username in the (cached) member list.
    pub fn find_member(&self, username: &str) -> Result<Option<BlogMember>, ClientError> {
        let members = self.list_members()?;
        Ok(members.into_iter().find(|m| m.username == username))
    }

    pub fn delete_member(&self, username: &str) -> Result<(), ClientError> {
        self.execute(self.build_delete_member(username))?;
        self.invalidate_cache();
        Ok(())
    }

    fn invalidate_cache(&self) {
        self.cache.invalidate();
        debug!("member list cache invalidated");
    }

    /// Send `request` and fail unless the status is 2xx.
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
        let method = request.method.as_str();
        let url = request.url.clone();

        let response = self.transport.send(request)?;
        debug!(method, url = %url, status = response.status, "request completed");

        check_status(response).inspect_err(|err| {
            warn!(method, url = %url, error = %err, "member API returned an error");
        })
    }
}

fn check_status(response: HttpResponse) -> Result<HttpResponse, ClientError> {
    if response.is_success() {
        return Ok(response);
    }
    Err(ClientError::Api {
        status: response.status,
        body: response.body,
    })
}

fn decode<D: serde::de::DeserializeOwned>(response: &HttpResponse) -> Result<D, ClientError> {
    serde_json::from_str(&response.body).map_err(ClientError::Decode)
}
