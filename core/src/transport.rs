//! Transports that carry an `HttpRequest` to the network and back.
//!
//! # Design
//! `Transport` is the seam between the client and the network. `UreqTransport`
//! performs the actual round trip; `SigningTransport` wraps any transport and
//! stamps the `X-WSSE` and `User-Agent` headers onto every request before
//! forwarding it. Tests plug fakes in at the same seam.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::wsse::{self, Credentials};

pub const PROJECT_NAME: &str = "terraform-provider-hatenablog-members";
pub const PROJECT_URL: &str = "https://github.com/hatena/terraform-provider-hatenablog-members";

/// Executes one HTTP round trip.
///
/// Non-2xx responses are returned as `Ok`; only failures to complete the
/// exchange are errors.
pub trait Transport: Send + Sync {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send(request)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send(request)
    }
}

/// Blocking transport backed by a `ureq::Agent`.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport").finish_non_exhaustive()
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        Self::build(None)
    }

    /// Bound each request by `timeout` end to end.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::build(Some(timeout))
    }

    fn build(timeout: Option<Duration>) -> Self {
        // Status codes are interpreted by the client, so 4xx/5xx must come
        // back as responses rather than errors.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let HttpRequest {
            method,
            url,
            headers,
            body,
        } = request;

        let result = match method {
            HttpMethod::Get => with_headers(self.agent.get(&url), &headers).call(),
            HttpMethod::Delete => with_headers(self.agent.delete(&url), &headers).call(),
            HttpMethod::Post => {
                let builder = with_headers(self.agent.post(&url), &headers);
                match body {
                    Some(body) => builder.send(body.as_bytes()),
                    None => builder.send_empty(),
                }
            }
        };

        let mut response = result?;
        let status = response.status().as_u16();
        let body = response.body_mut().read_to_string()?;

        Ok(HttpResponse { status, body })
    }
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

/// The `User-Agent` sent with every request.
pub fn user_agent(version: &str) -> String {
    format!("{PROJECT_NAME}/{version} (+{PROJECT_URL})")
}

/// Wraps a transport to authenticate and identify every request.
///
/// Sets `X-WSSE` and `User-Agent` on the request in place, replacing any
/// existing values, and leaves everything else untouched. The inner
/// transport's result is returned as is.
#[derive(Debug)]
pub struct SigningTransport<T = UreqTransport> {
    inner: T,
    credentials: Credentials,
    user_agent: String,
}

impl<T: Transport> SigningTransport<T> {
    pub fn new(inner: T, credentials: Credentials, version: &str) -> Self {
        Self {
            inner,
            credentials,
            user_agent: user_agent(version),
        }
    }

    pub fn sign(&self, request: &mut HttpRequest) {
        request.set_header(wsse::HEADER_NAME, self.credentials.header_value());
        request.set_header("User-Agent", self.user_agent.as_str());
    }
}

impl<T: Transport> Transport for SigningTransport<T> {
    fn send(&self, mut request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.sign(&mut request);
        self.inner.send(request)
    }
}
