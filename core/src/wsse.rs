//! WSSE UsernameToken signing used by the Hatena APIs.
//!
//! Each header value proves knowledge of the API key without sending it:
//! `PasswordDigest = base64(sha1(nonce ++ created ++ apikey))`, with a fresh
//! random nonce and creation timestamp per call.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{SecondsFormat, Utc};
use sha1::{Digest, Sha1};

pub const HEADER_NAME: &str = "X-WSSE";

const NONCE_LEN: usize = 20;

/// Username and API key pair used to sign requests.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    apikey: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, apikey: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            apikey: apikey.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Produce a new `X-WSSE` header value. Every call uses a new nonce.
    pub fn header_value(&self) -> String {
        let nonce: [u8; NONCE_LEN] = rand::random();
        let created = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        self.header_value_with(&nonce, &created)
    }

    fn header_value_with(&self, nonce: &[u8], created: &str) -> String {
        let mut hasher = Sha1::new();
        hasher.update(nonce);
        hasher.update(created.as_bytes());
        hasher.update(self.apikey.as_bytes());
        let digest = hasher.finalize();

        format!(
            r#"UsernameToken Username="{}", PasswordDigest="{}", Nonce="{}", Created="{}""#,
            self.username,
            STANDARD.encode(digest),
            STANDARD.encode(nonce),
            created,
        )
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("apikey", &"<redacted>")
            .finish()
    }
}
