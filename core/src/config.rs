//! Client identity and addressing.
//!
//! # Design
//! `ClientConfig::new` takes values as given, with no checks. The
//! `ClientConfigBuilder` (and `from_env`, which feeds it) applies the
//! resolution rules: required values must be non-empty and the owner
//! falls back to the operator's username. The API host and the insecure
//! flag are separate options; setting one never implies the other.

use std::fmt;

use crate::error::ConfigError;
use crate::wsse::Credentials;

pub const DEFAULT_API_HOST: &str = "blog.hatena.ne.jp";

pub const ENV_USERNAME: &str = "HATENABLOG_USERNAME";
pub const ENV_APIKEY: &str = "HATENABLOG_APIKEY";
pub const ENV_OWNER: &str = "HATENABLOG_OWNER";
pub const ENV_BLOG_HOST: &str = "HATENABLOG_BLOG_HOST";
pub const ENV_API_HOST: &str = "HATENABLOG_HOST";
pub const ENV_INSECURE: &str = "HATENABLOG_INSECURE";

#[derive(Clone)]
pub struct ClientConfig {
    username: String,
    apikey: String,
    owner: String,
    blog_host: String,
    api_host: String,
    insecure: bool,
}

impl ClientConfig {
    pub fn new(
        username: impl Into<String>,
        apikey: impl Into<String>,
        owner: impl Into<String>,
        blog_host: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            apikey: apikey.into(),
            owner: owner.into(),
            blog_host: blog_host.into(),
            api_host: DEFAULT_API_HOST.to_string(),
            insecure: false,
        }
    }

    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Resolve a config from `HATENABLOG_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        // Unset and empty are the same for optional variables.
        let optional = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let mut builder = Self::builder()
            .username(lookup(ENV_USERNAME).unwrap_or_default())
            .apikey(lookup(ENV_APIKEY).unwrap_or_default())
            .blog_host(lookup(ENV_BLOG_HOST).unwrap_or_default());
        if let Some(owner) = optional(ENV_OWNER) {
            builder = builder.owner(owner);
        }
        if let Some(host) = optional(ENV_API_HOST) {
            builder = builder.api_host(host);
        }
        if let Some(insecure) = optional(ENV_INSECURE) {
            builder = builder.insecure(parse_flag(ENV_INSECURE, &insecure)?);
        }
        builder.build()
    }

    pub fn with_api_host(mut self, api_host: impl Into<String>) -> Self {
        self.api_host = api_host.into();
        self
    }

    pub fn with_insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }

    pub(crate) fn set_api_host(&mut self, api_host: String) {
        self.api_host = api_host;
    }

    pub(crate) fn set_insecure(&mut self, insecure: bool) {
        self.insecure = insecure;
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn blog_host(&self) -> &str {
        &self.blog_host
    }

    pub fn api_host(&self) -> &str {
        &self.api_host
    }

    pub fn insecure(&self) -> bool {
        self.insecure
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.username.as_str(), self.apikey.as_str())
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("username", &self.username)
            .field("apikey", &"<redacted>")
            .field("owner", &self.owner)
            .field("blog_host", &self.blog_host)
            .field("api_host", &self.api_host)
            .field("insecure", &self.insecure)
            .finish()
    }
}

fn parse_flag(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(ConfigError::Invalid {
            name,
            value: value.to_string(),
        }),
    }
}

#[derive(Debug, Default, Clone)]
pub struct ClientConfigBuilder {
    username: Option<String>,
    apikey: Option<String>,
    owner: Option<String>,
    blog_host: Option<String>,
    api_host: Option<String>,
    insecure: Option<bool>,
}

impl ClientConfigBuilder {
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn apikey(mut self, apikey: impl Into<String>) -> Self {
        self.apikey = Some(apikey.into());
        self
    }

    /// Account that owns the blog. Defaults to `username`.
    pub fn owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn blog_host(mut self, blog_host: impl Into<String>) -> Self {
        self.blog_host = Some(blog_host.into());
        self
    }

    pub fn api_host(mut self, api_host: impl Into<String>) -> Self {
        self.api_host = Some(api_host.into());
        self
    }

    pub fn insecure(mut self, insecure: bool) -> Self {
        self.insecure = Some(insecure);
        self
    }

    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let username = required("username", self.username)?;
        let apikey = required("apikey", self.apikey)?;
        let owner = match self.owner {
            Some(owner) => required("owner", Some(owner))?,
            None => username.clone(),
        };
        let blog_host = required("blog_host", self.blog_host)?;

        let mut config = ClientConfig::new(username, apikey, owner, blog_host);
        if let Some(api_host) = self.api_host {
            config.api_host = required("api_host", Some(api_host))?;
        }
        if let Some(insecure) = self.insecure {
            config.insecure = insecure;
        }
        Ok(config)
    }
}

fn required(name: &'static str, value: Option<String>) -> Result<String, ConfigError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(name))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn base() -> ClientConfigBuilder {
        ClientConfig::builder()
            .username("username")
            .apikey("apikey")
            .blog_host("blog.example.com")
    }

    #[test]
    fn new_uses_production_defaults() {
        let config = ClientConfig::new("username", "apikey", "owner", "blog.example.com");
        assert_eq!(config.api_host(), DEFAULT_API_HOST);
        assert!(!config.insecure());
        assert_eq!(config.owner(), "owner");
    }

    #[test]
    fn owner_defaults_to_username() {
        let config = base().build().unwrap();
        assert_eq!(config.owner(), "username");

        let config = base().owner("owner").build().unwrap();
        assert_eq!(config.owner(), "owner");
    }

    #[test]
    fn required_fields_reject_missing_and_empty() {
        assert_eq!(
            ClientConfig::builder().apikey("k").blog_host("b").build().unwrap_err(),
            ConfigError::Missing("username")
        );
        assert_eq!(
            base().apikey("").build().unwrap_err(),
            ConfigError::Missing("apikey")
        );
        assert_eq!(
            base().blog_host("").build().unwrap_err(),
            ConfigError::Missing("blog_host")
        );
        assert_eq!(
            base().owner("").build().unwrap_err(),
            ConfigError::Missing("owner")
        );
    }

    #[test]
    fn insecure_and_api_host_are_independent() {
        let config = base().insecure(true).build().unwrap();
        assert!(config.insecure());
        assert_eq!(config.api_host(), DEFAULT_API_HOST);

        let config = base().api_host("localhost:8080").build().unwrap();
        assert!(!config.insecure());
        assert_eq!(config.api_host(), "localhost:8080");
    }

    #[test]
    fn debug_redacts_apikey() {
        let config = base().apikey("s3cr3t").build().unwrap();
        assert!(!format!("{config:?}").contains("s3cr3t"));
    }

    #[test]
    fn resolves_from_environment_lookup() {
        let vars: HashMap<&str, &str> = [
            (ENV_USERNAME, "username"),
            (ENV_APIKEY, "apikey"),
            (ENV_BLOG_HOST, "blog.example.com"),
            (ENV_OWNER, ""),
            (ENV_INSECURE, "TRUE"),
        ]
        .into_iter()
        .collect();
        let config = ClientConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.owner(), "username");
        assert_eq!(config.api_host(), DEFAULT_API_HOST);
        assert!(config.insecure());
    }

    #[test]
    fn rejects_unparseable_insecure_flag() {
        let vars: HashMap<&str, &str> = [
            (ENV_USERNAME, "username"),
            (ENV_APIKEY, "apikey"),
            (ENV_BLOG_HOST, "blog.example.com"),
            (ENV_INSECURE, "maybe"),
        ]
        .into_iter()
        .collect();
        let err = ClientConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: ENV_INSECURE, .. }));
    }

    #[test]
    fn missing_environment_reports_first_required_field() {
        let err = ClientConfig::from_lookup(|_| None).unwrap_err();
        assert_eq!(err, ConfigError::Missing("username"));
    }
}
