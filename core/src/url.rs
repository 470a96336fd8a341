//! Endpoint URLs for the member API.
//!
//! URLs have the form
//! `(http|https)://<api_host>/<owner>/<blog_host>/api/<segments...>`.

use crate::config::ClientConfig;

/// Build the API URL for `segments` under the configured blog.
///
/// The path is joined and cleaned: empty segments and `.` are dropped,
/// duplicate slashes collapse, and `..` removes the previous segment. Each
/// remaining segment is percent-encoded.
pub fn build_url(config: &ClientConfig, segments: &[&str]) -> String {
    let scheme = if config.insecure() { "http" } else { "https" };

    let prefix = [config.owner(), config.blog_host(), "api"];
    let path = join_path(prefix.iter().chain(segments.iter()).copied());

    format!("{scheme}://{}/{path}", config.api_host())
}

fn join_path<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    let mut cleaned: Vec<&str> = Vec::new();
    for segment in parts.flat_map(|p| p.split('/')) {
        match segment {
            "" | "." => {}
            ".." => {
                cleaned.pop();
            }
            s => cleaned.push(s),
        }
    }
    cleaned
        .into_iter()
        .map(urlencoding::encode)
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ClientConfig {
        ClientConfig::new("username", "apikey", "owner", "blog.example.com")
    }

    #[test]
    fn members_url_uses_https_by_default() {
        assert_eq!(
            build_url(&config(), &["members"]),
            "https://blog.hatena.ne.jp/owner/blog.example.com/api/members"
        );
    }

    #[test]
    fn insecure_switches_scheme_to_http() {
        let config = config().with_insecure(true);
        assert_eq!(
            build_url(&config, &["members"]),
            "http://blog.hatena.ne.jp/owner/blog.example.com/api/members"
        );
    }

    #[test]
    fn api_host_override_is_used() {
        let config = config().with_api_host("127.0.0.1:3000");
        assert_eq!(
            build_url(&config, &[]),
            "https://127.0.0.1:3000/owner/blog.example.com/api"
        );
    }

    #[test]
    fn segments_are_joined_and_cleaned() {
        assert_eq!(
            build_url(&config(), &["members", "alice"]),
            "https://blog.hatena.ne.jp/owner/blog.example.com/api/members/alice"
        );
        assert_eq!(
            build_url(&config(), &["/members/", "", "./alice//"]),
            "https://blog.hatena.ne.jp/owner/blog.example.com/api/members/alice"
        );
        assert_eq!(
            build_url(&config(), &["members", "..", "entries"]),
            "https://blog.hatena.ne.jp/owner/blog.example.com/api/entries"
        );
    }

    #[test]
    fn reserved_characters_are_percent_encoded() {
        assert_eq!(
            build_url(&config(), &["members", "bob?x#y z"]),
            "https://blog.hatena.ne.jp/owner/blog.example.com/api/members/bob%3Fx%23y%20z"
        );
    }

    #[test]
    fn subdirectory_blog_host_is_kept_verbatim() {
        let config = ClientConfig::new("username", "apikey", "owner", "0123456789");
        assert_eq!(
            build_url(&config, &["members"]),
            "https://blog.hatena.ne.jp/owner/0123456789/api/members"
        );
    }
}
