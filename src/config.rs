use url::Url;

#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Config {
    pub app_name: String,
    pub app_version: String,
    pub app_lang: String,

    pub user_agent: String,

    /// Base of the public Deezer API, without trailing slash.
    pub api_url: Url,

    /// Prefix that marks a query as a shortened share link.
    pub share_link_prefix: String,

    /// Prefix an expanded share link must have to be resolved again.
    pub canonical_prefix: String,

    /// Maximum number of `next` pages followed for a single listing.
    pub max_pages: usize,
}

impl Config {
    pub const API_URL: &'static str = "https://api.deezer.com/2.0";
    pub const SHARE_LINK_PREFIX: &'static str = "https://deezer.page.link/";
    pub const CANONICAL_PREFIX: &'static str = "https://www.deezer.com/";
    pub const MAX_PAGES: usize = 100;

    /// Creates a configuration talking to a different API base, such as a
    /// local test server.
    #[must_use]
    pub fn with_api_url(api_url: Url) -> Self {
        Self {
            api_url,
            ..Self::default()
        }
    }
}

impl Default for Config {
    /// # Panics
    ///
    /// Panics if the package name, version or language would produce an
    /// invalid `User-Agent`.
    fn default() -> Self {
        let app_name = env!("CARGO_PKG_NAME").to_owned();
        let app_version = env!("CARGO_PKG_VERSION").to_owned();
        let app_lang = "en".to_owned();

        // Additional `User-Agent` string checks on top of `reqwest::HeaderValue`.
        let illegal_chars = |chr| chr == '/' || chr == ';';
        assert!(
            !(app_name.is_empty()
                || app_name.contains(illegal_chars)
                || app_version.is_empty()
                || app_version.contains(illegal_chars)
                || app_lang.chars().count() != 2),
            "application name, version and/or language invalid (\"{app_name}\"; \"{app_version}\"; \"{app_lang}\")"
        );

        let os_name = match std::env::consts::OS {
            "macos" => "osx",
            other => other,
        };
        let os_version = sysinfo::System::os_version()
            .filter(|version| !version.is_empty() && !version.contains(illegal_chars))
            .unwrap_or_else(|| String::from("0"));

        let user_agent = format!("{app_name}/{app_version} (Rust; {os_name}/{os_version}; {app_lang})");
        trace!("user agent: {user_agent}");

        Self {
            app_name,
            app_version,
            app_lang,

            user_agent,

            api_url: Url::parse(Self::API_URL).expect("invalid api url"),
            share_link_prefix: Self::SHARE_LINK_PREFIX.to_owned(),
            canonical_prefix: Self::CANONICAL_PREFIX.to_owned(),
            max_pages: Self::MAX_PAGES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_public_api() {
        let config = Config::default();
        assert_eq!(config.api_url.as_str(), "https://api.deezer.com/2.0");
        assert_eq!(config.share_link_prefix, "https://deezer.page.link/");
        assert_eq!(config.max_pages, 100);
        assert!(config.user_agent.starts_with("deezer-resolver/"));
    }

    #[test]
    fn api_url_override_keeps_other_defaults() {
        let config = Config::with_api_url(Url::parse("http://127.0.0.1:8080/2.0").unwrap());
        assert_eq!(config.api_url.as_str(), "http://127.0.0.1:8080/2.0");
        assert_eq!(config.canonical_prefix, "https://www.deezer.com/");
    }
}
