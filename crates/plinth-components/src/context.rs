//! Request-like context available to components while rendering.

use std::collections::BTreeMap;

use url::Url;

/// Ambient data a component needs to render outside a live request.
#[derive(Debug, Clone)]
pub struct RenderContext {
    /// Absolute base URL, always ending in `/`
    base_url: Url,
    /// Path of the page being rendered
    path: String,
    /// Request headers, keyed by lowercase name
    headers: BTreeMap<String, String>,
}

impl RenderContext {
    /// Create a context for the given base URL.
    pub fn new(mut base_url: Url) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut headers = BTreeMap::new();
        if let Some(host) = base_url.host_str() {
            let host = match base_url.port() {
                Some(port) => format!("{host}:{port}"),
                None => host.to_string(),
            };
            headers.insert("host".to_string(), host);
        }
        headers.insert(
            "user-agent".to_string(),
            concat!("plinth/", env!("CARGO_PKG_VERSION")).to_string(),
        );

        Self {
            path: base_url.path().to_string(),
            base_url,
            headers,
        }
    }

    /// Parse a base URL string and create a context for it.
    pub fn from_base_url(base_url: &str) -> Result<Self, url::ParseError> {
        Url::parse(base_url).map(Self::new)
    }

    /// Set the path of the page being rendered.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// A copy of this context for the page at `path`, relative to the base URL.
    pub fn for_page(&self, path: &str) -> Self {
        let path = format!("{}{}", self.base_url.path(), path.trim_start_matches('/'));
        self.clone().with_path(path)
    }

    /// Add or replace a request header.
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Look up a header by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn headers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Absolute URL of the page being rendered.
    pub fn page_url(&self) -> String {
        match self.base_url.join(&self.path) {
            Ok(url) => url.to_string(),
            Err(_) => self.base_url.to_string(),
        }
    }

    /// Resolve an app-relative link against the base URL.
    ///
    /// Leading slashes are treated as relative to the base, so an app hosted
    /// under a sub-path keeps its prefix.
    pub fn resolve_url(&self, link: &str) -> String {
        match self.base_url.join(link.trim_start_matches('/')) {
            Ok(url) => url.to_string(),
            Err(_) => link.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_base_url_and_sets_host() {
        let ctx = RenderContext::from_base_url("https://example.com:8443/app").unwrap();

        assert_eq!(ctx.base_url().as_str(), "https://example.com:8443/app/");
        assert_eq!(ctx.header("Host"), Some("example.com:8443"));
        assert_eq!(ctx.path(), "/app/");
    }

    #[test]
    fn resolves_links_under_base_path() {
        let ctx = RenderContext::from_base_url("https://example.com/app/").unwrap();

        assert_eq!(ctx.resolve_url("/create"), "https://example.com/app/create");
        assert_eq!(ctx.resolve_url(""), "https://example.com/app/");
    }

    #[test]
    fn page_url_uses_absolute_path() {
        let ctx = RenderContext::from_base_url("https://example.com/app/")
            .unwrap()
            .with_path("/app/create");

        assert_eq!(ctx.page_url(), "https://example.com/app/create");
    }

    #[test]
    fn for_page_keeps_base_path() {
        let ctx = RenderContext::from_base_url("https://example.com/app/").unwrap();

        let page = ctx.for_page("/create.html");

        assert_eq!(page.path(), "/app/create.html");
        assert_eq!(page.page_url(), "https://example.com/app/create.html");
        assert_eq!(page.header("host"), Some("example.com"));
        assert_eq!(ctx.path(), "/app/");
    }

    #[test]
    fn rejects_relative_base_url() {
        assert!(RenderContext::from_base_url("/relative").is_err());
    }

    #[test]
    fn headers_are_case_insensitive() {
        let ctx = RenderContext::from_base_url("http://localhost:5000/")
            .unwrap()
            .with_header("Accept-Language", "en");

        assert_eq!(ctx.header("accept-language"), Some("en"));
    }
}
