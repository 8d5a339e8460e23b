//! Navigation targets and the navigator seam.
//!
//! SYSTEM CONTEXT
//! ==============
//! Guards and auth flows decide *where* to go; a [`Navigator`] performs the
//! move. In the browser that is the Leptos router, in tests a recorder.

#[cfg(test)]
#[path = "navigate_test.rs"]
mod navigate_test;

/// A path plus optional query parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavTarget {
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl NavTarget {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into(), query: Vec::new() }
    }

    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Value of the first query parameter named `key`.
    #[must_use]
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// Path with the percent-encoded query string appended.
    #[must_use]
    pub fn href(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query: Vec<String> = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect();
        format!("{}?{}", self.path, query.join("&"))
    }
}

/// Performs a navigation. Implementations must not block.
pub trait Navigator {
    fn navigate(&self, target: &NavTarget);
}

/// `true` for same-origin absolute paths.
///
/// Rejects anything that does not start with `/`, protocol-relative `//host`
/// targets, and `/\host`, which browsers normalize to `//host`.
#[must_use]
pub fn is_internal_path(url: &str) -> bool {
    url.starts_with('/') && !url.starts_with("//") && !url.starts_with("/\\")
}

/// `raw` when it is an internal path, otherwise `fallback`.
#[must_use]
pub fn safe_return_url(raw: Option<&str>, fallback: &str) -> String {
    match raw {
        Some(url) if is_internal_path(url) => url.to_owned(),
        Some(url) => {
            tracing::warn!(return_url = url, "discarding non-internal return target");
            fallback.to_owned()
        }
        None => fallback.to_owned(),
    }
}

/// Decoded value of `key` in a `?a=1&b=2` style query string.
#[must_use]
pub fn query_param(search: &str, key: &str) -> Option<String> {
    search
        .trim_start_matches('?')
        .split('&')
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .find(|(k, _)| *k == key)
        .and_then(|(_, v)| urlencoding::decode(&v.replace('+', " ")).ok().map(std::borrow::Cow::into_owned))
}
