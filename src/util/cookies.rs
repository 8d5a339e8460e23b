//! Cookie access for auth tokens.
//!
//! SYSTEM CONTEXT
//! ==============
//! The backend sets its session cookies, but deployments have used several
//! spellings for them (`access_token`, `access-token`, `accessToken`, ...).
//! Logout clears every known spelling; reads try the common variations.
//!
//! Writes always use `path=/; secure; samesite=strict`. Values are
//! percent-encoded on write and decoded on read.

#[cfg(test)]
#[path = "cookies_test.rs"]
mod cookies_test;

use std::cell::RefCell;
use std::collections::BTreeMap;

use cookie::{Cookie, SameSite};
use time::OffsetDateTime;

pub const ACCESS_TOKEN_COOKIES: [&str; 6] =
    ["access_token", "access-token", "accessToken", "auth_token", "auth-token", "authToken"];

pub const REFRESH_TOKEN_COOKIES: [&str; 3] = ["refresh_token", "refresh-token", "refreshToken"];

/// A named string cookie jar.
pub trait CookieStore {
    fn get(&self, name: &str) -> Option<String>;

    fn all(&self) -> Vec<(String, String)>;

    /// Write `name`. `expires: None` makes a session cookie.
    fn set(&self, name: &str, value: &str, expires: Option<OffsetDateTime>);

    /// Expire `name` immediately.
    fn delete(&self, name: &str) {
        self.set(name, "", Some(OffsetDateTime::UNIX_EPOCH));
    }

    /// First non-empty value among `base`, its common spelling variations,
    /// then `extra` names in order.
    fn get_with_variations(&self, base: &str, extra: &[&str]) -> Option<String> {
        name_variations(base, extra)
            .into_iter()
            .find_map(|name| self.get(&name).filter(|value| !value.is_empty()))
    }
}

/// Candidate names for `base`: exact, first `_` as `-`, first `-` as `_`,
/// lowercase, uppercase, then `extra`. Duplicates are dropped.
#[must_use]
pub fn name_variations(base: &str, extra: &[&str]) -> Vec<String> {
    let candidates = [
        base.to_owned(),
        base.replacen('_', "-", 1),
        base.replacen('-', "_", 1),
        base.to_lowercase(),
        base.to_uppercase(),
    ];
    let mut names: Vec<String> = Vec::new();
    for name in candidates.into_iter().chain(extra.iter().map(|s| (*s).to_owned())) {
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

/// Expire every known access and refresh token cookie.
pub fn clear_auth_cookies(store: &dyn CookieStore) {
    for name in ACCESS_TOKEN_COOKIES.iter().chain(REFRESH_TOKEN_COOKIES.iter()) {
        store.delete(name);
    }
    tracing::debug!("auth cookies cleared");
}

/// The access token under any of its known spellings.
#[must_use]
pub fn access_token(store: &dyn CookieStore) -> Option<String> {
    store.get_with_variations(ACCESS_TOKEN_COOKIES[0], &ACCESS_TOKEN_COOKIES[1..])
}

/// `Set-Cookie` style string for one write.
#[must_use]
pub fn format_cookie(name: &str, value: &str, expires: Option<OffsetDateTime>) -> String {
    let mut builder = Cookie::build((name.to_owned(), value.to_owned()))
        .path("/")
        .secure(true)
        .same_site(SameSite::Strict);
    if let Some(expires) = expires {
        builder = builder.expires(expires);
    }
    builder.build().encoded().to_string()
}

/// Decode a `document.cookie` style `a=1; b=2` string. Malformed pairs are
/// skipped.
#[must_use]
pub fn parse_cookie_header(header: &str) -> Vec<(String, String)> {
    Cookie::split_parse_encoded(header.to_owned())
        .filter_map(Result::ok)
        .map(|c| (c.name().to_owned(), c.value().to_owned()))
        .collect()
}

/// In-memory jar for native use and tests. Expired writes remove the entry,
/// as a browser would.
#[derive(Default)]
pub struct MemoryCookieStore {
    jar: RefCell<BTreeMap<String, String>>,
    writes: RefCell<Vec<String>>,
}

impl MemoryCookieStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every write so far, formatted as `Set-Cookie` strings.
    #[must_use]
    pub fn writes(&self) -> Vec<String> {
        self.writes.borrow().clone()
    }
}

impl CookieStore for MemoryCookieStore {
    fn get(&self, name: &str) -> Option<String> {
        self.jar.borrow().get(name).cloned()
    }

    fn all(&self) -> Vec<(String, String)> {
        self.jar.borrow().iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }

    fn set(&self, name: &str, value: &str, expires: Option<OffsetDateTime>) {
        self.writes.borrow_mut().push(format_cookie(name, value, expires));
        let mut jar = self.jar.borrow_mut();
        if expires.is_some_and(|at| at <= OffsetDateTime::now_utc()) {
            jar.remove(name);
        } else {
            jar.insert(name.to_owned(), value.to_owned());
        }
    }
}

/// `document.cookie` backed jar.
#[cfg(feature = "hydrate")]
#[derive(Clone, Copy, Debug, Default)]
pub struct DocumentCookieStore;

#[cfg(feature = "hydrate")]
impl DocumentCookieStore {
    fn document() -> Option<web_sys::HtmlDocument> {
        use wasm_bindgen::JsCast;
        web_sys::window()?.document()?.dyn_into::<web_sys::HtmlDocument>().ok()
    }
}

#[cfg(feature = "hydrate")]
impl CookieStore for DocumentCookieStore {
    fn get(&self, name: &str) -> Option<String> {
        self.all().into_iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    fn all(&self) -> Vec<(String, String)> {
        Self::document()
            .and_then(|doc| doc.cookie().ok())
            .map(|raw| parse_cookie_header(&raw))
            .unwrap_or_default()
    }

    fn set(&self, name: &str, value: &str, expires: Option<OffsetDateTime>) {
        let Some(doc) = Self::document() else {
            return;
        };
        if doc.set_cookie(&format_cookie(name, value, expires)).is_err() {
            tracing::warn!(cookie = name, "failed to write cookie");
        }
    }
}
