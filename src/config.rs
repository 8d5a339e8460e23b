//! Client configuration parsed from environment variables.

use crate::error::ApiError;

pub const DEFAULT_API_URL: &str = "http://localhost:3000/api/v1";
pub const DEFAULT_LOGIN_PATH: &str = "/auth/login";
pub const DEFAULT_HOME_PATH: &str = "/";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// REST base URL without a trailing slash, e.g. `https://host/api/v1`.
    pub api_url: String,
    /// Where the auth guard and logout send the browser.
    pub login_path: String,
    /// Where the admin guard and login fall back to.
    pub home_path: String,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for ClientConfig {
    /// Browser builds have no runtime environment, so the API URL is baked
    /// in at compile time when `SHOWROOM_API_URL` is set.
    fn default() -> Self {
        Self {
            api_url: normalize_api_url(option_env!("SHOWROOM_API_URL").unwrap_or(DEFAULT_API_URL)),
            login_path: DEFAULT_LOGIN_PATH.to_owned(),
            home_path: DEFAULT_HOME_PATH.to_owned(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `SHOWROOM_API_URL`: default `http://localhost:3000/api/v1`
    /// - `SHOWROOM_REQUEST_TIMEOUT_SECS`: default 30
    /// - `SHOWROOM_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] if `SHOWROOM_API_URL` is not an
    /// absolute URL.
    pub fn from_env() -> Result<Self, ApiError> {
        let api_url = std::env::var("SHOWROOM_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_owned());
        Self::default()
            .with_api_url(&api_url)
            .map(|config| Self {
                request_timeout_secs: env_parse_u64("SHOWROOM_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
                connect_timeout_secs: env_parse_u64("SHOWROOM_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
                ..config
            })
    }

    /// Replace the API base URL after validating it.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] if `raw` does not parse as a URL.
    pub fn with_api_url(self, raw: &str) -> Result<Self, ApiError> {
        let api_url = normalize_api_url(raw);
        reqwest::Url::parse(&api_url).map_err(|e| ApiError::InvalidUrl(format!("{api_url}: {e}")))?;
        Ok(Self { api_url, ..self })
    }

    /// Join an endpoint path onto the API base URL.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }
}

fn normalize_api_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_owned()
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
