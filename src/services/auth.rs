//! Auth flows: what happens around each auth call.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages call these instead of the raw [`AuthBackend`] so every flow keeps
//! the session cache, cookies, the remember-me flag and navigation in step.
//!
//! ORDERING
//! ========
//! - Login invalidates the session cache before navigating, so the guard on
//!   the destination refetches `auth/me` and sees the new session.
//! - Logout clears local state first and navigates to login whatever the
//!   backend answers.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::rc::Rc;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::net::api::AuthBackend;
use crate::net::types::{LoginRequest, OtpRequest, OtpVerification, RegisterRequest, ResetPasswordRequest};
use crate::routing::navigate::{NavTarget, Navigator, query_param, safe_return_url};
use crate::state::session::SessionCache;
use crate::util::cookies::{CookieStore, clear_auth_cookies};
use crate::util::form::normalize_email;
use crate::util::storage::{KeyValueStore, remember_me, set_remember_me};

pub const RESET_PASSWORD_PATH: &str = "/auth/reset-password";
pub const RESET_TOKEN_PARAM: &str = "resetToken";
/// Older reset links carry the token under this name.
pub const LEGACY_TOKEN_PARAM: &str = "token";

/// Everything the flows touch besides the backend and the cache.
pub struct AuthEnv {
    pub cookies: Rc<dyn CookieStore>,
    pub storage: Rc<dyn KeyValueStore>,
    pub navigator: Rc<dyn Navigator>,
}

/// Handed to the OTP step after a reset request, whatever the backend said.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OtpStep {
    pub email: String,
}

/// Reset token from a reset-page query string, preferring `resetToken`.
#[must_use]
pub fn reset_token_from_query(search: &str) -> Option<String> {
    query_param(search, RESET_TOKEN_PARAM)
        .filter(|t| !t.is_empty())
        .or_else(|| query_param(search, LEGACY_TOKEN_PARAM).filter(|t| !t.is_empty()))
}

pub struct AuthFlow {
    backend: Rc<dyn AuthBackend>,
    session: SessionCache,
    env: AuthEnv,
    login_path: String,
    home_path: String,
}

impl AuthFlow {
    pub fn new(backend: Rc<dyn AuthBackend>, session: SessionCache, env: AuthEnv, config: &ClientConfig) -> Self {
        Self {
            backend,
            session,
            env,
            login_path: config.login_path.clone(),
            home_path: config.home_path.clone(),
        }
    }

    #[must_use]
    pub fn session(&self) -> &SessionCache {
        &self.session
    }

    fn go(&self, target: &NavTarget) {
        self.env.navigator.navigate(target);
    }

    fn go_to_login(&self) {
        self.go(&NavTarget::new(self.login_path.as_str()));
    }

    fn return_target(&self, return_url: Option<&str>) -> NavTarget {
        NavTarget::new(safe_return_url(return_url, &self.home_path))
    }

    /// Sign in, then go to `return_url` when it is internal, else home.
    ///
    /// On failure nothing local changes and the error is returned.
    pub async fn login(&self, request: &LoginRequest, return_url: Option<&str>) -> Result<(), ApiError> {
        if let Err(e) = self.backend.login(request).await {
            tracing::warn!(error = %e, "login failed");
            return Err(e);
        }
        self.session.invalidate();
        set_remember_me(self.env.storage.as_ref(), request.remember_me);
        tracing::info!(remember_me = request.remember_me, "signed in");
        self.go(&self.return_target(return_url));
        Ok(())
    }

    /// Skip the login form for a remembered, still valid session.
    ///
    /// Returns whether it navigated away.
    pub async fn resume_remembered_session(&self, return_url: Option<&str>) -> bool {
        if !remember_me(self.env.storage.as_ref()) {
            return false;
        }
        if !self.session.is_authenticated().await {
            tracing::debug!("remembered session no longer valid");
            return false;
        }
        self.go(&self.return_target(return_url));
        true
    }

    fn clear_local_session(&self) {
        clear_auth_cookies(self.env.cookies.as_ref());
        self.session.invalidate();
        set_remember_me(self.env.storage.as_ref(), false);
    }

    /// Sign out. Local cleanup and the move to login happen even when the
    /// backend call fails.
    pub async fn logout(&self) {
        self.clear_local_session();
        match self.backend.logout().await {
            Ok(()) => tracing::info!("signed out"),
            Err(e) => {
                tracing::warn!(error = %e, "logout call failed; local session cleared anyway");
                self.clear_local_session();
            }
        }
        self.go_to_login();
    }

    /// Create an account with a normalized email, then go to login.
    pub async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        let request = RegisterRequest { email: normalize_email(&request.email), ..request.clone() };
        self.backend.register(&request).await.inspect_err(|e| tracing::warn!(error = %e, "registration failed"))?;
        tracing::info!("registered");
        self.go_to_login();
        Ok(())
    }

    /// Ask for a reset code. The OTP step follows whether or not the call
    /// succeeded, so the page never reveals which emails have accounts.
    pub async fn request_password_reset(&self, email: &str) -> OtpStep {
        let email = normalize_email(email);
        if let Err(e) = self.backend.request_password_reset(&email).await {
            tracing::warn!(error = %e, "password reset request failed");
        }
        OtpStep { email }
    }

    /// Check the emailed code, then go to the reset page with the issued token.
    pub async fn verify_otp(&self, step: &OtpStep, otp: &str) -> Result<OtpVerification, ApiError> {
        let request = OtpRequest { email: step.email.clone(), otp: otp.to_owned() };
        let response = self.backend.verify_otp(&request).await?;
        let verification =
            response.data.ok_or_else(|| ApiError::Decode("verify-otp response carried no data".into()))?;
        self.go(&NavTarget::new(RESET_PASSWORD_PATH).with_query(RESET_TOKEN_PARAM, verification.reset_token.as_str()));
        Ok(verification)
    }

    /// Validate a token from a reset link, then go to the reset page with it.
    pub async fn validate_reset_token(&self, token: Option<&str>) -> Result<(), ApiError> {
        let token = token.filter(|t| !t.is_empty()).ok_or(ApiError::MissingResetToken)?;
        self.backend.validate_reset_token(token).await?;
        self.go(&NavTarget::new(RESET_PASSWORD_PATH).with_query(LEGACY_TOKEN_PARAM, token));
        Ok(())
    }

    /// Set a new password with the token from the reset page, then go to
    /// login.
    pub async fn reset_password(&self, token: Option<&str>, password: &str, confirm: &str) -> Result<(), ApiError> {
        let token = token.filter(|t| !t.is_empty()).ok_or(ApiError::MissingResetToken)?;
        let request = ResetPasswordRequest {
            reset_token: token.to_owned(),
            password: password.to_owned(),
            confirm_password: confirm.to_owned(),
        };
        self.backend.reset_password(&request).await?;
        tracing::info!("password reset");
        self.go_to_login();
        Ok(())
    }
}
