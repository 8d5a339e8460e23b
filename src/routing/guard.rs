//! Pre-navigation guards.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every guarded navigation asks the [`SessionCache`] and either lets the
//! route render or redirects. The auth guard runs first; the admin guard
//! assumes it already passed.
//!
//! A decision is made once per navigation attempt and is terminal: there is
//! no retry. Upstream failures surface here as "signed out" because the
//! cache is fail-closed.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::config::ClientConfig;
use crate::routing::navigate::{NavTarget, is_internal_path};
use crate::state::session::SessionCache;

/// Query parameter carrying the page to return to after login.
pub const RETURN_URL_PARAM: &str = "returnUrl";

/// Who may enter a route.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Access {
    #[default]
    Public,
    Authenticated,
    Admin,
}

/// Outcome of one guard evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(NavTarget),
}

impl GuardDecision {
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Login target for a blocked navigation to `requested`.
///
/// The requested path rides along as `returnUrl` only when it is internal.
#[must_use]
pub fn login_redirect(login_path: &str, requested: &str) -> NavTarget {
    let target = NavTarget::new(login_path);
    if is_internal_path(requested) {
        target.with_query(RETURN_URL_PARAM, requested)
    } else {
        tracing::warn!(requested, "dropping non-internal return target");
        target
    }
}

/// The two ordered guards bound to a session cache.
#[derive(Clone)]
pub struct RouteGuards {
    session: SessionCache,
    login_path: String,
    home_path: String,
}

impl RouteGuards {
    pub fn new(session: SessionCache, config: &ClientConfig) -> Self {
        Self { session, login_path: config.login_path.clone(), home_path: config.home_path.clone() }
    }

    /// Allow signed-in users; send everyone else to login with a return target.
    pub async fn check_authenticated(&self, requested: &str) -> GuardDecision {
        if self.session.is_authenticated().await {
            GuardDecision::Allow
        } else {
            tracing::debug!(requested, "auth guard redirecting to login");
            GuardDecision::Redirect(login_redirect(&self.login_path, requested))
        }
    }

    /// Allow admins; send everyone else home.
    pub async fn check_admin(&self) -> GuardDecision {
        if self.session.is_admin().await {
            GuardDecision::Allow
        } else {
            tracing::debug!("admin guard redirecting home");
            GuardDecision::Redirect(NavTarget::new(self.home_path.as_str()))
        }
    }

    /// Run the guards a route with `access` needs, in order, stopping at the
    /// first redirect.
    pub async fn evaluate(&self, access: Access, requested: &str) -> GuardDecision {
        if access == Access::Public {
            return GuardDecision::Allow;
        }
        let decision = self.check_authenticated(requested).await;
        if access == Access::Authenticated || !decision.is_allowed() {
            return decision;
        }
        self.check_admin().await
    }
}
