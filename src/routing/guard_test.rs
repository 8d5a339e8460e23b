use std::rc::Rc;

use super::*;
use crate::net::api::AuthBackend;
use crate::net::types::Role;
use crate::test_helpers::{FakeBackend, MeOutcome};

fn guards_for(backend: &Rc<FakeBackend>) -> RouteGuards {
    let session = SessionCache::new(Rc::clone(backend) as Rc<dyn AuthBackend>);
    RouteGuards::new(session, &ClientConfig::default())
}

// =============================================================================
// login_redirect
// =============================================================================

#[test]
fn login_redirect_carries_internal_return_url() {
    let target = login_redirect("/auth/login", "/original/path");
    assert_eq!(target.path, "/auth/login");
    assert_eq!(target.query_value("returnUrl"), Some("/original/path"));
}

#[test]
fn login_redirect_drops_protocol_relative_target() {
    let target = login_redirect("/auth/login", "//evil.com");
    assert_eq!(target, NavTarget::new("/auth/login"));
}

#[test]
fn login_redirect_drops_absolute_url() {
    let target = login_redirect("/auth/login", "https://evil.com/steal");
    assert!(target.query.is_empty());
}

// =============================================================================
// Auth guard
// =============================================================================

#[tokio::test]
async fn auth_guard_allows_signed_in_user() {
    let backend = Rc::new(FakeBackend::signed_in(Role::User));
    let guards = guards_for(&backend);
    assert_eq!(guards.check_authenticated("/dashboard").await, GuardDecision::Allow);
}

#[tokio::test]
async fn auth_guard_redirects_with_return_url() {
    let backend = Rc::new(FakeBackend::signed_out());
    let guards = guards_for(&backend);

    let decision = guards.check_authenticated("/original/path").await;
    let GuardDecision::Redirect(target) = decision else {
        panic!("expected redirect");
    };
    assert_eq!(target.href(), "/auth/login?returnUrl=%2Foriginal%2Fpath");
}

#[tokio::test]
async fn auth_guard_fails_closed_on_network_error() {
    let backend = Rc::new(FakeBackend::new(&[MeOutcome::NetworkError]));
    let guards = guards_for(&backend);
    assert!(!guards.check_authenticated("/lines").await.is_allowed());
}

// =============================================================================
// Admin guard
// =============================================================================

#[tokio::test]
async fn admin_guard_redirects_non_admin_home() {
    let backend = Rc::new(FakeBackend::signed_in(Role::User));
    let guards = guards_for(&backend);
    assert_eq!(guards.check_admin().await, GuardDecision::Redirect(NavTarget::new("/")));
}

#[tokio::test]
async fn admin_guard_allows_admin() {
    let backend = Rc::new(FakeBackend::signed_in(Role::Admin));
    let guards = guards_for(&backend);
    assert_eq!(guards.check_admin().await, GuardDecision::Allow);
}

#[tokio::test]
async fn admin_guard_redirects_home_on_upstream_error() {
    let backend = Rc::new(FakeBackend::new(&[MeOutcome::NetworkError]));
    let guards = guards_for(&backend);
    assert_eq!(guards.check_admin().await, GuardDecision::Redirect(NavTarget::new("/")));
}

// =============================================================================
// evaluate
// =============================================================================

#[tokio::test]
async fn public_routes_never_fetch() {
    let backend = Rc::new(FakeBackend::signed_out());
    let guards = guards_for(&backend);
    assert_eq!(guards.evaluate(Access::Public, "/models").await, GuardDecision::Allow);
    assert_eq!(backend.me_calls.get(), 0);
}

#[tokio::test]
async fn admin_route_short_circuits_on_auth_redirect() {
    let backend = Rc::new(FakeBackend::signed_out());
    let guards = guards_for(&backend);

    let decision = guards.evaluate(Access::Admin, "/dashboard").await;
    let GuardDecision::Redirect(target) = decision else {
        panic!("expected redirect");
    };
    assert_eq!(target.path, "/auth/login");
    assert_eq!(target.query_value("returnUrl"), Some("/dashboard"));
}

#[tokio::test]
async fn admin_route_runs_both_guards_on_one_fetch() {
    let backend = Rc::new(FakeBackend::signed_in(Role::Admin));
    let guards = guards_for(&backend);
    assert_eq!(guards.evaluate(Access::Admin, "/add-product").await, GuardDecision::Allow);
    assert_eq!(backend.me_calls.get(), 1);
}

#[tokio::test]
async fn admin_route_sends_plain_user_home() {
    let backend = Rc::new(FakeBackend::signed_in(Role::User));
    let guards = guards_for(&backend);
    assert_eq!(guards.evaluate(Access::Admin, "/dashboard").await, GuardDecision::Redirect(NavTarget::new("/")));
}

#[tokio::test]
async fn authenticated_route_skips_admin_check() {
    let backend = Rc::new(FakeBackend::signed_in(Role::User));
    let guards = guards_for(&backend);
    assert_eq!(guards.evaluate(Access::Authenticated, "/account").await, GuardDecision::Allow);
}
