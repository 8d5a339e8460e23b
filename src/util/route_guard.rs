//! Leptos glue for the route guards.
//!
//! SYSTEM CONTEXT
//! ==============
//! The app shell installs one guard effect over the current path. Each path
//! change starts a fresh evaluation against the route table; a decision that
//! arrives after the path moved on is dropped.

#[cfg(test)]
#[path = "route_guard_test.rs"]
mod route_guard_test;

use std::cell::Cell;
use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::NavigateOptions;

use crate::routing::guard::{GuardDecision, RouteGuards};
use crate::routing::navigate::{NavTarget, Navigator};
use crate::routing::tree::{RouteNode, access_for};

/// Guard progress for the current navigation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum GuardState {
    #[default]
    Pending,
    Allowed,
    Redirected(NavTarget),
}

impl From<GuardDecision> for GuardState {
    fn from(decision: GuardDecision) -> Self {
        match decision {
            GuardDecision::Allow => Self::Allowed,
            GuardDecision::Redirect(target) => Self::Redirected(target),
        }
    }
}

impl GuardState {
    /// Whether the guarded page may render.
    #[must_use]
    pub fn can_render(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// [`Navigator`] over the router's navigate function.
#[derive(Clone)]
pub struct RouterNavigator<F> {
    navigate: F,
}

impl<F> RouterNavigator<F>
where
    F: Fn(&str, NavigateOptions),
{
    pub fn new(navigate: F) -> Self {
        Self { navigate }
    }
}

impl<F> Navigator for RouterNavigator<F>
where
    F: Fn(&str, NavigateOptions),
{
    fn navigate(&self, target: &NavTarget) {
        (self.navigate)(&target.href(), NavigateOptions::default());
    }
}

/// Evaluate the guards for every path change and follow redirects.
///
/// Redirects replace the history entry so "back" does not return to the
/// blocked page.
pub fn install_route_guard<F>(
    guards: RouteGuards,
    routes: Rc<Vec<RouteNode>>,
    path: Signal<String>,
    navigate: F,
) -> RwSignal<GuardState>
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    let state = RwSignal::new(GuardState::Pending);
    let attempt = Rc::new(Cell::new(0_u64));

    Effect::new(move || {
        let requested = path.get();
        let access = access_for(&routes, &requested);
        let id = attempt.get() + 1;
        attempt.set(id);
        state.set(GuardState::Pending);

        let guards = guards.clone();
        let attempt = Rc::clone(&attempt);
        let navigate = navigate.clone();
        spawn_local(async move {
            let decision = guards.evaluate(access, &requested).await;
            if attempt.get() != id {
                tracing::debug!(requested = %requested, "dropping stale guard decision");
                return;
            }
            if let GuardDecision::Redirect(target) = &decision {
                navigate(&target.href(), NavigateOptions { replace: true, ..NavigateOptions::default() });
            }
            state.set(decision.into());
        });
    });

    state
}
