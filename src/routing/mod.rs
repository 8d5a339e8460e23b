//! Routing: navigation targets, guards and the route table.
//!
//! SYSTEM CONTEXT
//! ==============
//! `tree` says which access level a path needs, `guard` decides whether the
//! current session meets it, and `navigate` carries the resulting move.

pub mod guard;
pub mod navigate;
pub mod tree;

pub use guard::{Access, GuardDecision, RouteGuards};
pub use navigate::{NavTarget, Navigator};
