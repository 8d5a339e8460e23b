//! Application state shared across pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! `session` answers who is signed in (and caches that answer); `listing`
//! holds paging state for the admin consoles.

pub mod listing;
pub mod session;
