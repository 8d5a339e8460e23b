//! Browser-facing helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Cookie and storage access sit behind small traits with in-memory
//! implementations, so the flows built on them run natively. `form` holds
//! the input rules and `route_guard` wires the guards into Leptos.

pub mod cookies;
pub mod form;
pub mod route_guard;
pub mod storage;
