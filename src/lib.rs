//! # showroom
//!
//! Client core for the vehicle showroom storefront and admin console.
//!
//! This crate holds the typed REST layer, the session authorization cache,
//! route guards and the route table, auth flows, cookie/storage
//! collaborators, and admin list state. It builds natively (CLI, tests) and
//! for the browser with the `hydrate` feature.

pub mod config;
pub mod error;
pub mod net;
pub mod routing;
pub mod services;
pub mod state;
pub mod util;

#[cfg(test)]
mod test_helpers;

pub use config::ClientConfig;
pub use error::ApiError;

/// Browser entry setup: panic hook and console logging.
///
/// `tracing` events fall through to the `log` facade when no subscriber is
/// installed, which `console_log` prints to the devtools console.
#[cfg(feature = "hydrate")]
pub fn init_browser_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
}
