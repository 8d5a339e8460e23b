//! Flows that coordinate the API with local session state.

pub mod auth;

pub use auth::{AuthEnv, AuthFlow};
