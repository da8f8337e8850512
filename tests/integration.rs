//! End-to-end tests of the `ExactOnline` facade against a mock server.
//!
//!   cargo test --test integration

#[path = "integration/common.rs"]
mod common;
#[path = "integration/resources.rs"]
mod resources;
#[cfg(feature = "auth")]
#[path = "integration/auth.rs"]
mod auth;
