//! # exact-online-api
//!
//! An Exact Online API client library for Rust.
//!
//! ## Security
//!
//! - Tokens and client secrets are redacted in Debug output
//! - Tracing skips credential parameters
//! - Error messages are sanitized of bearer tokens before they are stored
//!
//! ## Crates
//!
//! - **exact-online-client** - HTTP core: OData envelopes, error mapping, rate limit headers
//! - **exact-online-auth** - OAuth 2.0 code exchange, token refresh, token storage
//! - **exact-online-rest** - Typed resources, filters, paginated calls
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use exact_online_api::{ExactConfig, ExactOnline, ListParams, StaticToken};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let eo = ExactOnline::new(
//!         ExactConfig::from_env()?,
//!         Arc::new(StaticToken::from_env()?),
//!     )?;
//!
//!     for order in eo.sales_orders().list_all(&ListParams::new()).await? {
//!         println!("{} {:?}", order.order_number, order.description);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod exact_online;

// Re-export all crates for convenient access
#[cfg(feature = "auth")]
pub use exact_online_auth as auth;
pub use exact_online_client as client;
pub use exact_online_rest as rest;

pub use exact_online::ExactOnline;

// Re-export commonly used types at the top level
pub use exact_online_client::{ClientConfig, ExactConfig, Region, StaticToken, TokenProvider};
pub use exact_online_rest::{
    Budget, Entity, FinancialTransaction, ListParams, PaginatedCall, ResourceClient, SalesOrder,
    SubscriptionType, TransactionLine,
};
