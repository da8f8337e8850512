//! # exact-online-client
//!
//! Core HTTP client infrastructure for the Exact Online REST API.
//!
//! This crate provides the foundational client with:
//! - Bearer token injection through a pluggable [`TokenProvider`]
//! - OData v2 envelope decoding (`d.results` / `d.__next`)
//! - Compression support (gzip, deflate)
//! - Rate limit header parsing
//! - Connection pooling
//! - Request/response tracing
//!
//! Requests are sent exactly once. Retrying, throttling and backoff are
//! left to the caller; [`Error::is_retryable`] and [`Error::retry_after`]
//! carry what is needed to decide.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Application Layer                        │
//! │  (exact-online-rest resource clients)                       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      ExactClient                            │
//! │  - Holds division config + token provider                   │
//! │  - Typed OData methods (get, post, put, delete, count)      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      EoHttpClient                           │
//! │  - Raw HTTP with compression and rate limit reporting       │
//! │  - Response error mapping                                   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use exact_online_client::{ExactClient, ExactConfig, Page, StaticToken};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), exact_online_client::Error> {
//!     let config = ExactConfig::from_env()?;
//!     let client = ExactClient::new(config, Arc::new(StaticToken::from_env()?))?;
//!
//!     let page: Page<serde_json::Value> = client
//!         .get("subscription/SubscriptionTypes?$select=ID,Code")
//!         .await?;
//!     println!("{} records, more: {}", page.items.len(), page.next.is_some());
//!
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod exact_client;
mod request;
mod response;
pub mod security;
mod token;

pub use client::EoHttpClient;
pub use config::{ClientConfig, ClientConfigBuilder, ExactConfig, Region};
pub use error::{Error, ErrorKind, Result};
pub use exact_client::{ExactClient, Page};
pub use request::{RequestBuilder, RequestMethod};
pub use response::{RateLimitInfo, RateLimitWindow, Response, ResponseExt};
pub use token::{StaticToken, TokenProvider};

/// REST API version segment of the service root.
pub const API_VERSION: &str = "v1";

/// User-Agent string for the client
pub const USER_AGENT: &str = concat!("exact-online-api/", env!("CARGO_PKG_VERSION"));
