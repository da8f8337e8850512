//! # exact-online-auth
//!
//! Authentication for the Exact Online REST API.
//!
//! ## Security
//!
//! - Tokens and client secrets are redacted in Debug output
//! - Tracing skips credential parameters
//! - Token files are written with `0600` permissions on Unix
//!
//! ## Supported Authentication Methods
//!
//! - **OAuth 2.0 Authorization Code** - interactive consent, then code exchange
//! - **OAuth 2.0 Refresh Token** - renewing the ten-minute access tokens
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use exact_online_auth::{FileTokenStorage, OAuthClient, OAuthConfig, RefreshingTokenProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), exact_online_auth::Error> {
//!     let oauth = OAuthClient::new(OAuthConfig::from_env()?, "https://start.exactonline.nl");
//!     let storage = Arc::new(FileTokenStorage::new()?);
//!
//!     // Refreshes through the token endpoint and writes the rotated
//!     // refresh token back to ~/.exact-online/tokens/default.json
//!     let provider = RefreshingTokenProvider::new(oauth, storage, "default");
//!     let tokens = provider.tokens().await?;
//!
//!     Ok(())
//! }
//! ```

mod error;
mod oauth;
mod provider;
mod storage;
mod token;

pub use error::{Error, ErrorKind, Result};
pub use oauth::{OAuthClient, OAuthConfig, TokenResponse};
pub use provider::{RefreshingTokenProvider, DEFAULT_REFRESH_THRESHOLD};
pub use storage::{default_token_dir, FileTokenStorage, MemoryTokenStorage, TokenStorage};
pub use token::TokenSet;
