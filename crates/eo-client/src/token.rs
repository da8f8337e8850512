//! Bearer credential supply.
//!
//! The client does not know how tokens are obtained. It asks a
//! [`TokenProvider`] before every request; implementations may refresh over
//! the network and must be safe to call concurrently.

use async_trait::async_trait;

use crate::error::{Error, ErrorKind, Result};

/// Source of bearer tokens for API requests.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Return a currently valid access token.
    async fn access_token(&self) -> Result<String>;
}

/// A fixed access token, e.g. one obtained out of band.
#[derive(Clone)]
pub struct StaticToken {
    token: String,
}

impl std::fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticToken")
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl StaticToken {
    /// Always hand out `token`.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Read the token from `EXACT_ACCESS_TOKEN`.
    pub fn from_env() -> Result<Self> {
        std::env::var("EXACT_ACCESS_TOKEN")
            .map(Self::new)
            .map_err(|_| {
                Error::new(ErrorKind::Config(
                    "EXACT_ACCESS_TOKEN is not set".to_string(),
                ))
            })
    }
}

#[async_trait]
impl TokenProvider for StaticToken {
    async fn access_token(&self) -> Result<String> {
        if self.token.is_empty() {
            return Err(Error::new(ErrorKind::Authentication(
                "empty access token".to_string(),
            )));
        }
        Ok(self.token.clone())
    }
}
