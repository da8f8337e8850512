//! Access/refresh token pairs.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, ErrorKind, Result};
use crate::oauth::TokenResponse;

/// An access token together with the refresh token that renews it.
///
/// Token values are redacted in Debug output.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSet {
    /// Bearer token sent with API requests.
    pub access_token: String,
    /// Refresh token; Exact Online rotates it on every refresh.
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// When the access token stops being accepted.
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl std::fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSet")
            .field("access_token", &"[REDACTED]")
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

impl TokenSet {
    /// Create a token set without expiry information.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: None,
            expires_at: None,
        }
    }

    /// Only a refresh token is known; the first use triggers a refresh.
    pub fn from_refresh_token(refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: String::new(),
            refresh_token: Some(refresh_token.into()),
            expires_at: None,
        }
    }

    /// Set the refresh token.
    pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
        self.refresh_token = Some(refresh_token.into());
        self
    }

    /// Set the expiry time.
    pub fn with_expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Build a token set from a token endpoint response received now.
    ///
    /// When the response carries no refresh token, `previous_refresh` is
    /// kept so the session can still be renewed.
    pub fn from_response(response: TokenResponse, previous_refresh: Option<String>) -> Self {
        let expires_at = response.expires_in.and_then(|secs| {
            let secs = i64::try_from(secs).unwrap_or(i64::MAX).min(i64::MAX / 1000);
            Utc::now().checked_add_signed(chrono::Duration::seconds(secs))
        });

        Self {
            access_token: response.access_token,
            refresh_token: response.refresh_token.or(previous_refresh),
            expires_at,
        }
    }

    /// Load tokens from environment variables.
    ///
    /// Reads `EXACT_ACCESS_TOKEN` and `EXACT_REFRESH_TOKEN`; at least one
    /// must be set.
    pub fn from_env() -> Result<Self> {
        let access = std::env::var("EXACT_ACCESS_TOKEN").ok();
        let refresh = std::env::var("EXACT_REFRESH_TOKEN").ok();

        match (access, refresh) {
            (Some(access), refresh) => Ok(Self {
                access_token: access,
                refresh_token: refresh,
                expires_at: None,
            }),
            (None, Some(refresh)) => Ok(Self::from_refresh_token(refresh)),
            (None, None) => Err(Error::new(ErrorKind::EnvVar(
                "EXACT_ACCESS_TOKEN or EXACT_REFRESH_TOKEN".to_string(),
            ))),
        }
    }

    /// Returns true if the access token is missing or expires within
    /// `threshold`.
    ///
    /// A token without a known expiry is treated as valid.
    pub fn is_expired(&self, threshold: Duration) -> bool {
        if self.access_token.is_empty() {
            return true;
        }

        match self.expires_at {
            Some(expires_at) => {
                let threshold =
                    chrono::Duration::from_std(threshold).unwrap_or_else(|_| chrono::Duration::MAX);
                Utc::now().checked_add_signed(threshold).is_none_or(|at| at >= expires_at)
            }
            None => false,
        }
    }
}
