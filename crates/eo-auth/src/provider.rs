//! Token provider that renews access tokens on demand.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use crate::error::{Error, ErrorKind, Result};
use crate::oauth::OAuthClient;
use crate::storage::TokenStorage;
use crate::token::TokenSet;

/// Refresh this long before the access token expires.
pub const DEFAULT_REFRESH_THRESHOLD: Duration = Duration::from_secs(30);

/// Supplies access tokens, refreshing them through the OAuth client when
/// they are about to expire.
///
/// Callers serialize on an internal mutex, so concurrent requests trigger
/// at most one refresh. Every refreshed token set is written to the
/// storage before it is handed out.
pub struct RefreshingTokenProvider {
    oauth: OAuthClient,
    storage: Arc<dyn TokenStorage>,
    key: String,
    threshold: Duration,
    current: Mutex<Option<TokenSet>>,
}

impl std::fmt::Debug for RefreshingTokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshingTokenProvider")
            .field("oauth", &self.oauth)
            .field("key", &self.key)
            .field("threshold", &self.threshold)
            .finish_non_exhaustive()
    }
}

impl RefreshingTokenProvider {
    /// Create a provider that loads its first token set from `storage`
    /// under `key`.
    pub fn new(oauth: OAuthClient, storage: Arc<dyn TokenStorage>, key: impl Into<String>) -> Self {
        Self {
            oauth,
            storage,
            key: key.into(),
            threshold: DEFAULT_REFRESH_THRESHOLD,
            current: Mutex::new(None),
        }
    }

    /// Start from a known token set instead of the stored one.
    pub fn with_tokens(self, tokens: TokenSet) -> Self {
        Self {
            current: Mutex::new(Some(tokens)),
            ..self
        }
    }

    /// Set how long before expiry the token is renewed.
    pub fn with_threshold(mut self, threshold: Duration) -> Self {
        self.threshold = threshold;
        self
    }

    /// Storage key of this session.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Return a valid token set, refreshing it if needed.
    #[instrument(skip(self), fields(key = %self.key))]
    pub async fn tokens(&self) -> Result<TokenSet> {
        let mut current = self.current.lock().await;

        if current.is_none() {
            *current = self.storage.load(&self.key)?;
        }

        let tokens = current.as_ref().ok_or_else(|| {
            Error::new(ErrorKind::NotAuthenticated(format!(
                "no tokens stored under '{}'",
                self.key
            )))
        })?;

        if !tokens.is_expired(self.threshold) {
            return Ok(tokens.clone());
        }

        let refresh_token = tokens
            .refresh_token
            .clone()
            .ok_or_else(|| Error::new(ErrorKind::NoRefreshToken))?;

        info!("Access token expired, refreshing");
        let response = self.oauth.refresh_token(&refresh_token).await?;
        let fresh = TokenSet::from_response(response, Some(refresh_token));

        self.storage.save(&self.key, &fresh)?;
        debug!(expires_at = ?fresh.expires_at, "Stored refreshed tokens");

        *current = Some(fresh.clone());
        Ok(fresh)
    }

    /// Drop the cached tokens and remove them from storage.
    pub async fn logout(&self) -> Result<()> {
        let mut current = self.current.lock().await;
        *current = None;
        self.storage.delete(&self.key)
    }
}

#[async_trait]
impl exact_online_client::TokenProvider for RefreshingTokenProvider {
    async fn access_token(&self) -> exact_online_client::Result<String> {
        Ok(self.tokens().await?.access_token)
    }
}
