//! OAuth 2.0 against the Exact Online authorization server.
//!
//! Exact Online supports the authorization code grant and refresh tokens:
//! - `{base}/api/oauth2/auth` - user authorization (browser redirect)
//! - `{base}/api/oauth2/token` - code exchange and refresh
//!
//! Access tokens are valid for ten minutes. Each refresh returns a new
//! refresh token and invalidates the old one.

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, instrument};

use crate::error::{Error, ErrorKind, Result};

/// OAuth 2.0 configuration for a registered Exact Online app.
///
/// `client_secret` is redacted in Debug output.
#[derive(Clone)]
pub struct OAuthConfig {
    /// Client ID of the app registration.
    pub client_id: String,
    client_secret: Option<String>,
    /// Redirect URI registered for the app.
    pub redirect_uri: Option<String>,
}

impl std::fmt::Debug for OAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("redirect_uri", &self.redirect_uri)
            .finish()
    }
}

impl OAuthConfig {
    /// Create a new OAuth config.
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: None,
            redirect_uri: None,
        }
    }

    /// Set the client secret.
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.client_secret = Some(secret.into());
        self
    }

    /// Set the redirect URI.
    pub fn with_redirect_uri(mut self, uri: impl Into<String>) -> Self {
        self.redirect_uri = Some(uri.into());
        self
    }

    /// Load the app registration from environment variables.
    ///
    /// Required: `EXACT_CLIENT_ID`.
    /// Optional: `EXACT_CLIENT_SECRET`, `EXACT_REDIRECT_URI`.
    pub fn from_env() -> Result<Self> {
        let client_id = std::env::var("EXACT_CLIENT_ID")
            .map_err(|_| Error::new(ErrorKind::EnvVar("EXACT_CLIENT_ID".to_string())))?;

        let mut config = Self::new(client_id);
        if let Ok(secret) = std::env::var("EXACT_CLIENT_SECRET") {
            config = config.with_secret(secret);
        }
        if let Ok(uri) = std::env::var("EXACT_REDIRECT_URI") {
            config = config.with_redirect_uri(uri);
        }
        Ok(config)
    }

    fn require_redirect_uri(&self) -> Result<&str> {
        self.redirect_uri.as_deref().ok_or_else(|| {
            Error::new(ErrorKind::Config(
                "redirect_uri is required for the authorization code flow".to_string(),
            ))
        })
    }
}

/// OAuth client bound to one Exact Online host.
#[derive(Clone)]
pub struct OAuthClient {
    config: OAuthConfig,
    base_url: String,
    http_client: reqwest::Client,
}

impl std::fmt::Debug for OAuthClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthClient")
            .field("config", &self.config)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl OAuthClient {
    /// Create a new OAuth client for the host at `base_url`
    /// (e.g. `https://start.exactonline.nl`).
    pub fn new(config: OAuthConfig, base_url: impl Into<String>) -> Self {
        Self {
            config,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Get the OAuth config.
    pub fn config(&self) -> &OAuthConfig {
        &self.config
    }

    /// URL of the token endpoint.
    pub fn token_url(&self) -> String {
        format!("{}/api/oauth2/token", self.base_url)
    }

    /// Generate the URL to send the user to for authorization.
    pub fn authorization_url(&self, state: Option<&str>) -> Result<String> {
        let redirect_uri = self.config.require_redirect_uri()?;

        let mut url = format!(
            "{}/api/oauth2/auth?client_id={}&redirect_uri={}&response_type=code",
            self.base_url,
            urlencoding::encode(&self.config.client_id),
            urlencoding::encode(redirect_uri),
        );

        if let Some(state) = state {
            url.push_str(&format!("&state={}", urlencoding::encode(state)));
        }

        Ok(url)
    }

    /// Exchange an authorization code for tokens.
    ///
    /// The code is not logged.
    #[instrument(skip(self, code))]
    pub async fn exchange_code(&self, code: &str) -> Result<TokenResponse> {
        let redirect_uri = self.config.require_redirect_uri()?;

        let mut params = vec![
            ("grant_type", "authorization_code"),
            ("code", code),
            ("client_id", self.config.client_id.as_str()),
            ("redirect_uri", redirect_uri),
        ];

        if let Some(ref secret) = self.config.client_secret {
            params.push(("client_secret", secret));
        }

        self.post_token_request(&params).await
    }

    /// Refresh an access token using a refresh token.
    ///
    /// The refresh token is not logged.
    #[instrument(skip(self, refresh_token))]
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<TokenResponse> {
        let mut params = vec![
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", self.config.client_id.as_str()),
        ];

        if let Some(ref secret) = self.config.client_secret {
            params.push(("client_secret", secret));
        }

        self.post_token_request(&params).await
    }

    async fn post_token_request(&self, params: &[(&str, &str)]) -> Result<TokenResponse> {
        let body = serde_urlencoded::to_string(params)?;

        debug!(url = %self.token_url(), "Requesting token");

        let response = self
            .http_client
            .post(self.token_url())
            .header("Content-Type", "application/x-www-form-urlencoded")
            .header("Accept", "application/json")
            .body(body)
            .send()
            .await?;

        self.handle_token_response(response).await
    }

    /// Handle a token response, checking for errors.
    async fn handle_token_response(&self, response: reqwest::Response) -> Result<TokenResponse> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(match serde_json::from_str::<OAuthErrorResponse>(&body) {
                Ok(error) => Error::new(ErrorKind::OAuth {
                    error: error.error,
                    description: error.error_description.unwrap_or_default(),
                }),
                Err(_) => Error::new(ErrorKind::OAuth {
                    error: format!("http_{}", status.as_u16()),
                    description: truncate(&body, 200),
                }),
            });
        }

        let token: TokenResponse = serde_json::from_str(&body)?;
        Ok(token)
    }
}

fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Token endpoint response.
///
/// Token values are redacted in Debug output.
#[derive(Clone, Deserialize, Serialize)]
pub struct TokenResponse {
    /// Access token.
    pub access_token: String,
    /// Refresh token.
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Token type (usually "bearer").
    #[serde(default)]
    pub token_type: Option<String>,
    /// Lifetime of the access token in seconds.
    ///
    /// Exact Online sends this as a string; numbers are accepted too.
    #[serde(default, deserialize_with = "deserialize_expires_in")]
    pub expires_in: Option<u64>,
}

impl std::fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenResponse")
            .field("access_token", &"[REDACTED]")
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

fn deserialize_expires_in<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(secs)) => Ok(Some(secs)),
        Some(Raw::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// OAuth error response.
#[derive(Debug, Deserialize)]
struct OAuthErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}
