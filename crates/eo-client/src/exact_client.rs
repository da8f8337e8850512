//! High-level Exact Online client with typed HTTP methods.
//!
//! `ExactClient` combines a [`TokenProvider`] with the HTTP transport and
//! speaks the OData v2 "verbose JSON" dialect Exact Online serves:
//! collections arrive as `{"d": {"results": [...], "__next": "..."}}` and
//! single entities as `{"d": {...}}`.
//!
//! ## Security
//!
//! - The token provider is never printed in Debug output
//! - Request bodies are skipped in tracing spans

use std::sync::Arc;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::instrument;

use crate::client::EoHttpClient;
use crate::config::{ClientConfig, ExactConfig};
use crate::error::{Error, ErrorKind, Result};
use crate::request::RequestBuilder;
use crate::token::TokenProvider;

/// Exact Online API client.
///
/// Cheap to clone; clones share the transport and the token provider, so
/// one instance can serve any number of concurrent calls.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use exact_online_client::{ExactClient, ExactConfig, StaticToken};
///
/// let client = ExactClient::new(ExactConfig::new(123456), Arc::new(StaticToken::new(token)))?;
///
/// let page: Page<serde_json::Value> = client
///     .get("subscription/SubscriptionTypes?$select=ID,Code")
///     .await?;
/// ```
#[derive(Clone)]
pub struct ExactClient {
    http: EoHttpClient,
    config: ExactConfig,
    tokens: Arc<dyn TokenProvider>,
}

impl std::fmt::Debug for ExactClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExactClient")
            .field("config", &self.config)
            .field("tokens", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl ExactClient {
    /// Create a new client for the configured division.
    pub fn new(config: ExactConfig, tokens: Arc<dyn TokenProvider>) -> Result<Self> {
        Self::with_http_config(config, tokens, ClientConfig::default())
    }

    /// Create a new client with custom transport configuration.
    pub fn with_http_config(
        config: ExactConfig,
        tokens: Arc<dyn TokenProvider>,
        http_config: ClientConfig,
    ) -> Result<Self> {
        let http = EoHttpClient::new(http_config)?;
        Ok(Self {
            http,
            config,
            tokens,
        })
    }

    /// Get the environment configuration.
    pub fn config(&self) -> &ExactConfig {
        &self.config
    }

    /// Get the division number.
    pub fn division(&self) -> i32 {
        self.config.division()
    }

    /// REST service root: `{base}/api/v1/{division}`.
    pub fn service_root(&self) -> String {
        self.config.service_root()
    }

    /// Build the full URL for a path.
    ///
    /// Relative paths are resolved against the service root. Absolute URLs
    /// (such as `__next` links) are returned unchanged, but only when they
    /// point at the configured host; the bearer token is never sent
    /// anywhere else.
    pub fn url(&self, path: &str) -> Result<String> {
        if !(path.starts_with("http://") || path.starts_with("https://")) {
            return Ok(format!(
                "{}/{}",
                self.config.service_root(),
                path.trim_start_matches('/')
            ));
        }

        let link = url::Url::parse(path)?;
        let base = url::Url::parse(self.config.base_url())?;
        if link.origin() != base.origin() {
            return Err(Error::new(ErrorKind::InvalidUrl(format!(
                "link to {} does not match {}",
                link.origin().ascii_serialization(),
                base.origin().ascii_serialization()
            ))));
        }

        Ok(path.to_string())
    }

    /// Attach the current bearer token and ask for JSON.
    async fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        let token = self
            .tokens
            .access_token()
            .await
            .map_err(|e| e.at_url(request.url()))?;
        Ok(request.bearer_auth(token).accept_json())
    }

    /// GET one page of a collection.
    ///
    /// Returns the decoded items together with the continuation link, which
    /// is `None` on the last page.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<Page<T>> {
        let full_url = self.url(url)?;
        let request = self.authorize(self.http.get(&full_url)).await?;
        let response = self.http.execute(request).await?;
        let envelope: Envelope<Collection<T>> = response.json().await?;

        Ok(Page {
            items: envelope.d.results,
            next: envelope.d.next.filter(|next| !next.is_empty()),
        })
    }

    /// GET a single entity.
    ///
    /// Exact Online answers key lookups either with the entity itself or
    /// with a one-element collection; both shapes are accepted. An empty
    /// collection yields `None`.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn get_entity<T: DeserializeOwned>(&self, url: &str) -> Result<Option<T>> {
        let full_url = self.url(url)?;
        let request = self.authorize(self.http.get(&full_url)).await?;
        let response = self.http.execute(request).await?;
        let envelope: Envelope<Body<T>> = response.json().await?;

        Ok(match envelope.d {
            Body::Collection(collection) => collection.results.into_iter().next(),
            Body::Single(entity) => Some(entity),
        })
    }

    /// POST a JSON body and decode the created entity.
    #[instrument(skip(self, body), fields(url = %url))]
    pub async fn post<B: Serialize, T: DeserializeOwned>(&self, url: &str, body: &B) -> Result<T> {
        let full_url = self.url(url)?;
        let request = self
            .authorize(self.http.post(&full_url).json(body).map_err(|e| e.at_url(&full_url))?)
            .await?;
        let response = self.http.execute(request).await?;
        let envelope: Envelope<T> = response.json().await?;
        Ok(envelope.d)
    }

    /// PUT a JSON body. Exact Online answers 204 without a body.
    #[instrument(skip(self, body), fields(url = %url))]
    pub async fn put<B: Serialize>(&self, url: &str, body: &B) -> Result<()> {
        let full_url = self.url(url)?;
        let request = self
            .authorize(self.http.put(&full_url).json(body).map_err(|e| e.at_url(&full_url))?)
            .await?;
        self.http.execute(request).await?;
        Ok(())
    }

    /// DELETE a resource.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn delete(&self, url: &str) -> Result<()> {
        let full_url = self.url(url)?;
        let request = self.authorize(self.http.delete(&full_url)).await?;
        self.http.execute(request).await?;
        Ok(())
    }

    /// GET a `$count` endpoint, which answers with a bare integer.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn count(&self, url: &str) -> Result<i64> {
        let full_url = self.url(url)?;
        let request = self.authorize(self.http.get(&full_url)).await?;
        let response = self.http.execute(request).await?;
        let body = response.text().await?;

        body.trim().parse::<i64>().map_err(|e| {
            Error::with_source(
                ErrorKind::Json(format!(
                    "expected an integer count, got {:?}",
                    crate::response::sanitize_error_message(body.trim())
                )),
                e,
            )
            .at_url(full_url)
        })
    }
}

/// One page of a collection query.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Decoded records of this page.
    pub items: Vec<T>,
    /// Continuation link; `None` on the last page.
    pub next: Option<String>,
}

/// Top-level `{"d": ...}` wrapper.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    d: T,
}

#[derive(Debug, Deserialize)]
struct Collection<T> {
    results: Vec<T>,
    #[serde(rename = "__next", default)]
    next: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Body<T> {
    Collection(Collection<T>),
    Single(T),
}
