//! Exact Online REST API client.
//!
//! [`ExactRestClient`] wraps `ExactClient` from `exact-online-client` and
//! hands out typed [`ResourceClient`]s, one per entity.

use std::sync::Arc;

use exact_online_client::{ClientConfig, ExactClient, ExactConfig, TokenProvider};

use crate::entity::Entity;
use crate::error::Result;

mod resource;

pub use resource::ResourceClient;

/// Exact Online REST API client.
///
/// # Example
///
/// ```rust,ignore
/// use exact_online_rest::{ExactRestClient, ListParams, SubscriptionType, SubscriptionTypeUpdate};
///
/// let client = ExactRestClient::new(ExactConfig::new(division), tokens)?;
/// let types = client.resource::<SubscriptionType>();
///
/// // Query
/// let all = types.list_all(ListParams::new().modified_after(since)).await?;
///
/// // Create
/// let created = types.create(&SubscriptionTypeUpdate::new().code("GOLD")).await?;
///
/// // Update
/// types.update(&created.id, &SubscriptionTypeUpdate::new().description("Gold")).await?;
///
/// // Delete
/// types.delete(&created.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ExactRestClient {
    client: ExactClient,
}

impl ExactRestClient {
    /// Create a new REST client for a division.
    pub fn new(config: ExactConfig, tokens: Arc<dyn TokenProvider>) -> Result<Self> {
        Ok(Self::from_client(ExactClient::new(config, tokens)?))
    }

    /// Create a new REST client with custom HTTP configuration.
    pub fn with_http_config(
        config: ExactConfig,
        tokens: Arc<dyn TokenProvider>,
        http_config: ClientConfig,
    ) -> Result<Self> {
        let client = ExactClient::with_http_config(config, tokens, http_config)?;
        Ok(Self::from_client(client))
    }

    /// Create a REST client from an existing ExactClient.
    pub fn from_client(client: ExactClient) -> Self {
        Self { client }
    }

    /// Get the underlying ExactClient.
    pub fn inner(&self) -> &ExactClient {
        &self.client
    }

    /// Get the division number.
    pub fn division(&self) -> i32 {
        self.client.division()
    }

    /// Typed client for one entity's collection.
    pub fn resource<E: Entity>(&self) -> ResourceClient<E> {
        ResourceClient::new(self.client.clone())
    }
}
