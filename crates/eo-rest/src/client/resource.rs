use std::marker::PhantomData;

use chrono::{DateTime, Utc};
use exact_online_client::security::url::entity_path;
use exact_online_client::ExactClient;
use tracing::instrument;
use uuid::Uuid;

use crate::call::PaginatedCall;
use crate::entity::{count_path, list_path, Entity, ListParams};
use crate::error::{Error, ErrorKind, Result};

/// Operations on one entity collection.
///
/// Reads go through a [`PaginatedCall`]; mutations call the HTTP client
/// directly.
pub struct ResourceClient<E> {
    client: ExactClient,
    _marker: PhantomData<fn() -> E>,
}

impl<E> Clone for ResourceClient<E> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            _marker: PhantomData,
        }
    }
}

impl<E: Entity> std::fmt::Debug for ResourceClient<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceClient")
            .field("resource", &E::RESOURCE)
            .finish_non_exhaustive()
    }
}

impl<E: Entity> ResourceClient<E> {
    /// Resource client over a shared HTTP client.
    pub fn new(client: ExactClient) -> Self {
        Self {
            client,
            _marker: PhantomData,
        }
    }

    fn key_path(id: &Uuid) -> Result<String> {
        entity_path(E::RESOURCE, id).ok_or_else(|| {
            Error::new(ErrorKind::InvalidField(format!(
                "invalid resource path: {}",
                E::RESOURCE
            )))
        })
    }

    /// Start a paginated read of the collection.
    ///
    /// No request is made until the call is driven.
    pub fn list(&self, params: &ListParams) -> Result<PaginatedCall<E>> {
        let path = list_path::<E>(params)?;
        Ok(PaginatedCall::new(self.client.clone(), path))
    }

    /// Read the whole collection.
    #[instrument(skip(self), fields(resource = E::RESOURCE))]
    pub async fn list_all(&self, params: &ListParams) -> Result<Vec<E>> {
        self.list(params)?.all().await
    }

    /// Fetch one entity by key. `None` if the server returns no record.
    #[instrument(skip(self), fields(resource = E::RESOURCE))]
    pub async fn get(&self, id: &Uuid) -> Result<Option<E>> {
        let path = format!("{}?$select={}", Self::key_path(id)?, E::FIELDS.join(","));
        Ok(self.client.get_entity(&path).await?)
    }

    /// Create an entity and return it as stored by the server.
    #[instrument(skip(self, payload), fields(resource = E::RESOURCE))]
    pub async fn create(&self, payload: &E::Update) -> Result<E> {
        Ok(self.client.post(E::RESOURCE, payload).await?)
    }

    /// Update the fields present in `payload`.
    #[instrument(skip(self, payload), fields(resource = E::RESOURCE))]
    pub async fn update(&self, id: &Uuid, payload: &E::Update) -> Result<()> {
        let path = Self::key_path(id)?;
        Ok(self.client.put(&path, payload).await?)
    }

    /// Delete an entity.
    #[instrument(skip(self), fields(resource = E::RESOURCE))]
    pub async fn delete(&self, id: &Uuid) -> Result<()> {
        let path = Self::key_path(id)?;
        Ok(self.client.delete(&path).await?)
    }

    /// Count records, optionally only those created before `created_before`.
    #[instrument(skip(self), fields(resource = E::RESOURCE))]
    pub async fn count(&self, created_before: Option<DateTime<Utc>>) -> Result<i64> {
        let path = count_path::<E>(created_before)?;
        Ok(self.client.count(&path).await?)
    }
}
