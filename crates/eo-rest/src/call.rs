//! Paginated collection reads.
//!
//! A [`PaginatedCall`] holds the URL of the next page. Each
//! [`next_page`](PaginatedCall::next_page) fetches exactly one page and
//! advances the cursor to the server's `__next` link, or marks the call
//! exhausted when there is none. An exhausted call never issues another
//! request.

use std::marker::PhantomData;

use exact_online_client::{ExactClient, Page};
use futures::stream::{self, Stream, TryStreamExt};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Cursor {
    Active(String),
    Exhausted,
}

/// Cursor over the pages of a collection query.
///
/// Owned by one caller at a time; the methods take `&mut self`.
pub struct PaginatedCall<T> {
    client: ExactClient,
    cursor: Cursor,
    _marker: PhantomData<fn() -> T>,
}

impl<T> std::fmt::Debug for PaginatedCall<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginatedCall")
            .field("cursor", &self.cursor)
            .finish_non_exhaustive()
    }
}

impl<T: DeserializeOwned> PaginatedCall<T> {
    /// Start a call at `url`, relative to the service root or absolute.
    pub fn new(client: ExactClient, url: impl Into<String>) -> Self {
        let url = url.into();
        let cursor = if url.is_empty() {
            Cursor::Exhausted
        } else {
            Cursor::Active(url)
        };

        Self {
            client,
            cursor,
            _marker: PhantomData,
        }
    }

    /// URL the next [`next_page`](Self::next_page) will fetch.
    pub fn next_url(&self) -> Option<&str> {
        match &self.cursor {
            Cursor::Active(url) => Some(url),
            Cursor::Exhausted => None,
        }
    }

    /// Returns true once the last page has been read.
    pub fn is_exhausted(&self) -> bool {
        self.cursor == Cursor::Exhausted
    }

    /// Fetch the next page.
    ///
    /// Returns an empty vector without a request once exhausted. On error
    /// the cursor is left where it was.
    #[instrument(skip(self), fields(url = ?self.next_url()))]
    pub async fn next_page(&mut self) -> Result<Vec<T>> {
        let Cursor::Active(url) = &self.cursor else {
            return Ok(Vec::new());
        };

        let Page { items, next } = self.client.get::<T>(url).await?;

        debug!(records = items.len(), more = next.is_some(), "Fetched page");

        self.cursor = match next {
            Some(next) => Cursor::Active(next),
            None => Cursor::Exhausted,
        };

        Ok(items)
    }

    /// Read every remaining page.
    ///
    /// Stops at exhaustion or at the first empty page. Either every record
    /// is returned or, on the first failing page, only the error.
    #[instrument(skip(self), fields(url = ?self.next_url()))]
    pub async fn all(&mut self) -> Result<Vec<T>> {
        let mut records = Vec::new();
        let mut pages = 0usize;

        while !self.is_exhausted() {
            let page = self.next_page().await?;
            if page.is_empty() {
                break;
            }
            pages += 1;
            records.extend(page);
        }

        debug!(pages, records = records.len(), "Drained paginated call");
        Ok(records)
    }

    /// Turn the call into a stream of records, fetching pages lazily.
    ///
    /// The stream ends at exhaustion or an empty page and yields at most
    /// one error.
    pub fn into_stream(self) -> impl Stream<Item = Result<T>> {
        stream::try_unfold(self, |mut call| async move {
            if call.is_exhausted() {
                return Ok::<_, Error>(None);
            }

            let page = call.next_page().await?;
            if page.is_empty() {
                return Ok(None);
            }

            Ok(Some((stream::iter(page.into_iter().map(Ok)), call)))
        })
        .try_flatten()
    }
}
