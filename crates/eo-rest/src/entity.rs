//! Resource descriptors.

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};

use crate::error::Result;
use crate::filter::Filter;
use crate::query_builder::QueryBuilder;

/// A collection exposed by the Exact Online REST API.
///
/// `FIELDS` lists the properties requested through `$select`, in the order
/// they are declared on the entity struct. It must name exactly the keys the
/// struct (de)serializes.
pub trait Entity: DeserializeOwned + Send + Sync + 'static {
    /// Path below the division root, e.g. `subscription/SubscriptionTypes`.
    const RESOURCE: &'static str;

    /// Properties to `$select`.
    const FIELDS: &'static [&'static str];

    /// Payload for create and update; absent fields are not sent.
    type Update: Serialize + Send + Sync;
}

/// Options for listing a collection.
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    /// Only records modified after this instant (`Modified gt ...`).
    pub modified_after: Option<DateTime<Utc>>,
    /// Only records created before this instant (`Created lt ...`).
    pub created_before: Option<DateTime<Utc>>,
    /// Additional predicates, applied after the two above.
    pub filters: Vec<Filter>,
}

impl ListParams {
    /// No filters: the whole collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Only records modified after `since`.
    pub fn modified_after(mut self, since: DateTime<Utc>) -> Self {
        self.modified_after = Some(since);
        self
    }

    /// Only records created before `before`.
    pub fn created_before(mut self, before: DateTime<Utc>) -> Self {
        self.created_before = Some(before);
        self
    }

    /// Add a predicate, ANDed with the others.
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Predicates in the order they go into `$filter`.
    pub fn to_filters(&self) -> Vec<Filter> {
        let mut filters = Vec::with_capacity(self.filters.len() + 2);
        if let Some(since) = self.modified_after {
            filters.push(Filter::modified_after(since));
        }
        if let Some(before) = self.created_before {
            filters.push(Filter::created_before(before));
        }
        filters.extend(self.filters.iter().cloned());
        filters
    }
}

/// Initial collection path of `E`, filtered by `params`.
pub fn list_path<E: Entity>(params: &ListParams) -> Result<String> {
    Ok(QueryBuilder::new(E::RESOURCE)?
        .select(E::FIELDS)?
        .filters(params.to_filters())?
        .build())
}

/// `$count` path of `E`, optionally limited to records created before
/// `created_before`.
pub fn count_path<E: Entity>(created_before: Option<DateTime<Utc>>) -> Result<String> {
    Ok(QueryBuilder::new(E::RESOURCE)?
        .filters(created_before.map(Filter::created_before))?
        .build_count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Widget;

    impl Entity for Widget {
        const RESOURCE: &'static str = "test/Widgets";
        const FIELDS: &'static [&'static str] = &["ID", "Code"];
        type Update = serde_json::Value;
    }

    #[test]
    fn test_list_path_is_deterministic() {
        let params = ListParams::new();
        let first = list_path::<Widget>(&params).unwrap();
        let second = list_path::<Widget>(&params).unwrap();
        assert_eq!(first, "test/Widgets?$select=ID,Code");
        assert_eq!(first, second);
    }

    #[test]
    fn test_list_params_filter_order() {
        let since = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let before = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let params = ListParams::new()
            .filter(Filter::eq("Code", "A"))
            .created_before(before)
            .modified_after(since);

        let rendered: Vec<String> = params.to_filters().iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec![
                "Modified gt datetime'2024-01-01T00:00:00'",
                "Created lt datetime'2024-06-01T00:00:00'",
                "Code eq 'A'",
            ]
        );
    }

    #[test]
    fn test_count_path() {
        assert_eq!(count_path::<Widget>(None).unwrap(), "test/Widgets/$count");
        let before = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        assert_eq!(
            count_path::<Widget>(Some(before)).unwrap(),
            "test/Widgets/$count?$filter=Created%20lt%20datetime%272024-06-01T00%3A00%3A00%27"
        );
    }
}
