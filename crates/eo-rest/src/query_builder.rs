//! Collection URL builder.
//!
//! Produces the relative path of a collection query:
//!
//! ```text
//! {resource}?$select={field},{field},...&$filter={predicate} AND {predicate}
//! ```
//!
//! Field and resource names are validated; the `$filter` expression is
//! percent-encoded as one query value.
//!
//! # Example
//!
//! ```rust,ignore
//! use exact_online_rest::{Filter, QueryBuilder};
//!
//! let path = QueryBuilder::new("subscription/SubscriptionTypes")?
//!     .select(&["ID", "Code", "Description"])?
//!     .filter(Filter::modified_after(since))
//!     .build();
//! ```

use exact_online_client::security::{odata, url};

use crate::error::{Error, ErrorKind, Result};
use crate::filter::Filter;

/// Builder for collection query paths.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    resource: String,
    fields: Vec<String>,
    filters: Vec<Filter>,
}

impl QueryBuilder {
    /// Create a builder for a resource path such as `budget/Budgets`.
    pub fn new(resource: impl AsRef<str>) -> Result<Self> {
        let resource = resource.as_ref();

        if !odata::is_safe_resource_path(resource) {
            return Err(Error::new(ErrorKind::InvalidField(format!(
                "invalid resource path: {resource}"
            ))));
        }

        Ok(Self {
            resource: resource.to_string(),
            fields: Vec::new(),
            filters: Vec::new(),
        })
    }

    /// Add fields to `$select`, in order.
    pub fn select(mut self, fields: &[impl AsRef<str>]) -> Result<Self> {
        for field in fields {
            let field = field.as_ref();
            if !odata::is_safe_field_name(field) {
                return Err(Error::new(ErrorKind::InvalidField(field.to_string())));
            }
            self.fields.push(field.to_string());
        }
        Ok(self)
    }

    /// Add a predicate. Predicates keep the order in which they are added.
    pub fn filter(mut self, filter: Filter) -> Result<Self> {
        if !odata::is_safe_field_name(filter.field()) {
            return Err(Error::new(ErrorKind::InvalidField(
                filter.field().to_string(),
            )));
        }
        self.filters.push(filter);
        Ok(self)
    }

    /// Add several predicates.
    pub fn filters(self, filters: impl IntoIterator<Item = Filter>) -> Result<Self> {
        filters.into_iter().try_fold(self, QueryBuilder::filter)
    }

    /// The `$filter` expression, unencoded. `None` without predicates.
    pub fn filter_expression(&self) -> Option<String> {
        if self.filters.is_empty() {
            return None;
        }

        Some(
            self.filters
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" AND "),
        )
    }

    /// Build the collection path.
    pub fn build(&self) -> String {
        let mut params = Vec::new();

        if !self.fields.is_empty() {
            params.push(format!("$select={}", self.fields.join(",")));
        }

        if let Some(expression) = self.filter_expression() {
            params.push(format!("$filter={}", url::encode_param(&expression)));
        }

        if params.is_empty() {
            self.resource.clone()
        } else {
            format!("{}?{}", self.resource, params.join("&"))
        }
    }

    /// Build the `$count` path. `$select` does not apply to counts.
    pub fn build_count(&self) -> String {
        match self.filter_expression() {
            Some(expression) => format!(
                "{}/$count?$filter={}",
                self.resource,
                url::encode_param(&expression)
            ),
            None => format!("{}/$count", self.resource),
        }
    }
}
