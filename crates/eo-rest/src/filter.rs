//! `$filter` predicates.
//!
//! A [`Filter`] renders to `field operator value`, e.g.
//! `Modified gt datetime'2024-01-31T00:00:00'`. Several filters are joined
//! with ` AND ` by the [`QueryBuilder`](crate::QueryBuilder).
//!
//! Operators are not checked against the field's type; the server rejects
//! nonsensical combinations.

use std::fmt;

use chrono::{DateTime, Utc};
use exact_online_client::security::odata;
use uuid::Uuid;

/// OData comparison operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
    /// Any other operator token, passed through as written.
    Other(String),
}

impl Operator {
    /// Operator as written in `$filter`.
    pub fn as_str(&self) -> &str {
        match self {
            Operator::Eq => "eq",
            Operator::Ne => "ne",
            Operator::Gt => "gt",
            Operator::Ge => "ge",
            Operator::Lt => "lt",
            Operator::Le => "le",
            Operator::Other(op) => op,
        }
    }
}

impl From<&str> for Operator {
    fn from(op: &str) -> Self {
        match op {
            "eq" => Operator::Eq,
            "ne" => Operator::Ne,
            "gt" => Operator::Gt,
            "ge" => Operator::Ge,
            "lt" => Operator::Lt,
            "le" => Operator::Le,
            other => Operator::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Right-hand side of a predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    /// Rendered as `datetime'YYYY-MM-DDTHH:MM:SS'`.
    Date(DateTime<Utc>),
    /// Rendered as `guid'...'`.
    Guid(Uuid),
    /// Rendered as a quoted string literal with `'` doubled.
    Text(String),
    /// Rendered as written: numbers, booleans, `null`.
    Raw(String),
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Date(value) => f.write_str(&odata::datetime_literal(value)),
            FilterValue::Guid(id) => f.write_str(&odata::guid_literal(id)),
            FilterValue::Text(text) => f.write_str(&odata::string_literal(text)),
            FilterValue::Raw(raw) => f.write_str(raw),
        }
    }
}

impl From<DateTime<Utc>> for FilterValue {
    fn from(value: DateTime<Utc>) -> Self {
        FilterValue::Date(value)
    }
}

impl From<Uuid> for FilterValue {
    fn from(value: Uuid) -> Self {
        FilterValue::Guid(value)
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Raw(value.to_string())
    }
}

impl From<i32> for FilterValue {
    fn from(value: i32) -> Self {
        FilterValue::Raw(value.to_string())
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Raw(value.to_string())
    }
}

/// A single `field operator value` predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    field: String,
    operator: Operator,
    value: FilterValue,
}

impl Filter {
    /// Create a predicate.
    pub fn new(
        field: impl Into<String>,
        operator: impl Into<Operator>,
        value: impl Into<FilterValue>,
    ) -> Self {
        Self {
            field: field.into(),
            operator: operator.into(),
            value: value.into(),
        }
    }

    /// Date comparison, e.g. `Filter::date("Modified", Operator::Gt, since)`.
    pub fn date(field: impl Into<String>, operator: Operator, value: DateTime<Utc>) -> Self {
        Self::new(field, operator, FilterValue::Date(value))
    }

    /// `field eq value`.
    pub fn eq(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::new(field, Operator::Eq, value)
    }

    /// `Modified gt <since>`.
    pub fn modified_after(since: DateTime<Utc>) -> Self {
        Self::date("Modified", Operator::Gt, since)
    }

    /// `Created lt <before>`.
    pub fn created_before(before: DateTime<Utc>) -> Self {
        Self::date("Created", Operator::Lt, before)
    }

    /// Property the predicate tests.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Comparison operator.
    pub fn operator(&self) -> &Operator {
        &self.operator
    }

    /// Right-hand side, already in OData literal form when displayed.
    pub fn value(&self) -> &FilterValue {
        &self.value
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.field, self.operator, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_date_filter() {
        let since = Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap();
        assert_eq!(
            Filter::modified_after(since).to_string(),
            "Modified gt datetime'2024-03-01T08:30:00'"
        );
        assert_eq!(
            Filter::created_before(since).to_string(),
            "Created lt datetime'2024-03-01T08:30:00'"
        );
    }

    #[test]
    fn test_value_rendering() {
        assert_eq!(Filter::eq("Code", "O'Neil").to_string(), "Code eq 'O''Neil'");
        assert_eq!(Filter::new("Status", "ne", 21).to_string(), "Status ne 21");
        assert_eq!(
            Filter::eq("Creator", Uuid::nil()).to_string(),
            "Creator eq guid'00000000-0000-0000-0000-000000000000'"
        );
        assert_eq!(
            Filter::new("IsBlocked", Operator::Eq, true).to_string(),
            "IsBlocked eq true"
        );
    }

    #[test]
    fn test_unknown_operator_passes_through() {
        let filter = Filter::new("Code", "startswith", FilterValue::Raw("x".to_string()));
        assert_eq!(filter.operator(), &Operator::Other("startswith".to_string()));
        assert_eq!(filter.to_string(), "Code startswith x");
    }
}
