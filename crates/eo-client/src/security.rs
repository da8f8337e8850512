//! Literal escaping and path validation for Exact Online OData requests.
//!
//! ## OData literals
//!
//! Values placed in a `$filter` expression must be rendered as OData
//! literals. Strings double their single quotes, GUIDs and dates use the
//! typed literal syntax:
//!
//! ```rust
//! use exact_online_client::security::odata;
//!
//! assert_eq!(odata::string_literal("O'Brien"), "'O''Brien'");
//!
//! let id = uuid::Uuid::nil();
//! assert_eq!(
//!     odata::guid_literal(&id),
//!     "guid'00000000-0000-0000-0000-000000000000'"
//! );
//! ```
//!
//! ## Entity paths
//!
//! Single-entity URLs embed the key as a GUID literal:
//!
//! ```rust
//! use exact_online_client::security::url;
//!
//! let id = uuid::Uuid::nil();
//! assert_eq!(
//!     url::entity_path("budget/Budgets", &id).as_deref(),
//!     Some("budget/Budgets(guid'00000000-0000-0000-0000-000000000000')")
//! );
//! assert_eq!(url::entity_path("budget/../Budgets", &id), None);
//! ```

/// OData literal rendering.
pub mod odata {
    use chrono::{DateTime, Utc};
    use uuid::Uuid;

    /// Date-literal layout accepted by Exact Online.
    pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

    /// Escape a string for use inside an OData string literal.
    ///
    /// OData escapes a single quote by doubling it.
    #[must_use]
    pub fn escape_string(value: &str) -> String {
        value.replace('\'', "''")
    }

    /// Render a quoted OData string literal.
    #[must_use]
    pub fn string_literal(value: &str) -> String {
        format!("'{}'", escape_string(value))
    }

    /// Render a GUID literal: `guid'xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx'`.
    #[must_use]
    pub fn guid_literal(id: &Uuid) -> String {
        format!("guid'{}'", id.hyphenated())
    }

    /// Render a date-time literal: `datetime'2024-01-31T13:45:00'`.
    #[must_use]
    pub fn datetime_literal(value: &DateTime<Utc>) -> String {
        format!("datetime'{}'", value.format(DATETIME_FORMAT))
    }

    /// Validate that a field name contains only safe characters.
    ///
    /// Exact Online property names start with a letter and contain only
    /// ASCII letters, digits and underscores.
    #[must_use]
    pub fn is_safe_field_name(name: &str) -> bool {
        let mut chars = name.chars();
        match chars.next() {
            Some(first) if first.is_ascii_alphabetic() => {}
            _ => return false,
        }
        chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
    }

    /// Validate a resource path such as `subscription/SubscriptionTypes`.
    #[must_use]
    pub fn is_safe_resource_path(path: &str) -> bool {
        !path.is_empty() && path.split('/').all(is_safe_field_name)
    }
}

/// URL encoding utilities for parameter safety.
pub mod url {
    use uuid::Uuid;

    use super::odata;

    /// URL-encode a query parameter value.
    #[must_use]
    pub fn encode_param(value: &str) -> String {
        urlencoding::encode(value).into_owned()
    }

    /// Build the key-addressed path of a single entity.
    ///
    /// Returns `None` when the resource path is not a plain sequence of
    /// identifiers.
    #[must_use]
    pub fn entity_path(resource: &str, id: &Uuid) -> Option<String> {
        if !odata::is_safe_resource_path(resource) {
            return None;
        }
        Some(format!("{}({})", resource, odata::guid_literal(id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod odata_tests {
        use super::odata::*;
        use chrono::{TimeZone, Utc};
        use uuid::Uuid;

        #[test]
        fn test_escape_string() {
            assert_eq!(escape_string("hello"), "hello");
            assert_eq!(escape_string("O'Brien"), "O''Brien");
            assert_eq!(escape_string("' or 1 eq 1 or ''='"), "'' or 1 eq 1 or ''''=''");
        }

        #[test]
        fn test_literals() {
            assert_eq!(string_literal("it's"), "'it''s'");

            let id = Uuid::parse_str("7C9F4B4E-1D2A-4E8B-9C3D-0123456789AB").unwrap();
            assert_eq!(
                guid_literal(&id),
                "guid'7c9f4b4e-1d2a-4e8b-9c3d-0123456789ab'"
            );

            let date = Utc.with_ymd_and_hms(2024, 1, 31, 13, 45, 7).unwrap();
            assert_eq!(datetime_literal(&date), "datetime'2024-01-31T13:45:07'");
        }

        #[test]
        fn test_is_safe_field_name() {
            assert!(is_safe_field_name("ID"));
            assert!(is_safe_field_name("CreatorFullName"));
            assert!(is_safe_field_name("GLAccount_Code"));

            assert!(!is_safe_field_name(""));
            assert!(!is_safe_field_name("1Field"));
            assert!(!is_safe_field_name("Field Name"));
            assert!(!is_safe_field_name("Code,ID"));
            assert!(!is_safe_field_name("Code'"));
        }

        #[test]
        fn test_is_safe_resource_path() {
            assert!(is_safe_resource_path("salesorder/SalesOrders"));
            assert!(is_safe_resource_path("Budgets"));
            assert!(!is_safe_resource_path(""));
            assert!(!is_safe_resource_path("budget//Budgets"));
            assert!(!is_safe_resource_path("../Budgets"));
            assert!(!is_safe_resource_path("Budgets?$top=1"));
        }
    }

    mod url_tests {
        use super::url::*;
        use uuid::Uuid;

        #[test]
        fn test_encode_param() {
            assert_eq!(encode_param("simple"), "simple");
            assert_eq!(encode_param("has space"), "has%20space");
            assert_eq!(encode_param("guid'x'"), "guid%27x%27");
        }

        #[test]
        fn test_entity_path_embeds_guid_once() {
            let id = Uuid::parse_str("11111111-2222-3333-4444-555555555555").unwrap();
            let path = entity_path("subscription/SubscriptionTypes", &id).unwrap();
            assert_eq!(
                path,
                "subscription/SubscriptionTypes(guid'11111111-2222-3333-4444-555555555555')"
            );
            assert_eq!(path.matches("11111111-2222-3333-4444-555555555555").count(), 1);
        }
    }
}
