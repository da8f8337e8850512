//! `subscription/SubscriptionTypes`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::Entity;
use crate::types::{exact_date, null_as_default};

/// A subscription type as returned by Exact Online.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionType {
    #[serde(rename = "ID")]
    pub id: Uuid,
    #[serde(rename = "Code", default, deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(rename = "Created", default, with = "exact_date")]
    pub created: Option<DateTime<Utc>>,
    #[serde(rename = "Creator", default)]
    pub creator: Option<Uuid>,
    #[serde(rename = "CreatorFullName", default)]
    pub creator_full_name: Option<String>,
    #[serde(rename = "Description", default)]
    pub description: Option<String>,
    #[serde(rename = "Division", default, deserialize_with = "null_as_default")]
    pub division: i32,
    #[serde(rename = "Modified", default, with = "exact_date")]
    pub modified: Option<DateTime<Utc>>,
    #[serde(rename = "Modifier", default)]
    pub modifier: Option<Uuid>,
    #[serde(rename = "ModifierFullName", default)]
    pub modifier_full_name: Option<String>,
}

impl Entity for SubscriptionType {
    const RESOURCE: &'static str = "subscription/SubscriptionTypes";
    const FIELDS: &'static [&'static str] = &[
        "ID",
        "Code",
        "Created",
        "Creator",
        "CreatorFullName",
        "Description",
        "Division",
        "Modified",
        "Modifier",
        "ModifierFullName",
    ];
    type Update = SubscriptionTypeUpdate;
}

/// Writable subscription type fields. Unset fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SubscriptionTypeUpdate {
    #[serde(rename = "Code", skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(rename = "Description", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SubscriptionTypeUpdate {
    /// Empty payload; nothing is sent until a field is set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the subscription type code.
    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Set the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode() {
        let json = r#"{
            "__metadata": {"uri": "https://start.exactonline.nl/api/v1/1/subscription/SubscriptionTypes(guid'6c1d9e0c-6f5d-4c8e-9c43-0a3f0a0e9c11')", "type": "Exact.Web.Api.Models.SubscriptionType"},
            "ID": "6c1d9e0c-6f5d-4c8e-9c43-0a3f0a0e9c11",
            "Code": "GOLD",
            "Created": "/Date(1700000000000)/",
            "Creator": "00000000-0000-0000-0000-000000000001",
            "CreatorFullName": "Jan Jansen",
            "Description": null,
            "Division": 123456,
            "Modified": "/Date(1700000000000)/",
            "Modifier": null,
            "ModifierFullName": null
        }"#;

        let decoded: SubscriptionType = serde_json::from_str(json).unwrap();
        assert_eq!(decoded.code, "GOLD");
        assert_eq!(decoded.division, 123456);
        assert!(decoded.created.is_some());
        assert_eq!(decoded.description, None);
        assert_eq!(decoded.modifier, None);
    }

    #[test]
    fn test_update_sends_only_present_fields() {
        let payload = serde_json::to_value(SubscriptionTypeUpdate::new().description("Gold tier"))
            .unwrap();
        assert_eq!(payload, serde_json::json!({"Description": "Gold tier"}));

        let empty = serde_json::to_value(SubscriptionTypeUpdate::new()).unwrap();
        assert_eq!(empty, serde_json::json!({}));
    }
}
