//! `salesorder/SalesOrders`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::Entity;
use crate::types::{exact_date, null_as_default};

/// Sales order header. Keyed by `OrderID`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesOrder {
    #[serde(rename = "OrderID")]
    pub order_id: Uuid,
    #[serde(rename = "AmountDC", default, deserialize_with = "null_as_default")]
    pub amount_dc: f64,
    #[serde(rename = "AmountDiscount", default, deserialize_with = "null_as_default")]
    pub amount_discount: f64,
    #[serde(rename = "AmountFC", default, deserialize_with = "null_as_default")]
    pub amount_fc: f64,
    #[serde(rename = "Created", default, with = "exact_date")]
    pub created: Option<DateTime<Utc>>,
    #[serde(rename = "Creator", default)]
    pub creator: Option<Uuid>,
    #[serde(rename = "CreatorFullName", default)]
    pub creator_full_name: Option<String>,
    #[serde(rename = "Currency", default)]
    pub currency: Option<String>,
    #[serde(rename = "DeliverTo", default)]
    pub deliver_to: Option<Uuid>,
    #[serde(rename = "DeliverToName", default)]
    pub deliver_to_name: Option<String>,
    #[serde(rename = "DeliveryDate", default, with = "exact_date")]
    pub delivery_date: Option<DateTime<Utc>>,
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
    #[serde(rename = "OrderDate", default, with = "exact_date")]
    pub order_date: Option<DateTime<Utc>>,
    #[serde(rename = "OrderedBy", default)]
    pub ordered_by: Option<Uuid>,
    #[serde(rename = "OrderedByName", default)]
    pub ordered_by_name: Option<String>,
    #[serde(rename = "OrderNumber", default, deserialize_with = "null_as_default")]
    pub order_number: i32,
    #[serde(rename = "PaymentCondition", default)]
    pub payment_condition: Option<String>,
    #[serde(rename = "Remarks", default)]
    pub remarks: Option<String>,
    #[serde(rename = "SalesPerson", default)]
    pub sales_person: Option<Uuid>,
    #[serde(rename = "SalesPersonFullName", default)]
    pub sales_person_full_name: Option<String>,
    #[serde(rename = "Status", default)]
    pub status: Option<i16>,
    #[serde(rename = "StatusDescription", default)]
    pub status_description: Option<String>,
    #[serde(rename = "YourRef", default)]
    pub your_ref: Option<String>,
}

impl Entity for SalesOrder {
    const RESOURCE: &'static str = "salesorder/SalesOrders";
    const FIELDS: &'static [&'static str] = &[
        "OrderID",
        "AmountDC",
        "AmountDiscount",
        "AmountFC",
        "Created",
        "Creator",
        "CreatorFullName",
        "Currency",
        "DeliverTo",
        "DeliverToName",
        "DeliveryDate",
        "Description",
        "Division",
        "Modified",
        "Modifier",
        "ModifierFullName",
        "OrderDate",
        "OrderedBy",
        "OrderedByName",
        "OrderNumber",
        "PaymentCondition",
        "Remarks",
        "SalesPerson",
        "SalesPersonFullName",
        "Status",
        "StatusDescription",
        "YourRef",
    ];
    type Update = SalesOrderUpdate;
}

/// Writable sales order header fields. Unset fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SalesOrderUpdate {
    #[serde(rename = "Currency", skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(rename = "DeliverTo", skip_serializing_if = "Option::is_none")]
    pub deliver_to: Option<Uuid>,
    #[serde(
        rename = "DeliveryDate",
        skip_serializing_if = "Option::is_none",
        serialize_with = "exact_date::serialize"
    )]
    pub delivery_date: Option<DateTime<Utc>>,
    #[serde(rename = "Description", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        rename = "OrderDate",
        skip_serializing_if = "Option::is_none",
        serialize_with = "exact_date::serialize"
    )]
    pub order_date: Option<DateTime<Utc>>,
    #[serde(rename = "OrderedBy", skip_serializing_if = "Option::is_none")]
    pub ordered_by: Option<Uuid>,
    #[serde(rename = "PaymentCondition", skip_serializing_if = "Option::is_none")]
    pub payment_condition: Option<String>,
    #[serde(rename = "Remarks", skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    #[serde(rename = "SalesPerson", skip_serializing_if = "Option::is_none")]
    pub sales_person: Option<Uuid>,
    #[serde(rename = "YourRef", skip_serializing_if = "Option::is_none")]
    pub your_ref: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_update_dates_use_exact_encoding() {
        let payload = SalesOrderUpdate {
            order_date: Some(Utc.timestamp_millis_opt(1_700_000_000_000).unwrap()),
            your_ref: Some("PO-1".to_string()),
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_value(payload).unwrap(),
            serde_json::json!({"OrderDate": "/Date(1700000000000)/", "YourRef": "PO-1"})
        );
    }
}
