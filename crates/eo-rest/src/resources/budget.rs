//! `budget/Budgets`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::Entity;
use crate::types::{exact_date, null_as_default};

/// A budget line: an amount per G/L account and reporting period within a
/// budget scenario.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    #[serde(rename = "ID")]
    pub id: Uuid,
    #[serde(rename = "AmountDC", default, deserialize_with = "null_as_default")]
    pub amount_dc: f64,
    #[serde(rename = "BudgetScenario", default)]
    pub budget_scenario: Option<Uuid>,
    #[serde(rename = "BudgetScenarioCode", default)]
    pub budget_scenario_code: Option<String>,
    #[serde(rename = "BudgetScenarioDescription", default)]
    pub budget_scenario_description: Option<String>,
    #[serde(rename = "Costcenter", default)]
    pub costcenter: Option<String>,
    #[serde(rename = "CostcenterDescription", default)]
    pub costcenter_description: Option<String>,
    #[serde(rename = "Costunit", default)]
    pub costunit: Option<String>,
    #[serde(rename = "CostunitDescription", default)]
    pub costunit_description: Option<String>,
    #[serde(rename = "Created", default, with = "exact_date")]
    pub created: Option<DateTime<Utc>>,
    #[serde(rename = "Creator", default)]
    pub creator: Option<Uuid>,
    #[serde(rename = "CreatorFullName", default)]
    pub creator_full_name: Option<String>,
    #[serde(rename = "Division", default, deserialize_with = "null_as_default")]
    pub division: i32,
    #[serde(rename = "GLAccount", default)]
    pub gl_account: Option<Uuid>,
    #[serde(rename = "GLAccountCode", default)]
    pub gl_account_code: Option<String>,
    #[serde(rename = "GLAccountDescription", default)]
    pub gl_account_description: Option<String>,
    #[serde(rename = "HID", default)]
    pub hid: Option<i64>,
    #[serde(rename = "Item", default)]
    pub item: Option<Uuid>,
    #[serde(rename = "ItemCode", default)]
    pub item_code: Option<String>,
    #[serde(rename = "ItemDescription", default)]
    pub item_description: Option<String>,
    #[serde(rename = "Modified", default, with = "exact_date")]
    pub modified: Option<DateTime<Utc>>,
    #[serde(rename = "Modifier", default)]
    pub modifier: Option<Uuid>,
    #[serde(rename = "ModifierFullName", default)]
    pub modifier_full_name: Option<String>,
    #[serde(rename = "ReportingPeriod", default)]
    pub reporting_period: Option<i16>,
    #[serde(rename = "ReportingYear", default)]
    pub reporting_year: Option<i16>,
}

impl Entity for Budget {
    const RESOURCE: &'static str = "budget/Budgets";
    const FIELDS: &'static [&'static str] = &[
        "ID",
        "AmountDC",
        "BudgetScenario",
        "BudgetScenarioCode",
        "BudgetScenarioDescription",
        "Costcenter",
        "CostcenterDescription",
        "Costunit",
        "CostunitDescription",
        "Created",
        "Creator",
        "CreatorFullName",
        "Division",
        "GLAccount",
        "GLAccountCode",
        "GLAccountDescription",
        "HID",
        "Item",
        "ItemCode",
        "ItemDescription",
        "Modified",
        "Modifier",
        "ModifierFullName",
        "ReportingPeriod",
        "ReportingYear",
    ];
    type Update = BudgetUpdate;
}

/// Writable budget fields. Unset fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BudgetUpdate {
    #[serde(rename = "AmountDC", skip_serializing_if = "Option::is_none")]
    pub amount_dc: Option<f64>,
    #[serde(rename = "BudgetScenario", skip_serializing_if = "Option::is_none")]
    pub budget_scenario: Option<Uuid>,
    #[serde(rename = "Costcenter", skip_serializing_if = "Option::is_none")]
    pub costcenter: Option<String>,
    #[serde(rename = "Costunit", skip_serializing_if = "Option::is_none")]
    pub costunit: Option<String>,
    #[serde(rename = "GLAccount", skip_serializing_if = "Option::is_none")]
    pub gl_account: Option<Uuid>,
    #[serde(rename = "Item", skip_serializing_if = "Option::is_none")]
    pub item: Option<Uuid>,
    #[serde(rename = "ReportingPeriod", skip_serializing_if = "Option::is_none")]
    pub reporting_period: Option<i16>,
    #[serde(rename = "ReportingYear", skip_serializing_if = "Option::is_none")]
    pub reporting_year: Option<i16>,
}
