//! `financialtransaction/Transactions` and `financialtransaction/TransactionLines`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::Entity;
use crate::types::{exact_date, null_as_default};

/// Financial transaction header (journal entry). Keyed by `EntryID`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialTransaction {
    #[serde(rename = "EntryID")]
    pub entry_id: Uuid,
    #[serde(rename = "ClosingBalanceFC", default)]
    pub closing_balance_fc: Option<f64>,
    #[serde(rename = "Created", default, with = "exact_date")]
    pub created: Option<DateTime<Utc>>,
    #[serde(rename = "Date", default, with = "exact_date")]
    pub date: Option<DateTime<Utc>>,
    #[serde(rename = "Description", default)]
    pub description: Option<String>,
    #[serde(rename = "Division", default, deserialize_with = "null_as_default")]
    pub division: i32,
    #[serde(rename = "Document", default)]
    pub document: Option<Uuid>,
    #[serde(rename = "DocumentNumber", default)]
    pub document_number: Option<i32>,
    #[serde(rename = "DocumentSubject", default)]
    pub document_subject: Option<String>,
    #[serde(rename = "EntryNumber", default)]
    pub entry_number: Option<i32>,
    #[serde(rename = "ExternalLinkDescription", default)]
    pub external_link_description: Option<String>,
    #[serde(rename = "ExternalLinkReference", default)]
    pub external_link_reference: Option<String>,
    #[serde(rename = "FinancialPeriod", default)]
    pub financial_period: Option<i16>,
    #[serde(rename = "FinancialYear", default)]
    pub financial_year: Option<i16>,
    #[serde(rename = "JournalCode", default)]
    pub journal_code: Option<String>,
    #[serde(rename = "JournalDescription", default)]
    pub journal_description: Option<String>,
    #[serde(rename = "Modified", default, with = "exact_date")]
    pub modified: Option<DateTime<Utc>>,
    #[serde(rename = "OpeningBalanceFC", default)]
    pub opening_balance_fc: Option<f64>,
    #[serde(rename = "PaymentReference", default)]
    pub payment_reference: Option<String>,
    #[serde(rename = "Status", default)]
    pub status: Option<i16>,
    #[serde(rename = "StatusDescription", default)]
    pub status_description: Option<String>,
    #[serde(rename = "Type", default)]
    pub transaction_type: Option<i32>,
    #[serde(rename = "TypeDescription", default)]
    pub type_description: Option<String>,
}

impl Entity for FinancialTransaction {
    const RESOURCE: &'static str = "financialtransaction/Transactions";
    const FIELDS: &'static [&'static str] = &[
        "EntryID",
        "ClosingBalanceFC",
        "Created",
        "Date",
        "Description",
        "Division",
        "Document",
        "DocumentNumber",
        "DocumentSubject",
        "EntryNumber",
        "ExternalLinkDescription",
        "ExternalLinkReference",
        "FinancialPeriod",
        "FinancialYear",
        "JournalCode",
        "JournalDescription",
        "Modified",
        "OpeningBalanceFC",
        "PaymentReference",
        "Status",
        "StatusDescription",
        "Type",
        "TypeDescription",
    ];
    type Update = FinancialTransactionUpdate;
}

/// Writable transaction header fields. Unset fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FinancialTransactionUpdate {
    #[serde(
        rename = "Date",
        skip_serializing_if = "Option::is_none",
        serialize_with = "exact_date::serialize"
    )]
    pub date: Option<DateTime<Utc>>,
    #[serde(rename = "Description", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "Document", skip_serializing_if = "Option::is_none")]
    pub document: Option<Uuid>,
    #[serde(rename = "FinancialPeriod", skip_serializing_if = "Option::is_none")]
    pub financial_period: Option<i16>,
    #[serde(rename = "FinancialYear", skip_serializing_if = "Option::is_none")]
    pub financial_year: Option<i16>,
    #[serde(rename = "JournalCode", skip_serializing_if = "Option::is_none")]
    pub journal_code: Option<String>,
    #[serde(rename = "PaymentReference", skip_serializing_if = "Option::is_none")]
    pub payment_reference: Option<String>,
}

/// One line of a financial transaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionLine {
    #[serde(rename = "ID")]
    pub id: Uuid,
    #[serde(rename = "Account", default)]
    pub account: Option<Uuid>,
    #[serde(rename = "AccountCode", default)]
    pub account_code: Option<String>,
    #[serde(rename = "AccountName", default)]
    pub account_name: Option<String>,
    #[serde(rename = "AmountDC", default, deserialize_with = "null_as_default")]
    pub amount_dc: f64,
    #[serde(rename = "AmountFC", default)]
    pub amount_fc: Option<f64>,
    #[serde(rename = "AmountVATDC", default)]
    pub amount_vat_dc: Option<f64>,
    #[serde(rename = "AmountVATFC", default)]
    pub amount_vat_fc: Option<f64>,
    #[serde(rename = "Created", default, with = "exact_date")]
    pub created: Option<DateTime<Utc>>,
    #[serde(rename = "Creator", default)]
    pub creator: Option<Uuid>,
    #[serde(rename = "CreatorFullName", default)]
    pub creator_full_name: Option<String>,
    #[serde(rename = "Currency", default)]
    pub currency: Option<String>,
    #[serde(rename = "Date", default, with = "exact_date")]
    pub date: Option<DateTime<Utc>>,
    #[serde(rename = "Description", default)]
    pub description: Option<String>,
    #[serde(rename = "Division", default, deserialize_with = "null_as_default")]
    pub division: i32,
    #[serde(rename = "EntryID", default)]
    pub entry_id: Option<Uuid>,
    #[serde(rename = "EntryNumber", default)]
    pub entry_number: Option<i32>,
    #[serde(rename = "FinancialPeriod", default)]
    pub financial_period: Option<i16>,
    #[serde(rename = "FinancialYear", default)]
    pub financial_year: Option<i16>,
    #[serde(rename = "GLAccount", default)]
    pub gl_account: Option<Uuid>,
    #[serde(rename = "GLAccountCode", default)]
    pub gl_account_code: Option<String>,
    #[serde(rename = "GLAccountDescription", default)]
    pub gl_account_description: Option<String>,
    #[serde(rename = "InvoiceNumber", default)]
    pub invoice_number: Option<i32>,
    #[serde(rename = "JournalCode", default)]
    pub journal_code: Option<String>,
    #[serde(rename = "LineNumber", default)]
    pub line_number: Option<i32>,
    #[serde(rename = "Modified", default, with = "exact_date")]
    pub modified: Option<DateTime<Utc>>,
    #[serde(rename = "Modifier", default)]
    pub modifier: Option<Uuid>,
    #[serde(rename = "ModifierFullName", default)]
    pub modifier_full_name: Option<String>,
    #[serde(rename = "Notes", default)]
    pub notes: Option<String>,
    #[serde(rename = "Status", default)]
    pub status: Option<i16>,
    #[serde(rename = "YourRef", default)]
    pub your_ref: Option<String>,
}

impl Entity for TransactionLine {
    const RESOURCE: &'static str = "financialtransaction/TransactionLines";
    const FIELDS: &'static [&'static str] = &[
        "ID",
        "Account",
        "AccountCode",
        "AccountName",
        "AmountDC",
        "AmountFC",
        "AmountVATDC",
        "AmountVATFC",
        "Created",
        "Creator",
        "CreatorFullName",
        "Currency",
        "Date",
        "Description",
        "Division",
        "EntryID",
        "EntryNumber",
        "FinancialPeriod",
        "FinancialYear",
        "GLAccount",
        "GLAccountCode",
        "GLAccountDescription",
        "InvoiceNumber",
        "JournalCode",
        "LineNumber",
        "Modified",
        "Modifier",
        "ModifierFullName",
        "Notes",
        "Status",
        "YourRef",
    ];
    type Update = TransactionLineUpdate;
}

/// Writable transaction line fields. Unset fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransactionLineUpdate {
    #[serde(rename = "Account", skip_serializing_if = "Option::is_none")]
    pub account: Option<Uuid>,
    #[serde(rename = "AmountDC", skip_serializing_if = "Option::is_none")]
    pub amount_dc: Option<f64>,
    #[serde(rename = "AmountFC", skip_serializing_if = "Option::is_none")]
    pub amount_fc: Option<f64>,
    #[serde(
        rename = "Date",
        skip_serializing_if = "Option::is_none",
        serialize_with = "exact_date::serialize"
    )]
    pub date: Option<DateTime<Utc>>,
    #[serde(rename = "Description", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "GLAccount", skip_serializing_if = "Option::is_none")]
    pub gl_account: Option<Uuid>,
    #[serde(rename = "Notes", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "YourRef", skip_serializing_if = "Option::is_none")]
    pub your_ref: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_line() {
        let json = r#"{
            "ID": "11111111-2222-3333-4444-555555555555",
            "AmountDC": -121.0,
            "AmountVATDC": -21.0,
            "Date": "/Date(1704067200000)/",
            "Division": 42,
            "EntryID": "66666666-7777-8888-9999-000000000000",
            "GLAccountCode": "8000",
            "JournalCode": "70",
            "LineNumber": 2
        }"#;

        let line: TransactionLine = serde_json::from_str(json).unwrap();
        assert_eq!(line.amount_dc, -121.0);
        assert_eq!(line.gl_account_code.as_deref(), Some("8000"));
        assert_eq!(line.line_number, Some(2));
        assert!(line.date.is_some());
        assert!(line.entry_id.is_some());
        assert_eq!(line.created, None);
    }

    #[test]
    fn test_update_payload() {
        let payload = TransactionLineUpdate {
            description: Some("Correction".to_string()),
            amount_dc: Some(10.0),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(payload).unwrap(),
            serde_json::json!({"AmountDC": 10.0, "Description": "Correction"})
        );
    }
}
