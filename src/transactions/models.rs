use sea_orm::prelude::{DateTimeUtc, Uuid};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::EntryType;

#[derive(Debug, Default, Deserialize)]
pub struct GetTransactionsQueryParams {
    /// `YYYY-MM`
    pub month: Option<String>,
    /// `income` or `expense`. Any other value is ignored.
    #[serde(rename = "type")]
    pub entry_type: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GetSummaryQueryParams {
    /// `YYYY-MM`, the current month when absent
    pub month: Option<String>,
}

///
/// Body of transaction create and update requests.
/// Fields stay loose here so each rule can report its own message.
///
#[derive(Debug, Default, Deserialize)]
pub struct TransactionRequestModel {
    pub description: Option<Value>,
    /// A JSON number or numeric string
    pub amount: Option<Value>,
    #[serde(rename = "type")]
    pub entry_type: Option<Value>,
    /// Category name, or `"Category > Subcategory"`
    pub category: Option<String>,
    pub subcategory: Option<String>,
}

///
/// A transaction as shown to clients, with its category links
/// resolved to a display name
///
#[derive(Debug, Serialize, Deserialize)]
pub struct TransactionModel {
    pub id: Uuid,
    pub description: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub category: String,
    pub created_at: DateTimeUtc,
}

///
/// Income and expense totals for one month
///
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SummaryModel {
    pub month: String,
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
    pub transaction_count: u64,
}
