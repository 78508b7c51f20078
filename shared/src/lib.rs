use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A recognized bill or coin from the server-held reference catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Denomination {
    pub id: i64,
    /// Face value of the bill or coin
    pub value: f64,
}

/// One (denomination id, quantity) pair submitted when creating a statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DenominationDetail {
    pub denomination_id: i64,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStatementRequest {
    pub store_name: String,
    /// Visit date (YYYY-MM-DD)
    pub date: NaiveDate,
    /// Statement total as reported by the client
    pub total_amount: f64,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub denomination_details: Vec<DenominationDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStatementResponse {
    pub message: String,
    pub statement_id: i64,
}

/// One breakdown entry submitted on update, keyed by face value.
///
/// Shaped like [`BreakdownLine`] so a listed statement can be sent back as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DenominationEntry {
    pub value: f64,
    pub quantity: u32,
    /// Ignored by the server; line totals are always recomputed
    #[serde(default)]
    pub total: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatementRequest {
    pub store_name: String,
    pub date: NaiveDate,
    pub total_amount: f64,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub denominations: Vec<DenominationEntry>,
}

/// Statement header without its breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementHeader {
    pub id: i64,
    pub owner_id: i64,
    pub store_name: String,
    pub date: NaiveDate,
    pub total_amount: f64,
    pub notes: Option<String>,
}

/// One priced line of a statement's breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownLine {
    pub denomination_id: i64,
    pub value: f64,
    pub quantity: u32,
    pub total: f64,
}

/// A statement header with its breakdown lines nested underneath
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementView {
    pub id: i64,
    pub owner_id: i64,
    pub store_name: String,
    pub date: NaiveDate,
    pub total_amount: f64,
    pub notes: Option<String>,
    pub denominations: Vec<BreakdownLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteStatementResponse {
    pub message: String,
    pub statement: StatementHeader,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Opaque bearer token for the `Authorization` header
    pub token: String,
    pub user_id: i64,
    pub name: String,
}

/// Body of every non-2xx response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}
