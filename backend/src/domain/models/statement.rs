//! Domain models for statement headers and their breakdown lines.
use chrono::NaiveDate;

/// Persisted statement header.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub id: i64,
    pub owner_id: i64,
    pub store_name: String,
    pub date: NaiveDate,
    pub total_amount: f64,
    pub notes: Option<String>,
}

/// Header fields supplied by the caller on create and update.
#[derive(Debug, Clone, PartialEq)]
pub struct StatementFields {
    pub store_name: String,
    pub date: NaiveDate,
    pub total_amount: f64,
    pub notes: Option<String>,
}

/// A breakdown line ready to be written. `line_total` is always computed
/// server-side from the catalog snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBreakdownLine {
    pub denomination_id: i64,
    pub quantity: u32,
    pub line_total: f64,
}

/// A stored breakdown line joined with its denomination's face value.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownLine {
    pub denomination_id: i64,
    pub value: f64,
    pub quantity: u32,
    pub line_total: f64,
}

/// A header with every one of its lines, in denomination-value descending order.
#[derive(Debug, Clone, PartialEq)]
pub struct StatementWithLines {
    pub statement: Statement,
    pub lines: Vec<BreakdownLine>,
}
