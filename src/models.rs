use std::fmt;

use serde::Serialize;

use crate::fmt::format_value;

/// Amount column. Parsed as a number on load and rendered to text by the
/// value formatting step.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Amount(f64),
    Rendered(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Amount(v) => f.write_str(&format_value(*v)),
            Self::Rendered(s) => f.write_str(s),
        }
    }
}

/// One statement transaction with canonical field names.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// 1-based line in the source file, used in warnings.
    pub line: u64,
    pub date: String,
    pub description: String,
    pub value: Value,
    pub account: String,
    pub category: String,
    /// Raw `current/total` marker. Taken by the installment step.
    pub installment: Option<String>,
}

/// A parsed `current/total` marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Installment {
    pub current: u32,
    pub total: u32,
}

impl Installment {
    /// Months between the purchase and the statement carrying this installment.
    /// Zero or negative when `current` runs past `total`.
    pub fn months_back(&self) -> i64 {
        i64::from(self.total) - i64::from(self.current) + 1
    }
}

/// The five output columns in their fixed order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputRecord {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Value")]
    pub value: String,
    #[serde(rename = "Account")]
    pub account: String,
    #[serde(rename = "Category")]
    pub category: String,
}

impl From<Row> for OutputRecord {
    fn from(row: Row) -> Self {
        Self {
            date: row.date,
            description: row.description,
            value: row.value.to_string(),
            account: row.account,
            category: row.category,
        }
    }
}
