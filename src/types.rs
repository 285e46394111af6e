use crate::{builder::FileFormat, errors::StatementResult};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Description used when a statement line carries no usable text.
pub const FALLBACK_DESCRIPTION: &str = "Bank transaction";

/// One normalized statement entry.
///
/// Positive amounts are inflows, negative amounts outflows. Interpreting the
/// sign beyond that is left to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Raw text of the statement's type column (or OFX `TRNTYPE`), when present.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl Transaction {
    pub fn new(date: NaiveDate, description: impl Into<String>, amount: Decimal) -> Self {
        let description = description.into();
        let description = match description.trim() {
            "" => FALLBACK_DESCRIPTION.to_string(),
            trimmed if trimmed.len() == description.len() => description,
            trimmed => trimmed.to_string(),
        };

        Self {
            date,
            description,
            amount,
            kind: None,
        }
    }

    pub fn with_kind(mut self, kind: Option<String>) -> Self {
        self.kind = kind.filter(|k| !k.trim().is_empty());
        self
    }
}

/// Result of a parse: the normalized list plus display metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementReport {
    pub transactions: Vec<Transaction>,
    pub count: usize,
    pub format: FileFormat,
}

impl StatementReport {
    pub(crate) fn new(transactions: Vec<Transaction>, format: FileFormat) -> Self {
        Self {
            count: transactions.len(),
            transactions,
            format,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn to_json(&self) -> StatementResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
