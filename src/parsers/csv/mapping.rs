use crate::{
    canonical::{parse_amount, parse_date},
    types::Transaction,
};
use serde::{Deserialize, Serialize};

// Keyword lists are tried in order; the first header containing a keyword wins.
const DATE_KEYWORDS: &[&str] = &["date", "transaction date", "posted date", "value date", "trans date"];
const DESCRIPTION_KEYWORDS: &[&str] = &[
    "description",
    "memo",
    "details",
    "narration",
    "payee",
    "merchant",
    "transaction",
    "particulars",
];
const AMOUNT_KEYWORDS: &[&str] = &["amount", "value", "balance", "transaction amount", "debit", "credit"];
const TYPE_KEYWORDS: &[&str] = &["type", "transaction type", "debit/credit", "dr/cr"];

/// Zero-based column positions of each transaction field, `None` when the
/// header has no such column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub date: Option<usize>,
    pub description: Option<usize>,
    pub amount: Option<usize>,
    pub kind: Option<usize>,
}

impl ColumnMapping {
    pub fn from_headers<S: AsRef<str>>(headers: &[S]) -> Self {
        let headers: Vec<String> = headers
            .iter()
            .map(|h| h.as_ref().trim().to_lowercase())
            .collect();

        Self {
            date: find_column(&headers, DATE_KEYWORDS),
            description: find_column(&headers, DESCRIPTION_KEYWORDS),
            amount: find_column(&headers, AMOUNT_KEYWORDS),
            kind: find_column(&headers, TYPE_KEYWORDS),
        }
    }

    /// A mapping drives row parsing once it resolves a date or an amount.
    pub fn is_usable(&self) -> bool {
        self.date.is_some() || self.amount.is_some()
    }

    /// Build a transaction from one body row, `None` when the row lacks a
    /// parseable date or amount.
    pub fn extract(&self, fields: &[String]) -> Option<Transaction> {
        let date = parse_date(cell(fields, self.date)?)?;
        let amount = parse_amount(cell(fields, self.amount)?)?;

        let description = match cell(fields, self.description) {
            Some(description) => description.to_string(),
            None => fields
                .iter()
                .enumerate()
                .filter(|(idx, _)| Some(*idx) != self.date && Some(*idx) != self.amount)
                .map(|(_, field)| field.as_str())
                .filter(|field| !field.is_empty())
                .collect::<Vec<_>>()
                .join(" "),
        };
        let kind = cell(fields, self.kind).map(str::to_string);

        Some(Transaction::new(date, description, amount).with_kind(kind))
    }
}

fn find_column(headers: &[String], keywords: &[&str]) -> Option<usize> {
    keywords
        .iter()
        .find_map(|keyword| headers.iter().position(|header| header.contains(keyword)))
}

fn cell(fields: &[String], column: Option<usize>) -> Option<&str> {
    fields
        .get(column?)
        .map(String::as_str)
        .filter(|field| !field.is_empty())
}
