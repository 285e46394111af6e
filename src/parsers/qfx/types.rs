use crate::canonical::parse_date;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Raw OFX timestamp, e.g. `20251226120000[0:GMT]`.
///
/// Only the leading `YYYYMMDD` matters; time and zone are discarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QfxDate(String);

impl QfxDate {
    pub fn to_date(&self) -> Option<NaiveDate> {
        let digits = self.0.trim().get(0..8)?;
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let iso = format!("{}-{}-{}", &digits[0..4], &digits[4..6], &digits[6..8]);
        parse_date(&iso)
    }
}

impl From<String> for QfxDate {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for QfxDate {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
