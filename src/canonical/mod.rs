//! Date and amount canonicalization shared by every statement format.

mod amount;
mod date;

pub use amount::parse_amount;
pub use date::parse_date;

pub(crate) use date::{day_month_name_date, month_name_day_date};
