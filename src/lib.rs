//! Turn bank statement exports (CSV, TSV, OFX/QFX or loose text) into a
//! normalized, date-ordered list of transactions.
//!
//! ```rust,ignore
//! use bank_statement_ingest::ParserBuilder;
//!
//! let report = ParserBuilder::new()
//!     .filename("statement.csv")
//!     .content(&file_content)
//!     .parse()?;
//!
//! println!("{}", report.to_json()?);
//! ```

/// Declares a function returning a lazily compiled, process-wide `Regex`.
macro_rules! re {
    ($vis:vis $name:ident, $pat:expr) => {
        $vis fn $name() -> &'static regex::Regex {
            static RE: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
            RE.get_or_init(|| regex::Regex::new($pat).expect("invalid regex"))
        }
    };
}

mod builder;
mod canonical;
mod normalize;
mod types;

pub mod errors;
pub mod parsers;

pub use builder::{FileFormat, ParseLimits, ParserBuilder};
pub use canonical::{parse_amount, parse_date};
pub use normalize::normalize;
pub use parsers::csv::{detect_delimiter, has_header_row};
pub use parsers::prelude::*;
pub use types::{FALLBACK_DESCRIPTION, StatementReport, Transaction};
