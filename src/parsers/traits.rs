use crate::{errors::StatementResult, types::Transaction};

/// One statement format branch.
///
/// Implementations are best effort: unreadable lines or blocks are skipped,
/// never reported as errors.
pub trait Parser {
    fn parse(content: &str) -> StatementResult<Vec<Transaction>>;

    fn is_supported(filename: Option<&str>) -> bool;
}
