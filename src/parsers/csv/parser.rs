use super::{
    detect::{Delimiter, has_header_row},
    mapping::ColumnMapping,
    tokens::TokenExtractor,
};
use crate::{
    errors::{StatementParseError, StatementResult},
    parsers::{qfx::prelude::QfxParser, traits::Parser},
    types::Transaction,
};

/// Delimited and plain-text statements: CSV, TSV, `;` or `|` separated, or
/// free-form text lines.
pub struct CsvParser;

impl Parser for CsvParser {
    fn is_supported(filename: Option<&str>) -> bool {
        !QfxParser::is_supported(filename)
    }

    fn parse(content: &str) -> StatementResult<Vec<Transaction>> {
        let lines: Vec<&str> = content.lines().filter(|line| !line.trim().is_empty()).collect();
        let Some(first_line) = lines.first() else {
            return Err(StatementParseError::EmptyFile);
        };

        let delimiter = Delimiter::detect(first_line);
        let first_fields = delimiter.split(first_line);
        let has_header = first_fields.len() > 1 && has_header_row(&first_fields);
        tracing::debug!(?delimiter, has_header, lines = lines.len(), "parsing delimited content");

        if !has_header {
            return Ok(extract_tokens(&lines, delimiter));
        }

        let mapping = ColumnMapping::from_headers(&first_fields);
        if mapping.is_usable() {
            tracing::debug!(?mapping, "mapped header columns");
            Ok(extract_mapped(&lines[1..], delimiter, &mapping))
        } else {
            tracing::debug!("header maps neither date nor amount, scanning rows");
            Ok(extract_tokens(&lines[1..], delimiter))
        }
    }
}

fn extract_mapped(rows: &[&str], delimiter: Delimiter, mapping: &ColumnMapping) -> Vec<Transaction> {
    rows.iter()
        .filter_map(|row| {
            let txn = mapping.extract(&delimiter.split(row));
            if txn.is_none() {
                tracing::trace!(row, "dropping row without date or amount");
            }
            txn
        })
        .collect()
}

fn extract_tokens(lines: &[&str], delimiter: Delimiter) -> Vec<Transaction> {
    let extractor = TokenExtractor::new(delimiter);
    lines
        .iter()
        .filter_map(|line| {
            let txn = extractor.extract_from_line(line);
            if txn.is_none() {
                tracing::trace!(line, "no transaction found on line");
            }
            txn
        })
        .collect()
}
