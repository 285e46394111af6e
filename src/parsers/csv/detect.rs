use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};

/// Words whose presence in any first-line field marks it as a header row.
const HEADER_KEYWORDS: [&str; 6] = [
    "date",
    "description",
    "amount",
    "memo",
    "transaction",
    "balance",
];

/// Field separator of a delimited statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Delimiter {
    Comma,
    Tab,
    Semicolon,
    Pipe,
}

impl Delimiter {
    /// Detection order; on equal counts the earlier candidate wins.
    pub const CANDIDATES: [Delimiter; 4] = [
        Delimiter::Comma,
        Delimiter::Tab,
        Delimiter::Semicolon,
        Delimiter::Pipe,
    ];

    pub fn as_char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
            Delimiter::Semicolon => ';',
            Delimiter::Pipe => '|',
        }
    }

    pub fn as_byte(self) -> u8 {
        self.as_char() as u8
    }

    /// Pick the candidate occurring most often in `line`, comma when none occur.
    pub fn detect(line: &str) -> Self {
        let mut best = Delimiter::Comma;
        let mut best_count = 0;

        for candidate in Self::CANDIDATES {
            let count = line.matches(candidate.as_char()).count();
            if count > best_count {
                best = candidate;
                best_count = count;
            }
        }

        best
    }

    /// Split one line into trimmed fields, honouring double-quoted fields.
    ///
    /// One layer of surrounding `"` or `'` is removed from each field.
    pub fn split(self, line: &str) -> Vec<String> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.as_byte())
            .from_reader(line.as_bytes());

        match reader.records().next() {
            Some(Ok(record)) => record.iter().map(clean_field).collect(),
            _ => line.split(self.as_char()).map(clean_field).collect(),
        }
    }
}

fn clean_field(field: &str) -> String {
    let field = field.trim();
    let field = field.strip_prefix(['"', '\'']).unwrap_or(field);
    let field = field.strip_suffix(['"', '\'']).unwrap_or(field);
    field.trim().to_string()
}

/// Detect the delimiter of a statement from its first non-blank line.
pub fn detect_delimiter(first_line: &str) -> Delimiter {
    Delimiter::detect(first_line)
}

/// Heuristic header check: any field containing a header keyword.
///
/// Substring matching means a data row whose text contains e.g. "date" is
/// taken for a header as well.
pub fn has_header_row<S: AsRef<str>>(fields: &[S]) -> bool {
    fields.iter().any(|field| {
        let field = field.as_ref().to_lowercase();
        HEADER_KEYWORDS.iter().any(|keyword| field.contains(keyword))
    })
}
