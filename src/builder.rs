use std::{fmt, fs};

use crate::{
    errors::{StatementParseError, StatementResult},
    normalize::normalize,
    parsers::prelude::*,
    types::{StatementReport, Transaction},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileFormat {
    #[serde(rename = "OFX/QFX")]
    Ofx,
    #[serde(rename = "CSV/Text")]
    Delimited,
}

impl FileFormat {
    /// Route on the file extension alone; anything not `.ofx`/`.qfx` is
    /// treated as delimited or plain text.
    pub fn detect(filename: Option<&str>) -> Self {
        if QfxParser::is_supported(filename) {
            FileFormat::Ofx
        } else {
            FileFormat::Delimited
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FileFormat::Ofx => "OFX/QFX",
            FileFormat::Delimited => "CSV/Text",
        }
    }

    fn parse_raw(&self, content: &str) -> StatementResult<Vec<Transaction>> {
        match self {
            FileFormat::Ofx => QfxParser::parse(content),
            FileFormat::Delimited => CsvParser::parse(content),
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Upper bounds on what a single parse will look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseLimits {
    /// Larger content is rejected outright.
    pub max_bytes: Option<usize>,
    /// Lines past this count are ignored; `Some(0)` ignores every line.
    pub max_lines: Option<usize>,
}

impl ParseLimits {
    pub fn unbounded() -> Self {
        Self {
            max_bytes: None,
            max_lines: None,
        }
    }
}

impl Default for ParseLimits {
    fn default() -> Self {
        Self {
            max_bytes: Some(10 * 1024 * 1024),
            max_lines: Some(100_000),
        }
    }
}

#[derive(Default)]
pub struct ParserBuilder {
    content: Option<String>,
    filename: Option<String>,
    filepath: Option<String>,
    format: Option<FileFormat>,
    limits: ParseLimits,
}

impl ParserBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, content: &str) -> Self {
        self.content = Some(content.to_string());
        self
    }

    /// Raw upload bytes; invalid UTF-8 sequences are replaced.
    pub fn bytes(mut self, bytes: &[u8]) -> Self {
        self.content = Some(String::from_utf8_lossy(bytes).into_owned());
        self
    }

    /// Name of the uploaded file, used only for the extension hint.
    pub fn filename(mut self, filename: &str) -> Self {
        self.filename = Some(filename.to_string());
        self
    }

    /// Read content from disk when none was given; also serves as the filename.
    pub fn filepath(mut self, path: &str) -> Self {
        self.filepath = Some(path.to_string());
        self
    }

    pub fn format(mut self, format: FileFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn limits(mut self, limits: ParseLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn parse(self) -> StatementResult<StatementReport> {
        let format = self.format.unwrap_or_else(|| {
            FileFormat::detect(self.filename.as_deref().or(self.filepath.as_deref()))
        });
        let limits = self.limits;

        let content = match self.content {
            Some(content) => content,
            None => {
                let path = self.filepath.ok_or(StatementParseError::MissingContentAndFilepath)?;
                String::from_utf8_lossy(&fs::read(path)?).into_owned()
            }
        };

        let content = prepare(&content, &limits)?;
        tracing::debug!(%format, bytes = content.len(), "parsing statement");

        let transactions = if content.is_empty() {
            Vec::new()
        } else {
            normalize(format.parse_raw(content)?)
        };
        Ok(StatementReport::new(transactions, format))
    }

    pub fn parse_into<T>(self) -> StatementResult<Vec<T>>
    where
        T: TryFrom<Transaction, Error = StatementParseError>,
    {
        self.parse()?
            .transactions
            .into_iter()
            .map(T::try_from)
            .collect()
    }
}

/// Strip a BOM, apply the size limits and reject content with no text.
fn prepare<'a>(content: &'a str, limits: &ParseLimits) -> StatementResult<&'a str> {
    if let Some(limit) = limits.max_bytes {
        if content.len() > limit {
            return Err(StatementParseError::ContentTooLarge {
                size: content.len(),
                limit,
            });
        }
    }

    let mut content = content.strip_prefix('\u{feff}').unwrap_or(content);
    if content.trim().is_empty() {
        return Err(StatementParseError::EmptyFile);
    }

    if let Some(max_lines) = limits.max_lines {
        let cut = match max_lines {
            0 => Some(0),
            n => content.match_indices('\n').nth(n - 1).map(|(cut, _)| cut),
        };
        if let Some(cut) = cut {
            if !content[cut..].trim().is_empty() {
                tracing::warn!(max_lines, "statement exceeds line limit, ignoring the rest");
            }
            content = &content[..cut];
        }
    }

    Ok(content)
}
