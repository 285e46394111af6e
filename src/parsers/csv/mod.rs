mod detect;
mod mapping;
mod parser;
mod tokens;

pub use detect::{detect_delimiter, has_header_row};

pub mod prelude {
    pub use super::detect::Delimiter;
    pub use super::mapping::ColumnMapping;
    pub use super::parser::CsvParser;
    pub use super::tokens::TokenExtractor;
}
