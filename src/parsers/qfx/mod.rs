mod parser;
mod types;

pub mod prelude {
    pub use super::parser::QfxParser;
    pub use super::types::QfxDate;
}
