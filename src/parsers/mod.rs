pub mod csv;
pub mod qfx;
pub mod traits;

pub mod prelude {
    pub use super::csv::prelude::*;
    pub use super::qfx::prelude::*;
    pub use super::traits::Parser;
}
