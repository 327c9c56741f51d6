//! Symbol catalog port trait.

use crate::domain::error::TechdashError;

/// Source of the tradable symbol list.
pub trait CatalogPort {
    /// Read the full list of distinct, suffix-stripped symbols.
    fn load_symbols(&self) -> Result<Vec<String>, TechdashError>;

    /// Where the symbols come from, for messages.
    fn describe(&self) -> String;
}
