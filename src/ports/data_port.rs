//! Series source port trait.

use crate::domain::bar::Bar;
use crate::domain::error::ChartwiseError;

/// A source of chronologically ordered bar series keyed by symbol.
pub trait SeriesSource {
    fn fetch_series(&self, symbol: &str) -> Result<Vec<Bar>, ChartwiseError>;

    fn list_symbols(&self) -> Result<Vec<String>, ChartwiseError>;
}
