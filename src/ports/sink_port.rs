//! Enriched series output port trait.

use crate::domain::bar::EnrichedBar;
use crate::domain::error::ChartwiseError;

/// Port for handing an enriched series to its consumer.
pub trait SeriesSink {
    fn write(&self, series: &[EnrichedBar]) -> Result<(), ChartwiseError>;
}
