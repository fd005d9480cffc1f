//! Signal report port trait.

use std::path::Path;

use crate::domain::error::ScalperError;
use crate::domain::signal::TradeSignal;

/// Port for persisting a batch of emitted signals.
pub trait SignalReportPort {
    fn write(&self, signals: &[TradeSignal], output_path: &Path) -> Result<(), ScalperError>;
}
