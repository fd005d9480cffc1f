//! Bar source port trait.

use crate::domain::error::ScalperError;
use crate::domain::ohlcv::OhlcvBar;

pub trait DataPort {
    /// Bars for `symbol` in arrival order, oldest first.
    fn load_bars(&self, symbol: &str) -> Result<Vec<OhlcvBar>, ScalperError>;
}
