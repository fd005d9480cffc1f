//! Market regime classification from the EMA relationship and VWAP slope.

use std::fmt;

use crate::domain::bot_config::BotConfig;
use crate::domain::indicator::vwap::DEFAULT_SLOPE_WINDOW;
use crate::domain::indicator::{calculate_ema, calculate_vwap_slope};
use crate::domain::ohlcv::{closes, OhlcvBar};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Regime {
    Long,
    Short,
    #[default]
    Neutral,
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Regime::Long => write!(f, "LONG"),
            Regime::Short => write!(f, "SHORT"),
            Regime::Neutral => write!(f, "NEUTRAL"),
        }
    }
}

/// LONG iff ema_fast > ema_slow and the VWAP slope is positive; SHORT iff
/// ema_fast < ema_slow and the slope is negative. An absent slope counts as
/// zero. Fewer than `ema_slow_period` bars is always NEUTRAL.
pub fn classify_regime(bars: &[OhlcvBar], config: &BotConfig) -> Regime {
    if bars.len() < config.ema_slow_period {
        return Regime::Neutral;
    }

    let prices = closes(bars);
    let (Some(fast), Some(slow)) = (
        calculate_ema(&prices, config.ema_fast_period),
        calculate_ema(&prices, config.ema_slow_period),
    ) else {
        return Regime::Neutral;
    };
    let slope = calculate_vwap_slope(bars, DEFAULT_SLOPE_WINDOW).unwrap_or(0.0);

    if fast > slow && slope > 0.0 {
        Regime::Long
    } else if fast < slow && slope < 0.0 {
        Regime::Short
    } else {
        Regime::Neutral
    }
}
