//! Short/long EMA crossover detection on the latest price.

use crate::domain::indicator::calculate_ema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Crossover {
    /// Short EMA crossed above the long EMA on the last price.
    Bullish,
    /// Short EMA crossed below the long EMA on the last price.
    Bearish,
    #[default]
    None,
}

/// Compares short/long EMAs with and without the last price.
///
/// Bullish when previously short <= long and now short > long; bearish when
/// previously short >= long and now short < long. `Crossover::None` whenever
/// fewer than `long_period + 1` prices exist or any EMA is absent.
pub fn detect_ema_crossover(prices: &[f64], short_period: usize, long_period: usize) -> Crossover {
    if prices.len() < long_period + 1 {
        return Crossover::None;
    }

    let previous = &prices[..prices.len() - 1];
    let (Some(cur_short), Some(cur_long), Some(prev_short), Some(prev_long)) = (
        calculate_ema(prices, short_period),
        calculate_ema(prices, long_period),
        calculate_ema(previous, short_period),
        calculate_ema(previous, long_period),
    ) else {
        return Crossover::None;
    };

    if prev_short <= prev_long && cur_short > cur_long {
        Crossover::Bullish
    } else if prev_short >= prev_long && cur_short < cur_long {
        Crossover::Bearish
    } else {
        Crossover::None
    }
}
