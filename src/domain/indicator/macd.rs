//! MACD (Moving Average Convergence Divergence).
//!
//! MACD Line = EMA(fast) - EMA(slow) at the latest price
//! Signal Line = EMA(signal) of the MACD line series
//! Histogram = MACD Line - Signal Line
//!
//! The MACD line series is rebuilt by recomputing both EMAs from scratch over
//! every growing prefix starting at index `slow - 1`. Each prefix EMA is
//! seeded from its own first `period` prices, so this is quadratic and does
//! not match an incrementally maintained EMA during warm-up. Recorded signals
//! depend on these exact values.
//!
//! Default parameters: fast=12, slow=26, signal=9
//! Absent when fewer than slow + signal prices are available.

use crate::domain::indicator::calculate_ema;

pub const DEFAULT_FAST: usize = 12;
pub const DEFAULT_SLOW: usize = 26;
pub const DEFAULT_SIGNAL: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacdResult {
    pub line: f64,
    pub signal: f64,
    pub histogram: f64,
}

pub fn calculate_macd(
    prices: &[f64],
    fast: usize,
    slow: usize,
    signal_period: usize,
) -> Option<MacdResult> {
    if fast == 0 || slow == 0 || signal_period == 0 {
        return None;
    }
    if prices.len() < slow + signal_period {
        return None;
    }

    let line = calculate_ema(prices, fast)? - calculate_ema(prices, slow)?;

    let macd_line: Vec<f64> = ((slow - 1)..prices.len())
        .filter_map(|i| {
            let prefix = &prices[..=i];
            Some(calculate_ema(prefix, fast)? - calculate_ema(prefix, slow)?)
        })
        .collect();

    let signal = calculate_ema(&macd_line, signal_period)?;

    Some(MacdResult {
        line,
        signal,
        histogram: line - signal,
    })
}

pub fn calculate_macd_default(prices: &[f64]) -> Option<MacdResult> {
    calculate_macd(prices, DEFAULT_FAST, DEFAULT_SLOW, DEFAULT_SIGNAL)
}
