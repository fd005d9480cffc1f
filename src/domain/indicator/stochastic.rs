//! Stochastic Oscillator (%K / %D).
//!
//! %K = (close - lowest_low) / (highest_high - lowest_low) * 100 over the last
//! k bars, or 50 when the range is zero.
//! %D = mean of the last d %K values, each recomputed over its own trailing
//! k-bar window across the whole slice. When fewer than d %K values exist,
//! %D falls back to the current %K.
//!
//! Absent (as a pair) when fewer than k bars are available.

use crate::domain::ohlcv::OhlcvBar;

pub const DEFAULT_K_PERIOD: usize = 14;
pub const DEFAULT_D_PERIOD: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StochasticResult {
    pub k: f64,
    pub d: f64,
}

fn percent_k(window: &[OhlcvBar]) -> f64 {
    let highest = window.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max);
    let lowest = window.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);
    let close = window[window.len() - 1].close;

    if highest == lowest {
        50.0
    } else {
        (close - lowest) / (highest - lowest) * 100.0
    }
}

pub fn calculate_stochastic(
    bars: &[OhlcvBar],
    k_period: usize,
    d_period: usize,
) -> Option<StochasticResult> {
    if k_period == 0 || bars.len() < k_period {
        return None;
    }

    let k = percent_k(&bars[bars.len() - k_period..]);

    let k_values: Vec<f64> = ((k_period - 1)..bars.len())
        .map(|i| percent_k(&bars[i + 1 - k_period..=i]))
        .collect();

    let d = if d_period > 0 && k_values.len() >= d_period {
        k_values[k_values.len() - d_period..].iter().sum::<f64>() / d_period as f64
    } else {
        k
    };

    Some(StochasticResult { k, d })
}
