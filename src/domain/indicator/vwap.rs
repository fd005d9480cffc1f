//! Volume Weighted Average Price and its short-term slope.
//!
//! VWAP = Σ(typical_price × volume) / Σ volume, typical = (H + L + C) / 3.
//! Absent for an empty slice or zero total volume.

use crate::domain::ohlcv::OhlcvBar;

pub const DEFAULT_SLOPE_WINDOW: usize = 10;

pub fn calculate_vwap(bars: &[OhlcvBar]) -> Option<f64> {
    if bars.is_empty() {
        return None;
    }

    // Volumes accumulate as f64 so extreme feeds cannot overflow.
    let mut sum_pv = 0.0;
    let mut sum_volume = 0.0;
    for bar in bars {
        let volume = bar.volume as f64;
        sum_pv += bar.typical_price() * volume;
        sum_volume += volume;
    }

    if sum_volume == 0.0 {
        None
    } else {
        Some(sum_pv / sum_volume)
    }
}

/// Slope of the cumulative VWAP across the last `window` bars.
///
/// The VWAP of each growing prefix of the trailing window is computed
/// (prefixes with zero volume are skipped) and the slope is
/// `(last - first) / count`. Absent when the slice is shorter than the window
/// or fewer than two prefix VWAPs could be formed.
pub fn calculate_vwap_slope(bars: &[OhlcvBar], window: usize) -> Option<f64> {
    if window == 0 || bars.len() < window {
        return None;
    }

    let recent = &bars[bars.len() - window..];
    let vwaps: Vec<f64> = (1..=recent.len())
        .filter_map(|end| calculate_vwap(&recent[..end]))
        .collect();

    if vwaps.len() < 2 {
        return None;
    }

    let first = vwaps[0];
    let last = vwaps[vwaps.len() - 1];
    Some((last - first) / vwaps.len() as f64)
}
