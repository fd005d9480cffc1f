//! Technical indicator computations over a bar window.
//!
//! Every calculator is a pure free function over a price or bar slice and
//! returns `None` when the slice is shorter than its minimum lookback. Absent
//! values propagate into [`IndicatorSnapshot`] unchanged; they are never
//! defaulted to zero.

pub mod bollinger;
pub mod crossover;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod stochastic;
pub mod vwap;

pub use bollinger::{calculate_bollinger, BollingerBands};
pub use crossover::{detect_ema_crossover, Crossover};
pub use ema::calculate_ema;
pub use macd::{calculate_macd, MacdResult};
pub use rsi::calculate_rsi;
pub use stochastic::{calculate_stochastic, StochasticResult};
pub use vwap::{calculate_vwap, calculate_vwap_slope};

use std::collections::BTreeMap;
use std::fmt;

/// Name of one float output in an [`IndicatorSnapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum IndicatorKey {
    EmaFast,
    EmaSlow,
    Vwap,
    Rsi,
    Macd,
    MacdSignal,
    MacdHistogram,
    BollingerUpper,
    BollingerMiddle,
    BollingerLower,
    StochasticK,
    StochasticD,
}

impl IndicatorKey {
    pub const ALL: [IndicatorKey; 12] = [
        IndicatorKey::EmaFast,
        IndicatorKey::EmaSlow,
        IndicatorKey::Vwap,
        IndicatorKey::Rsi,
        IndicatorKey::Macd,
        IndicatorKey::MacdSignal,
        IndicatorKey::MacdHistogram,
        IndicatorKey::BollingerUpper,
        IndicatorKey::BollingerMiddle,
        IndicatorKey::BollingerLower,
        IndicatorKey::StochasticK,
        IndicatorKey::StochasticD,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IndicatorKey::EmaFast => "ema_fast",
            IndicatorKey::EmaSlow => "ema_slow",
            IndicatorKey::Vwap => "vwap",
            IndicatorKey::Rsi => "rsi",
            IndicatorKey::Macd => "macd",
            IndicatorKey::MacdSignal => "macd_signal",
            IndicatorKey::MacdHistogram => "macd_histogram",
            IndicatorKey::BollingerUpper => "bollinger_upper",
            IndicatorKey::BollingerMiddle => "bollinger_middle",
            IndicatorKey::BollingerLower => "bollinger_lower",
            IndicatorKey::StochasticK => "stochastic_k",
            IndicatorKey::StochasticD => "stochastic_d",
        }
    }
}

impl fmt::Display for IndicatorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Indicator values for the current window. A field is `None` whenever the
/// window was shorter than that indicator's lookback.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndicatorSnapshot {
    pub ema_fast: Option<f64>,
    pub ema_slow: Option<f64>,
    pub vwap: Option<f64>,
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub macd_histogram: Option<f64>,
    pub bollinger_upper: Option<f64>,
    pub bollinger_middle: Option<f64>,
    pub bollinger_lower: Option<f64>,
    pub stochastic_k: Option<f64>,
    pub stochastic_d: Option<f64>,
    /// Fast/slow EMA cross on the latest bar. Not a float output, so it is
    /// left out of [`IndicatorSnapshot::to_map`].
    pub crossover: Crossover,
}

impl IndicatorSnapshot {
    pub fn get(&self, key: IndicatorKey) -> Option<f64> {
        match key {
            IndicatorKey::EmaFast => self.ema_fast,
            IndicatorKey::EmaSlow => self.ema_slow,
            IndicatorKey::Vwap => self.vwap,
            IndicatorKey::Rsi => self.rsi,
            IndicatorKey::Macd => self.macd,
            IndicatorKey::MacdSignal => self.macd_signal,
            IndicatorKey::MacdHistogram => self.macd_histogram,
            IndicatorKey::BollingerUpper => self.bollinger_upper,
            IndicatorKey::BollingerMiddle => self.bollinger_middle,
            IndicatorKey::BollingerLower => self.bollinger_lower,
            IndicatorKey::StochasticK => self.stochastic_k,
            IndicatorKey::StochasticD => self.stochastic_d,
        }
    }

    /// Present values only.
    pub fn to_map(&self) -> BTreeMap<IndicatorKey, f64> {
        IndicatorKey::ALL
            .iter()
            .filter_map(|&key| self.get(key).map(|v| (key, v)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_key_display() {
        assert_eq!(IndicatorKey::EmaFast.to_string(), "ema_fast");
        assert_eq!(IndicatorKey::MacdHistogram.to_string(), "macd_histogram");
        assert_eq!(IndicatorKey::StochasticD.to_string(), "stochastic_d");
    }

    #[test]
    fn empty_snapshot_has_empty_map() {
        let snapshot = IndicatorSnapshot::default();
        assert!(snapshot.to_map().is_empty());
        assert_eq!(snapshot.crossover, Crossover::None);
    }

    #[test]
    fn map_skips_absent_fields() {
        let snapshot = IndicatorSnapshot {
            rsi: Some(42.0),
            vwap: Some(101.5),
            ..Default::default()
        };

        let map = snapshot.to_map();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&IndicatorKey::Rsi), Some(&42.0));
        assert_eq!(map.get(&IndicatorKey::Vwap), Some(&101.5));
        assert!(!map.contains_key(&IndicatorKey::Macd));
    }

    #[test]
    fn get_matches_every_field() {
        let snapshot = IndicatorSnapshot {
            ema_fast: Some(1.0),
            ema_slow: Some(2.0),
            vwap: Some(3.0),
            rsi: Some(4.0),
            macd: Some(5.0),
            macd_signal: Some(6.0),
            macd_histogram: Some(7.0),
            bollinger_upper: Some(8.0),
            bollinger_middle: Some(9.0),
            bollinger_lower: Some(10.0),
            stochastic_k: Some(11.0),
            stochastic_d: Some(12.0),
            crossover: Crossover::Bullish,
        };

        for (i, key) in IndicatorKey::ALL.iter().enumerate() {
            assert_eq!(snapshot.get(*key), Some((i + 1) as f64), "{key}");
        }
    }
}
