//! Builds an [`IndicatorSnapshot`] for a bar window under a [`BotConfig`].

use crate::domain::bot_config::BotConfig;
use crate::domain::indicator::{
    calculate_bollinger, calculate_ema, calculate_macd, calculate_rsi, calculate_stochastic,
    calculate_vwap, detect_ema_crossover, IndicatorSnapshot,
};
use crate::domain::ohlcv::{closes, OhlcvBar};

pub fn compute_indicators(bars: &[OhlcvBar], config: &BotConfig) -> IndicatorSnapshot {
    let prices = closes(bars);

    let macd = calculate_macd(&prices, config.macd_fast, config.macd_slow, config.macd_signal);
    let bollinger = calculate_bollinger(&prices, config.bollinger_period, config.bollinger_stddev);
    let stochastic = calculate_stochastic(bars, config.stochastic_k, config.stochastic_d);

    IndicatorSnapshot {
        ema_fast: calculate_ema(&prices, config.ema_fast_period),
        ema_slow: calculate_ema(&prices, config.ema_slow_period),
        vwap: calculate_vwap(bars),
        rsi: calculate_rsi(&prices, config.rsi_period),
        macd: macd.map(|m| m.line),
        macd_signal: macd.map(|m| m.signal),
        macd_histogram: macd.map(|m| m.histogram),
        bollinger_upper: bollinger.map(|b| b.upper),
        bollinger_middle: bollinger.map(|b| b.middle),
        bollinger_lower: bollinger.map(|b| b.lower),
        stochastic_k: stochastic.map(|s| s.k),
        stochastic_d: stochastic.map(|s| s.d),
        crossover: detect_ema_crossover(&prices, config.ema_fast_period, config.ema_slow_period),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::{Crossover, IndicatorKey};

    fn make_bars(n: usize) -> Vec<OhlcvBar> {
        (0..n)
            .map(|i| {
                let close = 100.0 + (i as f64 * 0.7).sin() * 3.0;
                OhlcvBar {
                    timestamp: i as i64 * 60_000,
                    open: close,
                    high: close + 0.5,
                    low: close - 0.5,
                    close,
                    volume: 1_000 + i as u64,
                }
            })
            .collect()
    }

    #[test]
    fn empty_window_is_all_absent() {
        let snapshot = compute_indicators(&[], &BotConfig::default());
        assert!(snapshot.to_map().is_empty());
        assert_eq!(snapshot.crossover, Crossover::None);
    }

    #[test]
    fn presence_follows_each_lookback() {
        let config = BotConfig::default();

        let snapshot = compute_indicators(&make_bars(9), &config);
        assert!(snapshot.ema_fast.is_some());
        assert!(snapshot.vwap.is_some());
        assert!(snapshot.ema_slow.is_none());
        assert!(snapshot.rsi.is_none());
        assert!(snapshot.stochastic_k.is_none());

        let snapshot = compute_indicators(&make_bars(15), &config);
        assert!(snapshot.rsi.is_some());
        assert!(snapshot.stochastic_k.is_some());
        assert!(snapshot.bollinger_middle.is_none());

        let snapshot = compute_indicators(&make_bars(34), &config);
        assert!(snapshot.bollinger_middle.is_some());
        assert!(snapshot.ema_slow.is_some());
        assert!(snapshot.macd.is_none());
        assert!(snapshot.macd_histogram.is_none());

        let snapshot = compute_indicators(&make_bars(35), &config);
        assert_eq!(snapshot.to_map().len(), IndicatorKey::ALL.len());
    }

    #[test]
    fn slow_ema_needs_full_period() {
        let config = BotConfig::default();
        assert!(compute_indicators(&make_bars(20), &config).ema_slow.is_none());
        assert!(compute_indicators(&make_bars(21), &config).ema_slow.is_some());
    }

    #[test]
    fn crossover_needs_one_bar_past_slow_period() {
        let config = BotConfig::default();
        let mut bars: Vec<OhlcvBar> = (0..22)
            .map(|i| OhlcvBar {
                timestamp: i as i64 * 60_000,
                open: 100.0,
                high: 100.5,
                low: 99.5,
                close: 100.0,
                volume: 1_000,
            })
            .collect();
        bars[21].close = 101.0;

        let snapshot = compute_indicators(&bars, &config);
        assert_eq!(snapshot.crossover, Crossover::Bullish);

        bars.remove(0);
        let snapshot = compute_indicators(&bars, &config);
        assert_eq!(snapshot.crossover, Crossover::None);
    }

    #[test]
    fn macd_fields_present_together() {
        let snapshot = compute_indicators(&make_bars(60), &BotConfig::default());
        let line = snapshot.macd.unwrap();
        let signal = snapshot.macd_signal.unwrap();
        let hist = snapshot.macd_histogram.unwrap();
        assert!((hist - (line - signal)).abs() < 1e-12);
    }
}
