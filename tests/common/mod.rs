#![allow(dead_code)]

use scalper::domain::error::ScalperError;
pub use scalper::domain::ohlcv::OhlcvBar;
use scalper::ports::data_port::DataPort;
use std::collections::HashMap;
use std::io::Write;

pub const MINUTE_MS: i64 = 60_000;
pub const START_MS: i64 = 1_704_067_200_000;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<OhlcvBar>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, symbol: &str, bars: Vec<OhlcvBar>) -> Self {
        self.data.insert(symbol.to_string(), bars);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn load_bars(&self, symbol: &str) -> Result<Vec<OhlcvBar>, ScalperError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(ScalperError::DataSource {
                reason: reason.clone(),
            });
        }
        Ok(self.data.get(symbol).cloned().unwrap_or_default())
    }
}

pub fn make_bar(index: usize, close: f64) -> OhlcvBar {
    OhlcvBar {
        timestamp: START_MS + index as i64 * MINUTE_MS,
        open: close,
        high: close + 0.5,
        low: close - 0.5,
        close,
        volume: 1_000,
    }
}

pub fn bars_from_closes(closes: &[f64]) -> Vec<OhlcvBar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| make_bar(i, c))
        .collect()
}

/// `count` bars moving `step` per minute from `start_price`.
pub fn generate_bars(count: usize, start_price: f64, step: f64) -> Vec<OhlcvBar> {
    (0..count)
        .map(|i| make_bar(i, start_price + step * i as f64))
        .collect()
}

/// Gentle oscillation around 100; never trends far enough to leave NEUTRAL.
pub fn choppy_bars(count: usize) -> Vec<OhlcvBar> {
    (0..count)
        .map(|i| make_bar(i, 100.0 + if i % 2 == 0 { 0.3 } else { -0.3 }))
        .collect()
}

/// 44 bars that end in a long confluence entry under the default config.
///
/// An opening print at 500 loads the RSI loss average for the whole series,
/// then closes grind up 0.5 per bar from 100 to 121. Bar 32 carries a wick
/// 40 above its close, which pins %K low for the final bars.
pub fn opening_drop_then_grind_up() -> Vec<OhlcvBar> {
    let mut bars: Vec<OhlcvBar> = (0..44)
        .map(|i| {
            let close = if i == 0 { 500.0 } else { 100.0 + 0.5 * (i - 1) as f64 };
            make_bar(i, close)
        })
        .collect();
    bars[32].high = bars[32].close + 40.0;
    bars
}

/// Mirror of [`opening_drop_then_grind_up`]: a print at 200, then closes
/// sliding 0.5 per bar from 600 to 579, with a wick 40 below bar 32.
pub fn opening_pop_then_grind_down() -> Vec<OhlcvBar> {
    let mut bars: Vec<OhlcvBar> = (0..44)
        .map(|i| {
            let close = if i == 0 { 200.0 } else { 600.0 - 0.5 * (i - 1) as f64 };
            make_bar(i, close)
        })
        .collect();
    bars[32].low = bars[32].close - 40.0;
    bars
}

pub fn bars_to_csv(bars: &[OhlcvBar]) -> String {
    let mut out = String::from("timestamp,open,high,low,close,volume\n");
    for b in bars {
        out.push_str(&format!(
            "{},{},{},{},{},{}\n",
            b.timestamp, b.open, b.high, b.low, b.close, b.volume
        ));
    }
    out
}

pub fn write_temp_ini(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
