//! CSV bar source and signal writer.
//!
//! Bars live in `<dir>/<SYMBOL>.csv` with the header
//! `timestamp,open,high,low,close,volume`. Timestamps are epoch milliseconds
//! or RFC 3339 strings. Rows are returned in file order.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::DateTime;

use crate::domain::error::ScalperError;
use crate::domain::indicator::IndicatorKey;
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::signal::TradeSignal;
use crate::ports::data_port::DataPort;
use crate::ports::signal_port::SignalReportPort;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol.to_uppercase()))
    }
}

fn parse_field<T>(
    record: &csv::StringRecord,
    idx: usize,
    name: &str,
    line: u64,
) -> Result<T, ScalperError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = record.get(idx).ok_or_else(|| ScalperError::DataParse {
        line,
        reason: format!("missing {name} column"),
    })?;
    raw.trim().parse().map_err(|e| ScalperError::DataParse {
        line,
        reason: format!("invalid {name} value {raw:?}: {e}"),
    })
}

fn parse_timestamp(raw: &str, line: u64) -> Result<i64, ScalperError> {
    let raw = raw.trim();
    if let Ok(millis) = raw.parse::<i64>() {
        return Ok(millis);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.timestamp_millis())
        .map_err(|e| ScalperError::DataParse {
            line,
            reason: format!("invalid timestamp {raw:?}: {e}"),
        })
}

impl DataPort for CsvAdapter {
    fn load_bars(&self, symbol: &str) -> Result<Vec<OhlcvBar>, ScalperError> {
        let path = self.csv_path(symbol);
        let mut rdr = csv::Reader::from_path(&path).map_err(|e| ScalperError::DataSource {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut bars = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| ScalperError::DataParse {
                line: e.position().map(|p| p.line()).unwrap_or(0),
                reason: e.to_string(),
            })?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            let ts_raw = record.get(0).ok_or_else(|| ScalperError::DataParse {
                line,
                reason: "missing timestamp column".into(),
            })?;

            bars.push(OhlcvBar {
                timestamp: parse_timestamp(ts_raw, line)?,
                open: parse_field(&record, 1, "open", line)?,
                high: parse_field(&record, 2, "high", line)?,
                low: parse_field(&record, 3, "low", line)?,
                close: parse_field(&record, 4, "close", line)?,
                volume: parse_field(&record, 5, "volume", line)?,
            });
        }

        Ok(bars)
    }
}

impl SignalReportPort for CsvAdapter {
    fn write(&self, signals: &[TradeSignal], output_path: &Path) -> Result<(), ScalperError> {
        let report_err = |e: csv::Error| ScalperError::Report {
            reason: format!("failed to write {}: {}", output_path.display(), e),
        };

        let mut wtr = csv::Writer::from_path(output_path).map_err(report_err)?;

        let mut header = vec!["timestamp", "symbol", "kind", "price", "confidence"];
        header.extend(IndicatorKey::ALL.iter().map(|k| k.as_str()));
        wtr.write_record(&header).map_err(report_err)?;

        for signal in signals {
            let mut row = vec![
                signal.timestamp.to_string(),
                signal.symbol.clone(),
                signal.kind.to_string(),
                signal.price.to_string(),
                format!("{:.2}", signal.confidence),
            ];
            row.extend(IndicatorKey::ALL.iter().map(|k| {
                signal
                    .indicators
                    .get(k)
                    .map(|v| v.to_string())
                    .unwrap_or_default()
            }));
            wtr.write_record(&row).map_err(report_err)?;
        }

        wtr.flush().map_err(|e| ScalperError::Report {
            reason: format!("failed to write {}: {}", output_path.display(), e),
        })?;
        Ok(())
    }
}
