//! Trade signal synthesis.
//!
//! Entry: a six-factor confluence vote in the direction of the regime. Each
//! factor that holds adds its fixed weight to the confidence; three or more
//! agreeing factors produce an entry. Absent indicators never satisfy a factor.
//!
//! Exit (only when no entry fired and a position is open), first match wins:
//! 1. target reached (confidence 1.0)
//! 2. stop loss hit (confidence 1.0)
//! 3. momentum reversal: MACD histogram against the position and RSI at the
//!    opposite extreme (confidence 0.7)
//!
//! Otherwise HOLD with confidence 0.

use std::collections::BTreeMap;
use std::fmt;

use crate::domain::bot_config::BotConfig;
use crate::domain::indicator::{Crossover, IndicatorKey, IndicatorSnapshot};
use crate::domain::position::{Position, Side};
use crate::domain::regime::Regime;

pub const WEIGHT_RSI: f64 = 0.20;
pub const WEIGHT_STOCHASTIC: f64 = 0.15;
pub const WEIGHT_VWAP: f64 = 0.15;
pub const WEIGHT_MACD: f64 = 0.20;
pub const WEIGHT_BOLLINGER: f64 = 0.15;
pub const WEIGHT_CROSSOVER: f64 = 0.15;

pub const MIN_CONFLUENCE: usize = 3;
pub const STOCHASTIC_OVERSOLD: f64 = 20.0;
pub const STOCHASTIC_OVERBOUGHT: f64 = 80.0;

pub const TARGET_STOP_CONFIDENCE: f64 = 1.0;
pub const REVERSAL_CONFIDENCE: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SignalKind {
    EntryLong,
    EntryShort,
    ExitLong,
    ExitShort,
    Hold,
    NoSignal,
}

impl SignalKind {
    pub fn is_entry(&self) -> bool {
        matches!(self, SignalKind::EntryLong | SignalKind::EntryShort)
    }

    pub fn is_exit(&self) -> bool {
        matches!(self, SignalKind::ExitLong | SignalKind::ExitShort)
    }

    pub fn is_actionable(&self) -> bool {
        self.is_entry() || self.is_exit()
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SignalKind::EntryLong => "ENTRY_LONG",
            SignalKind::EntryShort => "ENTRY_SHORT",
            SignalKind::ExitLong => "EXIT_LONG",
            SignalKind::ExitShort => "EXIT_SHORT",
            SignalKind::Hold => "HOLD",
            SignalKind::NoSignal => "NO_SIGNAL",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TradeSignal {
    pub kind: SignalKind,
    pub symbol: String,
    pub price: f64,
    /// Sum of matched weights; not normalised further.
    pub confidence: f64,
    pub indicators: BTreeMap<IndicatorKey, f64>,
    /// Epoch milliseconds of the bar or tick that produced the signal.
    pub timestamp: i64,
}

impl TradeSignal {
    fn new(
        kind: SignalKind,
        symbol: &str,
        price: f64,
        confidence: f64,
        indicators: &IndicatorSnapshot,
        timestamp: i64,
    ) -> Self {
        Self {
            kind,
            symbol: symbol.to_string(),
            price,
            confidence,
            indicators: indicators.to_map(),
            timestamp,
        }
    }

    /// Emitted for an empty window; carries no indicators.
    pub fn no_signal(symbol: &str, price: f64, timestamp: i64) -> Self {
        Self {
            kind: SignalKind::NoSignal,
            symbol: symbol.to_string(),
            price,
            confidence: 0.0,
            indicators: BTreeMap::new(),
            timestamp,
        }
    }
}

/// Outcome of one directional confluence vote.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ConfluenceVote {
    pub signals: usize,
    pub confidence: f64,
}

impl ConfluenceVote {
    fn add(&mut self, holds: bool, weight: f64) {
        if holds {
            self.signals += 1;
            self.confidence += weight;
        }
    }

    pub fn fires(&self) -> bool {
        self.signals >= MIN_CONFLUENCE
    }
}

fn holds(value: Option<f64>, cond: impl Fn(f64) -> bool) -> bool {
    value.is_some_and(cond)
}

pub fn long_confluence(price: f64, ind: &IndicatorSnapshot, config: &BotConfig) -> ConfluenceVote {
    let mut vote = ConfluenceVote::default();
    vote.add(holds(ind.rsi, |v| v < config.rsi_oversold), WEIGHT_RSI);
    vote.add(holds(ind.stochastic_k, |v| v < STOCHASTIC_OVERSOLD), WEIGHT_STOCHASTIC);
    vote.add(holds(ind.vwap, |v| price > v), WEIGHT_VWAP);
    vote.add(holds(ind.macd_histogram, |v| v > 0.0), WEIGHT_MACD);
    vote.add(holds(ind.bollinger_lower, |v| price <= v), WEIGHT_BOLLINGER);
    vote.add(ind.crossover == Crossover::Bullish, WEIGHT_CROSSOVER);
    vote
}

pub fn short_confluence(price: f64, ind: &IndicatorSnapshot, config: &BotConfig) -> ConfluenceVote {
    let mut vote = ConfluenceVote::default();
    vote.add(holds(ind.rsi, |v| v > config.rsi_overbought), WEIGHT_RSI);
    vote.add(holds(ind.stochastic_k, |v| v > STOCHASTIC_OVERBOUGHT), WEIGHT_STOCHASTIC);
    vote.add(holds(ind.vwap, |v| price < v), WEIGHT_VWAP);
    vote.add(holds(ind.macd_histogram, |v| v < 0.0), WEIGHT_MACD);
    vote.add(holds(ind.bollinger_upper, |v| price >= v), WEIGHT_BOLLINGER);
    vote.add(ind.crossover == Crossover::Bearish, WEIGHT_CROSSOVER);
    vote
}

fn entry_signal(
    config: &BotConfig,
    price: f64,
    timestamp: i64,
    ind: &IndicatorSnapshot,
    regime: Regime,
) -> Option<TradeSignal> {
    let (kind, vote) = match regime {
        Regime::Long => (SignalKind::EntryLong, long_confluence(price, ind, config)),
        Regime::Short => (SignalKind::EntryShort, short_confluence(price, ind, config)),
        Regime::Neutral => return None,
    };

    vote.fires()
        .then(|| TradeSignal::new(kind, &config.symbol, price, vote.confidence, ind, timestamp))
}

fn exit_signal(
    config: &BotConfig,
    price: f64,
    timestamp: i64,
    ind: &IndicatorSnapshot,
    position: &Position,
) -> Option<TradeSignal> {
    let profit_pct = position.profit_percent(price);
    let (kind, target_hit, stop_hit, reversal) = match position.side {
        Side::Long => (
            SignalKind::ExitLong,
            profit_pct >= config.target_percent,
            profit_pct <= -config.stop_percent,
            holds(ind.macd_histogram, |h| h < 0.0)
                && holds(ind.rsi, |r| r > config.rsi_overbought),
        ),
        Side::Short => (
            SignalKind::ExitShort,
            profit_pct <= -config.target_percent,
            profit_pct >= config.stop_percent,
            holds(ind.macd_histogram, |h| h > 0.0)
                && holds(ind.rsi, |r| r < config.rsi_oversold),
        ),
    };

    let confidence = if target_hit || stop_hit {
        TARGET_STOP_CONFIDENCE
    } else if reversal {
        REVERSAL_CONFIDENCE
    } else {
        return None;
    };

    Some(TradeSignal::new(kind, &config.symbol, price, confidence, ind, timestamp))
}

/// Produces the signal for one price observation. Entry rules are checked
/// first; exits are only considered when no entry fired and a position is
/// open.
pub fn evaluate_signal(
    config: &BotConfig,
    price: f64,
    timestamp: i64,
    indicators: &IndicatorSnapshot,
    regime: Regime,
    position: Option<&Position>,
) -> TradeSignal {
    if let Some(signal) = entry_signal(config, price, timestamp, indicators, regime) {
        return signal;
    }

    if let Some(signal) =
        position.and_then(|p| exit_signal(config, price, timestamp, indicators, p))
    {
        return signal;
    }

    TradeSignal::new(SignalKind::Hold, &config.symbol, price, 0.0, indicators, timestamp)
}
