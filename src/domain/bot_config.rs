//! Bot parameter set.
//!
//! Immutable once built; the engine swaps it wholesale via
//! `ScalpingEngine::update_config`.

use crate::domain::error::ScalperError;
use crate::ports::config_port::ConfigPort;

pub const SECTION_BOT: &str = "bot";
pub const SECTION_INDICATORS: &str = "indicators";
pub const SECTION_RISK: &str = "risk";

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BotConfig {
    pub symbol: String,
    pub ema_fast_period: usize,
    pub ema_slow_period: usize,
    pub rsi_period: usize,
    pub rsi_oversold: f64,
    pub rsi_overbought: f64,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub bollinger_period: usize,
    pub bollinger_stddev: f64,
    pub stochastic_k: usize,
    pub stochastic_d: usize,
    /// Accepted for compatibility; %D is a plain mean of %K.
    pub stochastic_smoothing: usize,
    pub target_percent: f64,
    pub stop_percent: f64,
    pub max_risk_percent: f64,
    /// Enforced by the execution layer, not here.
    pub daily_loss_limit: f64,
    /// Accepted but not implemented by the signal engine.
    pub use_trailing_stop: bool,
    pub semi_auto_mode: bool,
    pub is_paper_mode: bool,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            symbol: "JNJ".to_string(),
            ema_fast_period: 9,
            ema_slow_period: 21,
            rsi_period: 14,
            rsi_oversold: 30.0,
            rsi_overbought: 70.0,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            bollinger_period: 20,
            bollinger_stddev: 2.0,
            stochastic_k: 14,
            stochastic_d: 3,
            stochastic_smoothing: 3,
            target_percent: 0.5,
            stop_percent: 0.3,
            max_risk_percent: 1.0,
            daily_loss_limit: 3.0,
            use_trailing_stop: true,
            semi_auto_mode: false,
            is_paper_mode: true,
        }
    }
}

fn get_period(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: usize,
) -> Result<usize, ScalperError> {
    let value = config.get_int(section, key, default as i64);
    usize::try_from(value)
        .map_err(|_| ScalperError::invalid(section, key, "period must be non-negative"))
}

impl BotConfig {
    /// Reads every key, falling back to the documented default when absent.
    pub fn from_port(config: &dyn ConfigPort) -> Result<Self, ScalperError> {
        let d = BotConfig::default();
        let ind = SECTION_INDICATORS;

        Ok(Self {
            symbol: config
                .get_string(SECTION_BOT, "symbol")
                .map(|s| s.trim().to_uppercase())
                .unwrap_or(d.symbol),
            ema_fast_period: get_period(config, ind, "ema_fast_period", d.ema_fast_period)?,
            ema_slow_period: get_period(config, ind, "ema_slow_period", d.ema_slow_period)?,
            rsi_period: get_period(config, ind, "rsi_period", d.rsi_period)?,
            rsi_oversold: config.get_double(ind, "rsi_oversold", d.rsi_oversold),
            rsi_overbought: config.get_double(ind, "rsi_overbought", d.rsi_overbought),
            macd_fast: get_period(config, ind, "macd_fast", d.macd_fast)?,
            macd_slow: get_period(config, ind, "macd_slow", d.macd_slow)?,
            macd_signal: get_period(config, ind, "macd_signal", d.macd_signal)?,
            bollinger_period: get_period(config, ind, "bollinger_period", d.bollinger_period)?,
            bollinger_stddev: config.get_double(ind, "bollinger_stddev", d.bollinger_stddev),
            stochastic_k: get_period(config, ind, "stochastic_k", d.stochastic_k)?,
            stochastic_d: get_period(config, ind, "stochastic_d", d.stochastic_d)?,
            stochastic_smoothing: get_period(
                config,
                ind,
                "stochastic_smoothing",
                d.stochastic_smoothing,
            )?,
            target_percent: config.get_double(SECTION_RISK, "target_percent", d.target_percent),
            stop_percent: config.get_double(SECTION_RISK, "stop_percent", d.stop_percent),
            max_risk_percent: config.get_double(
                SECTION_RISK,
                "max_risk_percent",
                d.max_risk_percent,
            ),
            daily_loss_limit: config.get_double(
                SECTION_RISK,
                "daily_loss_limit",
                d.daily_loss_limit,
            ),
            use_trailing_stop: config.get_bool(
                SECTION_RISK,
                "use_trailing_stop",
                d.use_trailing_stop,
            ),
            semi_auto_mode: config.get_bool(SECTION_BOT, "semi_auto_mode", d.semi_auto_mode),
            is_paper_mode: config.get_bool(SECTION_BOT, "is_paper_mode", d.is_paper_mode),
        })
    }

    /// Bars needed before every indicator in a snapshot can be present.
    pub fn warmup_bars(&self) -> usize {
        [
            self.ema_slow_period + 1,
            self.rsi_period + 1,
            self.macd_slow + self.macd_signal,
            self.bollinger_period,
            self.stochastic_k,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }
}
