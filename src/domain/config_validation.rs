//! Configuration validation.
//!
//! Validates a [`BotConfig`] before it is handed to an engine.

use crate::domain::bot_config::{BotConfig, SECTION_BOT, SECTION_INDICATORS, SECTION_RISK};
use crate::domain::error::ScalperError;

pub fn validate_bot_config(config: &BotConfig) -> Result<(), ScalperError> {
    validate_symbol(config)?;
    validate_periods(config)?;
    validate_ema_order(config)?;
    validate_macd_order(config)?;
    validate_rsi_thresholds(config)?;
    validate_bollinger(config)?;
    validate_risk(config)?;
    Ok(())
}

fn validate_symbol(config: &BotConfig) -> Result<(), ScalperError> {
    if config.symbol.trim().is_empty() {
        return Err(ScalperError::ConfigMissing {
            section: SECTION_BOT.to_string(),
            key: "symbol".to_string(),
        });
    }
    Ok(())
}

fn validate_periods(config: &BotConfig) -> Result<(), ScalperError> {
    let periods = [
        ("ema_fast_period", config.ema_fast_period),
        ("ema_slow_period", config.ema_slow_period),
        ("rsi_period", config.rsi_period),
        ("macd_fast", config.macd_fast),
        ("macd_slow", config.macd_slow),
        ("macd_signal", config.macd_signal),
        ("bollinger_period", config.bollinger_period),
        ("stochastic_k", config.stochastic_k),
        ("stochastic_d", config.stochastic_d),
    ];
    for (key, value) in periods {
        if value == 0 {
            return Err(ScalperError::invalid(
                SECTION_INDICATORS,
                key,
                format!("{key} must be at least 1"),
            ));
        }
    }
    Ok(())
}

fn validate_ema_order(config: &BotConfig) -> Result<(), ScalperError> {
    if config.ema_fast_period >= config.ema_slow_period {
        return Err(ScalperError::invalid(
            SECTION_INDICATORS,
            "ema_fast_period",
            "ema_fast_period must be shorter than ema_slow_period",
        ));
    }
    Ok(())
}

fn validate_macd_order(config: &BotConfig) -> Result<(), ScalperError> {
    if config.macd_fast >= config.macd_slow {
        return Err(ScalperError::invalid(
            SECTION_INDICATORS,
            "macd_fast",
            "macd_fast must be shorter than macd_slow",
        ));
    }
    Ok(())
}

fn validate_rsi_thresholds(config: &BotConfig) -> Result<(), ScalperError> {
    for (key, value) in [
        ("rsi_oversold", config.rsi_oversold),
        ("rsi_overbought", config.rsi_overbought),
    ] {
        if !(0.0..=100.0).contains(&value) {
            return Err(ScalperError::invalid(
                SECTION_INDICATORS,
                key,
                format!("{key} must be between 0 and 100"),
            ));
        }
    }
    if config.rsi_oversold >= config.rsi_overbought {
        return Err(ScalperError::invalid(
            SECTION_INDICATORS,
            "rsi_oversold",
            "rsi_oversold must be below rsi_overbought",
        ));
    }
    Ok(())
}

fn validate_bollinger(config: &BotConfig) -> Result<(), ScalperError> {
    if !config.bollinger_stddev.is_finite() || config.bollinger_stddev <= 0.0 {
        return Err(ScalperError::invalid(
            SECTION_INDICATORS,
            "bollinger_stddev",
            "bollinger_stddev must be positive",
        ));
    }
    Ok(())
}

fn validate_risk(config: &BotConfig) -> Result<(), ScalperError> {
    for (key, value) in [
        ("target_percent", config.target_percent),
        ("stop_percent", config.stop_percent),
        ("max_risk_percent", config.max_risk_percent),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(ScalperError::invalid(
                SECTION_RISK,
                key,
                format!("{key} must be positive"),
            ));
        }
    }
    if config.daily_loss_limit < 0.0 {
        return Err(ScalperError::invalid(
            SECTION_RISK,
            "daily_loss_limit",
            "daily_loss_limit must be non-negative",
        ));
    }
    Ok(())
}
