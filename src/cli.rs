//! CLI definition and dispatch.
//!
//! Every subcommand loads an INI config (with `SCALPER_*` environment
//! overrides), validates it, and reports failures with the exit code mapped
//! from [`ScalperError`]. Machine-readable output goes to stdout; progress
//! goes through `tracing` to stderr.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, warn};

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::bot_config::BotConfig;
use crate::domain::config_validation::validate_bot_config;
use crate::domain::engine::ScalpingEngine;
use crate::domain::error::ScalperError;
use crate::domain::indicator::IndicatorKey;
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::position::{Position, Side};
use crate::domain::signal::TradeSignal;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::signal_port::SignalReportPort;

#[derive(Parser, Debug)]
#[command(name = "scalper", about = "Intraday scalping signal engine")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replay a bar file through the engine and emit actionable signals
    Replay {
        #[arg(short, long)]
        config: PathBuf,
        /// Directory holding <SYMBOL>.csv bar files
        #[arg(short, long)]
        data: PathBuf,
        #[arg(long)]
        symbol: Option<String>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Treat the replay as holding an open position (long|short)
        #[arg(long, requires = "entry")]
        position: Option<Side>,
        #[arg(long, requires = "position")]
        entry: Option<f64>,
    },
    /// Validate a bot configuration and print the effective values
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Compute a risk-based position size
    Size {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        equity: f64,
        #[arg(long)]
        price: f64,
    },
    /// Print the indicator snapshot and regime for a bar file
    Indicators {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        data: PathBuf,
        #[arg(long)]
        symbol: Option<String>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Replay {
            config,
            data,
            symbol,
            output,
            position,
            entry,
        } => run_replay(
            &config,
            &data,
            symbol.as_deref(),
            output.as_deref(),
            position.zip(entry),
        ),
        Command::Validate { config } => run_validate(&config),
        Command::Size {
            config,
            equity,
            price,
        } => run_size(&config, equity, price),
        Command::Indicators {
            config,
            data,
            symbol,
        } => run_indicators(&config, &data, symbol.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, ScalperError> {
    let adapter = FileConfigAdapter::from_file(path).map_err(|e| ScalperError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })?;
    Ok(adapter.with_env_overrides())
}

/// Reads and validates the bot config, applying a CLI symbol override.
pub fn build_bot_config(
    adapter: &dyn ConfigPort,
    symbol_override: Option<&str>,
) -> Result<BotConfig, ScalperError> {
    let mut config = BotConfig::from_port(adapter)?;
    if let Some(symbol) = symbol_override {
        config.symbol = symbol.trim().to_uppercase();
    }
    validate_bot_config(&config)?;
    Ok(config)
}

fn load_validated(config_path: &Path, symbol: Option<&str>) -> Result<BotConfig, ScalperError> {
    info!(path = %config_path.display(), "loading config");
    let adapter = load_config(config_path)?;
    build_bot_config(&adapter, symbol)
}

fn load_bars_for(data_dir: &Path, config: &BotConfig) -> Result<Vec<OhlcvBar>, ScalperError> {
    let bars = CsvAdapter::new(data_dir.to_path_buf()).load_bars(&config.symbol)?;
    info!(symbol = %config.symbol, bars = bars.len(), "loaded bars");

    // Nothing can leave NEUTRAL with fewer bars than the slow EMA.
    if bars.len() < config.ema_slow_period {
        return Err(ScalperError::InsufficientData {
            symbol: config.symbol.clone(),
            bars: bars.len(),
            minimum: config.ema_slow_period,
        });
    }
    Ok(bars)
}

pub fn run_replay(
    config_path: &Path,
    data_dir: &Path,
    symbol: Option<&str>,
    output_path: Option<&Path>,
    position: Option<(Side, f64)>,
) -> Result<(), ScalperError> {
    if let Some((_, entry)) = position {
        if !(entry.is_finite() && entry > 0.0) {
            return Err(ScalperError::invalid("cli", "entry", "must be positive"));
        }
    }

    let config = load_validated(config_path, symbol)?;
    let bars = load_bars_for(data_dir, &config)?;
    let bar_count = bars.len();
    let warmup = config.warmup_bars();
    if bar_count <= warmup {
        warn!(bars = bar_count, warmup, "replay is shorter than full indicator warm-up");
    }

    let mut engine = ScalpingEngine::new(config.clone());
    if let Some((side, entry)) = position {
        engine.update_position(Some(Position {
            symbol: config.symbol.clone(),
            side,
            qty: 1.0,
            avg_entry_price: entry,
        }));
    }

    engine.start();
    let signals: Vec<TradeSignal> = bars
        .into_iter()
        .filter_map(|bar| engine.on_bar(bar))
        .filter(|s| s.kind.is_actionable())
        .collect();
    let final_regime = engine.detect_regime();
    engine.stop();

    info!(
        symbol = %config.symbol,
        bars = bar_count,
        signals = signals.len(),
        regime = %final_regime,
        "replay complete"
    );

    match output_path {
        Some(path) => {
            CsvAdapter::new(data_dir.to_path_buf()).write(&signals, path)?;
            info!(path = %path.display(), "signals written");
        }
        None => {
            for signal in &signals {
                println!("{}", format_signal(signal));
            }
        }
    }
    Ok(())
}

pub fn run_validate(config_path: &Path) -> Result<(), ScalperError> {
    let config = load_validated(config_path, None)?;
    println!("Config OK");
    print_config(&config);
    Ok(())
}

pub fn run_size(config_path: &Path, equity: f64, price: f64) -> Result<(), ScalperError> {
    if !(equity.is_finite() && equity > 0.0) {
        return Err(ScalperError::invalid("cli", "equity", "must be positive"));
    }
    if !(price.is_finite() && price > 0.0) {
        return Err(ScalperError::invalid("cli", "price", "must be positive"));
    }
    let config = load_validated(config_path, None)?;
    let engine = ScalpingEngine::new(config);
    println!("{}", engine.size_position(equity, price));
    Ok(())
}

pub fn run_indicators(
    config_path: &Path,
    data_dir: &Path,
    symbol: Option<&str>,
) -> Result<(), ScalperError> {
    let config = load_validated(config_path, symbol)?;
    let bars = load_bars_for(data_dir, &config)?;

    let mut engine = ScalpingEngine::new(config);
    engine.replace_bars(bars);
    let snapshot = engine.indicators();
    let regime = engine.detect_regime();

    for key in IndicatorKey::ALL {
        match snapshot.get(key) {
            Some(v) => println!("{:<18}{v:.4}", key.as_str()),
            None => println!("{:<18}-", key.as_str()),
        }
    }
    println!("{:<18}{:?}", "crossover", snapshot.crossover);
    println!("{:<18}{}", "regime", regime);
    Ok(())
}

fn format_signal(signal: &TradeSignal) -> String {
    let when = chrono::DateTime::from_timestamp_millis(signal.timestamp)
        .map(|dt| dt.format("%Y-%m-%dT%H:%M:%SZ").to_string())
        .unwrap_or_else(|| signal.timestamp.to_string());
    format!(
        "{when} {} {} {:.4} {:.2}",
        signal.symbol, signal.kind, signal.price, signal.confidence
    )
}

fn print_config(c: &BotConfig) {
    println!("[bot]");
    println!("symbol = {}", c.symbol);
    println!("semi_auto_mode = {}", c.semi_auto_mode);
    println!("is_paper_mode = {}", c.is_paper_mode);
    println!("[indicators]");
    println!("ema_fast_period = {}", c.ema_fast_period);
    println!("ema_slow_period = {}", c.ema_slow_period);
    println!("rsi_period = {}", c.rsi_period);
    println!("rsi_oversold = {}", c.rsi_oversold);
    println!("rsi_overbought = {}", c.rsi_overbought);
    println!("macd_fast = {}", c.macd_fast);
    println!("macd_slow = {}", c.macd_slow);
    println!("macd_signal = {}", c.macd_signal);
    println!("bollinger_period = {}", c.bollinger_period);
    println!("bollinger_stddev = {}", c.bollinger_stddev);
    println!("stochastic_k = {}", c.stochastic_k);
    println!("stochastic_d = {}", c.stochastic_d);
    println!("stochastic_smoothing = {}", c.stochastic_smoothing);
    println!("[risk]");
    println!("target_percent = {}", c.target_percent);
    println!("stop_percent = {}", c.stop_percent);
    println!("max_risk_percent = {}", c.max_risk_percent);
    println!("daily_loss_limit = {}", c.daily_loss_limit);
    println!("use_trailing_stop = {}", c.use_trailing_stop);
}
