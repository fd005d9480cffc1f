//! Per-symbol scalping engine.
//!
//! Wires the rolling window, indicator computation, regime classifier,
//! signal synthesizer, position sizer and lifecycle together. One instance
//! per traded symbol; callers serialize all mutating calls. Nothing here
//! blocks or performs I/O.

use tracing::{debug, info};

use crate::domain::bot_config::BotConfig;
use crate::domain::channels::{EventChannel, StateChannel};
use crate::domain::indicator::IndicatorSnapshot;
use crate::domain::indicator_helpers::compute_indicators;
use crate::domain::lifecycle::{BotLifecycle, LifecycleState};
use crate::domain::ohlcv::{OhlcvBar, Tick};
use crate::domain::position::Position;
use crate::domain::regime::{classify_regime, Regime};
use crate::domain::signal::{evaluate_signal, TradeSignal};
use crate::domain::sizing::size_position;
use crate::domain::window::RollingWindow;

pub struct ScalpingEngine {
    config: BotConfig,
    window: RollingWindow,
    position: Option<Position>,
    lifecycle: BotLifecycle,
    last_price: Option<f64>,
    last_timestamp: i64,
    status: StateChannel<LifecycleState>,
    regime: StateChannel<Regime>,
    signals: EventChannel<TradeSignal>,
}

impl ScalpingEngine {
    pub fn new(config: BotConfig) -> Self {
        Self {
            config,
            window: RollingWindow::new(),
            position: None,
            lifecycle: BotLifecycle::new(),
            last_price: None,
            last_timestamp: 0,
            status: StateChannel::new(LifecycleState::Stopped),
            regime: StateChannel::new(Regime::Neutral),
            signals: EventChannel::default(),
        }
    }

    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    /// Replaces the whole parameter set.
    pub fn update_config(&mut self, config: BotConfig) {
        info!(symbol = %config.symbol, "config updated");
        self.config = config;
    }

    pub fn window(&self) -> &RollingWindow {
        &self.window
    }

    pub fn last_price(&self) -> Option<f64> {
        self.last_price
    }

    // --- market data ---

    pub fn replace_bars(&mut self, bars: Vec<OhlcvBar>) {
        debug!(count = bars.len(), "replacing bar window");
        self.window.replace(bars);
        if let Some(latest) = self.window.latest() {
            self.last_price = Some(latest.close);
            self.last_timestamp = latest.timestamp;
        }
    }

    /// Appends a closed bar. While RUNNING the bar's close is evaluated and
    /// the resulting signal returned; otherwise the bar only warms the window.
    pub fn on_bar(&mut self, bar: OhlcvBar) -> Option<TradeSignal> {
        let (price, timestamp) = (bar.close, bar.timestamp);
        self.window.append(bar);
        self.last_price = Some(price);
        self.last_timestamp = timestamp;

        if !self.lifecycle.is_running() {
            debug!(state = %self.lifecycle.state(), "bar buffered without evaluation");
            return None;
        }
        Some(self.evaluate_at(price, timestamp))
    }

    /// Records the latest tradable price between bars.
    pub fn on_tick(&mut self, tick: Tick) -> Option<TradeSignal> {
        self.last_price = Some(tick.price);
        self.last_timestamp = tick.timestamp;

        if !self.lifecycle.is_running() {
            debug!(state = %self.lifecycle.state(), "tick ignored");
            return None;
        }
        Some(self.evaluate_at(tick.price, tick.timestamp))
    }

    // --- analysis ---

    /// Evaluates `price` against the current window regardless of lifecycle
    /// state and publishes the outcome.
    pub fn analyze(&mut self, price: f64) -> TradeSignal {
        self.evaluate_at(price, self.last_timestamp)
    }

    pub fn indicators(&mut self) -> IndicatorSnapshot {
        compute_indicators(self.window.as_slice(), &self.config)
    }

    /// Classifies the current window and publishes the regime.
    pub fn detect_regime(&mut self) -> Regime {
        let regime = classify_regime(self.window.as_slice(), &self.config);
        self.regime.publish(regime);
        regime
    }

    fn evaluate_at(&mut self, price: f64, timestamp: i64) -> TradeSignal {
        if self.window.is_empty() {
            return TradeSignal::no_signal(&self.config.symbol, price, timestamp);
        }

        let bars = self.window.as_slice();
        let indicators = compute_indicators(bars, &self.config);
        let regime = classify_regime(bars, &self.config);
        self.regime.publish(regime);

        let signal = evaluate_signal(
            &self.config,
            price,
            timestamp,
            &indicators,
            regime,
            self.position.as_ref(),
        );

        debug!(
            kind = %signal.kind,
            price = signal.price,
            confidence = signal.confidence,
            %regime,
            "signal"
        );
        self.signals.publish(signal.clone());
        signal
    }

    // --- positions & sizing ---

    pub fn update_position(&mut self, position: Option<Position>) {
        match &position {
            Some(p) => info!(
                side = %p.side,
                qty = p.qty,
                entry = p.avg_entry_price,
                "position updated"
            ),
            None => info!("position closed"),
        }
        self.position = position;
    }

    pub fn position(&self) -> Option<&Position> {
        self.position.as_ref()
    }

    pub fn size_position(&self, equity: f64, price: f64) -> u64 {
        size_position(
            equity,
            price,
            self.config.max_risk_percent,
            self.config.stop_percent,
        )
    }

    // --- lifecycle ---

    pub fn status(&self) -> LifecycleState {
        self.lifecycle.state()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.lifecycle.last_error()
    }

    pub fn start(&mut self) {
        let state = self.lifecycle.start();
        self.status.publish(state);
    }

    pub fn stop(&mut self) {
        let state = self.lifecycle.stop();
        self.status.publish(state);
    }

    pub fn pause(&mut self) {
        let state = self.lifecycle.pause();
        self.status.publish(state);
    }

    /// Called by an external monitor when something outside the engine fails.
    pub fn fail(&mut self, reason: impl Into<String>) {
        let state = self.lifecycle.fail(reason);
        self.status.publish(state);
    }

    // --- subscriptions ---

    pub fn subscribe_status(&self) -> tokio::sync::watch::Receiver<LifecycleState> {
        self.status.subscribe()
    }

    pub fn subscribe_regime(&self) -> tokio::sync::watch::Receiver<Regime> {
        self.regime.subscribe()
    }

    pub fn subscribe_signals(&self) -> tokio::sync::broadcast::Receiver<TradeSignal> {
        self.signals.subscribe()
    }
}
