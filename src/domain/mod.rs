//! Core domain types and logic.

pub mod ohlcv;
pub mod window;
pub mod indicator;
pub mod indicator_helpers;
pub mod regime;
pub mod signal;
pub mod position;
pub mod sizing;
pub mod lifecycle;
pub mod channels;
pub mod engine;
pub mod bot_config;
pub mod config_validation;
pub mod error;
