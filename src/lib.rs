//! scalper: intraday scalping signal engine.
//!
//! Hexagonal architecture: pure indicator, regime and signal logic in
//! [`domain`], port traits in [`ports`], file-backed implementations in
//! [`adapters`], and the replay/inspection binary front-end in [`cli`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
