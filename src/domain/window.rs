//! Bounded rolling window of recent bars.
//!
//! Holds at most `capacity` bars in arrival order. Appending past capacity
//! evicts the oldest bar first. Bars are never reordered by timestamp.

use std::collections::VecDeque;

use crate::domain::ohlcv::OhlcvBar;

pub const DEFAULT_CAPACITY: usize = 200;

#[derive(Debug, Clone)]
pub struct RollingWindow {
    bars: VecDeque<OhlcvBar>,
    capacity: usize,
}

impl Default for RollingWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl RollingWindow {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            bars: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Clears the window and repopulates it. Only the newest `capacity` bars
    /// of `bars` are kept.
    pub fn replace(&mut self, bars: impl IntoIterator<Item = OhlcvBar>) {
        self.bars.clear();
        for bar in bars {
            self.append(bar);
        }
    }

    /// Adds one bar, evicting the oldest if the window is full.
    pub fn append(&mut self, bar: OhlcvBar) {
        if self.bars.len() == self.capacity {
            self.bars.pop_front();
        }
        self.bars.push_back(bar);
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn latest(&self) -> Option<&OhlcvBar> {
        self.bars.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &OhlcvBar> {
        self.bars.iter()
    }

    /// Contiguous view of the window, oldest first.
    pub fn as_slice(&mut self) -> &[OhlcvBar] {
        self.bars.make_contiguous()
    }
}
