//! Publish/subscribe channels for engine outputs.
//!
//! Two kinds, with different delivery guarantees:
//!
//! - [`StateChannel`] caches the latest value (`tokio::sync::watch`). A late
//!   subscriber immediately sees the current state. Used for lifecycle state
//!   and regime.
//! - [`EventChannel`] fans out discrete events (`tokio::sync::broadcast`).
//!   There is no history: a receiver only sees events sent after it
//!   subscribed. A receiver that falls more than `capacity` events behind
//!   gets `RecvError::Lagged` and loses the oldest ones. Used for trade
//!   signals.
//!
//! Publishing never blocks and never fails when nobody is listening.

use tokio::sync::{broadcast, watch};

pub const DEFAULT_EVENT_CAPACITY: usize = 256;

#[derive(Debug)]
pub struct StateChannel<T> {
    tx: watch::Sender<T>,
}

impl<T: Clone + PartialEq> StateChannel<T> {
    pub fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Stores `value`; subscribers are only notified when it changed.
    pub fn publish(&self, value: T) {
        self.tx.send_if_modified(|current| {
            if *current == value {
                false
            } else {
                *current = value;
                true
            }
        });
    }

    pub fn current(&self) -> T {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }
}

#[derive(Debug)]
pub struct EventChannel<T> {
    tx: broadcast::Sender<T>,
}

impl<T: Clone> EventChannel<T> {
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Returns the number of receivers the event reached.
    pub fn publish(&self, event: T) -> usize {
        self.tx.send(event).unwrap_or(0)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<T> {
        self.tx.subscribe()
    }
}

impl<T: Clone> Default for EventChannel<T> {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}
