//! Bot lifecycle state machine.
//!
//! STOPPED is the initial state. Every transition is caller-driven; nothing
//! here times out or moves on its own. ERROR is set by an external monitor.

use std::fmt;

use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LifecycleState {
    #[default]
    Stopped,
    Running,
    Paused,
    Error,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleState::Stopped => write!(f, "STOPPED"),
            LifecycleState::Running => write!(f, "RUNNING"),
            LifecycleState::Paused => write!(f, "PAUSED"),
            LifecycleState::Error => write!(f, "ERROR"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BotLifecycle {
    state: LifecycleState,
    last_error: Option<String>,
}

impl BotLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LifecycleState::Running
    }

    /// Reason given with the most recent transition into ERROR.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn start(&mut self) -> LifecycleState {
        self.last_error = None;
        self.transition(LifecycleState::Running)
    }

    pub fn stop(&mut self) -> LifecycleState {
        self.transition(LifecycleState::Stopped)
    }

    pub fn pause(&mut self) -> LifecycleState {
        self.transition(LifecycleState::Paused)
    }

    pub fn fail(&mut self, reason: impl Into<String>) -> LifecycleState {
        let reason = reason.into();
        error!(%reason, "bot entered error state");
        self.last_error = Some(reason);
        self.transition(LifecycleState::Error)
    }

    fn transition(&mut self, to: LifecycleState) -> LifecycleState {
        if self.state != to {
            info!(from = %self.state, to = %to, "lifecycle transition");
        }
        self.state = to;
        to
    }
}
