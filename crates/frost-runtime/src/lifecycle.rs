//! Lifecycle state machine for a game controller.
//!
//! A controller is started once, then moves between [`LifecycleState::Running`]
//! and [`LifecycleState::Paused`]. Every transition is validated here; an
//! invalid one returns [`FrostError::InvalidTransition`] and leaves the state
//! untouched, so callers can log it and carry on.

use frost_core::{FrostError, Result};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    Running,
    Paused,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleState::Running => write!(f, "running"),
            LifecycleState::Paused => write!(f, "paused"),
        }
    }
}

/// Tracks whether the controller has started and whether it is running.
#[derive(Debug, Default)]
pub struct Lifecycle {
    state: Option<LifecycleState>,
}

impl Lifecycle {
    /// A lifecycle that has not been started yet
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> Option<LifecycleState> {
        self.state
    }

    pub fn is_started(&self) -> bool {
        self.state.is_some()
    }

    pub fn is_running(&self) -> bool {
        self.state == Some(LifecycleState::Running)
    }

    pub fn is_paused(&self) -> bool {
        self.state == Some(LifecycleState::Paused)
    }

    /// Not started -> Running. Only valid once.
    pub fn start(&mut self) -> Result<()> {
        if self.state.is_some() {
            return Err(self.rejected("start"));
        }
        self.state = Some(LifecycleState::Running);
        Ok(())
    }

    /// Running -> Paused
    pub fn pause(&mut self) -> Result<()> {
        self.transition(LifecycleState::Running, LifecycleState::Paused, "pause")
    }

    /// Paused -> Running
    pub fn resume(&mut self) -> Result<()> {
        self.transition(LifecycleState::Paused, LifecycleState::Running, "resume")
    }

    /// Paused -> Running, for a restart that rebuilds the level
    pub fn restart(&mut self) -> Result<()> {
        self.transition(LifecycleState::Paused, LifecycleState::Running, "restart")
    }

    fn transition(
        &mut self,
        from: LifecycleState,
        to: LifecycleState,
        action: &str,
    ) -> Result<()> {
        if self.state != Some(from) {
            return Err(self.rejected(action));
        }
        self.state = Some(to);
        Ok(())
    }

    fn rejected(&self, action: &str) -> FrostError {
        let from = self
            .state
            .map(|s| s.to_string())
            .unwrap_or_else(|| "not started".to_string());
        FrostError::invalid_transition(from, action)
    }
}
