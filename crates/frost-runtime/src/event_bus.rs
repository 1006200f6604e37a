//! Event queue between the controller and its host

use crate::event::GameEvent;

/// Events pile up during ticks and the host drains them when it likes
#[derive(Debug, Default)]
pub struct EventBus {
    events: Vec<GameEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take every pending event, oldest first
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Pending events without consuming them
    pub fn pending(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}
