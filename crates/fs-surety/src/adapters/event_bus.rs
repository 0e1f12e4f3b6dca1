//! Event Bus adapter
//!
//! Implements the EventBus port by recording published events in memory.

use crate::events::SuretyEvent;
use crate::ports::EventBus;
use async_trait::async_trait;

/// In-memory event bus adapter for testing and local wiring
pub struct InMemoryEventBus {
    events: parking_lot::RwLock<Vec<SuretyEvent>>,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self {
            events: parking_lot::RwLock::new(Vec::new()),
        }
    }

    pub fn get_events(&self) -> Vec<SuretyEvent> {
        self.events.read().clone()
    }

    pub fn event_count(&self) -> usize {
        self.events.read().len()
    }

    /// Most recent event, if any.
    pub fn last_event(&self) -> Option<SuretyEvent> {
        self.events.read().last().cloned()
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventBus for InMemoryEventBus {
    async fn publish(&self, event: SuretyEvent) -> Result<(), String> {
        self.events.write().push(event);
        Ok(())
    }
}
