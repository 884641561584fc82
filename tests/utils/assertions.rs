//! Test assertion helpers for the events a controller publishes
#![allow(dead_code)] // Test utilities may not all be used in every test

use tokio::sync::broadcast;

use paperdate::GameEvent;

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Everything currently buffered on the receiver, in emission order
pub fn drain(receiver: &mut broadcast::Receiver<GameEvent>) -> Vec<GameEvent> {
    let mut events = Vec::new();
    while let Ok(event) = receiver.try_recv() {
        events.push(event);
    }
    events
}

/// Event types, skipping status changes
pub fn significant_types(events: &[GameEvent]) -> Vec<&'static str> {
    events
        .iter()
        .filter(|e| !matches!(e, GameEvent::StatusChanged { .. }))
        .map(GameEvent::event_type)
        .collect()
}

pub fn count_of(events: &[GameEvent], event_type: &str) -> usize {
    events
        .iter()
        .filter(|e| e.event_type() == event_type)
        .count()
}
