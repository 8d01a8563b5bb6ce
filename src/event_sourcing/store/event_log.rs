use std::collections::HashMap;
use std::sync::RwLock;

use crate::event_sourcing::core::{DomainEvent, EventEnvelope};

// ============================================================================
// Event Log - Repository for Events
// ============================================================================
//
// Append-only, per-stream ordered sequence of events.
//
// Responsibilities:
// 1. Append events in call order (no validation of content)
// 2. Read back the full history of a stream
// 3. Treat an unknown stream as an empty one
//
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum EventLogError {
    #[error("event log unavailable: {0}")]
    Unavailable(String),
}

/// Storage contract for event streams.
///
/// `save` must keep call order as storage order. `commit` on an aggregate
/// calls `save` once per event and may be retried after a failure, so a
/// durable backend should make `save` idempotent per (stream, position) to
/// get at-least-once delivery without duplicates. Reads must return a
/// consistent snapshot, never a partially appended sequence.
pub trait EventLog<E: DomainEvent>: Send + Sync {
    /// Append one event, creating the stream if needed.
    /// Returns the 0-based sequence number the event was stored at.
    fn save(&self, stream_id: &str, event: &E) -> Result<u64, EventLogError>;

    /// Full ordered history with storage metadata. Empty for an unknown stream.
    fn history(&self, stream_id: &str) -> Result<Vec<EventEnvelope<E>>, EventLogError>;

    /// Full ordered event sequence. Empty for an unknown stream.
    fn retrieve(&self, stream_id: &str) -> Result<Vec<E>, EventLogError> {
        Ok(self
            .history(stream_id)?
            .into_iter()
            .map(|envelope| envelope.event_data)
            .collect())
    }
}

// ============================================================================
// In-Memory Event Log
// ============================================================================

/// Reference `EventLog` keeping every stream in a map behind one lock.
///
/// Appends take the write lock, so they are serialized across all streams.
/// Reads clone under the read lock.
#[derive(Debug)]
pub struct InMemoryEventLog<E> {
    streams: RwLock<HashMap<String, Vec<EventEnvelope<E>>>>,
}

impl<E> InMemoryEventLog<E> {
    pub fn new() -> Self {
        Self {
            streams: RwLock::new(HashMap::new()),
        }
    }
}

impl<E> Default for InMemoryEventLog<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: DomainEvent> EventLog<E> for InMemoryEventLog<E> {
    fn save(&self, stream_id: &str, event: &E) -> Result<u64, EventLogError> {
        let mut streams = self
            .streams
            .write()
            .map_err(|e| EventLogError::Unavailable(e.to_string()))?;

        let stream = streams.entry(stream_id.to_string()).or_default();
        let sequence_number = stream.len() as u64;
        stream.push(EventEnvelope::new(stream_id, sequence_number, event.clone()));

        tracing::debug!(
            stream_id = %stream_id,
            sequence_number = sequence_number,
            event_type = event.event_type(),
            "Appended event to log"
        );

        Ok(sequence_number)
    }

    fn history(&self, stream_id: &str) -> Result<Vec<EventEnvelope<E>>, EventLogError> {
        let streams = self
            .streams
            .read()
            .map_err(|e| EventLogError::Unavailable(e.to_string()))?;

        let events = streams.get(stream_id).cloned().unwrap_or_default();

        tracing::debug!("Loaded {} events for stream {}", events.len(), stream_id);
        Ok(events)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
