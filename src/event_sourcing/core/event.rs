use serde::{de::DeserializeOwned, Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use anyhow::Result;

// ============================================================================
// Event Envelope - Storage Metadata Around a Domain Event
// ============================================================================
//
// Wraps domain events with the metadata an event log assigns on append.
// This is GENERIC and works with ANY event type.
//
// ============================================================================

/// Generic Event Envelope - wraps any domain event with metadata
///
/// Type Parameter:
/// - `E`: The domain event type (must implement DomainEvent trait)
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct EventEnvelope<E> {
    // Event Identity
    pub event_id: Uuid,
    pub stream_id: String,
    /// 0-based position within the stream
    pub sequence_number: u64,

    // Event Type Information
    pub event_type: String,

    // Event Payload
    pub event_data: E,

    // Timing
    pub recorded_at: DateTime<Utc>,
}

impl<E: DomainEvent> EventEnvelope<E> {
    pub fn new(stream_id: impl Into<String>, sequence_number: u64, event_data: E) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            stream_id: stream_id.into(),
            sequence_number,
            event_type: event_data.event_type().to_string(),
            event_data,
            recorded_at: Utc::now(),
        }
    }
}

// ============================================================================
// Domain Event Trait
// ============================================================================

/// Generic Domain Event trait
///
/// All domain events must implement this trait to be used with the event log.
/// Events are immutable facts: once built they are only cloned, never mutated.
pub trait DomainEvent: Serialize + DeserializeOwned + Clone + std::fmt::Debug + Send + Sync {
    /// Stable name of the concrete variant, used for storage and listings
    fn event_type(&self) -> &'static str;
}

// ============================================================================
// Event Serialization Helpers
// ============================================================================

pub fn serialize_event<E: Serialize>(event: &E) -> Result<String> {
    Ok(serde_json::to_string(event)?)
}

pub fn deserialize_event<E: for<'de> Deserialize<'de>>(json: &str) -> Result<E> {
    Ok(serde_json::from_str(json)?)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
    struct TestEvent {
        data: String,
    }

    impl DomainEvent for TestEvent {
        fn event_type(&self) -> &'static str { "TestEvent" }
    }

    #[test]
    fn test_event_envelope_creation() {
        let event = TestEvent {
            data: "test".to_string(),
        };

        let envelope = EventEnvelope::new("acme", 3, event.clone());

        assert_eq!(envelope.stream_id, "acme");
        assert_eq!(envelope.sequence_number, 3);
        assert_eq!(envelope.event_type, "TestEvent");
        assert_eq!(envelope.event_data, event);
    }

    #[test]
    fn test_envelopes_get_distinct_ids() {
        let a = EventEnvelope::new("acme", 0, TestEvent { data: "a".into() });
        let b = EventEnvelope::new("acme", 1, TestEvent { data: "a".into() });

        assert_ne!(a.event_id, b.event_id);
    }

    #[test]
    fn test_event_serialization() {
        let event = TestEvent {
            data: "test data".to_string(),
        };

        let json = serialize_event(&event).unwrap();
        let deserialized: TestEvent = deserialize_event(&json).unwrap();

        assert_eq!(event, deserialized);
    }

    #[test]
    fn test_deserialize_rejects_malformed_json() {
        let result: Result<TestEvent> = deserialize_event("{\"data\":");
        assert!(result.is_err());
    }
}
