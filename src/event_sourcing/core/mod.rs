// ============================================================================
// Event Sourcing Core - Generic Infrastructure Abstractions
// ============================================================================
//
// This module contains GENERIC, reusable event sourcing infrastructure
// that works with ANY domain aggregate.
//
// Key Principles:
// - No domain-specific code (no Theme, no colors, no logos)
// - Generic over aggregate types
// - Reusable across all aggregates
//
// ============================================================================

pub mod aggregate;
pub mod event;

// Re-export core types for convenience
pub use aggregate::{Aggregate, EventSourced};
pub use event::{DomainEvent, EventEnvelope, serialize_event, deserialize_event};
