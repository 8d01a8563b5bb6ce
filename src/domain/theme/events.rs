use serde::{Deserialize, Serialize};

use crate::event_sourcing::core::{deserialize_event, DomainEvent};
use super::errors::ThemeError;
use super::value_objects::{Align, RgbaColor, ThemeState};

// ============================================================================
// Theme Events - Domain Events for Theme Aggregate
// ============================================================================

/// Theme Event - Union type for all theme events
///
/// Attribute events carry only the new values, never the whole state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ThemeEvent {
    Created(ThemeCreated),
    LogoPositionChanged(LogoPositionChanged),
    HeaderColorChanged(HeaderColorChanged),
    HeaderAlignmentChanged(HeaderAlignmentChanged),
    StateChanged(ThemeStateChanged),
}

impl DomainEvent for ThemeEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ThemeEvent::Created(_) => "ThemeCreated",
            ThemeEvent::LogoPositionChanged(_) => "LogoPositionChanged",
            ThemeEvent::HeaderColorChanged(_) => "HeaderColorChanged",
            ThemeEvent::HeaderAlignmentChanged(_) => "HeaderAlignmentChanged",
            ThemeEvent::StateChanged(_) => "ThemeStateChanged",
        }
    }
}

impl ThemeEvent {
    /// Build an event supplied from outside the aggregate, e.g. an HTTP body
    /// tagged with its event type name.
    ///
    /// Only attribute changes may be supplied this way. Creation and
    /// lifecycle events are produced by the aggregate itself, so their names
    /// are rejected like any other unknown type.
    pub fn decode(event_type: &str, json: &str) -> Result<Self, ThemeError> {
        let invalid = |e: anyhow::Error| ThemeError::InvalidInput(format!("{}: {}", event_type, e));

        match event_type {
            "LogoPositionChanged" => deserialize_event(json)
                .map(ThemeEvent::LogoPositionChanged)
                .map_err(invalid),
            "HeaderColorChanged" => deserialize_event(json)
                .map(ThemeEvent::HeaderColorChanged)
                .map_err(invalid),
            "HeaderAlignmentChanged" => deserialize_event(json)
                .map(ThemeEvent::HeaderAlignmentChanged)
                .map_err(invalid),
            other => Err(ThemeError::UnknownEvent(other.to_string())),
        }
    }
}

// ============================================================================
// Individual Event Types
// ============================================================================

/// Theme Created - identity established
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeCreated {
    pub name: String,
}

/// Logo moved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogoPositionChanged {
    pub left: f64,
    pub top: f64,
}

/// Header recolored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderColorChanged {
    pub color: RgbaColor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderAlignmentChanged {
    pub align: Align,
}

/// Lifecycle transition. Legality is checked by the command, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeStateChanged {
    pub state: ThemeState,
}

// ============================================================================
// Unit Tests
// ============================================================================
