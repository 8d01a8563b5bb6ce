use serde::{Deserialize, Serialize};

use crate::event_sourcing::core::{Aggregate, EventSourced};
use super::value_objects::{HeaderRule, LogoRule, ThemeState};
use super::commands::ThemeCommand;
use super::events::*;
use super::errors::ThemeError;

// ============================================================================
// Theme Aggregate - Domain Logic
// ============================================================================

/// Projected state of a theme. Only ever mutated through `apply_event`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThemeAggregate {
    // Identity (empty until the Created event has been applied)
    pub name: String,

    // Current State (derived from events)
    pub state: ThemeState,
    pub header: HeaderRule,
    pub logo: LogoRule,
}

/// A live theme: projected state plus its committed/uncommitted events
pub type Theme = EventSourced<ThemeAggregate>;

// ============================================================================
// Aggregate Trait Implementation
// ============================================================================

impl Aggregate for ThemeAggregate {
    type Event = ThemeEvent;
    type Command = ThemeCommand;
    type Error = ThemeError;

    fn apply_event(&mut self, event: &Self::Event) {
        match event {
            ThemeEvent::Created(e) => {
                self.name = e.name.clone();
                self.state = ThemeState::Inactive;
            }
            ThemeEvent::LogoPositionChanged(e) => {
                self.logo.left = e.left;
                self.logo.top = e.top;
            }
            ThemeEvent::HeaderColorChanged(e) => {
                self.header.color = e.color;
            }
            ThemeEvent::HeaderAlignmentChanged(e) => {
                self.header.align = e.align;
            }
            ThemeEvent::StateChanged(e) => {
                self.state = e.state;
            }
        }
    }

    fn handle_command(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        if self.name.is_empty() {
            return Err(ThemeError::NotFound("<unnamed>".to_string()));
        }

        match command {
            ThemeCommand::Activate => {
                if self.state != ThemeState::Inactive {
                    return Err(ThemeError::invalid_state(&self.name, self.state, ThemeState::Inactive));
                }

                Ok(vec![ThemeEvent::StateChanged(ThemeStateChanged {
                    state: ThemeState::Active,
                })])
            }
        }
    }
}

// ============================================================================
// Theme Operations
// ============================================================================

impl EventSourced<ThemeAggregate> {
    /// Fresh theme: a single uncommitted `Created` event.
    ///
    /// The name doubles as a URL path segment and a `Location` header value:
    /// printable ASCII only, without `/ ? # % \`.
    pub fn create(name: &str) -> Result<Self, ThemeError> {
        if name.trim().is_empty() {
            return Err(ThemeError::InvalidInput("theme name must not be empty".to_string()));
        }
        if let Some(c) = name.chars().find(|c| !is_name_char(*c)) {
            return Err(ThemeError::InvalidInput(format!(
                "theme name contains forbidden character {:?}",
                c
            )));
        }

        let mut theme = Self::default();
        theme.apply(ThemeEvent::Created(ThemeCreated {
            name: name.to_string(),
        }));
        Ok(theme)
    }

    /// INACTIVE -> ACTIVE. Fails with `Conflict` in any other state, staging nothing.
    pub fn activate(&mut self) -> Result<(), ThemeError> {
        self.execute(&ThemeCommand::Activate)
    }

    /// Apply an already validated event coming from outside, staging it for commit.
    pub fn apply_external_event(&mut self, event: ThemeEvent) {
        self.apply(event);
    }

    pub fn name(&self) -> &str {
        &self.state().name
    }

    /// A replay that produced no identity: there is no such theme.
    pub fn exists(&self) -> bool {
        !self.state().name.is_empty()
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_graphic() && !matches!(c, '/' | '?' | '#' | '%' | '\\')
}

// ============================================================================
// Unit Tests
// ============================================================================
