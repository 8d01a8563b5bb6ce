use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

use crate::event_sourcing::{DomainEvent, EventEnvelope, EventLog};
use crate::metrics::Metrics;
use crate::utils::{retry_on_transient, IsTransient, RetryConfig};

use super::aggregate::Theme;
use super::commands::ThemeCommand;
use super::errors::ThemeError;
use super::events::ThemeEvent;

// ============================================================================
// Theme Service
// ============================================================================
//
// Orchestrates: Event Log → Replay → Command → Commit → Event Log
//
// Every request works on a fresh projection; durable state lives only in
// the log. Writes (load + command + commit) run one at a time so that two
// requests on the same theme cannot interleave and lose an update.
//
// ============================================================================

pub struct ThemeService {
    log: Arc<dyn EventLog<ThemeEvent>>,
    metrics: Arc<Metrics>,
    retry: RetryConfig,
    write_gate: Mutex<()>,
}

impl IsTransient for ThemeError {
    fn is_transient(&self) -> bool {
        matches!(self, ThemeError::StorageFailure(_))
    }
}

impl ThemeService {
    pub fn new(log: Arc<dyn EventLog<ThemeEvent>>, metrics: Arc<Metrics>, retry: RetryConfig) -> Self {
        Self {
            log,
            metrics,
            retry,
            write_gate: Mutex::new(()),
        }
    }

    /// Create a new theme and persist its `Created` event
    pub async fn create_theme(&self, name: &str) -> Result<Theme, ThemeError> {
        let mut theme = Theme::create(name)?;

        let _guard = self.write_gate.lock().await;
        if !self.log.retrieve(name)?.is_empty() {
            return Err(ThemeError::Conflict {
                name: name.to_string(),
                reason: "theme already exists".to_string(),
            });
        }

        self.commit(&mut theme).await?;
        tracing::info!(theme = %name, "Theme created");
        Ok(theme)
    }

    /// Replay the theme from the log. An empty history means `NotFound`.
    pub fn load_theme(&self, name: &str) -> Result<Theme, ThemeError> {
        let events = self.log.retrieve(name)?;
        let theme = Theme::replay(events);

        if !theme.exists() {
            return Err(ThemeError::NotFound(name.to_string()));
        }

        tracing::debug!(theme = %name, version = theme.version(), "Theme loaded");
        Ok(theme)
    }

    /// Apply an externally supplied, already validated event and persist it
    pub async fn apply_change(&self, name: &str, event: ThemeEvent) -> Result<Theme, ThemeError> {
        let _guard = self.write_gate.lock().await;
        let mut theme = self.load_theme(name)?;

        tracing::debug!(theme = %name, event_type = event.event_type(), "Applying external event");
        theme.apply_external_event(event);

        self.commit(&mut theme).await?;
        Ok(theme)
    }

    /// Run a command; a rejected command persists nothing
    pub async fn execute(&self, name: &str, command: ThemeCommand) -> Result<Theme, ThemeError> {
        let _guard = self.write_gate.lock().await;
        let mut theme = self.load_theme(name)?;

        let outcome = match command {
            ThemeCommand::Activate => theme.activate(),
        };

        if let Err(error) = outcome {
            tracing::warn!(theme = %name, command = command.name(), error = %error, "Command rejected");
            self.metrics.record_rejected_command(command.name());
            return Err(error);
        }

        self.commit(&mut theme).await?;
        Ok(theme)
    }

    pub async fn activate(&self, name: &str) -> Result<Theme, ThemeError> {
        self.execute(name, ThemeCommand::Activate).await
    }

    /// The theme as it was before its last event. Nothing is written.
    pub fn undo_preview(&self, name: &str) -> Result<Theme, ThemeError> {
        Ok(self.load_theme(name)?.undo())
    }

    /// The theme built from its first `version` events. Nothing is written.
    pub fn theme_at_version(&self, name: &str, version: usize) -> Result<Theme, ThemeError> {
        Ok(self.load_theme(name)?.at_version(version))
    }

    /// Stored events with their log metadata, oldest first
    pub fn events(&self, name: &str) -> Result<Vec<EventEnvelope<ThemeEvent>>, ThemeError> {
        let history = self.log.history(name)?;
        if history.is_empty() {
            return Err(ThemeError::NotFound(name.to_string()));
        }
        Ok(history)
    }

    /// Flush uncommitted events to the log. A storage failure is retried;
    /// each attempt resumes at the first event not yet appended.
    async fn commit(&self, theme: &mut Theme) -> Result<(), ThemeError> {
        if theme.is_clean() {
            return Ok(());
        }

        let started = Instant::now();
        let name = theme.name().to_string();
        let pending = theme.uncommitted_events().len();
        let log = &self.log;
        let metrics = &self.metrics;

        let result = retry_on_transient(self.retry.clone(), |_attempt| {
            let published = theme.commit(|event| {
                log.save(&name, event)?;
                metrics.record_append(event.event_type());
                Ok::<(), ThemeError>(())
            });
            std::future::ready(published)
        })
        .await
        .into_result();

        self.metrics
            .record_commit(started.elapsed().as_secs_f64(), result.is_ok());

        match result {
            Ok(_) => {
                tracing::info!(theme = %name, events = pending, version = theme.version(), "Committed events");
                Ok(())
            }
            Err(error) => {
                tracing::error!(
                    theme = %name,
                    uncommitted = theme.uncommitted_events().len(),
                    error = %error,
                    "Commit failed"
                );
                Err(error)
            }
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
