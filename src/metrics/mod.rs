use prometheus::{
    HistogramOpts, Histogram, IntCounter, IntCounterVec, Opts, Registry,
};

// ============================================================================
// Metrics Module - Prometheus metrics for observability
// ============================================================================
//
// Provides metrics for:
// - Events appended to the log (by event type)
// - Commands rejected by aggregates (by command)
// - Commit failures and commit latency
//
// All metrics are registered with Prometheus and can be scraped via /metrics
// ============================================================================

/// Central metrics registry for the entire application
pub struct Metrics {
    registry: Registry,

    pub events_appended: IntCounterVec,
    pub commands_rejected: IntCounterVec,
    pub commit_failures: IntCounter,
    pub commit_duration: Histogram,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let events_appended = IntCounterVec::new(
            Opts::new("theme_events_appended_total", "Total events appended to the event log"),
            &["event_type"],
        )?;
        registry.register(Box::new(events_appended.clone()))?;

        let commands_rejected = IntCounterVec::new(
            Opts::new("theme_commands_rejected_total", "Total commands rejected by the current theme state"),
            &["command"],
        )?;
        registry.register(Box::new(commands_rejected.clone()))?;

        let commit_failures = IntCounter::new(
            "theme_commit_failures_total",
            "Total commits that gave up with events still uncommitted",
        )?;
        registry.register(Box::new(commit_failures.clone()))?;

        let commit_duration = Histogram::with_opts(
            HistogramOpts::new("theme_commit_duration_seconds", "Commit duration, retries included")
                .buckets(vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0]),
        )?;
        registry.register(Box::new(commit_duration.clone()))?;

        Ok(Self {
            registry,
            events_appended,
            commands_rejected,
            commit_failures,
            commit_duration,
        })
    }

    /// Get the Prometheus registry for exposing metrics via HTTP
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn record_append(&self, event_type: &str) {
        self.events_appended.with_label_values(&[event_type]).inc();
    }

    pub fn record_rejected_command(&self, command: &str) {
        self.commands_rejected.with_label_values(&[command]).inc();
    }

    pub fn record_commit(&self, duration_secs: f64, success: bool) {
        if !success {
            self.commit_failures.inc();
        }
        self.commit_duration.observe(duration_secs);
    }
}
