use super::event::DomainEvent;

// ============================================================================
// Aggregate Root Pattern - Event Sourcing Core
// ============================================================================
//
// Key Principles:
// 1. State is derived from events (not stored directly)
// 2. Commands are validated before emitting events
// 3. Events represent facts that have already happened
// 4. Aggregates enforce business invariants
// 5. All state changes flow through events
//
// `Aggregate` is the domain half (projection + command rules).
// `EventSourced` is the generic engine that owns the event buffers.
//
// ============================================================================

/// Generic Aggregate trait - all event-sourced aggregates implement this
///
/// Type Parameters:
/// - `Event`: The domain event type for this aggregate
/// - `Command`: The command type for this aggregate
/// - `Error`: The error type for business rule violations
///
/// `Default` is the state before any event has been applied.
pub trait Aggregate: Default {
    type Event: DomainEvent;
    type Command;
    type Error;

    /// Fold one event into the state. Must be deterministic and must not
    /// re-validate business rules: the event already happened.
    fn apply_event(&mut self, event: &Self::Event);

    /// Handle command and emit events (business logic). An `Err` means no
    /// event is emitted.
    fn handle_command(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error>;
}

/// Live instance of an aggregate together with the events it was built from.
///
/// Invariant: `all_events() == committed ++ uncommitted`, and `state` is the
/// fold of `all_events()` over `A::default()`.
#[derive(Debug, Clone)]
pub struct EventSourced<A: Aggregate> {
    state: A,
    committed: Vec<A::Event>,
    uncommitted: Vec<A::Event>,
}

impl<A: Aggregate> Default for EventSourced<A> {
    fn default() -> Self {
        Self {
            state: A::default(),
            committed: Vec::new(),
            uncommitted: Vec::new(),
        }
    }
}

impl<A: Aggregate> EventSourced<A> {
    /// Rebuild an aggregate from an ordered event history. The result is clean:
    /// every replayed event counts as committed.
    pub fn replay(events: impl IntoIterator<Item = A::Event>) -> Self {
        let mut aggregate = Self::default();
        for event in events {
            aggregate.apply(event);
        }
        aggregate.committed = std::mem::take(&mut aggregate.uncommitted);
        aggregate
    }

    /// Apply an event to the state and stage it for commit.
    ///
    /// This is the only path that mutates `state`.
    pub fn apply(&mut self, event: A::Event) {
        self.state.apply_event(&event);
        self.uncommitted.push(event);
    }

    /// Run a command against the current state. Emitted events are applied
    /// and staged; a rejected command leaves the aggregate untouched.
    pub fn execute(&mut self, command: &A::Command) -> Result<(), A::Error> {
        let events = self.state.handle_command(command)?;
        for event in events {
            self.apply(event);
        }
        Ok(())
    }

    /// Hand every uncommitted event, in order, to `publisher`. An event moves
    /// to the committed set only after its publish succeeded.
    ///
    /// On the first failure the remaining events (the failed one included)
    /// stay uncommitted, so calling `commit` again resumes where it stopped.
    /// Returns how many events were published.
    pub fn commit<F, E>(&mut self, mut publisher: F) -> Result<usize, E>
    where
        F: FnMut(&A::Event) -> Result<(), E>,
    {
        let mut pending = std::mem::take(&mut self.uncommitted).into_iter();
        let mut published = 0;

        while let Some(event) = pending.next() {
            if let Err(error) = publisher(&event) {
                self.uncommitted = std::iter::once(event).chain(pending).collect();
                return Err(error);
            }
            self.committed.push(event);
            published += 1;
        }

        Ok(published)
    }

    /// New aggregate built from all events but the last one. `self` is left
    /// untouched.
    pub fn undo(&self) -> Self {
        self.at_version(self.version().saturating_sub(1))
    }

    /// New aggregate built from the first `version` events (clamped).
    pub fn at_version(&self, version: usize) -> Self {
        let mut events = self.all_events();
        events.truncate(version);
        Self::replay(events)
    }

    pub fn state(&self) -> &A {
        &self.state
    }

    pub fn uncommitted_events(&self) -> &[A::Event] {
        &self.uncommitted
    }

    pub fn all_events(&self) -> Vec<A::Event> {
        self.committed
            .iter()
            .chain(self.uncommitted.iter())
            .cloned()
            .collect()
    }

    /// Number of events the state was folded from
    pub fn version(&self) -> usize {
        self.committed.len() + self.uncommitted.len()
    }

    pub fn is_clean(&self) -> bool {
        self.uncommitted.is_empty()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    enum CounterEvent {
        Added(i64),
        Reset,
    }

    impl DomainEvent for CounterEvent {
        fn event_type(&self) -> &'static str {
            match self {
                CounterEvent::Added(_) => "Added",
                CounterEvent::Reset => "Reset",
            }
        }
    }

    #[derive(Debug, Default, PartialEq)]
    struct Counter {
        total: i64,
    }

    enum CounterCommand {
        Add(i64),
    }

    impl Aggregate for Counter {
        type Event = CounterEvent;
        type Command = CounterCommand;
        type Error = String;

        fn apply_event(&mut self, event: &Self::Event) {
            match event {
                CounterEvent::Added(n) => self.total += n,
                CounterEvent::Reset => self.total = 0,
            }
        }

        fn handle_command(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
            match command {
                CounterCommand::Add(n) if *n <= 0 => Err(format!("cannot add {}", n)),
                CounterCommand::Add(n) => Ok(vec![CounterEvent::Added(*n)]),
            }
        }
    }

    fn history() -> Vec<CounterEvent> {
        vec![
            CounterEvent::Added(2),
            CounterEvent::Added(5),
            CounterEvent::Reset,
            CounterEvent::Added(7),
        ]
    }

    #[test]
    fn test_replay_round_trips_and_is_clean() {
        let aggregate = EventSourced::<Counter>::replay(history());

        assert_eq!(aggregate.all_events(), history());
        assert!(aggregate.uncommitted_events().is_empty());
        assert!(aggregate.is_clean());
        assert_eq!(aggregate.state().total, 7);
        assert_eq!(aggregate.version(), 4);
    }

    #[test]
    fn test_replay_of_all_events_reproduces_state() {
        let mut aggregate = EventSourced::<Counter>::replay(history());
        aggregate.execute(&CounterCommand::Add(3)).unwrap();

        let rebuilt = EventSourced::<Counter>::replay(aggregate.all_events());

        assert_eq!(rebuilt.state(), aggregate.state());
        assert_eq!(rebuilt.all_events(), aggregate.all_events());
    }

    #[test]
    fn test_apply_stages_event() {
        let mut aggregate = EventSourced::<Counter>::default();
        aggregate.apply(CounterEvent::Added(4));

        assert_eq!(aggregate.state().total, 4);
        assert_eq!(aggregate.uncommitted_events(), &[CounterEvent::Added(4)]);
        assert!(!aggregate.is_clean());
    }

    #[test]
    fn test_rejected_command_has_no_side_effect() {
        let mut aggregate = EventSourced::<Counter>::replay(history());

        let result = aggregate.execute(&CounterCommand::Add(-1));

        assert_eq!(result, Err("cannot add -1".to_string()));
        assert!(aggregate.is_clean());
        assert_eq!(aggregate.all_events(), history());
        assert_eq!(aggregate.state().total, 7);
    }

    #[test]
    fn test_commit_publishes_in_order() {
        let mut aggregate = EventSourced::<Counter>::default();
        aggregate.apply(CounterEvent::Added(1));
        aggregate.apply(CounterEvent::Added(2));

        let mut published = Vec::new();
        let count = aggregate
            .commit(|e| {
                published.push(e.clone());
                Ok::<(), String>(())
            })
            .unwrap();

        assert_eq!(count, 2);
        assert_eq!(published, vec![CounterEvent::Added(1), CounterEvent::Added(2)]);
        assert!(aggregate.is_clean());
        assert_eq!(aggregate.all_events(), published);
    }

    #[test]
    fn test_commit_on_clean_aggregate_is_noop() {
        let mut aggregate = EventSourced::<Counter>::replay(history());

        let mut calls = 0;
        let count = aggregate
            .commit(|_| {
                calls += 1;
                Ok::<(), String>(())
            })
            .unwrap();

        assert_eq!(count, 0);
        assert_eq!(calls, 0);
        assert_eq!(aggregate.all_events(), history());
    }

    #[test]
    fn test_partial_commit_keeps_remaining_events() {
        let mut aggregate = EventSourced::<Counter>::default();
        for n in 1..=3 {
            aggregate.apply(CounterEvent::Added(n));
        }

        let mut published = Vec::new();
        let result = aggregate.commit(|e| {
            if *e == CounterEvent::Added(2) {
                return Err("disk full");
            }
            published.push(e.clone());
            Ok(())
        });

        assert_eq!(result, Err("disk full"));
        assert_eq!(published, vec![CounterEvent::Added(1)]);
        assert_eq!(
            aggregate.uncommitted_events(),
            &[CounterEvent::Added(2), CounterEvent::Added(3)]
        );
        // Order is preserved across the committed/uncommitted split
        assert_eq!(
            aggregate.all_events(),
            vec![CounterEvent::Added(1), CounterEvent::Added(2), CounterEvent::Added(3)]
        );

        // Retry resumes at the failed event
        let count = aggregate
            .commit(|e| {
                published.push(e.clone());
                Ok::<(), &str>(())
            })
            .unwrap();
        assert_eq!(count, 2);
        assert_eq!(published, aggregate.all_events());
        assert!(aggregate.is_clean());
    }

    #[test]
    fn test_undo_drops_last_event_without_touching_original() {
        let aggregate = EventSourced::<Counter>::replay(history());

        let previous = aggregate.undo();

        assert_eq!(previous.all_events(), history()[..3].to_vec());
        assert_eq!(previous.state().total, 0);
        assert!(previous.is_clean());
        assert_eq!(aggregate.all_events(), history());
        assert_eq!(aggregate.state().total, 7);
    }

    #[test]
    fn test_undo_includes_uncommitted_events() {
        let mut aggregate = EventSourced::<Counter>::replay(vec![CounterEvent::Added(1)]);
        aggregate.apply(CounterEvent::Added(10));
        aggregate.apply(CounterEvent::Added(100));

        let previous = aggregate.undo();

        assert_eq!(previous.all_events(), vec![CounterEvent::Added(1), CounterEvent::Added(10)]);
        assert_eq!(previous.state().total, 11);
    }

    #[test]
    fn test_undo_at_boundaries_yields_empty_aggregate() {
        let single = EventSourced::<Counter>::replay(vec![CounterEvent::Added(1)]);
        assert!(single.undo().all_events().is_empty());
        assert_eq!(single.undo().state(), &Counter::default());

        let empty = EventSourced::<Counter>::default();
        assert!(empty.undo().all_events().is_empty());
    }

    #[test]
    fn test_at_version_clamps() {
        let aggregate = EventSourced::<Counter>::replay(history());

        assert_eq!(aggregate.at_version(2).state().total, 7);
        assert_eq!(aggregate.at_version(0).version(), 0);
        assert_eq!(aggregate.at_version(99).all_events(), history());
    }
}
