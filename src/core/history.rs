//! Transition history tracking.
//!
//! Every transition an interpreter takes is recorded as a [`HistoryEntry`].
//! Unmatched events never produce an entry.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single taken transition.
///
/// # Example
///
/// ```rust
/// use session_machine::auth::AuthState;
/// use session_machine::core::HistoryEntry;
/// use chrono::Utc;
///
/// let entry = HistoryEntry {
///     from: AuthState::Uninitialized,
///     to: AuthState::LoggedIn,
///     event: "LOGIN".to_string(),
///     timestamp: Utc::now(),
/// };
/// assert_eq!(entry.event, "LOGIN");
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct HistoryEntry<S: State> {
    /// The state being left
    pub from: S,
    /// The state being entered
    pub to: S,
    /// Name of the event that fired the transition
    pub event: String,
    /// When the transition completed
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of taken transitions.
///
/// Only an interpreter appends to it; everything else reads.
///
/// # Example
///
/// ```rust
/// use session_machine::actions::RecordingSink;
/// use session_machine::auth::{auth_machine, AuthEvent, AuthState};
///
/// let mut service = auth_machine(RecordingSink::new()).unwrap().interpret();
/// service.start().unwrap();
/// service.send(AuthEvent::login("Jason")).unwrap();
/// service.send(AuthEvent::Logout).unwrap();
///
/// let path = service.history().get_path();
/// assert_eq!(
///     path,
///     vec![&AuthState::Uninitialized, &AuthState::LoggedIn, &AuthState::LoggedOut]
/// );
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    entries: Vec<HistoryEntry<S>>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append in place, dropping the oldest entries beyond `limit`.
    pub(crate) fn append(&mut self, entry: HistoryEntry<S>, limit: Option<usize>) {
        self.entries.push(entry);
        if let Some(limit) = limit {
            let excess = self.entries.len().saturating_sub(limit);
            self.entries.drain(..excess);
        }
    }

    /// Get the path of states traversed.
    ///
    /// Returns the `from` state of the first entry, then the `to` state of
    /// each entry in order.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.entries.first() {
            path.push(&first.from);
        }
        for entry in &self.entries {
            path.push(&entry.to);
        }
        path
    }

    /// Time between the first and last recorded transition.
    ///
    /// Returns `None` if the history is empty.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.entries.first(), self.entries.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Get all entries in order.
    pub fn transitions(&self) -> &[HistoryEntry<S>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum Phase {
        Idle,
        Active,
        Done,
    }

    impl State for Phase {
        fn name(&self) -> &str {
            match self {
                Self::Idle => "Idle",
                Self::Active => "Active",
                Self::Done => "Done",
            }
        }
    }

    fn entry(from: Phase, to: Phase) -> HistoryEntry<Phase> {
        HistoryEntry {
            from,
            to,
            event: "GO".to_string(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history: StateHistory<Phase> = StateHistory::new();
        assert!(history.is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
    }

    fn history_of(entries: Vec<HistoryEntry<Phase>>) -> StateHistory<Phase> {
        let mut history = StateHistory::new();
        for entry in entries {
            history.append(entry, None);
        }
        history
    }

    #[test]
    fn get_path_returns_state_sequence() {
        let history = history_of(vec![
            entry(Phase::Idle, Phase::Active),
            entry(Phase::Active, Phase::Done),
        ]);

        let path = history.get_path();
        assert_eq!(path, vec![&Phase::Idle, &Phase::Active, &Phase::Done]);
    }

    #[test]
    fn append_respects_limit() {
        let mut history = StateHistory::new();
        history.append(entry(Phase::Idle, Phase::Active), Some(2));
        history.append(entry(Phase::Active, Phase::Done), Some(2));
        history.append(entry(Phase::Done, Phase::Idle), Some(2));

        assert_eq!(history.len(), 2);
        assert_eq!(history.transitions()[0].from, Phase::Active);
        assert_eq!(history.transitions()[1].to, Phase::Idle);
    }

    #[test]
    fn append_without_limit_keeps_everything() {
        let mut history = StateHistory::new();
        for _ in 0..5 {
            history.append(entry(Phase::Idle, Phase::Active), None);
        }
        assert_eq!(history.len(), 5);
    }

    #[test]
    fn single_entry_has_duration_zero() {
        let history = history_of(vec![entry(Phase::Idle, Phase::Active)]);
        assert_eq!(history.duration(), Some(Duration::from_secs(0)));
    }

    #[test]
    fn duration_spans_first_to_last() {
        let mut first = entry(Phase::Idle, Phase::Active);
        let mut last = entry(Phase::Active, Phase::Done);
        first.timestamp = Utc::now();
        last.timestamp = first.timestamp + chrono::Duration::seconds(90);

        let history = history_of(vec![first, last]);
        assert_eq!(history.duration(), Some(Duration::from_secs(90)));
    }

    #[test]
    fn history_serializes_correctly() {
        let history = history_of(vec![entry(Phase::Idle, Phase::Active)]);

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: StateHistory<Phase> = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.len(), 1);
        assert_eq!(deserialized.transitions()[0].event, "GO");
    }
}
