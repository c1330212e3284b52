//! Transition history tracking.
//!
//! Only transitions that actually moved the device are recorded. Ignored
//! commands leave no trace here.

use super::command::Command;
use super::state::DeviceState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Record of a single applied transition.
///
/// # Example
///
/// ```rust
/// use device_lifecycle::{Command, DeviceState, StateTransition};
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: DeviceState::Idle,
///     to: DeviceState::Receiving,
///     command: Command::ReceiveCommand,
///     timestamp: Utc::now(),
///     sequence: 1,
/// };
/// assert!(transition.follows_edge());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateTransition {
    /// The state being transitioned from
    pub from: DeviceState,
    /// The state being transitioned to
    pub to: DeviceState,
    /// The command that caused the transition
    pub command: Command,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
    /// Position of this transition among all transitions ever recorded, from 1
    pub sequence: u64,
}

impl StateTransition {
    /// Check that `from` and `to` are exactly the edge owned by `command`.
    pub fn follows_edge(&self) -> bool {
        self.command.edge() == (self.from, self.to)
    }
}

/// Ordered history of applied transitions.
///
/// History is immutable - `record` returns a new history with the
/// transition added. A bounded history drops its oldest entry once full,
/// but keeps counting so sequence numbers never repeat.
///
/// # Example
///
/// ```rust
/// use device_lifecycle::{Command, DeviceState, StateHistory, StateTransition};
/// use chrono::Utc;
///
/// let history = StateHistory::new();
///
/// let history = history.record(StateTransition {
///     from: DeviceState::Idle,
///     to: DeviceState::Receiving,
///     command: Command::ReceiveCommand,
///     timestamp: Utc::now(),
///     sequence: history.next_sequence(),
/// });
///
/// let path = history.get_path();
/// assert_eq!(path, vec![DeviceState::Idle, DeviceState::Receiving]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StateHistory {
    transitions: Vec<StateTransition>,
    capacity: Option<usize>,
    total_recorded: u64,
}

impl StateHistory {
    /// Create a new, unbounded, empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty history that keeps at most `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            ..Self::default()
        }
    }

    /// Record a transition, returning a new history.
    ///
    /// This does not mutate the existing history.
    ///
    /// # Example
    ///
    /// ```rust
    /// use device_lifecycle::{Command, DeviceState, StateHistory, StateTransition};
    /// use chrono::Utc;
    ///
    /// let history = StateHistory::new();
    /// let transition = StateTransition {
    ///     from: DeviceState::Idle,
    ///     to: DeviceState::Receiving,
    ///     command: Command::ReceiveCommand,
    ///     timestamp: Utc::now(),
    ///     sequence: 1,
    /// };
    ///
    /// let new_history = history.record(transition);
    /// assert_eq!(new_history.len(), 1);
    /// assert!(history.is_empty()); // Original unchanged
    /// ```
    pub fn record(&self, transition: StateTransition) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        if let Some(capacity) = self.capacity {
            let excess = transitions.len().saturating_sub(capacity);
            transitions.drain(..excess);
        }
        Self {
            transitions,
            capacity: self.capacity,
            total_recorded: self.total_recorded.saturating_add(1),
        }
    }

    /// Sequence number the next recorded transition should carry.
    pub fn next_sequence(&self) -> u64 {
        self.total_recorded.saturating_add(1)
    }

    /// Get the path of states traversed.
    ///
    /// Returns the `from` state of the oldest retained transition, then the
    /// `to` state of each transition.
    pub fn get_path(&self) -> Vec<DeviceState> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.first() {
            path.push(first.from);
        }
        path.extend(self.transitions.iter().map(|t| t.to));
        path
    }

    /// Get all retained transitions, oldest first.
    pub fn transitions(&self) -> &[StateTransition] {
        &self.transitions
    }

    pub fn last(&self) -> Option<&StateTransition> {
        self.transitions.last()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Maximum number of retained entries, if bounded.
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Number of transitions ever recorded, including evicted ones.
    pub fn total_recorded(&self) -> u64 {
        self.total_recorded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transition(command: Command, sequence: u64) -> StateTransition {
        let (from, to) = command.edge();
        StateTransition {
            from,
            to,
            command,
            timestamp: Utc::now(),
            sequence,
        }
    }

    fn full_cycle(history: StateHistory) -> StateHistory {
        Command::ALL.into_iter().fold(history, |h, command| {
            let seq = h.next_sequence();
            h.record(transition(command, seq))
        })
    }

    #[test]
    fn new_history_is_empty() {
        let history = StateHistory::new();
        assert!(history.is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.last().is_none());
        assert_eq!(history.total_recorded(), 0);
        assert_eq!(history.next_sequence(), 1);
    }

    #[test]
    fn record_is_immutable() {
        let history = StateHistory::new();
        let new_history = history.record(transition(Command::ReceiveCommand, 1));

        assert_eq!(history.len(), 0);
        assert_eq!(new_history.len(), 1);
    }

    #[test]
    fn get_path_returns_state_sequence() {
        let history = full_cycle(StateHistory::new());

        assert_eq!(
            history.get_path(),
            vec![
                DeviceState::Idle,
                DeviceState::Receiving,
                DeviceState::Executing,
                DeviceState::Completed,
                DeviceState::Idle,
            ]
        );
    }

    #[test]
    fn bounded_history_drops_oldest() {
        let history = full_cycle(StateHistory::with_capacity(2));

        assert_eq!(history.len(), 2);
        assert_eq!(history.total_recorded(), 4);
        assert_eq!(history.transitions()[0].command, Command::CompleteTask);
        assert_eq!(history.transitions()[0].sequence, 3);
        assert_eq!(history.last().map(|t| t.command), Some(Command::Reset));
        assert_eq!(
            history.get_path(),
            vec![DeviceState::Executing, DeviceState::Completed, DeviceState::Idle]
        );
    }

    #[test]
    fn sequence_numbers_are_contiguous() {
        let history = full_cycle(full_cycle(StateHistory::new()));
        let sequences: Vec<u64> = history.transitions().iter().map(|t| t.sequence).collect();
        assert_eq!(sequences, (1..=8).collect::<Vec<u64>>());
    }

    #[test]
    fn follows_edge_detects_mismatch() {
        let mut bogus = transition(Command::ReceiveCommand, 1);
        assert!(bogus.follows_edge());
        bogus.to = DeviceState::Completed;
        assert!(!bogus.follows_edge());
    }

    #[test]
    fn history_serializes_correctly() {
        let history = full_cycle(StateHistory::with_capacity(3));

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: StateHistory = serde_json::from_str(&json).unwrap();

        assert_eq!(history, deserialized);
    }
}
