//! Snapshot error types.

use crate::core::{Command, DeviceState};
use thiserror::Error;

/// Errors that can occur during snapshot operations
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    Serialization(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    Deserialization(String),

    /// Snapshot version is not supported by this version
    #[error("Unsupported snapshot version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Snapshot decoded but describes a device that cannot exist
    #[error("Snapshot rejected with {} violation(s): {}", .0.len(), join(.0))]
    Invalid(Vec<SnapshotViolation>),
}

fn join(violations: &[SnapshotViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A single reason a snapshot cannot be restored
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotViolation {
    #[error("unknown state code {code}")]
    UnknownStateCode { code: u8 },

    #[error("label is empty")]
    EmptyLabel,

    #[error("history capacity is zero")]
    ZeroHistoryCapacity,

    #[error("history holds {len} entries but capacity is {capacity}")]
    HistoryOverCapacity { len: usize, capacity: usize },

    #[error("history entry {sequence}: {command} cannot move {from} to {to}")]
    EdgeMismatch {
        sequence: u64,
        command: Command,
        from: DeviceState,
        to: DeviceState,
    },

    #[error("history entry {sequence} starts at {found} but previous entry ended at {expected}")]
    BrokenChain {
        sequence: u64,
        expected: DeviceState,
        found: DeviceState,
    },

    #[error("history entry {found} follows entry {previous}")]
    SequenceGap { previous: u64, found: u64 },

    #[error("history counts {total} recorded transitions but its last entry is {last}")]
    TotalMismatch { total: u64, last: u64 },

    #[error("history counter is exhausted")]
    SequenceExhausted,

    #[error("history is empty but snapshot state is {state}")]
    StateWithoutHistory { state: DeviceState },

    #[error("history starts at {found} instead of Idle")]
    StartNotIdle { found: DeviceState },

    #[error("first history entry has sequence {found} instead of 1")]
    FirstSequence { found: u64 },

    #[error("history ends at {history} but snapshot state is {state}")]
    StateMismatch {
        history: DeviceState,
        state: DeviceState,
    },
}
