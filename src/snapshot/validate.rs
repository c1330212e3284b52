//! Restore-time validation of snapshots.
//!
//! Uses Stillwater's `Validation` so a rejected snapshot reports every
//! problem at once instead of the first one found.

use super::error::SnapshotViolation;
use super::DeviceSnapshot;
use crate::core::{is_valid_code, DeviceState, StateHistory};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<SnapshotViolation>>;

fn require(ok: bool, violation: impl FnOnce() -> SnapshotViolation) -> Check {
    if ok {
        Validation::success(())
    } else {
        Validation::fail(violation())
    }
}

/// Check every restore rule, accumulating ALL violations.
pub(crate) fn validate(snapshot: &DeviceSnapshot) -> Check {
    let mut checks: Vec<Check> = vec![
        require(is_valid_code(snapshot.state_code), || {
            SnapshotViolation::UnknownStateCode {
                code: snapshot.state_code,
            }
        }),
        require(!snapshot.label.trim().is_empty(), || {
            SnapshotViolation::EmptyLabel
        }),
    ];

    if let Some(history) = &snapshot.history {
        checks.extend(history_checks(history, DeviceState::from_code(snapshot.state_code)));
    }

    Validation::all_vec(checks).map(|_| ())
}

fn history_checks(history: &StateHistory, state: Option<DeviceState>) -> Vec<Check> {
    let mut checks = Vec::new();
    let transitions = history.transitions();

    if let Some(capacity) = history.capacity() {
        checks.push(require(capacity > 0, || SnapshotViolation::ZeroHistoryCapacity));
        checks.push(require(transitions.len() <= capacity, || {
            SnapshotViolation::HistoryOverCapacity {
                len: transitions.len(),
                capacity,
            }
        }));
    }

    for transition in transitions {
        checks.push(require(transition.follows_edge(), || {
            SnapshotViolation::EdgeMismatch {
                sequence: transition.sequence,
                command: transition.command,
                from: transition.from,
                to: transition.to,
            }
        }));
    }

    for pair in transitions.windows(2) {
        let (previous, next) = (&pair[0], &pair[1]);
        checks.push(require(previous.to == next.from, || {
            SnapshotViolation::BrokenChain {
                sequence: next.sequence,
                expected: previous.to,
                found: next.from,
            }
        }));
        checks.push(require(previous.sequence.checked_add(1) == Some(next.sequence), || {
            SnapshotViolation::SequenceGap {
                previous: previous.sequence,
                found: next.sequence,
            }
        }));
    }

    checks.push(require(history.total_recorded() < u64::MAX, || {
        SnapshotViolation::SequenceExhausted
    }));

    let Some(first) = transitions.first() else {
        checks.push(require(history.total_recorded() == 0, || {
            SnapshotViolation::TotalMismatch {
                total: history.total_recorded(),
                last: 0,
            }
        }));
        if let Some(state) = state {
            checks.push(require(state == DeviceState::Idle, || {
                SnapshotViolation::StateWithoutHistory { state }
            }));
        }
        return checks;
    };

    // Nothing was evicted, so the first entry is the device's first transition
    let complete = history.capacity().is_none()
        || history.total_recorded() <= transitions.len() as u64;
    if complete {
        checks.push(require(first.from == DeviceState::Idle, || {
            SnapshotViolation::StartNotIdle { found: first.from }
        }));
        checks.push(require(first.sequence == 1, || {
            SnapshotViolation::FirstSequence {
                found: first.sequence,
            }
        }));
    }

    if let Some(last) = history.last() {
        checks.push(require(last.sequence == history.total_recorded(), || {
            SnapshotViolation::TotalMismatch {
                total: history.total_recorded(),
                last: last.sequence,
            }
        }));

        // An unknown state code is already reported on its own
        if let Some(state) = state {
            checks.push(require(last.to == state, || {
                SnapshotViolation::StateMismatch {
                    history: last.to,
                    state,
                }
            }));
        }
    }

    checks
}
