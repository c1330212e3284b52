//! Outcome of a single transition attempt.

use crate::core::DeviceState;

/// What happened when a command was applied.
///
/// An ignored command is not a failure: the device simply was not in the
/// command's source state, and its state is unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The device moved along the command's edge
    Transitioned { from: DeviceState, to: DeviceState },

    /// The device was in the wrong state; nothing changed
    Ignored { state: DeviceState },
}

impl TransitionOutcome {
    pub fn is_transitioned(&self) -> bool {
        matches!(self, Self::Transitioned { .. })
    }

    /// State of the device after the attempt.
    pub fn state(&self) -> DeviceState {
        match self {
            Self::Transitioned { to, .. } => *to,
            Self::Ignored { state } => *state,
        }
    }
}

impl From<TransitionOutcome> for bool {
    fn from(outcome: TransitionOutcome) -> bool {
        outcome.is_transitioned()
    }
}
