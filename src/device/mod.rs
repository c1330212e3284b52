//! The device state controller.
//!
//! A `Device` holds exactly one `DeviceState` and moves it only along the
//! edges owned by each `Command`. Commands issued from the wrong state are
//! ignored and reported as such; they never fail.

mod outcome;

pub use outcome::TransitionOutcome;

use crate::builder::DeviceBuilder;
use crate::core::{Command, DeviceState, State, StateHistory, StateTransition};
use chrono::Utc;
use tracing::{debug, trace};

/// Controller for a single device's lifecycle.
///
/// Created in `Idle`. Mutation requires `&mut self`, so whoever owns the
/// device is its only writer.
///
/// # Example
///
/// ```rust
/// use device_lifecycle::{Command, Device, DeviceState, TransitionOutcome};
///
/// let mut device = Device::new();
///
/// let outcome = device.apply(Command::ReceiveCommand);
/// assert_eq!(
///     outcome,
///     TransitionOutcome::Transitioned {
///         from: DeviceState::Idle,
///         to: DeviceState::Receiving,
///     }
/// );
///
/// // Reset is only valid from Completed
/// let outcome = device.apply(Command::Reset);
/// assert_eq!(outcome, TransitionOutcome::Ignored { state: DeviceState::Receiving });
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Device {
    pub(crate) label: String,
    pub(crate) state: DeviceState,
    pub(crate) history: Option<StateHistory>,
}

impl Default for Device {
    fn default() -> Self {
        Self::new()
    }
}

impl Device {
    pub const DEFAULT_LABEL: &'static str = "device";

    /// Create a device in `Idle` with the default configuration.
    pub fn new() -> Self {
        Self {
            label: Self::DEFAULT_LABEL.to_string(),
            state: DeviceState::Idle,
            history: Some(StateHistory::new()),
        }
    }

    /// Start configuring a device.
    pub fn builder() -> DeviceBuilder {
        DeviceBuilder::new()
    }

    /// Get current state (pure)
    pub fn current_state(&self) -> DeviceState {
        self.state
    }

    /// Check that the device holds one of the four lifecycle states.
    ///
    /// Always true: `DeviceState` cannot represent anything else. Raw codes
    /// from outside are checked with [`crate::is_valid_code`] before a device
    /// is ever built from them.
    pub fn is_valid(&self) -> bool {
        crate::core::is_valid_code(self.state.code())
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Get transition history, if recording is enabled (pure)
    pub fn history(&self) -> Option<&StateHistory> {
        self.history.as_ref()
    }

    /// Check whether `command` would move the device right now (pure)
    pub fn can_apply(&self, command: Command) -> bool {
        command.source() == self.state
    }

    /// The one command that advances the device from its current state.
    pub fn available_command(&self) -> Command {
        Command::advancing_from(self.state)
    }

    /// Apply a command.
    ///
    /// If the device is in the command's source state it moves to the target
    /// state and the transition is recorded. Otherwise nothing changes.
    pub fn apply(&mut self, command: Command) -> TransitionOutcome {
        let (from, to) = command.edge();

        if self.state != from {
            trace!(
                device = %self.label,
                state = self.state.name(),
                %command,
                "command ignored"
            );
            return TransitionOutcome::Ignored { state: self.state };
        }

        self.state = to;

        if let Some(history) = &self.history {
            let transition_record = StateTransition {
                from,
                to,
                command,
                timestamp: Utc::now(),
                sequence: history.next_sequence(),
            };
            self.history = Some(history.record(transition_record));
        }

        debug!(
            device = %self.label,
            from = from.name(),
            to = to.name(),
            %command,
            "transitioned"
        );

        TransitionOutcome::Transitioned { from, to }
    }

    /// Apply each command in order, returning how many of them transitioned.
    pub fn run<I>(&mut self, commands: I) -> usize
    where
        I: IntoIterator<Item = Command>,
    {
        commands
            .into_iter()
            .filter(|command| self.apply(*command).is_transitioned())
            .count()
    }

    /// `Idle -> Receiving`. Returns true if the device moved.
    pub fn receive_command(&mut self) -> bool {
        self.apply(Command::ReceiveCommand).is_transitioned()
    }

    /// `Receiving -> Executing`. Returns true if the device moved.
    pub fn process_command(&mut self) -> bool {
        self.apply(Command::ProcessCommand).is_transitioned()
    }

    /// `Executing -> Completed`. Returns true if the device moved.
    pub fn complete_task(&mut self) -> bool {
        self.apply(Command::CompleteTask).is_transitioned()
    }

    /// `Completed -> Idle`. Returns true if the device moved.
    pub fn reset(&mut self) -> bool {
        self.apply(Command::Reset).is_transitioned()
    }
}
