//! Commands that drive the device lifecycle.

use super::state::DeviceState;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the four lifecycle transitions.
///
/// Each command owns exactly one edge of the lifecycle graph: it moves the
/// device from a single source state to a single target state and does
/// nothing from anywhere else.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    /// `Idle -> Receiving`
    ReceiveCommand,
    /// `Receiving -> Executing`
    ProcessCommand,
    /// `Executing -> Completed`
    CompleteTask,
    /// `Completed -> Idle`
    Reset,
}

/// Errors that can occur when parsing a command name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown command '{input}', expected one of: receive_command, process_command, complete_task, reset")]
pub struct ParseCommandError {
    pub input: String,
}

impl Command {
    /// Every command, in lifecycle order.
    pub const ALL: [Command; 4] = [
        Self::ReceiveCommand,
        Self::ProcessCommand,
        Self::CompleteTask,
        Self::Reset,
    ];

    /// The `(source, target)` edge this command owns.
    pub const fn edge(self) -> (DeviceState, DeviceState) {
        match self {
            Self::ReceiveCommand => (DeviceState::Idle, DeviceState::Receiving),
            Self::ProcessCommand => (DeviceState::Receiving, DeviceState::Executing),
            Self::CompleteTask => (DeviceState::Executing, DeviceState::Completed),
            Self::Reset => (DeviceState::Completed, DeviceState::Idle),
        }
    }

    pub const fn source(self) -> DeviceState {
        self.edge().0
    }

    pub const fn target(self) -> DeviceState {
        self.edge().1
    }

    /// The command that advances a device out of `state`.
    ///
    /// The lifecycle is a single cycle, so every state has exactly one.
    pub const fn advancing_from(state: DeviceState) -> Command {
        match state {
            DeviceState::Idle => Self::ReceiveCommand,
            DeviceState::Receiving => Self::ProcessCommand,
            DeviceState::Executing => Self::CompleteTask,
            DeviceState::Completed => Self::Reset,
        }
    }

    /// Snake-case name, as accepted by `FromStr`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::ReceiveCommand => "receive_command",
            Self::ProcessCommand => "process_command",
            Self::CompleteTask => "complete_task",
            Self::Reset => "reset",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseCommandError {
                input: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_form_a_single_cycle() {
        for pair in Command::ALL.windows(2) {
            assert_eq!(pair[0].target(), pair[1].source());
        }
        assert_eq!(Command::Reset.target(), Command::ReceiveCommand.source());
    }

    #[test]
    fn every_state_is_the_source_of_exactly_one_command() {
        for state in DeviceState::ALL {
            let sources = Command::ALL.iter().filter(|c| c.source() == *state).count();
            assert_eq!(sources, 1, "state {state}");
        }
    }

    #[test]
    fn advancing_from_agrees_with_edges() {
        for state in DeviceState::ALL {
            assert_eq!(Command::advancing_from(*state).source(), *state);
        }
    }

    #[test]
    fn parse_accepts_snake_case_names() {
        assert_eq!("receive_command".parse(), Ok(Command::ReceiveCommand));
        assert_eq!("process_command".parse(), Ok(Command::ProcessCommand));
        assert_eq!(" complete_task ".parse(), Ok(Command::CompleteTask));
        assert_eq!("RESET".parse(), Ok(Command::Reset));
    }

    #[test]
    fn parse_rejects_unknown_names() {
        let err = "explode".parse::<Command>().unwrap_err();
        assert_eq!(err.input, "explode");
        assert!(err.to_string().contains("explode"));
    }

    #[test]
    fn display_round_trips_through_parse() {
        for command in Command::ALL {
            assert_eq!(command.to_string().parse(), Ok(command));
        }
    }

    #[test]
    fn command_serializes_as_snake_case() {
        let json = serde_json::to_string(&Command::CompleteTask).unwrap();
        assert_eq!(json, "\"complete_task\"");
    }
}
