//! Core lifecycle types and logic.
//!
//! This module contains the pure part of the controller:
//! - State definitions via the `State` trait and the closed `DeviceState`
//! - Commands and the single edge each one owns
//! - Transition history
//!
//! Nothing here mutates a device; `crate::device` drives these types.

mod command;
mod history;
mod state;

pub use command::{Command, ParseCommandError};
pub use history::{StateHistory, StateTransition};
pub use state::{is_valid_code, DeviceState, State};
