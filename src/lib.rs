//! Device Lifecycle: a closed four-state device controller
//!
//! A [`Device`] moves through a fixed cycle of states:
//!
//! ```text
//! Idle --receive_command--> Receiving --process_command--> Executing
//!   ^                                                          |
//!   +---------reset---------- Completed <----complete_task-----+
//! ```
//!
//! Calling a transition from the wrong state is not an error. The device is
//! left untouched and the call reports that nothing happened.
//!
//! # Core Concepts
//!
//! - **State**: the closed [`DeviceState`] enum, one of exactly four values
//! - **Command**: the four named transitions, each with a single source and target
//! - **History**: ordered record of the transitions that actually happened
//! - **Snapshot**: serializable image of a device, validated on restore
//!
//! # Example
//!
//! ```rust
//! use device_lifecycle::{Device, DeviceState};
//!
//! let mut device = Device::new();
//! assert_eq!(device.current_state(), DeviceState::Idle);
//!
//! // Skipping ahead is ignored
//! assert!(!device.process_command());
//! assert_eq!(device.current_state(), DeviceState::Idle);
//!
//! assert!(device.receive_command());
//! assert!(device.process_command());
//! assert!(device.complete_task());
//! assert!(device.reset());
//! assert_eq!(device.current_state(), DeviceState::Idle);
//! assert!(device.is_valid());
//! ```

pub mod builder;
pub mod core;
pub mod device;
pub mod snapshot;

// Re-export commonly used types
pub use builder::{BuildError, DeviceBuilder};
pub use crate::core::{is_valid_code, Command, DeviceState, State, StateHistory, StateTransition};
pub use device::{Device, TransitionOutcome};
pub use snapshot::{DeviceSnapshot, SnapshotError, SnapshotViolation};
