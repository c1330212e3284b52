//! Builder API for configuring devices.
//!
//! This module provides the fluent `DeviceBuilder` and the `state_enum!`
//! macro used to declare closed state sets.

pub mod device;
pub mod error;
pub mod macros;

pub use device::DeviceBuilder;
pub use error::BuildError;
