//! State trait and the closed device state set.
//!
//! All lifecycle states implement `State`, which provides pure methods for
//! inspecting state properties without side effects.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for lifecycle states.
///
/// All methods are pure - no side effects.
///
/// # Required Traits
///
/// - `Copy` + `PartialEq`: states are small values compared on every transition
/// - `Debug`: states must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: states appear in snapshots and history
///
/// # Example
///
/// ```rust
/// use device_lifecycle::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
/// enum Lamp {
///     Off,
///     On,
///     Burnt,
/// }
///
/// impl State for Lamp {
///     fn name(&self) -> &str {
///         match self {
///             Self::Off => "Off",
///             Self::On => "On",
///             Self::Burnt => "Burnt",
///         }
///     }
///
///     fn is_final(&self) -> bool {
///         matches!(self, Self::Burnt)
///     }
///
///     fn is_error(&self) -> bool {
///         matches!(self, Self::Burnt)
///     }
/// }
/// ```
pub trait State:
    Copy + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    /// Check if this is a final state.
    ///
    /// For the device lifecycle "final" means terminal until an explicit
    /// reset, not terminal forever.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Check if this is an error state.
    ///
    /// Default implementation returns `false`.
    fn is_error(&self) -> bool {
        false
    }
}

crate::state_enum! {
    /// The four states a device can hold.
    ///
    /// The set is closed: no fifth value is representable. The numeric code
    /// of each variant is its raw form inside a snapshot.
    #[derive(Default)]
    pub enum DeviceState {
        /// Waiting for a command. Initial state.
        #[default]
        Idle = 0,
        /// A command has arrived.
        Receiving = 1,
        /// The command is being executed.
        Executing = 2,
        /// The task finished; stays here until reset.
        Completed = 3,
    }
    final: [Completed]
}

/// Check whether a raw state code names one of the device states.
///
/// `DeviceState` itself can never hold anything else, so this only matters
/// for raw codes arriving from outside, such as a deserialized snapshot.
///
/// # Example
///
/// ```rust
/// use device_lifecycle::is_valid_code;
///
/// assert!(is_valid_code(0));
/// assert!(is_valid_code(3));
/// assert!(!is_valid_code(4));
/// ```
pub fn is_valid_code(code: u8) -> bool {
    DeviceState::from_code(code).is_some()
}
